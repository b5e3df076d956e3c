//! Wire types for the blob service

use crate::page::Page;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One blob descriptor from a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobItem {
    /// Blob name within its container
    pub name: String,
    /// Snapshot tag, present only for snapshot entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<String>,
}

impl BlobItem {
    /// Create a plain blob item
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            snapshot: None,
        }
    }

    /// Create a snapshot entry
    pub fn snapshot(name: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            snapshot: Some(tag.into()),
        }
    }
}

impl std::fmt::Display for BlobItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Blob name: {}", self.name)?;
        if let Some(snapshot) = &self.snapshot {
            write!(f, ", Snapshot: {snapshot}")?;
        }
        Ok(())
    }
}

/// One segment of a list-blobs response as it arrives on the wire
///
/// The service may omit the item array entirely for an empty segment;
/// that decodes as `None` and is treated the same as an empty array.
#[derive(Debug, Clone, Deserialize)]
pub struct ListBlobsResponse {
    /// Blob descriptors in this segment, in service order
    #[serde(default)]
    pub blobs: Option<Vec<BlobItem>>,
    /// Marker for the next segment; absent or empty means this is the last
    #[serde(default)]
    pub next_marker: Option<String>,
}

impl ListBlobsResponse {
    /// Convert the wire segment into a [`Page`]
    ///
    /// An absent item array becomes an empty page, and an empty-string
    /// marker is normalized to "no more segments".
    pub fn into_page(self) -> Page<BlobItem> {
        let items = match self.blobs {
            Some(blobs) => blobs,
            None => {
                debug!("list segment carried no item collection");
                Vec::new()
            }
        };
        let continuation = self.next_marker.filter(|marker| !marker.is_empty());
        Page {
            items,
            continuation,
        }
    }
}

/// Options for segment listing
#[derive(Debug, Clone)]
pub struct ListOptions {
    /// Maximum items per segment
    pub max_results: u32,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self { max_results: 10 }
    }
}

impl ListOptions {
    /// Create options with the given segment size
    pub fn with_max_results(max_results: u32) -> Self {
        Self { max_results }
    }
}

#[cfg(test)]
mod wire_tests {
    use super::*;

    #[test]
    fn test_blob_item_display() {
        assert_eq!(
            BlobItem::new("SampleBlob.txt").to_string(),
            "Blob name: SampleBlob.txt"
        );
        assert_eq!(
            BlobItem::snapshot("SampleBlob.txt", "2024-01-01T00:00:00Z").to_string(),
            "Blob name: SampleBlob.txt, Snapshot: 2024-01-01T00:00:00Z"
        );
    }

    #[test]
    fn test_absent_item_collection_is_empty_page() {
        let response: ListBlobsResponse =
            serde_json::from_str(r#"{"next_marker": "m1"}"#).unwrap();
        let page = response.into_page();
        assert!(page.is_empty());
        assert_eq!(page.continuation.as_deref(), Some("m1"));
    }

    #[test]
    fn test_empty_marker_normalized() {
        let response: ListBlobsResponse =
            serde_json::from_str(r#"{"blobs": [{"name": "a"}], "next_marker": ""}"#).unwrap();
        let page = response.into_page();
        assert_eq!(page.len(), 1);
        assert!(page.is_last());
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let item: BlobItem =
            serde_json::from_str(r#"{"name": "a.txt", "snapshot": "s1"}"#).unwrap();
        assert_eq!(item, BlobItem::snapshot("a.txt", "s1"));

        let plain: BlobItem = serde_json::from_str(r#"{"name": "b.txt"}"#).unwrap();
        assert_eq!(plain, BlobItem::new("b.txt"));
    }
}
