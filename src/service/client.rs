//! Typed client handles for the blob service

use super::types::{BlobItem, ListBlobsResponse, ListOptions};
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::page::{Page, PageFetcher, PagedLister};
use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

/// Root client for one storage account
pub struct BlobStore {
    http: Arc<HttpClient>,
    endpoint: String,
}

impl BlobStore {
    /// Create a store client for the given account endpoint
    pub fn new(endpoint: impl Into<String>, http: HttpClient) -> Result<Self> {
        let endpoint = endpoint.into();
        Url::parse(&endpoint)?;
        Ok(Self {
            http: Arc::new(http),
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// Account endpoint URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Get a handle for a container (no request is made)
    pub fn container(&self, name: impl Into<String>) -> ContainerClient {
        ContainerClient {
            http: Arc::clone(&self.http),
            endpoint: self.endpoint.clone(),
            name: name.into(),
            list_options: ListOptions::default(),
        }
    }
}

impl std::fmt::Debug for BlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlobStore")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

/// Handle for one container
pub struct ContainerClient {
    http: Arc<HttpClient>,
    endpoint: String,
    name: String,
    list_options: ListOptions,
}

impl ContainerClient {
    /// Container name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full container URL
    pub fn url(&self) -> String {
        format!("{}/{}", self.endpoint, self.name)
    }

    /// Set the segment size used by listings from this handle
    #[must_use]
    pub fn with_list_options(mut self, options: ListOptions) -> Self {
        self.list_options = options;
        self
    }

    /// Create the container
    ///
    /// Returns `true` if it was created, `false` if it already existed
    /// (the service answers 409 in that case and the sample resumes).
    pub async fn create(&self) -> Result<bool> {
        let config = RequestConfig::new().query("restype", "container");
        match self.http.put_with_config(&self.url(), config).await {
            Ok(response) => {
                info!(
                    "Container create response was {}",
                    response.status().as_u16()
                );
                Ok(true)
            }
            Err(e) if e.status() == Some(409) => {
                info!("{} container already exists, resuming", self.name);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Delete the container and everything in it
    pub async fn delete(&self) -> Result<()> {
        let config = RequestConfig::new().query("restype", "container");
        self.http.delete_with_config(&self.url(), config).await?;
        info!("Container deleted: {}", self.url());
        Ok(())
    }

    /// Get a handle for a blob in this container (no request is made)
    pub fn blob(&self, name: impl Into<String>) -> BlobClient {
        BlobClient {
            http: Arc::clone(&self.http),
            endpoint: self.endpoint.clone(),
            container: self.name.clone(),
            name: name.into(),
        }
    }

    /// Fetch one listing segment
    ///
    /// `marker` of `None` retrieves the first segment; otherwise pass the
    /// continuation from the previous page verbatim.
    pub async fn list_segment(&self, marker: Option<&str>) -> Result<Page<BlobItem>> {
        let mut config = RequestConfig::new()
            .query("restype", "container")
            .query("comp", "list")
            .query("maxresults", self.list_options.max_results.to_string());
        if let Some(marker) = marker {
            config = config.query("marker", marker);
        }

        let response: ListBlobsResponse =
            self.http.get_json_with_config(&self.url(), config).await?;
        let page = response.into_page();
        debug!(
            container = %self.name,
            items = page.len(),
            more = !page.is_last(),
            "fetched list segment"
        );
        Ok(page)
    }

    /// Stream every blob in the container across all segments
    pub fn list(&self) -> impl Stream<Item = Result<BlobItem>> + '_ {
        PagedLister::new(self).into_stream()
    }

    /// Collect every blob in the container into a vector
    pub async fn list_all(&self) -> Result<Vec<BlobItem>> {
        PagedLister::new(self).collect_all().await
    }
}

#[async_trait]
impl PageFetcher for ContainerClient {
    type Item = BlobItem;

    async fn fetch(&self, token: Option<&str>) -> Result<Page<BlobItem>> {
        self.list_segment(token).await
    }
}

impl std::fmt::Debug for ContainerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContainerClient")
            .field("url", &self.url())
            .finish_non_exhaustive()
    }
}

/// Handle for one blob
pub struct BlobClient {
    http: Arc<HttpClient>,
    endpoint: String,
    container: String,
    name: String,
}

impl BlobClient {
    /// Blob name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full blob URL
    pub fn url(&self) -> String {
        format!("{}/{}/{}", self.endpoint, self.container, self.name)
    }

    /// Upload the given bytes as this blob (single-shot)
    pub async fn put(&self, data: Bytes) -> Result<()> {
        let config = RequestConfig::new()
            .header("content-type", "application/octet-stream")
            .bytes(data);
        let response = self.http.put_with_config(&self.url(), config).await?;
        info!(
            "Completed upload request, status {}",
            response.status().as_u16()
        );
        Ok(())
    }

    /// Download the blob's contents
    pub async fn get(&self) -> Result<Bytes> {
        let response = self.http.get(&self.url()).await?;
        let data = response.bytes().await.map_err(Error::Http)?;
        Ok(data)
    }

    /// Delete the blob
    pub async fn delete(&self) -> Result<()> {
        self.http
            .delete_with_config(&self.url(), RequestConfig::new())
            .await?;
        info!("Blob deleted: {}", self.url());
        Ok(())
    }

    /// Upload a local file as this blob
    pub async fn upload_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let data = tokio::fs::read(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::Io(e)
            }
        })?;
        self.put(Bytes::from(data)).await
    }

    /// Download the blob to a local file
    pub async fn download_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let data = self.get().await?;
        tokio::fs::write(path.as_ref(), &data).await?;
        info!("The blob was downloaded to {}", path.as_ref().display());
        Ok(())
    }
}

impl std::fmt::Debug for BlobClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlobClient")
            .field("url", &self.url())
            .finish_non_exhaustive()
    }
}
