//! Page and fetcher abstractions used by the listing core.

use crate::error::Result;
use async_trait::async_trait;
use futures::future::BoxFuture;

/// One bounded batch of items from a remote collection
///
/// The continuation token is present iff more pages remain. Its absence is
/// the sole termination signal: a page with zero items but a token means the
/// traversal continues, and a first page that is both empty and tokenless is
/// the valid "collection has zero items" terminal state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items in remote-side order
    pub items: Vec<T>,
    /// Opaque cursor for the next page, if any
    pub continuation: Option<String>,
}

impl<T> Page<T> {
    /// Create a final page (no continuation)
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            continuation: None,
        }
    }

    /// Create a page followed by more data
    pub fn with_continuation(items: Vec<T>, token: impl Into<String>) -> Self {
        Self {
            items,
            continuation: Some(token.into()),
        }
    }

    /// Check if this is the last page
    pub fn is_last(&self) -> bool {
        self.continuation.is_none()
    }

    /// Number of items in this page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if this page carries no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Capability to fetch one page of a remote collection
///
/// `fetch(None)` retrieves the first page; `fetch(Some(token))` retrieves the
/// page after the one that produced `token`. Calls must be independent and
/// idempotent for a given token. Failures propagate unchanged to the
/// traversal's consumer; retry policy, if any, belongs inside the fetcher or
/// an outer decorator, never in the core.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Element type of the listed collection
    type Item: Send;

    /// Fetch the page identified by `token` (`None` for the first page)
    async fn fetch(&self, token: Option<&str>) -> Result<Page<Self::Item>>;
}

/// Adapter turning a closure into a [`PageFetcher`]
///
/// Useful for tests and ad-hoc fetchers where defining a type is overkill.
pub struct FetchFn<F> {
    f: F,
}

/// Wrap a closure as a [`PageFetcher`]
///
/// The closure receives the owned continuation token and returns a boxed
/// future resolving to the next page.
pub fn fetch_fn<F, T>(f: F) -> FetchFn<F>
where
    F: Fn(Option<String>) -> BoxFuture<'static, Result<Page<T>>> + Send + Sync,
    T: Send,
{
    FetchFn { f }
}

#[async_trait]
impl<F, T> PageFetcher for FetchFn<F>
where
    F: Fn(Option<String>) -> BoxFuture<'static, Result<Page<T>>> + Send + Sync,
    T: Send + 'static,
{
    type Item = T;

    async fn fetch(&self, token: Option<&str>) -> Result<Page<T>> {
        (self.f)(token.map(str::to_owned)).await
    }
}

#[async_trait]
impl<P: PageFetcher> PageFetcher for &P {
    type Item = P::Item;

    async fn fetch(&self, token: Option<&str>) -> Result<Page<Self::Item>> {
        (**self).fetch(token).await
    }
}
