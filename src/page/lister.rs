//! The traversal driver: a continuation-token loop as a lazy stream.

use super::types::{Page, PageFetcher};
use crate::error::Result;
use futures::stream::{self, Stream, TryStreamExt};
use std::collections::VecDeque;
use tracing::debug;

/// Traversal position between fetches
///
/// `Start -> (HasToken)* -> Done`; a fetch error ends the stream from any
/// fetching position.
#[derive(Debug)]
enum Traversal {
    Start,
    HasToken(String),
    Done,
}

/// Lazy, single-pass traversal of a paged remote collection
///
/// Holds only the injected fetcher; the current token lives inside the
/// produced stream. One lister produces one forward pass — re-listing means
/// constructing a new lister (restart-from-scratch, not rewind). Independent
/// listers share no state and may run concurrently.
///
/// The traversal is finite for well-behaved collections but tolerates a
/// remote that keeps returning tokens; callers wanting a bound apply one
/// externally, e.g. `StreamExt::take`.
pub struct PagedLister<F> {
    fetcher: F,
}

impl<F: PageFetcher> PagedLister<F> {
    /// Create a lister over the given fetcher
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Produce the item stream
    ///
    /// Yields every item of every page in page order, fetching the next page
    /// only when the buffered one is exhausted. No concurrent fetches are
    /// issued: each fetch needs the prior page's token. A fetch error is
    /// yielded as the final element after all items from earlier pages;
    /// already-delivered items are never retracted.
    pub fn into_stream(self) -> impl Stream<Item = Result<F::Item>> {
        let seed = (self.fetcher, Traversal::Start, VecDeque::new());
        stream::try_unfold(seed, |(fetcher, mut phase, mut buffered)| async move {
            loop {
                if let Some(item) = buffered.pop_front() {
                    return Ok(Some((item, (fetcher, phase, buffered))));
                }

                let token = match &phase {
                    Traversal::Start => None,
                    Traversal::HasToken(t) => Some(t.clone()),
                    Traversal::Done => return Ok(None),
                };

                let page: Page<F::Item> = fetcher.fetch(token.as_deref()).await?;
                debug!(
                    items = page.len(),
                    has_continuation = !page.is_last(),
                    "fetched page"
                );

                phase = match page.continuation {
                    Some(next) => Traversal::HasToken(next),
                    None => Traversal::Done,
                };
                buffered.extend(page.items);
                // An empty page with a token loops straight into the next
                // fetch; only a missing token terminates.
            }
        })
    }

    /// Drive the stream to completion, collecting every item
    pub async fn collect_all(self) -> Result<Vec<F::Item>> {
        self.into_stream().try_collect().await
    }
}
