//! Paged listing core
//!
//! # Overview
//!
//! Remote collections hand back their contents one bounded page at a time,
//! each page carrying an optional continuation token. This module turns that
//! protocol into a lazy item stream: [`PagedLister`] drives a [`PageFetcher`]
//! sequentially, yields every item of every page in order, and terminates
//! when a page arrives without a token.
//!
//! The core performs no I/O of its own. All transport lives behind the
//! fetcher, which makes the traversal fully testable with in-memory fakes.

mod lister;
mod types;

pub use lister::PagedLister;
pub use types::{fetch_fn, FetchFn, Page, PageFetcher};
