// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]

//! # blobcursor
//!
//! A small blob storage client built around continuation-token paging.
//! Listing a container walks the service's segments lazily and yields
//! items in service order, without ever buffering the whole listing.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use blobcursor::http::{HttpClient, HttpClientConfig};
//! use blobcursor::service::BlobStore;
//! use blobcursor::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let store = BlobStore::new("https://myaccount.blob.core.windows.net", HttpClient::new())?;
//!     let container = store.container("quickstart");
//!     container.create().await?;
//!
//!     for item in container.list_all().await? {
//!         println!("{item}");
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! The paging machinery is generic: anything that can fetch one page
//! given an optional continuation token implements [`page::PageFetcher`],
//! and [`page::PagedLister`] turns it into a stream of items.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

/// Error types for the crate
pub mod error;

/// Continuation-token paging core
pub mod page;

/// OAuth2 token acquisition and caching
pub mod auth;

/// HTTP client with retry and backoff
pub mod http;

/// Blob service client
pub mod service;

/// Settings loading
pub mod config;

/// Command-line interface
pub mod cli;

pub use error::{Error, Result};
pub use page::{fetch_fn, FetchFn, Page, PageFetcher, PagedLister};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
