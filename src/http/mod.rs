//! HTTP client with retry
//!
//! # Overview
//!
//! A thin transport layer over reqwest used by the blob service client and
//! the token provider. Handles base URL joining, default headers, bounded
//! retries with configurable backoff, and Retry-After aware 429 handling.
//! The paged listing core never touches this module; it only ever sees the
//! fetcher trait.

mod client;

pub use client::{BackoffType, HttpClient, HttpClientConfig, RequestConfig};
