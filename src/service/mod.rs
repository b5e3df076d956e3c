//! Blob service client
//!
//! # Overview
//!
//! Typed handles over the storage service's REST surface:
//! [`BlobStore`] for the account, [`ContainerClient`] for container lifecycle
//! and segment listing, [`BlobClient`] for single-blob operations.
//! `ContainerClient` implements [`crate::page::PageFetcher`], so a full
//! listing is just a [`crate::page::PagedLister`] driven over it.
//!
//! Transfer chunking, SAS signing and similar machinery are deliberately
//! absent; uploads and downloads are single-shot.

mod client;
mod types;

pub use client::{BlobClient, BlobStore, ContainerClient};
pub use types::{BlobItem, ListBlobsResponse, ListOptions};
