//! Credential provider
//!
//! Supplies bearer tokens for the storage endpoint, either as a fixed string
//! or via the OAuth2 client-credentials flow with in-memory caching and
//! refresh on expiry. The listing core never sees this module; tokens are
//! applied by the HTTP client.

mod provider;
mod types;

pub use provider::TokenProvider;
pub use types::CachedToken;

#[cfg(test)]
mod tests;
