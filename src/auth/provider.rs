//! Token provider implementation
//!
//! Handles acquiring and caching access tokens for the storage endpoint.

use super::types::CachedToken;
use crate::error::{Error, Result};
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Where tokens come from
#[derive(Debug, Clone)]
enum TokenSource {
    /// Fixed token supplied by the caller
    Static(String),
    /// OAuth2 client-credentials flow against a token endpoint
    ClientCredentials {
        token_url: String,
        client_id: String,
        client_secret: String,
        resource: Option<String>,
        scopes: Vec<String>,
    },
}

/// Supplies bearer tokens, caching OAuth2 tokens until they expire
pub struct TokenProvider {
    source: TokenSource,
    cached: Arc<RwLock<Option<CachedToken>>>,
    http_client: Client,
}

impl TokenProvider {
    /// Create a provider that always returns the given token
    pub fn static_token(token: impl Into<String>) -> Self {
        Self {
            source: TokenSource::Static(token.into()),
            cached: Arc::new(RwLock::new(None)),
            http_client: Client::new(),
        }
    }

    /// Create a provider using the OAuth2 client-credentials flow
    pub fn client_credentials(
        token_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            source: TokenSource::ClientCredentials {
                token_url: token_url.into(),
                client_id: client_id.into(),
                client_secret: client_secret.into(),
                resource: None,
                scopes: Vec::new(),
            },
            cached: Arc::new(RwLock::new(None)),
            http_client: Client::new(),
        }
    }

    /// Set the resource the token is requested for
    #[must_use]
    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        if let TokenSource::ClientCredentials {
            resource: ref mut r,
            ..
        } = self.source
        {
            *r = Some(resource.into());
        }
        self
    }

    /// Set the requested scopes
    #[must_use]
    pub fn with_scopes(mut self, scopes: Vec<String>) -> Self {
        if let TokenSource::ClientCredentials {
            scopes: ref mut s, ..
        } = self.source
        {
            *s = scopes;
        }
        self
    }

    /// Use a shared HTTP client for token requests
    #[must_use]
    pub fn with_client(mut self, http_client: Client) -> Self {
        self.http_client = http_client;
        self
    }

    /// Get a valid access token, refreshing if necessary
    pub async fn access_token(&self) -> Result<String> {
        if let TokenSource::Static(token) = &self.source {
            return Ok(token.clone());
        }

        // Check if we have a valid cached token
        {
            let cached = self.cached.read().await;
            if let Some(token) = cached.as_ref() {
                if !token.is_expired() {
                    return Ok(token.token.clone());
                }
            }
        }

        // Need to refresh - acquire write lock
        let mut cached = self.cached.write().await;

        // Double-check after acquiring write lock (another task might have refreshed)
        if let Some(token) = cached.as_ref() {
            if !token.is_expired() {
                return Ok(token.token.clone());
            }
        }

        let new_token = self.fetch_new_token().await?;
        let token_str = new_token.token.clone();
        *cached = Some(new_token);

        Ok(token_str)
    }

    /// Fetch a new token from the token endpoint
    async fn fetch_new_token(&self) -> Result<CachedToken> {
        let TokenSource::ClientCredentials {
            token_url,
            client_id,
            client_secret,
            resource,
            scopes,
        } = &self.source
        else {
            return Err(Error::auth("Token refresh not supported for static tokens"));
        };

        let mut form = vec![
            ("grant_type", "client_credentials".to_string()),
            ("client_id", client_id.clone()),
            ("client_secret", client_secret.clone()),
        ];

        if let Some(resource) = resource {
            form.push(("resource", resource.clone()));
        }

        if !scopes.is_empty() {
            form.push(("scope", scopes.join(" ")));
        }

        debug!("Requesting access token from {token_url}");

        let response = self
            .http_client
            .post(token_url)
            .form(&form)
            .send()
            .await
            .map_err(Error::Http)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::OAuth2 {
                message: format!("Token request failed with status {status}: {body}"),
            });
        }

        let token_response: TokenResponse = response.json().await.map_err(Error::Http)?;
        Ok(token_response.into_cached_token())
    }

    /// Clear the cached token (useful for testing or forced refresh)
    pub async fn clear_cache(&self) {
        let mut cached = self.cached.write().await;
        *cached = None;
    }
}

impl std::fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.source {
            TokenSource::Static(_) => "static",
            TokenSource::ClientCredentials { .. } => "client_credentials",
        };
        f.debug_struct("TokenProvider")
            .field("source", &kind)
            .finish_non_exhaustive()
    }
}

/// OAuth2 token response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    #[allow(dead_code)]
    token_type: Option<String>,
}

impl TokenResponse {
    fn into_cached_token(self) -> CachedToken {
        match self.expires_in {
            Some(secs) => CachedToken::expires_in(self.access_token, secs),
            None => CachedToken::new(self.access_token, None),
        }
    }
}
