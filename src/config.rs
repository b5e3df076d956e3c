//! Settings loaded for service principal authentication and the
//! storage account endpoint.
//!
//! Settings come from a JSON file. The path is taken either from an
//! explicit `--settings` flag or from the `BLOBCURSOR_SETTINGS`
//! environment variable.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable naming the settings file
pub const SETTINGS_ENV_VAR: &str = "BLOBCURSOR_SETTINGS";

/// Audience requested for storage tokens
pub const STORAGE_RESOURCE: &str = "https://storage.azure.com";

/// Authentication and account settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// OAuth2 authority base URL, e.g. `https://login.microsoftonline.com`
    #[serde(default)]
    pub authority_url: String,

    /// Directory (tenant) identifier
    #[serde(default)]
    pub tenant_id: String,

    /// Service principal client identifier
    #[serde(default)]
    pub client_id: String,

    /// Service principal secret
    #[serde(default)]
    pub client_secret: String,

    /// Storage account name, used to derive the account endpoint
    #[serde(default)]
    pub storage_account_name: String,

    /// Override for the account endpoint; when set it wins over the
    /// name-derived URL (useful for local emulators)
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Token audience override
    #[serde(default)]
    pub resource: Option<String>,
}

impl Settings {
    /// Load settings from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "cannot read settings file {}: {e}",
                path.display()
            ))
        })?;
        let settings: Self = serde_json::from_str(&contents)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from the path given, or fall back to the
    /// `BLOBCURSOR_SETTINGS` environment variable
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        match explicit_path {
            Some(path) => Self::from_file(path),
            None => {
                let path = std::env::var(SETTINGS_ENV_VAR).map_err(|_| {
                    Error::config(format!(
                        "no settings file given and {SETTINGS_ENV_VAR} is not set"
                    ))
                })?;
                Self::from_file(path)
            }
        }
    }

    /// Check that every required field is present
    pub fn validate(&self) -> Result<()> {
        if self.authority_url.is_empty() {
            return Err(Error::missing_setting("authority_url"));
        }
        if self.tenant_id.is_empty() {
            return Err(Error::missing_setting("tenant_id"));
        }
        if self.client_id.is_empty() {
            return Err(Error::missing_setting("client_id"));
        }
        if self.client_secret.is_empty() {
            return Err(Error::missing_setting("client_secret"));
        }
        if self.storage_account_name.is_empty() && self.endpoint.is_none() {
            return Err(Error::missing_setting("storage_account_name"));
        }
        Ok(())
    }

    /// Token endpoint derived from the authority and tenant
    pub fn token_url(&self) -> String {
        format!(
            "{}/{}/oauth2/token",
            self.authority_url.trim_end_matches('/'),
            self.tenant_id
        )
    }

    /// Account endpoint, either the override or the name-derived URL
    pub fn account_endpoint(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => format!(
                "https://{}.blob.core.windows.net",
                self.storage_account_name
            ),
        }
    }

    /// Token audience
    pub fn resource(&self) -> &str {
        self.resource.as_deref().unwrap_or(STORAGE_RESOURCE)
    }
}
