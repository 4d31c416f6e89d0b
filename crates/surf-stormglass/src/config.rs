//! StormGlass connection settings.

use std::fmt;

use surf_core::{ForecastError, Result};

use crate::PROVIDER_NAME;

/// Default StormGlass point forecast endpoint.
pub const STORMGLASS_API_URL: &str = "https://api.stormglass.io/v2/weather/point";

/// Environment variable overriding the API URL.
pub const API_URL_ENV: &str = "STORMGLASS_API_URL";

/// Environment variable holding the API token.
pub const API_TOKEN_ENV: &str = "STORMGLASS_API_TOKEN";

/// Endpoint and credential for the StormGlass API.
#[derive(Clone, PartialEq, Eq)]
pub struct StormGlassConfig {
    /// Point forecast endpoint.
    pub api_url: String,
    /// Credential sent verbatim in the `Authorization` header.
    pub api_token: String,
}

impl fmt::Debug for StormGlassConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StormGlassConfig")
            .field("api_url", &self.api_url)
            .field("api_token", &"[REDACTED]")
            .finish()
    }
}

impl StormGlassConfig {
    /// Create a configuration for a custom endpoint.
    #[must_use]
    pub fn new(api_url: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            api_token: api_token.into(),
        }
    }

    /// Create a configuration for the public endpoint.
    #[must_use]
    pub fn with_token(api_token: impl Into<String>) -> Self {
        Self::new(STORMGLASS_API_URL, api_token)
    }

    /// Read the configuration from `STORMGLASS_API_URL` (optional) and
    /// `STORMGLASS_API_TOKEN` (required).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_token = lookup(API_TOKEN_ENV)
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                ForecastError::pre_request(PROVIDER_NAME, format!("{API_TOKEN_ENV} is not set"))
            })?;
        let api_url = lookup(API_URL_ENV)
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| STORMGLASS_API_URL.to_string());

        Ok(Self { api_url, api_token })
    }
}
