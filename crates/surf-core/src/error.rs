//! Error types for forecast acquisition.
//!
//! This module defines [`ForecastError`], which classifies failures by where
//! they happened relative to the provider call: before it, inside the
//! transport, or in the payload the provider returned.

use thiserror::Error;

/// Errors that can occur while acquiring forecast data.
#[derive(Error, Debug)]
pub enum ForecastError {
    /// Something broke before or outside the network exchange
    /// (invalid coordinates, malformed configuration, local transport setup).
    #[error("Unexpected error when trying to communicate to {provider}: {message}")]
    PreRequest {
        /// The provider the request was meant for.
        provider: String,
        /// Serialized description of the original failure.
        message: String,
    },

    /// The transport classified the failure as request-level
    /// (non-2xx status, connection failure, timeout).
    #[error(
        "Unexpected error returned by the {provider} service: Error: {payload} Code: {}",
        status_label(.status)
    )]
    Transport {
        /// The provider that was called.
        provider: String,
        /// HTTP status code, when the server answered.
        status: Option<u16>,
        /// Serialized error payload (`null` when there was none).
        payload: String,
    },

    /// The transport succeeded but the provider's payload reports an error
    /// or cannot be interpreted as a forecast.
    #[error("Unexpected response from the {provider} service: {message}")]
    ProviderData {
        /// The provider that was called.
        provider: String,
        /// The provider's error payload or the decoding failure.
        message: String,
    },

    /// Forecast processing for a set of beaches failed.
    #[error("Unexpected error during the forecast processing: {0}")]
    Processing(#[source] Box<ForecastError>),
}

impl ForecastError {
    /// Creates a [`ForecastError::PreRequest`] for `provider`.
    pub fn pre_request(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PreRequest {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Creates a [`ForecastError::ProviderData`] for `provider`.
    pub fn provider_data(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ProviderData {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Returns the HTTP status code carried by a transport failure.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            Self::Processing(inner) => inner.status(),
            _ => None,
        }
    }

    /// Returns true if the failure happened inside the transport.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        match self {
            Self::Transport { .. } => true,
            Self::Processing(inner) => inner.is_transport(),
            _ => false,
        }
    }
}

fn status_label(status: &Option<u16>) -> String {
    status.map_or_else(|| "none".to_string(), |s| s.to_string())
}

/// Result type alias using [`ForecastError`].
pub type Result<T> = std::result::Result<T, ForecastError>;
