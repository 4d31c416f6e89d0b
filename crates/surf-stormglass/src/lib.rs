#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/surfcast/surf/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! StormGlass marine forecast provider.
//!
//! This crate implements the surf-core traits for the
//! [StormGlass](https://stormglass.io/) point forecast API.
//!
//! # Usage
//!
//! ```rust,ignore
//! use surf_stormglass::{StormGlassClient, StormGlassConfig};
//! use surf_core::PointForecastProvider;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = StormGlassClient::new(StormGlassConfig::from_env()?)?;
//!
//!     let points = client.fetch_points(-33.792726, 151.289824).await?;
//!     println!("{} hours", points.len());
//!
//!     Ok(())
//! }
//! ```

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use reqwest::Url;
use serde_json::Value;
use surf_core::{
    Dimension, ForecastError, ForecastPoint, HttpRequest, HttpTransport, MarineDataProvider,
    Normalizer, PointForecastProvider, RawForecastResponse, Result, TransportError,
};
use tracing::{debug, warn};

/// StormGlass connection settings.
pub mod config;
/// reqwest-backed transport.
pub mod transport;

pub use config::StormGlassConfig;
pub use transport::ReqwestTransport;

/// Provider name used in errors and logs.
pub const PROVIDER_NAME: &str = "StormGlass";

/// Data source whose readings are trusted for every dimension.
pub const STORMGLASS_SOURCE: &str = "noaa";

/// Default forecast horizon, in days from the moment of the call.
const DEFAULT_HORIZON_DAYS: i64 = 10;

/// Longest slice of a provider body quoted in an error message.
const MAX_BODY_SNIPPET: usize = 256;

/// Upper bound of the requested forecast window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForecastEnd {
    /// A fixed point in time.
    At(DateTime<Utc>),
    /// An offset from the moment the request is built.
    After(TimeDelta),
}

impl Default for ForecastEnd {
    fn default() -> Self {
        Self::After(TimeDelta::days(DEFAULT_HORIZON_DAYS))
    }
}

impl ForecastEnd {
    /// Returns the cutoff in epoch seconds, relative to `now`.
    ///
    /// Fails when the offset takes the cutoff outside the representable range.
    pub fn resolve(&self, now: DateTime<Utc>) -> Result<i64> {
        match self {
            Self::At(at) => Ok(at.timestamp()),
            Self::After(offset) => now
                .checked_add_signed(*offset)
                .map(|end| end.timestamp())
                .ok_or_else(|| {
                    ForecastError::pre_request(
                        PROVIDER_NAME,
                        format!("forecast end offset {offset} is out of range"),
                    )
                }),
        }
    }
}

/// StormGlass point forecast client.
///
/// Issues one GET per call through the injected [`HttpTransport`] and
/// normalizes the answer onto the `noaa` source.
#[derive(Clone)]
pub struct StormGlassClient {
    transport: Arc<dyn HttpTransport>,
    config: StormGlassConfig,
    end: ForecastEnd,
    normalizer: Normalizer,
}

impl fmt::Debug for StormGlassClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StormGlassClient")
            .field("transport", &self.transport)
            .field("config", &self.config)
            .field("end", &self.end)
            .finish()
    }
}

impl StormGlassClient {
    /// Create a client using the default reqwest transport.
    pub fn new(config: StormGlassConfig) -> Result<Self> {
        Ok(Self::with_transport(Arc::new(ReqwestTransport::new()?), config))
    }

    /// Create a client with a custom transport.
    #[must_use]
    pub fn with_transport(transport: Arc<dyn HttpTransport>, config: StormGlassConfig) -> Self {
        Self {
            transport,
            config,
            end: ForecastEnd::default(),
            normalizer: Normalizer::new(STORMGLASS_SOURCE),
        }
    }

    /// Set the upper bound of the requested forecast window.
    #[must_use]
    pub const fn with_end(mut self, end: ForecastEnd) -> Self {
        self.end = end;
        self
    }

    /// Build the point forecast request.
    fn build_request(&self, lat: f64, lng: f64, now: DateTime<Utc>) -> Result<HttpRequest> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(ForecastError::pre_request(
                PROVIDER_NAME,
                format!("invalid coordinates lat={lat} lng={lng}"),
            ));
        }

        let end = self.end.resolve(now)?;
        let url = Url::parse_with_params(
            &self.config.api_url,
            &[
                ("params", Dimension::request_params()),
                ("source", STORMGLASS_SOURCE.to_string()),
                ("end", end.to_string()),
                ("lat", lat.to_string()),
                ("lng", lng.to_string()),
            ],
        )
        .map_err(|e| {
            ForecastError::pre_request(
                PROVIDER_NAME,
                format!("invalid api url {:?}: {e}", self.config.api_url),
            )
        })?;

        Ok(HttpRequest::get(url).with_header("Authorization", self.config.api_token.as_str()))
    }

    /// Map a transport failure onto the error taxonomy.
    fn classify(err: TransportError) -> ForecastError {
        match err {
            TransportError::Request { status, body } => ForecastError::Transport {
                provider: PROVIDER_NAME.to_string(),
                status,
                payload: serialize_payload(body.as_deref()),
            },
            TransportError::Local(message) => ForecastError::pre_request(
                PROVIDER_NAME,
                Value::String(message).to_string(),
            ),
        }
    }

    /// Decode a successful response body.
    fn decode(body: &str) -> Result<RawForecastResponse> {
        let value: Value = serde_json::from_str(body).map_err(|e| {
            ForecastError::provider_data(PROVIDER_NAME, format!("{e}: {}", snippet(body)))
        })?;

        if let Some(errors) = value.get("errors") {
            return Err(ForecastError::provider_data(
                PROVIDER_NAME,
                format!("Error: {errors}"),
            ));
        }

        serde_json::from_value(value)
            .map_err(|e| ForecastError::provider_data(PROVIDER_NAME, e.to_string()))
    }
}

/// Returns at most [`MAX_BODY_SNIPPET`] characters of `body`.
fn snippet(body: &str) -> String {
    match body.char_indices().nth(MAX_BODY_SNIPPET) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

/// Serialize an error payload for diagnostics.
///
/// JSON bodies are re-serialized compactly, other text becomes a JSON string
/// and a missing body becomes `null`.
fn serialize_payload(body: Option<&str>) -> String {
    match body {
        Some(text) => serde_json::from_str::<Value>(text)
            .unwrap_or_else(|_| Value::String(text.to_string()))
            .to_string(),
        None => Value::Null.to_string(),
    }
}

impl MarineDataProvider for StormGlassClient {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn description(&self) -> &str {
        "StormGlass - Global marine weather forecast API"
    }

    fn source(&self) -> &str {
        self.normalizer.source()
    }
}

#[async_trait]
impl PointForecastProvider for StormGlassClient {
    async fn fetch_points(&self, lat: f64, lng: f64) -> Result<Vec<ForecastPoint>> {
        let request = self.build_request(lat, lng, Utc::now())?;
        debug!(provider = PROVIDER_NAME, lat, lng, "Fetching point forecast");

        let response = self.transport.get(&request).await.map_err(|e| {
            let err = Self::classify(e);
            warn!(provider = PROVIDER_NAME, error = %err, "Point forecast request failed");
            err
        })?;

        let raw = Self::decode(&response.body)?;
        let normalized = self.normalizer.normalize_with_report(&raw);

        if normalized.dropped > 0 {
            debug!(
                provider = PROVIDER_NAME,
                kept = normalized.points.len(),
                dropped = normalized.dropped,
                "Dropped incomplete forecast hours"
            );
        }

        Ok(normalized.points)
    }
}
