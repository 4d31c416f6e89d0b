#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/surfcast/surf/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core traits and types for marine forecast providers.
//!
//! This crate provides the foundational abstractions for acquiring forecasts:
//!
//! - [`MarineDataProvider`](provider::MarineDataProvider) - Base trait for all providers
//! - [`PointForecastProvider`](provider::PointForecastProvider) - Hourly point forecasts
//! - [`HttpTransport`](transport::HttpTransport) - Injected HTTP transport
//! - [`Normalizer`](normalize::Normalizer) - Validation and flattening of provider data

/// Error types for forecast acquisition.
pub mod error;
/// Validation and flattening of provider responses.
pub mod normalize;
/// Provider traits for fetching forecast data.
pub mod provider;
/// HTTP transport contract.
pub mod transport;
/// Core data types (Dimension, ForecastPoint, etc.).
pub mod types;

// Re-export commonly used items at crate root
pub use error::{ForecastError, Result};
pub use normalize::{NormalizedForecast, Normalizer};
pub use provider::{MarineDataProvider, PointForecastProvider};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, TransportError};
pub use types::{Dimension, ForecastPoint, RawForecastPoint, RawForecastResponse, SourceReadings};
