#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/surfcast/surf/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Surf forecast acquisition for beaches.
//!
//! This crate re-exports the core types and provider implementations, and
//! provides a [`ForecastService`] that fetches forecasts for a set of beaches
//! and groups them by hour.
//!
//! # Features
//!
//! - `stormglass` - StormGlass point forecast provider (default)
//!
//! # Example
//!
//! ```rust,ignore
//! use surf::{Beach, BeachPosition, ForecastService, StormGlassConfig};
//!
//! #[tokio::main]
//! async fn main() -> surf::Result<()> {
//!     let service = ForecastService::with_stormglass(StormGlassConfig::from_env()?)?;
//!
//!     let beaches = [Beach::new("Manly", -33.792726, 151.289824, BeachPosition::E)];
//!     for hour in service.process_forecast_for_beaches(&beaches).await? {
//!         println!("{}: {} beaches", hour.time, hour.forecast.len());
//!     }
//!
//!     Ok(())
//! }
//! ```

// Core types and traits
pub use surf_core::*;

// Providers
#[cfg(feature = "stormglass")]
pub use surf_stormglass::{ForecastEnd, ReqwestTransport, StormGlassClient, StormGlassConfig};

mod forecast;
pub use forecast::{Beach, BeachForecast, BeachPosition, ForecastService, TimeForecast};
