//! Provider traits for fetching marine forecast data.
//!
//! - [`MarineDataProvider`] - Base trait for all forecast providers
//! - [`PointForecastProvider`] - Hourly forecasts for a geographic point

use async_trait::async_trait;
use std::fmt::Debug;

use crate::{error::Result, types::ForecastPoint};

/// Base trait for all forecast providers.
pub trait MarineDataProvider: Send + Sync + Debug {
    /// Returns the name of this provider (e.g., "StormGlass").
    fn name(&self) -> &str;

    /// Returns a description of this provider.
    fn description(&self) -> &str;

    /// Returns the data-source identifier whose readings this provider trusts.
    fn source(&self) -> &str;
}

/// Provider for hourly forecasts at a geographic point.
#[async_trait]
pub trait PointForecastProvider: MarineDataProvider {
    /// Fetches the canonical forecast hours for a point.
    ///
    /// Performs exactly one provider call. Hours the provider reports
    /// incompletely are left out of the result.
    async fn fetch_points(&self, lat: f64, lng: f64) -> Result<Vec<ForecastPoint>>;
}
