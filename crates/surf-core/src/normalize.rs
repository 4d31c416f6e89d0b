//! Validation and flattening of provider responses.
//!
//! [`Normalizer`] turns a [`RawForecastResponse`] into canonical
//! [`ForecastPoint`]s. An hour is only kept when every dimension has a reading
//! from the authoritative source; incomplete hours are dropped, never repaired.

use tracing::trace;

use crate::types::{Dimension, ForecastPoint, RawForecastPoint, RawForecastResponse};

/// Output of [`Normalizer::normalize_with_report`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NormalizedForecast {
    /// Canonical points, in provider order.
    pub points: Vec<ForecastPoint>,
    /// Number of provider hours that failed validation.
    pub dropped: usize,
}

/// Projects provider hours onto the authoritative source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Normalizer {
    source: String,
}

impl Normalizer {
    /// Creates a normalizer trusting readings from `source`.
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Returns the authoritative source identifier.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the canonical points of `raw`, silently dropping invalid hours.
    #[must_use]
    pub fn normalize(&self, raw: &RawForecastResponse) -> Vec<ForecastPoint> {
        self.normalize_with_report(raw).points
    }

    /// Like [`normalize`](Self::normalize), but also counts dropped hours.
    #[must_use]
    pub fn normalize_with_report(&self, raw: &RawForecastResponse) -> NormalizedForecast {
        let points: Vec<ForecastPoint> = raw
            .hours
            .iter()
            .filter(|point| self.is_valid_point(point))
            .filter_map(|point| self.project(point))
            .collect();

        NormalizedForecast {
            dropped: raw.hours.len() - points.len(),
            points,
        }
    }

    /// Returns true if `point` has a timestamp and an authoritative reading
    /// for every dimension.
    #[must_use]
    pub fn is_valid_point(&self, point: &RawForecastPoint) -> bool {
        let has_time = point.time.as_deref().is_some_and(|t| !t.is_empty());
        let missing = self.missing_dimensions(point);

        if !has_time || !missing.is_empty() {
            trace!(
                time = ?point.time,
                missing = ?missing,
                source = %self.source,
                "Rejecting incomplete forecast hour"
            );
            return false;
        }
        true
    }

    /// Returns every dimension of `point` lacking an authoritative reading.
    #[must_use]
    pub fn missing_dimensions(&self, point: &RawForecastPoint) -> Vec<Dimension> {
        Dimension::ALL
            .into_iter()
            .filter(|&dim| point.reading(dim, &self.source).is_none())
            .collect()
    }

    fn project(&self, point: &RawForecastPoint) -> Option<ForecastPoint> {
        let value = |dim: Dimension| point.reading(dim, &self.source);
        Some(ForecastPoint {
            time: point.time.clone()?,
            swell_direction: value(Dimension::SwellDirection)?,
            swell_height: value(Dimension::SwellHeight)?,
            swell_period: value(Dimension::SwellPeriod)?,
            wave_direction: value(Dimension::WaveDirection)?,
            wave_height: value(Dimension::WaveHeight)?,
            wind_direction: value(Dimension::WindDirection)?,
            wind_speed: value(Dimension::WindSpeed)?,
        })
    }
}
