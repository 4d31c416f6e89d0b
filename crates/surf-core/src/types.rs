//! Core data types for marine forecast data.
//!
//! This module defines the fundamental data structures:
//!
//! - [`Dimension`] - One of the seven measured quantities
//! - [`SourceReadings`] - Per-source readings for one dimension
//! - [`RawForecastPoint`] - One hour as returned by a provider
//! - [`RawForecastResponse`] - The provider's ordered hours
//! - [`ForecastPoint`] - The flat, fully populated canonical point

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// A measured forecast quantity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    /// Direction the swell is coming from, in degrees.
    SwellDirection,
    /// Swell height in meters.
    SwellHeight,
    /// Swell period in seconds.
    SwellPeriod,
    /// Direction the waves are coming from, in degrees.
    WaveDirection,
    /// Significant wave height in meters.
    WaveHeight,
    /// Direction the wind is coming from, in degrees.
    WindDirection,
    /// Wind speed in meters per second.
    WindSpeed,
}

impl Dimension {
    /// All dimensions, in request order.
    pub const ALL: [Self; 7] = [
        Self::SwellDirection,
        Self::SwellHeight,
        Self::SwellPeriod,
        Self::WaveDirection,
        Self::WaveHeight,
        Self::WindDirection,
        Self::WindSpeed,
    ];

    /// Returns the provider's wire name for this dimension.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SwellDirection => "swellDirection",
            Self::SwellHeight => "swellHeight",
            Self::SwellPeriod => "swellPeriod",
            Self::WaveDirection => "waveDirection",
            Self::WaveHeight => "waveHeight",
            Self::WindDirection => "windDirection",
            Self::WindSpeed => "windSpeed",
        }
    }

    /// Comma-joined wire names of every dimension.
    #[must_use]
    pub fn request_params() -> String {
        Self::ALL
            .iter()
            .map(Self::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Readings for a single dimension, keyed by data-source identifier.
///
/// Providers may report several sources for the same dimension with
/// different values. Values are kept as raw JSON so that a malformed reading
/// only invalidates its own hour instead of the whole response.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceReadings(BTreeMap<String, Value>);

impl SourceReadings {
    /// Creates an empty set of readings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a numeric reading for `source`.
    #[must_use]
    pub fn with_reading(mut self, source: impl Into<String>, value: f64) -> Self {
        self.0.insert(source.into(), Value::from(value));
        self
    }

    /// Returns the reading reported by `source`, or `None` if it is missing.
    ///
    /// Non-numeric, non-finite and zero readings count as missing.
    #[must_use]
    pub fn reading(&self, source: &str) -> Option<f64> {
        self.0
            .get(source)
            .and_then(Value::as_f64)
            .filter(|v| v.is_finite() && *v != 0.0)
    }
}

/// One hour of provider data, before validation.
///
/// Every field is optional: providers may omit dimensions entirely. A field
/// of the wrong JSON type decodes as `None`, so a malformed hour is rejected
/// by validation instead of failing the whole response.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawForecastPoint {
    /// Timestamp of the hour, as sent by the provider.
    #[serde(deserialize_with = "lenient")]
    pub time: Option<String>,
    /// Swell direction readings.
    #[serde(deserialize_with = "lenient")]
    pub swell_direction: Option<SourceReadings>,
    /// Swell height readings.
    #[serde(deserialize_with = "lenient")]
    pub swell_height: Option<SourceReadings>,
    /// Swell period readings.
    #[serde(deserialize_with = "lenient")]
    pub swell_period: Option<SourceReadings>,
    /// Wave direction readings.
    #[serde(deserialize_with = "lenient")]
    pub wave_direction: Option<SourceReadings>,
    /// Wave height readings.
    #[serde(deserialize_with = "lenient")]
    pub wave_height: Option<SourceReadings>,
    /// Wind direction readings.
    #[serde(deserialize_with = "lenient")]
    pub wind_direction: Option<SourceReadings>,
    /// Wind speed readings.
    #[serde(deserialize_with = "lenient")]
    pub wind_speed: Option<SourceReadings>,
}

/// Decodes any JSON value, mapping a wrong type to `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Decodes a JSON array of hours; elements that are not objects become
/// empty hours.
fn lenient_hours<'de, D>(deserializer: D) -> Result<Vec<RawForecastPoint>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Vec::<Value>::deserialize(deserializer)?;
    Ok(values
        .into_iter()
        .map(|v| serde_json::from_value(v).unwrap_or_default())
        .collect())
}

impl RawForecastPoint {
    /// Creates an empty point for `time`.
    #[must_use]
    pub fn new(time: impl Into<String>) -> Self {
        Self {
            time: Some(time.into()),
            ..Default::default()
        }
    }

    /// Sets the readings for `dimension`.
    #[must_use]
    pub fn with_readings(mut self, dimension: Dimension, readings: SourceReadings) -> Self {
        *self.slot_mut(dimension) = Some(readings);
        self
    }

    /// Returns the readings for `dimension`, if the provider sent any.
    #[must_use]
    pub const fn readings(&self, dimension: Dimension) -> Option<&SourceReadings> {
        match dimension {
            Dimension::SwellDirection => self.swell_direction.as_ref(),
            Dimension::SwellHeight => self.swell_height.as_ref(),
            Dimension::SwellPeriod => self.swell_period.as_ref(),
            Dimension::WaveDirection => self.wave_direction.as_ref(),
            Dimension::WaveHeight => self.wave_height.as_ref(),
            Dimension::WindDirection => self.wind_direction.as_ref(),
            Dimension::WindSpeed => self.wind_speed.as_ref(),
        }
    }

    /// Returns the reading for `dimension` from `source`.
    #[must_use]
    pub fn reading(&self, dimension: Dimension, source: &str) -> Option<f64> {
        self.readings(dimension).and_then(|r| r.reading(source))
    }

    fn slot_mut(&mut self, dimension: Dimension) -> &mut Option<SourceReadings> {
        match dimension {
            Dimension::SwellDirection => &mut self.swell_direction,
            Dimension::SwellHeight => &mut self.swell_height,
            Dimension::SwellPeriod => &mut self.swell_period,
            Dimension::WaveDirection => &mut self.wave_direction,
            Dimension::WaveHeight => &mut self.wave_height,
            Dimension::WindDirection => &mut self.wind_direction,
            Dimension::WindSpeed => &mut self.wind_speed,
        }
    }
}

/// A provider response: one point per forecast hour, in provider order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawForecastResponse {
    /// Forecast hours.
    #[serde(deserialize_with = "lenient_hours")]
    pub hours: Vec<RawForecastPoint>,
}

impl RawForecastResponse {
    /// Creates a response from a list of hours.
    #[must_use]
    pub const fn new(hours: Vec<RawForecastPoint>) -> Self {
        Self { hours }
    }
}

/// The canonical forecast point for one hour.
///
/// Every dimension holds a value taken from the authoritative source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    /// Timestamp of the hour, copied verbatim from the provider.
    pub time: String,
    /// Swell direction in degrees.
    pub swell_direction: f64,
    /// Swell height in meters.
    pub swell_height: f64,
    /// Swell period in seconds.
    pub swell_period: f64,
    /// Wave direction in degrees.
    pub wave_direction: f64,
    /// Wave height in meters.
    pub wave_height: f64,
    /// Wind direction in degrees.
    pub wind_direction: f64,
    /// Wind speed in meters per second.
    pub wind_speed: f64,
}

impl ForecastPoint {
    /// Returns the value of `dimension`.
    #[must_use]
    pub const fn value(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::SwellDirection => self.swell_direction,
            Dimension::SwellHeight => self.swell_height,
            Dimension::SwellPeriod => self.swell_period,
            Dimension::WaveDirection => self.wave_direction,
            Dimension::WaveHeight => self.wave_height,
            Dimension::WindDirection => self.wind_direction,
            Dimension::WindSpeed => self.wind_speed,
        }
    }

    /// Converts this point back into provider shape, reporting every value
    /// under `source`.
    #[must_use]
    pub fn to_raw(&self, source: &str) -> RawForecastPoint {
        Dimension::ALL
            .iter()
            .fold(RawForecastPoint::new(self.time.clone()), |raw, &dim| {
                raw.with_readings(dim, SourceReadings::new().with_reading(source, self.value(dim)))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_params() {
        assert_eq!(
            Dimension::request_params(),
            "swellDirection,swellHeight,swellPeriod,waveDirection,waveHeight,windDirection,windSpeed"
        );
    }

    #[test]
    fn test_reading_lookup() {
        let readings: SourceReadings = serde_json::from_str(
            r#"{"noaa": 1.5, "sg": 1.7, "meteo": "n/a", "icon": null, "dwd": 0}"#,
        )
        .unwrap();

        assert_eq!(readings.reading("noaa"), Some(1.5));
        assert_eq!(readings.reading("sg"), Some(1.7));
        assert_eq!(readings.reading("meteo"), None);
        assert_eq!(readings.reading("icon"), None);
        assert_eq!(readings.reading("dwd"), None);
        assert_eq!(readings.reading("missing"), None);
    }

    #[test]
    fn test_raw_point_tolerates_missing_dimensions() {
        let point: RawForecastPoint =
            serde_json::from_str(r#"{"time": "t2", "swellDirection": {"noaa": 10}}"#).unwrap();

        assert_eq!(point.time.as_deref(), Some("t2"));
        assert_eq!(point.reading(Dimension::SwellDirection, "noaa"), Some(10.0));
        assert!(point.readings(Dimension::WindSpeed).is_none());
    }

    #[test]
    fn test_raw_point_wrong_types_decode_as_missing() {
        let point: RawForecastPoint = serde_json::from_str(
            r#"{"time": 5, "windSpeed": "n/a", "swellHeight": [1], "waveHeight": {"noaa": 1.2}}"#,
        )
        .unwrap();

        assert_eq!(point.time, None);
        assert!(point.readings(Dimension::WindSpeed).is_none());
        assert!(point.readings(Dimension::SwellHeight).is_none());
        assert_eq!(point.reading(Dimension::WaveHeight, "noaa"), Some(1.2));
    }

    #[test]
    fn test_raw_response_keeps_malformed_hours_in_place() {
        let raw: RawForecastResponse =
            serde_json::from_str(r#"{"hours": [{"time": "t1"}, 5, null, {"time": "t4"}]}"#).unwrap();

        assert_eq!(raw.hours.len(), 4);
        assert_eq!(raw.hours[1], RawForecastPoint::default());
        assert_eq!(raw.hours[3].time.as_deref(), Some("t4"));

        assert!(serde_json::from_str::<RawForecastResponse>(r#"{"hours": 3}"#).is_err());
        assert!(serde_json::from_str::<RawForecastResponse>(r#"{"meta": {}}"#).is_err());
    }

    #[test]
    fn test_raw_response_ignores_unknown_fields() {
        let raw: RawForecastResponse = serde_json::from_str(
            r#"{"hours": [{"time": "t1", "airTemperature": {"noaa": 20}}], "meta": {"cost": 1}}"#,
        )
        .unwrap();
        assert_eq!(raw.hours.len(), 1);
    }

    #[test]
    fn test_forecast_point_serializes_camel_case() {
        let point = ForecastPoint {
            time: "2020-04-26T00:00:00+00:00".to_string(),
            swell_direction: 64.26,
            swell_height: 0.15,
            swell_period: 3.89,
            wave_direction: 231.38,
            wave_height: 0.47,
            wind_direction: 299.45,
            wind_speed: 100.0,
        };
        let json = serde_json::to_value(&point).unwrap();
        assert_eq!(json["swellDirection"], 64.26);
        assert_eq!(json["windSpeed"], 100.0);
        assert_eq!(json["time"], "2020-04-26T00:00:00+00:00");
    }

    #[test]
    fn test_to_raw_reports_under_source() {
        let point = ForecastPoint {
            time: "t1".to_string(),
            swell_direction: 10.0,
            swell_height: 1.0,
            swell_period: 8.0,
            wave_direction: 10.0,
            wave_height: 1.0,
            wind_direction: 10.0,
            wind_speed: 5.0,
        };
        let raw = point.to_raw("noaa");
        for dim in Dimension::ALL {
            assert_eq!(raw.reading(dim, "noaa"), Some(point.value(dim)));
        }
    }
}
