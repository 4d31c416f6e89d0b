//! Beach forecasts grouped by hour.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use surf_core::{ForecastError, ForecastPoint, PointForecastProvider, Result};

/// Side of the coast a beach faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BeachPosition {
    /// North.
    N,
    /// South.
    S,
    /// East.
    E,
    /// West.
    W,
}

/// A beach to forecast.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Beach {
    /// Display name.
    pub name: String,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
    /// Side of the coast the beach faces.
    pub position: BeachPosition,
}

impl Beach {
    /// Creates a beach.
    #[must_use]
    pub fn new(name: impl Into<String>, lat: f64, lng: f64, position: BeachPosition) -> Self {
        Self {
            name: name.into(),
            lat,
            lng,
            position,
        }
    }
}

/// One forecast hour for one beach.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BeachForecast {
    /// Beach name.
    pub name: String,
    /// Beach latitude.
    pub lat: f64,
    /// Beach longitude.
    pub lng: f64,
    /// Side of the coast the beach faces.
    pub position: BeachPosition,
    /// Forecast values for the hour.
    #[serde(flatten)]
    pub point: ForecastPoint,
}

impl BeachForecast {
    fn new(beach: &Beach, point: ForecastPoint) -> Self {
        Self {
            name: beach.name.clone(),
            lat: beach.lat,
            lng: beach.lng,
            position: beach.position,
            point,
        }
    }
}

/// All beach forecasts for one hour.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimeForecast {
    /// Timestamp of the hour.
    pub time: String,
    /// One entry per beach reporting this hour, in beach order.
    pub forecast: Vec<BeachForecast>,
}

/// Fetches point forecasts for beaches and groups them by hour.
#[derive(Clone, Debug)]
pub struct ForecastService {
    provider: Arc<dyn PointForecastProvider>,
}

impl ForecastService {
    /// Create a service backed by `provider`.
    #[must_use]
    pub fn new(provider: Arc<dyn PointForecastProvider>) -> Self {
        Self { provider }
    }

    /// Create a service backed by the StormGlass provider.
    #[cfg(feature = "stormglass")]
    pub fn with_stormglass(config: surf_stormglass::StormGlassConfig) -> Result<Self> {
        let client = surf_stormglass::StormGlassClient::new(config)?;
        Ok(Self::new(Arc::new(client)))
    }

    /// Fetch forecasts for every beach and group them by hour.
    ///
    /// Beaches are fetched concurrently; the output keeps beach order within
    /// each hour and hours in first-seen order. Any provider failure fails the
    /// whole operation.
    pub async fn process_forecast_for_beaches(&self, beaches: &[Beach]) -> Result<Vec<TimeForecast>> {
        if beaches.is_empty() {
            return Ok(Vec::new());
        }

        debug!(
            provider = self.provider.name(),
            beach_count = beaches.len(),
            "Fetching beach forecasts"
        );

        let per_beach = try_join_all(
            beaches
                .iter()
                .map(|beach| self.provider.fetch_points(beach.lat, beach.lng)),
        )
        .await
        .map_err(|e| {
            warn!(provider = self.provider.name(), error = %e, "Beach forecast failed");
            ForecastError::Processing(Box::new(e))
        })?;

        let forecasts = beaches
            .iter()
            .zip(per_beach)
            .flat_map(|(beach, points)| {
                points
                    .into_iter()
                    .map(move |point| BeachForecast::new(beach, point))
            });

        Ok(group_by_time(forecasts))
    }
}

fn group_by_time(forecasts: impl IntoIterator<Item = BeachForecast>) -> Vec<TimeForecast> {
    let mut grouped: Vec<TimeForecast> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for forecast in forecasts {
        match index.get(&forecast.point.time) {
            Some(&i) => grouped[i].forecast.push(forecast),
            None => {
                index.insert(forecast.point.time.clone(), grouped.len());
                grouped.push(TimeForecast {
                    time: forecast.point.time.clone(),
                    forecast: vec![forecast],
                });
            }
        }
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use surf_core::MarineDataProvider;

    fn point(time: &str, wave_height: f64) -> ForecastPoint {
        ForecastPoint {
            time: time.to_string(),
            swell_direction: 64.26,
            swell_height: 0.15,
            swell_period: 3.89,
            wave_direction: 231.38,
            wave_height,
            wind_direction: 299.45,
            wind_speed: 100.0,
        }
    }

    /// Provider answering from a fixed table keyed by latitude.
    #[derive(Debug, Default)]
    struct FakeProvider {
        points: Vec<(f64, Vec<ForecastPoint>)>,
        fail: bool,
        calls: AtomicUsize,
    }

    impl MarineDataProvider for FakeProvider {
        fn name(&self) -> &str {
            "Fake"
        }

        fn description(&self) -> &str {
            "In-memory provider"
        }

        fn source(&self) -> &str {
            "noaa"
        }
    }

    #[async_trait]
    impl PointForecastProvider for FakeProvider {
        async fn fetch_points(&self, lat: f64, _lng: f64) -> Result<Vec<ForecastPoint>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(ForecastError::Transport {
                    provider: "Fake".to_string(),
                    status: Some(500),
                    payload: r#"{"errors":"boom"}"#.to_string(),
                });
            }
            Ok(self
                .points
                .iter()
                .find(|(l, _)| *l == lat)
                .map(|(_, p)| p.clone())
                .unwrap_or_default())
        }
    }

    #[tokio::test]
    async fn test_groups_beaches_by_hour() {
        let provider = FakeProvider {
            points: vec![
                (-33.79, vec![point("t1", 0.47), point("t2", 0.50)]),
                (-33.89, vec![point("t1", 1.10), point("t3", 1.20)]),
            ],
            ..Default::default()
        };
        let service = ForecastService::new(Arc::new(provider));
        let beaches = [
            Beach::new("Manly", -33.79, 151.28, BeachPosition::E),
            Beach::new("Bondi", -33.89, 151.27, BeachPosition::S),
        ];

        let hours = service.process_forecast_for_beaches(&beaches).await.unwrap();

        let times: Vec<&str> = hours.iter().map(|h| h.time.as_str()).collect();
        assert_eq!(times, vec!["t1", "t2", "t3"]);

        let t1: Vec<&str> = hours[0].forecast.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(t1, vec!["Manly", "Bondi"]);
        assert_eq!(hours[0].forecast[1].point.wave_height, 1.10);
        assert_eq!(hours[0].forecast[1].position, BeachPosition::S);
        assert_eq!(hours[1].forecast.len(), 1);
        assert_eq!(hours[2].forecast[0].name, "Bondi");
    }

    #[tokio::test]
    async fn test_provider_failure_fails_processing() {
        let provider = Arc::new(FakeProvider {
            fail: true,
            ..Default::default()
        });
        let service = ForecastService::new(provider);
        let beaches = [Beach::new("Manly", -33.79, 151.28, BeachPosition::E)];

        let err = service
            .process_forecast_for_beaches(&beaches)
            .await
            .unwrap_err();

        assert!(matches!(err, ForecastError::Processing(_)));
        assert!(err.is_transport());
        assert_eq!(err.status(), Some(500));
        assert!(
            err.to_string()
                .starts_with("Unexpected error during the forecast processing: ")
        );
    }

    #[tokio::test]
    async fn test_no_beaches_skips_provider() {
        let provider = Arc::new(FakeProvider::default());
        let service = ForecastService::new(provider.clone());

        let hours = service.process_forecast_for_beaches(&[]).await.unwrap();

        assert!(hours.is_empty());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_beach_forecast_serializes_flat() {
        let beach = Beach::new("Manly", -33.79, 151.28, BeachPosition::E);
        let json = serde_json::to_value(BeachForecast::new(&beach, point("t1", 0.47))).unwrap();

        assert_eq!(json["name"], "Manly");
        assert_eq!(json["position"], "E");
        assert_eq!(json["time"], "t1");
        assert_eq!(json["waveHeight"], 0.47);
    }
}
