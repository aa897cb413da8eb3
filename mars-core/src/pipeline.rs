//! Location -> forecast orchestration.

use tokio::sync::Mutex;

use crate::{
    config::Config,
    model::WeatherSnapshot,
    provider::{ForecastProvider, IpInfoLocator, LocationProvider, OpenMeteoProvider, http_client},
};

/// Why a run produced no snapshot. The `Display` text is the user-facing status line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
    #[error("Unable to retrieve location data.")]
    LocationUnavailable,
    #[error("Error fetching weather data.")]
    ForecastUnavailable,
    #[error("Error fetching weather data: {0}")]
    Network(String),
    #[error("A weather update is already in progress.")]
    AlreadyRunning,
}

/// Runs location resolution followed by a forecast fetch.
///
/// At most one run is in flight per pipeline; an overlapping call to
/// [`Pipeline::run`] returns [`PipelineError::AlreadyRunning`] without
/// touching the network.
#[derive(Debug)]
pub struct Pipeline {
    location: Box<dyn LocationProvider>,
    forecast: Box<dyn ForecastProvider>,
    in_flight: Mutex<()>,
}

impl Pipeline {
    pub fn new(location: Box<dyn LocationProvider>, forecast: Box<dyn ForecastProvider>) -> Self {
        Self {
            location,
            forecast,
            in_flight: Mutex::new(()),
        }
    }

    /// Pipeline backed by ipinfo.io and Open-Meteo, configured from `config`.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let http = http_client(config.timeout())?;

        let location = IpInfoLocator::with_url(http.clone(), config.location_url.clone());
        let forecast = OpenMeteoProvider::with_url(http, config.forecast_url.clone())
            .include_daily(config.include_daily)
            .timezone(config.timezone.clone());

        Ok(Self::new(Box::new(location), Box::new(forecast)))
    }

    pub async fn run(&self) -> Result<WeatherSnapshot, PipelineError> {
        let Ok(_guard) = self.in_flight.try_lock() else {
            tracing::debug!("ignoring overlapping weather update");
            return Err(PipelineError::AlreadyRunning);
        };

        tracing::info!("resolving location");
        let Some(coords) = self.location.resolve_location().await else {
            return Err(PipelineError::LocationUnavailable);
        };

        tracing::info!(%coords, "fetching forecast");
        // Typed error here: transport failures carry their message to the status line.
        match self.forecast.forecast(coords).await {
            Ok(snapshot) => Ok(snapshot),
            Err(err) if err.is_network() => {
                tracing::warn!(error = %err, "network failure while fetching forecast");
                Err(PipelineError::Network(err.to_string()))
            }
            Err(err) => {
                tracing::warn!(error = %err, "Error fetching weather data");
                Err(PipelineError::ForecastUnavailable)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::{ConditionColors, Coordinates},
        provider::{ForecastError, LocationError},
    };
    use async_trait::async_trait;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };
    use tokio::sync::Notify;

    #[derive(Debug, Default)]
    struct FixedLocation {
        fail: bool,
        calls: Arc<AtomicUsize>,
        entered: Option<Arc<Notify>>,
        release: Option<Arc<Notify>>,
    }

    #[async_trait]
    impl LocationProvider for FixedLocation {
        async fn locate(&self) -> Result<Coordinates, LocationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let (Some(entered), Some(release)) = (&self.entered, &self.release) {
                entered.notify_one();
                release.notified().await;
            }
            if self.fail {
                Err(LocationError::Malformed("nowhere".into()))
            } else {
                Ok(Coordinates::new(52.52, 13.41))
            }
        }
    }

    #[derive(Debug)]
    enum ForecastOutcome {
        Ok,
        Invalid,
        Status,
    }

    #[derive(Debug)]
    struct FakeForecast {
        outcome: ForecastOutcome,
        calls: Arc<AtomicUsize>,
    }

    impl FakeForecast {
        fn new(outcome: ForecastOutcome) -> Self {
            Self {
                outcome,
                calls: Arc::default(),
            }
        }
    }

    fn sample_snapshot() -> WeatherSnapshot {
        WeatherSnapshot {
            temperature_f: 50.0,
            humidity_pct: 80.0,
            wind_speed_ms: 5.5,
            condition_description: "Overcast".into(),
            condition_icon_ref: String::new(),
            condition_colors: ConditionColors {
                background: crate::model::Color::SlateGray,
                font: crate::model::Color::White,
            },
            max_temp_f: None,
            min_temp_f: None,
            precipitation_mm: None,
            daily_forecasts: Vec::new(),
        }
    }

    #[async_trait]
    impl ForecastProvider for FakeForecast {
        async fn forecast(&self, coords: Coordinates) -> Result<WeatherSnapshot, ForecastError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(coords, Coordinates::new(52.52, 13.41));
            match self.outcome {
                ForecastOutcome::Ok => Ok(sample_snapshot()),
                ForecastOutcome::Invalid => {
                    Err(ForecastError::InvalidResponse("hourly.weathercode is empty".into()))
                }
                ForecastOutcome::Status => Err(ForecastError::Status {
                    status: 503,
                    body: "busy".into(),
                }),
            }
        }
    }

    #[tokio::test]
    async fn run_returns_snapshot_on_success() {
        let pipeline = Pipeline::new(
            Box::new(FixedLocation::default()),
            Box::new(FakeForecast::new(ForecastOutcome::Ok)),
        );
        assert_eq!(pipeline.run().await, Ok(sample_snapshot()));
    }

    /// Locator whose best-effort lookup falls back to a fixed point.
    #[derive(Debug)]
    struct FallbackLocation;

    #[async_trait]
    impl LocationProvider for FallbackLocation {
        async fn locate(&self) -> Result<Coordinates, LocationError> {
            Err(LocationError::MissingField)
        }

        async fn resolve_location(&self) -> Option<Coordinates> {
            Some(Coordinates::new(52.52, 13.41))
        }
    }

    #[tokio::test]
    async fn run_uses_best_effort_location() {
        let pipeline = Pipeline::new(
            Box::new(FallbackLocation),
            Box::new(FakeForecast::new(ForecastOutcome::Ok)),
        );
        assert_eq!(pipeline.run().await, Ok(sample_snapshot()));
    }

    #[tokio::test]
    async fn location_failure_skips_forecast() {
        let forecast = FakeForecast::new(ForecastOutcome::Ok);
        let forecast_calls = forecast.calls.clone();
        let pipeline = Pipeline::new(
            Box::new(FixedLocation {
                fail: true,
                ..Default::default()
            }),
            Box::new(forecast),
        );

        let err = pipeline.run().await.unwrap_err();
        assert_eq!(err, PipelineError::LocationUnavailable);
        assert_eq!(err.to_string(), "Unable to retrieve location data.");
        assert_eq!(forecast_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn forecast_failures_map_to_forecast_unavailable() {
        for outcome in [ForecastOutcome::Invalid, ForecastOutcome::Status] {
            let pipeline = Pipeline::new(
                Box::new(FixedLocation::default()),
                Box::new(FakeForecast::new(outcome)),
            );
            let err = pipeline.run().await.unwrap_err();
            assert_eq!(err, PipelineError::ForecastUnavailable);
            assert_eq!(err.to_string(), "Error fetching weather data.");
        }
    }

    #[test]
    fn network_error_message_is_shown_verbatim() {
        let err = PipelineError::Network("connection refused".into());
        assert_eq!(err.to_string(), "Error fetching weather data: connection refused");
    }

    #[tokio::test]
    async fn overlapping_run_is_rejected() {
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let location_calls = Arc::new(AtomicUsize::new(0));

        let pipeline = Arc::new(Pipeline::new(
            Box::new(FixedLocation {
                fail: false,
                calls: location_calls.clone(),
                entered: Some(entered.clone()),
                release: Some(release.clone()),
            }),
            Box::new(FakeForecast::new(ForecastOutcome::Ok)),
        ));

        let first = tokio::spawn({
            let pipeline = pipeline.clone();
            async move { pipeline.run().await }
        });

        entered.notified().await;
        assert_eq!(pipeline.run().await, Err(PipelineError::AlreadyRunning));

        release.notify_one();
        assert!(first.await.unwrap().is_ok());
        assert_eq!(location_calls.load(Ordering::SeqCst), 1);

        // The guard is released once the first run completes.
        release.notify_one();
        assert!(pipeline.run().await.is_ok());
        assert_eq!(location_calls.load(Ordering::SeqCst), 2);
    }
}
