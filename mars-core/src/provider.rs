use crate::model::{Coordinates, WeatherSnapshot};
use async_trait::async_trait;
use std::{fmt::Debug, time::Duration};

pub mod ipinfo;
pub mod open_meteo;

pub use ipinfo::IpInfoLocator;
pub use open_meteo::OpenMeteoProvider;

#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("location request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("location service returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to parse location payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("location payload has no `loc` field")]
    MissingField,
    #[error("malformed `loc` value {0:?}, expected \"lat,lon\"")]
    Malformed(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ForecastError {
    #[error("forecast request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("forecast service returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to parse forecast payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid forecast payload: {0}")]
    InvalidResponse(String),
}

impl ForecastError {
    /// Transport-level failures, as opposed to bad payloads.
    pub fn is_network(&self) -> bool {
        matches!(self, ForecastError::Network(_))
    }
}

/// Resolves the caller's coordinates.
#[async_trait]
pub trait LocationProvider: Send + Sync + Debug {
    async fn locate(&self) -> Result<Coordinates, LocationError>;

    /// Best-effort lookup: failures are logged and reported as `None`.
    async fn resolve_location(&self) -> Option<Coordinates> {
        match self.locate().await {
            Ok(coords) => Some(coords),
            Err(err) => {
                tracing::warn!(error = %err, "Error retrieving location");
                None
            }
        }
    }
}

/// Fetches a forecast for a pair of coordinates.
///
/// [`crate::Pipeline`] calls [`ForecastProvider::forecast`] rather than
/// `fetch_forecast` so a transport failure can be shown with its own message.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn forecast(&self, coords: Coordinates) -> Result<WeatherSnapshot, ForecastError>;

    /// Failures are logged and reported as `None`; no partial snapshot is returned.
    async fn fetch_forecast(&self, coords: Coordinates) -> Option<WeatherSnapshot> {
        match self.forecast(coords).await {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                tracing::warn!(error = %err, "Error fetching weather data");
                None
            }
        }
    }
}

/// Build the shared HTTP client. `None` keeps reqwest's default timeout.
pub fn http_client(timeout: Option<Duration>) -> reqwest::Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
