//! Core library for the `mars` weather tool.
//!
//! This crate defines:
//! - IP-based location resolution (ipinfo.io)
//! - Forecast fetching and normalization (Open-Meteo)
//! - Weather code classification (descriptions, icons, short labels, theme colors)
//! - The pipeline that sequences location -> forecast
//!
//! Rendering is left to the caller: [`Pipeline::run`] hands back a finished
//! [`WeatherSnapshot`] or a [`PipelineError`] whose text is the status line to show.

pub mod condition;
pub mod config;
pub mod model;
pub mod pipeline;
pub mod provider;
pub mod units;

pub use condition::{colors_for_condition, describe_condition, short_label};
pub use config::Config;
pub use model::{Color, ConditionColors, ConditionInfo, Coordinates, DailyForecast, WeatherSnapshot};
pub use pipeline::{Pipeline, PipelineError};
pub use provider::{
    ForecastError, ForecastProvider, IpInfoLocator, LocationError, LocationProvider,
    OpenMeteoProvider,
};
pub use units::{celsius_to_fahrenheit, round2};
