use async_trait::async_trait;
use chrono::{Days, Local, NaiveDate};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{
    condition::{colors_for_condition, describe_condition, short_label},
    model::{Coordinates, DailyForecast, WeatherSnapshot},
    units::display_fahrenheit,
};

use super::{ForecastError, ForecastProvider, truncate_body};

pub const OPEN_METEO_URL: &str = "https://api.open-meteo.com/v1/forecast";
const HOURLY_FIELDS: &str = "temperature_2m,relative_humidity_2m,weathercode,windspeed_10m";
const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,precipitation_sum,weathercode";

/// Open-Meteo forecast client.
///
/// The first hourly bucket stands in for "current" conditions. It is the start
/// of the forecast window, not a live observation.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    http: Client,
    url: String,
    include_daily: bool,
    timezone: Option<String>,
}

#[derive(Debug, Serialize)]
struct ForecastQuery<'a> {
    latitude: f64,
    longitude: f64,
    hourly: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    daily: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timezone: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    hourly: Option<HourlyBlock>,
    daily: Option<DailyBlock>,
}

#[derive(Debug, Deserialize)]
struct HourlyBlock {
    temperature_2m: Option<Vec<Option<f64>>>,
    relative_humidity_2m: Option<Vec<Option<f64>>>,
    #[serde(alias = "weather_code")]
    weathercode: Option<Vec<Option<RawCode>>>,
    #[serde(alias = "wind_speed_10m")]
    windspeed_10m: Option<Vec<Option<f64>>>,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    temperature_2m_max: Option<Vec<Option<f64>>>,
    temperature_2m_min: Option<Vec<Option<f64>>>,
    precipitation_sum: Option<Vec<Option<f64>>>,
    #[serde(alias = "weather_code")]
    weathercode: Option<Vec<Option<RawCode>>>,
}

/// Weather codes arrive as integers from the live API and as strings in some payloads.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawCode {
    Int(i64),
    Float(f64),
    Text(String),
}

impl RawCode {
    fn into_code(self) -> String {
        match self {
            RawCode::Int(n) => n.to_string(),
            RawCode::Float(f) if f.fract() == 0.0 && f.is_finite() => format!("{}", f as i64),
            RawCode::Float(f) => f.to_string(),
            RawCode::Text(s) => s.trim().to_string(),
        }
    }
}

impl OpenMeteoProvider {
    pub fn new(http: Client) -> Self {
        Self::with_url(http, OPEN_METEO_URL)
    }

    pub fn with_url(http: Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
            include_daily: true,
            timezone: None,
        }
    }

    /// Request the daily block (max/min, precipitation, per-day code).
    pub fn include_daily(mut self, include_daily: bool) -> Self {
        self.include_daily = include_daily;
        self
    }

    /// IANA timezone forwarded to the API, e.g. `"Europe/Berlin"` or `"auto"`.
    pub fn timezone(mut self, timezone: Option<String>) -> Self {
        self.timezone = timezone.filter(|tz| !tz.trim().is_empty());
        self
    }
}

#[async_trait]
impl ForecastProvider for OpenMeteoProvider {
    async fn forecast(&self, coords: Coordinates) -> Result<WeatherSnapshot, ForecastError> {
        let query = ForecastQuery {
            latitude: coords.latitude,
            longitude: coords.longitude,
            hourly: HOURLY_FIELDS,
            daily: self.include_daily.then_some(DAILY_FIELDS),
            timezone: self.timezone.as_deref(),
        };

        tracing::debug!(%coords, include_daily = self.include_daily, "requesting forecast");

        let res = self.http.get(&self.url).query(&query).send().await?;
        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(ForecastError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let today = Local::now().date_naive();
        let snapshot = parse_forecast_body(&body, self.include_daily, today)?;
        tracing::info!(
            temperature_f = snapshot.temperature_f,
            condition = %snapshot.condition_description,
            days = snapshot.daily_forecasts.len(),
            "fetched forecast"
        );
        Ok(snapshot)
    }
}

/// Build a snapshot from an Open-Meteo response body.
///
/// `today` anchors the weekday names of the daily forecasts. When
/// `include_daily` is false any daily block in the body is ignored.
pub fn parse_forecast_body(
    body: &str,
    include_daily: bool,
    today: NaiveDate,
) -> Result<WeatherSnapshot, ForecastError> {
    let payload: ForecastResponse = serde_json::from_str(body)?;

    let hourly = payload
        .hourly
        .ok_or_else(|| invalid("missing hourly block"))?;

    let temperature_c = first("hourly.temperature_2m", hourly.temperature_2m)?;
    let humidity_pct = first("hourly.relative_humidity_2m", hourly.relative_humidity_2m)?;
    let code = first("hourly.weathercode", hourly.weathercode)?.into_code();
    let wind_speed_ms = first("hourly.windspeed_10m", hourly.windspeed_10m)?;

    let condition = describe_condition(&code);

    let mut snapshot = WeatherSnapshot {
        temperature_f: display_fahrenheit(temperature_c),
        humidity_pct,
        wind_speed_ms,
        condition_description: condition.description.to_string(),
        condition_icon_ref: condition.icon_ref.to_string(),
        condition_colors: colors_for_condition(condition.description),
        max_temp_f: None,
        min_temp_f: None,
        precipitation_mm: None,
        daily_forecasts: Vec::new(),
    };

    if include_daily {
        let daily = payload.daily.ok_or_else(|| invalid("missing daily block"))?;
        let forecasts = build_daily_forecasts(&daily, today)?;

        snapshot.max_temp_f = forecasts.first().map(|d| d.max_temp_f);
        snapshot.min_temp_f = forecasts.first().map(|d| d.min_temp_f);
        snapshot.precipitation_mm = daily
            .precipitation_sum
            .and_then(|values| values.into_iter().next().flatten());
        snapshot.daily_forecasts = forecasts;
    }

    Ok(snapshot)
}

fn build_daily_forecasts(
    daily: &DailyBlock,
    today: NaiveDate,
) -> Result<Vec<DailyForecast>, ForecastError> {
    let max = non_empty("daily.temperature_2m_max", daily.temperature_2m_max.as_deref())?;
    let min = non_empty("daily.temperature_2m_min", daily.temperature_2m_min.as_deref())?;
    let codes = non_empty("daily.weathercode", daily.weathercode.as_deref())?;

    if max.len() != min.len() || max.len() != codes.len() {
        return Err(invalid(format!(
            "daily arrays length mismatch (max={}, min={}, weathercode={})",
            max.len(),
            min.len(),
            codes.len()
        )));
    }

    let mut days = Vec::with_capacity(max.len());
    for (index, ((max_c, min_c), code)) in max.iter().zip(min).zip(codes).enumerate() {
        let (Some(max_c), Some(min_c), Some(code)) = (max_c, min_c, code) else {
            return Err(invalid(format!("daily values at index {index} are null")));
        };

        let date = today
            .checked_add_days(Days::new(index as u64))
            .ok_or_else(|| invalid(format!("day offset {index} overflows the calendar")))?;

        days.push(DailyForecast::new(
            display_fahrenheit(*max_c),
            display_fahrenheit(*min_c),
            short_label(&code.clone().into_code()),
            date.format("%A").to_string(),
        ));
    }

    Ok(days)
}

fn first<T>(name: &str, values: Option<Vec<Option<T>>>) -> Result<T, ForecastError> {
    let values = values.ok_or_else(|| invalid(format!("{name} is missing")))?;
    match values.into_iter().next() {
        Some(Some(value)) => Ok(value),
        Some(None) => Err(invalid(format!("{name}[0] is null"))),
        None => Err(invalid(format!("{name} is empty"))),
    }
}

fn non_empty<'a, T>(name: &str, values: Option<&'a [T]>) -> Result<&'a [T], ForecastError> {
    match values {
        None => Err(invalid(format!("{name} is missing"))),
        Some([]) => Err(invalid(format!("{name} is empty"))),
        Some(values) => Ok(values),
    }
}

fn invalid(message: impl Into<String>) -> ForecastError {
    ForecastError::InvalidResponse(message.into())
}
