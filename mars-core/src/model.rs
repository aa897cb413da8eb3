use serde::{Deserialize, Serialize};

/// Latitude/longitude pair resolved from the caller's public IP.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// Named display colors used for condition theming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Color {
    #[default]
    Black,
    White,
    Yellow,
    DarkSlateBlue,
    DarkSlateGray,
    SkyBlue,
    LightSkyBlue,
    LightSteelBlue,
    LightBlue,
    SteelBlue,
    SlateGray,
    Gainsboro,
    Silver,
    Snow,
    WhiteSmoke,
}

impl Color {
    pub fn name(&self) -> &'static str {
        match self {
            Color::Black => "Black",
            Color::White => "White",
            Color::Yellow => "Yellow",
            Color::DarkSlateBlue => "DarkSlateBlue",
            Color::DarkSlateGray => "DarkSlateGray",
            Color::SkyBlue => "SkyBlue",
            Color::LightSkyBlue => "LightSkyBlue",
            Color::LightSteelBlue => "LightSteelBlue",
            Color::LightBlue => "LightBlue",
            Color::SteelBlue => "SteelBlue",
            Color::SlateGray => "SlateGray",
            Color::Gainsboro => "Gainsboro",
            Color::Silver => "Silver",
            Color::Snow => "Snow",
            Color::WhiteSmoke => "WhiteSmoke",
        }
    }

    /// CSS hex value (`#rrggbb`).
    pub fn hex(&self) -> &'static str {
        match self {
            Color::Black => "#000000",
            Color::White => "#ffffff",
            Color::Yellow => "#ffff00",
            Color::DarkSlateBlue => "#483d8b",
            Color::DarkSlateGray => "#2f4f4f",
            Color::SkyBlue => "#87ceeb",
            Color::LightSkyBlue => "#87cefa",
            Color::LightSteelBlue => "#b0c4de",
            Color::LightBlue => "#add8e6",
            Color::SteelBlue => "#4682b4",
            Color::SlateGray => "#708090",
            Color::Gainsboro => "#dcdcdc",
            Color::Silver => "#c0c0c0",
            Color::Snow => "#fffafa",
            Color::WhiteSmoke => "#f5f5f5",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Background/font pair applied by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionColors {
    pub background: Color,
    pub font: Color,
}

/// Full-sentence description plus icon URL for a weather code.
///
/// An empty `icon_ref` means no icon is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionInfo {
    pub description: &'static str,
    pub icon_ref: &'static str,
}

pub const DEFAULT_FORECAST_FONT_SIZE: f64 = 11.0;

/// One calendar day's summary. `daily_forecasts[i]` is `i` days after the fetch day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub max_temp_f: f64,
    pub min_temp_f: f64,
    pub short_condition: String,
    pub weekday_name: String,
    pub display_font_size: f64,
    pub display_color: Color,
}

impl DailyForecast {
    pub fn new(
        max_temp_f: f64,
        min_temp_f: f64,
        short_condition: impl Into<String>,
        weekday_name: impl Into<String>,
    ) -> Self {
        Self {
            max_temp_f,
            min_temp_f,
            short_condition: short_condition.into(),
            weekday_name: weekday_name.into(),
            display_font_size: DEFAULT_FORECAST_FONT_SIZE,
            display_color: Color::default(),
        }
    }
}

/// Normalized, display-ready result of one forecast fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature_f: f64,
    pub humidity_pct: f64,
    /// Meters per second, as reported upstream.
    pub wind_speed_ms: f64,
    pub condition_description: String,
    pub condition_icon_ref: String,
    pub condition_colors: ConditionColors,
    pub max_temp_f: Option<f64>,
    pub min_temp_f: Option<f64>,
    pub precipitation_mm: Option<f64>,
    pub daily_forecasts: Vec<DailyForecast>,
}

impl WeatherSnapshot {
    pub fn has_icon(&self) -> bool {
        !self.condition_icon_ref.is_empty()
    }
}
