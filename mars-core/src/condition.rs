//! Weather code classification.
//!
//! Three independent lookup tables:
//! - code -> full description + icon URL
//! - code -> short label used by the daily forecast row
//! - description -> background/font colors
//!
//! The short-label table only covers a subset of codes, so the tables are kept
//! separate rather than merged into one record per code.

use crate::model::{Color, ConditionColors, ConditionInfo};

pub const UNKNOWN_DESCRIPTION: &str = "Unknown weather condition";
pub const UNKNOWN_SHORT_LABEL: &str = "Unknown";

pub const DEFAULT_COLORS: ConditionColors = ConditionColors {
    background: Color::DarkSlateBlue,
    font: Color::White,
};

const ICON_CLEAR_DAY: &str = "https://openweathermap.org/img/wn/01d@2x.png";
const ICON_FEW_CLOUDS_DAY: &str = "https://openweathermap.org/img/wn/02d@2x.png";
const ICON_SCATTERED_DAY: &str = "https://openweathermap.org/img/wn/03d@2x.png";
const ICON_BROKEN_DAY: &str = "https://openweathermap.org/img/wn/04d@2x.png";
const ICON_CLEAR_NIGHT: &str = "https://openweathermap.org/img/wn/01n@2x.png";
const ICON_FEW_CLOUDS_NIGHT: &str = "https://openweathermap.org/img/wn/02n@2x.png";
const ICON_SCATTERED_NIGHT: &str = "https://openweathermap.org/img/wn/03n@2x.png";
const ICON_BROKEN_NIGHT: &str = "https://openweathermap.org/img/wn/04n@2x.png";
const ICON_MIST: &str = "https://openweathermap.org/img/wn/50d@2x.png";
const ICON_SHOWER: &str = "https://openweathermap.org/img/wn/09d@2x.png";
const ICON_RAIN: &str = "https://openweathermap.org/img/wn/10d@2x.png";
const ICON_SNOW: &str = "https://openweathermap.org/img/wn/13d@2x.png";
const ICON_THUNDER: &str = "https://openweathermap.org/img/wn/11d@2x.png";

// "01".."04" are night variants. Open-Meteo sends plain integers, so these are
// only reachable when a caller passes the zero-padded string explicitly.
static DESCRIPTIONS: &[(&str, &str, &str)] = &[
    ("0", "Clear sky's today", ICON_CLEAR_DAY),
    ("1", "It's mainly clear today", ICON_FEW_CLOUDS_DAY),
    ("2", "It's partly cloudy today", ICON_SCATTERED_DAY),
    ("3", "Overcast", ICON_BROKEN_DAY),
    ("01", "It's a nice clear sky at night", ICON_CLEAR_NIGHT),
    ("02", "It's mainly clear at night", ICON_FEW_CLOUDS_NIGHT),
    ("03", "It's partly cloudy at night", ICON_SCATTERED_NIGHT),
    ("04", "Overcast at night", ICON_BROKEN_NIGHT),
    ("05", "It's misting right now", ICON_MIST),
    ("06", "Smokey today", ICON_MIST),
    ("07", "Hazy today", ICON_MIST),
    ("08", "Dusty today", ICON_MIST),
    ("09", "Sandy today", ICON_MIST),
    ("10", "Ashy today", ICON_MIST),
    ("11", "Hold on to your hats! Squalls today...", ICON_MIST),
    ("12", "Today brings a tornado", ICON_MIST),
    ("13", "Today brings a tropical storm", ICON_MIST),
    ("14", "Today brings a hurricane", ICON_MIST),
    ("15", "Today brings a cold front", ICON_MIST),
    ("16", "Today brings a warm front", ICON_MIST),
    ("17", "Today brings a stationary front", ICON_MIST),
    ("18", "Today brings an occluded front", ICON_MIST),
    ("19", "Unknown weather phenomenon", ICON_MIST),
    ("45", "It's foggy today", ICON_MIST),
    ("48", "Depositing rime fog", ICON_MIST),
    ("51", "It's a light drizzle today", ICON_SHOWER),
    ("52", "It's a moderate drizzle today", ICON_SHOWER),
    ("53", "It's a dense drizzle today", ICON_SHOWER),
    ("55", "Some light rain today", ICON_RAIN),
    ("56", "Some moderate rain today", ICON_RAIN),
    ("57", "Some heavy rain today", ICON_RAIN),
    ("61", "Nice, easy light snow", ICON_SNOW),
    ("62", "Today brings moderate snow", ICON_SNOW),
    ("63", "Get your shovel ready! Today brings heavy snow", ICON_SNOW),
    ("71", "Light rain showers", ICON_SHOWER),
    ("72", "Moderate rain showers", ICON_SHOWER),
    ("73", "Heavy rain showers", ICON_SHOWER),
    ("80", "Some rain showers", ICON_SHOWER),
    ("81", "Some rain showers with thunder", ICON_THUNDER),
    ("82", "Heavy rain showers with thunder", ICON_THUNDER),
    ("95", "BOOM! Thunderstorms", ICON_THUNDER),
    ("96", "Ouch! Thunderstorms with hail", ICON_THUNDER),
    ("99", "Hide... Thunderstorms with heavy hail", ICON_THUNDER),
];

static SHORT_LABELS: &[(&str, &str)] = &[
    ("0", "Sunny"),
    ("1", "Mostly Sunny"),
    ("2", "Partly Cloudy"),
    ("3", "Cloudy"),
    ("45", "Foggy"),
    ("48", "Rime Fog"),
    ("51", "Light Drizzle"),
    ("52", "Drizzle"),
    ("53", "Dense Drizzle"),
    ("55", "Light Rain"),
    ("56", "Rain"),
    ("57", "Heavy Rain"),
    ("61", "Light Snow"),
    ("62", "Snow"),
    ("63", "Heavy Snow"),
    ("71", "Light Showers"),
    ("72", "Showers"),
    ("73", "Heavy Showers"),
    ("80", "Rain Showers"),
    ("81", "Thundershowers"),
    ("82", "Heavy Thundershowers"),
    ("95", "Thunderstorm"),
    ("96", "Hailstorm"),
    ("99", "Heavy Hail"),
];

static COLORS: &[(&str, Color, Color)] = &[
    ("Clear sky's today", Color::SkyBlue, Color::Black),
    ("It's mainly clear today", Color::LightSkyBlue, Color::Black),
    ("It's partly cloudy today", Color::LightSteelBlue, Color::Black),
    ("Overcast", Color::SlateGray, Color::White),
    ("It's foggy today", Color::Gainsboro, Color::Black),
    ("Depositing rime fog", Color::Silver, Color::Black),
    ("It's a light drizzle today", Color::LightBlue, Color::Black),
    ("Some moderate rain today", Color::SteelBlue, Color::White),
    ("Nice, easy light snow", Color::Snow, Color::Black),
    (
        "Get your shovel ready! Today brings heavy snow",
        Color::WhiteSmoke,
        Color::Black,
    ),
    ("BOOM! Thunderstorms", Color::DarkSlateGray, Color::Yellow),
];

/// Describe a weather code. Unmapped codes yield
/// `("Unknown weather condition", "")`.
pub fn describe_condition(code: &str) -> ConditionInfo {
    DESCRIPTIONS
        .iter()
        .find(|(key, _, _)| *key == code)
        .map(|&(_, description, icon_ref)| ConditionInfo { description, icon_ref })
        .unwrap_or(ConditionInfo {
            description: UNKNOWN_DESCRIPTION,
            icon_ref: "",
        })
}

/// Terse label for the daily forecast row; `"Unknown"` when unmapped.
pub fn short_label(code: &str) -> &'static str {
    SHORT_LABELS
        .iter()
        .find(|(key, _)| *key == code)
        .map(|&(_, label)| label)
        .unwrap_or(UNKNOWN_SHORT_LABEL)
}

/// Theme colors keyed by the description returned from [`describe_condition`].
pub fn colors_for_condition(description: &str) -> ConditionColors {
    COLORS
        .iter()
        .find(|(key, _, _)| *key == description)
        .map(|&(_, background, font)| ConditionColors { background, font })
        .unwrap_or(DEFAULT_COLORS)
}
