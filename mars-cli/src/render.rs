use std::fmt::{self, Write};

use mars_core::WeatherSnapshot;

/// Human-readable report for a snapshot.
pub fn render_text(snapshot: &WeatherSnapshot) -> String {
    let mut out = String::new();
    // fmt::Write for String never returns an error.
    write_report(&mut out, snapshot).map(|()| out).unwrap_or_default()
}

fn write_report(out: &mut impl Write, snapshot: &WeatherSnapshot) -> fmt::Result {
    writeln!(out, "{}", snapshot.condition_description)?;
    if snapshot.has_icon() {
        writeln!(out, "Icon: {}", snapshot.condition_icon_ref)?;
    }
    writeln!(
        out,
        "Theme: {} on {}",
        snapshot.condition_colors.font, snapshot.condition_colors.background
    )?;
    writeln!(out, "The temperature is around {}°F", snapshot.temperature_f)?;
    writeln!(out, "While the humidity is: {}%", snapshot.humidity_pct)?;
    writeln!(out, "The wind speed is: {} m/s", snapshot.wind_speed_ms)?;

    if let Some(max) = snapshot.max_temp_f {
        writeln!(out, "Max Temp: {max}°F")?;
    }
    if let Some(min) = snapshot.min_temp_f {
        writeln!(out, "Min Temp: {min}°F")?;
    }
    if let Some(precipitation) = snapshot.precipitation_mm {
        writeln!(out, "Precipitation: {precipitation}mm")?;
    }

    if !snapshot.daily_forecasts.is_empty() {
        writeln!(out)?;
        for day in &snapshot.daily_forecasts {
            writeln!(
                out,
                "{:<10} {:<22} {:>7}°F / {:>7}°F",
                day.weekday_name, day.short_condition, day.max_temp_f, day.min_temp_f
            )?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mars_core::{DailyForecast, condition::DEFAULT_COLORS};

    fn snapshot() -> WeatherSnapshot {
        WeatherSnapshot {
            temperature_f: 50.0,
            humidity_pct: 80.0,
            wind_speed_ms: 5.5,
            condition_description: "Overcast".into(),
            condition_icon_ref: "https://openweathermap.org/img/wn/04d@2x.png".into(),
            condition_colors: DEFAULT_COLORS,
            max_temp_f: Some(68.0),
            min_temp_f: Some(50.0),
            precipitation_mm: Some(1.2),
            daily_forecasts: vec![
                DailyForecast::new(68.0, 50.0, "Sunny", "Monday"),
                DailyForecast::new(71.6, 51.8, "Light Snow", "Tuesday"),
            ],
        }
    }

    #[test]
    fn renders_current_conditions() {
        let text = render_text(&snapshot());
        assert!(text.starts_with("Overcast\n"));
        assert!(text.contains("The temperature is around 50°F"));
        assert!(text.contains("While the humidity is: 80%"));
        assert!(text.contains("The wind speed is: 5.5 m/s"));
        assert!(text.contains("Precipitation: 1.2mm"));
        assert!(text.contains("Theme: White on DarkSlateBlue"));
    }

    #[test]
    fn renders_one_line_per_day() {
        let text = render_text(&snapshot());
        let days: Vec<_> = text.lines().filter(|l| l.contains("°F / ")).collect();
        assert_eq!(days.len(), 2);
        assert!(days[0].starts_with("Monday"));
        assert!(days[1].contains("Light Snow"));
    }

    #[test]
    fn omits_icon_and_daily_when_absent() {
        let mut s = snapshot();
        s.condition_icon_ref.clear();
        s.max_temp_f = None;
        s.min_temp_f = None;
        s.precipitation_mm = None;
        s.daily_forecasts.clear();

        let text = render_text(&s);
        assert!(!text.contains("Icon:"));
        assert!(!text.contains("Max Temp"));
        assert!(!text.contains("°F / "));
    }
}
