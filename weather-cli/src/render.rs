use chrono::{DateTime, FixedOffset};
use weather_core::WeatherRecord;

fn clock(time: Option<DateTime<FixedOffset>>) -> String {
    time.map(|t| t.format("%-I:%M %p").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Human-readable summary of one record, times in the location's own zone.
pub fn weather_card(record: &WeatherRecord) -> String {
    let observed = record
        .observed_at_local()
        .map(|t| t.format("%b %-d, %Y %-I:%M %p").to_string())
        .unwrap_or_else(|| "-".to_string());

    let gust = record
        .wind_gust
        .map(|g| format!(" (gusts {g:.1} m/s)"))
        .unwrap_or_default();

    let lines = [
        format!("{}, {}  ({observed})", record.city_name, record.country_code),
        format!(
            "  {}°C, {}",
            record.rounded_temperature(),
            record.condition_summary
        ),
        format!(
            "  Feels like {}°C  (min {}°C / max {}°C)",
            record.feels_like.round() as i64,
            record.temp_min.round() as i64,
            record.temp_max.round() as i64
        ),
        format!(
            "  Humidity {}%  Pressure {} hPa  Visibility {}",
            record.humidity,
            record.pressure,
            record.visibility_km().unwrap_or_else(|| "-".to_string())
        ),
        format!(
            "  Wind {:.1} m/s {}{gust}",
            record.wind_speed,
            record.wind_direction()
        ),
        format!(
            "  Sunrise {}  Sunset {}",
            clock(record.sunrise_local()),
            clock(record.sunset_local())
        ),
    ];

    lines.join("\n")
}
