use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// One geocoding match.
///
/// Two candidates may share a name; they are the same place only when their
/// coordinates match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationCandidate {
    pub name: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl LocationCandidate {
    pub fn coordinates(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }

    pub fn same_place(&self, other: &LocationCandidate) -> bool {
        self.coordinates() == other.coordinates()
    }

    /// Disambiguated text fed back into the resolver when this candidate is picked,
    /// e.g. `"Portland, Oregon, US"` or `"London, GB"`.
    pub fn label(&self) -> String {
        match self.state.as_deref().filter(|s| !s.is_empty()) {
            Some(state) => format!("{}, {}, {}", self.name, state, self.country),
            None => format!("{}, {}", self.name, self.country),
        }
    }
}

/// Current conditions for one location, in metric units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherRecord {
    pub city_name: String,
    pub country_code: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Celsius.
    pub temperature: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    /// Percent.
    pub humidity: u8,
    /// hPa.
    pub pressure: u32,
    pub visibility_meters: Option<u32>,
    /// m/s.
    pub wind_speed: f64,
    pub wind_degrees: u16,
    pub wind_gust: Option<f64>,
    /// Cloud cover, percent.
    pub cloudiness: u8,
    /// Group name such as "Clouds" or "Rain".
    pub condition_main: String,
    pub condition_summary: String,
    pub condition_icon: String,
    pub sunrise_epoch: i64,
    pub sunset_epoch: i64,
    pub observed_at_epoch: i64,
    /// Shift from UTC in seconds at the observed location.
    pub timezone_offset: i32,
    /// Provider payload the record was parsed from, `Null` when built locally.
    #[serde(skip)]
    pub raw: serde_json::Value,
}

impl WeatherRecord {
    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.observed_at_epoch, 0)
    }

    pub fn sunrise_local(&self) -> Option<DateTime<FixedOffset>> {
        self.local_time(self.sunrise_epoch)
    }

    pub fn sunset_local(&self) -> Option<DateTime<FixedOffset>> {
        self.local_time(self.sunset_epoch)
    }

    pub fn observed_at_local(&self) -> Option<DateTime<FixedOffset>> {
        self.local_time(self.observed_at_epoch)
    }

    fn local_time(&self, epoch: i64) -> Option<DateTime<FixedOffset>> {
        let offset = FixedOffset::east_opt(self.timezone_offset)?;
        DateTime::from_timestamp(epoch, 0).map(|utc| utc.with_timezone(&offset))
    }

    /// 16-point compass name for the wind direction.
    pub fn wind_direction(&self) -> &'static str {
        wind_direction(self.wind_degrees)
    }

    pub fn icon_url(&self) -> String {
        format!(
            "https://openweathermap.org/img/wn/{}@2x.png",
            self.condition_icon
        )
    }

    pub fn rounded_temperature(&self) -> i64 {
        self.temperature.round() as i64
    }

    /// `"10.0 km"`, or `None` when upstream did not report visibility.
    pub fn visibility_km(&self) -> Option<String> {
        self.visibility_meters
            .map(|m| format!("{:.1} km", f64::from(m) / 1000.0))
    }

    /// The provider's own JSON for this observation. Falls back to the
    /// camelCase record when no payload was kept.
    pub fn upstream_json(&self) -> serde_json::Value {
        if self.raw.is_null() {
            serde_json::to_value(self).unwrap_or_default()
        } else {
            self.raw.clone()
        }
    }
}

pub fn wind_direction(degrees: u16) -> &'static str {
    let index = (f64::from(degrees) / 22.5).round() as usize % COMPASS_POINTS.len();
    COMPASS_POINTS[index]
}

#[cfg(test)]
pub(crate) fn sample_record(city: &str, country: &str) -> WeatherRecord {
    WeatherRecord {
        city_name: city.to_string(),
        country_code: country.to_string(),
        latitude: 51.51,
        longitude: -0.13,
        temperature: 11.6,
        feels_like: 10.9,
        temp_min: 10.2,
        temp_max: 12.8,
        humidity: 81,
        pressure: 1012,
        visibility_meters: Some(10_000),
        wind_speed: 4.1,
        wind_degrees: 240,
        wind_gust: None,
        cloudiness: 75,
        condition_main: "Clouds".to_string(),
        condition_summary: "broken clouds".to_string(),
        condition_icon: "04d".to_string(),
        sunrise_epoch: 1_700_032_000,
        sunset_epoch: 1_700_064_000,
        observed_at_epoch: 1_700_050_000,
        timezone_offset: 0,
        raw: serde_json::Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(state: Option<&str>) -> LocationCandidate {
        LocationCandidate {
            name: "Portland".into(),
            country: "US".into(),
            state: state.map(str::to_string),
            latitude: 45.52,
            longitude: -122.68,
        }
    }

    #[test]
    fn label_includes_state_when_present() {
        assert_eq!(candidate(Some("Oregon")).label(), "Portland, Oregon, US");
        assert_eq!(candidate(None).label(), "Portland, US");
        assert_eq!(candidate(Some("")).label(), "Portland, US");
    }

    #[test]
    fn same_place_compares_coordinates_not_names() {
        let oregon = candidate(Some("Oregon"));
        let mut maine = candidate(Some("Maine"));
        maine.latitude = 43.66;
        maine.longitude = -70.26;

        assert!(!oregon.same_place(&maine));
        assert!(oregon.same_place(&candidate(None)));
    }

    #[test]
    fn wind_direction_uses_sixteen_points() {
        assert_eq!(wind_direction(0), "N");
        assert_eq!(wind_direction(11), "N");
        assert_eq!(wind_direction(12), "NNE");
        assert_eq!(wind_direction(90), "E");
        assert_eq!(wind_direction(240), "WSW");
        assert_eq!(wind_direction(350), "N");
        assert_eq!(wind_direction(360), "N");
    }

    #[test]
    fn presentation_helpers() {
        let mut record = sample_record("London", "GB");
        assert_eq!(record.rounded_temperature(), 12);
        assert_eq!(record.visibility_km().as_deref(), Some("10.0 km"));
        assert_eq!(
            record.icon_url(),
            "https://openweathermap.org/img/wn/04d@2x.png"
        );

        record.visibility_meters = None;
        assert_eq!(record.visibility_km(), None);
    }

    #[test]
    fn local_times_apply_timezone_offset() {
        let mut record = sample_record("Tokyo", "JP");
        record.timezone_offset = 9 * 3600;

        let utc = record.observed_at().expect("valid epoch");
        let local = record.observed_at_local().expect("valid offset");

        assert_eq!(utc.timestamp(), local.timestamp());
        assert_eq!(local.offset().local_minus_utc(), 9 * 3600);
    }

    #[test]
    fn record_serializes_camel_case() {
        let json = serde_json::to_value(sample_record("London", "GB")).expect("serialize");
        assert_eq!(json["cityName"], "London");
        assert_eq!(json["countryCode"], "GB");
        assert_eq!(json["visibilityMeters"], 10_000);
        assert_eq!(json["observedAtEpoch"], 1_700_050_000);
        assert!(json.get("raw").is_none());
    }

    #[test]
    fn upstream_json_prefers_kept_payload() {
        let mut record = sample_record("London", "GB");
        assert_eq!(record.upstream_json()["cityName"], "London");

        record.raw = serde_json::json!({ "name": "London", "main": { "temp": 11.6 } });
        let upstream = record.upstream_json();
        assert_eq!(upstream["main"]["temp"], 11.6);
        assert!(upstream.get("cityName").is_none());
    }
}
