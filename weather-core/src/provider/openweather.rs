use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use tracing::{debug, instrument, warn};

use crate::{
    Endpoint, GatewayConfig, Result, WeatherError,
    model::{LocationCandidate, WeatherRecord},
};

use super::WeatherProvider;

const GEOCODING_PATH: &str = "/geo/1.0/direct";
const WEATHER_PATH: &str = "/data/2.5/weather";

/// Gateway to the OpenWeather geocoding and current-weather endpoints.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    config: GatewayConfig,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    fn api_key(&self) -> Result<&str> {
        self.config
            .api_key
            .as_deref()
            .ok_or(WeatherError::Configuration)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.config.base_url, path);
        debug!(%endpoint, %url, "Calling OpenWeather");

        // `without_url` keeps the appid query parameter out of error text.
        let res = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                WeatherError::upstream_failure(endpoint, format!("request failed: {}", e.without_url()))
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            WeatherError::upstream_failure(
                endpoint,
                format!("failed to read response body: {}", e.without_url()),
            )
        })?;

        if !status.is_success() {
            warn!(
                %endpoint,
                status = status.as_u16(),
                body = %truncate_body(&body),
                "OpenWeather request failed"
            );
            return Err(WeatherError::upstream_status(endpoint, status.as_u16()));
        }

        serde_json::from_str(&body).map_err(|e| {
            WeatherError::upstream_failure(endpoint, format!("malformed response: {e}"))
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwGeocodingEntry {
    name: String,
    lat: f64,
    lon: f64,
    #[serde(default)]
    country: String,
    state: Option<String>,
}

impl From<OwGeocodingEntry> for LocationCandidate {
    fn from(entry: OwGeocodingEntry) -> Self {
        Self {
            name: entry.name,
            country: entry.country,
            state: entry.state,
            latitude: entry.lat,
            longitude: entry.lon,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    pressure: u32,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
    #[serde(default)]
    deg: u16,
    gust: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct OwClouds {
    all: u8,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    #[serde(default)]
    country: String,
    #[serde(default)]
    sunrise: i64,
    #[serde(default)]
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    coord: OwCoord,
    #[serde(default)]
    weather: Vec<OwWeather>,
    main: OwMain,
    visibility: Option<u32>,
    wind: OwWind,
    #[serde(default)]
    clouds: OwClouds,
    dt: i64,
    sys: OwSys,
    #[serde(default)]
    timezone: i32,
    name: String,
}

impl From<OwCurrentResponse> for WeatherRecord {
    fn from(parsed: OwCurrentResponse) -> Self {
        let (condition_main, condition_summary, condition_icon) = parsed
            .weather
            .into_iter()
            .next()
            .map(|w| (w.main, w.description, w.icon))
            .unwrap_or_else(|| ("Unknown".to_string(), "Unknown".to_string(), String::new()));

        Self {
            city_name: parsed.name,
            country_code: parsed.sys.country,
            latitude: parsed.coord.lat,
            longitude: parsed.coord.lon,
            temperature: parsed.main.temp,
            feels_like: parsed.main.feels_like,
            temp_min: parsed.main.temp_min,
            temp_max: parsed.main.temp_max,
            humidity: parsed.main.humidity,
            pressure: parsed.main.pressure,
            visibility_meters: parsed.visibility,
            wind_speed: parsed.wind.speed,
            wind_degrees: parsed.wind.deg,
            wind_gust: parsed.wind.gust,
            cloudiness: parsed.clouds.all,
            condition_main,
            condition_summary,
            condition_icon,
            sunrise_epoch: parsed.sys.sunrise,
            sunset_epoch: parsed.sys.sunset,
            observed_at_epoch: parsed.dt,
            timezone_offset: parsed.timezone,
            raw: serde_json::Value::Null,
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self))]
    async fn geocode(&self, query: &str, limit: usize) -> Result<Vec<LocationCandidate>> {
        let api_key = self.api_key()?;

        let entries: Vec<OwGeocodingEntry> = self
            .get_json(
                Endpoint::Geocoding,
                GEOCODING_PATH,
                &[
                    ("q", query.to_string()),
                    ("limit", limit.to_string()),
                    ("appid", api_key.to_string()),
                ],
            )
            .await?;

        let candidates: Vec<LocationCandidate> = entries
            .into_iter()
            .take(limit)
            .map(LocationCandidate::from)
            .collect();

        debug!(found = candidates.len(), "Geocoding finished");
        Ok(candidates)
    }

    #[instrument(skip(self))]
    async fn current_weather(&self, latitude: f64, longitude: f64) -> Result<WeatherRecord> {
        let api_key = self.api_key()?;

        let raw: serde_json::Value = self
            .get_json(
                Endpoint::Weather,
                WEATHER_PATH,
                &[
                    ("lat", latitude.to_string()),
                    ("lon", longitude.to_string()),
                    ("appid", api_key.to_string()),
                    ("units", "metric".to_string()),
                ],
            )
            .await?;

        let parsed: OwCurrentResponse = serde_json::from_value(raw.clone()).map_err(|e| {
            WeatherError::upstream_failure(Endpoint::Weather, format!("malformed response: {e}"))
        })?;

        let mut record = WeatherRecord::from(parsed);
        record.raw = raw;
        Ok(record)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
