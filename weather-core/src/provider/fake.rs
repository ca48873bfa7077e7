//! In-memory provider for exercising the orchestrator and resolver.

use std::{collections::HashMap, sync::Mutex, time::Duration};

use async_trait::async_trait;

use super::WeatherProvider;
use crate::{
    Endpoint, Result, WeatherError,
    model::{LocationCandidate, WeatherRecord},
};

#[derive(Debug, Default)]
pub(crate) struct FakeProvider {
    places: HashMap<String, Vec<LocationCandidate>>,
    delays: HashMap<String, Duration>,
    weather: HashMap<String, WeatherRecord>,
    fail_geocode: Option<u16>,
    fail_weather: Option<u16>,
    geocode_calls: Mutex<Vec<(String, usize)>>,
    weather_calls: Mutex<Vec<(f64, f64)>>,
}

pub(crate) fn place(name: &str, country: &str, latitude: f64, longitude: f64) -> LocationCandidate {
    LocationCandidate {
        name: name.to_string(),
        country: country.to_string(),
        state: None,
        latitude,
        longitude,
    }
}

fn coord_key(latitude: f64, longitude: f64) -> String {
    format!("{latitude:.4},{longitude:.4}")
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_places(mut self, query: &str, places: Vec<LocationCandidate>) -> Self {
        self.places.insert(query.to_string(), places);
        self
    }

    pub fn with_delay(mut self, query: &str, delay: Duration) -> Self {
        self.delays.insert(query.to_string(), delay);
        self
    }

    pub fn with_weather(mut self, latitude: f64, longitude: f64, record: WeatherRecord) -> Self {
        self.weather.insert(coord_key(latitude, longitude), record);
        self
    }

    pub fn failing_geocode(mut self, status: u16) -> Self {
        self.fail_geocode = Some(status);
        self
    }

    pub fn failing_weather(mut self, status: u16) -> Self {
        self.fail_weather = Some(status);
        self
    }

    pub fn geocode_calls(&self) -> Vec<(String, usize)> {
        self.geocode_calls.lock().unwrap().clone()
    }

    pub fn weather_calls(&self) -> Vec<(f64, f64)> {
        self.weather_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl WeatherProvider for FakeProvider {
    async fn geocode(&self, query: &str, limit: usize) -> Result<Vec<LocationCandidate>> {
        self.geocode_calls
            .lock()
            .unwrap()
            .push((query.to_string(), limit));

        if let Some(delay) = self.delays.get(query) {
            tokio::time::sleep(*delay).await;
        }
        if let Some(status) = self.fail_geocode {
            return Err(WeatherError::upstream_status(Endpoint::Geocoding, status));
        }

        let mut found = self.places.get(query).cloned().unwrap_or_default();
        found.truncate(limit);
        Ok(found)
    }

    async fn current_weather(&self, latitude: f64, longitude: f64) -> Result<WeatherRecord> {
        self.weather_calls.lock().unwrap().push((latitude, longitude));

        if let Some(status) = self.fail_weather {
            return Err(WeatherError::upstream_status(Endpoint::Weather, status));
        }

        self.weather
            .get(&coord_key(latitude, longitude))
            .cloned()
            .ok_or_else(|| WeatherError::upstream_status(Endpoint::Weather, 404))
    }
}
