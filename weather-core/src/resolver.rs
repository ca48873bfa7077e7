use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::{Result, WeatherError, model::WeatherRecord, provider::WeatherProvider};

/// Turns free text such as `"London"` or `"Portland, Oregon, US"` into current
/// weather: geocode with limit 1, then fetch conditions at the first match.
#[derive(Debug, Clone)]
pub struct WeatherResolver {
    provider: Arc<dyn WeatherProvider>,
}

impl WeatherResolver {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    #[instrument(skip(self))]
    pub async fn resolve(&self, location: &str) -> Result<WeatherRecord> {
        if location.trim().is_empty() {
            return Err(WeatherError::invalid_input("Location parameter is required"));
        }

        let place = self
            .provider
            .geocode(location, 1)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::location_not_found(location))?;

        debug!(
            "Found coordinates for {}: {:.4}, {:.4}",
            place.label(),
            place.latitude,
            place.longitude
        );

        let record = self
            .provider
            .current_weather(place.latitude, place.longitude)
            .await?;

        info!(
            city = %record.city_name,
            country = %record.country_code,
            "Weather resolved"
        );
        Ok(record)
    }
}
