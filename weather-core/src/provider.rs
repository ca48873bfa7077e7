use crate::{
    Config, Result,
    model::{LocationCandidate, WeatherRecord},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

#[cfg(test)]
pub(crate) mod fake;
pub mod openweather;

/// Outbound geocoding and current-weather lookups.
///
/// Implementations are pass-throughs: no caching, no retries, no batching.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Places matching `query`, in upstream order, at most `limit` of them.
    async fn geocode(&self, query: &str, limit: usize) -> Result<Vec<LocationCandidate>>;

    /// Current conditions at the given coordinates, metric units.
    async fn current_weather(&self, latitude: f64, longitude: f64) -> Result<WeatherRecord>;
}

/// Construct the OpenWeather gateway from config.
///
/// A missing API key is not an error here; each request reports it instead.
pub fn provider_from_config(config: &Config) -> Arc<dyn WeatherProvider> {
    if !config.is_configured() {
        tracing::warn!(
            "No OpenWeather API key configured; lookups will fail until one is set \
             (run `weather configure` or export OPENWEATHER_API_KEY)"
        );
    }

    Arc::new(OpenWeatherProvider::new(config.gateway()))
}
