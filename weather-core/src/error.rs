use std::fmt;

use thiserror::Error;

/// Which upstream OpenWeather endpoint a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Geocoding,
    Weather,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Geocoding => f.write_str("Geocoding"),
            Endpoint::Weather => f.write_str("Weather"),
        }
    }
}

/// Failures surfaced by the gateway, the search orchestrator and the resolver.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// No OpenWeather credential is configured.
    #[error("OpenWeather API key is not configured")]
    Configuration,

    /// Missing or malformed caller input.
    #[error("{0}")]
    InvalidInput(String),

    /// Geocoding returned zero matches for `location`.
    #[error("City not found: {location}")]
    LocationNotFound { location: String },

    /// Transport failure, non-success status or unreadable upstream payload.
    #[error("{endpoint} API Error: {detail}")]
    ProviderUnavailable {
        endpoint: Endpoint,
        status: Option<u16>,
        detail: String,
    },
}

impl WeatherError {
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn location_not_found<S: Into<String>>(location: S) -> Self {
        Self::LocationNotFound {
            location: location.into(),
        }
    }

    /// Upstream answered with a non-success status; the status becomes the detail.
    pub fn upstream_status(endpoint: Endpoint, status: u16) -> Self {
        Self::ProviderUnavailable {
            endpoint,
            status: Some(status),
            detail: status.to_string(),
        }
    }

    /// Upstream could not be reached or its body could not be read.
    pub fn upstream_failure<S: Into<String>>(endpoint: Endpoint, detail: S) -> Self {
        Self::ProviderUnavailable {
            endpoint,
            status: None,
            detail: detail.into(),
        }
    }

    /// HTTP status this failure is reported with.
    pub fn status_code(&self) -> u16 {
        match self {
            WeatherError::Configuration => 500,
            WeatherError::InvalidInput(_) => 400,
            WeatherError::LocationNotFound { .. } => 404,
            WeatherError::ProviderUnavailable { .. } => 500,
        }
    }
}

pub type Result<T> = std::result::Result<T, WeatherError>;
