//! Core library for the weather app.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather gateway behind the `WeatherProvider` trait
//! - Debounced city search and two-step weather resolution
//! - Shared domain models and the error taxonomy
//!
//! It is used by `weather-server` and `weather-cli`.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod resolver;
pub mod search;

pub use config::{Config, GatewayConfig, OpenWeatherConfig, ServerConfig};
pub use error::{Endpoint, Result, WeatherError};
pub use model::{LocationCandidate, WeatherRecord};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
pub use resolver::WeatherResolver;
pub use search::{SearchOrchestrator, SearchState};
