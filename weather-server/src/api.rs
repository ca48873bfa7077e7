use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    response::Json,
    routing::get,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;
use weather_core::{LocationCandidate, WeatherProvider, WeatherResolver, search::find_candidates};

use crate::error::ApiError;

/// Shared by all handlers; cloned per request.
#[derive(Debug, Clone)]
pub struct AppState {
    provider: Arc<dyn WeatherProvider>,
    resolver: WeatherResolver,
}

impl AppState {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self {
            resolver: WeatherResolver::new(Arc::clone(&provider)),
            provider,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WeatherParams {
    location: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/search", get(search))
        .route("/weather", get(weather))
}

/// `GET /search?q=Lond`: up to five candidates for autocomplete.
async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<LocationCandidate>>, ApiError> {
    let query = params
        .q
        .filter(|q| !q.is_empty())
        .ok_or(ApiError::MissingParameter("Query"))?;

    let candidates = find_candidates(state.provider.as_ref(), &query)
        .await
        .map_err(ApiError::search)?;

    info!(%query, found = candidates.len(), "Searched cities");
    Ok(Json(candidates))
}

/// `GET /weather?location=London`: geocode, then current conditions in the
/// provider's own JSON shape.
async fn weather(
    State(state): State<AppState>,
    Query(params): Query<WeatherParams>,
) -> Result<Json<Value>, ApiError> {
    let location = params
        .location
        .filter(|l| !l.is_empty())
        .ok_or(ApiError::MissingParameter("Location"))?;

    let record = state.resolver.resolve(&location).await?;
    Ok(Json(record.upstream_json()))
}
