use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;
use weather_core::WeatherError;

/// Errors returned by the HTTP handlers, rendered as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0} parameter is required")]
    MissingParameter(&'static str),

    /// Upstream failure during autocomplete; the detail stays in the logs.
    #[error("Failed to search locations")]
    SearchFailed(#[source] WeatherError),

    #[error(transparent)]
    Weather(#[from] WeatherError),
}

impl ApiError {
    /// Map a lookup error from the `/search` path.
    pub fn search(err: WeatherError) -> Self {
        match err {
            WeatherError::ProviderUnavailable { .. } => ApiError::SearchFailed(err),
            other => ApiError::Weather(other),
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingParameter(_) => StatusCode::BAD_REQUEST,
            ApiError::SearchFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Weather(err) => StatusCode::from_u16(err.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::SearchFailed(source) => {
                tracing::error!(error = %source, "Search API error");
            }
            _ if status.is_server_error() => tracing::error!(error = %self, "Weather API error"),
            _ => tracing::debug!(error = %self, %status, "Rejected request"),
        }

        let payload = json!({ "error": self.to_string() });
        (status, Json(payload)).into_response()
    }
}
