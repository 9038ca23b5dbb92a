use ah_core::error::AppError;
use ah_services::ForecastSource;
use axum::extract::{Path, State};
use axum::Json;
use serde_json::Value;

use crate::error::ApiError;
use crate::state::SharedState;

/// Returns the provider payload untouched, from cache when fresh.
pub async fn forecast(
    State(state): State<SharedState>,
    Path((latitude, longitude)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    match state.weather.forecast(&latitude, &longitude).await {
        Ok(forecast) => {
            let hit = forecast.source == ForecastSource::Cache;
            state.metrics.record_weather_cache(hit);
            if !hit {
                state.metrics.record_upstream("weather", true);
            }
            Ok(Json(forecast.data))
        }
        Err(e) => {
            if matches!(e, AppError::Upstream(_)) {
                state.metrics.record_weather_cache(false);
                state.metrics.record_upstream("weather", false);
            }
            Err(e.into())
        }
    }
}
