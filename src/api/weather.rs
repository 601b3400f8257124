use axum::{
    Json,
    extract::{RawQuery, State},
};
use std::sync::Arc;

use super::{ApiError, AppState, params};
use crate::models::Forecast;

pub async fn get_weather(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Result<Json<Vec<Forecast>>, ApiError> {
    let at = params::coordinates(query.as_deref()).map_err(ApiError::weather)?;

    let forecasts = state
        .weather()
        .daily_forecast(at)
        .await
        .map_err(ApiError::weather)?;

    Ok(Json(forecasts))
}
