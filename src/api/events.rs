use axum::{
    Json,
    extract::{RawQuery, State},
};
use std::sync::Arc;

use super::{ApiError, AppState, params};
use crate::models::Event;

pub async fn get_events(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Result<Json<Vec<Event>>, ApiError> {
    let at = params::coordinates(query.as_deref()).map_err(ApiError::events)?;

    let events = state
        .events()
        .nearby(at)
        .await
        .map_err(ApiError::events)?;

    Ok(Json(events))
}
