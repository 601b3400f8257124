use axum::{
    Json,
    extract::{RawQuery, State},
};
use std::sync::Arc;

use super::{ApiError, AppState, params};
use crate::models::Location;

pub async fn get_location(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Result<Json<Location>, ApiError> {
    let search_query = params::search_text(query.as_deref()).map_err(ApiError::location)?;

    let location = state
        .locations()
        .resolve(&search_query)
        .await
        .map_err(ApiError::location)?;

    Ok(Json(location))
}
