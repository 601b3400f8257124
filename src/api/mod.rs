use axum::{Router, middleware, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::Store;
use crate::services::{EventService, LocationService, WeatherService};
use crate::state::SharedState;

mod error;
mod events;
mod fallback;
mod location;
mod observability;
pub mod params;
mod weather;

pub use error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,
}

impl AppState {
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.shared.store
    }

    #[must_use]
    pub fn locations(&self) -> &LocationService {
        &self.shared.locations
    }

    #[must_use]
    pub fn weather(&self) -> &WeatherService {
        &self.shared.weather
    }

    #[must_use]
    pub fn events(&self) -> &EventService {
        &self.shared.events
    }
}

#[must_use]
pub fn create_app_state(shared: Arc<SharedState>) -> Arc<AppState> {
    Arc::new(AppState { shared })
}

pub async fn create_app_state_from_config(config: Config) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(&config).await?);
    Ok(create_app_state(shared))
}

/// Three lookup routes plus a catch-all. Any method other than GET/HEAD on a
/// lookup route falls through to the catch-all as well.
pub fn router(state: Arc<AppState>) -> Router {
    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/location",
            get(location::get_location).fallback(fallback::wrong_place),
        )
        .route(
            "/weather",
            get(weather::get_weather).fallback(fallback::wrong_place),
        )
        .route(
            "/events",
            get(events::get_events).fallback(fallback::wrong_place),
        )
        .fallback(fallback::wrong_place)
        .with_state(state)
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::request_logging))
}
