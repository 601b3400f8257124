use std::sync::Arc;
use std::time::Duration;

use crate::clients::eventbrite::EventbriteClient;
use crate::clients::forecast::ForecastClient;
use crate::clients::geocode::GeocodeClient;
use crate::config::Config;
use crate::db::Store;
use crate::services::{EventService, LocationService, WeatherService};

/// Build a shared HTTP client with reasonable defaults for API calls.
/// This client is reused by every upstream so connections are pooled.
fn build_shared_http_client(config: &Config) -> anyhow::Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.upstream.request_timeout_seconds))
        .user_agent(config.upstream.user_agent.clone())
        .pool_max_idle_per_host(10);

    if !config.upstream.use_system_proxy {
        builder = builder.no_proxy();
    }

    builder
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

#[derive(Clone)]
pub struct SharedState {
    pub store: Store,

    pub locations: Arc<LocationService>,

    pub weather: Arc<WeatherService>,

    pub events: Arc<EventService>,
}

impl SharedState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_url,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Self::with_store(config, store)
    }

    pub fn with_store(config: &Config, store: Store) -> anyhow::Result<Self> {
        let http_client = build_shared_http_client(config)?;

        let geocoder = Arc::new(GeocodeClient::with_shared_client(
            http_client.clone(),
            &config.geocode,
        ));
        let forecasts = Arc::new(ForecastClient::with_shared_client(
            http_client.clone(),
            &config.weather,
        ));
        let eventbrite = Arc::new(EventbriteClient::with_shared_client(
            http_client,
            &config.events,
        ));

        Ok(Self {
            locations: Arc::new(LocationService::new(store.clone(), geocoder)),
            weather: Arc::new(WeatherService::new(forecasts)),
            events: Arc::new(EventService::new(eventbrite)),
            store,
        })
    }
}
