use crate::clients::geocode::GeocodeClient;
use crate::db::Store;
use crate::models::Location;
use crate::services::ServiceError;
use std::sync::Arc;
use tracing::{info, warn};

/// Geocode lookups with a write-once cache in front of the API.
pub struct LocationService {
    store: Store,
    geocoder: Arc<GeocodeClient>,
}

impl LocationService {
    #[must_use]
    pub const fn new(store: Store, geocoder: Arc<GeocodeClient>) -> Self {
        Self { store, geocoder }
    }

    /// A cached row is returned as-is with no freshness check. On a miss the
    /// geocoder's first result is stored before it is returned; a failed
    /// insert is logged and does not fail the lookup.
    pub async fn resolve(&self, search_query: &str) -> Result<Location, ServiceError> {
        if let Some(cached) = self
            .store
            .find_location(search_query)
            .await
            .map_err(ServiceError::database)?
        {
            info!(search_query, "sending data from DB");
            return Ok(cached);
        }

        info!(search_query, "getting new data from geocoder");

        let result = self
            .geocoder
            .geocode(search_query)
            .await
            .map_err(|e| ServiceError::external("Geocode", e))?;

        let location = Location::from_geocode(search_query, result);

        if let Err(e) = self.store.add_location(&location).await {
            warn!(search_query, "Failed to cache location: {:#}", e);
        }

        Ok(location)
    }
}
