use crate::clients::eventbrite::EventbriteClient;
use crate::models::{Coordinates, Event};
use crate::services::ServiceError;
use std::sync::Arc;

/// Uncached event search around a point.
pub struct EventService {
    client: Arc<EventbriteClient>,
}

impl EventService {
    #[must_use]
    pub const fn new(client: Arc<EventbriteClient>) -> Self {
        Self { client }
    }

    pub async fn nearby(&self, at: Coordinates) -> Result<Vec<Event>, ServiceError> {
        let events = self
            .client
            .search(at.latitude, at.longitude)
            .await
            .map_err(|e| ServiceError::external("Eventbrite", e))?;

        events
            .into_iter()
            .map(|event| Event::try_from(event).map_err(ServiceError::from))
            .collect()
    }
}
