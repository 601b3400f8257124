use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::ProviderConfig;
use crate::constants::upstream::EVENTBRITE_API;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    events: Vec<EventbriteEvent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventbriteEvent {
    pub url: String,
    pub name: MultipartText,
    pub start: EventTime,
    #[serde(default)]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MultipartText {
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventTime {
    /// ISO-8601 UTC timestamp, e.g. `2018-05-12T02:00:00Z`
    pub utc: String,
}

#[derive(Clone)]
pub struct EventbriteClient {
    client: Client,
    base_url: String,
    token: String,
}

impl EventbriteClient {
    #[must_use]
    pub fn with_shared_client(client: Client, config: &ProviderConfig) -> Self {
        Self {
            client,
            base_url: config.base_url_or(EVENTBRITE_API).to_string(),
            token: config.api_key.clone(),
        }
    }

    /// Searches events around a point. Order is preserved as received.
    pub async fn search(&self, latitude: f64, longitude: f64) -> Result<Vec<EventbriteEvent>> {
        let url = format!("{}/v3/events/search/", self.base_url);
        debug!(latitude, longitude, "Querying Eventbrite");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("location.longitude", longitude.to_string()),
                ("location.latitude", latitude.to_string()),
                ("expand", "venue".to_string()),
                ("token", self.token.clone()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("Eventbrite API error: {} - {}", status, body));
        }

        let response: SearchResponse = response.json().await?;

        Ok(response.events)
    }
}
