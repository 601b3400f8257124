use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::ProviderConfig;
use crate::constants::upstream::GOOGLE_MAPS_API;

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
    #[serde(default)]
    status: String,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResult {
    pub formatted_address: String,
    pub geometry: Geometry,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Google Geocoding API client.
#[derive(Clone)]
pub struct GeocodeClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GeocodeClient {
    #[must_use]
    pub fn with_shared_client(client: Client, config: &ProviderConfig) -> Self {
        Self {
            client,
            base_url: config.base_url_or(GOOGLE_MAPS_API).to_string(),
            api_key: config.api_key.clone(),
        }
    }

    /// Resolves free text to its best match. Only the first result is used.
    pub async fn geocode(&self, address: &str) -> Result<GeocodeResult> {
        let url = format!("{}/maps/api/geocode/json", self.base_url);
        debug!(address, "Querying geocoder");

        let response = self
            .client
            .get(&url)
            .query(&[("address", address), ("key", self.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("Geocode API error: {} - {}", status, body));
        }

        let response: GeocodeResponse = response.json().await?;

        response.results.into_iter().next().ok_or_else(|| {
            anyhow::anyhow!(
                "Geocode API returned no results for '{}' (status: {}{})",
                address,
                response.status,
                response
                    .error_message
                    .map(|m| format!(", {m}"))
                    .unwrap_or_default()
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_geocode_response() {
        let body = r#"{
            "results": [
                {
                    "formatted_address": "Boston, MA, USA",
                    "geometry": { "location": { "lat": 42.3600825, "lng": -71.0588801 } },
                    "place_id": "ignored"
                },
                {
                    "formatted_address": "Boston, UK",
                    "geometry": { "location": { "lat": 52.97, "lng": -0.02 } }
                }
            ],
            "status": "OK"
        }"#;

        let response: GeocodeResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.results.len(), 2);
        assert_eq!(response.results[0].formatted_address, "Boston, MA, USA");
        assert!((response.results[0].geometry.location.lng + 71.058_880_1).abs() < 1e-9);
    }

    #[test]
    fn test_parse_denied_response() {
        let body = r#"{ "results": [], "status": "REQUEST_DENIED", "error_message": "bad key" }"#;
        let response: GeocodeResponse = serde_json::from_str(body).unwrap();
        assert!(response.results.is_empty());
        assert_eq!(response.error_message.as_deref(), Some("bad key"));
    }

    #[test]
    fn test_default_base_url() {
        let client = GeocodeClient::with_shared_client(Client::new(), &ProviderConfig::default());
        assert_eq!(client.base_url, GOOGLE_MAPS_API);
    }
}
