use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::ProviderConfig;
use crate::constants::upstream::DARK_SKY_API;

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    daily: DailyBlock,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    data: Vec<DailyForecast>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailyForecast {
    /// Unix timestamp (seconds) of the start of the day
    pub time: i64,
    /// Dark Sky omits this on some days
    #[serde(default)]
    pub summary: Option<String>,
}

/// Dark Sky style forecast API client.
#[derive(Clone)]
pub struct ForecastClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl ForecastClient {
    #[must_use]
    pub fn with_shared_client(client: Client, config: &ProviderConfig) -> Self {
        Self {
            client,
            base_url: config.base_url_or(DARK_SKY_API).to_string(),
            api_key: config.api_key.clone(),
        }
    }

    /// Returns the daily entries in the order the API sent them.
    pub async fn daily(&self, latitude: f64, longitude: f64) -> Result<Vec<DailyForecast>> {
        let url = format!(
            "{}/forecast/{}/{},{}",
            self.base_url, self.api_key, latitude, longitude
        );
        debug!(latitude, longitude, "Querying forecast API");

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("Forecast API error: {} - {}", status, body));
        }

        let response: ForecastResponse = response.json().await?;

        Ok(response.daily.data)
    }
}
