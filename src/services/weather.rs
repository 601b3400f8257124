use crate::clients::forecast::ForecastClient;
use crate::models::{Coordinates, Forecast};
use crate::services::ServiceError;
use std::sync::Arc;

/// Uncached daily forecasts.
pub struct WeatherService {
    client: Arc<ForecastClient>,
}

impl WeatherService {
    #[must_use]
    pub const fn new(client: Arc<ForecastClient>) -> Self {
        Self { client }
    }

    pub async fn daily_forecast(&self, at: Coordinates) -> Result<Vec<Forecast>, ServiceError> {
        let days = self
            .client
            .daily(at.latitude, at.longitude)
            .await
            .map_err(|e| ServiceError::external("Forecast", e))?;

        days.into_iter()
            .map(|day| Forecast::try_from(day).map_err(ServiceError::from))
            .collect()
    }
}
