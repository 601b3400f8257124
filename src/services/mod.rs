//! Resolvers behind the three public routes.
//!
//! Each service does one upstream call at most and maps the raw response into
//! the normalized records in [`crate::models`].

use crate::models::DateError;
use thiserror::Error;

pub mod events;
pub use events::EventService;

pub mod location;
pub use location::LocationService;

pub mod weather;
pub use weather::WeatherService;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("External API error: {service} - {message}")]
    ExternalApi {
        service: &'static str,
        message: String,
    },

    #[error("Invalid upstream data: {0}")]
    InvalidData(String),
}

impl ServiceError {
    pub fn database(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }

    pub fn external(service: &'static str, err: anyhow::Error) -> Self {
        Self::ExternalApi {
            service,
            message: format!("{err:#}"),
        }
    }
}

impl From<DateError> for ServiceError {
    fn from(err: DateError) -> Self {
        Self::InvalidData(err.to_string())
    }
}
