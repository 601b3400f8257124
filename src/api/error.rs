use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use crate::constants::messages::{EVENTS_FAILURE, LOCATION_FAILURE, WEATHER_FAILURE};

/// Route-level failure. The cause is logged; the client only ever sees a 500
/// with the route's fixed plaintext message.
#[derive(Debug)]
pub enum ApiError {
    Location(String),

    Weather(String),

    Events(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Location(msg) => write!(f, "Location lookup failed: {msg}"),
            Self::Weather(msg) => write!(f, "Weather lookup failed: {msg}"),
            Self::Events(msg) => write!(f, "Events lookup failed: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!("{}", self);

        let body = match self {
            Self::Location(_) => LOCATION_FAILURE,
            Self::Weather(_) => WEATHER_FAILURE,
            Self::Events(_) => EVENTS_FAILURE,
        };

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

impl ApiError {
    pub fn location(err: impl fmt::Display) -> Self {
        Self::Location(err.to_string())
    }

    pub fn weather(err: impl fmt::Display) -> Self {
        Self::Weather(err.to_string())
    }

    pub fn events(err: impl fmt::Display) -> Self {
        Self::Events(err.to_string())
    }
}
