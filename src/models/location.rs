use serde::{Deserialize, Serialize};

use crate::clients::geocode::GeocodeResult;
use crate::entities::locations;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub search_query: String,

    pub formatted_query: String,

    pub latitude: f64,

    pub longitude: f64,
}

/// A point on the map as sent by the client for weather and events lookups.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,

    pub longitude: f64,
}

impl Location {
    #[must_use]
    pub fn from_geocode(search_query: &str, result: GeocodeResult) -> Self {
        Self {
            search_query: search_query.to_string(),
            formatted_query: result.formatted_address,
            latitude: result.geometry.location.lat,
            longitude: result.geometry.location.lng,
        }
    }
}

impl From<locations::Model> for Location {
    fn from(row: locations::Model) -> Self {
        Self {
            search_query: row.search_query,
            formatted_query: row.formatted_query,
            latitude: row.latitude,
            longitude: row.longitude,
        }
    }
}
