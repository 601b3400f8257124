//! Decoding of the `data` query parameter.
//!
//! Browsers send the location search as `?data=<text>` and coordinates as a
//! bracket-encoded object (`?data[latitude]=..&data[longitude]=..`), usually
//! alongside the other fields of the location record. A JSON object in `data`
//! is accepted too.

use serde_json::Value;
use thiserror::Error;
use url::form_urlencoded;

use crate::models::Coordinates;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParamError {
    #[error("Missing query parameter: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {field}: {value}")]
    Invalid { field: &'static str, value: String },
}

struct QueryPairs(Vec<(String, String)>);

impl QueryPairs {
    fn parse(query: Option<&str>) -> Self {
        Self(
            form_urlencoded::parse(query.unwrap_or_default().as_bytes())
                .into_owned()
                .collect(),
        )
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// The raw, percent-decoded search string. It is not trimmed; the cache is
/// keyed on exactly what the client sent.
pub fn search_text(query: Option<&str>) -> Result<String, ParamError> {
    QueryPairs::parse(query)
        .get("data")
        .map(str::to_string)
        .ok_or(ParamError::Missing("data"))
}

pub fn coordinates(query: Option<&str>) -> Result<Coordinates, ParamError> {
    let pairs = QueryPairs::parse(query);

    let latitude = pairs.get("data[latitude]");
    let longitude = pairs.get("data[longitude]");

    if latitude.is_some() || longitude.is_some() {
        return Ok(Coordinates {
            latitude: parse_coordinate(
                "latitude",
                latitude.ok_or(ParamError::Missing("data[latitude]"))?,
            )?,
            longitude: parse_coordinate(
                "longitude",
                longitude.ok_or(ParamError::Missing("data[longitude]"))?,
            )?,
        });
    }

    let raw = pairs.get("data").ok_or(ParamError::Missing("data"))?;
    let value: Value = serde_json::from_str(raw).map_err(|_| ParamError::Invalid {
        field: "data",
        value: raw.to_string(),
    })?;

    Ok(Coordinates {
        latitude: json_coordinate(&value, "latitude")?,
        longitude: json_coordinate(&value, "longitude")?,
    })
}

fn json_coordinate(value: &Value, field: &'static str) -> Result<f64, ParamError> {
    match value.get(field) {
        Some(Value::Number(n)) => n.as_f64().ok_or_else(|| ParamError::Invalid {
            field,
            value: n.to_string(),
        }),
        Some(Value::String(s)) => parse_coordinate(field, s),
        Some(other) => Err(ParamError::Invalid {
            field,
            value: other.to_string(),
        }),
        None => Err(ParamError::Missing(field)),
    }
}

fn parse_coordinate(field: &'static str, raw: &str) -> Result<f64, ParamError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ParamError::Invalid {
            field,
            value: raw.to_string(),
        })
}
