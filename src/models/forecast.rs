use serde::{Deserialize, Serialize};

use super::{DateError, date_from_unix};
use crate::clients::forecast::DailyForecast;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Forecast {
    /// `null` when upstream sent no summary for the day
    pub forecast: Option<String>,

    pub time: String,
}

impl TryFrom<DailyForecast> for Forecast {
    type Error = DateError;

    fn try_from(day: DailyForecast) -> Result<Self, Self::Error> {
        Ok(Self {
            time: date_from_unix(day.time)?,
            forecast: day.summary,
        })
    }
}
