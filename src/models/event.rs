use serde::{Deserialize, Serialize};

use super::{DateError, date_from_iso};
use crate::clients::eventbrite::EventbriteEvent;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Event {
    pub link: String,

    pub name: String,

    pub event_date: String,

    pub summary: Option<String>,
}

impl TryFrom<EventbriteEvent> for Event {
    type Error = DateError;

    fn try_from(event: EventbriteEvent) -> Result<Self, Self::Error> {
        Ok(Self {
            event_date: date_from_iso(&event.start.utc)?,
            link: event.url,
            name: event.name.text,
            summary: event.summary,
        })
    }
}
