pub mod messages {
    pub const WRONG_PLACE: &str = "you got to the wrong place";

    pub const LOCATION_FAILURE: &str = "Status 500: So sorry I broke trying to get location.";

    pub const WEATHER_FAILURE: &str = "Status 500: I broke trying to get weather.";

    pub const EVENTS_FAILURE: &str = "Status 500: I broke trying to get events.";
}

pub mod upstream {
    pub const GOOGLE_MAPS_API: &str = "https://maps.googleapis.com";

    pub const DARK_SKY_API: &str = "https://api.darksky.net";

    pub const EVENTBRITE_API: &str = "https://www.eventbriteapi.com";
}

/// Rendering used for every calendar date in responses, e.g. `Tue Oct 18 2026`.
pub const DATE_FORMAT: &str = "%a %b %d %Y";
