pub mod eventbrite;
pub mod forecast;
pub mod geocode;
