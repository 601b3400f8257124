pub mod prelude;

pub mod locations;
