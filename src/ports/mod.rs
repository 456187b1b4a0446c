//! Ports - interfaces between the application layer and the outside world.

mod booking_api;

pub use booking_api::{ApiError, BookingApi};
