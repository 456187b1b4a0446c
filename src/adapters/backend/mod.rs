//! Booking backend adapters.
//!
//! [`HttpBookingApi`] talks to the real backend over reqwest;
//! [`MockBookingApi`] is a scriptable in-memory implementation used by unit
//! and integration tests.

mod client;
pub(crate) mod extract;
mod mock;

pub use client::HttpBookingApi;
pub use mock::MockBookingApi;
