//! Domain types for the booking fulfillment flow.
//!
//! Everything here is plain data plus small invariant-carrying logic; all
//! network access lives behind the [`crate::ports::BookingApi`] port.

pub mod booking;
pub mod catalog;
pub mod dates;
pub mod pricing;
pub mod seating;
pub mod showtime;
pub mod slots;

pub use booking::{BookingRequest, OrderReceipt, Ticket, TicketValidationError};
pub use catalog::{CinemaRecord, MovieRecord};
pub use pricing::{PriceRecord, PriceTable};
pub use seating::{Seat, SeatClass, SeatStatusReport, SeatSummary};
pub use showtime::{CinemaProgramEntry, MovieShowtimes, ShowtimeRecord};
pub use slots::{names, SlotEvent, SlotValues};
