//! Booking draft and submission types.
//!
//! A booking draft lives only in memory for the duration of one turn: it is
//! assembled, validated, submitted once and discarded. The invariant guarded
//! here is that no ticket ever reaches the wire without a seat code and a
//! strictly positive price.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One ticket of a booking draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// Identifier submitted to the backend: the snapshot's seat id when it
    /// carries one, else the seat code.
    pub seat_id: String,
    /// Human seat code, e.g. "A1".
    #[serde(skip_serializing, default)]
    pub seat_code: String,
    /// Resolved unit price in VND.
    pub ticket_price: i64,
}

/// Ticket validation failures that abort a submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TicketValidationError {
    /// A ticket has an empty seat code.
    #[error("ticket has an empty seat code")]
    EmptySeatCode,

    /// A ticket carries a non-positive price.
    #[error("seat {seat_code} resolved to a non-positive price ({price})")]
    NonPositivePrice { seat_code: String, price: i64 },
}

/// The booking submission body, matching the backend contract:
/// `{cinema_id, user_id, showtime_id, tickets, services, payment_method, status}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub cinema_id: String,
    pub user_id: String,
    pub showtime_id: String,
    pub tickets: Vec<Ticket>,
    /// Extra services; the assistant never books any.
    pub services: Vec<serde_json::Value>,
    pub payment_method: String,
    pub status: String,
}

impl BookingRequest {
    /// Creates a pending QR-code booking, the only combination the
    /// assistant submits.
    pub fn pending(
        cinema_id: impl Into<String>,
        user_id: impl Into<String>,
        showtime_id: impl Into<String>,
        tickets: Vec<Ticket>,
    ) -> Self {
        Self {
            cinema_id: cinema_id.into(),
            user_id: user_id.into(),
            showtime_id: showtime_id.into(),
            tickets,
            services: Vec::new(),
            payment_method: "qr code".to_string(),
            status: "pending".to_string(),
        }
    }

    /// Validation gate run before any submission: every ticket must carry a
    /// non-empty seat code and a strictly positive price.
    pub fn validate(&self) -> Result<(), TicketValidationError> {
        for ticket in &self.tickets {
            if ticket.seat_code.trim().is_empty() {
                return Err(TicketValidationError::EmptySeatCode);
            }
            if ticket.ticket_price <= 0 {
                return Err(TicketValidationError::NonPositivePrice {
                    seat_code: ticket.seat_code.clone(),
                    price: ticket.ticket_price,
                });
            }
        }
        Ok(())
    }

    /// Sum of the per-ticket prices.
    pub fn ticket_total(&self) -> i64 {
        self.tickets.iter().map(|t| t.ticket_price).sum()
    }
}

/// What the backend returns for a successful booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReceipt {
    /// Durable order identifier.
    pub order_id: String,
    /// Grand total echoed by the backend, when present.
    pub grand_total: Option<i64>,
}
