//! Seat inventory types.
//!
//! A seat snapshot is valid only at query time; the backend gives no
//! freshness guarantee across two calls, which is why the booking flow
//! re-fetches it right before submission.

use serde::{Deserialize, Serialize};

/// Pricing/category tier of a seat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatClass {
    #[default]
    Standard,
    Vip,
    Couple,
    Sweetbox,
}

impl SeatClass {
    /// Maps a backend seat-type name onto a class.
    ///
    /// Unknown names map to `Standard`, which also drives the price
    /// fallback for unlisted classes.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "vip" => SeatClass::Vip,
            "couple" => SeatClass::Couple,
            "sweetbox" => SeatClass::Sweetbox,
            _ => SeatClass::Standard,
        }
    }

    /// Emoji used when rendering this class.
    pub fn emoji(self) -> &'static str {
        match self {
            SeatClass::Standard => "🪑",
            SeatClass::Vip => "⭐",
            SeatClass::Couple | SeatClass::Sweetbox => "💑",
        }
    }
}

/// One seat in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    /// Backend seat identifier, when present.
    pub seat_id: Option<String>,
    /// Human seat code, e.g. "A1".
    pub code: String,
    /// Seat class as resolved from the backend type name.
    pub class: SeatClass,
}

/// Occupancy counters from the seat-status summary block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatSummary {
    pub total: u32,
    pub available: u32,
    pub booked: u32,
    pub reserved: u32,
}

impl SeatSummary {
    /// Booked plus reserved seats.
    pub fn occupied(&self) -> u32 {
        self.booked + self.reserved
    }
}

/// Snapshot of seat availability for one showtime.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeatStatusReport {
    /// The showtime the snapshot belongs to.
    pub showtime_id: String,
    /// Screening room name, when present.
    pub room_name: Option<String>,
    /// Cinema identifier, when the backend includes it in the room block.
    pub cinema_id: Option<String>,
    /// Occupancy counters.
    pub summary: SeatSummary,
    /// Available seats grouped by the backend's type name, in response
    /// order. The name is kept verbatim for rendering.
    pub available_by_type: Vec<(String, Vec<Seat>)>,
}

impl SeatStatusReport {
    /// Iterates over every available seat across all classes.
    pub fn available_seats(&self) -> impl Iterator<Item = &Seat> {
        self.available_by_type.iter().flat_map(|(_, seats)| seats)
    }

    /// Finds an available seat by code, case-insensitively.
    pub fn find_available(&self, code: &str) -> Option<&Seat> {
        self.available_seats()
            .find(|seat| seat.code.eq_ignore_ascii_case(code))
    }
}
