//! Showtime records from the two showtime listing endpoints.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::catalog::MovieRecord;
use super::dates;

/// One scheduled screening, as returned by the per-movie listing and the
/// full listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowtimeRecord {
    /// Showtime identifier.
    pub id: String,
    /// Cinema identifier, when the backend includes it.
    pub cinema_id: Option<String>,
    /// Cinema display name.
    pub cinema_name: Option<String>,
    /// Screening room name.
    pub room_name: Option<String>,
    /// Raw ISO-8601 start timestamp (trailing `Z` variant).
    pub start_time: Option<String>,
}

impl ShowtimeRecord {
    /// Parsed start timestamp, `None` when missing or unparseable.
    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.start_time
            .as_deref()
            .and_then(dates::parse_start_timestamp)
    }

    /// Date component of the start timestamp.
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start().map(|dt| dt.date_naive())
    }
}

/// Response of the per-movie showtime listing: the movie header plus its
/// screening entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieShowtimes {
    /// The movie the entries belong to.
    pub movie: MovieRecord,
    /// Screening entries across all cinemas.
    pub entries: Vec<ShowtimeRecord>,
}

/// One entry of the per-cinema program listing.
///
/// The backend pre-filters this listing by date, so entries carry a display
/// time string rather than a full timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CinemaProgramEntry {
    /// Showtime identifier.
    pub id: String,
    /// Title of the movie being screened.
    pub movie_title: Option<String>,
    /// Display time (e.g. "19:30").
    pub show_time: Option<String>,
    /// Screening room name.
    pub room_name: Option<String>,
    /// Ticket price in VND, when the backend includes it.
    pub ticket_price: Option<i64>,
}
