//! Booking API Port - Interface to the external cinema booking backend.
//!
//! This port abstracts the backend REST API so the fulfillment handlers can
//! be exercised against a scriptable mock. Implementations are responsible
//! for the backend's inconsistent response shapes; everything crossing this
//! boundary is already normalized into domain records.
//!
//! # Design
//!
//! - One method per consumed endpoint, all reads plus the single write
//! - Errors carry enough structure for per-cause user-facing messages
//!   (timeout vs. connectivity vs. HTTP status vs. backend rejection)
//! - No retries anywhere; a failed call surfaces immediately

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{
    BookingRequest, CinemaProgramEntry, CinemaRecord, MovieRecord, MovieShowtimes, OrderReceipt,
    PriceRecord, SeatStatusReport, ShowtimeRecord,
};

/// Port for the cinema booking backend.
#[async_trait]
pub trait BookingApi: Send + Sync {
    /// Full movie catalog (`GET /movies`). Single page, no pagination.
    async fn movies(&self) -> Result<Vec<MovieRecord>, ApiError>;

    /// Full cinema catalog (`GET /cinemas`).
    async fn cinemas(&self) -> Result<Vec<CinemaRecord>, ApiError>;

    /// Showtimes for one movie across all cinemas
    /// (`GET /showtimes/movies/{movieId}`).
    async fn showtimes_by_movie(&self, movie_id: &str) -> Result<MovieShowtimes, ApiError>;

    /// Showtimes for one cinema on one date, pre-filtered by the backend
    /// (`GET /showtimes/datve/{cinemaId}/{date}`).
    async fn showtimes_by_cinema(
        &self,
        cinema_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<CinemaProgramEntry>, ApiError>;

    /// Seat availability snapshot for one showtime
    /// (`GET /showtimes/seats-status/{showtimeId}`).
    async fn seat_status(&self, showtime_id: &str) -> Result<SeatStatusReport, ApiError>;

    /// The full showtime listing (`GET /showtimes/all`), used to recover a
    /// cinema id when the seat snapshot does not carry one.
    async fn all_showtimes(&self) -> Result<Vec<ShowtimeRecord>, ApiError>;

    /// Effective ticket prices for (cinema, date)
    /// (`GET /ticket-prices/getprice/{cinemaId}/{date}`).
    async fn ticket_prices(
        &self,
        cinema_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<PriceRecord>, ApiError>;

    /// Submits a booking (`POST /bookings/create-booking`).
    ///
    /// Success requires HTTP 200/201, a truthy success flag and a non-empty
    /// order id; anything else is an error.
    async fn create_booking(&self, request: &BookingRequest) -> Result<OrderReceipt, ApiError>;
}

/// Booking backend errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },

    /// Could not connect to the backend at all.
    #[error("connection failed: {0}")]
    Connection(String),

    /// Backend answered with a non-2xx status.
    #[error("backend returned HTTP {code}")]
    Status {
        /// HTTP status code.
        code: u16,
        /// Message extracted from the error payload, when present.
        message: Option<String>,
    },

    /// Backend answered 2xx but flagged the operation as failed.
    #[error("backend rejected the request")]
    Rejected {
        /// Message from the backend payload, when present.
        message: Option<String>,
    },

    /// Response body could not be interpreted.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl ApiError {
    /// Creates a connection error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Creates a status error without a payload message.
    pub fn status(code: u16) -> Self {
        Self::Status {
            code,
            message: None,
        }
    }

    /// Creates a rejection error.
    pub fn rejected(message: Option<String>) -> Self {
        Self::Rejected { message }
    }

    /// Creates a malformed-response error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }

    /// Message from the backend payload, if the error carries one.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } | ApiError::Rejected { message } => {
                message.as_deref()
            }
            _ => None,
        }
    }

    /// HTTP status code, if the error carries one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Status { code, .. } => Some(*code),
            _ => None,
        }
    }
}
