//! Scriptable in-memory booking backend for tests.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Mutex;

use crate::domain::{
    BookingRequest, CinemaProgramEntry, CinemaRecord, MovieRecord, MovieShowtimes, OrderReceipt,
    PriceRecord, SeatStatusReport, ShowtimeRecord,
};
use crate::ports::{ApiError, BookingApi};

/// Mock [`BookingApi`] with one scripted response per endpoint.
///
/// Defaults to empty catalogs and a successful booking, so tests only script
/// the endpoints they exercise. Booking submissions are recorded so tests can
/// assert exactly what was (or was not) sent.
pub struct MockBookingApi {
    movies: Result<Vec<MovieRecord>, ApiError>,
    cinemas: Result<Vec<CinemaRecord>, ApiError>,
    movie_showtimes: Result<MovieShowtimes, ApiError>,
    cinema_program: Result<Vec<CinemaProgramEntry>, ApiError>,
    seat_status: Result<SeatStatusReport, ApiError>,
    all_showtimes: Result<Vec<ShowtimeRecord>, ApiError>,
    prices: Result<Vec<PriceRecord>, ApiError>,
    booking: Result<OrderReceipt, ApiError>,
    booking_calls: Mutex<Vec<BookingRequest>>,
}

impl Default for MockBookingApi {
    fn default() -> Self {
        Self {
            movies: Ok(Vec::new()),
            cinemas: Ok(Vec::new()),
            movie_showtimes: Ok(MovieShowtimes {
                movie: MovieRecord::new("1", ""),
                entries: Vec::new(),
            }),
            cinema_program: Ok(Vec::new()),
            seat_status: Ok(SeatStatusReport::default()),
            all_showtimes: Ok(Vec::new()),
            prices: Ok(Vec::new()),
            booking: Ok(OrderReceipt {
                order_id: "1".to_string(),
                grand_total: None,
            }),
            booking_calls: Mutex::new(Vec::new()),
        }
    }
}

impl MockBookingApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_movies(mut self, movies: Vec<MovieRecord>) -> Self {
        self.movies = Ok(movies);
        self
    }

    pub fn with_cinemas(mut self, cinemas: Vec<CinemaRecord>) -> Self {
        self.cinemas = Ok(cinemas);
        self
    }

    pub fn with_movie_showtimes(mut self, showtimes: MovieShowtimes) -> Self {
        self.movie_showtimes = Ok(showtimes);
        self
    }

    pub fn with_cinema_program(mut self, entries: Vec<CinemaProgramEntry>) -> Self {
        self.cinema_program = Ok(entries);
        self
    }

    pub fn with_seat_status(mut self, report: SeatStatusReport) -> Self {
        self.seat_status = Ok(report);
        self
    }

    pub fn with_all_showtimes(mut self, showtimes: Vec<ShowtimeRecord>) -> Self {
        self.all_showtimes = Ok(showtimes);
        self
    }

    pub fn with_prices(mut self, prices: Vec<PriceRecord>) -> Self {
        self.prices = Ok(prices);
        self
    }

    pub fn with_booking_receipt(mut self, receipt: OrderReceipt) -> Self {
        self.booking = Ok(receipt);
        self
    }

    pub fn fail_movies(mut self, error: ApiError) -> Self {
        self.movies = Err(error);
        self
    }

    pub fn fail_cinemas(mut self, error: ApiError) -> Self {
        self.cinemas = Err(error);
        self
    }

    pub fn fail_movie_showtimes(mut self, error: ApiError) -> Self {
        self.movie_showtimes = Err(error);
        self
    }

    pub fn fail_cinema_program(mut self, error: ApiError) -> Self {
        self.cinema_program = Err(error);
        self
    }

    pub fn fail_seat_status(mut self, error: ApiError) -> Self {
        self.seat_status = Err(error);
        self
    }

    pub fn fail_prices(mut self, error: ApiError) -> Self {
        self.prices = Err(error);
        self
    }

    pub fn fail_booking(mut self, error: ApiError) -> Self {
        self.booking = Err(error);
        self
    }

    /// Booking requests submitted so far, in order.
    pub fn booking_calls(&self) -> Vec<BookingRequest> {
        self.booking_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BookingApi for MockBookingApi {
    async fn movies(&self) -> Result<Vec<MovieRecord>, ApiError> {
        self.movies.clone()
    }

    async fn cinemas(&self) -> Result<Vec<CinemaRecord>, ApiError> {
        self.cinemas.clone()
    }

    async fn showtimes_by_movie(&self, _movie_id: &str) -> Result<MovieShowtimes, ApiError> {
        self.movie_showtimes.clone()
    }

    async fn showtimes_by_cinema(
        &self,
        _cinema_id: &str,
        _date: NaiveDate,
    ) -> Result<Vec<CinemaProgramEntry>, ApiError> {
        self.cinema_program.clone()
    }

    async fn seat_status(&self, _showtime_id: &str) -> Result<SeatStatusReport, ApiError> {
        self.seat_status.clone()
    }

    async fn all_showtimes(&self) -> Result<Vec<ShowtimeRecord>, ApiError> {
        self.all_showtimes.clone()
    }

    async fn ticket_prices(
        &self,
        _cinema_id: &str,
        _date: NaiveDate,
    ) -> Result<Vec<PriceRecord>, ApiError> {
        self.prices.clone()
    }

    async fn create_booking(&self, request: &BookingRequest) -> Result<OrderReceipt, ApiError> {
        self.booking_calls.lock().unwrap().push(request.clone());
        self.booking.clone()
    }
}
