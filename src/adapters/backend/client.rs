//! HTTP implementation of the booking API port.
//!
//! Talks plain JSON over HTTP to the cinema backend. Reads use a short
//! timeout, the booking write a longer one; there are no retries — a failed
//! call surfaces immediately and the user re-issues the request.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use tracing::{debug, error};

use crate::config::BackendConfig;
use crate::domain::dates::DATE_FORMAT;
use crate::domain::{
    BookingRequest, CinemaProgramEntry, CinemaRecord, MovieRecord, MovieShowtimes, OrderReceipt,
    PriceRecord, Seat, SeatClass, SeatStatusReport, SeatSummary, ShowtimeRecord,
};
use crate::ports::{ApiError, BookingApi};

use super::extract;

/// Booking backend client over reqwest.
pub struct HttpBookingApi {
    config: BackendConfig,
    read_client: Client,
    write_client: Client,
}

impl HttpBookingApi {
    /// Creates a client pair from the backend configuration.
    pub fn new(config: BackendConfig) -> Self {
        let read_client = Client::builder()
            .timeout(config.read_timeout())
            .build()
            .expect("Failed to create HTTP client");
        let write_client = Client::builder()
            .timeout(config.write_timeout())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            read_client,
            write_client,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    fn map_send_error(&self, err: reqwest::Error, timeout_secs: u64) -> ApiError {
        if err.is_timeout() {
            ApiError::Timeout { timeout_secs }
        } else if err.is_connect() {
            ApiError::connection(format!("Connection failed: {err}"))
        } else {
            ApiError::connection(err.to_string())
        }
    }

    /// Issues a read and decodes the body as JSON.
    ///
    /// Non-2xx statuses become [`ApiError::Status`] with the payload message
    /// attached when one can be extracted.
    async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
        let url = self.url(path);
        debug!(%url, "backend read");

        let response = self
            .read_client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.map_send_error(e, self.config.read_timeout_secs))?;

        let status = response.status();
        let value = read_body(response).await;

        if !status.is_success() {
            error!(%url, code = status.as_u16(), "backend read failed");
            return Err(ApiError::Status {
                code: status.as_u16(),
                message: value.as_ref().and_then(extract::error_message),
            });
        }

        value.ok_or_else(|| ApiError::malformed(format!("non-JSON body from {path}")))
    }
}

/// Reads the response body as JSON, best effort.
async fn read_body(response: Response) -> Option<Value> {
    let text = response.text().await.ok()?;
    serde_json::from_str(&text).ok()
}

#[async_trait]
impl BookingApi for HttpBookingApi {
    async fn movies(&self) -> Result<Vec<MovieRecord>, ApiError> {
        let value = self.get_json("/movies").await?;
        let items = extract::list(&value, extract::LIST_KEYS)
            .ok_or_else(|| ApiError::malformed("unrecognized movie catalog shape"))?;
        Ok(items.iter().filter_map(parse_movie).collect())
    }

    async fn cinemas(&self) -> Result<Vec<CinemaRecord>, ApiError> {
        let value = self.get_json("/cinemas").await?;
        let items = extract::list(&value, extract::LIST_KEYS)
            .ok_or_else(|| ApiError::malformed("unrecognized cinema catalog shape"))?;
        Ok(items.iter().filter_map(parse_cinema).collect())
    }

    async fn showtimes_by_movie(&self, movie_id: &str) -> Result<MovieShowtimes, ApiError> {
        let value = self
            .get_json(&format!("/showtimes/movies/{movie_id}"))
            .await?;
        if !extract::success_flag(&value) {
            return Err(ApiError::rejected(extract::error_message(&value)));
        }

        let movie = value
            .get("movie")
            .and_then(parse_movie)
            .unwrap_or_else(|| MovieRecord::new(movie_id, ""));
        let entries = extract::list(&value, extract::LIST_KEYS)
            .map(|items| items.iter().filter_map(parse_showtime).collect())
            .unwrap_or_default();

        Ok(MovieShowtimes { movie, entries })
    }

    async fn showtimes_by_cinema(
        &self,
        cinema_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<CinemaProgramEntry>, ApiError> {
        let value = self
            .get_json(&format!(
                "/showtimes/datve/{cinema_id}/{}",
                date.format(DATE_FORMAT)
            ))
            .await?;
        if !extract::success_flag(&value) {
            return Err(ApiError::rejected(extract::error_message(&value)));
        }

        Ok(extract::list(&value, extract::LIST_KEYS)
            .map(|items| items.iter().filter_map(parse_program_entry).collect())
            .unwrap_or_default())
    }

    async fn seat_status(&self, showtime_id: &str) -> Result<SeatStatusReport, ApiError> {
        let value = self
            .get_json(&format!("/showtimes/seats-status/{showtime_id}"))
            .await?;
        if !extract::success_flag(&value) {
            return Err(ApiError::rejected(extract::error_message(&value)));
        }
        Ok(parse_seat_report(showtime_id, &value))
    }

    async fn all_showtimes(&self) -> Result<Vec<ShowtimeRecord>, ApiError> {
        let value = self.get_json("/showtimes/all").await?;
        Ok(extract::list(&value, extract::LIST_KEYS)
            .map(|items| items.iter().filter_map(parse_showtime).collect())
            .unwrap_or_default())
    }

    async fn ticket_prices(
        &self,
        cinema_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<PriceRecord>, ApiError> {
        let value = self
            .get_json(&format!(
                "/ticket-prices/getprice/{cinema_id}/{}",
                date.format(DATE_FORMAT)
            ))
            .await?;
        if !extract::success_flag(&value) {
            return Err(ApiError::rejected(extract::error_message(&value)));
        }

        Ok(extract::list(&value, &["ticket_price", "data", "prices"])
            .map(|items| items.iter().filter_map(parse_price).collect())
            .unwrap_or_default())
    }

    async fn create_booking(&self, request: &BookingRequest) -> Result<OrderReceipt, ApiError> {
        let url = self.url("/bookings/create-booking");
        debug!(%url, showtime_id = %request.showtime_id, seats = request.tickets.len(), "booking write");

        let response = self
            .write_client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e, self.config.write_timeout_secs))?;

        let status = response.status();
        let value = read_body(response).await;

        if status != StatusCode::OK && status != StatusCode::CREATED {
            error!(code = status.as_u16(), "booking submission failed");
            return Err(ApiError::Status {
                code: status.as_u16(),
                message: value.as_ref().and_then(extract::error_message),
            });
        }

        let value = value.ok_or_else(|| ApiError::malformed("non-JSON booking response"))?;
        parse_receipt(&value).ok_or_else(|| ApiError::rejected(extract::error_message(&value)))
    }
}

// ----- Record decoding (shape-tolerant, shared with tests) -----

fn parse_movie(record: &Value) -> Option<MovieRecord> {
    let id = extract::text(record, &["movie_id", "id"])?;
    let title = extract::text(record, &["title", "movie_name"]).unwrap_or_default();
    Some(MovieRecord {
        id,
        title,
        runtime: extract::integer(record, &["runtime", "duration"])
            .and_then(|n| u32::try_from(n).ok()),
        genres: extract::text_list(record, &["genres", "genre"]),
        rating: extract::float(record, &["vote_average", "rating"]),
        release_date: extract::text(record, &["release_date"]),
        overview: extract::text(record, &["overview", "description"]),
    })
}

fn parse_cinema(record: &Value) -> Option<CinemaRecord> {
    let id = extract::text(record, &["id", "cinema_id"])?;
    let name = extract::text(record, &["cinema_name", "name"])?;
    Some(CinemaRecord {
        id,
        name,
        address: extract::text(record, &["address"]),
        phone: extract::text(record, &["cinema_phone", "phone"]),
    })
}

fn parse_showtime(record: &Value) -> Option<ShowtimeRecord> {
    let id = extract::text(record, &["id", "showtime_id"])?;
    Some(ShowtimeRecord {
        id,
        cinema_id: extract::text(record, &["cinema_id", "cinema_clusters_id"]),
        cinema_name: extract::text(record, &["cinema_name"]),
        room_name: extract::text(record, &["room_name"]),
        start_time: extract::text(record, &["start_time"]),
    })
}

fn parse_program_entry(record: &Value) -> Option<CinemaProgramEntry> {
    let id = extract::text(record, &["id", "showtime_id"])?;
    Some(CinemaProgramEntry {
        id,
        movie_title: extract::text(record, &["movie_title", "title", "movie_name"]),
        show_time: extract::text(record, &["show_time", "time"]),
        room_name: extract::text(record, &["room_name"]),
        ticket_price: extract::integer(record, &["ticket_price"]),
    })
}

fn parse_seat(record: &Value) -> Option<Seat> {
    let code = extract::text(record, &["seat_number"])?;
    Some(Seat {
        seat_id: extract::text(record, &["seat_id", "id"]),
        code,
        class: SeatClass::from_name(
            &extract::text(record, &["seat_type_name", "seat_type"]).unwrap_or_default(),
        ),
    })
}

fn parse_seat_report(showtime_id: &str, value: &Value) -> SeatStatusReport {
    let room_info = value.get("roomInfo");
    let summary = value.get("summary").map(parse_summary).unwrap_or_default();

    let mut available_by_type: Vec<(String, Vec<Seat>)> = Vec::new();
    if let Some(by_type) = value.get("availableByType").and_then(Value::as_object) {
        for (type_name, seats) in by_type {
            let seats: Vec<Seat> = seats
                .as_array()
                .map(|items| {
                    items
                        .iter()
                        .filter_map(|seat| {
                            let mut seat = parse_seat(seat)?;
                            // The per-type listing omits the type name per seat.
                            seat.class = SeatClass::from_name(type_name);
                            Some(seat)
                        })
                        .collect()
                })
                .unwrap_or_default();
            if !seats.is_empty() {
                available_by_type.push((type_name.clone(), seats));
            }
        }
    } else if let Some(items) = value.get("availableSeats").and_then(Value::as_array) {
        // Older backend builds send a flat list; regroup it by type name.
        for record in items {
            let Some(seat) = parse_seat(record) else {
                continue;
            };
            let type_name = extract::text(record, &["seat_type_name", "seat_type"])
                .unwrap_or_else(|| "standard".to_string());
            match available_by_type.iter_mut().find(|(name, _)| *name == type_name) {
                Some((_, seats)) => seats.push(seat),
                None => available_by_type.push((type_name, vec![seat])),
            }
        }
    }

    SeatStatusReport {
        showtime_id: showtime_id.to_string(),
        room_name: room_info.and_then(|info| extract::text(info, &["room_name"])),
        cinema_id: room_info
            .and_then(|info| extract::text(info, &["cinema_id", "cinema_clusters_id"]))
            .or_else(|| extract::text(value, &["cinema_id"])),
        summary,
        available_by_type,
    }
}

fn parse_summary(value: &Value) -> SeatSummary {
    let count = |keys: &[&str]| {
        extract::integer(value, keys)
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(0)
    };
    SeatSummary {
        total: count(&["total"]),
        available: count(&["available"]),
        booked: count(&["booked"]),
        reserved: count(&["reserved"]),
    }
}

fn parse_price(record: &Value) -> Option<PriceRecord> {
    let seat_type = extract::text(record, &["seat_type"])?;
    let effective_price = extract::integer(record, &["effective_price", "base_price", "price"])?;
    Some(PriceRecord {
        seat_type,
        effective_price,
    })
}

/// Decodes a successful booking response. Success requires the flag AND a
/// non-empty order id; the grand total is optional.
fn parse_receipt(value: &Value) -> Option<OrderReceipt> {
    if !extract::success_flag(value) {
        return None;
    }
    let data = value.get("data").unwrap_or(value);
    let order_id = extract::text(data, &["order_id", "id"])?;
    Some(OrderReceipt {
        order_id,
        grand_total: extract::integer(data, &["grand_total"])
            .or_else(|| extract::integer(value, &["grand_total"])),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_movie_tolerates_both_namings() {
        let record = json!({"movie_id": 7, "movie_name": "Avatar", "duration": 162,
            "genre": "Action, Sci-Fi", "vote_average": 7.9});
        let movie = parse_movie(&record).unwrap();
        assert_eq!(movie.id, "7");
        assert_eq!(movie.title, "Avatar");
        assert_eq!(movie.runtime, Some(162));
        assert_eq!(movie.genres, vec!["Action", "Sci-Fi"]);
        assert_eq!(movie.rating, Some(7.9));
    }

    #[test]
    fn parse_movie_requires_an_id() {
        assert!(parse_movie(&json!({"title": "Avatar"})).is_none());
    }

    #[test]
    fn parse_cinema_tolerates_both_namings() {
        let record = json!({"cinema_id": 1, "name": "BAC Cinema Hà Nội",
            "address": "1 Tràng Tiền", "cinema_phone": "1900 0000"});
        let cinema = parse_cinema(&record).unwrap();
        assert_eq!(cinema.id, "1");
        assert_eq!(cinema.name, "BAC Cinema Hà Nội");
        assert_eq!(cinema.phone, Some("1900 0000".to_string()));
    }

    #[test]
    fn parse_seat_report_reads_grouped_listing() {
        let value = json!({
            "success": true,
            "roomInfo": {"room_id": 3, "room_name": "P1", "cinema_id": 1},
            "summary": {"total": 60, "available": 2, "booked": 50, "reserved": 8},
            "availableByType": {
                "standard": [{"seat_id": 11, "seat_number": "A1"}],
                "vip": [{"seat_id": 31, "seat_number": "V1"}]
            }
        });
        let report = parse_seat_report("5", &value);
        assert_eq!(report.room_name, Some("P1".to_string()));
        assert_eq!(report.cinema_id, Some("1".to_string()));
        assert_eq!(report.summary.occupied(), 58);
        assert_eq!(report.available_by_type.len(), 2);
        assert_eq!(report.find_available("V1").unwrap().class, SeatClass::Vip);
    }

    #[test]
    fn parse_seat_report_regroups_flat_listing() {
        let value = json!({
            "success": true,
            "summary": {"total": 3, "available": 3, "booked": 0, "reserved": 0},
            "availableSeats": [
                {"seat_id": 1, "seat_number": "A1", "seat_type_name": "standard"},
                {"seat_id": 2, "seat_number": "A2", "seat_type_name": "standard"},
                {"seat_id": 3, "seat_number": "V1", "seat_type_name": "vip"}
            ]
        });
        let report = parse_seat_report("5", &value);
        assert_eq!(report.available_by_type.len(), 2);
        assert_eq!(report.available_by_type[0].1.len(), 2);
        assert!(report.find_available("a2").is_some());
    }

    #[test]
    fn parse_receipt_requires_flag_and_order_id() {
        let ok = json!({"success": true, "data": {"order_id": 99, "grand_total": 130000}});
        let receipt = parse_receipt(&ok).unwrap();
        assert_eq!(receipt.order_id, "99");
        assert_eq!(receipt.grand_total, Some(130_000));

        assert!(parse_receipt(&json!({"success": false, "data": {"order_id": 99}})).is_none());
        assert!(parse_receipt(&json!({"success": true, "data": {}})).is_none());
    }

    #[test]
    fn parse_receipt_accepts_top_level_order_id() {
        let value = json!({"success": true, "order_id": "42"});
        assert_eq!(parse_receipt(&value).unwrap().order_id, "42");
    }

    #[test]
    fn parse_price_reads_effective_price() {
        let record = json!({"seat_type": "VIP", "base_price": 70000, "effective_price": 80000});
        let price = parse_price(&record).unwrap();
        assert_eq!(price.seat_type, "VIP");
        assert_eq!(price.effective_price, 80_000);
    }
}
