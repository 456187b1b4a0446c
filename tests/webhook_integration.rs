//! Integration tests for the webhook surface.
//!
//! Each test drives the full router with `tower::ServiceExt::oneshot`
//! against a scripted mock backend, asserting on the wire-level response the
//! dialogue engine would see.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use cinebot::adapters::backend::MockBookingApi;
use cinebot::adapters::http::{webhook_router, WebhookAppState};
use cinebot::application::ActionDispatcher;
use cinebot::domain::{
    MovieRecord, MovieShowtimes, OrderReceipt, Seat, SeatClass, SeatStatusReport, SeatSummary,
    ShowtimeRecord,
};

const PAYMENT_BASE: &str = "http://localhost:5173";

fn app(api: Arc<MockBookingApi>) -> Router {
    let dispatcher = Arc::new(ActionDispatcher::new(api, PAYMENT_BASE));
    webhook_router(WebhookAppState { dispatcher })
}

async fn post_webhook(app: Router, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/webhook")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn snapshot() -> SeatStatusReport {
    SeatStatusReport {
        showtime_id: "5".to_string(),
        room_name: Some("P1".to_string()),
        cinema_id: Some("1".to_string()),
        summary: SeatSummary {
            total: 3,
            available: 2,
            booked: 1,
            reserved: 0,
        },
        available_by_type: vec![(
            "standard".to_string(),
            vec![
                Seat {
                    seat_id: Some("11".to_string()),
                    code: "A1".to_string(),
                    class: SeatClass::Standard,
                },
                Seat {
                    seat_id: Some("12".to_string()),
                    code: "A2".to_string(),
                    class: SeatClass::Standard,
                },
            ],
        )],
    }
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let app = app(Arc::new(MockBookingApi::new()));
    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(value["status"], "ok");
}

#[tokio::test]
async fn showtime_turn_falls_back_to_all_dates() {
    // Backend has showtimes only on the 11th; the user asks for the 10th.
    let api = Arc::new(
        MockBookingApi::new()
            .with_movies(vec![MovieRecord::new("7", "Avatar")])
            .with_movie_showtimes(MovieShowtimes {
                movie: MovieRecord::new("7", "Avatar"),
                entries: vec![
                    ShowtimeRecord {
                        id: "5".to_string(),
                        cinema_id: Some("1".to_string()),
                        cinema_name: Some("BAC Hà Nội".to_string()),
                        room_name: Some("P1".to_string()),
                        start_time: Some("2025-10-11T12:30:00.000Z".to_string()),
                    },
                    ShowtimeRecord {
                        id: "6".to_string(),
                        cinema_id: Some("1".to_string()),
                        cinema_name: Some("BAC Hà Nội".to_string()),
                        room_name: Some("P2".to_string()),
                        start_time: Some("2025-10-11T18:00:00.000Z".to_string()),
                    },
                ],
            }),
    );

    let (status, body) = post_webhook(
        app(api),
        json!({
            "next_action": "action_get_showtimes",
            "sender_id": "user_42",
            "tracker": {
                "slots": {"movie_name": "Avatar", "date": "2025-10-10"},
                "latest_message": {"text": "Lịch chiếu Avatar ngày 2025-10-10"}
            }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let text = body["responses"][0]["text"].as_str().unwrap();
    assert!(text.contains("Không có suất chiếu ngày 2025-10-10"));
    assert!(text.contains("ID: 5"));
    assert!(text.contains("ID: 6"));
    assert_eq!(body["events"], json!([]));
}

#[tokio::test]
async fn booking_turn_rejects_unavailable_seat_without_posting() {
    let api = Arc::new(MockBookingApi::new().with_seat_status(snapshot()));

    let (status, body) = post_webhook(
        app(api.clone()),
        json!({
            "next_action": "action_create_booking",
            "sender_id": "user_42",
            "tracker": {
                "slots": {"showtime_id": "5", "seat_numbers": ["A1", "Z9"]},
                "latest_message": {"text": "Đặt vé suất 5, ghế A1 Z9"}
            }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(api.booking_calls().is_empty());
    let text = body["responses"][0]["text"].as_str().unwrap();
    assert!(text.contains("Z9"));
    assert_eq!(body["events"], json!([]));
}

#[tokio::test]
async fn successful_booking_sets_and_clears_slots() {
    let api = Arc::new(
        MockBookingApi::new()
            .with_seat_status(snapshot())
            .with_booking_receipt(OrderReceipt {
                order_id: "99".to_string(),
                grand_total: Some(100_000),
            }),
    );

    let (status, body) = post_webhook(
        app(api.clone()),
        json!({
            "next_action": "action_create_booking",
            "sender_id": "user_42",
            "tracker": {
                "slots": {"showtime_id": "5", "seat_numbers": ["A1", "A2"], "user_id": "user_42"},
                "latest_message": {"text": "Đặt vé"}
            }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(api.booking_calls().len(), 1);

    let events = body["events"].as_array().unwrap();
    assert!(events.contains(&json!({"event": "slot", "name": "order_id", "value": "99"})));
    assert!(events.contains(&json!({"event": "slot", "name": "grand_total", "value": 100_000})));
    assert!(events.contains(&json!({"event": "slot", "name": "showtime_id", "value": null})));
    assert!(events.contains(&json!({"event": "slot", "name": "seat_numbers", "value": null})));

    let text = body["responses"][0]["text"].as_str().unwrap();
    assert!(text.contains("ĐẶT VÉ THÀNH CÔNG"));
}

#[tokio::test]
async fn payment_turn_attaches_structured_payload() {
    let api = Arc::new(MockBookingApi::new());

    let (status, body) = post_webhook(
        app(api),
        json!({
            "next_action": "action_redirect_to_payment",
            "sender_id": "user_42",
            "tracker": {
                "slots": {"order_id": "99", "grand_total": 130000},
                "latest_message": {"text": "Thanh toán như thế nào?"}
            }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let custom = &body["responses"][0]["custom"];
    assert_eq!(custom["order_id"], "99");
    assert_eq!(custom["grand_total"], 130_000);
    assert_eq!(
        custom["payment_url"],
        format!("{PAYMENT_BASE}/qr-payment?order_id=99&grand_total=130000")
    );
}

#[tokio::test]
async fn backend_outage_still_yields_a_reply() {
    let api = Arc::new(
        MockBookingApi::new()
            .fail_movies(cinebot::ports::ApiError::connection("refused")),
    );

    let (status, body) = post_webhook(
        app(api),
        json!({
            "next_action": "action_get_movie_info",
            "sender_id": "user_42",
            "tracker": {"slots": {}, "latest_message": {"text": "Phim gì hay?"}}
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["responses"][0]["text"].as_str().unwrap().contains("kết nối"));
}

#[tokio::test]
async fn unknown_action_still_yields_a_reply() {
    let api = Arc::new(MockBookingApi::new());

    let (status, body) = post_webhook(
        app(api),
        json!({
            "next_action": "action_dance",
            "tracker": {}
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["responses"].as_array().unwrap().len(), 1);
}
