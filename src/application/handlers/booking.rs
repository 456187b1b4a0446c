//! Booking assembly and submission turn.
//!
//! The flow re-verifies every requested seat against a fresh availability
//! snapshot, resolves the cinema id and show date through a fallback chain,
//! prices each seat, validates the draft and only then submits. A single
//! unmatched seat aborts the whole attempt; partial bookings are never sent.

use serde_json::json;
use tracing::{info, warn};

use crate::application::render;
use crate::application::slot_recovery;
use crate::application::turn::{TurnContext, TurnOutcome};
use crate::domain::{
    names, BookingRequest, PriceTable, SeatStatusReport, ShowtimeRecord, SlotEvent, Ticket,
    TicketValidationError,
};
use crate::ports::{ApiError, BookingApi};

use super::{resolver, seats};

const FALLBACK_USER: &str = "guest_user";

/// Entry point for the booking intent.
pub async fn create_booking(api: &dyn BookingApi, ctx: &TurnContext) -> TurnOutcome {
    // Slots first, utterance patterns as the fallback when slot filling
    // missed them.
    let showtime_id = ctx
        .slots
        .text(names::SHOWTIME_ID)
        .or_else(|| slot_recovery::showtime_from_text(&ctx.message_text));
    let Some(showtime_id) = showtime_id else {
        return TurnOutcome::reply(
            "❌ Thiếu **mã suất chiếu**.\n\
             Vui lòng nói lại với format: 'Đặt vé suất [ID], ghế [A1 A2]'",
        );
    };

    let seat_codes = ctx
        .slots
        .seat_list(names::SEAT_NUMBERS)
        .unwrap_or_else(|| slot_recovery::seats_from_text(&ctx.message_text));
    if seat_codes.is_empty() {
        return TurnOutcome::reply(format!(
            "❌ Bạn chưa chọn **ghế ngồi**.\n\
             Vui lòng nói lại: 'Đặt vé suất {showtime_id}, ghế A1 A2'"
        ));
    }

    let user_id = ctx
        .slots
        .text(names::USER_ID)
        .unwrap_or_else(|| FALLBACK_USER.to_string());

    info!(%showtime_id, ?seat_codes, %user_id, "assembling booking");

    // Fresh snapshot; the one shown earlier in the conversation may be stale.
    let snapshot = match api.seat_status(&showtime_id).await {
        Ok(snapshot) => snapshot,
        Err(err) => return TurnOutcome::reply(seats::seat_error_text(&showtime_id, &err)),
    };

    let unavailable: Vec<&String> = seat_codes
        .iter()
        .filter(|code| snapshot.find_available(code).is_none())
        .collect();
    if !unavailable.is_empty() {
        let listed = unavailable
            .iter()
            .map(|code| code.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        return TurnOutcome::reply(format!(
            "❌ Ghế {listed} không còn trống hoặc không tồn tại.\n\
             Vui lòng chọn ghế khác từ danh sách ghế trống."
        ));
    }

    // The full listing supplies the cinema id when the snapshot lacks one,
    // and the show date for price lookup.
    let listed_showtime = find_in_listing(api, &showtime_id).await;

    let Some(cinema_id) = resolve_cinema_id(api, ctx, &snapshot, listed_showtime.as_ref()).await
    else {
        return TurnOutcome::reply(
            "❌ Không xác định được rạp của suất chiếu này.\n\
             Vui lòng thử lại sau.",
        );
    };

    let show_date = listed_showtime
        .as_ref()
        .and_then(ShowtimeRecord::start_date)
        .unwrap_or_else(|| {
            warn!(%showtime_id, "show date unknown, approximating with today");
            ctx.today
        });

    let prices = price_table(api, &cinema_id, show_date).await;

    let tickets: Vec<Ticket> = seat_codes
        .iter()
        .filter_map(|code| snapshot.find_available(code))
        .map(|seat| Ticket {
            seat_id: seat.seat_id.clone().unwrap_or_else(|| seat.code.clone()),
            seat_code: seat.code.clone(),
            ticket_price: prices.price_for(seat.class).unwrap_or(0),
        })
        .collect();

    let request = BookingRequest::pending(cinema_id, user_id, showtime_id.as_str(), tickets);
    if let Err(err) = request.validate() {
        warn!(error = %err, "booking draft failed validation");
        let reason = match err {
            TicketValidationError::EmptySeatCode => "Mã ghế không hợp lệ".to_string(),
            TicketValidationError::NonPositivePrice { seat_code, .. } => {
                format!("Không xác định được giá vé cho ghế {seat_code}")
            }
        };
        return TurnOutcome::reply(render::booking_failure(&reason));
    }

    match api.create_booking(&request).await {
        Ok(receipt) => {
            let grand_total = receipt.grand_total.unwrap_or_else(|| request.ticket_total());
            info!(order_id = %receipt.order_id, grand_total, "booking created");
            TurnOutcome::reply(render::booking_success(
                &receipt.order_id,
                &showtime_id,
                &seat_codes,
                grand_total,
            ))
            .with_event(SlotEvent::set(names::ORDER_ID, receipt.order_id.clone()))
            .with_event(SlotEvent::set(names::GRAND_TOTAL, json!(grand_total)))
            // Reset the selection so the next turn starts a fresh booking.
            .with_event(SlotEvent::clear(names::SHOWTIME_ID))
            .with_event(SlotEvent::clear(names::SEAT_NUMBERS))
        }
        Err(ApiError::Timeout { .. }) => {
            TurnOutcome::reply("⏱️ Timeout khi đặt vé. Vui lòng thử lại.")
        }
        Err(ApiError::Connection(_)) => TurnOutcome::reply("❌ Lỗi kết nối API khi đặt vé."),
        Err(err) => {
            let reason = err
                .backend_message()
                .map(str::to_string)
                .or_else(|| err.status_code().map(|code| format!("HTTP {code}")))
                .unwrap_or_else(|| "Lỗi không xác định".to_string());
            TurnOutcome::reply(render::booking_failure(&reason))
        }
    }
}

/// Finds the showtime in the full listing; failures degrade to `None`.
async fn find_in_listing(api: &dyn BookingApi, showtime_id: &str) -> Option<ShowtimeRecord> {
    match api.all_showtimes().await {
        Ok(listing) => listing.into_iter().find(|record| record.id == showtime_id),
        Err(err) => {
            warn!(error = %err, "full showtime listing unavailable");
            None
        }
    }
}

/// Cinema id fallback chain: seat snapshot, then the showtime listing, then
/// the cinema-name slot resolved against the catalog.
async fn resolve_cinema_id(
    api: &dyn BookingApi,
    ctx: &TurnContext,
    snapshot: &SeatStatusReport,
    listed: Option<&ShowtimeRecord>,
) -> Option<String> {
    if let Some(id) = &snapshot.cinema_id {
        return Some(id.clone());
    }
    if let Some(id) = listed.and_then(|record| record.cinema_id.clone()) {
        return Some(id);
    }
    let name = ctx.slots.text(names::CINEMA_NAME)?;
    resolver::resolve_cinema(api, &name)
        .await
        .map(|cinema| cinema.id)
}

/// Effective price table for (cinema, date); any failure or empty listing
/// substitutes the fixed default table.
async fn price_table(api: &dyn BookingApi, cinema_id: &str, date: chrono::NaiveDate) -> PriceTable {
    match api.ticket_prices(cinema_id, date).await {
        Ok(records) => PriceTable::from_records(&records).unwrap_or_else(|| {
            warn!(cinema_id, %date, "empty price listing, using default prices");
            PriceTable::default_table()
        }),
        Err(err) => {
            warn!(error = %err, cinema_id, %date, "price lookup failed, using default prices");
            PriceTable::default_table()
        }
    }
}
