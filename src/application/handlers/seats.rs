//! Seat availability turn.

use tracing::{info, warn};

use crate::application::render;
use crate::application::turn::{TurnContext, TurnOutcome};
use crate::domain::names;
use crate::ports::{ApiError, BookingApi};

use super::{CONNECTION_TEXT, TIMEOUT_TEXT};

/// Entry point for the seat-availability intent.
pub async fn get_available_seats(api: &dyn BookingApi, ctx: &TurnContext) -> TurnOutcome {
    let Some(showtime_id) = ctx.slots.text(names::SHOWTIME_ID) else {
        return TurnOutcome::reply(
            "❓ Bạn chưa cung cấp mã suất chiếu.\n\n\
             📌 Vui lòng xem lịch chiếu trước, sau đó cho tôi biết **ID suất chiếu** bạn muốn xem.\n\
             Ví dụ: 'Xem ghế trống suất 5' hoặc 'Kiểm tra ghế ID 7'",
        );
    };

    match api.seat_status(&showtime_id).await {
        Ok(report) => {
            info!(
                showtime_id = %showtime_id,
                available = report.summary.available,
                occupied = report.summary.occupied(),
                "seat snapshot"
            );
            TurnOutcome::reply(render::seat_report(&report))
        }
        Err(err) => TurnOutcome::reply(seat_error_text(&showtime_id, &err)),
    }
}

/// Per-cause user-facing text for a failed seat-status fetch.
pub(super) fn seat_error_text(showtime_id: &str, err: &ApiError) -> String {
    match err {
        ApiError::Timeout { .. } => TIMEOUT_TEXT.to_string(),
        ApiError::Connection(_) => CONNECTION_TEXT.to_string(),
        ApiError::Status { code: 404, .. } => format!(
            "❌ Không tìm thấy suất chiếu ID {showtime_id}.\n\
             Vui lòng kiểm tra lại ID suất chiếu."
        ),
        ApiError::Status { code: 400, .. } => {
            format!("❌ Mã suất chiếu '{showtime_id}' không hợp lệ.")
        }
        ApiError::Status { code, .. } => {
            format!("❌ Lỗi khi lấy thông tin ghế (HTTP {code}).")
        }
        ApiError::Rejected { .. } => {
            "❌ Không thể lấy thông tin ghế. Vui lòng thử lại.".to_string()
        }
        ApiError::Malformed(reason) => {
            warn!(showtime_id, %reason, "malformed seat-status response");
            "❌ Có lỗi xảy ra khi lấy thông tin ghế.".to_string()
        }
    }
}
