//! Rendering of fetched records into user-facing reply text.
//!
//! Pure functions: records in, Vietnamese text blocks out. All grouping,
//! capping and emoji annotation lives here so the handlers stay focused on
//! orchestration. Deterministic for identical inputs.

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::dates::{self, DATE_FORMAT};
use crate::domain::{CinemaProgramEntry, CinemaRecord, MovieRecord, SeatStatusReport};

/// Display caps, matching what fits in a chat bubble.
const MAX_SHOWTIMES_PER_CINEMA: usize = 10;
const MAX_SHOWTIMES_PER_MOVIE: usize = 8;
const MAX_SEATS_PER_CLASS: usize = 30;
const MAX_CINEMAS_LISTED: usize = 5;
const MAX_MOVIES_LISTED: usize = 3;
const MAX_OVERVIEW_CHARS: usize = 200;

/// One showtime with its parsed start, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ShowtimeLine {
    pub id: String,
    pub room: String,
    pub start: DateTime<Utc>,
}

/// Showtimes for one movie, grouped per cinema in catalog order.
#[derive(Debug, Clone, PartialEq)]
pub struct CinemaGroup {
    pub cinema: String,
    pub lines: Vec<ShowtimeLine>,
}

/// Schedule block for one movie across cinemas.
///
/// `fallback_date` carries the requested date when no showtime matched it
/// and the full schedule is shown instead.
pub fn movie_showtimes(
    movie: &MovieRecord,
    groups: &[CinemaGroup],
    fallback_date: Option<NaiveDate>,
) -> String {
    let mut message = format!("🎬 **{}**\n", movie.title);
    if let Some(runtime) = movie.runtime {
        message.push_str(&format!("⏱️ Thời lượng: {runtime} phút\n"));
    }
    if !movie.genres.is_empty() {
        message.push_str(&format!("🎭 Thể loại: {}\n", movie.genres.join(", ")));
    }
    if let Some(rating) = movie.rating {
        message.push_str(&format!("⭐ Đánh giá: {rating}/10\n"));
    }

    if let Some(date) = fallback_date {
        message.push_str(&format!(
            "\n📅 Không có suất chiếu ngày {}, hiển thị tất cả các ngày:\n",
            date.format(DATE_FORMAT)
        ));
    }
    message.push_str("\n📅 **LỊCH CHIẾU:**\n\n");

    for group in groups {
        message.push_str(&format!("🏢 **{}**\n", group.cinema));
        for line in group.lines.iter().take(MAX_SHOWTIMES_PER_CINEMA) {
            message.push_str(&format!(
                "   • {} - {} | Phòng {} | ID: {}\n",
                line.start.format("%d/%m"),
                line.start.format("%H:%M"),
                line.room,
                line.id
            ));
        }
        message.push('\n');
    }

    message.push_str("💡 **Để đặt vé:**\n");
    message.push_str("Vui lòng nhớ **ID suất chiếu** (ví dụ: ID: 5)\n");
    message.push_str("Sau đó bạn có thể xem ghế trống hoặc đặt vé ngay!");
    message
}

/// Schedule block for one cinema on one date, grouped per movie.
pub fn cinema_showtimes(
    cinema_name: &str,
    date: NaiveDate,
    groups: &[(String, Vec<CinemaProgramEntry>)],
) -> String {
    let mut message = format!("🏢 **Lịch chiếu tại {cinema_name}**\n");
    message.push_str(&format!("📅 Ngày {}\n\n", date.format(DATE_FORMAT)));

    for (movie_title, entries) in groups {
        message.push_str(&format!("🎬 **{movie_title}**\n"));
        for entry in entries.iter().take(MAX_SHOWTIMES_PER_MOVIE) {
            message.push_str(&format!(
                "   • {} | Phòng {} | ID: {}",
                entry.show_time.as_deref().unwrap_or("N/A"),
                entry.room_name.as_deref().unwrap_or("N/A"),
                entry.id
            ));
            if let Some(price) = entry.ticket_price {
                message.push_str(&format!(" | {price} VND"));
            }
            message.push('\n');
        }
        message.push('\n');
    }

    message.push_str("💡 Để đặt vé, hãy nhớ ID suất chiếu bạn muốn xem!");
    message
}

/// Seat availability block: counts, then available seats per class.
pub fn seat_report(report: &SeatStatusReport) -> String {
    let mut message = format!("🎫 **Suất chiếu ID: {}**\n", report.showtime_id);
    message.push_str(&format!(
        "🏢 Phòng: {}\n\n",
        report.room_name.as_deref().unwrap_or("N/A")
    ));

    message.push_str("📊 **Tình trạng ghế:**\n");
    message.push_str(&format!("• Tổng số ghế: {}\n", report.summary.total));
    message.push_str(&format!(
        "• ✅ Còn trống: **{} ghế**\n",
        report.summary.available
    ));
    message.push_str(&format!("• ❌ Đã đặt: {} ghế\n\n", report.summary.occupied()));

    if report.summary.available == 0 {
        message.push_str("😢 **Rất tiếc, suất chiếu này đã HẾT GHẾ!**\n\n");
        message.push_str("Vui lòng chọn suất chiếu khác.");
        return message;
    }

    message.push_str("🪑 **GHẾ CÒN TRỐNG:**\n\n");
    for (type_name, seats) in &report.available_by_type {
        let class = seats
            .first()
            .map(|seat| seat.class)
            .unwrap_or_default();
        message.push_str(&format!(
            "{} **{}** ({} ghế):\n",
            class.emoji(),
            capitalize(type_name),
            seats.len()
        ));

        let codes: Vec<&str> = seats.iter().map(|seat| seat.code.as_str()).collect();
        if codes.len() > MAX_SEATS_PER_CLASS {
            message.push_str(&format!("   {}\n", codes[..MAX_SEATS_PER_CLASS].join(", ")));
            message.push_str(&format!(
                "   ... và {} ghế khác\n",
                codes.len() - MAX_SEATS_PER_CLASS
            ));
        } else {
            message.push_str(&format!("   {}\n", codes.join(", ")));
        }
        message.push('\n');
    }

    message.push_str("💡 **Để đặt vé:**\n");
    message.push_str(&format!(
        "Nói: 'Đặt vé suất {}, ghế A1 A2'\n",
        report.showtime_id
    ));
    message.push_str("(Thay A1, A2 bằng ghế bạn muốn từ danh sách trên)");
    message
}

/// Booking confirmation with order id, seats and total.
pub fn booking_success(
    order_id: &str,
    showtime_id: &str,
    seat_codes: &[String],
    grand_total: i64,
) -> String {
    let mut message = "✅ **ĐẶT VÉ THÀNH CÔNG!**\n\n".to_string();
    message.push_str(&format!("📋 **Mã đơn hàng:** {order_id}\n"));
    message.push_str(&format!("🎬 **Suất chiếu:** ID {showtime_id}\n"));
    message.push_str(&format!("🪑 **Ghế đã đặt:** {}\n", seat_codes.join(", ")));
    message.push_str(&format!("💰 **Tổng tiền:** {grand_total} VND\n\n"));
    message.push_str("⏰ Vui lòng **thanh toán trong 15 phút** để giữ vé!\n\n");
    message.push_str("💳 Bạn có thể hỏi: 'Thanh toán như thế nào?' để được hướng dẫn.");
    message
}

/// Booking failure with the backend's reason when known.
pub fn booking_failure(reason: &str) -> String {
    format!(
        "❌ **Đặt vé thất bại!**\n\n\
         Lý do: {reason}\n\n\
         Có thể:\n\
         • Ghế đã được đặt\n\
         • Suất chiếu không còn khả dụng\n\
         • Mã ghế không đúng"
    )
}

/// Payment instructions pointing at the checkout page.
pub fn payment_instructions(payment_url: &str, grand_total: i64) -> String {
    let mut message = "💳 **HƯỚNG DẪN THANH TOÁN**\n\n".to_string();
    message.push_str("🔗 Vui lòng truy cập link sau để thanh toán:\n");
    message.push_str(&format!("{payment_url}\n\n"));
    message.push_str(&format!("💰 **Tổng tiền:** {grand_total} VND\n\n"));
    message.push_str("📌 **Các phương thức thanh toán:**\n");
    message.push_str("• Thẻ ATM/Visa/Mastercard\n");
    message.push_str("• Ví điện tử (Momo, ZaloPay, VNPay)\n");
    message.push_str("• Chuyển khoản ngân hàng\n\n");
    message.push_str("⏰ Thời gian giữ vé: **15 phút**");
    message
}

/// Cinema listing, capped.
pub fn cinema_info(cinemas: &[CinemaRecord]) -> String {
    let mut message = "🎬 **THÔNG TIN RẠP CHIẾU PHIM**\n\n".to_string();
    for cinema in cinemas.iter().take(MAX_CINEMAS_LISTED) {
        message.push_str(&format!("🏢 **{}**\n", cinema.name));
        message.push_str(&format!(
            "📍 Địa chỉ: {}\n",
            cinema.address.as_deref().unwrap_or("N/A")
        ));
        message.push_str(&format!(
            "☎️ Hotline: {}\n",
            cinema.phone.as_deref().unwrap_or("N/A")
        ));
        message.push_str(&format!("🆔 ID: {}\n\n", cinema.id));
    }
    message.push_str("💡 Bạn có thể hỏi: 'Lịch chiếu tại [tên rạp]' để xem lịch chiếu!");
    message
}

/// Movie listing with details, capped.
pub fn movie_info(movies: &[MovieRecord]) -> String {
    let mut message = "🎬 **THÔNG TIN PHIM**\n\n".to_string();
    for movie in movies.iter().take(MAX_MOVIES_LISTED) {
        message.push_str(&format!("🎬 **{}**\n", movie.title));

        if let Some(release) = &movie.release_date {
            let display = dates::parse_start_timestamp(release)
                .map(|ts| ts.format("%d/%m/%Y").to_string())
                .unwrap_or_else(|| release.clone());
            message.push_str(&format!("📅 Khởi chiếu: {display}\n"));
        }
        if let Some(runtime) = movie.runtime {
            message.push_str(&format!("⏱️ Thời lượng: {runtime} phút\n"));
        }
        if !movie.genres.is_empty() {
            message.push_str(&format!("🎭 Thể loại: {}\n", movie.genres.join(", ")));
        }
        if let Some(rating) = movie.rating {
            message.push_str(&format!("⭐ Đánh giá: {rating}/10\n"));
        }
        message.push_str(&format!("🆔 ID: {}\n", movie.id));
        if let Some(overview) = &movie.overview {
            if overview.chars().count() > 10 {
                message.push_str(&format!("📝 Mô tả: {}\n", truncate(overview)));
            }
        }
        message.push('\n');
    }
    message.push_str("💡 Bạn có thể hỏi: 'Lịch chiếu phim [tên phim]' để xem suất chiếu!");
    message
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn truncate(text: &str) -> String {
    if text.chars().count() > MAX_OVERVIEW_CHARS {
        let short: String = text.chars().take(MAX_OVERVIEW_CHARS).collect();
        format!("{short}...")
    } else {
        text.to_string()
    }
}
