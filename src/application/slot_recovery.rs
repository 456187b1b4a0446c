//! Pattern-based recovery of missing slots from the raw utterance.
//!
//! Upstream slot filling sometimes misses the showtime id or seat codes even
//! though the user clearly said them. These extractors patch that gap for
//! the booking flow; they are a fallback, never the primary source.

use once_cell::sync::Lazy;
use regex::Regex;

/// "suất 5", "Suất  12" - the showtime id following the Vietnamese word for
/// a screening.
static SHOWTIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)suất\s+(\d+)").expect("invalid showtime pattern"));

/// Seat codes: one letter followed by digits, as standalone tokens (A1, B12,
/// V3). Applied to the upper-cased utterance.
static SEAT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([A-Z]\d+)\b").expect("invalid seat pattern"));

/// Showtime id mentioned in the utterance, if any.
pub fn showtime_from_text(text: &str) -> Option<String> {
    SHOWTIME_RE
        .captures(text)
        .map(|caps| caps[1].to_string())
}

/// All seat codes mentioned in the utterance, upper-cased, in order.
pub fn seats_from_text(text: &str) -> Vec<String> {
    let upper = text.to_uppercase();
    SEAT_RE
        .captures_iter(&upper)
        .map(|caps| caps[1].to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn showtime_id_is_extracted_after_the_keyword() {
        assert_eq!(
            showtime_from_text("Đặt vé suất 5, ghế A1 A2"),
            Some("5".to_string())
        );
        assert_eq!(
            showtime_from_text("SUẤT 12 còn ghế không?"),
            Some("12".to_string())
        );
        assert_eq!(showtime_from_text("Đặt vé ghế A1"), None);
    }

    #[test]
    fn seat_codes_are_extracted_case_insensitively() {
        assert_eq!(
            seats_from_text("Đặt vé suất 5, ghế a1, b12 và V3"),
            vec!["A1", "B12", "V3"]
        );
    }

    #[test]
    fn bare_numbers_are_not_seats() {
        // "5" from the showtime mention must not leak into the seat list.
        assert_eq!(seats_from_text("Đặt vé suất 5"), Vec::<String>::new());
    }
}
