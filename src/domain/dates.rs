//! Date handling for conversational slots and backend timestamps.
//!
//! The dialogue engine hands us whatever the user said ("hôm nay",
//! "25/12/2025", ...); the backend emits ISO-8601 timestamps with a literal
//! trailing `Z`. Both are normalized here so the rest of the crate only deals
//! in [`NaiveDate`] and [`DateTime<Utc>`].

use chrono::{DateTime, Duration, NaiveDate, Utc};

/// Wire format for all date-valued parameters and slots.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a conversational date slot into a concrete date.
///
/// Accepts the relative phrases the NLU passes through verbatim plus the
/// date formats users actually type. Anything unrecognized falls back to
/// `today` rather than failing the turn.
pub fn parse_show_date(raw: Option<&str>, today: NaiveDate) -> NaiveDate {
    let Some(raw) = raw else {
        return today;
    };
    let value = raw.trim().to_lowercase();
    if value.is_empty() {
        return today;
    }

    match value.as_str() {
        "hôm nay" | "hom nay" | "today" => return today,
        "ngày mai" | "ngay mai" | "tomorrow" => return today + Duration::days(1),
        _ => {}
    }

    for format in [DATE_FORMAT, "%d-%m-%Y", "%d/%m/%Y"] {
        if let Ok(parsed) = NaiveDate::parse_from_str(&value, format) {
            return parsed;
        }
    }

    today
}

/// Parses a backend start timestamp, e.g. `2025-10-10T05:44:00.000Z`.
///
/// The backend always writes a literal `Z`; it is replaced with an explicit
/// UTC offset before parsing. Returns `None` for anything unparseable so
/// callers can skip the entry with a warning.
pub fn parse_start_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let normalized = if let Some(stripped) = trimmed.strip_suffix('Z') {
        format!("{stripped}+00:00")
    } else {
        trimmed.to_string()
    };
    DateTime::parse_from_rfc3339(&normalized)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 10).unwrap()
    }

    #[test]
    fn parses_relative_phrases() {
        assert_eq!(parse_show_date(Some("hôm nay"), today()), today());
        assert_eq!(parse_show_date(Some("Today"), today()), today());
        assert_eq!(
            parse_show_date(Some("ngày mai"), today()),
            NaiveDate::from_ymd_opt(2025, 10, 11).unwrap()
        );
        assert_eq!(
            parse_show_date(Some("tomorrow"), today()),
            NaiveDate::from_ymd_opt(2025, 10, 11).unwrap()
        );
    }

    #[test]
    fn parses_supported_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 12, 25).unwrap();
        assert_eq!(parse_show_date(Some("2025-12-25"), today()), expected);
        assert_eq!(parse_show_date(Some("25-12-2025"), today()), expected);
        assert_eq!(parse_show_date(Some("25/12/2025"), today()), expected);
    }

    #[test]
    fn falls_back_to_today_for_garbage() {
        assert_eq!(parse_show_date(Some("next blue moon"), today()), today());
        assert_eq!(parse_show_date(Some("   "), today()), today());
        assert_eq!(parse_show_date(None, today()), today());
    }

    #[test]
    fn parses_trailing_z_timestamp() {
        let parsed = parse_start_timestamp("2025-10-10T05:44:00.000Z").unwrap();
        assert_eq!(parsed.date_naive(), today());
        assert_eq!(parsed.format("%H:%M").to_string(), "05:44");
    }

    #[test]
    fn parses_explicit_offset_timestamp() {
        let parsed = parse_start_timestamp("2025-10-10T12:44:00+07:00").unwrap();
        assert_eq!(parsed.format("%H:%M").to_string(), "05:44");
    }

    #[test]
    fn rejects_unparseable_timestamp() {
        assert!(parse_start_timestamp("10 Oct 2025").is_none());
        assert!(parse_start_timestamp("").is_none());
    }
}
