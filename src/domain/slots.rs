//! Conversation slot values and slot-mutation events.
//!
//! The dialogue engine owns slot storage; this service receives the current
//! slot values as explicit input with each turn and returns a list of
//! mutation events as explicit output. Slot payloads arrive as loosely typed
//! JSON (a seat list may be a real list or a comma-separated string), so the
//! accessors here coerce defensively.

use serde_json::Value;
use std::collections::HashMap;

/// Slot names exchanged with the dialogue engine.
pub mod names {
    pub const MOVIE_NAME: &str = "movie_name";
    pub const CINEMA_NAME: &str = "cinema_name";
    pub const DATE: &str = "date";
    pub const SHOWTIME_ID: &str = "showtime_id";
    pub const SEAT_NUMBERS: &str = "seat_numbers";
    pub const USER_ID: &str = "user_id";
    pub const ORDER_ID: &str = "order_id";
    pub const GRAND_TOTAL: &str = "grand_total";
}

/// Current slot values for one turn.
#[derive(Debug, Clone, Default)]
pub struct SlotValues {
    slots: HashMap<String, Value>,
}

impl SlotValues {
    /// Wraps the raw slot map from the tracker.
    pub fn new(slots: HashMap<String, Value>) -> Self {
        Self { slots }
    }

    /// String-valued slot; numbers are stringified, null/empty are absent.
    pub fn text(&self, name: &str) -> Option<String> {
        match self.slots.get(name)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Integer-valued slot; numeric strings are accepted.
    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.slots.get(name)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Seat-list slot: a JSON array of strings, or a single string split on
    /// commas and whitespace.
    pub fn seat_list(&self, name: &str) -> Option<Vec<String>> {
        let value = self.slots.get(name)?;
        let seats: Vec<String> = match value {
            Value::Array(items) => items
                .iter()
                .filter_map(|item| item.as_str())
                .map(|s| s.trim().to_uppercase())
                .filter(|s| !s.is_empty())
                .collect(),
            Value::String(s) => s
                .replace(',', " ")
                .split_whitespace()
                .map(|s| s.to_uppercase())
                .collect(),
            _ => return None,
        };
        if seats.is_empty() {
            None
        } else {
            Some(seats)
        }
    }

    /// Inserts a value, mainly for tests and the webhook adapter.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.slots.insert(name.into(), value);
    }
}

/// A slot-mutation intent to hand back to the dialogue engine.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotEvent {
    /// Set a slot to a value.
    Set { name: String, value: Value },
    /// Reset a slot to null.
    Clear { name: String },
}

impl SlotEvent {
    /// Creates a set event.
    pub fn set(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Set {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Creates a clear event.
    pub fn clear(name: impl Into<String>) -> Self {
        Self::Clear { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn slots(pairs: &[(&str, Value)]) -> SlotValues {
        SlotValues::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }

    #[test]
    fn text_coerces_numbers_and_skips_blank() {
        let values = slots(&[
            (names::SHOWTIME_ID, json!(5)),
            (names::MOVIE_NAME, json!("  Avatar ")),
            (names::CINEMA_NAME, json!("   ")),
        ]);
        assert_eq!(values.text(names::SHOWTIME_ID), Some("5".to_string()));
        assert_eq!(values.text(names::MOVIE_NAME), Some("Avatar".to_string()));
        assert_eq!(values.text(names::CINEMA_NAME), None);
        assert_eq!(values.text(names::DATE), None);
    }

    #[test]
    fn seat_list_accepts_array_and_string_forms() {
        let values = slots(&[(names::SEAT_NUMBERS, json!(["a1", "A2"]))]);
        assert_eq!(
            values.seat_list(names::SEAT_NUMBERS),
            Some(vec!["A1".to_string(), "A2".to_string()])
        );

        let values = slots(&[(names::SEAT_NUMBERS, json!("a1, a2 b3"))]);
        assert_eq!(
            values.seat_list(names::SEAT_NUMBERS),
            Some(vec!["A1".to_string(), "A2".to_string(), "B3".to_string()])
        );
    }

    #[test]
    fn seat_list_empty_is_absent() {
        let values = slots(&[(names::SEAT_NUMBERS, json!([]))]);
        assert_eq!(values.seat_list(names::SEAT_NUMBERS), None);
    }

    #[test]
    fn integer_accepts_numeric_strings() {
        let values = slots(&[(names::GRAND_TOTAL, json!("130000"))]);
        assert_eq!(values.integer(names::GRAND_TOTAL), Some(130_000));
    }
}
