//! Shape-tolerant JSON extraction.
//!
//! Every backend endpoint may return either a bare array or an object
//! wrapping the array under one of several alternate keys, and individual
//! records name the same field differently across endpoints
//! (`title`/`movie_name`, `id`/`movie_id`, ...). Instead of ad hoc branching
//! at every call site, all decoding goes through the ordered probes in this
//! module: the first key that yields a usable value wins.

use serde_json::Value;

/// Wrapper keys probed, in priority order, when a listing endpoint returns
/// an object instead of a bare array.
pub const LIST_KEYS: &[&str] = &["data", "cinemas", "movies", "showtimes", "dateTime"];

/// Returns the record list from a listing response, whether it is a bare
/// array or wrapped under one of `keys`.
pub fn list<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a [Value]> {
    if let Some(items) = value.as_array() {
        return Some(items);
    }
    let obj = value.as_object()?;
    for key in keys {
        if let Some(items) = obj.get(*key).and_then(Value::as_array) {
            return Some(items);
        }
    }
    None
}

/// First non-empty string under any of `keys`; numbers are stringified so
/// numeric ids survive.
pub fn text(record: &Value, keys: &[&str]) -> Option<String> {
    let obj = record.as_object()?;
    for key in keys {
        match obj.get(*key) {
            Some(Value::String(s)) if !s.trim().is_empty() => return Some(s.trim().to_string()),
            Some(Value::Number(n)) => return Some(n.to_string()),
            _ => {}
        }
    }
    None
}

/// First integer under any of `keys`; numeric strings and floats with an
/// integral value are accepted.
pub fn integer(record: &Value, keys: &[&str]) -> Option<i64> {
    let obj = record.as_object()?;
    for key in keys {
        match obj.get(*key) {
            Some(Value::Number(n)) => {
                if let Some(i) = n.as_i64() {
                    return Some(i);
                }
                if let Some(f) = n.as_f64() {
                    return Some(f as i64);
                }
            }
            Some(Value::String(s)) => {
                if let Ok(i) = s.trim().parse::<i64>() {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// First float under any of `keys`.
pub fn float(record: &Value, keys: &[&str]) -> Option<f64> {
    let obj = record.as_object()?;
    for key in keys {
        match obj.get(*key) {
            Some(Value::Number(n)) => return n.as_f64(),
            Some(Value::String(s)) => {
                if let Ok(f) = s.trim().parse::<f64>() {
                    return Some(f);
                }
            }
            _ => {}
        }
    }
    None
}

/// String list under any of `keys`: a JSON array of strings, or a single
/// comma-separated string.
pub fn text_list(record: &Value, keys: &[&str]) -> Vec<String> {
    let Some(obj) = record.as_object() else {
        return Vec::new();
    };
    for key in keys {
        match obj.get(*key) {
            Some(Value::Array(items)) => {
                return items
                    .iter()
                    .filter_map(|item| item.as_str())
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
            }
            Some(Value::String(s)) if !s.trim().is_empty() => {
                return s.split(',').map(|part| part.trim().to_string()).collect();
            }
            _ => {}
        }
    }
    Vec::new()
}

/// Truthiness of the `success` flag. Absent flags count as success: the
/// catalog endpoints return bare arrays with no envelope at all.
pub fn success_flag(value: &Value) -> bool {
    match value.get("success") {
        Some(flag) => flag.as_bool().unwrap_or(false),
        None => true,
    }
}

/// Error message from a failure payload (`message` or `error`).
pub fn error_message(value: &Value) -> Option<String> {
    text(value, &["message", "error"])
}
