//! Date field kind

use chrono::{DateTime, NaiveDate, NaiveDateTime, SubsecRound, Utc};
use serde_json::Value;

use super::{FieldCoercion, FieldOptions};
use crate::constants::{DATE_ONLY_FORMAT, KIND_DATE, MSG_DATE_REQUIRED, NAIVE_DATE_TIME_FORMATS};
use crate::error::{Error, Result};
use crate::value::FieldValue;

/// Parses strings and millisecond timestamps into UTC instants
///
/// Booleans are rejected explicitly, as are objects, arrays and unparsable strings.
#[derive(Debug, Clone, Copy)]
pub struct DateField;

impl FieldCoercion for DateField {
    fn kind(&self) -> &'static str {
        KIND_DATE
    }

    fn coerce(&self, _key: &str, value: &Value, _options: &FieldOptions) -> Result<FieldValue> {
        if value.is_null() {
            return Ok(FieldValue::Null);
        }

        parse_date(value)
            .map(FieldValue::Date)
            .ok_or_else(|| Error::InvalidProperty(MSG_DATE_REQUIRED.to_string()))
    }
}

/// Converts a JSON value into a UTC instant, if it denotes one
///
/// Instants are kept at millisecond precision, the precision they serialize with.
pub fn parse_date(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().and_then(truncate_millis))
            .and_then(DateTime::from_timestamp_millis),
        Value::String(text) => parse_date_str(text.trim()).map(|date| date.trunc_subsecs(3)),
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn truncate_millis(millis: f64) -> Option<i64> {
    // Anything beyond this is outside every representable date anyway
    const LIMIT: f64 = 8.64e15;
    (millis.is_finite() && millis.abs() <= LIMIT).then(|| millis.trunc() as i64)
}

fn parse_date_str(text: &str) -> Option<DateTime<Utc>> {
    if text.is_empty() {
        return None;
    }

    if let Ok(date) = DateTime::parse_from_rfc3339(text) {
        return Some(date.with_timezone(&Utc));
    }

    if let Ok(date) = DateTime::parse_from_rfc2822(text) {
        return Some(date.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, DATE_ONLY_FORMAT) {
        return date.and_hms_opt(0, 0, 0).map(|midnight| midnight.and_utc());
    }

    // Date-times without an offset are taken as UTC
    NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|naive| naive.and_utc())
}
