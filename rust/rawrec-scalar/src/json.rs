//! Rendering of scalars as `serde_json::Value`.
//!
//! Intended for diagnostics, export and testing. Values that have no lossless JSON
//! number form (decimals, non-finite floats, temporal values) are rendered as strings.

use serde_json::{Map, Number, Value};

use crate::scalar::Scalar;

impl Scalar<'_> {
    /// Converts the scalar into a JSON value.
    pub fn to_json(&self) -> Value {
        match self {
            Scalar::Null => Value::Null,
            Scalar::Boolean(v) => Value::Bool(*v),
            Scalar::Int8(v) => Value::Number((*v).into()),
            Scalar::Int16(v) => Value::Number((*v).into()),
            Scalar::Int32(v) => Value::Number((*v).into()),
            Scalar::Int64(v) => Value::Number((*v).into()),
            Scalar::UInt8(v) => Value::Number((*v).into()),
            Scalar::UInt16(v) => Value::Number((*v).into()),
            Scalar::UInt32(v) => Value::Number((*v).into()),
            Scalar::UInt64(v) => Value::Number((*v).into()),
            Scalar::Float16(v) => float_to_json(v.to_f64()),
            Scalar::Float32(v) => float_to_json(f64::from(*v)),
            Scalar::Float64(v) => float_to_json(*v),
            Scalar::Binary(v) => Value::String(bytes_to_string(v)),
            Scalar::Utf8(v) => Value::String((*v).to_string()),
            Scalar::Date32(v) => Value::String(v.to_string()),
            Scalar::Date64(v) => Value::String(v.to_string()),
            Scalar::Timestamp(v) => Value::String(v.to_string()),
            Scalar::Time(v) => Value::String(v.to_string()),
            Scalar::Duration(v) => Value::String(v.to_string()),
            Scalar::Decimal(v) => Value::String(v.to_string()),
            Scalar::IntervalYearMonth(months) => {
                let mut map = Map::new();
                map.insert("months".into(), Value::Number((*months).into()));
                Value::Object(map)
            }
            Scalar::IntervalDayTime(v) => {
                let mut map = Map::new();
                map.insert("days".into(), Value::Number(v.days.into()));
                map.insert("milliseconds".into(), Value::Number(v.milliseconds.into()));
                Value::Object(map)
            }
            Scalar::IntervalMonthDayNano(v) => {
                let mut map = Map::new();
                map.insert("months".into(), Value::Number(v.months.into()));
                map.insert("days".into(), Value::Number(v.days.into()));
                map.insert("nanoseconds".into(), Value::Number(v.nanoseconds.into()));
                Value::Object(map)
            }
            Scalar::List(items) => Value::Array(items.iter().map(Scalar::to_json).collect()),
            Scalar::Struct(fields) => {
                let mut map = Map::new();
                for (name, value) in fields {
                    map.insert((*name).to_string(), value.to_json());
                }
                Value::Object(map)
            }
            // Keys are not necessarily strings, so entries become `[key, value]` pairs.
            Scalar::Map(entries) => Value::Array(
                entries
                    .iter()
                    .map(|(key, value)| Value::Array(vec![key.to_json(), value.to_json()]))
                    .collect(),
            ),
        }
    }
}

fn float_to_json(value: f64) -> Value {
    match Number::from_f64(value) {
        Some(number) => Value::Number(number),
        None => Value::String(value.to_string()),
    }
}

/// Converts a byte slice into a printable `String`, escaping non-printable bytes as `\xHH`.
pub fn bytes_to_string(bytes: &[u8]) -> String {
    let mut result = String::with_capacity(bytes.len());
    for &byte in bytes {
        if (32..=126).contains(&byte) {
            result.push(byte as char);
        } else {
            result.push_str(&format!("\\x{byte:02x}"));
        }
    }
    result
}
