//! The logical scalar value.

use std::fmt;

use arrow_buffer::{IntervalDayTime, IntervalMonthDayNano};
use half::f16;

use crate::{
    decimal::Decimal,
    temporal::{Date32, Date64, Duration, TimeOfDay, Timestamp},
};

/// A single decoded value of a column slot.
///
/// Variable-width payloads (`Binary`, `Utf8`, struct field names) borrow from the
/// column they were decoded from, so a `Scalar<'a>` cannot outlive the column set.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar<'a> {
    /// The null marker.
    Null,
    Boolean(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Float16(f16),
    Float32(f32),
    Float64(f64),
    /// Raw bytes, no encoding assumed.
    Binary(&'a [u8]),
    /// Valid UTF-8 text.
    Utf8(&'a str),
    Date32(Date32),
    Date64(Date64),
    Timestamp(Timestamp<'a>),
    Time(TimeOfDay),
    Duration(Duration),
    Decimal(Decimal),
    /// Signed number of months.
    IntervalYearMonth(i32),
    /// Independent day and millisecond components.
    IntervalDayTime(IntervalDayTime),
    /// Independent month, day and nanosecond components.
    IntervalMonthDayNano(IntervalMonthDayNano),
    List(Vec<Scalar<'a>>),
    /// Field name and value pairs in declared field order.
    Struct(Vec<(&'a str, Scalar<'a>)>),
    /// Key and value pairs in entry order.
    Map(Vec<(Scalar<'a>, Scalar<'a>)>),
}

impl<'a> Scalar<'a> {
    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Scalar::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Scalar::Utf8(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&'a [u8]> {
        match self {
            Scalar::Binary(b) => Some(b),
            Scalar::Utf8(s) => Some(s.as_bytes()),
            _ => None,
        }
    }

    /// Returns the value as `i64` for any integer variant that fits.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Scalar::Int8(v) => Some(v.into()),
            Scalar::Int16(v) => Some(v.into()),
            Scalar::Int32(v) => Some(v.into()),
            Scalar::Int64(v) => Some(v),
            Scalar::UInt8(v) => Some(v.into()),
            Scalar::UInt16(v) => Some(v.into()),
            Scalar::UInt32(v) => Some(v.into()),
            Scalar::UInt64(v) => i64::try_from(v).ok(),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<&Decimal> {
        match self {
            Scalar::Decimal(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Scalar<'a>]> {
        match self {
            Scalar::List(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => f.write_str("null"),
            Scalar::Boolean(v) => write!(f, "{v}"),
            Scalar::Int8(v) => write!(f, "{v}"),
            Scalar::Int16(v) => write!(f, "{v}"),
            Scalar::Int32(v) => write!(f, "{v}"),
            Scalar::Int64(v) => write!(f, "{v}"),
            Scalar::UInt8(v) => write!(f, "{v}"),
            Scalar::UInt16(v) => write!(f, "{v}"),
            Scalar::UInt32(v) => write!(f, "{v}"),
            Scalar::UInt64(v) => write!(f, "{v}"),
            Scalar::Float16(v) => write!(f, "{v}"),
            Scalar::Float32(v) => write!(f, "{v}"),
            Scalar::Float64(v) => write!(f, "{v}"),
            Scalar::Binary(v) => f.write_str(&crate::json::bytes_to_string(v)),
            Scalar::Utf8(v) => write!(f, "{v:?}"),
            Scalar::Date32(v) => write!(f, "{v}"),
            Scalar::Date64(v) => write!(f, "{v}"),
            Scalar::Timestamp(v) => write!(f, "{v}"),
            Scalar::Time(v) => write!(f, "{v}"),
            Scalar::Duration(v) => write!(f, "{v}"),
            Scalar::Decimal(v) => write!(f, "{v}"),
            Scalar::IntervalYearMonth(months) => write!(f, "{months} months"),
            Scalar::IntervalDayTime(v) => {
                write!(f, "{} days {} ms", v.days, v.milliseconds)
            }
            Scalar::IntervalMonthDayNano(v) => {
                write!(f, "{} months {} days {} ns", v.months, v.days, v.nanoseconds)
            }
            Scalar::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Scalar::Struct(fields) => {
                f.write_str("{")?;
                for (i, (name, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name}: {value}")?;
                }
                f.write_str("}")
            }
            Scalar::Map(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key} => {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<bool> for Scalar<'_> {
    fn from(v: bool) -> Self {
        Scalar::Boolean(v)
    }
}

impl<'a> From<&'a str> for Scalar<'a> {
    fn from(v: &'a str) -> Self {
        Scalar::Utf8(v)
    }
}

impl<'a> From<&'a [u8]> for Scalar<'a> {
    fn from(v: &'a [u8]) -> Self {
        Scalar::Binary(v)
    }
}

impl From<Decimal> for Scalar<'_> {
    fn from(v: Decimal) -> Self {
        Scalar::Decimal(v)
    }
}

macro_rules! impl_from_native {
    ($($native:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$native> for Scalar<'_> {
                fn from(v: $native) -> Self {
                    Scalar::$variant(v)
                }
            }
        )*
    };
}

impl_from_native!(
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
    f16 => Float16,
    f32 => Float32,
    f64 => Float64,
);

impl<'a, T> From<Option<T>> for Scalar<'a>
where
    T: Into<Scalar<'a>>,
{
    fn from(v: Option<T>) -> Self {
        v.map_or(Scalar::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow_schema::TimeUnit;

    #[test]
    fn test_from_option() {
        assert_eq!(Scalar::from(Some(5i32)), Scalar::Int32(5));
        assert_eq!(Scalar::from(None::<i32>), Scalar::Null);
        assert_eq!(Scalar::from(Some("a")), Scalar::Utf8("a"));
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Scalar::UInt64(u64::MAX).as_i64(), None);
        assert_eq!(Scalar::Int8(-128).as_i64(), Some(-128));
        assert_eq!(Scalar::Utf8("x").as_bytes(), Some(&b"x"[..]));
        assert!(Scalar::Null.is_null());
        assert_eq!(Scalar::Boolean(true).as_bool(), Some(true));
    }

    #[test]
    fn test_display_nested() {
        let value = Scalar::Struct(vec![
            ("id", Scalar::Int32(1)),
            ("tags", Scalar::List(vec![Scalar::Utf8("a"), Scalar::Null])),
            (
                "at",
                Scalar::Time(TimeOfDay::new(61, TimeUnit::Second)),
            ),
        ]);
        assert_eq!(value.to_string(), r#"{id: 1, tags: ["a", null], at: 00:01:01}"#);
    }

    #[test]
    fn test_display_intervals() {
        let day_time = Scalar::IntervalDayTime(IntervalDayTime::new(1, 100));
        assert_eq!(day_time.to_string(), "1 days 100 ms");
        let mdn = Scalar::IntervalMonthDayNano(IntervalMonthDayNano::new(-1, 2, 3));
        assert_eq!(mdn.to_string(), "-1 months 2 days 3 ns");
    }
}
