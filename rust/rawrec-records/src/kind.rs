//! Physical kinds: the closed set of column encodings the decoder understands.
//!
//! A [`PhysicalKind`] is resolved from the column's Arrow [`DataType`] before any value
//! is read. All parameter validation happens here (time units per width, dictionary key
//! types, nesting of dictionaries), so that a column which passes resolution can always
//! be bound to a decoder.

use std::fmt;

use arrow_schema::{DataType, TimeUnit};
use rawrec_common::{Result, error::Error};

/// Integer type of the index buffer of a dictionary-encoded column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DictionaryKey {
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
}

impl DictionaryKey {
    fn try_from_data_type(data_type: &DataType) -> Option<DictionaryKey> {
        Some(match data_type {
            DataType::Int8 => DictionaryKey::Int8,
            DataType::Int16 => DictionaryKey::Int16,
            DataType::Int32 => DictionaryKey::Int32,
            DataType::Int64 => DictionaryKey::Int64,
            DataType::UInt8 => DictionaryKey::UInt8,
            DataType::UInt16 => DictionaryKey::UInt16,
            DataType::UInt32 => DictionaryKey::UInt32,
            DataType::UInt64 => DictionaryKey::UInt64,
            _ => return None,
        })
    }

    /// Width of one index slot in bits.
    pub fn bit_width(&self) -> u32 {
        match self {
            DictionaryKey::Int8 | DictionaryKey::UInt8 => 8,
            DictionaryKey::Int16 | DictionaryKey::UInt16 => 16,
            DictionaryKey::Int32 | DictionaryKey::UInt32 => 32,
            DictionaryKey::Int64 | DictionaryKey::UInt64 => 64,
        }
    }

    pub fn is_signed(&self) -> bool {
        matches!(
            self,
            DictionaryKey::Int8 | DictionaryKey::Int16 | DictionaryKey::Int32 | DictionaryKey::Int64
        )
    }
}

/// Physical encoding of a column, together with the parameters needed to decode it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PhysicalKind {
    /// Column without value buffers; every slot is null.
    Null,
    Boolean,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float16,
    Float32,
    Float64,
    /// Raw bytes addressed through 32-bit offsets.
    Binary,
    /// Raw bytes addressed through 64-bit offsets.
    LargeBinary,
    /// Raw bytes in slots of a fixed byte width.
    FixedSizeBinary { width: usize },
    /// UTF-8 text addressed through 32-bit offsets.
    Utf8,
    /// UTF-8 text addressed through 64-bit offsets.
    LargeUtf8,
    /// 32-bit day count since the epoch.
    Date32,
    /// 64-bit millisecond count since the epoch.
    Date64,
    /// 64-bit tick count since the epoch, with optional timezone metadata.
    Timestamp {
        unit: TimeUnit,
        timezone: Option<String>,
    },
    /// 32-bit tick count since midnight; unit is seconds or milliseconds.
    Time32 { unit: TimeUnit },
    /// 64-bit tick count since midnight; unit is microseconds or nanoseconds.
    Time64 { unit: TimeUnit },
    /// 64-bit elapsed tick count.
    Duration { unit: TimeUnit },
    Decimal128 { precision: u8, scale: i8 },
    Decimal256 { precision: u8, scale: i8 },
    IntervalYearMonth,
    IntervalDayTime,
    IntervalMonthDayNano,
    /// Index buffer referring into a shared dictionary of values of another kind.
    Dictionary {
        key: DictionaryKey,
        value: Box<PhysicalKind>,
    },
    List { item: Box<PhysicalKind> },
    LargeList { item: Box<PhysicalKind> },
    FixedSizeList { item: Box<PhysicalKind>, size: usize },
    Struct { fields: Vec<(String, PhysicalKind)> },
    Map {
        key: Box<PhysicalKind>,
        value: Box<PhysicalKind>,
    },
}

impl PhysicalKind {
    /// Returns `true` for kinds whose slots contain other slots.
    pub fn is_nested(&self) -> bool {
        matches!(
            self,
            PhysicalKind::List { .. }
                | PhysicalKind::LargeList { .. }
                | PhysicalKind::FixedSizeList { .. }
                | PhysicalKind::Struct { .. }
                | PhysicalKind::Map { .. }
        )
    }

    pub fn is_dictionary(&self) -> bool {
        matches!(self, PhysicalKind::Dictionary { .. })
    }
}

impl TryFrom<&DataType> for PhysicalKind {
    type Error = Error;

    fn try_from(data_type: &DataType) -> Result<PhysicalKind> {
        let unsupported = || Error::unsupported_type(data_type);
        let kind = match data_type {
            DataType::Null => PhysicalKind::Null,
            DataType::Boolean => PhysicalKind::Boolean,
            DataType::Int8 => PhysicalKind::Int8,
            DataType::Int16 => PhysicalKind::Int16,
            DataType::Int32 => PhysicalKind::Int32,
            DataType::Int64 => PhysicalKind::Int64,
            DataType::UInt8 => PhysicalKind::UInt8,
            DataType::UInt16 => PhysicalKind::UInt16,
            DataType::UInt32 => PhysicalKind::UInt32,
            DataType::UInt64 => PhysicalKind::UInt64,
            DataType::Float16 => PhysicalKind::Float16,
            DataType::Float32 => PhysicalKind::Float32,
            DataType::Float64 => PhysicalKind::Float64,
            DataType::Binary => PhysicalKind::Binary,
            DataType::LargeBinary => PhysicalKind::LargeBinary,
            DataType::FixedSizeBinary(width) => PhysicalKind::FixedSizeBinary {
                width: usize::try_from(*width).map_err(|_| unsupported())?,
            },
            DataType::Utf8 => PhysicalKind::Utf8,
            DataType::LargeUtf8 => PhysicalKind::LargeUtf8,
            DataType::Date32 => PhysicalKind::Date32,
            DataType::Date64 => PhysicalKind::Date64,
            DataType::Timestamp(unit, timezone) => PhysicalKind::Timestamp {
                unit: *unit,
                timezone: timezone.as_deref().map(str::to_string),
            },
            DataType::Time32(unit @ (TimeUnit::Second | TimeUnit::Millisecond)) => {
                PhysicalKind::Time32 { unit: *unit }
            }
            DataType::Time64(unit @ (TimeUnit::Microsecond | TimeUnit::Nanosecond)) => {
                PhysicalKind::Time64 { unit: *unit }
            }
            DataType::Duration(unit) => PhysicalKind::Duration { unit: *unit },
            DataType::Decimal128(precision, scale) => PhysicalKind::Decimal128 {
                precision: *precision,
                scale: *scale,
            },
            DataType::Decimal256(precision, scale) => PhysicalKind::Decimal256 {
                precision: *precision,
                scale: *scale,
            },
            DataType::Interval(arrow_schema::IntervalUnit::YearMonth) => {
                PhysicalKind::IntervalYearMonth
            }
            DataType::Interval(arrow_schema::IntervalUnit::DayTime) => {
                PhysicalKind::IntervalDayTime
            }
            DataType::Interval(arrow_schema::IntervalUnit::MonthDayNano) => {
                PhysicalKind::IntervalMonthDayNano
            }
            DataType::Dictionary(key, value) => {
                let key = DictionaryKey::try_from_data_type(key).ok_or_else(unsupported)?;
                let value = PhysicalKind::try_from(value.as_ref())?;
                if value.is_dictionary() {
                    return Err(unsupported());
                }
                PhysicalKind::Dictionary {
                    key,
                    value: Box::new(value),
                }
            }
            DataType::List(field) => PhysicalKind::List {
                item: Box::new(PhysicalKind::try_from(field.data_type())?),
            },
            DataType::LargeList(field) => PhysicalKind::LargeList {
                item: Box::new(PhysicalKind::try_from(field.data_type())?),
            },
            DataType::FixedSizeList(field, size) => PhysicalKind::FixedSizeList {
                item: Box::new(PhysicalKind::try_from(field.data_type())?),
                size: usize::try_from(*size).map_err(|_| unsupported())?,
            },
            DataType::Struct(fields) => PhysicalKind::Struct {
                fields: fields
                    .iter()
                    .map(|field| {
                        PhysicalKind::try_from(field.data_type())
                            .map(|kind| (field.name().clone(), kind))
                    })
                    .collect::<Result<Vec<_>>>()?,
            },
            DataType::Map(entries, _) => match entries.data_type() {
                DataType::Struct(fields) if fields.len() == 2 => PhysicalKind::Map {
                    key: Box::new(PhysicalKind::try_from(fields[0].data_type())?),
                    value: Box::new(PhysicalKind::try_from(fields[1].data_type())?),
                },
                _ => return Err(unsupported()),
            },
            _ => return Err(unsupported()),
        };
        Ok(kind)
    }
}

impl fmt::Display for PhysicalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicalKind::Null => f.write_str("null"),
            PhysicalKind::Boolean => f.write_str("boolean"),
            PhysicalKind::Int8 => f.write_str("int8"),
            PhysicalKind::Int16 => f.write_str("int16"),
            PhysicalKind::Int32 => f.write_str("int32"),
            PhysicalKind::Int64 => f.write_str("int64"),
            PhysicalKind::UInt8 => f.write_str("uint8"),
            PhysicalKind::UInt16 => f.write_str("uint16"),
            PhysicalKind::UInt32 => f.write_str("uint32"),
            PhysicalKind::UInt64 => f.write_str("uint64"),
            PhysicalKind::Float16 => f.write_str("float16"),
            PhysicalKind::Float32 => f.write_str("float32"),
            PhysicalKind::Float64 => f.write_str("float64"),
            PhysicalKind::Binary => f.write_str("binary"),
            PhysicalKind::LargeBinary => f.write_str("large_binary"),
            PhysicalKind::FixedSizeBinary { width } => write!(f, "fixed_size_binary({width})"),
            PhysicalKind::Utf8 => f.write_str("utf8"),
            PhysicalKind::LargeUtf8 => f.write_str("large_utf8"),
            PhysicalKind::Date32 => f.write_str("date32"),
            PhysicalKind::Date64 => f.write_str("date64"),
            PhysicalKind::Timestamp { unit, timezone } => match timezone {
                Some(tz) => write!(f, "timestamp({}, {tz})", unit_name(*unit)),
                None => write!(f, "timestamp({})", unit_name(*unit)),
            },
            PhysicalKind::Time32 { unit } => write!(f, "time32({})", unit_name(*unit)),
            PhysicalKind::Time64 { unit } => write!(f, "time64({})", unit_name(*unit)),
            PhysicalKind::Duration { unit } => write!(f, "duration({})", unit_name(*unit)),
            PhysicalKind::Decimal128 { precision, scale } => {
                write!(f, "decimal128({precision}, {scale})")
            }
            PhysicalKind::Decimal256 { precision, scale } => {
                write!(f, "decimal256({precision}, {scale})")
            }
            PhysicalKind::IntervalYearMonth => f.write_str("interval(year_month)"),
            PhysicalKind::IntervalDayTime => f.write_str("interval(day_time)"),
            PhysicalKind::IntervalMonthDayNano => f.write_str("interval(month_day_nano)"),
            PhysicalKind::Dictionary { key, value } => {
                let sign = if key.is_signed() { "int" } else { "uint" };
                write!(f, "dictionary<{sign}{}, {value}>", key.bit_width())
            }
            PhysicalKind::List { item } => write!(f, "list<{item}>"),
            PhysicalKind::LargeList { item } => write!(f, "large_list<{item}>"),
            PhysicalKind::FixedSizeList { item, size } => {
                write!(f, "fixed_size_list<{item}, {size}>")
            }
            PhysicalKind::Struct { fields } => {
                f.write_str("struct<")?;
                for (i, (name, kind)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name}: {kind}")?;
                }
                f.write_str(">")
            }
            PhysicalKind::Map { key, value } => write!(f, "map<{key}, {value}>"),
        }
    }
}

fn unit_name(unit: TimeUnit) -> &'static str {
    match unit {
        TimeUnit::Second => "s",
        TimeUnit::Millisecond => "ms",
        TimeUnit::Microsecond => "us",
        TimeUnit::Nanosecond => "ns",
    }
}
