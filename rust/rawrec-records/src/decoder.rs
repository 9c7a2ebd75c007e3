//! Scalar decoding: turning one slot of a column into a [`Scalar`].
//!
//! A [`ColumnDecoder`] is bound to a column once: the physical kind is resolved, the
//! column is downcast to its concrete Arrow array type and its value buffers are
//! captured as typed slices. Decoding a slot afterwards is a bounds check, a validity
//! lookup and a buffer read.

use std::ops::Range;

use arrow_array::{
    Array, ArrowPrimitiveType, BooleanArray, FixedSizeBinaryArray, FixedSizeListArray,
    GenericBinaryArray, GenericListArray, GenericStringArray, MapArray, OffsetSizeTrait,
    PrimitiveArray, StructArray,
    types::{
        Date32Type, Date64Type, Decimal128Type, Decimal256Type, DurationMicrosecondType,
        DurationMillisecondType, DurationNanosecondType, DurationSecondType, Float16Type,
        Float32Type, Float64Type, Int8Type, Int16Type, Int32Type, Int64Type,
        IntervalDayTimeType, IntervalMonthDayNanoType, IntervalYearMonthType,
        Time32MillisecondType, Time32SecondType, Time64MicrosecondType, Time64NanosecondType,
        TimestampMicrosecondType, TimestampMillisecondType, TimestampNanosecondType,
        TimestampSecondType, UInt8Type, UInt16Type, UInt32Type, UInt64Type,
    },
};
use arrow_buffer::{ArrowNativeType, BooleanBuffer, IntervalDayTime, IntervalMonthDayNano, i256};
use arrow_schema::{DataType, TimeUnit};
use half::f16;
use rawrec_common::{Result, error::Error, result::verify_row, verify_data};
use rawrec_scalar::{
    Decimal, Scalar,
    temporal::{Date32, Date64, Duration, TimeOfDay, Timestamp},
};

use crate::{dictionary::DictionaryDecoder, kind::PhysicalKind, validity::Validity};

/// Decoder bound to a single column.
pub struct ColumnDecoder<'a> {
    len: usize,
    validity: Validity<'a>,
    values: ValueDecoder<'a>,
}

impl<'a> ColumnDecoder<'a> {
    /// Resolves the physical kind of `array` and binds a decoder to it.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedType` if the column's data type has no decode rule.
    pub fn try_new(array: &'a dyn Array) -> Result<ColumnDecoder<'a>> {
        let kind = PhysicalKind::try_from(array.data_type())?;
        ColumnDecoder::bind(array, &kind)
    }

    /// Binds a decoder to `array`, whose data type has already been resolved to `kind`.
    pub fn bind(array: &'a dyn Array, kind: &PhysicalKind) -> Result<ColumnDecoder<'a>> {
        Ok(ColumnDecoder {
            len: array.len(),
            validity: Validity::of(array),
            values: ValueDecoder::bind(array, kind)?,
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn validity(&self) -> &Validity<'a> {
        &self.validity
    }

    /// Returns `true` if the slot at `row` is null.
    pub fn is_null(&self, row: usize) -> Result<bool> {
        verify_row(row, self.len)?;
        Ok(self.validity.is_null(row))
    }

    /// Decodes the slot at `row`, or returns [`Scalar::Null`] if the slot is null.
    pub fn read(&self, row: usize) -> Result<Scalar<'a>> {
        verify_row(row, self.len)?;
        if self.validity.is_null(row) {
            return Ok(Scalar::Null);
        }
        self.values.decode(row)
    }

    /// Decodes the value buffers at `row` without consulting validity.
    ///
    /// Meant for slots already known to be present. For a null slot the result is
    /// whatever placeholder the value buffers hold (and may be an error for
    /// dictionary-encoded columns, whose null index slots carry arbitrary indices).
    pub fn decode(&self, row: usize) -> Result<Scalar<'a>> {
        verify_row(row, self.len)?;
        self.values.decode(row)
    }
}

/// Decodes the slot at `row` of `array`, returning [`Scalar::Null`] for null slots.
///
/// Binds a fresh decoder on every call; use [`ColumnDecoder`] to decode many slots.
pub fn decode(array: &dyn Array, row: usize) -> Result<Scalar<'_>> {
    ColumnDecoder::try_new(array)?.read(row)
}

/// Offsets buffer of a variable-width column, with either 32-bit or 64-bit entries.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Offsets<'a> {
    Small(&'a [i32]),
    Large(&'a [i64]),
}

impl Offsets<'_> {
    /// Returns the `[offsets[row], offsets[row + 1])` range; `row` must be in bounds.
    pub(crate) fn range_at(&self, row: usize) -> Result<Range<usize>> {
        match self {
            Offsets::Small(offsets) => offset_range(offsets, row),
            Offsets::Large(offsets) => offset_range(offsets, row),
        }
    }
}

fn offset_range<O: ArrowNativeType>(offsets: &[O], row: usize) -> Result<Range<usize>> {
    verify_data!(offsets, row + 1 < offsets.len());
    let start = offsets[row].to_usize();
    let end = offsets[row + 1].to_usize();
    match (start, end) {
        (Some(start), Some(end)) if start <= end => Ok(start..end),
        _ => Err(Error::invalid_format(
            "offsets",
            format!("malformed offset pair at slot {row}"),
        )),
    }
}

/// Variable-width values: an offsets buffer into one shared data buffer.
#[derive(Debug, Clone, Copy)]
pub(crate) struct VarWidth<'a> {
    offsets: Offsets<'a>,
    data: &'a [u8],
}

impl<'a> VarWidth<'a> {
    fn binary<O: OffsetSizeTrait>(array: &'a dyn Array) -> Result<VarWidth<'a>>
    where
        for<'b> &'b [O]: Into<Offsets<'b>>,
    {
        let array = downcast::<GenericBinaryArray<O>>(array)?;
        Ok(VarWidth {
            offsets: array.value_offsets().into(),
            data: array.value_data(),
        })
    }

    fn string<O: OffsetSizeTrait>(array: &'a dyn Array) -> Result<VarWidth<'a>>
    where
        for<'b> &'b [O]: Into<Offsets<'b>>,
    {
        let array = downcast::<GenericStringArray<O>>(array)?;
        Ok(VarWidth {
            offsets: array.value_offsets().into(),
            data: array.value_data(),
        })
    }

    fn bytes_at(&self, row: usize) -> Result<&'a [u8]> {
        let range = self.offsets.range_at(row)?;
        verify_data!(data, range.end <= self.data.len());
        Ok(&self.data[range])
    }

    fn text_at(&self, row: usize) -> Result<&'a str> {
        let bytes = self.bytes_at(row)?;
        std::str::from_utf8(bytes).map_err(|e| Error::invalid_utf8(row, e))
    }
}

impl<'a> From<&'a [i32]> for Offsets<'a> {
    fn from(offsets: &'a [i32]) -> Self {
        Offsets::Small(offsets)
    }
}

impl<'a> From<&'a [i64]> for Offsets<'a> {
    fn from(offsets: &'a [i64]) -> Self {
        Offsets::Large(offsets)
    }
}

/// Per-kind access to the value buffers of a column.
///
/// One variant per [`PhysicalKind`]; binding matches the kind exhaustively, so a new
/// kind cannot be added without a decode rule.
pub(crate) enum ValueDecoder<'a> {
    Null,
    Boolean(&'a BooleanBuffer),
    Int8(&'a [i8]),
    Int16(&'a [i16]),
    Int32(&'a [i32]),
    Int64(&'a [i64]),
    UInt8(&'a [u8]),
    UInt16(&'a [u16]),
    UInt32(&'a [u32]),
    UInt64(&'a [u64]),
    Float16(&'a [f16]),
    Float32(&'a [f32]),
    Float64(&'a [f64]),
    Binary(VarWidth<'a>),
    FixedSizeBinary(&'a FixedSizeBinaryArray),
    Utf8(VarWidth<'a>),
    Date32(&'a [i32]),
    Date64(&'a [i64]),
    Timestamp {
        values: &'a [i64],
        unit: TimeUnit,
        timezone: Option<&'a str>,
    },
    Time32 {
        values: &'a [i32],
        unit: TimeUnit,
    },
    Time64 {
        values: &'a [i64],
        unit: TimeUnit,
    },
    Duration {
        values: &'a [i64],
        unit: TimeUnit,
    },
    Decimal128 {
        values: &'a [i128],
        precision: u8,
        scale: i8,
    },
    Decimal256 {
        values: &'a [i256],
        precision: u8,
        scale: i8,
    },
    IntervalYearMonth(&'a [i32]),
    IntervalDayTime(&'a [IntervalDayTime]),
    IntervalMonthDayNano(&'a [IntervalMonthDayNano]),
    Dictionary(DictionaryDecoder<'a>),
    List {
        offsets: Offsets<'a>,
        items: Box<ColumnDecoder<'a>>,
    },
    FixedSizeList {
        array: &'a FixedSizeListArray,
        size: usize,
        items: Box<ColumnDecoder<'a>>,
    },
    Struct {
        names: Vec<&'a str>,
        fields: Vec<ColumnDecoder<'a>>,
    },
    Map {
        offsets: Offsets<'a>,
        keys: Box<ColumnDecoder<'a>>,
        values: Box<ColumnDecoder<'a>>,
    },
}

impl<'a> ValueDecoder<'a> {
    fn bind(array: &'a dyn Array, kind: &PhysicalKind) -> Result<ValueDecoder<'a>> {
        let decoder = match kind {
            PhysicalKind::Null => ValueDecoder::Null,
            PhysicalKind::Boolean => ValueDecoder::Boolean(downcast::<BooleanArray>(array)?.values()),
            PhysicalKind::Int8 => ValueDecoder::Int8(primitive::<Int8Type>(array)?),
            PhysicalKind::Int16 => ValueDecoder::Int16(primitive::<Int16Type>(array)?),
            PhysicalKind::Int32 => ValueDecoder::Int32(primitive::<Int32Type>(array)?),
            PhysicalKind::Int64 => ValueDecoder::Int64(primitive::<Int64Type>(array)?),
            PhysicalKind::UInt8 => ValueDecoder::UInt8(primitive::<UInt8Type>(array)?),
            PhysicalKind::UInt16 => ValueDecoder::UInt16(primitive::<UInt16Type>(array)?),
            PhysicalKind::UInt32 => ValueDecoder::UInt32(primitive::<UInt32Type>(array)?),
            PhysicalKind::UInt64 => ValueDecoder::UInt64(primitive::<UInt64Type>(array)?),
            PhysicalKind::Float16 => ValueDecoder::Float16(primitive::<Float16Type>(array)?),
            PhysicalKind::Float32 => ValueDecoder::Float32(primitive::<Float32Type>(array)?),
            PhysicalKind::Float64 => ValueDecoder::Float64(primitive::<Float64Type>(array)?),
            PhysicalKind::Binary => ValueDecoder::Binary(VarWidth::binary::<i32>(array)?),
            PhysicalKind::LargeBinary => ValueDecoder::Binary(VarWidth::binary::<i64>(array)?),
            PhysicalKind::FixedSizeBinary { .. } => {
                ValueDecoder::FixedSizeBinary(downcast::<FixedSizeBinaryArray>(array)?)
            }
            PhysicalKind::Utf8 => ValueDecoder::Utf8(VarWidth::string::<i32>(array)?),
            PhysicalKind::LargeUtf8 => ValueDecoder::Utf8(VarWidth::string::<i64>(array)?),
            PhysicalKind::Date32 => ValueDecoder::Date32(primitive::<Date32Type>(array)?),
            PhysicalKind::Date64 => ValueDecoder::Date64(primitive::<Date64Type>(array)?),
            PhysicalKind::Timestamp { unit, .. } => {
                let values = match unit {
                    TimeUnit::Second => primitive::<TimestampSecondType>(array)?,
                    TimeUnit::Millisecond => primitive::<TimestampMillisecondType>(array)?,
                    TimeUnit::Microsecond => primitive::<TimestampMicrosecondType>(array)?,
                    TimeUnit::Nanosecond => primitive::<TimestampNanosecondType>(array)?,
                };
                // Borrowed from the column's own type so the scalar can outlive `kind`.
                let timezone = match array.data_type() {
                    DataType::Timestamp(_, timezone) => timezone.as_deref(),
                    _ => None,
                };
                ValueDecoder::Timestamp {
                    values,
                    unit: *unit,
                    timezone,
                }
            }
            PhysicalKind::Time32 { unit } => {
                let values = match unit {
                    TimeUnit::Second => primitive::<Time32SecondType>(array)?,
                    TimeUnit::Millisecond => primitive::<Time32MillisecondType>(array)?,
                    TimeUnit::Microsecond | TimeUnit::Nanosecond => {
                        return Err(Error::unsupported_type(array.data_type()));
                    }
                };
                ValueDecoder::Time32 {
                    values,
                    unit: *unit,
                }
            }
            PhysicalKind::Time64 { unit } => {
                let values = match unit {
                    TimeUnit::Microsecond => primitive::<Time64MicrosecondType>(array)?,
                    TimeUnit::Nanosecond => primitive::<Time64NanosecondType>(array)?,
                    TimeUnit::Second | TimeUnit::Millisecond => {
                        return Err(Error::unsupported_type(array.data_type()));
                    }
                };
                ValueDecoder::Time64 {
                    values,
                    unit: *unit,
                }
            }
            PhysicalKind::Duration { unit } => {
                let values = match unit {
                    TimeUnit::Second => primitive::<DurationSecondType>(array)?,
                    TimeUnit::Millisecond => primitive::<DurationMillisecondType>(array)?,
                    TimeUnit::Microsecond => primitive::<DurationMicrosecondType>(array)?,
                    TimeUnit::Nanosecond => primitive::<DurationNanosecondType>(array)?,
                };
                ValueDecoder::Duration {
                    values,
                    unit: *unit,
                }
            }
            PhysicalKind::Decimal128 { precision, scale } => ValueDecoder::Decimal128 {
                values: primitive::<Decimal128Type>(array)?,
                precision: *precision,
                scale: *scale,
            },
            PhysicalKind::Decimal256 { precision, scale } => ValueDecoder::Decimal256 {
                values: primitive::<Decimal256Type>(array)?,
                precision: *precision,
                scale: *scale,
            },
            PhysicalKind::IntervalYearMonth => {
                ValueDecoder::IntervalYearMonth(primitive::<IntervalYearMonthType>(array)?)
            }
            PhysicalKind::IntervalDayTime => {
                ValueDecoder::IntervalDayTime(primitive::<IntervalDayTimeType>(array)?)
            }
            PhysicalKind::IntervalMonthDayNano => {
                ValueDecoder::IntervalMonthDayNano(primitive::<IntervalMonthDayNanoType>(array)?)
            }
            PhysicalKind::Dictionary { key, value } => {
                ValueDecoder::Dictionary(DictionaryDecoder::bind(array, *key, value)?)
            }
            PhysicalKind::List { item } => {
                let list = downcast::<GenericListArray<i32>>(array)?;
                ValueDecoder::List {
                    offsets: Offsets::Small(list.value_offsets()),
                    items: Box::new(ColumnDecoder::bind(list.values().as_ref(), item)?),
                }
            }
            PhysicalKind::LargeList { item } => {
                let list = downcast::<GenericListArray<i64>>(array)?;
                ValueDecoder::List {
                    offsets: Offsets::Large(list.value_offsets()),
                    items: Box::new(ColumnDecoder::bind(list.values().as_ref(), item)?),
                }
            }
            PhysicalKind::FixedSizeList { item, size } => {
                let list = downcast::<FixedSizeListArray>(array)?;
                ValueDecoder::FixedSizeList {
                    array: list,
                    size: *size,
                    items: Box::new(ColumnDecoder::bind(list.values().as_ref(), item)?),
                }
            }
            PhysicalKind::Struct { fields } => {
                let array = downcast::<StructArray>(array)?;
                verify_data!(fields, fields.len() == array.num_columns());
                let names = array
                    .fields()
                    .iter()
                    .map(|field| field.name().as_str())
                    .collect();
                let fields = array
                    .columns()
                    .iter()
                    .zip(fields)
                    .map(|(column, (_, kind))| ColumnDecoder::bind(column.as_ref(), kind))
                    .collect::<Result<Vec<_>>>()?;
                ValueDecoder::Struct { names, fields }
            }
            PhysicalKind::Map { key, value } => {
                let map = downcast::<MapArray>(array)?;
                ValueDecoder::Map {
                    offsets: Offsets::Small(map.value_offsets()),
                    keys: Box::new(ColumnDecoder::bind(map.keys().as_ref(), key)?),
                    values: Box::new(ColumnDecoder::bind(map.values().as_ref(), value)?),
                }
            }
        };
        Ok(decoder)
    }

    /// Decodes the value at `row`; `row` must already be verified against the column length.
    fn decode(&self, row: usize) -> Result<Scalar<'a>> {
        let scalar = match self {
            ValueDecoder::Null => Scalar::Null,
            ValueDecoder::Boolean(values) => Scalar::Boolean(values.value(row)),
            ValueDecoder::Int8(values) => Scalar::Int8(values[row]),
            ValueDecoder::Int16(values) => Scalar::Int16(values[row]),
            ValueDecoder::Int32(values) => Scalar::Int32(values[row]),
            ValueDecoder::Int64(values) => Scalar::Int64(values[row]),
            ValueDecoder::UInt8(values) => Scalar::UInt8(values[row]),
            ValueDecoder::UInt16(values) => Scalar::UInt16(values[row]),
            ValueDecoder::UInt32(values) => Scalar::UInt32(values[row]),
            ValueDecoder::UInt64(values) => Scalar::UInt64(values[row]),
            ValueDecoder::Float16(values) => Scalar::Float16(values[row]),
            ValueDecoder::Float32(values) => Scalar::Float32(values[row]),
            ValueDecoder::Float64(values) => Scalar::Float64(values[row]),
            ValueDecoder::Binary(values) => Scalar::Binary(values.bytes_at(row)?),
            ValueDecoder::FixedSizeBinary(array) => Scalar::Binary(array.value(row)),
            ValueDecoder::Utf8(values) => Scalar::Utf8(values.text_at(row)?),
            ValueDecoder::Date32(values) => Scalar::Date32(Date32::new(values[row])),
            ValueDecoder::Date64(values) => Scalar::Date64(Date64::new(values[row])),
            ValueDecoder::Timestamp {
                values,
                unit,
                timezone,
            } => Scalar::Timestamp(Timestamp::new(values[row], *unit, *timezone)),
            ValueDecoder::Time32 { values, unit } => {
                Scalar::Time(TimeOfDay::new(values[row].into(), *unit))
            }
            ValueDecoder::Time64 { values, unit } => {
                Scalar::Time(TimeOfDay::new(values[row], *unit))
            }
            ValueDecoder::Duration { values, unit } => {
                Scalar::Duration(Duration::new(values[row], *unit))
            }
            ValueDecoder::Decimal128 {
                values,
                precision,
                scale,
            } => Scalar::Decimal(Decimal::from_i128(values[row], *precision, *scale)),
            ValueDecoder::Decimal256 {
                values,
                precision,
                scale,
            } => Scalar::Decimal(Decimal::new(values[row], *precision, *scale)),
            ValueDecoder::IntervalYearMonth(values) => Scalar::IntervalYearMonth(values[row]),
            ValueDecoder::IntervalDayTime(values) => Scalar::IntervalDayTime(values[row]),
            ValueDecoder::IntervalMonthDayNano(values) => {
                Scalar::IntervalMonthDayNano(values[row])
            }
            ValueDecoder::Dictionary(dictionary) => dictionary.decode(row)?,
            ValueDecoder::List { offsets, items } => {
                let range = offsets.range_at(row)?;
                Scalar::List(read_range(items, range)?)
            }
            ValueDecoder::FixedSizeList { array, size, items } => {
                let start = array.value_offset(row).to_usize().ok_or_else(|| {
                    Error::invalid_format("fixed size list", "negative value offset")
                })?;
                Scalar::List(read_range(items, start..start + size)?)
            }
            ValueDecoder::Struct { names, fields } => Scalar::Struct(
                names
                    .iter()
                    .zip(fields)
                    .map(|(name, field)| field.read(row).map(|value| (*name, value)))
                    .collect::<Result<Vec<_>>>()?,
            ),
            ValueDecoder::Map {
                offsets,
                keys,
                values,
            } => {
                let range = offsets.range_at(row)?;
                Scalar::Map(
                    range
                        .map(|entry| Ok((keys.read(entry)?, values.read(entry)?)))
                        .collect::<Result<Vec<_>>>()?,
                )
            }
        };
        Ok(scalar)
    }
}

fn read_range<'a>(items: &ColumnDecoder<'a>, range: Range<usize>) -> Result<Vec<Scalar<'a>>> {
    verify_data!(range, range.end <= items.len());
    range.map(|item| items.read(item)).collect()
}

/// Downcasts a type-erased column to its concrete Arrow array type.
pub(crate) fn downcast<'a, T: Array + 'static>(array: &'a dyn Array) -> Result<&'a T> {
    array.as_any().downcast_ref::<T>().ok_or_else(|| {
        Error::invalid_arg(
            "array",
            format!(
                "{} cannot be read as {}",
                array.data_type(),
                std::any::type_name::<T>()
            ),
        )
    })
}

/// Returns the value buffer of a primitive column as a typed slice.
pub(crate) fn primitive<'a, T: ArrowPrimitiveType>(
    array: &'a dyn Array,
) -> Result<&'a [T::Native]> {
    let values: &'a [T::Native] = downcast::<PrimitiveArray<T>>(array)?.values();
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow_array::{
        BinaryArray, Date32Array, Decimal128Array, Decimal256Array, FixedSizeBinaryArray,
        Int8Array, IntervalDayTimeArray, IntervalMonthDayNanoArray, LargeStringArray, ListArray,
        NullArray, StringArray, Time32SecondArray, Time64NanosecondArray,
        TimestampMillisecondArray, UInt64Array,
        builder::{MapBuilder, StringBuilder, Int32Builder},
        types::Int32Type,
    };
    use arrow_buffer::{Buffer, OffsetBuffer, ScalarBuffer};
    use arrow_schema::{Field, Fields};
    use rawrec_common::error::ErrorKind;
    use std::sync::Arc;

    fn read_all<'a>(array: &'a dyn Array) -> Vec<Scalar<'a>> {
        let decoder = ColumnDecoder::try_new(array).unwrap();
        (0..decoder.len()).map(|row| decoder.read(row).unwrap()).collect()
    }

    #[test]
    fn test_integer_extremes() {
        let array = Int8Array::from(vec![i8::MIN, i8::MAX]);
        assert_eq!(read_all(&array), vec![Scalar::Int8(-128), Scalar::Int8(127)]);

        let array = UInt64Array::from(vec![u64::MAX, 0]);
        assert_eq!(
            read_all(&array),
            vec![Scalar::UInt64(18_446_744_073_709_551_615), Scalar::UInt64(0)]
        );
    }

    #[test]
    fn test_null_column() {
        let array = NullArray::new(2);
        assert_eq!(read_all(&array), vec![Scalar::Null, Scalar::Null]);
    }

    #[test]
    fn test_text_and_binary() {
        let array = StringArray::from(vec![Some("Ruby"), None, Some("\u{3042}"), Some("")]);
        assert_eq!(
            read_all(&array),
            vec![
                Scalar::Utf8("Ruby"),
                Scalar::Null,
                Scalar::Utf8("\u{3042}"),
                Scalar::Utf8("")
            ]
        );

        let array = LargeStringArray::from(vec!["a", "bc"]);
        assert_eq!(read_all(&array), vec![Scalar::Utf8("a"), Scalar::Utf8("bc")]);

        let array = BinaryArray::from(vec![&b"\x00\xff"[..], &b""[..]]);
        assert_eq!(
            read_all(&array),
            vec![Scalar::Binary(b"\x00\xff"), Scalar::Binary(b"")]
        );
    }

    #[test]
    fn test_sliced_text() {
        let array = StringArray::from(vec!["a", "bb", "ccc"]);
        let sliced = array.slice(1, 2);
        assert_eq!(
            read_all(&sliced),
            vec![Scalar::Utf8("bb"), Scalar::Utf8("ccc")]
        );
    }

    #[test]
    fn test_malformed_utf8_is_an_error() {
        let offsets = OffsetBuffer::new(ScalarBuffer::from(vec![0i32, 1, 3]));
        let data = Buffer::from(&b"a\xc3\x28"[..]);
        // SAFETY: deliberately skips UTF-8 validation to produce malformed text.
        let array = unsafe { StringArray::new_unchecked(offsets, data, None) };
        let decoder = ColumnDecoder::try_new(&array).unwrap();
        assert_eq!(decoder.read(0).unwrap(), Scalar::Utf8("a"));
        let err = decoder.read(1).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidUtf8 { row: 1, .. }));
    }

    #[test]
    fn test_fixed_size_binary() {
        let array =
            FixedSizeBinaryArray::try_from_sparse_iter_with_size(
                vec![Some(vec![1u8, 2]), None, Some(vec![3, 4])].into_iter(),
                2,
            )
            .unwrap();
        assert_eq!(
            read_all(&array),
            vec![Scalar::Binary(&[1, 2]), Scalar::Null, Scalar::Binary(&[3, 4])]
        );
    }

    #[test]
    fn test_temporal_kinds() {
        let array = Date32Array::from(vec![-1, 0, 18_262]);
        assert_eq!(
            read_all(&array),
            vec![
                Scalar::Date32(Date32::new(-1)),
                Scalar::Date32(Date32::new(0)),
                Scalar::Date32(Date32::new(18_262)),
            ]
        );

        let array = TimestampMillisecondArray::from(vec![1_500]).with_timezone("UTC");
        assert_eq!(
            read_all(&array),
            vec![Scalar::Timestamp(Timestamp::new(
                1_500,
                TimeUnit::Millisecond,
                Some("UTC")
            ))]
        );

        // Out-of-range times of day decode literally.
        let array = Time32SecondArray::from(vec![90_000]);
        assert_eq!(
            read_all(&array),
            vec![Scalar::Time(TimeOfDay::new(90_000, TimeUnit::Second))]
        );

        let array = Time64NanosecondArray::from(vec![1]);
        assert_eq!(
            read_all(&array),
            vec![Scalar::Time(TimeOfDay::new(1, TimeUnit::Nanosecond))]
        );
    }

    #[test]
    fn test_decimal_is_exact() {
        let array = Decimal128Array::from(vec![9292])
            .with_precision_and_scale(8, 2)
            .unwrap();
        let values = read_all(&array);
        assert_eq!(values[0].as_decimal().unwrap().to_string(), "92.92");

        let array = Decimal256Array::from(vec![i256::from_i128(-1)])
            .with_precision_and_scale(40, 3)
            .unwrap();
        let values = read_all(&array);
        assert_eq!(values[0].as_decimal().unwrap().to_string(), "-0.001");
    }

    #[test]
    fn test_intervals_are_not_normalized() {
        let array = IntervalDayTimeArray::from(vec![IntervalDayTime::new(1, 100)]);
        assert_eq!(
            read_all(&array),
            vec![Scalar::IntervalDayTime(IntervalDayTime::new(1, 100))]
        );

        let array =
            IntervalMonthDayNanoArray::from(vec![IntervalMonthDayNano::new(1, 40, 90_000_000_000_000)]);
        assert_eq!(
            read_all(&array),
            vec![Scalar::IntervalMonthDayNano(IntervalMonthDayNano::new(
                1,
                40,
                90_000_000_000_000
            ))]
        );
    }

    #[test]
    fn test_list() {
        let array = ListArray::from_iter_primitive::<Int32Type, _, _>(vec![
            Some(vec![Some(1), None]),
            None,
            Some(vec![]),
        ]);
        assert_eq!(
            read_all(&array),
            vec![
                Scalar::List(vec![Scalar::Int32(1), Scalar::Null]),
                Scalar::Null,
                Scalar::List(vec![]),
            ]
        );
    }

    #[test]
    fn test_struct() {
        let array = StructArray::new(
            Fields::from(vec![
                Field::new("id", DataType::Int8, false),
                Field::new("name", DataType::Utf8, true),
            ]),
            vec![
                Arc::new(Int8Array::from(vec![1, 2])),
                Arc::new(StringArray::from(vec![Some("a"), None])),
            ],
            None,
        );
        assert_eq!(
            read_all(&array),
            vec![
                Scalar::Struct(vec![("id", Scalar::Int8(1)), ("name", Scalar::Utf8("a"))]),
                Scalar::Struct(vec![("id", Scalar::Int8(2)), ("name", Scalar::Null)]),
            ]
        );
    }

    #[test]
    fn test_map() {
        let mut builder = MapBuilder::new(None, StringBuilder::new(), Int32Builder::new());
        builder.keys().append_value("a");
        builder.values().append_value(1);
        builder.keys().append_value("b");
        builder.values().append_null();
        builder.append(true).unwrap();
        builder.append(false).unwrap();
        let array = builder.finish();
        assert_eq!(
            read_all(&array),
            vec![
                Scalar::Map(vec![
                    (Scalar::Utf8("a"), Scalar::Int32(1)),
                    (Scalar::Utf8("b"), Scalar::Null),
                ]),
                Scalar::Null,
            ]
        );
    }

    #[test]
    fn test_row_out_of_range() {
        let array = Int8Array::from(vec![1]);
        let decoder = ColumnDecoder::try_new(&array).unwrap();
        let err = decoder.read(1).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::RowOutOfRange { row: 1, len: 1 }));
        assert!(decoder.decode(5).is_err());
        assert!(decode(&array, 0).is_ok());
    }
}
