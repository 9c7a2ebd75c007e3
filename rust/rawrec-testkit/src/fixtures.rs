//! Per-kind column fixtures.
//!
//! Each generator builds an Arrow array of one physical kind with nulls interspersed,
//! together with the scalars the array must decode to. Generators are driven by a
//! seeded [`fastrand::Rng`], so a failing case can be reproduced from its seed.
//!
//! Floating-point fixtures never contain NaN, since `Scalar` equality follows IEEE
//! semantics.

use std::sync::Arc;

use arrow_array::{
    Array, ArrayRef, BinaryArray, BooleanArray, Date32Array, Date64Array, Decimal128Array,
    Decimal256Array, DictionaryArray, DurationMillisecondArray, DurationNanosecondArray,
    FixedSizeBinaryArray, FixedSizeListArray, Float16Array, Float32Array, Float64Array,
    Int8Array, Int16Array, Int32Array, Int64Array, IntervalDayTimeArray,
    IntervalMonthDayNanoArray, IntervalYearMonthArray, LargeBinaryArray, LargeListArray,
    LargeStringArray, ListArray, NullArray, RecordBatch, StringArray, StructArray,
    Time32MillisecondArray, Time32SecondArray, Time64MicrosecondArray, Time64NanosecondArray,
    TimestampMicrosecondArray, TimestampMillisecondArray, TimestampNanosecondArray,
    TimestampSecondArray, UInt8Array, UInt16Array, UInt32Array, UInt64Array,
    builder::{Int64Builder, MapBuilder, StringBuilder},
    types::{Int8Type, Int32Type, UInt16Type},
};
use arrow_buffer::{IntervalDayTime, IntervalMonthDayNano, NullBuffer, i256};
use arrow_schema::{DataType, Field, Fields, TimeUnit};
use fastrand::Rng;
use half::f16;
use rawrec_scalar::{
    Decimal, Scalar,
    temporal::{Date32, Date64, Duration, TimeOfDay, Timestamp},
};

/// Text values used by the text, map and dictionary fixtures.
pub static WORDS: &[&str] = &[
    "",
    "a",
    "Ruby",
    "\u{3042}",
    "na\u{ef}ve",
    "multi word text",
    "\u{1f980}",
];

static BYTES: &[&[u8]] = &[b"", b"\x00", b"\xff\xfe", b"abc", b"\x00\x01\x02\x03"];

static FIXED: &[[u8; 3]] = &[[1, 2, 3], [0, 0, 0], [255, 254, 253]];

/// A column together with its expected decoded values.
pub struct Fixture {
    pub name: &'static str,
    pub array: ArrayRef,
    pub expected: Vec<Scalar<'static>>,
}

impl Fixture {
    pub fn new(
        name: &'static str,
        array: impl Array + 'static,
        expected: Vec<Scalar<'static>>,
    ) -> Fixture {
        assert_eq!(array.len(), expected.len(), "fixture {name}");
        Fixture {
            name,
            array: Arc::new(array),
            expected,
        }
    }

    pub fn is_dictionary(&self) -> bool {
        matches!(self.array.data_type(), DataType::Dictionary(_, _))
    }
}

pub type Generator = fn(&mut Rng, usize) -> Fixture;

/// One generator per physical kind.
pub static GENERATORS: &[Generator] = &[
    null,
    boolean,
    int8,
    int16,
    int32,
    int64,
    uint8,
    uint16,
    uint32,
    uint64,
    float16,
    float32,
    float64,
    binary,
    large_binary,
    fixed_size_binary,
    utf8,
    large_utf8,
    date32,
    date64,
    timestamp_second,
    timestamp_millisecond,
    timestamp_microsecond,
    timestamp_nanosecond,
    time32_second,
    time32_millisecond,
    time64_microsecond,
    time64_nanosecond,
    duration_millisecond,
    duration_nanosecond,
    decimal128,
    decimal256,
    interval_year_month,
    interval_day_time,
    interval_month_day_nano,
    list,
    large_list,
    fixed_size_list,
    structure,
    map,
    dictionary_utf8,
    dictionary_int64,
];

/// Runs every generator with the same seeded generator and column length.
pub fn all_fixtures(seed: u64, len: usize) -> Vec<Fixture> {
    let mut rng = Rng::with_seed(seed);
    GENERATORS
        .iter()
        .map(|generate| generate(&mut rng, len))
        .collect()
}

/// Combines fixtures of equal length into one batch, one column per fixture.
pub fn fixture_batch(fixtures: &[Fixture]) -> RecordBatch {
    RecordBatch::try_from_iter(
        fixtures
            .iter()
            .map(|fixture| (fixture.name, Arc::clone(&fixture.array))),
    )
    .expect("fixtures of equal length")
}

/// Expected rows of [`fixture_batch`], one vector of scalars per row.
pub fn fixture_rows(fixtures: &[Fixture]) -> Vec<Vec<Scalar<'static>>> {
    let len = fixtures.first().map_or(0, |fixture| fixture.expected.len());
    (0..len)
        .map(|row| {
            fixtures
                .iter()
                .map(|fixture| fixture.expected[row].clone())
                .collect()
        })
        .collect()
}

fn present(rng: &mut Rng) -> bool {
    rng.u8(..4) != 0
}

fn options<T>(rng: &mut Rng, len: usize, mut value: impl FnMut(&mut Rng) -> T) -> Vec<Option<T>> {
    (0..len)
        .map(|_| if present(rng) { Some(value(rng)) } else { None })
        .collect()
}

/// Picks one of `edges` one time in eight, otherwise calls `value`.
fn edge<T: Copy>(rng: &mut Rng, edges: &[T], value: impl FnOnce(&mut Rng) -> T) -> T {
    if rng.u8(..8) == 0 {
        edges[rng.usize(..edges.len())]
    } else {
        value(rng)
    }
}

fn expect<T: Copy>(
    values: &[Option<T>],
    to_scalar: impl Fn(T) -> Scalar<'static>,
) -> Vec<Scalar<'static>> {
    values
        .iter()
        .map(|value| value.map_or(Scalar::Null, &to_scalar))
        .collect()
}

fn null(_: &mut Rng, len: usize) -> Fixture {
    Fixture::new("null", NullArray::new(len), vec![Scalar::Null; len])
}

fn boolean(rng: &mut Rng, len: usize) -> Fixture {
    let values = options(rng, len, |rng| rng.bool());
    Fixture::new(
        "boolean",
        BooleanArray::from(values.clone()),
        expect(&values, Scalar::Boolean),
    )
}

macro_rules! integer_fixture {
    ($name:ident, $array:ty, $native:ident, $variant:ident) => {
        fn $name(rng: &mut Rng, len: usize) -> Fixture {
            let values = options(rng, len, |rng| {
                edge(rng, &[$native::MIN, $native::MAX, 0], |rng| rng.$native(..))
            });
            Fixture::new(
                stringify!($name),
                <$array>::from(values.clone()),
                expect(&values, Scalar::$variant),
            )
        }
    };
}

integer_fixture!(int8, Int8Array, i8, Int8);
integer_fixture!(int16, Int16Array, i16, Int16);
integer_fixture!(int32, Int32Array, i32, Int32);
integer_fixture!(int64, Int64Array, i64, Int64);
integer_fixture!(uint8, UInt8Array, u8, UInt8);
integer_fixture!(uint16, UInt16Array, u16, UInt16);
integer_fixture!(uint32, UInt32Array, u32, UInt32);
integer_fixture!(uint64, UInt64Array, u64, UInt64);

fn float16(rng: &mut Rng, len: usize) -> Fixture {
    let values = options(rng, len, |rng| {
        edge(rng, &[f16::MIN, f16::MAX, f16::NEG_ZERO, f16::INFINITY], |rng| {
            f16::from_f32(rng.f32() * 100.0 - 50.0)
        })
    });
    Fixture::new(
        "float16",
        Float16Array::from(values.clone()),
        expect(&values, Scalar::Float16),
    )
}

fn float32(rng: &mut Rng, len: usize) -> Fixture {
    let values = options(rng, len, |rng| {
        edge(
            rng,
            &[f32::MIN, f32::MAX, -0.0, f32::MIN_POSITIVE, f32::NEG_INFINITY],
            |rng| rng.f32() * 1e6 - 5e5,
        )
    });
    Fixture::new(
        "float32",
        Float32Array::from(values.clone()),
        expect(&values, Scalar::Float32),
    )
}

fn float64(rng: &mut Rng, len: usize) -> Fixture {
    let values = options(rng, len, |rng| {
        edge(
            rng,
            &[f64::MIN, f64::MAX, -0.0, f64::MIN_POSITIVE, f64::INFINITY],
            |rng| rng.f64() * 1e12 - 5e11,
        )
    });
    Fixture::new(
        "float64",
        Float64Array::from(values.clone()),
        expect(&values, Scalar::Float64),
    )
}

fn binary(rng: &mut Rng, len: usize) -> Fixture {
    let values = options(rng, len, |rng| BYTES[rng.usize(..BYTES.len())]);
    Fixture::new(
        "binary",
        BinaryArray::from(values.clone()),
        expect(&values, Scalar::Binary),
    )
}

fn large_binary(rng: &mut Rng, len: usize) -> Fixture {
    let values = options(rng, len, |rng| BYTES[rng.usize(..BYTES.len())]);
    Fixture::new(
        "large_binary",
        LargeBinaryArray::from(values.clone()),
        expect(&values, Scalar::Binary),
    )
}

fn fixed_size_binary(rng: &mut Rng, len: usize) -> Fixture {
    let values = options(rng, len, |rng| &FIXED[rng.usize(..FIXED.len())][..]);
    let array = FixedSizeBinaryArray::try_from_sparse_iter_with_size(values.iter().copied(), 3)
        .expect("fixed size binary fixture");
    Fixture::new("fixed_size_binary", array, expect(&values, Scalar::Binary))
}

fn utf8(rng: &mut Rng, len: usize) -> Fixture {
    let values = options(rng, len, |rng| WORDS[rng.usize(..WORDS.len())]);
    Fixture::new(
        "utf8",
        StringArray::from(values.clone()),
        expect(&values, Scalar::Utf8),
    )
}

fn large_utf8(rng: &mut Rng, len: usize) -> Fixture {
    let values = options(rng, len, |rng| WORDS[rng.usize(..WORDS.len())]);
    Fixture::new(
        "large_utf8",
        LargeStringArray::from(values.clone()),
        expect(&values, Scalar::Utf8),
    )
}

fn date32(rng: &mut Rng, len: usize) -> Fixture {
    let values = options(rng, len, |rng| {
        edge(rng, &[0, -1, 18_262, i32::MIN, i32::MAX], |rng| {
            rng.i32(-100_000..100_000)
        })
    });
    Fixture::new(
        "date32",
        Date32Array::from(values.clone()),
        expect(&values, |days| Scalar::Date32(Date32::new(days))),
    )
}

fn date64(rng: &mut Rng, len: usize) -> Fixture {
    // Not necessarily multiples of a day.
    let values = options(rng, len, |rng| {
        edge(rng, &[0, -1, 86_400_000], |rng| {
            rng.i64(-1_000_000_000_000..1_000_000_000_000)
        })
    });
    Fixture::new(
        "date64",
        Date64Array::from(values.clone()),
        expect(&values, |millis| Scalar::Date64(Date64::new(millis))),
    )
}

macro_rules! timestamp_fixture {
    ($name:ident, $array:ty, $unit:expr, $timezone:expr) => {
        fn $name(rng: &mut Rng, len: usize) -> Fixture {
            let timezone: Option<&'static str> = $timezone;
            let values = options(rng, len, |rng| {
                edge(rng, &[0, -1, i64::MIN, i64::MAX], |rng| {
                    rng.i64(-(1 << 50)..(1 << 50))
                })
            });
            Fixture::new(
                stringify!($name),
                <$array>::from(values.clone()).with_timezone_opt(timezone),
                expect(&values, |value| {
                    Scalar::Timestamp(Timestamp::new(value, $unit, timezone))
                }),
            )
        }
    };
}

timestamp_fixture!(timestamp_second, TimestampSecondArray, TimeUnit::Second, None);
timestamp_fixture!(
    timestamp_millisecond,
    TimestampMillisecondArray,
    TimeUnit::Millisecond,
    Some("UTC")
);
timestamp_fixture!(
    timestamp_microsecond,
    TimestampMicrosecondArray,
    TimeUnit::Microsecond,
    Some("+05:30")
);
timestamp_fixture!(
    timestamp_nanosecond,
    TimestampNanosecondArray,
    TimeUnit::Nanosecond,
    None
);

macro_rules! time_fixture {
    ($name:ident, $array:ty, $native:ident, $unit:expr, $per_day:expr) => {
        fn $name(rng: &mut Rng, len: usize) -> Fixture {
            // Values past midnight are kept: they must decode literally.
            let values = options(rng, len, |rng| {
                edge(rng, &[0, $per_day - 1, $per_day + 1], |rng| {
                    rng.$native(0..$per_day)
                })
            });
            Fixture::new(
                stringify!($name),
                <$array>::from(values.clone()),
                expect(&values, |value| {
                    Scalar::Time(TimeOfDay::new(i64::from(value), $unit))
                }),
            )
        }
    };
}

time_fixture!(time32_second, Time32SecondArray, i32, TimeUnit::Second, 86_400);
time_fixture!(
    time32_millisecond,
    Time32MillisecondArray,
    i32,
    TimeUnit::Millisecond,
    86_400_000
);
time_fixture!(
    time64_microsecond,
    Time64MicrosecondArray,
    i64,
    TimeUnit::Microsecond,
    86_400_000_000
);
time_fixture!(
    time64_nanosecond,
    Time64NanosecondArray,
    i64,
    TimeUnit::Nanosecond,
    86_400_000_000_000
);

macro_rules! duration_fixture {
    ($name:ident, $array:ty, $unit:expr) => {
        fn $name(rng: &mut Rng, len: usize) -> Fixture {
            let values = options(rng, len, |rng| {
                edge(rng, &[0, i64::MIN, i64::MAX], |rng| rng.i64(..))
            });
            Fixture::new(
                stringify!($name),
                <$array>::from(values.clone()),
                expect(&values, |value| Scalar::Duration(Duration::new(value, $unit))),
            )
        }
    };
}

duration_fixture!(duration_millisecond, DurationMillisecondArray, TimeUnit::Millisecond);
duration_fixture!(duration_nanosecond, DurationNanosecondArray, TimeUnit::Nanosecond);

fn decimal128(rng: &mut Rng, len: usize) -> Fixture {
    let values = options(rng, len, |rng| {
        edge(rng, &[0, 9292, -1, i128::MIN, i128::MAX], |rng| {
            i128::from(rng.i64(..))
        })
    });
    let array = Decimal128Array::from(values.clone())
        .with_precision_and_scale(38, 4)
        .expect("decimal128 fixture");
    Fixture::new(
        "decimal128",
        array,
        expect(&values, |value| Scalar::Decimal(Decimal::from_i128(value, 38, 4))),
    )
}

fn decimal256(rng: &mut Rng, len: usize) -> Fixture {
    let values = options(rng, len, |rng| {
        edge(rng, &[i256::ZERO, i256::MINUS_ONE, i256::MIN, i256::MAX], |rng| {
            i256::from_i128(rng.i128(..))
        })
    });
    let array = Decimal256Array::from(values.clone())
        .with_precision_and_scale(76, 10)
        .expect("decimal256 fixture");
    Fixture::new(
        "decimal256",
        array,
        expect(&values, |value| Scalar::Decimal(Decimal::new(value, 76, 10))),
    )
}

fn interval_year_month(rng: &mut Rng, len: usize) -> Fixture {
    let values = options(rng, len, |rng| rng.i32(-1200..1200));
    Fixture::new(
        "interval_year_month",
        IntervalYearMonthArray::from(values.clone()),
        expect(&values, Scalar::IntervalYearMonth),
    )
}

fn interval_day_time(rng: &mut Rng, len: usize) -> Fixture {
    // Milliseconds beyond one day stay unnormalized.
    let values = options(rng, len, |rng| {
        edge(rng, &[IntervalDayTime::new(1, 100)], |rng| {
            IntervalDayTime::new(rng.i32(-1000..1000), rng.i32(-200_000_000..200_000_000))
        })
    });
    Fixture::new(
        "interval_day_time",
        IntervalDayTimeArray::from(values.clone()),
        expect(&values, Scalar::IntervalDayTime),
    )
}

fn interval_month_day_nano(rng: &mut Rng, len: usize) -> Fixture {
    let values = options(rng, len, |rng| {
        IntervalMonthDayNano::new(rng.i32(-100..100), rng.i32(-400..400), rng.i64(..))
    });
    Fixture::new(
        "interval_month_day_nano",
        IntervalMonthDayNanoArray::from(values.clone()),
        expect(&values, Scalar::IntervalMonthDayNano),
    )
}

fn list_items(rng: &mut Rng, len: usize) -> Vec<Option<Vec<Option<i32>>>> {
    options(rng, len, |rng| {
        let items = rng.usize(..4);
        options(rng, items, |rng| rng.i32(..))
    })
}

fn expect_list(values: &[Option<Vec<Option<i32>>>]) -> Vec<Scalar<'static>> {
    values
        .iter()
        .map(|value| match value {
            Some(items) => Scalar::List(
                items
                    .iter()
                    .map(|item| item.map_or(Scalar::Null, Scalar::Int32))
                    .collect(),
            ),
            None => Scalar::Null,
        })
        .collect()
}

fn list(rng: &mut Rng, len: usize) -> Fixture {
    let values = list_items(rng, len);
    Fixture::new(
        "list",
        ListArray::from_iter_primitive::<Int32Type, _, _>(values.clone()),
        expect_list(&values),
    )
}

fn large_list(rng: &mut Rng, len: usize) -> Fixture {
    let values = list_items(rng, len);
    Fixture::new(
        "large_list",
        LargeListArray::from_iter_primitive::<Int32Type, _, _>(values.clone()),
        expect_list(&values),
    )
}

fn fixed_size_list(rng: &mut Rng, len: usize) -> Fixture {
    let values = options(rng, len, |rng| options(rng, 2, |rng| rng.i32(..)));
    Fixture::new(
        "fixed_size_list",
        FixedSizeListArray::from_iter_primitive::<Int32Type, _, _>(values.clone(), 2),
        expect_list(&values),
    )
}

fn structure(rng: &mut Rng, len: usize) -> Fixture {
    let ids = options(rng, len, |rng| rng.i64(..));
    let names = options(rng, len, |rng| WORDS[rng.usize(..WORDS.len())]);
    let validity = (0..len).map(|_| present(rng)).collect::<Vec<_>>();
    let array = StructArray::try_new(
        Fields::from(vec![
            Field::new("id", DataType::Int64, true),
            Field::new("name", DataType::Utf8, true),
        ]),
        vec![
            Arc::new(Int64Array::from(ids.clone())) as ArrayRef,
            Arc::new(StringArray::from(names.clone())) as ArrayRef,
        ],
        Some(NullBuffer::from(validity.clone())),
    )
    .expect("struct fixture");
    let expected = (0..len)
        .map(|row| {
            if validity[row] {
                Scalar::Struct(vec![
                    ("id", ids[row].map_or(Scalar::Null, Scalar::Int64)),
                    ("name", names[row].map_or(Scalar::Null, Scalar::Utf8)),
                ])
            } else {
                Scalar::Null
            }
        })
        .collect();
    Fixture::new("struct", array, expected)
}

fn map(rng: &mut Rng, len: usize) -> Fixture {
    let mut builder = MapBuilder::new(None, StringBuilder::new(), Int64Builder::new());
    let mut expected = Vec::with_capacity(len);
    for _ in 0..len {
        if !present(rng) {
            builder.append(false).expect("map fixture");
            expected.push(Scalar::Null);
            continue;
        }
        let mut entries = Vec::new();
        for _ in 0..rng.usize(..4) {
            let key = WORDS[rng.usize(..WORDS.len())];
            let value = present(rng).then(|| rng.i64(..));
            builder.keys().append_value(key);
            builder.values().append_option(value);
            entries.push((Scalar::Utf8(key), value.map_or(Scalar::Null, Scalar::Int64)));
        }
        builder.append(true).expect("map fixture");
        expected.push(Scalar::Map(entries));
    }
    Fixture::new("map", builder.finish(), expected)
}

fn dictionary_utf8(rng: &mut Rng, len: usize) -> Fixture {
    // The dictionary holds a null of its own next to the index nulls.
    let dictionary = [None, Some("Ruby"), Some("\u{3042}"), Some("")];
    let keys = options(rng, len, |rng| rng.i8(0..dictionary.len() as i8));
    let array = DictionaryArray::<Int8Type>::try_new(
        Int8Array::from(keys.clone()),
        Arc::new(StringArray::from(dictionary.to_vec())),
    )
    .expect("dictionary fixture");
    let expected = keys
        .iter()
        .map(|key| match key.and_then(|key| dictionary[key as usize]) {
            Some(text) => Scalar::Utf8(text),
            None => Scalar::Null,
        })
        .collect();
    Fixture::new("dictionary_utf8", array, expected)
}

fn dictionary_int64(rng: &mut Rng, len: usize) -> Fixture {
    let dictionary = [i64::MIN, 0, 42, i64::MAX];
    let keys = options(rng, len, |rng| rng.u16(0..dictionary.len() as u16));
    let array = DictionaryArray::<UInt16Type>::try_new(
        UInt16Array::from(keys.clone()),
        Arc::new(Int64Array::from(dictionary.to_vec())),
    )
    .expect("dictionary fixture");
    Fixture::new(
        "dictionary_int64",
        array,
        expect(&keys, |key| Scalar::Int64(dictionary[key as usize])),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_are_consistent() {
        for fixture in all_fixtures(7, 50) {
            assert_eq!(fixture.array.len(), 50, "{}", fixture.name);
            assert_eq!(fixture.expected.len(), 50, "{}", fixture.name);
        }
    }

    #[test]
    fn test_fixture_batch_shape() {
        let fixtures = all_fixtures(1, 10);
        let batch = fixture_batch(&fixtures);
        assert_eq!(batch.num_columns(), GENERATORS.len());
        assert_eq!(batch.num_rows(), 10);
        let rows = fixture_rows(&fixtures);
        assert_eq!(rows.len(), 10);
        assert!(rows.iter().all(|row| row.len() == GENERATORS.len()));
    }

    #[test]
    fn test_same_seed_same_fixtures() {
        let a = all_fixtures(3, 20);
        let b = all_fixtures(3, 20);
        for (a, b) in a.iter().zip(&b) {
            assert_eq!(a.expected, b.expected, "{}", a.name);
        }
    }
}
