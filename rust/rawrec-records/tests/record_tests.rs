use std::sync::Arc;

use arrow_array::{
    ArrayRef, Decimal128Array, DictionaryArray, Int8Array, Int32Array, Int64Array,
    IntervalDayTimeArray, RecordBatch, StringArray,
    types::{Int8Type, Int16Type, Int32Type, Int64Type, UInt8Type, UInt32Type},
};
use arrow_buffer::{Buffer, IntervalDayTime, OffsetBuffer, ScalarBuffer};
use rawrec_common::error::ErrorKind;
use rawrec_records::{
    ChunkedTable, ColumnSet, RecordReaderBuilder, each_raw_record, raw_records, record_at,
    records, values::column_values,
};
use rawrec_scalar::{Decimal, Scalar};
use rawrec_testkit::{
    fixtures::{Fixture, all_fixtures, fixture_batch, fixture_rows},
    split::{dictionary_encode, random_batches},
};
use rayon::prelude::*;

fn rows_of<S: ColumnSet + ?Sized>(set: &S) -> Vec<Vec<Scalar<'_>>> {
    raw_records(set)
        .unwrap()
        .into_iter()
        .map(|row| row.into_values())
        .collect()
}

#[test]
fn test_column_values_match_fixtures() {
    for seed in [1, 2, 3] {
        for fixture in all_fixtures(seed, 64) {
            let values = column_values(fixture.array.as_ref()).unwrap();
            assert_eq!(values, fixture.expected, "fixture {}", fixture.name);
        }
    }
}

#[test]
fn test_records_match_fixture_rows() {
    let fixtures = all_fixtures(17, 100);
    let batch = fixture_batch(&fixtures);
    assert_eq!(rows_of(&batch), fixture_rows(&fixtures));
}

#[test]
fn test_empty_columns() {
    let fixtures = all_fixtures(4, 0);
    let batch = fixture_batch(&fixtures);
    assert!(rows_of(&batch).is_empty());
    for fixture in &fixtures {
        assert!(column_values(fixture.array.as_ref()).unwrap().is_empty());
    }
}

fn encode_with(key: usize, rng: &mut fastrand::Rng, fixture: &Fixture) -> ArrayRef {
    let array = fixture.array.as_ref();
    match key % 6 {
        0 => dictionary_encode::<Int8Type>(rng, array),
        1 => dictionary_encode::<Int16Type>(rng, array),
        2 => dictionary_encode::<Int32Type>(rng, array),
        3 => dictionary_encode::<Int64Type>(rng, array),
        4 => dictionary_encode::<UInt8Type>(rng, array),
        _ => dictionary_encode::<UInt32Type>(rng, array),
    }
}

#[test]
fn test_dictionary_encoding_is_transparent() {
    let mut rng = fastrand::Rng::with_seed(23);
    let fixtures = all_fixtures(23, 100);
    for (i, fixture) in fixtures.iter().enumerate() {
        if fixture.is_dictionary() {
            continue;
        }
        let encoded = encode_with(i, &mut rng, fixture);
        let values = column_values(encoded.as_ref()).unwrap();
        assert_eq!(values, fixture.expected, "fixture {}", fixture.name);
    }
}

#[test]
fn test_chunking_is_transparent() {
    let fixtures = all_fixtures(31, 200);
    let batch = fixture_batch(&fixtures);
    let expected = fixture_rows(&fixtures);
    for seed in 0..8 {
        let mut rng = fastrand::Rng::with_seed(seed);
        let table = ChunkedTable::from_batches(random_batches(&mut rng, &batch, 37)).unwrap();
        assert_eq!(table.num_rows(), batch.num_rows());
        assert_eq!(rows_of(&table), expected, "seed {seed}");
    }
}

#[test]
fn test_record_at_matches_traversal() {
    let fixtures = all_fixtures(8, 50);
    let batch = fixture_batch(&fixtures);
    let mut rng = fastrand::Rng::with_seed(8);
    let table = ChunkedTable::from_batches(random_batches(&mut rng, &batch, 9)).unwrap();
    let expected = fixture_rows(&fixtures);
    for row in [0, 1, 8, 9, 25, 49] {
        assert_eq!(record_at(&table, row).unwrap().values(), &expected[row][..]);
    }
    let err = record_at(&table, 50).unwrap_err();
    assert!(matches!(
        err.kind(),
        ErrorKind::RowOutOfRange { row: 50, len: 50 }
    ));
}

#[test]
fn test_traversal_is_repeatable() {
    let fixtures = all_fixtures(12, 40);
    let batch = fixture_batch(&fixtures);
    let first = rows_of(&batch);
    let second = rows_of(&batch);
    assert_eq!(first, second);

    let mut streamed = Vec::new();
    each_raw_record(&batch, |row| {
        streamed.push(row.into_values());
        Ok(())
    })
    .unwrap();
    assert_eq!(streamed, first);
}

#[test]
fn test_concurrent_traversals() {
    let fixtures = all_fixtures(99, 120);
    let batch = fixture_batch(&fixtures);
    let mut rng = fastrand::Rng::with_seed(99);
    let table = ChunkedTable::from_batches(random_batches(&mut rng, &batch, 16)).unwrap();
    let expected = fixture_rows(&fixtures);

    let results = (0..16)
        .into_par_iter()
        .map(|i| {
            let start = i * 7;
            RecordReaderBuilder::new(&table)
                .with_row_range(start..start + 8)
                .build()
                .unwrap()
                .map(|row| row.map(|row| row.into_values()))
                .collect::<Result<Vec<_>, _>>()
                .unwrap()
        })
        .collect::<Vec<_>>();

    for (i, rows) in results.iter().enumerate() {
        let start = i * 7;
        assert_eq!(rows[..], expected[start..start + 8]);
    }
}

#[test]
fn test_projection_over_fixtures() {
    let fixtures = all_fixtures(5, 30);
    let batch = fixture_batch(&fixtures);
    let rows = RecordReaderBuilder::new(&batch)
        .with_projection(["decimal128", "utf8"])
        .build()
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    let decimals = fixtures.iter().find(|f| f.name == "decimal128").unwrap();
    let texts = fixtures.iter().find(|f| f.name == "utf8").unwrap();
    for (row, values) in rows.iter().enumerate() {
        assert_eq!(
            values.values(),
            &[decimals.expected[row].clone(), texts.expected[row].clone()]
        );
    }
}

#[test]
fn test_decimal_scenario() {
    let array = Decimal128Array::from(vec![Some(9292), None, Some(-1)])
        .with_precision_and_scale(10, 2)
        .unwrap();
    let batch =
        RecordBatch::try_from_iter(vec![("amount", Arc::new(array) as ArrayRef)]).unwrap();
    let rows = rows_of(&batch);
    assert_eq!(rows[0], vec![Scalar::Decimal(Decimal::from_i128(9292, 10, 2))]);
    assert_eq!(rows[0][0].as_decimal().unwrap().to_string(), "92.92");
    assert_eq!(rows[1], vec![Scalar::Null]);
    assert_eq!(rows[2][0].as_decimal().unwrap().to_string(), "-0.01");
}

#[test]
fn test_interval_scenario() {
    let array = IntervalDayTimeArray::from(vec![IntervalDayTime::new(1, 100)]);
    let batch = RecordBatch::try_from_iter(vec![("gap", Arc::new(array) as ArrayRef)]).unwrap();
    assert_eq!(
        rows_of(&batch),
        vec![vec![Scalar::IntervalDayTime(IntervalDayTime::new(1, 100))]]
    );
}

#[test]
fn test_integer_extremes_scenario() {
    let small: ArrayRef = Arc::new(Int8Array::from(vec![i8::MIN, 0, i8::MAX]));
    let large: ArrayRef = Arc::new(Int64Array::from(vec![i64::MIN, 0, i64::MAX]));
    let batch = RecordBatch::try_from_iter(vec![("small", small), ("large", large)]).unwrap();
    assert_eq!(
        rows_of(&batch),
        vec![
            vec![Scalar::Int8(i8::MIN), Scalar::Int64(i64::MIN)],
            vec![Scalar::Int8(0), Scalar::Int64(0)],
            vec![Scalar::Int8(i8::MAX), Scalar::Int64(i64::MAX)],
        ]
    );
}

#[test]
fn test_schema_mismatch_is_rejected() {
    let ints: ArrayRef = Arc::new(Int64Array::from(vec![1]));
    let texts: ArrayRef = Arc::new(StringArray::from(vec!["a"]));
    let first = RecordBatch::try_from_iter(vec![("a", ints)]).unwrap();
    let second = RecordBatch::try_from_iter(vec![("a", texts)]).unwrap();
    let err = ChunkedTable::from_batches(vec![first, second]).unwrap_err();
    assert!(matches!(
        err.kind(),
        ErrorKind::SchemaMismatch { batch: 1, .. }
    ));
}

#[test]
fn test_iterator_reports_remaining() {
    let fixtures = all_fixtures(3, 10);
    let batch = fixture_batch(&fixtures);
    let mut iter = records(&batch).unwrap();
    assert_eq!(iter.remaining(), 10);
    iter.next().unwrap().unwrap();
    assert_eq!(iter.remaining(), 9);
    assert_eq!(iter.count(), 9);
}

/// Two batches; the second holds malformed UTF-8 at its second row (table row 3).
fn table_with_malformed_text() -> ChunkedTable {
    let ids: ArrayRef = Arc::new(Int32Array::from(vec![1, 2]));
    let names: ArrayRef = Arc::new(StringArray::from(vec!["a", "b"]));
    let first = RecordBatch::try_from_iter(vec![("id", ids), ("name", names)]).unwrap();

    let offsets = OffsetBuffer::new(ScalarBuffer::from(vec![0i32, 1, 3, 4]));
    let data = Buffer::from(&b"c\xff\xfed"[..]);
    // SAFETY: deliberately skips UTF-8 validation to produce malformed text.
    let names = unsafe { StringArray::new_unchecked(offsets, data, None) };
    let ids: ArrayRef = Arc::new(Int32Array::from(vec![3, 4, 5]));
    let second =
        RecordBatch::try_from_iter(vec![("id", ids), ("name", Arc::new(names) as ArrayRef)])
            .unwrap();
    ChunkedTable::from_batches(vec![first, second]).unwrap()
}

#[test]
fn test_malformed_text_aborts_traversal() {
    let table = table_with_malformed_text();
    let mut iter = records(&table).unwrap();
    assert_eq!(iter.size_hint(), (1, Some(5)));

    let rows = iter.by_ref().take(3).collect::<Result<Vec<_>, _>>().unwrap();
    assert_eq!(rows[2].values(), &[Scalar::Int32(3), Scalar::Utf8("c")]);

    let err = iter.next().unwrap().unwrap_err();
    match err.kind() {
        ErrorKind::Decode { column, row, .. } => {
            assert_eq!(column, "name");
            assert_eq!(*row, 3);
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert!(matches!(err.root_kind(), ErrorKind::InvalidUtf8 { row: 1, .. }));

    // Row 4 is never produced, even though it decodes fine.
    assert_eq!(iter.size_hint(), (0, Some(0)));
    assert!(iter.next().is_none());
    assert!(iter.next().is_none());
}

#[test]
fn test_malformed_text_stops_each_raw_record() {
    let table = table_with_malformed_text();
    let mut seen = Vec::new();
    let err = each_raw_record(&table, |row| {
        seen.push(row.values()[0].clone());
        Ok(())
    })
    .unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Decode { row: 3, .. }));
    assert!(matches!(err.root_kind(), ErrorKind::InvalidUtf8 { .. }));
    assert_eq!(
        seen,
        vec![Scalar::Int32(1), Scalar::Int32(2), Scalar::Int32(3)]
    );
}

#[test]
fn test_dictionary_per_batch() {
    let first: DictionaryArray<Int32Type> =
        vec![Some("Ruby"), None, Some("Go")].into_iter().collect();
    let second: DictionaryArray<Int32Type> =
        vec![Some("Rust"), Some("Rust"), Some("Zig")].into_iter().collect();
    let third: DictionaryArray<Int32Type> = vec![Some("Go")].into_iter().collect();
    let batches = [first, second, third]
        .into_iter()
        .map(|dict| {
            RecordBatch::try_from_iter(vec![("lang", Arc::new(dict) as ArrayRef)]).unwrap()
        })
        .collect::<Vec<_>>();
    let table = ChunkedTable::from_batches(batches).unwrap();

    assert_eq!(
        rows_of(&table),
        vec![
            vec![Scalar::Utf8("Ruby")],
            vec![Scalar::Null],
            vec![Scalar::Utf8("Go")],
            vec![Scalar::Utf8("Rust")],
            vec![Scalar::Utf8("Rust")],
            vec![Scalar::Utf8("Zig")],
            vec![Scalar::Utf8("Go")],
        ]
    );
    assert_eq!(record_at(&table, 5).unwrap().values(), &[Scalar::Utf8("Zig")]);
}
