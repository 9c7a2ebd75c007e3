//! Inspect command implementation

use std::sync::Arc;

use anyhow::{Context, Result};
use arrow_array::{Array, ArrayRef, cast::AsArray};
use rawrec_records::{ChunkedColumn, ColumnSet, PhysicalKind};
use serde::Serialize;

use super::load_table;

#[derive(Serialize)]
struct InspectSummary {
    file: String,
    row_count: usize,
    batch_count: usize,
    batch_row_counts: Vec<usize>,
    columns: Vec<ColumnInfo>,
}

#[derive(Serialize)]
struct ColumnInfo {
    name: String,
    #[serde(rename = "type")]
    data_type: String,
    kind: String,
    nullable: bool,
    null_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    dictionary_size: Option<usize>,
}

pub fn run(files: Vec<String>) -> Result<()> {
    let summaries = files
        .iter()
        .map(|file| summarize(file))
        .collect::<Result<Vec<_>>>()?;
    let json =
        serde_json::to_string_pretty(&summaries).context("Failed to serialize summary")?;
    println!("{json}");
    Ok(())
}

fn summarize(file: &str) -> Result<InspectSummary> {
    let table = load_table(file)?;
    summarize_set(file, &table)
}

fn summarize_set<S: ColumnSet + ?Sized>(file: &str, set: &S) -> Result<InspectSummary> {
    let batch_row_counts = (0..set.num_batches())
        .filter_map(|i| set.batch(i).map(|batch| batch.num_rows()))
        .collect();

    let columns = set
        .schema()
        .fields()
        .iter()
        .map(|field| -> Result<ColumnInfo> {
            let kind = PhysicalKind::try_from(field.data_type())
                .map(|kind| kind.to_string())
                .unwrap_or_else(|e| format!("unsupported ({e})"));
            let column = set.column(field.name())?;
            Ok(ColumnInfo {
                name: field.name().clone(),
                data_type: field.data_type().to_string(),
                kind,
                nullable: field.is_nullable(),
                null_count: null_count(&column),
                dictionary_size: dictionary_size(&column),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(InspectSummary {
        file: file.to_string(),
        row_count: set.num_rows(),
        batch_count: set.num_batches(),
        batch_row_counts,
        columns,
    })
}

fn null_count(column: &ChunkedColumn) -> usize {
    column
        .chunks()
        .iter()
        .map(|chunk| chunk.logical_null_count())
        .sum()
}

/// Number of dictionary entries of a dictionary-encoded column. Chunks sliced from one
/// array share their dictionary, which is counted once.
fn dictionary_size(column: &ChunkedColumn) -> Option<usize> {
    let mut dictionaries: Vec<&ArrayRef> = Vec::new();
    for chunk in column.chunks() {
        let values = chunk.as_any_dictionary_opt()?.values();
        if !dictionaries.iter().any(|seen| Arc::ptr_eq(seen, values)) {
            dictionaries.push(values);
        }
    }
    if dictionaries.is_empty() {
        return None;
    }
    Some(dictionaries.iter().map(|values| values.len()).sum())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow_array::{DictionaryArray, Int64Array, RecordBatch, types::Int8Type};
    use rawrec_records::ChunkedTable;

    #[test]
    fn test_summary() {
        let ids: ArrayRef = Arc::new(Int64Array::from(vec![Some(1), None, Some(3)]));
        let langs: ArrayRef = Arc::new(
            vec![Some("Ruby"), None, Some("Ruby")]
                .into_iter()
                .collect::<DictionaryArray<Int8Type>>(),
        );
        let batch = RecordBatch::try_from_iter(vec![("id", ids), ("lang", langs)]).unwrap();
        let table = ChunkedTable::from_batches(vec![batch.slice(0, 1), batch.slice(1, 2)]).unwrap();

        let summary = summarize_set("memory", &table).unwrap();
        assert_eq!(summary.row_count, 3);
        assert_eq!(summary.batch_count, 2);
        assert_eq!(summary.batch_row_counts, vec![1, 2]);
        assert_eq!(summary.columns[0].kind, "int64");
        assert_eq!(summary.columns[0].null_count, 1);
        assert_eq!(summary.columns[0].dictionary_size, None);
        assert_eq!(summary.columns[1].null_count, 1);
        assert_eq!(summary.columns[1].dictionary_size, Some(1));

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["columns"][1]["name"], "lang");
    }

    #[test]
    fn test_shared_dictionary_counted_once() {
        let langs: ArrayRef = Arc::new(
            vec![Some("Ruby"), Some("Go"), Some("Ruby")]
                .into_iter()
                .collect::<DictionaryArray<Int8Type>>(),
        );
        let batch = RecordBatch::try_from_iter(vec![("lang", langs)]).unwrap();
        let slices = (0..3).map(|row| batch.slice(row, 1)).collect();
        let table = ChunkedTable::from_batches(slices).unwrap();

        let summary = summarize_set("memory", &table).unwrap();
        assert_eq!(summary.columns[0].dictionary_size, Some(2));
    }

    #[test]
    fn test_distinct_dictionaries_are_added() {
        let first: ArrayRef = Arc::new(
            vec![Some("Ruby"), Some("Go")]
                .into_iter()
                .collect::<DictionaryArray<Int8Type>>(),
        );
        let second: ArrayRef = Arc::new(
            vec![Some("Rust")]
                .into_iter()
                .collect::<DictionaryArray<Int8Type>>(),
        );
        let table = ChunkedTable::from_batches(vec![
            RecordBatch::try_from_iter(vec![("lang", first)]).unwrap(),
            RecordBatch::try_from_iter(vec![("lang", second)]).unwrap(),
        ])
        .unwrap();

        let summary = summarize_set("memory", &table).unwrap();
        assert_eq!(summary.columns[0].dictionary_size, Some(3));
    }
}
