//! Records command implementation

use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use rawrec_records::{ColumnSet, RecordReaderBuilder};
use serde_json::{Map, Value};

use super::load_tables;

/// Which rows and columns to print.
#[derive(Debug, Clone, Default)]
pub struct RecordsOptions {
    pub offset: usize,
    pub limit: Option<usize>,
    pub columns: Option<Vec<String>>,
}

pub fn run(options: RecordsOptions, files: Vec<String>) -> Result<()> {
    let table = load_tables(&files)?;
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let written = write_records(&table, &options, &mut out)?;
    out.flush()?;
    log::info!("printed {written} records");
    Ok(())
}

/// Writes the selected rows of `set` as JSON lines, returning the number of rows written.
///
/// An offset or limit past the end of the set is clamped to the available rows.
pub fn write_records<S: ColumnSet + ?Sized>(
    set: &S,
    options: &RecordsOptions,
    out: &mut impl Write,
) -> Result<usize> {
    let num_rows = set.num_rows();
    let start = options.offset.min(num_rows);
    let end = match options.limit {
        Some(limit) => start.saturating_add(limit).min(num_rows),
        None => num_rows,
    };

    let mut builder = RecordReaderBuilder::new(set).with_row_range(start..end);
    if let Some(columns) = &options.columns {
        builder = builder.with_projection(columns.iter().map(String::as_str));
    }
    let iter = builder.build().context("Invalid record selection")?;
    let names = iter
        .column_names()
        .iter()
        .map(|name| name.to_string())
        .collect::<Vec<_>>();

    let mut count = 0;
    for row in iter {
        let row = row.with_context(|| format!("Failed to decode row {}", start + count))?;
        let object = names
            .iter()
            .cloned()
            .zip(row.values().iter().map(|value| value.to_json()))
            .collect::<Map<String, Value>>();
        serde_json::to_writer(&mut *out, &Value::Object(object))?;
        out.write_all(b"\n")?;
        count += 1;
    }
    Ok(count)
}
