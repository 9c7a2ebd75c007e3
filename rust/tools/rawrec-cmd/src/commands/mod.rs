//! Command implementations for rawrec-cmd

use std::fs::File;
use std::io::{BufReader, Seek, SeekFrom};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow_json::reader::infer_json_schema_from_seekable;
use rawrec_records::ChunkedTable;

use crate::utils;

pub mod inspect;
pub mod records;

/// Number of leading records used to infer the schema of CSV and JSON inputs.
const INFER_SCHEMA_RECORDS: usize = 100;

/// Reads a whole input file into a table, choosing the reader by file extension.
pub fn load_table(path: &str) -> Result<ChunkedTable> {
    utils::validate_file_exists(path).with_context(|| format!("Invalid input file: {path}"))?;
    let file = File::open(path).with_context(|| format!("Failed to open file: {path}"))?;

    let table = match utils::file_extension(path).as_str() {
        "arrow" | "ipc" | "feather" => {
            let reader = arrow_ipc::reader::FileReader::try_new(file, None)
                .with_context(|| format!("Failed to open Arrow IPC file: {path}"))?;
            ChunkedTable::try_from_reader(reader)?
        }
        "arrows" => {
            let reader = arrow_ipc::reader::StreamReader::try_new(BufReader::new(file), None)
                .with_context(|| format!("Failed to open Arrow IPC stream: {path}"))?;
            ChunkedTable::try_from_reader(reader)?
        }
        "csv" => load_csv(file).with_context(|| format!("Failed to read CSV file: {path}"))?,
        "json" | "ndjson" | "jsonl" => {
            load_json(file).with_context(|| format!("Failed to read JSON file: {path}"))?
        }
        other => bail!("Unsupported file extension '{other}': {path}"),
    };

    log::debug!(
        "loaded {path}: {} rows in {} batches",
        rawrec_records::ColumnSet::num_rows(&table),
        table.batches().len()
    );
    Ok(table)
}

/// Reads all input files into one table. The files must share a schema.
pub fn load_tables(paths: &[String]) -> Result<ChunkedTable> {
    let mut paths = paths.iter();
    let Some(first) = paths.next() else {
        bail!("At least one input file is required");
    };
    let mut table = load_table(first)?;
    for path in paths {
        for batch in load_table(path)?.into_batches() {
            table
                .push(batch)
                .with_context(|| format!("Schema of {path} differs from {first}"))?;
        }
    }
    Ok(table)
}

fn load_csv(mut file: File) -> Result<ChunkedTable> {
    let format = arrow_csv::reader::Format::default().with_header(true);
    let (schema, _records_read) = format
        .infer_schema(&mut file, Some(INFER_SCHEMA_RECORDS))
        .context("Failed to infer CSV schema")?;
    file.seek(SeekFrom::Start(0))?;

    let reader = arrow_csv::ReaderBuilder::new(Arc::new(schema))
        .with_format(format)
        .build(file)?;
    Ok(ChunkedTable::try_from_reader(reader)?)
}

fn load_json(file: File) -> Result<ChunkedTable> {
    let mut buf_reader = BufReader::new(file);
    let (schema, _records_read) =
        infer_json_schema_from_seekable(&mut buf_reader, Some(INFER_SCHEMA_RECORDS))
            .context("Failed to infer JSON schema")?;

    let reader = arrow_json::ReaderBuilder::new(Arc::new(schema)).build(buf_reader)?;
    Ok(ChunkedTable::try_from_reader(reader)?)
}
