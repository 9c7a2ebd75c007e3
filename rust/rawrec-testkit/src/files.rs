//! Temporary data files in the formats the command-line tool reads.

use std::io::{Seek, SeekFrom};

use arrow_array::RecordBatch;
use tempfile::NamedTempFile;

fn temp_file(suffix: &str) -> anyhow::Result<NamedTempFile> {
    Ok(tempfile::Builder::new()
        .prefix("rawrec-")
        .suffix(suffix)
        .tempfile()?)
}

fn schema_of(batches: &[RecordBatch]) -> anyhow::Result<arrow_schema::SchemaRef> {
    batches
        .first()
        .map(RecordBatch::schema)
        .ok_or_else(|| anyhow::anyhow!("at least one batch is required"))
}

/// Writes `batches` as an Arrow IPC file (`.arrow`).
pub fn write_ipc_file(batches: &[RecordBatch]) -> anyhow::Result<NamedTempFile> {
    let schema = schema_of(batches)?;
    let mut file = temp_file(".arrow")?;
    let mut writer = arrow_ipc::writer::FileWriter::try_new(&mut file, &schema)?;
    for batch in batches {
        writer.write(batch)?;
    }
    writer.finish()?;
    drop(writer);
    file.seek(SeekFrom::Start(0))?;
    Ok(file)
}

/// Writes `batches` as an Arrow IPC stream (`.arrows`).
pub fn write_ipc_stream(batches: &[RecordBatch]) -> anyhow::Result<NamedTempFile> {
    let schema = schema_of(batches)?;
    let mut file = temp_file(".arrows")?;
    let mut writer = arrow_ipc::writer::StreamWriter::try_new(&mut file, &schema)?;
    for batch in batches {
        writer.write(batch)?;
    }
    writer.finish()?;
    drop(writer);
    file.seek(SeekFrom::Start(0))?;
    Ok(file)
}

/// Writes `batches` as newline-delimited JSON (`.ndjson`).
pub fn write_ndjson_file(batches: &[RecordBatch]) -> anyhow::Result<NamedTempFile> {
    let mut file = temp_file(".ndjson")?;
    let mut writer = arrow_json::LineDelimitedWriter::new(&mut file);
    writer.write_batches(&batches.iter().collect::<Vec<_>>())?;
    writer.finish()?;
    drop(writer);
    file.seek(SeekFrom::Start(0))?;
    Ok(file)
}

/// Writes `batches` as CSV with a header line (`.csv`).
pub fn write_csv_file(batches: &[RecordBatch]) -> anyhow::Result<NamedTempFile> {
    let mut file = temp_file(".csv")?;
    let mut writer = arrow_csv::Writer::new(&mut file);
    for batch in batches {
        writer.write(batch)?;
    }
    drop(writer);
    file.seek(SeekFrom::Start(0))?;
    Ok(file)
}

/// Writes `text` verbatim to a file with the given suffix.
pub fn write_text_file(suffix: &str, text: &str) -> anyhow::Result<NamedTempFile> {
    use std::io::Write;

    let mut file = temp_file(suffix)?;
    file.write_all(text.as_bytes())?;
    file.flush()?;
    file.seek(SeekFrom::Start(0))?;
    Ok(file)
}
