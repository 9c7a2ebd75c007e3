//! A table made of several same-schema record batches.

use arrow_array::{RecordBatch, RecordBatchReader};
use arrow_schema::{Schema, SchemaRef};
use rawrec_common::{Result, error::Error, result::verify_row};

use crate::column_set::{ColumnSet, RowLocation};

/// An ordered sequence of record batches sharing one schema, addressed as one
/// continuous row space.
///
/// The table owns reference-counted handles to the batches; cloning the table does not
/// copy column data. Empty batches are allowed and never produce rows.
#[derive(Debug, Clone)]
pub struct ChunkedTable {
    schema: SchemaRef,
    batches: Vec<RecordBatch>,
    /// `ends[i]` is the table row one past the last row of batch `i`.
    ends: Vec<usize>,
}

impl ChunkedTable {
    /// Creates a table from `batches`, verifying that every batch has exactly the
    /// column names and data types of `schema`, in the same order.
    ///
    /// # Errors
    ///
    /// `SchemaMismatch` naming the first offending batch.
    pub fn try_new(
        schema: SchemaRef,
        batches: impl IntoIterator<Item = RecordBatch>,
    ) -> Result<ChunkedTable> {
        let mut table = ChunkedTable {
            schema,
            batches: Vec::new(),
            ends: Vec::new(),
        };
        for batch in batches {
            table.push(batch)?;
        }
        Ok(table)
    }

    /// Creates a table from a non-empty list of batches, taking the schema from the
    /// first one.
    pub fn from_batches(batches: Vec<RecordBatch>) -> Result<ChunkedTable> {
        let schema = batches
            .first()
            .map(|batch| batch.schema())
            .ok_or_else(|| Error::invalid_arg("batches", "cannot infer a schema from no batches"))?;
        ChunkedTable::try_new(schema, batches)
    }

    /// Drains `reader` into a table.
    pub fn try_from_reader(reader: impl RecordBatchReader) -> Result<ChunkedTable> {
        let schema = reader.schema();
        let batches = reader
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::arrow("reading record batches", e))?;
        ChunkedTable::try_new(schema, batches)
    }

    /// An empty table with no batches.
    pub fn empty(schema: SchemaRef) -> ChunkedTable {
        ChunkedTable {
            schema,
            batches: Vec::new(),
            ends: Vec::new(),
        }
    }

    /// Appends a batch to the end of the table.
    pub fn push(&mut self, batch: RecordBatch) -> Result<()> {
        check_schema(self.batches.len(), &self.schema, batch.schema_ref())?;
        let end = self.num_rows() + batch.num_rows();
        self.ends.push(end);
        self.batches.push(batch);
        Ok(())
    }

    pub fn batches(&self) -> &[RecordBatch] {
        &self.batches
    }

    pub fn into_batches(self) -> Vec<RecordBatch> {
        self.batches
    }
}

fn check_schema(index: usize, expected: &Schema, actual: &Schema) -> Result<()> {
    if expected.fields().len() != actual.fields().len() {
        return Err(Error::schema_mismatch(
            index,
            format!(
                "expected {} columns, found {}",
                expected.fields().len(),
                actual.fields().len()
            ),
        ));
    }
    for (expected, actual) in expected.fields().iter().zip(actual.fields()) {
        if expected.name() != actual.name() {
            return Err(Error::schema_mismatch(
                index,
                format!("expected column '{}', found '{}'", expected.name(), actual.name()),
            ));
        }
        if expected.data_type() != actual.data_type() {
            return Err(Error::schema_mismatch(
                index,
                format!(
                    "column '{}' has type {}, expected {}",
                    actual.name(),
                    actual.data_type(),
                    expected.data_type()
                ),
            ));
        }
    }
    Ok(())
}

impl ColumnSet for ChunkedTable {
    fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    fn num_rows(&self) -> usize {
        self.ends.last().copied().unwrap_or(0)
    }

    fn num_batches(&self) -> usize {
        self.batches.len()
    }

    fn batch(&self, index: usize) -> Option<&RecordBatch> {
        self.batches.get(index)
    }

    fn locate(&self, row: usize) -> Result<RowLocation> {
        verify_row(row, self.num_rows())?;
        let batch = self.ends.partition_point(|&end| end <= row);
        let start = if batch == 0 { 0 } else { self.ends[batch - 1] };
        Ok(RowLocation::new(batch, row - start))
    }
}

impl From<RecordBatch> for ChunkedTable {
    fn from(batch: RecordBatch) -> Self {
        ChunkedTable {
            schema: batch.schema(),
            ends: vec![batch.num_rows()],
            batches: vec![batch],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow_array::{ArrayRef, Int64Array, RecordBatchIterator, StringArray};
    use rawrec_common::error::ErrorKind;
    use rawrec_scalar::Scalar;
    use std::sync::Arc;

    fn ids(values: Vec<i64>) -> RecordBatch {
        RecordBatch::try_from_iter(vec![("id", Arc::new(Int64Array::from(values)) as ArrayRef)])
            .unwrap()
    }

    #[test]
    fn test_locate_is_monotonic() {
        let table =
            ChunkedTable::from_batches(vec![ids(vec![1, 2]), ids(vec![]), ids(vec![3, 4, 5])])
                .unwrap();
        assert_eq!(table.num_rows(), 5);
        assert_eq!(table.num_batches(), 3);

        let locations = (0..table.num_rows())
            .map(|row| table.locate(row).unwrap())
            .collect::<Vec<_>>();
        assert_eq!(
            locations,
            vec![
                RowLocation::new(0, 0),
                RowLocation::new(0, 1),
                RowLocation::new(2, 0),
                RowLocation::new(2, 1),
                RowLocation::new(2, 2),
            ]
        );
        assert!(matches!(
            table.locate(5).unwrap_err().kind(),
            ErrorKind::RowOutOfRange { row: 5, len: 5 }
        ));
    }

    #[test]
    fn test_schema_mismatch() {
        let other = RecordBatch::try_from_iter(vec![(
            "id",
            Arc::new(StringArray::from(vec!["x"])) as ArrayRef,
        )])
        .unwrap();
        let err = ChunkedTable::from_batches(vec![ids(vec![1]), other]).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::SchemaMismatch { batch: 1, .. }));

        let renamed = RecordBatch::try_from_iter(vec![(
            "key",
            Arc::new(Int64Array::from(vec![1])) as ArrayRef,
        )])
        .unwrap();
        let err = ChunkedTable::from_batches(vec![ids(vec![1]), renamed]).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::SchemaMismatch { batch: 1, .. }));
    }

    #[test]
    fn test_from_reader() {
        let batches = vec![ids(vec![1]), ids(vec![2, 3])];
        let schema = batches[0].schema();
        let reader = RecordBatchIterator::new(batches.into_iter().map(Ok), schema);
        let table = ChunkedTable::try_from_reader(reader).unwrap();
        assert_eq!(table.num_rows(), 3);
        let column = table.column("id").unwrap();
        assert_eq!(column.chunks().len(), 2);
        assert_eq!(column.value(2).unwrap(), Scalar::Int64(3));
    }

    #[test]
    fn test_empty_table() {
        let schema = ids(vec![]).schema();
        let table = ChunkedTable::empty(schema);
        assert_eq!(table.num_rows(), 0);
        assert!(table.locate(0).is_err());
        assert!(ChunkedTable::from_batches(vec![]).is_err());
    }
}
