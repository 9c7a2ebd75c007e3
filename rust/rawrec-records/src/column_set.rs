//! Column set view: one row-addressing scheme over a single batch or a chunked table.

use arrow_array::RecordBatch;
use arrow_schema::SchemaRef;
use rawrec_common::{Result, error::Error, result::verify_row};

use crate::chunked_column::ChunkedColumn;

/// Position of a table row inside the batch that holds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowLocation {
    /// Index of the batch.
    pub batch: usize,
    /// Row offset within that batch.
    pub row: usize,
}

impl RowLocation {
    pub fn new(batch: usize, row: usize) -> RowLocation {
        RowLocation { batch, row }
    }
}

/// An ordered set of named columns sharing one logical row count, stored as one or more
/// batches with identical schemas.
///
/// Row `i` of the set is row [`locate(i).row`](ColumnSet::locate) of batch
/// [`locate(i).batch`](ColumnSet::locate). `locate` is total over `0..num_rows()` and
/// monotonic: later rows never map to earlier batches.
pub trait ColumnSet {
    fn schema(&self) -> &SchemaRef;

    /// Total number of rows across all batches.
    fn num_rows(&self) -> usize;

    fn num_batches(&self) -> usize;

    /// Returns the batch at `index`, or `None` past the last batch.
    fn batch(&self, index: usize) -> Option<&RecordBatch>;

    /// Maps a table row to its batch and the row within that batch.
    ///
    /// # Errors
    ///
    /// `RowOutOfRange` if `row >= num_rows()`.
    fn locate(&self, row: usize) -> Result<RowLocation>;

    fn num_columns(&self) -> usize {
        self.schema().fields().len()
    }

    /// Column names in declared order.
    fn column_names(&self) -> Vec<&str> {
        self.schema()
            .fields()
            .iter()
            .map(|field| field.name().as_str())
            .collect()
    }

    /// Position of the column `name` in declared order.
    fn column_index(&self, name: &str) -> Result<usize> {
        self.schema()
            .index_of(name)
            .map_err(|_| Error::column_not_found(name))
    }

    /// The column `name`, spanning all batches.
    fn column(&self, name: &str) -> Result<ChunkedColumn> {
        let index = self.column_index(name)?;
        let chunks = (0..self.num_batches())
            .filter_map(|batch| self.batch(batch))
            .map(|batch| batch.column(index).clone());
        ChunkedColumn::try_from_chunks(chunks)
    }
}

impl ColumnSet for RecordBatch {
    fn schema(&self) -> &SchemaRef {
        self.schema_ref()
    }

    fn num_rows(&self) -> usize {
        RecordBatch::num_rows(self)
    }

    fn num_batches(&self) -> usize {
        1
    }

    fn batch(&self, index: usize) -> Option<&RecordBatch> {
        (index == 0).then_some(self)
    }

    fn locate(&self, row: usize) -> Result<RowLocation> {
        verify_row(row, RecordBatch::num_rows(self))?;
        Ok(RowLocation::new(0, row))
    }
}

impl<T: ColumnSet + ?Sized> ColumnSet for &T {
    fn schema(&self) -> &SchemaRef {
        (**self).schema()
    }

    fn num_rows(&self) -> usize {
        (**self).num_rows()
    }

    fn num_batches(&self) -> usize {
        (**self).num_batches()
    }

    fn batch(&self, index: usize) -> Option<&RecordBatch> {
        (**self).batch(index)
    }

    fn locate(&self, row: usize) -> Result<RowLocation> {
        (**self).locate(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow_array::{ArrayRef, Int32Array, StringArray};
    use rawrec_common::error::ErrorKind;
    use rawrec_scalar::Scalar;
    use std::sync::Arc;

    fn batch() -> RecordBatch {
        RecordBatch::try_from_iter(vec![
            ("id", Arc::new(Int32Array::from(vec![1, 2, 3])) as ArrayRef),
            ("name", Arc::new(StringArray::from(vec!["a", "b", "c"])) as ArrayRef),
        ])
        .unwrap()
    }

    #[test]
    fn test_single_batch_view() {
        let batch = batch();
        assert_eq!(ColumnSet::num_rows(&batch), 3);
        assert_eq!(batch.num_batches(), 1);
        assert_eq!(batch.column_names(), vec!["id", "name"]);
        assert_eq!(batch.locate(2).unwrap(), RowLocation::new(0, 2));
        assert!(batch.batch(1).is_none());
    }

    #[test]
    fn test_locate_out_of_range() {
        let batch = batch();
        let err = batch.locate(3).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::RowOutOfRange { row: 3, len: 3 }));
    }

    #[test]
    fn test_column_by_name() {
        let batch = batch();
        let column = ColumnSet::column(&batch, "name").unwrap();
        assert_eq!(column.len(), 3);
        assert_eq!(column.value(1).unwrap(), Scalar::Utf8("b"));

        let err = ColumnSet::column(&batch, "missing").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::ColumnNotFound { .. }));
    }
}
