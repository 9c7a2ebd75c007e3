//! Options of a row traversal.

use std::ops::Range;

use log::debug;
use rawrec_common::{Result, error::Error};

use crate::{column_set::ColumnSet, kind::PhysicalKind, records::RecordIter};

/// Builder for [`RecordIter`].
///
/// By default a traversal covers every row and every column of the set. `build()`
/// checks the whole configuration (projected column names, row range and the kind of
/// every projected column) before any row is decoded.
pub struct RecordReaderBuilder<'a, S: ColumnSet + ?Sized> {
    set: &'a S,
    projection: Option<Vec<String>>,
    row_range: Option<Range<usize>>,
}

impl<'a, S: ColumnSet + ?Sized> RecordReaderBuilder<'a, S> {
    pub fn new(set: &'a S) -> Self {
        RecordReaderBuilder {
            set,
            projection: None,
            row_range: None,
        }
    }

    /// Restricts rows to the named columns, in the given order.
    pub fn with_projection<I, N>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        self.projection = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Restricts the traversal to the table rows in `range`.
    pub fn with_row_range(mut self, range: Range<usize>) -> Self {
        self.row_range = Some(range);
        self
    }

    /// Validates the options and returns the row iterator.
    ///
    /// # Errors
    ///
    /// - `ColumnNotFound` for a projected name missing from the schema.
    /// - `InvalidArgument` for a row range that is reversed or ends past the last row.
    /// - `UnsupportedType` for a projected column without a decode rule.
    pub fn build(self) -> Result<RecordIter<'a, S>> {
        let set = self.set;
        let num_rows = set.num_rows();

        let columns = match &self.projection {
            Some(names) => names
                .iter()
                .map(|name| set.column_index(name))
                .collect::<Result<Vec<_>>>()?,
            None => (0..set.num_columns()).collect(),
        };

        let range = self.row_range.unwrap_or(0..num_rows);
        if range.start > range.end || range.end > num_rows {
            return Err(Error::invalid_arg(
                "row_range",
                format!("{range:?} is not within 0..{num_rows}"),
            ));
        }

        let schema = set.schema();
        let kinds = columns
            .iter()
            .map(|&column| PhysicalKind::try_from(schema.field(column).data_type()))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "traversing rows {}..{} of {} in {} batches, {} columns",
            range.start,
            range.end,
            num_rows,
            set.num_batches(),
            columns.len()
        );
        Ok(RecordIter::new(set, columns, kinds, range.start, range.end))
    }
}
