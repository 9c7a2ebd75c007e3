//! Row traversal: turning a column set into an ordered sequence of raw records.

use std::{iter::FusedIterator, ops::Deref};

use log::trace;
use rawrec_common::{Result, error::Error, result::verify_row, try_or_ret_some_err};
use rawrec_scalar::Scalar;

use crate::{
    builder::RecordReaderBuilder, column_set::ColumnSet, decoder::ColumnDecoder,
    kind::PhysicalKind,
};

/// One materialized row: a decoded value (or [`Scalar::Null`]) per column, in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct Row<'a> {
    values: Vec<Scalar<'a>>,
}

impl<'a> Row<'a> {
    pub fn new(values: Vec<Scalar<'a>>) -> Row<'a> {
        Row { values }
    }

    pub fn values(&self) -> &[Scalar<'a>] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Scalar<'a>> {
        self.values
    }
}

impl<'a> Deref for Row<'a> {
    type Target = [Scalar<'a>];

    fn deref(&self) -> &Self::Target {
        &self.values
    }
}

impl<'a> IntoIterator for Row<'a> {
    type Item = Scalar<'a>;
    type IntoIter = std::vec::IntoIter<Scalar<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> From<Vec<Scalar<'a>>> for Row<'a> {
    fn from(values: Vec<Scalar<'a>>) -> Self {
        Row::new(values)
    }
}

/// Lazy iterator over the rows of a column set.
///
/// The iterator keeps a cursor of (batch, row within batch). Column decoders are bound
/// when the cursor enters a batch, so advancing by one row costs one decode per column.
/// The first error ends the traversal: it is yielded once and the iterator is fused.
///
/// Created by [`records`] or [`RecordReaderBuilder::build`].
pub struct RecordIter<'a, S: ColumnSet + ?Sized> {
    set: &'a S,
    columns: Vec<usize>,
    names: Vec<&'a str>,
    kinds: Vec<PhysicalKind>,
    /// Table row of the next row to produce.
    next_row: usize,
    /// One past the last table row to produce.
    end_row: usize,
    batch: usize,
    batch_row: usize,
    batch_len: usize,
    decoders: Vec<ColumnDecoder<'a>>,
    bound: bool,
    failed: bool,
}

impl<'a, S: ColumnSet + ?Sized> RecordIter<'a, S> {
    pub(crate) fn new(
        set: &'a S,
        columns: Vec<usize>,
        kinds: Vec<PhysicalKind>,
        start_row: usize,
        end_row: usize,
    ) -> RecordIter<'a, S> {
        let schema = set.schema();
        let names = columns
            .iter()
            .map(|&column| schema.field(column).name().as_str())
            .collect();
        RecordIter {
            set,
            columns,
            names,
            kinds,
            next_row: start_row,
            end_row,
            batch: 0,
            batch_row: 0,
            batch_len: 0,
            decoders: Vec::new(),
            bound: false,
            failed: false,
        }
    }

    /// Names of the columns each row holds values for, in row order.
    pub fn column_names(&self) -> &[&'a str] {
        &self.names
    }

    /// Number of rows not yet produced.
    pub fn remaining(&self) -> usize {
        if self.failed {
            0
        } else {
            self.end_row - self.next_row
        }
    }

    /// Moves the cursor to the batch holding `next_row` and binds its decoders.
    fn seek(&mut self) -> Result<()> {
        let location = self.set.locate(self.next_row)?;
        self.bind_batch(location.batch)?;
        self.batch_row = location.row;
        self.bound = true;
        Ok(())
    }

    /// Moves the cursor to the next batch that has rows.
    fn advance_batch(&mut self) -> Result<()> {
        let mut next = self.batch + 1;
        while self
            .set
            .batch(next)
            .is_some_and(|batch| batch.num_rows() == 0)
        {
            next += 1;
        }
        self.bind_batch(next)?;
        self.batch_row = 0;
        Ok(())
    }

    fn bind_batch(&mut self, index: usize) -> Result<()> {
        let set: &'a S = self.set;
        let batch = set.batch(index).ok_or_else(|| {
            Error::invalid_arg(
                "batch",
                format!("batch {index} out of range for {} batches", set.num_batches()),
            )
        })?;
        trace!(
            "binding batch {index} ({} rows) at table row {}",
            batch.num_rows(),
            self.next_row
        );
        self.decoders = self
            .columns
            .iter()
            .zip(&self.kinds)
            .zip(&self.names)
            .map(|((&column, kind), name)| {
                ColumnDecoder::bind(batch.column(column).as_ref(), kind)
                    .map_err(|e| Error::decode(*name, self.next_row, e))
            })
            .collect::<Result<Vec<_>>>()?;
        self.batch = index;
        self.batch_len = batch.num_rows();
        Ok(())
    }

    fn decode_row(&self) -> Result<Row<'a>> {
        let values = self
            .decoders
            .iter()
            .zip(&self.names)
            .map(|(decoder, name)| {
                decoder
                    .read(self.batch_row)
                    .map_err(|e| Error::decode(*name, self.next_row, e))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Row::new(values))
    }

    fn step(&mut self) -> Result<Row<'a>> {
        if !self.bound {
            self.seek()?;
        } else if self.batch_row >= self.batch_len {
            self.advance_batch()?;
        }
        let row = self.decode_row()?;
        self.batch_row += 1;
        self.next_row += 1;
        Ok(row)
    }
}

impl<'a, S: ColumnSet + ?Sized> Iterator for RecordIter<'a, S> {
    type Item = Result<Row<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.next_row >= self.end_row {
            return None;
        }
        let row = self.step();
        if row.is_err() {
            self.failed = true;
        }
        Some(row)
    }

    /// The upper bound is exact for an error-free traversal; an error ends it early,
    /// so only the next item is guaranteed.
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining.min(1), Some(remaining))
    }
}

impl<S: ColumnSet + ?Sized> FusedIterator for RecordIter<'_, S> {}

/// Starts a traversal over all rows and columns of `set`.
///
/// Every column's kind is resolved before the first row is produced, so an unsupported
/// column fails here rather than in the middle of the traversal.
pub fn records<S: ColumnSet + ?Sized>(set: &S) -> Result<RecordIter<'_, S>> {
    RecordReaderBuilder::new(set).build()
}

/// Materializes all rows of `set`.
pub fn raw_records<S: ColumnSet + ?Sized>(set: &S) -> Result<Vec<Row<'_>>> {
    records(set)?.collect()
}

/// Calls `f` with every row of `set`, in order, stopping at the first error returned
/// either by decoding or by `f`.
pub fn each_raw_record<'a, S, F>(set: &'a S, mut f: F) -> Result<()>
where
    S: ColumnSet + ?Sized,
    F: FnMut(Row<'a>) -> Result<()>,
{
    for row in records(set)? {
        f(row?)?;
    }
    Ok(())
}

/// Materializes the single table row `row` of `set`.
pub fn record_at<S: ColumnSet + ?Sized>(set: &S, row: usize) -> Result<Row<'_>> {
    verify_row(row, set.num_rows())?;
    let mut iter = RecordReaderBuilder::new(set)
        .with_row_range(row..row + 1)
        .build()?;
    iter.next()
        .unwrap_or_else(|| Err(Error::row_out_of_range(row, set.num_rows())))
}

/// Iterator adapter over a [`RecordIter`] that drops the row wrapper and yields each
/// row's values directly, as used by callers that collect nested vectors.
pub struct ValueRows<'a, S: ColumnSet + ?Sized> {
    inner: RecordIter<'a, S>,
}

impl<'a, S: ColumnSet + ?Sized> Iterator for ValueRows<'a, S> {
    type Item = Result<Vec<Scalar<'a>>>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = try_or_ret_some_err!(self.inner.next()?);
        Some(Ok(row.into_values()))
    }
}

impl<'a, S: ColumnSet + ?Sized> RecordIter<'a, S> {
    /// Yields plain value vectors instead of [`Row`]s.
    pub fn into_values(self) -> ValueRows<'a, S> {
        ValueRows { inner: self }
    }
}
