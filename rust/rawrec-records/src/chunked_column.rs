//! A column spanning several arrays (chunks), addressed as one continuous sequence.

use std::{ops::Range, sync::Arc};

use arrow_array::{Array, ArrayRef};
use arrow_schema::DataType;
use rawrec_common::{Result, error::Error, result::verify_row, verify_arg};
use rawrec_scalar::Scalar;

use crate::{column_set::RowLocation, decoder::ColumnDecoder, values::column_values};

/// A sequence of Arrow arrays of one data type, treated as a single column.
///
/// Chunks keep their own buffers; nothing is copied when a chunk is appended or when
/// the column is sliced. Row lookup is a binary search over the chunk end positions.
#[derive(Debug, Clone, Default)]
pub struct ChunkedColumn {
    chunks: Vec<ArrayRef>,
    /// `ends[i]` is the position one past the last row of chunk `i`.
    ends: Vec<usize>,
}

impl ChunkedColumn {
    pub fn new() -> ChunkedColumn {
        ChunkedColumn::default()
    }

    /// Builds a column out of `chunks`, which must all have the same data type.
    pub fn try_from_chunks(chunks: impl IntoIterator<Item = ArrayRef>) -> Result<ChunkedColumn> {
        let mut column = ChunkedColumn::new();
        for chunk in chunks {
            column.append(chunk)?;
        }
        Ok(column)
    }

    /// Appends a chunk to the end of the column.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the chunk's data type differs from the existing chunks.
    pub fn append(&mut self, array: ArrayRef) -> Result<()> {
        verify_arg!(
            array,
            self.data_type().is_none_or(|data_type| data_type == array.data_type())
        );
        let end = self.len() + array.len();
        self.ends.push(end);
        self.chunks.push(array);
        Ok(())
    }

    /// Total number of rows across all chunks.
    pub fn len(&self) -> usize {
        self.ends.last().copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Data type of the chunks, `None` while the column has no chunks.
    pub fn data_type(&self) -> Option<&DataType> {
        self.chunks.first().map(|chunk| chunk.data_type())
    }

    pub fn chunks(&self) -> &[ArrayRef] {
        &self.chunks
    }

    /// Iterates over the chunks together with the row range each chunk covers.
    pub fn chunks_with_ranges(&self) -> impl Iterator<Item = (&ArrayRef, Range<usize>)> {
        self.chunks.iter().scan(0usize, |pos, chunk| {
            let start = *pos;
            let end = start + chunk.len();
            *pos = end;
            Some((chunk, start..end))
        })
    }

    /// Maps a row of the column to its chunk and the row within that chunk.
    pub fn locate(&self, row: usize) -> Result<RowLocation> {
        verify_row(row, self.len())?;
        let chunk = self.ends.partition_point(|&end| end <= row);
        let start = if chunk == 0 { 0 } else { self.ends[chunk - 1] };
        Ok(RowLocation::new(chunk, row - start))
    }

    /// Returns the rows `offset..offset + len` as a new column sharing the same buffers.
    pub fn slice(&self, offset: usize, len: usize) -> Result<ChunkedColumn> {
        let end = offset.checked_add(len).ok_or_else(|| {
            Error::invalid_arg("len", format!("slice {offset}+{len} overflows"))
        })?;
        if end > self.len() {
            return Err(Error::invalid_arg(
                "len",
                format!("slice {offset}..{end} out of bounds for length {}", self.len()),
            ));
        }

        let mut sliced = ChunkedColumn::new();
        for (chunk, range) in self.chunks_with_ranges() {
            if range.end <= offset || range.start >= end {
                continue;
            }
            let start = offset.max(range.start);
            let stop = end.min(range.end);
            sliced.append(chunk.slice(start - range.start, stop - start))?;
        }
        Ok(sliced)
    }

    /// Decodes the value at `row`, [`Scalar::Null`] for a null slot.
    pub fn value(&self, row: usize) -> Result<Scalar<'_>> {
        let location = self.locate(row)?;
        ColumnDecoder::try_new(self.chunks[location.batch].as_ref())?.read(location.row)
    }

    /// Decodes every value of the column, chunk after chunk.
    pub fn values(&self) -> Result<Vec<Scalar<'_>>> {
        let mut values = Vec::with_capacity(self.len());
        for chunk in &self.chunks {
            values.extend(column_values(chunk.as_ref())?);
        }
        Ok(values)
    }

    /// Concatenates the chunks into one contiguous array.
    ///
    /// A column made of a single chunk returns that chunk without copying.
    pub fn concat(&self) -> Result<ArrayRef> {
        match self.chunks.as_slice() {
            [] => Err(Error::invalid_arg("column", "cannot concatenate an empty column")),
            [chunk] => Ok(Arc::clone(chunk)),
            chunks => {
                let arrays = chunks.iter().map(Arc::as_ref).collect::<Vec<_>>();
                arrow_select::concat::concat(&arrays)
                    .map_err(|e| Error::arrow("concatenating column chunks", e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow_array::{Int32Array, StringArray};
    use rawrec_common::error::ErrorKind;

    fn column(chunks: &[&[i32]]) -> ChunkedColumn {
        ChunkedColumn::try_from_chunks(
            chunks
                .iter()
                .map(|chunk| Arc::new(Int32Array::from(chunk.to_vec())) as ArrayRef),
        )
        .unwrap()
    }

    #[test]
    fn test_locate_skips_empty_chunks() {
        let column = column(&[&[1, 2], &[], &[3, 4, 5]]);
        assert_eq!(column.len(), 5);
        assert_eq!(column.locate(1).unwrap(), RowLocation::new(0, 1));
        assert_eq!(column.locate(2).unwrap(), RowLocation::new(2, 0));
        assert_eq!(column.locate(4).unwrap(), RowLocation::new(2, 2));
        assert!(matches!(
            column.locate(5).unwrap_err().kind(),
            ErrorKind::RowOutOfRange { row: 5, len: 5 }
        ));
    }

    #[test]
    fn test_chunks_with_ranges() {
        let column = column(&[&[1], &[2, 3]]);
        let ranges = column
            .chunks_with_ranges()
            .map(|(_, range)| range)
            .collect::<Vec<_>>();
        assert_eq!(ranges, vec![0..1, 1..3]);
    }

    #[test]
    fn test_slice_across_chunks() {
        let column = column(&[&[1, 2], &[3, 4], &[5]]);
        let sliced = column.slice(1, 3).unwrap();
        assert_eq!(sliced.chunks().len(), 2);
        assert_eq!(
            sliced.values().unwrap(),
            vec![Scalar::Int32(2), Scalar::Int32(3), Scalar::Int32(4)]
        );
        assert!(column.slice(4, 2).is_err());
        assert!(column.slice(5, 0).unwrap().is_empty());
    }

    #[test]
    fn test_values_and_value() {
        let column = column(&[&[i32::MIN], &[0, i32::MAX]]);
        assert_eq!(column.value(2).unwrap(), Scalar::Int32(i32::MAX));
        assert_eq!(
            column.values().unwrap(),
            vec![Scalar::Int32(i32::MIN), Scalar::Int32(0), Scalar::Int32(i32::MAX)]
        );
    }

    #[test]
    fn test_append_type_mismatch() {
        let mut column = column(&[&[1]]);
        let err = column
            .append(Arc::new(StringArray::from(vec!["a"])))
            .unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidArgument { .. }));
    }

    #[test]
    fn test_concat() {
        let column = column(&[&[1, 2], &[3]]);
        let array = column.concat().unwrap();
        let array = array.as_any().downcast_ref::<Int32Array>().unwrap();
        assert_eq!(array.values().as_ref(), &[1, 2, 3]);

        let single = ChunkedColumn::try_from_chunks([Arc::clone(&column.chunks()[0])]).unwrap();
        assert!(Arc::ptr_eq(&single.concat().unwrap(), &column.chunks()[0]));
        assert!(ChunkedColumn::new().concat().is_err());
    }
}
