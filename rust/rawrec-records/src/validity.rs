//! Null-validity resolution for a column.

use arrow_array::Array;
use arrow_buffer::NullBuffer;
use arrow_schema::DataType;
use rawrec_common::{Result, result::verify_row};

/// Validity of the slots of a single column.
///
/// This enum provides three ways of answering "is slot `i` null":
/// - `AllValid`: no slot is null, nothing to look up
/// - `AllNull`: every slot is null (including null-only columns, which carry no buffers)
/// - `Bitmap`: mixed validity, answered from the column's validity bitmap
///
/// For a dictionary-encoded column this is the validity of the index slots; a null
/// stored inside the dictionary itself is only discovered when the index is resolved.
#[derive(Debug, Clone, Copy)]
pub enum Validity<'a> {
    /// All slots are valid (present).
    AllValid(usize),

    /// All slots are null.
    AllNull(usize),

    /// Validity bitmap, bit `i` set means slot `i` is present.
    Bitmap(&'a NullBuffer),
}

impl<'a> Validity<'a> {
    /// Resolves the validity of `array`.
    pub fn of(array: &'a dyn Array) -> Validity<'a> {
        let len = array.len();
        if *array.data_type() == DataType::Null {
            return Validity::AllNull(len);
        }
        match array.nulls() {
            None => Validity::AllValid(len),
            Some(nulls) if nulls.null_count() == 0 => Validity::AllValid(len),
            Some(nulls) if nulls.null_count() == len => Validity::AllNull(len),
            Some(nulls) => Validity::Bitmap(nulls),
        }
    }

    /// Returns the number of slots tracked.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Validity::AllValid(len) | Validity::AllNull(len) => *len,
            Validity::Bitmap(nulls) => nulls.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the slot at `row` is null.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds and the validity is backed by a bitmap.
    #[inline]
    pub fn is_null(&self, row: usize) -> bool {
        match self {
            Validity::AllValid(_) => false,
            Validity::AllNull(_) => true,
            Validity::Bitmap(nulls) => nulls.is_null(row),
        }
    }

    #[inline]
    pub fn is_valid(&self, row: usize) -> bool {
        !self.is_null(row)
    }

    pub fn null_count(&self) -> usize {
        match self {
            Validity::AllValid(_) => 0,
            Validity::AllNull(len) => *len,
            Validity::Bitmap(nulls) => nulls.null_count(),
        }
    }
}

/// Reports whether the slot at `row` of `array` is null.
///
/// Fails with `RowOutOfRange` when `row >= array.len()`.
pub fn is_null(array: &dyn Array, row: usize) -> Result<bool> {
    verify_row(row, array.len())?;
    Ok(Validity::of(array).is_null(row))
}
