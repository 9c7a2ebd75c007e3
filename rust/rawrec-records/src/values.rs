//! Column-wise materialization.

use arrow_array::Array;
use rawrec_common::Result;
use rawrec_scalar::Scalar;

use crate::decoder::ColumnDecoder;

/// Decodes every slot of `array` in order, null slots as [`Scalar::Null`].
pub fn column_values(array: &dyn Array) -> Result<Vec<Scalar<'_>>> {
    let decoder = ColumnDecoder::try_new(array)?;
    (0..decoder.len()).map(|row| decoder.read(row)).collect()
}
