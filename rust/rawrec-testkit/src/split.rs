//! Re-chunking and re-encoding of test data.

use std::sync::Arc;

use arrow_array::{
    Array, ArrayRef, DictionaryArray, PrimitiveArray, RecordBatch, UInt32Array,
    types::ArrowDictionaryKeyType,
};
use arrow_buffer::ArrowNativeType;
use fastrand::Rng;

/// Splits `len` into random chunk sizes within `min_size..=max_size` (the last chunk may
/// be shorter). The sizes add up to `len`. A `min_size` of zero allows empty chunks.
///
/// # Panics
///
/// Panics if `min_size > max_size` or `max_size == 0`.
pub fn random_split(rng: &mut Rng, len: usize, min_size: usize, max_size: usize) -> Vec<usize> {
    assert!(
        min_size <= max_size,
        "min_size must be less than or equal to max_size"
    );
    assert_ne!(max_size, 0, "max_size must be positive");
    let mut remaining = len;
    let mut sizes = Vec::new();
    while remaining > 0 {
        let size = rng.usize(min_size..=max_size).min(remaining);
        sizes.push(size);
        remaining -= size;
    }
    assert_eq!(sizes.iter().sum::<usize>(), len);
    sizes
}

/// Slices `batch` into consecutive batches of the given sizes.
///
/// # Panics
///
/// Panics if the sizes do not add up to the number of rows of `batch`.
pub fn split_batch(batch: &RecordBatch, sizes: &[usize]) -> Vec<RecordBatch> {
    assert_eq!(sizes.iter().sum::<usize>(), batch.num_rows());
    let mut offset = 0;
    sizes
        .iter()
        .map(|&size| {
            let slice = batch.slice(offset, size);
            offset += size;
            slice
        })
        .collect()
}

/// Slices `batch` at random positions, including some empty batches.
pub fn random_batches(rng: &mut Rng, batch: &RecordBatch, max_size: usize) -> Vec<RecordBatch> {
    let sizes = random_split(rng, batch.num_rows(), 0, max_size.max(1));
    split_batch(batch, &sizes)
}

/// Dictionary-encodes `array` with keys of type `K`.
///
/// The dictionary holds the values of `array` in shuffled order and every key points
/// at the original value of its slot. For null slots the key is either null itself or
/// points at the (null) dictionary entry, chosen at random, so that both null paths are
/// covered.
///
/// # Panics
///
/// Panics if `array` is too long to be indexed by `K`.
pub fn dictionary_encode<K: ArrowDictionaryKeyType>(rng: &mut Rng, array: &dyn Array) -> ArrayRef {
    let len = array.len();
    let mut order = (0..len).collect::<Vec<_>>();
    rng.shuffle(&mut order);

    let indices = UInt32Array::from_iter_values(
        order
            .iter()
            .map(|&row| u32::try_from(row).expect("row fits u32")),
    );
    let values = arrow_select::take::take(array, &indices, None).expect("take shuffled values");

    let mut positions = vec![0usize; len];
    for (position, &row) in order.iter().enumerate() {
        positions[row] = position;
    }
    let keys = positions
        .iter()
        .enumerate()
        .map(|(row, &position)| {
            if array.is_null(row) && rng.bool() {
                None
            } else {
                Some(K::Native::from_usize(position).expect("dictionary key width"))
            }
        })
        .collect::<PrimitiveArray<K>>();

    Arc::new(DictionaryArray::<K>::try_new(keys, values).expect("valid dictionary keys"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow_array::{Int32Array, StringArray, cast::AsArray, types::Int16Type};

    #[test]
    fn test_random_split_sums_to_len() {
        let mut rng = Rng::with_seed(11);
        for len in [0, 1, 7, 100] {
            let sizes = random_split(&mut rng, len, 0, 8);
            assert_eq!(sizes.iter().sum::<usize>(), len);
            assert!(sizes.iter().all(|&size| size <= 8));
        }
    }

    #[test]
    fn test_split_batch() {
        let batch = RecordBatch::try_from_iter(vec![(
            "a",
            Arc::new(Int32Array::from(vec![1, 2, 3, 4])) as ArrayRef,
        )])
        .unwrap();
        let batches = split_batch(&batch, &[1, 0, 3]);
        assert_eq!(
            batches.iter().map(RecordBatch::num_rows).collect::<Vec<_>>(),
            vec![1, 0, 3]
        );
    }

    #[test]
    fn test_dictionary_encode_preserves_values() {
        let mut rng = Rng::with_seed(5);
        let array = StringArray::from(vec![Some("a"), None, Some("c"), Some("d")]);
        let encoded = dictionary_encode::<Int16Type>(&mut rng, &array);
        let dict = encoded.as_dictionary::<Int16Type>();
        let values = dict.values().as_string::<i32>();
        for row in 0..array.len() {
            if array.is_null(row) {
                assert!(dict.is_null(row) || values.is_null(dict.keys().value(row) as usize));
            } else {
                assert_eq!(values.value(dict.keys().value(row) as usize), array.value(row));
            }
        }
    }
}
