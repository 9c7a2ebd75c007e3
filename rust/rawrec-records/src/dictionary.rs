//! Dictionary resolution: index slot to dictionary entry to scalar.

use arrow_array::{
    Array, DictionaryArray,
    types::{
        ArrowDictionaryKeyType, Int8Type, Int16Type, Int32Type, Int64Type, UInt8Type, UInt16Type,
        UInt32Type, UInt64Type,
    },
};
use rawrec_common::{Result, error::Error, result::verify_row};
use rawrec_scalar::Scalar;

use crate::{
    decoder::{ColumnDecoder, downcast},
    kind::{DictionaryKey, PhysicalKind},
    validity::Validity,
};

/// Index buffer of a dictionary-encoded column, in its native integer type.
#[derive(Debug, Clone, Copy)]
enum Keys<'a> {
    Int8(&'a [i8]),
    Int16(&'a [i16]),
    Int32(&'a [i32]),
    Int64(&'a [i64]),
    UInt8(&'a [u8]),
    UInt16(&'a [u16]),
    UInt32(&'a [u32]),
    UInt64(&'a [u64]),
}

impl Keys<'_> {
    fn len(&self) -> usize {
        match self {
            Keys::Int8(k) => k.len(),
            Keys::Int16(k) => k.len(),
            Keys::Int32(k) => k.len(),
            Keys::Int64(k) => k.len(),
            Keys::UInt8(k) => k.len(),
            Keys::UInt16(k) => k.len(),
            Keys::UInt32(k) => k.len(),
            Keys::UInt64(k) => k.len(),
        }
    }

    /// Reads the index at `row` widened to `i128`, so that both negative signed indices
    /// and large unsigned ones are reported exactly.
    fn get(&self, row: usize) -> i128 {
        match self {
            Keys::Int8(k) => k[row].into(),
            Keys::Int16(k) => k[row].into(),
            Keys::Int32(k) => k[row].into(),
            Keys::Int64(k) => k[row].into(),
            Keys::UInt8(k) => k[row].into(),
            Keys::UInt16(k) => k[row].into(),
            Keys::UInt32(k) => k[row].into(),
            Keys::UInt64(k) => k[row].into(),
        }
    }
}

/// Decoder for a dictionary-encoded column.
///
/// The dictionary values are decoded with an ordinary [`ColumnDecoder`] bound to the
/// dictionary's value array, which is shared by every column (and every chunk) that
/// refers to it.
pub struct DictionaryDecoder<'a> {
    keys: Keys<'a>,
    values: Box<ColumnDecoder<'a>>,
}

impl<'a> DictionaryDecoder<'a> {
    pub(crate) fn bind(
        array: &'a dyn Array,
        key: DictionaryKey,
        value: &PhysicalKind,
    ) -> Result<DictionaryDecoder<'a>> {
        fn parts<'a, K: ArrowDictionaryKeyType>(
            array: &'a dyn Array,
        ) -> Result<(&'a [K::Native], &'a dyn Array)> {
            let dictionary = downcast::<DictionaryArray<K>>(array)?;
            let keys: &'a [K::Native] = dictionary.keys().values();
            Ok((keys, dictionary.values().as_ref()))
        }

        let (keys, values) = match key {
            DictionaryKey::Int8 => parts::<Int8Type>(array).map(|(k, v)| (Keys::Int8(k), v))?,
            DictionaryKey::Int16 => parts::<Int16Type>(array).map(|(k, v)| (Keys::Int16(k), v))?,
            DictionaryKey::Int32 => parts::<Int32Type>(array).map(|(k, v)| (Keys::Int32(k), v))?,
            DictionaryKey::Int64 => parts::<Int64Type>(array).map(|(k, v)| (Keys::Int64(k), v))?,
            DictionaryKey::UInt8 => parts::<UInt8Type>(array).map(|(k, v)| (Keys::UInt8(k), v))?,
            DictionaryKey::UInt16 => {
                parts::<UInt16Type>(array).map(|(k, v)| (Keys::UInt16(k), v))?
            }
            DictionaryKey::UInt32 => {
                parts::<UInt32Type>(array).map(|(k, v)| (Keys::UInt32(k), v))?
            }
            DictionaryKey::UInt64 => {
                parts::<UInt64Type>(array).map(|(k, v)| (Keys::UInt64(k), v))?
            }
        };

        Ok(DictionaryDecoder {
            keys,
            values: Box::new(ColumnDecoder::bind(values, value)?),
        })
    }

    /// Number of index slots.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of entries in the dictionary.
    pub fn dictionary_len(&self) -> usize {
        self.values.len()
    }

    /// Returns the dictionary entry the index slot at `row` refers to.
    ///
    /// # Errors
    ///
    /// `RowOutOfRange` if `row` is not an index slot, `DictionaryIndexOutOfBounds` if the
    /// stored index is negative or not smaller than the dictionary length.
    pub fn resolve(&self, row: usize) -> Result<usize> {
        verify_row(row, self.len())?;
        let index = self.keys.get(row);
        let len = self.dictionary_len();
        match usize::try_from(index) {
            Ok(index) if index < len => Ok(index),
            _ => Err(Error::dictionary_index_out_of_bounds(index, len)),
        }
    }

    /// Decodes the dictionary entry referred to by the index slot at `row`.
    ///
    /// The index slot itself must be present; a null stored in the dictionary decodes
    /// to [`Scalar::Null`].
    pub fn decode(&self, row: usize) -> Result<Scalar<'a>> {
        let index = self.resolve(row)?;
        self.values.read(index)
    }
}

/// Decodes the slot at `row` of a dictionary-encoded column.
///
/// Null index slots decode to [`Scalar::Null`] without looking at the stored index.
pub fn decode_dictionary(array: &dyn Array, row: usize) -> Result<Scalar<'_>> {
    verify_row(row, array.len())?;
    match PhysicalKind::try_from(array.data_type())? {
        PhysicalKind::Dictionary { key, value } => {
            if Validity::of(array).is_null(row) {
                return Ok(Scalar::Null);
            }
            DictionaryDecoder::bind(array, key, &value)?.decode(row)
        }
        kind => Err(Error::invalid_arg(
            "array",
            format!("{kind} column is not dictionary-encoded"),
        )),
    }
}
