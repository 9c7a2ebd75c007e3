//! Row materialization ("raw records") over Arrow columnar data.
//!
//! This crate reads externally built Arrow arrays and turns them into rows of logical
//! [`Scalar`](rawrec_scalar::Scalar) values. It never builds value buffers itself.
//!
//! # Components
//!
//! - [`validity`]: whether a slot is null, independent of what the value buffers hold.
//! - [`kind`]: the closed set of physical encodings, resolved from the Arrow data type
//!   with all parameter validation done up front.
//! - [`decoder`]: one decode rule per physical kind, bound to a column once.
//! - [`dictionary`]: index resolution for dictionary-encoded columns.
//! - [`column_set`], [`chunked_table`], [`chunked_column`]: one row-addressing scheme over
//!   a single `RecordBatch` or a sequence of same-schema batches.
//! - [`records`], [`builder`]: the lazy row traversal and its options.
//! - [`values`]: column-wise materialization.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use arrow_array::{ArrayRef, BooleanArray, RecordBatch};
//! use rawrec_records::records::raw_records;
//! use rawrec_scalar::Scalar;
//!
//! let flags: ArrayRef = Arc::new(BooleanArray::from(vec![Some(true), None]));
//! let batch = RecordBatch::try_from_iter(vec![("flag", flags)]).unwrap();
//! let rows = raw_records(&batch).unwrap();
//! assert_eq!(rows[0].values(), &[Scalar::Boolean(true)]);
//! assert_eq!(rows[1].values(), &[Scalar::Null]);
//! ```
//!
//! Rows borrow text and binary payloads from the column buffers, so they cannot outlive
//! the column set they were read from. Traversals only read immutable data: any number
//! of them may run over the same set from different threads.

pub mod builder;
pub mod chunked_column;
pub mod chunked_table;
pub mod column_set;
pub mod decoder;
pub mod dictionary;
pub mod kind;
pub mod records;
pub mod validity;
pub mod values;

pub use builder::RecordReaderBuilder;
pub use chunked_column::ChunkedColumn;
pub use chunked_table::ChunkedTable;
pub use column_set::{ColumnSet, RowLocation};
pub use decoder::ColumnDecoder;
pub use dictionary::DictionaryDecoder;
pub use kind::{DictionaryKey, PhysicalKind};
pub use records::{RecordIter, Row, each_raw_record, raw_records, record_at, records};
pub use validity::Validity;
