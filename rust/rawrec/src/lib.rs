//! # rawrec: row materialization over Arrow columnar data
//!
//! Columnar data is kept column-major, partially dictionary-compressed and null-aware.
//! This crate turns such data back into rows of logical values, one [`Scalar`] per
//! column, for iteration, export and debugging.
//!
//! ## Module Organization
//!
//! * [`common`] - Error types and argument/data verification helpers
//! * [`scalar`] - Logical scalar values (temporal, decimal, interval, nested) and their
//!   JSON rendering
//! * [`records`] - Physical kinds, per-kind decoders, dictionary resolution and the row
//!   traversal over single batches and chunked tables
//!
//! The most commonly used items are re-exported at the crate root.
//!
//! ## Getting Started
//!
//! ```
//! use std::sync::Arc;
//! use arrow_array::{ArrayRef, Int32Array, RecordBatch, StringArray};
//! use rawrec::{ChunkedTable, RecordReaderBuilder, Scalar};
//!
//! let ids: ArrayRef = Arc::new(Int32Array::from(vec![1, 2, 3]));
//! let names: ArrayRef = Arc::new(StringArray::from(vec![Some("a"), None, Some("c")]));
//! let batch = RecordBatch::try_from_iter(vec![("id", ids), ("name", names)]).unwrap();
//! let table = ChunkedTable::from_batches(vec![batch.slice(0, 1), batch.slice(1, 2)]).unwrap();
//!
//! let rows = RecordReaderBuilder::new(&table)
//!     .with_projection(["name"])
//!     .with_row_range(1..3)
//!     .build()
//!     .unwrap()
//!     .collect::<Result<Vec<_>, _>>()
//!     .unwrap();
//! assert_eq!(rows[0].values(), &[Scalar::Null]);
//! assert_eq!(rows[1].values(), &[Scalar::Utf8("c")]);
//! ```

pub use rawrec_common as common;
pub use rawrec_records as records;
pub use rawrec_scalar as scalar;

pub use rawrec_common::error::{Error, ErrorKind};
pub use rawrec_common::result::Result;
pub use rawrec_records::{
    ChunkedColumn, ChunkedTable, ColumnSet, RecordIter, RecordReaderBuilder, Row,
    each_raw_record, raw_records, record_at, records as record_iter,
};
pub use rawrec_scalar::Scalar;
