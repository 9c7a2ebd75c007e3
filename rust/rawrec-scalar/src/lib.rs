//! Logical scalar values produced when columnar data is materialized into rows.
//!
//! A [`Scalar`](scalar::Scalar) is the decoded, encoding-independent form of a single
//! slot of a column: an integer, a date, an exact decimal, an interval, a piece of text.
//! Text and binary payloads borrow from the column buffers they were decoded from.
//!
//! Temporal values ([`temporal`]) keep their raw count together with its unit, so that
//! decoding never loses precision; conversions to `chrono` types are provided as
//! lossless views. Decimal values ([`decimal`]) keep the unscaled two's-complement
//! integer and format exactly.

pub mod decimal;
pub mod json;
pub mod scalar;
pub mod temporal;

pub use arrow_buffer::{IntervalDayTime, IntervalMonthDayNano, i256};
pub use arrow_schema::TimeUnit;
pub use decimal::Decimal;
pub use scalar::Scalar;
