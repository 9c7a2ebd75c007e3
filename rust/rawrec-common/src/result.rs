//! Result alias and the checks shared by the decoders.
//!
//! Two families of failure are kept apart: a caller passing a bad row, range or name
//! (`InvalidArgument`, `RowOutOfRange`) and column buffers that contradict their own
//! layout, such as decreasing offsets (`InvalidFormat`).

pub type Result<T> = std::result::Result<T, crate::error::Error>;

/// Returns `InvalidArgument` from the enclosing function unless the condition holds.
/// The error names the checked parameter and quotes the condition.
#[macro_export]
macro_rules! verify_arg {
    ($name:expr, $expr:expr) => {{
        let result = $expr;
        $crate::result::verify_arg(result, stringify!($name), stringify!($expr))?;
    }};
}

/// Returns `InvalidFormat` from the enclosing function unless a buffer-layout condition
/// holds, e.g. `verify_data!(offsets, row + 1 < offsets.len())`.
#[macro_export]
macro_rules! verify_data {
    ($name:expr, $expr:expr) => {{
        let result = $expr;
        $crate::result::verify_data(result, stringify!($name), stringify!($expr))?;
    }};
}

/// Function form of `verify_arg!`.
#[inline]
pub fn verify_arg(predicate: bool, name: &str, condition: &str) -> Result<()> {
    if predicate {
        Ok(())
    } else {
        invalid_arg(name, condition)
    }
}

/// Function form of `verify_data!`.
#[inline]
pub fn verify_data(predicate: bool, name: &str, condition: &str) -> Result<()> {
    if predicate {
        Ok(())
    } else {
        invalid_format(name, condition)
    }
}

/// Checks that `row` addresses one of the `len` rows of a column, batch or table.
/// Public decode entry points run it before reading any buffer.
#[inline]
pub fn verify_row(row: usize, len: usize) -> Result<()> {
    if row < len {
        Ok(())
    } else {
        Err(crate::error::Error::row_out_of_range(row, len))
    }
}

/// Builds the `InvalidArgument` error for a failed caller-side check.
#[cold]
pub fn invalid_arg(name: &str, condition: &str) -> Result<()> {
    Err(crate::error::ErrorKind::InvalidArgument {
        name: name.to_string(),
        message: condition.to_string(),
    }
    .into())
}

/// Builds the `InvalidFormat` error for column buffers that break their layout.
#[cold]
pub fn invalid_format(name: &str, condition: &str) -> Result<()> {
    Err(crate::error::ErrorKind::InvalidFormat {
        element: name.to_string(),
        message: condition.to_string(),
    }
    .into())
}
