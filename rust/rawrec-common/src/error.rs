use arrow_schema::ArrowError;
use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

pub type StdErrorBoxed = Box<dyn std::error::Error + Send + Sync + 'static>;

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn invalid_format(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidFormat {
                element: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidArgument {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn row_out_of_range(row: usize, len: usize) -> Error {
        Error(ErrorKind::RowOutOfRange { row, len }.into())
    }

    pub fn dictionary_index_out_of_bounds(index: i128, len: usize) -> Error {
        Error(ErrorKind::DictionaryIndexOutOfBounds { index, len }.into())
    }

    pub fn unsupported_type(data_type: impl ToString) -> Error {
        Error(
            ErrorKind::UnsupportedType {
                data_type: data_type.to_string(),
            }
            .into(),
        )
    }

    pub fn invalid_utf8(row: usize, source: std::str::Utf8Error) -> Error {
        Error(ErrorKind::InvalidUtf8 { row, source }.into())
    }

    pub fn column_not_found(name: impl Into<String>) -> Error {
        Error(ErrorKind::ColumnNotFound { name: name.into() }.into())
    }

    pub fn schema_mismatch(batch: usize, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::SchemaMismatch {
                batch,
                message: message.into(),
            }
            .into(),
        )
    }

    /// Attaches the column name and the table row at which decoding failed.
    pub fn decode(column: impl Into<String>, row: usize, source: Error) -> Error {
        Error(
            ErrorKind::Decode {
                column: column.into(),
                row,
                source,
            }
            .into(),
        )
    }

    pub fn arrow<E>(context: impl Into<String>, source: E) -> Error
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error(
            ErrorKind::Arrow {
                context: context.into(),
                source: Box::new(source),
            }
            .into(),
        )
    }

    /// Returns the innermost error, looking through `Decode` context layers.
    pub fn root_kind(&self) -> &ErrorKind {
        match self.kind() {
            ErrorKind::Decode { source, .. } => source.root_kind(),
            kind => kind,
        }
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error("invalid data format for '{element}': {message}")]
    InvalidFormat { element: String, message: String },

    #[error("row index {row} is out of range for length {len}")]
    RowOutOfRange { row: usize, len: usize },

    #[error("dictionary index {index} is out of bounds for dictionary of length {len}")]
    DictionaryIndexOutOfBounds { index: i128, len: usize },

    #[error("unsupported data type {data_type}")]
    UnsupportedType { data_type: String },

    #[error("invalid UTF-8 text at row {row}: {source}")]
    InvalidUtf8 {
        row: usize,
        source: std::str::Utf8Error,
    },

    #[error("column '{name}' not found")]
    ColumnNotFound { name: String },

    #[error("schema of batch {batch} does not match the table schema: {message}")]
    SchemaMismatch { batch: usize, message: String },

    #[error("failed to decode column '{column}' at row {row}: {source}")]
    Decode {
        column: String,
        row: usize,
        source: Error,
    },

    #[error("Arrow error: {context}")]
    Arrow {
        context: String,
        source: StdErrorBoxed,
    },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}

impl From<ArrowError> for Error {
    fn from(e: ArrowError) -> Self {
        Error::arrow("", e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::row_out_of_range(5, 3);
        assert_eq!(err.to_string(), "row index 5 is out of range for length 3");

        let err = Error::dictionary_index_out_of_bounds(-1, 2);
        assert_eq!(
            err.to_string(),
            "dictionary index -1 is out of bounds for dictionary of length 2"
        );
    }

    #[test]
    fn test_root_kind_through_decode_context() {
        let inner = Error::dictionary_index_out_of_bounds(7, 2);
        let outer = Error::decode("tags", 11, Error::decode("inner", 3, inner));
        assert!(matches!(outer.kind(), ErrorKind::Decode { row: 11, .. }));
        assert!(matches!(
            outer.root_kind(),
            ErrorKind::DictionaryIndexOutOfBounds { index: 7, len: 2 }
        ));
        assert!(outer.to_string().starts_with("failed to decode column 'tags' at row 11"));
    }

    #[test]
    fn test_from_arrow_error() {
        let err: Error = ArrowError::InvalidArgumentError("bad".into()).into();
        assert!(matches!(err.kind(), ErrorKind::Arrow { .. }));
    }
}
