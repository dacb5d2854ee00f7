use super::Error;

/// A required member has no matching column in the cursor.
///
/// Raised once per read, while resolving column ordinals, before any row is
/// materialized.
#[derive(Debug)]
pub(super) struct ColumnNotFoundError {
    column: Box<str>,
}

impl std::error::Error for ColumnNotFoundError {}

impl core::fmt::Display for ColumnNotFoundError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "column `{}` not found", self.column)
    }
}

impl Error {
    /// Creates a column-not-found error.
    pub fn column_not_found(column: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::ColumnNotFound(ColumnNotFoundError {
            column: column.into().into(),
        }))
    }

    /// Returns `true` if this error is a column-not-found error.
    pub fn is_column_not_found(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::ColumnNotFound(_))
    }
}
