use super::Error;

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
    /// Creates an error for a column name the result set does not contain.
    pub fn column_not_found(column: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::ColumnNotFound(ColumnNotFoundError {
            column: column.into().into(),
        }))
    }

    /// Returns `true` if a requested column was missing from the row.
    pub fn is_column_not_found(&self) -> bool {
        matches!(self.root_kind(), super::ErrorKind::ColumnNotFound(_))
    }
}
