use super::Error;

/// A non-nullable accessor read a NULL column.
#[derive(Debug)]
pub(super) struct UnexpectedNullError {
    column: Box<str>,
}

impl std::error::Error for UnexpectedNullError {}

impl core::fmt::Display for UnexpectedNullError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unexpected NULL in non-nullable column `{}`", self.column)
    }
}

impl Error {
    pub fn unexpected_null(column: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnexpectedNull(UnexpectedNullError {
            column: column.into().into(),
        }))
    }

    pub fn is_unexpected_null(&self) -> bool {
        matches!(self.root_kind(), super::ErrorKind::UnexpectedNull(_))
    }
}
