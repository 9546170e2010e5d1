use super::Error;

/// A type name with no entry in the accessor map.
#[derive(Debug)]
pub(super) struct UnsupportedTypeError {
    type_name: Box<str>,
}

impl std::error::Error for UnsupportedTypeError {}

impl core::fmt::Display for UnsupportedTypeError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unsupported type `{}`", self.type_name)
    }
}

impl Error {
    /// Creates an error for a type the accessor map cannot read.
    pub fn unsupported_type(type_name: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnsupportedType(UnsupportedTypeError {
            type_name: type_name.into().into(),
        }))
    }

    pub fn is_unsupported_type(&self) -> bool {
        matches!(self.root_kind(), super::ErrorKind::UnsupportedType(_))
    }
}
