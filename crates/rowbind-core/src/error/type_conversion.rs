use super::Error;
use crate::Value;

/// Error when a stored value cannot be converted to the requested type.
#[derive(Debug)]
pub(super) struct TypeConversionError {
    value: Value,
    to_type: &'static str,
}

impl std::error::Error for TypeConversionError {}

impl core::fmt::Display for TypeConversionError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "cannot convert {} to {}",
            self.value.kind_name(),
            self.to_type
        )
    }
}

impl Error {
    /// Creates a conversion error for `value` targeting the Rust type `to_type`.
    pub fn type_conversion(value: Value, to_type: &'static str) -> Error {
        Error::from(super::ErrorKind::TypeConversion(TypeConversionError {
            value,
            to_type,
        }))
    }

    /// Returns `true` if a value could not be converted to the requested type.
    pub fn is_type_conversion(&self) -> bool {
        matches!(self.root_kind(), super::ErrorKind::TypeConversion(_))
    }
}
