use crate::Error;

/// A driver could not make sense of its connection URL.
#[derive(Debug)]
pub(super) struct InvalidConnectionUrlError {
    message: Box<str>,
}

impl Error {
    /// Creates an error for a malformed or unsupported connection URL.
    pub fn invalid_connection_url(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidConnectionUrl(
            InvalidConnectionUrlError {
                message: message.into().into_boxed_str(),
            },
        ))
    }

    pub fn is_invalid_connection_url(&self) -> bool {
        matches!(self.root_kind(), super::ErrorKind::InvalidConnectionUrl(_))
    }
}

impl std::fmt::Display for InvalidConnectionUrlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid connection URL: {}", self.message)
    }
}
