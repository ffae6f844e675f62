//! Errors surfaced by the parsers.
//!
//! Only failures to obtain a decoded document are errors. Schema deviations
//! inside a decoded document are absorbed by the parsers and never reach here.

/// Failure to read or decode a scanner report.
#[derive(Debug, thiserror::Error)]
pub enum ParsingError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ParsingError {
    /// Check if this error came from the underlying source rather than its content.
    pub fn is_io(&self) -> bool {
        match self {
            Self::Io(_) => true,
            Self::Decode(e) => e.is_io(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsing_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.json");
        let err: ParsingError = io_err.into();
        assert!(matches!(err, ParsingError::Io(_)));
        assert!(err.is_io());
        assert_eq!(err.to_string(), "I/O error: missing.json");
    }

    #[test]
    fn parsing_error_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("[{").unwrap_err();
        let err: ParsingError = serde_err.into();
        assert!(matches!(err, ParsingError::Decode(_)));
        assert!(!err.is_io());
    }
}
