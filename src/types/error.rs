use thiserror::Error;

/// spendtrack error types
#[derive(Error, Debug)]
pub enum SpendtrackError {
    /// Failed to parse an expense file
    #[error("parse error: {0}")]
    Parse(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Expense record that the aggregation layer must not see
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

/// Result type alias for spendtrack
pub type Result<T> = std::result::Result<T, SpendtrackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SpendtrackError::Parse("invalid json".into());
        assert_eq!(err.to_string(), "parse error: invalid json");
    }

    #[test]
    fn test_invalid_input_display() {
        let err = SpendtrackError::InvalidInput("cost is NaN".into());
        assert_eq!(err.to_string(), "invalid input: cost is NaN");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SpendtrackError = io_err.into();
        assert!(err.to_string().contains("io error"));
    }
}
