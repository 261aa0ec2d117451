//! Error types for the batch runner.
//!
//! Fatal errors unwind to the entry point, which shows the user a single
//! generic notice while the detailed message goes to the operational log.

use thiserror::Error;

/// Result type for batch runner operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while running a statement batch
#[derive(Error, Debug)]
pub enum Error {
    /// Input parameter count does not match the statement's placeholder count
    #[error("parameter count mismatch: statement expects {expected}, got {actual}")]
    ParameterCountMismatch { expected: usize, actual: usize },

    /// The database client reported a prepare/execute/fetch failure
    #[error("ERROR {code} ({state}): {message}")]
    Protocol {
        code: u16,
        state: String,
        message: String,
    },

    /// More rows were fetched than the server reported up front
    #[error("fetched {fetched} rows but the server reported {expected}")]
    RowCountMismatch { expected: u64, fetched: u64 },

    /// No report strategy applies to the statement's outcome
    #[error("cannot report result: {0}")]
    Report(String),

    /// Batch description file is missing a field or carries a wrong type
    #[error("invalid batch description: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    File(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<mysql::Error> for Error {
    fn from(err: mysql::Error) -> Self {
        match err {
            mysql::Error::MySqlError(e) => Error::Protocol {
                code: e.code,
                state: e.state,
                message: e.message,
            },
            other => Error::Protocol {
                code: 0,
                state: String::new(),
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_count_message_names_both_counts() {
        let err = Error::ParameterCountMismatch {
            expected: 3,
            actual: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains('3'));
        assert!(msg.contains('2'));
    }

    #[test]
    fn test_protocol_error_format() {
        let err = Error::Protocol {
            code: 1064,
            state: "42000".into(),
            message: "You have an error in your SQL syntax".into(),
        };
        assert_eq!(
            err.to_string(),
            "ERROR 1064 (42000): You have an error in your SQL syntax"
        );
    }
}
