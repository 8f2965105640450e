// Error types shared by the grid, config and reveal modules

use std::fmt;

/// Result type for reveal operations
pub type RevealResult<T> = Result<T, RevealError>;

/// Errors that can occur outside the (infallible) scheduling core
#[derive(Debug, Clone, PartialEq)]
pub enum RevealError {
    InvalidCoordinates {
        row: usize,
        col: usize,
        max_row: usize,
        max_col: usize,
    },
    ConfigurationError(String),
    Io(String),
    Parse(String),
}

impl fmt::Display for RevealError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RevealError::InvalidCoordinates {
                row,
                col,
                max_row,
                max_col,
            } => {
                write!(
                    f,
                    "Invalid coordinates ({}, {}), max is ({}, {})",
                    row, col, max_row, max_col
                )
            }
            RevealError::ConfigurationError(msg) => write!(f, "Configuration error: {}", msg),
            RevealError::Io(msg) => write!(f, "I/O error: {}", msg),
            RevealError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for RevealError {}

impl From<std::io::Error> for RevealError {
    fn from(err: std::io::Error) -> Self {
        RevealError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for RevealError {
    fn from(err: serde_json::Error) -> Self {
        RevealError::Parse(err.to_string())
    }
}

/// Validate a coordinate pair against grid bounds
pub fn validate_coordinates(row: usize, col: usize, rows: usize, cols: usize) -> RevealResult<()> {
    if row >= rows || col >= cols {
        return Err(RevealError::InvalidCoordinates {
            row,
            col,
            max_row: rows.saturating_sub(1),
            max_col: cols.saturating_sub(1),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_coordinates() {
        assert!(validate_coordinates(0, 0, 1, 1).is_ok());
        assert!(validate_coordinates(3, 2, 4, 3).is_ok());

        let err = validate_coordinates(4, 0, 4, 4).unwrap_err();
        assert_eq!(
            err,
            RevealError::InvalidCoordinates {
                row: 4,
                col: 0,
                max_row: 3,
                max_col: 3
            }
        );
        assert_eq!(err.to_string(), "Invalid coordinates (4, 0), max is (3, 3)");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.json");
        let err: RevealError = io.into();
        assert!(matches!(err, RevealError::Io(ref msg) if msg.contains("missing.json")));
    }
}
