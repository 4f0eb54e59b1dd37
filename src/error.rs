//! Error types for coordkit

use std::fmt;
use std::io;

/// Result type for coordkit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while parsing, converting or formatting coordinates
#[derive(Debug)]
pub enum Error {
    /// I/O error
    Io(io::Error),

    /// CSV reading or writing error
    Csv(csv::Error),

    /// Input cannot be tokenized into the expected groups
    MalformedInput(String),

    /// Degrees, minutes or seconds outside the bounds of the axis
    OutOfRange(String),

    /// A combined string could not be divided into latitude and longitude
    SplitAmbiguous(String),

    /// Invalid MGRS or GARS reference
    InvalidGridReference(String),

    /// Unsupported feature or notation
    Unsupported(String),

    /// Invalid configuration or failed initialization
    Config(String),

    /// Projection setup or transformation error
    Projection(String),
}

impl Error {
    /// Returns true for rejections that no other parsing strategy may override
    pub fn is_terminal(&self) -> bool {
        matches!(self, Error::OutOfRange(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::Csv(e) => write!(f, "CSV error: {}", e),
            Error::MalformedInput(msg) => write!(f, "Malformed input: {}", msg),
            Error::OutOfRange(msg) => write!(f, "Out of range: {}", msg),
            Error::SplitAmbiguous(msg) => write!(f, "Ambiguous split: {}", msg),
            Error::InvalidGridReference(msg) => write!(f, "Invalid grid reference: {}", msg),
            Error::Unsupported(msg) => write!(f, "Unsupported: {}", msg),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::Projection(msg) => write!(f, "Projection error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Csv(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Error::Io(error)
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Error::Csv(error)
    }
}
