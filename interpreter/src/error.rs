use std::fmt;

#[derive(Debug)]
pub enum RuntimeError {
    InvalidRange { start: u64, end: u64 },
    UnknownEncoding(String),
    IoError(String),
    Custom(String),
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::InvalidRange { start, end } => {
                write!(
                    f,
                    "invalid range {}..={}: start must be at least 1 and not after end",
                    start, end
                )
            }
            RuntimeError::UnknownEncoding(name) => write!(
                f,
                "unknown encoding '{}' (expected direct, structures or continuation)",
                name
            ),
            RuntimeError::IoError(msg) => write!(f, "I/O error: {}", msg),
            RuntimeError::Custom(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for RuntimeError {}

impl From<std::io::Error> for RuntimeError {
    fn from(error: std::io::Error) -> Self {
        RuntimeError::IoError(error.to_string())
    }
}
