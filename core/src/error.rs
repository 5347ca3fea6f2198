use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    /// Invalid ballot table. `row` is 1-based; 0 means the table as a whole.
    #[error("Malformed input at row {row}: {reason}")]
    MalformedInput { row: usize, reason: String },

    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SimError {
    pub fn malformed(row: usize, reason: impl Into<String>) -> Self {
        Self::MalformedInput { row, reason: reason.into() }
    }

    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter { name, reason: reason.into() }
    }
}

pub type SimResult<T> = Result<T, SimError>;
