use thiserror::Error;

pub type Result<T> = std::result::Result<T, SeatdrawError>;

#[derive(Error, Debug)]
pub enum SeatdrawError {
    #[error("All seats are taken ({capacity} of {capacity} assigned)")]
    CapacityExhausted { capacity: u32 },

    #[error("No lottery number left in 1..={max}")]
    NumberSpaceExhausted { max: u32 },

    #[error("Stored participant data is corrupt: {0}")]
    StorageCorrupt(String),

    #[error("Participant not found: {id}")]
    NotFound { id: String },

    #[error("Invalid participant route: {0}")]
    InvalidRoute(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Dialog error: {0}")]
    Dialog(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SeatdrawError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn corrupt(msg: impl Into<String>) -> Self {
        Self::StorageCorrupt(msg.into())
    }

    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    pub fn invalid_route(msg: impl Into<String>) -> Self {
        Self::InvalidRoute(msg.into())
    }

    pub fn dialog(msg: impl Into<String>) -> Self {
        Self::Dialog(msg.into())
    }

    /// Allocation failures the user can simply try again on.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::CapacityExhausted { .. } | Self::NumberSpaceExhausted { .. }
        )
    }
}

// conversion from dialoguer::Error
impl From<dialoguer::Error> for SeatdrawError {
    fn from(err: dialoguer::Error) -> Self {
        SeatdrawError::Dialog(err.to_string())
    }
}
