use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaceError {
    #[error("Invalid configuration: {field} — {reason}")]
    InvalidConfig { field: String, reason: String },

    #[error("Work calendar yields zero work days — pacing unavailable")]
    ZeroWorkDays,

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for PaceError {
    fn from(e: serde_json::Error) -> Self {
        PaceError::SerializationError(e.to_string())
    }
}
