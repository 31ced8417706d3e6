pub mod aggregate;
pub mod calendar;
pub mod cap;
pub mod error;
pub mod gaps;
pub mod goals;
pub mod insight;
pub mod kpi;
pub mod snapshot;
pub mod types;

pub use error::PaceError;
pub use types::*;

/// Standard result type for all pacing operations
pub type PaceResult<T> = Result<T, PaceError>;
