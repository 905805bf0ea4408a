pub mod error;
pub mod schedule;
pub mod types;

pub use error::AmortizeError;
pub use types::*;

/// Standard result type for all amortize operations
pub type AmortizeResult<T> = Result<T, AmortizeError>;
