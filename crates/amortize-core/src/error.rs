use thiserror::Error;

#[derive(Debug, Error)]
pub enum AmortizeError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },
}
