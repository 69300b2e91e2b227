use thiserror::Error;

#[derive(Debug, Error)]
pub enum CarPaymentError {
    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Arithmetic overflow in {context}")]
    ArithmeticOverflow { context: String },
}
