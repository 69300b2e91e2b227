pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "auto_loan")]
pub mod auto_loan;

pub use error::CarPaymentError;
pub use types::*;

/// Standard result type for all car-payment operations
pub type CarPaymentResult<T> = Result<T, CarPaymentError>;
