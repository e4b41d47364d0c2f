pub mod amortization;
pub mod error;
pub mod types;

#[cfg(feature = "scenarios")]
pub mod scenarios;

pub use error::LoanError;
pub use types::*;

/// Standard result type for all home-loan operations
pub type LoanResult<T> = Result<T, LoanError>;
