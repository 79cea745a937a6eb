pub mod amortization;
pub mod error;
pub mod types;

#[cfg(feature = "comparison")]
pub mod comparison;

#[cfg(feature = "report")]
pub mod report;

pub use error::MortgageError;
pub use types::*;

/// Standard result type for all mortgage engine operations
pub type MortgageResult<T> = Result<T, MortgageError>;
