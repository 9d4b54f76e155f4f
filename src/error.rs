use rust_decimal::Decimal;
use thiserror::Error;

/// Validation failures raised while normalizing a raw goal record.
///
/// These are raised immediately to the caller; the library never coerces a
/// malformed record into a default.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GoalError {
    #[error("goal name cannot be empty")]
    EmptyName,
    #[error("{field} cannot be negative (got {value})")]
    NegativeAmount { field: &'static str, value: Decimal },
}
