use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoanError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Invalid period window: end period {end} precedes start period {start}")]
    InvalidPeriodWindow { start: u32, end: u32 },

    #[error("Effective term of {periods} periods exceeds the supported maximum of {max}")]
    ScheduleTooLong { periods: Decimal, max: u32 },
}
