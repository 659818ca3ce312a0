use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::LoanError;
use crate::frequency::Frequency;
use crate::types::{Money, Rate};
use crate::LoanResult;

/// Convert a nominal rate quoted at `rate_frequency` into the equivalent
/// rate per repayment period.
pub fn eff_interest_rate(
    rate: Rate,
    rate_frequency: Frequency,
    repayment_frequency: Frequency,
) -> LoanResult<Rate> {
    let repay = repayment_frequency.per_year();
    if repay == 0 {
        return Err(LoanError::DivisionByZero {
            context: "effective interest rate repayment frequency".into(),
        });
    }
    Ok(rate * Decimal::from(rate_frequency.per_year()) / Decimal::from(repay))
}

/// Convert a loan duration quoted at `term_frequency` into a count of
/// repayment periods.
pub fn eff_term(
    term: Decimal,
    term_frequency: Frequency,
    repayment_frequency: Frequency,
) -> LoanResult<Decimal> {
    let per_year = term_frequency.per_year();
    if per_year == 0 {
        return Err(LoanError::DivisionByZero {
            context: "effective term frequency".into(),
        });
    }
    Ok(term / Decimal::from(per_year) * Decimal::from(repayment_frequency.per_year()))
}

/// Fixed payment that fully amortises `balance` over `periods` at `rate`
/// per period. A zero rate takes the straight-line branch.
pub fn pmt(balance: Money, rate: Rate, periods: u32) -> LoanResult<Money> {
    if periods == 0 {
        return Err(LoanError::InvalidInput {
            field: "periods".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }

    if rate.is_zero() {
        return Ok(balance / Decimal::from(periods));
    }

    if rate <= dec!(-1) {
        return Err(LoanError::InvalidInput {
            field: "rate".into(),
            reason: "Periodic rate must be greater than -100%".into(),
        });
    }

    let factor = (Decimal::ONE + rate).powd(Decimal::from(periods));
    let annuity_factor = factor - Decimal::ONE;
    if annuity_factor.is_zero() {
        return Err(LoanError::DivisionByZero {
            context: "PMT annuity factor".into(),
        });
    }

    Ok(balance * rate * factor / annuity_factor)
}
