use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::frequency::Frequency;
use crate::time_value;
use crate::types::{Money, Rate};
use crate::LoanResult;

/// Core values used in the calculation ie. `principal`, `term`...
///
/// Construct partially with struct-update syntax; unset fields take the
/// defaults (rate and term quoted yearly, repayments monthly).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanContext {
    pub principal: Money,
    pub interest_rate: Rate,
    pub interest_rate_frequency: Frequency,
    pub term: Decimal,
    pub term_frequency: Frequency,
    pub repayment_frequency: Frequency,
}

impl Default for LoanContext {
    fn default() -> Self {
        LoanContext {
            principal: Decimal::ZERO,
            interest_rate: Decimal::ZERO,
            interest_rate_frequency: Frequency::Yearly,
            term: Decimal::ZERO,
            term_frequency: Frequency::Yearly,
            repayment_frequency: Frequency::Monthly,
        }
    }
}

impl LoanContext {
    /// Calculate the interest rate per repayment period.
    pub fn eff_interest_rate(&self) -> LoanResult<Rate> {
        time_value::eff_interest_rate(
            self.interest_rate,
            self.interest_rate_frequency,
            self.repayment_frequency,
        )
    }

    /// Calculate the total number of repayment periods for the loan.
    pub fn eff_term(&self) -> LoanResult<Decimal> {
        time_value::eff_term(self.term, self.term_frequency, self.repayment_frequency)
    }
}

/// Partial overlay of [`LoanContext`] configuration fields.
///
/// `apply` overwrites each field that is present; fields left `None` leave
/// the target untouched. Replacement only, never numeric combination.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanContextPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_rate_frequency: Option<Frequency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term_frequency: Option<Frequency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repayment_frequency: Option<Frequency>,
}

impl LoanContextPatch {
    pub fn apply(&self, target: &mut LoanContext) {
        if let Some(v) = self.principal {
            target.principal = v;
        }
        if let Some(v) = self.interest_rate {
            target.interest_rate = v;
        }
        if let Some(v) = self.interest_rate_frequency {
            target.interest_rate_frequency = v;
        }
        if let Some(v) = self.term {
            target.term = v;
        }
        if let Some(v) = self.term_frequency {
            target.term_frequency = v;
        }
        if let Some(v) = self.repayment_frequency {
            target.repayment_frequency = v;
        }
    }
}

/// Fully resolved configuration for a single period, plus the additive
/// fields operators accumulate into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectiveContext {
    #[serde(flatten)]
    pub config: LoanContext,
    /// Accumulated fee for this period. `None` when no fee operator ran.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee: Option<Money>,
}

impl EffectiveContext {
    pub fn new(config: LoanContext) -> Self {
        EffectiveContext { config, fee: None }
    }

    pub fn eff_interest_rate(&self) -> LoanResult<Rate> {
        self.config.eff_interest_rate()
    }

    /// Accumulate into the additive `fee` field. Fees from multiple
    /// operators stack rather than overwrite.
    pub fn add_fee(&mut self, amount: Money) {
        self.fee = Some(self.fee.unwrap_or(Decimal::ZERO) + amount);
    }
}
