//! Interest-rate operator: a time-scoped nominal-rate override, eg. an
//! introductory rate for the first year of a loan.

use serde::{Deserialize, Serialize};

use crate::context::{EffectiveContext, LoanContextPatch};
use crate::frequency::Frequency;
use crate::operators::{Operator, PeriodWindow};
use crate::types::Rate;
use crate::LoanResult;

/// Options recognised by the engine's `interest_rate()` entry point.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InterestRateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_rate_frequency: Option<Frequency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_period: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_period: Option<u32>,
}

/// Overrides the nominal rate (and optionally its quoting frequency) while
/// active. A pure configuration overlay: all work happens in the resolver
/// merge, nothing accumulates.
#[derive(Debug, Clone)]
pub struct InterestRateOperator {
    window: PeriodWindow,
    interest_rate: Rate,
    interest_rate_frequency: Option<Frequency>,
}

impl InterestRateOperator {
    pub fn new(
        window: PeriodWindow,
        interest_rate: Rate,
        interest_rate_frequency: Option<Frequency>,
    ) -> Self {
        InterestRateOperator {
            window,
            interest_rate,
            interest_rate_frequency,
        }
    }
}

impl Operator for InterestRateOperator {
    fn kind(&self) -> &'static str {
        "interest-rate"
    }

    fn window(&self) -> PeriodWindow {
        self.window
    }

    fn patch(&self) -> LoanContextPatch {
        LoanContextPatch {
            interest_rate: Some(self.interest_rate),
            interest_rate_frequency: self.interest_rate_frequency,
            ..LoanContextPatch::default()
        }
    }

    fn process(&self, _period: u32, _context: &mut EffectiveContext) -> LoanResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_patch_carries_rate_override() {
        let operator = InterestRateOperator::new(
            PeriodWindow::new(1, Some(12)).unwrap(),
            dec!(0.03),
            Some(Frequency::Yearly),
        );
        let patch = operator.patch();
        assert_eq!(patch.interest_rate, Some(dec!(0.03)));
        assert_eq!(patch.interest_rate_frequency, Some(Frequency::Yearly));
        assert_eq!(patch.principal, None);
    }
}
