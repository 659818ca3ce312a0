//! Fee operator: adds fee amounts to the loan context for a window of
//! periods.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::context::EffectiveContext;
use crate::error::LoanError;
use crate::frequency::Frequency;
use crate::operators::{Operator, PeriodWindow};
use crate::types::Money;
use crate::LoanResult;

/// Options recognised by the engine's `fee()` entry point.
///
/// An upfront fee is charged in period 1 only; an ongoing fee carries its
/// own window and quoting frequency. Supplying neither registers nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upfront_fee: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ongoing_fee: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_period: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_period: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ongoing_fee_frequency: Option<Frequency>,
}

/// Accumulates a fee, rescaled to the repayment period, into the context
/// of every period in its window.
#[derive(Debug, Clone)]
pub struct FeeOperator {
    window: PeriodWindow,
    fee: Money,
    fee_frequency: Frequency,
}

impl FeeOperator {
    pub fn new(window: PeriodWindow, fee: Money, fee_frequency: Frequency) -> Self {
        FeeOperator {
            window,
            fee,
            fee_frequency,
        }
    }
}

impl Operator for FeeOperator {
    fn kind(&self) -> &'static str {
        "fee"
    }

    fn window(&self) -> PeriodWindow {
        self.window
    }

    fn process(&self, _period: u32, context: &mut EffectiveContext) -> LoanResult<()> {
        let repay = context.config.repayment_frequency.per_year();
        if repay == 0 {
            return Err(LoanError::DivisionByZero {
                context: "fee repayment frequency".into(),
            });
        }
        let amount =
            self.fee * Decimal::from(self.fee_frequency.per_year()) / Decimal::from(repay);
        context.add_fee(amount);
        Ok(())
    }
}
