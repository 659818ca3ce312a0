use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::context::{EffectiveContext, LoanContext};
use crate::error::LoanError;
use crate::frequency::Frequency;
use crate::operators::{
    FeeOperator, FeeOptions, InterestRateOperator, InterestRateOptions, Operator,
    OperatorRegistry, PeriodWindow,
};
use crate::resolver;
use crate::time_value;
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::LoanResult;

/// Hard ceiling on schedule length. The loop bound is derived once from
/// user input, so an absurd effective term is rejected rather than
/// iterated.
pub const MAX_SCHEDULE_PERIODS: u32 = 10_000;

// ---------------------------------------------------------------------------
// Schedule types
// ---------------------------------------------------------------------------

/// One period of the amortisation schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSummaryItem {
    pub period: u32,
    pub principal_initial_balance: Money,
    pub principal_final_balance: Money,
    pub interest_paid: Money,
    pub principal_paid: Money,
    pub pmt: Money,
}

/// Totals folded over the summary list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTotals {
    pub pmt: Money,
    pub interest_paid: Money,
}

/// Full calculation result: the per-period breakdown plus totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSchedule {
    pub summary_list: Vec<LoanSummaryItem>,
    pub totals: LoanTotals,
}

/// Serde-friendly request: a base context plus the optional convenience
/// operator options. Shared by the CLI and the Node bindings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanRequest {
    pub context: LoanContext,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee: Option<FeeOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<InterestRateOptions>,
}

impl LoanRequest {
    pub fn into_engine(self) -> LoanResult<LoanCalculatorEngine> {
        let mut engine = LoanCalculatorEngine::new(self.context)?;
        if let Some(options) = self.fee {
            engine.fee(options)?;
        }
        if let Some(options) = self.interest_rate {
            engine.interest_rate(options)?;
        }
        Ok(engine)
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Calculates a loan and its amortisation schedule.
///
/// Owns the base context and the operator registry for its lifetime;
/// `calculate` never mutates engine state, so repeated calls yield
/// identical results.
pub struct LoanCalculatorEngine {
    base_context: LoanContext,
    registry: OperatorRegistry,
}

impl LoanCalculatorEngine {
    pub fn new(context: LoanContext) -> LoanResult<Self> {
        if context.principal < Decimal::ZERO {
            return Err(LoanError::InvalidInput {
                field: "principal".into(),
                reason: "Principal must not be negative".into(),
            });
        }
        if context.term < Decimal::ZERO {
            return Err(LoanError::InvalidInput {
                field: "term".into(),
                reason: "Term must not be negative".into(),
            });
        }
        if context.interest_rate <= dec!(-1) {
            return Err(LoanError::InvalidInput {
                field: "interest_rate".into(),
                reason: "Interest rate must be greater than -100%".into(),
            });
        }

        Ok(LoanCalculatorEngine {
            base_context: context,
            registry: OperatorRegistry::default(),
        })
    }

    pub fn base_context(&self) -> &LoanContext {
        &self.base_context
    }

    pub fn add_operator(&mut self, operator: Box<dyn Operator>) -> &mut Self {
        self.registry.register(operator);
        self
    }

    /// Register fee operators from the given options.
    ///
    /// An `upfront_fee` becomes a fee active in period 1 only, quoted at
    /// the base repayment frequency; an `ongoing_fee` takes the caller's
    /// window and frequency. Neither option present registers nothing and
    /// the call stays chainable.
    pub fn fee(&mut self, options: FeeOptions) -> LoanResult<&mut Self> {
        if let Some(amount) = options.upfront_fee {
            let window = PeriodWindow::new(1, Some(1))?;
            self.add_operator(Box::new(FeeOperator::new(
                window,
                amount,
                self.base_context.repayment_frequency,
            )));
        }

        if let Some(amount) = options.ongoing_fee {
            let window = PeriodWindow::new(options.start_period.unwrap_or(1), options.end_period)?;
            let frequency = options.ongoing_fee_frequency.unwrap_or(Frequency::Monthly);
            self.add_operator(Box::new(FeeOperator::new(window, amount, frequency)));
        }

        Ok(self)
    }

    /// Register an introductory-rate operator from the given options.
    /// Absent `interest_rate` registers nothing.
    pub fn interest_rate(&mut self, options: InterestRateOptions) -> LoanResult<&mut Self> {
        if let Some(rate) = options.interest_rate {
            let window = PeriodWindow::new(options.start_period.unwrap_or(1), options.end_period)?;
            self.add_operator(Box::new(InterestRateOperator::new(
                window,
                rate,
                options.interest_rate_frequency,
            )));
        }

        Ok(self)
    }

    /// Operators active at `period`, in registration order.
    pub fn operators_at(&self, period: u32) -> Vec<&dyn Operator> {
        self.registry.active_at(period)
    }

    /// Fully resolved context at `period`: the flattened configuration
    /// plus every active operator's accumulated fields.
    pub fn context_at(&self, period: u32) -> LoanResult<EffectiveContext> {
        if period == 0 {
            return Err(LoanError::InvalidInput {
                field: "period".into(),
                reason: "Periods are 1-indexed".into(),
            });
        }

        let active = self.registry.active_at(period);
        let config = resolver::resolve(&self.base_context, &active);
        let mut context = EffectiveContext::new(config);
        for operator in active {
            operator.process(period, &mut context)?;
        }
        Ok(context)
    }

    /// Calculate the loan and its amortisation schedule.
    pub fn calculate(&self) -> LoanResult<ComputationOutput<LoanSchedule>> {
        let start = Instant::now();
        let mut warnings: Vec<String> = Vec::new();

        let eff_term = self.base_context.eff_term()?;
        let number_of_periods = schedule_length(eff_term, &mut warnings)?;

        let mut summary_list = Vec::with_capacity(number_of_periods as usize);
        let mut previous_final_balance = self.base_context.principal;

        for current_period in 1..=number_of_periods {
            // Resolve the current context, taking all active operators
            // into account
            let context = self.context_at(current_period)?;
            let interest_rate = context.eff_interest_rate()?;
            let periods_left = number_of_periods - current_period + 1;

            let pmt = time_value::pmt(previous_final_balance, interest_rate, periods_left)?;
            let interest_paid = previous_final_balance * interest_rate;
            let principal_paid = pmt - interest_paid;
            let final_balance = previous_final_balance - principal_paid;

            summary_list.push(LoanSummaryItem {
                period: current_period,
                principal_initial_balance: previous_final_balance,
                principal_final_balance: final_balance,
                interest_paid,
                principal_paid,
                pmt,
            });

            previous_final_balance = final_balance;
        }

        // Explicit zero seeds so a zero-period loan folds to zero totals
        let totals = summary_list.iter().fold(
            LoanTotals {
                pmt: Decimal::ZERO,
                interest_paid: Decimal::ZERO,
            },
            |acc, item| LoanTotals {
                pmt: acc.pmt + item.pmt,
                interest_paid: acc.interest_paid + item.interest_paid,
            },
        );

        let schedule = LoanSchedule {
            summary_list,
            totals,
        };

        let elapsed = start.elapsed().as_micros() as u64;
        Ok(with_metadata(
            "Fixed-Payment Amortisation Schedule",
            &serde_json::json!({
                "principal": self.base_context.principal.to_string(),
                "interest_rate": self.base_context.interest_rate.to_string(),
                "term": self.base_context.term.to_string(),
                "repayment_frequency": self.base_context.repayment_frequency.to_string(),
                "operators": self.registry.len(),
            }),
            warnings,
            elapsed,
            schedule,
        ))
    }
}

/// Loop bound from the effective term: truncated to whole periods, with a
/// warning when truncation discards a fraction.
fn schedule_length(eff_term: Decimal, warnings: &mut Vec<String>) -> LoanResult<u32> {
    if eff_term < Decimal::ZERO {
        return Err(LoanError::InvalidInput {
            field: "term".into(),
            reason: "Effective term must not be negative".into(),
        });
    }

    let whole = eff_term.trunc();
    if whole > Decimal::from(MAX_SCHEDULE_PERIODS) {
        return Err(LoanError::ScheduleTooLong {
            periods: eff_term,
            max: MAX_SCHEDULE_PERIODS,
        });
    }
    if eff_term != whole {
        warnings.push(format!(
            "Effective term {} truncated to {} whole periods",
            eff_term, whole
        ));
    }

    // Non-negative and bounded above, so the conversion cannot fail
    Ok(whole.to_u32().unwrap_or(0))
}
