pub mod fee;
pub mod interest_rate;

pub use fee::{FeeOperator, FeeOptions};
pub use interest_rate::{InterestRateOperator, InterestRateOptions};

use serde::{Deserialize, Serialize};

use crate::context::{EffectiveContext, LoanContextPatch};
use crate::error::LoanError;
use crate::LoanResult;

/// Inclusive activation range for an operator. `end = None` is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodWindow {
    pub start: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<u32>,
}

impl PeriodWindow {
    pub fn new(start: u32, end: Option<u32>) -> LoanResult<Self> {
        if start == 0 {
            return Err(LoanError::InvalidInput {
                field: "start_period".into(),
                reason: "Periods are 1-indexed".into(),
            });
        }
        if let Some(end) = end {
            if end < start {
                return Err(LoanError::InvalidPeriodWindow { start, end });
            }
        }
        Ok(PeriodWindow { start, end })
    }

    /// Both bounds inclusive.
    pub fn contains(self, period: u32) -> bool {
        period >= self.start && self.end.map_or(true, |end| period <= end)
    }
}

/// A time-scoped adjustment applied to the per-period loan context.
///
/// Configuration overlays go through [`Operator::patch`] and are merged by
/// the resolver with last-write-wins precedence; additive quantities go
/// through [`Operator::process`] and stack across operators. The two paths
/// must not be mixed.
pub trait Operator {
    /// Discriminator, eg. "fee".
    fn kind(&self) -> &'static str;

    fn window(&self) -> PeriodWindow;

    /// Configuration fields this operator overlays onto the base context.
    fn patch(&self) -> LoanContextPatch {
        LoanContextPatch::default()
    }

    /// Accumulate into the additive fields of an already-resolved context.
    /// Must never overwrite configuration fields.
    fn process(&self, period: u32, context: &mut EffectiveContext) -> LoanResult<()>;

    fn is_active_at(&self, period: u32) -> bool {
        self.window().contains(period)
    }
}

/// Ordered list of registered operators. Registration order, not
/// activation order, decides merge precedence.
#[derive(Default)]
pub struct OperatorRegistry {
    operators: Vec<Box<dyn Operator>>,
}

impl OperatorRegistry {
    pub fn register(&mut self, operator: Box<dyn Operator>) {
        self.operators.push(operator);
    }

    /// Operators active at `period`, in registration order.
    pub fn active_at(&self, period: u32) -> Vec<&dyn Operator> {
        self.operators
            .iter()
            .filter(|operator| operator.is_active_at(period))
            .map(|operator| operator.as_ref())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::Frequency;
    use rust_decimal_macros::dec;

    #[test]
    fn test_window_bounds_inclusive() {
        let window = PeriodWindow::new(3, Some(5)).unwrap();
        assert!(!window.contains(2));
        assert!(window.contains(3));
        assert!(window.contains(5));
        assert!(!window.contains(6));
    }

    #[test]
    fn test_window_unbounded_end() {
        let window = PeriodWindow::new(4, None).unwrap();
        assert!(!window.contains(3));
        assert!(window.contains(4));
        assert!(window.contains(10_000));
    }

    #[test]
    fn test_window_end_before_start_rejected() {
        let err = PeriodWindow::new(5, Some(3)).unwrap_err();
        assert!(matches!(
            err,
            LoanError::InvalidPeriodWindow { start: 5, end: 3 }
        ));
    }

    #[test]
    fn test_window_zero_start_rejected() {
        assert!(PeriodWindow::new(0, None).is_err());
    }

    #[test]
    fn test_registry_filters_in_registration_order() {
        let mut registry = OperatorRegistry::default();
        registry.register(Box::new(FeeOperator::new(
            PeriodWindow::new(1, Some(1)).unwrap(),
            dec!(100),
            Frequency::Monthly,
        )));
        registry.register(Box::new(FeeOperator::new(
            PeriodWindow::new(1, None).unwrap(),
            dec!(10),
            Frequency::Monthly,
        )));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.active_at(1).len(), 2);
        assert_eq!(registry.active_at(2).len(), 1);
    }
}
