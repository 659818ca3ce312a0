use crate::context::LoanContext;
use crate::operators::Operator;

/// Flatten the base configuration and the patches of all operators active
/// in a period into one effective configuration.
///
/// Precedence, lowest to highest: field defaults, the engine's base
/// context, then each active operator's patch in registration order.
/// Later entries overwrite same-named fields of earlier ones; additive
/// quantities are handled by `Operator::process` afterwards, never here.
pub fn resolve(base: &LoanContext, active: &[&dyn Operator]) -> LoanContext {
    let mut target = base.clone();
    for operator in active {
        operator.patch().apply(&mut target);
    }
    target
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::{InterestRateOperator, PeriodWindow};
    use rust_decimal_macros::dec;

    fn window() -> PeriodWindow {
        PeriodWindow::new(1, None).unwrap()
    }

    #[test]
    fn test_no_active_operators_returns_base() {
        let base = LoanContext {
            principal: dec!(50000),
            interest_rate: dec!(0.07),
            ..LoanContext::default()
        };
        let resolved = resolve(&base, &[]);
        assert_eq!(resolved, base);
    }

    #[test]
    fn test_later_registered_patch_wins() {
        let base = LoanContext {
            interest_rate: dec!(0.07),
            ..LoanContext::default()
        };
        let first = InterestRateOperator::new(window(), dec!(0.05), None);
        let second = InterestRateOperator::new(window(), dec!(0.04), None);

        let active: Vec<&dyn Operator> = vec![&first, &second];
        let resolved = resolve(&base, &active);
        assert_eq!(resolved.interest_rate, dec!(0.04));

        // Registration order decides, so swapping the sequence flips the winner
        let active: Vec<&dyn Operator> = vec![&second, &first];
        let resolved = resolve(&base, &active);
        assert_eq!(resolved.interest_rate, dec!(0.05));
    }
}
