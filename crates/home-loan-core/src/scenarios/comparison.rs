//! Baseline vs. alternative schedule comparison.
//!
//! Runs the amortisation engine twice, once on the loan as it stands and
//! once with either a reduced principal (lump-sum prepayment) or a different
//! rate, and reports what the alternative saves.

use serde::{Deserialize, Serialize};

use crate::amortization::schedule::{compute_schedule, LoanTerms, Schedule};
use crate::types::{Money, Percent};

/// Two schedules for the same loan and the savings between them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioComparison {
    pub baseline: Schedule,
    pub alternative: Schedule,
    pub baseline_total_interest: Money,
    pub alternative_total_interest: Money,
    /// Baseline interest minus alternative interest.
    pub interest_savings: Money,
    pub baseline_months: u32,
    pub alternative_months: u32,
    /// Baseline length minus alternative length. Negative if the alternative
    /// runs longer.
    pub months_saved: i64,
}

impl ScenarioComparison {
    pub fn from_schedules(baseline: Schedule, alternative: Schedule) -> Self {
        let baseline_total_interest = baseline.total_interest();
        let alternative_total_interest = alternative.total_interest();
        let baseline_months = baseline.term_months();
        let alternative_months = alternative.term_months();

        Self {
            interest_savings: baseline_total_interest - alternative_total_interest,
            months_saved: i64::from(baseline_months) - i64::from(alternative_months),
            baseline_total_interest,
            alternative_total_interest,
            baseline_months,
            alternative_months,
            baseline,
            alternative,
        }
    }

    /// Whether both sides retired the loan. When false, the savings figures
    /// compare truncated or stalled schedules.
    pub fn all_paid_off(&self) -> bool {
        self.baseline.is_paid_off() && self.alternative.is_paid_off()
    }
}

/// Compare the loan as it stands against the same loan after a lump-sum
/// prepayment of `prepay_amount`.
///
/// A prepayment at or above the principal yields an empty, paid-off
/// alternative schedule.
pub fn compare_prepayment(terms: &LoanTerms, prepay_amount: Money) -> ScenarioComparison {
    let baseline = compute_schedule(terms);
    let remaining = terms.principal.saturating_sub(prepay_amount);
    let alternative = compute_schedule(&terms.with_principal(remaining));
    ScenarioComparison::from_schedules(baseline, alternative)
}

/// Compare the loan at its current rate against the same loan rewritten at
/// `new_rate_percent`.
pub fn compare_rate_change(terms: &LoanTerms, new_rate_percent: Percent) -> ScenarioComparison {
    let baseline = compute_schedule(terms);
    let alternative = compute_schedule(&terms.with_rate(new_rate_percent));
    ScenarioComparison::from_schedules(baseline, alternative)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn standard_terms() -> LoanTerms {
        LoanTerms::new(dec!(1_000_000), dec!(8.5), dec!(10_000), 360)
    }

    #[test]
    fn test_prepayment_saves_interest_and_months() {
        let cmp = compare_prepayment(&standard_terms(), dec!(100_000));

        assert_eq!(cmp.baseline_months, 175);
        assert_eq!(cmp.alternative_months, 144);
        assert_eq!(cmp.months_saved, 31);
        assert!(
            (cmp.interest_savings - dec!(208023.90)).abs() < dec!(0.01),
            "savings {}",
            cmp.interest_savings
        );
        assert!(cmp.all_paid_off());
    }

    #[test]
    fn test_zero_prepayment_saves_nothing() {
        let cmp = compare_prepayment(&standard_terms(), Decimal::ZERO);

        assert_eq!(cmp.interest_savings, Decimal::ZERO);
        assert_eq!(cmp.months_saved, 0);
        assert_eq!(cmp.baseline, cmp.alternative);
    }

    #[test]
    fn test_prepayment_above_principal_is_graceful() {
        let cmp = compare_prepayment(&standard_terms(), dec!(2_000_000));

        assert!(cmp.alternative.entries.is_empty());
        assert!(cmp.alternative.is_paid_off());
        assert_eq!(cmp.alternative_total_interest, Decimal::ZERO);
        assert_eq!(cmp.interest_savings, cmp.baseline_total_interest);
        assert_eq!(cmp.months_saved, 175);
    }

    #[test]
    fn test_prepayment_equal_to_principal() {
        let cmp = compare_prepayment(&standard_terms(), dec!(1_000_000));
        assert!(cmp.alternative.entries.is_empty());
        assert!(cmp.all_paid_off());
    }

    #[test]
    fn test_lower_rate_saves_interest() {
        let cmp = compare_rate_change(&standard_terms(), dec!(8.0));

        assert_eq!(cmp.alternative_months, 166);
        assert_eq!(cmp.months_saved, 9);
        assert!(
            (cmp.interest_savings - dec!(92246.23)).abs() < dec!(0.01),
            "savings {}",
            cmp.interest_savings
        );
    }

    #[test]
    fn test_higher_rate_costs_months() {
        let cmp = compare_rate_change(&standard_terms(), dec!(9.0));

        assert!(cmp.months_saved < 0);
        assert!(cmp.interest_savings < Decimal::ZERO);
    }

    #[test]
    fn test_truncated_comparison_is_not_all_paid_off() {
        let mut terms = standard_terms();
        terms.horizon_months = 100;
        let cmp = compare_prepayment(&terms, dec!(100_000));

        assert!(!cmp.all_paid_off());
        assert_eq!(cmp.months_saved, 0);
        assert!(cmp.interest_savings > Decimal::ZERO);
    }

    #[test]
    fn test_inputs_not_mutated() {
        let terms = standard_terms();
        let before = terms.clone();
        let _ = compare_prepayment(&terms, dec!(50_000));
        assert_eq!(terms, before);
    }
}
