use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::amortization::schedule::Schedule;
use crate::types::Money;

/// Headline figures for a single schedule (the loan overview).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSummary {
    /// Opening principal.
    pub principal: Money,
    pub term_months: u32,
    pub paid_off: bool,
    pub total_principal_repaid: Money,
    pub total_interest: Money,
    pub total_payment: Money,
    pub final_balance: Money,
    /// Principal as a percentage of principal plus total interest.
    pub principal_share_pct: Option<Decimal>,
    /// Interest as a percentage of principal plus total interest.
    pub interest_share_pct: Option<Decimal>,
}

/// Summarise a schedule. Shares are `None` when there is nothing to split.
pub fn summarize(schedule: &Schedule) -> LoanSummary {
    let principal = schedule.principal.max(Decimal::ZERO);
    let total_interest = schedule.total_interest();
    let (principal_share_pct, interest_share_pct) = match principal.checked_add(total_interest) {
        Some(denominator) if denominator > Decimal::ZERO => (
            Some(principal / denominator * dec!(100)),
            Some(total_interest / denominator * dec!(100)),
        ),
        _ => (None, None),
    };

    LoanSummary {
        principal: schedule.principal,
        term_months: schedule.term_months(),
        paid_off: schedule.is_paid_off(),
        total_principal_repaid: schedule.total_principal(),
        total_interest,
        total_payment: schedule.total_payment(),
        final_balance: schedule.final_balance(),
        principal_share_pct,
        interest_share_pct,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::schedule::{compute_schedule, LoanTerms};
    use rust_decimal_macros::dec;

    #[test]
    fn test_summary_totals_match_schedule() {
        let schedule = compute_schedule(&LoanTerms::new(
            dec!(1_000_000),
            dec!(8.5),
            dec!(10_000),
            360,
        ));
        let summary = summarize(&schedule);

        assert_eq!(summary.term_months, 175);
        assert!(summary.paid_off);
        assert_eq!(summary.total_interest, schedule.total_interest());
        let diff =
            summary.total_payment - (summary.total_principal_repaid + summary.total_interest);
        assert!(diff.abs() < dec!(0.000001), "payment split drift {}", diff);
    }

    #[test]
    fn test_shares_sum_to_hundred() {
        let schedule =
            compute_schedule(&LoanTerms::new(dec!(250_000), dec!(6), dec!(3_000), 360));
        let summary = summarize(&schedule);

        let total = summary.principal_share_pct.unwrap() + summary.interest_share_pct.unwrap();
        assert!((total - dec!(100)).abs() < dec!(0.000001), "shares sum {}", total);
    }

    #[test]
    fn test_empty_schedule_has_no_shares() {
        let schedule =
            compute_schedule(&LoanTerms::new(Decimal::ZERO, dec!(6), dec!(3_000), 360));
        let summary = summarize(&schedule);

        assert_eq!(summary.term_months, 0);
        assert_eq!(summary.principal_share_pct, None);
        assert_eq!(summary.interest_share_pct, None);
    }
}
