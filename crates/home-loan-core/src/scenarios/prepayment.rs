//! Lump-sum prepayment analysis.
//!
//! Charges the optional prepayment fee, applies the net amount to principal,
//! and compares the shortened schedule against the loan as it stands. ROI is
//! measured against the gross amount the borrower hands over.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::schedule::{schedule_warnings, terms_warnings, LoanTerms, ScheduleEntry};
use crate::error::LoanError;
use crate::scenarios::comparison::{compare_prepayment, ScenarioComparison};
use crate::scenarios::metrics::prepayment_roi;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::LoanResult;

// ---------------------------------------------------------------------------
// Input / output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepaymentInput {
    pub loan: LoanTerms,
    /// Gross lump sum the borrower pays.
    pub prepayment_amount: Money,
    /// Lender's fee as a percentage of the gross amount (e.g., 1.0 = 1%).
    #[serde(default)]
    pub prepayment_fee_percent: Percent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepaymentOutput {
    pub prepayment_amount: Money,
    pub prepayment_fee: Money,
    /// Amount actually applied to principal.
    pub net_prepayment: Money,
    pub original_total_interest: Money,
    pub new_total_interest: Money,
    pub interest_savings: Money,
    pub original_months: u32,
    pub new_months: u32,
    pub months_saved: i64,
    /// Interest saved as a percentage of the gross prepayment.
    pub roi_pct: Option<Decimal>,
    /// False when either schedule stalled or ran out of horizon.
    pub all_paid_off: bool,
    pub original_schedule: Vec<ScheduleEntry>,
    pub new_schedule: Vec<ScheduleEntry>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Analyse the impact of a one-time prepayment.
pub fn analyze_prepayment(
    input: &PrepaymentInput,
) -> LoanResult<ComputationOutput<PrepaymentOutput>> {
    let start = Instant::now();
    let (output, warnings) = compute_prepayment(input)?;
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Lump-Sum Prepayment Comparison",
        input,
        warnings,
        elapsed,
        output,
    ))
}

pub(crate) fn compute_prepayment(
    input: &PrepaymentInput,
) -> LoanResult<(PrepaymentOutput, Vec<String>)> {
    validate(input)?;
    let mut warnings = terms_warnings(&input.loan);

    let prepayment_fee = input.prepayment_amount * (input.prepayment_fee_percent / dec!(100));
    let net_prepayment = input.prepayment_amount - prepayment_fee;

    if net_prepayment >= input.loan.principal && input.loan.principal > Decimal::ZERO {
        warnings.push(format!(
            "Net prepayment of {} retires the full principal of {}",
            net_prepayment, input.loan.principal
        ));
    }

    let cmp = compare_prepayment(&input.loan, net_prepayment);
    warnings.extend(comparison_warnings(&cmp));

    let roi_pct = prepayment_roi(cmp.interest_savings, input.prepayment_amount);
    let all_paid_off = cmp.all_paid_off();

    let output = PrepaymentOutput {
        prepayment_amount: input.prepayment_amount,
        prepayment_fee,
        net_prepayment,
        original_total_interest: cmp.baseline_total_interest,
        new_total_interest: cmp.alternative_total_interest,
        interest_savings: cmp.interest_savings,
        original_months: cmp.baseline_months,
        new_months: cmp.alternative_months,
        months_saved: cmp.months_saved,
        roi_pct,
        all_paid_off,
        original_schedule: cmp.baseline.entries,
        new_schedule: cmp.alternative.entries,
    };

    Ok((output, warnings))
}

fn comparison_warnings(cmp: &ScenarioComparison) -> Vec<String> {
    let mut warnings = schedule_warnings("Without prepayment", &cmp.baseline);
    warnings.extend(schedule_warnings("With prepayment", &cmp.alternative));
    warnings
}

fn validate(input: &PrepaymentInput) -> LoanResult<()> {
    if input.prepayment_amount < Decimal::ZERO {
        return Err(LoanError::InvalidInput {
            field: "prepayment_amount".into(),
            reason: "Prepayment amount cannot be negative".into(),
        });
    }
    if input.prepayment_fee_percent < Decimal::ZERO || input.prepayment_fee_percent > dec!(100)
    {
        return Err(LoanError::InvalidInput {
            field: "prepayment_fee_percent".into(),
            reason: "Prepayment fee must be between 0% and 100%".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const TOL: Decimal = dec!(0.01);

    fn standard_input() -> PrepaymentInput {
        PrepaymentInput {
            loan: LoanTerms::new(dec!(1_000_000), dec!(8.5), dec!(10_000), 360),
            prepayment_amount: dec!(100_000),
            prepayment_fee_percent: Decimal::ZERO,
        }
    }

    #[test]
    fn test_fee_free_prepayment() {
        let out = analyze_prepayment(&standard_input()).unwrap();
        let r = &out.result;

        assert_eq!(r.prepayment_fee, Decimal::ZERO);
        assert_eq!(r.net_prepayment, dec!(100_000));
        assert_eq!(r.original_months, 175);
        assert_eq!(r.new_months, 144);
        assert_eq!(r.months_saved, 31);
        assert!((r.interest_savings - dec!(208023.90)).abs() < TOL);
        assert!(r.all_paid_off);
        assert!(out.warnings.is_empty(), "{:?}", out.warnings);
    }

    #[test]
    fn test_roi_on_gross_amount() {
        let out = analyze_prepayment(&standard_input()).unwrap();
        let roi = out.result.roi_pct.unwrap();
        // 208,023.90 / 100,000 * 100
        assert!((roi - dec!(208.0239)).abs() < dec!(0.0001), "roi {}", roi);
    }

    #[test]
    fn test_fee_reduces_net_prepayment() {
        let mut input = standard_input();
        input.prepayment_fee_percent = dec!(2);
        let with_fee = analyze_prepayment(&input).unwrap().result;
        let without_fee = analyze_prepayment(&standard_input()).unwrap().result;

        assert_eq!(with_fee.prepayment_fee, dec!(2000));
        assert_eq!(with_fee.net_prepayment, dec!(98_000));
        assert!(with_fee.interest_savings < without_fee.interest_savings);
        assert!(with_fee.roi_pct.unwrap() < without_fee.roi_pct.unwrap());
    }

    #[test]
    fn test_zero_prepayment_has_no_roi() {
        let mut input = standard_input();
        input.prepayment_amount = Decimal::ZERO;
        let out = analyze_prepayment(&input).unwrap().result;

        assert_eq!(out.roi_pct, None);
        assert_eq!(out.interest_savings, Decimal::ZERO);
    }

    #[test]
    fn test_prepayment_covering_principal_warns() {
        let mut input = standard_input();
        input.prepayment_amount = dec!(1_500_000);
        let out = analyze_prepayment(&input).unwrap();

        assert!(out.result.new_schedule.is_empty());
        assert_eq!(out.result.new_months, 0);
        assert!(out.warnings.iter().any(|w| w.contains("retires the full principal")));
    }

    #[test]
    fn test_stalled_baseline_is_reported() {
        let mut input = standard_input();
        input.loan = LoanTerms::new(dec!(100_000), dec!(12), dec!(500), 360);
        input.prepayment_amount = dec!(10_000);
        let out = analyze_prepayment(&input).unwrap();

        assert!(!out.result.all_paid_off);
        assert!(out
            .warnings
            .iter()
            .any(|w| w.starts_with("Without prepayment") && w.contains("too low")));
    }

    #[test]
    fn test_negative_prepayment_rejected() {
        let mut input = standard_input();
        input.prepayment_amount = dec!(-1);
        match analyze_prepayment(&input) {
            Err(LoanError::InvalidInput { field, .. }) => assert_eq!(field, "prepayment_amount"),
            other => panic!("expected InvalidInput, got {:?}", other.map(|o| o.result.roi_pct)),
        }
    }

    #[test]
    fn test_fee_above_hundred_rejected() {
        let mut input = standard_input();
        input.prepayment_fee_percent = dec!(101);
        assert!(analyze_prepayment(&input).is_err());
    }

    #[test]
    fn test_fee_defaults_to_zero_when_omitted() {
        let json = r#"{
            "loan": {
                "principal": "1000000",
                "annual_rate_percent": "8.5",
                "monthly_payment": "10000",
                "horizon_months": 360
            },
            "prepayment_amount": "100000"
        }"#;
        let input: PrepaymentInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.prepayment_fee_percent, Decimal::ZERO);
    }
}
