//! Interest rate rewrite analysis.
//!
//! Compares the loan at its current rate against the same payment at a new
//! rate, nets off the one-time rewriting fee, and estimates the break-even
//! month from the first month's interest differential.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::schedule::{schedule_warnings, terms_warnings, LoanTerms, ScheduleEntry};
use crate::error::LoanError;
use crate::scenarios::comparison::compare_rate_change;
use crate::scenarios::metrics::{breakeven_months, monthly_interest_diff, Breakeven};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::LoanResult;

// ---------------------------------------------------------------------------
// Input / output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateChangeInput {
    /// The loan at its current rate.
    pub loan: LoanTerms,
    /// Proposed annual rate as a percentage.
    pub new_rate_percent: Percent,
    /// One-time fee charged for rewriting the loan.
    #[serde(default)]
    pub rewriting_fee: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateChangeOutput {
    pub current_rate_percent: Percent,
    pub new_rate_percent: Percent,
    /// Current rate minus new rate, in percentage points.
    pub rate_reduction: Percent,
    pub current_total_interest: Money,
    pub new_total_interest: Money,
    pub gross_interest_savings: Money,
    pub rewriting_fee: Money,
    /// Gross savings less the rewriting fee.
    pub net_savings: Money,
    pub beneficial: bool,
    pub current_months: u32,
    pub new_months: u32,
    pub months_saved: i64,
    /// First-month interest saved at the new rate.
    pub monthly_interest_diff: Money,
    pub breakeven: Breakeven,
    /// Whether the fee is recovered before the rewritten loan is paid off.
    /// `None` when there is no break-even.
    pub recovered_before_payoff: Option<bool>,
    /// False when either schedule stalled or ran out of horizon.
    pub all_paid_off: bool,
    pub current_schedule: Vec<ScheduleEntry>,
    pub new_schedule: Vec<ScheduleEntry>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Analyse rewriting the loan at a new interest rate.
pub fn analyze_rate_change(
    input: &RateChangeInput,
) -> LoanResult<ComputationOutput<RateChangeOutput>> {
    let start = Instant::now();
    let (output, warnings) = compute_rate_change(input)?;
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Interest Rate Rewrite Comparison",
        input,
        warnings,
        elapsed,
        output,
    ))
}

pub(crate) fn compute_rate_change(
    input: &RateChangeInput,
) -> LoanResult<(RateChangeOutput, Vec<String>)> {
    validate(input)?;
    let mut warnings = terms_warnings(&input.loan);

    let cmp = compare_rate_change(&input.loan, input.new_rate_percent);
    warnings.extend(schedule_warnings("Current rate", &cmp.baseline));
    warnings.extend(schedule_warnings("New rate", &cmp.alternative));

    let net_savings = cmp.interest_savings - input.rewriting_fee;

    let diff = monthly_interest_diff(
        input.loan.principal,
        input.loan.annual_rate_percent,
        input.new_rate_percent,
    );
    let breakeven = breakeven_months(input.rewriting_fee, diff);
    let recovered_before_payoff = breakeven
        .months()
        .map(|m| m < i64::from(cmp.alternative_months));

    match recovered_before_payoff {
        Some(true) => {}
        Some(false) => warnings.push(
            "The rewriting fee is not recovered before the loan is paid off".to_string(),
        ),
        None => warnings.push("No monthly savings with the new interest rate".to_string()),
    }

    let all_paid_off = cmp.all_paid_off();
    let output = RateChangeOutput {
        current_rate_percent: input.loan.annual_rate_percent,
        new_rate_percent: input.new_rate_percent,
        rate_reduction: input.loan.annual_rate_percent - input.new_rate_percent,
        current_total_interest: cmp.baseline_total_interest,
        new_total_interest: cmp.alternative_total_interest,
        gross_interest_savings: cmp.interest_savings,
        rewriting_fee: input.rewriting_fee,
        net_savings,
        beneficial: net_savings > Decimal::ZERO,
        current_months: cmp.baseline_months,
        new_months: cmp.alternative_months,
        months_saved: cmp.months_saved,
        monthly_interest_diff: diff,
        breakeven,
        recovered_before_payoff,
        all_paid_off,
        current_schedule: cmp.baseline.entries,
        new_schedule: cmp.alternative.entries,
    };

    Ok((output, warnings))
}

fn validate(input: &RateChangeInput) -> LoanResult<()> {
    if input.rewriting_fee < Decimal::ZERO {
        return Err(LoanError::InvalidInput {
            field: "rewriting_fee".into(),
            reason: "Rewriting fee cannot be negative".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
