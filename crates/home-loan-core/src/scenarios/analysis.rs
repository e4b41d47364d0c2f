//! Side-by-side analysis of the three home-loan options: keep the loan as it
//! is, pay to rewrite it at a lower rate, or make a lump-sum prepayment.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::schedule::{compute_schedule, LoanTerms};
use crate::amortization::summary::{summarize, LoanSummary};
use crate::scenarios::prepayment::{compute_prepayment, PrepaymentInput, PrepaymentOutput};
use crate::scenarios::rate_change::{compute_rate_change, RateChangeInput, RateChangeOutput};
use crate::scenarios::recommendation::{recommend, Recommendation};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::LoanResult;

// ---------------------------------------------------------------------------
// Input / output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanAnalysisInput {
    pub principal: Money,
    pub current_rate_percent: Percent,
    pub monthly_payment: Money,
    /// Months left on the loan; caps every schedule.
    pub remaining_months: u32,
    pub new_rate_percent: Percent,
    pub rewriting_fee: Money,
    pub prepayment_amount: Money,
    #[serde(default)]
    pub prepayment_fee_percent: Percent,
}

impl Default for LoanAnalysisInput {
    fn default() -> Self {
        Self {
            principal: dec!(1_000_000),
            current_rate_percent: dec!(8.50),
            monthly_payment: dec!(10_000),
            remaining_months: 120,
            new_rate_percent: dec!(8.00),
            rewriting_fee: dec!(3_000),
            prepayment_amount: dec!(100_000),
            prepayment_fee_percent: Decimal::ZERO,
        }
    }
}

impl LoanAnalysisInput {
    pub fn loan_terms(&self) -> LoanTerms {
        LoanTerms::new(
            self.principal,
            self.current_rate_percent,
            self.monthly_payment,
            self.remaining_months,
        )
    }
}

/// One of the options presented to the borrower.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioOption {
    pub name: String,
    pub total_interest: Money,
    pub months_to_payoff: u32,
    /// Money the borrower puts up for this option.
    pub cost: Money,
    /// Interest saved against doing nothing, net of fees where the fee is
    /// not part of the cost.
    pub savings: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanAnalysisOutput {
    pub overview: LoanSummary,
    pub rate_change: RateChangeOutput,
    pub prepayment: PrepaymentOutput,
    pub options: Vec<ScenarioOption>,
    pub recommendation: Recommendation,
    pub recommendation_message: String,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run the overview, rate change and prepayment scenarios together and
/// recommend one.
pub fn analyze_loan(
    input: &LoanAnalysisInput,
) -> LoanResult<ComputationOutput<LoanAnalysisOutput>> {
    let start = Instant::now();
    let terms = input.loan_terms();

    let overview = summarize(&compute_schedule(&terms));

    let (rate_change, mut warnings) = compute_rate_change(&RateChangeInput {
        loan: terms.clone(),
        new_rate_percent: input.new_rate_percent,
        rewriting_fee: input.rewriting_fee,
    })?;

    let (prepayment, prepay_warnings) = compute_prepayment(&PrepaymentInput {
        loan: terms,
        prepayment_amount: input.prepayment_amount,
        prepayment_fee_percent: input.prepayment_fee_percent,
    })?;
    // Baseline diagnostics were already raised by the rate change run.
    let fresh: Vec<String> = prepay_warnings
        .into_iter()
        .filter(|w| !w.starts_with("Without prepayment") && !warnings.contains(w))
        .collect();
    warnings.extend(fresh);

    let recommendation = recommend(
        prepayment.interest_savings,
        rate_change.net_savings,
        input.prepayment_amount,
        input.principal,
    );

    let options = build_options(&overview, &rate_change, &prepayment);

    let output = LoanAnalysisOutput {
        overview,
        rate_change,
        prepayment,
        options,
        recommendation,
        recommendation_message: recommendation.message().to_string(),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Home Loan Option Analysis (Do Nothing / Rate Rewrite / Prepayment)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

fn build_options(
    overview: &LoanSummary,
    rate_change: &RateChangeOutput,
    prepayment: &PrepaymentOutput,
) -> Vec<ScenarioOption> {
    vec![
        ScenarioOption {
            name: "Do nothing".into(),
            total_interest: overview.total_interest,
            months_to_payoff: overview.term_months,
            cost: Decimal::ZERO,
            savings: Decimal::ZERO,
        },
        ScenarioOption {
            name: "Reduce interest rate".into(),
            total_interest: rate_change.new_total_interest,
            months_to_payoff: rate_change.new_months,
            cost: rate_change.rewriting_fee,
            savings: rate_change.net_savings,
        },
        ScenarioOption {
            name: "Make prepayment".into(),
            total_interest: prepayment.new_total_interest,
            months_to_payoff: prepayment.new_months,
            cost: prepayment.prepayment_amount + prepayment.prepayment_fee,
            savings: prepayment.interest_savings,
        },
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
