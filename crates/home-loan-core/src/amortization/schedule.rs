//! Fixed-payment amortisation engine.
//!
//! Converts a quoted annual percentage rate into a nominal monthly rate and
//! walks the outstanding balance forward one month at a time until the loan
//! is retired, the horizon is reached, or the payment no longer covers the
//! interest accruing on the balance. All math in `rust_decimal::Decimal`;
//! nothing is rounded between months.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::summary::{summarize, LoanSummary};
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Rate};
use crate::LoanResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const MONTHS_PER_YEAR: Decimal = dec!(12);

const PERCENT: Decimal = dec!(100);

/// Longest projection the engine will run: 100 years of monthly payments.
/// Longer horizons are clamped and flagged by `terms_warnings`.
pub const MAX_HORIZON_MONTHS: u32 = 1200;

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Terms of a fixed-payment loan as read off a loan statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Outstanding principal balance.
    pub principal: Money,
    /// Annual interest rate as a percentage (e.g., 8.50 = 8.50%).
    pub annual_rate_percent: Percent,
    /// Fixed monthly instalment (EMI).
    pub monthly_payment: Money,
    /// Maximum number of months to project.
    pub horizon_months: u32,
}

impl LoanTerms {
    pub fn new(
        principal: Money,
        annual_rate_percent: Percent,
        monthly_payment: Money,
        horizon_months: u32,
    ) -> Self {
        Self {
            principal,
            annual_rate_percent,
            monthly_payment,
            horizon_months,
        }
    }

    /// Same terms with a different opening principal.
    pub fn with_principal(&self, principal: Money) -> Self {
        Self {
            principal,
            ..self.clone()
        }
    }

    /// Same terms at a different annual rate.
    pub fn with_rate(&self, annual_rate_percent: Percent) -> Self {
        Self {
            annual_rate_percent,
            ..self.clone()
        }
    }

    pub fn monthly_rate(&self) -> Rate {
        monthly_rate(self.annual_rate_percent)
    }

    /// Horizon the engine actually projects over.
    pub fn effective_horizon(&self) -> u32 {
        self.horizon_months.min(MAX_HORIZON_MONTHS)
    }
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One month of the amortisation schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// 1-based month index.
    pub month: u32,
    /// Amount paid this month; trimmed on the month that retires the loan.
    pub payment: Money,
    pub principal_portion: Money,
    pub interest_portion: Money,
    /// Balance outstanding after this month's payment.
    pub balance: Money,
    /// Interest paid from month 1 through this month.
    pub cumulative_interest: Money,
}

/// Terminal state of an amortisation run.
///
/// Reaching the horizon with a balance outstanding is not a separate state:
/// the schedule simply stops while still `Accumulating`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AmortizationState {
    Accumulating,
    PaidOff,
    /// The payment did not cover the interest accrued in `month`.
    Stalled { month: u32, minimum_payment: Money },
    /// A figure for `month` fell outside the decimal range; no entry is
    /// emitted for it.
    Overflowed { month: u32 },
}

/// Month-by-month schedule together with the state it ended in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// Opening principal the schedule was computed from.
    pub principal: Money,
    pub entries: Vec<ScheduleEntry>,
    pub state: AmortizationState,
}

impl Schedule {
    /// Number of months in the schedule.
    pub fn term_months(&self) -> u32 {
        self.entries.len() as u32
    }

    pub fn total_interest(&self) -> Money {
        self.entries.iter().map(|e| e.interest_portion).sum()
    }

    pub fn total_principal(&self) -> Money {
        self.entries.iter().map(|e| e.principal_portion).sum()
    }

    pub fn total_payment(&self) -> Money {
        self.entries.iter().map(|e| e.payment).sum()
    }

    /// Balance left after the last scheduled month.
    pub fn final_balance(&self) -> Money {
        self.entries
            .last()
            .map(|e| e.balance)
            .unwrap_or_else(|| self.principal.max(Decimal::ZERO))
    }

    pub fn is_paid_off(&self) -> bool {
        self.state == AmortizationState::PaidOff
    }

    pub fn is_stalled(&self) -> bool {
        matches!(self.state, AmortizationState::Stalled { .. })
    }

    /// Payment needed to cover interest, if the schedule stalled.
    pub fn minimum_payment(&self) -> Option<Money> {
        match self.state {
            AmortizationState::Stalled {
                minimum_payment, ..
            } => Some(minimum_payment),
            _ => None,
        }
    }

    /// (month, balance) pairs for plotting the balance curve.
    pub fn balance_series(&self) -> Vec<(u32, Money)> {
        self.entries.iter().map(|e| (e.month, e.balance)).collect()
    }

    /// (month, cumulative interest) pairs for plotting interest paid to date.
    pub fn cumulative_interest_series(&self) -> Vec<(u32, Money)> {
        self.entries
            .iter()
            .map(|e| (e.month, e.cumulative_interest))
            .collect()
    }
}

/// Schedule plus headline figures, as returned through the output envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleOutput {
    pub summary: LoanSummary,
    pub state: AmortizationState,
    pub schedule: Vec<ScheduleEntry>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Nominal monthly rate: annual percentage / 100 / 12.
pub fn monthly_rate(annual_rate_percent: Percent) -> Rate {
    annual_rate_percent / PERCENT / MONTHS_PER_YEAR
}

/// Compute the amortisation schedule for fixed-payment loan terms.
///
/// A non-positive principal yields an empty, already paid-off schedule. A
/// zero horizon yields an empty schedule that is still accumulating.
/// Horizons beyond `MAX_HORIZON_MONTHS` are clamped.
pub fn compute_schedule(terms: &LoanTerms) -> Schedule {
    let rate = terms.monthly_rate();
    let horizon = terms.effective_horizon();
    let mut entries = Vec::with_capacity(horizon as usize);

    let mut balance = terms.principal;
    let mut cumulative_interest = Decimal::ZERO;
    // Tracked only so the schedule's totals are known to be representable.
    let mut cumulative_payment = Decimal::ZERO;
    let mut state = if balance <= Decimal::ZERO {
        AmortizationState::PaidOff
    } else {
        AmortizationState::Accumulating
    };

    let mut month = 0u32;
    while state == AmortizationState::Accumulating && month < horizon {
        month += 1;

        let Some(interest_portion) = balance.checked_mul(rate) else {
            state = overflowed(month);
            break;
        };
        let Some(toward_principal) = terms.monthly_payment.checked_sub(interest_portion) else {
            state = overflowed(month);
            break;
        };
        // Cap at the balance so the final month never overpays.
        let principal_portion = toward_principal.min(balance);

        if principal_portion <= Decimal::ZERO {
            log::debug!(
                "schedule stalled in month {month}: payment {} < interest {interest_portion}",
                terms.monthly_payment
            );
            state = AmortizationState::Stalled {
                month,
                minimum_payment: interest_portion,
            };
            break;
        }

        let remaining = balance - principal_portion;
        let payment = if remaining > Decimal::ZERO {
            Some(terms.monthly_payment)
        } else {
            principal_portion.checked_add(interest_portion)
        };
        let totals = payment.and_then(|p| {
            Some((
                cumulative_interest.checked_add(interest_portion)?,
                cumulative_payment.checked_add(p)?,
                p,
            ))
        });
        let Some((next_interest, next_payment, payment)) = totals else {
            state = overflowed(month);
            break;
        };

        balance = remaining;
        cumulative_interest = next_interest;
        cumulative_payment = next_payment;

        entries.push(ScheduleEntry {
            month,
            payment,
            principal_portion,
            interest_portion,
            balance,
            cumulative_interest,
        });

        if balance <= Decimal::ZERO {
            state = AmortizationState::PaidOff;
        }
    }

    log::trace!(
        "schedule for principal {} ended after {} months in state {:?}",
        terms.principal,
        entries.len(),
        state
    );

    Schedule {
        principal: terms.principal,
        entries,
        state,
    }
}

fn overflowed(month: u32) -> AmortizationState {
    log::warn!("schedule overflowed the decimal range in month {month}");
    AmortizationState::Overflowed { month }
}

/// Build an amortisation schedule wrapped in the standard output envelope.
pub fn build_schedule(input: &LoanTerms) -> LoanResult<ComputationOutput<ScheduleOutput>> {
    let start = Instant::now();
    let mut warnings = terms_warnings(input);

    let schedule = compute_schedule(input);
    warnings.extend(schedule_warnings("Loan", &schedule));

    let output = ScheduleOutput {
        summary: summarize(&schedule),
        state: schedule.state,
        schedule: schedule.entries,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-Payment Amortisation Schedule",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

/// Soft diagnostics for terms that compute but are unlikely to be meant.
pub(crate) fn terms_warnings(terms: &LoanTerms) -> Vec<String> {
    let mut warnings = Vec::new();
    if terms.annual_rate_percent < Decimal::ZERO {
        warnings.push(format!(
            "Annual rate of {}% is negative; interest will reduce the balance",
            terms.annual_rate_percent
        ));
    }
    if terms.monthly_payment < Decimal::ZERO {
        warnings.push(format!(
            "Monthly payment of {} is negative",
            terms.monthly_payment
        ));
    }
    if terms.horizon_months > MAX_HORIZON_MONTHS {
        warnings.push(format!(
            "Horizon of {} months exceeds the {} month limit; projecting {} months",
            terms.horizon_months, MAX_HORIZON_MONTHS, MAX_HORIZON_MONTHS
        ));
    }
    warnings
}

/// Warnings describing how a schedule ended, prefixed with `label`.
pub(crate) fn schedule_warnings(label: &str, schedule: &Schedule) -> Vec<String> {
    match schedule.state {
        AmortizationState::Stalled {
            month,
            minimum_payment,
        } => vec![format!(
            "{label}: monthly payment is too low to cover interest in month {month}. \
             Minimum payment needed: {}; schedule is incomplete",
            minimum_payment.round_dp(2)
        )],
        AmortizationState::Overflowed { month } => vec![format!(
            "{label}: figures exceed the supported numeric range in month {month}; \
             schedule is incomplete"
        )],
        AmortizationState::Accumulating => vec![format!(
            "{label}: not fully repaid within {} months; balance of {} remains",
            schedule.term_months(),
            schedule.final_balance().round_dp(2)
        )],
        AmortizationState::PaidOff => Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
