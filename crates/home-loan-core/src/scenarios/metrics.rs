use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Percent};

/// Months needed for a rate change to pay back its fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Breakeven {
    Months { months: i64 },
    /// The new rate does not lower the monthly interest, so the fee is never
    /// recovered.
    NoSavings,
}

impl Breakeven {
    pub fn months(&self) -> Option<i64> {
        match self {
            Breakeven::Months { months } => Some(*months),
            Breakeven::NoSavings => None,
        }
    }
}

/// First-month interest differential between two rates on `principal`.
///
/// This is the interest saved in month one only, not the average over the
/// life of the loan.
pub fn monthly_interest_diff(
    principal: Money,
    current_rate_percent: Percent,
    new_rate_percent: Percent,
) -> Money {
    principal * (current_rate_percent - new_rate_percent) / dec!(100) / dec!(12)
}

/// `round(fee / monthly_diff)` with half-to-even rounding, or `NoSavings`
/// when the differential is not positive.
pub fn breakeven_months(fee: Money, monthly_diff: Money) -> Breakeven {
    if monthly_diff <= Decimal::ZERO {
        return Breakeven::NoSavings;
    }
    let months = fee
        .checked_div(monthly_diff)
        .and_then(|m| m.round().to_i64())
        .unwrap_or(i64::MAX);
    Breakeven::Months { months }
}

/// Interest saved per unit prepaid, as a percentage. `None` when nothing
/// was prepaid.
pub fn prepayment_roi(interest_savings: Money, prepay_amount: Money) -> Option<Decimal> {
    if prepay_amount <= Decimal::ZERO {
        return None;
    }
    Some(interest_savings / prepay_amount * dec!(100))
}
