use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::Money;

/// Prepayments above this share of principal are flagged as oversized when
/// neither option pays off.
const LARGE_PREPAYMENT_SHARE: Decimal = dec!(0.25);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    Prepay,
    RateChange,
    SmallerPrepayment,
    NoAction,
}

impl Recommendation {
    pub fn message(&self) -> &'static str {
        match self {
            Recommendation::Prepay => {
                "Best option: make a prepayment. It saves more interest and shortens \
                 the loan by more months than paying for an interest rate reduction."
            }
            Recommendation::RateChange => {
                "Best option: pay for the interest rate reduction. The savings outweigh \
                 the rewriting fee."
            }
            Recommendation::SmallerPrepayment => {
                "Consider a smaller prepayment now, or save towards a larger one later."
            }
            Recommendation::NoAction => {
                "Neither option provides a significant benefit. Consider keeping the \
                 current arrangement."
            }
        }
    }
}

/// Pick between prepaying, rewriting the rate, or neither.
///
/// Rules apply in order: prepayment wins if its savings are positive and
/// beat the rate change's net savings; the rate change wins if its net
/// savings are positive and beat the prepayment; otherwise an oversized
/// prepayment (over a quarter of principal) is flagged, else no action.
pub fn recommend(
    prepayment_savings: Money,
    rate_change_net_savings: Money,
    prepayment_amount: Money,
    principal: Money,
) -> Recommendation {
    if prepayment_savings > rate_change_net_savings && prepayment_savings > Decimal::ZERO {
        Recommendation::Prepay
    } else if rate_change_net_savings > Decimal::ZERO
        && rate_change_net_savings > prepayment_savings
    {
        Recommendation::RateChange
    } else if prepayment_amount > principal * LARGE_PREPAYMENT_SHARE {
        Recommendation::SmallerPrepayment
    } else {
        Recommendation::NoAction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_prepay_wins_when_larger() {
        assert_eq!(
            recommend(dec!(200_000), dec!(90_000), dec!(100_000), dec!(1_000_000)),
            Recommendation::Prepay
        );
    }

    #[test]
    fn test_rate_change_wins_when_larger() {
        assert_eq!(
            recommend(dec!(10_000), dec!(90_000), dec!(100_000), dec!(1_000_000)),
            Recommendation::RateChange
        );
    }

    #[test]
    fn test_rate_change_wins_with_no_prepayment() {
        assert_eq!(
            recommend(Decimal::ZERO, dec!(5_000), Decimal::ZERO, dec!(1_000_000)),
            Recommendation::RateChange
        );
    }

    #[test]
    fn test_tie_falls_through() {
        // Equal savings satisfy neither strict comparison.
        assert_eq!(
            recommend(dec!(5_000), dec!(5_000), dec!(10_000), dec!(1_000_000)),
            Recommendation::NoAction
        );
    }

    #[test]
    fn test_oversized_prepayment_flagged() {
        assert_eq!(
            recommend(Decimal::ZERO, dec!(-3_000), dec!(300_000), dec!(1_000_000)),
            Recommendation::SmallerPrepayment
        );
    }

    #[test]
    fn test_quarter_exactly_is_not_oversized() {
        assert_eq!(
            recommend(Decimal::ZERO, dec!(-3_000), dec!(250_000), dec!(1_000_000)),
            Recommendation::NoAction
        );
    }

    #[test]
    fn test_serializes_snake_case() {
        let json = serde_json::to_value(Recommendation::SmallerPrepayment).unwrap();
        assert_eq!(json, "smaller_prepayment");
    }
}
