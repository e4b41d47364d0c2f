use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use home_loan_core::amortization::schedule::{self, LoanTerms};

use crate::input;

/// Single-scenario commands project a full 30-year term unless told otherwise.
/// `analyze` instead caps at the loan's remaining months.
pub const DEFAULT_HORIZON_MONTHS: u32 = 360;

/// Arguments shared by every command that describes the loan as it stands
#[derive(Args, Clone)]
pub struct LoanArgs {
    /// Outstanding principal balance
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Current annual interest rate in percent (e.g. 8.5)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Fixed monthly payment (EMI)
    #[arg(long)]
    pub payment: Option<Decimal>,

    /// Maximum number of months to project (a full 30-year term by default)
    #[arg(long, default_value_t = DEFAULT_HORIZON_MONTHS)]
    pub horizon: u32,
}

impl LoanArgs {
    /// Loan terms from flags, if every required flag was given.
    pub fn terms(&self) -> Option<LoanTerms> {
        Some(LoanTerms::new(
            self.principal?,
            self.rate?,
            self.payment?,
            self.horizon,
        ))
    }
}

/// Arguments for the amortisation schedule
#[derive(Args)]
pub struct ScheduleArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub loan: LoanArgs,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms: LoanTerms = match args.loan.terms() {
        Some(terms) if args.input.is_none() => terms,
        _ => input::load(args.input.as_deref())?
            .ok_or("--principal, --rate and --payment are required (or provide --input)")?,
    };
    log::debug!("schedule: {:?}", terms);

    let result = schedule::build_schedule(&terms)?;
    Ok(serde_json::to_value(result)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use rust_decimal_macros::dec;

    #[derive(Parser)]
    struct LoanCli {
        #[command(flatten)]
        loan: LoanArgs,
    }

    #[test]
    fn test_horizon_defaults_to_full_term() {
        let cli = LoanCli::try_parse_from([
            "homeloan",
            "--principal",
            "1000000",
            "--rate",
            "8.5",
            "--payment",
            "10000",
        ])
        .unwrap();
        let terms = cli.loan.terms().unwrap();

        assert_eq!(terms.horizon_months, DEFAULT_HORIZON_MONTHS);
        assert_eq!(terms.annual_rate_percent, dec!(8.5));
    }

    #[test]
    fn test_missing_flag_means_no_terms() {
        let cli = LoanCli::try_parse_from(["homeloan", "--principal", "1000000"]).unwrap();
        assert!(cli.loan.terms().is_none());
    }
}
