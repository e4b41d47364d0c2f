use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use home_loan_core::scenarios::analysis::{self, LoanAnalysisInput};
use home_loan_core::scenarios::prepayment::{self, PrepaymentInput};
use home_loan_core::scenarios::rate_change::{self, RateChangeInput};

use crate::commands::amortization::LoanArgs;
use crate::input;

/// Arguments for lump-sum prepayment analysis
#[derive(Args)]
pub struct PrepaymentArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub loan: LoanArgs,

    /// Lump sum to prepay
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Prepayment fee as a percentage of the amount
    #[arg(long, default_value = "0")]
    pub fee_percent: Decimal,
}

pub fn run_prepayment(args: PrepaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let flags = args.loan.terms().zip(args.amount);
    let pp_input: PrepaymentInput = match flags {
        Some((loan, amount)) if args.input.is_none() => PrepaymentInput {
            loan,
            prepayment_amount: amount,
            prepayment_fee_percent: args.fee_percent,
        },
        _ => input::load(args.input.as_deref())?.ok_or(
            "--principal, --rate, --payment and --amount are required (or provide --input)",
        )?,
    };
    log::debug!("prepayment: {:?}", pp_input);

    let result = prepayment::analyze_prepayment(&pp_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for interest rate rewrite analysis
#[derive(Args)]
pub struct RateChangeArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub loan: LoanArgs,

    /// Proposed annual interest rate in percent
    #[arg(long)]
    pub new_rate: Option<Decimal>,

    /// One-time fee for rewriting the loan
    #[arg(long, default_value = "0")]
    pub fee: Decimal,
}

pub fn run_rate_change(args: RateChangeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let flags = args.loan.terms().zip(args.new_rate);
    let rc_input: RateChangeInput = match flags {
        Some((loan, new_rate)) if args.input.is_none() => RateChangeInput {
            loan,
            new_rate_percent: new_rate,
            rewriting_fee: args.fee,
        },
        _ => input::load(args.input.as_deref())?.ok_or(
            "--principal, --rate, --payment and --new-rate are required (or provide --input)",
        )?,
    };
    log::debug!("rate change: {:?}", rc_input);

    let result = rate_change::analyze_rate_change(&rc_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for the full three-option analysis.
///
/// Every flag is optional; omitted values fall back to a sample loan.
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Outstanding principal balance [default: 1000000]
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Current annual interest rate in percent [default: 8.50]
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Fixed monthly payment [default: 10000]
    #[arg(long)]
    pub payment: Option<Decimal>,

    /// Months remaining on the loan [default: 120]
    #[arg(long)]
    pub remaining_months: Option<u32>,

    /// Proposed annual rate in percent [default: current rate - 0.5]
    #[arg(long)]
    pub new_rate: Option<Decimal>,

    /// One-time rewriting fee [default: 3000]
    #[arg(long)]
    pub fee: Option<Decimal>,

    /// Lump sum to prepay [default: 100000]
    #[arg(long)]
    pub prepayment: Option<Decimal>,

    /// Prepayment fee as a percentage [default: 0]
    #[arg(long)]
    pub prepayment_fee_percent: Option<Decimal>,
}

impl AnalyzeArgs {
    fn has_flags(&self) -> bool {
        self.principal.is_some()
            || self.rate.is_some()
            || self.payment.is_some()
            || self.remaining_months.is_some()
            || self.new_rate.is_some()
            || self.fee.is_some()
            || self.prepayment.is_some()
            || self.prepayment_fee_percent.is_some()
    }

    fn into_input(self) -> LoanAnalysisInput {
        let defaults = LoanAnalysisInput::default();
        let current_rate = self.rate.unwrap_or(defaults.current_rate_percent);
        LoanAnalysisInput {
            principal: self.principal.unwrap_or(defaults.principal),
            current_rate_percent: current_rate,
            monthly_payment: self.payment.unwrap_or(defaults.monthly_payment),
            remaining_months: self.remaining_months.unwrap_or(defaults.remaining_months),
            new_rate_percent: self.new_rate.unwrap_or(current_rate - dec!(0.5)),
            rewriting_fee: self.fee.unwrap_or(defaults.rewriting_fee),
            prepayment_amount: self.prepayment.unwrap_or(defaults.prepayment_amount),
            prepayment_fee_percent: self
                .prepayment_fee_percent
                .unwrap_or(defaults.prepayment_fee_percent),
        }
    }
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let la_input: LoanAnalysisInput = if args.input.is_some() || !args.has_flags() {
        match input::load(args.input.as_deref())? {
            Some(loaded) => loaded,
            None => args.into_input(),
        }
    } else {
        args.into_input()
    };
    log::debug!("analysis: {:?}", la_input);

    let result = analysis::analyze_loan(&la_input)?;
    Ok(serde_json::to_value(result)?)
}
