pub mod amortization;
pub mod scenarios;
