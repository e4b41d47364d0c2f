pub mod analysis;
pub mod comparison;
pub mod metrics;
pub mod prepayment;
pub mod rate_change;
pub mod recommendation;
