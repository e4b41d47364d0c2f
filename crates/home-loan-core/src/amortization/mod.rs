pub mod schedule;
pub mod summary;
