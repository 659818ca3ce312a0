pub mod context;
pub mod schedule;
