//! Stats module - the fleet metrics pipeline

mod calculator;

pub use calculator::{MetricsCalculator, SummaryMetrics};
