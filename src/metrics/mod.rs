pub mod tracker;

pub use tracker::{MetricsTracker, TestResult, TrainingMetrics};
