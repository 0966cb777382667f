pub mod generator;
pub mod stats;

pub use generator::{generate_report, render_report};
pub use stats::{ChartEntry, TaskStats, WorkdaySummary};
