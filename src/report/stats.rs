use crate::domain::{TaskColor, Workday};
use std::collections::HashMap;

/// Tolerance used when checking that chart slices stay within 100%
const PERCENT_EPSILON: f64 = 1e-6;

/// Per-task figures for a workday
#[derive(Debug, Clone, PartialEq)]
pub struct TaskStats {
    pub name: String,
    pub color: TaskColor,
    pub runtime_ms: u64,
    pub percentage: f64,
    /// Zero means no limit
    pub time_limit_ms: u64,
    pub limit_exceeded: bool,
    /// Concluded iterations in the log
    pub iterations: usize,
}

/// One slice of the time-distribution chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartEntry {
    pub label: String,
    pub color: TaskColor,
    pub percentage: f64,
}

/// Everything shown when a workday ends
#[derive(Debug, Clone, PartialEq)]
pub struct WorkdaySummary {
    pub tasks: Vec<TaskStats>,
    pub total_runtime_ms: u64,
    /// Iterations concluded during the day
    pub context_switches: usize,
    pub longest_iteration: Option<(String, u64)>,
    pub average_iteration_ms: u64,
}

impl WorkdaySummary {
    pub fn from_workday(workday: &Workday) -> Self {
        let now = workday.now_ms();

        let mut iteration_counts: HashMap<_, usize> = HashMap::new();
        for iteration in workday.log_oldest_first() {
            *iteration_counts.entry(iteration.task_id()).or_default() += 1;
        }

        let tasks = workday
            .user_tasks()
            .iter()
            .enumerate()
            .map(|(index, task)| TaskStats {
                name: task.name().to_string(),
                color: task.color(),
                runtime_ms: workday.total_task_runtime_ms(index),
                percentage: workday.task_percentage(index),
                time_limit_ms: task.time_limit_ms(),
                limit_exceeded: workday.is_task_limit_exceeded(index),
                iterations: iteration_counts.get(&task.id()).copied().unwrap_or(0),
            })
            .collect();

        let durations: Vec<(&str, u64)> = workday
            .log_oldest_first()
            .map(|i| (i.task_name(), i.runtime_ms(now)))
            .collect();

        let longest_iteration = durations
            .iter()
            .max_by_key(|(_, ms)| *ms)
            .map(|(name, ms)| (name.to_string(), *ms));

        let average_iteration_ms = if durations.is_empty() {
            0
        } else {
            durations.iter().map(|(_, ms)| ms).sum::<u64>() / durations.len() as u64
        };

        Self {
            tasks,
            total_runtime_ms: workday.total_runtime_ms(),
            context_switches: durations.len(),
            longest_iteration,
            average_iteration_ms,
        }
    }

    /// Chart slices for tasks with recorded time.
    ///
    /// A slice is only accepted while the running total stays within 100%.
    pub fn chart_entries(&self) -> Vec<ChartEntry> {
        let mut entries = Vec::new();
        let mut cumulative = 0.0;

        for task in self.tasks.iter().filter(|t| t.percentage > 0.0) {
            if cumulative + task.percentage > 100.0 + PERCENT_EPSILON {
                log::warn!("Chart slice for '{}' would exceed 100%, skipped", task.name);
                continue;
            }
            cumulative += task.percentage;
            entries.push(ChartEntry {
                label: task.name.clone(),
                color: task.color,
                percentage: task.percentage,
            });
        }
        entries
    }

    /// Share of the chart not covered by any slice
    pub fn unallocated_percentage(&self) -> f64 {
        let allocated: f64 = self.chart_entries().iter().map(|e| e.percentage).sum();
        (100.0 - allocated).max(0.0)
    }

    pub fn tasks_over_limit(&self) -> usize {
        self.tasks.iter().filter(|t| t.limit_exceeded).count()
    }
}
