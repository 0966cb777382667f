use crate::domain::{format_hms, format_percent, Workday};
use crate::persistence::{atomic_write, ensure_data_dir, next_archive_sequence, report_file};
use crate::report::stats::WorkdaySummary;
use anyhow::Result;
use chrono::NaiveDate;
use std::path::PathBuf;

/// Width of the text bars in the distribution section
const BAR_WIDTH: usize = 20;

fn bar(percentage: f64) -> String {
    let filled = ((percentage / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

/// Render a workday summary as markdown
pub fn render_report(summary: &WorkdaySummary, date: NaiveDate) -> String {
    let mut report = String::new();

    report.push_str(&format!("# Workday Summary - {}\n\n", date));

    report.push_str("## Overview\n\n");
    report.push_str(&format!("- **Tracked Time:** {}\n", format_hms(summary.total_runtime_ms)));
    report.push_str(&format!("- **Tasks:** {}\n", summary.tasks.len()));
    report.push_str(&format!("- **Context Switches:** {}\n", summary.context_switches));
    report.push_str(&format!(
        "- **Average Iteration:** {}\n",
        format_hms(summary.average_iteration_ms)
    ));
    if let Some((name, ms)) = &summary.longest_iteration {
        report.push_str(&format!("- **Longest Iteration:** \"{}\" ({})\n", name, format_hms(*ms)));
    }
    report.push_str(&format!("- **Tasks Over Limit:** {}\n\n", summary.tasks_over_limit()));

    // Distribution
    let entries = summary.chart_entries();
    if !entries.is_empty() {
        report.push_str("## Time Distribution\n\n");
        for entry in &entries {
            report.push_str(&format!(
                "- `{}` {} {} ({})\n",
                bar(entry.percentage),
                entry.label,
                format_percent(entry.percentage),
                entry.color
            ));
        }
        let unallocated = summary.unallocated_percentage();
        if unallocated > 0.05 {
            report.push_str(&format!("- Unallocated {}\n", format_percent(unallocated)));
        }
        report.push('\n');
    }

    if !summary.tasks.is_empty() {
        report.push_str("## Tasks\n\n");
        report.push_str("| Task | Time | Share | Limit | Iterations |\n");
        report.push_str("|------|------|-------|-------|------------|\n");
        for task in &summary.tasks {
            let limit = if task.time_limit_ms == 0 {
                "-".to_string()
            } else if task.limit_exceeded {
                format!("{} ⚠", format_hms(task.time_limit_ms))
            } else {
                format_hms(task.time_limit_ms)
            };
            report.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                task.name,
                format_hms(task.runtime_ms),
                format_percent(task.percentage),
                limit,
                task.iterations
            ));
        }
        report.push('\n');
    }

    report
}

/// Write the summary of a workday as markdown.
/// Defaults to the first free report-YYYY-MM-DD[-N].md in the data directory, dated by the
/// workday's start.
pub fn generate_report(workday: &Workday, output_path: Option<PathBuf>) -> Result<PathBuf> {
    let date = workday.started_at().date_naive();
    let summary = WorkdaySummary::from_workday(workday);
    let report = render_report(&summary, date);

    let output = match output_path {
        Some(path) => path,
        None => {
            let dir = ensure_data_dir()?;
            report_file(&dir, date, next_archive_sequence(&dir, date))
        }
    };

    atomic_write(&output, &report)?;
    log::info!("Report written to {}", output.display());

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ManualClock, Task};
    use std::sync::Arc;

    fn finished_workday() -> Workday {
        let clock = ManualClock::new();
        let mut workday = Workday::new(Arc::new(clock.clone()));
        workday.add_task(Task::new("Code")).unwrap();
        workday.add_task(Task::new("Design")).unwrap();
        workday.set_task_time_limit(1, 0, 0, 5).unwrap();
        workday.context_switch(0).unwrap();
        clock.advance(30_000);
        workday.context_switch(1).unwrap();
        clock.advance(10_000);
        workday.end_workday();
        workday
    }

    #[test]
    fn test_bar() {
        assert_eq!(bar(0.0), "░".repeat(BAR_WIDTH));
        assert_eq!(bar(100.0), "█".repeat(BAR_WIDTH));
        assert_eq!(bar(50.0).chars().filter(|c| *c == '█').count(), BAR_WIDTH / 2);
    }

    #[test]
    fn test_render_report() {
        let summary = WorkdaySummary::from_workday(&finished_workday());
        let date = NaiveDate::from_ymd_opt(2017, 4, 23).unwrap();
        let report = render_report(&summary, date);

        assert!(report.starts_with("# Workday Summary - 2017-04-23\n"));
        assert!(report.contains("- **Tracked Time:** 00:00:40\n"));
        assert!(report.contains("- **Context Switches:** 2\n"));
        assert!(report.contains("- **Longest Iteration:** \"Code\" (00:00:30)\n"));
        assert!(report.contains("Code 75.0%"));
        assert!(report.contains("| Code | 00:00:30 | 75.0% | - | 1 |"));
        assert!(report.contains("| Design | 00:00:10 | 25.0% | 00:00:05 ⚠ | 1 |"));
        assert!(!report.contains("Unallocated"));
    }

    #[test]
    fn test_render_empty_report() {
        let workday = Workday::new(Arc::new(ManualClock::new()));
        let summary = WorkdaySummary::from_workday(&workday);
        let report = render_report(&summary, NaiveDate::from_ymd_opt(2017, 4, 23).unwrap());
        assert!(!report.contains("## Tasks"));
        assert!(!report.contains("## Time Distribution"));
    }

    #[test]
    fn test_generate_report_to_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("out.md");

        let written = generate_report(&finished_workday(), Some(path.clone())).unwrap();
        assert_eq!(written, path);
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("## Tasks"));
    }
}
