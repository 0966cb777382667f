use super::enums::TaskKind;
use super::format::format_hms;
use super::task::TaskColor;
use super::workday::Workday;

/// A task tile as shown on the context-switch grid
#[derive(Debug, Clone, PartialEq)]
pub struct TaskTile {
    /// Position in the workday's task list
    pub index: usize,
    pub name: String,
    pub kind: TaskKind,
    /// "HH:MM:SS", empty for special tiles
    pub runtime: String,
    pub percentage: f64,
    pub active: bool,
    pub limit_exceeded: bool,
    pub color: TaskColor,
}

/// A row of the task log
#[derive(Debug, Clone, PartialEq)]
pub struct LogRow {
    /// 1-based position in the log, oldest = 1
    pub sequence: usize,
    pub task_name: String,
    /// Wall-clock start as "HH:MM:SS"
    pub started: String,
    pub duration: String,
}

/// Build the tiles for every task, special tasks included, in workday order
pub fn task_tiles(workday: &Workday) -> Vec<TaskTile> {
    let active_index = workday.active_task_index();

    workday
        .tasks()
        .iter()
        .enumerate()
        .map(|(index, task)| TaskTile {
            index,
            name: task.name().to_string(),
            kind: task.kind(),
            runtime: if task.is_special() {
                String::new()
            } else {
                workday.task_runtime(index)
            },
            percentage: workday.task_percentage(index),
            active: active_index == Some(index),
            limit_exceeded: workday.is_task_limit_exceeded(index),
            color: task.color(),
        })
        .collect()
}

/// Build log rows newest-first, numbered so the newest entry carries the highest number
pub fn log_rows(workday: &Workday) -> Vec<LogRow> {
    let now = workday.now_ms();
    let total = workday.log_len();

    workday
        .log_newest_first()
        .enumerate()
        .map(|(offset, iteration)| LogRow {
            sequence: total - offset,
            task_name: iteration.task_name().to_string(),
            started: iteration
                .started_at()
                .map(|t| t.format("%H:%M:%S").to_string())
                .unwrap_or_else(|| "--:--:--".to_string()),
            duration: format_hms(iteration.runtime_ms(now)),
        })
        .collect()
}

/// Status glyph for a tile
pub fn tile_badge(tile: &TaskTile) -> &'static str {
    match tile.kind {
        TaskKind::AddNew => "+",
        TaskKind::EndWorkday => "■",
        TaskKind::User if tile.limit_exceeded => "!",
        TaskKind::User if tile.active => "▶",
        TaskKind::User => " ",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::ManualClock;
    use crate::domain::task::Task;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn sample_workday() -> (Workday, ManualClock) {
        let clock = ManualClock::new();
        let mut workday = Workday::new(Arc::new(clock.clone()));
        workday.add_task(Task::new("Code")).unwrap();
        workday.add_task(Task::new("Design")).unwrap();
        (workday, clock)
    }

    #[test]
    fn test_task_tiles() {
        let (mut workday, clock) = sample_workday();
        workday.set_task_time_limit(1, 0, 0, 5).unwrap();
        workday.context_switch(0).unwrap();
        clock.advance(30_000);
        workday.context_switch(1).unwrap();
        clock.advance(10_000);

        let tiles = task_tiles(&workday);
        assert_eq!(tiles.len(), 4);

        assert_eq!(tiles[0].name, "Code");
        assert_eq!(tiles[0].runtime, "00:00:30");
        assert!(!tiles[0].active);
        assert!((tiles[0].percentage - 75.0).abs() < 1e-9);

        assert_eq!(tiles[1].runtime, "00:00:10");
        assert!(tiles[1].active);
        assert!(tiles[1].limit_exceeded);
        assert_eq!(tile_badge(&tiles[1]), "!");

        assert_eq!(tiles[2].kind, TaskKind::AddNew);
        assert_eq!(tiles[2].runtime, "");
        assert_eq!(tile_badge(&tiles[2]), "+");
        assert_eq!(tiles[3].kind, TaskKind::EndWorkday);
    }

    #[test]
    fn test_log_rows_newest_first() {
        let (mut workday, clock) = sample_workday();
        workday.context_switch(0).unwrap();
        clock.advance(61_000);
        workday.context_switch(1).unwrap();
        clock.advance(2_000);
        workday.end_workday();

        let rows = log_rows(&workday);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].sequence, 2);
        assert_eq!(rows[0].task_name, "Design");
        assert_eq!(rows[0].duration, "00:00:02");
        assert_eq!(rows[1].sequence, 1);
        assert_eq!(rows[1].task_name, "Code");
        assert_eq!(rows[1].duration, "00:01:01");
        assert_eq!(rows[1].started.len(), 8);
    }

    #[test]
    fn test_log_rows_empty() {
        let (workday, _) = sample_workday();
        assert!(log_rows(&workday).is_empty());
    }
}
