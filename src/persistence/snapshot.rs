use crate::domain::{
    Clock, Task, TaskColor, TaskId, TaskIteration, TaskKind, Workday, NUM_SPECIAL_TASKS,
};
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::files::{
    active_workday_file, archived_workday_file, atomic_write, list_archived_workdays_on,
    next_archive_sequence, read_file, remove_file, report_file,
};

/// Current on-disk format version
pub const SNAPSHOT_VERSION: u32 = 1;

/// On-disk form of a workday
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkdaySnapshot {
    pub version: u32,
    pub saved_at: DateTime<Local>,
    pub started_at: DateTime<Local>,
    #[serde(default)]
    pub ended_at: Option<DateTime<Local>>,
    pub tasks: Vec<TaskRecord>,
    #[serde(default)]
    pub active: Option<ActiveRecord>,
    /// Concluded iterations, oldest first
    #[serde(default)]
    pub log: Vec<IterationRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: TaskId,
    pub name: String,
    pub kind: TaskKind,
    pub runtime_ms: u64,
    #[serde(with = "color_hex")]
    pub color: TaskColor,
    #[serde(default)]
    pub time_limit_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveRecord {
    pub task_id: TaskId,
    pub started_at: DateTime<Local>,
    /// Runtime of the iteration at `saved_at`
    pub elapsed_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationRecord {
    pub task_id: TaskId,
    pub task_name: String,
    pub started_at: DateTime<Local>,
    pub runtime_ms: u64,
}

/// Colors are stored as "#rrggbb" so the files stay hand-editable
mod color_hex {
    use crate::domain::TaskColor;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(color: &TaskColor, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(color)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TaskColor, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl Workday {
    /// Capture the workday, including the live runtime of the active iteration
    pub fn to_snapshot(&self) -> WorkdaySnapshot {
        let now = self.now_ms();

        let tasks = self
            .tasks()
            .iter()
            .map(|task| TaskRecord {
                id: task.id(),
                name: task.name().to_string(),
                kind: task.kind(),
                runtime_ms: task.runtime_ms(),
                color: task.color(),
                time_limit_ms: task.time_limit_ms(),
            })
            .collect();

        let active = self.active_iteration().and_then(|iteration| {
            iteration.started_at().map(|started_at| ActiveRecord {
                task_id: iteration.task_id(),
                started_at,
                elapsed_ms: iteration.runtime_ms(now),
            })
        });

        let log = self
            .log_oldest_first()
            .filter_map(|iteration| {
                iteration.started_at().map(|started_at| IterationRecord {
                    task_id: iteration.task_id(),
                    task_name: iteration.task_name().to_string(),
                    started_at,
                    runtime_ms: iteration.runtime_ms(now),
                })
            })
            .collect();

        WorkdaySnapshot {
            version: SNAPSHOT_VERSION,
            saved_at: Local::now(),
            started_at: self.started_at(),
            ended_at: self.ended_at(),
            tasks,
            active,
            log,
        }
    }

    /// Rebuild a workday from a snapshot.
    ///
    /// An in-progress iteration resumes with the time elapsed since the snapshot was
    /// saved added to it, so time the app was closed still counts.
    pub fn from_snapshot(snapshot: WorkdaySnapshot, clock: Arc<dyn Clock>) -> Result<Self> {
        validate(&snapshot)?;

        let mut tasks: Vec<Task> = snapshot
            .tasks
            .into_iter()
            .map(|r| Task::restore(r.id, r.name, r.kind, r.runtime_ms, r.color, r.time_limit_ms))
            .collect();

        let now = clock.now_ms();
        let active = match snapshot.active {
            Some(record) => {
                let task = tasks
                    .iter_mut()
                    .find(|t| t.id() == record.task_id)
                    .context("Active iteration refers to an unknown task")?;
                let away_ms = (Local::now() - snapshot.saved_at).num_milliseconds().max(0) as u64;
                Some(TaskIteration::resume(
                    task,
                    record.started_at,
                    record.elapsed_ms + away_ms,
                    now,
                ))
            }
            None => None,
        };

        let log: VecDeque<TaskIteration> = snapshot
            .log
            .into_iter()
            .map(|r| TaskIteration::concluded(r.task_id, r.task_name, r.started_at, r.runtime_ms))
            .collect();

        Ok(Workday::from_parts(
            tasks,
            active,
            log,
            clock,
            snapshot.started_at,
            snapshot.ended_at,
        ))
    }
}

/// Check the task layout before a snapshot becomes a workday
fn validate(snapshot: &WorkdaySnapshot) -> Result<()> {
    if snapshot.version > SNAPSHOT_VERSION {
        bail!(
            "Unsupported workday format version {} (expected {})",
            snapshot.version,
            SNAPSHOT_VERSION
        );
    }

    let tasks = &snapshot.tasks;
    if tasks.len() < NUM_SPECIAL_TASKS {
        bail!("Workday is missing its special tasks");
    }
    let user_count = tasks.len() - NUM_SPECIAL_TASKS;

    if let Some(task) = tasks[..user_count].iter().find(|t| t.kind.is_special()) {
        bail!("Special task '{}' is out of place", task.name);
    }
    if tasks[user_count].kind != TaskKind::AddNew || tasks[user_count + 1].kind != TaskKind::EndWorkday {
        bail!("Workday must end with the Add New and End Workday tasks");
    }

    let mut names = HashSet::new();
    let mut ids = HashSet::new();
    for task in tasks {
        if !names.insert(task.name.as_str()) {
            bail!("Duplicate task name '{}'", task.name);
        }
        if !ids.insert(task.id) {
            bail!("Duplicate task id {}", task.id);
        }
    }

    if let Some(active) = &snapshot.active {
        if !tasks[..user_count].iter().any(|t| t.id == active.task_id) {
            bail!("Active iteration must refer to a user task");
        }
    }

    Ok(())
}

pub fn to_json(workday: &Workday) -> Result<String> {
    serde_json::to_string_pretty(&workday.to_snapshot()).context("Failed to serialize workday")
}

pub fn from_json(content: &str, clock: Arc<dyn Clock>) -> Result<Workday> {
    let snapshot: WorkdaySnapshot =
        serde_json::from_str(content).context("Failed to parse workday")?;
    Workday::from_snapshot(snapshot, clock)
}

/// Preserve the in-progress workday
pub fn save_workday(dir: &Path, workday: &Workday) -> Result<()> {
    let path = active_workday_file(dir);
    atomic_write(&path, &to_json(workday)?)?;
    log::debug!("Saved workday to {}", path.display());
    Ok(())
}

/// Read a workday file, None when it doesn't exist
fn load_workday_file(path: &Path, clock: Arc<dyn Clock>) -> Result<Option<Workday>> {
    match read_file(path)? {
        Some(content) => from_json(&content, clock)
            .with_context(|| format!("Failed to load workday from {}", path.display()))
            .map(Some),
        None => Ok(None),
    }
}

/// Restore the preserved workday, None when nothing was saved
pub fn load_workday(dir: &Path, clock: Arc<dyn Clock>) -> Result<Option<Workday>> {
    load_workday_file(&active_workday_file(dir), clock)
}

/// The workday to continue with on start-up.
/// An ended workday hands its task definitions over to a fresh day.
pub fn restore_workday(dir: &Path, clock: Arc<dyn Clock>) -> Result<Workday> {
    match load_workday(dir, clock.clone())? {
        Some(mut workday) if workday.is_ended() => {
            log::info!(
                "Previous workday ended; starting a new one with {} tasks",
                workday.user_task_count()
            );
            workday.reset_workday();
            Ok(workday)
        }
        Some(workday) => {
            log::info!("Restored workday started at {}", workday.started_at());
            Ok(workday)
        }
        None => Ok(Workday::new(clock)),
    }
}

/// Load an archived workday. Without a sequence the latest archive of the date is used.
pub fn load_archived_workday(
    dir: &Path,
    date: NaiveDate,
    sequence: Option<u32>,
    clock: Arc<dyn Clock>,
) -> Result<Option<Workday>> {
    let path = match sequence {
        Some(sequence) => archived_workday_file(dir, date, sequence),
        None => match list_archived_workdays_on(dir, date)?.pop() {
            Some(path) => path,
            None => return Ok(None),
        },
    };
    load_workday_file(&path, clock)
}

/// Files written for an ended workday
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Archive {
    pub workday: PathBuf,
    /// Where the matching report belongs
    pub report: PathBuf,
}

/// Write the workday under the date it started.
/// Earlier archives of the same date are never replaced.
pub fn archive_workday(dir: &Path, workday: &Workday) -> Result<Archive> {
    let date = workday.started_at().date_naive();
    let sequence = next_archive_sequence(dir, date);
    let path = archived_workday_file(dir, date, sequence);
    atomic_write(&path, &to_json(workday)?)?;
    log::info!("Archived workday to {}", path.display());
    Ok(Archive {
        workday: path,
        report: report_file(dir, date, sequence),
    })
}

/// Forget the preserved workday
pub fn discard_workday(dir: &Path) -> Result<bool> {
    remove_file(active_workday_file(dir))
}
