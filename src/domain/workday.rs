use super::clock::Clock;
use super::enums::{TaskKind, ADD_NEW_LABEL, END_WORKDAY_LABEL};
use super::error::{ErrorCode, TaskResult};
use super::format::format_hms;
use super::iteration::TaskIteration;
use super::task::{Task, TaskColor, TaskId};
use chrono::{DateTime, Local};
use std::collections::VecDeque;
use std::sync::Arc;

/// Number of special tasks kept at the tail of the task list
pub const NUM_SPECIAL_TASKS: usize = 2;

/// A tracked work session: the tasks, the running iteration and the log of
/// concluded iterations.
///
/// Task order is N user tasks followed by the "Add New" and "End Workday" special tasks.
/// At most one iteration is active; the log holds concluded iterations oldest-first and
/// never contains the active one.
#[derive(Debug)]
pub struct Workday {
    tasks: Vec<Task>,
    active: Option<TaskIteration>,
    log: VecDeque<TaskIteration>,
    clock: Arc<dyn Clock>,
    started_at: DateTime<Local>,
    ended_at: Option<DateTime<Local>>,
}

impl Workday {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            tasks: vec![
                Task::with_kind(ADD_NEW_LABEL, TaskKind::AddNew),
                Task::with_kind(END_WORKDAY_LABEL, TaskKind::EndWorkday),
            ],
            active: None,
            log: VecDeque::new(),
            clock,
            started_at: Local::now(),
            ended_at: None,
        }
    }

    /// Assemble a workday from restored parts. Callers validate the layout first.
    pub(crate) fn from_parts(
        tasks: Vec<Task>,
        active: Option<TaskIteration>,
        log: VecDeque<TaskIteration>,
        clock: Arc<dyn Clock>,
        started_at: DateTime<Local>,
        ended_at: Option<DateTime<Local>>,
    ) -> Self {
        Self {
            tasks,
            active,
            log,
            clock,
            started_at,
            ended_at,
        }
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    pub fn ended_at(&self) -> Option<DateTime<Local>> {
        self.ended_at
    }

    pub fn is_ended(&self) -> bool {
        self.ended_at.is_some()
    }

    // ---- Task definitions ----

    /// Number of tasks including the special tasks
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn user_task_count(&self) -> usize {
        self.tasks.len() - NUM_SPECIAL_TASKS
    }

    pub fn is_special(&self, index: usize) -> bool {
        index >= self.user_task_count()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn user_tasks(&self) -> &[Task] {
        &self.tasks[..self.user_task_count()]
    }

    pub fn task(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn task_by_id(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    pub fn task_index(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id() == id)
    }

    pub fn task_name(&self, index: usize) -> Option<&str> {
        self.tasks.get(index).map(Task::name)
    }

    pub fn task_color(&self, index: usize) -> Option<TaskColor> {
        self.tasks.get(index).map(Task::color)
    }

    /// Add a user task directly before the special tasks.
    /// Returns the index it was inserted at.
    pub fn add_task(&mut self, task: Task) -> TaskResult<usize> {
        if task.is_special() {
            return Err(ErrorCode::TaskInvalid);
        }
        if self.has_name(task.name(), None) {
            return Err(ErrorCode::TaskDuplicate);
        }

        let index = self.user_task_count();
        log::info!("Adding task '{}' at {}", task.name(), index);
        self.tasks.insert(index, task);
        Ok(index)
    }

    /// Remove the user task at `index`.
    /// If it is the active task, its iteration is ended and logged first.
    pub fn delete_task(&mut self, index: usize) -> TaskResult<Task> {
        if index >= self.user_task_count() {
            return Err(ErrorCode::TaskInvalid);
        }

        if self.active_task_index() == Some(index) {
            self.end_task();
        }

        let task = self.tasks.remove(index);
        log::info!("Deleted task '{}'", task.name());
        Ok(task)
    }

    /// Remove a user task by identity
    pub fn delete_task_by_id(&mut self, id: TaskId) -> TaskResult<Task> {
        let index = self.task_index(id).ok_or(ErrorCode::TaskInvalid)?;
        self.delete_task(index)
    }

    /// Rename a user task, keeping names unique
    pub fn rename_task(&mut self, index: usize, name: impl Into<String>) -> TaskResult {
        let name = name.into();
        if index >= self.user_task_count() {
            return Err(ErrorCode::TaskInvalid);
        }
        if self.has_name(&name, Some(index)) {
            return Err(ErrorCode::TaskDuplicate);
        }
        if let Some(iteration) = self.active.as_mut() {
            if iteration.task_id() == self.tasks[index].id() {
                iteration.rename(&name);
            }
        }
        self.tasks[index].set_name(name);
        Ok(())
    }

    pub fn set_task_color(&mut self, index: usize, color: TaskColor) -> TaskResult {
        self.user_task_mut(index)?.set_color(color);
        Ok(())
    }

    pub fn set_task_time_limit(
        &mut self,
        index: usize,
        hours: u64,
        minutes: u64,
        seconds: u64,
    ) -> TaskResult {
        self.user_task_mut(index)?
            .set_time_limit_hms(hours, minutes, seconds)
    }

    pub fn set_task_time_limit_ms(&mut self, index: usize, ms: u64) -> TaskResult {
        self.user_task_mut(index)?.set_time_limit_ms(ms);
        Ok(())
    }

    fn user_task_mut(&mut self, index: usize) -> TaskResult<&mut Task> {
        if index >= self.user_task_count() {
            return Err(ErrorCode::TaskInvalid);
        }
        Ok(&mut self.tasks[index])
    }

    fn has_name(&self, name: &str, except: Option<usize>) -> bool {
        self.tasks
            .iter()
            .enumerate()
            .any(|(i, t)| Some(i) != except && t.name() == name)
    }

    // ---- Context switching ----

    /// End the current iteration (if any) and begin one on the task at `index`
    pub fn context_switch(&mut self, index: usize) -> TaskResult {
        if index >= self.user_task_count() {
            log::warn!("Rejected context switch to special or missing task {}", index);
            return Err(ErrorCode::TaskInvalid);
        }
        if self.active_task_index() == Some(index) {
            return Err(ErrorCode::TaskAlreadyStarted);
        }

        self.end_task();
        self.begin_task(index)?;
        self.ended_at = None;

        log::info!("Switched to '{}'", self.tasks[index].name());
        Ok(())
    }

    /// Stop the active iteration; data is kept for review
    pub fn end_workday(&mut self) {
        self.end_task();
        self.ended_at = Some(Local::now());
        log::info!("Workday ended with {} log entries", self.log.len());
    }

    /// Clear the log and every task's runtime; task definitions are kept
    pub fn reset_workday(&mut self) {
        self.end_task();
        self.log.clear();
        for task in &mut self.tasks {
            task.reset_runtime();
        }
        self.started_at = Local::now();
        self.ended_at = None;
        log::info!("Workday reset");
    }

    pub fn active_iteration(&self) -> Option<&TaskIteration> {
        self.active.as_ref()
    }

    pub fn active_task_index(&self) -> Option<usize> {
        self.active
            .as_ref()
            .and_then(|iteration| self.task_index(iteration.task_id()))
    }

    fn begin_task(&mut self, index: usize) -> TaskResult {
        let now = self.clock.now_ms();
        let task = &mut self.tasks[index];
        let mut iteration = TaskIteration::new(task);
        iteration.start(task, now)?;
        self.active = Some(iteration);
        Ok(())
    }

    /// Conclude and log the active iteration.
    /// An iteration reporting "already stopped" is treated as nothing to conclude.
    fn end_task(&mut self) {
        let Some(mut iteration) = self.active.take() else {
            return;
        };

        let now = self.clock.now_ms();
        let result = match self.tasks.iter_mut().find(|t| t.id() == iteration.task_id()) {
            Some(task) => iteration.end(task, now),
            None => Err(ErrorCode::TaskInvalid),
        };

        match result {
            Ok(()) => self.log.push_back(iteration),
            Err(ErrorCode::TaskAlreadyStopped) => {}
            Err(err) => log::warn!("Could not conclude iteration: {}", err.describe()),
        }
    }

    // ---- Queries ----

    /// Stored runtime plus the live span of the active iteration when it belongs to this task
    pub fn total_task_runtime_ms(&self, index: usize) -> u64 {
        let Some(task) = self.tasks.get(index) else {
            return 0;
        };

        let mut runtime = task.runtime_ms();
        if let Some(iteration) = &self.active {
            if iteration.task_id() == task.id() {
                runtime += iteration.runtime_ms(self.clock.now_ms());
            }
        }
        runtime
    }

    /// Runtime as "HH:MM:SS"
    pub fn task_runtime(&self, index: usize) -> String {
        format_hms(self.total_task_runtime_ms(index))
    }

    /// Sum of all user tasks' runtime, including the live span
    pub fn total_runtime_ms(&self) -> u64 {
        (0..self.user_task_count())
            .map(|i| self.total_task_runtime_ms(i))
            .sum()
    }

    /// Share of the total user-task runtime spent on this task, 0-100
    pub fn task_percentage(&self, index: usize) -> f64 {
        if index >= self.tasks.len() {
            return 0.0;
        }

        let total = self.total_runtime_ms();
        if total == 0 {
            return 0.0;
        }
        self.total_task_runtime_ms(index) as f64 / total as f64 * 100.0
    }

    /// True if the task has a limit and its runtime (live span included) is beyond it
    pub fn is_task_limit_exceeded(&self, index: usize) -> bool {
        match self.tasks.get(index) {
            Some(task) if task.has_time_limit() => {
                self.total_task_runtime_ms(index) > task.time_limit_ms()
            }
            _ => false,
        }
    }

    // ---- Log ----

    pub fn log_len(&self) -> usize {
        self.log.len()
    }

    /// Concluded iterations, most recent first
    pub fn log_newest_first(&self) -> impl Iterator<Item = &TaskIteration> {
        self.log.iter().rev()
    }

    pub fn log_oldest_first(&self) -> impl Iterator<Item = &TaskIteration> {
        self.log.iter()
    }
}
