use super::error::{ErrorCode, TaskResult};
use super::task::{Task, TaskId};
use chrono::{DateTime, Local};

/// Lifecycle of a single iteration: Idle -> Active -> Concluded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterationState {
    Idle,
    Active,
    Concluded,
}

/// One contiguous span of performing a task.
///
/// Holds the task's id rather than the task itself; the workday owns tasks and hands
/// the matching one in on `start`/`end`, which are the only calls that mutate it.
#[derive(Debug, Clone)]
pub struct TaskIteration {
    task_id: TaskId,
    /// Name shown in the log; follows renames only while active
    task_name: String,
    state: IterationState,
    started_at: Option<DateTime<Local>>,
    /// Monotonic timestamp captured at start
    start_ms: u64,
    /// Runtime carried over from a previous process (restored iterations)
    carried_ms: u64,
    /// Frozen duration once concluded
    runtime_ms: u64,
}

impl TaskIteration {
    pub fn new(task: &Task) -> Self {
        Self {
            task_id: task.id(),
            task_name: task.name().to_string(),
            state: IterationState::Idle,
            started_at: None,
            start_ms: 0,
            carried_ms: 0,
            runtime_ms: 0,
        }
    }

    /// Re-create an in-progress iteration that had already run for `elapsed_ms`
    pub(crate) fn resume(
        task: &mut Task,
        started_at: DateTime<Local>,
        elapsed_ms: u64,
        now_ms: u64,
    ) -> Self {
        task.mark_active();
        Self {
            task_id: task.id(),
            task_name: task.name().to_string(),
            state: IterationState::Active,
            started_at: Some(started_at),
            start_ms: now_ms,
            carried_ms: elapsed_ms,
            runtime_ms: 0,
        }
    }

    /// Re-create a logged iteration
    pub(crate) fn concluded(
        task_id: TaskId,
        task_name: String,
        started_at: DateTime<Local>,
        runtime_ms: u64,
    ) -> Self {
        Self {
            task_id,
            task_name,
            state: IterationState::Concluded,
            started_at: Some(started_at),
            start_ms: 0,
            carried_ms: 0,
            runtime_ms,
        }
    }

    pub fn task_id(&self) -> TaskId {
        self.task_id
    }

    pub fn task_name(&self) -> &str {
        &self.task_name
    }

    /// Take over a new task name. Concluded iterations keep the name they were logged with.
    pub(crate) fn rename(&mut self, name: &str) {
        if self.state == IterationState::Active {
            self.task_name = name.to_string();
        }
    }

    pub fn state(&self) -> IterationState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == IterationState::Active
    }

    /// Wall-clock time the iteration began (None while idle)
    pub fn started_at(&self) -> Option<DateTime<Local>> {
        self.started_at
    }

    /// Begin timing. Allowed once, from Idle only.
    pub fn start(&mut self, task: &mut Task, now_ms: u64) -> TaskResult {
        if self.state != IterationState::Idle {
            return Err(ErrorCode::TaskAlreadyStarted);
        }
        if task.id() != self.task_id {
            return Err(ErrorCode::TaskInvalid);
        }

        self.start_ms = now_ms;
        self.started_at = Some(Local::now());
        self.state = IterationState::Active;
        task.mark_active();
        Ok(())
    }

    /// Stop timing and credit the elapsed time to the task. Allowed once, from Active only.
    pub fn end(&mut self, task: &mut Task, now_ms: u64) -> TaskResult {
        if self.state != IterationState::Active {
            return Err(ErrorCode::TaskAlreadyStopped);
        }
        if task.id() != self.task_id {
            return Err(ErrorCode::TaskInvalid);
        }

        self.runtime_ms = self.live_runtime_ms(now_ms);
        self.state = IterationState::Concluded;
        task.add_runtime(self.runtime_ms);
        task.mark_inactive();
        Ok(())
    }

    /// Live elapsed time while active, frozen duration once concluded, zero while idle
    pub fn runtime_ms(&self, now_ms: u64) -> u64 {
        match self.state {
            IterationState::Idle => 0,
            IterationState::Active => self.live_runtime_ms(now_ms),
            IterationState::Concluded => self.runtime_ms,
        }
    }

    fn live_runtime_ms(&self, now_ms: u64) -> u64 {
        self.carried_ms + now_ms.saturating_sub(self.start_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iteration_lifecycle() {
        let mut task = Task::new("Code");
        let mut iteration = TaskIteration::new(&task);
        assert_eq!(iteration.state(), IterationState::Idle);
        assert_eq!(iteration.runtime_ms(5_000), 0);
        assert!(iteration.started_at().is_none());

        iteration.start(&mut task, 1_000).unwrap();
        assert!(iteration.is_active());
        assert!(task.is_active());
        assert!(iteration.started_at().is_some());
        assert_eq!(iteration.runtime_ms(4_000), 3_000);

        iteration.end(&mut task, 31_000).unwrap();
        assert_eq!(iteration.state(), IterationState::Concluded);
        assert!(!task.is_active());
        assert_eq!(task.runtime_ms(), 30_000);
    }

    #[test]
    fn test_runtime_frozen_after_end() {
        let mut task = Task::new("Code");
        let mut iteration = TaskIteration::new(&task);
        iteration.start(&mut task, 0).unwrap();
        iteration.end(&mut task, 2_000).unwrap();

        assert_eq!(iteration.runtime_ms(2_000), 2_000);
        assert_eq!(iteration.runtime_ms(60_000), 2_000);
    }

    #[test]
    fn test_start_twice_fails() {
        let mut task = Task::new("Code");
        let mut iteration = TaskIteration::new(&task);
        iteration.start(&mut task, 0).unwrap();
        assert_eq!(iteration.start(&mut task, 10), Err(ErrorCode::TaskAlreadyStarted));

        iteration.end(&mut task, 20).unwrap();
        assert_eq!(iteration.start(&mut task, 30), Err(ErrorCode::TaskAlreadyStarted));
        // A failed restart must not touch the task
        assert!(!task.is_active());
        assert_eq!(task.runtime_ms(), 20);
    }

    #[test]
    fn test_end_out_of_turn_fails() {
        let mut task = Task::new("Code");
        let mut iteration = TaskIteration::new(&task);
        assert_eq!(iteration.end(&mut task, 10), Err(ErrorCode::TaskAlreadyStopped));

        iteration.start(&mut task, 0).unwrap();
        iteration.end(&mut task, 10).unwrap();
        assert_eq!(iteration.end(&mut task, 20), Err(ErrorCode::TaskAlreadyStopped));
        assert_eq!(task.runtime_ms(), 10);
    }

    #[test]
    fn test_mismatched_task_is_rejected() {
        let mut code = Task::new("Code");
        let mut design = Task::new("Design");
        let mut iteration = TaskIteration::new(&code);

        assert_eq!(iteration.start(&mut design, 0), Err(ErrorCode::TaskInvalid));
        assert!(!design.is_active());

        iteration.start(&mut code, 0).unwrap();
        assert_eq!(iteration.end(&mut design, 10), Err(ErrorCode::TaskInvalid));
        assert_eq!(design.runtime_ms(), 0);
    }

    #[test]
    fn test_resume_carries_elapsed_time() {
        let mut task = Task::new("Code");
        let mut iteration = TaskIteration::resume(&mut task, Local::now(), 10_000, 500);
        assert!(task.is_active());
        assert_eq!(iteration.runtime_ms(500), 10_000);
        assert_eq!(iteration.runtime_ms(1_500), 11_000);

        iteration.end(&mut task, 2_500).unwrap();
        assert_eq!(task.runtime_ms(), 12_000);
    }

    #[test]
    fn test_name_snapshot_survives_rename() {
        let mut task = Task::new("Code");
        let iteration = TaskIteration::new(&task);
        task.set_name("Review");
        assert_eq!(iteration.task_name(), "Code");
    }

    #[test]
    fn test_rename_only_while_active() {
        let mut task = Task::new("Code");
        let mut iteration = TaskIteration::new(&task);
        iteration.start(&mut task, 0).unwrap();
        iteration.rename("Review");
        assert_eq!(iteration.task_name(), "Review");

        iteration.end(&mut task, 1_000).unwrap();
        iteration.rename("Later");
        assert_eq!(iteration.task_name(), "Review");
    }
}
