use super::enums::TaskKind;
use super::error::{ErrorCode, TaskResult};
use super::format::{hms_to_ms, HOURS_PER_DAY, MINS_PER_HOUR, SECS_PER_MIN};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Maximum number of characters in a task name
pub const TASK_NAME_CHARS_MAX: usize = 8;

/// Unique identity of a task, independent of its name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(Uuid);

impl TaskId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display color tag for a task tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl TaskColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for TaskColor {
    fn default() -> Self {
        Self::new(72, 134, 206)
    }
}

impl fmt::Display for TaskColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color '{0}', expected #rrggbb")]
pub struct ColorParseError(String);

impl FromStr for TaskColor {
    type Err = ColorParseError;

    /// Parse "#rrggbb" (leading '#' optional)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError(s.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| ColorParseError(s.to_string()))
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

/// Reasons a proposed task name is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("Task name cannot be empty")]
    Empty,
    #[error("Task name cannot exceed {max} characters")]
    TooLong { max: usize },
}

/// Check a user-supplied task name before a task is created or renamed.
/// Returns the trimmed name.
pub fn validate_task_name(name: &str) -> Result<String, NameError> {
    let trimmed = name.trim();
    let length = trimmed.chars().count();
    if length == 0 {
        Err(NameError::Empty)
    } else if length > TASK_NAME_CHARS_MAX {
        Err(NameError::TooLong {
            max: TASK_NAME_CHARS_MAX,
        })
    } else {
        Ok(trimmed.to_string())
    }
}

/// One nameable activity a user can perform during a workday
#[derive(Debug, Clone)]
pub struct Task {
    id: TaskId,
    name: String,
    kind: TaskKind,
    active: bool,
    total_runtime_ms: u64,
    color: TaskColor,
    /// Zero means no limit
    time_limit_ms: u64,
}

impl Task {
    /// Create a user task
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_kind(name, TaskKind::User)
    }

    pub(crate) fn with_kind(name: impl Into<String>, kind: TaskKind) -> Self {
        Self {
            id: TaskId::new(),
            name: name.into(),
            kind,
            active: false,
            total_runtime_ms: 0,
            color: TaskColor::default(),
            time_limit_ms: 0,
        }
    }

    /// Rebuild a task from stored fields
    pub(crate) fn restore(
        id: TaskId,
        name: String,
        kind: TaskKind,
        total_runtime_ms: u64,
        color: TaskColor,
        time_limit_ms: u64,
    ) -> Self {
        Self {
            id,
            name,
            kind,
            active: false,
            total_runtime_ms,
            color,
            time_limit_ms,
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> TaskKind {
        self.kind
    }

    pub fn is_special(&self) -> bool {
        self.kind.is_special()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Accumulated runtime of concluded iterations
    pub fn runtime_ms(&self) -> u64 {
        self.total_runtime_ms
    }

    pub fn color(&self) -> TaskColor {
        self.color
    }

    pub fn time_limit_ms(&self) -> u64 {
        self.time_limit_ms
    }

    pub fn has_time_limit(&self) -> bool {
        self.time_limit_ms != 0
    }

    /// Reassign the display name (no validation here)
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub(crate) fn mark_active(&mut self) {
        self.active = true;
    }

    pub(crate) fn mark_inactive(&mut self) {
        self.active = false;
    }

    pub(crate) fn add_runtime(&mut self, ms: u64) {
        self.total_runtime_ms = self.total_runtime_ms.saturating_add(ms);
    }

    pub(crate) fn reset_runtime(&mut self) {
        self.total_runtime_ms = 0;
    }

    pub fn set_color(&mut self, color: TaskColor) {
        self.color = color;
    }

    /// Set the limit from hours/minutes/seconds.
    /// Out-of-range components are rejected and the previous limit is kept.
    pub fn set_time_limit_hms(&mut self, hours: u64, minutes: u64, seconds: u64) -> TaskResult {
        if hours >= HOURS_PER_DAY || minutes >= MINS_PER_HOUR || seconds >= SECS_PER_MIN {
            return Err(ErrorCode::LimitOutOfRange);
        }
        self.time_limit_ms = hms_to_ms(hours, minutes, seconds);
        Ok(())
    }

    pub fn set_time_limit_ms(&mut self, ms: u64) {
        self.time_limit_ms = ms;
    }
}

impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Task {}
