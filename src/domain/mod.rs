pub mod clock;
pub mod enums;
pub mod error;
pub mod format;
pub mod iteration;
pub mod task;
pub mod views;
pub mod workday;

#[cfg(test)]
pub use clock::ManualClock;
pub use clock::{system_clock, Clock, MonotonicClock};
pub use enums::{RefreshRate, TaskKind, UiMode, ADD_NEW_LABEL, END_WORKDAY_LABEL};
pub use error::{ErrorCode, TaskResult};
pub use format::{format_hms, format_percent, hms_to_ms};
pub use iteration::{IterationState, TaskIteration};
pub use task::{validate_task_name, NameError, Task, TaskColor, TaskId, TASK_NAME_CHARS_MAX};
pub use views::{log_rows, task_tiles, tile_badge, LogRow, TaskTile};
pub use workday::{Workday, NUM_SPECIAL_TASKS};
