use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Label of the special task used to define a new user task
pub const ADD_NEW_LABEL: &str = "Add New";
/// Label of the special task used to end the workday
pub const END_WORKDAY_LABEL: &str = "End Workday";

/// What a task entry in the workday stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskKind {
    /// A timed, user-defined activity
    User,
    /// Triggers the add-task form
    AddNew,
    /// Ends the workday and shows the summary
    EndWorkday,
}

impl TaskKind {
    pub fn is_special(&self) -> bool {
        !matches!(self, Self::User)
    }

    /// Fixed label for special tasks
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Self::User => None,
            Self::AddNew => Some(ADD_NEW_LABEL),
            Self::EndWorkday => Some(END_WORKDAY_LABEL),
        }
    }
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    AddingTask,
    RenamingTask,
    ConfirmDelete,
    ConfirmReset,
    TaskLog,
    Summary,
    About,
}

/// How often the task tiles are redrawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RefreshRate {
    #[serde(rename = "100ms")]
    Ms100,
    #[serde(rename = "500ms")]
    Ms500,
    #[default]
    #[serde(rename = "1s")]
    Sec1,
    #[serde(rename = "5s")]
    Sec5,
}

impl RefreshRate {
    pub fn millis(&self) -> u64 {
        match self {
            Self::Ms100 => 100,
            Self::Ms500 => 500,
            Self::Sec1 => 1000,
            Self::Sec5 => 5000,
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.millis())
    }

    /// Next rate, wrapping from slowest to fastest
    pub fn cycle(&self) -> Self {
        match self {
            Self::Ms100 => Self::Ms500,
            Self::Ms500 => Self::Sec1,
            Self::Sec1 => Self::Sec5,
            Self::Sec5 => Self::Ms100,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Ms100 => "100ms",
            Self::Ms500 => "500ms",
            Self::Sec1 => "1s",
            Self::Sec5 => "5s",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_kind_is_special() {
        assert!(!TaskKind::User.is_special());
        assert!(TaskKind::AddNew.is_special());
        assert!(TaskKind::EndWorkday.is_special());
    }

    #[test]
    fn test_task_kind_label() {
        assert_eq!(TaskKind::User.label(), None);
        assert_eq!(TaskKind::AddNew.label(), Some("Add New"));
        assert_eq!(TaskKind::EndWorkday.label(), Some("End Workday"));
    }

    #[test]
    fn test_refresh_rate_cycle() {
        let mut rate = RefreshRate::Ms100;
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(rate.millis());
            rate = rate.cycle();
        }
        assert_eq!(seen, vec![100, 500, 1000, 5000]);
        assert_eq!(rate, RefreshRate::Ms100);
    }

    #[test]
    fn test_refresh_rate_serde_names() {
        let json = serde_json::to_string(&RefreshRate::Ms500).unwrap();
        assert_eq!(json, "\"500ms\"");
        let parsed: RefreshRate = serde_json::from_str("\"5s\"").unwrap();
        assert_eq!(parsed, RefreshRate::Sec5);
    }
}
