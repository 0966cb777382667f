use thiserror::Error;

/// Outcome codes returned by the workday model.
///
/// Every fallible model operation returns one of these as a value; callers decide
/// whether to surface it to the user or ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ErrorCode {
    #[error("The selected task is already started")]
    TaskAlreadyStarted,
    #[error("The selected task is already stopped")]
    TaskAlreadyStopped,
    #[error("The specified task is invalid")]
    TaskInvalid,
    #[error("The specified task has already been created")]
    TaskDuplicate,
    #[error("The specified time limit is out of range")]
    LimitOutOfRange,
}

/// Result type for model operations
pub type TaskResult<T = ()> = Result<T, ErrorCode>;

impl ErrorCode {
    /// Stable numeric handle for the code
    pub fn code(&self) -> u8 {
        match self {
            Self::TaskAlreadyStarted => 1,
            Self::TaskAlreadyStopped => 2,
            Self::TaskInvalid => 3,
            Self::TaskDuplicate => 4,
            Self::LimitOutOfRange => 8,
        }
    }

    /// Code and description, e.g. "[3] The specified task is invalid"
    pub fn describe(&self) -> String {
        format!("[{}] {}", self.code(), self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(ErrorCode::TaskAlreadyStarted.code(), 1);
        assert_eq!(ErrorCode::TaskAlreadyStopped.code(), 2);
        assert_eq!(ErrorCode::TaskInvalid.code(), 3);
        assert_eq!(ErrorCode::TaskDuplicate.code(), 4);
        assert_eq!(ErrorCode::LimitOutOfRange.code(), 8);
    }

    #[test]
    fn test_describe() {
        assert_eq!(
            ErrorCode::TaskDuplicate.describe(),
            "[4] The specified task has already been created"
        );
        assert_eq!(
            ErrorCode::TaskInvalid.to_string(),
            "The specified task is invalid"
        );
    }
}
