/// Desktop notification support
/// Currently only implements macOS notifications

#[cfg(target_os = "macos")]
use std::process::Command;

/// Send a notification when a task runs past its time limit
pub fn notify_limit_exceeded(task_name: &str, limit: &str) {
    #[cfg(target_os = "macos")]
    {
        let script = format!(
            r#"display notification "⏰ {} passed {}" with title "Teamlead - Time Limit Exceeded""#,
            task_name.replace('"', "\\\""),
            limit
        );

        if let Err(err) = Command::new("osascript").arg("-e").arg(&script).output() {
            log::warn!("Failed to send notification: {}", err);
        }
    }

    #[cfg(not(target_os = "macos"))]
    {
        // No-op on other platforms
        let _ = (task_name, limit);
    }
}
