use crate::domain::{
    format_hms, validate_task_name, ErrorCode, Task, TaskColor, TaskId, TaskKind, UiMode, Workday,
};
use crate::notifications;
use crate::persistence::{
    archive_workday, next_archive_sequence, report_file, save_settings, save_workday,
    settings_file, Settings,
};
use crate::report::{generate_report, WorkdaySummary};
use crate::ticker::tick_duration;
use anyhow::Result;
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Instant;

/// Number of tile columns in the task grid
pub const GRID_COLUMNS: usize = 3;

/// Fields of the task form, in Tab order
pub const FIELD_NAME: usize = 0;
pub const FIELD_HOURS: usize = 1;
pub const FIELD_MINUTES: usize = 2;
pub const FIELD_SECONDS: usize = 3;
pub const FIELD_COLOR: usize = 4;
const FIELD_COUNT: usize = 5;

/// What a submitted form does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormTarget {
    NewTask,
    Rename(usize),
}

/// Input form state for adding or renaming tasks
#[derive(Debug, Clone)]
pub struct InputFormState {
    pub target: FormTarget,
    pub name: String,
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
    pub color: String,
    pub editing_field: usize,
    /// Validation message shown under the fields
    pub error: Option<String>,
}

impl InputFormState {
    fn new_task(default_color: TaskColor) -> Self {
        Self {
            target: FormTarget::NewTask,
            name: String::new(),
            hours: String::new(),
            minutes: String::new(),
            seconds: String::new(),
            color: default_color.to_string(),
            editing_field: FIELD_NAME,
            error: None,
        }
    }

    fn rename(index: usize, current: &str) -> Self {
        Self {
            target: FormTarget::Rename(index),
            name: current.to_string(),
            ..Self::new_task(TaskColor::default())
        }
    }

    fn field_mut(&mut self, field: usize) -> Option<&mut String> {
        match field {
            FIELD_NAME => Some(&mut self.name),
            FIELD_HOURS => Some(&mut self.hours),
            FIELD_MINUTES => Some(&mut self.minutes),
            FIELD_SECONDS => Some(&mut self.seconds),
            FIELD_COLOR => Some(&mut self.color),
            _ => None,
        }
    }

    /// Whether `c` may be typed into the current field
    fn accepts(&self, c: char) -> bool {
        match self.editing_field {
            FIELD_NAME => !c.is_control(),
            FIELD_HOURS | FIELD_MINUTES | FIELD_SECONDS => c.is_ascii_digit(),
            FIELD_COLOR => c.is_ascii_hexdigit() || c == '#',
            _ => false,
        }
    }

    fn max_len(&self) -> usize {
        match self.editing_field {
            FIELD_HOURS | FIELD_MINUTES | FIELD_SECONDS => 2,
            FIELD_COLOR => 7,
            _ => 32,
        }
    }
}

fn parse_limit_part(raw: &str) -> std::result::Result<u64, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0);
    }
    raw.parse()
        .map_err(|_| format!("'{}' is not a valid number", raw))
}

/// Main application state
pub struct AppState {
    pub workday: Workday,
    pub settings: Settings,
    /// Where the workday, settings and reports are stored. None keeps everything in memory.
    pub data_dir: Option<PathBuf>,
    pub selected_index: usize,
    pub ui_mode: UiMode,
    pub input_form: Option<InputFormState>,
    pub status: Option<String>,
    pub needs_save: bool,
    pub last_tick: Instant,
    /// Tasks already reported as over their limit
    pub notified_limits: HashSet<TaskId>,
    pub log_scroll_offset: usize,
    pub last_report: Option<PathBuf>,
    /// Task awaiting delete confirmation
    pub pending_delete: Option<TaskId>,
}

impl AppState {
    pub fn new(workday: Workday, settings: Settings, data_dir: Option<PathBuf>) -> Self {
        // Limits already exceeded in a restored workday were reported in a previous session
        let notified_limits = (0..workday.user_task_count())
            .filter(|&i| workday.is_task_limit_exceeded(i))
            .filter_map(|i| workday.task(i).map(Task::id))
            .collect();

        // Start on the running task if there is one
        let selected_index = workday.active_task_index().unwrap_or(0);

        Self {
            workday,
            settings,
            data_dir,
            selected_index,
            ui_mode: UiMode::Normal,
            input_form: None,
            status: None,
            needs_save: false,
            last_tick: Instant::now(),
            notified_limits,
            log_scroll_offset: 0,
            last_report: None,
            pending_delete: None,
        }
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    /// Report a rejected model command
    fn report_error(&mut self, err: ErrorCode) {
        log::warn!("Command rejected: {}", err.describe());
        self.set_status(err.to_string());
    }

    // ---- Selection ----

    pub fn selected_kind(&self) -> Option<TaskKind> {
        self.workday.task(self.selected_index).map(Task::kind)
    }

    pub fn move_selection_left(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn move_selection_right(&mut self) {
        if self.selected_index + 1 < self.workday.task_count() {
            self.selected_index += 1;
        }
    }

    pub fn move_selection_up(&mut self) {
        if self.selected_index >= GRID_COLUMNS {
            self.selected_index -= GRID_COLUMNS;
        }
    }

    pub fn move_selection_down(&mut self) {
        let target = self.selected_index + GRID_COLUMNS;
        if target < self.workday.task_count() {
            self.selected_index = target;
        } else {
            self.selected_index = self.workday.task_count().saturating_sub(1);
        }
    }

    fn clamp_selection(&mut self) {
        let last = self.workday.task_count().saturating_sub(1);
        self.selected_index = self.selected_index.min(last);
    }

    // ---- Tile activation ----

    /// Act on the selected tile: switch to a user task, open the form or end the workday
    pub fn activate_selected(&mut self) {
        match self.selected_kind() {
            Some(TaskKind::User) => self.switch_to_selected(),
            Some(TaskKind::AddNew) => self.start_add_task(),
            Some(TaskKind::EndWorkday) => self.end_workday(),
            None => {}
        }
    }

    fn switch_to_selected(&mut self) {
        if self.workday.is_ended() {
            self.set_status("Workday has ended. Press r to start over");
            return;
        }

        let index = self.selected_index;
        match self.workday.context_switch(index) {
            Ok(()) => {
                let name = self.workday.task_name(index).unwrap_or_default().to_string();
                self.set_status(format!("Now working on {}", name));
                self.needs_save = true;
            }
            Err(err) => self.report_error(err),
        }
    }

    /// End the workday, archive it, write the report and show the summary
    pub fn end_workday(&mut self) {
        self.workday.end_workday();
        self.needs_save = true;

        if let Some(dir) = self.data_dir.clone() {
            let report_path = match archive_workday(&dir, &self.workday) {
                Ok(archive) => archive.report,
                Err(e) => {
                    log::warn!("Failed to archive workday: {:#}", e);
                    self.set_status(format!("Could not archive workday: {}", e));
                    let date = self.workday.started_at().date_naive();
                    report_file(&dir, date, next_archive_sequence(&dir, date))
                }
            };
            match generate_report(&self.workday, Some(report_path)) {
                Ok(path) => self.last_report = Some(path),
                Err(e) => log::warn!("Failed to write report: {:#}", e),
            }
        }

        self.ui_mode = UiMode::Summary;
    }

    // ---- Delete / reset ----

    pub fn request_delete(&mut self) {
        if self.selected_kind() == Some(TaskKind::User) {
            self.pending_delete = self.workday.task(self.selected_index).map(Task::id);
            self.ui_mode = UiMode::ConfirmDelete;
        } else {
            self.set_status("Only user tasks can be deleted");
        }
    }

    /// Delete the task picked in `request_delete`
    pub fn confirm_delete(&mut self) {
        self.ui_mode = UiMode::Normal;
        let Some(id) = self.pending_delete.take() else {
            return;
        };
        match self.workday.delete_task_by_id(id) {
            Ok(task) => {
                self.notified_limits.remove(&task.id());
                self.set_status(format!("Deleted {}", task.name()));
                self.clamp_selection();
                self.needs_save = true;
            }
            Err(err) => self.report_error(err),
        }
    }

    pub fn request_reset(&mut self) {
        self.ui_mode = UiMode::ConfirmReset;
    }

    pub fn confirm_reset(&mut self) {
        self.workday.reset_workday();
        self.notified_limits.clear();
        self.ui_mode = UiMode::Normal;
        self.set_status("Workday reset");
        self.needs_save = true;
    }

    /// Leave a confirmation or view without doing anything
    pub fn cancel(&mut self) {
        self.input_form = None;
        self.pending_delete = None;
        self.ui_mode = UiMode::Normal;
    }

    // ---- Forms ----

    /// Open the form for a new task
    pub fn start_add_task(&mut self) {
        self.input_form = Some(InputFormState::new_task(self.settings.default_task_color()));
        self.ui_mode = UiMode::AddingTask;
    }

    /// Open the form for renaming the selected user task
    pub fn start_rename(&mut self) {
        if self.selected_kind() != Some(TaskKind::User) {
            self.set_status("Only user tasks can be renamed");
            return;
        }
        let current = self.workday.task_name(self.selected_index).unwrap_or_default();
        self.input_form = Some(InputFormState::rename(self.selected_index, current));
        self.ui_mode = UiMode::RenamingTask;
    }

    pub fn input_form_next_field(&mut self) {
        if let Some(form) = &mut self.input_form {
            if form.target == FormTarget::NewTask {
                form.editing_field = (form.editing_field + 1) % FIELD_COUNT;
            }
        }
    }

    pub fn input_form_prev_field(&mut self) {
        if let Some(form) = &mut self.input_form {
            if form.target == FormTarget::NewTask {
                form.editing_field = (form.editing_field + FIELD_COUNT - 1) % FIELD_COUNT;
            }
        }
    }

    pub fn input_form_add_char(&mut self, c: char) {
        if let Some(form) = &mut self.input_form {
            if !form.accepts(c) {
                return;
            }
            let max = form.max_len();
            let field = form.editing_field;
            if let Some(value) = form.field_mut(field) {
                if value.chars().count() < max {
                    value.push(c);
                }
            }
        }
    }

    pub fn input_form_backspace(&mut self) {
        if let Some(form) = &mut self.input_form {
            let field = form.editing_field;
            if let Some(value) = form.field_mut(field) {
                value.pop();
            }
        }
    }

    /// Submit the form. Invalid input keeps the form open with an error message.
    pub fn submit_input_form(&mut self) {
        let Some(form) = self.input_form.take() else {
            return;
        };

        let result = match form.target {
            FormTarget::NewTask => self.create_task_from_form(&form),
            FormTarget::Rename(index) => self.rename_from_form(index, &form),
        };

        match result {
            Ok(message) => {
                self.set_status(message);
                self.ui_mode = UiMode::Normal;
                self.needs_save = true;
            }
            Err(message) => {
                log::warn!("Form rejected: {}", message);
                self.input_form = Some(InputFormState {
                    error: Some(message),
                    ..form
                });
            }
        }
    }

    fn create_task_from_form(&mut self, form: &InputFormState) -> std::result::Result<String, String> {
        let name = validate_task_name(&form.name).map_err(|e| e.to_string())?;
        let hours = parse_limit_part(&form.hours)?;
        let minutes = parse_limit_part(&form.minutes)?;
        let seconds = parse_limit_part(&form.seconds)?;
        let color = form.color.parse::<TaskColor>().map_err(|e| e.to_string())?;

        let mut task = Task::new(name);
        task.set_time_limit_hms(hours, minutes, seconds)
            .map_err(|e| e.to_string())?;
        task.set_color(color);

        let limit = task.time_limit_ms();
        let index = self.workday.add_task(task).map_err(|e| e.to_string())?;
        self.selected_index = index;

        let name = self.workday.task_name(index).unwrap_or_default();
        Ok(if limit > 0 {
            format!("Added {} (limit {})", name, format_hms(limit))
        } else {
            format!("Added {}", name)
        })
    }

    fn rename_from_form(&mut self, index: usize, form: &InputFormState) -> std::result::Result<String, String> {
        let name = validate_task_name(&form.name).map_err(|e| e.to_string())?;
        self.workday
            .rename_task(index, name.clone())
            .map_err(|e| e.to_string())?;
        Ok(format!("Renamed to {}", name))
    }

    // ---- Views ----

    pub fn show_log(&mut self) {
        self.log_scroll_offset = 0;
        self.ui_mode = UiMode::TaskLog;
    }

    pub fn show_summary(&mut self) {
        self.ui_mode = UiMode::Summary;
    }

    pub fn show_about(&mut self) {
        self.ui_mode = UiMode::About;
    }

    pub fn scroll_log_up(&mut self) {
        self.log_scroll_offset = self.log_scroll_offset.saturating_sub(1);
    }

    pub fn scroll_log_down(&mut self) {
        if self.log_scroll_offset + 1 < self.workday.log_len() {
            self.log_scroll_offset += 1;
        }
    }

    pub fn summary(&self) -> WorkdaySummary {
        WorkdaySummary::from_workday(&self.workday)
    }

    // ---- Settings ----

    pub fn cycle_refresh_rate(&mut self) {
        self.settings.refresh_rate = self.settings.refresh_rate.cycle();
        self.set_status(format!("Refresh every {}", self.settings.refresh_rate.label()));

        if let Some(dir) = &self.data_dir {
            if let Err(e) = save_settings(settings_file(dir), &self.settings) {
                log::warn!("Failed to save settings: {:#}", e);
            }
        }
    }

    // ---- Timing ----

    /// True when the tiles are due for a redraw
    pub fn tick(&mut self) -> bool {
        if self.last_tick.elapsed() >= tick_duration(self.settings.refresh_rate) {
            self.last_tick = Instant::now();
            true
        } else {
            false
        }
    }

    /// Report each task the first time it runs past its limit
    pub fn check_limits(&mut self) {
        for index in 0..self.workday.user_task_count() {
            if !self.workday.is_task_limit_exceeded(index) {
                continue;
            }
            let Some(task) = self.workday.task(index) else {
                continue;
            };
            if !self.notified_limits.insert(task.id()) {
                continue;
            }

            let name = task.name().to_string();
            let limit = format_hms(task.time_limit_ms());
            log::info!("Task '{}' exceeded its limit of {}", name, limit);
            if self.settings.notify_on_limit {
                notifications::notify_limit_exceeded(&name, &limit);
            }
            self.set_status(format!("{} passed its limit of {}", name, limit));
        }
    }

    // ---- Persistence ----

    /// Preserve the workday. An ended one is kept too, so its tasks carry over to the next start.
    pub fn save(&mut self) -> Result<()> {
        if let Some(dir) = &self.data_dir {
            save_workday(dir, &self.workday)?;
        }
        self.needs_save = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ManualClock, RefreshRate};
    use std::sync::Arc;

    fn create_test_app() -> (AppState, ManualClock) {
        let clock = ManualClock::new();
        let mut workday = Workday::new(Arc::new(clock.clone()));
        workday.add_task(Task::new("Code")).unwrap();
        workday.add_task(Task::new("Design")).unwrap();
        (AppState::new(workday, Settings::default(), None), clock)
    }

    fn type_text(app: &mut AppState, text: &str) {
        for c in text.chars() {
            app.input_form_add_char(c);
        }
    }

    #[test]
    fn test_app_state_new() {
        let (app, _) = create_test_app();
        assert_eq!(app.selected_index, 0);
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.input_form.is_none());
        assert!(!app.needs_save);
    }

    #[test]
    fn test_move_selection() {
        let (mut app, _) = create_test_app();
        // Code, Design, Add New / End Workday
        app.move_selection_right();
        assert_eq!(app.selected_index, 1);
        app.move_selection_down();
        assert_eq!(app.selected_index, 3);
        app.move_selection_right();
        assert_eq!(app.selected_index, 3);
        app.move_selection_up();
        assert_eq!(app.selected_index, 0);
        app.move_selection_left();
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_activate_user_task_switches() {
        let (mut app, clock) = create_test_app();
        app.activate_selected();
        assert_eq!(app.workday.active_task_index(), Some(0));
        assert!(app.needs_save);

        clock.advance(1_000);
        app.activate_selected();
        assert_eq!(app.status.as_deref(), Some("The selected task is already started"));
        assert_eq!(app.workday.log_len(), 0);
    }

    #[test]
    fn test_activate_add_new_opens_form() {
        let (mut app, _) = create_test_app();
        app.selected_index = 2;
        app.activate_selected();
        assert_eq!(app.ui_mode, UiMode::AddingTask);
        let form = app.input_form.as_ref().unwrap();
        assert_eq!(form.color, "#4886ce");
    }

    #[test]
    fn test_submit_new_task() {
        let (mut app, _) = create_test_app();
        app.start_add_task();
        type_text(&mut app, "Email");
        app.input_form_next_field();
        type_text(&mut app, "1");
        app.input_form_next_field();
        type_text(&mut app, "30");
        app.submit_input_form();

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.input_form.is_none());
        assert_eq!(app.workday.user_task_count(), 3);
        assert_eq!(app.selected_index, 2);
        let task = app.workday.task(2).unwrap();
        assert_eq!(task.name(), "Email");
        assert_eq!(task.time_limit_ms(), 5_400_000);
        assert_eq!(app.status.as_deref(), Some("Added Email (limit 01:30:00)"));
    }

    #[test]
    fn test_submit_rejects_bad_input() {
        let (mut app, _) = create_test_app();

        app.start_add_task();
        app.submit_input_form();
        assert_eq!(app.ui_mode, UiMode::AddingTask);
        assert_eq!(
            app.input_form.as_ref().unwrap().error.as_deref(),
            Some("Task name cannot be empty")
        );

        type_text(&mut app, "Code");
        app.submit_input_form();
        assert_eq!(
            app.input_form.as_ref().unwrap().error.as_deref(),
            Some("The specified task has already been created")
        );

        app.input_form_backspace();
        type_text(&mut app, "e2");
        app.input_form_next_field();
        app.input_form_next_field();
        type_text(&mut app, "75");
        app.submit_input_form();
        assert_eq!(
            app.input_form.as_ref().unwrap().error.as_deref(),
            Some("The specified time limit is out of range")
        );
        assert_eq!(app.workday.user_task_count(), 2);
    }

    #[test]
    fn test_form_filters_characters() {
        let (mut app, _) = create_test_app();
        app.start_add_task();
        app.input_form_next_field();
        type_text(&mut app, "1a23");
        let form = app.input_form.as_ref().unwrap();
        assert_eq!(form.hours, "12");

        app.input_form_prev_field();
        app.input_form_prev_field();
        assert_eq!(app.input_form.as_ref().unwrap().editing_field, FIELD_COLOR);
    }

    #[test]
    fn test_rename_task() {
        let (mut app, _) = create_test_app();
        app.start_rename();
        assert_eq!(app.ui_mode, UiMode::RenamingTask);
        assert_eq!(app.input_form.as_ref().unwrap().name, "Code");

        for _ in 0..4 {
            app.input_form_backspace();
        }
        type_text(&mut app, "Review");
        app.submit_input_form();
        assert_eq!(app.workday.task_name(0), Some("Review"));
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_rename_special_task_refused() {
        let (mut app, _) = create_test_app();
        app.selected_index = 2;
        app.start_rename();
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.input_form.is_none());
    }

    #[test]
    fn test_delete_task_with_confirmation() {
        let (mut app, _) = create_test_app();
        app.selected_index = 1;
        app.request_delete();
        assert_eq!(app.ui_mode, UiMode::ConfirmDelete);

        app.confirm_delete();
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.workday.user_task_count(), 1);
        assert_eq!(app.selected_index, 1);
    }

    #[test]
    fn test_delete_special_task_refused() {
        let (mut app, _) = create_test_app();
        app.selected_index = 3;
        app.request_delete();
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.workday.task_count(), 4);
    }

    #[test]
    fn test_end_workday_and_reset() {
        let (mut app, clock) = create_test_app();
        app.activate_selected();
        clock.advance(5_000);

        app.selected_index = 3;
        app.activate_selected();
        assert_eq!(app.ui_mode, UiMode::Summary);
        assert!(app.workday.is_ended());
        assert_eq!(app.summary().total_runtime_ms, 5_000);

        app.cancel();
        app.selected_index = 0;
        app.activate_selected();
        assert!(app.workday.active_iteration().is_none());

        app.request_reset();
        app.confirm_reset();
        assert!(!app.workday.is_ended());
        assert_eq!(app.workday.total_runtime_ms(), 0);
    }

    #[test]
    fn test_check_limits_notifies_once() {
        let (mut app, clock) = create_test_app();
        app.settings.notify_on_limit = false;
        app.workday.set_task_time_limit(0, 0, 0, 5).unwrap();
        app.activate_selected();

        clock.advance(4_900);
        app.check_limits();
        assert!(app.notified_limits.is_empty());

        clock.advance(200);
        app.check_limits();
        assert_eq!(app.notified_limits.len(), 1);
        assert_eq!(app.status.as_deref(), Some("Code passed its limit of 00:00:05"));

        app.status = None;
        app.check_limits();
        assert!(app.status.is_none());
    }

    #[test]
    fn test_cycle_refresh_rate() {
        let (mut app, _) = create_test_app();
        app.cycle_refresh_rate();
        assert_eq!(app.settings.refresh_rate, RefreshRate::Sec5);
        assert_eq!(app.status.as_deref(), Some("Refresh every 5s"));
    }

    #[test]
    fn test_save_writes_preserved_workday() {
        let temp_dir = tempfile::tempdir().unwrap();
        let (mut app, _) = create_test_app();
        app.data_dir = Some(temp_dir.path().to_path_buf());
        app.needs_save = true;

        app.save().unwrap();
        assert!(!app.needs_save);
        assert!(crate::persistence::active_workday_file(temp_dir.path()).exists());
    }

    #[test]
    fn test_end_workday_archives_and_reports() {
        let temp_dir = tempfile::tempdir().unwrap();
        let (mut app, _) = create_test_app();
        app.data_dir = Some(temp_dir.path().to_path_buf());
        app.save().unwrap();

        app.end_workday();
        let date = app.workday.started_at().date_naive();
        assert!(crate::persistence::archived_workday_file(temp_dir.path(), date, 1).exists());
        assert_eq!(
            app.last_report.as_deref(),
            Some(crate::persistence::report_file(temp_dir.path(), date, 1).as_path())
        );
        assert!(app.last_report.as_ref().unwrap().exists());

        app.save().unwrap();
        assert!(crate::persistence::active_workday_file(temp_dir.path()).exists());
    }

    #[test]
    fn test_tasks_carry_over_after_end_workday() {
        let temp_dir = tempfile::tempdir().unwrap();
        let (mut app, clock) = create_test_app();
        app.data_dir = Some(temp_dir.path().to_path_buf());
        app.activate_selected();
        clock.advance(5_000);

        app.selected_index = 3;
        app.activate_selected();
        assert!(app.workday.is_ended());

        // A task added after the end is kept as well
        app.cancel();
        app.start_add_task();
        type_text(&mut app, "Email");
        app.submit_input_form();
        app.save().unwrap();

        let next = crate::persistence::restore_workday(temp_dir.path(), Arc::new(ManualClock::new()))
            .unwrap();
        assert_eq!(next.user_task_count(), 3);
        assert_eq!(next.task_name(2), Some("Email"));
        assert!(!next.is_ended());
        assert_eq!(next.total_runtime_ms(), 0);
    }

    #[test]
    fn test_end_workday_twice_on_same_day() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = temp_dir.path();
        let (mut app, clock) = create_test_app();
        app.data_dir = Some(dir.to_path_buf());

        app.activate_selected();
        clock.advance(60_000);
        app.end_workday();
        let first_report = app.last_report.clone().unwrap();

        app.confirm_reset();
        app.selected_index = 0;
        app.activate_selected();
        clock.advance(1_000);
        app.end_workday();
        assert_ne!(app.last_report.as_ref(), Some(&first_report));

        let date = app.workday.started_at().date_naive();
        let archives = crate::persistence::list_archived_workdays_on(dir, date).unwrap();
        assert_eq!(archives.len(), 2);

        let first = crate::persistence::load_archived_workday(dir, date, Some(1), Arc::new(ManualClock::new()))
            .unwrap()
            .unwrap();
        assert_eq!(first.total_task_runtime_ms(0), 60_000);
        assert!(std::fs::read_to_string(&first_report).unwrap().contains("00:01:00"));
    }

    #[test]
    fn test_delete_uses_task_picked_at_request() {
        let (mut app, _) = create_test_app();
        app.selected_index = 1;
        app.request_delete();
        // Selection moves while the dialog is open
        app.selected_index = 0;
        app.confirm_delete();
        assert_eq!(app.workday.user_task_count(), 1);
        assert_eq!(app.workday.task_name(0), Some("Code"));

        app.request_delete();
        app.cancel();
        assert!(app.pending_delete.is_none());
        app.confirm_delete();
        assert_eq!(app.workday.user_task_count(), 1);
    }
}
