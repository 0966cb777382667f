use crate::app::AppState;
use crate::domain::UiMode;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(true);
    }

    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::AddingTask | UiMode::RenamingTask => handle_input_form_mode(app, key),
        UiMode::ConfirmDelete | UiMode::ConfirmReset => handle_confirm_mode(app, key),
        UiMode::TaskLog => handle_log_mode(app, key),
        UiMode::Summary | UiMode::About => handle_view_mode(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        // Grid navigation
        KeyCode::Left | KeyCode::Char('h') => app.move_selection_left(),
        KeyCode::Right => app.move_selection_right(),
        KeyCode::Up | KeyCode::Char('k') => app.move_selection_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection_down(),

        // Switch task / add / end workday
        KeyCode::Enter | KeyCode::Char(' ') => app.activate_selected(),

        KeyCode::Char('a') => app.start_add_task(),
        KeyCode::Char('e') => app.start_rename(),
        KeyCode::Char('d') | KeyCode::Delete => app.request_delete(),
        KeyCode::Char('r') => app.request_reset(),

        KeyCode::Char('l') => app.show_log(),
        KeyCode::Char('s') => app.show_summary(),
        KeyCode::Char('?') => app.show_about(),

        KeyCode::Char('f') => app.cycle_refresh_rate(),

        KeyCode::Char('q') | KeyCode::Esc => return Ok(true),

        _ => {}
    }
    Ok(false)
}

/// Handle keys in the add/rename form
fn handle_input_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => app.submit_input_form(),
        KeyCode::Esc => app.cancel(),
        KeyCode::Tab | KeyCode::Down => app.input_form_next_field(),
        KeyCode::BackTab | KeyCode::Up => app.input_form_prev_field(),
        KeyCode::Backspace => app.input_form_backspace(),
        KeyCode::Char(c) => app.input_form_add_char(c),
        _ => {}
    }
    Ok(false)
}

/// Handle y/n in confirmation dialogs
fn handle_confirm_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            if app.ui_mode == UiMode::ConfirmDelete {
                app.confirm_delete();
            } else {
                app.confirm_reset();
            }
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel(),
        _ => {}
    }
    Ok(false)
}

/// Handle keys in the task log view
fn handle_log_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.scroll_log_up(),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_log_down(),
        KeyCode::Esc | KeyCode::Char('l') | KeyCode::Char('q') => app.cancel(),
        _ => {}
    }
    Ok(false)
}

/// Handle keys in read-only views (summary, about)
fn handle_view_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('s') | KeyCode::Char('?') => {
            app.cancel()
        }
        KeyCode::Char('r') if app.ui_mode == UiMode::Summary => app.request_reset(),
        _ => {}
    }
    Ok(false)
}
