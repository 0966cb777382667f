pub mod header_pane;
pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod log_pane;
pub mod modal;
pub mod styles;
pub mod summary_pane;
pub mod task_grid;

use crate::app::AppState;
use crate::domain::UiMode;
use header_pane::render_header_pane;
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::create_layout;
use log_pane::render_log_pane;
use modal::{render_about_modal, render_confirm_delete_modal, render_confirm_reset_modal};
use ratatui::{text::Span, widgets::Paragraph, Frame};
use styles::hint_style;
use summary_pane::render_summary_pane;
use task_grid::render_task_grid;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size);

    render_keybindings(f, app.ui_mode, layout.keybindings_area);
    render_header_pane(f, app, layout.header_area);

    // Content: the log and summary views replace the grid
    match app.ui_mode {
        UiMode::TaskLog => render_log_pane(f, app, layout.content_area),
        UiMode::Summary => render_summary_pane(f, app, layout.content_area),
        _ => render_task_grid(f, app, layout.content_area),
    }

    if let Some(status) = &app.status {
        f.render_widget(
            Paragraph::new(Span::styled(format!(" {}", status), hint_style())),
            layout.status_area,
        );
    }

    // Dialogs
    match app.ui_mode {
        UiMode::ConfirmDelete => render_confirm_delete_modal(f, app, size),
        UiMode::ConfirmReset => render_confirm_reset_modal(f, app, size),
        UiMode::About => render_about_modal(f, app, size),
        UiMode::AddingTask | UiMode::RenamingTask => render_input_form(f, app, size),
        _ => {}
    }
}
