use crate::app::AppState;
use crate::domain::{format_hms, UiMode};
use crate::ui::{
    layout::create_modal_area,
    styles::{modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

fn render_dialog(f: &mut Frame, area: Rect, title: &str, lines: Vec<Line>) {
    let modal_area = create_modal_area(area);

    // Clear the area behind the modal
    f.render_widget(Clear, modal_area);

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(title.to_string(), modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}

fn confirm_options() -> Line<'static> {
    Line::from(vec![
        Span::styled("  [y]", modal_title_style()),
        Span::raw(" Yes  "),
        Span::styled("[n]", modal_title_style()),
        Span::raw(" No"),
    ])
}

/// Render the delete confirmation
pub fn render_confirm_delete_modal(f: &mut Frame, app: &AppState, area: Rect) {
    if app.ui_mode != UiMode::ConfirmDelete {
        return;
    }
    let index = app.selected_index;
    let name = app.workday.task_name(index).unwrap_or_default();

    let mut lines = vec![
        Line::raw(""),
        Line::raw(format!("  Delete task \"{}\"?", name)),
        Line::raw(format!("  Tracked so far: {}", app.workday.task_runtime(index))),
    ];
    if app.workday.active_task_index() == Some(index) {
        lines.push(Line::raw("  The running iteration will be stopped and logged."));
    }
    lines.push(Line::raw(""));
    lines.push(confirm_options());

    render_dialog(f, area, " Delete Task ", lines);
}

/// Render the reset confirmation
pub fn render_confirm_reset_modal(f: &mut Frame, app: &AppState, area: Rect) {
    if app.ui_mode != UiMode::ConfirmReset {
        return;
    }

    let lines = vec![
        Line::raw(""),
        Line::raw("  Reset the workday?"),
        Line::raw(""),
        Line::raw(format!(
            "  {} of tracked time and {} log entries will be cleared.",
            format_hms(app.workday.total_runtime_ms()),
            app.workday.log_len()
        )),
        Line::raw("  Task definitions are kept."),
        Line::raw(""),
        confirm_options(),
    ];

    render_dialog(f, area, " Reset Workday ", lines);
}

/// Render the about dialog
pub fn render_about_modal(f: &mut Frame, app: &AppState, area: Rect) {
    if app.ui_mode != UiMode::About {
        return;
    }

    let data_dir = app
        .data_dir
        .as_ref()
        .map(|d| d.display().to_string())
        .unwrap_or_else(|| "(in memory)".to_string());

    let lines = vec![
        Line::raw(""),
        Line::raw(format!("  Teamlead {}", env!("CARGO_PKG_VERSION"))),
        Line::raw(""),
        Line::raw("  Track how a workday is spent across tasks."),
        Line::raw("  Pick a tile to switch tasks; the previous one stops."),
        Line::raw(""),
        Line::raw(format!("  Data: {}", data_dir)),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  [Esc]", modal_title_style()),
            Span::raw(" Close"),
        ]),
    ];

    render_dialog(f, area, " About ", lines);
}
