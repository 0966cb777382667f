use crate::app::AppState;
use crate::domain::format_hms;
use crate::ui::styles::{active_style, border_style, default_style, ended_style, title_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the workday header: start time, tracked total, running task and refresh rate
pub fn render_header_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let workday = &app.workday;

    let current = match workday.active_task_index().and_then(|i| workday.task_name(i)) {
        Some(name) => Span::styled(format!("▶ {}", name), active_style()),
        None if workday.is_ended() => Span::styled("Workday ended", ended_style()),
        None => Span::styled("No task running", default_style()),
    };

    let line = Line::from(vec![
        Span::styled("Started ", title_style()),
        Span::raw(workday.started_at().format("%H:%M").to_string()),
        Span::raw("   "),
        Span::styled("Tracked ", title_style()),
        Span::raw(format_hms(workday.total_runtime_ms())),
        Span::raw("   "),
        current,
        Span::raw("   "),
        Span::styled("Refresh ", title_style()),
        Span::raw(app.settings.refresh_rate.label()),
    ]);

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(" Teamlead ", title_style())),
    );
    f.render_widget(paragraph, area);
}
