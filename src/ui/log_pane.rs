use crate::app::AppState;
use crate::domain::{log_rows, LogRow};
use crate::ui::styles::{border_style, default_style, hint_style, title_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

fn create_log_line(row: &LogRow) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("[{:02}] ", row.sequence), hint_style()),
        Span::styled(row.started.clone(), hint_style()),
        Span::raw("  "),
        Span::styled(format!("{:<8}", row.task_name), default_style()),
        Span::raw("  "),
        Span::styled(row.duration.clone(), title_style()),
    ])
}

/// Render the task log, newest iteration first
pub fn render_log_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let rows = log_rows(&app.workday);
    let count = rows.len();

    let items: Vec<ListItem> = if rows.is_empty() {
        vec![ListItem::new(Line::styled("  No concluded iterations yet", hint_style()))]
    } else {
        rows.iter()
            .skip(app.log_scroll_offset)
            .map(|row| ListItem::new(create_log_line(row)))
            .collect()
    };

    let title = if app.log_scroll_offset > 0 {
        format!(" Task Log ({}) [scrolled +{}] ", count, app.log_scroll_offset)
    } else {
        format!(" Task Log ({}) ", count)
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(title, title_style())),
    );

    f.render_widget(list, area);
}
