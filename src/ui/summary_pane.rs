use crate::app::AppState;
use crate::domain::{format_hms, format_percent};
use crate::ui::styles::{border_style, gauge_style, hint_style, over_limit_style, title_style};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Render the workday summary: totals on top, one gauge per chart slice below
pub fn render_summary_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let summary = app.summary();
    let entries = summary.chart_entries();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(" Workday Summary ", title_style()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(0)])
        .split(inner);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Tracked: ", title_style()),
            Span::raw(format_hms(summary.total_runtime_ms)),
            Span::raw("   "),
            Span::styled("Switches: ", title_style()),
            Span::raw(summary.context_switches.to_string()),
            Span::raw("   "),
            Span::styled("Avg iteration: ", title_style()),
            Span::raw(format_hms(summary.average_iteration_ms)),
        ]),
    ];
    if let Some((name, ms)) = &summary.longest_iteration {
        lines.push(Line::from(vec![
            Span::styled("Longest: ", title_style()),
            Span::raw(format!("{} ({})", name, format_hms(*ms))),
        ]));
    }
    let over = summary.tasks_over_limit();
    if over > 0 {
        lines.push(Line::styled(format!("{} task(s) over limit", over), over_limit_style()));
    }
    if let Some(path) = &app.last_report {
        lines.push(Line::styled(format!("Report: {}", path.display()), hint_style()));
    }
    f.render_widget(Paragraph::new(lines), chunks[0]);

    if entries.is_empty() {
        f.render_widget(
            Paragraph::new(Line::styled("No time tracked yet", hint_style())),
            chunks[1],
        );
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            entries
                .iter()
                .map(|_| Constraint::Length(1))
                .chain(std::iter::once(Constraint::Min(0)))
                .collect::<Vec<_>>(),
        )
        .split(chunks[1]);

    for (entry, row) in entries.iter().zip(rows.iter()) {
        let ratio = (entry.percentage / 100.0).clamp(0.0, 1.0);
        let gauge = Gauge::default()
            .gauge_style(gauge_style(entry.color))
            .ratio(ratio)
            .label(format!("{} {}", entry.label, format_percent(entry.percentage)));
        f.render_widget(gauge, *row);
    }
}
