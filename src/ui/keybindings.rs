use crate::domain::UiMode;
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, mode: UiMode, area: Rect) {
    let hints = match mode {
        UiMode::Normal => Line::from(vec![
            Span::raw(" ←/→/↑/↓ select   "),
            Span::raw("Enter switch   "),
            Span::raw("a add   "),
            Span::raw("e rename   "),
            Span::raw("d delete   "),
            Span::raw("r reset   "),
            Span::raw("l log   "),
            Span::raw("s summary   "),
            Span::raw("f refresh   "),
            Span::raw("? about   "),
            Span::raw("q quit"),
        ]),
        UiMode::AddingTask | UiMode::RenamingTask => Line::from(vec![
            Span::raw(" Tab next field   "),
            Span::raw("Enter submit   "),
            Span::raw("Esc cancel"),
        ]),
        UiMode::ConfirmDelete | UiMode::ConfirmReset => Line::from(vec![
            Span::raw(" y confirm   "),
            Span::raw("n cancel"),
        ]),
        UiMode::TaskLog => Line::from(vec![
            Span::raw(" ↑/↓ scroll   "),
            Span::raw("Esc back"),
        ]),
        UiMode::Summary => Line::from(vec![
            Span::raw(" r reset   "),
            Span::raw("Esc back"),
        ]),
        UiMode::About => Line::from(Span::raw(" Esc back")),
    };

    let paragraph = Paragraph::new(hints).style(hint_style());
    f.render_widget(paragraph, area);
}
