use crate::domain::TaskColor;
use ratatui::style::{Color, Modifier, Style};

/// Default text style
pub fn default_style() -> Style {
    Style::default().fg(Color::White)
}

/// Terminal color for a task's color tag
pub fn task_color(color: TaskColor) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

/// Border of a task tile, tinted with the task's color
pub fn tile_border_style(color: TaskColor) -> Style {
    Style::default().fg(task_color(color))
}

/// Selected tile highlight style
pub fn selected_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::LightCyan)
        .add_modifier(Modifier::BOLD)
}

/// Running task style
pub fn active_style() -> Style {
    Style::default()
        .fg(Color::Magenta)
        .add_modifier(Modifier::BOLD)
}

/// Special tile (Add New / End Workday) style
pub fn special_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Over-limit warning style
pub fn over_limit_style() -> Style {
    Style::default()
        .fg(Color::Red)
        .add_modifier(Modifier::BOLD)
}

/// Title style for panes
pub fn title_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Border style
pub fn border_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Modal background style
pub fn modal_bg_style() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

/// Modal title style
pub fn modal_title_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Keybinding hint style
pub fn hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Summary gauge style
pub fn gauge_style(color: TaskColor) -> Style {
    Style::default().fg(task_color(color)).bg(Color::DarkGray)
}

/// Error message style
pub fn error_style() -> Style {
    Style::default()
        .fg(Color::Red)
        .add_modifier(Modifier::BOLD)
}

/// Ended workday style
pub fn ended_style() -> Style {
    Style::default().fg(Color::Green)
}
