use crate::app::{
    AppState, FormTarget, InputFormState, FIELD_COLOR, FIELD_HOURS, FIELD_MINUTES, FIELD_NAME,
    FIELD_SECONDS,
};
use crate::domain::TASK_NAME_CHARS_MAX;
use crate::ui::{
    layout::create_modal_area,
    styles::{error_style, modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

fn field_line<'a>(form: &InputFormState, field: usize, label: &'a str, value: &'a str) -> Line<'a> {
    let editing = form.editing_field == field;
    Line::from(vec![
        Span::raw(if editing { "> " } else { "  " }),
        Span::raw(label),
        Span::styled(value, modal_title_style()),
        if editing {
            Span::styled("█", modal_title_style()) // Cursor
        } else {
            Span::raw("")
        },
    ])
}

/// Render the add-task or rename form
pub fn render_input_form(f: &mut Frame, app: &AppState, area: Rect) {
    if let Some(form) = &app.input_form {
        let modal_area = create_modal_area(area);

        // Clear the area behind the form
        f.render_widget(Clear, modal_area);

        let mut lines = vec![Line::raw("")];
        let title = match form.target {
            FormTarget::NewTask => {
                lines.push(field_line(form, FIELD_NAME, "Name:    ", &form.name));
                lines.push(Line::raw(""));
                lines.push(Line::raw("  Time limit (leave empty for none)"));
                lines.push(field_line(form, FIELD_HOURS, "Hours:   ", &form.hours));
                lines.push(field_line(form, FIELD_MINUTES, "Minutes: ", &form.minutes));
                lines.push(field_line(form, FIELD_SECONDS, "Seconds: ", &form.seconds));
                lines.push(Line::raw(""));
                lines.push(field_line(form, FIELD_COLOR, "Color:   ", &form.color));
                " Add Task "
            }
            FormTarget::Rename(_) => {
                lines.push(field_line(form, FIELD_NAME, "Name: ", &form.name));
                " Rename Task "
            }
        };

        lines.push(Line::raw(""));
        lines.push(Line::raw(format!(
            "  Up to {} characters  ·  Enter to submit  ·  Esc to cancel",
            TASK_NAME_CHARS_MAX
        )));

        if let Some(error) = &form.error {
            lines.push(Line::raw(""));
            lines.push(Line::styled(format!("  {}", error), error_style()));
        }

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(title, modal_title_style()))
                    .style(modal_bg_style()),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, modal_area);
    }
}
