use crate::app::{AppState, GRID_COLUMNS};
use crate::domain::{format_percent, task_tiles, tile_badge, TaskKind, TaskTile};
use crate::ui::layout::create_grid;
use crate::ui::styles::{
    active_style, border_style, default_style, over_limit_style, selected_style, special_style,
    tile_border_style, title_style,
};
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Height of one tile in rows
const TILE_HEIGHT: u16 = 5;

fn tile_lines(tile: &TaskTile) -> Vec<Line<'static>> {
    let badge = tile_badge(tile);

    match tile.kind {
        TaskKind::User => {
            let name_style = if tile.limit_exceeded {
                over_limit_style()
            } else if tile.active {
                active_style()
            } else {
                default_style()
            };
            vec![
                Line::from(vec![
                    Span::styled(format!("{} ", badge), name_style),
                    Span::styled(tile.name.clone(), name_style),
                ]),
                Line::from(Span::styled(tile.runtime.clone(), name_style)),
                Line::from(Span::raw(format_percent(tile.percentage))),
            ]
        }
        TaskKind::AddNew | TaskKind::EndWorkday => vec![
            Line::raw(""),
            Line::from(vec![
                Span::styled(format!("{} ", badge), special_style()),
                Span::styled(tile.name.clone(), special_style()),
            ]),
        ],
    }
}

fn tile_block(tile: &TaskTile, selected: bool) -> Block<'static> {
    let border = if tile.kind == TaskKind::User {
        tile_border_style(tile.color)
    } else {
        border_style()
    };

    let block = Block::default().borders(Borders::ALL).border_style(border);
    if selected {
        block.style(selected_style())
    } else {
        block.style(Style::default())
    }
}

/// Render the grid of task tiles, special tiles last
pub fn render_task_grid(f: &mut Frame, app: &AppState, area: Rect) {
    let tiles = task_tiles(&app.workday);

    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(
            format!(" Tasks ({}) ", app.workday.user_task_count()),
            title_style(),
        ));
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let cells = create_grid(inner, tiles.len(), GRID_COLUMNS, TILE_HEIGHT);
    for (tile, cell) in tiles.iter().zip(cells) {
        let paragraph = Paragraph::new(tile_lines(tile))
            .alignment(Alignment::Center)
            .block(tile_block(tile, tile.index == app.selected_index));
        f.render_widget(paragraph, cell);
    }
}
