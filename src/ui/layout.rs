use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main layout structure
pub struct MainLayout {
    pub keybindings_area: Rect,
    pub header_area: Rect,
    pub content_area: Rect,
    pub status_area: Rect,
}

/// Create the main layout
/// - Top bar: keybindings (1 row)
/// - Header: workday totals (3 rows)
/// - Content: task grid, or the log/summary view
/// - Bottom bar: status message (1 row)
pub fn create_layout(area: Rect) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Keybindings bar
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status
        ])
        .split(area);

    MainLayout {
        keybindings_area: chunks[0],
        header_area: chunks[1],
        content_area: chunks[2],
        status_area: chunks[3],
    }
}

/// Split the grid area into rows of equally sized tiles
pub fn create_grid(area: Rect, tile_count: usize, columns: usize, tile_height: u16) -> Vec<Rect> {
    if tile_count == 0 || columns == 0 {
        return Vec::new();
    }

    let rows = (tile_count + columns - 1) / columns;
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            (0..rows)
                .map(|_| Constraint::Length(tile_height))
                .chain(std::iter::once(Constraint::Min(0)))
                .collect::<Vec<_>>(),
        )
        .split(area);

    let column_constraints: Vec<_> = (0..columns)
        .map(|_| Constraint::Ratio(1, columns as u32))
        .collect();

    let mut tiles = Vec::with_capacity(tile_count);
    for row in row_areas.iter().take(rows) {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(column_constraints.clone())
            .split(*row);
        for cell in cells.iter() {
            if tiles.len() < tile_count {
                tiles.push(*cell);
            }
        }
    }
    tiles
}

/// Create centered modal area
pub fn create_modal_area(area: Rect) -> Rect {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Length(16),
            Constraint::Percentage(25),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_layout() {
        let area = Rect::new(0, 0, 100, 50);
        let layout = create_layout(area);

        assert_eq!(layout.keybindings_area.height, 1);
        assert_eq!(layout.header_area.height, 3);
        assert_eq!(layout.status_area.height, 1);
        assert_eq!(layout.content_area.height, 45);
    }

    #[test]
    fn test_create_grid() {
        let area = Rect::new(0, 0, 90, 40);
        let tiles = create_grid(area, 4, 3, 5);

        assert_eq!(tiles.len(), 4);
        assert_eq!(tiles[0].y, 0);
        assert_eq!(tiles[2].y, 0);
        assert_eq!(tiles[3].y, 5);
        assert_eq!(tiles[0].width, 30);
        assert_eq!(tiles[0].height, 5);
    }

    #[test]
    fn test_create_grid_empty() {
        assert!(create_grid(Rect::new(0, 0, 90, 40), 0, 3, 5).is_empty());
    }

    #[test]
    fn test_create_modal_area() {
        let area = Rect::new(0, 0, 100, 50);
        let modal = create_modal_area(area);

        assert!(modal.width < area.width);
        assert!(modal.height < area.height);
        assert_eq!(modal.height, 16);
    }
}
