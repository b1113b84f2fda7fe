use ratatui::layout::{Constraint, Direction, Layout as RatLayout, Rect};

pub struct Layout {
    pub inner_area: Rect, // Area inside the outer border
    pub sidebar_area: Rect,
    pub main_area: Rect,
    pub filters_area: Rect,
    pub status_area: Rect,
}

impl Layout {
    /// Minimum terminal dimensions required for the application
    /// Width: 38 columns (36 inner + 2 borders) allows sidebar (25) + main (11) when expanded,
    /// or just main (36) when sidebar is collapsed
    /// Height: 9 lines (2 outer borders + 1 content + 3 filters + 1 status + 2 buffer)
    pub const MIN_WIDTH: u16 = 38;
    pub const MIN_HEIGHT: u16 = 9;

    pub fn calculate(size: Rect, sidebar_width_percent: u16, sidebar_collapsed: bool) -> Self {
        // Ensure minimum terminal size (accounting for outer border)
        let min_width_with_border = Self::MIN_WIDTH + 2;
        let min_height_with_border = Self::MIN_HEIGHT + 2;
        let width = size.width.max(min_width_with_border);
        let height = size.height.max(min_height_with_border);
        let size = Rect::new(size.x, size.y, width, height);

        // Inner area accounts for the outer border: 1 char on each side
        let inner_area = Rect::new(
            size.x + 1,
            size.y + 1,
            size.width.saturating_sub(2),
            size.height.saturating_sub(2),
        );

        // Sidebar width with constraints (min ~25 chars, max ~40%); the
        // main area keeps at least 10 characters
        let sidebar_width = if sidebar_collapsed {
            0
        } else {
            let requested_width = (inner_area.width * sidebar_width_percent) / 100;
            let min_width = 25;
            let max_width = (inner_area.width * 40) / 100;

            requested_width
                .max(min_width)
                .min(max_width)
                .min(inner_area.width.saturating_sub(10))
        };

        // Split vertically: content, filters (3 lines for borders + content), status (1 line)
        let vertical = RatLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),    // Content (sidebar + main)
                Constraint::Length(3), // Filters (needs borders + content)
                Constraint::Length(1), // Status
            ])
            .split(inner_area);

        // Split content area horizontally: sidebar, main
        let horizontal = RatLayout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(sidebar_width), Constraint::Min(1)])
            .split(vertical[0]);

        Self {
            inner_area,
            sidebar_area: horizontal[0],
            main_area: horizontal[1],
            filters_area: vertical[1],
            status_area: vertical[2],
        }
    }
}
