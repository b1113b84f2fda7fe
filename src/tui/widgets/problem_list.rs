use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, List, ListItem, ListState, Scrollbar, ScrollbarOrientation, ScrollbarState,
    StatefulWidget,
};

use crate::config::Config;
use crate::models::{Difficulty, Problem};
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};

/// Marker color per difficulty.
pub fn difficulty_color(difficulty: Difficulty) -> Color {
    match difficulty {
        Difficulty::Easy => Color::Green,
        Difficulty::Medium => Color::Yellow,
        Difficulty::Hard => Color::Red,
    }
}

fn difficulty_marker(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => "[E]",
        Difficulty::Medium => "[M]",
        Difficulty::Hard => "[H]",
    }
}

pub fn render_problem_list(
    f: &mut Frame,
    area: Rect,
    problems: &[Problem],
    total_count: usize,
    list_state: &mut ListState,
    config: &Config,
) {
    // Max width for truncation (borders + padding + marker)
    let max_width = area.width.saturating_sub(4) as usize;

    let active_theme = config.get_active_theme();
    let highlight_bg = parse_color(&active_theme.highlight_bg);
    let highlight_fg = if active_theme.highlight_fg.is_empty() {
        get_contrast_text_color(highlight_bg)
    } else {
        parse_color(&active_theme.highlight_fg)
    };
    let muted = parse_color(&active_theme.muted);

    let items: Vec<ListItem> = problems
        .iter()
        .map(|problem| {
            let mut title = match problem.number {
                Some(ref number) => format!("{}. {}", number, problem.title),
                None => problem.title.clone(),
            };

            // Marker takes 4 characters of the row
            let title_budget = max_width.saturating_sub(4);
            if title.chars().count() > title_budget {
                title = title.chars().take(title_budget.saturating_sub(3)).collect::<String>() + "...";
            }

            let mut spans = vec![
                Span::styled(
                    difficulty_marker(problem.difficulty),
                    Style::default().fg(difficulty_color(problem.difficulty)),
                ),
                Span::raw(" "),
                Span::raw(title.clone()),
            ];

            // Append up to two tags when the row has room, "+N" for the rest
            let used = title.chars().count() + 4;
            if !problem.tags.is_empty() && used + 6 < max_width {
                let mut tag_text = problem.tags.iter().take(2).cloned().collect::<Vec<_>>().join(", ");
                if problem.tags.len() > 2 {
                    tag_text.push_str(&format!(" +{}", problem.tags.len() - 2));
                }
                let budget = max_width - used - 2;
                if tag_text.chars().count() > budget {
                    tag_text = tag_text.chars().take(budget).collect();
                }
                spans.push(Span::styled(format!("  {}", tag_text), Style::default().fg(muted)));
            }

            ListItem::new(Line::from(spans))
        })
        .collect();

    // Split area to reserve space for scrollbar
    let list_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1), // Scrollbar
        ])
        .split(area);

    let list_area = list_areas[0];
    let scrollbar_area = list_areas[1];

    let title = format!("Problems ({} of {})", problems.len(), total_count);
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .style(Style::default().fg(parse_color(&active_theme.fg)))
        .highlight_style(Style::default().fg(highlight_fg).bg(highlight_bg));

    StatefulWidget::render(list, list_area, f.buffer_mut(), list_state);

    // Render scrollbar if needed
    let total_items = problems.len();
    let visible_items = list_area.height.saturating_sub(2) as usize;

    if total_items > visible_items && scrollbar_area.width > 0 && list_area.height > 2 {
        let scrollbar_inner_area = Rect::new(
            scrollbar_area.x,
            list_area.y + 1, // Start after top border
            scrollbar_area.width,
            list_area.height.saturating_sub(2), // Match inner list height
        );

        if scrollbar_inner_area.width > 0 && scrollbar_inner_area.height > 0 {
            let selected_index = list_state.selected().unwrap_or(0);
            let scroll_position = if selected_index < visible_items {
                0
            } else {
                selected_index.saturating_sub(visible_items - 1)
            };

            let mut scrollbar_state = ScrollbarState::new(total_items)
                .viewport_content_length(visible_items)
                .position(scroll_position);

            let scrollbar = Scrollbar::default()
                .orientation(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("↑"))
                .end_symbol(Some("↓"))
                .track_symbol(Some("│"))
                .thumb_symbol("█");

            f.render_stateful_widget(scrollbar, scrollbar_inner_area, &mut scrollbar_state);
        }
    }
}
