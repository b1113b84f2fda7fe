use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout as RatLayout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarState};
use ratskin::RatSkin;
use std::cmp;
use termimad::minimad::Text as MinimadText;

use crate::config::Config;
use crate::models::Problem;
use crate::tui::widgets::color::parse_color;

/// Build the detail pane content as markdown for the skin renderer.
pub fn get_content_string(problem: &Problem) -> String {
    let mut content = String::new();

    match problem.number {
        Some(ref number) => {
            content.push_str(&format!("**Title:** {}. {}\n", number, problem.title))
        }
        None => content.push_str(&format!("**Title:** {}\n", problem.title)),
    }
    content.push_str(&format!("**Difficulty:** {}\n", problem.difficulty));

    if !problem.url.is_empty() {
        content.push_str(&format!("**URL:** {}\n", problem.url));
    }

    if !problem.tags.is_empty() {
        content.push_str(&format!("**Tags:** {}\n", problem.tags.join(", ")));
    }

    if let Some(ref meta) = problem.remote {
        content.push_str(&format!(
            "**Remote:** {} likes / {} dislikes",
            meta.likes, meta.dislikes
        ));
        if !meta.hints.is_empty() {
            content.push_str(&format!(", {} hints", meta.hints.len()));
        }
        if !meta.similar_questions.is_empty() {
            content.push_str(&format!(", {} similar", meta.similar_questions.len()));
        }
        content.push('\n');
    }

    if !problem.description.is_empty() {
        content.push_str("\n**Description:**\n\n");
        content.push_str(&problem.description);
        content.push('\n');
    }

    if let Some(ref notes) = problem.notes {
        content.push_str("\n**Notes:**\n\n");
        content.push_str(notes);
        content.push('\n');
    }

    if !problem.code.is_empty() {
        content.push_str("\n**Solution Code:**\n\n```\n");
        content.push_str(&problem.code);
        if !problem.code.ends_with('\n') {
            content.push('\n');
        }
        content.push_str("```\n");
    }

    content.push_str(&format!(
        "\nAdded {}  ·  Edited {}\n",
        problem.date_added.format("%Y-%m-%d %H:%M"),
        problem.date_edited.format("%Y-%m-%d %H:%M"),
    ));

    content
}

pub fn render_problem_view(
    f: &mut Frame,
    area: Rect,
    problem: &Problem,
    config: &Config,
    scroll_offset: usize,
) {
    if area.width < 2 || area.height < 2 {
        return;
    }

    // Split area into content and scrollbar first (width is needed for parsing)
    let horizontal = RatLayout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1), // Scrollbar
        ])
        .split(area);

    let content_area = horizontal[0];
    let scrollbar_area = horizontal[1];

    let viewport_height = (area.height - 2) as usize; // Account for borders

    let content_string = get_content_string(problem);
    let text_width = (content_area.width.saturating_sub(2)) as usize;

    // Parse markdown with ratskin (requires width for wrapping)
    let content_text_input = MinimadText::from(content_string.as_str());
    let text_width_u16: u16 = text_width.try_into().unwrap_or(u16::MAX);
    let content_lines = RatSkin::default().parse(content_text_input, text_width_u16);

    // Convert ratskin lines to ratatui lines, preserving span styling
    let ratatui_lines: Vec<Line> = content_lines
        .into_iter()
        .map(|line| {
            let spans: Vec<Span> = line
                .spans
                .into_iter()
                .map(|span| Span::styled(span.content.to_string(), span.style))
                .collect();
            Line::from(spans)
        })
        .collect();
    let content_text = Text::from(ratatui_lines);

    let total_lines = content_text.lines.len();
    let max_scroll = total_lines.saturating_sub(viewport_height);
    let scroll_offset = cmp::min(scroll_offset, max_scroll);

    // Slice Text to show only the visible lines
    let start_line = scroll_offset;
    let end_line = cmp::min(start_line + viewport_height, total_lines);
    let visible_text = if start_line < total_lines {
        Text::from(content_text.lines[start_line..end_line].to_vec())
    } else {
        Text::default()
    };

    let base_style = Style::default().fg(parse_color(&config.get_active_theme().fg));
    let paragraph = Paragraph::new(visible_text)
        .block(Block::default().borders(Borders::ALL).title("Problem"))
        .style(base_style)
        .wrap(ratatui::widgets::Wrap { trim: false });

    f.render_widget(paragraph, content_area);

    // Scrollbar when content exceeds the viewport
    if total_lines > viewport_height {
        let scrollbar_inner_area = Rect::new(
            scrollbar_area.x,
            content_area.y + 1, // Start after top border
            scrollbar_area.width,
            content_area.height.saturating_sub(2),
        );

        let mut scrollbar_state = ScrollbarState::new(total_lines)
            .viewport_content_length(viewport_height)
            .position(scroll_offset);

        let scrollbar = Scrollbar::default()
            .orientation(ratatui::widgets::ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"))
            .track_symbol(Some("│"))
            .thumb_symbol("█");

        f.render_stateful_widget(scrollbar, scrollbar_inner_area, &mut scrollbar_state);
    }
}
