use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::config::Config;
use crate::models::Difficulty;
use crate::tui::app::{FilterFormField, FilterFormState};
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};

/// Label for a difficulty index in the filter form (0 = All).
pub fn difficulty_filter_label(index: usize) -> &'static str {
    match index {
        0 => "All",
        i => Difficulty::ALL.get(i - 1).map(|d| d.as_str()).unwrap_or("All"),
    }
}

pub fn render_filter_modal(f: &mut Frame, area: Rect, form: &FilterFormState, config: &Config) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);
    let highlight_bg = parse_color(&active_theme.highlight_bg);
    let highlight_fg = get_contrast_text_color(highlight_bg);

    let popup_area = popup_area(area, 45, 40);
    f.render_widget(Clear, popup_area);

    let base = Style::default().fg(fg_color).bg(bg_color);
    let selected = Style::default().fg(highlight_fg).bg(highlight_bg);
    let style_for = |field: FilterFormField| {
        if form.current_field == field {
            selected
        } else {
            base
        }
    };

    let mut lines = Vec::new();
    lines.push(Line::from(Span::styled(
        "Filter the problem list",
        base.add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled("", Style::default())));

    lines.push(Line::from(vec![
        Span::styled("Difficulty: ", base),
        Span::styled(
            format!("< {} >", difficulty_filter_label(form.difficulty_index)),
            style_for(FilterFormField::Difficulty),
        ),
    ]));
    lines.push(Line::from(Span::styled("", Style::default())));

    let tag_text = form.tag.first_line();
    let tag_display = if tag_text.is_empty() && form.current_field != FilterFormField::Tag {
        "(any)".to_string()
    } else {
        format!("{}_", tag_text)
    };
    lines.push(Line::from(vec![
        Span::styled("Tag contains: ", base),
        Span::styled(tag_display, style_for(FilterFormField::Tag)),
    ]));
    lines.push(Line::from(Span::styled("", Style::default())));

    lines.push(Line::from(vec![
        Span::styled(" Apply ", style_for(FilterFormField::Apply)),
        Span::styled("  ", base),
        Span::styled(" Clear ", style_for(FilterFormField::Clear)),
        Span::styled("  ", base),
        Span::styled(" Cancel ", style_for(FilterFormField::Cancel)),
    ]));
    lines.push(Line::from(Span::styled("", Style::default())));
    lines.push(Line::from(Span::styled(
        "Tab: next field · ←/→: change difficulty · Enter: confirm · Esc: close",
        Style::default().fg(parse_color(&active_theme.muted)).bg(bg_color),
    )));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Filters")
                .title_alignment(Alignment::Center)
                .style(base),
        )
        .style(base)
        .wrap(ratatui::widgets::Wrap { trim: true });

    f.render_widget(paragraph, popup_area);
}

/// Centered rect taking a percentage of the available area.
fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}
