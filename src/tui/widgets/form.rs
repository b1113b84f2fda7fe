use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph};

use crate::config::{Config, Theme};
use crate::tui::app::{FormField, ProblemForm};
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};
use crate::tui::widgets::editor::Editor;
use crate::tui::widgets::problem_list::difficulty_color;

const NUMBER_WIDTH: u16 = 12;
const DIFFICULTY_WIDTH: u16 = 16;

/// Render the create/edit form. Mutable access is needed to keep each
/// editor's scroll in step with its viewport before drawing.
pub fn render_problem_form(f: &mut Frame, area: Rect, form: &mut ProblemForm, config: &Config) {
    let active_theme = config.get_active_theme();
    let fg = parse_color(&active_theme.fg);

    let title = if form.editing_id.is_some() {
        "Edit Problem"
    } else {
        "New Problem"
    };
    let outer = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .style(Style::default().fg(fg));
    f.render_widget(outer, area);

    let inner = area.inner(Margin {
        horizontal: 1,
        vertical: 1,
    });
    if inner.height < 9 {
        return;
    }

    // Keep the resizable fields from starving the code editor.
    let fixed = 9 + form.description_height + form.notes_height;
    let (desc_height, notes_height) = if fixed + 3 > inner.height {
        (3, 3)
    } else {
        (form.description_height, form.notes_height)
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // number | title | difficulty
            Constraint::Length(3), // url
            Constraint::Length(3), // tags
            Constraint::Length(desc_height),
            Constraint::Length(notes_height),
            Constraint::Min(3), // code
        ])
        .split(inner);

    let header = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(NUMBER_WIDTH),
            Constraint::Min(10),
            Constraint::Length(DIFFICULTY_WIDTH),
        ])
        .split(rows[0]);

    let active = form.current_field;

    render_single_line(f, header[0], "Number", &mut form.number, active == FormField::Number, &active_theme);
    render_single_line(f, header[1], "Title", &mut form.title, active == FormField::Title, &active_theme);
    render_difficulty(f, header[2], form, active == FormField::Difficulty, &active_theme);
    render_single_line(f, rows[1], "URL", &mut form.url, active == FormField::Url, &active_theme);
    render_single_line(f, rows[2], "Tags (comma-separated)", &mut form.tags, active == FormField::Tags, &active_theme);
    render_multi_line(f, rows[3], "Description", &mut form.description, active == FormField::Description, &active_theme);
    render_multi_line(f, rows[4], "Notes", &mut form.notes, active == FormField::Notes, &active_theme);
    render_multi_line(f, rows[5], "Solution Code (Tab indents)", &mut form.code, active == FormField::Code, &active_theme);

    // Autocomplete dropdown last so it overlays the fields below.
    if !form.suggestions.is_empty() && active.triggers_autocomplete() {
        let anchor_x = match active {
            FormField::Number => header[0].x,
            _ => header[1].x,
        };
        render_suggestions(f, inner, anchor_x, rows[0].y + 3, form, &active_theme);
    }
}

fn field_block(label: &str, active: bool, theme: &Theme) -> Block<'static> {
    let border_style = if active {
        Style::default().fg(parse_color(&theme.highlight_bg))
    } else {
        Style::default().fg(parse_color(&theme.muted))
    };
    let title_style = if active {
        Style::default()
            .fg(parse_color(&theme.highlight_bg))
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(parse_color(&theme.muted))
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(label.to_string(), title_style))
}

fn render_single_line(
    f: &mut Frame,
    area: Rect,
    label: &str,
    editor: &mut Editor,
    active: bool,
    theme: &Theme,
) {
    editor.update_horizontal_scroll(area.width as usize);
    let (_, visible) = editor.get_visible_lines(1, area.width as usize);
    let text = visible.into_iter().next().unwrap_or_default();

    let style = Style::default().fg(parse_color(&theme.fg));
    let paragraph = Paragraph::new(text).block(field_block(label, active, theme)).style(style);
    f.render_widget(paragraph, area);

    if active {
        if let Some((x, y)) = editor.get_cursor_screen_pos(area) {
            f.set_cursor_position((x, y));
        }
    }
}

fn render_multi_line(
    f: &mut Frame,
    area: Rect,
    label: &str,
    editor: &mut Editor,
    active: bool,
    theme: &Theme,
) {
    let viewport_height = area.height.saturating_sub(2) as usize;
    editor.update_scroll(viewport_height);
    editor.update_horizontal_scroll(area.width as usize);

    let (_, visible) = editor.get_visible_lines(viewport_height, area.width as usize);
    let style = Style::default().fg(parse_color(&theme.fg));
    let lines: Vec<Line> = visible
        .into_iter()
        .map(|l| Line::from(Span::styled(l, style)))
        .collect();

    let paragraph = Paragraph::new(lines).block(field_block(label, active, theme)).style(style);
    f.render_widget(paragraph, area);

    if active {
        if let Some((x, y)) = editor.get_cursor_screen_pos(area) {
            f.set_cursor_position((x, y));
        }
    }
}

fn render_difficulty(f: &mut Frame, area: Rect, form: &ProblemForm, active: bool, theme: &Theme) {
    let difficulty = form.difficulty();
    let line = Line::from(vec![
        Span::raw("< "),
        Span::styled(
            difficulty.as_str(),
            Style::default().fg(difficulty_color(difficulty)).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" >"),
    ]);
    let paragraph = Paragraph::new(line)
        .block(field_block("Difficulty", active, theme))
        .style(Style::default().fg(parse_color(&theme.fg)));
    f.render_widget(paragraph, area);
}

fn render_suggestions(
    f: &mut Frame,
    inner: Rect,
    anchor_x: u16,
    anchor_y: u16,
    form: &ProblemForm,
    theme: &Theme,
) {
    let width = 50.min(inner.width.saturating_sub(anchor_x.saturating_sub(inner.x)));
    let height = (form.suggestions.len() as u16 + 2).min(10);
    if width < 10 || anchor_y + 1 >= inner.y + inner.height {
        return;
    }
    let height = height.min(inner.y + inner.height - anchor_y);

    let popup = Rect::new(anchor_x, anchor_y, width, height);
    f.render_widget(Clear, popup);

    let highlight_bg = parse_color(&theme.highlight_bg);
    let highlight_fg = get_contrast_text_color(highlight_bg);

    let items: Vec<ListItem> = form
        .suggestions
        .iter()
        .map(|s| {
            let mut label = format!("{}. {}", s.number, s.title);
            let budget = width.saturating_sub(8) as usize;
            if label.chars().count() > budget {
                label = label.chars().take(budget.saturating_sub(3)).collect::<String>() + "...";
            }
            let mut spans = vec![Span::raw(label)];
            if let Ok(d) = s.difficulty.parse::<crate::models::Difficulty>() {
                spans.push(Span::styled(
                    format!("  {}", match d {
                        crate::models::Difficulty::Easy => "[E]",
                        crate::models::Difficulty::Medium => "[M]",
                        crate::models::Difficulty::Hard => "[H]",
                    }),
                    Style::default().fg(difficulty_color(d)),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let mut list_state = ratatui::widgets::ListState::default();
    list_state.select(Some(form.suggestion_index));

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Catalog")
                .border_style(Style::default().fg(parse_color(&theme.highlight_bg))),
        )
        .style(Style::default().fg(parse_color(&theme.fg)).bg(parse_color(&theme.bg)))
        .highlight_style(Style::default().fg(highlight_fg).bg(highlight_bg));

    ratatui::widgets::StatefulWidget::render(list, popup, f.buffer_mut(), &mut list_state);
}
