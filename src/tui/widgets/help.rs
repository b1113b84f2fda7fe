use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::config::Config;
use crate::tui::widgets::color::parse_color;
use crate::utils::format_key_binding_for_display as fmt_key;

pub fn render_help(f: &mut Frame, area: Rect, config: &Config) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);

    // Centered popup (60% width, 70% height)
    let popup_area = popup_area(area, 60, 70);

    // Clear the background first so content does not show through
    f.render_widget(Clear, popup_area);

    let help_text = build_help_text(config);

    let paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Help - Key Bindings")
                .title_alignment(Alignment::Center)
                .style(Style::default().fg(fg_color).bg(bg_color)),
        )
        .style(Style::default().fg(fg_color).bg(bg_color))
        .wrap(ratatui::widgets::Wrap { trim: true });

    f.render_widget(paragraph, popup_area);
}

/// Centered rect taking a percentage of the available area.
/// Based on the ratatui popup example.
fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}

fn build_help_text(config: &Config) -> String {
    let kb = &config.key_bindings;
    let mut text = String::new();

    text.push_str("Navigation:\n");
    text.push_str(&format!(
        "  {} / {}: Move selection up/down\n",
        fmt_key(&kb.list_up),
        fmt_key(&kb.list_down)
    ));
    text.push_str("  PageUp/PageDown: Scroll detail view\n");
    text.push_str(&format!("  {}: Toggle sidebar\n", fmt_key(&kb.toggle_sidebar)));
    text.push('\n');

    text.push_str("Records:\n");
    text.push_str(&format!("  {}: New problem\n", fmt_key(&kb.new)));
    text.push_str(&format!("  {}: Edit selected problem\n", fmt_key(&kb.edit)));
    text.push_str(&format!("  {}: Delete selected problem\n", fmt_key(&kb.delete)));
    text.push_str(&format!(
        "  {}: Fetch details from the problem database\n",
        fmt_key(&kb.enrich)
    ));
    text.push_str(&format!("  {}: Copy solution code\n", fmt_key(&kb.yank_code)));
    text.push_str(&format!("  {}: Copy problem URL\n", fmt_key(&kb.yank_url)));
    text.push('\n');

    text.push_str("Find:\n");
    text.push_str(&format!("  {}: Incremental search\n", fmt_key(&kb.search)));
    text.push_str(&format!("  {}: Difficulty/tag filters\n", fmt_key(&kb.filter)));
    text.push('\n');

    text.push_str("Editor Mode:\n");
    text.push_str(&format!("  {}: Save\n", fmt_key(&kb.save)));
    text.push_str("  Tab / Shift+Tab: Next / previous field\n");
    text.push_str("  Tab (in code field): Insert 4 spaces\n");
    text.push_str("  ↑/↓ (with suggestions open): Choose suggestion, Enter applies\n");
    text.push_str(&format!(
        "  {} / {}: Word navigation\n",
        fmt_key(&kb.word_left),
        fmt_key(&kb.word_right)
    ));
    text.push_str(&format!(
        "  {} / {}: Resize Description/Notes field\n",
        fmt_key(&kb.field_shrink),
        fmt_key(&kb.field_grow)
    ));
    text.push_str("  Esc: Dismiss suggestions, then cancel edit\n");
    text.push('\n');

    text.push_str("General:\n");
    text.push_str(&format!("  {}: Quit\n", fmt_key(&kb.quit)));
    text.push_str(&format!("  {}: Show/hide help\n", fmt_key(&kb.help)));

    text
}
