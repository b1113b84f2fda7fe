use ratatui::Frame;
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::{App, Mode, SidebarState};
use crate::tui::layout::Layout;
use crate::tui::widgets::{
    color::parse_color,
    confirm_delete::render_confirm_delete,
    filter_modal::render_filter_modal,
    filters_box::render_filters_box,
    form::render_problem_form,
    help::render_help,
    problem_list::render_problem_list,
    problem_view::render_problem_view,
    status_bar::render_status_bar,
};
use crate::utils::format_key_binding_for_display as fmt_key;

pub fn render(f: &mut Frame, app: &mut App, layout: &Layout) {
    // Outer border with the app title centered in the top border
    let active_theme = app.config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);
    let outer_block = Block::default()
        .borders(Borders::ALL)
        .title("LeetTrack")
        .title_alignment(ratatui::layout::Alignment::Center)
        .style(Style::default().fg(fg_color).bg(bg_color));
    f.render_widget(outer_block, f.area());

    // Everything below needs the visible subset; compute it once
    let visible = app.visible_problems();
    let selected = visible.get(app.ui.selected_index).cloned();
    let total_count = app.problems.len();

    // Sidebar
    if app.ui.sidebar_state == SidebarState::Expanded && layout.sidebar_area.width > 0 {
        render_problem_list(
            f,
            layout.sidebar_area,
            &visible,
            total_count,
            &mut app.ui.list_state,
            &app.config,
        );
    }

    // Main pane
    match app.ui.mode {
        Mode::Create => {
            // Split the borrows: the form needs &mut, the config only &
            let App {
                ref config,
                ref mut form,
                ..
            } = *app;
            if let Some(form) = form.as_mut() {
                render_problem_form(f, layout.main_area, form, config);
            }
        }
        _ => {
            // View / Search / Filter / Help all show the selected record
            // (overlays render on top afterwards)
            if let Some(ref problem) = selected {
                render_problem_view(f, layout.main_area, problem, &app.config, app.ui.detail_scroll);
            } else {
                let empty_text = if total_count == 0 {
                    "No problems yet. Press 'n' to create one."
                } else {
                    "No problems match the current filters."
                };
                let paragraph = Paragraph::new(empty_text)
                    .block(Block::default().borders(Borders::ALL).title("Problem"))
                    .style(Style::default().fg(fg_color));
                f.render_widget(paragraph, layout.main_area);
            }
        }
    }

    // Filters box
    let filter_summary = app.get_filter_summary();
    render_filters_box(f, layout.filters_area, &filter_summary, &app.config);

    // Overlays (after normal content)
    if app.ui.mode == Mode::Help {
        render_help(f, f.area(), &app.config);
    }

    if app.ui.mode == Mode::Filter {
        if let Some(ref form_state) = app.filter.form_state {
            render_filter_modal(f, f.area(), form_state, &app.config);
        }
    }

    if let Some(ref problem) = app.modals.delete_confirmation {
        render_confirm_delete(
            f,
            f.area(),
            problem,
            app.modals.delete_modal_selection,
            &app.config,
        );
    }

    // Status bar
    let key_hints = get_key_hints(app);
    render_status_bar(
        f,
        layout.status_area,
        app.status.message.as_ref(),
        &key_hints,
        &app.config,
    );
}

fn get_key_hints(app: &App) -> Vec<String> {
    let kb = &app.config.key_bindings;
    match app.ui.mode {
        Mode::Help => {
            vec![format!("Esc or {}: Exit help", fmt_key(&kb.help))]
        }
        Mode::Search => {
            vec![
                format!("Search: {}_", app.search.query),
                "Enter: Keep filter".to_string(),
                "Esc: Clear".to_string(),
            ]
        }
        Mode::Create => {
            vec![
                "Tab/Shift+Tab: Fields".to_string(),
                format!("{}: Save", fmt_key(&kb.save)),
                "↑/↓: Pick suggestion".to_string(),
                "Esc: Cancel".to_string(),
            ]
        }
        Mode::Filter => {
            vec![
                "Tab: Next field".to_string(),
                "Enter: Confirm".to_string(),
                "Esc: Close".to_string(),
            ]
        }
        Mode::View => {
            vec![
                format!("{}: Quit", fmt_key(&kb.quit)),
                format!("{}: New", fmt_key(&kb.new)),
                format!("{}: Edit", fmt_key(&kb.edit)),
                format!("{}: Delete", fmt_key(&kb.delete)),
                format!("{}: Search", fmt_key(&kb.search)),
                format!("{}: Filters", fmt_key(&kb.filter)),
                format!("{}: Fetch details", fmt_key(&kb.enrich)),
                format!("{}: Copy code", fmt_key(&kb.yank_code)),
                format!("{}: Sidebar", fmt_key(&kb.toggle_sidebar)),
                format!("{}: Help", fmt_key(&kb.help)),
            ]
        }
    }
}
