use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    size as terminal_size,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io;

use crate::tui::app::{App, FilterFormField, FormField, Mode};
use crate::tui::error::TuiError;
use crate::tui::layout::Layout;
use crate::tui::widgets::problem_view::get_content_string;
use crate::utils::{has_primary_modifier, parse_key_binding};

/// Guard that ensures terminal state is restored even on panic.
/// If the terminal is left in raw mode or the alternate screen, the user's
/// shell is unusable afterwards.
struct TerminalGuard {
    raw_mode_enabled: bool,
    alternate_screen_enabled: bool,
}

impl TerminalGuard {
    fn new() -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;

        Ok(Self {
            raw_mode_enabled: true,
            alternate_screen_enabled: true,
        })
    }

    /// Manually restore terminal state (called on normal exit).
    /// After calling this, the guard does nothing on drop.
    fn restore(&mut self) -> Result<(), TuiError> {
        if self.raw_mode_enabled {
            disable_raw_mode()?;
            self.raw_mode_enabled = false;
        }
        if self.alternate_screen_enabled {
            execute!(io::stdout(), LeaveAlternateScreen)?;
            self.alternate_screen_enabled = false;
        }
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Ignore errors in drop - we're already in a cleanup path
        if self.raw_mode_enabled {
            let _ = disable_raw_mode();
        }
        if self.alternate_screen_enabled {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
        }
    }
}

/// True if the key event matches a configured binding string.
fn matches_binding(key: &KeyEvent, binding: &str) -> bool {
    match parse_key_binding(binding) {
        Ok(parsed) => {
            key.code == parsed.key_code
                && parsed.requires_ctrl == has_primary_modifier(key.modifiers)
        }
        Err(_) => false,
    }
}

pub fn run_event_loop(mut app: App) -> Result<(), TuiError> {
    // Check terminal size before entering the alternate screen so the
    // error is readable in the normal terminal.
    let (width, height) = terminal_size().map_err(TuiError::IoError)?;

    let min_width_with_border = Layout::MIN_WIDTH + 2;
    let min_height_with_border = Layout::MIN_HEIGHT + 2;

    if width < min_width_with_border || height < min_height_with_border {
        return Err(TuiError::RenderError(format!(
            "Terminal size too small. Current: {}x{}, Minimum required: {}x{}. Please resize your terminal window.",
            width, height, min_width_with_border, min_height_with_border
        )));
    }

    let mut guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    loop {
        // Auto-clear expired status messages
        app.check_status_message_timeout();

        // Apply any lookup responses that arrived since the last tick
        // (stale ones are dropped by the sequence guard).
        app.drain_lookup();

        // Render
        let terminal_size = terminal.size()?;
        let terminal_rect = ratatui::layout::Rect::new(0, 0, terminal_size.width, terminal_size.height);
        terminal.draw(|f| {
            let layout = Layout::calculate(
                terminal_rect,
                app.config.sidebar_width_percent,
                app.ui.sidebar_state == crate::tui::app::SidebarState::Collapsed,
            );
            crate::tui::render::render(f, &mut app, &layout);
        })?;

        // Handle events - only Press events, to avoid double-processing on Windows
        if event::poll(std::time::Duration::from_millis(16))? {
            match event::read()? {
                Event::Key(key_event) => {
                    if key_event.kind == KeyEventKind::Press
                        && handle_key_event(&mut app, key_event)?
                    {
                        break; // Quit requested
                    }
                }
                Event::Resize(_width, _height) => {
                    // Layout recalculates from terminal.size() on next draw
                }
                _ => {}
            }
        }
    }

    guard.restore()?;

    Ok(())
}

/// Dispatch one key event. Returns true when the application should quit.
fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<bool, TuiError> {
    // The delete confirmation modal swallows everything first
    if app.modals.delete_confirmation.is_some() {
        handle_delete_modal(app, key);
        return Ok(false);
    }

    match app.ui.mode {
        Mode::Help => {
            if key.code == KeyCode::Esc || matches_binding(&key, &app.config.key_bindings.help.clone()) {
                app.ui.mode = Mode::View;
            }
            Ok(false)
        }
        Mode::Filter => {
            handle_filter_modal(app, key);
            Ok(false)
        }
        Mode::Create => {
            handle_form_key(app, key);
            Ok(false)
        }
        Mode::Search => {
            handle_search_key(app, key);
            Ok(false)
        }
        Mode::View => handle_view_key(app, key),
    }
}

fn handle_view_key(app: &mut App, key: KeyEvent) -> Result<bool, TuiError> {
    let kb = app.config.key_bindings.clone();

    if matches_binding(&key, &kb.quit) {
        return Ok(true);
    }

    if matches_binding(&key, &kb.list_up) || key.code == KeyCode::Up {
        app.select_prev();
    } else if matches_binding(&key, &kb.list_down) || key.code == KeyCode::Down {
        app.select_next();
    } else if matches_binding(&key, &kb.new) {
        app.start_create();
    } else if matches_binding(&key, &kb.edit) {
        app.start_edit();
    } else if matches_binding(&key, &kb.delete) {
        app.request_delete();
    } else if matches_binding(&key, &kb.search) {
        app.ui.mode = Mode::Search;
    } else if matches_binding(&key, &kb.filter) {
        app.open_filter_modal();
    } else if matches_binding(&key, &kb.toggle_sidebar) {
        app.ui.sidebar_state = match app.ui.sidebar_state {
            crate::tui::app::SidebarState::Expanded => crate::tui::app::SidebarState::Collapsed,
            crate::tui::app::SidebarState::Collapsed => crate::tui::app::SidebarState::Expanded,
        };
    } else if matches_binding(&key, &kb.enrich) {
        app.enrich_selected();
    } else if matches_binding(&key, &kb.yank_code) {
        app.yank_code();
    } else if matches_binding(&key, &kb.yank_url) {
        app.yank_url();
    } else if matches_binding(&key, &kb.help) {
        app.ui.mode = Mode::Help;
    } else if key.code == KeyCode::PageDown {
        if let Some(problem) = app.selected_problem() {
            let max = get_content_string(&problem).lines().count().saturating_sub(1);
            app.ui.detail_scroll = (app.ui.detail_scroll + 5).min(max);
        }
    } else if key.code == KeyCode::PageUp {
        app.ui.detail_scroll = app.ui.detail_scroll.saturating_sub(5);
    }

    Ok(false)
}

fn handle_search_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.search.query.clear();
            app.ui.mode = Mode::View;
            app.adjust_selected_index();
            app.sync_list_state();
        }
        KeyCode::Enter => {
            // Keep the query as a list filter, back to browsing
            app.ui.mode = Mode::View;
        }
        KeyCode::Backspace => {
            app.search.query.pop();
            app.adjust_selected_index();
            app.sync_list_state();
        }
        KeyCode::Up => app.select_prev(),
        KeyCode::Down => app.select_next(),
        KeyCode::Char(c) if !has_primary_modifier(key.modifiers) => {
            app.search.query.push(c);
            app.ui.selected_index = 0;
            app.sync_list_state();
        }
        _ => {}
    }
}

fn handle_form_key(app: &mut App, key: KeyEvent) {
    let kb = app.config.key_bindings.clone();

    if matches_binding(&key, &kb.save) {
        app.save_form();
        return;
    }

    // Field resizing must win over plain Up/Down handling
    if matches_binding(&key, &kb.field_grow) {
        if let Some(ref mut form) = app.form {
            form.resize_active_field(1);
        }
        return;
    }
    if matches_binding(&key, &kb.field_shrink) {
        if let Some(ref mut form) = app.form {
            form.resize_active_field(-1);
        }
        return;
    }

    let mut refresh = false;
    {
        let Some(form) = app.form.as_mut() else { return };
        let field = form.current_field;

        match key.code {
            KeyCode::Esc => {
                if !form.suggestions.is_empty() {
                    form.clear_suggestions();
                } else {
                    app.cancel_form();
                }
                return;
            }
            KeyCode::Tab => {
                if field == FormField::Code {
                    form.code.insert_str("    ");
                } else {
                    form.current_field = field.next();
                    form.clear_suggestions();
                }
            }
            KeyCode::BackTab => {
                form.current_field = field.prev();
                form.clear_suggestions();
            }
            KeyCode::Enter => {
                if !form.suggestions.is_empty() && field.triggers_autocomplete() {
                    form.apply_suggestion();
                } else if field.is_multi_line() {
                    if let Some(editor) = form.active_editor_mut() {
                        editor.insert_newline();
                    }
                } else {
                    form.current_field = field.next();
                    form.clear_suggestions();
                }
            }
            KeyCode::Up => {
                if !form.suggestions.is_empty() && field.triggers_autocomplete() {
                    form.suggestion_index = form.suggestion_index.saturating_sub(1);
                } else if field.is_multi_line() {
                    if let Some(editor) = form.active_editor_mut() {
                        editor.move_cursor_up();
                    }
                } else {
                    form.current_field = field.prev();
                }
            }
            KeyCode::Down => {
                if !form.suggestions.is_empty() && field.triggers_autocomplete() {
                    form.suggestion_index =
                        (form.suggestion_index + 1).min(form.suggestions.len().saturating_sub(1));
                } else if field.is_multi_line() {
                    if let Some(editor) = form.active_editor_mut() {
                        editor.move_cursor_down();
                    }
                } else {
                    form.current_field = field.next();
                }
            }
            KeyCode::Left => {
                if field == FormField::Difficulty {
                    form.cycle_difficulty(false);
                } else if let Some(editor) = form.active_editor_mut() {
                    if has_primary_modifier(key.modifiers) {
                        editor.move_cursor_word_left();
                    } else {
                        editor.move_cursor_left();
                    }
                }
            }
            KeyCode::Right => {
                if field == FormField::Difficulty {
                    form.cycle_difficulty(true);
                } else if let Some(editor) = form.active_editor_mut() {
                    if has_primary_modifier(key.modifiers) {
                        editor.move_cursor_word_right();
                    } else {
                        editor.move_cursor_right();
                    }
                }
            }
            KeyCode::Home => {
                if let Some(editor) = form.active_editor_mut() {
                    editor.move_cursor_home();
                }
            }
            KeyCode::End => {
                if let Some(editor) = form.active_editor_mut() {
                    editor.move_cursor_end();
                }
            }
            KeyCode::Backspace => {
                if let Some(editor) = form.active_editor_mut() {
                    editor.delete_char();
                }
                refresh = field.triggers_autocomplete();
            }
            KeyCode::Char(' ') if field == FormField::Difficulty => {
                form.cycle_difficulty(true);
            }
            KeyCode::Char(c) if !has_primary_modifier(key.modifiers) => {
                if let Some(editor) = form.active_editor_mut() {
                    editor.insert_char(c);
                }
                refresh = field.triggers_autocomplete();
            }
            _ => {}
        }
    }

    if refresh {
        app.refresh_suggestions();
    }
}

fn handle_filter_modal(app: &mut App, key: KeyEvent) {
    let Some(form) = app.filter.form_state.as_mut() else {
        app.ui.mode = Mode::View;
        return;
    };
    let field = form.current_field;

    match key.code {
        KeyCode::Esc => {
            app.filter.form_state = None;
            app.ui.mode = Mode::View;
        }
        KeyCode::Tab | KeyCode::Down => form.current_field = field.next(),
        KeyCode::BackTab | KeyCode::Up => form.current_field = field.prev(),
        KeyCode::Left if field == FilterFormField::Difficulty => {
            form.difficulty_index = (form.difficulty_index + 3) % 4;
        }
        KeyCode::Right if field == FilterFormField::Difficulty => {
            form.difficulty_index = (form.difficulty_index + 1) % 4;
        }
        KeyCode::Enter => match field {
            FilterFormField::Apply => app.apply_filter_form(),
            FilterFormField::Clear => app.clear_filters(),
            FilterFormField::Cancel => {
                app.filter.form_state = None;
                app.ui.mode = Mode::View;
            }
            _ => form.current_field = field.next(),
        },
        KeyCode::Backspace if field == FilterFormField::Tag => form.tag.delete_char(),
        KeyCode::Char(c) if field == FilterFormField::Tag && !has_primary_modifier(key.modifiers) => {
            form.tag.insert_char(c);
        }
        _ => {}
    }
}

fn handle_delete_modal(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Down => {
            // Two options, any vertical movement toggles
            app.modals.delete_modal_selection = 1 - app.modals.delete_modal_selection;
        }
        KeyCode::Esc => {
            app.modals.delete_confirmation = None;
        }
        KeyCode::Enter => {
            let confirmed = app.modals.delete_modal_selection == 0;
            let id = app.modals.delete_confirmation.take().map(|p| p.id);
            if confirmed {
                if let Some(id) = id {
                    app.delete_problem(&id);
                }
            }
        }
        _ => {}
    }
}
