use chrono::{DateTime, Utc};
use ratatui::widgets::ListState;
use std::sync::Arc;
use std::time::Instant;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::lookup::{LookupEvent, LookupHandle, Suggestion};
use crate::models::{Difficulty, Problem, RemoteMeta, remove_problem, sample_problems, upsert_problem};
use crate::remote::{RemoteClient, strip_html};
use crate::store::ProblemStore;
use crate::tui::widgets::editor::Editor;

const STATUS_MESSAGE_SECS: u64 = 4;

/// Default block heights (rows, borders included) for the resizable
/// multi-line form fields.
pub const DEFAULT_DESCRIPTION_HEIGHT: u16 = 8;
pub const DEFAULT_NOTES_HEIGHT: u16 = 6;
pub const MIN_FIELD_HEIGHT: u16 = 3;
pub const MAX_FIELD_HEIGHT: u16 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    View,
    Search,
    Create,
    Filter,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarState {
    Expanded,
    Collapsed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Number,
    Title,
    Difficulty,
    Url,
    Tags,
    Description,
    Notes,
    Code,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Number => FormField::Title,
            FormField::Title => FormField::Difficulty,
            FormField::Difficulty => FormField::Url,
            FormField::Url => FormField::Tags,
            FormField::Tags => FormField::Description,
            FormField::Description => FormField::Notes,
            FormField::Notes => FormField::Code,
            FormField::Code => FormField::Number,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::Number => FormField::Code,
            FormField::Title => FormField::Number,
            FormField::Difficulty => FormField::Title,
            FormField::Url => FormField::Difficulty,
            FormField::Tags => FormField::Url,
            FormField::Description => FormField::Tags,
            FormField::Notes => FormField::Description,
            FormField::Code => FormField::Notes,
        }
    }

    pub fn is_multi_line(self) -> bool {
        matches!(self, FormField::Description | FormField::Notes | FormField::Code)
    }

    /// Fields whose edits drive catalog autocomplete.
    pub fn triggers_autocomplete(self) -> bool {
        matches!(self, FormField::Number | FormField::Title)
    }
}

/// State of the create/edit form.
#[derive(Debug, Clone)]
pub struct ProblemForm {
    pub current_field: FormField,
    pub number: Editor,
    pub title: Editor,
    pub difficulty_index: usize, // index into Difficulty::ALL
    pub url: Editor,
    pub tags: Editor,
    pub description: Editor,
    pub notes: Editor,
    pub code: Editor,
    pub description_height: u16,
    pub notes_height: u16,
    pub editing_id: Option<String>, // None for new records
    pub date_added: Option<DateTime<Utc>>,
    pub remote: Option<RemoteMeta>,
    pub suggestions: Vec<Suggestion>,
    pub suggestion_index: usize,
}

impl ProblemForm {
    pub fn new() -> Self {
        Self {
            current_field: FormField::Number,
            number: Editor::new(),
            title: Editor::new(),
            difficulty_index: 0,
            url: Editor::new(),
            tags: Editor::new(),
            description: Editor::new(),
            notes: Editor::new(),
            code: Editor::new(),
            description_height: DEFAULT_DESCRIPTION_HEIGHT,
            notes_height: DEFAULT_NOTES_HEIGHT,
            editing_id: None,
            date_added: None,
            remote: None,
            suggestions: Vec::new(),
            suggestion_index: 0,
        }
    }

    pub fn from_problem(problem: &Problem) -> Self {
        let difficulty_index = Difficulty::ALL
            .iter()
            .position(|d| *d == problem.difficulty)
            .unwrap_or(0);
        Self {
            current_field: FormField::Number,
            number: Editor::from_string(problem.number.as_deref().unwrap_or("")),
            title: Editor::from_string(&problem.title),
            difficulty_index,
            url: Editor::from_string(&problem.url),
            tags: Editor::from_string(&problem.tags.join(", ")),
            description: Editor::from_string(&problem.description),
            notes: Editor::from_string(problem.notes.as_deref().unwrap_or("")),
            code: Editor::from_string(&problem.code),
            description_height: problem.description_height.unwrap_or(DEFAULT_DESCRIPTION_HEIGHT),
            notes_height: problem.notes_height.unwrap_or(DEFAULT_NOTES_HEIGHT),
            editing_id: Some(problem.id.clone()),
            date_added: Some(problem.date_added),
            remote: problem.remote.clone(),
            suggestions: Vec::new(),
            suggestion_index: 0,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        Difficulty::ALL[self.difficulty_index % Difficulty::ALL.len()]
    }

    pub fn cycle_difficulty(&mut self, forward: bool) {
        let len = Difficulty::ALL.len();
        self.difficulty_index = if forward {
            (self.difficulty_index + 1) % len
        } else {
            (self.difficulty_index + len - 1) % len
        };
    }

    pub fn clear_suggestions(&mut self) {
        self.suggestions.clear();
        self.suggestion_index = 0;
    }

    /// The text of the field the autocomplete should run against, if the
    /// active field has one.
    pub fn autocomplete_query(&self) -> Option<&str> {
        match self.current_field {
            FormField::Number => Some(self.number.first_line()),
            FormField::Title => Some(self.title.first_line()),
            _ => None,
        }
    }

    /// Apply the selected suggestion: fills number, title, difficulty,
    /// tags and the canonical URL in one go.
    pub fn apply_suggestion(&mut self) {
        let Some(suggestion) = self.suggestions.get(self.suggestion_index).cloned() else {
            return;
        };
        self.number = Editor::from_string(&suggestion.number);
        self.title = Editor::from_string(&suggestion.title);
        if let Ok(difficulty) = suggestion.difficulty.parse::<Difficulty>() {
            self.difficulty_index = Difficulty::ALL
                .iter()
                .position(|d| *d == difficulty)
                .unwrap_or(self.difficulty_index);
        }
        if !suggestion.tags.is_empty() {
            self.tags = Editor::from_string(&suggestion.tags.join(", "));
        }
        self.url = Editor::from_string(&suggestion.url);
        self.clear_suggestions();
    }

    /// Build the record to persist. An existing id and creation timestamp
    /// are preserved; the edited timestamp is always refreshed.
    pub fn to_problem(&self) -> Problem {
        let title = self.title.first_line().trim();
        let title = if title.is_empty() { "Untitled" } else { title };

        let mut problem = Problem::new(title.to_string(), self.difficulty());
        if let Some(ref id) = self.editing_id {
            problem.id = id.clone();
        }
        if let Some(added) = self.date_added {
            problem.date_added = added;
        }

        let number = self.number.first_line().trim();
        problem.number = if number.is_empty() {
            None
        } else {
            Some(number.to_string())
        };
        problem.url = self.url.first_line().trim().to_string();
        problem.set_tags_from_str(&self.tags.to_string());
        problem.description = self.description.to_string();
        let notes = self.notes.to_string();
        problem.notes = if notes.trim().is_empty() { None } else { Some(notes) };
        problem.code = self.code.to_string();
        problem.description_height = Some(self.description_height);
        problem.notes_height = Some(self.notes_height);
        problem.remote = self.remote.clone();
        problem.touch();
        problem
    }

    /// The editor behind the active field; None for the difficulty cycle.
    pub fn active_editor_mut(&mut self) -> Option<&mut Editor> {
        match self.current_field {
            FormField::Number => Some(&mut self.number),
            FormField::Title => Some(&mut self.title),
            FormField::Difficulty => None,
            FormField::Url => Some(&mut self.url),
            FormField::Tags => Some(&mut self.tags),
            FormField::Description => Some(&mut self.description),
            FormField::Notes => Some(&mut self.notes),
            FormField::Code => Some(&mut self.code),
        }
    }

    /// Grow or shrink the active multi-line field, clamped to sane bounds.
    pub fn resize_active_field(&mut self, delta: i16) {
        let target = match self.current_field {
            FormField::Description => &mut self.description_height,
            FormField::Notes => &mut self.notes_height,
            _ => return,
        };
        let new = (*target as i16 + delta).clamp(MIN_FIELD_HEIGHT as i16, MAX_FIELD_HEIGHT as i16);
        *target = new as u16;
    }
}

impl Default for ProblemForm {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterFormField {
    Difficulty,
    Tag,
    Apply,
    Clear,
    Cancel,
}

impl FilterFormField {
    pub fn next(self) -> Self {
        match self {
            FilterFormField::Difficulty => FilterFormField::Tag,
            FilterFormField::Tag => FilterFormField::Apply,
            FilterFormField::Apply => FilterFormField::Clear,
            FilterFormField::Clear => FilterFormField::Cancel,
            FilterFormField::Cancel => FilterFormField::Difficulty,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FilterFormField::Difficulty => FilterFormField::Cancel,
            FilterFormField::Tag => FilterFormField::Difficulty,
            FilterFormField::Apply => FilterFormField::Tag,
            FilterFormField::Clear => FilterFormField::Apply,
            FilterFormField::Cancel => FilterFormField::Clear,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FilterFormState {
    pub current_field: FilterFormField,
    pub difficulty_index: usize, // 0 = All, 1..=3 map into Difficulty::ALL
    pub tag: Editor,
}

#[derive(Debug, Clone, Default)]
pub struct FilterState {
    pub difficulty: Option<Difficulty>,
    pub tag: Option<String>,
    pub form_state: Option<FilterFormState>,
}

#[derive(Debug, Clone)]
pub struct UiState {
    pub mode: Mode,
    pub sidebar_state: SidebarState,
    pub selected_index: usize,
    pub list_state: ListState,
    pub detail_scroll: usize,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            mode: Mode::View,
            sidebar_state: SidebarState::Expanded,
            selected_index: 0,
            list_state: ListState::default(),
            detail_scroll: 0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ModalState {
    pub delete_confirmation: Option<Problem>,
    pub delete_modal_selection: usize, // 0 = Delete, 1 = Cancel
}

#[derive(Debug, Clone, Default)]
pub struct StatusState {
    pub message: Option<String>,
    pub message_time: Option<Instant>,
}

#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub query: String,
}

pub struct App {
    // Core infrastructure
    pub config: Config,
    pub store: Box<dyn ProblemStore>,
    pub catalog: Arc<Catalog>,
    pub lookup: LookupHandle,

    // Data collection (frequently accessed, keep at top level)
    pub problems: Vec<Problem>,

    // Grouped state
    pub ui: UiState,
    pub filter: FilterState,
    pub modals: ModalState,
    pub status: StatusState,
    pub search: SearchState,
    pub form: Option<ProblemForm>,

    /// Record id an in-flight detail fetch should be merged into.
    pub enrich_target: Option<String>,
}

impl App {
    pub fn new(
        config: Config,
        store: Box<dyn ProblemStore>,
        catalog: Arc<Catalog>,
        client: RemoteClient,
    ) -> Self {
        let mut problems = store.load();

        // First run: seed the store with the sample records so the UI has
        // something to show.
        if problems.is_empty() {
            problems = sample_problems();
            if let Err(e) = store.save(&problems) {
                tracing::warn!(error = %e, "failed to persist sample problems");
            }
        }

        let lookup = LookupHandle::spawn(catalog.clone(), client);

        let mut app = Self {
            config,
            store,
            catalog,
            lookup,
            problems,
            ui: UiState::default(),
            filter: FilterState::default(),
            modals: ModalState::default(),
            status: StatusState::default(),
            search: SearchState::default(),
            form: None,
            enrich_target: None,
        };
        if app.catalog.is_empty() {
            app.set_status_message(
                "No catalog snapshot found; autocomplete will use the remote API".to_string(),
            );
        }
        app.adjust_selected_index();
        app.sync_list_state();
        app
    }

    /// The problems currently visible in the sidebar: search and filters
    /// applied, most recently edited first.
    pub fn visible_problems(&self) -> Vec<Problem> {
        let query = self.search.query.to_lowercase();

        let mut visible: Vec<Problem> = self
            .problems
            .iter()
            .filter(|p| {
                if query.is_empty() {
                    return true;
                }
                let haystack = format!(
                    "{} {} {}",
                    p.title,
                    p.tags.join(" "),
                    p.number.as_deref().unwrap_or("")
                )
                .to_lowercase();
                haystack.contains(&query)
            })
            .filter(|p| match self.filter.difficulty {
                Some(difficulty) => p.difficulty == difficulty,
                None => true,
            })
            .filter(|p| match self.filter.tag {
                Some(ref tag) => {
                    let tag = tag.to_lowercase();
                    p.tags.iter().any(|t| t.to_lowercase().contains(&tag))
                }
                None => true,
            })
            .cloned()
            .collect();

        visible.sort_by(|a, b| b.date_edited.cmp(&a.date_edited));
        visible
    }

    pub fn selected_problem(&self) -> Option<Problem> {
        self.visible_problems().get(self.ui.selected_index).cloned()
    }

    pub fn adjust_selected_index(&mut self) {
        let len = self.visible_problems().len();
        if len == 0 {
            self.ui.selected_index = 0;
        } else if self.ui.selected_index >= len {
            self.ui.selected_index = len - 1;
        }
    }

    pub fn sync_list_state(&mut self) {
        if self.visible_problems().is_empty() {
            self.ui.list_state.select(None);
        } else {
            self.ui.list_state.select(Some(self.ui.selected_index));
        }
    }

    pub fn select_next(&mut self) {
        let len = self.visible_problems().len();
        if len > 0 && self.ui.selected_index + 1 < len {
            self.ui.selected_index += 1;
        }
        self.ui.detail_scroll = 0;
        self.sync_list_state();
    }

    pub fn select_prev(&mut self) {
        if self.ui.selected_index > 0 {
            self.ui.selected_index -= 1;
        }
        self.ui.detail_scroll = 0;
        self.sync_list_state();
    }

    /// Move the selection to the record with the given id, if visible.
    pub fn select_by_id(&mut self, id: &str) {
        if let Some(idx) = self.visible_problems().iter().position(|p| p.id == id) {
            self.ui.selected_index = idx;
        }
        self.sync_list_state();
    }

    pub fn set_status_message(&mut self, message: String) {
        self.status.message = Some(message);
        self.status.message_time = Some(Instant::now());
    }

    pub fn check_status_message_timeout(&mut self) {
        if let Some(time) = self.status.message_time {
            if time.elapsed().as_secs() >= STATUS_MESSAGE_SECS {
                self.status.message = None;
                self.status.message_time = None;
            }
        }
    }

    /// Persist the collection. Write failures are logged and surfaced in
    /// the status bar; the in-memory collection stays authoritative.
    pub fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.problems) {
            tracing::warn!(error = %e, "failed to save problems");
            self.set_status_message(format!("Failed to save: {}", e));
        }
    }

    pub fn start_create(&mut self) {
        self.form = Some(ProblemForm::new());
        self.ui.mode = Mode::Create;
    }

    pub fn start_edit(&mut self) {
        if let Some(problem) = self.selected_problem() {
            self.form = Some(ProblemForm::from_problem(&problem));
            self.ui.mode = Mode::Create;
        } else {
            self.set_status_message("Nothing selected to edit".to_string());
        }
    }

    pub fn cancel_form(&mut self) {
        self.form = None;
        self.ui.mode = Mode::View;
    }

    /// Save the form into the collection and persist.
    pub fn save_form(&mut self) {
        let Some(form) = self.form.take() else { return };
        let problem = form.to_problem();
        let id = problem.id.clone();
        let title = problem.title.clone();
        upsert_problem(&mut self.problems, problem);
        self.persist();
        self.ui.mode = Mode::View;
        self.select_by_id(&id);
        self.set_status_message(format!("Saved '{}'", title));
    }

    pub fn request_delete(&mut self) {
        if let Some(problem) = self.selected_problem() {
            self.modals.delete_confirmation = Some(problem);
            self.modals.delete_modal_selection = 0;
        }
    }

    pub fn delete_problem(&mut self, id: &str) {
        if remove_problem(&mut self.problems, id) {
            self.persist();
            self.adjust_selected_index();
            self.sync_list_state();
            self.set_status_message("Problem deleted".to_string());
        }
    }

    /// Ask the lookup worker for full details of the selected record.
    pub fn enrich_selected(&mut self) {
        let Some(problem) = self.selected_problem() else {
            self.set_status_message("Nothing selected".to_string());
            return;
        };
        let identifier = enrich_identifier(&problem);
        if identifier.is_empty() {
            self.set_status_message("No identifier to look up".to_string());
            return;
        }
        self.enrich_target = Some(problem.id.clone());
        self.lookup.fetch(&identifier);
        self.set_status_message(format!("Fetching details for '{}'...", identifier));
    }

    /// Drain the lookup channel and apply whatever survived the staleness
    /// guard. Called once per event-loop tick.
    pub fn drain_lookup(&mut self) {
        while let Some(event) = self.lookup.poll() {
            match event {
                LookupEvent::Suggestions(hits) => {
                    if let Some(ref mut form) = self.form {
                        form.suggestions = hits;
                        form.suggestion_index = 0;
                    }
                }
                LookupEvent::Detail(detail) => self.apply_detail(detail),
            }
        }
    }

    fn apply_detail(&mut self, detail: Option<Box<crate::remote::ProblemDetail>>) {
        let Some(target) = self.enrich_target.take() else { return };
        let Some(detail) = detail else {
            self.set_status_message("No details found".to_string());
            return;
        };

        let Some(problem) = self.problems.iter_mut().find(|p| p.id == target) else {
            return;
        };

        if problem.number.is_none() && !detail.frontend_id.is_empty() {
            problem.number = Some(detail.frontend_id.clone());
        }
        if problem.url.is_empty() {
            problem.url = format!("https://leetcode.com/problems/{}/", detail.title_slug);
        }
        if problem.description.trim().is_empty() {
            problem.description = strip_html(&detail.content);
        }
        for tag in &detail.topic_tags {
            problem.add_tag(&tag.name);
        }
        problem.remote = Some(detail.remote_meta());
        problem.touch();
        let title = problem.title.clone();
        let id = problem.id.clone();

        self.persist();
        self.select_by_id(&id);
        self.set_status_message(format!("Fetched details for '{}'", title));
    }

    /// Re-run autocomplete for the form's active field, if it has one.
    /// Number queries fire from one character, title queries from three.
    pub fn refresh_suggestions(&mut self) {
        let Some(ref mut form) = self.form else { return };
        let Some(query) = form.autocomplete_query() else {
            form.clear_suggestions();
            return;
        };
        let query = query.trim().to_string();

        let min_len = match form.current_field {
            FormField::Number => 1,
            _ => 3,
        };
        if query.chars().count() < min_len {
            form.clear_suggestions();
            return;
        }
        self.lookup.search(&query);
    }

    pub fn open_filter_modal(&mut self) {
        let difficulty_index = match self.filter.difficulty {
            None => 0,
            Some(d) => 1 + Difficulty::ALL.iter().position(|x| *x == d).unwrap_or(0),
        };
        self.filter.form_state = Some(FilterFormState {
            current_field: FilterFormField::Difficulty,
            difficulty_index,
            tag: Editor::from_string(self.filter.tag.as_deref().unwrap_or("")),
        });
        self.ui.mode = Mode::Filter;
    }

    pub fn apply_filter_form(&mut self) {
        if let Some(form) = self.filter.form_state.take() {
            self.filter.difficulty = match form.difficulty_index {
                0 => None,
                i => Difficulty::ALL.get(i - 1).copied(),
            };
            let tag = form.tag.to_string().trim().to_string();
            self.filter.tag = if tag.is_empty() { None } else { Some(tag) };
        }
        self.ui.mode = Mode::View;
        self.adjust_selected_index();
        self.sync_list_state();
    }

    pub fn clear_filters(&mut self) {
        self.filter.difficulty = None;
        self.filter.tag = None;
        self.filter.form_state = None;
        self.ui.mode = Mode::View;
        self.adjust_selected_index();
        self.sync_list_state();
    }

    pub fn get_filter_summary(&self) -> String {
        let mut parts = Vec::new();
        if self.ui.mode == Mode::Search || !self.search.query.is_empty() {
            parts.push(format!("Search: {}", self.search.query));
        }
        match self.filter.difficulty {
            Some(d) => parts.push(format!("Difficulty: {}", d)),
            None => parts.push("Difficulty: All".to_string()),
        }
        if let Some(ref tag) = self.filter.tag {
            parts.push(format!("Tag: {}", tag));
        }
        parts.join("  |  ")
    }

    /// Copy the selected record's solution code to the system clipboard.
    pub fn yank_code(&mut self) {
        let Some(problem) = self.selected_problem() else { return };
        if problem.code.is_empty() {
            self.set_status_message("No code to copy".to_string());
            return;
        }
        self.copy_to_clipboard(&problem.code, "Code copied");
    }

    /// Copy the selected record's URL to the system clipboard.
    pub fn yank_url(&mut self) {
        let Some(problem) = self.selected_problem() else { return };
        if problem.url.is_empty() {
            self.set_status_message("No URL to copy".to_string());
            return;
        }
        self.copy_to_clipboard(&problem.url, "URL copied");
    }

    fn copy_to_clipboard(&mut self, text: &str, success: &str) {
        match arboard::Clipboard::new().and_then(|mut c| c.set_text(text.to_string())) {
            Ok(()) => self.set_status_message(success.to_string()),
            Err(e) => self.set_status_message(format!("Clipboard error: {}", e)),
        }
    }
}

/// Best identifier for a remote detail lookup: the slug from the canonical
/// URL, then the display number, then a slugified title.
fn enrich_identifier(problem: &Problem) -> String {
    if let Some(slug) = slug_from_url(&problem.url) {
        return slug;
    }
    if let Some(ref number) = problem.number {
        if !number.trim().is_empty() {
            return number.trim().to_string();
        }
    }
    problem
        .title
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

fn slug_from_url(url: &str) -> Option<String> {
    let marker = "/problems/";
    let idx = url.find(marker)?;
    let rest = &url[idx + marker.len()..];
    let slug = rest.trim_end_matches('/').split('/').next()?.trim();
    if slug.is_empty() {
        None
    } else {
        Some(slug.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enrich_identifier_prefers_url_slug() {
        let mut p = Problem::new("Two Sum".to_string(), Difficulty::Easy);
        p.url = "https://leetcode.com/problems/two-sum/".to_string();
        p.number = Some("1".to_string());
        assert_eq!(enrich_identifier(&p), "two-sum");

        p.url.clear();
        assert_eq!(enrich_identifier(&p), "1");

        p.number = None;
        assert_eq!(enrich_identifier(&p), "two-sum");
    }

    #[test]
    fn form_round_trips_a_problem() {
        let mut original = Problem::new("LRU Cache".to_string(), Difficulty::Medium);
        original.number = Some("146".to_string());
        original.url = "https://leetcode.com/problems/lru-cache/".to_string();
        original.tags = vec!["Design".to_string(), "Hash Table".to_string()];
        original.description = "Design an LRU cache.".to_string();
        original.notes = Some("hash map + DLL".to_string());
        original.code = "class LRUCache:\n    pass".to_string();

        let form = ProblemForm::from_problem(&original);
        let rebuilt = form.to_problem();

        assert_eq!(rebuilt.id, original.id);
        assert_eq!(rebuilt.title, original.title);
        assert_eq!(rebuilt.difficulty, original.difficulty);
        assert_eq!(rebuilt.number, original.number);
        assert_eq!(rebuilt.tags, original.tags);
        assert_eq!(rebuilt.description, original.description);
        assert_eq!(rebuilt.notes, original.notes);
        assert_eq!(rebuilt.code, original.code);
        assert_eq!(rebuilt.date_added, original.date_added);
        assert!(rebuilt.date_edited >= rebuilt.date_added);
    }

    #[test]
    fn empty_title_saves_as_untitled() {
        let form = ProblemForm::new();
        let problem = form.to_problem();
        assert_eq!(problem.title, "Untitled");
        assert_eq!(problem.difficulty, Difficulty::Easy);
    }

    #[test]
    fn resize_clamps_field_heights() {
        let mut form = ProblemForm::new();
        form.current_field = FormField::Description;
        for _ in 0..100 {
            form.resize_active_field(1);
        }
        assert_eq!(form.description_height, MAX_FIELD_HEIGHT);
        for _ in 0..100 {
            form.resize_active_field(-1);
        }
        assert_eq!(form.description_height, MIN_FIELD_HEIGHT);
    }
}
