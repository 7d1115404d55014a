use crate::config::Config;
use crate::keybindings::KeybindingRegistry;
use crate::posts::{
    BootstrapResult, CancelToken, LoadState, PageView, Post, PostDraft, PostEdit, PostOp,
    PostStore,
};
use crate::remote::build_client;
use crate::theme::{StyleMap, ThemeVariant};
use crate::util::{MAX_BODY_LENGTH, MAX_TITLE_LENGTH};
use anyhow::Result;
use ratatui::style::Style;
use std::borrow::Cow;
use tokio::time::Instant;

/// How long a status message stays on screen.
const STATUS_TTL_SECS: u64 = 3;

// ============================================================================
// Post Forms
// ============================================================================

/// What a submitted form turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    /// New post at the front of the list.
    AddNew,
    /// New post right after `reference_id`.
    AddAfter { reference_id: u64 },
    /// Replace title and body of `id`.
    Edit { id: u64 },
}

/// Which form input receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Body,
}

/// State of the open post form overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub kind: FormKind,
    pub title: String,
    pub body: String,
    pub focus: FormField,
}

impl FormState {
    fn empty(kind: FormKind) -> Self {
        Self {
            kind,
            title: String::new(),
            body: String::new(),
            focus: FormField::Title,
        }
    }

    pub fn add_new() -> Self {
        Self::empty(FormKind::AddNew)
    }

    pub fn add_after(reference_id: u64) -> Self {
        Self::empty(FormKind::AddAfter { reference_id })
    }

    /// Edit form pre-filled with the post's current values.
    pub fn edit(post: &Post) -> Self {
        Self {
            kind: FormKind::Edit { id: post.id },
            title: post.title.clone(),
            body: post.body.clone(),
            focus: FormField::Title,
        }
    }

    pub fn heading(&self) -> String {
        match self.kind {
            FormKind::AddNew => " New post ".to_string(),
            FormKind::AddAfter { reference_id } => format!(" New post after #{} ", reference_id),
            FormKind::Edit { id } => format!(" Edit post #{} ", id),
        }
    }

    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            FormField::Title => FormField::Body,
            FormField::Body => FormField::Title,
        };
    }

    /// Append a typed character to the focused field.
    ///
    /// Returns `false` when the field is already at its length cap.
    pub fn push_char(&mut self, c: char) -> bool {
        let (field, cap) = match self.focus {
            FormField::Title => (&mut self.title, MAX_TITLE_LENGTH),
            FormField::Body => (&mut self.body, MAX_BODY_LENGTH),
        };
        if field.chars().count() >= cap {
            return false;
        }
        field.push(c);
        true
    }

    pub fn pop_char(&mut self) {
        match self.focus {
            FormField::Title => self.title.pop(),
            FormField::Body => self.body.pop(),
        };
    }

    pub fn clear(&mut self) {
        self.title.clear();
        self.body.clear();
        self.focus = FormField::Title;
    }

    /// Turn the form into a store operation.
    ///
    /// Fields are taken as typed. Add forms return `None` when both fields
    /// are empty; an edit always saves, even when it clears the post.
    pub fn to_op(&self) -> Option<PostOp> {
        match self.kind {
            FormKind::AddNew => self.draft().map(PostOp::AddNew),
            FormKind::AddAfter { reference_id } => self
                .draft()
                .map(|draft| PostOp::AddAfter { reference_id, draft }),
            FormKind::Edit { id } => Some(PostOp::Edit {
                id,
                edit: PostEdit::both(self.title.clone(), self.body.clone()),
            }),
        }
    }

    fn draft(&self) -> Option<PostDraft> {
        let draft = PostDraft::new(self.title.clone(), self.body.clone());
        (!draft.is_blank()).then_some(draft)
    }
}

// ============================================================================
// Confirmation Dialog
// ============================================================================

/// Pending confirmation action for destructive operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    DeletePost { id: u64, title: String },
}

// ============================================================================
// Background Events
// ============================================================================

/// Messages from background tasks to the UI task.
#[derive(Debug)]
pub enum AppEvent {
    /// The bootstrap fetch settled.
    PostsLoaded(BootstrapResult),
    /// A background task panicked.
    ///
    /// Fields:
    /// - `task`: Name of the task that panicked (e.g., "bootstrap")
    /// - `error`: The panic message extracted from the panic payload
    TaskPanicked { task: &'static str, error: String },
}

// ============================================================================
// Application State
// ============================================================================

pub struct App {
    pub http_client: reqwest::Client,
    pub endpoint: String,
    pub request_timeout: std::time::Duration,
    pub confirm_delete: bool,

    // Theme
    /// Current theme variant (for cycling).
    pub theme_variant: ThemeVariant,
    /// Active style map for all UI rendering.
    pub theme: StyleMap,

    /// Keybinding registry for action-key mapping with config overrides.
    pub keybindings: KeybindingRegistry,

    // Data
    pub store: PostStore,
    /// Index of the selected card within the current page.
    pub selected: usize,

    // Modes and overlays
    pub search_mode: bool,
    pub form: Option<FormState>,
    /// When set, input is routed to the confirmation handler.
    pub pending_confirm: Option<ConfirmAction>,
    pub show_help: bool,
    pub help_scroll_offset: usize,

    // Status
    pub status_message: Option<(Cow<'static, str>, Instant)>,
    /// Dirty flag to skip unnecessary frame renders.
    pub needs_redraw: bool,
    /// Loading spinner frame, advanced by the tick handler.
    pub spinner_frame: usize,

    // Bootstrap task
    pub bootstrap_token: CancelToken,
    pub bootstrap_handle: Option<tokio::task::JoinHandle<()>>,
}

impl App {
    pub fn new(config: &Config) -> Result<Self> {
        let request_timeout = config.request_timeout();
        let http_client = build_client(request_timeout)?;

        let theme_variant = ThemeVariant::from_str_name(&config.theme).unwrap_or_else(|| {
            tracing::warn!(theme = %config.theme, "Unknown theme, falling back to dark");
            ThemeVariant::Dark
        });

        let mut keybindings = KeybindingRegistry::new();
        for warning in keybindings.apply_overrides(&config.keybindings) {
            tracing::warn!(warning = %warning, "Keybinding override ignored");
        }

        let mut store = PostStore::new(config.effective_page_size());
        store.set_show_body(config.show_body);

        Ok(Self {
            http_client,
            endpoint: config.endpoint.clone(),
            request_timeout,
            confirm_delete: config.confirm_delete,
            theme_variant,
            theme: StyleMap::from_palette(&theme_variant.palette()),
            keybindings,
            store,
            selected: 0,
            search_mode: false,
            form: None,
            pending_confirm: None,
            show_help: false,
            help_scroll_offset: 0,
            status_message: None,
            needs_redraw: true,
            spinner_frame: 0,
            bootstrap_token: CancelToken::new(),
            bootstrap_handle: None,
        })
    }

    /// Resolve a semantic role name to its `Style`.
    pub fn style(&self, role: &str) -> Style {
        self.theme.resolve(role)
    }

    pub fn set_theme(&mut self, variant: ThemeVariant) {
        self.theme_variant = variant;
        self.theme = StyleMap::from_palette(&variant.palette());
        self.needs_redraw = true;
    }

    /// Cycle to the next theme variant. Returns the new theme's name.
    pub fn cycle_theme(&mut self) -> &'static str {
        let next = self.theme_variant.next();
        self.set_theme(next);
        next.name()
    }

    /// Set status message (will auto-expire after 3 seconds)
    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
    }

    /// Clear status message if expired.
    /// Returns true if a message was actually cleared
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed().as_secs() >= STATUS_TTL_SECS {
                self.status_message = None;
                return true;
            }
        }
        false
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.store.load_state(), LoadState::Ready)
    }

    // ------------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------------

    pub fn view(&self) -> PageView<'_> {
        self.store.view()
    }

    pub fn selected_post(&self) -> Option<&Post> {
        self.store.view().items.get(self.selected).copied()
    }

    /// Keep the selection inside the current page.
    pub fn clamp_selection(&mut self) {
        let count = self.store.view().items.len();
        self.selected = self.selected.min(count.saturating_sub(1));
    }

    pub fn nav_down(&mut self) {
        let count = self.store.view().items.len();
        if self.selected + 1 < count {
            self.selected += 1;
        }
    }

    pub fn nav_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    // ------------------------------------------------------------------------
    // Store operations
    // ------------------------------------------------------------------------

    /// Apply `op` to the store and fix up the selection.
    pub fn apply(&mut self, op: PostOp) -> bool {
        let resets_selection = matches!(
            op,
            PostOp::AddNew(_)
                | PostOp::SetSearch(_)
                | PostOp::ClearSearch
                | PostOp::SetPage(_)
                | PostOp::NextPage
                | PostOp::PrevPage
        );
        let changed = self.store.apply(op);
        if changed && resets_selection {
            self.selected = 0;
        }
        self.clamp_selection();
        self.needs_redraw = true;
        changed
    }

    /// Selected post if it exists and is enabled.
    fn selected_enabled(&self) -> Option<&Post> {
        self.selected_post().filter(|p| !p.disabled)
    }

    pub fn open_add_new(&mut self) {
        self.form = Some(FormState::add_new());
    }

    /// Open the add-after form for the selected post.
    ///
    /// Returns `false` when there is no enabled post selected.
    pub fn open_add_after(&mut self) -> bool {
        let Some(id) = self.selected_enabled().map(|p| p.id) else {
            return false;
        };
        self.form = Some(FormState::add_after(id));
        true
    }

    pub fn open_edit(&mut self) -> bool {
        let Some(form) = self.selected_enabled().map(FormState::edit) else {
            return false;
        };
        self.form = Some(form);
        true
    }

    /// Submit the open form.
    ///
    /// A blank add form stays open and yields `Err` with a message for the status bar.
    pub fn submit_form(&mut self) -> std::result::Result<(), &'static str> {
        let Some(form) = self.form.as_ref() else {
            return Ok(());
        };
        let Some(op) = form.to_op() else {
            return Err("Title or body required");
        };
        let message = match form.kind {
            FormKind::AddNew => "Post added",
            FormKind::AddAfter { .. } => "Post inserted",
            FormKind::Edit { .. } => "Post updated",
        };
        self.form = None;
        if self.apply(op) {
            self.set_status(message);
        } else {
            self.set_status("Post is no longer editable");
        }
        Ok(())
    }

    /// Start deleting the selected post: ask first when configured to.
    pub fn request_delete(&mut self) -> bool {
        let Some((id, title)) = self.selected_enabled().map(|p| (p.id, p.title.clone())) else {
            return false;
        };
        if self.confirm_delete {
            self.pending_confirm = Some(ConfirmAction::DeletePost { id, title });
        } else {
            self.delete_post(id);
        }
        true
    }

    /// Carry out the pending confirmation, if any.
    pub fn confirm_pending(&mut self) {
        if let Some(ConfirmAction::DeletePost { id, .. }) = self.pending_confirm.take() {
            self.delete_post(id);
        }
    }

    fn delete_post(&mut self, id: u64) {
        if self.apply(PostOp::Delete(id)) {
            self.set_status(format!("Deleted post #{}", id));
        }
    }

    pub fn toggle_disable_selected(&mut self) {
        let Some(id) = self.selected_post().map(|p| p.id) else {
            return;
        };
        if self.apply(PostOp::ToggleDisable(id)) {
            let disabled = self.store.get(id).is_some_and(|p| p.disabled);
            let verb = if disabled { "Disabled" } else { "Enabled" };
            self.set_status(format!("{} post #{}", verb, id));
        }
    }

    // ------------------------------------------------------------------------
    // Shutdown
    // ------------------------------------------------------------------------

    /// Cancel the bootstrap so a late result is never applied.
    pub fn shutdown(&mut self) {
        self.bootstrap_token.cancel();
        if let Some(handle) = self.bootstrap_handle.take() {
            handle.abort();
            tracing::debug!("Aborted bootstrap task");
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.shutdown();
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn post(id: u64, title: &str) -> Post {
        Post {
            id,
            title: title.to_string(),
            body: format!("body {}", id),
            disabled: false,
        }
    }

    fn test_app() -> App {
        App::new(&Config::default()).unwrap()
    }

    fn ready_app(count: u64) -> App {
        let mut app = test_app();
        app.store
            .load((1..=count).map(|id| post(id, &format!("post {}", id))).collect());
        app
    }

    fn ids(app: &App) -> Vec<u64> {
        app.store.posts().iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_new_app_starts_loading() {
        let app = test_app();
        assert_eq!(app.store.load_state(), &LoadState::Loading);
        assert!(!app.is_ready());
        assert!(app.selected_post().is_none());
    }

    #[test]
    fn test_config_applies_to_app() {
        let config = Config {
            page_size: 3,
            show_body: false,
            theme: "light".to_string(),
            ..Config::default()
        };
        let app = App::new(&config).unwrap();
        assert_eq!(app.store.page_size(), 3);
        assert!(!app.store.show_body());
        assert_eq!(app.theme_variant, ThemeVariant::Light);
    }

    #[test]
    fn test_unknown_theme_falls_back_to_dark() {
        let config = Config {
            theme: "neon".to_string(),
            ..Config::default()
        };
        assert_eq!(App::new(&config).unwrap().theme_variant, ThemeVariant::Dark);
    }

    #[test]
    fn test_cycle_theme() {
        let mut app = test_app();
        app.needs_redraw = false;
        assert_eq!(app.cycle_theme(), "Light");
        assert!(app.needs_redraw);
        assert_eq!(app.style("status_bar"), ThemeVariant::Light.palette().status_bar);
        assert_eq!(app.cycle_theme(), "Dark");
    }

    #[test]
    fn test_navigation_stays_in_page() {
        let mut app = ready_app(12);
        for _ in 0..20 {
            app.nav_down();
        }
        assert_eq!(app.selected, 9);
        assert_eq!(app.selected_post().map(|p| p.id), Some(10));
        app.nav_up();
        assert_eq!(app.selected, 8);
    }

    #[test]
    fn test_page_change_resets_selection() {
        let mut app = ready_app(12);
        app.selected = 5;
        app.apply(PostOp::NextPage);
        assert_eq!(app.selected, 0);
        assert_eq!(app.selected_post().map(|p| p.id), Some(11));
    }

    #[test]
    fn test_add_new_form_prepends() {
        let mut app = ready_app(2);
        app.open_add_new();
        let form = app.form.as_mut().unwrap();
        for c in "Hello".chars() {
            form.push_char(c);
        }
        assert!(app.submit_form().is_ok());
        assert!(app.form.is_none());
        assert_eq!(ids(&app), vec![3, 1, 2]);
        assert_eq!(app.store.posts()[0].title, "Hello");
    }

    #[test]
    fn test_blank_form_is_refused_and_stays_open() {
        let mut app = ready_app(2);
        app.open_add_new();
        assert!(app.submit_form().is_err());
        assert!(app.form.is_some());
        assert_eq!(app.store.len(), 2);
    }

    #[test]
    fn test_body_only_draft_gets_default_title() {
        let mut app = ready_app(1);
        app.open_add_new();
        let form = app.form.as_mut().unwrap();
        form.next_field();
        form.push_char('x');
        app.submit_form().unwrap();
        assert_eq!(app.store.posts()[0].title, crate::posts::DEFAULT_TITLE);
        assert_eq!(app.store.posts()[0].body, "x");
    }

    #[test]
    fn test_add_after_selected() {
        let mut app = ready_app(3);
        app.selected = 1;
        assert!(app.open_add_after());
        app.form.as_mut().unwrap().title = "after two".to_string();
        app.submit_form().unwrap();
        assert_eq!(ids(&app), vec![1, 2, 4, 3]);
    }

    #[test]
    fn test_edit_prefills_and_saves() {
        let mut app = ready_app(2);
        assert!(app.open_edit());
        let form = app.form.as_mut().unwrap();
        assert_eq!(form.title, "post 1");
        assert_eq!(form.body, "body 1");
        form.clear();
        form.title = "renamed".to_string();
        app.submit_form().unwrap();
        assert_eq!(app.store.get(1).unwrap().title, "renamed");
        assert_eq!(app.store.get(1).unwrap().body, "");
    }

    #[test]
    fn test_add_form_keeps_whitespace_as_typed() {
        let mut app = ready_app(1);
        app.open_add_new();
        app.form.as_mut().unwrap().title = "  ".to_string();
        assert!(app.submit_form().is_ok());
        assert_eq!(app.store.posts()[0].title, "  ");
    }

    #[test]
    fn test_edit_keeps_untouched_body_verbatim() {
        let mut app = test_app();
        let mut indented = post(1, "t");
        indented.body = "  indented".to_string();
        app.store.load(vec![indented]);

        assert!(app.open_edit());
        app.form.as_mut().unwrap().title = "new title".to_string();
        app.submit_form().unwrap();

        let saved = app.store.get(1).unwrap();
        assert_eq!(saved.title, "new title");
        assert_eq!(saved.body, "  indented");
    }

    #[test]
    fn test_blank_edit_clears_post() {
        let mut app = ready_app(1);
        assert!(app.open_edit());
        app.form.as_mut().unwrap().clear();
        assert!(app.submit_form().is_ok());
        assert!(app.form.is_none());

        let saved = app.store.get(1).unwrap();
        assert_eq!(saved.title, "");
        assert_eq!(saved.body, "");
    }

    #[test]
    fn test_toggle_disable_goes_through_apply() {
        let mut app = ready_app(2);
        app.selected = 1;
        app.needs_redraw = false;
        app.toggle_disable_selected();
        assert!(app.needs_redraw);
        assert_eq!(app.selected, 1);
        assert!(app.store.get(2).unwrap().disabled);
        assert_eq!(
            app.status_message.as_ref().map(|(m, _)| m.to_string()),
            Some("Disabled post #2".to_string())
        );
    }

    #[test]
    fn test_disabled_post_refuses_forms_and_delete() {
        let mut app = ready_app(2);
        app.toggle_disable_selected();
        assert!(app.store.get(1).unwrap().disabled);
        assert!(!app.open_edit());
        assert!(!app.open_add_after());
        assert!(!app.request_delete());
        assert!(app.form.is_none());

        app.toggle_disable_selected();
        assert!(!app.store.get(1).unwrap().disabled);
        assert!(app.open_edit());
    }

    #[test]
    fn test_delete_asks_for_confirmation() {
        let mut app = ready_app(2);
        assert!(app.request_delete());
        assert_eq!(
            app.pending_confirm,
            Some(ConfirmAction::DeletePost {
                id: 1,
                title: "post 1".to_string()
            })
        );
        assert_eq!(app.store.len(), 2);
        app.confirm_pending();
        assert_eq!(ids(&app), vec![2]);
        assert!(app.pending_confirm.is_none());
    }

    #[test]
    fn test_delete_without_confirmation() {
        let mut app = ready_app(2);
        app.confirm_delete = false;
        app.selected = 1;
        assert!(app.request_delete());
        assert_eq!(ids(&app), vec![1]);
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_form_length_cap() {
        let mut form = FormState::add_new();
        form.title = "a".repeat(MAX_TITLE_LENGTH);
        assert!(!form.push_char('b'));
        form.next_field();
        assert!(form.push_char('b'));
        assert_eq!(form.body, "b");
    }

    #[test]
    fn test_status_message_set() {
        let mut app = test_app();
        app.set_status("hello");
        assert!(!app.clear_expired_status());
        assert_eq!(
            app.status_message.as_ref().map(|(m, _)| m.to_string()),
            Some("hello".to_string())
        );
    }

    #[tokio::test]
    async fn test_shutdown_cancels_token_and_aborts_task() {
        let mut app = test_app();
        let token = app.bootstrap_token.clone();
        app.bootstrap_handle = Some(tokio::spawn(std::future::pending::<()>()));
        app.shutdown();
        assert!(token.is_cancelled());
        assert!(app.bootstrap_handle.is_none());
    }
}
