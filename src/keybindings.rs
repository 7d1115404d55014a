//! Keybinding registry: maps actions to key events with config overrides.
//!
//! Bindings are data-driven so users can remap them from config.toml.
use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::HashMap;

// ============================================================================
// Action Enum
// ============================================================================

/// All user-facing actions that can be triggered by keybindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    NavDown,
    NavUp,
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    EnterSearch,
    ExitSearch,
    ClearSearch,
    ToggleBody,
    AddNew,
    AddAfter,
    EditPost,
    DeletePost,
    ToggleDisable,
    SubmitForm,
    CancelForm,
    NextField,
    ClearForm,
    CycleTheme,
    ShowHelp,
}

impl Action {
    /// Human-readable description for the help screen.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Quit => "Quit application",
            Self::NavDown => "Select next card",
            Self::NavUp => "Select previous card",
            Self::NextPage => "Next page",
            Self::PrevPage => "Previous page",
            Self::FirstPage => "First page",
            Self::LastPage => "Last page",
            Self::EnterSearch => "Search titles",
            Self::ExitSearch => "Leave search (keep filter)",
            Self::ClearSearch => "Clear search",
            Self::ToggleBody => "Show / hide post bodies",
            Self::AddNew => "Add new post at top",
            Self::AddAfter => "Add post after selected",
            Self::EditPost => "Edit selected post",
            Self::DeletePost => "Delete selected post",
            Self::ToggleDisable => "Disable / enable selected post",
            Self::SubmitForm => "Save form",
            Self::CancelForm => "Cancel form",
            Self::NextField => "Switch field",
            Self::ClearForm => "Clear form",
            Self::CycleTheme => "Cycle theme",
            Self::ShowHelp => "Show help",
        }
    }
}

// ============================================================================
// Context Enum
// ============================================================================

/// Dispatch context. Determines which bindings are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    Global,
    Search,
    Form,
}

// ============================================================================
// Key Specification
// ============================================================================

/// A key event: code + modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeySpec {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeySpec {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub const fn char(c: char) -> Self {
        Self::plain(KeyCode::Char(c))
    }

    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    /// Terminals report uppercase letters with SHIFT set; the character
    /// already carries the case, so SHIFT is dropped for `Char` keys.
    fn normalized(self) -> Self {
        match self.code {
            KeyCode::Char(_) => Self::new(self.code, self.modifiers.difference(KeyModifiers::SHIFT)),
            _ => self,
        }
    }
}

/// Parse a key string from config into a KeySpec.
///
/// Supported formats:
/// - Single char: "q", "j", "/"
/// - Named keys: "Enter", "Esc", "Tab", "Up", "Down", "Left", "Right",
///   "Home", "End", "PageUp", "PageDown", "Backspace", "Space"
/// - Modifier combos: "Ctrl+d"
/// - Function keys: "F1" through "F12"
fn parse_key_string(s: &str) -> Option<KeySpec> {
    let s = s.trim();

    if let Some(rest) = s.strip_prefix("Ctrl+") {
        let mut chars = rest.trim().chars();
        return match (chars.next(), chars.next()) {
            (Some(c), None) => Some(KeySpec::ctrl(c)),
            _ => None,
        };
    }

    let named = match s.to_lowercase().as_str() {
        "enter" | "return" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "tab" => Some(KeyCode::Tab),
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "home" => Some(KeyCode::Home),
        "end" => Some(KeyCode::End),
        "pageup" => Some(KeyCode::PageUp),
        "pagedown" => Some(KeyCode::PageDown),
        "backspace" => Some(KeyCode::Backspace),
        "space" => Some(KeyCode::Char(' ')),
        _ => None,
    };
    if let Some(code) = named {
        return Some(KeySpec::plain(code));
    }

    if let Some(n) = s
        .strip_prefix(['F', 'f'])
        .and_then(|n| n.parse::<u8>().ok())
    {
        if (1..=12).contains(&n) {
            return Some(KeySpec::plain(KeyCode::F(n)));
        }
    }

    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(KeySpec::char(c)),
        _ => None,
    }
}

/// Format a KeySpec as a human-readable string for the help screen.
fn format_key(key: &KeySpec) -> String {
    let modifier = if key.modifiers.contains(KeyModifiers::CONTROL) {
        "Ctrl+"
    } else {
        ""
    };

    let key_name = match key.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PageUp".to_string(),
        KeyCode::PageDown => "PageDown".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => "?".to_string(),
    };

    format!("{}{}", modifier, key_name)
}

// ============================================================================
// Keybinding Registry
// ============================================================================

/// Registry of keybindings, supporting default bindings and config overrides.
///
/// The same key can map to different actions in different contexts; lookups
/// fall back to `Global` only from the list view, never from text-entry
/// contexts where plain characters are input.
pub struct KeybindingRegistry {
    /// Primary lookup: (Context, KeySpec) -> Action
    lookup: HashMap<(Context, KeySpec), Action>,
    /// All bindings for help screen enumeration
    bindings: Vec<(Context, KeySpec, Action)>,
}

impl KeybindingRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            lookup: HashMap::new(),
            bindings: Vec::new(),
        };
        registry.register_defaults();
        registry
    }

    fn bind(&mut self, context: Context, key: KeySpec, action: Action) {
        self.lookup.insert((context, key), action);
        self.bindings.push((context, key, action));
    }

    fn register_defaults(&mut self) {
        use Action::*;

        let global: [(KeySpec, Action); 24] = [
            (KeySpec::char('q'), Quit),
            (KeySpec::char('j'), NavDown),
            (KeySpec::plain(KeyCode::Down), NavDown),
            (KeySpec::char('k'), NavUp),
            (KeySpec::plain(KeyCode::Up), NavUp),
            (KeySpec::char('l'), NextPage),
            (KeySpec::plain(KeyCode::Right), NextPage),
            (KeySpec::plain(KeyCode::PageDown), NextPage),
            (KeySpec::char('h'), PrevPage),
            (KeySpec::plain(KeyCode::Left), PrevPage),
            (KeySpec::plain(KeyCode::PageUp), PrevPage),
            (KeySpec::char('g'), FirstPage),
            (KeySpec::plain(KeyCode::Home), FirstPage),
            (KeySpec::char('G'), LastPage),
            (KeySpec::plain(KeyCode::End), LastPage),
            (KeySpec::char('/'), EnterSearch),
            (KeySpec::char('c'), ClearSearch),
            (KeySpec::char('b'), ToggleBody),
            (KeySpec::char('n'), AddNew),
            (KeySpec::char('a'), AddAfter),
            (KeySpec::char('e'), EditPost),
            (KeySpec::char('d'), DeletePost),
            (KeySpec::char('x'), ToggleDisable),
            (KeySpec::char('t'), CycleTheme),
        ];
        for (key, action) in global {
            self.bind(Context::Global, key, action);
        }
        self.bind(Context::Global, KeySpec::char('?'), ShowHelp);

        // === Search mode ===
        self.bind(Context::Search, KeySpec::plain(KeyCode::Esc), ExitSearch);
        self.bind(Context::Search, KeySpec::plain(KeyCode::Enter), ExitSearch);
        self.bind(Context::Search, KeySpec::ctrl('l'), ClearSearch);

        // === Post forms ===
        self.bind(Context::Form, KeySpec::plain(KeyCode::Enter), SubmitForm);
        self.bind(Context::Form, KeySpec::plain(KeyCode::Esc), CancelForm);
        self.bind(Context::Form, KeySpec::plain(KeyCode::Tab), NextField);
        self.bind(Context::Form, KeySpec::ctrl('l'), ClearForm);
    }

    /// Apply user overrides from config keybindings map.
    ///
    /// Keys in the map are action names (e.g., "quit", "next_page").
    /// Values are key strings (e.g., "q", "Ctrl+d", "F5").
    ///
    /// Returns a list of warnings for unrecognized action names or unparseable keys.
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, String>) -> Vec<String> {
        let mut warnings = Vec::new();

        for (action_name, key_str) in overrides {
            let Some(action) = parse_action_name(action_name) else {
                warnings.push(format!("Unknown action '{}', ignoring", action_name));
                continue;
            };
            let Some(key) = parse_key_string(key_str) else {
                warnings.push(format!(
                    "Cannot parse key '{}' for action '{}', ignoring",
                    key_str, action_name
                ));
                continue;
            };

            let mut contexts: Vec<Context> = self
                .bindings
                .iter()
                .filter(|(_, _, a)| *a == action)
                .map(|(c, _, _)| *c)
                .collect();
            contexts.dedup();

            self.lookup.retain(|_, a| *a != action);
            self.bindings.retain(|(_, _, a)| *a != action);

            for ctx in contexts {
                self.bind(ctx, key.normalized(), action);
            }

            tracing::info!(
                action = %action_name,
                key = %key_str,
                "Applied keybinding override"
            );
        }

        warnings
    }

    /// Look up the action for a given key in a given context.
    ///
    /// `Global` bindings are consulted only when `context` is `Global`:
    /// search and form contexts take plain characters as text input.
    pub fn action_for_key(
        &self,
        code: KeyCode,
        modifiers: KeyModifiers,
        context: Context,
    ) -> Option<Action> {
        let key = KeySpec::new(code, modifiers).normalized();
        self.lookup.get(&(context, key)).copied()
    }

    /// Get all bindings for the help screen.
    ///
    /// Returns (context, key_display_string, action, description) tuples.
    pub fn all_bindings(&self) -> Vec<(Context, String, Action, &'static str)> {
        self.bindings
            .iter()
            .map(|(ctx, key, action)| (*ctx, format_key(key), *action, action.describe()))
            .collect()
    }
}

impl Default for KeybindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse an action name string (from config) into an Action enum.
fn parse_action_name(name: &str) -> Option<Action> {
    let action = match name.to_lowercase().replace('-', "_").as_str() {
        "quit" => Action::Quit,
        "nav_down" | "down" => Action::NavDown,
        "nav_up" | "up" => Action::NavUp,
        "next_page" => Action::NextPage,
        "prev_page" | "previous_page" => Action::PrevPage,
        "first_page" => Action::FirstPage,
        "last_page" => Action::LastPage,
        "enter_search" | "search" => Action::EnterSearch,
        "exit_search" => Action::ExitSearch,
        "clear_search" => Action::ClearSearch,
        "toggle_body" | "show_body" => Action::ToggleBody,
        "add_new" | "add" => Action::AddNew,
        "add_after" => Action::AddAfter,
        "edit_post" | "edit" => Action::EditPost,
        "delete_post" | "delete" => Action::DeletePost,
        "toggle_disable" | "disable" => Action::ToggleDisable,
        "submit_form" | "submit" => Action::SubmitForm,
        "cancel_form" | "cancel" => Action::CancelForm,
        "next_field" => Action::NextField,
        "clear_form" => Action::ClearForm,
        "cycle_theme" | "theme" => Action::CycleTheme,
        "show_help" | "help" => Action::ShowHelp,
        _ => return None,
    };
    Some(action)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_has_quit() {
        let reg = KeybindingRegistry::new();
        let action = reg.action_for_key(KeyCode::Char('q'), KeyModifiers::NONE, Context::Global);
        assert_eq!(action, Some(Action::Quit));
    }

    #[test]
    fn test_default_page_keys() {
        let reg = KeybindingRegistry::new();
        assert_eq!(
            reg.action_for_key(KeyCode::Right, KeyModifiers::NONE, Context::Global),
            Some(Action::NextPage)
        );
        assert_eq!(
            reg.action_for_key(KeyCode::Char('h'), KeyModifiers::NONE, Context::Global),
            Some(Action::PrevPage)
        );
    }

    #[test]
    fn test_shift_is_ignored_for_chars() {
        let reg = KeybindingRegistry::new();
        assert_eq!(
            reg.action_for_key(KeyCode::Char('G'), KeyModifiers::SHIFT, Context::Global),
            Some(Action::LastPage)
        );
        assert_eq!(
            reg.action_for_key(KeyCode::Char('?'), KeyModifiers::SHIFT, Context::Global),
            Some(Action::ShowHelp)
        );
    }

    #[test]
    fn test_form_context_does_not_fall_back() {
        let reg = KeybindingRegistry::new();
        // 'q' is text in a form, not Quit
        assert_eq!(
            reg.action_for_key(KeyCode::Char('q'), KeyModifiers::NONE, Context::Form),
            None
        );
        assert_eq!(
            reg.action_for_key(KeyCode::Enter, KeyModifiers::NONE, Context::Form),
            Some(Action::SubmitForm)
        );
    }

    #[test]
    fn test_search_context() {
        let reg = KeybindingRegistry::new();
        assert_eq!(
            reg.action_for_key(KeyCode::Esc, KeyModifiers::NONE, Context::Search),
            Some(Action::ExitSearch)
        );
        assert_eq!(
            reg.action_for_key(KeyCode::Char('l'), KeyModifiers::CONTROL, Context::Search),
            Some(Action::ClearSearch)
        );
        assert_eq!(
            reg.action_for_key(KeyCode::Char('n'), KeyModifiers::NONE, Context::Search),
            None
        );
    }

    #[test]
    fn test_parse_key_string() {
        assert_eq!(parse_key_string("q"), Some(KeySpec::char('q')));
        assert_eq!(parse_key_string("Ctrl+d"), Some(KeySpec::ctrl('d')));
        assert_eq!(parse_key_string("enter"), Some(KeySpec::plain(KeyCode::Enter)));
        assert_eq!(parse_key_string("F5"), Some(KeySpec::plain(KeyCode::F(5))));
        assert_eq!(parse_key_string("PageDown"), Some(KeySpec::plain(KeyCode::PageDown)));
        assert_eq!(parse_key_string("F13"), None);
        assert_eq!(parse_key_string("Ctrl+ab"), None);
        assert_eq!(parse_key_string("nonsense"), None);
    }

    #[test]
    fn test_override_replaces_binding() {
        let mut reg = KeybindingRegistry::new();
        let mut overrides = HashMap::new();
        overrides.insert("quit".to_string(), "Ctrl+q".to_string());

        let warnings = reg.apply_overrides(&overrides);
        assert!(warnings.is_empty());
        assert_eq!(
            reg.action_for_key(KeyCode::Char('q'), KeyModifiers::CONTROL, Context::Global),
            Some(Action::Quit)
        );
        assert_eq!(
            reg.action_for_key(KeyCode::Char('q'), KeyModifiers::NONE, Context::Global),
            None
        );
    }

    #[test]
    fn test_override_keeps_context() {
        let mut reg = KeybindingRegistry::new();
        let mut overrides = HashMap::new();
        overrides.insert("submit_form".to_string(), "Ctrl+s".to_string());
        reg.apply_overrides(&overrides);

        assert_eq!(
            reg.action_for_key(KeyCode::Char('s'), KeyModifiers::CONTROL, Context::Form),
            Some(Action::SubmitForm)
        );
        assert_eq!(
            reg.action_for_key(KeyCode::Char('s'), KeyModifiers::CONTROL, Context::Global),
            None
        );
    }

    #[test]
    fn test_override_warnings() {
        let mut reg = KeybindingRegistry::new();
        let mut overrides = HashMap::new();
        overrides.insert("fly".to_string(), "f".to_string());
        overrides.insert("quit".to_string(), "NotAKey".to_string());
        assert_eq!(reg.apply_overrides(&overrides).len(), 2);
        // Failed override leaves the default in place
        assert_eq!(
            reg.action_for_key(KeyCode::Char('q'), KeyModifiers::NONE, Context::Global),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_all_bindings_lists_descriptions() {
        let reg = KeybindingRegistry::new();
        let all = reg.all_bindings();
        assert!(all
            .iter()
            .any(|(ctx, key, action, _)| *ctx == Context::Global
                && key == "/"
                && *action == Action::EnterSearch));
        assert!(all.iter().all(|(_, _, _, desc)| !desc.is_empty()));
    }
}
