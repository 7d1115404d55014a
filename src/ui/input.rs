//! Input handling for the TUI.
//!
//! This module processes keyboard input and dispatches to the appropriate
//! handler based on current mode. Overlays capture all keys while visible.

use crate::app::App;
use crate::keybindings::{Action as KbAction, Context as KbContext};
use crate::posts::PostOp;
use crate::util::MAX_SEARCH_QUERY_LENGTH;
use crossterm::event::{KeyCode, KeyModifiers};

use super::Action;

/// Main input dispatch function.
///
/// Routes input to the appropriate handler based on current mode.
pub(super) fn handle_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Action {
    // Raw mode swallows SIGINT, so Ctrl+C always quits
    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    if app.show_help {
        return handle_help_input(app, code);
    }

    if app.pending_confirm.is_some() {
        return handle_confirm_input(app, code);
    }

    if app.form.is_some() {
        return handle_form_input(app, code, modifiers);
    }

    if !app.is_ready() {
        return handle_startup_input(app, code, modifiers);
    }

    if app.search_mode {
        return handle_search_input(app, code, modifiers);
    }

    handle_browse_input(app, code, modifiers)
}

/// Handle input while the help overlay is visible.
///
/// Captures all keys: j/k/Up/Down scroll, Esc/q/? dismiss.
fn handle_help_input(app: &mut App, code: KeyCode) -> Action {
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            app.show_help = false;
            app.help_scroll_offset = 0;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_sub(1);
        }
        _ => {}
    }
    Action::Continue
}

/// Handle input while the confirmation dialog is visible.
///
/// y/Y confirms the action, n/N/Esc cancels.
fn handle_confirm_input(app: &mut App, code: KeyCode) -> Action {
    match code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_pending(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.pending_confirm = None;
            app.set_status("Cancelled");
        }
        _ => {}
    }
    Action::Continue
}

/// Loading and error screens: only quitting, help and theme work.
fn handle_startup_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Action {
    match app
        .keybindings
        .action_for_key(code, modifiers, KbContext::Global)
    {
        Some(KbAction::Quit) => return Action::Quit,
        Some(KbAction::ShowHelp) => app.show_help = true,
        Some(KbAction::CycleTheme) => {
            let name = app.cycle_theme();
            app.set_status(format!("Theme: {}", name));
        }
        _ => {}
    }
    Action::Continue
}

/// Handle input in the card list.
fn handle_browse_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Action {
    let action = app
        .keybindings
        .action_for_key(code, modifiers, KbContext::Global);

    match action {
        Some(KbAction::Quit) => return Action::Quit,
        Some(KbAction::NavDown) => app.nav_down(),
        Some(KbAction::NavUp) => app.nav_up(),
        Some(KbAction::NextPage) => {
            app.apply(PostOp::NextPage);
        }
        Some(KbAction::PrevPage) => {
            app.apply(PostOp::PrevPage);
        }
        Some(KbAction::FirstPage) => {
            app.apply(PostOp::SetPage(1));
        }
        Some(KbAction::LastPage) => {
            app.apply(PostOp::SetPage(usize::MAX));
        }
        Some(KbAction::EnterSearch) => app.search_mode = true,
        Some(KbAction::ClearSearch) => {
            if app.apply(PostOp::ClearSearch) {
                app.set_status("Search cleared");
            }
        }
        Some(KbAction::ToggleBody) => {
            app.apply(PostOp::ToggleShowBody);
            let state = if app.store.show_body() {
                "shown"
            } else {
                "hidden"
            };
            app.set_status(format!("Post bodies {}", state));
        }
        Some(KbAction::AddNew) => app.open_add_new(),
        Some(KbAction::AddAfter) => {
            if !app.open_add_after() {
                app.set_status("Select an enabled post first");
            }
        }
        Some(KbAction::EditPost) => {
            if !app.open_edit() {
                app.set_status("Select an enabled post first");
            }
        }
        Some(KbAction::DeletePost) => {
            if !app.request_delete() {
                app.set_status("Select an enabled post first");
            }
        }
        Some(KbAction::ToggleDisable) => app.toggle_disable_selected(),
        Some(KbAction::CycleTheme) => {
            let name = app.cycle_theme();
            app.set_status(format!("Theme: {}", name));
        }
        Some(KbAction::ShowHelp) => app.show_help = true,
        _ => {}
    }
    Action::Continue
}

/// Search mode: typed characters edit the term and filter live.
///
/// Esc / Enter leave search mode and keep the term.
fn handle_search_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Action {
    match app
        .keybindings
        .action_for_key(code, modifiers, KbContext::Search)
    {
        Some(KbAction::ExitSearch) => {
            app.search_mode = false;
            return Action::Continue;
        }
        Some(KbAction::ClearSearch) => {
            app.apply(PostOp::ClearSearch);
            return Action::Continue;
        }
        _ => {}
    }

    match code {
        KeyCode::Backspace => {
            let mut term = app.store.search_term().to_string();
            if term.pop().is_some() {
                app.apply(PostOp::SetSearch(term));
            }
        }
        KeyCode::Char(c) if !has_command_modifier(modifiers) => {
            if app.store.search_term().chars().count() >= MAX_SEARCH_QUERY_LENGTH {
                app.set_status(format!(
                    "Search query at max length ({} chars)",
                    MAX_SEARCH_QUERY_LENGTH
                ));
                return Action::Continue;
            }
            let mut term = app.store.search_term().to_string();
            term.push(c);
            app.apply(PostOp::SetSearch(term));
        }
        _ => {}
    }
    Action::Continue
}

/// Post form: typed characters go to the focused field.
fn handle_form_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Action {
    let action = app
        .keybindings
        .action_for_key(code, modifiers, KbContext::Form);

    let Some(form) = app.form.as_mut() else {
        return Action::Continue;
    };

    match action {
        Some(KbAction::SubmitForm) => {
            if let Err(msg) = app.submit_form() {
                app.set_status(msg);
            }
        }
        Some(KbAction::CancelForm) => {
            app.form = None;
            app.set_status("Cancelled");
        }
        Some(KbAction::NextField) => form.next_field(),
        Some(KbAction::ClearForm) => form.clear(),
        _ => match code {
            KeyCode::Backspace => form.pop_char(),
            KeyCode::Char(c) if !has_command_modifier(modifiers) => {
                if !form.push_char(c) {
                    app.set_status("Field at max length");
                }
            }
            _ => {}
        },
    }
    Action::Continue
}

fn has_command_modifier(modifiers: KeyModifiers) -> bool {
    modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}
