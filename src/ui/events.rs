//! Background task event handling.
//!
//! Processes `AppEvent`s from spawned tasks on the UI task, so all store
//! mutations happen in one place.

use crate::app::{App, AppEvent};
use crate::posts::{bootstrap, LoadState};

/// Apply one background event to the app state.
pub fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::PostsLoaded(result) => {
            app.bootstrap_handle = None;
            if !bootstrap::settle(&mut app.store, &app.bootstrap_token, result) {
                return;
            }
            app.selected = 0;
            app.clamp_selection();
            if app.is_ready() {
                app.set_status(format!("Loaded {} posts", app.store.len()));
            }
        }
        AppEvent::TaskPanicked { task, error } => {
            tracing::error!(task, error = %error, "Background task panicked");
            if task == "bootstrap"
                && !app.bootstrap_token.is_cancelled()
                && matches!(app.store.load_state(), LoadState::Loading)
            {
                app.bootstrap_handle = None;
                app.store.fail(format!("Loading posts crashed: {}", error));
            } else {
                app.set_status(format!("Internal error in {}: {}", task, error));
            }
        }
    }
    app.needs_redraw = true;
}
