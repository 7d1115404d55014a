//! Helper functions for UI operations.
//!
//! Background task spawning with panic capture, plus small layout helpers
//! shared by the overlays.

use crate::app::{App, AppEvent};
use crate::posts::bootstrap;
use futures::FutureExt;
use ratatui::layout::Rect;
use std::panic::AssertUnwindSafe;
use tokio::sync::mpsc;

/// Wraps a future to catch panics and convert them to errors.
///
/// Instead of the task silently disappearing, panics are converted to
/// `Err(String)` containing the panic message.
///
/// # Returns
///
/// - `Ok(result)` if the future completes normally
/// - `Err(panic_message)` if the future panics
pub(super) async fn catch_task_panic<F, T>(future: F) -> Result<T, String>
where
    F: std::future::Future<Output = T>,
{
    AssertUnwindSafe(future)
        .catch_unwind()
        .await
        .map_err(|panic| {
            if let Some(s) = panic.downcast_ref::<&'static str>() {
                s.to_string()
            } else if let Some(s) = panic.downcast_ref::<String>() {
                s.clone()
            } else if let Some(e) = panic.downcast_ref::<Box<dyn std::error::Error + Send>>() {
                e.to_string()
            } else {
                format!("Unknown panic: {:?}", (*panic).type_id())
            }
        })
}

/// Spawn the one-time bootstrap fetch.
///
/// The settled result arrives as `AppEvent::PostsLoaded`. A cancelled token
/// means nothing is sent at all. Any previous bootstrap task is aborted.
pub fn spawn_bootstrap(app: &mut App, event_tx: &mpsc::Sender<AppEvent>) {
    if let Some(handle) = app.bootstrap_handle.take() {
        handle.abort();
    }

    let client = app.http_client.clone();
    let endpoint = app.endpoint.clone();
    let timeout = app.request_timeout;
    let token = app.bootstrap_token.clone();
    let tx = event_tx.clone();

    tracing::info!(endpoint = %endpoint, "Starting bootstrap fetch");

    app.bootstrap_handle = Some(tokio::spawn(async move {
        match catch_task_panic(bootstrap::load(&client, &endpoint, timeout, &token)).await {
            Ok(Some(result)) => {
                if let Err(e) = tx.send(AppEvent::PostsLoaded(result)).await {
                    tracing::warn!(error = %e, event = "PostsLoaded", "Channel send failed (receiver dropped)");
                }
            }
            Ok(None) => {}
            Err(panic_msg) => {
                tracing::error!(task = "bootstrap", error = %panic_msg, "Background task panicked");
                let _ = tx
                    .send(AppEvent::TaskPanicked {
                        task: "bootstrap",
                        error: panic_msg,
                    })
                    .await;
            }
        }
    }));
}

/// Create a centered rectangle with the given percentage of the parent area.
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let width = area.width * percent_x / 100;
    let height = area.height * percent_y / 100;
    centered_fixed(width, height, area)
}

/// Center a `width` x `height` box in `area`, shrunk to fit.
pub(super) fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
