//! Render functions for the TUI.
//!
//! This module handles all rendering logic, dispatching on the bootstrap
//! state and drawing overlays on top.

use crate::app::{App, ConfirmAction};
use crate::posts::LoadState;
use crate::util::{strip_control_chars, truncate_to_width};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::helpers::centered_fixed;
use super::{cards, form, help, status};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 40;
pub(super) const MIN_HEIGHT: u16 = 10;

const SPINNER: [&str; super::loop_runner::SPINNER_FRAMES] =
    ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Main render dispatch function.
pub(super) fn render(f: &mut Frame, app: &App) {
    let area = f.area();

    // Guard against zero-width/height to prevent panics
    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    match app.store.load_state() {
        LoadState::Loading => render_loading(f, app, chunks[0]),
        LoadState::Error(message) => render_error(f, app, message, chunks[0]),
        LoadState::Ready => render_board(f, app, chunks[0]),
    }
    status::render(f, app, chunks[1]);

    if let Some(ref form_state) = app.form {
        form::render(f, app, form_state);
    }

    if let Some(ref confirm) = app.pending_confirm {
        render_confirm_overlay(f, app, confirm);
    }

    if app.show_help {
        help::render(f, app);
    }
}

fn render_loading(f: &mut Frame, app: &App, area: Rect) {
    let spinner = SPINNER[app.spinner_frame % SPINNER.len()];
    let text = Line::from(Span::styled(
        format!("{} Loading posts...", spinner),
        app.style("loading"),
    ));
    let y = area.y + area.height / 2;
    let line_area = Rect::new(area.x, y, area.width, 1);
    f.render_widget(Paragraph::new(text).alignment(Alignment::Center), line_area);
}

fn render_error(f: &mut Frame, app: &App, message: &str, area: Rect) {
    let text = vec![
        Line::from(Span::styled(
            format!("Error: {}", strip_control_chars(message)),
            app.style("error"),
        )),
        Line::from(""),
        Line::from(Span::styled("Press q to quit", app.style("page_label"))),
    ];
    let box_area = centered_fixed(area.width.saturating_sub(4), 5, area);
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, box_area);
}

/// Search line, card list and pagination bar.
fn render_board(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    status::render_search(f, app, chunks[0]);
    cards::render(f, app, chunks[1]);
    status::render_pagination(f, app, &app.view(), chunks[2]);
}

/// Render the confirmation dialog overlay centered on screen.
fn render_confirm_overlay(f: &mut Frame, app: &App, confirm: &ConfirmAction) {
    let area = f.area();

    let text = match confirm {
        ConfirmAction::DeletePost { id, title } => {
            let title = strip_control_chars(title);
            format!(
                "Delete post #{} \"{}\"?\n\n(y) Confirm  (n/Esc) Cancel",
                id,
                truncate_to_width(&title, 30)
            )
        }
    };

    let overlay = centered_fixed(
        50u16.min(area.width.saturating_sub(4)),
        6u16.min(area.height.saturating_sub(4)),
        area,
    );
    if overlay.width < 10 || overlay.height < 5 {
        return;
    }

    f.render_widget(Clear, overlay);

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.style("panel_border_focused"))
                .title(" Confirm "),
        )
        .alignment(Alignment::Center)
        .style(app.style("card_body"));

    f.render_widget(paragraph, overlay);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::posts::Post;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn app_with(posts: Vec<Post>) -> App {
        let mut app = App::new(&Config::default()).unwrap();
        app.store.load(posts);
        app
    }

    fn post(id: u64, title: &str, body: &str) -> Post {
        Post {
            id,
            title: title.to_string(),
            body: body.to_string(),
            disabled: false,
        }
    }

    #[test]
    fn test_loading_screen() {
        let mut app = App::new(&Config::default()).unwrap();
        assert!(draw(&mut app, 80, 24).contains("Loading posts..."));
    }

    #[test]
    fn test_error_screen() {
        let mut app = App::new(&Config::default()).unwrap();
        app.store.fail("HTTP error: status 500");
        assert!(draw(&mut app, 80, 24).contains("Error: HTTP error: status 500"));
    }

    #[test]
    fn test_cards_show_title_body_and_id() {
        let mut app = app_with(vec![post(1, "First title", "first body")]);
        let screen = draw(&mut app, 80, 24);
        assert!(screen.contains("First title"));
        assert!(screen.contains("first body"));
        assert!(screen.contains("Post ID: 1"));
        assert!(screen.contains("Showing 1–1 of 1"));
    }

    #[test]
    fn test_hidden_body_placeholder() {
        let mut app = app_with(vec![post(1, "Title", "secret body")]);
        app.store.set_show_body(false);
        let screen = draw(&mut app, 80, 24);
        assert!(screen.contains("(body hidden)"));
        assert!(!screen.contains("secret body"));
    }

    #[test]
    fn test_disabled_card_offers_enable_only() {
        let mut disabled = post(1, "Off", "");
        disabled.disabled = true;
        let mut app = app_with(vec![disabled]);
        let screen = draw(&mut app, 80, 24);
        assert!(screen.contains("[x] Enable"));
        assert!(!screen.contains("[x] Disable"));
    }

    #[test]
    fn test_empty_search_result() {
        let mut app = app_with(vec![post(1, "alpha", "")]);
        app.store.set_search("zzz");
        let screen = draw(&mut app, 80, 24);
        assert!(screen.contains("No posts match the search."));
        assert!(screen.contains("Showing 0–0 of 0"));
    }

    #[test]
    fn test_confirm_overlay() {
        let mut app = app_with(vec![post(1, "Doomed", "")]);
        assert!(app.request_delete());
        assert!(draw(&mut app, 80, 24).contains("Delete post #1"));
    }

    #[test]
    fn test_too_small_terminal() {
        let mut app = App::new(&Config::default()).unwrap();
        let screen = draw(&mut app, 30, 5);
        assert!(screen.contains("Terminal too small"));
        assert!(screen.contains("Current: 30x5"));
    }

    #[test]
    fn test_tiny_terminal_short_message() {
        let mut app = App::new(&Config::default()).unwrap();
        let screen = draw(&mut app, 15, 2);
        assert!(screen.contains("Too small"));
        assert!(!screen.contains("Terminal too small"));
    }
}
