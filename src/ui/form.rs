//! Post form overlay (add new, add after, edit).

use crate::app::{App, FormField, FormState};
use crate::util::{display_width, MAX_BODY_LENGTH, MAX_TITLE_LENGTH};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::helpers::centered_fixed;

const FORM_WIDTH: u16 = 70;
const FORM_HEIGHT: u16 = 14;

pub fn render(f: &mut Frame, app: &App, form: &FormState) {
    let overlay = centered_fixed(FORM_WIDTH, FORM_HEIGHT, f.area());
    if overlay.width < 20 || overlay.height < 8 {
        return;
    }

    f.render_widget(Clear, overlay);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.style("panel_border_focused"))
        .title(form.heading());
    let inner = block.inner(overlay);
    f.render_widget(block, overlay);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title label
            Constraint::Length(1), // title input
            Constraint::Length(1), // spacer
            Constraint::Length(1), // body label
            Constraint::Min(1),    // body input
            Constraint::Length(1), // hints
        ])
        .split(inner);

    let title_active = form.focus == FormField::Title;
    render_label(
        f,
        app,
        chunks[0],
        "Title",
        form.title.chars().count(),
        MAX_TITLE_LENGTH,
        title_active,
    );
    render_input(f, app, chunks[1], &form.title, title_active, false);
    render_label(
        f,
        app,
        chunks[3],
        "Body",
        form.body.chars().count(),
        MAX_BODY_LENGTH,
        !title_active,
    );
    render_input(f, app, chunks[4], &form.body, !title_active, true);

    let hints = Paragraph::new("Tab switch field | Enter save | Esc cancel | Ctrl+L clear")
        .style(app.style("page_label"));
    f.render_widget(hints, chunks[5]);
}

#[allow(clippy::too_many_arguments)]
fn render_label(
    f: &mut Frame,
    app: &App,
    area: Rect,
    name: &str,
    len: usize,
    max: usize,
    active: bool,
) {
    let style = if active {
        app.style("form_label_active")
    } else {
        app.style("form_label")
    };
    let line = Line::from(vec![
        Span::styled(format!("{}{}", if active { "> " } else { "  " }, name), style),
        Span::styled(format!("  {}/{}", len, max), app.style("page_label")),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

/// Draw a field's text with a trailing cursor when focused.
///
/// Single-line fields show their tail so the cursor stays visible.
fn render_input(f: &mut Frame, app: &App, area: Rect, text: &str, active: bool, multiline: bool) {
    let mut shown = format!("  {}", text);
    if active {
        shown.push('_');
    }

    let width = area.width as usize;
    if !multiline && display_width(&shown) > width {
        let mut chars: Vec<char> = shown.chars().collect();
        while !chars.is_empty() && display_width(&chars.iter().collect::<String>()) > width {
            chars.remove(0);
        }
        shown = chars.into_iter().collect();
    }

    let mut paragraph = Paragraph::new(shown).style(app.style("form_input"));
    if multiline {
        paragraph = paragraph.wrap(Wrap { trim: false });
    }
    f.render_widget(paragraph, area);
}
