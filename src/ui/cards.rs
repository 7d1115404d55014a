//! Post card list widget.

use crate::app::App;
use crate::posts::Post;
use crate::util::{strip_control_chars, truncate_to_width, wrap_to_width};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

/// Body lines shown per card before the text is cut.
const MAX_BODY_LINES: usize = 4;

/// Render the current page of posts as stacked cards.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 6 || area.height < 3 {
        return;
    }

    let view = app.view();
    if view.items.is_empty() {
        let msg = if app.store.search_term().trim().is_empty() {
            "No posts. Press n to add one."
        } else {
            "No posts match the search."
        };
        let paragraph = Paragraph::new(msg)
            .style(app.style("card_footer"))
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    }

    let inner_width = area.width.saturating_sub(2) as usize;
    let cards: Vec<(&Post, Vec<Line>)> = view
        .items
        .iter()
        .map(|post| (*post, card_lines(app, post, inner_width)))
        .collect();
    let heights: Vec<u16> = cards
        .iter()
        .map(|(_, lines)| (lines.len() as u16).saturating_add(2))
        .collect();

    let first = first_visible(&heights, app.selected, area.height);
    let bottom = area.y + area.height;
    let mut y = area.y;

    for (idx, ((post, lines), height)) in cards.into_iter().zip(heights).enumerate().skip(first) {
        if y >= bottom {
            break;
        }
        let height = height.min(bottom - y);
        let rect = Rect::new(area.x, y, area.width, height);
        render_card(f, app, post, lines, rect, idx == app.selected);
        y += height;
    }
}

fn render_card(
    f: &mut Frame,
    app: &App,
    post: &Post,
    lines: Vec<Line<'static>>,
    area: Rect,
    selected: bool,
) {
    let border_style = if selected {
        app.style("panel_border_focused")
    } else if post.id % 2 == 0 {
        app.style("card_border_highlight")
    } else {
        app.style("card_border")
    };
    let border_type = if selected {
        BorderType::Thick
    } else {
        BorderType::Rounded
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style);

    let mut paragraph = Paragraph::new(lines).block(block);
    if post.disabled {
        paragraph = paragraph.style(app.style("card_disabled"));
    } else if selected {
        paragraph = paragraph.style(app.style("card_selected"));
    }
    f.render_widget(paragraph, area);
}

/// Title, body (or placeholder) and footer lines for one card.
fn card_lines(app: &App, post: &Post, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let title = strip_control_chars(&post.title);
    lines.push(Line::from(Span::styled(
        truncate_to_width(&title, width).into_owned(),
        app.style("card_title"),
    )));

    if app.store.show_body() {
        let body = strip_control_chars(&post.body);
        if !body.trim().is_empty() {
            let mut wrapped = wrap_to_width(&body, width);
            if wrapped.len() > MAX_BODY_LINES {
                wrapped.truncate(MAX_BODY_LINES);
                if let Some(last) = wrapped.last_mut() {
                    let cut = truncate_to_width(last, width.saturating_sub(3)).into_owned();
                    *last = format!("{}...", cut.trim_end_matches("..."));
                }
            }
            let style = app.style("card_body");
            lines.extend(wrapped.into_iter().map(|l| Line::from(Span::styled(l, style))));
        }
    } else {
        lines.push(Line::from(Span::styled(
            "(body hidden)",
            app.style("card_body_hidden"),
        )));
    }

    lines.push(Line::from(vec![
        Span::styled(format!("Post ID: {}", post.id), app.style("card_footer")),
        Span::raw("  "),
        Span::styled(footer_hints(post), app.style("page_label")),
    ]));

    lines
}

fn footer_hints(post: &Post) -> &'static str {
    if post.disabled {
        "[x] Enable"
    } else {
        "[e]dit [a]dd after [d]elete [x] Disable"
    }
}

/// Index of the first card to draw so the selected card fits in `available` rows.
fn first_visible(heights: &[u16], selected: usize, available: u16) -> usize {
    if heights.is_empty() {
        return 0;
    }
    let selected = selected.min(heights.len() - 1);
    let span = |from: usize| -> u32 {
        heights[from..=selected]
            .iter()
            .map(|h| u32::from(*h))
            .sum()
    };

    let mut first = 0;
    while first < selected && span(first) > u32::from(available) {
        first += 1;
    }
    first
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_visible_keeps_top_when_selection_fits() {
        assert_eq!(first_visible(&[5, 5, 5], 1, 12), 0);
    }

    #[test]
    fn test_first_visible_scrolls_to_selection() {
        assert_eq!(first_visible(&[5, 5, 5, 5], 3, 12), 2);
        assert_eq!(first_visible(&[5, 5, 5, 5], 3, 10), 2);
        assert_eq!(first_visible(&[5, 5, 5, 5], 3, 9), 3);
    }

    #[test]
    fn test_first_visible_edge_cases() {
        assert_eq!(first_visible(&[], 0, 10), 0);
        // Selection past the end is clamped
        assert_eq!(first_visible(&[4, 4], 9, 4), 1);
    }

    #[test]
    fn test_footer_hints() {
        let mut post = Post {
            id: 1,
            title: "t".into(),
            body: String::new(),
            disabled: false,
        };
        assert!(footer_hints(&post).contains("[e]dit"));
        post.disabled = true;
        assert_eq!(footer_hints(&post), "[x] Enable");
    }
}
