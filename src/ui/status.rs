use crate::app::App;
use crate::posts::PageView;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::borrow::Cow;
use std::ops::RangeInclusive;

/// Most page numbers shown at once in the pagination bar.
const MAX_PAGE_BUTTONS: usize = 7;

/// Render the status bar
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let text: Cow<'_, str> = if let Some((msg, _)) = &app.status_message {
        Cow::Borrowed(msg.as_ref())
    } else if app.form.is_some() {
        Cow::Borrowed("Tab switch field | Enter save | Esc cancel | Ctrl+L clear")
    } else if app.pending_confirm.is_some() {
        Cow::Borrowed("y confirm | n cancel")
    } else if app.search_mode {
        Cow::Borrowed("Type to filter | Esc/Enter done | Ctrl+L clear")
    } else if app.is_ready() {
        Cow::Borrowed("[n]ew [a]fter [e]dit [d]elete [x]disable [/]search [b]ody [h/l]page [?]help [q]uit")
    } else {
        Cow::Borrowed("[q]uit [?]help")
    };

    let paragraph = Paragraph::new(text).style(app.style("status_bar"));
    f.render_widget(paragraph, area);
}

/// Render the search line above the cards.
pub fn render_search(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let term = app.store.search_term();
    let line = if app.search_mode {
        Line::from(vec![
            Span::styled("Search: ", app.style("search_prompt")),
            Span::styled(format!("{}_", term), app.style("search_input")),
        ])
    } else if !term.is_empty() {
        Line::from(vec![
            Span::styled("Filter: ", app.style("search_prompt")),
            Span::styled(term.to_string(), app.style("search_input")),
            Span::styled("  (c to clear)", app.style("page_label")),
        ])
    } else {
        Line::from(Span::styled("/ to search titles", app.style("page_label")))
    };

    f.render_widget(Paragraph::new(line), area);
}

/// Render Prev, numbered pages, Next and the range label.
pub fn render_pagination(f: &mut Frame, app: &App, view: &PageView<'_>, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }
    f.render_widget(Paragraph::new(pagination_line(app, view)), area);
}

fn pagination_line(app: &App, view: &PageView<'_>) -> Line<'static> {
    let active = app.style("page_active");
    let inactive = app.style("page_inactive");
    let label = app.style("page_label");
    let nav_style = |enabled: bool| if enabled { inactive } else { label };

    let mut spans = vec![Span::styled("< Prev ", nav_style(view.has_prev()))];
    for page in page_window(view.current_page, view.total_pages, MAX_PAGE_BUTTONS) {
        let style = if page == view.current_page {
            active
        } else {
            inactive
        };
        spans.push(Span::styled(format!(" {} ", page), style));
    }
    spans.push(Span::styled(" Next >", nav_style(view.has_next())));
    spans.push(Span::styled(format!("   {}", view.range_label()), label));
    Line::from(spans)
}

/// Page numbers to show: at most `max`, centered on `current` where possible.
fn page_window(current: usize, total_pages: usize, max: usize) -> RangeInclusive<usize> {
    let total_pages = total_pages.max(1);
    let max = max.max(1);
    if total_pages <= max {
        return 1..=total_pages;
    }
    let half = max / 2;
    let start = current
        .saturating_sub(half)
        .clamp(1, total_pages - max + 1);
    start..=start + max - 1
}
