//! Theme system for the TUI.
//!
//! Provides semantic color roles that map to ratatui `Style` values.
//! The `ThemeVariant` enum selects between Dark and Light palettes,
//! and `StyleMap` resolves role names to concrete styles.

use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

// ============================================================================
// Theme Variant
// ============================================================================

/// Available theme variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Dark,
    Light,
}

impl ThemeVariant {
    /// Parse a variant name from a string (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    /// Build the `ColorPalette` for this variant.
    pub fn palette(self) -> ColorPalette {
        match self {
            Self::Dark => ColorPalette::dark(),
            Self::Light => ColorPalette::light(),
        }
    }

    /// Cycle to the next variant: Dark → Light → Dark.
    pub fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Human-readable name for status display.
    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }
}

// ============================================================================
// Color Palette: semantic roles to Style
// ============================================================================

/// A complete color palette mapping every semantic UI role to a `Style`.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    // -- Post cards --
    pub card_title: Style,
    pub card_body: Style,
    pub card_body_hidden: Style,
    pub card_footer: Style,
    pub card_border: Style,
    pub card_border_highlight: Style,
    pub card_selected: Style,
    pub card_disabled: Style,

    // -- Search & pagination --
    pub search_prompt: Style,
    pub search_input: Style,
    pub page_active: Style,
    pub page_inactive: Style,
    pub page_label: Style,

    // -- Forms --
    pub form_label: Style,
    pub form_label_active: Style,
    pub form_input: Style,

    // -- Chrome --
    pub status_bar: Style,
    pub panel_border: Style,
    pub panel_border_focused: Style,
    pub loading: Style,
    pub error: Style,
}

impl ColorPalette {
    fn dark() -> Self {
        Self {
            // Cards
            card_title: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            card_body: Style::default(),
            card_body_hidden: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            card_footer: Style::default().fg(Color::DarkGray),
            card_border: Style::default().fg(Color::Gray),
            card_border_highlight: Style::default().fg(Color::Yellow),
            card_selected: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            card_disabled: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::CROSSED_OUT),

            // Search & pagination
            search_prompt: Style::default().fg(Color::Yellow),
            search_input: Style::default().fg(Color::White),
            page_active: Style::default()
                .bg(Color::Cyan)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            page_inactive: Style::default().fg(Color::Gray),
            page_label: Style::default().fg(Color::DarkGray),

            // Forms
            form_label: Style::default().fg(Color::Gray),
            form_label_active: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            form_input: Style::default(),

            // Chrome
            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
            panel_border: Style::default(),
            panel_border_focused: Style::default().fg(Color::Cyan),
            loading: Style::default().fg(Color::Cyan),
            error: Style::default().fg(Color::Red),
        }
    }

    /// Light palette, adapted for light terminal backgrounds.
    fn light() -> Self {
        Self {
            // Cards
            card_title: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            card_body: Style::default().fg(Color::Black),
            card_body_hidden: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            card_footer: Style::default().fg(Color::DarkGray),
            card_border: Style::default().fg(Color::DarkGray),
            card_border_highlight: Style::default().fg(Color::Magenta),
            card_selected: Style::default().fg(Color::Black).add_modifier(Modifier::BOLD),
            card_disabled: Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::CROSSED_OUT),

            // Search & pagination
            search_prompt: Style::default().fg(Color::Magenta),
            search_input: Style::default().fg(Color::Black),
            page_active: Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            page_inactive: Style::default().fg(Color::DarkGray),
            page_label: Style::default().fg(Color::DarkGray),

            // Forms
            form_label: Style::default().fg(Color::DarkGray),
            form_label_active: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            form_input: Style::default().fg(Color::Black),

            // Chrome
            status_bar: Style::default().bg(Color::White).fg(Color::Black),
            panel_border: Style::default().fg(Color::DarkGray),
            panel_border_focused: Style::default().fg(Color::Blue),
            loading: Style::default().fg(Color::Blue),
            error: Style::default().fg(Color::Red),
        }
    }
}

// ============================================================================
// Style Map: string-keyed lookup
// ============================================================================

/// String-keyed style lookup.
///
/// Built from a `ColorPalette`, this allows resolving role names (e.g.
/// `"card_title"`) to their concrete `Style` at runtime.
#[derive(Debug, Clone)]
pub struct StyleMap {
    map: HashMap<&'static str, Style>,
}

/// All semantic role names, in declaration order.
const ROLE_NAMES: [&str; 21] = [
    "card_title",
    "card_body",
    "card_body_hidden",
    "card_footer",
    "card_border",
    "card_border_highlight",
    "card_selected",
    "card_disabled",
    "search_prompt",
    "search_input",
    "page_active",
    "page_inactive",
    "page_label",
    "form_label",
    "form_label_active",
    "form_input",
    "status_bar",
    "panel_border",
    "panel_border_focused",
    "loading",
    "error",
];

impl StyleMap {
    /// Build a `StyleMap` from a `ColorPalette`.
    pub fn from_palette(p: &ColorPalette) -> Self {
        let styles: [Style; 21] = [
            p.card_title,
            p.card_body,
            p.card_body_hidden,
            p.card_footer,
            p.card_border,
            p.card_border_highlight,
            p.card_selected,
            p.card_disabled,
            p.search_prompt,
            p.search_input,
            p.page_active,
            p.page_inactive,
            p.page_label,
            p.form_label,
            p.form_label_active,
            p.form_input,
            p.status_bar,
            p.panel_border,
            p.panel_border_focused,
            p.loading,
            p.error,
        ];

        let map = ROLE_NAMES.iter().copied().zip(styles).collect();
        Self { map }
    }

    /// Resolve a role name to its `Style`. Returns `Style::default()` for unknown roles.
    pub fn resolve(&self, role: &str) -> Style {
        self.map.get(role).copied().unwrap_or_default()
    }
}

// ============================================================================
// Tests
// ============================================================================
