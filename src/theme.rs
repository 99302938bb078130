//! Theme system for the TUI.
//!
//! Semantic color roles map to ratatui `Style` values. `ThemeVariant`
//! selects between Dark and Light palettes, and `StyleMap` resolves role
//! names to concrete styles.

use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

// ============================================================================
// Theme Variant
// ============================================================================

/// Available theme variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeVariant {
    #[default]
    Dark,
    Light,
}

impl ThemeVariant {
    /// Parse a variant name from a string (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
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

    /// Dark → Light → Dark.
    pub fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }
}

// ============================================================================
// Color Palette
// ============================================================================

/// One `Style` per semantic UI role.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    // -- Quote panel --
    pub quote_text: Style,
    pub quote_category: Style,
    pub quote_empty: Style,

    // -- Category list --
    pub category_normal: Style,
    pub category_selected: Style,
    pub category_active: Style,

    // -- Add form / prompts --
    pub form_label: Style,
    pub form_input: Style,
    pub form_input_focused: Style,

    // -- Chrome --
    pub status_bar: Style,
    pub status_sync: Style,
    pub panel_border: Style,
    pub panel_border_focused: Style,
    pub help_heading: Style,
    pub error: Style,
}

impl ColorPalette {
    fn dark() -> Self {
        Self {
            quote_text: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::ITALIC),
            quote_category: Style::default().fg(Color::Cyan),
            quote_empty: Style::default().fg(Color::DarkGray),

            category_normal: Style::default(),
            category_selected: Style::default().bg(Color::DarkGray).fg(Color::White),
            category_active: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),

            form_label: Style::default().add_modifier(Modifier::BOLD),
            form_input: Style::default().fg(Color::Gray),
            form_input_focused: Style::default().fg(Color::Yellow),

            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
            status_sync: Style::default().bg(Color::DarkGray).fg(Color::Green),
            panel_border: Style::default(),
            panel_border_focused: Style::default().fg(Color::Cyan),
            help_heading: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            error: Style::default().fg(Color::Red),
        }
    }

    fn light() -> Self {
        Self {
            quote_text: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::ITALIC),
            quote_category: Style::default().fg(Color::Blue),
            quote_empty: Style::default().fg(Color::DarkGray),

            category_normal: Style::default().fg(Color::Black),
            category_selected: Style::default().bg(Color::Blue).fg(Color::White),
            category_active: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),

            form_label: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            form_input: Style::default().fg(Color::DarkGray),
            form_input_focused: Style::default().fg(Color::Magenta),

            status_bar: Style::default().bg(Color::White).fg(Color::Black),
            status_sync: Style::default().bg(Color::White).fg(Color::Green),
            panel_border: Style::default().fg(Color::DarkGray),
            panel_border_focused: Style::default().fg(Color::Blue),
            help_heading: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            error: Style::default().fg(Color::Red),
        }
    }
}

// ============================================================================
// Style Map
// ============================================================================

/// String-keyed style lookup, built from a `ColorPalette`.
#[derive(Debug, Clone)]
pub struct StyleMap {
    map: HashMap<&'static str, Style>,
}

/// All semantic role names, in declaration order.
const ROLE_NAMES: [&str; 15] = [
    "quote_text",
    "quote_category",
    "quote_empty",
    "category_normal",
    "category_selected",
    "category_active",
    "form_label",
    "form_input",
    "form_input_focused",
    "status_bar",
    "status_sync",
    "panel_border",
    "panel_border_focused",
    "help_heading",
    "error",
];

impl StyleMap {
    pub fn from_palette(p: &ColorPalette) -> Self {
        let styles: [Style; 15] = [
            p.quote_text,
            p.quote_category,
            p.quote_empty,
            p.category_normal,
            p.category_selected,
            p.category_active,
            p.form_label,
            p.form_input,
            p.form_input_focused,
            p.status_bar,
            p.status_sync,
            p.panel_border,
            p.panel_border_focused,
            p.help_heading,
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

impl Default for StyleMap {
    fn default() -> Self {
        Self::from_palette(&ThemeVariant::default().palette())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_palette_selection_colors() {
        let palette = ThemeVariant::Dark.palette();
        assert_eq!(
            palette.category_selected,
            Style::default().bg(Color::DarkGray).fg(Color::White)
        );
        assert_eq!(
            palette.panel_border_focused,
            Style::default().fg(Color::Cyan)
        );
    }

    #[test]
    fn light_palette_differs_from_dark() {
        let dark = ThemeVariant::Dark.palette();
        let light = ThemeVariant::Light.palette();
        assert_ne!(dark.category_selected, light.category_selected);
        assert_ne!(dark.quote_text, light.quote_text);
    }

    #[test]
    fn variant_from_str_name() {
        assert_eq!(
            ThemeVariant::from_str_name("dark"),
            Some(ThemeVariant::Dark)
        );
        assert_eq!(
            ThemeVariant::from_str_name("Light"),
            Some(ThemeVariant::Light)
        );
        assert_eq!(ThemeVariant::from_str_name("neon"), None);
    }

    #[test]
    fn variant_cycles() {
        assert_eq!(ThemeVariant::Dark.next(), ThemeVariant::Light);
        assert_eq!(ThemeVariant::Dark.next().next(), ThemeVariant::Dark);
    }

    #[test]
    fn style_map_resolves_known_roles() {
        let palette = ThemeVariant::Dark.palette();
        let sm = StyleMap::from_palette(&palette);

        assert_eq!(sm.resolve("quote_text"), palette.quote_text);
        assert_eq!(sm.resolve("status_bar"), palette.status_bar);
        assert_eq!(sm.resolve("error"), palette.error);
    }

    #[test]
    fn style_map_returns_default_for_unknown() {
        let sm = StyleMap::default();
        assert_eq!(sm.resolve("nonexistent_role"), Style::default());
    }

    #[test]
    fn style_map_has_all_roles() {
        let sm = StyleMap::default();
        assert_eq!(sm.map.len(), ROLE_NAMES.len());
        for name in ROLE_NAMES {
            assert!(sm.map.contains_key(name), "Role '{}' missing", name);
        }
    }
}
