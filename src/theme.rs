use std::sync::OnceLock;

use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Install the theme built from the user's config. Only the first call wins.
pub fn init(config: ThemeConfig) {
    let _ = THEME.set(config.into_theme());
}

/// Get the active theme, falling back to the default if `init` never ran.
pub fn current() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub today: Style,
    pub selected: Style,
    pub header: Style,
    pub dim: Style,
    pub border: Style,
    pub status: Style,
    pub warning: Style,
    pub has_tasks: Style,
    pub active_field: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            today: Style::default().fg(Color::Black).bg(Color::Yellow),
            selected: Style::default().fg(Color::Black).bg(Color::Cyan),
            header: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::DarkGray),
            border: Style::default().fg(Color::Gray),
            status: Style::default().fg(Color::White).bg(Color::DarkGray),
            warning: Style::default().fg(Color::Black).bg(Color::LightRed),
            has_tasks: Style::default().fg(Color::Green),
            active_field: Style::default().fg(Color::Cyan),
        }
    }
}

impl Theme {
    /// Built-in preset by name; unknown names give the default theme.
    pub fn preset(name: &str) -> Self {
        match name {
            "dracula" => Self::with_palette(Palette {
                today: Color::Rgb(189, 147, 249),
                selected: Color::Rgb(139, 233, 253),
                fg: Color::Rgb(248, 248, 242),
                dim: Color::Rgb(98, 114, 164),
                surface: Color::Rgb(68, 71, 90),
                accent: Color::Rgb(80, 250, 123),
            }),
            "gruvbox" => Self::with_palette(Palette {
                today: Color::Rgb(250, 189, 47),
                selected: Color::Rgb(131, 165, 152),
                fg: Color::Rgb(235, 219, 178),
                dim: Color::Rgb(146, 131, 116),
                surface: Color::Rgb(80, 73, 69),
                accent: Color::Rgb(184, 187, 38),
            }),
            "nord" => Self::with_palette(Palette {
                today: Color::Rgb(235, 203, 139),
                selected: Color::Rgb(136, 192, 208),
                fg: Color::Rgb(229, 233, 240),
                dim: Color::Rgb(76, 86, 106),
                surface: Color::Rgb(67, 76, 94),
                accent: Color::Rgb(163, 190, 140),
            }),
            _ => Self::default(),
        }
    }

    fn with_palette(p: Palette) -> Self {
        Self {
            today: Style::default().fg(Color::Black).bg(p.today),
            selected: Style::default().fg(Color::Black).bg(p.selected),
            header: Style::default().fg(p.fg).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(p.dim),
            border: Style::default().fg(p.surface),
            status: Style::default().fg(p.fg).bg(p.surface),
            has_tasks: Style::default().fg(p.accent),
            active_field: Style::default().fg(p.selected),
            ..Self::default()
        }
    }
}

struct Palette {
    today: Color,
    selected: Color,
    fg: Color,
    dim: Color,
    surface: Color,
    accent: Color,
}

/// The `[theme]` table of the config file.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ThemeConfig {
    pub preset: Option<String>,
    pub today_fg: Option<String>,
    pub today_bg: Option<String>,
    pub selected_fg: Option<String>,
    pub selected_bg: Option<String>,
    pub header_fg: Option<String>,
    pub dim_fg: Option<String>,
    pub border_fg: Option<String>,
    pub status_fg: Option<String>,
    pub status_bg: Option<String>,
}

impl ThemeConfig {
    fn into_theme(self) -> Theme {
        let mut theme = self
            .preset
            .as_deref()
            .map(Theme::preset)
            .unwrap_or_default();

        let color = |s: &Option<String>| s.as_deref().and_then(parse_color);
        if let Some(c) = color(&self.today_fg) {
            theme.today = theme.today.fg(c);
        }
        if let Some(c) = color(&self.today_bg) {
            theme.today = theme.today.bg(c);
        }
        if let Some(c) = color(&self.selected_fg) {
            theme.selected = theme.selected.fg(c);
        }
        if let Some(c) = color(&self.selected_bg) {
            theme.selected = theme.selected.bg(c);
        }
        if let Some(c) = color(&self.header_fg) {
            theme.header = theme.header.fg(c);
        }
        if let Some(c) = color(&self.dim_fg) {
            theme.dim = theme.dim.fg(c);
        }
        if let Some(c) = color(&self.border_fg) {
            theme.border = theme.border.fg(c);
        }
        if let Some(c) = color(&self.status_fg) {
            theme.status = theme.status.fg(c);
        }
        if let Some(c) = color(&self.status_bg) {
            theme.status = theme.status.bg(c);
        }

        theme
    }
}

/// Parse a color string: hex "#rrggbb", or a basic named color.
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        return Some(Color::Rgb(r, g, b));
    }
    match s.to_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "gray" | "grey" => Some(Color::Gray),
        "darkgray" | "darkgrey" => Some(Color::DarkGray),
        _ => None,
    }
}
