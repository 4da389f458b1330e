use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{InputMode, StatusMessage};
use crate::theme;

pub struct StatusBar;

impl StatusBar {
    pub fn render(frame: &mut Frame, area: Rect, mode: InputMode, message: Option<&StatusMessage>) {
        let theme = theme::current();
        let w = area.width as usize;

        let left = match mode {
            InputMode::Normal => " Calendar ",
            InputMode::Form => " Calendar [New Task] ",
        };

        let (right, right_style) = match message {
            Some(StatusMessage::Warning(msg)) => (format!(" {} ", msg), theme.warning),
            Some(StatusMessage::Info(msg)) => (format!(" {} ", msg), theme.status),
            None => (hints(mode, w).to_string(), theme.status),
        };

        let padding = " ".repeat(w.saturating_sub(left.len() + right.chars().count()));

        let line = Line::from(vec![
            Span::styled(left, theme.status),
            Span::styled(padding, theme.status),
            Span::styled(right, right_style),
        ]);

        frame.render_widget(Paragraph::new(line).style(theme.status), area);
    }
}

fn hints(mode: InputMode, w: usize) -> &'static str {
    match mode {
        InputMode::Form => " Tab:Field \u{2191}\u{2193}:Change Enter:Save Esc:Cancel",
        InputMode::Normal if w >= 70 => " hjkl:Day/Week [/]:Month t:Today n:New ?:Help q:Quit",
        InputMode::Normal if w >= 40 => " [/]:Month n:New ?:Help q:Quit",
        InputMode::Normal => " ?:Help q:Quit",
    }
}
