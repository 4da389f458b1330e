use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::calendar::store::SEPARATOR;
use crate::calendar::{DateKey, TaskColor, TaskItem, TaskTime};
use crate::theme;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormField {
    Name,
    Hour,
    Minute,
    Meridiem,
    Color,
}

impl FormField {
    pub fn next(&self) -> Self {
        match self {
            FormField::Name => FormField::Hour,
            FormField::Hour => FormField::Minute,
            FormField::Minute => FormField::Meridiem,
            FormField::Meridiem => FormField::Color,
            FormField::Color => FormField::Name,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            FormField::Name => FormField::Color,
            FormField::Hour => FormField::Name,
            FormField::Minute => FormField::Hour,
            FormField::Meridiem => FormField::Minute,
            FormField::Color => FormField::Meridiem,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Task name is empty")]
    BlankName,
    #[error("Task name cannot contain '|'")]
    SeparatorInName,
}

/// Add-task dialog state. A fresh form is 12:00 PM, red, no name.
#[derive(Debug, Clone)]
pub struct TaskFormState {
    pub date: DateKey,
    pub name: String,
    pub time: TaskTime,
    pub color: TaskColor,
    pub active_field: FormField,
}

impl TaskFormState {
    pub fn new(date: DateKey) -> Self {
        Self {
            date,
            name: String::new(),
            time: TaskTime::default(),
            color: TaskColor::default(),
            active_field: FormField::Name,
        }
    }

    pub fn input_char(&mut self, c: char) {
        match self.active_field {
            FormField::Name => self.name.push(c),
            // Space cycles selectors, as Down does.
            _ if c == ' ' => self.next_value(),
            _ => {}
        }
    }

    pub fn backspace(&mut self) {
        if self.active_field == FormField::Name {
            self.name.pop();
        }
    }

    pub fn next_value(&mut self) {
        match self.active_field {
            FormField::Name => {}
            FormField::Hour => self.time.next_hour(),
            FormField::Minute => self.time.next_minute(),
            FormField::Meridiem => self.time.toggle_meridiem(),
            FormField::Color => self.color = self.color.next(),
        }
    }

    pub fn prev_value(&mut self) {
        match self.active_field {
            FormField::Name => {}
            FormField::Hour => self.time.prev_hour(),
            FormField::Minute => self.time.prev_minute(),
            FormField::Meridiem => self.time.toggle_meridiem(),
            FormField::Color => self.color = self.color.prev(),
        }
    }

    /// Build the task, trimming the name.
    pub fn to_task(&self) -> Result<TaskItem, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::BlankName);
        }
        if name.contains(SEPARATOR) {
            return Err(FormError::SeparatorInName);
        }
        Ok(TaskItem::new(name, self.color, self.time))
    }
}

pub struct TaskForm;

impl TaskForm {
    pub fn render(frame: &mut Frame, area: Rect, state: &TaskFormState) {
        let form_w = area.width.min(50).max(30);
        let form_h = area.height.min(11).max(9);
        let x = area.x + (area.width.saturating_sub(form_w)) / 2;
        let y = area.y + (area.height.saturating_sub(form_h)) / 2;
        let form_area = Rect::new(x, y, form_w, form_h);

        frame.render_widget(Clear, form_area);

        let title = format!(" New Task · {} ", state.date);
        let block = Block::default()
            .title(title)
            .title_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green));

        let inner = block.inner(form_area);
        frame.render_widget(block, form_area);

        let rows = Layout::vertical([
            Constraint::Length(1), // name
            Constraint::Length(1), // hour
            Constraint::Length(1), // minute
            Constraint::Length(1), // am/pm
            Constraint::Length(1), // color
            Constraint::Length(1),
            Constraint::Length(1), // help
            Constraint::Min(0),
        ])
        .split(inner);

        let active = state.active_field;
        render_field(frame, rows[0], "Name:", &state.name, active == FormField::Name, true);
        render_field(
            frame,
            rows[1],
            "Hour:",
            &format!("{:02}", state.time.hour()),
            active == FormField::Hour,
            false,
        );
        render_field(
            frame,
            rows[2],
            "Min:",
            &format!("{:02}", state.time.minute()),
            active == FormField::Minute,
            false,
        );
        render_field(
            frame,
            rows[3],
            "AM/PM:",
            &state.time.meridiem().to_string(),
            active == FormField::Meridiem,
            false,
        );
        render_color_picker(frame, rows[4], state.color, active == FormField::Color);

        let dim = theme::current().dim;
        let help = Line::from(vec![
            Span::styled("Tab", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Next ", dim),
            Span::styled("\u{2191}\u{2193}", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Change ", dim),
            Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Save ", dim),
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Cancel", dim),
        ]);
        frame.render_widget(Paragraph::new(help), rows[6]);
    }
}

fn render_field(frame: &mut Frame, area: Rect, label: &str, value: &str, active: bool, text: bool) {
    let style = if active {
        theme::current().active_field
    } else {
        Style::default()
    };
    let value = match (active, text) {
        (true, true) => format!("{}_", value),
        (true, false) => format!("\u{25c2} {} \u{25b8}", value),
        (false, _) => value.to_string(),
    };

    let line = Line::from(vec![
        Span::styled(format!("{:<7}", label), theme::current().dim),
        Span::styled(value, style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_color_picker(frame: &mut Frame, area: Rect, chosen: TaskColor, active: bool) {
    let mut spans = vec![Span::styled(format!("{:<7}", "Color:"), theme::current().dim)];
    for color in TaskColor::ALL {
        let swatch = theme::parse_color(color.hex()).unwrap_or(Color::White);
        let marker = if color == chosen { "[\u{25cf}]" } else { " \u{25cf} " };
        let mut style = Style::default().fg(swatch);
        if color == chosen && active {
            style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
        }
        spans.push(Span::styled(marker, style));
    }
    spans.push(Span::styled(format!(" {}", chosen.label()), theme::current().dim));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
