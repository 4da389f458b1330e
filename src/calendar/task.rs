use std::fmt;

use ratatui::style::Color;

use crate::theme;

/// A task attached to a calendar day.
///
/// Tasks have no identity beyond their position in the day's list and are
/// never edited once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub name: String,
    /// `#RRGGBB` color tag.
    pub color: String,
    /// Display time such as `2:30 PM`.
    pub time: String,
}

impl TaskItem {
    pub fn new(name: impl Into<String>, color: TaskColor, time: TaskTime) -> Self {
        Self {
            name: name.into(),
            color: color.hex().to_string(),
            time: time.to_string(),
        }
    }

    /// Terminal color for the task's swatch. Unparseable tags render white.
    pub fn swatch(&self) -> Color {
        theme::parse_color(&self.color).unwrap_or(Color::White)
    }
}

/// The fixed palette offered by the add-task form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskColor {
    #[default]
    Red,
    Orange,
    Green,
}

impl TaskColor {
    pub const ALL: [TaskColor; 3] = [TaskColor::Red, TaskColor::Orange, TaskColor::Green];

    pub fn hex(self) -> &'static str {
        match self {
            TaskColor::Red => "#ea4335",
            TaskColor::Orange => "#fa7b17",
            TaskColor::Green => "#34a853",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TaskColor::Red => "Red",
            TaskColor::Orange => "Orange",
            TaskColor::Green => "Green",
        }
    }

    pub fn next(self) -> Self {
        match self {
            TaskColor::Red => TaskColor::Orange,
            TaskColor::Orange => TaskColor::Green,
            TaskColor::Green => TaskColor::Red,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            TaskColor::Red => TaskColor::Green,
            TaskColor::Orange => TaskColor::Red,
            TaskColor::Green => TaskColor::Orange,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    pub fn toggle(self) -> Self {
        match self {
            Meridiem::Am => Meridiem::Pm,
            Meridiem::Pm => Meridiem::Am,
        }
    }
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Meridiem::Am => "AM",
            Meridiem::Pm => "PM",
        })
    }
}

/// Minutes selectable in the add-task form.
pub const MINUTE_STEPS: [u8; 4] = [0, 15, 30, 45];

/// A quarter-hour time of day on a 12-hour clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskTime {
    hour: u8,
    minute: u8,
    meridiem: Meridiem,
}

impl Default for TaskTime {
    /// 12:00 PM
    fn default() -> Self {
        Self {
            hour: 12,
            minute: 0,
            meridiem: Meridiem::Pm,
        }
    }
}

impl TaskTime {
    /// Returns `None` unless `hour` is 1..=12 and `minute` is a quarter hour.
    #[cfg(test)]
    pub fn new(hour: u8, minute: u8, meridiem: Meridiem) -> Option<Self> {
        if !(1..=12).contains(&hour) || !MINUTE_STEPS.contains(&minute) {
            return None;
        }
        Some(Self {
            hour,
            minute,
            meridiem,
        })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn meridiem(&self) -> Meridiem {
        self.meridiem
    }

    pub fn next_hour(&mut self) {
        self.hour = self.hour % 12 + 1;
    }

    pub fn prev_hour(&mut self) {
        self.hour = if self.hour == 1 { 12 } else { self.hour - 1 };
    }

    pub fn next_minute(&mut self) {
        self.minute = step_minute(self.minute, 1);
    }

    pub fn prev_minute(&mut self) {
        self.minute = step_minute(self.minute, MINUTE_STEPS.len() - 1);
    }

    pub fn toggle_meridiem(&mut self) {
        self.meridiem = self.meridiem.toggle();
    }
}

fn step_minute(minute: u8, by: usize) -> u8 {
    let idx = MINUTE_STEPS.iter().position(|m| *m == minute).unwrap_or(0);
    MINUTE_STEPS[(idx + by) % MINUTE_STEPS.len()]
}

impl fmt::Display for TaskTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02} {}", self.hour, self.minute, self.meridiem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_time_display_has_unpadded_hour() {
        let t = TaskTime::new(2, 30, Meridiem::Pm).unwrap();
        assert_eq!(t.to_string(), "2:30 PM");
        assert_eq!(TaskTime::default().to_string(), "12:00 PM");
    }

    #[test]
    fn test_time_rejects_out_of_range() {
        assert_eq!(TaskTime::new(0, 0, Meridiem::Am), None);
        assert_eq!(TaskTime::new(13, 0, Meridiem::Am), None);
        assert_eq!(TaskTime::new(9, 10, Meridiem::Am), None);
    }

    #[test]
    fn test_hour_wraps_both_ways() {
        let mut t = TaskTime::default();
        t.next_hour();
        assert_eq!(t.hour(), 1);
        t.prev_hour();
        t.prev_hour();
        assert_eq!(t.hour(), 11);
    }

    #[test]
    fn test_minute_cycles_quarter_hours() {
        let mut t = TaskTime::default();
        t.prev_minute();
        assert_eq!(t.minute(), 45);
        t.next_minute();
        t.next_minute();
        assert_eq!(t.minute(), 15);
    }

    #[test]
    fn test_item_from_palette() {
        let item = TaskItem::new("Dentist", TaskColor::Red, TaskTime::default());
        assert_eq!(item.color, "#ea4335");
        assert_eq!(item.time, "12:00 PM");
        assert_eq!(item.swatch(), Color::Rgb(0xea, 0x43, 0x35));
    }

    #[test]
    fn test_color_cycle_covers_palette() {
        let mut c = TaskColor::default();
        for expected in TaskColor::ALL {
            assert_eq!(c, expected);
            c = c.next();
        }
        assert_eq!(c, TaskColor::Red);
        assert_eq!(TaskColor::Red.prev(), TaskColor::Green);
    }
}
