use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::calendar::grid::{self, CalendarCell};
use crate::theme;

const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub struct MonthView;

impl MonthView {
    /// Draw the 6x7 grid for `year`/`month`. `cells` comes from `grid::build`.
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        year: i32,
        month: u32,
        cells: &[CalendarCell],
        today: NaiveDate,
        days_with_tasks: &HashSet<u32>,
    ) {
        let theme = theme::current();
        let title = format!(" {} {} ", grid::month_name(month), year);

        let block = Block::default()
            .title(title)
            .title_style(theme.header)
            .borders(Borders::ALL)
            .border_style(theme.border);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let header = Line::from(
            DAY_NAMES
                .iter()
                .map(|d| Span::styled(format!("{:^5}", d), theme.header))
                .collect::<Vec<_>>(),
        );

        let today_day = (today.year() == year && today.month() == month).then(|| today.day());

        let weeks: Vec<Line> = grid::weeks(cells)
            .map(|week| {
                Line::from(
                    week.iter()
                        .map(|cell| render_cell(cell, today_day, days_with_tasks))
                        .collect::<Vec<_>>(),
                )
            })
            .collect();

        let mut constraints = vec![Constraint::Length(1)]; // header
        constraints.extend(weeks.iter().map(|_| Constraint::Length(1)));
        constraints.push(Constraint::Min(0));

        let rows = Layout::vertical(constraints).split(inner);

        frame.render_widget(Paragraph::new(header), rows[0]);
        for (i, week) in weeks.into_iter().enumerate() {
            frame.render_widget(Paragraph::new(week), rows[i + 1]);
        }
    }
}

fn render_cell(
    cell: &CalendarCell,
    today_day: Option<u32>,
    days_with_tasks: &HashSet<u32>,
) -> Span<'static> {
    let theme = theme::current();
    let Some(day) = cell.day() else {
        return Span::raw("     ");
    };
    let selected = cell.is_selected();

    let marker = if days_with_tasks.contains(&day) { '*' } else { ' ' };
    let is_today = today_day == Some(day);

    let style = match (selected, is_today) {
        (true, true) => theme.today.add_modifier(Modifier::BOLD),
        (true, false) => theme.selected,
        (false, true) => theme.today,
        (false, false) if marker == '*' => theme.has_tasks,
        _ => Style::default(),
    };

    Span::styled(format!(" {:>2}{} ", day, marker), style)
}
