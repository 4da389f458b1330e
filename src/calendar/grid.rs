use chrono::{Datelike, NaiveDate};

/// Cells in a month grid: six weeks of seven days.
pub const GRID_CELLS: usize = 42;
pub const WEEK_LEN: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarCell {
    Empty,
    Day { day: u32, selected: bool },
}

impl CalendarCell {
    pub fn day(&self) -> Option<u32> {
        match self {
            CalendarCell::Empty => None,
            CalendarCell::Day { day, .. } => Some(*day),
        }
    }

    pub fn is_selected(&self) -> bool {
        matches!(self, CalendarCell::Day { selected: true, .. })
    }
}

/// Lay out `month` of `year` as 42 cells, weeks starting on Sunday.
///
/// `selected_day` marks at most one cell; a day outside the month marks none.
/// An invalid month produces a grid of empty cells.
pub fn build(year: i32, month: u32, selected_day: u32) -> Vec<CalendarCell> {
    let mut cells = Vec::with_capacity(GRID_CELLS);

    if let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) {
        let start_offset = first.weekday().num_days_from_sunday() as usize;
        cells.extend(std::iter::repeat(CalendarCell::Empty).take(start_offset));
        cells.extend((1..=days_in_month(year, month)).map(|day| CalendarCell::Day {
            day,
            selected: day == selected_day,
        }));
    }

    cells.resize(GRID_CELLS, CalendarCell::Empty);
    cells
}

/// Split a grid into rows of seven cells.
pub fn weeks(cells: &[CalendarCell]) -> impl Iterator<Item = &[CalendarCell]> {
    cells.chunks(WEEK_LEN)
}

/// Number of days in `month`, 0 if the month is out of range.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    match (
        NaiveDate::from_ymd_opt(year, month, 1),
        NaiveDate::from_ymd_opt(next_year, next_month, 1),
    ) {
        (Some(first), Some(next)) => next.signed_duration_since(first).num_days() as u32,
        _ => 0,
    }
}

pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn day_count(cells: &[CalendarCell]) -> usize {
        cells.iter().filter(|c| c.day().is_some()).count()
    }

    fn selected_count(cells: &[CalendarCell]) -> usize {
        cells.iter().filter(|c| c.is_selected()).count()
    }

    #[test]
    fn test_february_2024_layout() {
        let cells = build(2024, 2, 15);
        assert_eq!(cells.len(), GRID_CELLS);

        assert!(cells[..4].iter().all(|c| *c == CalendarCell::Empty));
        for (i, cell) in cells[4..33].iter().enumerate() {
            let day = i as u32 + 1;
            assert_eq!(*cell, CalendarCell::Day { day, selected: day == 15 });
        }
        assert!(cells[33..].iter().all(|c| *c == CalendarCell::Empty));
        assert_eq!(cells[33..].len(), 9);
    }

    #[test]
    fn test_every_month_fills_grid() {
        for year in [1900, 2000, 2023, 2024, 2100] {
            for month in 1..=12 {
                let dim = days_in_month(year, month);
                let cells = build(year, month, 1);
                assert_eq!(cells.len(), GRID_CELLS, "{year}-{month}");
                assert_eq!(day_count(&cells), dim as usize, "{year}-{month}");
            }
        }
    }

    #[test]
    fn test_six_row_month() {
        // March 2025 starts on Saturday and has 31 days.
        let cells = build(2025, 3, 31);
        assert_eq!(cells[6], CalendarCell::Day { day: 1, selected: false });
        assert_eq!(cells[36], CalendarCell::Day { day: 31, selected: true });
        assert_eq!(cells.len(), GRID_CELLS);
    }

    #[test]
    fn test_month_starting_sunday_has_no_leading_blanks() {
        // September 2024 starts on Sunday.
        let cells = build(2024, 9, 1);
        assert_eq!(cells[0], CalendarCell::Day { day: 1, selected: true });
    }

    #[test]
    fn test_selection_only_inside_month() {
        assert_eq!(selected_count(&build(2024, 2, 29)), 1);
        assert_eq!(selected_count(&build(2023, 2, 29)), 0);
        assert_eq!(selected_count(&build(2024, 4, 0)), 0);
        assert_eq!(selected_count(&build(2024, 4, 31)), 0);
    }

    #[test]
    fn test_invalid_month_is_blank() {
        let cells = build(2024, 13, 1);
        assert_eq!(cells.len(), GRID_CELLS);
        assert_eq!(day_count(&cells), 0);
    }

    #[test]
    fn test_days_in_month_leap_rules() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2024, 12), 31);
        assert_eq!(days_in_month(2024, 0), 0);
    }

    #[test]
    fn test_weeks_are_six_rows_of_seven() {
        let cells = build(2024, 2, 1);
        let rows: Vec<_> = weeks(&cells).collect();
        assert_eq!(rows.len(), 6);
        assert!(rows.iter().all(|r| r.len() == WEEK_LEN));
    }
}
