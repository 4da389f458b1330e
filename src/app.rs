use std::collections::HashSet;
use std::path::PathBuf;

use chrono::{Datelike, Local, NaiveDate};
use tracing::{info, warn};

use crate::calendar::grid::{self, CalendarCell};
use crate::calendar::store;
use crate::calendar::{DateKey, TaskItem, TaskStore};
use crate::components::task_form::{FormError, TaskFormState};
use crate::event::Action;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    Form,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatusMessage {
    Info(String),
    Warning(String),
}

/// Everything the UI needs between frames. The visible month and the
/// selected day always form a valid date.
pub struct App {
    pub running: bool,
    pub input_mode: InputMode,
    pub year: i32,
    pub month: u32,
    pub selected_day: u32,
    pub today: NaiveDate,
    pub form_state: Option<TaskFormState>,
    pub status_message: Option<StatusMessage>,
    pub show_help: bool,
    pub task_scroll: usize,
    store: TaskStore,
    tasks_path: PathBuf,
}

impl App {
    /// Load tasks from `tasks_path` and select `today`. A load failure
    /// leaves the store empty and shows a warning.
    pub fn new(tasks_path: PathBuf, today: NaiveDate) -> Self {
        let (store, warning) = store::load_or_empty(&tasks_path);
        Self {
            running: true,
            input_mode: InputMode::Normal,
            year: today.year(),
            month: today.month(),
            selected_day: today.day(),
            today,
            form_state: None,
            status_message: warning.map(StatusMessage::Warning),
            show_help: false,
            task_scroll: 0,
            store,
            tasks_path,
        }
    }

    pub fn selected_key(&self) -> DateKey {
        DateKey {
            year: self.year,
            month: self.month,
            day: self.selected_day,
        }
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_key().to_date()
    }

    pub fn grid(&self) -> Vec<CalendarCell> {
        grid::build(self.year, self.month, self.selected_day)
    }

    pub fn selected_tasks(&self) -> &[TaskItem] {
        self.store.tasks_for(self.selected_key())
    }

    pub fn days_with_tasks(&self) -> HashSet<u32> {
        self.store.days_with_tasks(self.year, self.month)
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    fn days_in_month(&self) -> u32 {
        grid::days_in_month(self.year, self.month)
    }

    /// Select a day of the visible month. Out-of-range days are ignored.
    pub fn select_day(&mut self, day: u32) {
        if (1..=self.days_in_month()).contains(&day) {
            self.selected_day = day;
            self.task_scroll = 0;
        }
    }

    pub fn next_day(&mut self) {
        self.select_day(self.selected_day + 1);
    }

    pub fn prev_day(&mut self) {
        self.select_day(self.selected_day.saturating_sub(1));
    }

    pub fn next_week(&mut self) {
        self.select_day(self.selected_day + 7);
    }

    pub fn prev_week(&mut self) {
        self.select_day(self.selected_day.saturating_sub(7));
    }

    /// Move to the following month. Selection resets to the 1st.
    pub fn next_month(&mut self) {
        (self.year, self.month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        self.selected_day = 1;
        self.task_scroll = 0;
    }

    /// Move to the preceding month. Selection resets to the 1st.
    pub fn prev_month(&mut self) {
        (self.year, self.month) = if self.month == 1 {
            (self.year - 1, 12)
        } else {
            (self.year, self.month - 1)
        };
        self.selected_day = 1;
        self.task_scroll = 0;
    }

    pub fn go_to_today(&mut self) {
        self.today = Local::now().date_naive();
        self.year = self.today.year();
        self.month = self.today.month();
        self.selected_day = self.today.day();
        self.task_scroll = 0;
    }

    pub fn scroll_tasks_down(&mut self) {
        if self.task_scroll + 1 < self.selected_tasks().len() {
            self.task_scroll += 1;
        }
    }

    pub fn scroll_tasks_up(&mut self) {
        self.task_scroll = self.task_scroll.saturating_sub(1);
    }

    pub fn open_task_form(&mut self) {
        self.form_state = Some(TaskFormState::new(self.selected_key()));
        self.input_mode = InputMode::Form;
    }

    pub fn close_task_form(&mut self) {
        self.form_state = None;
        self.input_mode = InputMode::Normal;
    }

    /// Add the form's task to the selected day and save. Invalid input keeps
    /// the form open.
    pub fn submit_task_form(&mut self) {
        let Some(ref form) = self.form_state else {
            return;
        };
        let date = form.date;
        match form.to_task() {
            Ok(task) => {
                info!(%date, name = %task.name, "adding task");
                self.store.add_task(date, task);
                self.close_task_form();
                if self.persist() {
                    self.status_message = Some(StatusMessage::Info("Task added".to_string()));
                }
            }
            Err(FormError::BlankName) => {}
            Err(e) => self.status_message = Some(StatusMessage::Warning(e.to_string())),
        }
    }

    pub fn form_input_char(&mut self, c: char) {
        if let Some(ref mut form) = self.form_state {
            form.input_char(c);
        }
    }

    pub fn form_backspace(&mut self) {
        if let Some(ref mut form) = self.form_state {
            form.backspace();
        }
    }

    pub fn form_tab(&mut self) {
        if let Some(ref mut form) = self.form_state {
            form.active_field = form.active_field.next();
        }
    }

    pub fn form_backtab(&mut self) {
        if let Some(ref mut form) = self.form_state {
            form.active_field = form.active_field.prev();
        }
    }

    pub fn form_next_value(&mut self) {
        if let Some(ref mut form) = self.form_state {
            form.next_value();
        }
    }

    pub fn form_prev_value(&mut self) {
        if let Some(ref mut form) = self.form_state {
            form.prev_value();
        }
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Quit => self.quit(),
            Action::NextDay => self.next_day(),
            Action::PrevDay => self.prev_day(),
            Action::NextWeek => self.next_week(),
            Action::PrevWeek => self.prev_week(),
            Action::NextMonth => self.next_month(),
            Action::PrevMonth => self.prev_month(),
            Action::Today => self.go_to_today(),
            Action::NewTask => self.open_task_form(),
            Action::ScrollUp => self.scroll_tasks_up(),
            Action::ScrollDown => self.scroll_tasks_down(),
            Action::Help => self.show_help = !self.show_help,
            Action::Submit => self.submit_task_form(),
            Action::Cancel => self.close_task_form(),
            Action::NextField => self.form_tab(),
            Action::PrevField => self.form_backtab(),
            Action::NextValue => self.form_next_value(),
            Action::PrevValue => self.form_prev_value(),
            Action::Backspace => self.form_backspace(),
            Action::Input(c) => self.form_input_char(c),
        }
    }

    /// Write the store to disk. On failure the in-memory tasks are kept and
    /// a warning is shown; the next save retries.
    pub fn persist(&mut self) -> bool {
        match self.store.save(&self.tasks_path) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "could not save tasks");
                self.status_message = Some(StatusMessage::Warning(format!("Error saving tasks: {e}")));
                false
            }
        }
    }

    /// Save and stop the main loop.
    pub fn quit(&mut self) {
        self.persist();
        self.running = false;
    }
}
