use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextDay,
    PrevDay,
    NextWeek,
    PrevWeek,
    NextMonth,
    PrevMonth,
    Today,
    NewTask,
    ScrollUp,
    ScrollDown,
    Help,
    Submit,
    Cancel,
    NextField,
    PrevField,
    NextValue,
    PrevValue,
    Backspace,
    Input(char),
}

/// Wait up to `timeout` for a key press; other terminal events are skipped.
pub fn next_key_event(timeout: Duration) -> color_eyre::Result<Option<KeyEvent>> {
    while event::poll(timeout)? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(Some(key));
            }
        }
    }
    Ok(None)
}

/// Keys on the calendar screen.
pub fn normal_action(key: KeyEvent) -> Option<Action> {
    let action = match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Left, _) | (KeyCode::Char('h'), _) => Action::PrevDay,
        (KeyCode::Right, _) | (KeyCode::Char('l'), _) => Action::NextDay,
        (KeyCode::Up, _) | (KeyCode::Char('k'), _) => Action::PrevWeek,
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) => Action::NextWeek,
        (KeyCode::Char('['), _) => Action::PrevMonth,
        (KeyCode::Char(']'), _) => Action::NextMonth,
        (KeyCode::Char('t'), _) => Action::Today,
        (KeyCode::Char('n'), _) => Action::NewTask,
        (KeyCode::PageUp, _) => Action::ScrollUp,
        (KeyCode::PageDown, _) => Action::ScrollDown,
        (KeyCode::Char('?'), _) => Action::Help,
        _ => return None,
    };
    Some(action)
}

/// Keys while the add-task form is open.
pub fn form_action(key: KeyEvent) -> Option<Action> {
    let action = match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Esc, _) => Action::Cancel,
        (KeyCode::Enter, _) => Action::Submit,
        (KeyCode::Tab, _) => Action::NextField,
        (KeyCode::BackTab, _) => Action::PrevField,
        (KeyCode::Down, _) | (KeyCode::Right, _) => Action::NextValue,
        (KeyCode::Up, _) | (KeyCode::Left, _) => Action::PrevValue,
        (KeyCode::Backspace, _) => Action::Backspace,
        (KeyCode::Char(c), _) => Action::Input(c),
        _ => return None,
    };
    Some(action)
}
