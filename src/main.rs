mod app;
mod calendar;
mod components;
mod config;
mod event;
mod logging;
mod theme;
mod tui;

use std::time::Duration;

use app::{App, InputMode};
use chrono::Local;
use color_eyre::Result;
use event::Action;
use ratatui::layout::{Constraint, Layout, Rect};
use tracing::info;

fn main() -> Result<()> {
    color_eyre::install()?;
    logging::init(&config::log_path());

    let config = config::Config::load();
    let tasks_path = config.tasks_path();
    theme::init(config.theme);

    info!(path = %tasks_path.display(), "starting");
    let mut app = App::new(tasks_path, Local::now().date_naive());

    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &mut app);
    if app.running {
        // Loop bailed out on an error; still flush tasks.
        app.persist();
    }
    tui::restore()?;
    result
}

fn run(terminal: &mut tui::Tui, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|frame| {
            let area = frame.area();
            let layout = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);

            render_calendar_layout(frame, layout[0], app);

            if let Some(ref form) = app.form_state {
                components::TaskForm::render(frame, area, form);
            }

            if app.show_help {
                render_help(frame, area, app.store().len());
            }

            components::StatusBar::render(frame, layout[1], app.input_mode, app.status_message.as_ref());
        })?;

        let Some(key) = event::next_key_event(Duration::from_millis(100))? else {
            continue;
        };

        app.status_message = None;

        if app.show_help {
            if matches!(
                event::normal_action(key),
                Some(Action::Help) | Some(Action::Quit)
            ) || key.code == crossterm::event::KeyCode::Esc
            {
                app.show_help = false;
            }
            continue;
        }

        let action = match app.input_mode {
            InputMode::Normal => event::normal_action(key),
            InputMode::Form => event::form_action(key),
        };
        if let Some(action) = action {
            app.apply(action);
        }
    }

    Ok(())
}

const MONTH_W: u16 = 37;
const MONTH_H: u16 = 9;

fn render_calendar_layout(frame: &mut ratatui::Frame, area: Rect, app: &App) {
    let cells = app.grid();
    let days_with_tasks = app.days_with_tasks();

    let (month_area, list_area) = if area.width >= MONTH_W + 20 {
        let split = Layout::horizontal([Constraint::Length(MONTH_W), Constraint::Min(20)]).split(area);
        (split[0], split[1])
    } else {
        let split = Layout::vertical([Constraint::Length(MONTH_H), Constraint::Min(3)]).split(area);
        (split[0], split[1])
    };

    components::MonthView::render(
        frame,
        month_area,
        app.year,
        app.month,
        &cells,
        app.today,
        &days_with_tasks,
    );
    components::TaskList::render(
        frame,
        list_area,
        app.selected_date(),
        app.selected_tasks(),
        app.task_scroll,
    );
}

fn render_help(frame: &mut ratatui::Frame, area: Rect, stored: usize) {
    use ratatui::style::{Color, Modifier, Style};
    use ratatui::text::{Line, Span};
    use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

    let popup_w = area.width.min(48).max(30);
    let popup_h = area.height.min(18).max(10);
    let x = area.x + (area.width.saturating_sub(popup_w)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_h)) / 2;
    let popup_area = Rect::new(x, y, popup_w, popup_h);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Keybindings ")
        .title_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        .title_bottom(Line::from(Span::styled(
            format!(" {} ", components::task_list::task_count_label(stored)),
            theme::current().dim,
        )))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let section_style = Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    let entry = |keys: &'static str, desc: &'static str| {
        Line::from(vec![Span::styled(format!("  {:<10}", keys), key_style), Span::raw(desc)])
    };

    let lines = vec![
        Line::from(Span::styled("Navigation", section_style)),
        entry("h/l", "Previous/next day"),
        entry("k/j", "Previous/next week"),
        entry("[/]", "Previous/next month"),
        entry("t", "Jump to today"),
        entry("PgUp/PgDn", "Scroll task list"),
        Line::from(""),
        Line::from(Span::styled("Tasks", section_style)),
        entry("n", "Add task to selected day"),
        entry("Tab", "Next form field"),
        entry("\u{2191}/\u{2193}", "Change hour, minute, AM/PM, color"),
        Line::from(""),
        entry("q", "Save and quit"),
        entry("Esc/?", "Close this help"),
    ];

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
