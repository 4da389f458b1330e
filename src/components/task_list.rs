use chrono::NaiveDate;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::calendar::TaskItem;
use crate::theme;

pub struct TaskList;

impl TaskList {
    pub fn render(frame: &mut Frame, area: Rect, date: Option<NaiveDate>, tasks: &[TaskItem], scroll: usize) {
        let theme = theme::current();
        let w = area.width as usize;

        let title = match date {
            Some(d) if w >= 24 => format!(" {} ", d.format("%A %-d")),
            Some(d) => format!(" {} ", d.format("%a %-d")),
            None => " Tasks ".to_string(),
        };

        let block = Block::default()
            .title(title)
            .title_style(theme.header)
            .title_bottom(Line::from(Span::styled(
                format!(" {} ", task_count_label(tasks.len())),
                theme.dim,
            )))
            .borders(Borders::ALL)
            .border_style(theme.border);

        if tasks.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            let msg = Paragraph::new("No tasks. Press n to add one.").style(theme.dim);
            frame.render_widget(msg, inner);
            return;
        }

        let items: Vec<ListItem> = tasks.iter().skip(scroll).map(format_task).collect();
        frame.render_widget(List::new(items).block(block), area);
    }
}

/// "0 tasks", "1 task", "2 tasks".
pub fn task_count_label(n: usize) -> String {
    format!("{} task{}", n, if n == 1 { "" } else { "s" })
}

fn format_task(task: &TaskItem) -> ListItem<'static> {
    let swatch = Span::styled("\u{25cf} ", Style::default().fg(task.swatch()));
    let name = Span::styled(task.name.clone(), Style::default());
    let time = Span::styled(
        format!("  {}", task.time),
        Style::default().add_modifier(Modifier::DIM),
    );
    ListItem::new(Line::from(vec![swatch, name, time]))
}
