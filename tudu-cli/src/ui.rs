//! TUI rendering module

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};
use tudu_core::{Category, Filter, FormMode, KeyValueStore, Task};

use crate::app::{App, Focus};

pub fn draw<S: KeyValueStore>(f: &mut Frame, app: &App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Form
            Constraint::Length(3), // Filter selector
            Constraint::Min(5),    // Task list
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    draw_form(f, app, chunks[0]);
    draw_filter(f, app, chunks[1]);
    draw_task_list(f, app, chunks[2]);
    draw_status_bar(f, app, chunks[3]);

    if app.show_help {
        draw_help_dialog(f);
    }
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn category_color(category: Category) -> Color {
    match category {
        Category::Home => Color::Blue,
        Category::Work => Color::Yellow,
        Category::Hobby => Color::Magenta,
    }
}

fn draw_form<S: KeyValueStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(20),    // Text input
            Constraint::Length(12), // Category selector
            Constraint::Length(10), // Submit button
        ])
        .split(area);

    let focused = app.focus == Focus::Input;
    let mode = app.manager.mode();

    let input_title = match mode {
        FormMode::Add => " Add or edit a task ".to_string(),
        FormMode::Edit(index) => format!(" Editing #{} ", index),
    };

    let input = Paragraph::new(app.manager.input()).block(
        Block::default()
            .borders(Borders::ALL)
            .title(input_title)
            .border_style(focus_style(focused)),
    );
    f.render_widget(input, chunks[0]);

    if focused {
        f.set_cursor_position(input_cursor(chunks[0], app.manager.input()));
    }

    let category = app.manager.category();
    let selector = Paragraph::new(Line::from(vec![
        Span::raw("◂ "),
        Span::styled(category.label(), Style::default().fg(category_color(category))),
        Span::raw(" ▸"),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Category ")
            .border_style(focus_style(focused)),
    );
    f.render_widget(selector, chunks[1]);

    let button_style = match mode {
        FormMode::Add => Style::default().fg(Color::Green),
        FormMode::Edit(_) => Style::default().fg(Color::Cyan),
    };
    let button = Paragraph::new(Span::styled(
        mode.label(),
        button_style.add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).border_style(button_style));
    f.render_widget(button, chunks[2]);
}

/// Cursor just past the typed text, kept inside the input border
fn input_cursor(area: Rect, input: &str) -> (u16, u16) {
    let width = u16::try_from(input.chars().count()).unwrap_or(u16::MAX);
    let max_x = area.x.saturating_add(area.width.saturating_sub(2));
    let x = area.x.saturating_add(1).saturating_add(width).min(max_x);
    (x, area.y.saturating_add(1))
}

fn draw_filter<S: KeyValueStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let active = app.manager.filter();

    let mut spans = vec![Span::raw(" Filter by: ")];
    for option in Filter::OPTIONS.iter() {
        let style = if option == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" {} ", option.label()), style));
        spans.push(Span::raw(" "));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(paragraph, area);
}

fn draw_task_list<S: KeyValueStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let entries = app.visible_entries();
    let edit_target = app.manager.edit_target();

    let items: Vec<ListItem> = entries
        .iter()
        .map(|(index, task)| create_task_item(*index, task, edit_target == Some(*index)))
        .collect();

    let title = format!(" Tasks ({}) ", app.manager.filter().label());

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .title_alignment(Alignment::Left)
                .border_style(focus_style(app.focus == Focus::List)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if app.focus == Focus::List && !entries.is_empty() {
        state.select(Some(app.selected_row));
    }

    f.render_stateful_widget(list, area, &mut state);
}

fn create_task_item(index: usize, task: &Task, editing: bool) -> ListItem<'static> {
    let checkbox = if task.completed { "[✓]" } else { "[ ]" };

    let text_style = if task.completed {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::CROSSED_OUT)
    } else if editing {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC)
    } else {
        Style::default()
    };

    let line = Line::from(vec![
        Span::styled(
            format!("{} ", checkbox),
            if task.completed {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            },
        ),
        Span::styled(format!("[{}] ", index), Style::default().fg(Color::Cyan)),
        Span::styled(task.text.clone(), text_style),
        Span::raw(" - "),
        Span::styled(
            task.category.as_str(),
            Style::default().fg(category_color(task.category)),
        ),
    ]);

    ListItem::new(line)
}

fn draw_status_bar<S: KeyValueStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let line = match &app.status_message {
        Some(msg) => Line::from(Span::styled(msg.clone(), Style::default().fg(Color::Yellow))),
        None => {
            let tasks = app.manager.tasks();
            Line::from(vec![
                Span::raw(format!("{} total", tasks.len())),
                Span::raw(" | "),
                Span::styled(
                    format!("{} done", tasks.count_completed()),
                    Style::default().fg(Color::Green),
                ),
                Span::raw(" | "),
                Span::styled("?", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(":Help "),
                Span::styled("Tab", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(":Focus"),
            ])
        }
    };

    let paragraph = Paragraph::new(line)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .alignment(Alignment::Center);

    f.render_widget(paragraph, area);
}

fn draw_help_dialog(f: &mut Frame) {
    let area = centered_rect(60, 70, f.area());

    f.render_widget(Clear, area);

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let help_text = vec![
        Line::from(Span::styled("Input", bold)),
        Line::from("  Enter       Add, or save the edit"),
        Line::from("  ↑/↓         Change category"),
        Line::from("  Esc         Cancel edit / leave input"),
        Line::from("  Tab         Focus task list"),
        Line::from(""),
        Line::from(Span::styled("Task List", bold)),
        Line::from("  ↑/↓ or j/k  Move selection"),
        Line::from("  g/G         Go to top/bottom"),
        Line::from("  Space/x     Toggle completion"),
        Line::from("  e           Edit selected task"),
        Line::from("  d/Delete    Delete selected task"),
        Line::from("  f           Cycle filter"),
        Line::from("  c           Cycle category"),
        Line::from("  Tab/i/a     Focus input"),
        Line::from("  q/Esc       Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Press ? or Esc to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};
    use tudu_core::{MemoryStore, TaskListManager};

    fn render(app: &App<MemoryStore>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_renders_tasks_and_add_label() {
        let mut manager = TaskListManager::hydrate(MemoryStore::new());
        manager.set_input("Buy milk");
        manager.submit().unwrap();
        let app = App::new(manager);

        let screen = render(&app);

        assert!(screen.contains("Buy milk"));
        assert!(screen.contains("Add"));
        assert!(screen.contains("Filter by:"));
    }

    #[test]
    fn test_cursor_stays_inside_input() {
        let area = Rect::new(2, 3, 30, 3);

        assert_eq!(input_cursor(area, ""), (3, 4));
        assert_eq!(input_cursor(area, "abc"), (6, 4));
        assert_eq!(input_cursor(area, &"x".repeat(70_000)), (30, 4));
        assert_eq!(input_cursor(Rect::new(u16::MAX - 5, 0, 5, 3), "long text"), (u16::MAX - 2, 1));
    }

    #[test]
    fn test_long_input_renders() {
        let mut manager = TaskListManager::hydrate(MemoryStore::new());
        manager.set_input("y".repeat(70_000));
        let app = App::new(manager);

        let screen = render(&app);

        assert!(screen.contains("yyyy"));
    }

    #[test]
    fn test_edit_mode_switches_label() {
        let mut manager = TaskListManager::hydrate(MemoryStore::new());
        manager.set_input("Call Bob");
        manager.submit().unwrap();
        manager.begin_edit(0).unwrap();
        let app = App::new(manager);

        let screen = render(&app);

        assert!(screen.contains("Editing #0"));
        assert!(screen.contains("Edit"));
    }
}
