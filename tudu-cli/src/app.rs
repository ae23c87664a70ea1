//! TUI application state and event handling

use std::io;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tudu_core::{FormMode, KeyValueStore, SubmitOutcome, Task, TaskListManager};

use crate::error::{CliError, Result};
use crate::ui;

/// Which widget receives typed keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    List,
}

pub struct App<S> {
    pub manager: TaskListManager<S>,
    pub focus: Focus,
    /// Row in the filtered view
    pub selected_row: usize,
    pub show_help: bool,
    pub should_quit: bool,
    pub status_message: Option<String>,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(manager: TaskListManager<S>) -> Self {
        Self {
            manager,
            focus: Focus::Input,
            selected_row: 0,
            show_help: false,
            should_quit: false,
            status_message: None,
        }
    }

    pub fn visible_entries(&self) -> Vec<(usize, &Task)> {
        self.manager.filtered_entries()
    }

    /// Position in the full list of the highlighted row
    pub fn selected_index(&self) -> Option<usize> {
        self.visible_entries()
            .get(self.selected_row)
            .map(|(index, _)| *index)
    }

    pub fn move_selection(&mut self, delta: i32) {
        let len = self.visible_entries().len();
        if len == 0 {
            return;
        }

        self.selected_row = if delta < 0 {
            self.selected_row.saturating_sub(delta.unsigned_abs() as usize)
        } else {
            (self.selected_row + delta as usize).min(len - 1)
        };
    }

    fn select_last(&mut self) {
        self.selected_row = self.visible_entries().len().saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_entries().len();
        if self.selected_row >= len {
            self.selected_row = len.saturating_sub(1);
        }
    }

    fn report(&mut self, result: tudu_core::Result<()>) {
        if let Err(e) = result {
            self.status_message = Some(format!("Failed to save: {}", e));
        }
    }

    pub fn submit(&mut self) {
        match self.manager.submit() {
            Ok(SubmitOutcome::Added(_)) => {
                self.select_last();
            }
            Ok(SubmitOutcome::Edited(index)) => {
                self.status_message = Some(format!("Updated task #{}", index));
            }
            Ok(SubmitOutcome::Ignored) => {}
            Err(e) => self.report(Err(e)),
        }
        self.clamp_selection();
    }

    pub fn toggle_selected(&mut self) {
        if let Some(index) = self.selected_index() {
            let result = self.manager.toggle_completion(index).map(|_| ());
            self.report(result);
            self.clamp_selection();
        }
    }

    pub fn begin_edit_selected(&mut self) {
        if let Some(index) = self.selected_index() {
            let result = self.manager.begin_edit(index);
            self.report(result);
            self.focus = Focus::Input;
        }
    }

    pub fn delete_selected(&mut self) {
        if let Some(index) = self.selected_index() {
            let result = self.manager.delete(index).map(|_| ());
            self.report(result);
            self.clamp_selection();
        }
    }

    pub fn cycle_filter(&mut self) {
        let next = self.manager.filter().next();
        self.manager.set_filter(next);
        self.selected_row = 0;
    }

    pub fn cycle_category(&mut self, forward: bool) {
        let current = self.manager.category();
        let next = if forward { current.next() } else { current.prev() };
        self.manager.set_category(next);
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        self.status_message = None;

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.show_help {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter | KeyCode::Char('q')
            ) {
                self.show_help = false;
            }
            return;
        }

        match self.focus {
            Focus::Input => self.handle_input_key(key),
            Focus::List => self.handle_list_key(key),
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit(),
            KeyCode::Esc => {
                if matches!(self.manager.mode(), FormMode::Edit(_)) {
                    self.manager.cancel_edit();
                } else {
                    self.focus = Focus::List;
                }
            }
            KeyCode::Tab => self.focus = Focus::List,
            KeyCode::Up => self.cycle_category(false),
            KeyCode::Down => self.cycle_category(true),
            KeyCode::Backspace => {
                self.manager.input_mut().pop();
            }
            KeyCode::Char(c) => self.manager.input_mut().push(c),
            _ => {}
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::Char('i') | KeyCode::Char('a') => self.focus = Focus::Input,
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Char('g') | KeyCode::Home => self.selected_row = 0,
            KeyCode::Char('G') | KeyCode::End => self.select_last(),
            KeyCode::Char(' ') | KeyCode::Char('x') | KeyCode::Enter => self.toggle_selected(),
            KeyCode::Char('e') => self.begin_edit_selected(),
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),
            KeyCode::Char('f') => self.cycle_filter(),
            KeyCode::Char('c') => self.cycle_category(true),
            KeyCode::Char('?') => self.show_help = true,
            _ => {}
        }
    }
}

pub fn run_tui<S: KeyValueStore>(manager: TaskListManager<S>) -> Result<()> {
    enable_raw_mode().map_err(|e| CliError::tui_with_source("Failed to enable raw mode", e))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| CliError::tui_with_source("Failed to setup terminal", e))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| CliError::tui_with_source("Failed to create terminal", e))?;

    let mut app = App::new(manager);
    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

fn run_app<B: ratatui::backend::Backend, S: KeyValueStore>(
    terminal: &mut Terminal<B>,
    app: &mut App<S>,
) -> Result<()> {
    while !app.should_quit {
        terminal
            .draw(|f| ui::draw(f, app))
            .map_err(|e| CliError::tui_with_source("Failed to draw", e))?;

        let event = event::read().map_err(|e| CliError::tui_with_source("Failed to read event", e))?;
        if let Event::Key(key) = event
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key);
        }
    }

    Ok(())
}
