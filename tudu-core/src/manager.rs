//! The task list manager
//!
//! Owns the task list and the transient form/filter selection, applies user
//! actions to them, and writes the whole list back to the store after every
//! mutation.

use log::{debug, info};

use crate::error::{CoreError, Result};
use crate::filter::{Filter, compute_filtered_view, filtered_entries};
use crate::store::{KeyValueStore, TASKS_KEY};
use crate::task::{Category, Task, TaskList};

/// State of the input form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Add,
    /// Editing the task at this position
    Edit(usize),
}

impl FormMode {
    /// Submit button label
    pub fn label(&self) -> &'static str {
        match self {
            FormMode::Add => "Add",
            FormMode::Edit(_) => "Edit",
        }
    }
}

/// What a form submission did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Added(usize),
    Edited(usize),
    /// Blank input in add mode
    Ignored,
}

/// Transient UI selection; never persisted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub input: String,
    pub category: Category,
    pub filter: Filter,
    edit_target: Option<usize>,
}

/// Single owner of the task list and its selection state
#[derive(Debug)]
pub struct TaskListManager<S> {
    store: S,
    tasks: TaskList,
    selection: Selection,
}

impl<S: KeyValueStore> TaskListManager<S> {
    /// Load the persisted list from `store`.
    ///
    /// A missing slot, a failed read or a malformed value all start from an
    /// empty list. Nothing is reported to the caller.
    pub fn hydrate(store: S) -> Self {
        let tasks = match store.get(TASKS_KEY) {
            Ok(Some(raw)) => TaskList::from_json(&raw).unwrap_or_else(|e| {
                debug!("Discarding unreadable task list: {}", e);
                TaskList::new()
            }),
            Ok(None) => TaskList::new(),
            Err(e) => {
                debug!("Could not read task list, starting empty: {}", e);
                TaskList::new()
            }
        };

        debug!("Hydrated {} task(s)", tasks.len());

        Self {
            store,
            tasks,
            selection: Selection::default(),
        }
    }

    /// Builder method to set the initial pending category
    pub fn with_category(mut self, category: Category) -> Self {
        self.selection.category = category;
        self
    }

    /// Builder method to set the initial filter
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.selection.filter = filter;
        self
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn input(&self) -> &str {
        &self.selection.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.selection.input = text.into();
    }

    /// Mutable access for character-by-character editing
    pub fn input_mut(&mut self) -> &mut String {
        &mut self.selection.input
    }

    pub fn category(&self) -> Category {
        self.selection.category
    }

    pub fn set_category(&mut self, category: Category) {
        self.selection.category = category;
    }

    pub fn filter(&self) -> &Filter {
        &self.selection.filter
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.selection.filter = filter;
    }

    pub fn edit_target(&self) -> Option<usize> {
        self.selection.edit_target
    }

    pub fn mode(&self) -> FormMode {
        match self.selection.edit_target {
            Some(index) => FormMode::Edit(index),
            None => FormMode::Add,
        }
    }

    /// Submit the form.
    ///
    /// In edit mode the target is replaced with the pending text and category
    /// and its completion is reset. In add mode a task is appended unless the
    /// pending text is blank. The pending text keeps its surrounding
    /// whitespace.
    pub fn submit(&mut self) -> Result<SubmitOutcome> {
        if let Some(index) = self.selection.edit_target {
            let task = Task::new(self.selection.input.clone(), self.selection.category);
            self.tasks.replace(index, task)?;
            self.selection.input.clear();
            self.selection.edit_target = None;
            self.persist()?;
            info!("Edited task #{}", index);
            return Ok(SubmitOutcome::Edited(index));
        }

        if self.selection.input.trim().is_empty() {
            debug!("Ignoring blank task text");
            return Ok(SubmitOutcome::Ignored);
        }

        let text = std::mem::take(&mut self.selection.input);
        let index = self.tasks.push(Task::new(text, self.selection.category));
        self.persist()?;
        info!("Added task #{}", index);
        Ok(SubmitOutcome::Added(index))
    }

    /// Remove the task at `index`.
    ///
    /// An edit in progress keeps pointing at the same task: the target shifts
    /// down when an earlier task goes, and the form returns to add mode when
    /// the target itself is deleted.
    pub fn delete(&mut self, index: usize) -> Result<Task> {
        let removed = self.tasks.remove(index)?;

        self.selection.edit_target = match self.selection.edit_target {
            Some(target) if target == index => None,
            Some(target) if target > index => Some(target - 1),
            other => other,
        };

        self.persist()?;
        info!("Deleted task #{}", index);
        Ok(removed)
    }

    /// Enter edit mode for `index`, seeding the form from that task
    pub fn begin_edit(&mut self, index: usize) -> Result<()> {
        let task = self.tasks.get_or_err(index)?;
        self.selection.input = task.text.clone();
        self.selection.category = task.category;
        self.selection.edit_target = Some(index);
        Ok(())
    }

    /// Leave edit mode without touching the list
    pub fn cancel_edit(&mut self) {
        if self.selection.edit_target.take().is_some() {
            self.selection.input.clear();
        }
    }

    /// Flip completion of the task at `index`, returning the new state
    pub fn toggle_completion(&mut self, index: usize) -> Result<bool> {
        let completed = self.tasks.toggle(index)?;
        self.persist()?;
        info!("Task #{} completed: {}", index, completed);
        Ok(completed)
    }

    /// Tasks matching the active filter
    pub fn filtered_view(&self) -> Vec<&Task> {
        compute_filtered_view(&self.selection.filter, &self.tasks)
    }

    /// Tasks matching the active filter, with their positions in the full list
    pub fn filtered_entries(&self) -> Vec<(usize, &Task)> {
        filtered_entries(&self.selection.filter, &self.tasks)
    }

    fn persist(&mut self) -> Result<()> {
        let raw = self.tasks.to_json()?;
        self.store.set(TASKS_KEY, &raw).map_err(|e| match e {
            storage @ CoreError::Storage { .. } => storage,
            other => CoreError::storage_with_source("Failed to write task list", other),
        })
    }
}
