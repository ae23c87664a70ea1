//! Task domain model
//!
//! Tasks have no identity beyond their position in the [`TaskList`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, Result};

/// Fixed tag classifying a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Home,
    Work,
    Hobby,
}

impl Category {
    /// Selector order
    pub const ALL: [Category; 3] = [Category::Home, Category::Work, Category::Hobby];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Home => "home",
            Category::Work => "work",
            Category::Hobby => "hobby",
        }
    }

    /// Capitalized label for selectors
    pub fn label(&self) -> &'static str {
        match self {
            Category::Home => "Home",
            Category::Work => "Work",
            Category::Hobby => "Hobby",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Category::Home => Category::Work,
            Category::Work => Category::Hobby,
            Category::Hobby => Category::Home,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Category::Home => Category::Hobby,
            Category::Work => Category::Home,
            Category::Hobby => Category::Work,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "home" => Ok(Category::Home),
            "work" => Ok(Category::Work),
            "hobby" => Ok(Category::Hobby),
            other => Err(CoreError::validation(
                "category",
                format!("'{}' is not one of home, work, hobby", other),
            )),
        }
    }
}

/// A single to-do item
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub text: String,
    pub category: Category,
    pub completed: bool,
}

impl Task {
    /// Create an unfinished task
    pub fn new(text: impl Into<String>, category: Category) -> Self {
        Self {
            text: text.into(),
            category,
            completed: false,
        }
    }

    /// Builder method to set completion status
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Toggle completion status
    pub fn toggle_complete(&mut self) {
        self.completed = !self.completed;
    }
}

/// Ordered sequence of tasks; insertion order is display order.
///
/// Serialized as a bare JSON array of `{text, category, completed}`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a task, returning its position
    pub fn push(&mut self, task: Task) -> usize {
        self.tasks.push(task);
        self.tasks.len() - 1
    }

    /// Remove the task at `index`, shifting later tasks down by one
    pub fn remove(&mut self, index: usize) -> Result<Task> {
        self.check(index)?;
        Ok(self.tasks.remove(index))
    }

    /// Replace the task at `index`, returning the previous one
    pub fn replace(&mut self, index: usize, task: Task) -> Result<Task> {
        self.check(index)?;
        Ok(std::mem::replace(&mut self.tasks[index], task))
    }

    /// Flip completion of the task at `index`, returning the new state
    pub fn toggle(&mut self, index: usize) -> Result<bool> {
        let task = self.get_mut_or_err(index)?;
        task.toggle_complete();
        Ok(task.completed)
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    /// Get or return error if the position is out of range
    pub fn get_or_err(&self, index: usize) -> Result<&Task> {
        self.tasks.get(index).ok_or(CoreError::TaskNotFound(index))
    }

    fn get_mut_or_err(&mut self, index: usize) -> Result<&mut Task> {
        self.tasks.get_mut(index).ok_or(CoreError::TaskNotFound(index))
    }

    fn check(&self, index: usize) -> Result<()> {
        if index < self.tasks.len() {
            Ok(())
        } else {
            Err(CoreError::TaskNotFound(index))
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn count_completed(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    pub fn count_in_category(&self, category: Category) -> usize {
        self.tasks.iter().filter(|t| t.category == category).count()
    }

    /// Serialize to the persisted JSON form
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse the persisted JSON form
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw)
            .map_err(|e| CoreError::parse_with_source("Malformed task list", e))
    }
}

impl From<Vec<Task>> for TaskList {
    fn from(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}
