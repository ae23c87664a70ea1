//! Task display formatting module
//!
//! Handles colored output and different view modes for tasks

use colored::*;

use tudu_core::{Category, Task};

/// Display mode for task list
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayMode {
    /// Minimal one-line format
    Compact,
    /// Full info, one field per line
    Detailed,
    /// Checkbox, position, text and category label (default)
    Default,
}

/// Check if terminal supports colors
pub fn supports_color() -> bool {
    atty::is(atty::Stream::Stdout)
}

fn category_label(category: Category, use_color: bool) -> String {
    let label = category.as_str();
    if !use_color {
        return label.to_string();
    }
    match category {
        Category::Home => label.blue().to_string(),
        Category::Work => label.yellow().to_string(),
        Category::Hobby => label.magenta().to_string(),
    }
}

/// Format a task for display; `index` is its position in the full list
pub fn format_task(index: usize, task: &Task, mode: DisplayMode, use_color: bool) -> String {
    let checkbox = if task.completed { "[✓]" } else { "[ ]" };

    let text = if use_color && task.completed {
        task.text.green().strikethrough().to_string()
    } else {
        task.text.clone()
    };

    match mode {
        DisplayMode::Compact => format!("{} {} {}", checkbox, index, text),
        DisplayMode::Detailed => {
            let parts = [
                format!("{} [#{}]", checkbox, index),
                format!("Text: {}", text),
                format!("Category: {}", category_label(task.category, use_color)),
                format!(
                    "Status: {}",
                    if task.completed { "Finished" } else { "Unfinished" }
                ),
            ];
            parts.join("\n  ")
        }
        DisplayMode::Default => {
            let index_str = if use_color {
                format!("[{}]", index).cyan().to_string()
            } else {
                format!("[{}]", index)
            };

            format!(
                "{} {} {} - {}",
                checkbox,
                index_str,
                text,
                category_label(task.category, use_color)
            )
        }
    }
}

/// Format a summary line for task list
pub fn format_summary(total: usize, completed: usize, use_color: bool) -> String {
    let done = if use_color {
        format!("{} done", completed).green().to_string()
    } else {
        format!("{} done", completed)
    };

    format!("[{} total | {}]", total, done)
}
