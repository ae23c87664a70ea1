//! Display filters over a task list
//!
//! Filtering is a pure projection: it never mutates the list.

use std::fmt;

use crate::task::{Category, Task, TaskList};

/// Which tasks the list view shows
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Finished,
    Unfinished,
    Category(Category),
    /// A value outside the six known options. Treated as a category that no
    /// task carries, so it matches nothing.
    Unknown(String),
}

impl Filter {
    /// Selector options, in order
    pub const OPTIONS: [Filter; 6] = [
        Filter::All,
        Filter::Finished,
        Filter::Unfinished,
        Filter::Category(Category::Home),
        Filter::Category(Category::Work),
        Filter::Category(Category::Hobby),
    ];

    /// Lenient parse: unknown values become [`Filter::Unknown`]
    pub fn parse(s: &str) -> Self {
        let lowered = s.trim().to_lowercase();
        match lowered.as_str() {
            "all" => Filter::All,
            "finished" => Filter::Finished,
            "unfinished" => Filter::Unfinished,
            _ => match lowered.parse::<Category>() {
                Ok(category) => Filter::Category(category),
                Err(_) => Filter::Unknown(s.to_string()),
            },
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Filter::All => "All",
            Filter::Finished => "Finished",
            Filter::Unfinished => "Unfinished",
            Filter::Category(category) => category.label(),
            Filter::Unknown(raw) => raw.as_str(),
        }
    }

    /// Next selector option; unknown values restart at `All`
    pub fn next(&self) -> Self {
        let pos = Self::OPTIONS.iter().position(|f| f == self);
        match pos {
            Some(i) => Self::OPTIONS[(i + 1) % Self::OPTIONS.len()].clone(),
            None => Filter::All,
        }
    }

    /// Check if a task matches this filter
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Finished => task.completed,
            Filter::Unfinished => !task.completed,
            Filter::Category(category) => task.category == *category,
            Filter::Unknown(_) => false,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::All => f.write_str("all"),
            Filter::Finished => f.write_str("finished"),
            Filter::Unfinished => f.write_str("unfinished"),
            Filter::Category(category) => write!(f, "{}", category),
            Filter::Unknown(raw) => f.write_str(raw),
        }
    }
}

/// Tasks matching `filter`, in list order
pub fn compute_filtered_view<'a>(filter: &Filter, list: &'a TaskList) -> Vec<&'a Task> {
    list.iter().filter(|t| filter.matches(t)).collect()
}

/// Like [`compute_filtered_view`], paired with each task's position in the full list
pub fn filtered_entries<'a>(filter: &Filter, list: &'a TaskList) -> Vec<(usize, &'a Task)> {
    list.iter()
        .enumerate()
        .filter(|(_, t)| filter.matches(t))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TaskList {
        TaskList::from(vec![
            Task::new("Buy milk", Category::Home).with_completed(true),
            Task::new("Call Bob", Category::Work),
            Task::new("Paint", Category::Hobby).with_completed(true),
            Task::new("Report", Category::Work).with_completed(true),
        ])
    }

    fn texts(view: Vec<&Task>) -> Vec<&str> {
        view.into_iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_filter_all() {
        let list = sample();
        let view = compute_filtered_view(&Filter::All, &list);

        assert_eq!(texts(view), vec!["Buy milk", "Call Bob", "Paint", "Report"]);
    }

    #[test]
    fn test_filter_finished() {
        let list = sample();
        let view = compute_filtered_view(&Filter::Finished, &list);

        assert_eq!(texts(view), vec!["Buy milk", "Paint", "Report"]);
    }

    #[test]
    fn test_filter_unfinished() {
        let list = sample();
        let view = compute_filtered_view(&Filter::Unfinished, &list);

        assert_eq!(texts(view), vec!["Call Bob"]);
    }

    #[test]
    fn test_filter_category() {
        let list = sample();
        let view = compute_filtered_view(&Filter::Category(Category::Work), &list);

        assert_eq!(texts(view), vec!["Call Bob", "Report"]);
    }

    #[test]
    fn test_unknown_filter_is_empty() {
        let list = sample();
        let filter = Filter::parse("someday");

        assert_eq!(filter, Filter::Unknown("someday".to_string()));
        assert!(compute_filtered_view(&filter, &list).is_empty());
    }

    #[test]
    fn test_view_does_not_mutate() {
        let list = sample();
        let before = list.clone();

        let _ = compute_filtered_view(&Filter::Finished, &list);

        assert_eq!(list, before);
    }

    #[test]
    fn test_filtered_entries_keep_positions() {
        let list = sample();
        let entries = filtered_entries(&Filter::Category(Category::Work), &list);

        let positions: Vec<usize> = entries.iter().map(|(i, _)| *i).collect();
        assert_eq!(positions, vec![1, 3]);
    }

    #[test]
    fn test_parse_known_values() {
        assert_eq!(Filter::parse("all"), Filter::All);
        assert_eq!(Filter::parse("Finished"), Filter::Finished);
        assert_eq!(Filter::parse("unfinished"), Filter::Unfinished);
        assert_eq!(Filter::parse("hobby"), Filter::Category(Category::Hobby));
    }

    #[test]
    fn test_cycle_visits_every_option() {
        let mut filter = Filter::All;
        for expected in Filter::OPTIONS.iter().skip(1) {
            filter = filter.next();
            assert_eq!(&filter, expected);
        }
        assert_eq!(filter.next(), Filter::All);
        assert_eq!(Filter::Unknown("x".into()).next(), Filter::All);
    }
}
