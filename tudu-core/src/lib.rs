//! tudu core - pure domain logic for the to-do list manager
//!
//! This crate performs no I/O of its own. Persistence goes through the
//! [`KeyValueStore`] trait, implemented by adapters in consuming crates.

pub mod error;
pub mod filter;
pub mod manager;
pub mod store;
pub mod task;

pub use error::{CoreError, Result};
pub use filter::{Filter, compute_filtered_view, filtered_entries};
pub use manager::{FormMode, SubmitOutcome, TaskListManager};
pub use store::{KeyValueStore, MemoryStore, TASKS_KEY};
pub use task::{Category, Task, TaskList};
