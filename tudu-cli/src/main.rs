use std::io::{self, Write};

use clap::Parser;
use log::debug;

use tudu_core::{
    Category, Filter, KeyValueStore, SubmitOutcome, TASKS_KEY, TaskList, TaskListManager,
};

use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::display::{DisplayMode, format_summary, format_task, supports_color};
use crate::error::Result;
use crate::storage::FileStore;

mod app;
mod cli;
mod config;
mod display;
mod error;
mod storage;
mod ui;

fn setup_logging() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();
}

fn main() {
    setup_logging();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut cfg = Config::load(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        cfg.data_directory = dir;
    }
    debug!("Using data directory {}", cfg.data_directory.display());

    let store = FileStore::new(&cfg.data_directory).with_backup(cfg.backup);
    let mut manager = TaskListManager::hydrate(store)
        .with_category(cfg.default_category)
        .with_filter(cfg.default_filter());

    match cli.command {
        Commands::Add { text, category } => {
            if let Some(category) = category {
                manager.set_category(category.parse::<Category>()?);
            }
            manager.set_input(text.join(" "));

            if let SubmitOutcome::Added(index) = manager.submit()? {
                let task = manager.tasks().get_or_err(index)?;
                println!("Task added: [{}] {} - {}", index, task.text, task.category);
            }
        }

        Commands::List {
            filter,
            compact,
            detailed,
            json,
            no_color,
        } => {
            if let Some(filter) = filter {
                manager.set_filter(Filter::parse(&filter));
            }
            if let Filter::Unknown(raw) = manager.filter() {
                debug!("Unknown filter '{}' matches no task", raw);
            }

            let entries = manager.filtered_entries();

            if json {
                let view: Vec<_> = entries.iter().map(|(_, task)| *task).collect();
                println!("{}", serde_json::to_string_pretty(&view)?);
                return Ok(());
            }

            if entries.is_empty() {
                println!("No tasks found.");
            } else {
                let mode = if compact {
                    DisplayMode::Compact
                } else if detailed {
                    DisplayMode::Detailed
                } else {
                    DisplayMode::Default
                };

                let use_color = !no_color && supports_color();

                for (index, task) in &entries {
                    println!("{}", format_task(*index, task, mode, use_color));
                }

                println!();
                let completed = entries.iter().filter(|(_, t)| t.completed).count();
                println!("{}", format_summary(entries.len(), completed, use_color));
            }
        }

        Commands::Toggle { index } => {
            let completed = manager.toggle_completion(index)?;
            let task = manager.tasks().get_or_err(index)?;
            let status = if completed { "finished" } else { "unfinished" };
            println!("Marked task #{} as {}: {}", index, status, task.text);
        }

        Commands::Edit {
            index,
            text,
            category,
        } => {
            manager.begin_edit(index)?;
            if !text.is_empty() {
                manager.set_input(text.join(" "));
            }
            if let Some(category) = category {
                manager.set_category(category.parse::<Category>()?);
            }

            manager.submit()?;
            let task = manager.tasks().get_or_err(index)?;
            println!("Updated task #{}: {} - {}", index, task.text, task.category);
        }

        Commands::Delete { index } => {
            let removed = manager.delete(index)?;
            println!("Removed: {}", removed.text);
        }

        Commands::Categories => {
            let tasks = manager.tasks();
            for category in Category::ALL {
                println!("{:<6} {}", category.label(), tasks.count_in_category(category));
            }
        }

        Commands::Recover { force } => {
            let mut store = manager.into_store();
            let raw = store.recover(TASKS_KEY)?;
            let recovered = TaskList::from_json(&raw)?;

            if !force && !confirm("Restore tasks from backup? Current tasks will be replaced.")? {
                println!("Cancelled.");
                return Ok(());
            }

            store.set(TASKS_KEY, &recovered.to_json()?)?;
            println!("Recovered {} tasks from backup.", recovered.len());
        }

        Commands::Tui => app::run_tui(manager)?,
    }

    Ok(())
}

/// Ask user for confirmation
fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().to_lowercase() == "y")
}
