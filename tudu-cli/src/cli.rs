use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tudu")]
#[command(about = concat!(
    " _             _       \n",
    "| |_ _   _  __| |_   _ \n",
    "| __| | | |/ _` | | | |\n",
    "| |_| |_| | (_| | |_| |\n",
    " \\__|\\__,_|\\__,_|\\__,_|\n",
    "~home, work, hobby: pick one and get on with it~"
))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_version = concat!(
    "v",
    env!("CARGO_PKG_VERSION"),
    "\nCodeName: ",
    env!("CODENAME")
))]
pub struct Cli {
    /// Read configuration from this file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Store tasks in this directory for this invocation
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Adds a task
    Add {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
        /// Category for the task (home, work, hobby)
        #[arg(long, short = 'C', value_name = "CATEGORY")]
        category: Option<String>,
    },

    /// Lists tasks, optionally filtered
    List {
        /// all, finished, unfinished, home, work or hobby
        #[arg(long, short = 'f', value_name = "FILTER")]
        filter: Option<String>,
        /// Use compact one-line format
        #[arg(long, short = 'c', conflicts_with = "detailed")]
        compact: bool,
        /// Use detailed format with full info
        #[arg(long)]
        detailed: bool,
        /// Print the filtered tasks as JSON
        #[arg(long, conflicts_with_all = ["compact", "detailed"])]
        json: bool,
        /// Disable colors
        #[arg(long)]
        no_color: bool,
    },

    /// Toggles task completion status
    #[command(visible_alias = "check")]
    Toggle {
        index: usize,
    },

    /// Replaces a task's text and/or category; completion is reset
    Edit {
        index: usize,
        /// New text (keeps the current text when omitted)
        #[arg(num_args = 0..)]
        text: Vec<String>,
        /// New category (keeps the current category when omitted)
        #[arg(long, short = 'C', value_name = "CATEGORY")]
        category: Option<String>,
    },

    /// Removes a task
    #[command(visible_alias = "remove")]
    Delete {
        index: usize,
    },

    /// Shows how many tasks each category holds
    Categories,

    /// Restores tasks from the backup file
    Recover {
        /// Skip confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Launches the interactive terminal UI
    Tui,
}
