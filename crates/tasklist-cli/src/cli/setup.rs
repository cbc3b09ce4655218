use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tasks")]
#[command(about = "A small task list stored on this machine", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Read configuration from this TOML file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Namespace to operate on (overrides config)
    #[arg(short, long, global = true)]
    pub namespace: Option<String>,

    /// Directory holding the task files (overrides config)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output (debug logging to stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a task
    #[command(alias = "a")]
    Add {
        /// Title of the task (a placeholder is used when empty)
        #[arg(num_args = 0..)]
        title: Vec<String>,
    },

    /// List tasks in order
    #[command(alias = "ls")]
    List {
        /// Only show finished tasks
        #[arg(long, conflicts_with = "remaining")]
        done: bool,

        /// Only show unfinished tasks
        #[arg(long)]
        remaining: bool,
    },

    /// Flip one or more tasks between done and not done
    #[command(alias = "t")]
    Toggle {
        /// Positions of the tasks (e.g. 1 3 5)
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<usize>,
    },

    /// Give a task a new title; an empty title deletes it
    #[command(alias = "mv")]
    Rename {
        /// Position of the task
        index: usize,

        /// New title
        #[arg(num_args = 0..)]
        title: Vec<String>,
    },

    /// Delete one or more tasks
    #[command(alias = "rm")]
    Remove {
        /// Positions of the tasks (e.g. 1 3 5)
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<usize>,
    },

    /// Delete every finished task
    ClearDone,

    /// Mark everything done, or everything undone if all are done already
    ToggleAll,

    /// Show done/remaining counts
    Stats,
}
