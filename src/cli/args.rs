//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::domain::EmployeeId;

/// Organizational hierarchy engine: reassign employees to supervisors with undo/redo
#[derive(Parser, Debug)]
#[command(name = "orgtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Hierarchy file (default: configured file, else built-in sample)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the hierarchy as a tree
    Show {
        /// Print as TOML hierarchy file instead
        #[arg(long)]
        toml: bool,
    },

    /// Show one employee with supervisor and subordinates
    Lookup {
        /// Employee id
        id: EmployeeId,
    },

    /// Apply edits in order and show the resulting tree
    Apply {
        /// Edits: "move <employee> <supervisor>", "undo", "redo"
        #[arg(required = true)]
        commands: Vec<String>,
        /// Print the result as TOML hierarchy file
        #[arg(long)]
        toml: bool,
    },

    /// Apply edits in order and show the transition log
    History {
        /// Edits: "move <employee> <supervisor>", "undo", "redo"
        commands: Vec<String>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective settings
    Show,
    /// Show global config file path
    Path,
}
