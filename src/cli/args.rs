//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::config::{RenderStyle, ValueKind};

/// Build 2-3 trees from the command line and inspect them
#[derive(Parser, Debug)]
#[command(name = "twothree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug level: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file, layered over the global one
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// How values are parsed (overrides config)
    #[arg(long, value_enum, global = true)]
    pub kind: Option<ValueKind>,

    /// Output style (overrides config)
    #[arg(long, value_enum, global = true)]
    pub style: Option<RenderStyle>,

    /// Show node heights
    #[arg(long, global = true)]
    pub heights: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a tree from values (the first one seeds the tree) and print it
    Insert {
        #[arg(required = true)]
        values: Vec<String>,
    },

    /// Print the values breadth-first
    Bfs {
        #[arg(required = true)]
        values: Vec<String>,
    },

    /// Check invariants after every insertion and report the tree's size
    Check {
        #[arg(required = true)]
        values: Vec<String>,
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
    /// Show the effective configuration
    Show,
    /// Print a commented config template
    Template,
}
