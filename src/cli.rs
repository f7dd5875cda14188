//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - serve: run the MCP server on stdio (default when omitted)
//! - tools: print the registered tool table

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Toolbench - a schema-validated MCP tool server
#[derive(Parser, Debug)]
#[command(name = "toolbench")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the MCP server on stdio
    Serve {
        /// SQLite database path (defaults to the platform data directory)
        #[arg(long)]
        store: Option<PathBuf>,

        /// Keep posts in memory instead of SQLite
        #[arg(long)]
        memory: bool,
    },

    /// Print the registered tools
    Tools,
}
