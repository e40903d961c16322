//! CLI commands and argument parsing

use crate::types::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "directory-pager.yaml";

/// Stream directory users page by page
#[derive(Parser, Debug)]
#[command(name = "directory-pager")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Client configuration file (YAML or JSON)
    #[arg(
        short = 'C',
        long,
        global = true,
        env = "DIRECTORY_PAGER_CONFIG",
        default_value = DEFAULT_CONFIG_FILE
    )]
    pub config: PathBuf,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List users, one line per record, in server order
    Users {
        /// Page size override
        #[arg(long)]
        page_size: Option<u32>,

        /// OData filter override
        #[arg(long)]
        filter: Option<String>,

        /// Stop with an error after this many pages
        #[arg(long)]
        max_pages: Option<u32>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Validate the configuration file
    Validate,
}
