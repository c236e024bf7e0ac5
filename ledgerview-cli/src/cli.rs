//! Command-line definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "ledgerview", about = "Filter, sort and page portal datasets")]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print one page of the filtered dataset
    Show {
        #[command(flatten)]
        source: Source,
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Print the distinct choices for a filter key
    Options {
        /// JSON array of records
        #[arg(long)]
        data: PathBuf,
        /// Dot path to build options for
        #[arg(long)]
        key: String,
    },
    /// Activate a row action on a visible row
    Action {
        #[command(flatten)]
        source: Source,
        #[command(flatten)]
        view: ViewArgs,
        /// Position of the row in the visible (filtered) sequence
        #[arg(long)]
        row: usize,
        /// view, edit, delete or a custom button token
        #[arg(long)]
        mode: String,
    },
    /// Re-read the data file on an interval, keeping filters applied
    Watch {
        #[command(flatten)]
        source: Source,
        #[command(flatten)]
        view: ViewArgs,
        /// Seconds between refreshes
        #[arg(long, default_value_t = 5)]
        interval: u64,
        /// Stop after this many refreshes
        #[arg(long)]
        ticks: Option<u64>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct Source {
    /// JSON array of records
    #[arg(long)]
    pub data: PathBuf,
    /// TOML table declaration (columns, filters, actions, page length)
    #[arg(long)]
    pub table: PathBuf,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ViewArgs {
    /// Scalar filter, KEY=VALUE (repeatable)
    #[arg(long = "filter", value_name = "KEY=VALUE")]
    pub filters: Vec<String>,
    /// Multi-select filter, KEY=A,B,C (repeatable)
    #[arg(long = "select", value_name = "KEY=A,B")]
    pub selects: Vec<String>,
    /// Date range filter, KEY=START..END, either side may be empty (repeatable)
    #[arg(long = "range", value_name = "KEY=START..END")]
    pub ranges: Vec<String>,
    /// Free-text search across searchable columns
    #[arg(long)]
    pub search: Option<String>,
    /// Sort column, optionally COLUMN:desc
    #[arg(long)]
    pub sort: Option<String>,
    /// Page to show (0-based)
    #[arg(long, default_value_t = 0)]
    pub page: usize,
}
