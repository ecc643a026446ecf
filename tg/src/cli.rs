//! CLI argument parsing for todogather

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tg")]
#[command(author, version, about = "Gather markdown task list items into one TODO file", long_about = None)]
pub struct Cli {
    /// Directory to scan (default: notes)
    pub root: Option<PathBuf>,

    /// Summary file to write (default: notes/TODO.md)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// File name to skip while scanning (default: the output's file name)
    #[arg(long)]
    pub exclude: Option<String>,

    /// Include a Completed section
    #[arg(long)]
    pub include_done: bool,

    /// Leave out [[source]] links
    #[arg(long)]
    pub exclude_links: bool,

    /// Rerun every interval until interrupted
    #[arg(short, long)]
    pub watch: bool,

    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,
}
