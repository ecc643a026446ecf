//! todogather - collect markdown task list items into one summary
//!
//! Walks a notes tree, picks out GitHub flavored task list lines
//! (`- [ ] ...` / `- [x] ...`) and rewrites a single summary document with
//! pending tasks grouped by source file and, optionally, completed ones.
//!
//! # Example
//!
//! ```ignore
//! use todogather::{OutputOptions, ScanOptions, find_tasks, save_tasks};
//!
//! let scan = ScanOptions { exclude: Some("TODO.md".into()), ..Default::default() };
//! let tasks = find_tasks("notes", &scan)?;
//! save_tasks(&tasks, "notes/TODO.md", &OutputOptions::default())?;
//! ```

pub mod cli;
pub mod config;
pub mod matcher;
pub mod pipeline;
pub mod scanner;
pub mod task;
pub mod writer;

pub use matcher::{LineMatch, match_line};
pub use pipeline::{RunOptions, RunSummary, StopToken, run_once, watch};
pub use scanner::{ScanOptions, ScanReport, find_tasks, parse_tasks, scan_tree};
pub use task::{ParseTaskError, Task};
pub use writer::{OutputOptions, render_summary, save_tasks};
