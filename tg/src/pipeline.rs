//! One-shot and watch-mode runs of scan, aggregate and write

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use eyre::Result;
use tracing::{debug, info};

use crate::scanner::{self, ScanOptions};
use crate::writer::{self, OutputOptions};

/// Default delay between watch iterations
pub const DEFAULT_WATCH_INTERVAL: Duration = Duration::from_secs(1);

/// Everything a single pass needs
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Directory to scan
    pub root: PathBuf,
    /// Summary document to overwrite
    pub output: PathBuf,
    pub scan: ScanOptions,
    pub output_options: OutputOptions,
}

/// Counts from one pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Documents read and parsed
    pub documents: usize,
    pub pending: usize,
    pub completed: usize,
}

/// Scan `root`, then rewrite `output` from scratch
pub fn run_once(options: &RunOptions) -> Result<RunSummary> {
    let report = scanner::scan_tree(&options.root, &options.scan)?;
    let tasks = report.tasks;
    writer::save_tasks(&tasks, &options.output, &options.output_options)?;

    let completed = tasks.iter().filter(|t| t.completed).count();
    let summary = RunSummary {
        documents: report.documents,
        pending: tasks.len() - completed,
        completed,
    };

    info!(
        root = %options.root.display(),
        output = %options.output.display(),
        documents = summary.documents,
        pending = summary.pending,
        completed = summary.completed,
        "Summary written"
    );
    Ok(summary)
}

/// Cloneable flag used to end a watch loop from outside
#[derive(Debug, Clone, Default)]
pub struct StopToken {
    stopped: Arc<AtomicBool>,
}

impl StopToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the loop to stop after its current iteration
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

/// Re-run the pipeline every `interval` until `stop` is signalled
///
/// The first error aborts the loop and is returned. On a clean stop the
/// number of completed iterations is returned.
pub fn watch(options: &RunOptions, interval: Duration, stop: &StopToken) -> Result<u64> {
    info!(
        root = %options.root.display(),
        interval_ms = interval.as_millis() as u64,
        "Watching for task changes"
    );

    let mut iterations = 0u64;
    while !stop.is_stopped() {
        run_once(options)?;
        iterations += 1;

        if stop.is_stopped() {
            break;
        }
        thread::sleep(interval);
    }

    debug!(iterations, "Watch stopped");
    Ok(iterations)
}
