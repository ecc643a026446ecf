//! Document scanner: walks a notes tree and collects task items

use std::fs;
use std::path::Path;

use eyre::{Context, Result};
use tracing::debug;
use walkdir::WalkDir;

use crate::task::Task;

/// Comment that excludes a whole document when present on any line
pub const DEFAULT_EXCLUDE_MARKER: &str = "<!-- exclude TODO -->";

/// File whose presence excludes every document in its directory
pub const DEFAULT_OPT_OUT_FILE: &str = ".exclude_todos";

/// Extension of documents that are scanned
pub const DEFAULT_EXTENSION: &str = "md";

/// Options controlling which documents are scanned
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Document extension, without the dot
    pub extension: String,
    /// File name to skip, usually the output document of a previous run
    pub exclude: Option<String>,
    /// In-document comment that suppresses the document
    pub exclude_marker: String,
    /// Marker file that suppresses its whole directory
    pub opt_out_file: String,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            exclude: None,
            exclude_marker: DEFAULT_EXCLUDE_MARKER.to_string(),
            opt_out_file: DEFAULT_OPT_OUT_FILE.to_string(),
        }
    }
}

/// Why a document contributed no tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    ExcludedName,
    OptOutFile,
    ExcludeMarker,
}

/// Parse every task list item in a document's text, in line order
pub fn parse_tasks(content: &str) -> Vec<Task> {
    content.lines().filter_map(Task::from_line).collect()
}

/// Result of scanning a tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Tasks in document order
    pub tasks: Vec<Task>,
    /// Documents that were read and parsed (skipped ones are not counted)
    pub documents: usize,
}

/// Recursively scan `root`, returning the tasks and the number of documents parsed
///
/// Documents are visited in file name order within each directory. Tasks
/// from one document stay contiguous and in line order, each tagged with
/// the document's file name. Symlinked documents are followed.
pub fn scan_tree(root: impl AsRef<Path>, options: &ScanOptions) -> Result<ScanReport> {
    let root = root.as_ref();
    let mut report = ScanReport::default();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
        // path().is_file() follows symlinks, entry.file_type() does not
        if !entry.path().is_file() || !has_extension(entry.path(), &options.extension) {
            continue;
        }

        if let Some(found) = scan_document(entry.path(), options)? {
            report.documents += 1;
            report.tasks.extend(found);
        }
    }

    debug!(
        root = %root.display(),
        documents = report.documents,
        tasks = report.tasks.len(),
        "Scan complete"
    );
    Ok(report)
}

/// Recursively find all task items under `root`
pub fn find_tasks(root: impl AsRef<Path>, options: &ScanOptions) -> Result<Vec<Task>> {
    scan_tree(root, options).map(|report| report.tasks)
}

/// Scan one document, returning `None` when an exclusion rule applies
pub fn scan_document(path: &Path, options: &ScanOptions) -> Result<Option<Vec<Task>>> {
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();

    if let Some(reason) = skip_before_read(path, &filename, options) {
        debug!(path = %path.display(), ?reason, "Skipping document");
        return Ok(None);
    }

    let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;

    if content.lines().any(|line| line.contains(&options.exclude_marker)) {
        debug!(path = %path.display(), reason = ?SkipReason::ExcludeMarker, "Skipping document");
        return Ok(None);
    }

    let tasks = parse_tasks(&content)
        .into_iter()
        .map(|task| task.with_source(filename.as_str()))
        .collect();
    Ok(Some(tasks))
}

fn skip_before_read(path: &Path, filename: &str, options: &ScanOptions) -> Option<SkipReason> {
    if options.exclude.as_deref() == Some(filename) {
        return Some(SkipReason::ExcludedName);
    }

    let opt_out = path.parent().map(|dir| dir.join(&options.opt_out_file));
    if opt_out.is_some_and(|marker| marker.exists()) {
        return Some(SkipReason::OptOutFile);
    }

    None
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().map(|e| e == extension).unwrap_or(false)
}
