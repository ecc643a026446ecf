//! Aggregates tasks into the summary document
//!
//! # Output layout
//!
//! ```text
//! # TODOs
//! ## Pending
//! - [[a.md]]
//!     - [ ] buy milk
//! - [[b.md]]
//!     - [ ] call mom
//!
//! ## Completed
//! - [x] [[a.md]] pay rent
//! ```
//!
//! The Pending section is omitted when there are no pending tasks. The
//! Completed section is written only when requested and non-empty.

use std::fs;
use std::path::Path;

use eyre::{Context, Result};
use tracing::debug;

use crate::task::Task;

/// Top-level heading of the summary document
pub const TITLE: &str = "# TODOs";

const PENDING_HEADING: &str = "## Pending";
const COMPLETED_HEADING: &str = "## Completed";
const GROUP_INDENT: &str = "    ";

/// Options for rendering the summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputOptions {
    /// Emit the Completed section
    pub include_completed: bool,
    /// Drop all `[[source]]` references
    pub exclude_links: bool,
}

/// Tasks sharing one source document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceGroup<'a> {
    pub source: &'a str,
    pub tasks: Vec<&'a Task>,
}

/// Group tasks by source, sources in first-encounter order
pub fn group_by_source<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Vec<SourceGroup<'a>> {
    let mut groups: Vec<SourceGroup<'a>> = Vec::new();

    for task in tasks {
        match groups.iter_mut().find(|g| g.source == task.source) {
            Some(group) => group.tasks.push(task),
            None => groups.push(SourceGroup {
                source: &task.source,
                tasks: vec![task],
            }),
        }
    }

    groups
}

/// Render the full summary document
pub fn render_summary(tasks: &[Task], options: &OutputOptions) -> String {
    let mut out = String::new();
    out.push_str(TITLE);
    out.push('\n');

    let pending = tasks.iter().filter(|t| !t.completed);
    let groups = group_by_source(pending);
    if !groups.is_empty() {
        out.push_str(PENDING_HEADING);
        out.push('\n');
        for group in &groups {
            out.push_str(&group_heading(group.source, options.exclude_links));
            out.push('\n');
            for task in &group.tasks {
                out.push_str(GROUP_INDENT);
                out.push_str(&task.to_markdown(false));
                out.push('\n');
            }
        }
    }

    if options.include_completed {
        let completed: Vec<&Task> = tasks.iter().filter(|t| t.completed).collect();
        if !completed.is_empty() {
            out.push('\n');
            out.push_str(COMPLETED_HEADING);
            out.push('\n');
            for task in completed {
                out.push_str(&task.to_markdown(!options.exclude_links));
                out.push('\n');
            }
        }
    }

    out
}

/// Overwrite `path` with the rendered summary
///
/// The document is rendered in full before the file is touched.
pub fn save_tasks(tasks: &[Task], path: impl AsRef<Path>, options: &OutputOptions) -> Result<()> {
    let path = path.as_ref();
    let content = render_summary(tasks, options);

    fs::write(path, &content).with_context(|| format!("Failed to write {}", path.display()))?;
    debug!(path = %path.display(), bytes = content.len(), "Wrote summary");
    Ok(())
}

fn group_heading(source: &str, exclude_links: bool) -> String {
    if exclude_links || source.is_empty() {
        format!("- {}", source)
    } else {
        format!("- [[{}]]", source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> Vec<Task> {
        vec![
            Task::new("buy milk", false).with_source("a.md"),
            Task::new("pay rent", true).with_source("a.md"),
            Task::new("call mom", false).with_source("b.md"),
        ]
    }

    #[test]
    fn test_group_by_source_first_encounter_order() {
        let tasks = vec![
            Task::new("a1", false).with_source("a.md"),
            Task::new("b1", false).with_source("b.md"),
            Task::new("a2", false).with_source("a.md"),
        ];
        let groups = group_by_source(&tasks);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].source, "a.md");
        assert_eq!(groups[0].tasks, vec![&tasks[0], &tasks[2]]);
        assert_eq!(groups[1].source, "b.md");
        assert_eq!(groups[1].tasks, vec![&tasks[1]]);
    }

    #[test]
    fn test_render_with_completed() {
        let options = OutputOptions {
            include_completed: true,
            exclude_links: false,
        };
        let expected = "\
# TODOs
## Pending
- [[a.md]]
    - [ ] buy milk
- [[b.md]]
    - [ ] call mom

## Completed
- [x] [[a.md]] pay rent
";
        assert_eq!(render_summary(&sample(), &options), expected);
    }

    #[test]
    fn test_render_omits_completed_by_default() {
        let expected = "\
# TODOs
## Pending
- [[a.md]]
    - [ ] buy milk
- [[b.md]]
    - [ ] call mom
";
        assert_eq!(render_summary(&sample(), &OutputOptions::default()), expected);
    }

    #[test]
    fn test_render_exclude_links() {
        let options = OutputOptions {
            include_completed: true,
            exclude_links: true,
        };
        let rendered = render_summary(&sample(), &options);
        assert!(!rendered.contains("[["));
        assert!(rendered.contains("- a.md\n    - [ ] buy milk\n"));
        assert!(rendered.ends_with("## Completed\n- [x] pay rent\n"));
    }

    #[test]
    fn test_render_task_without_source_has_no_empty_link() {
        let tasks = vec![Task::new("orphan", false)];
        let rendered = render_summary(&tasks, &OutputOptions::default());
        assert!(!rendered.contains("[[]]"));
        assert_eq!(rendered, "# TODOs\n## Pending\n- \n    - [ ] orphan\n");
    }

    #[test]
    fn test_render_no_pending_omits_section() {
        let tasks = vec![Task::new("done", true).with_source("a.md")];
        let options = OutputOptions {
            include_completed: true,
            ..Default::default()
        };
        assert_eq!(
            render_summary(&tasks, &options),
            "# TODOs\n\n## Completed\n- [x] [[a.md]] done\n"
        );
    }

    #[test]
    fn test_render_empty() {
        let options = OutputOptions {
            include_completed: true,
            ..Default::default()
        };
        assert_eq!(render_summary(&[], &options), "# TODOs\n");
    }

    #[test]
    fn test_grouping_counts() {
        let tasks = vec![
            Task::new("a1", false).with_source("A"),
            Task::new("a2", false).with_source("A"),
            Task::new("b1", false).with_source("B"),
            Task::new("a3", true).with_source("A"),
        ];
        let options = OutputOptions {
            include_completed: true,
            ..Default::default()
        };
        let rendered = render_summary(&tasks, &options);
        let (pending, completed) = rendered.split_once("## Completed\n").unwrap();

        assert_eq!(pending.matches("- [[").count(), 2);
        assert_eq!(pending.matches("    - [ ] ").count(), 3);
        assert_eq!(completed.lines().count(), 1);
    }

    #[test]
    fn test_save_overwrites() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("TODO.md");
        fs::write(&path, "stale content that is much longer than the new summary\n".repeat(10)).unwrap();

        save_tasks(&sample(), &path, &OutputOptions::default()).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, render_summary(&sample(), &OutputOptions::default()));
    }

    #[test]
    fn test_save_to_missing_directory_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing").join("TODO.md");
        let err = save_tasks(&sample(), &path, &OutputOptions::default()).unwrap_err();
        assert!(err.to_string().contains("TODO.md"));
    }
}
