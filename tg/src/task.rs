//! Task model and its markdown rendering

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::matcher::{self, TASK_PATTERN};

/// Errors from parsing a single line as a task
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseTaskError {
    #[error("{line:?} did not match {pattern}")]
    NoMatch { line: String, pattern: &'static str },
}

/// One task list item found in a markdown document
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Task {
    /// Payload after the checkbox
    pub text: String,
    /// File name (not path) of the document the task came from, empty until assigned
    pub source: String,
    /// Whether the checkbox was ticked
    pub completed: bool,
}

impl Task {
    /// Create a task without a source
    ///
    /// Leading whitespace is dropped, as the matcher would consume it as the
    /// separator. `text` must be a single line.
    pub fn new(text: impl Into<String>, completed: bool) -> Self {
        let text = text.into();
        let text = match text.trim_start() {
            trimmed if trimmed.len() == text.len() => text,
            trimmed => trimmed.to_string(),
        };
        Self {
            text,
            source: String::new(),
            completed,
        }
    }

    /// Set the source document name
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Build a task from a line, or `None` if the line is not a task item
    pub fn from_line(line: &str) -> Option<Self> {
        matcher::match_line(line).map(|m| Self::new(m.text, m.completed))
    }

    /// Render as a markdown task list line
    ///
    /// The `[[source]]` prefix is written only when a source is set and
    /// `include_link` is true.
    pub fn to_markdown(&self, include_link: bool) -> String {
        let checkbox = if self.completed { "- [x]" } else { "- [ ]" };
        if include_link && !self.source.is_empty() {
            format!("{} [[{}]] {}", checkbox, self.source, self.text)
        } else {
            format!("{} {}", checkbox, self.text)
        }
    }
}

impl FromStr for Task {
    type Err = ParseTaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_line(s).ok_or_else(|| ParseTaskError::NoMatch {
            line: s.to_string(),
            pattern: TASK_PATTERN,
        })
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_markdown(true))
    }
}
