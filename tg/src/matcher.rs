//! Line matcher for GitHub flavored markdown task list items
//!
//! Recognizes `- [ ] text`, `-[ ] text`, `- [x] text` and `- [X] text`,
//! with optional leading indentation. Anything else is not a task.

use regex::Regex;
use std::sync::LazyLock;

/// Task list item pattern. Group 1 is the checkbox marker, `text` the payload.
pub const TASK_PATTERN: &str = r"^\s*-\s?\[([xX ])\]\s+(?P<text>.*)$";

static TASK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(TASK_PATTERN).expect("task pattern is valid"));

/// A line recognized as a task list item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineMatch<'a> {
    /// True for `[x]` / `[X]`
    pub completed: bool,
    /// Everything after the checkbox and its separating whitespace
    pub text: &'a str,
}

/// Match a single line, without its line terminator
///
/// Returns `None` for lines that are not task items. A trailing `\n` or
/// `\r\n` is stripped before matching so callers may pass raw lines.
pub fn match_line(line: &str) -> Option<LineMatch<'_>> {
    let line = line.strip_suffix('\n').unwrap_or(line);
    let line = line.strip_suffix('\r').unwrap_or(line);

    let caps = TASK_RE.captures(line)?;
    let marker = caps.get(1)?.as_str();
    let text = caps.name("text")?.as_str();

    Some(LineMatch {
        completed: marker.eq_ignore_ascii_case("x"),
        text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_pending_variants() {
        for line in ["- [ ] hello", "-[ ] hello", "  - [ ] hello", "\t-[ ] hello"] {
            let m = match_line(line).unwrap_or_else(|| panic!("{line:?} should match"));
            assert!(!m.completed, "{line:?}");
            assert_eq!(m.text, "hello", "{line:?}");
        }
    }

    #[test]
    fn test_match_completed_variants() {
        for line in ["- [x] hello", "-[x] hello", "- [X] hello", "-[X] hello"] {
            let m = match_line(line).unwrap_or_else(|| panic!("{line:?} should match"));
            assert!(m.completed, "{line:?}");
            assert_eq!(m.text, "hello", "{line:?}");
        }
    }

    #[test]
    fn test_non_matching_lines() {
        for line in [
            "",
            "plain text",
            "- plain bullet",
            "- [] empty brackets",
            "- [y] wrong marker",
            "- [xx] double marker",
            "-  [ ] two spaces before bracket",
            "- [ ]no separator",
            "* [ ] star bullet",
            "# - [ ] heading",
        ] {
            assert!(match_line(line).is_none(), "{line:?} should not match");
        }
    }

    #[test]
    fn test_multiple_spaces_consumed() {
        let m = match_line("- [ ]     spaced out").unwrap();
        assert_eq!(m.text, "spaced out");
    }

    #[test]
    fn test_trailing_content_kept() {
        let m = match_line("- [ ] keep [[link]] and trailing  ").unwrap();
        assert_eq!(m.text, "keep [[link]] and trailing  ");
    }

    #[test]
    fn test_line_terminator_stripped() {
        assert_eq!(match_line("- [ ] unix\n").unwrap().text, "unix");
        assert_eq!(match_line("- [x] dos\r\n").unwrap().text, "dos");
    }

    #[test]
    fn test_nested_checkbox_is_payload() {
        let m = match_line("- [ ] - [x] inner").unwrap();
        assert!(!m.completed);
        assert_eq!(m.text, "- [x] inner");
    }
}
