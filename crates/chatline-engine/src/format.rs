//! Formatting for webhook replies.
//!
//! Only two rules apply: `**text**` becomes bold and a newline starts a new
//! line. Everything else is shown as written.

use regex::Regex;
use std::sync::OnceLock;

fn bold_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    // `.` never matches `\n`, so bold runs stay on one line.
    PATTERN
        .get_or_init(|| Regex::new(r"\*\*(.*?)\*\*").ok())
        .as_ref()
}

/// A run of text with uniform styling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inline {
    /// The text, with markers removed.
    pub text: String,
    /// Whether the run was wrapped in `**`.
    pub bold: bool,
}

impl Inline {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            bold: false,
        }
    }

    fn bold(text: &str) -> Self {
        Self {
            text: text.to_string(),
            bold: true,
        }
    }
}

/// A formatted reply, one entry per line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormattedText {
    pub lines: Vec<Vec<Inline>>,
}

impl FormattedText {
    /// Text with markers removed and lines joined by `\n`.
    pub fn plain(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.iter().map(|run| run.text.as_str()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// HTML rendering with `<strong>` for bold runs and `<br>` between lines.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                html.push_str("<br>");
            }
            for run in line {
                if run.bold {
                    html.push_str("<strong>");
                    html.push_str(&escape_html(&run.text));
                    html.push_str("</strong>");
                } else {
                    html.push_str(&escape_html(&run.text));
                }
            }
        }
        html
    }
}

/// Split a reply into lines of plain and bold runs.
pub fn format_response(text: &str) -> FormattedText {
    let lines = text.split('\n').map(format_line).collect();
    FormattedText { lines }
}

fn format_line(line: &str) -> Vec<Inline> {
    let Some(pattern) = bold_pattern() else {
        return vec![Inline::plain(line)];
    };

    let mut runs = Vec::new();
    let mut last = 0;

    for caps in pattern.captures_iter(line) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last {
            runs.push(Inline::plain(&line[last..whole.start()]));
        }
        if !inner.as_str().is_empty() {
            runs.push(Inline::bold(inner.as_str()));
        }
        last = whole.end();
    }

    if last < line.len() {
        runs.push(Inline::plain(&line[last..]));
    }

    runs
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_markers_removed() {
        let formatted = format_response("hello **world**");
        assert_eq!(
            formatted.lines,
            vec![vec![Inline::plain("hello "), Inline::bold("world")]]
        );
        assert_eq!(formatted.plain(), "hello world");
        assert_eq!(formatted.to_html(), "hello <strong>world</strong>");
    }

    #[test]
    fn test_newlines_become_lines() {
        let formatted = format_response("uno\ndos\n\ntres");
        assert_eq!(formatted.lines.len(), 4);
        assert!(formatted.lines[2].is_empty());
        assert_eq!(formatted.to_html(), "uno<br>dos<br><br>tres");
    }

    #[test]
    fn test_bold_is_non_greedy() {
        let formatted = format_response("**a** and **b**");
        assert_eq!(
            formatted.lines[0],
            vec![Inline::bold("a"), Inline::plain(" and "), Inline::bold("b")]
        );
    }

    #[test]
    fn test_bold_does_not_cross_lines() {
        let formatted = format_response("**open\nclose**");
        assert_eq!(formatted.plain(), "**open\nclose**");
        assert!(formatted.lines.iter().flatten().all(|run| !run.bold));
    }

    #[test]
    fn test_unmatched_marker_kept() {
        let formatted = format_response("2 ** 3 = 8");
        assert_eq!(formatted.plain(), "2 ** 3 = 8");
    }

    #[test]
    fn test_empty_bold_dropped() {
        let formatted = format_response("a****b");
        assert_eq!(formatted.lines[0], vec![Inline::plain("a"), Inline::plain("b")]);
    }

    #[test]
    fn test_html_is_escaped() {
        let formatted = format_response("<script>**x & y**</script>");
        assert_eq!(
            formatted.to_html(),
            "&lt;script&gt;<strong>x &amp; y</strong>&lt;/script&gt;"
        );
    }
}
