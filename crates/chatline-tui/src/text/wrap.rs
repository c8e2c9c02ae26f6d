//! Word wrapping for plain and styled text.

use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthChar;

/// Wrap plain text to `width` columns.
///
/// Explicit newlines always start a new line; an empty line is kept as an
/// empty entry so that blank lines survive.
pub fn wrap_plain(text: &str, width: usize) -> Vec<String> {
    let mut result = Vec::new();
    for line in text.split('\n') {
        if width == 0 {
            result.push(line.to_string());
            continue;
        }
        let wrapped = textwrap::wrap(line, width);
        if wrapped.is_empty() {
            result.push(String::new());
        } else {
            result.extend(wrapped.into_iter().map(std::borrow::Cow::into_owned));
        }
    }
    result
}

/// Wrap one line of styled spans to `width` columns, preserving styles.
///
/// Breaks at spaces; words longer than the width are split. Runs of spaces
/// collapse to a single space at wrap points.
pub fn wrap_styled(spans: &[Span<'static>], width: usize) -> Vec<Line<'static>> {
    let cells: Vec<(char, Style)> = spans
        .iter()
        .flat_map(|span| span.content.chars().map(move |ch| (ch, span.style)))
        .collect();

    if width == 0 || cells.is_empty() {
        return vec![Line::from(spans.to_vec())];
    }

    let words: Vec<&[(char, Style)]> = cells
        .split(|(ch, _)| *ch == ' ')
        .filter(|word| !word.is_empty())
        .collect();

    let mut lines: Vec<Vec<(char, Style)>> = Vec::new();
    let mut current: Vec<(char, Style)> = Vec::new();
    let mut current_width = 0;

    for word in words {
        let word_width = cells_width(word);

        if current_width > 0 && current_width + 1 + word_width > width {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }
        if current_width > 0 {
            let space_style = word.first().map(|(_, style)| *style).unwrap_or_default();
            current.push((' ', space_style));
            current_width += 1;
        }

        for &(ch, style) in word {
            let ch_width = ch.width().unwrap_or(0);
            if current_width + ch_width > width && current_width > 0 {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            current.push((ch, style));
            current_width += ch_width;
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }

    lines.into_iter().map(|cells| to_line(&cells)).collect()
}

fn cells_width(cells: &[(char, Style)]) -> usize {
    cells.iter().map(|(ch, _)| ch.width().unwrap_or(0)).sum()
}

/// Merge adjacent cells with the same style into spans.
fn to_line(cells: &[(char, Style)]) -> Line<'static> {
    let mut spans = Vec::new();
    let mut text = String::new();
    let mut current_style: Option<Style> = None;

    for &(ch, style) in cells {
        match current_style {
            Some(s) if s == style => text.push(ch),
            Some(s) => {
                spans.push(Span::styled(std::mem::take(&mut text), s));
                current_style = Some(style);
                text.push(ch);
            }
            None => {
                current_style = Some(style);
                text.push(ch);
            }
        }
    }

    if let Some(style) = current_style {
        spans.push(Span::styled(text, style));
    }

    Line::from(spans)
}
