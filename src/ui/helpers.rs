//! Shared rendering utilities.
//!
//! Text measurement, wrapping and emphasis handling used by several
//! components. All widths are in characters, not bytes.

use crate::ui::theme;

/// A run of description text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Plain(&'a str),
    /// Text that was wrapped in `**` markers.
    Emphasis(&'a str),
    /// A "Curiosidade" heading that starts a new paragraph.
    Heading(&'a str),
}

const CURIOSITY: &str = "Curiosidade";

/// Splits a description into plain, emphasized and heading segments.
///
/// An unterminated `**` is kept as plain text.
///
/// # Example
///
/// ```rust
/// use unimatch::ui::helpers::{segments, Segment};
///
/// assert_eq!(
///     segments("Em **Roma**."),
///     vec![Segment::Plain("Em "), Segment::Emphasis("Roma"), Segment::Plain(".")]
/// );
/// ```
#[must_use]
pub fn segments(text: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let marker = rest.find("**");
        let heading = rest.find(CURIOSITY);
        match (marker, heading) {
            (_, Some(h)) if marker.map_or(true, |m| h < m) => {
                push_plain(&mut out, &rest[..h]);
                let mut end = h + CURIOSITY.len();
                if rest[end..].starts_with(':') {
                    end += 1;
                }
                out.push(Segment::Heading(&rest[h..end]));
                rest = &rest[end..];
            }
            (Some(m), _) => match rest[m + 2..].find("**") {
                Some(close) => {
                    push_plain(&mut out, &rest[..m]);
                    out.push(Segment::Emphasis(&rest[m + 2..m + 2 + close]));
                    rest = &rest[m + 2 + close + 2..];
                }
                None => {
                    push_plain(&mut out, rest);
                    rest = "";
                }
            },
            _ => {
                push_plain(&mut out, rest);
                rest = "";
            }
        }
    }
    out
}

fn push_plain<'a>(out: &mut Vec<Segment<'a>>, text: &'a str) {
    if !text.is_empty() {
        out.push(Segment::Plain(text));
    }
}

/// Renders a description as styled lines no wider than `width`.
///
/// Emphasis uses `highlight` in bold; headings start a new paragraph.
#[must_use]
pub fn styled_description(text: &str, highlight: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;

    let mut after_space = true;

    for segment in segments(text) {
        let (words, style): (&str, Option<String>) = match segment {
            Segment::Plain(t) => (t, None),
            Segment::Emphasis(t) => (t, Some(format!("{}{}", theme::bold(), theme::fg(highlight)))),
            Segment::Heading(t) => {
                flush(&mut line, &mut line_len, &mut lines);
                lines.push(String::new());
                (t, Some(format!("{}{}", theme::bold(), theme::fg(highlight))))
            }
        };
        let glue_first = !after_space && !words.starts_with(char::is_whitespace);
        for (index, word) in words.split_whitespace().enumerate() {
            let word_len = char_len(word);
            let glued = index == 0 && glue_first;
            if line_len > 0 && !glued && line_len + 1 + word_len > width {
                flush(&mut line, &mut line_len, &mut lines);
            }
            if line_len > 0 && !glued {
                line.push(' ');
                line_len += 1;
            }
            match &style {
                Some(style) => {
                    line.push_str(style);
                    line.push_str(word);
                    line.push_str(theme::reset());
                }
                None => line.push_str(word),
            }
            line_len += word_len;
        }
        if !words.is_empty() {
            after_space = words.ends_with(char::is_whitespace);
        }
    }
    flush(&mut line, &mut line_len, &mut lines);
    lines
}

fn flush(line: &mut String, line_len: &mut usize, lines: &mut Vec<String>) {
    if *line_len > 0 {
        lines.push(std::mem::take(line));
        *line_len = 0;
    }
}

/// Number of characters in `text`.
#[must_use]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Number of characters in `text` that occupy a cell, skipping ANSI
/// escape sequences.
#[must_use]
pub fn visible_len(text: &str) -> usize {
    let mut len = 0;
    let mut in_escape = false;
    for c in text.chars() {
        match (in_escape, c) {
            (false, '\u{001b}') => in_escape = true,
            (true, 'm') => in_escape = false,
            (true, _) => {}
            (false, _) => len += 1,
        }
    }
    len
}

/// Truncates `text` to `width` characters, ending with `…` when cut.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if char_len(text) <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{kept}…")
}

/// Left padding that centres `len` characters in `cols`.
#[must_use]
pub const fn center_padding(len: usize, cols: usize) -> usize {
    cols.saturating_sub(len) / 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curiosity_heading_is_split_out() {
        assert_eq!(
            segments("Antiga. Curiosidade: tem **gatos**"),
            vec![
                Segment::Plain("Antiga. "),
                Segment::Heading("Curiosidade:"),
                Segment::Plain(" tem "),
                Segment::Emphasis("gatos"),
            ]
        );
    }

    #[test]
    fn unterminated_marker_stays_plain() {
        assert_eq!(segments("a ** b"), vec![Segment::Plain("a ** b")]);
    }

    #[test]
    fn wrapping_respects_visible_width() {
        let lines = styled_description("uma **universidade** muito antiga", "#FDE68A", 16);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("uma "));
        assert!(lines[0].contains("universidade"));
        assert_eq!(lines[1], "muito antiga");
    }

    #[test]
    fn punctuation_stays_attached_to_emphasis() {
        let lines = styled_description("Em **Roma**.", "#FDE68A", 40);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with(&format!("Roma{}.", theme::reset())));
        assert!(lines[0].starts_with("Em "));
    }

    #[test]
    fn visible_len_ignores_escapes() {
        let styled = format!("{}Roma{}", theme::fg("#FDE68A"), theme::reset());
        assert_eq!(visible_len(&styled), 4);
        assert_eq!(visible_len("Università"), 10);
    }

    #[test]
    fn truncate_marks_cut_text() {
        assert_eq!(truncate("Università", 20), "Università");
        assert_eq!(truncate("Università", 5), "Univ…");
    }
}
