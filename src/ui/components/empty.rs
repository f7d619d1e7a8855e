//! Empty state component renderer.
//!
//! This module renders the centered message shown when there is nothing to
//! swipe: no candidate matched the quiz, or every card was rejected.

use crate::ui::helpers::{center_padding, char_len, truncate};
use crate::ui::theme;
use crate::ui::viewmodel::EmptyState;
use std::io::{self, Write};

/// Label of the action that returns to the quiz.
pub const RETRY_LABEL: &str = "Tentar Novamente";

/// Renders the empty state message, with the retry button when `retry` is set.
///
/// # Layout
///
/// ```text
/// [blank line]
/// [left padding] MESSAGE
/// [left padding] subtitle
/// [blank line]
/// [left padding] [ Tentar Novamente ]
/// ```
///
/// # Errors
///
/// Propagates write errors from `out`.
pub fn render_empty_state<W: Write + ?Sized>(
    out: &mut W,
    empty: &EmptyState,
    retry: bool,
    cols: usize,
) -> io::Result<()> {
    writeln!(out)?;
    centered(out, &format!("{}{}", theme::bold(), theme::fg(theme::TEXT)), &empty.message, cols)?;
    centered(out, &format!("{}{}", theme::dim(), theme::fg(theme::TEXT_DIM)), &empty.subtitle, cols)?;
    if !retry {
        return Ok(());
    }
    writeln!(out)?;
    centered(
        out,
        &format!("{}{}{}", theme::bold(), theme::fg(theme::SURFACE), theme::bg(theme::TEXT)),
        &format!(" {RETRY_LABEL} "),
        cols,
    )
}

fn centered<W: Write + ?Sized>(out: &mut W, style: &str, text: &str, cols: usize) -> io::Result<()> {
    let text = truncate(text, cols);
    let padding = center_padding(char_len(&text), cols);
    writeln!(out, "{}{style}{text}{}", " ".repeat(padding), theme::reset())
}
