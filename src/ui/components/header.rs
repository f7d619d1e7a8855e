//! Header component renderer.
//!
//! This module renders the title bar with centered text on the brand colour,
//! followed by the swipe progress while a deck is active.

use crate::ui::helpers::{center_padding, char_len};
use crate::ui::theme;
use crate::ui::viewmodel::HeaderInfo;
use std::io::{self, Write};

/// Width of the progress bar in cells.
const PROGRESS_WIDTH: usize = 20;

/// Renders the header title bar.
///
/// Displays the title centered horizontally with bold styling, padded to fill
/// the whole width. When `header.progress` is set a second line shows how many
/// cards have been decided.
///
/// # Layout
///
/// ```text
/// [left padding] TITLE [right padding]
///        ██████░░░░░░░░░░░░░░ 3/10
/// ```
///
/// # Errors
///
/// Propagates write errors from `out`.
pub fn render_header<W: Write + ?Sized>(out: &mut W, header: &HeaderInfo, cols: usize) -> io::Result<()> {
    let title_len = char_len(&header.title);
    let padding = center_padding(title_len, cols);

    write!(out, "{}{}{}", theme::bold(), theme::fg(theme::TEXT), theme::bg(theme::BRAND))?;
    write!(out, "{}", " ".repeat(padding))?;
    write!(out, "{}", header.title)?;
    write!(out, "{}", " ".repeat(cols.saturating_sub(padding + title_len)))?;
    writeln!(out, "{}", theme::reset())?;

    if let Some((decided, total)) = header.progress {
        let line = progress_line(decided, total);
        let padding = center_padding(char_len(&line), cols);
        writeln!(
            out,
            "{}{}{line}{}",
            " ".repeat(padding),
            theme::fg(theme::TEXT_DIM),
            theme::reset()
        )?;
    }
    Ok(())
}

fn progress_line(decided: usize, total: usize) -> String {
    let filled = if total == 0 {
        0
    } else {
        (decided * PROGRESS_WIDTH / total).min(PROGRESS_WIDTH)
    };
    format!(
        "{}{} {decided}/{total}",
        "█".repeat(filled),
        "░".repeat(PROGRESS_WIDTH - filled)
    )
}
