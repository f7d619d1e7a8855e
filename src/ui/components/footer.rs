//! Footer component renderer.
//!
//! This module renders the footer help bar with centered command hints.

use crate::ui::helpers::{center_padding, char_len, truncate};
use crate::ui::theme;
use crate::ui::viewmodel::FooterInfo;
use std::io::{self, Write};

/// Renders the footer help bar.
///
/// Displays command hints centered horizontally in the dim text colour. If
/// the hints exceed the width they are truncated, which keeps narrow
/// terminals from wrapping.
///
/// # Errors
///
/// Propagates write errors from `out`.
pub fn render_footer<W: Write + ?Sized>(out: &mut W, footer: &FooterInfo, cols: usize) -> io::Result<()> {
    let help_text = truncate(&footer.keybindings, cols);
    let text_len = char_len(&help_text);
    let padding = center_padding(text_len, cols);

    write!(out, "{}", theme::fg(theme::TEXT_DIM))?;
    write!(out, "{}", " ".repeat(padding))?;
    write!(out, "{help_text}")?;
    write!(out, "{}", " ".repeat(cols.saturating_sub(padding + text_len)))?;
    writeln!(out, "{}", theme::reset())
}
