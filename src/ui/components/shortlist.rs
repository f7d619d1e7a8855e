//! Shortlist screen renderer.

use crate::ui::helpers::{center_padding, char_len, truncate};
use crate::ui::theme;
use crate::ui::viewmodel::ShortlistView;
use std::io::{self, Write};

const WHATSAPP_GREEN: &str = "#25D366";

/// Renders the liked universities with share and restart buttons.
///
/// # Errors
///
/// Propagates write errors from `out`.
pub fn render_shortlist<W: Write + ?Sized>(out: &mut W, view: &ShortlistView, cols: usize) -> io::Result<()> {
    let title = truncate(&view.title, cols);
    writeln!(out)?;
    writeln!(
        out,
        "{}{}{}{title}{}",
        " ".repeat(center_padding(char_len(&title), cols)),
        theme::bold(),
        theme::fg(theme::BRAND),
        theme::reset()
    )?;
    let summary = match_summary(view.entries.len());
    writeln!(
        out,
        "{}{}{summary}{}",
        " ".repeat(center_padding(char_len(&summary), cols)),
        theme::fg(theme::TEXT_DIM),
        theme::reset()
    )?;
    writeln!(out)?;

    for (index, entry) in view.entries.iter().enumerate() {
        writeln!(
            out,
            "  {}{:>2}. {}{}",
            theme::bold(),
            index + 1,
            truncate(&entry.name, cols.saturating_sub(8)),
            theme::reset()
        )?;
        writeln!(
            out,
            "      {}◉ {}{}",
            theme::fg(theme::TEXT_DIM),
            truncate(&entry.location, cols.saturating_sub(10)),
            theme::reset()
        )?;
    }

    writeln!(out)?;
    if view.can_share {
        writeln!(
            out,
            "  {}{}{} WhatsApp {}  {}{}{} E-mail {}",
            theme::bold(),
            theme::fg(theme::TEXT),
            theme::bg(WHATSAPP_GREEN),
            theme::reset(),
            theme::bold(),
            theme::fg(theme::TEXT),
            theme::bg(theme::SURFACE),
            theme::reset()
        )?;
    }
    writeln!(out, "  {}↺ Recomeçar{}", theme::fg(theme::TEXT_DIM), theme::reset())
}

/// "Você deu match com N universidade(s)!"
#[must_use]
pub fn match_summary(count: usize) -> String {
    let plural = if count == 1 { "" } else { "s" };
    format!("Você deu match com {count} universidade{plural}!")
}
