//! Composable UI component renderers.
//!
//! Each component writes one part of the interface to any [`Write`] sink and
//! is responsible for its own padding and colours.
//!
//! # Components
//!
//! - [`header`]: Title bar with swipe progress
//! - [`footer`]: Command hints
//! - [`card`]: Card stack (ledges, active card, exit trails)
//! - [`controls`]: Undo, reject and like buttons plus the last-swipe flash
//! - [`shortlist`]: Liked universities with share buttons
//! - [`empty`]: Empty state message
//!
//! # Layout Modes
//!
//! - [`render_deck_mode`]: Header + Cards + Controls + Footer
//! - [`render_shortlist_mode`]: Header + Shortlist + Footer
//! - [`render_message_mode`]: Header + centered message + Footer

pub mod card;
pub mod controls;
pub mod empty;
pub mod footer;
pub mod header;
pub mod shortlist;

use crate::ui::theme;
use crate::ui::viewmodel::{DeckView, EmptyState, FooterInfo, HeaderInfo, ShortlistView};
use std::io::{self, Write};

use card::render_card;
use controls::render_controls;
use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use shortlist::render_shortlist;

/// Renders a horizontal border line separating UI sections.
fn render_border<W: Write + ?Sized>(out: &mut W, cols: usize) -> io::Result<()> {
    writeln!(out, "{}{}{}", theme::fg(theme::BORDER), "─".repeat(cols), theme::reset())
}

/// Renders the swiping layout.
///
/// ```text
/// [Header + progress]
/// [Border]
/// [Background ledges]
/// [Active card]
/// [Exit trails]
/// [Controls + flash]
/// [Border]
/// [Footer]
/// ```
///
/// # Errors
///
/// Propagates write errors from `out`.
pub fn render_deck_mode<W: Write + ?Sized>(
    out: &mut W,
    header: &HeaderInfo,
    deck: &DeckView,
    footer: &FooterInfo,
    cols: usize,
) -> io::Result<()> {
    render_header(out, header, cols)?;
    render_border(out, cols)?;
    for card in &deck.cards {
        render_card(out, card, cols)?;
    }
    render_controls(out, &deck.controls, deck.can_undo, deck.flash, cols)?;
    render_border(out, cols)?;
    render_footer(out, footer, cols)
}

/// Renders the end-of-deck shortlist layout.
///
/// # Errors
///
/// Propagates write errors from `out`.
pub fn render_shortlist_mode<W: Write + ?Sized>(
    out: &mut W,
    header: &HeaderInfo,
    shortlist: &ShortlistView,
    footer: &FooterInfo,
    cols: usize,
) -> io::Result<()> {
    render_header(out, header, cols)?;
    render_border(out, cols)?;
    render_shortlist(out, shortlist, cols)?;
    render_border(out, cols)?;
    render_footer(out, footer, cols)
}

/// Renders a centered message between header and footer.
///
/// `retry` adds the button that returns to the quiz.
///
/// # Errors
///
/// Propagates write errors from `out`.
pub fn render_message_mode<W: Write + ?Sized>(
    out: &mut W,
    header: &HeaderInfo,
    empty: &EmptyState,
    retry: bool,
    footer: &FooterInfo,
    cols: usize,
) -> io::Result<()> {
    render_header(out, header, cols)?;
    render_border(out, cols)?;
    render_empty_state(out, empty, retry, cols)?;
    render_border(out, cols)?;
    render_footer(out, footer, cols)
}
