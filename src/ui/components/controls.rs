//! Control buttons renderer.
//!
//! Draws the undo, reject and like buttons under the card stack. Button
//! colours, emphasis and tilt come from the [`ControlFeedback`] computed out
//! of the feedback channel, so they follow the card being dragged.

use crate::domain::Verdict;
use crate::gesture::{ButtonStyle, ControlFeedback, Rgba};
use crate::ui::helpers::{center_padding, visible_len};
use crate::ui::theme;
use std::io::{self, Write};

/// Renders the button row and, while it lasts, the last-swipe flash.
///
/// # Errors
///
/// Propagates write errors from `out`.
pub fn render_controls<W: Write + ?Sized>(
    out: &mut W,
    controls: &ControlFeedback,
    can_undo: bool,
    flash: Option<Verdict>,
    cols: usize,
) -> io::Result<()> {
    let undo = if can_undo {
        format!("{}{}( ↺ ){}", theme::fg(theme::BORDER), theme::bold(), theme::reset())
    } else {
        format!("{}{}( ↺ ){}", theme::dim(), theme::fg(theme::BORDER), theme::reset())
    };
    let row = format!(
        "{undo}   {}   {}",
        button(&controls.reject, '✕'),
        button(&controls.like, '♥')
    );
    writeln!(out)?;
    writeln!(out, "{}{row}", " ".repeat(center_padding(visible_len(&row), cols)))?;

    if let Some(verdict) = flash {
        let (mark, color) = match verdict {
            Verdict::Like => ('♥', "#16A34A"),
            Verdict::Reject => ('✕', "#DC2626"),
        };
        let text = format!("{mark} {}", verdict.label());
        writeln!(
            out,
            "{}{}{}{text}{}",
            " ".repeat(center_padding(visible_len(&text), cols)),
            theme::bold(),
            theme::fg(color),
            theme::reset()
        )?;
    }
    Ok(())
}

/// One button: brackets widen once it is scaled up, the icon gains a tilt
/// marker while rotated.
fn button(style: &ButtonStyle, icon: char) -> String {
    let (open, close) = if style.scale > 1.1 { ('⟦', '⟧') } else { ('(', ')') };
    let tilt = if style.icon_rotation.abs() > 5.0 { "˚" } else { " " };
    let fade = if style.opacity < 0.75 { theme::dim() } else { "" };
    let glow = if style.glow > 0.5 { theme::bold() } else { "" };
    let (br, bgc, bb) = flatten(style.background.0);
    let (fr, fgc, fb) = flatten(style.foreground);
    let (er, eg, eb) = flatten(style.border);
    format!(
        "{fade}{glow}{}{}{open}{} {icon}{tilt}{}{close}{}",
        theme::bg_rgb(br, bgc, bb),
        theme::fg_rgb(er, eg, eb),
        theme::fg_rgb(fr, fgc, fb),
        theme::fg_rgb(er, eg, eb),
        theme::reset()
    )
}

/// Composites a translucent colour over the surface colour.
fn flatten(color: Rgba) -> (u8, u8, u8) {
    let (sr, sg, sb) = theme::hex_to_rgb(theme::SURFACE);
    let surface = Rgba::new(sr, sg, sb, 1.0);
    let solid = surface.mix(Rgba::new(color.r, color.g, color.b, 1.0), color.a);
    (solid.r, solid.g, solid.b)
}
