//! Card component renderer.
//!
//! Renders the card stack: background cards as one-line ledges, the active
//! card as a full gradient box, and decided cards as a one-line trail while
//! they fly off-screen. Horizontal offset shifts the card; once a verdict
//! label is more than half visible it is stamped on the top border.

use crate::domain::{Region, Topic, Verdict};
use crate::ui::helpers::{center_padding, styled_description, truncate, visible_len};
use crate::ui::theme::{self, GradientDirection};
use crate::ui::viewmodel::{CardRole, CardView};
use std::io::{self, Write};

const MAX_WIDTH: usize = 56;
const MIN_WIDTH: usize = 24;

/// Drag distance represented by one terminal cell.
const PX_PER_CELL: f64 = 16.0;

const LIKE_COLOR: &str = "#16A34A";
const REJECT_COLOR: &str = "#DC2626";

/// Renders one card according to its role.
///
/// # Errors
///
/// Propagates write errors from `out`.
pub fn render_card<W: Write + ?Sized>(out: &mut W, card: &CardView, cols: usize) -> io::Result<()> {
    match card.role {
        CardRole::Background => render_ledge(out, card, cols),
        CardRole::Active => render_full(out, card, cols),
        CardRole::Leaving => render_trail(out, card, cols),
    }
}

/// Card width for a terminal `cols` wide.
#[must_use]
pub fn card_width(cols: usize) -> usize {
    cols.saturating_sub(4).clamp(MIN_WIDTH, MAX_WIDTH)
}

/// Left indent of a card shifted by `offset` pixels, kept on screen.
#[must_use]
pub fn shifted_indent(width: usize, cols: usize, offset: f64) -> usize {
    let base = i64::try_from(center_padding(width, cols)).unwrap_or(i64::MAX);
    #[allow(clippy::cast_possible_truncation)]
    let shift = (offset / PX_PER_CELL).round() as i64;
    let max = i64::try_from(cols.saturating_sub(width)).unwrap_or(i64::MAX);
    usize::try_from(base.saturating_add(shift).clamp(0, max)).unwrap_or(0)
}

const fn region_label(region: Region) -> &'static str {
    match region {
        Region::North => "Norte",
        Region::Center => "Centro",
        Region::South => "Sul",
    }
}

const fn topic_label(topic: Topic) -> &'static str {
    match topic {
        Topic::Humanities => "Humanas",
        Topic::Social => "Sociais",
        Topic::Health => "Saúde",
        Topic::Stem => "Exatas",
    }
}

const fn topic_color(topic: Topic) -> &'static str {
    match topic {
        Topic::Humanities => "#EC4899",
        Topic::Social => "#F97316",
        Topic::Health => "#10B981",
        Topic::Stem => "#06B6D4",
    }
}

fn render_ledge<W: Write + ?Sized>(out: &mut W, card: &CardView, cols: usize) -> io::Result<()> {
    let width = card_width(cols).saturating_sub(4);
    let indent = center_padding(width, cols);
    let name = truncate(&card.name, width.saturating_sub(6));
    let fill = width.saturating_sub(visible_len(&name) + 5);
    writeln!(
        out,
        "{}{}{}╭─ {name} {}╮{}",
        " ".repeat(indent),
        theme::dim(),
        theme::fg(&card.theme.from),
        "─".repeat(fill),
        theme::reset()
    )
}

fn render_trail<W: Write + ?Sized>(out: &mut W, card: &CardView, cols: usize) -> io::Result<()> {
    let width = card_width(cols);
    let indent = shifted_indent(width, cols, card.pose.offset);
    let (arrow, verdict) = if card.pose.offset >= 0.0 {
        ("→", Verdict::Like)
    } else {
        ("←", Verdict::Reject)
    };
    writeln!(
        out,
        "{}{}{}{arrow} {} ({}){}",
        " ".repeat(indent),
        theme::dim(),
        theme::fg(&card.theme.highlight),
        truncate(&card.name, width.saturating_sub(12)),
        verdict.label(),
        theme::reset()
    )
}

fn render_full<W: Write + ?Sized>(out: &mut W, card: &CardView, cols: usize) -> io::Result<()> {
    let width = card_width(cols);
    let inner = width.saturating_sub(4);
    let pad = " ".repeat(shifted_indent(width, cols, card.pose.offset));
    let fade = if card.pose.opacity < 0.6 { theme::dim() } else { "" };
    let border = format!("{fade}{}", theme::fg(&card.theme.highlight));

    let rows = body_rows(card, inner);
    let count = rows.len();

    writeln!(out, "{pad}{border}{}{}", top_border(card, width), theme::reset())?;
    for (index, row) in rows.into_iter().enumerate() {
        let background = gradient_at(card, index, count);
        let base = format!("{}{}", theme::bg(&background), theme::fg(theme::TEXT));
        let row = row.replace(theme::reset(), &format!("{}{base}", theme::reset()));
        let fill = inner.saturating_sub(visible_len(&row));
        writeln!(
            out,
            "{pad}{border}│{}{fade}{base} {row}{} {}{border}│{}",
            theme::reset(),
            " ".repeat(fill),
            theme::reset(),
            theme::reset()
        )?;
    }
    writeln!(
        out,
        "{pad}{border}╰{}{}╯{}",
        "─".repeat(width.saturating_sub(3)),
        card.direction.glyph(),
        theme::reset()
    )
}

fn top_border(card: &CardView, width: usize) -> String {
    let span = width.saturating_sub(2);
    let stamp = if card.pose.like_label_opacity > 0.5 {
        Some((Verdict::Like, LIKE_COLOR))
    } else if card.pose.reject_label_opacity > 0.5 {
        Some((Verdict::Reject, REJECT_COLOR))
    } else {
        None
    };

    let mut line = String::from("╭");
    if card.reentering {
        line.push_str("↺ ");
    }
    match stamp {
        Some((verdict, color)) => {
            let label = format!(" {} ", verdict.label().to_uppercase());
            let used = visible_len(&line) - 1 + label.len();
            let before = span.saturating_sub(used) / 2;
            line.push_str(&"─".repeat(before));
            line.push_str(&format!(
                "{}{}{label}{}{}",
                theme::bold(),
                theme::fg(color),
                theme::reset(),
                theme::fg(&card.theme.highlight)
            ));
            line.push_str(&"─".repeat(span.saturating_sub(used + before)));
        }
        None => {
            let used = visible_len(&line) - 1;
            line.push_str(&"─".repeat(span.saturating_sub(used)));
        }
    }
    line.push('╮');
    line
}

fn body_rows(card: &CardView, inner: usize) -> Vec<String> {
    let mut rows = Vec::new();

    let score = format!("{}%", card.match_score);
    let location = truncate(
        &format!("◉ {} • {}", card.location.to_uppercase(), region_label(card.region)),
        inner.saturating_sub(score.len() + 1),
    );
    let gap = inner.saturating_sub(visible_len(&location) + score.len());
    rows.push(format!(
        "{}{location}{}{}{}{score}{}",
        theme::fg(&card.theme.highlight),
        theme::reset(),
        " ".repeat(gap),
        theme::bold(),
        theme::reset()
    ));

    rows.push(format!("{}{}{}", theme::bold(), truncate(&card.name, inner), theme::reset()));

    let mut chips: Vec<String> = Topic::ALL
        .iter()
        .map(|&topic| {
            if card.topics.contains(&topic) {
                format!("{}{}{}{}", theme::bold(), theme::fg(topic_color(topic)), topic_label(topic), theme::reset())
            } else {
                format!("{}{}{}", theme::dim(), topic_label(topic), theme::reset())
            }
        })
        .collect();
    if card.is_big_city {
        chips.push(format!("{}cidade grande{}", theme::fg(&card.theme.highlight), theme::reset()));
    }
    rows.push(chips.join(" · "));
    rows.push(String::new());

    rows.extend(styled_description(&card.description, &card.theme.highlight, inner));
    rows
}

/// Background colour of body row `index` of `count`, following the card's
/// gradient direction.
fn gradient_at(card: &CardView, index: usize, count: usize) -> String {
    #[allow(clippy::cast_precision_loss)]
    let mut t = if count > 1 { index as f64 / (count - 1) as f64 } else { 0.0 };
    if matches!(card.direction, GradientDirection::TopLeft | GradientDirection::TopRight) {
        t = 1.0 - t;
    }
    let (fr, fg, fb) = theme::hex_to_rgb(&card.theme.from);
    let (tr, tg, tb) = theme::hex_to_rgb(&card.theme.to);
    let channel = |from: u8, to: u8| {
        let value = f64::from(from) + (f64::from(to) - f64::from(from)) * t;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let value = value.round().clamp(0.0, 255.0) as u8;
        value
    };
    format!(
        "#{:02X}{:02X}{:02X}",
        channel(fr, tr),
        channel(fg, tg),
        channel(fb, tb)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::CardPose;
    use crate::ui::theme::Palette;

    fn card(role: CardRole, offset: f64) -> CardView {
        CardView {
            name: "Università di Bologna".to_string(),
            location: "Bologna".to_string(),
            region: Region::North,
            description: "A mais antiga. Curiosidade: fundada em **1088**.".to_string(),
            theme: Palette::default().theme_at(0).clone(),
            direction: GradientDirection::BottomRight,
            topics: vec![Topic::Humanities],
            is_big_city: true,
            match_score: 91,
            pose: CardPose::at(offset),
            role,
            reentering: false,
        }
    }

    fn render(card: &CardView) -> String {
        let mut out = Vec::new();
        render_card(&mut out, card, 80).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn full_card_lines_share_one_width() {
        let text = render(&card(CardRole::Active, 0.0));
        let widths: Vec<usize> = text.lines().map(visible_len).collect();
        assert!(widths.len() > 5);
        assert!(widths.iter().all(|&w| w == widths[0]), "{widths:?}");
        assert!(text.contains("BOLOGNA • Norte"));
        assert!(text.contains("91%"));
        assert!(text.contains("1088"));
    }

    #[test]
    fn stamp_appears_past_half_opacity() {
        assert!(!render(&card(CardRole::Active, 40.0)).contains("MATCH"));
        assert!(render(&card(CardRole::Active, 80.0)).contains("MATCH"));
        assert!(render(&card(CardRole::Active, -80.0)).contains("NOPE"));
    }

    #[test]
    fn offset_shifts_the_card() {
        let width = card_width(80);
        let centre = shifted_indent(width, 80, 0.0);
        assert!(shifted_indent(width, 80, 64.0) > centre);
        assert!(shifted_indent(width, 80, -64.0) < centre);
        assert_eq!(shifted_indent(width, 80, -5000.0), 0);
        assert_eq!(shifted_indent(width, 80, 5000.0), 80 - width);
    }

    #[test]
    fn background_and_leaving_cards_take_one_line() {
        assert_eq!(render(&card(CardRole::Background, 0.0)).lines().count(), 1);
        let trail = render(&card(CardRole::Leaving, 400.0));
        assert_eq!(trail.lines().count(), 1);
        assert!(trail.contains("(match)"));
    }

    #[test]
    fn gradient_runs_between_theme_stops() {
        let view = card(CardRole::Active, 0.0);
        assert_eq!(gradient_at(&view, 0, 5), view.theme.from.to_uppercase());
        assert_eq!(gradient_at(&view, 4, 5), view.theme.to.to_uppercase());
    }
}
