//! Presentation attributes attached to candidates when a deck is built.
//!
//! Every presented card gets a colour theme, a gradient direction and a
//! per-candidate jitter value. The jitter is derived from the candidate id, so
//! it is the same for a given candidate across renders and sessions; it drives
//! the resting tilt and the displayed match score.

use crate::domain::{Candidate, CandidateId};
use crate::ui::theme::{CardTheme, GradientDirection, Palette};
use serde::Serialize;

/// Lowest match score shown on a card.
const MATCH_SCORE_FLOOR: u8 = 85;

/// Width of the match score band above the floor.
const MATCH_SCORE_SPAN: f64 = 15.0;

/// Maximum resting tilt magnitude in degrees.
const REST_TILT: f64 = 2.0;

/// Candidate decorated for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresentedCandidate {
    pub candidate: Candidate,
    /// Index in the shuffled deck, used for theme and direction assignment.
    pub position: usize,
    pub theme: CardTheme,
    pub direction: GradientDirection,
    /// Stable pseudo-random value in `[0, 1)`.
    pub jitter: f64,
}

impl PresentedCandidate {
    /// Decorates a candidate placed at `position` in the deck.
    #[must_use]
    pub fn new(candidate: Candidate, position: usize, palette: &Palette) -> Self {
        let jitter = pseudo_random(candidate.id.as_str());
        Self {
            theme: palette.theme_at(position).clone(),
            direction: GradientDirection::at(position),
            position,
            jitter,
            candidate,
        }
    }

    #[must_use]
    pub const fn id(&self) -> &CandidateId {
        &self.candidate.id
    }

    /// Resting tilt in degrees, within `[-2, 2)`.
    #[must_use]
    pub fn rest_rotation(&self) -> f64 {
        self.jitter * 2.0 * REST_TILT - REST_TILT
    }

    /// Cosmetic match score in `85..=99`.
    #[must_use]
    pub fn match_score(&self) -> u8 {
        // jitter < 1.0, so the product stays below the span
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let bonus = (self.jitter * MATCH_SCORE_SPAN).floor() as u8;
        MATCH_SCORE_FLOOR + bonus
    }
}

/// Decorates candidates in deck order.
#[must_use]
pub fn present(candidates: Vec<Candidate>, palette: &Palette) -> Vec<PresentedCandidate> {
    candidates
        .into_iter()
        .enumerate()
        .map(|(position, candidate)| PresentedCandidate::new(candidate, position, palette))
        .collect()
}

/// Deterministic value in `[0, 1)` derived from a seed string.
///
/// Uses the 31-multiplier string hash over UTF-16 code units with 32-bit
/// wrapping arithmetic, then keeps three decimal digits of its magnitude.
///
/// # Example
///
/// ```
/// use unimatch::engine::presentation::pseudo_random;
///
/// assert_eq!(pseudo_random("0"), 0.048);
/// assert_eq!(pseudo_random("0"), pseudo_random("0"));
/// ```
#[must_use]
pub fn pseudo_random(seed: &str) -> f64 {
    let hash = seed.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    });
    let bucket = i64::from(hash).abs() % 1000;
    #[allow(clippy::cast_precision_loss)]
    let value = bucket as f64 / 1000.0;
    value
}
