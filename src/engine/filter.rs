//! Filter engine: turns raw candidates and criteria into a presented deck.
//!
//! The pipeline is pure apart from the shuffle:
//!
//! 1. Drop candidates without a usable id, and later duplicates of an id
//! 2. Keep candidates that match every dimension of the criteria
//! 3. Shuffle (uniform permutation)
//! 4. Decorate each card with its position-derived theme and direction

use crate::domain::{Candidate, FilterCriteria};
use crate::engine::presentation::{present, PresentedCandidate};
use crate::ui::theme::Palette;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Returns `true` if the candidate satisfies every criteria dimension.
///
/// Within a dimension the selected values are alternatives; across dimensions
/// they all have to hold.
///
/// # Example
///
/// ```
/// use unimatch::domain::{Candidate, FilterCriteria, Region, Selection, Topic};
/// use unimatch::engine::filter::matches;
///
/// let uni = Candidate::new("1", "Bocconi", "Milano", Region::North).with_topic(Topic::Social);
/// let criteria = FilterCriteria {
///     region: Selection::of([Region::North]),
///     topics: Selection::of([Topic::Stem, Topic::Social]),
///     ..FilterCriteria::any()
/// };
/// assert!(matches(&uni, &criteria));
/// ```
#[must_use]
pub fn matches(candidate: &Candidate, criteria: &FilterCriteria) -> bool {
    criteria.region.matches(|region| *region == candidate.region)
        && criteria.city_size.matches(|size| *size == candidate.city_size())
        && criteria.topics.matches(|topic| candidate.has_topic(*topic))
}

/// Validates and filters candidates, preserving input order.
///
/// Candidates with a blank id are skipped. When several candidates share an
/// id, the first one wins. Both cases are logged at debug level.
#[must_use]
pub fn select(candidates: Vec<Candidate>, criteria: &FilterCriteria) -> Vec<Candidate> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|candidate| {
            if candidate.id.is_blank() {
                tracing::debug!(name = %candidate.name, "skipping candidate without id");
                return false;
            }
            if !seen.insert(candidate.id.clone()) {
                tracing::debug!(id = %candidate.id, name = %candidate.name, "skipping duplicate candidate id");
                return false;
            }
            true
        })
        .filter(|candidate| matches(candidate, criteria))
        .collect()
}

/// Builds a shuffled, decorated deck using the supplied random source.
pub fn build_deck_with_rng<R: Rng + ?Sized>(
    candidates: Vec<Candidate>,
    criteria: &FilterCriteria,
    palette: &Palette,
    rng: &mut R,
) -> Vec<PresentedCandidate> {
    let _span = tracing::debug_span!("build_deck", offered = candidates.len()).entered();

    let mut selected = select(candidates, criteria);
    selected.shuffle(rng);

    tracing::debug!(selected = selected.len(), "deck built");
    present(selected, palette)
}

/// Builds a shuffled, decorated deck using the thread-local random source.
///
/// An empty result is valid; the deck state machine reports it as "no matches".
#[must_use]
pub fn build_deck(
    candidates: Vec<Candidate>,
    criteria: &FilterCriteria,
    palette: &Palette,
) -> Vec<PresentedCandidate> {
    build_deck_with_rng(candidates, criteria, palette, &mut rand::thread_rng())
}
