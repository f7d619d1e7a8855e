//! Deck invariants exercised through the public engine API.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;
use std::time::{Duration, Instant};
use unimatch::domain::{
    Candidate, CandidateId, DeckRejection, FilterCriteria, QuizAnswers, Region, SwipeDirection,
    Topic, Verdict,
};
use unimatch::engine::{build_deck_with_rng, DeckState, DeckStatus};
use unimatch::ui::Palette;

fn candidates(n: usize) -> Vec<Candidate> {
    (0..n)
        .map(|i| Candidate::new(i.to_string(), format!("Università {i}"), "Padova", Region::North))
        .collect()
}

fn deck(n: usize, seed: u64) -> DeckState {
    let mut rng = StdRng::seed_from_u64(seed);
    let cards = build_deck_with_rng(candidates(n), &FilterCriteria::any(), &Palette::default(), &mut rng);
    DeckState::with_cards(cards, Duration::ZERO)
}

fn top(deck: &DeckState) -> CandidateId {
    deck.active_id().cloned().expect("deck has a top card")
}

fn ids(deck: &DeckState) -> BTreeSet<CandidateId> {
    deck.remaining()
        .iter()
        .map(|card| card.id().clone())
        .chain(deck.history().iter().map(|decided| decided.candidate.id().clone()))
        .collect()
}

#[test]
fn conservation_and_exclusivity_hold_through_random_sessions() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut deck = deck(12, 3);
    let original = ids(&deck);
    let mut clock = Instant::now();

    for _ in 0..200 {
        clock += Duration::from_millis(100);
        if rng.gen_bool(0.3) {
            let _ = deck.undo_at(clock);
        } else if let Some(id) = deck.active_id().cloned() {
            let verdict = if rng.gen_bool(0.5) { Verdict::Like } else { Verdict::Reject };
            deck.decide(&id, verdict).unwrap();
        }

        assert_eq!(deck.remaining().len() + deck.history().len(), deck.total());
        assert_eq!(ids(&deck), original);

        let liked_in_history: Vec<&CandidateId> = deck
            .history()
            .iter()
            .filter(|decided| decided.verdict == Verdict::Like)
            .map(|decided| decided.candidate.id())
            .collect();
        let liked: Vec<&CandidateId> = deck.liked().iter().map(|card| card.id()).collect();
        assert_eq!(liked, liked_in_history);
        assert_eq!(deck.active_id(), deck.top().map(|card| card.id()));
    }
}

#[test]
fn deciding_a_non_top_card_changes_nothing() {
    let mut deck = deck(3, 1);
    let bottom = deck.remaining()[0].id().clone();
    let before = (deck.remaining().len(), deck.history().len(), deck.active_id().cloned());

    let rejection = deck.decide(&bottom, Verdict::Like).unwrap_err();
    assert!(matches!(rejection, DeckRejection::NotTop { .. }));
    assert_eq!(
        (deck.remaining().len(), deck.history().len(), deck.active_id().cloned()),
        before
    );
    assert!(deck.liked().is_empty());
}

#[test]
fn undo_restores_the_previous_state_with_a_reentry_tag() {
    let mut deck = deck(4, 9);
    let first = top(&deck);
    deck.decide(&first, Verdict::Reject).unwrap();
    let second = top(&deck);
    deck.decide(&second, Verdict::Like).unwrap();
    assert_eq!(deck.liked().len(), 1);

    let undone = deck.undo().unwrap();
    assert_eq!(undone.candidate.id(), &second);
    assert_eq!(top(&deck), second);
    assert!(deck.liked().is_empty());
    assert_eq!(deck.history().len(), 1);
    assert_eq!(deck.top().and_then(|card| card.reentry), Some(SwipeDirection::Right));
}

#[test]
fn undo_cooldown_suppresses_rapid_repeats() {
    let mut rng = StdRng::seed_from_u64(2);
    let cards = build_deck_with_rng(candidates(3), &FilterCriteria::any(), &Palette::default(), &mut rng);
    let mut deck = DeckState::with_cards(cards, Duration::from_millis(50));
    for _ in 0..3 {
        let id = top(&deck);
        deck.decide(&id, Verdict::Reject).unwrap();
    }

    let start = Instant::now();
    assert!(deck.undo_at(start).is_ok());
    assert_eq!(deck.undo_at(start + Duration::from_millis(10)), Err(DeckRejection::UndoCoolingDown));
    assert!(deck.undo_at(start + Duration::from_millis(60)).is_ok());
}

#[test]
fn filter_example_keeps_only_the_northern_stem_university() {
    let pool = vec![
        Candidate::new("a", "PoliTo", "Torino", Region::North).with_topic(Topic::Stem),
        Candidate::new("b", "UniNa", "Napoli", Region::South),
        Candidate::new("c", "UniVr", "Verona", Region::North),
    ];
    let answers = QuizAnswers::default().with("region", "north").with("area", vec!["stem"]);
    let criteria = FilterCriteria::from_answers(&answers);

    let mut rng = StdRng::seed_from_u64(11);
    let built = build_deck_with_rng(pool, &criteria, &Palette::default(), &mut rng);
    let ids: Vec<&str> = built.iter().map(|card| card.id().as_str()).collect();
    assert_eq!(ids, vec!["a"]);
}

#[test]
fn terminal_states_and_restart() {
    let mut empty = DeckState::with_cards(Vec::new(), Duration::ZERO);
    assert_eq!(empty.status(), DeckStatus::NoMatches);
    assert_eq!(empty.active_id(), None);
    assert_eq!(empty.undo(), Err(DeckRejection::NothingToUndo));

    let mut deck = deck(2, 5);
    let first = top(&deck);
    deck.decide(&first, Verdict::Like).unwrap();
    let second = top(&deck);
    deck.decide(&second, Verdict::Reject).unwrap();
    assert_eq!(deck.status(), DeckStatus::Shortlist { liked: 1 });
    assert_eq!(deck.decide(&second, Verdict::Like), Err(DeckRejection::EmptyDeck));

    deck.restart();
    assert_eq!(deck.total(), 0);
    assert!(deck.history().is_empty() && deck.liked().is_empty());
    empty.restart();
    assert_eq!(empty.status(), DeckStatus::NoMatches);
}
