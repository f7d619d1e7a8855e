//! Event handling and state transition logic.
//!
//! This module implements the event handler that processes user input,
//! animation frames and repository results, translating them into state
//! changes and action sequences.
//!
//! # Architecture
//!
//! 1. Events arrive from the driver (stdin commands, frame ticks, fetch results)
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` methods
//! 4. Actions are collected and returned for execution
//!
//! The returned `bool` tells the driver whether the screen needs redrawing.
//!
//! # Example
//!
//! ```rust
//! use unimatch::app::{handle_event, Action, AppState, Event, SessionSettings};
//! use unimatch::domain::QuizAnswers;
//!
//! let mut state = AppState::new(SessionSettings::default());
//! let (render, actions) = handle_event(
//!     &mut state,
//!     &Event::QuizSubmitted { answers: QuizAnswers::default().with("region", "north") },
//! )?;
//! assert!(render);
//! assert!(matches!(actions.as_slice(), [Action::FetchCandidates { .. }]));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::{Candidate, CandidateId, QuizAnswers, Verdict};
use crate::export::ShareTarget;
use std::time::Duration;

/// Events triggered by user input, animation frames or repository results.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The quiz was completed; starts a new session with these answers.
    QuizSubmitted { answers: QuizAnswers },

    /// Candidates requested by [`Action::FetchCandidates`] arrived.
    CandidatesLoaded { candidates: Vec<Candidate> },

    /// Candidate fetch failed. The session continues with an empty deck.
    CandidatesUnavailable { error: String },

    /// Pointer went down on a card.
    DragStart { card_id: CandidateId },

    /// Pointer moved; `delta` is the horizontal distance from the drag start.
    DragMove { card_id: CandidateId, delta: f64 },

    /// Pointer released.
    DragEnd { card_id: CandidateId },

    /// A control button was pressed.
    Choose(Verdict),

    /// Undo button pressed.
    Undo,

    /// An animation frame elapsed.
    Tick(Duration),

    /// Share the shortlist through a channel.
    Share(ShareTarget),

    /// Return to the quiz.
    Restart,

    /// Close the session.
    Quit,
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// `(render, actions)`: whether the view changed, and side effects to run in
/// order. Events that do not apply to the current state are logged at debug
/// level and return `(false, vec![])`.
///
/// # Errors
///
/// Currently infallible; the `Result` keeps the driver loop uniform with
/// fallible side effects.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event_name(event)).entered();

    match event {
        Event::QuizSubmitted { answers } => {
            let criteria = state.submit(answers);
            Ok((true, vec![Action::FetchCandidates { criteria }]))
        }
        Event::CandidatesLoaded { candidates } => {
            Ok((state.load_candidates(candidates.clone()), vec![]))
        }
        Event::CandidatesUnavailable { error } => {
            tracing::warn!(error = %error, "candidate fetch failed");
            Ok((state.load_candidates(Vec::new()), vec![]))
        }
        Event::DragStart { card_id } => Ok((state.drag_start(card_id), vec![])),
        Event::DragMove { card_id, delta } => Ok((state.drag_move(card_id, *delta), vec![])),
        Event::DragEnd { card_id } => Ok((state.drag_end(card_id), vec![])),
        Event::Choose(verdict) => Ok((state.choose(*verdict), vec![])),
        Event::Undo => Ok((state.undo(), vec![])),
        Event::Tick(dt) => Ok((state.tick(*dt), vec![])),
        Event::Share(target) => match state.share_link(*target) {
            Ok(uri) => Ok((false, vec![Action::OpenLink { uri }])),
            Err(e) => {
                tracing::debug!(error = %e, target = ?target, "share unavailable");
                Ok((false, vec![]))
            }
        },
        Event::Restart => {
            state.restart();
            Ok((true, vec![]))
        }
        Event::Quit => Ok((false, vec![Action::Quit])),
    }
}

const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::QuizSubmitted { .. } => "quiz_submitted",
        Event::CandidatesLoaded { .. } => "candidates_loaded",
        Event::CandidatesUnavailable { .. } => "candidates_unavailable",
        Event::DragStart { .. } => "drag_start",
        Event::DragMove { .. } => "drag_move",
        Event::DragEnd { .. } => "drag_end",
        Event::Choose(_) => "choose",
        Event::Undo => "undo",
        Event::Tick(_) => "tick",
        Event::Share(_) => "share",
        Event::Restart => "restart",
        Event::Quit => "quit",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{SessionPhase, SessionSettings};
    use crate::domain::Region;

    fn state() -> AppState {
        AppState::new(SessionSettings {
            undo_cooldown: Duration::ZERO,
            ..SessionSettings::default()
        })
    }

    #[test]
    fn quiz_submission_requests_candidates_with_criteria() {
        let mut state = state();
        let answers = QuizAnswers::default().with("area", vec!["stem"]);
        let (render, actions) = handle_event(&mut state, &Event::QuizSubmitted { answers }).unwrap();

        assert!(render);
        let [Action::FetchCandidates { criteria }] = actions.as_slice() else {
            panic!("expected a single fetch, got {actions:?}");
        };
        assert!(!criteria.topics.is_any());
        assert_eq!(state.phase(), SessionPhase::Loading);
    }

    #[test]
    fn fetch_failure_lands_on_no_matches() {
        let mut state = state();
        handle_event(&mut state, &Event::QuizSubmitted { answers: QuizAnswers::default() }).unwrap();
        handle_event(
            &mut state,
            &Event::CandidatesUnavailable {
                error: "timeout".to_string(),
            },
        )
        .unwrap();
        assert_eq!(state.phase(), SessionPhase::NoMatches);
    }

    #[test]
    fn share_without_likes_produces_no_action() {
        let mut state = state();
        handle_event(&mut state, &Event::QuizSubmitted { answers: QuizAnswers::default() }).unwrap();
        handle_event(
            &mut state,
            &Event::CandidatesLoaded {
                candidates: vec![Candidate::new("0", "Uni", "Lecce", Region::South)],
            },
        )
        .unwrap();

        let (_, actions) = handle_event(&mut state, &Event::Share(ShareTarget::Email)).unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn quit_is_forwarded() {
        let mut state = state();
        let (render, actions) = handle_event(&mut state, &Event::Quit).unwrap();
        assert!(!render);
        assert_eq!(actions, vec![Action::Quit]);
    }
}
