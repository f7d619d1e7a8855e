//! Deck state machine.
//!
//! [`DeckState`] owns the three collections a swipe session revolves around:
//!
//! - `remaining`: cards still to decide, with the top card at the end
//! - `history`: decided cards, most recent last
//! - `liked`: the shortlist, in decision order
//!
//! Only [`DeckState::decide`] and [`DeckState::undo`] move cards between them.
//! After any successful transition the active id equals the id of the top
//! remaining card, every built candidate sits in exactly one of `remaining` and
//! `history`, and `liked` holds exactly the history entries decided as
//! [`Verdict::Like`], in history order.
//!
//! Requests that do not fit the current state (deciding a card that is no
//! longer on top, deciding on an empty deck, undoing with no history or
//! during the cool-down) are rejected with a [`DeckRejection`] and change
//! nothing.

use crate::domain::{CandidateId, DeckRejection, SwipeDirection, Verdict};
use crate::engine::presentation::PresentedCandidate;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::{Duration, Instant};

/// Default minimum spacing between two successful undos.
pub const DEFAULT_UNDO_COOLDOWN: Duration = Duration::from_millis(50);

/// A card waiting in the remaining stack.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeckCard {
    pub candidate: PresentedCandidate,
    /// Set when the card came back through undo; the side it re-enters from.
    pub reentry: Option<SwipeDirection>,
}

impl DeckCard {
    #[must_use]
    pub const fn id(&self) -> &CandidateId {
        self.candidate.id()
    }
}

/// A decided card together with how it was decided.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecidedCandidate {
    pub candidate: PresentedCandidate,
    pub verdict: Verdict,
    /// Side the card left toward; undo brings it back from the same side.
    pub exit_direction: SwipeDirection,
    pub decided_at: DateTime<Utc>,
}

/// Observable phase of a deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DeckStatus {
    /// Cards remain to be decided.
    Active { remaining: usize },
    /// Every card is decided and at least one was liked.
    Shortlist { liked: usize },
    /// Every card is decided (or none matched) and nothing was liked.
    NoMatches,
}

/// State of one swipe session.
#[derive(Debug, Clone)]
pub struct DeckState {
    remaining: Vec<DeckCard>,
    history: Vec<DecidedCandidate>,
    liked: Vec<PresentedCandidate>,
    active_id: Option<CandidateId>,
    total: usize,
    undo_cooldown: Duration,
    last_undo: Option<Instant>,
}

impl Default for DeckState {
    fn default() -> Self {
        Self::new(DEFAULT_UNDO_COOLDOWN)
    }
}

impl DeckState {
    /// Creates an empty deck with the given undo cool-down.
    #[must_use]
    pub const fn new(undo_cooldown: Duration) -> Self {
        Self {
            remaining: Vec::new(),
            history: Vec::new(),
            liked: Vec::new(),
            active_id: None,
            total: 0,
            undo_cooldown,
            last_undo: None,
        }
    }

    /// Creates a deck already initialized with `cards`.
    #[must_use]
    pub fn with_cards(cards: Vec<PresentedCandidate>, undo_cooldown: Duration) -> Self {
        let mut deck = Self::new(undo_cooldown);
        deck.initialize(cards);
        deck
    }

    /// Replaces the whole session with a freshly built deck.
    ///
    /// `cards` is in presentation order: the first card is shown first. The
    /// remaining stack stores it reversed so the top is the last element.
    pub fn initialize(&mut self, cards: Vec<PresentedCandidate>) {
        self.total = cards.len();
        self.remaining = cards
            .into_iter()
            .rev()
            .map(|candidate| DeckCard {
                candidate,
                reentry: None,
            })
            .collect();
        self.history.clear();
        self.liked.clear();
        self.last_undo = None;
        self.sync_active();
        tracing::debug!(total = self.total, "deck initialized");
    }

    /// Records a verdict for the top card.
    ///
    /// `id` is the identity the request was made for. If it is not the
    /// current top card the request is stale and rejected, which is what keeps
    /// a late animation callback from deciding the wrong card. Any transient
    /// gesture state belongs to the old top card and must be reset by the
    /// caller once the new active id is known.
    ///
    /// # Errors
    ///
    /// - [`DeckRejection::EmptyDeck`] when no cards remain
    /// - [`DeckRejection::NotTop`] when `id` is not the top card
    pub fn decide(
        &mut self,
        id: &CandidateId,
        verdict: Verdict,
    ) -> Result<DecidedCandidate, DeckRejection> {
        let Some(top) = self.remaining.last() else {
            return Err(DeckRejection::EmptyDeck);
        };
        if top.id() != id {
            return Err(DeckRejection::NotTop {
                requested: id.clone(),
                active: Some(top.id().clone()),
            });
        }

        let Some(card) = self.remaining.pop() else {
            return Err(DeckRejection::EmptyDeck);
        };
        let decided = DecidedCandidate {
            candidate: card.candidate,
            verdict,
            exit_direction: verdict.direction(),
            decided_at: Utc::now(),
        };
        if verdict == Verdict::Like {
            self.liked.push(decided.candidate.clone());
        }
        self.history.push(decided.clone());
        self.sync_active();

        tracing::debug!(
            id = %decided.candidate.id(),
            verdict = ?verdict,
            remaining = self.remaining.len(),
            liked = self.liked.len(),
            "card decided"
        );
        Ok(decided)
    }

    /// Brings the most recent decision back on top of the deck.
    ///
    /// # Errors
    ///
    /// See [`DeckState::undo_at`].
    pub fn undo(&mut self) -> Result<DecidedCandidate, DeckRejection> {
        self.undo_at(Instant::now())
    }

    /// Brings the most recent decision back, treating `now` as the current time.
    ///
    /// The card returns to the top tagged with the side it left toward, and is
    /// removed from the liked list if it was liked. Successful undos closer
    /// together than the cool-down are suppressed.
    ///
    /// # Errors
    ///
    /// - [`DeckRejection::NothingToUndo`] when history is empty
    /// - [`DeckRejection::UndoCoolingDown`] within the cool-down window
    pub fn undo_at(&mut self, now: Instant) -> Result<DecidedCandidate, DeckRejection> {
        if self.history.is_empty() {
            return Err(DeckRejection::NothingToUndo);
        }
        if let Some(last) = self.last_undo {
            if now.saturating_duration_since(last) < self.undo_cooldown {
                return Err(DeckRejection::UndoCoolingDown);
            }
        }
        let Some(decided) = self.history.pop() else {
            return Err(DeckRejection::NothingToUndo);
        };

        if decided.verdict == Verdict::Like {
            let id = decided.candidate.id();
            if let Some(index) = self.liked.iter().rposition(|liked| liked.id() == id) {
                self.liked.remove(index);
            }
        }
        self.remaining.push(DeckCard {
            candidate: decided.candidate.clone(),
            reentry: Some(decided.exit_direction),
        });
        self.last_undo = Some(now);
        self.sync_active();

        tracing::debug!(
            id = %decided.candidate.id(),
            verdict = ?decided.verdict,
            remaining = self.remaining.len(),
            "decision undone"
        );
        Ok(decided)
    }

    /// Clears every collection, leaving an empty, uninitialized deck.
    pub fn restart(&mut self) {
        self.remaining.clear();
        self.history.clear();
        self.liked.clear();
        self.total = 0;
        self.last_undo = None;
        self.active_id = None;
        tracing::debug!("deck restarted");
    }

    fn sync_active(&mut self) {
        self.active_id = self.remaining.last().map(|card| card.id().clone());
    }

    /// Identifier of the card currently accepting gestures.
    #[must_use]
    pub const fn active_id(&self) -> Option<&CandidateId> {
        self.active_id.as_ref()
    }

    /// The top card, if any.
    #[must_use]
    pub fn top(&self) -> Option<&DeckCard> {
        self.remaining.last()
    }

    /// Remaining cards, bottom first; the last element is the top card.
    #[must_use]
    pub fn remaining(&self) -> &[DeckCard] {
        &self.remaining
    }

    /// Decided cards, oldest first.
    #[must_use]
    pub fn history(&self) -> &[DecidedCandidate] {
        &self.history
    }

    /// Liked cards in decision order.
    #[must_use]
    pub fn liked(&self) -> &[PresentedCandidate] {
        &self.liked
    }

    /// Number of cards the deck was built with.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Returns `true` if there is a decision to undo.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    #[must_use]
    pub fn status(&self) -> DeckStatus {
        if !self.remaining.is_empty() {
            DeckStatus::Active {
                remaining: self.remaining.len(),
            }
        } else if self.liked.is_empty() {
            DeckStatus::NoMatches
        } else {
            DeckStatus::Shortlist {
                liked: self.liked.len(),
            }
        }
    }
}
