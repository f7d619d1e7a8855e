//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the central state container for a swipe
//! session. It ties the deck state machine to the gesture layer:
//!
//! - Exactly one [`GestureController`] is *active*, bound to the deck's
//!   active id. It is replaced whenever the active id changes.
//! - A controller whose card was decided keeps animating in `exiting` until
//!   it is off-screen. It can no longer write to the [`FeedbackChannel`].
//! - The control buttons read only the channel, so they always reflect the
//!   current top card.
//!
//! # Example
//!
//! ```rust
//! use unimatch::app::{AppState, SessionPhase, SessionSettings};
//! use unimatch::domain::{Candidate, QuizAnswers, Region};
//!
//! let mut state = AppState::new(SessionSettings::default());
//! state.submit(&QuizAnswers::default());
//! state.load_candidates(vec![Candidate::new("0", "UniTo", "Torino", Region::North)]);
//! assert_eq!(state.phase(), SessionPhase::Swiping);
//! let viewmodel = state.compute_viewmodel();
//! assert_eq!(viewmodel.header.progress, Some((0, 1)));
//! ```

use super::modes::SessionPhase;
use crate::domain::{
    Candidate, CandidateId, ExportError, FilterCriteria, QuizAnswers, SwipeDirection, UserProfile,
    Verdict,
};
use crate::engine::{build_deck, DeckState, PresentedCandidate, DEFAULT_UNDO_COOLDOWN};
use crate::export::{
    EmailAdapter, ExportAdapter, ShareRequest, ShareTarget, WhatsAppAdapter,
    DEFAULT_EMAIL_RECIPIENT, DEFAULT_SITE_URL, DEFAULT_WHATSAPP_PHONE,
};
use crate::gesture::{
    CardPose, FeedbackChannel, GestureConfig, GestureController, GesturePhase, GestureSignal,
};
use crate::ui::theme::Palette;
use crate::ui::viewmodel::{
    CardRole, CardView, DeckView, EmptyState, FooterInfo, HeaderInfo, Screen, ShortlistView,
    UIViewModel,
};
use std::time::Duration;

/// How long the last verdict stays flagged for the renderer.
pub const LAST_SWIPE_FLASH: Duration = Duration::from_millis(700);

/// Number of remaining cards rendered in the stack, top included.
const VISIBLE_STACK: usize = 3;

const TITLE: &str = "UniMatch";

/// Per-session tunables, usually derived from [`Config`](crate::Config).
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub palette: Palette,
    pub gesture: GestureConfig,
    pub undo_cooldown: Duration,
    pub whatsapp: WhatsAppAdapter,
    pub email: EmailAdapter,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            gesture: GestureConfig::default(),
            undo_cooldown: DEFAULT_UNDO_COOLDOWN,
            whatsapp: WhatsAppAdapter::new(DEFAULT_WHATSAPP_PHONE, DEFAULT_SITE_URL),
            email: EmailAdapter::new(DEFAULT_EMAIL_RECIPIENT, DEFAULT_SITE_URL),
        }
    }
}

/// Most recent verdict and how long its flash remains visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastSwipe {
    pub verdict: Verdict,
    pub remaining: Duration,
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    pub settings: SessionSettings,

    /// Criteria from the last submitted quiz.
    pub criteria: FilterCriteria,

    /// Name used for the shortlist title and share messages.
    pub user: UserProfile,

    /// `true` between quiz submission and candidate delivery.
    pub loading: bool,

    /// Current deck; `None` before candidates arrive and after restart.
    pub deck: Option<DeckState>,

    /// Controller bound to the deck's active id.
    pub active: Option<GestureController>,

    /// Controllers of decided cards still flying off-screen.
    pub exiting: Vec<GestureController>,

    /// Offset slot read by the control buttons.
    pub channel: FeedbackChannel,

    pub last_swipe: Option<LastSwipe>,
}

impl AppState {
    /// Creates a state waiting for quiz answers.
    #[must_use]
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            settings,
            criteria: FilterCriteria::any(),
            user: UserProfile::default(),
            loading: false,
            deck: None,
            active: None,
            exiting: Vec::new(),
            channel: FeedbackChannel::default(),
            last_swipe: None,
        }
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        match &self.deck {
            Some(deck) => deck.status().into(),
            None if self.loading => SessionPhase::Loading,
            None => SessionPhase::Quiz,
        }
    }

    /// Accepts quiz answers and enters the loading phase.
    ///
    /// Returns the criteria the caller should fetch candidates for.
    pub fn submit(&mut self, answers: &QuizAnswers) -> FilterCriteria {
        self.clear_session();
        self.criteria = FilterCriteria::from_answers(answers);
        self.user = UserProfile::from_answers(answers);
        self.loading = true;
        tracing::info!(user = %self.user.greeting_name(), "quiz submitted");
        self.criteria.clone()
    }

    /// Builds the deck from fetched candidates.
    ///
    /// Deliveries that arrive outside the loading phase are stale and ignored.
    pub fn load_candidates(&mut self, candidates: Vec<Candidate>) -> bool {
        if !self.loading {
            tracing::debug!(count = candidates.len(), "ignoring candidates delivered outside loading");
            return false;
        }
        let cards = build_deck(candidates, &self.criteria, &self.settings.palette);
        self.deck = Some(DeckState::with_cards(cards, self.settings.undo_cooldown));
        self.loading = false;
        self.sync_active(None);
        tracing::info!(phase = ?self.phase(), "deck ready");
        true
    }

    /// Returns to the quiz, discarding the deck and all animations.
    pub fn restart(&mut self) {
        self.clear_session();
        tracing::info!("session restarted");
    }

    fn clear_session(&mut self) {
        if let Some(deck) = self.deck.as_mut() {
            deck.restart();
        }
        self.deck = None;
        self.loading = false;
        self.active = None;
        self.exiting.clear();
        self.channel.activate(None);
        self.last_swipe = None;
    }

    /// Rebinds the active controller after the deck's active id may have changed.
    ///
    /// A previous controller that is already exiting keeps animating; any other
    /// previous controller is dropped, so its pending requests die with it.
    fn sync_active(&mut self, reentry: Option<SwipeDirection>) {
        let next = self.deck.as_ref().and_then(|deck| deck.active_id().cloned());
        if self.active.as_ref().map(GestureController::card_id) == next.as_ref() {
            return;
        }

        if let Some(previous) = self.active.take() {
            if matches!(previous.phase(), GesturePhase::Exiting(_)) {
                self.exiting.push(previous);
            } else {
                tracing::debug!(id = %previous.card_id(), phase = ?previous.phase(), "dropping controller of replaced card");
            }
        }

        let config = &self.settings.gesture;
        self.active = next.clone().map(|id| match reentry {
            Some(side) => GestureController::entering(id, side, config.clone()),
            None => GestureController::new(id, config.clone()),
        });
        self.channel.activate(next);
    }

    fn apply_decision(&mut self, id: &CandidateId, verdict: Verdict) -> bool {
        let Some(deck) = self.deck.as_mut() else {
            return false;
        };
        match deck.decide(id, verdict) {
            Ok(_) => {
                self.last_swipe = Some(LastSwipe {
                    verdict,
                    remaining: LAST_SWIPE_FLASH,
                });
                self.sync_active(None);
                true
            }
            Err(rejection) => {
                tracing::debug!(%rejection, "decision ignored");
                false
            }
        }
    }

    /// Starts dragging the card `id`; ignored unless it is the active card.
    pub fn drag_start(&mut self, id: &CandidateId) -> bool {
        let Some(active) = self.active.as_mut().filter(|c| c.card_id() == id) else {
            tracing::debug!(id = %id, "drag start on inactive card");
            return false;
        };
        let started = active.begin_drag();
        active.publish(&mut self.channel);
        started
    }

    /// Moves the dragged card `id` by `delta` from where the drag began.
    pub fn drag_move(&mut self, id: &CandidateId, delta: f64) -> bool {
        let Some(active) = self.active.as_mut().filter(|c| c.card_id() == id) else {
            return false;
        };
        let moved = active.drag_to(delta);
        active.publish(&mut self.channel);
        moved
    }

    /// Releases the dragged card `id`, deciding it if it crossed the threshold.
    pub fn drag_end(&mut self, id: &CandidateId) -> bool {
        let Some(active) = self.active.as_mut().filter(|c| c.card_id() == id) else {
            tracing::debug!(id = %id, "drag end on inactive card");
            return false;
        };
        let verdict = active.release();
        active.publish(&mut self.channel);
        match verdict {
            Some(verdict) => {
                let id = active.card_id().clone();
                self.apply_decision(&id, verdict)
            }
            None => true,
        }
    }

    /// Button press: animates the active card toward `verdict`.
    ///
    /// The decision is recorded when the animation reaches its commit offset.
    pub fn choose(&mut self, verdict: Verdict) -> bool {
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        if !active.request(verdict) {
            tracing::debug!(id = %active.card_id(), ?verdict, "request ignored while card is busy");
            return false;
        }
        true
    }

    /// Restores the most recent decision.
    pub fn undo(&mut self) -> bool {
        let Some(deck) = self.deck.as_mut() else {
            return false;
        };
        match deck.undo() {
            Ok(decided) => {
                let id = decided.candidate.id().clone();
                self.exiting.retain(|controller| controller.card_id() != &id);
                self.last_swipe = None;
                self.sync_active(Some(decided.exit_direction));
                true
            }
            Err(rejection) => {
                tracing::debug!(%rejection, "undo ignored");
                false
            }
        }
    }

    /// Advances every animation by `dt`. Returns `true` if anything moved.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let mut changed = false;

        // Exiting controllers first: a card that commits below joins them
        // already advanced for this frame.
        for controller in &mut self.exiting {
            changed = true;
            controller.tick(dt);
            controller.publish(&mut self.channel);
        }
        self.exiting.retain(|controller| controller.phase() != GesturePhase::Gone);

        if let Some(active) = self.active.as_mut() {
            changed |= active.is_animating();
            let signal = active.tick(dt);
            active.publish(&mut self.channel);
            if let Some(GestureSignal::Commit(verdict)) = signal {
                let id = active.card_id().clone();
                self.apply_decision(&id, verdict);
            }
        }

        if let Some(flash) = self.last_swipe.as_mut() {
            changed = true;
            flash.remaining = flash.remaining.saturating_sub(dt);
            if flash.remaining.is_zero() {
                self.last_swipe = None;
            }
        }
        changed
    }

    /// Returns `true` while any animation or flash still needs ticks.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.active.as_ref().is_some_and(GestureController::is_animating)
            || !self.exiting.is_empty()
            || self.last_swipe.is_some()
    }

    /// Liked cards of the current deck, in decision order.
    #[must_use]
    pub fn liked(&self) -> &[PresentedCandidate] {
        self.deck.as_ref().map_or(&[][..], DeckState::liked)
    }

    /// Builds a share link for the current shortlist.
    ///
    /// # Errors
    ///
    /// Propagates the adapter's [`ExportError`].
    pub fn share_link(&self, target: ShareTarget) -> Result<String, ExportError> {
        let request = ShareRequest::from_liked(self.liked(), &self.user);
        let adapter: &dyn ExportAdapter = match target {
            ShareTarget::WhatsApp => &self.settings.whatsapp,
            ShareTarget::Email => &self.settings.email,
        };
        let link = adapter.share_link(&request)?;
        tracing::info!(channel = adapter.channel(), entries = request.entries.len(), "share link built");
        Ok(link)
    }

    /// Computes the renderable view model.
    #[must_use]
    pub fn compute_viewmodel(&self) -> UIViewModel {
        let phase = self.phase();
        let progress = self
            .deck
            .as_ref()
            .filter(|_| phase == SessionPhase::Swiping)
            .map(|deck| (deck.history().len(), deck.total()));

        let screen = match phase {
            SessionPhase::Quiz => Screen::Quiz,
            SessionPhase::Loading => Screen::Loading,
            SessionPhase::Swiping => Screen::Deck(self.deck_view()),
            SessionPhase::Shortlist => Screen::Shortlist(ShortlistView {
                title: format!("Lista dos Sonhos de {}", self.user.greeting_name()),
                entries: ShareRequest::from_liked(self.liked(), &self.user).entries,
                can_share: true,
                can_undo: self.deck.as_ref().is_some_and(DeckState::can_undo),
            }),
            SessionPhase::NoMatches => Screen::Empty(self.empty_state()),
        };

        UIViewModel {
            header: HeaderInfo {
                title: TITLE.to_string(),
                progress,
            },
            screen,
            footer: FooterInfo {
                keybindings: footer_text(phase).to_string(),
            },
        }
    }

    fn deck_view(&self) -> DeckView {
        let mut cards = Vec::new();
        if let Some(deck) = &self.deck {
            let remaining = deck.remaining();
            let start = remaining.len().saturating_sub(VISIBLE_STACK);
            for card in &remaining[start..] {
                let active = self
                    .active
                    .as_ref()
                    .filter(|controller| controller.card_id() == card.id());
                let (role, pose) = match active {
                    Some(controller) => (CardRole::Active, controller.pose()),
                    None => (
                        CardRole::Background,
                        CardPose::resting(card.candidate.rest_rotation()),
                    ),
                };
                cards.push(card_view(&card.candidate, role, pose, card.reentry.is_some()));
            }

            for controller in &self.exiting {
                if let Some(decided) = deck
                    .history()
                    .iter()
                    .rev()
                    .find(|decided| decided.candidate.id() == controller.card_id())
                {
                    cards.push(card_view(&decided.candidate, CardRole::Leaving, controller.pose(), false));
                }
            }
        }

        DeckView {
            cards,
            controls: self.channel.feedback(),
            can_undo: self.deck.as_ref().is_some_and(DeckState::can_undo),
            flash: self.last_swipe.map(|flash| flash.verdict),
        }
    }

    fn empty_state(&self) -> EmptyState {
        let nothing_matched = self.deck.as_ref().map_or(true, |deck| deck.total() == 0);
        if nothing_matched {
            EmptyState {
                message: "Nenhuma universidade encontrada".to_string(),
                subtitle: "Nenhuma opção corresponde aos filtros. Tente filtros diferentes!".to_string(),
            }
        } else {
            EmptyState {
                message: "Nenhum Match? 😢".to_string(),
                subtitle: "Você passou por todas as opções e não curtiu nenhuma. Tente filtros diferentes!"
                    .to_string(),
            }
        }
    }
}

fn card_view(card: &PresentedCandidate, role: CardRole, pose: CardPose, reentering: bool) -> CardView {
    CardView {
        name: card.candidate.name.clone(),
        location: card.candidate.location.clone(),
        region: card.candidate.region,
        description: card.candidate.description.clone(),
        theme: card.theme.clone(),
        direction: card.direction,
        topics: card.candidate.topics.iter().copied().collect(),
        is_big_city: card.candidate.is_big_city,
        match_score: card.match_score(),
        pose,
        role,
        reentering,
    }
}

const fn footer_text(phase: SessionPhase) -> &'static str {
    match phase {
        SessionPhase::Quiz => "answer the quiz to start • quit",
        SessionPhase::Loading => "loading candidates…",
        SessionPhase::Swiping => "like • nope • drag <px> • release • undo • restart • quit",
        SessionPhase::Shortlist => "share whatsapp • share email • undo • restart • quit",
        SessionPhase::NoMatches => "undo • restart • quit",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Region;

    const FRAME: Duration = Duration::from_millis(16);

    fn settings() -> SessionSettings {
        SessionSettings {
            undo_cooldown: Duration::ZERO,
            ..SessionSettings::default()
        }
    }

    fn loaded(n: usize) -> AppState {
        let mut state = AppState::new(settings());
        state.submit(&QuizAnswers::default().with("userName", "Ana"));
        let candidates = (0..n)
            .map(|i| Candidate::new(i.to_string(), format!("Uni {i}"), "Siena", Region::Center))
            .collect();
        assert!(state.load_candidates(candidates));
        state
    }

    fn active_id(state: &AppState) -> CandidateId {
        state.deck.as_ref().and_then(DeckState::active_id).cloned().unwrap()
    }

    fn settle(state: &mut AppState) {
        for _ in 0..500 {
            if !state.is_animating() {
                return;
            }
            state.tick(FRAME);
        }
        panic!("animations never settled");
    }

    #[test]
    fn phases_follow_the_session() {
        let mut state = AppState::new(settings());
        assert_eq!(state.phase(), SessionPhase::Quiz);
        state.submit(&QuizAnswers::default());
        assert_eq!(state.phase(), SessionPhase::Loading);
        state.load_candidates(Vec::new());
        assert_eq!(state.phase(), SessionPhase::NoMatches);
        state.restart();
        assert_eq!(state.phase(), SessionPhase::Quiz);
    }

    #[test]
    fn stale_delivery_is_ignored() {
        let mut state = AppState::new(settings());
        assert!(!state.load_candidates(vec![Candidate::new("0", "Uni", "Bari", Region::South)]));
        assert!(state.deck.is_none());
    }

    #[test]
    fn controller_follows_active_card() {
        let mut state = loaded(3);
        let first = active_id(&state);
        assert_eq!(state.active.as_ref().map(GestureController::card_id), Some(&first));
        assert_eq!(state.channel.owner(), Some(&first));

        state.drag_start(&first);
        state.drag_move(&first, 140.0);
        assert!(state.drag_end(&first));

        let second = active_id(&state);
        assert_ne!(first, second);
        assert_eq!(state.channel.owner(), Some(&second));
        assert!(state.channel.offset().abs() < f64::EPSILON);
        assert_eq!(state.exiting.len(), 1);
    }

    #[test]
    fn exiting_card_cannot_move_the_buttons() {
        let mut state = loaded(2);
        let first = active_id(&state);
        state.drag_start(&first);
        state.drag_move(&first, -300.0);
        state.drag_end(&first);

        state.tick(FRAME);
        assert!(state.channel.offset().abs() < f64::EPSILON);
        assert_eq!(state.compute_viewmodel().header.progress, Some((1, 2)));
    }

    #[test]
    fn gestures_on_a_stale_card_are_ignored() {
        let mut state = loaded(2);
        let stale = CandidateId::new("nope");
        assert!(!state.drag_start(&stale));
        assert!(!state.drag_end(&stale));
        assert_eq!(state.deck.as_ref().map(|d| d.history().len()), Some(0));
    }

    #[test]
    fn button_press_decides_once_animation_commits() {
        let mut state = loaded(2);
        assert!(state.choose(Verdict::Like));
        assert!(!state.choose(Verdict::Reject));
        assert!(state.liked().is_empty());

        settle(&mut state);
        assert_eq!(state.liked().len(), 1);
        assert_eq!(state.deck.as_ref().map(|d| d.history().len()), Some(1));
    }

    #[test]
    fn committed_card_starts_its_exit_from_the_commit_offset() {
        let mut state = loaded(2);
        let commit_offset = state.settings.gesture.commit_offset;
        state.choose(Verdict::Like);

        for _ in 0..500 {
            state.tick(FRAME);
            if !state.exiting.is_empty() {
                break;
            }
        }
        let leaving = state.exiting.first().unwrap();
        assert_eq!(leaving.phase(), GesturePhase::Exiting(SwipeDirection::Right));
        assert!((leaving.offset() - commit_offset).abs() < f64::EPSILON);
    }

    #[test]
    fn undo_brings_card_back_with_entry_animation() {
        let mut state = loaded(2);
        let first = active_id(&state);
        state.choose(Verdict::Reject);
        settle(&mut state);

        assert!(state.undo());
        assert_eq!(active_id(&state), first);
        let controller = state.active.as_ref().unwrap();
        assert_eq!(controller.phase(), GesturePhase::Entering(SwipeDirection::Left));
        assert!(controller.offset() < 0.0);

        settle(&mut state);
        assert_eq!(state.active.as_ref().unwrap().phase(), GesturePhase::Idle);
    }

    #[test]
    fn undo_during_exit_cancels_the_flight() {
        let mut state = loaded(2);
        let first = active_id(&state);
        state.drag_start(&first);
        state.drag_move(&first, 200.0);
        state.drag_end(&first);
        assert_eq!(state.exiting.len(), 1);

        assert!(state.undo());
        assert!(state.exiting.is_empty());
        assert_eq!(active_id(&state), first);
    }

    #[test]
    fn shortlist_can_be_shared() {
        let mut state = loaded(1);
        let only = active_id(&state);
        state.drag_start(&only);
        state.drag_move(&only, 150.0);
        state.drag_end(&only);
        settle(&mut state);

        assert_eq!(state.phase(), SessionPhase::Shortlist);
        let link = state.share_link(ShareTarget::WhatsApp).unwrap();
        assert!(link.contains("Uni%200"));

        match state.compute_viewmodel().screen {
            Screen::Shortlist(view) => {
                assert_eq!(view.title, "Lista dos Sonhos de Ana");
                assert_eq!(view.entries.len(), 1);
            }
            other => panic!("unexpected screen {other:?}"),
        }
    }

    #[test]
    fn sharing_with_empty_shortlist_fails() {
        let state = loaded(1);
        assert_eq!(state.share_link(ShareTarget::Email), Err(ExportError::EmptyShortlist));
    }

    #[test]
    fn deck_view_stacks_background_under_active() {
        let state = loaded(5);
        let Screen::Deck(view) = state.compute_viewmodel().screen else {
            panic!("expected deck screen");
        };
        assert_eq!(view.cards.len(), VISIBLE_STACK);
        assert_eq!(view.cards.last().map(|c| c.role), Some(CardRole::Active));
        assert!(view.cards[..2].iter().all(|c| c.role == CardRole::Background));
        assert!(!view.can_undo);
    }
}
