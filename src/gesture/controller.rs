//! Per-card gesture controller.
//!
//! A [`GestureController`] tracks the horizontal offset of one card and turns
//! drags, releases and button presses into at most one verdict. The controller
//! is bound to a single [`CandidateId`] for its whole life: the application
//! creates a fresh one whenever the active card changes, so a controller that
//! is still animating an exit can never affect the next card.
//!
//! ```text
//!              begin_drag            release (|x| > threshold)
//!   Idle ────────────────► Dragging ─────────────────────────► Exiting ──► Gone
//!    ▲  ▲                     │                                   ▲
//!    │  │ settled             │ release (|x| <= threshold)        │ offset reached
//!    │  └──── SnappingBack ◄──┘                                   │
//!    │                                                      Committing
//!    │ settled                                                    ▲
//!   Entering (after undo)                         request(verdict)│ from Idle
//! ```

use crate::domain::{CandidateId, SwipeDirection, Verdict};
use crate::gesture::channel::FeedbackChannel;
use crate::gesture::feedback::{CardPose, ControlFeedback};
use crate::gesture::spring::{Motion, Spring};
use std::time::Duration;

/// Tunables for card motion.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureConfig {
    /// Release offset beyond which a drag commits. Ties snap back.
    pub threshold: f64,
    /// Offset a button-triggered swipe animates to before the card leaves.
    pub commit_offset: f64,
    /// Off-screen offset a leaving card flies to.
    pub exit_offset: f64,
    pub exit_duration: Duration,
    pub snap_back: Spring,
    pub programmatic: Spring,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            threshold: 100.0,
            commit_offset: 160.0,
            exit_offset: 800.0,
            exit_duration: Duration::from_millis(400),
            snap_back: Spring::SNAP_BACK,
            programmatic: Spring::PROGRAMMATIC,
        }
    }
}

/// Where a card is in its gesture lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    /// At rest, accepting drags and button presses.
    Idle,
    /// Following the pointer.
    Dragging,
    /// Released under the threshold, springing back to rest.
    SnappingBack,
    /// Button-triggered swipe animating toward the commit offset.
    Committing(Verdict),
    /// Verdict emitted; flying off-screen.
    Exiting(SwipeDirection),
    /// Restored by undo; flying back in from one side.
    Entering(SwipeDirection),
    /// Off-screen; the controller can be dropped.
    Gone,
}

/// Notification produced by [`GestureController::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureSignal {
    /// A button-triggered swipe reached its commit offset.
    Commit(Verdict),
    /// The card finished leaving the screen.
    Exited,
    /// The card came to rest at the centre.
    Settled,
}

/// Offset and animation state for one card.
#[derive(Debug, Clone)]
pub struct GestureController {
    card_id: CandidateId,
    config: GestureConfig,
    offset: f64,
    drag_origin: f64,
    phase: GesturePhase,
    motion: Option<Motion>,
}

impl GestureController {
    /// Controller for a card resting at the centre.
    #[must_use]
    pub const fn new(card_id: CandidateId, config: GestureConfig) -> Self {
        Self {
            card_id,
            config,
            offset: 0.0,
            drag_origin: 0.0,
            phase: GesturePhase::Idle,
            motion: None,
        }
    }

    /// Controller for a card brought back by undo, entering from `side`.
    #[must_use]
    pub fn entering(card_id: CandidateId, side: SwipeDirection, config: GestureConfig) -> Self {
        let start = side.sign() * config.exit_offset;
        let motion = Motion::spring(config.snap_back, 0.0);
        Self {
            card_id,
            config,
            offset: start,
            drag_origin: 0.0,
            phase: GesturePhase::Entering(side),
            motion: Some(motion),
        }
    }

    #[must_use]
    pub const fn card_id(&self) -> &CandidateId {
        &self.card_id
    }

    #[must_use]
    pub const fn offset(&self) -> f64 {
        self.offset
    }

    #[must_use]
    pub const fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// Returns `true` once a verdict is on its way and new requests must be ignored.
    #[must_use]
    pub const fn in_flight(&self) -> bool {
        matches!(
            self.phase,
            GesturePhase::Committing(_) | GesturePhase::Exiting(_) | GesturePhase::Gone
        )
    }

    /// Returns `true` while an animation needs further ticks.
    #[must_use]
    pub const fn is_animating(&self) -> bool {
        self.motion.is_some()
    }

    /// Starts following the pointer from the current offset.
    ///
    /// Grabbing a card that is snapping back or entering interrupts that
    /// animation. Returns `false` when a verdict is already in flight.
    pub fn begin_drag(&mut self) -> bool {
        if self.in_flight() {
            return false;
        }
        self.phase = GesturePhase::Dragging;
        self.drag_origin = self.offset;
        self.motion = None;
        true
    }

    /// Moves the card to the drag origin plus `delta`, 1:1 with the pointer.
    ///
    /// Non-finite deltas are ignored and leave the card where it is.
    pub fn drag_to(&mut self, delta: f64) -> bool {
        if self.phase != GesturePhase::Dragging || !delta.is_finite() {
            return false;
        }
        self.offset = self.drag_origin + delta;
        true
    }

    /// Ends a drag.
    ///
    /// Commits when the offset magnitude is strictly greater than the
    /// threshold, returning the verdict and starting the exit flight.
    /// Otherwise the card springs back to rest.
    pub fn release(&mut self) -> Option<Verdict> {
        if self.phase != GesturePhase::Dragging {
            return None;
        }
        if self.offset.abs() > self.config.threshold {
            let verdict = Verdict::from_offset(self.offset);
            self.start_exit(verdict.direction());
            Some(verdict)
        } else {
            self.phase = GesturePhase::SnappingBack;
            self.motion = Some(Motion::spring(self.config.snap_back, 0.0));
            None
        }
    }

    /// Starts a button-triggered swipe.
    ///
    /// Returns `false`, leaving the card untouched, while a drag is active or
    /// a verdict is already in flight.
    pub fn request(&mut self, verdict: Verdict) -> bool {
        if self.in_flight() || self.phase == GesturePhase::Dragging {
            return false;
        }
        let target = verdict.direction().sign() * self.config.commit_offset;
        self.phase = GesturePhase::Committing(verdict);
        self.motion = Some(Motion::spring(self.config.programmatic, target));
        true
    }

    /// Advances the current animation by `dt`.
    pub fn tick(&mut self, dt: Duration) -> Option<GestureSignal> {
        let motion = self.motion.as_mut()?;
        let (offset, finished) = motion.step(self.offset, dt);
        self.offset = offset;
        if !finished {
            return None;
        }
        self.motion = None;

        match self.phase {
            GesturePhase::SnappingBack | GesturePhase::Entering(_) => {
                self.phase = GesturePhase::Idle;
                Some(GestureSignal::Settled)
            }
            GesturePhase::Committing(verdict) => {
                self.start_exit(verdict.direction());
                Some(GestureSignal::Commit(verdict))
            }
            GesturePhase::Exiting(_) => {
                self.phase = GesturePhase::Gone;
                Some(GestureSignal::Exited)
            }
            GesturePhase::Idle | GesturePhase::Dragging | GesturePhase::Gone => None,
        }
    }

    fn start_exit(&mut self, direction: SwipeDirection) {
        let target = direction.sign() * self.config.exit_offset;
        self.phase = GesturePhase::Exiting(direction);
        self.motion = Some(Motion::tween(self.offset, target, self.config.exit_duration));
    }

    /// Card pose at the current offset.
    #[must_use]
    pub fn pose(&self) -> CardPose {
        CardPose::at(self.offset)
    }

    /// Control button styling at the current offset.
    #[must_use]
    pub fn feedback(&self) -> ControlFeedback {
        ControlFeedback::at(self.offset)
    }

    /// Writes the current offset to the shared feedback channel.
    ///
    /// Only succeeds while this controller's card owns the channel.
    pub fn publish(&self, channel: &mut FeedbackChannel) -> bool {
        channel.write(&self.card_id, self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn controller() -> GestureController {
        GestureController::new(CandidateId::new("7"), GestureConfig::default())
    }

    fn run_until_signal(controller: &mut GestureController) -> Option<GestureSignal> {
        for _ in 0..500 {
            if let Some(signal) = controller.tick(FRAME) {
                return Some(signal);
            }
        }
        None
    }

    #[test]
    fn release_past_threshold_commits_in_drag_direction() {
        let mut gesture = controller();
        assert!(gesture.begin_drag());
        gesture.drag_to(-150.0);
        assert_eq!(gesture.release(), Some(Verdict::Reject));
        assert_eq!(gesture.phase(), GesturePhase::Exiting(SwipeDirection::Left));

        assert_eq!(run_until_signal(&mut gesture), Some(GestureSignal::Exited));
        assert!((gesture.offset() + 800.0).abs() < f64::EPSILON);
        assert_eq!(gesture.phase(), GesturePhase::Gone);
    }

    #[test]
    fn release_exactly_at_threshold_snaps_back() {
        let mut gesture = controller();
        gesture.begin_drag();
        gesture.drag_to(100.0);
        assert_eq!(gesture.release(), None);
        assert_eq!(gesture.phase(), GesturePhase::SnappingBack);

        assert_eq!(run_until_signal(&mut gesture), Some(GestureSignal::Settled));
        assert!(gesture.offset().abs() < f64::EPSILON);
        assert_eq!(gesture.phase(), GesturePhase::Idle);
    }

    #[test]
    fn release_just_past_threshold_commits() {
        let mut gesture = controller();
        gesture.begin_drag();
        gesture.drag_to(101.0);
        assert_eq!(gesture.release(), Some(Verdict::Like));
    }

    #[test]
    fn non_finite_drag_is_ignored_and_card_stays_usable() {
        let mut gesture = controller();
        gesture.begin_drag();
        gesture.drag_to(30.0);
        assert!(!gesture.drag_to(f64::NAN));
        assert!(!gesture.drag_to(f64::INFINITY));
        assert!((gesture.offset() - 30.0).abs() < f64::EPSILON);

        assert_eq!(gesture.release(), None);
        assert_eq!(run_until_signal(&mut gesture), Some(GestureSignal::Settled));
        assert!(gesture.request(Verdict::Like));
        assert_eq!(run_until_signal(&mut gesture), Some(GestureSignal::Commit(Verdict::Like)));
    }

    #[test]
    fn button_request_commits_once_offset_is_reached() {
        let mut gesture = controller();
        assert!(gesture.request(Verdict::Like));
        assert!(gesture.in_flight());
        assert!(!gesture.request(Verdict::Reject));

        assert_eq!(run_until_signal(&mut gesture), Some(GestureSignal::Commit(Verdict::Like)));
        assert!((gesture.offset() - 160.0).abs() < f64::EPSILON);
        assert_eq!(run_until_signal(&mut gesture), Some(GestureSignal::Exited));
    }

    #[test]
    fn in_flight_card_ignores_drags() {
        let mut gesture = controller();
        gesture.request(Verdict::Reject);
        assert!(!gesture.begin_drag());
        assert!(!gesture.drag_to(50.0));
        assert_eq!(gesture.release(), None);
    }

    #[test]
    fn drag_interrupts_snap_back_from_current_offset() {
        let mut gesture = controller();
        gesture.begin_drag();
        gesture.drag_to(80.0);
        gesture.release();
        gesture.tick(FRAME);
        let mid = gesture.offset();
        assert!(mid > 0.0 && mid < 80.0);

        assert!(gesture.begin_drag());
        gesture.drag_to(10.0);
        assert!((gesture.offset() - (mid + 10.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn entering_card_flies_in_from_its_exit_side() {
        let mut gesture = GestureController::entering(
            CandidateId::new("3"),
            SwipeDirection::Right,
            GestureConfig::default(),
        );
        assert!((gesture.offset() - 800.0).abs() < f64::EPSILON);
        assert_eq!(run_until_signal(&mut gesture), Some(GestureSignal::Settled));
        assert_eq!(gesture.phase(), GesturePhase::Idle);
    }

    #[test]
    fn publish_requires_channel_ownership() {
        let mut channel = FeedbackChannel::default();
        let mut gesture = controller();
        gesture.begin_drag();
        gesture.drag_to(42.0);

        assert!(!gesture.publish(&mut channel));
        channel.activate(Some(CandidateId::new("7")));
        assert!(gesture.publish(&mut channel));
        assert!((channel.offset() - 42.0).abs() < f64::EPSILON);
    }
}
