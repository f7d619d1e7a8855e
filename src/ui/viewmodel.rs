//! View model types representing renderable UI state.
//!
//! View models are created via `AppState::compute_viewmodel()` and consumed by
//! the renderer. They contain no business logic, only display-ready data:
//! resolved card poses, button styling and shortlist text.

use crate::domain::{Region, Topic, Verdict};
use crate::export::ShortlistEntry;
use crate::gesture::{CardPose, ControlFeedback};
use crate::ui::theme::{CardTheme, GradientDirection};

/// Complete UI view model for rendering.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub screen: Screen,
    pub footer: FooterInfo,
}

/// Title bar content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    /// `(decided, total)` while a deck is being swiped.
    pub progress: Option<(usize, usize)>,
}

/// Footer help text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}

/// What occupies the body of the screen.
#[derive(Debug, Clone)]
pub enum Screen {
    /// Waiting for quiz answers.
    Quiz,
    /// Candidates are being fetched.
    Loading,
    Deck(DeckView),
    Shortlist(ShortlistView),
    Empty(EmptyState),
}

/// The card stack with its controls.
#[derive(Debug, Clone)]
pub struct DeckView {
    /// Cards bottom to top: background cards, then the active card, then
    /// cards still flying off-screen.
    pub cards: Vec<CardView>,
    pub controls: ControlFeedback,
    pub can_undo: bool,
    /// Verdict of the most recent decision while its flash is visible.
    pub flash: Option<Verdict>,
}

/// How a card participates in the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardRole {
    Background,
    Active,
    Leaving,
}

/// Display information for one card.
#[derive(Debug, Clone)]
pub struct CardView {
    pub name: String,
    pub location: String,
    pub region: Region,
    /// Description with `**emphasis**` markers.
    pub description: String,
    pub theme: CardTheme,
    pub direction: GradientDirection,
    pub topics: Vec<Topic>,
    pub is_big_city: bool,
    pub match_score: u8,
    pub pose: CardPose,
    pub role: CardRole,
    /// Whether the card just came back through undo.
    pub reentering: bool,
}

/// End-of-deck shortlist screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortlistView {
    pub title: String,
    pub entries: Vec<ShortlistEntry>,
    pub can_share: bool,
    pub can_undo: bool,
}

/// Message shown when there is nothing to swipe or list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}
