//! User interface rendering layer with component-based architecture.
//!
//! This module turns the session into ANSI-styled text through composable
//! rendering components. It owns the card palettes and the text helpers that
//! display emphasized descriptions.
//!
//! # Architecture
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Shared rendering utilities (emphasis, wrapping, widths)
//! - [`theme`]: Card palettes and ANSI escape sequence generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render, render_viewmodel};
pub use theme::{CardTheme, GradientDirection, Palette};
pub use viewmodel::{
    CardRole, CardView, DeckView, EmptyState, FooterInfo, HeaderInfo, Screen, ShortlistView,
    UIViewModel,
};
