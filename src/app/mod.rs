//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the driver (main.rs) and the domain, engine,
//! gesture and export layers.
//!
//! # Architecture
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └──────── Fetch Results ───────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and state transition coordinator
//! - [`modes`]: Session phase state machine
//! - [`state`]: Central application state and view model computation

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::SessionPhase;
pub use state::{AppState, LastSwipe, SessionSettings, LAST_SWIPE_FLASH};
