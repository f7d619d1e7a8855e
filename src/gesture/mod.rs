//! Gesture and animation layer.
//!
//! - [`controller`]: Drag/release/button state machine for one card
//! - [`channel`]: Single-writer offset slot read by the control buttons
//! - [`feedback`]: Pose and button styling derived from an offset
//! - [`spring`]: Spring and tween motion stepped by explicit frame times

pub mod channel;
pub mod controller;
pub mod feedback;
pub mod spring;

pub use channel::FeedbackChannel;
pub use controller::{GestureConfig, GestureController, GesturePhase, GestureSignal};
pub use feedback::{interpolate, ButtonStyle, CardPose, ControlFeedback, Rgba};
pub use spring::{Motion, Spring};
