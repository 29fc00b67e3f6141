//! # View Models
//!
//! Interactive state built on top of the layout models: per-key view models,
//! the mode state machine and the keyboard coordinator.

pub mod key_view_model;
pub mod keyboard_view_model;
pub mod mode_state;

pub use key_view_model::KeyViewModel;
pub use keyboard_view_model::{KeySnapshot, KeyboardSnapshot, KeyboardViewModel};
pub use mode_state::{CapitalizationState, KeyboardModeStateMachine, ModeTransition};
