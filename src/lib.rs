//! # fontkeys - Virtual Keyboard Engine
//!
//! Layout, state and input engine of an on-screen keyboard used to compose
//! text in custom fonts. Supports Latin and Cyrillic letter layouts plus two
//! punctuation sets, with a momentary shift key.
//!
//! ## Architecture
//!
//! Keys suggest actions; the keyboard view model decides what they mean:
//!
//! ```text
//! ┌──────────────┐  tap   ┌────────────────────┐  TextCommand  ┌───────────────┐
//! │ KeyViewModel │───────►│ KeyboardViewModel  │──────────────►│ CommittedText │
//! │              │        │                    │               │               │
//! │ - glyph      │        │ - action dispatch  │  KeyPressSound│ - fragments   │
//! │ - KeySpec    │        │ - key rebuild      │──────────────►│   (sink)      │
//! └──────────────┘        └────────────────────┘   feedback    └───────────────┘
//!        ▲                          │
//!        │ hot events               │ toggles
//!        │                          ▼
//!        │                ┌────────────────────┐
//!        └────────────────│ ModeStateMachine   │
//!                         │ - mode             │
//!                         │ - capitalization   │
//!                         └────────────────────┘
//! ```
//!
//! Geometry is computed on demand by [`LayoutCalculator`] from a
//! [`KeyboardLayout`] and a container width.

pub mod cmd_args;
pub mod config;
pub mod keyboard;

// Re-export main types for easy access
pub use keyboard::*;
