//! # Keyboard Engine
//!
//! Layout models, geometry, events and view models of the virtual keyboard.

pub mod events;
pub mod geometry;
pub mod models;
pub mod view_models;

// Re-export core types
pub use events::*;
pub use geometry::{
    default_letter_width, EdgeInsets, Frame, GlyphMeasurer, KeyboardFrames, LayoutCalculator,
    MonospaceMeasurer, Point, Size,
};
pub use models::{
    CommittedText, Design, DistributionPolicy, KeyId, KeySpec, KeyboardLayout, Row, RowItem,
    TextSink, WidthPolicy,
};
pub use view_models::{KeyViewModel, KeyboardModeStateMachine, KeyboardViewModel};
