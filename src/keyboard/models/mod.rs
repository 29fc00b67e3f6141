//! # Models
//!
//! Key descriptions, rows, layouts and the committed text sink.

pub mod committed_text;
pub mod key_spec;
pub mod layout;
pub mod presets;
pub mod row;

pub use committed_text::{CommittedText, TextSink};
pub use key_spec::{KeyContext, KeySpec, ResolvedKey, WidthPolicy};
pub use layout::{ButtonDesign, Design, KeyId, KeyboardLayout};
pub use row::{DistributionPolicy, Row, RowItem};
