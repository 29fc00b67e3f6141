//! # Keyboard Layout
//!
//! Ordered rows plus the global design shared by every key. A layout is
//! built once per keyboard mode and never changes afterwards.

use serde::{Deserialize, Serialize};

use super::key_spec::KeySpec;
use super::row::Row;
use crate::keyboard::events::KeyboardMode;
use crate::keyboard::geometry::EdgeInsets;

/// Per-key visual defaults. Only carried through to renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonDesign {
    pub corner_radius: f64,
    pub font_size: f64,
    pub key_color: String,
    pub text_color: String,
}

impl Default for ButtonDesign {
    fn default() -> Self {
        Self {
            corner_radius: 5.0,
            font_size: 22.0,
            key_color: "#FFFFFF".to_string(),
            text_color: "#000000".to_string(),
        }
    }
}

/// Global layout parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Design {
    pub edge_insets: EdgeInsets,
    pub row_spacing: f64,
    pub letter_spacing: f64,
    pub key_height: f64,
    pub special_key_width: f64,
    pub space_key_width: f64,
    /// Horizontal padding on each side of intrinsically sized keys
    pub key_padding: f64,
    pub button: ButtonDesign,
}

impl Default for Design {
    fn default() -> Self {
        Self {
            edge_insets: EdgeInsets::uniform(3.0),
            row_spacing: 10.0,
            letter_spacing: 6.0,
            key_height: 42.0,
            special_key_width: 42.0,
            space_key_width: 160.0,
            key_padding: 8.0,
            button: ButtonDesign::default(),
        }
    }
}

/// Stable index of a key within one layout, in depth-first row order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct KeyId(pub usize);

#[derive(Debug, Clone, PartialEq)]
pub struct KeyboardLayout {
    mode: KeyboardMode,
    rows: Vec<Row>,
    design: Design,
}

impl KeyboardLayout {
    pub fn new(mode: KeyboardMode, rows: Vec<Row>, design: Design) -> Self {
        Self { mode, rows, design }
    }

    pub fn mode(&self) -> KeyboardMode {
        self.mode
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn design(&self) -> &Design {
        &self.design
    }

    /// Every key with its id, rows top to bottom, nested rows depth-first
    pub fn keys(&self) -> Vec<(KeyId, &KeySpec)> {
        self.rows
            .iter()
            .flat_map(|row| row.keys())
            .enumerate()
            .map(|(index, key)| (KeyId(index), key))
            .collect()
    }

    pub fn key(&self, id: KeyId) -> Option<&KeySpec> {
        self.rows.iter().flat_map(|row| row.keys()).nth(id.0)
    }

    pub fn key_count(&self) -> usize {
        self.rows.iter().map(Row::key_count).sum()
    }

    /// Letter count of the widest letter row; it determines the default
    /// letter width
    pub fn letter_count(&self) -> usize {
        self.rows.iter().map(Row::letter_count).max().unwrap_or(0)
    }
}
