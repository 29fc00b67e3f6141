//! # Geometry
//!
//! Geometry types and the layout calculator that turns a [`KeyboardLayout`]
//! into key frames for a given container width.
//!
//! Rows are stacked from the top inset. The first row's height is the height
//! of its tallest key and every following row takes the height of the row
//! above it, so all rows end up equally tall. Horizontal placement follows
//! each row's [`DistributionPolicy`].

use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

use crate::keyboard::models::{
    Design, DistributionPolicy, KeyId, KeySpec, KeyboardLayout, Row, RowItem, WidthPolicy,
};

/// A point in keyboard coordinates, origin at the top left
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Frame {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    /// Left and top edges are inclusive, right and bottom exclusive
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.max_x() && point.y >= self.y && point.y < self.max_y()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EdgeInsets {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl EdgeInsets {
    pub const fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    pub const fn uniform(inset: f64) -> Self {
        Self::new(inset, inset, inset, inset)
    }

    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

/// Width of rendered text, standing in for the platform font stack
pub trait GlyphMeasurer {
    fn measure(&self, text: &str) -> f64;
}

/// Measures text as terminal columns times a fixed advance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasurer {
    pub advance: f64,
}

impl MonospaceMeasurer {
    pub fn new(advance: f64) -> Self {
        Self { advance }
    }

    /// Typical advance of a proportional font at `font_size`
    pub fn for_font_size(font_size: f64) -> Self {
        Self::new((font_size * 0.6).round())
    }
}

impl GlyphMeasurer for MonospaceMeasurer {
    fn measure(&self, text: &str) -> f64 {
        UnicodeWidthStr::width(text) as f64 * self.advance
    }
}

/// Default letter width: the widest letter row must fit between the
/// horizontal insets, with `spacing` between letters, in whole points.
pub fn default_letter_width(
    screen_width: f64,
    insets: &EdgeInsets,
    spacing: f64,
    letter_count: usize,
) -> f64 {
    if letter_count == 0 {
        return 0.0;
    }
    let available = screen_width - insets.horizontal() - spacing * (letter_count - 1) as f64;
    (available.floor() / letter_count as f64).floor().max(0.0)
}

/// Left offsets of items packed with a fixed spacing, and the total width
pub fn pack_self_sizing(widths: &[f64], spacing: f64) -> (Vec<f64>, f64) {
    let mut offsets = Vec::with_capacity(widths.len());
    let mut cursor = 0.0;
    for (index, width) in widths.iter().enumerate() {
        if index > 0 {
            cursor += spacing;
        }
        offsets.push(cursor);
        cursor += width;
    }
    (offsets, cursor)
}

/// Left offsets of items spread across `container_width` with equal gaps.
/// A single item is centered. Gaps never go negative; overflowing items
/// are packed edge to edge from the left.
pub fn distribute_equal_spacing(container_width: f64, widths: &[f64]) -> Vec<f64> {
    match widths.len() {
        0 => Vec::new(),
        1 => vec![(container_width - widths[0]) / 2.0],
        count => {
            let residual = container_width - widths.iter().sum::<f64>();
            if residual < 0.0 {
                tracing::warn!(
                    "Row content overflows container by {} points, packing without gaps",
                    -residual
                );
            }
            let gap = residual.max(0.0) / (count - 1) as f64;
            pack_self_sizing(widths, gap).0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyFrame {
    pub id: KeyId,
    pub frame: Frame,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowFrame {
    pub frame: Frame,
    pub keys: Vec<KeyFrame>,
}

/// Result of laying out a whole keyboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyboardFrames {
    pub size: Size,
    pub letter_width: f64,
    pub rows: Vec<RowFrame>,
}

impl KeyboardFrames {
    pub fn keys(&self) -> impl Iterator<Item = &KeyFrame> {
        self.rows.iter().flat_map(|row| row.keys.iter())
    }

    pub fn key_frame(&self, id: KeyId) -> Option<Frame> {
        self.keys().find(|key| key.id == id).map(|key| key.frame)
    }

    /// Key whose frame contains `point`
    pub fn key_at(&self, point: Point) -> Option<KeyId> {
        self.rows
            .iter()
            .filter(|row| point.y >= row.frame.y && point.y < row.frame.max_y())
            .flat_map(|row| row.keys.iter())
            .find(|key| key.frame.contains(point))
            .map(|key| key.id)
    }
}

/// Computes frames for layouts sharing one design
pub struct LayoutCalculator<'a> {
    design: &'a Design,
    measurer: &'a dyn GlyphMeasurer,
}

impl<'a> LayoutCalculator<'a> {
    pub fn new(design: &'a Design, measurer: &'a dyn GlyphMeasurer) -> Self {
        Self { design, measurer }
    }

    pub fn letter_width(&self, screen_width: f64, letter_count: usize) -> f64 {
        default_letter_width(
            screen_width,
            &self.design.edge_insets,
            self.design.letter_spacing,
            letter_count,
        )
    }

    pub fn key_width(&self, key: &KeySpec, letter_width: f64) -> f64 {
        match key.width_policy() {
            WidthPolicy::Letter => letter_width,
            WidthPolicy::Fixed(width) => width,
            WidthPolicy::Intrinsic => {
                self.measurer.measure(key.measurement_text()) + 2.0 * self.design.key_padding
            }
            WidthPolicy::Special => self.design.special_key_width,
        }
    }

    /// Keys share one height
    pub fn key_height(&self) -> f64 {
        self.design.key_height
    }

    /// Declared width of an item. A nested row declares its content width,
    /// with no gaps for equal-spacing rows.
    pub fn item_width(&self, item: &RowItem, letter_width: f64) -> f64 {
        match item {
            RowItem::Key(key) => self.key_width(key, letter_width),
            RowItem::Row(row) => self.content_width(row, letter_width),
        }
    }

    pub fn content_width(&self, row: &Row, letter_width: f64) -> f64 {
        let widths = self.item_widths(row, letter_width);
        match row.distribution() {
            DistributionPolicy::SelfSizing { spacing } => pack_self_sizing(&widths, spacing).1,
            DistributionPolicy::FillEqualSpacing => widths.iter().sum(),
        }
    }

    fn item_widths(&self, row: &Row, letter_width: f64) -> Vec<f64> {
        row.items()
            .iter()
            .map(|item| self.item_width(item, letter_width))
            .collect()
    }

    /// Height of `row`, nested rows included. Zero for a row without keys.
    pub fn intrinsic_row_height(&self, row: &Row) -> f64 {
        if row.key_count() == 0 {
            0.0
        } else {
            self.key_height()
        }
    }

    /// Lay out `row` inside a container slot starting at `origin` and
    /// `container_width` wide. Key ids are assigned from `next_id` in
    /// depth-first order. Returns the row's own frame.
    #[allow(clippy::too_many_arguments)]
    pub fn layout_row(
        &self,
        row: &Row,
        origin: Point,
        container_width: f64,
        height: f64,
        letter_width: f64,
        next_id: &mut usize,
        keys: &mut Vec<KeyFrame>,
    ) -> Frame {
        let widths = self.item_widths(row, letter_width);
        let (offsets, row_width) = match row.distribution() {
            DistributionPolicy::SelfSizing { spacing } => pack_self_sizing(&widths, spacing),
            DistributionPolicy::FillEqualSpacing => (
                distribute_equal_spacing(container_width, &widths),
                container_width,
            ),
        };

        for ((item, offset), width) in row.items().iter().zip(offsets).zip(widths) {
            let x = origin.x + offset;
            match item {
                RowItem::Key(_) => {
                    keys.push(KeyFrame {
                        id: KeyId(*next_id),
                        frame: Frame::new(x, origin.y, width, height),
                    });
                    *next_id += 1;
                }
                RowItem::Row(nested) => {
                    self.layout_row(
                        nested,
                        Point::new(x, origin.y),
                        width,
                        height,
                        letter_width,
                        next_id,
                        keys,
                    );
                }
            }
        }

        Frame::new(origin.x, origin.y, row_width, height)
    }

    pub fn layout_keyboard(&self, layout: &KeyboardLayout, screen_width: f64) -> KeyboardFrames {
        let insets = &self.design.edge_insets;
        let letter_width = self.letter_width(screen_width, layout.letter_count());
        let container_width = (screen_width - insets.horizontal()).max(0.0);

        let mut next_id = 0;
        let mut rows = Vec::with_capacity(layout.rows().len());
        let mut row_height = 0.0;
        let mut y = insets.top;

        for (index, row) in layout.rows().iter().enumerate() {
            if index == 0 {
                row_height = self.intrinsic_row_height(row);
            } else {
                y += self.design.row_spacing;
            }

            let mut keys = Vec::with_capacity(row.key_count());
            let frame = self.layout_row(
                row,
                Point::new(insets.left, y),
                container_width,
                row_height,
                letter_width,
                &mut next_id,
                &mut keys,
            );
            rows.push(RowFrame { frame, keys });
            y += row_height;
        }

        tracing::debug!(
            "Laid out {:?} keyboard: {} rows, letter width {}",
            layout.mode(),
            rows.len(),
            letter_width
        );

        KeyboardFrames {
            size: Size::new(screen_width, y + insets.bottom),
            letter_width,
            rows,
        }
    }
}
