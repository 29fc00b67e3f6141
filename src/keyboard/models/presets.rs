//! # Layout Presets
//!
//! Stock layouts for every keyboard mode: Latin QWERTY, Cyrillic ЙЦУКЕН and
//! the two punctuation sets.

use std::collections::HashMap;

use super::key_spec::{KeySpec, WidthPolicy};
use super::layout::{Design, KeyboardLayout};
use super::row::{Row, RowItem};
use crate::keyboard::events::{KeyboardMode, Language, ModeToggle, PunctuationSet};

const LATIN_ROWS: [&str; 3] = ["qwertyuiop", "asdfghjkl", "zxcvbnm"];
const CYRILLIC_ROWS: [&str; 3] = ["йцукенгшщзх", "фывапролджэ", "ячсмитьбю"];
const DEFAULT_PUNCTUATION_ROWS: [&str; 2] = ["1234567890", "-/:;()$&@\""];
const ALTERNATIVE_PUNCTUATION_ROWS: [&str; 2] = ["[]{}#%^*+=", "_\\|~<>€£¥•"];
const SHARED_PUNCTUATION: &str = ".,?!'";

/// Build the layout shown in `mode`
pub fn build_layout(mode: KeyboardMode, design: &Design) -> KeyboardLayout {
    let rows = match mode {
        KeyboardMode::Language(Language::Latin) => letter_rows(&LATIN_ROWS, design, false),
        KeyboardMode::Language(Language::Cyrillic) => letter_rows(&CYRILLIC_ROWS, design, true),
        KeyboardMode::Punctuation(PunctuationSet::Default) => {
            punctuation_rows(&DEFAULT_PUNCTUATION_ROWS, design)
        }
        KeyboardMode::Punctuation(PunctuationSet::Alternative) => {
            punctuation_rows(&ALTERNATIVE_PUNCTUATION_ROWS, design)
        }
    };
    KeyboardLayout::new(mode, rows, design.clone())
}

/// Build one layout per mode
pub fn build_all(design: &Design) -> HashMap<KeyboardMode, KeyboardLayout> {
    KeyboardMode::ALL
        .iter()
        .map(|mode| (*mode, build_layout(*mode, design)))
        .collect()
}

fn letters(chars: &str) -> impl Iterator<Item = KeySpec> + '_ {
    chars.chars().map(KeySpec::letter)
}

fn symbols(chars: &str) -> impl Iterator<Item = KeySpec> + '_ {
    chars
        .chars()
        .map(|ch| KeySpec::symbol(ch.to_string(), WidthPolicy::Letter))
}

fn letter_rows(rows: &[&str; 3], design: &Design, tight_bottom_row: bool) -> Vec<Row> {
    let spacing = design.letter_spacing;
    let [top, middle, bottom] = *rows;

    let middle_row = if middle.chars().count() < top.chars().count() {
        // Shorter home row sits centered under the top row
        Row::fill_equal_spacing(vec![RowItem::Row(Row::of_keys(spacing, letters(middle)))])
    } else {
        Row::of_keys(spacing, letters(middle))
    };

    // Nine Cyrillic letters plus shift and backspace only fit with half spacing
    let bottom_spacing = if tight_bottom_row {
        spacing / 2.0
    } else {
        spacing
    };

    vec![
        Row::of_keys(spacing, letters(top)),
        middle_row,
        Row::fill_equal_spacing(vec![
            RowItem::Key(KeySpec::CaseToggle),
            RowItem::Row(Row::of_keys(bottom_spacing, letters(bottom))),
            RowItem::Key(KeySpec::Backspace),
        ]),
        Row::fill_equal_spacing(vec![
            RowItem::Key(KeySpec::ModeToggle(ModeToggle::LanguagePunctuation)),
            RowItem::Key(KeySpec::ModeToggle(ModeToggle::Language)),
            RowItem::Key(KeySpec::symbol(",", WidthPolicy::Intrinsic)),
            RowItem::Key(space_key(design)),
            RowItem::Key(KeySpec::symbol(".", WidthPolicy::Intrinsic)),
        ]),
    ]
}

fn punctuation_rows(rows: &[&str; 2], design: &Design) -> Vec<Row> {
    let spacing = design.letter_spacing;
    let [top, middle] = *rows;

    vec![
        Row::of_keys(spacing, symbols(top)),
        Row::of_keys(spacing, symbols(middle)),
        Row::fill_equal_spacing(vec![
            RowItem::Key(KeySpec::ModeToggle(ModeToggle::PunctuationSet)),
            RowItem::Row(Row::of_keys(spacing, symbols(SHARED_PUNCTUATION))),
            RowItem::Key(KeySpec::Backspace),
        ]),
        Row::fill_equal_spacing(vec![
            RowItem::Key(KeySpec::ModeToggle(ModeToggle::LanguagePunctuation)),
            RowItem::Key(space_key(design)),
        ]),
    ]
}

fn space_key(design: &Design) -> KeySpec {
    KeySpec::symbol(" ", WidthPolicy::Fixed(design.space_key_width))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::geometry::{EdgeInsets, LayoutCalculator, MonospaceMeasurer};

    fn qwerty_design() -> Design {
        Design {
            letter_spacing: 6.0,
            edge_insets: EdgeInsets::uniform(3.0),
            ..Design::default()
        }
    }

    #[test]
    fn latin_layout_should_have_ten_letter_top_row() {
        let layout = build_layout(KeyboardMode::Language(Language::Latin), &qwerty_design());
        assert_eq!(layout.rows().len(), 4);
        assert_eq!(layout.letter_count(), 10);
        assert_eq!(layout.rows()[0].keys()[0], &KeySpec::letter('q'));
    }

    #[test]
    fn qwerty_letter_width_should_be_31_on_375_point_screen() {
        let design = qwerty_design();
        let layout = build_layout(KeyboardMode::Language(Language::Latin), &design);
        let measurer = MonospaceMeasurer::for_font_size(design.button.font_size);
        let frames = LayoutCalculator::new(&design, &measurer).layout_keyboard(&layout, 375.0);

        assert_eq!(frames.letter_width, 31.0);
        let first_row = &frames.rows[0];
        assert!(first_row.keys.iter().all(|key| key.frame.width == 31.0));
        assert!(first_row.frame.max_x() <= 375.0 - 3.0);
    }

    #[test]
    fn cyrillic_layout_should_fit_without_overflow() {
        let design = qwerty_design();
        let layout = build_layout(KeyboardMode::Language(Language::Cyrillic), &design);
        let measurer = MonospaceMeasurer::for_font_size(design.button.font_size);
        let frames = LayoutCalculator::new(&design, &measurer).layout_keyboard(&layout, 375.0);

        assert_eq!(layout.letter_count(), 11);
        assert_eq!(frames.letter_width, 28.0);
        for row in &frames.rows {
            for key in &row.keys {
                assert!(key.frame.max_x() <= 372.0, "key overflows: {:?}", key);
            }
        }
    }

    #[test]
    fn punctuation_layouts_should_have_set_toggle_and_no_language_toggle() {
        for set in [PunctuationSet::Default, PunctuationSet::Alternative] {
            let layout = build_layout(KeyboardMode::Punctuation(set), &Design::default());
            let keys = layout.keys();
            assert!(keys
                .iter()
                .any(|(_, key)| **key == KeySpec::ModeToggle(ModeToggle::PunctuationSet)));
            assert!(!keys
                .iter()
                .any(|(_, key)| **key == KeySpec::ModeToggle(ModeToggle::Language)));
        }
    }

    #[test]
    fn build_all_should_cover_every_mode() {
        let layouts = build_all(&Design::default());
        assert_eq!(layouts.len(), 4);
        for mode in KeyboardMode::ALL {
            assert_eq!(layouts[&mode].mode(), mode);
        }
    }
}
