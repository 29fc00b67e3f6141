//! # Key Specifications
//!
//! Data description of a single virtual key, decoupled from rendering.
//! A key resolves to a glyph and an action from the current capitalization
//! flag and keyboard mode.

use serde::{Deserialize, Serialize};

use crate::keyboard::events::{KeyAction, KeyboardMode, Language, ModeToggle, PunctuationSet};

pub const SHIFT_GLYPH: &str = "⇧";
pub const SHIFT_ACTIVE_GLYPH: &str = "⬆";
pub const BACKSPACE_GLYPH: &str = "⌫";

/// How a key's width is determined at layout time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WidthPolicy {
    /// The keyboard's computed default letter width
    Letter,
    /// Explicit width in points
    Fixed(f64),
    /// Measured glyph width plus the design's key padding on both sides
    Intrinsic,
    /// The design's width for special keys (shift, backspace, mode toggles)
    Special,
}

#[derive(Debug, Clone, PartialEq)]
pub enum KeySpec {
    Symbol {
        text: String,
        width: WidthPolicy,
    },
    CapitalizableSymbol {
        lowercase: String,
        uppercase: String,
        width: WidthPolicy,
    },
    CaseToggle,
    Backspace,
    ModeToggle(ModeToggle),
}

/// State a key needs to resolve itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyContext {
    pub capitalized: bool,
    pub mode: KeyboardMode,
    /// Language the letters view returns to
    pub language: Language,
}

impl Default for KeyContext {
    fn default() -> Self {
        Self {
            capitalized: false,
            mode: KeyboardMode::default(),
            language: Language::Latin,
        }
    }
}

/// Glyph to display and value to emit on activation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedKey {
    pub glyph: String,
    pub action: KeyAction,
}

impl KeySpec {
    pub fn symbol(text: impl Into<String>, width: WidthPolicy) -> Self {
        KeySpec::Symbol {
            text: text.into(),
            width,
        }
    }

    pub fn capitalizable(
        lowercase: impl Into<String>,
        uppercase: impl Into<String>,
        width: WidthPolicy,
    ) -> Self {
        KeySpec::CapitalizableSymbol {
            lowercase: lowercase.into(),
            uppercase: uppercase.into(),
            width,
        }
    }

    /// Letter key whose uppercase form is derived from `lowercase`
    pub fn letter(lowercase: char) -> Self {
        Self::capitalizable(
            lowercase.to_string(),
            lowercase.to_uppercase().collect::<String>(),
            WidthPolicy::Letter,
        )
    }

    pub fn width_policy(&self) -> WidthPolicy {
        match self {
            KeySpec::Symbol { width, .. } | KeySpec::CapitalizableSymbol { width, .. } => *width,
            KeySpec::CaseToggle | KeySpec::Backspace | KeySpec::ModeToggle(_) => {
                WidthPolicy::Special
            }
        }
    }

    /// Whether the glyph changes with the capitalization flag
    pub fn depends_on_capitalization(&self) -> bool {
        matches!(
            self,
            KeySpec::CapitalizableSymbol { .. } | KeySpec::CaseToggle
        )
    }

    /// Whether the glyph changes with the keyboard mode or language
    pub fn depends_on_mode(&self) -> bool {
        matches!(self, KeySpec::ModeToggle(_))
    }

    /// Text used to measure intrinsic width. Capitalizable keys measure
    /// their uppercase form so the layout does not shift on case changes.
    pub fn measurement_text(&self) -> &str {
        match self {
            KeySpec::Symbol { text, .. } => text.as_str(),
            KeySpec::CapitalizableSymbol { uppercase, .. } => uppercase.as_str(),
            KeySpec::CaseToggle => SHIFT_GLYPH,
            KeySpec::Backspace => BACKSPACE_GLYPH,
            KeySpec::ModeToggle(_) => "123",
        }
    }

    pub fn resolve(&self, context: KeyContext) -> ResolvedKey {
        match self {
            KeySpec::Symbol { text, .. } => ResolvedKey {
                glyph: text.clone(),
                action: KeyAction::Insert(text.clone()),
            },
            KeySpec::CapitalizableSymbol {
                lowercase,
                uppercase,
                ..
            } => {
                let text = if context.capitalized {
                    uppercase
                } else {
                    lowercase
                };
                ResolvedKey {
                    glyph: text.clone(),
                    action: KeyAction::Insert(text.clone()),
                }
            }
            KeySpec::CaseToggle => ResolvedKey {
                glyph: (if context.capitalized {
                    SHIFT_ACTIVE_GLYPH
                } else {
                    SHIFT_GLYPH
                })
                .to_string(),
                action: KeyAction::ToggleCase,
            },
            KeySpec::Backspace => ResolvedKey {
                glyph: BACKSPACE_GLYPH.to_string(),
                action: KeyAction::DeleteBackwards,
            },
            KeySpec::ModeToggle(toggle) => ResolvedKey {
                glyph: mode_toggle_glyph(*toggle, context).to_string(),
                action: KeyAction::ChangeMode(*toggle),
            },
        }
    }
}

fn mode_toggle_glyph(toggle: ModeToggle, context: KeyContext) -> &'static str {
    match (toggle, context.mode) {
        (ModeToggle::LanguagePunctuation, KeyboardMode::Language(_)) => "123",
        (ModeToggle::LanguagePunctuation, KeyboardMode::Punctuation(_)) => {
            context.language.alphabet_label()
        }
        (ModeToggle::Language, KeyboardMode::Language(language)) => language.code(),
        (ModeToggle::Language, KeyboardMode::Punctuation(_)) => context.language.code(),
        (ModeToggle::PunctuationSet, KeyboardMode::Punctuation(PunctuationSet::Alternative)) => {
            "123"
        }
        (ModeToggle::PunctuationSet, _) => "#+=",
    }
}
