//! # Core Event Types
//!
//! Keyboard modes, key actions and the commands and notifications that flow
//! out of the keyboard.

use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use serde::{Deserialize, Serialize};

/// Alphabet shown by the letter views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Latin,
    Cyrillic,
}

impl Language {
    pub fn toggled(self) -> Self {
        match self {
            Language::Latin => Language::Cyrillic,
            Language::Cyrillic => Language::Latin,
        }
    }

    /// Label of the key that returns to this language from punctuation
    pub fn alphabet_label(self) -> &'static str {
        match self {
            Language::Latin => "ABC",
            Language::Cyrillic => "АБВ",
        }
    }

    /// Short code shown on the language switch key
    pub fn code(self) -> &'static str {
        match self {
            Language::Latin => "EN",
            Language::Cyrillic => "RU",
        }
    }
}

impl FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "latin" | "en" => Ok(Language::Latin),
            "cyrillic" | "ru" => Ok(Language::Cyrillic),
            other => bail!("Unknown keyboard language '{other}'"),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Latin => write!(f, "latin"),
            Language::Cyrillic => write!(f, "cyrillic"),
        }
    }
}

/// Which of the two punctuation views is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PunctuationSet {
    Default,
    Alternative,
}

impl PunctuationSet {
    pub fn toggled(self) -> Self {
        match self {
            PunctuationSet::Default => PunctuationSet::Alternative,
            PunctuationSet::Alternative => PunctuationSet::Default,
        }
    }
}

/// The view currently displayed by the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyboardMode {
    Language(Language),
    Punctuation(PunctuationSet),
}

impl KeyboardMode {
    /// Every mode, in the order layouts are built
    pub const ALL: [KeyboardMode; 4] = [
        KeyboardMode::Language(Language::Latin),
        KeyboardMode::Language(Language::Cyrillic),
        KeyboardMode::Punctuation(PunctuationSet::Default),
        KeyboardMode::Punctuation(PunctuationSet::Alternative),
    ];

    pub fn is_language(self) -> bool {
        matches!(self, KeyboardMode::Language(_))
    }

    pub fn is_punctuation(self) -> bool {
        matches!(self, KeyboardMode::Punctuation(_))
    }
}

impl Default for KeyboardMode {
    fn default() -> Self {
        KeyboardMode::Language(Language::Latin)
    }
}

/// Target of a mode toggle key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeToggle {
    /// Letters ↔ punctuation
    LanguagePunctuation,
    /// Latin ↔ Cyrillic, only while letters are shown
    Language,
    /// Default ↔ alternative punctuation, only while punctuation is shown
    PunctuationSet,
}

/// Key press sound requested from the feedback collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyPressSound {
    DefaultKeyPress,
    DeleteKeyPress,
    CaseChangeKeyPress,
}

/// Value a key emits when activated
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyAction {
    Insert(String),
    DeleteBackwards,
    ToggleCase,
    ChangeMode(ModeToggle),
}

impl KeyAction {
    /// Mode toggles share the modifier click with the case toggle
    pub fn feedback_sound(&self) -> KeyPressSound {
        match self {
            KeyAction::Insert(_) => KeyPressSound::DefaultKeyPress,
            KeyAction::DeleteBackwards => KeyPressSound::DeleteKeyPress,
            KeyAction::ToggleCase | KeyAction::ChangeMode(_) => KeyPressSound::CaseChangeKeyPress,
        }
    }
}

/// Edit commands consumed by a text composition sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextCommand {
    Insert(String),
    DeleteBackwards,
}

/// Notifications emitted by the keyboard after it applied an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyboardEvent {
    /// A symbol was sent to the text sink
    SymbolCommitted { text: String },

    /// A delete-last command was sent to the text sink
    DeletedBackwards,

    /// Capitalization flag changed
    CapitalizationChanged { capitalized: bool },

    /// Active layout was swapped
    ModeChanged {
        old_mode: KeyboardMode,
        new_mode: KeyboardMode,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_should_toggle_between_alphabets() {
        assert_eq!(Language::Latin.toggled(), Language::Cyrillic);
        assert_eq!(Language::Cyrillic.toggled(), Language::Latin);
    }

    #[test]
    fn language_should_parse_names_and_codes() {
        assert_eq!("latin".parse::<Language>().unwrap(), Language::Latin);
        assert_eq!(" Cyrillic ".parse::<Language>().unwrap(), Language::Cyrillic);
        assert_eq!("ru".parse::<Language>().unwrap(), Language::Cyrillic);
        assert!("greek".parse::<Language>().is_err());
    }

    #[test]
    fn punctuation_set_should_toggle() {
        assert_eq!(PunctuationSet::Default.toggled(), PunctuationSet::Alternative);
        assert_eq!(PunctuationSet::Alternative.toggled(), PunctuationSet::Default);
    }

    #[test]
    fn default_mode_should_be_latin_letters() {
        assert_eq!(KeyboardMode::default(), KeyboardMode::Language(Language::Latin));
        assert!(KeyboardMode::default().is_language());
        assert!(KeyboardMode::Punctuation(PunctuationSet::Default).is_punctuation());
    }

    #[test]
    fn actions_should_map_to_feedback_sounds() {
        assert_eq!(
            KeyAction::Insert("a".into()).feedback_sound(),
            KeyPressSound::DefaultKeyPress
        );
        assert_eq!(
            KeyAction::DeleteBackwards.feedback_sound(),
            KeyPressSound::DeleteKeyPress
        );
        assert_eq!(
            KeyAction::ToggleCase.feedback_sound(),
            KeyPressSound::CaseChangeKeyPress
        );
        assert_eq!(
            KeyAction::ChangeMode(ModeToggle::Language).feedback_sound(),
            KeyPressSound::CaseChangeKeyPress
        );
    }
}
