//! # Mode State Machine
//!
//! Tracks which keyboard view is shown and the shared capitalization flag.
//!
//! ```text
//!   Language(Latin) ◄── toggle_language ──► Language(Cyrillic)
//!          │  ▲                                  │  ▲
//!          ▼  │ toggle_language_punctuation      ▼  │
//!   Punctuation(Default) ◄── toggle_punctuation_set ──► Punctuation(Alternative)
//! ```
//!
//! Leaving punctuation always returns to the last used language. The
//! capitalization flag behaves like a non-locking shift: the case toggle
//! flips it and the next committed symbol turns it off again.

use std::rc::Rc;

use crate::keyboard::events::{
    HotEvent, KeyboardMode, Language, ModeToggle, Owner, PunctuationSet, Subscription,
};

/// Mode change applied by the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeTransition {
    pub from: KeyboardMode,
    pub to: KeyboardMode,
}

/// Shared capitalization flag
///
/// Readers observe it through [`CapitalizationState::observe`]; only the
/// state machine in this module can change it.
#[derive(Debug)]
pub struct CapitalizationState {
    capitalized: HotEvent<bool>,
}

impl CapitalizationState {
    fn new() -> Self {
        Self {
            capitalized: HotEvent::new(false),
        }
    }

    pub fn is_capitalized(&self) -> bool {
        self.capitalized.value()
    }

    /// Subscribe to the flag; `handler` runs immediately with the current value
    pub fn observe<F>(&self, owner: &Owner, handler: F) -> Subscription
    where
        F: Fn(&bool) + 'static,
    {
        self.capitalized.subscribe(owner, handler)
    }

    pub fn observer_count(&self) -> usize {
        self.capitalized.subscriber_count()
    }

    /// Returns true if the value changed
    fn set(&self, capitalized: bool) -> bool {
        if self.capitalized.value() == capitalized {
            return false;
        }
        self.capitalized.publish(capitalized);
        true
    }
}

#[derive(Debug)]
pub struct KeyboardModeStateMachine {
    mode: HotEvent<KeyboardMode>,
    last_language: HotEvent<Language>,
    capitalization: Rc<CapitalizationState>,
}

impl KeyboardModeStateMachine {
    pub fn new(initial_language: Language) -> Self {
        Self {
            mode: HotEvent::new(KeyboardMode::Language(initial_language)),
            last_language: HotEvent::new(initial_language),
            capitalization: Rc::new(CapitalizationState::new()),
        }
    }

    pub fn mode(&self) -> KeyboardMode {
        self.mode.value()
    }

    pub fn last_used_language(&self) -> Language {
        self.last_language.value()
    }

    pub fn is_capitalized(&self) -> bool {
        self.capitalization.is_capitalized()
    }

    /// Read channel for the capitalization flag
    pub fn capitalization(&self) -> Rc<CapitalizationState> {
        Rc::clone(&self.capitalization)
    }

    /// Broadcasts every new mode; replays the current one on subscribe
    pub fn mode_changes(&self) -> &HotEvent<KeyboardMode> {
        &self.mode
    }

    /// Broadcasts the language the letters view returns to
    pub fn language_changes(&self) -> &HotEvent<Language> {
        &self.last_language
    }

    pub fn apply(&self, toggle: ModeToggle) -> Option<ModeTransition> {
        match toggle {
            ModeToggle::LanguagePunctuation => Some(self.toggle_language_punctuation()),
            ModeToggle::Language => self.toggle_language(),
            ModeToggle::PunctuationSet => self.toggle_punctuation_set(),
        }
    }

    /// Letters → default punctuation, punctuation → last used language
    pub fn toggle_language_punctuation(&self) -> ModeTransition {
        let target = match self.mode() {
            KeyboardMode::Language(_) => KeyboardMode::Punctuation(PunctuationSet::Default),
            KeyboardMode::Punctuation(_) => KeyboardMode::Language(self.last_used_language()),
        };
        self.transition_to(target)
    }

    /// Latin ↔ Cyrillic; ignored while punctuation is shown
    pub fn toggle_language(&self) -> Option<ModeTransition> {
        match self.mode() {
            KeyboardMode::Language(language) => {
                let next = language.toggled();
                self.last_language.publish(next);
                Some(self.transition_to(KeyboardMode::Language(next)))
            }
            KeyboardMode::Punctuation(_) => {
                tracing::debug!("Language toggle ignored while punctuation is shown");
                None
            }
        }
    }

    /// Default ↔ alternative punctuation; ignored while letters are shown
    pub fn toggle_punctuation_set(&self) -> Option<ModeTransition> {
        match self.mode() {
            KeyboardMode::Punctuation(set) => {
                Some(self.transition_to(KeyboardMode::Punctuation(set.toggled())))
            }
            KeyboardMode::Language(_) => {
                tracing::debug!("Punctuation set toggle ignored while letters are shown");
                None
            }
        }
    }

    /// Flip capitalization; returns the new value
    pub fn toggle_case(&self) -> bool {
        let capitalized = !self.is_capitalized();
        self.capitalization.set(capitalized);
        tracing::debug!("Capitalization toggled to {}", capitalized);
        capitalized
    }

    /// Release a pending shift after a symbol was committed. Returns true if
    /// capitalization was turned off.
    pub fn symbol_committed(&self) -> bool {
        let reverted = self.capitalization.set(false);
        if reverted {
            tracing::debug!("Shift released after committed symbol");
        }
        reverted
    }

    fn transition_to(&self, to: KeyboardMode) -> ModeTransition {
        let from = self.mode();
        self.mode.publish(to);
        tracing::info!("Keyboard mode changed from {:?} to {:?}", from, to);
        ModeTransition { from, to }
    }
}

impl Default for KeyboardModeStateMachine {
    fn default() -> Self {
        Self::new(Language::Latin)
    }
}
