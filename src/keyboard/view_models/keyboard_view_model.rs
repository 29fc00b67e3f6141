//! # Keyboard View Model
//!
//! Central coordinator of the keyboard. Holds the prebuilt layouts, the mode
//! state machine and the key view models of the active layout. Keys only
//! suggest actions; this type decides what they mean:
//!
//! - `Insert` goes to the text sink and releases a pending shift,
//! - `DeleteBackwards` goes to the text sink,
//! - `ToggleCase` and `ChangeMode` go to the state machine.
//!
//! Every applied action also requests a key press sound and emits a
//! [`KeyboardEvent`].

use std::collections::HashMap;
use std::rc::Rc;

use serde::Serialize;

use crate::keyboard::events::{
    Event, HotEvent, KeyAction, KeyPressSound, KeyboardEvent, KeyboardMode, Language, ModeToggle,
    TextCommand,
};
use crate::keyboard::geometry::{
    Frame, GlyphMeasurer, KeyboardFrames, LayoutCalculator, MonospaceMeasurer, Point, Size,
};
use crate::keyboard::models::{presets, Design, KeyId, KeySpec, KeyboardLayout};
use crate::keyboard::view_models::key_view_model::KeyViewModel;
use crate::keyboard::view_models::mode_state::{CapitalizationState, KeyboardModeStateMachine};

/// Serializable picture of the active keyboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyboardSnapshot {
    pub mode: KeyboardMode,
    pub capitalized: bool,
    pub size: Size,
    pub letter_width: f64,
    pub keys: Vec<KeySnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeySnapshot {
    pub id: KeyId,
    pub glyph: String,
    pub frame: Frame,
}

pub struct KeyboardViewModel {
    design: Design,
    layouts: HashMap<KeyboardMode, KeyboardLayout>,
    state: KeyboardModeStateMachine,
    keys: Vec<KeyViewModel>,
    measurer: Box<dyn GlyphMeasurer>,
    text_commands: Event<TextCommand>,
    feedback: Event<KeyPressSound>,
    events: Event<KeyboardEvent>,
}

impl KeyboardViewModel {
    pub fn new(design: Design, language: Language) -> Self {
        let measurer = MonospaceMeasurer::for_font_size(design.button.font_size);
        Self::with_measurer(design, language, Box::new(measurer))
    }

    pub fn with_measurer(
        design: Design,
        language: Language,
        measurer: Box<dyn GlyphMeasurer>,
    ) -> Self {
        let layouts = presets::build_all(&design);
        Self::with_layouts(design, layouts, language, measurer)
    }

    /// Use custom layouts. Modes without a layout show an empty keyboard.
    pub fn with_layouts(
        design: Design,
        layouts: HashMap<KeyboardMode, KeyboardLayout>,
        language: Language,
        measurer: Box<dyn GlyphMeasurer>,
    ) -> Self {
        let mut keyboard = Self {
            design,
            layouts,
            state: KeyboardModeStateMachine::new(language),
            keys: Vec::new(),
            measurer,
            text_commands: Event::new(),
            feedback: Event::new(),
            events: Event::new(),
        };
        keyboard.rebuild_keys();
        keyboard
    }

    pub fn design(&self) -> &Design {
        &self.design
    }

    pub fn mode(&self) -> KeyboardMode {
        self.state.mode()
    }

    pub fn is_capitalized(&self) -> bool {
        self.state.is_capitalized()
    }

    pub fn state(&self) -> &KeyboardModeStateMachine {
        &self.state
    }

    pub fn capitalization(&self) -> Rc<CapitalizationState> {
        self.state.capitalization()
    }

    pub fn mode_changes(&self) -> &HotEvent<KeyboardMode> {
        self.state.mode_changes()
    }

    /// Edit commands for the text composition sink
    pub fn text_commands(&self) -> &Event<TextCommand> {
        &self.text_commands
    }

    /// Key press sounds for the feedback player
    pub fn feedback(&self) -> &Event<KeyPressSound> {
        &self.feedback
    }

    pub fn events(&self) -> &Event<KeyboardEvent> {
        &self.events
    }

    /// Layout of the current mode
    pub fn layout(&self) -> Option<&KeyboardLayout> {
        self.layouts.get(&self.mode())
    }

    pub fn keys(&self) -> &[KeyViewModel] {
        &self.keys
    }

    pub fn key(&self, id: KeyId) -> Option<&KeyViewModel> {
        self.keys.get(id.0)
    }

    pub fn glyphs(&self) -> Vec<String> {
        self.keys.iter().map(KeyViewModel::glyph).collect()
    }

    /// Find a key by its current glyph, or by one of the names `shift`,
    /// `backspace`, `mode`, `lang`, `punct` and `space`
    pub fn find_key(&self, label: &str) -> Option<KeyId> {
        let named = match label {
            "shift" => Some(KeySpec::CaseToggle),
            "backspace" => Some(KeySpec::Backspace),
            "mode" => Some(KeySpec::ModeToggle(ModeToggle::LanguagePunctuation)),
            "lang" => Some(KeySpec::ModeToggle(ModeToggle::Language)),
            "punct" => Some(KeySpec::ModeToggle(ModeToggle::PunctuationSet)),
            _ => None,
        };

        self.keys
            .iter()
            .find(|key| match (&named, key.spec()) {
                (Some(spec), candidate) => spec == candidate,
                (None, KeySpec::Symbol { text, .. }) if label == "space" => text == " ",
                (None, _) => key.glyph() == label,
            })
            .map(KeyViewModel::id)
    }

    /// Frames of the current layout for a container `screen_width` wide
    pub fn frames(&self, screen_width: f64) -> KeyboardFrames {
        match self.layout() {
            Some(layout) => LayoutCalculator::new(&self.design, self.measurer.as_ref())
                .layout_keyboard(layout, screen_width),
            None => KeyboardFrames {
                size: Size::new(screen_width, self.design.edge_insets.vertical()),
                letter_width: 0.0,
                rows: Vec::new(),
            },
        }
    }

    pub fn snapshot(&self, screen_width: f64) -> KeyboardSnapshot {
        let frames = self.frames(screen_width);
        let keys = frames
            .keys()
            .filter_map(|key_frame| {
                self.key(key_frame.id).map(|key| KeySnapshot {
                    id: key_frame.id,
                    glyph: key.glyph(),
                    frame: key_frame.frame,
                })
            })
            .collect();

        KeyboardSnapshot {
            mode: self.mode(),
            capitalized: self.is_capitalized(),
            size: frames.size,
            letter_width: frames.letter_width,
            keys,
        }
    }

    /// Activate the key with `id` and apply its action.
    ///
    /// The action returned by [`KeyViewModel::activate`] is applied directly.
    /// The key's own tap event is published on the way and exists for
    /// external observers only; the coordinator never subscribes to it.
    pub fn tap(&mut self, id: KeyId) -> Option<KeyAction> {
        let action = match self.key(id) {
            Some(key) => key.activate(),
            None => {
                tracing::warn!("Tap on unknown key {:?} ignored", id);
                return None;
            }
        };
        self.apply(&action);
        Some(action)
    }

    /// Activate the key under `point`, if any
    pub fn tap_at(&mut self, point: Point, screen_width: f64) -> Option<KeyAction> {
        let id = self.frames(screen_width).key_at(point)?;
        self.tap(id)
    }

    fn apply(&mut self, action: &KeyAction) {
        self.feedback.publish(action.feedback_sound());

        match action {
            KeyAction::Insert(text) => {
                self.text_commands.publish(TextCommand::Insert(text.clone()));
                self.events.publish(KeyboardEvent::SymbolCommitted { text: text.clone() });
                if self.state.symbol_committed() {
                    self.events
                        .publish(KeyboardEvent::CapitalizationChanged { capitalized: false });
                }
            }
            KeyAction::DeleteBackwards => {
                self.text_commands.publish(TextCommand::DeleteBackwards);
                self.events.publish(KeyboardEvent::DeletedBackwards);
            }
            KeyAction::ToggleCase => {
                let capitalized = self.state.toggle_case();
                self.events
                    .publish(KeyboardEvent::CapitalizationChanged { capitalized });
            }
            KeyAction::ChangeMode(toggle) => {
                if let Some(transition) = self.state.apply(*toggle) {
                    self.rebuild_keys();
                    self.events.publish(KeyboardEvent::ModeChanged {
                        old_mode: transition.from,
                        new_mode: transition.to,
                    });
                }
            }
        }
    }

    /// Tear down the keys of the previous layout and build the current one
    fn rebuild_keys(&mut self) {
        self.keys.clear();
        let Some(layout) = self.layouts.get(&self.state.mode()) else {
            tracing::warn!("No layout for {:?}", self.state.mode());
            return;
        };
        self.keys = layout
            .keys()
            .into_iter()
            .map(|(id, spec)| KeyViewModel::new(id, spec.clone(), &self.state))
            .collect();
        tracing::debug!(
            "Built {} keys for {:?}",
            self.keys.len(),
            self.state.mode()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::events::{Owner, PunctuationSet};
    use crate::keyboard::models::{CommittedText, Row, TextSink};
    use std::cell::RefCell;

    fn keyboard() -> KeyboardViewModel {
        KeyboardViewModel::new(Design::default(), Language::Latin)
    }

    fn tap_label(keyboard: &mut KeyboardViewModel, label: &str) -> KeyAction {
        let id = keyboard
            .find_key(label)
            .unwrap_or_else(|| panic!("no key labelled {label}"));
        keyboard.tap(id).unwrap()
    }

    fn attach_text(keyboard: &KeyboardViewModel, owner: &Owner) -> Rc<RefCell<CommittedText>> {
        let text = Rc::new(RefCell::new(CommittedText::new()));
        let text_clone = text.clone();
        let _ = keyboard
            .text_commands()
            .subscribe(owner, move |command| text_clone.borrow_mut().apply(command));
        text
    }

    #[test]
    fn typing_should_reach_text_sink() {
        let mut keyboard = keyboard();
        let owner = Owner::new();
        let text = attach_text(&keyboard, &owner);

        for label in ["h", "i", "space"] {
            tap_label(&mut keyboard, label);
        }
        assert_eq!(text.borrow().text(), "hi ");

        tap_label(&mut keyboard, "backspace");
        assert_eq!(text.borrow().text(), "hi");
    }

    #[test]
    fn tap_should_notify_external_key_observers() {
        let mut keyboard = keyboard();
        let owner = Owner::new();
        let text = attach_text(&keyboard, &owner);
        let taps = Rc::new(RefCell::new(Vec::new()));

        let id = keyboard.find_key("w").unwrap();
        let taps_clone = taps.clone();
        let _ = keyboard
            .key(id)
            .unwrap()
            .on_tap(&owner, move |action: &KeyAction| {
                taps_clone.borrow_mut().push(action.clone())
            });

        assert_eq!(keyboard.tap(id), Some(KeyAction::Insert("w".into())));
        assert_eq!(*taps.borrow(), vec![KeyAction::Insert("w".into())]);
        // Applied once, by the coordinator
        assert_eq!(text.borrow().text(), "w");
    }

    #[test]
    fn shift_should_capitalize_next_symbol_only() {
        let mut keyboard = keyboard();
        let owner = Owner::new();
        let text = attach_text(&keyboard, &owner);

        tap_label(&mut keyboard, "shift");
        assert!(keyboard.glyphs().contains(&"Q".to_string()));
        tap_label(&mut keyboard, "Q");
        tap_label(&mut keyboard, "q");

        assert_eq!(text.borrow().text(), "Qq");
        assert!(!keyboard.is_capitalized());
    }

    #[test]
    fn backspace_should_not_release_shift() {
        let mut keyboard = keyboard();
        tap_label(&mut keyboard, "shift");
        tap_label(&mut keyboard, "backspace");
        assert!(keyboard.is_capitalized());
    }

    #[test]
    fn mode_toggle_should_swap_layout() {
        let mut keyboard = keyboard();
        let latin_glyphs = keyboard.glyphs();

        tap_label(&mut keyboard, "mode");
        assert_eq!(
            keyboard.mode(),
            KeyboardMode::Punctuation(PunctuationSet::Default)
        );
        assert!(keyboard.glyphs().contains(&"1".to_string()));
        assert!(keyboard.find_key("lang").is_none());

        tap_label(&mut keyboard, "mode");
        assert_eq!(keyboard.glyphs(), latin_glyphs);
    }

    #[test]
    fn swapped_out_keys_should_release_subscriptions() {
        let mut keyboard = keyboard();
        let letters_observers = keyboard.capitalization().observer_count();
        assert!(letters_observers > 26);

        tap_label(&mut keyboard, "mode");
        // Punctuation has no capitalizable keys and no case toggle
        assert_eq!(keyboard.capitalization().observer_count(), 0);
    }

    #[test]
    fn taps_should_request_feedback_sounds() {
        let mut keyboard = keyboard();
        let owner = Owner::new();
        let sounds = Rc::new(RefCell::new(Vec::new()));
        let sounds_clone = sounds.clone();
        let _ = keyboard.feedback().subscribe(&owner, move |sound: &KeyPressSound| {
            sounds_clone.borrow_mut().push(*sound)
        });

        tap_label(&mut keyboard, "a");
        tap_label(&mut keyboard, "backspace");
        tap_label(&mut keyboard, "shift");

        assert_eq!(
            *sounds.borrow(),
            vec![
                KeyPressSound::DefaultKeyPress,
                KeyPressSound::DeleteKeyPress,
                KeyPressSound::CaseChangeKeyPress,
            ]
        );
    }

    #[test]
    fn events_should_describe_applied_actions() {
        let mut keyboard = keyboard();
        let owner = Owner::new();
        let events = Rc::new(RefCell::new(Vec::new()));
        let events_clone = events.clone();
        let _ = keyboard.events().subscribe(&owner, move |event: &KeyboardEvent| {
            events_clone.borrow_mut().push(event.clone())
        });

        tap_label(&mut keyboard, "shift");
        tap_label(&mut keyboard, "A");
        tap_label(&mut keyboard, "lang");

        assert_eq!(
            *events.borrow(),
            vec![
                KeyboardEvent::CapitalizationChanged { capitalized: true },
                KeyboardEvent::SymbolCommitted { text: "A".into() },
                KeyboardEvent::CapitalizationChanged { capitalized: false },
                KeyboardEvent::ModeChanged {
                    old_mode: KeyboardMode::Language(Language::Latin),
                    new_mode: KeyboardMode::Language(Language::Cyrillic),
                },
            ]
        );
    }

    #[test]
    fn unknown_key_should_be_ignored() {
        let mut keyboard = keyboard();
        assert_eq!(keyboard.tap(KeyId(10_000)), None);
    }

    #[test]
    fn tap_at_should_hit_test_current_layout() {
        let mut keyboard = keyboard();
        let frames = keyboard.frames(375.0);
        let q = keyboard.find_key("q").unwrap();
        let frame = frames.key_frame(q).unwrap();
        let center = Point::new(frame.x + frame.width / 2.0, frame.y + frame.height / 2.0);

        assert_eq!(
            keyboard.tap_at(center, 375.0),
            Some(KeyAction::Insert("q".into()))
        );
        assert_eq!(keyboard.tap_at(Point::new(-5.0, -5.0), 375.0), None);
    }

    #[test]
    fn snapshot_should_pair_glyphs_with_frames() {
        let keyboard = keyboard();
        let snapshot = keyboard.snapshot(375.0);

        assert_eq!(snapshot.keys.len(), keyboard.keys().len());
        assert_eq!(snapshot.keys[0].glyph, "q");
        assert_eq!(snapshot.letter_width, 31.0);
        assert!(!snapshot.capitalized);
    }

    #[test]
    fn missing_layout_should_show_empty_keyboard() {
        let design = Design::default();
        let mut layouts = HashMap::new();
        layouts.insert(
            KeyboardMode::Language(Language::Latin),
            KeyboardLayout::new(
                KeyboardMode::Language(Language::Latin),
                vec![Row::fill_equal_spacing(vec![
                    crate::keyboard::models::RowItem::Key(KeySpec::ModeToggle(
                        ModeToggle::LanguagePunctuation,
                    )),
                ])],
                design.clone(),
            ),
        );
        let mut keyboard = KeyboardViewModel::with_layouts(
            design,
            layouts,
            Language::Latin,
            Box::new(MonospaceMeasurer::new(10.0)),
        );

        tap_label(&mut keyboard, "mode");
        assert!(keyboard.keys().is_empty());
        assert!(keyboard.frames(375.0).rows.is_empty());
    }

    #[test]
    fn text_sink_trait_should_accept_keyboard_commands() {
        let mut text = CommittedText::new();
        text.insert("a");
        text.apply(&TextCommand::DeleteBackwards);
        assert!(text.is_empty());
    }
}
