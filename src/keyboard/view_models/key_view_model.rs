//! # Key View Model
//!
//! Interactive counterpart of a [`KeySpec`]. Keeps the displayed glyph in
//! sync with the capitalization flag and keyboard mode, and publishes the
//! resolved action on its own tap event when activated.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::keyboard::events::{Event, KeyAction, Owner, Subscription};
use crate::keyboard::models::{KeyContext, KeyId, KeySpec, ResolvedKey};
use crate::keyboard::view_models::mode_state::KeyboardModeStateMachine;

pub struct KeyViewModel {
    id: KeyId,
    spec: Rc<KeySpec>,
    owner: Owner,
    context: Rc<Cell<KeyContext>>,
    glyph: Rc<RefCell<String>>,
    tap: Event<KeyAction>,
    subscriptions: Vec<Subscription>,
}

impl KeyViewModel {
    /// Create the key and subscribe it to the state it renders from. Hot
    /// events replay immediately, so the glyph is current on return.
    pub fn new(id: KeyId, spec: KeySpec, state: &KeyboardModeStateMachine) -> Self {
        let spec = Rc::new(spec);
        let context = Rc::new(Cell::new(KeyContext {
            capitalized: state.is_capitalized(),
            mode: state.mode(),
            language: state.last_used_language(),
        }));
        let glyph = Rc::new(RefCell::new(spec.resolve(context.get()).glyph));

        let mut key = Self {
            id,
            spec,
            owner: Owner::new(),
            context,
            glyph,
            tap: Event::new(),
            subscriptions: Vec::new(),
        };
        key.bind(state);
        key
    }

    fn bind(&mut self, state: &KeyboardModeStateMachine) {
        if self.spec.depends_on_capitalization() {
            let refresh = self.refresher();
            let context = Rc::clone(&self.context);
            let subscription = state.capitalization().observe(&self.owner, move |capitalized| {
                context.set(KeyContext {
                    capitalized: *capitalized,
                    ..context.get()
                });
                refresh();
            });
            self.subscriptions.push(subscription);
        }

        if self.spec.depends_on_mode() {
            let refresh = self.refresher();
            let context = Rc::clone(&self.context);
            let subscription = state.mode_changes().subscribe(&self.owner, move |mode| {
                context.set(KeyContext {
                    mode: *mode,
                    ..context.get()
                });
                refresh();
            });
            self.subscriptions.push(subscription);

            let refresh = self.refresher();
            let context = Rc::clone(&self.context);
            let subscription = state.language_changes().subscribe(&self.owner, move |language| {
                context.set(KeyContext {
                    language: *language,
                    ..context.get()
                });
                refresh();
            });
            self.subscriptions.push(subscription);
        }
    }

    /// Closure recomputing the glyph from the shared context
    fn refresher(&self) -> impl Fn() + 'static {
        let spec = Rc::clone(&self.spec);
        let context = Rc::clone(&self.context);
        let glyph = Rc::clone(&self.glyph);
        move || {
            *glyph.borrow_mut() = spec.resolve(context.get()).glyph;
        }
    }

    pub fn id(&self) -> KeyId {
        self.id
    }

    pub fn spec(&self) -> &KeySpec {
        &self.spec
    }

    /// Glyph currently displayed
    pub fn glyph(&self) -> String {
        self.glyph.borrow().clone()
    }

    pub fn resolved(&self) -> ResolvedKey {
        self.spec.resolve(self.context.get())
    }

    /// Resolve the key against the current state, publish the action on the
    /// tap event and return it
    pub fn activate(&self) -> KeyAction {
        let action = self.resolved().action;
        tracing::debug!("Key {:?} activated: {:?}", self.id, action);
        self.tap.publish(action.clone());
        action
    }

    /// Observe activations of this key
    pub fn on_tap<F>(&self, owner: &Owner, handler: F) -> Subscription
    where
        F: Fn(&KeyAction) + 'static,
    {
        self.tap.subscribe(owner, handler)
    }
}

impl Drop for KeyViewModel {
    fn drop(&mut self) {
        for subscription in self.subscriptions.drain(..) {
            subscription.dispose();
        }
    }
}

impl fmt::Debug for KeyViewModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyViewModel")
            .field("id", &self.id)
            .field("spec", &self.spec)
            .field("glyph", &*self.glyph.borrow())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::events::{KeyboardMode, ModeToggle, PunctuationSet};
    use crate::keyboard::models::WidthPolicy;

    #[test]
    fn glyph_should_follow_capitalization_without_tap() {
        let machine = KeyboardModeStateMachine::default();
        let key = KeyViewModel::new(KeyId(0), KeySpec::letter('a'), &machine);
        assert_eq!(key.glyph(), "a");

        machine.toggle_case();
        assert_eq!(key.glyph(), "A");

        machine.symbol_committed();
        assert_eq!(key.glyph(), "a");
    }

    #[test]
    fn row_of_keys_should_flip_together() {
        let machine = KeyboardModeStateMachine::default();
        let keys: Vec<KeyViewModel> = "qwertyuiop"
            .chars()
            .enumerate()
            .map(|(index, ch)| KeyViewModel::new(KeyId(index), KeySpec::letter(ch), &machine))
            .collect();

        machine.toggle_case();

        let glyphs: String = keys.iter().map(KeyViewModel::glyph).collect();
        assert_eq!(glyphs, "QWERTYUIOP");
    }

    #[test]
    fn activate_should_publish_resolved_action() {
        let machine = KeyboardModeStateMachine::default();
        let key = KeyViewModel::new(KeyId(3), KeySpec::letter('b'), &machine);
        let owner = Owner::new();
        let taps = Rc::new(RefCell::new(Vec::new()));
        let taps_clone = taps.clone();
        let _ = key.on_tap(&owner, move |action: &KeyAction| {
            taps_clone.borrow_mut().push(action.clone())
        });

        machine.toggle_case();
        assert_eq!(key.activate(), KeyAction::Insert("B".into()));
        assert_eq!(*taps.borrow(), vec![KeyAction::Insert("B".into())]);
    }

    #[test]
    fn mode_toggle_glyph_should_follow_mode() {
        let machine = KeyboardModeStateMachine::default();
        let key = KeyViewModel::new(
            KeyId(0),
            KeySpec::ModeToggle(ModeToggle::LanguagePunctuation),
            &machine,
        );
        assert_eq!(key.glyph(), "123");

        machine.toggle_language_punctuation();
        assert_eq!(machine.mode(), KeyboardMode::Punctuation(PunctuationSet::Default));
        assert_eq!(key.glyph(), "ABC");
    }

    #[test]
    fn key_created_in_punctuation_should_know_last_language() {
        let machine = KeyboardModeStateMachine::default();
        machine.toggle_language();
        machine.toggle_language_punctuation();

        let key = KeyViewModel::new(
            KeyId(0),
            KeySpec::ModeToggle(ModeToggle::LanguagePunctuation),
            &machine,
        );
        assert_eq!(key.glyph(), "АБВ");
    }

    #[test]
    fn static_symbols_should_not_subscribe() {
        let machine = KeyboardModeStateMachine::default();
        let _key = KeyViewModel::new(KeyId(0), KeySpec::symbol("1", WidthPolicy::Letter), &machine);
        assert_eq!(machine.capitalization().observer_count(), 0);
        assert_eq!(machine.mode_changes().subscriber_count(), 0);
    }

    #[test]
    fn dropping_key_should_release_subscriptions() {
        let machine = KeyboardModeStateMachine::default();
        let key = KeyViewModel::new(KeyId(0), KeySpec::letter('a'), &machine);
        assert_eq!(machine.capitalization().observer_count(), 1);

        drop(key);
        assert_eq!(machine.capitalization().observer_count(), 0);
    }
}
