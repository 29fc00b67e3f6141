//! # Events Module
//!
//! Publish/subscribe primitives and the event types that travel through them.

pub mod event;
pub mod hot_event;
pub mod types;

pub use event::{Event, EventHandler, Owner, Subscription};
pub use hot_event::HotEvent;
pub use types::{
    KeyAction, KeyPressSound, KeyboardEvent, KeyboardMode, Language, ModeToggle, PunctuationSet,
    TextCommand,
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn keyboard_events_should_travel_through_event() {
        let event = Event::new();
        let owner = Owner::new();
        let received = Rc::new(RefCell::new(Vec::new()));
        let received_clone = received.clone();

        let _ = event.subscribe(&owner, move |event: &KeyboardEvent| {
            received_clone.borrow_mut().push(event.clone());
        });

        let mode_event = KeyboardEvent::ModeChanged {
            old_mode: KeyboardMode::Language(Language::Latin),
            new_mode: KeyboardMode::Punctuation(PunctuationSet::Default),
        };
        event.publish(mode_event.clone());

        assert_eq!(*received.borrow(), vec![mode_event]);
    }
}
