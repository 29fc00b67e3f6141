//! # Committed Text
//!
//! Text composition sink fed by the keyboard. Keeps the committed fragments
//! in order and supports only append and delete-last.

use crate::keyboard::events::{Event, TextCommand};

/// Receiver of keyboard edit commands
pub trait TextSink {
    fn insert(&mut self, text: &str);

    /// Remove the last appended unit; no-op when empty
    fn delete_backwards(&mut self);

    fn apply(&mut self, command: &TextCommand) {
        match command {
            TextCommand::Insert(text) => self.insert(text),
            TextCommand::DeleteBackwards => self.delete_backwards(),
        }
    }
}

/// Canvas text as a sequence of committed fragments
///
/// Every mutation publishes the full new text on [`CommittedText::changes`]
/// so the canvas can redraw.
#[derive(Debug, Default)]
pub struct CommittedText {
    fragments: Vec<String>,
    changes: Event<String>,
}

impl CommittedText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> String {
        self.fragments.concat()
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn changes(&self) -> &Event<String> {
        &self.changes
    }
}

impl TextSink for CommittedText {
    fn insert(&mut self, text: &str) {
        self.fragments.push(text.to_string());
        self.changes.publish(self.text());
    }

    fn delete_backwards(&mut self) {
        if self.fragments.pop().is_some() {
            self.changes.publish(self.text());
        } else {
            tracing::debug!("Delete on empty composition ignored");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::events::Owner;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn insert_and_delete_should_compose_text() {
        let mut text = CommittedText::new();
        text.insert("a");
        text.insert("b");
        text.delete_backwards();
        text.insert("c");

        assert_eq!(text.text(), "ac");
        assert_eq!(text.len(), 2);
    }

    #[test]
    fn delete_on_empty_should_be_noop() {
        let mut text = CommittedText::new();
        text.delete_backwards();
        assert!(text.is_empty());
        assert_eq!(text.text(), "");
    }

    #[test]
    fn delete_should_remove_whole_fragment() {
        let mut text = CommittedText::new();
        text.insert("Привет");
        text.insert("!");
        text.delete_backwards();
        assert_eq!(text.fragments(), &["Привет".to_string()]);
    }

    #[test]
    fn apply_should_dispatch_commands() {
        let mut text = CommittedText::new();
        text.apply(&TextCommand::Insert("x".into()));
        text.apply(&TextCommand::Insert("y".into()));
        text.apply(&TextCommand::DeleteBackwards);
        assert_eq!(text.text(), "x");
    }

    #[test]
    fn mutations_should_notify_redraw() {
        let mut text = CommittedText::new();
        let owner = Owner::new();
        let redraws = Rc::new(RefCell::new(Vec::new()));
        let redraws_clone = redraws.clone();
        let _ = text.changes().subscribe(&owner, move |value: &String| {
            redraws_clone.borrow_mut().push(value.clone())
        });

        text.insert("a");
        text.insert("b");
        text.delete_backwards();
        text.delete_backwards();
        text.delete_backwards();

        assert_eq!(*redraws.borrow(), vec!["a", "ab", "a", ""]);
    }
}
