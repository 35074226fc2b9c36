//! Open/closed state and the keys that drive it.

use crate::key::{Binding, KeyCombination};
use crossterm::event::{KeyCode, KeyEvent};

/// What a recognised key asks the stack to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyIntent {
    /// Show the stack. The key's default handling is suppressed.
    Open,
    /// Hide the stack, whatever its current state.
    Close,
}

/// The two bindings the stack listens for while mounted.
#[derive(Debug, Clone)]
pub struct VisibilityKeys {
    /// Ctrl/Cmd + H.
    pub open: Binding,
    /// Escape.
    pub close: Binding,
}

impl Default for VisibilityKeys {
    fn default() -> Self {
        Self {
            open: Binding::with_keys(
                vec![
                    KeyCombination::command(KeyCode::Char('h')),
                    KeyCombination::command(KeyCode::Char('H')),
                ],
                "⌘ H",
                "open browser list",
            ),
            close: Binding::new(KeyCombination::new(KeyCode::Esc), "Esc", "close browser list"),
        }
    }
}

impl VisibilityKeys {
    /// Classify a key-down event. Open wins if both bindings match.
    pub fn classify(&self, key: &KeyEvent) -> Option<KeyIntent> {
        if self.open.matches(key) {
            Some(KeyIntent::Open)
        } else if self.close.matches(key) {
            Some(KeyIntent::Close)
        } else {
            None
        }
    }
}

/// The "list is open" flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Visibility {
    open: bool,
}

impl Visibility {
    /// Start closed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the list is open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Flip the flag. Returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Open. Returns `true` if the state changed.
    pub fn open(&mut self) -> bool {
        self.set(true)
    }

    /// Close. Returns `true` if the state changed.
    pub fn close(&mut self) -> bool {
        self.set(false)
    }

    fn set(&mut self, open: bool) -> bool {
        let changed = self.open != open;
        self.open = open;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn toggle_twice_restores_state() {
        for start in [false, true] {
            let mut v = Visibility { open: start };
            v.toggle();
            assert_eq!(v.is_open(), !start);
            v.toggle();
            assert_eq!(v.is_open(), start);
        }
    }

    #[test]
    fn open_and_close_are_idempotent() {
        let mut v = Visibility::new();
        assert!(!v.close());
        assert!(!v.is_open());

        assert!(v.open());
        assert!(!v.open());
        assert!(v.is_open());

        assert!(v.close());
        assert!(!v.close());
        assert!(!v.is_open());
    }

    #[test]
    fn ctrl_or_cmd_h_opens() {
        let keys = VisibilityKeys::default();
        for mods in [KeyModifiers::CONTROL, KeyModifiers::SUPER, KeyModifiers::META] {
            let key = KeyEvent::new(KeyCode::Char('h'), mods);
            assert_eq!(keys.classify(&key), Some(KeyIntent::Open));
        }
        let shifted =
            KeyEvent::new(KeyCode::Char('H'), KeyModifiers::CONTROL | KeyModifiers::SHIFT);
        assert_eq!(keys.classify(&shifted), Some(KeyIntent::Open));
    }

    #[test]
    fn bare_h_is_ignored() {
        let keys = VisibilityKeys::default();
        let key = KeyEvent::new(KeyCode::Char('h'), KeyModifiers::NONE);
        assert_eq!(keys.classify(&key), None);
    }

    #[test]
    fn escape_closes() {
        let keys = VisibilityKeys::default();
        let key = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(keys.classify(&key), Some(KeyIntent::Close));
    }
}
