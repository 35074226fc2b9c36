//! Key binding definitions used by the stack's hotkeys.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// How a [`KeyCombination`]'s modifiers are compared with an event's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModifierMatch {
    /// Every listed modifier must be held.
    #[default]
    All,
    /// At least one listed modifier must be held (Ctrl *or* Cmd).
    Any,
}

/// A single key press with modifier keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombination {
    /// The base key code.
    pub code: KeyCode,
    /// Modifier keys compared according to `rule`.
    pub modifiers: KeyModifiers,
    /// Comparison rule for `modifiers`.
    pub rule: ModifierMatch,
}

impl KeyCombination {
    /// Create a key combination with no modifier keys.
    pub fn new(code: KeyCode) -> Self {
        Self::with_modifiers(code, KeyModifiers::NONE)
    }

    /// Create a key combination requiring an explicit set of modifiers.
    pub fn with_modifiers(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self {
            code,
            modifiers,
            rule: ModifierMatch::All,
        }
    }

    /// Create a key combination satisfied by any one of `modifiers`.
    pub fn any_of(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self {
            code,
            modifiers,
            rule: ModifierMatch::Any,
        }
    }

    /// Ctrl, Cmd (`SUPER`) or Meta together with `code`.
    pub fn command(code: KeyCode) -> Self {
        Self::any_of(
            code,
            KeyModifiers::CONTROL | KeyModifiers::SUPER | KeyModifiers::META,
        )
    }

    /// Return whether `event` is this combination.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        if self.code != event.code {
            return false;
        }
        match self.rule {
            ModifierMatch::All => event.modifiers.contains(self.modifiers),
            ModifierMatch::Any => event.modifiers.intersects(self.modifiers),
        }
    }
}

/// A key binding that maps one or more key combinations to a described action.
#[derive(Debug, Clone)]
pub struct Binding {
    /// The set of key combinations that trigger this binding.
    pub keys: Vec<KeyCombination>,
    /// Key legend shown to the user, e.g. `"⌘ H"`.
    pub legend: String,
    /// A human-readable description of the action this binding performs.
    pub description: String,
}

impl Binding {
    /// Create a binding for several key combinations.
    pub fn with_keys(
        keys: Vec<KeyCombination>,
        legend: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            keys,
            legend: legend.into(),
            description: description.into(),
        }
    }

    /// Create a binding for a single key combination.
    pub fn new(
        key: KeyCombination,
        legend: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self::with_keys(vec![key], legend, description)
    }

    /// Return whether the given key event matches any of this binding's key
    /// combinations.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.keys.iter().any(|k| k.matches(event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn all_rule_requires_every_modifier() {
        let combo = KeyCombination::with_modifiers(
            KeyCode::Char('h'),
            KeyModifiers::CONTROL | KeyModifiers::SHIFT,
        );
        assert!(!combo.matches(&ev(KeyCode::Char('h'), KeyModifiers::CONTROL)));
        assert!(combo.matches(&ev(
            KeyCode::Char('h'),
            KeyModifiers::CONTROL | KeyModifiers::SHIFT
        )));
    }

    #[test]
    fn command_accepts_ctrl_super_or_meta() {
        let combo = KeyCombination::command(KeyCode::Char('h'));
        assert!(combo.matches(&ev(KeyCode::Char('h'), KeyModifiers::CONTROL)));
        assert!(combo.matches(&ev(KeyCode::Char('h'), KeyModifiers::SUPER)));
        assert!(combo.matches(&ev(KeyCode::Char('h'), KeyModifiers::META)));
        assert!(!combo.matches(&ev(KeyCode::Char('h'), KeyModifiers::NONE)));
        assert!(!combo.matches(&ev(KeyCode::Char('h'), KeyModifiers::ALT)));
        assert!(!combo.matches(&ev(KeyCode::Char('j'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn plain_key_ignores_extra_modifiers() {
        let combo = KeyCombination::new(KeyCode::Esc);
        assert!(combo.matches(&ev(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(combo.matches(&ev(KeyCode::Esc, KeyModifiers::SHIFT)));
    }

    #[test]
    fn binding_matches_any_of_its_keys() {
        let binding = Binding::with_keys(
            vec![
                KeyCombination::new(KeyCode::Esc),
                KeyCombination::new(KeyCode::Char('x')),
            ],
            "esc",
            "close",
        );
        assert!(binding.matches(&ev(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(binding.matches(&ev(KeyCode::Char('x'), KeyModifiers::NONE)));
        assert!(!binding.matches(&ev(KeyCode::Enter, KeyModifiers::NONE)));
    }
}
