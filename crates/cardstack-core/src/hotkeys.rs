//! Process-wide hotkey listeners with scoped registration.
//!
//! A [`Hotkeys`] registry sees every key-down event before the application's
//! own key mapping does. Widgets register a listener with
//! [`Hotkeys::listen`] and keep the returned [`HotkeyGuard`] for as long as
//! they are mounted; dropping the guard removes the listener.
//!
//! A listener answers with a [`Reaction`]: the message to deliver and whether
//! the event's default handling should be suppressed. The
//! [`hotkey_events`](crate::subscriptions::hotkey_events) subscription drops
//! suppressed events instead of forwarding them to the model's key map.
//!
//! ```rust,ignore
//! let hotkeys = Hotkeys::<Msg>::new();
//! let guard = hotkeys.listen(|key| match key.code {
//!     KeyCode::Esc => Some(Reaction::new(Msg::Close)),
//!     _ => None,
//! });
//! assert_eq!(hotkeys.listener_count(), 1);
//! drop(guard);
//! assert_eq!(hotkeys.listener_count(), 0);
//! ```

use crossterm::event::KeyEvent;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

/// Whether an event continues to the application's default key handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Propagation {
    /// Leave the event for the default handler.
    #[default]
    Continue,
    /// Swallow the event after delivering the listener's message.
    PreventDefault,
}

/// A listener's answer to a key event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction<Msg> {
    /// Message delivered to the model.
    pub message: Msg,
    /// Default-handling decision for the triggering event.
    pub propagation: Propagation,
}

impl<Msg> Reaction<Msg> {
    /// Deliver `message` and let the event continue.
    pub fn new(message: Msg) -> Self {
        Self {
            message,
            propagation: Propagation::Continue,
        }
    }

    /// Suppress default handling of the triggering event.
    pub fn prevent_default(mut self) -> Self {
        self.propagation = Propagation::PreventDefault;
        self
    }

    /// Transform the carried message.
    pub fn map<NewMsg>(self, f: impl FnOnce(Msg) -> NewMsg) -> Reaction<NewMsg> {
        Reaction {
            message: f(self.message),
            propagation: self.propagation,
        }
    }
}

/// Result of offering one key event to every registered listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch<Msg> {
    /// Messages produced by listeners, in registration order.
    pub messages: Vec<Msg>,
    /// `true` if any listener asked for [`Propagation::PreventDefault`].
    pub default_prevented: bool,
}

impl<Msg> Default for Dispatch<Msg> {
    fn default() -> Self {
        Self {
            messages: Vec::new(),
            default_prevented: false,
        }
    }
}

type Listener<Msg> = Box<dyn Fn(&KeyEvent) -> Option<Reaction<Msg>> + Send>;

struct Registry<Msg> {
    next_id: u64,
    listeners: Vec<(u64, Listener<Msg>)>,
}

/// A cloneable handle to a shared listener registry.
///
/// Clones share the same listener table.
pub struct Hotkeys<Msg: Send + 'static> {
    registry: Arc<Mutex<Registry<Msg>>>,
}

impl<Msg: Send + 'static> Clone for Hotkeys<Msg> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
        }
    }
}

impl<Msg: Send + 'static> Default for Hotkeys<Msg> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Msg: Send + 'static> fmt::Debug for Hotkeys<Msg> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hotkeys")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl<Msg: Send + 'static> Hotkeys<Msg> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry {
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    /// Register a listener. It stays active until the guard is dropped.
    ///
    /// Listeners run with the registry locked, so they must not register or
    /// release listeners themselves.
    pub fn listen(
        &self,
        listener: impl Fn(&KeyEvent) -> Option<Reaction<Msg>> + Send + 'static,
    ) -> HotkeyGuard {
        let mut registry = self.lock();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, Box::new(listener)));
        tracing::debug!(
            listener = id,
            active = registry.listeners.len(),
            "hotkey listener registered"
        );

        let weak: Weak<Mutex<Registry<Msg>>> = Arc::downgrade(&self.registry);
        HotkeyGuard {
            id,
            release: Some(Box::new(move || {
                if let Some(registry) = weak.upgrade() {
                    let mut registry = registry.lock().unwrap_or_else(PoisonError::into_inner);
                    registry.listeners.retain(|(lid, _)| *lid != id);
                    tracing::debug!(
                        listener = id,
                        active = registry.listeners.len(),
                        "hotkey listener released"
                    );
                }
            })),
        }
    }

    /// Offer a key event to every listener.
    pub fn dispatch(&self, key: &KeyEvent) -> Dispatch<Msg> {
        let registry = self.lock();
        let mut out = Dispatch::default();
        for (_, listener) in registry.listeners.iter() {
            if let Some(reaction) = listener(key) {
                out.default_prevented |= reaction.propagation == Propagation::PreventDefault;
                out.messages.push(reaction.message);
            }
        }
        if !out.messages.is_empty() {
            tracing::trace!(
                code = ?key.code,
                prevented = out.default_prevented,
                "hotkey dispatched"
            );
        }
        out
    }

    /// Number of currently registered listeners.
    pub fn listener_count(&self) -> usize {
        self.lock().listeners.len()
    }

    fn lock(&self) -> MutexGuard<'_, Registry<Msg>> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Keeps one listener registered. Dropping it deregisters the listener.
///
/// Releasing after the registry itself is gone is a no-op.
#[must_use = "dropping the guard immediately deregisters the listener"]
pub struct HotkeyGuard {
    id: u64,
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl HotkeyGuard {
    /// Registry-local identifier of the guarded listener.
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl fmt::Debug for HotkeyGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HotkeyGuard").field("id", &self.id).finish()
    }
}

impl Drop for HotkeyGuard {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}
