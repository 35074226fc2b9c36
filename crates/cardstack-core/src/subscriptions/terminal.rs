use crate::event::TerminalEvent;
use crate::hotkeys::Hotkeys;
use crate::subscription::{forward, Subscription, SubscriptionId};
use crossterm::event::EventStream;
use futures::StreamExt;
use std::sync::Arc;

/// Marker type behind the terminal-events [`SubscriptionId`].
///
/// Every [`hotkey_events`] subscription carries this identity, so a model
/// never ends up with two concurrent readers of the terminal.
pub struct TerminalEvents;

/// Terminal events with process-wide hotkeys applied first.
///
/// Every key-down event is offered to `hotkeys`. Listener messages are
/// delivered in registration order; then, unless a listener prevented the
/// default, the event goes through `map`. `map` returns `None` to discard
/// an event.
///
/// ```rust,ignore
/// fn subscriptions(&self) -> Vec<Subscription<Msg>> {
///     vec![hotkey_events(self.hotkeys.clone(), |event| match event {
///         TerminalEvent::Mouse(m) => Some(Msg::Mouse(m)),
///         _ => None,
///     })]
/// }
/// ```
pub fn hotkey_events<Msg: Send + 'static>(
    hotkeys: Hotkeys<Msg>,
    map: impl Fn(TerminalEvent) -> Option<Msg> + Send + Sync + 'static,
) -> Subscription<Msg> {
    let map = Arc::new(map);
    terminal_subscription(move |event| route(&hotkeys, map.as_ref(), event))
}

/// Split one terminal event into the messages it produces.
pub(crate) fn route<Msg: Send + 'static>(
    hotkeys: &Hotkeys<Msg>,
    map: &(dyn Fn(TerminalEvent) -> Option<Msg> + Send + Sync),
    event: TerminalEvent,
) -> Vec<Msg> {
    let Some(key) = event.key_down() else {
        return map(event).into_iter().collect();
    };
    let dispatch = hotkeys.dispatch(key);
    let mut messages = dispatch.messages;
    if !dispatch.default_prevented {
        messages.extend(map(event));
    }
    messages
}

fn terminal_subscription<Msg: Send + 'static>(
    expand: impl Fn(TerminalEvent) -> Vec<Msg> + Send + Sync + 'static,
) -> Subscription<Msg> {
    let expand = Arc::new(expand);
    Subscription {
        id: SubscriptionId::of::<TerminalEvents>(),
        // The EventStream is created inside the spawned task. Building it on
        // every subscriptions() call would touch crossterm's global reader
        // while the live stream is polling it.
        spawn: Box::new(move |tx| {
            let stream = futures::stream::once(async { EventStream::new() })
                .flatten()
                .filter_map(|result| async move { result.ok() })
                .flat_map(move |event| {
                    futures::stream::iter(expand(TerminalEvent::from(event)))
                });
            forward(stream, tx)
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hotkeys::Reaction;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[derive(Debug, PartialEq)]
    enum Msg {
        Hotkey,
        Key(KeyCode),
        Resized,
    }

    fn app_map(event: TerminalEvent) -> Option<Msg> {
        match event {
            TerminalEvent::Key(k) => Some(Msg::Key(k.code)),
            TerminalEvent::Resize(..) => Some(Msg::Resized),
            _ => None,
        }
    }

    #[test]
    fn prevented_key_skips_default_mapping() {
        let hotkeys = Hotkeys::new();
        let _guard = hotkeys.listen(|k| {
            (k.code == KeyCode::Char('h')).then(|| Reaction::new(Msg::Hotkey).prevent_default())
        });

        let key = KeyEvent::new(KeyCode::Char('h'), KeyModifiers::CONTROL);
        let out = route(&hotkeys, &app_map, TerminalEvent::Key(key));
        assert_eq!(out, vec![Msg::Hotkey]);
    }

    #[test]
    fn continuing_key_reaches_both() {
        let hotkeys = Hotkeys::new();
        let _guard =
            hotkeys.listen(|k| (k.code == KeyCode::Esc).then(|| Reaction::new(Msg::Hotkey)));

        let key = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        let out = route(&hotkeys, &app_map, TerminalEvent::Key(key));
        assert_eq!(out, vec![Msg::Hotkey, Msg::Key(KeyCode::Esc)]);
    }

    #[test]
    fn non_key_events_bypass_hotkeys() {
        let hotkeys = Hotkeys::new();
        let _guard = hotkeys.listen(|_| Some(Reaction::new(Msg::Hotkey).prevent_default()));

        let out = route(&hotkeys, &app_map, TerminalEvent::Resize(10, 10));
        assert_eq!(out, vec![Msg::Resized]);
    }

    #[test]
    fn every_registry_shares_one_terminal_reader() {
        let first: Subscription<Msg> = hotkey_events(Hotkeys::new(), app_map);
        let second: Subscription<Msg> = hotkey_events(Hotkeys::new(), |_| None);
        assert_eq!(first.id(), second.id());
    }
}
