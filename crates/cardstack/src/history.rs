//! The stacked browser-history application.
//!
//! [`History`] wires a [`CardStack`] of five well-known sites to the
//! terminal: Ctrl/Cmd+H and Escape through the shared [`Hotkeys`] registry,
//! left clicks through mouse capture, `q` / Ctrl+C to quit and Ctrl+Z to
//! suspend.

use cardstack_core::{
    hotkey_events, Command, Component, Hotkeys, Model, Subscription, TerminalEvent,
};
use cardstack_widgets::card_stack::{self, CardStack};
use cardstack_widgets::{CardStackConfig, Item};
use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEventKind};
use ratatui::Frame;

/// Window title set on start.
pub const TITLE: &str = "Stacked Browser History";

/// The entries shown on the cards, first entry at position 0.
pub fn sites() -> Vec<Item> {
    vec![
        Item::new("Google", "https://www.google.com"),
        Item::new("Facebook", "https://www.facebook.com"),
        Item::new("Twitter", "https://www.twitter.com"),
        Item::new("GitHub", "https://www.github.com"),
        Item::new("LinkedIn", "https://www.linkedin.com"),
    ]
}

/// Application messages.
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Forwarded to the card stack.
    Stack(card_stack::Message),
    /// Leave the program.
    Quit,
    /// Hand the terminal back to the shell until resumed.
    Suspend,
}

/// Start-up parameters.
#[derive(Debug, Clone, Default)]
pub struct HistoryFlags {
    /// Registry the stack listens on. The same handle feeds the terminal
    /// subscription.
    pub hotkeys: Hotkeys<Msg>,
    /// Card stack tuning.
    pub config: CardStackConfig,
}

/// The application model.
pub struct History {
    stack: CardStack,
    hotkeys: Hotkeys<Msg>,
}

impl History {
    /// The card stack.
    pub fn stack(&self) -> &CardStack {
        &self.stack
    }
}

/// Map terminal events not claimed by a hotkey listener.
pub fn map_event(event: TerminalEvent) -> Option<Msg> {
    match event {
        TerminalEvent::Key(key) => match key.code {
            KeyCode::Char('q') if key.modifiers.is_empty() => Some(Msg::Quit),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Msg::Quit)
            }
            KeyCode::Char('z') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Msg::Suspend)
            }
            _ => None,
        },
        TerminalEvent::Mouse(mouse) => match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                Some(Msg::Stack(card_stack::Message::Click {
                    column: mouse.column,
                    row: mouse.row,
                }))
            }
            _ => None,
        },
        _ => None,
    }
}

impl Model for History {
    type Message = Msg;
    type Flags = HistoryFlags;

    fn init(flags: HistoryFlags) -> (Self, Command<Msg>) {
        let mut stack = CardStack::new(sites()).with_config(flags.config);
        stack.mount(&flags.hotkeys, Msg::Stack);
        tracing::info!(cards = stack.items().len(), "history started");
        let model = History {
            stack,
            hotkeys: flags.hotkeys,
        };
        let cmd = Command::batch([Command::enable_mouse_capture(), Command::set_title(TITLE)]);
        (model, cmd)
    }

    fn update(&mut self, msg: Msg) -> Command<Msg> {
        match msg {
            Msg::Stack(m) => self.stack.update(m).map(Msg::Stack),
            Msg::Quit => Command::quit(),
            Msg::Suspend => Command::suspend(),
        }
    }

    fn view(&self, frame: &mut Frame) {
        let area = frame.area();
        self.stack.view(frame, area);
    }

    fn subscriptions(&self) -> Vec<Subscription<Msg>> {
        let mut subs = vec![hotkey_events(self.hotkeys.clone(), map_event)];
        subs.extend(self.stack.subscriptions().into_iter().map(|s| s.map(Msg::Stack)));
        subs
    }

    fn shutdown(&mut self) {
        self.stack.unmount();
        tracing::info!("history stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardstack_core::testing::TestProgram;
    use cardstack_core::TerminalCommand;
    use crossterm::event::{KeyEvent, MouseEvent};

    fn flags() -> (Hotkeys<Msg>, HistoryFlags) {
        let hotkeys = Hotkeys::new();
        let flags = HistoryFlags {
            hotkeys: hotkeys.clone(),
            config: CardStackConfig::default().with_reduced_motion(true),
        };
        (hotkeys, flags)
    }

    fn press(hotkeys: &Hotkeys<Msg>, prog: &mut TestProgram<History>, key: KeyEvent) -> bool {
        let dispatch = hotkeys.dispatch(&key);
        for msg in dispatch.messages {
            prog.send(msg);
        }
        dispatch.default_prevented
    }

    fn click(column: u16, row: u16) -> TerminalEvent {
        TerminalEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn init_mounts_the_stack() {
        let (hotkeys, flags) = flags();
        let prog = TestProgram::<History>::new(flags);
        assert_eq!(hotkeys.listener_count(), 1);
        assert!(prog.model().stack().is_mounted());
        assert!(!prog.model().stack().is_open());
    }

    #[test]
    fn shutdown_releases_the_listener() {
        let (hotkeys, flags) = flags();
        let mut prog = TestProgram::<History>::new(flags);
        prog.shutdown();
        assert_eq!(hotkeys.listener_count(), 0);
        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert!(hotkeys.dispatch(&esc).messages.is_empty());
    }

    #[test]
    fn ctrl_h_then_escape() {
        let (hotkeys, flags) = flags();
        let mut prog = TestProgram::<History>::new(flags);

        let ctrl_h = KeyEvent::new(KeyCode::Char('h'), KeyModifiers::CONTROL);
        assert!(press(&hotkeys, &mut prog, ctrl_h));
        assert!(prog.model().stack().is_open());

        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert!(!press(&hotkeys, &mut prog, esc));
        assert!(!prog.model().stack().is_open());
    }

    #[test]
    fn q_and_ctrl_c_quit() {
        let q = TerminalEvent::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE));
        let ctrl_c = TerminalEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(map_event(q), Some(Msg::Quit));
        assert_eq!(map_event(ctrl_c.clone()), Some(Msg::Quit));

        let (_, flags) = flags();
        let mut prog = TestProgram::<History>::new(flags);
        if let Some(msg) = map_event(ctrl_c) {
            prog.send(msg);
        }
        assert!(prog.quit_requested());
    }

    #[test]
    fn ctrl_z_suspends() {
        let ctrl_z = TerminalEvent::Key(KeyEvent::new(KeyCode::Char('z'), KeyModifiers::CONTROL));
        let z = TerminalEvent::Key(KeyEvent::new(KeyCode::Char('z'), KeyModifiers::NONE));
        assert_eq!(map_event(ctrl_z), Some(Msg::Suspend));
        assert_eq!(map_event(z), None);

        let (_, flags) = flags();
        let (mut model, _) = History::init(flags);
        let cmd = model.update(Msg::Suspend);
        assert_eq!(cmd.terminal_command(), Some(&TerminalCommand::Suspend));
        assert!(!cmd.is_quit());
    }

    #[test]
    fn init_enables_mouse_capture_once() {
        let (_, flags) = flags();
        let (_model, cmd) = History::init(flags);
        let terminal: Vec<TerminalCommand> = cmd
            .into_batch()
            .unwrap_or_default()
            .iter()
            .filter_map(|c| c.terminal_command().cloned())
            .collect();
        assert_eq!(
            terminal,
            vec![
                TerminalCommand::EnableMouseCapture,
                TerminalCommand::SetTitle(TITLE.to_string()),
            ]
        );
    }

    #[test]
    fn left_clicks_reach_the_stack() {
        assert_eq!(
            map_event(click(3, 4)),
            Some(Msg::Stack(card_stack::Message::Click { column: 3, row: 4 }))
        );
        let release = TerminalEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Up(MouseButton::Left),
            column: 3,
            row: 4,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(map_event(release), None);
    }

    #[test]
    fn clicking_a_card_brings_it_forward() {
        let (hotkeys, flags) = flags();
        let mut prog = TestProgram::<History>::new(flags);
        press(&hotkeys, &mut prog, KeyEvent::new(KeyCode::Char('h'), KeyModifiers::SUPER));
        prog.render(100, 40);

        if let Some(msg) = map_event(click(50, 20)) {
            prog.send(msg);
        }
        let stack = prog.model().stack();
        assert_eq!(stack.items()[4].name, "Google");
        assert_eq!(stack.highlighted(), Some(4));
        assert!(prog.render_string(100, 40).contains("Google"));
    }

    #[test]
    fn splash_until_opened() {
        let (hotkeys, flags) = flags();
        let mut prog = TestProgram::<History>::new(flags);
        let screen = prog.render_string(80, 24);
        assert!(screen.contains(TITLE));
        assert!(screen.contains("⌘ H"));

        press(&hotkeys, &mut prog, KeyEvent::new(KeyCode::Char('h'), KeyModifiers::CONTROL));
        let screen = prog.render_string(80, 24);
        assert!(!screen.contains(TITLE));
        assert!(screen.contains("LinkedIn"));
    }

    #[test]
    fn urls_are_untouched() {
        let (_, flags) = flags();
        let mut prog = TestProgram::<History>::new(flags);
        prog.send(Msg::Stack(card_stack::Message::Open));
        prog.send(Msg::Stack(card_stack::Message::Promote(2)));
        let promoted = &prog.model().stack().items()[4];
        assert_eq!(promoted.name, "Twitter");
        assert_eq!(promoted.url, "https://www.twitter.com");
    }
}
