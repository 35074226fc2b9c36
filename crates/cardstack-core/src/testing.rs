use crate::command::{Command, CommandInner};
use crate::model::Model;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::Terminal;

/// A headless test harness that drives a [`Model`] without a real terminal.
///
/// Messages are applied synchronously. Immediate follow-up messages
/// ([`Command::message`]) are queued and flushed with
/// [`drain_messages`](TestProgram::drain_messages); futures and terminal
/// commands are dropped.
///
/// ```rust,ignore
/// let mut prog = TestProgram::<History>::new(flags);
/// prog.send(Msg::Stack(card_stack::Message::Toggle));
/// assert!(prog.model().stack.is_open());
/// assert!(prog.render_string(60, 20).contains("Google"));
/// ```
pub struct TestProgram<M: Model> {
    model: M,
    pending_messages: Vec<M::Message>,
    quit_requested: bool,
}

impl<M: Model> TestProgram<M> {
    /// Create a test program by calling [`Model::init`] with the given flags.
    pub fn new(flags: M::Flags) -> Self {
        let (model, init_cmd) = M::init(flags);
        let mut program = Self {
            model,
            pending_messages: Vec::new(),
            quit_requested: false,
        };
        program.collect_sync_messages(init_cmd);
        program
    }

    /// Send a message, triggering a single update cycle.
    pub fn send(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.collect_sync_messages(cmd);
    }

    /// Process pending immediate messages until none are produced.
    pub fn drain_messages(&mut self) {
        while !self.pending_messages.is_empty() {
            let messages: Vec<_> = self.pending_messages.drain(..).collect();
            for msg in messages {
                self.send(msg);
            }
        }
    }

    /// Whether any update so far returned [`Command::quit`].
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Get a shared reference to the model for assertions.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Get a mutable reference to the model for direct test setup.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Run [`Model::shutdown`] as the runtime would on exit.
    pub fn shutdown(&mut self) {
        self.model.shutdown();
    }

    /// Render the model to a ratatui [`Buffer`] of the given dimensions.
    pub fn render(&self, width: u16, height: u16) -> Buffer {
        let backend = ratatui::backend::TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).expect("test backend never fails");
        terminal
            .draw(|frame| self.model.view(frame))
            .expect("test backend never fails");
        terminal.backend().buffer().clone()
    }

    /// Render the model and return the visible content as a plain string,
    /// one line per row.
    pub fn render_string(&self, width: u16, height: u16) -> String {
        buffer_to_string(&self.render(width, height))
    }

    fn collect_sync_messages(&mut self, cmd: Command<M::Message>) {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Message(msg) => self.pending_messages.push(msg),
            CommandInner::Quit => self.quit_requested = true,
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    self.collect_sync_messages(cmd);
                }
            }
            CommandInner::Terminal(_) => {}
        }
    }
}

/// Flatten a buffer into newline-separated rows of cell symbols.
pub fn buffer_to_string(buf: &Buffer) -> String {
    let area: Rect = buf.area;
    let mut output = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            output.push_str(buf[(x, y)].symbol());
        }
        if y + 1 < area.bottom() {
            output.push('\n');
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::Paragraph;

    struct Latch {
        open: bool,
        log: Vec<&'static str>,
    }

    #[derive(Debug)]
    enum LatchMsg {
        Open,
        Close,
        OpenThenClose,
        Quit,
    }

    impl Model for Latch {
        type Message = LatchMsg;
        type Flags = bool;

        fn init(open: bool) -> (Self, Command<LatchMsg>) {
            (Latch { open, log: vec![] }, Command::none())
        }

        fn update(&mut self, msg: LatchMsg) -> Command<LatchMsg> {
            match msg {
                LatchMsg::Open => {
                    self.open = true;
                    self.log.push("open");
                }
                LatchMsg::Close => {
                    self.open = false;
                    self.log.push("close");
                }
                LatchMsg::OpenThenClose => {
                    self.open = true;
                    self.log.push("open");
                    return Command::message(LatchMsg::Close);
                }
                LatchMsg::Quit => return Command::quit(),
            }
            Command::none()
        }

        fn view(&self, frame: &mut ratatui::Frame) {
            let text = if self.open { "open" } else { "closed" };
            frame.render_widget(Paragraph::new(text), frame.area());
        }
    }

    #[test]
    fn init_uses_flags() {
        assert!(TestProgram::<Latch>::new(true).model().open);
        assert!(!TestProgram::<Latch>::new(false).model().open);
    }

    #[test]
    fn send_applies_update() {
        let mut prog = TestProgram::<Latch>::new(false);
        prog.send(LatchMsg::Open);
        assert!(prog.model().open);
        prog.send(LatchMsg::Close);
        assert!(!prog.model().open);
    }

    #[test]
    fn follow_up_messages_wait_for_drain() {
        let mut prog = TestProgram::<Latch>::new(false);
        prog.send(LatchMsg::OpenThenClose);
        assert!(prog.model().open);

        prog.drain_messages();
        assert!(!prog.model().open);
        assert_eq!(prog.model().log, vec!["open", "close"]);
    }

    #[test]
    fn quit_is_recorded() {
        let mut prog = TestProgram::<Latch>::new(false);
        assert!(!prog.quit_requested());
        prog.send(LatchMsg::Quit);
        assert!(prog.quit_requested());
    }

    #[test]
    fn render_string_reflects_state() {
        let mut prog = TestProgram::<Latch>::new(false);
        assert!(prog.render_string(20, 1).starts_with("closed"));
        prog.send(LatchMsg::Open);
        assert!(prog.render_string(20, 1).starts_with("open"));
    }

    #[test]
    fn buffer_to_string_joins_rows() {
        let buf = Buffer::with_lines(["ab", "cd"]);
        assert_eq!(buffer_to_string(&buf), "ab\ncd");
    }
}
