use std::sync::Arc;

/// A side effect returned from [`Model::update`](crate::Model::update) or
/// [`Model::init`](crate::Model::init).
///
/// Commands carry immediate follow-up messages, terminal mode changes and
/// the quit request. Everything else stays inside `update`.
///
/// # Examples
///
/// ```rust,ignore
/// // Nothing to do:
/// let cmd = Command::none();
///
/// // Feed a message straight back into `update`:
/// let cmd = Command::message(Msg::Close);
///
/// // Stop the program:
/// let cmd = Command::quit();
/// ```
pub struct Command<Msg: Send + 'static> {
    pub(crate) inner: CommandInner<Msg>,
}

pub(crate) enum CommandInner<Msg: Send + 'static> {
    None,
    Message(Msg),
    Quit,
    Batch(Vec<Command<Msg>>),
    Terminal(TerminalCommand),
}

/// Terminal management commands executed by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalCommand {
    /// Enable mouse event capture (click, release, wheel, drag).
    EnableMouseCapture,
    /// Set the terminal window title.
    SetTitle(String),
    /// Suspend the process (send SIGTSTP on Unix).
    Suspend,
}

impl<Msg: Send + 'static> Command<Msg> {
    /// No-op command.
    pub fn none() -> Self {
        Command {
            inner: CommandInner::None,
        }
    }

    /// Send a message immediately.
    pub fn message(msg: Msg) -> Self {
        Command {
            inner: CommandInner::Message(msg),
        }
    }

    /// Quit the program.
    pub fn quit() -> Self {
        Command {
            inner: CommandInner::Quit,
        }
    }

    /// Run multiple commands concurrently. Empty batches collapse to
    /// [`Command::none`], single-element batches to their only command.
    pub fn batch(cmds: impl IntoIterator<Item = Command<Msg>>) -> Self {
        let mut cmds: Vec<_> = cmds.into_iter().filter(|c| !c.is_none()).collect();
        match cmds.len() {
            0 => Command::none(),
            1 => cmds.remove(0),
            _ => Command {
                inner: CommandInner::Batch(cmds),
            },
        }
    }

    /// Terminal management command.
    pub fn terminal(cmd: TerminalCommand) -> Self {
        Command {
            inner: CommandInner::Terminal(cmd),
        }
    }

    /// Enable mouse capture.
    pub fn enable_mouse_capture() -> Self {
        Command::terminal(TerminalCommand::EnableMouseCapture)
    }

    /// Suspend the process until the shell resumes it.
    pub fn suspend() -> Self {
        Command::terminal(TerminalCommand::Suspend)
    }

    /// Set the terminal window title.
    pub fn set_title(title: impl Into<String>) -> Self {
        Command::terminal(TerminalCommand::SetTitle(title.into()))
    }

    /// Transform the message type (for component composition).
    pub fn map<NewMsg: Send + 'static>(
        self,
        f: impl Fn(Msg) -> NewMsg + Send + Sync + 'static,
    ) -> Command<NewMsg> {
        self.map_with(Arc::new(f))
    }

    fn map_with<NewMsg: Send + 'static>(
        self,
        f: Arc<dyn Fn(Msg) -> NewMsg + Send + Sync>,
    ) -> Command<NewMsg> {
        let inner = match self.inner {
            CommandInner::None => CommandInner::None,
            CommandInner::Message(msg) => CommandInner::Message(f(msg)),
            CommandInner::Quit => CommandInner::Quit,
            CommandInner::Batch(cmds) => CommandInner::Batch(
                cmds.into_iter().map(|cmd| cmd.map_with(f.clone())).collect(),
            ),
            CommandInner::Terminal(tcmd) => CommandInner::Terminal(tcmd),
        };
        Command { inner }
    }

    // --- Inspection methods (useful for testing) ---

    /// Returns `true` if this is a no-op command.
    pub fn is_none(&self) -> bool {
        matches!(self.inner, CommandInner::None)
    }

    /// Returns `true` if this command asks the program to quit.
    pub fn is_quit(&self) -> bool {
        matches!(self.inner, CommandInner::Quit)
    }

    /// If this command is an immediate message, return it.
    pub fn into_message(self) -> Option<Msg> {
        match self.inner {
            CommandInner::Message(msg) => Some(msg),
            _ => None,
        }
    }

    /// If this command is a terminal command, return it.
    pub fn terminal_command(&self) -> Option<&TerminalCommand> {
        match &self.inner {
            CommandInner::Terminal(tcmd) => Some(tcmd),
            _ => None,
        }
    }

    /// If this command is a batch, return the inner commands.
    pub fn into_batch(self) -> Option<Vec<Command<Msg>>> {
        match self.inner {
            CommandInner::Batch(cmds) => Some(cmds),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_none_is_none() {
        let cmd: Command<()> = Command::none();
        assert!(cmd.is_none());
    }

    #[test]
    fn command_message_round_trips_payload() {
        let cmd: Command<i32> = Command::message(42);
        assert_eq!(cmd.into_message(), Some(42));
    }

    #[test]
    fn command_quit_is_quit() {
        let cmd: Command<()> = Command::quit();
        assert!(cmd.is_quit());
    }

    #[test]
    fn batch_collapses_empty_and_single() {
        let empty: Command<i32> = Command::batch(vec![]);
        assert!(empty.is_none());

        let single: Command<i32> = Command::batch(vec![Command::none(), Command::message(1)]);
        assert_eq!(single.into_message(), Some(1));
    }

    #[test]
    fn batch_keeps_multiple() {
        let cmd: Command<i32> = Command::batch(vec![Command::message(1), Command::message(2)]);
        assert_eq!(cmd.into_batch().map(|c| c.len()), Some(2));
    }

    #[test]
    fn map_transforms_message() {
        let cmd: Command<i32> = Command::message(7);
        let mapped: Command<String> = cmd.map(|n| format!("#{n}"));
        assert_eq!(mapped.into_message().as_deref(), Some("#7"));
    }

    #[test]
    fn map_preserves_quit_and_terminal() {
        let quit: Command<String> = Command::<i32>::quit().map(|n| n.to_string());
        assert!(quit.is_quit());

        let title: Command<String> = Command::<i32>::set_title("cards").map(|n| n.to_string());
        assert_eq!(
            title.terminal_command(),
            Some(&TerminalCommand::SetTitle("cards".into()))
        );
    }

    #[test]
    fn suspend_is_a_terminal_command() {
        let cmd: Command<i32> = Command::suspend();
        assert_eq!(cmd.terminal_command(), Some(&TerminalCommand::Suspend));
        assert!(!cmd.is_none());
        assert_eq!(Command::<i32>::quit().terminal_command(), None);
    }

    #[test]
    fn map_batch_maps_every_child() {
        let cmd: Command<i32> = Command::batch(vec![Command::message(1), Command::message(2)]);
        let mapped = cmd.map(|n| n * 10);
        let values: Vec<i32> = mapped
            .into_batch()
            .unwrap_or_default()
            .into_iter()
            .filter_map(Command::into_message)
            .collect();
        assert_eq!(values, vec![10, 20]);
    }
}
