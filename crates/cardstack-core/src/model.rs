use crate::command::Command;
use crate::subscription::Subscription;
use ratatui::Frame;

/// The top-level application trait.
///
/// The runtime drives an **init -> update -> view** cycle:
///
/// 1. [`init`](Model::init) builds the initial state from `Flags` and may
///    return a startup [`Command`] (enabling mouse capture, for instance).
/// 2. [`view`](Model::view) draws the state into a [`ratatui::Frame`].
/// 3. Terminal input, hotkeys and animation frames arrive as messages
///    through [`Subscription`]s.
/// 4. [`update`](Model::update) applies a message and can return a follow-up
///    [`Command`].
///
/// # Example
///
/// ```rust,ignore
/// use cardstack_core::{Command, Model};
/// use ratatui::Frame;
/// use ratatui::widgets::Paragraph;
///
/// struct Shelf {
///     open: bool,
/// }
///
/// enum Msg {
///     Toggle,
/// }
///
/// impl Model for Shelf {
///     type Message = Msg;
///     type Flags = ();
///
///     fn init(_: ()) -> (Self, Command<Msg>) {
///         (Shelf { open: false }, Command::none())
///     }
///
///     fn update(&mut self, msg: Msg) -> Command<Msg> {
///         match msg {
///             Msg::Toggle => self.open = !self.open,
///         }
///         Command::none()
///     }
///
///     fn view(&self, frame: &mut Frame) {
///         let label = if self.open { "open" } else { "closed" };
///         frame.render_widget(Paragraph::new(label), frame.area());
///     }
/// }
/// ```
pub trait Model: Sized + Send + 'static {
    /// The application's message type.
    type Message: Send + 'static;

    /// Initialization data passed to [`Model::init`].
    ///
    /// Use `()` when no startup data is needed.
    type Flags: Send + 'static;

    /// Create the initial model state and an optional startup command.
    fn init(flags: Self::Flags) -> (Self, Command<Self::Message>);

    /// Process a message, mutate state, and return a command for side effects.
    ///
    /// After `update` returns, the runtime re-renders and reconciles
    /// [`subscriptions`](Model::subscriptions).
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Render the current state to a ratatui [`Frame`].
    fn view(&self, frame: &mut Frame);

    /// Declare active subscriptions.  Called after every update.
    ///
    /// The runtime diffs the returned list against the previously active
    /// set by [`SubscriptionId`](crate::SubscriptionId): new ones are
    /// started and missing ones are cancelled.
    fn subscriptions(&self) -> Vec<Subscription<Self::Message>> {
        vec![]
    }

    /// Called once after the event loop exits, before the terminal is
    /// restored. Release scoped resources (hotkey guards) here.
    fn shutdown(&mut self) {}
}
