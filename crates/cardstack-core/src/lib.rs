//! Runtime for **cardstack** terminal widgets.
//!
//! `cardstack-core` runs an application as an **init -> update -> view**
//! cycle on top of [`ratatui`] and [`crossterm`]. State changes happen only
//! in [`Model::update`]; everything that reaches outside (timers, terminal
//! modes, quitting) is described by a [`Command`] or a [`Subscription`].
//!
//! # Key types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Model`] | Top-level application trait (init / update / view) |
//! | [`Component`] | Reusable sub-model that renders into a [`ratatui::layout::Rect`] |
//! | [`Command`] | Side effect executed by the runtime |
//! | [`Subscription`] | Long-lived event source (terminal events, frame timers) |
//! | [`Hotkeys`] | Process-wide key listeners held through RAII [`HotkeyGuard`]s |
//! | [`Program`] | Wires a [`Model`] to a real terminal and drives the event loop |
//! | [`TestProgram`](testing::TestProgram) | Headless harness for unit-testing a [`Model`] |
//!
//! # Hotkeys
//!
//! A [`Hotkeys`] registry is created by the application and handed to its
//! widgets through `Flags`. Each mounted widget holds one [`HotkeyGuard`];
//! the [`hotkey_events`] subscription offers every key-down event to the
//! registry before the application's own key map sees it.

pub mod command;
pub mod component;
pub mod event;
pub mod hotkeys;
pub mod model;
pub mod runtime;
pub mod subscription;
pub mod subscriptions;
pub mod testing;

pub use command::{Command, TerminalCommand};
pub use component::Component;
pub use event::TerminalEvent;
pub use hotkeys::{Dispatch, HotkeyGuard, Hotkeys, Propagation, Reaction};
pub use model::Model;
pub use runtime::{
    init_file_logging, log_to_file, OutputTarget, Program, ProgramError, ProgramOptions,
};
pub use subscription::{subscribe, Subscription, SubscriptionId, SubscriptionSource};
pub use subscriptions::{hotkey_events, Every};

/// Run an application with default options.
pub async fn run<M: Model>(flags: M::Flags) -> Result<M, ProgramError> {
    Program::<M>::new(flags)?.run().await
}

/// Run with custom options.
pub async fn run_with<M: Model>(
    flags: M::Flags,
    options: ProgramOptions,
) -> Result<M, ProgramError> {
    Program::<M>::with_options(flags, options)?.run().await
}
