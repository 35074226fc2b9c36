//! **cardstack** -- stacked browser-history cards for the terminal.
//!
//! This is the umbrella crate that re-exports everything needed to embed the
//! card stack in a [`ratatui`] application from a single dependency:
//!
//! ```toml
//! [dependencies]
//! cardstack = "0.1"
//! ```
//!
//! # Re-exports
//!
//! * All public items from [`cardstack_core`] are available at the crate root
//!   ([`Model`], [`Component`], [`Command`], [`Subscription`], [`Hotkeys`],
//!   [`Program`], [`run`], [`run_with`], etc.).
//! * The [`widgets`] module re-exports everything from [`cardstack_widgets`].
//! * [`history`] is the ready-made application: five sites, Ctrl/Cmd+H to
//!   open, Escape to close, click a card to bring it forward.
//! * [`ratatui`], [`crossterm`], and [`tokio`] are re-exported so downstream
//!   crates do not need to depend on them directly.
//!
//! # Quick start
//!
//! ```ignore
//! use cardstack::history::{History, HistoryFlags};
//! use cardstack::ProgramOptions;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), cardstack::ProgramError> {
//!     let options = ProgramOptions {
//!         fps: 30,
//!         ..ProgramOptions::default()
//!     };
//!     cardstack::run_with::<History>(HistoryFlags::default(), options).await?;
//!     Ok(())
//! }
//! ```

pub use cardstack_core::*;
pub mod widgets {
    pub use cardstack_widgets::*;
}

pub mod history;

// Re-export dependencies for use in demos and downstream crates
pub use crossterm;
pub use ratatui;
pub use tokio;
