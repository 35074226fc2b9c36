//! Built-in subscription sources.
//!
//! - **Terminal events** ([`hotkey_events`]) -- keyboard,
//!   mouse, resize, focus, and paste events from the terminal, routed
//!   through a [`Hotkeys`](crate::Hotkeys) registry first.
//! - **Timers** ([`Every`]) -- repeating timer, used for animation frames.

mod terminal;
mod timer;

pub use terminal::*;
pub use timer::*;
