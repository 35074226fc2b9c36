//! The stacked browser-history widget for **cardstack**.
//!
//! [`CardStack`](card_stack::CardStack) implements
//! [`cardstack_core::Component`], so it embeds in any
//! [`cardstack_core::Model`]. The pieces it is built from are public and
//! usable on their own.
//!
//! # Widgets
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`card_stack`] | The animated, clickable card stack |
//! | [`toggle_button`] | Bottom-right open/close button |
//!
//! # Building blocks
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`visibility`] | Open/closed flag and its hotkeys |
//! | [`order`] | Entry sequence with promote-to-front |
//! | [`z_index`] | Monotonic stacking epochs |
//! | [`projector`] | Target poses per phase and position |
//! | [`motion`] | Springs, tweens and fades |
//! | [`geometry`] | Poses to terminal cells |
//! | [`config`] | Animation and layout tuning |
//! | [`style`] | Colours and opacity blending |
//! | [`key`] | Key-binding helpers |

pub mod card_stack;
pub mod config;
pub mod geometry;
pub mod key;
pub mod motion;
pub mod order;
pub mod projector;
pub mod style;
pub mod toggle_button;
pub mod visibility;
pub mod z_index;

pub use card_stack::{CardStack, Message};
pub use config::CardStackConfig;
pub use order::Item;
pub use style::CardStackStyle;
