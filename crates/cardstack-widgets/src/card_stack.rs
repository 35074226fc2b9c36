//! The stacked browser-history widget.
//!
//! `CardStack` owns the visibility flag, the stack order, the z allocator
//! and one motion per position. Cards are keyed by position: promoting an
//! entry changes what a position shows and how high it stacks, never which
//! motion drives it.
//!
//! While mounted, the stack listens on a [`Hotkeys`] registry for Ctrl/Cmd+H
//! (open, default handling suppressed) and Escape (close). Clicks arrive as
//! [`Message::Click`] with terminal coordinates; the parent forwards them from
//! its mouse handling.
//!
//! ```rust,ignore
//! let mut stack = CardStack::new(history());
//! stack.mount(&hotkeys, Msg::Stack);
//!
//! // in update
//! Msg::Stack(m) => self.stack.update(m).map(Msg::Stack),
//!
//! // in view
//! let area = frame.area();
//! self.stack.view(frame, area);
//! ```

use crate::config::CardStackConfig;
use crate::geometry::centered_fixed;
use crate::motion::{CardMotion, Fade};
use crate::order::{Item, StackOrder};
use crate::projector::{CardPhase, CardPose};
use crate::style::CardStackStyle;
use crate::toggle_button::ToggleButton;
use crate::visibility::{KeyIntent, Visibility, VisibilityKeys};
use crate::z_index::ZIndexAllocator;
use cardstack_core::{
    subscribe, Command, Component, Every, HotkeyGuard, Hotkeys, Reaction, Subscription,
};
use ratatui::layout::{Alignment, Position, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};
use ratatui::Frame;
use std::cell::Cell;
use std::time::{Duration, Instant};

/// Cards fainter than this are neither drawn nor clickable.
const MIN_VISIBLE_OPACITY: f64 = 0.05;
/// Longest simulated step per frame; a stalled loop resumes instead of jumping.
const MAX_FRAME_STEP: Duration = Duration::from_millis(100);

/// Messages for the card stack.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Flip between open and closed.
    Toggle,
    /// Show the stack. Ignored if already open.
    Open,
    /// Hide the stack. Ignored if already closed.
    Close,
    /// Move the entry at this position to the front.
    Promote(usize),
    /// A left click at terminal coordinates.
    Click {
        /// Column of the clicked cell.
        column: u16,
        /// Row of the clicked cell.
        row: u16,
    },
    /// Animation frame.
    Frame(Instant),
}

/// Stacked, animated list of history entries.
pub struct CardStack {
    order: StackOrder<Item>,
    visibility: Visibility,
    z: ZIndexAllocator,
    config: CardStackConfig,
    style: CardStackStyle,
    keys: VisibilityKeys,
    phases: Vec<CardPhase>,
    motions: Vec<CardMotion>,
    fade: Fade,
    last_frame: Option<Instant>,
    listener: Option<HotkeyGuard>,
    last_area: Cell<Rect>,
}

impl CardStack {
    /// A closed, unmounted stack of `items`, first entry at position 0.
    pub fn new(items: Vec<Item>) -> Self {
        let config = CardStackConfig::default();
        let hidden = CardMotion::at_rest(config.projector.hidden());
        let len = items.len();
        Self {
            order: StackOrder::new(items),
            visibility: Visibility::new(),
            z: ZIndexAllocator::new(config.z_stride),
            fade: Fade::new(0.0, config.fade_duration),
            config,
            style: CardStackStyle::default(),
            keys: VisibilityKeys::default(),
            phases: vec![CardPhase::Hidden; len],
            motions: vec![hidden; len],
            last_frame: None,
            listener: None,
            last_area: Cell::new(Rect::default()),
        }
    }

    /// Replace the tuning. Call before the first open or promotion.
    pub fn with_config(mut self, config: CardStackConfig) -> Self {
        let hidden = CardMotion::at_rest(config.projector.hidden());
        self.motions = vec![hidden; self.order.len()];
        self.phases = vec![CardPhase::Hidden; self.order.len()];
        self.z = ZIndexAllocator::new(config.z_stride);
        self.fade = Fade::new(0.0, config.fade_duration);
        self.visibility = Visibility::new();
        self.config = config;
        self
    }

    /// Replace the colours.
    pub fn with_style(mut self, style: CardStackStyle) -> Self {
        self.style = style;
        self
    }

    /// Replace the open/close bindings. Takes effect on the next
    /// [`mount`](Self::mount).
    pub fn with_keys(mut self, keys: VisibilityKeys) -> Self {
        self.keys = keys;
        self
    }

    /// Register the stack's key listener on `hotkeys`.
    ///
    /// `lift` wraps stack messages in the registry's message type. Mounting
    /// an already mounted stack replaces its listener.
    pub fn mount<M: Send + 'static>(
        &mut self,
        hotkeys: &Hotkeys<M>,
        lift: impl Fn(Message) -> M + Send + 'static,
    ) {
        self.listener = None;
        let keys = self.keys.clone();
        let guard = hotkeys.listen(move |key| match keys.classify(key)? {
            KeyIntent::Open => Some(Reaction::new(lift(Message::Open)).prevent_default()),
            KeyIntent::Close => Some(Reaction::new(lift(Message::Close))),
        });
        tracing::debug!(listener = guard.id(), "card stack mounted");
        self.listener = Some(guard);
    }

    /// Release the key listener and snap the stack closed.
    pub fn unmount(&mut self) {
        if let Some(guard) = self.listener.take() {
            tracing::debug!(listener = guard.id(), "card stack unmounted");
        }
        self.visibility.close();
        let hidden = CardMotion::at_rest(self.config.projector.hidden());
        self.phases.fill(CardPhase::Hidden);
        self.motions.fill(hidden);
        self.fade = Fade::new(0.0, self.config.fade_duration);
        self.last_frame = None;
    }

    /// Whether a key listener is registered.
    pub fn is_mounted(&self) -> bool {
        self.listener.is_some()
    }

    /// Whether the list is open.
    pub fn is_open(&self) -> bool {
        self.visibility.is_open()
    }

    /// The current stack order.
    pub fn order(&self) -> &StackOrder<Item> {
        &self.order
    }

    /// Entries in stack order.
    pub fn items(&self) -> &[Item] {
        self.order.items()
    }

    /// Position of the most recently promoted entry.
    pub fn highlighted(&self) -> Option<usize> {
        self.order.highlighted()
    }

    /// Current epoch offset of the z allocator.
    pub fn z_offset(&self) -> u64 {
        self.z.offset()
    }

    /// Current pose of position `index`.
    pub fn pose(&self, index: usize) -> Option<CardPose> {
        self.motions.get(index).map(CardMotion::pose)
    }

    /// Animation phase of position `index`.
    pub fn phase(&self, index: usize) -> Option<CardPhase> {
        self.phases.get(index).copied()
    }

    /// Opacity of the whole stack layer.
    pub fn layer_opacity(&self) -> f64 {
        self.fade.value()
    }

    /// Whether any card or the layer fade is still moving.
    pub fn is_animating(&self) -> bool {
        self.fade.is_animating() || self.motions.iter().any(CardMotion::is_animating)
    }

    /// Accessible description of the card at `index`.
    pub fn card_label(&self, index: usize) -> Option<String> {
        self.order
            .get(index)
            .map(|item| format!("search {} (read-only)", item.name))
    }

    /// The toggle button in its current state.
    pub fn toggle_button(&self) -> ToggleButton {
        ToggleButton::new(self.is_open()).style(self.style.button())
    }

    /// Topmost interactive card under (`column`, `row`) in the area last
    /// passed to [`view`](Component::view).
    pub fn card_at(&self, column: u16, row: u16) -> Option<usize> {
        let area = self.last_area.get();
        let point = Position::new(column, row);
        (0..self.order.len())
            .filter(|&i| self.phases[i].is_interactive())
            .filter_map(|i| {
                let pose = self.motions[i].pose();
                if self.visible_opacity(&pose) < MIN_VISIBLE_OPACITY {
                    return None;
                }
                let rect = self.config.geometry.card_rect(area, &pose)?;
                rect.contains(point).then_some((pose.z_index, i))
            })
            .max()
            .map(|(_, i)| i)
    }

    fn visible_opacity(&self, pose: &CardPose) -> f64 {
        pose.opacity * self.fade.value()
    }

    fn target_pose(&self, index: usize) -> CardPose {
        let phase = self.phases[index];
        let mut pose = self
            .config
            .projector
            .pose(phase, index, self.order.len(), self.z.offset());
        if phase == CardPhase::Shown && self.order.highlighted() == Some(index) {
            if let Some(top) = self.z.top() {
                pose.z_index = top;
            }
        }
        pose
    }

    fn open(&mut self) {
        if !self.visibility.open() {
            return;
        }
        tracing::debug!(cards = self.order.len(), "card stack opened");
        self.last_frame = None;
        for i in 0..self.order.len() {
            self.phases[i] = self.phases[i].opened();
            let to = self.target_pose(i);
            if self.config.reduced_motion {
                self.motions[i] = CardMotion::at_rest(to);
            } else {
                let delay = self.config.projector.entry_delay(i);
                self.motions[i].spring_to(to, delay, self.config.spring);
            }
        }
        self.fade.set_target(1.0);
        if self.config.reduced_motion {
            self.fade = Fade::new(1.0, self.config.fade_duration);
        }
    }

    fn close(&mut self) {
        if !self.visibility.close() {
            return;
        }
        tracing::debug!(cards = self.order.len(), "card stack closed");
        self.last_frame = None;
        for i in 0..self.order.len() {
            self.phases[i] = self.phases[i].closed();
            let to = self.target_pose(i);
            if self.config.reduced_motion {
                self.phases[i] = self.phases[i].settled();
                self.motions[i] = CardMotion::at_rest(to);
            } else {
                self.motions[i].tween_to(to, self.config.exit_duration);
            }
        }
        self.fade.set_target(0.0);
        if self.config.reduced_motion {
            self.fade = Fade::new(0.0, self.config.fade_duration);
        }
    }

    fn promote(&mut self, index: usize) {
        let from = index;
        let Some(to) = self.order.promote(index) else {
            tracing::debug!(index, len = self.order.len(), "promote out of range ignored");
            return;
        };
        let top = self.z.bump(self.order.len());
        tracing::debug!(from, to, z = top, offset = self.z.offset(), "card promoted");
        for i in 0..self.order.len() {
            if self.phases[i] == CardPhase::Shown {
                let z = self.target_pose(i).z_index;
                self.motions[i].set_z_index(z);
            }
        }
    }

    fn click(&mut self, column: u16, row: u16) {
        let area = self.last_area.get();
        if self.toggle_button().hit(area, column, row) {
            self.toggle();
        } else if let Some(index) = self.card_at(column, row) {
            self.promote(index);
        }
    }

    fn toggle(&mut self) {
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
    }

    fn frame(&mut self, now: Instant) {
        let dt = self
            .last_frame
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or(self.config.frame_interval)
            .min(MAX_FRAME_STEP);
        tracing::trace!(dt_ms = dt.as_millis() as u64, "card stack frame");
        for (phase, motion) in self.phases.iter_mut().zip(self.motions.iter_mut()) {
            if motion.tick(dt) {
                *phase = phase.settled();
            }
        }
        self.fade.tick(dt);
        self.last_frame = if self.is_animating() { Some(now) } else { None };
    }

    fn render_splash(&self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(Span::styled("Stacked Browser History", self.style.splash_title())),
            Line::from(""),
            Line::from(vec![
                Span::styled("Get started ", Style::default().fg(self.style.text)),
                Span::styled(format!(" {} ", self.keys.open.legend), self.style.splash_kbd()),
            ]),
        ];
        let rect = centered_fixed(32, lines.len() as u16, area);
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), rect);
    }

    fn render_cards(&self, frame: &mut Frame, area: Rect) {
        let mut painted: Vec<(u64, usize, CardPose)> = (0..self.order.len())
            .filter(|&i| self.phases[i] != CardPhase::Hidden)
            .map(|i| {
                let pose = self.motions[i].pose();
                (pose.z_index, i, pose)
            })
            .collect();
        painted.sort_by_key(|&(z, i, _)| (z, i));

        for (_, i, pose) in painted {
            let opacity = self.visible_opacity(&pose);
            if opacity < MIN_VISIBLE_OPACITY {
                continue;
            }
            let rect = self.config.geometry.card_rect(area, &pose);
            let (Some(rect), Some(item)) = (rect, self.order.get(i)) else {
                continue;
            };
            let highlighted = self.order.highlighted() == Some(i);
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(self.style.card_border(opacity, highlighted))
                .style(self.style.card(opacity))
                .title(Span::styled(
                    format!(" 🔍 {} ", item.name),
                    self.style.card_label(opacity, highlighted),
                ));
            frame.render_widget(Clear, rect);
            frame.render_widget(block, rect);
        }
    }
}

impl Component for CardStack {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::Toggle => self.toggle(),
            Message::Open => self.open(),
            Message::Close => self.close(),
            Message::Promote(index) => self.promote(index),
            Message::Click { column, row } => self.click(column, row),
            Message::Frame(now) => self.frame(now),
        }
        Command::none()
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        self.last_area.set(area);
        frame.render_widget(Block::default().style(Style::default().bg(self.style.backdrop)), area);
        if !self.is_open() {
            self.render_splash(frame, area);
        }
        self.render_cards(frame, area);
        frame.render_widget(self.toggle_button(), area);
    }

    fn subscriptions(&self) -> Vec<Subscription<Message>> {
        if self.is_animating() {
            let frames = Every::new(self.config.frame_interval, "cardstack-frames");
            vec![subscribe(frames).map(Message::Frame)]
        } else {
            vec![]
        }
    }
}
