//! The floating button that opens and closes the stack.

use crate::geometry::bottom_right;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Position, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Widget};
use unicode_width::UnicodeWidthStr;

const MARGIN: u16 = 1;
const HEIGHT: u16 = 3;

/// Bottom-right button showing 📜 when closed and ❌ when open.
///
/// The glyph is followed by a textual label so the button reads the same
/// without emoji support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleButton {
    open: bool,
    style: Style,
}

impl ToggleButton {
    /// Button for a stack that is currently `open` or closed.
    pub fn new(open: bool) -> Self {
        Self {
            open,
            style: Style::default(),
        }
    }

    /// Set the button style.
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Emoji shown on the button.
    pub fn glyph(&self) -> &'static str {
        if self.open {
            "❌"
        } else {
            "📜"
        }
    }

    /// What pressing the button does.
    pub fn aria_label(&self) -> &'static str {
        if self.open {
            "Close browser list"
        } else {
            "Open browser list"
        }
    }

    fn caption(&self) -> String {
        format!("{} {}", self.glyph(), self.aria_label())
    }

    /// The cells the button occupies inside `area`.
    pub fn rect(&self, area: Rect) -> Rect {
        let width = u16::try_from(self.caption().width())
            .unwrap_or(u16::MAX)
            .saturating_add(4);
        bottom_right(width, HEIGHT, MARGIN, area)
    }

    /// Whether the cell at (`column`, `row`) is on the button.
    pub fn hit(&self, area: Rect, column: u16, row: u16) -> bool {
        let rect = self.rect(area);
        !rect.is_empty() && rect.contains(Position::new(column, row))
    }
}

impl Widget for ToggleButton {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rect = self.rect(area);
        if rect.is_empty() {
            return;
        }
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .style(self.style);
        Paragraph::new(Line::from(self.caption()))
            .alignment(Alignment::Center)
            .style(self.style)
            .block(block)
            .render(rect, buf);
    }
}
