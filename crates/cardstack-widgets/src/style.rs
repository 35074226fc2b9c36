//! Colours for the card stack.
//!
//! Cards are drawn with true-colour [`Color::Rgb`] values so that opacity can
//! be rendered by blending each colour toward the backdrop.

use ratatui::style::{Color, Modifier, Style};

/// Colour palette for [`CardStack`](crate::card_stack::CardStack).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardStackStyle {
    /// Page background behind the stack.
    pub backdrop: Color,
    /// Card fill.
    pub surface: Color,
    /// Card outline.
    pub border: Color,
    /// Card label.
    pub text: Color,
    /// Outline of the highlighted card.
    pub highlight: Color,
    /// Keyboard hint on the splash.
    pub kbd: Color,
    /// Toggle button face.
    pub button: Color,
    /// Toggle button glyph and label.
    pub button_text: Color,
}

impl Default for CardStackStyle {
    fn default() -> Self {
        Self {
            backdrop: Color::Rgb(0x1a, 0x1a, 0x1a),
            surface: Color::Rgb(0x2b, 0x2b, 0x2e),
            border: Color::Rgb(0x55, 0x55, 0x5c),
            text: Color::Rgb(0xe8, 0xe8, 0xea),
            highlight: Color::Rgb(0x5e, 0x9e, 0xff),
            kbd: Color::Rgb(0xa0, 0xa0, 0xa8),
            button: Color::Rgb(0x3a, 0x3a, 0x40),
            button_text: Color::Rgb(0xf5, 0xf5, 0xf5),
        }
    }
}

impl CardStackStyle {
    /// Fill style of a card drawn at `opacity`.
    pub fn card(&self, opacity: f64) -> Style {
        Style::default()
            .bg(blend(self.backdrop, self.surface, opacity))
            .fg(blend(self.backdrop, self.text, opacity))
    }

    /// Outline style of a card drawn at `opacity`.
    pub fn card_border(&self, opacity: f64, highlighted: bool) -> Style {
        let border = if highlighted { self.highlight } else { self.border };
        Style::default()
            .bg(blend(self.backdrop, self.surface, opacity))
            .fg(blend(self.backdrop, border, opacity))
    }

    /// Label style of a card; the highlighted card is bold.
    pub fn card_label(&self, opacity: f64, highlighted: bool) -> Style {
        let style = self.card(opacity);
        if highlighted {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }

    /// Style of the toggle button.
    pub fn button(&self) -> Style {
        Style::default().bg(self.button).fg(self.button_text)
    }

    /// Style of the splash headline.
    pub fn splash_title(&self) -> Style {
        Style::default().fg(self.text).add_modifier(Modifier::BOLD)
    }

    /// Style of the key hint on the splash.
    pub fn splash_kbd(&self) -> Style {
        Style::default().fg(self.kbd).add_modifier(Modifier::REVERSED)
    }
}

/// Mix `from` toward `to` by `t` in `[0, 1]`.
///
/// Only RGB pairs are mixed; any other colour switches from `from` to `to` at
/// the halfway point.
pub fn blend(from: Color, to: Color, t: f64) -> Color {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    match (from, to) {
        (Color::Rgb(r0, g0, b0), Color::Rgb(r1, g1, b1)) => {
            let mix =
                |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
            Color::Rgb(mix(r0, r1), mix(g0, g1), mix(b0, b1))
        }
        _ if t < 0.5 => from,
        _ => to,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_endpoints() {
        let a = Color::Rgb(0, 0, 0);
        let b = Color::Rgb(200, 100, 50);
        assert_eq!(blend(a, b, 0.0), a);
        assert_eq!(blend(a, b, 1.0), b);
        assert_eq!(blend(a, b, 0.5), Color::Rgb(100, 50, 25));
    }

    #[test]
    fn blend_clamps_out_of_range() {
        let a = Color::Rgb(10, 10, 10);
        let b = Color::Rgb(20, 20, 20);
        assert_eq!(blend(a, b, 3.0), b);
        assert_eq!(blend(a, b, -1.0), a);
        assert_eq!(blend(a, b, f64::NAN), a);
    }

    #[test]
    fn named_colours_switch_at_half() {
        assert_eq!(blend(Color::Black, Color::White, 0.4), Color::Black);
        assert_eq!(blend(Color::Black, Color::White, 0.6), Color::White);
    }

    #[test]
    fn highlighted_label_is_bold() {
        let style = CardStackStyle::default();
        assert!(style.card_label(1.0, true).add_modifier.contains(Modifier::BOLD));
        assert!(!style.card_label(1.0, false).add_modifier.contains(Modifier::BOLD));
    }
}
