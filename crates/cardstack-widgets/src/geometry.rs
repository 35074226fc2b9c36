//! Placement of cards, overlays and buttons in terminal cells.

use crate::projector::CardPose;
use ratatui::layout::Rect;

/// Compute a centered sub-rect with fixed dimensions, clamped to `area`.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

/// A `width` x `height` rect in the bottom-right corner of `area`, inset by
/// `margin` cells, clamped to `area`.
pub fn bottom_right(width: u16, height: u16, margin: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.right().saturating_sub(w.saturating_add(margin)).max(area.x);
    let y = area.bottom().saturating_sub(h.saturating_add(margin)).max(area.y);
    Rect::new(x, y, w, h).intersection(area)
}

/// Maps card poses onto the terminal grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardGeometry {
    /// Resting card width as a percentage of the available width.
    pub width_percent: u16,
    /// Resting card height as a percentage of the available height.
    pub height_percent: u16,
    /// Smallest resting card height in rows (border plus one text row).
    pub min_height: u16,
    /// Layout units per terminal row for `offset_y`.
    pub units_per_row: f64,
}

impl Default for CardGeometry {
    fn default() -> Self {
        Self {
            width_percent: 60,
            height_percent: 50,
            min_height: 3,
            units_per_row: 20.0,
        }
    }
}

impl CardGeometry {
    /// Resting size of a card in `area`.
    pub fn base_size(&self, area: Rect) -> (u16, u16) {
        let scale =
            |len: u16, percent: u16| (u32::from(len) * u32::from(percent.min(100)) / 100) as u16;
        let width = scale(area.width, self.width_percent);
        let height = scale(area.height, self.height_percent);
        (width.max(1).min(area.width), height.max(self.min_height).min(area.height))
    }

    /// Cell rect of a card in `pose`, or `None` if it has no visible cells.
    ///
    /// The card is centred horizontally; its vertical centre sits on the
    /// area's centreline shifted down by `offset_y`. Scale shrinks both
    /// dimensions around the centre and tilt shrinks the height further.
    pub fn card_rect(&self, area: Rect, pose: &CardPose) -> Option<Rect> {
        if area.is_empty() {
            return None;
        }
        let (base_w, base_h) = self.base_size(area);
        let width = (f64::from(base_w) * pose.scale.max(0.0)).round();
        let height = (f64::from(base_h) * pose.height_factor()).round().max(1.0);
        if width < 1.0 {
            return None;
        }

        let rows = if self.units_per_row > 0.0 {
            pose.offset_y / self.units_per_row
        } else {
            0.0
        };
        let centre_x = f64::from(area.x) + f64::from(area.width) / 2.0;
        let centre_y = f64::from(area.y) + f64::from(area.height) / 2.0 + rows;
        let left = (centre_x - width / 2.0).round();
        let top = (centre_y - height / 2.0).round();

        let x0 = left.max(f64::from(area.left()));
        let y0 = top.max(f64::from(area.top()));
        let x1 = (left + width).min(f64::from(area.right()));
        let y1 = (top + height).min(f64::from(area.bottom()));
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Rect::new(x0 as u16, y0 as u16, (x1 - x0) as u16, (y1 - y0) as u16))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projector::Projector;

    #[test]
    fn centered_fixed_basic() {
        let area = Rect::new(10, 5, 80, 40);
        assert_eq!(centered_fixed(40, 20, area), Rect::new(30, 15, 40, 20));
    }

    #[test]
    fn centered_fixed_clamps_to_area() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered_fixed(100, 50, area), Rect::new(0, 0, 20, 10));
    }

    #[test]
    fn bottom_right_respects_margin() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(bottom_right(10, 3, 1, area), Rect::new(69, 20, 10, 3));
    }

    #[test]
    fn bottom_right_clamps_in_tiny_area() {
        let area = Rect::new(2, 2, 4, 2);
        let r = bottom_right(10, 3, 1, area);
        assert_eq!(r, Rect::new(2, 2, 4, 2));
    }

    #[test]
    fn last_position_rests_centred() {
        let geo = CardGeometry::default();
        let area = Rect::new(0, 0, 100, 40);
        let pose = Projector::default().shown(4, 5, 0);
        assert_eq!(geo.card_rect(area, &pose), Some(Rect::new(20, 10, 60, 20)));
    }

    #[test]
    fn fan_offset_moves_one_row_per_step() {
        let geo = CardGeometry::default();
        let area = Rect::new(0, 0, 100, 40);
        let p = Projector::default();
        let first = geo.card_rect(area, &p.shown(0, 5, 0)).unwrap();
        let last = geo.card_rect(area, &p.shown(4, 5, 0)).unwrap();
        assert_eq!(first.y, last.y + 4);
        assert_eq!(first.height, last.height);
    }

    #[test]
    fn hidden_pose_is_flattened() {
        let geo = CardGeometry::default();
        let area = Rect::new(0, 0, 100, 40);
        let r = geo.card_rect(area, &Projector::default().hidden()).unwrap();
        assert_eq!(r.width, 54);
        assert_eq!(r.height, 9);
    }

    #[test]
    fn empty_area_has_no_cards() {
        let geo = CardGeometry::default();
        let pose = Projector::default().shown(0, 1, 0);
        assert_eq!(geo.card_rect(Rect::new(0, 0, 0, 0), &pose), None);
    }
}
