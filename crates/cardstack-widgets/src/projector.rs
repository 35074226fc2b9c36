//! Card poses for each animation phase.
//!
//! Position `i` of a stack of `n` cards with z-offset
//! `z` rests at:
//!
//! | field | shown | hidden / exiting |
//! |-------|-------|------------------|
//! | `offset_y` | `(n - 1 - i) * fan_spacing` | `0` |
//! | `z_index` | `(n - i) + z` | `0` |
//! | `opacity` | `1` | `0` |
//! | `scale` | `1` | `hidden_scale` |
//! | `tilt_deg` | `0` | `hidden_tilt_deg` |
//!
//! Entering cards start at the hidden pose and are staggered by
//! `index * stagger`; exiting cards all head back to it at once.

use std::time::Duration;

/// Per-card animation phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardPhase {
    /// Not shown. Also the pre-entry pose.
    #[default]
    Hidden,
    /// Resting in (or animating into) the fanned stack.
    Shown,
    /// Animating back to the hidden pose.
    Exiting,
}

impl CardPhase {
    /// Phase after the stack opens.
    pub fn opened(self) -> Self {
        CardPhase::Shown
    }

    /// Phase after the stack closes or unmounts.
    pub fn closed(self) -> Self {
        match self {
            CardPhase::Shown => CardPhase::Exiting,
            other => other,
        }
    }

    /// Phase once the card's motion has settled.
    pub fn settled(self) -> Self {
        match self {
            CardPhase::Exiting => CardPhase::Hidden,
            other => other,
        }
    }

    /// Whether the card may receive clicks.
    pub fn is_interactive(self) -> bool {
        self == CardPhase::Shown
    }
}

/// A card's visual transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardPose {
    /// Distance below the shared centreline, in layout units.
    pub offset_y: f64,
    /// Stacking order; higher paints on top.
    pub z_index: u64,
    /// 0.0 (invisible) to 1.0 (opaque).
    pub opacity: f64,
    /// Uniform scale around the card centre.
    pub scale: f64,
    /// Rotation about the horizontal axis, in degrees.
    pub tilt_deg: f64,
}

impl CardPose {
    /// Interpolate the continuous fields by `t`; `t` may overshoot `[0, 1]`
    /// for spring motion. `z_index` is not interpolated.
    pub fn lerp(from: &CardPose, to: &CardPose, t: f64, z_index: u64) -> CardPose {
        let mix = |a: f64, b: f64| a + (b - a) * t;
        CardPose {
            offset_y: mix(from.offset_y, to.offset_y),
            z_index,
            opacity: mix(from.opacity, to.opacity).clamp(0.0, 1.0),
            scale: mix(from.scale, to.scale).max(0.0),
            tilt_deg: mix(from.tilt_deg, to.tilt_deg),
        }
    }

    /// Vertical extent factor once the tilt is projected onto the screen.
    pub fn height_factor(&self) -> f64 {
        (self.scale * self.tilt_deg.to_radians().cos()).max(0.0)
    }
}

/// Pose targets. Pure: the pose depends only on the arguments of
/// [`pose`](Projector::pose).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    /// Vertical gap between neighbouring cards, in layout units.
    pub fan_spacing: f64,
    /// Scale of a hidden card.
    pub hidden_scale: f64,
    /// Tilt of a hidden card.
    pub hidden_tilt_deg: f64,
    /// Entry delay between consecutive positions.
    pub stagger: Duration,
}

impl Default for Projector {
    fn default() -> Self {
        Self {
            fan_spacing: 20.0,
            hidden_scale: 0.9,
            hidden_tilt_deg: 60.0,
            stagger: Duration::from_millis(50),
        }
    }
}

impl Projector {
    /// Flattened, tilted, transparent pose shared by entry start and exit.
    pub fn hidden(&self) -> CardPose {
        CardPose {
            offset_y: 0.0,
            z_index: 0,
            opacity: 0.0,
            scale: self.hidden_scale,
            tilt_deg: self.hidden_tilt_deg,
        }
    }

    /// Fanned resting pose of position `index` in a stack of `len`.
    pub fn shown(&self, index: usize, len: usize, z_offset: u64) -> CardPose {
        let behind = len.saturating_sub(1).saturating_sub(index);
        let depth = len.saturating_sub(index) as u64;
        CardPose {
            offset_y: behind as f64 * self.fan_spacing,
            z_index: depth + z_offset,
            opacity: 1.0,
            scale: 1.0,
            tilt_deg: 0.0,
        }
    }

    /// Target pose for a card in `phase`.
    pub fn pose(&self, phase: CardPhase, index: usize, len: usize, z_offset: u64) -> CardPose {
        match phase {
            CardPhase::Shown => self.shown(index, len, z_offset),
            CardPhase::Hidden | CardPhase::Exiting => self.hidden(),
        }
    }

    /// How long position `index` waits before entering.
    pub fn entry_delay(&self, index: usize) -> Duration {
        self.stagger.saturating_mul(u32::try_from(index).unwrap_or(u32::MAX))
    }
}
