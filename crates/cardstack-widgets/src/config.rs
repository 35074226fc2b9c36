//! Animation and layout tuning for [`CardStack`](crate::card_stack::CardStack).

use crate::geometry::CardGeometry;
use crate::motion::SpringParams;
use crate::projector::Projector;
use crate::z_index::DEFAULT_STRIDE;
use std::time::Duration;

/// Tuning knobs. The defaults give a bouncy 50 ms-staggered entry and a
/// quick 200 ms exit.
///
/// ```rust,ignore
/// let config = CardStackConfig::default()
///     .with_stagger(Duration::from_millis(80))
///     .with_spring(SpringParams { stiffness: 300.0, damping: 25.0 });
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CardStackConfig {
    /// Pose targets and entry stagger.
    pub projector: Projector,
    /// Entry spring.
    pub spring: SpringParams,
    /// Exit tween length (no stagger).
    pub exit_duration: Duration,
    /// Container fade length.
    pub fade_duration: Duration,
    /// Per-card epoch stride of the z allocator.
    pub z_stride: u64,
    /// Animation frame interval while anything moves.
    pub frame_interval: Duration,
    /// Mapping from poses to terminal cells.
    pub geometry: CardGeometry,
    /// Jump straight to target poses instead of animating.
    pub reduced_motion: bool,
}

impl Default for CardStackConfig {
    fn default() -> Self {
        Self {
            projector: Projector::default(),
            spring: SpringParams::default(),
            exit_duration: Duration::from_millis(200),
            fade_duration: Duration::from_millis(200),
            z_stride: DEFAULT_STRIDE,
            frame_interval: Duration::from_millis(16),
            geometry: CardGeometry::default(),
            reduced_motion: false,
        }
    }
}

impl CardStackConfig {
    /// Set the entry delay between consecutive cards.
    pub fn with_stagger(mut self, stagger: Duration) -> Self {
        self.projector.stagger = stagger;
        self
    }

    /// Set the entry spring.
    pub fn with_spring(mut self, spring: SpringParams) -> Self {
        self.spring = spring;
        self
    }

    /// Set the exit tween length.
    pub fn with_exit_duration(mut self, duration: Duration) -> Self {
        self.exit_duration = duration;
        self
    }

    /// Set the container fade length.
    pub fn with_fade_duration(mut self, duration: Duration) -> Self {
        self.fade_duration = duration;
        self
    }

    /// Set the animation frame interval.
    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }

    /// Set the cell geometry.
    pub fn with_geometry(mut self, geometry: CardGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Make every transition instantaneous.
    pub fn with_reduced_motion(mut self, reduced: bool) -> Self {
        self.reduced_motion = reduced;
        self
    }
}
