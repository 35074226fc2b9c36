//! Time-driven interpolation of card poses.
//!
//! Entry and re-layout use a damped spring on a normalised progress value;
//! exit and the container fade use fixed-duration eased tweens. A motion
//! can be re-targeted at any moment and continues from its current pose.

use crate::projector::CardPose;
use std::time::Duration;

/// Largest integration step; longer frames are subdivided.
const MAX_STEP_SECS: f64 = 0.004;
const REST_POSITION: f64 = 0.001;
const REST_VELOCITY: f64 = 0.01;

/// Damped harmonic oscillator on a single scalar.
#[derive(Debug, Clone, PartialEq)]
pub struct Spring {
    position: f64,
    velocity: f64,
    target: f64,
    stiffness: f64,
    damping: f64,
}

impl Spring {
    /// Spring at `position` heading for `target`.
    pub fn new(position: f64, target: f64, stiffness: f64, damping: f64) -> Self {
        Self {
            position,
            velocity: 0.0,
            target,
            stiffness: stiffness.max(0.1),
            damping: damping.max(0.0),
        }
    }

    /// Current (unclamped) position.
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Whether position and velocity are within rest thresholds.
    pub fn is_at_rest(&self) -> bool {
        (self.position - self.target).abs() < REST_POSITION && self.velocity.abs() < REST_VELOCITY
    }

    /// Advance by `dt` using semi-implicit Euler.
    pub fn tick(&mut self, dt: Duration) {
        if self.is_at_rest() {
            self.position = self.target;
            self.velocity = 0.0;
            return;
        }
        let mut remaining = dt.as_secs_f64();
        while remaining > 0.0 {
            let step = remaining.min(MAX_STEP_SECS);
            let force =
                -self.stiffness * (self.position - self.target) - self.damping * self.velocity;
            self.velocity += force * step;
            self.position += self.velocity * step;
            remaining -= step;
        }
        if self.is_at_rest() {
            self.position = self.target;
            self.velocity = 0.0;
        }
    }
}

/// Cubic ease-out.
pub fn ease_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Fixed-duration eased progress from 0 to 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    elapsed: Duration,
    duration: Duration,
}

impl Tween {
    /// A tween lasting `duration`. Zero-length tweens are complete at once.
    pub fn new(duration: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration,
        }
    }

    /// Advance by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        self.elapsed = (self.elapsed + dt).min(self.duration);
    }

    /// Eased progress in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        ease_out(self.elapsed.as_secs_f64() / self.duration.as_secs_f64())
    }

    /// Whether the full duration has elapsed.
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Spring tuning for card entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringParams {
    /// Restoring force strength.
    pub stiffness: f64,
    /// Velocity drag.
    pub damping: f64,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            stiffness: 500.0,
            damping: 20.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Driver {
    Idle,
    Spring(Spring),
    Tween(Tween),
}

/// One card's in-flight transition.
#[derive(Debug, Clone, PartialEq)]
pub struct CardMotion {
    from: CardPose,
    to: CardPose,
    current: CardPose,
    delay: Duration,
    driver: Driver,
}

impl CardMotion {
    /// A motion resting at `pose`.
    pub fn at_rest(pose: CardPose) -> Self {
        Self {
            from: pose,
            to: pose,
            current: pose,
            delay: Duration::ZERO,
            driver: Driver::Idle,
        }
    }

    /// Current pose.
    pub fn pose(&self) -> CardPose {
        self.current
    }

    /// Whether there is still motion (or a pending delay) to run.
    pub fn is_animating(&self) -> bool {
        !matches!(self.driver, Driver::Idle)
    }

    /// Spring from the current pose to `to` after `delay`. The stacking
    /// value jumps to the target immediately.
    pub fn spring_to(&mut self, to: CardPose, delay: Duration, params: SpringParams) {
        self.from = self.current;
        self.from.z_index = to.z_index;
        self.current.z_index = to.z_index;
        self.to = to;
        self.delay = delay;
        self.driver = Driver::Spring(Spring::new(0.0, 1.0, params.stiffness, params.damping));
    }

    /// Eased tween from the current pose to `to` over `duration`, no delay.
    /// The stacking value is held until the tween completes.
    pub fn tween_to(&mut self, to: CardPose, duration: Duration) {
        self.from = self.current;
        self.to = to;
        self.delay = Duration::ZERO;
        self.driver = Driver::Tween(Tween::new(duration));
    }

    /// Change the resting stacking value without restarting the motion.
    pub fn set_z_index(&mut self, z_index: u64) {
        self.to.z_index = z_index;
        if !matches!(self.driver, Driver::Tween(_)) {
            self.from.z_index = z_index;
            self.current.z_index = z_index;
        }
    }

    /// Advance by `dt`. Returns `true` if the motion settled during this call.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if !self.is_animating() {
            return false;
        }
        let dt = if self.delay > dt {
            self.delay -= dt;
            return false;
        } else {
            let left = dt - self.delay;
            self.delay = Duration::ZERO;
            left
        };

        let (t, done, z) = match &mut self.driver {
            Driver::Idle => return false,
            Driver::Spring(spring) => {
                spring.tick(dt);
                (spring.position(), spring.is_at_rest(), self.to.z_index)
            }
            Driver::Tween(tween) => {
                tween.tick(dt);
                let done = tween.is_complete();
                let z = if done { self.to.z_index } else { self.from.z_index };
                (tween.progress(), done, z)
            }
        };

        if done {
            self.current = self.to;
            self.driver = Driver::Idle;
        } else {
            self.current = CardPose::lerp(&self.from, &self.to, t, z);
        }
        done
    }
}

/// Linear fade of one opacity value towards a target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fade {
    value: f64,
    target: f64,
    duration: Duration,
}

impl Fade {
    /// A fade resting at `value`; a full 0 to 1 sweep takes `duration`.
    pub fn new(value: f64, duration: Duration) -> Self {
        let value = value.clamp(0.0, 1.0);
        Self {
            value,
            target: value,
            duration,
        }
    }

    /// Current opacity.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Head towards `target`.
    pub fn set_target(&mut self, target: f64) {
        self.target = target.clamp(0.0, 1.0);
    }

    /// Whether the value still differs from the target.
    pub fn is_animating(&self) -> bool {
        self.value != self.target
    }

    /// Advance by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        if self.duration.is_zero() {
            self.value = self.target;
            return;
        }
        let step = dt.as_secs_f64() / self.duration.as_secs_f64();
        if self.value < self.target {
            self.value = (self.value + step).min(self.target);
        } else {
            self.value = (self.value - step).max(self.target);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projector::Projector;

    const FRAME: Duration = Duration::from_millis(16);

    fn run(motion: &mut CardMotion, frames: usize) {
        for _ in 0..frames {
            motion.tick(FRAME);
        }
    }

    #[test]
    fn spring_settles_on_target() {
        let mut spring = Spring::new(0.0, 1.0, 500.0, 20.0);
        for _ in 0..120 {
            spring.tick(FRAME);
        }
        assert!(spring.is_at_rest());
        assert_eq!(spring.position(), 1.0);
    }

    #[test]
    fn underdamped_spring_overshoots() {
        let mut spring = Spring::new(0.0, 1.0, 500.0, 20.0);
        let mut peak: f64 = 0.0;
        for _ in 0..60 {
            spring.tick(FRAME);
            peak = peak.max(spring.position());
        }
        assert!(peak > 1.0);
    }

    #[test]
    fn tween_eases_to_completion() {
        let mut tween = Tween::new(Duration::from_millis(200));
        tween.tick(Duration::from_millis(100));
        assert!(tween.progress() > 0.5);
        assert!(!tween.is_complete());
        tween.tick(Duration::from_millis(150));
        assert!(tween.is_complete());
        assert_eq!(tween.progress(), 1.0);
    }

    #[test]
    fn zero_length_tween_is_complete() {
        let tween = Tween::new(Duration::ZERO);
        assert!(tween.is_complete());
        assert_eq!(tween.progress(), 1.0);
    }

    #[test]
    fn delayed_spring_waits_before_moving() {
        let p = Projector::default();
        let mut motion = CardMotion::at_rest(p.hidden());
        motion.spring_to(p.shown(0, 5, 0), Duration::from_millis(100), SpringParams::default());

        run(&mut motion, 5);
        assert_eq!(motion.pose().opacity, 0.0);
        assert_eq!(motion.pose().z_index, 5);

        run(&mut motion, 120);
        assert!(!motion.is_animating());
        assert_eq!(motion.pose(), p.shown(0, 5, 0));
    }

    #[test]
    fn exit_tween_finishes_within_duration() {
        let p = Projector::default();
        let shown = p.shown(2, 5, 400);
        let mut motion = CardMotion::at_rest(shown);
        motion.tween_to(p.hidden(), Duration::from_millis(200));

        motion.tick(Duration::from_millis(100));
        assert_eq!(motion.pose().z_index, shown.z_index);
        assert!(motion.pose().opacity < 1.0);

        assert!(motion.tick(Duration::from_millis(100)));
        assert_eq!(motion.pose(), p.hidden());
    }

    #[test]
    fn retarget_continues_from_current_pose() {
        let p = Projector::default();
        let mut motion = CardMotion::at_rest(p.hidden());
        motion.spring_to(p.shown(0, 5, 0), Duration::ZERO, SpringParams::default());
        run(&mut motion, 3);
        let mid = motion.pose();

        motion.tween_to(p.hidden(), Duration::from_millis(200));
        motion.tick(Duration::ZERO);
        assert!((motion.pose().offset_y - mid.offset_y).abs() < 1e-9);
    }

    #[test]
    fn set_z_index_snaps_resting_cards() {
        let p = Projector::default();
        let mut motion = CardMotion::at_rest(p.shown(1, 5, 0));
        motion.set_z_index(901);
        assert_eq!(motion.pose().z_index, 901);
        assert!(!motion.is_animating());
    }

    #[test]
    fn fade_moves_linearly_and_stops() {
        let mut fade = Fade::new(0.0, Duration::from_millis(200));
        fade.set_target(1.0);
        fade.tick(Duration::from_millis(100));
        assert!((fade.value() - 0.5).abs() < 1e-9);
        fade.tick(Duration::from_millis(500));
        assert_eq!(fade.value(), 1.0);
        assert!(!fade.is_animating());
    }
}
