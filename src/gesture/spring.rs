//! Frame-driven motion primitives.
//!
//! Animations advance only when [`Motion::step`] is called with an elapsed
//! duration, so the whole gesture layer is deterministic under test.

use std::time::Duration;

/// Integration step used to keep stiff springs stable at large frame times.
const SUBSTEP: f64 = 0.001;

/// Distance from the target under which a spring may come to rest.
const REST_DELTA: f64 = 0.5;

/// Speed under which a spring may come to rest.
const REST_SPEED: f64 = 0.5;

/// Frames at least this long (seconds) land a spring on its target outright.
const MAX_SPAN: f64 = 1.0;

/// Damped spring parameters (unit mass).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    pub stiffness: f64,
    pub damping: f64,
}

impl Spring {
    /// Gentle spring used to return a card to rest.
    pub const SNAP_BACK: Self = Self {
        stiffness: 80.0,
        damping: 20.0,
    };

    /// Snappy spring used for button-triggered swipes.
    pub const PROGRAMMATIC: Self = Self {
        stiffness: 200.0,
        damping: 25.0,
    };
}

/// An in-progress animation of a single scalar.
#[derive(Debug, Clone, PartialEq)]
pub enum Motion {
    /// Spring toward `target`, carrying velocity between frames.
    Spring {
        spring: Spring,
        target: f64,
        velocity: f64,
    },
    /// Eased interpolation from `from` to `to` over `duration`.
    Tween {
        from: f64,
        to: f64,
        duration: Duration,
        elapsed: Duration,
    },
}

impl Motion {
    /// Starts a spring toward `target` from rest.
    #[must_use]
    pub const fn spring(spring: Spring, target: f64) -> Self {
        Self::Spring {
            spring,
            target,
            velocity: 0.0,
        }
    }

    /// Starts a tween from `from` to `to`.
    #[must_use]
    pub const fn tween(from: f64, to: f64, duration: Duration) -> Self {
        Self::Tween {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
        }
    }

    /// Advances the motion by `dt` from `position`.
    ///
    /// Returns the new position and whether the motion has finished. A
    /// finished motion lands exactly on its target. Springs are integrated in
    /// fixed substeps; a frame of a second or more finishes them outright.
    pub fn step(&mut self, position: f64, dt: Duration) -> (f64, bool) {
        match self {
            Self::Spring {
                spring,
                target,
                velocity,
            } => {
                let mut remaining = dt.as_secs_f64();
                if remaining >= MAX_SPAN {
                    *velocity = 0.0;
                    return (*target, true);
                }
                let mut x = position;
                let mut v = *velocity;
                while remaining > 0.0 {
                    let h = remaining.min(SUBSTEP);
                    let accel = -spring.stiffness * (x - *target) - spring.damping * v;
                    v += accel * h;
                    x += v * h;
                    remaining -= h;
                }
                if (x - *target).abs() < REST_DELTA && v.abs() < REST_SPEED {
                    *velocity = 0.0;
                    (*target, true)
                } else {
                    *velocity = v;
                    (x, false)
                }
            }
            Self::Tween {
                from,
                to,
                duration,
                elapsed,
            } => {
                *elapsed = elapsed.saturating_add(dt);
                if *elapsed >= *duration {
                    return (*to, true);
                }
                let t = elapsed.as_secs_f64() / duration.as_secs_f64();
                (*from + (*to - *from) * ease_out(t), false)
            }
        }
    }
}

/// Cubic ease-out on `[0, 1]`.
fn ease_out(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(mut motion: Motion, mut position: f64, frames: usize) -> (f64, bool) {
        let frame = Duration::from_millis(16);
        for _ in 0..frames {
            let (next, done) = motion.step(position, frame);
            position = next;
            if done {
                return (position, true);
            }
        }
        (position, false)
    }

    #[test]
    fn snap_back_spring_settles_at_target() {
        let (position, done) = run(Motion::spring(Spring::SNAP_BACK, 0.0), 90.0, 300);
        assert!(done);
        assert!(position.abs() < f64::EPSILON);
    }

    #[test]
    fn programmatic_spring_reaches_offset_quickly() {
        let (position, done) = run(Motion::spring(Spring::PROGRAMMATIC, 160.0), 0.0, 120);
        assert!(done);
        assert!((position - 160.0).abs() < f64::EPSILON);
    }

    #[test]
    fn spring_survives_a_long_frame() {
        let mut motion = Motion::spring(Spring::PROGRAMMATIC, -160.0);
        let (position, _) = motion.step(0.0, Duration::from_millis(900));
        assert!((position + 160.0).abs() < 1.0);
    }

    #[test]
    fn huge_frames_land_on_target_immediately() {
        let mut motion = Motion::spring(Spring::SNAP_BACK, 0.0);
        assert_eq!(motion.step(90.0, Duration::from_secs(100_000)), (0.0, true));

        let mut motion = Motion::spring(Spring::PROGRAMMATIC, 160.0);
        assert_eq!(motion.step(0.0, Duration::MAX), (160.0, true));
    }

    #[test]
    fn tween_finishes_after_duration() {
        let mut motion = Motion::tween(100.0, 800.0, Duration::from_millis(400));
        let (midway, done) = motion.step(100.0, Duration::from_millis(200));
        assert!(!done);
        assert!(midway > 450.0 && midway < 800.0);

        let (end, done) = motion.step(midway, Duration::from_millis(200));
        assert!(done);
        assert!((end - 800.0).abs() < f64::EPSILON);
    }
}
