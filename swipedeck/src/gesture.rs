// Copyright 2025 the Swipedeck Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag input and the swipe decision rule.

use core::time::Duration;

use kurbo::{Point, Vec2};

use crate::config::SwipeConfig;

/// Stage of a drag gesture.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DragPhase {
    /// The pointer went down on a card.
    Began,
    /// The pointer moved.
    Changed,
    /// The pointer was released.
    Ended,
    /// The host aborted the gesture.
    Cancelled,
}

/// A drag report, as a host gesture recognizer delivers it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DragUpdate {
    /// Stage of the gesture.
    pub phase: DragPhase,
    /// Offset from where the drag began.
    pub translation: Vec2,
    /// Pointer velocity in points per second.
    pub velocity: Vec2,
}

impl DragUpdate {
    /// A drag report for `phase`.
    pub fn new(phase: DragPhase, translation: Vec2, velocity: Vec2) -> Self {
        Self {
            phase,
            translation,
            velocity,
        }
    }
}

/// Horizontal direction of a fling.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards negative x.
    Left,
    /// Towards positive x.
    Right,
}

impl Direction {
    /// `-1.0` for left, `1.0` for right.
    pub fn sign(self) -> f64 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

/// Outcome of releasing a dragged card.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SwipeDecision {
    /// Fling the card off screen.
    Dismiss(Direction),
    /// Return the card to where the drag began.
    SnapBack,
}

/// Decide what a release does.
///
/// A release dismisses when horizontal travel or horizontal speed strictly exceeds its
/// threshold. The fling follows the travel; a release with no travel follows the velocity.
pub fn decide(config: &SwipeConfig, translation: Vec2, velocity: Vec2) -> SwipeDecision {
    let dismiss = translation.x.abs() > config.distance_threshold
        || velocity.x.abs() > config.velocity_threshold;
    if !dismiss {
        return SwipeDecision::SnapBack;
    }
    let lead = if translation.x != 0.0 {
        translation.x
    } else {
        velocity.x
    };
    SwipeDecision::Dismiss(if lead > 0.0 {
        Direction::Right
    } else {
        Direction::Left
    })
}

/// Tilt, in radians, of a card dragged `dx` points horizontally.
///
/// Proportional and unclamped: twice the reference travel gives twice the angle.
pub fn drag_rotation(config: &SwipeConfig, dx: f64) -> f64 {
    dx / config.rotation_reference * config.rotation_max_angle
}

/// Turns raw pointer samples into drag reports.
///
/// Velocity is the displacement over time between the two most recent samples with
/// distinct timestamps.
#[derive(Clone, Debug, PartialEq)]
pub struct DragTracker {
    origin: Point,
    last: Point,
    last_at: Duration,
    velocity: Vec2,
}

impl DragTracker {
    /// Start tracking at `pos`, sampled at `at`.
    pub fn begin(pos: Point, at: Duration) -> Self {
        Self {
            origin: pos,
            last: pos,
            last_at: at,
            velocity: Vec2::ZERO,
        }
    }

    /// The report for the start of the drag.
    pub fn began(&self) -> DragUpdate {
        DragUpdate::new(DragPhase::Began, Vec2::ZERO, Vec2::ZERO)
    }

    /// Record a move to `pos` at `at`.
    pub fn update(&mut self, pos: Point, at: Duration) -> DragUpdate {
        self.sample(pos, at);
        DragUpdate::new(DragPhase::Changed, self.translation(), self.velocity)
    }

    /// Record the release at `pos` at `at`.
    pub fn finish(&mut self, pos: Point, at: Duration) -> DragUpdate {
        self.sample(pos, at);
        DragUpdate::new(DragPhase::Ended, self.translation(), self.velocity)
    }

    /// The report for an aborted drag.
    pub fn cancel(&self) -> DragUpdate {
        DragUpdate::new(DragPhase::Cancelled, self.translation(), self.velocity)
    }

    /// Offset of the latest sample from the first.
    pub fn translation(&self) -> Vec2 {
        self.last - self.origin
    }

    /// Latest velocity estimate in points per second.
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn sample(&mut self, pos: Point, at: Duration) {
        if at > self.last_at {
            let dt = (at - self.last_at).as_secs_f64();
            self.velocity = (pos - self.last) / dt;
            self.last_at = at;
        }
        self.last = pos;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::FRAC_PI_8;

    fn cfg() -> SwipeConfig {
        SwipeConfig::default()
    }

    #[test]
    fn thresholds_are_strict() {
        let c = cfg();
        assert_eq!(
            decide(&c, Vec2::new(100.0, 0.0), Vec2::ZERO),
            SwipeDecision::SnapBack
        );
        assert_eq!(
            decide(&c, Vec2::new(-100.0, 0.0), Vec2::new(500.0, 0.0)),
            SwipeDecision::SnapBack
        );
        assert_eq!(
            decide(&c, Vec2::new(100.5, 0.0), Vec2::ZERO),
            SwipeDecision::Dismiss(Direction::Right)
        );
        assert_eq!(
            decide(&c, Vec2::new(-10.0, 0.0), Vec2::new(500.1, 0.0)),
            SwipeDecision::Dismiss(Direction::Left),
            "travel sets the direction"
        );
    }

    #[test]
    fn vertical_motion_never_dismisses() {
        assert_eq!(
            decide(&cfg(), Vec2::new(0.0, 900.0), Vec2::new(0.0, 5000.0)),
            SwipeDecision::SnapBack
        );
    }

    #[test]
    fn velocity_sets_direction_without_travel() {
        assert_eq!(
            decide(&cfg(), Vec2::ZERO, Vec2::new(800.0, 0.0)),
            SwipeDecision::Dismiss(Direction::Right)
        );
        assert_eq!(
            decide(&cfg(), Vec2::ZERO, Vec2::new(-800.0, 0.0)),
            SwipeDecision::Dismiss(Direction::Left)
        );
    }

    #[test]
    fn rotation_is_proportional_and_unclamped() {
        let c = cfg();
        assert_eq!(drag_rotation(&c, 0.0), 0.0);
        assert!((drag_rotation(&c, 200.0) - FRAC_PI_8).abs() < 1e-12);
        assert!((drag_rotation(&c, -400.0) + 2.0 * FRAC_PI_8).abs() < 1e-12);
    }

    #[test]
    fn tracker_reports_translation_and_velocity() {
        let mut t = DragTracker::begin(Point::new(100.0, 100.0), Duration::from_millis(0));
        assert_eq!(t.began().phase, DragPhase::Began);
        let u = t.update(Point::new(110.0, 104.0), Duration::from_millis(10));
        assert_eq!(u.translation, Vec2::new(10.0, 4.0));
        assert!((u.velocity.x - 1000.0).abs() < 1e-9);
        // Same timestamp: position moves, velocity is kept.
        let u = t.update(Point::new(120.0, 104.0), Duration::from_millis(10));
        assert_eq!(u.translation, Vec2::new(20.0, 4.0));
        assert!((u.velocity.x - 1000.0).abs() < 1e-9);
        let end = t.finish(Point::new(120.0, 104.0), Duration::from_millis(110));
        assert_eq!(end.phase, DragPhase::Ended);
        assert_eq!(end.velocity, Vec2::ZERO);
        assert_eq!(t.cancel().phase, DragPhase::Cancelled);
    }
}
