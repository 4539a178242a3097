// Copyright 2025 the Swipedeck Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The animation clock: scheduling, interpolation and completion.

use core::time::Duration;

use kurbo::{Affine, Point};
use swipedeck_scene::{Scene, ViewId};
use tracing::trace;

use crate::animation::{Animation, AnimationId, Property};
use crate::easing::Easing;

/// Drives scheduled animations against a [`Scene`].
///
/// The animator has no clock of its own. Callers pass a monotonically increasing `now`
/// (time since any fixed origin) to [`Animator::schedule`] and [`Animator::advance`].
///
/// ## Completion ordering
///
/// [`Animator::advance`] returns the animations that finished during that step in
/// scheduling order. Callers run their continuations from that list one at a time, so a
/// continuation never observes another continuation half-applied.
///
/// ## Start values
///
/// Starting values are read from the scene when an animation starts (after its delay),
/// not when it is scheduled. When an animation starts, it takes over the properties it
/// shares with older animations of the same view; the older animations keep running for
/// their other properties and still complete on time.
#[derive(Debug, Default)]
pub struct Animator {
    tracks: Vec<Track>,
    next_id: u64,
}

#[derive(Clone, Copy, Debug)]
enum Start {
    Point(Point),
    Scalar(f64),
    Affine(Affine),
    Fixed,
}

#[derive(Clone, Debug)]
struct Channel {
    target: Property,
    from: Start,
}

#[derive(Clone, Debug)]
struct Track {
    id: AnimationId,
    view: ViewId,
    start: Duration,
    duration: Duration,
    easing: Easing,
    pending: Vec<Property>,
    channels: Vec<Channel>,
    started: bool,
}

impl Animator {
    /// Create an idle animator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `animation` relative to `now`.
    pub fn schedule(&mut self, now: Duration, animation: Animation) -> AnimationId {
        let id = AnimationId(self.next_id);
        self.next_id += 1;
        trace!(
            ?id,
            view = ?animation.view,
            duration_ms = animation.duration.as_millis(),
            delay_ms = animation.delay.as_millis(),
            "schedule animation"
        );
        self.tracks.push(Track {
            id,
            view: animation.view,
            start: now + animation.delay,
            duration: animation.duration,
            easing: animation.easing,
            pending: animation.properties,
            channels: Vec::new(),
            started: false,
        });
        id
    }

    /// Returns true if `id` has been scheduled and has not completed yet.
    pub fn is_active(&self, id: AnimationId) -> bool {
        self.tracks.iter().any(|t| t.id == id)
    }

    /// Number of animations that have not completed yet.
    pub fn active_count(&self) -> usize {
        self.tracks.len()
    }

    /// Returns true if nothing is scheduled.
    pub fn is_idle(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Active animations of `view`, oldest first.
    pub fn animations_of(&self, view: ViewId) -> impl Iterator<Item = AnimationId> + '_ {
        self.tracks
            .iter()
            .filter(move |t| t.view == view)
            .map(|t| t.id)
    }

    /// Jump every animation of `view` to its final values.
    ///
    /// The animations still complete on the next [`Animator::advance`], in scheduling order
    /// with everything else, so their continuations run as usual.
    pub fn fast_forward(&mut self, scene: &mut Scene, view: ViewId) {
        for i in 0..self.tracks.len() {
            if self.tracks[i].view != view {
                continue;
            }
            if !self.tracks[i].started {
                self.start_track(i, scene);
            }
            let track = &mut self.tracks[i];
            for ch in &track.channels {
                apply(scene, track.view, ch, 1.0);
            }
            track.start = Duration::ZERO;
            track.duration = Duration::ZERO;
        }
    }

    /// Advance all animations to `now`, writing interpolated values into `scene`.
    ///
    /// Returns the animations that completed, in scheduling order. An animation whose view
    /// no longer exists completes as soon as it is due to start.
    pub fn advance(&mut self, scene: &mut Scene, now: Duration) -> Vec<AnimationId> {
        // Start everything that is due before writing any values, so a newer animation
        // captures its start values before an older one writes its final frame.
        for i in 0..self.tracks.len() {
            if now >= self.tracks[i].start && !self.tracks[i].started {
                self.start_track(i, scene);
            }
        }
        let mut finished = Vec::new();
        for track in &self.tracks {
            if !track.started {
                continue;
            }
            let t = if track.duration.is_zero() {
                1.0
            } else {
                now.saturating_sub(track.start).as_secs_f64() / track.duration.as_secs_f64()
            }
            .min(1.0);
            let eased = track.easing.apply(t);
            for ch in &track.channels {
                apply(scene, track.view, ch, eased);
            }
            if t >= 1.0 || !scene.is_alive(track.view) {
                finished.push(track.id);
            }
        }
        if !finished.is_empty() {
            self.tracks.retain(|t| !finished.contains(&t.id));
            trace!(?finished, "animations completed");
        }
        finished
    }

    fn start_track(&mut self, i: usize, scene: &Scene) {
        let (view, id) = (self.tracks[i].view, self.tracks[i].id);
        let pending = core::mem::take(&mut self.tracks[i].pending);
        // Take over shared properties from older animations of the same view.
        for older in self.tracks.iter_mut().filter(|t| t.view == view && t.id < id) {
            older
                .channels
                .retain(|c| pending.iter().all(|p| p.slot() != c.target.slot()));
            older
                .pending
                .retain(|c| pending.iter().all(|p| p.slot() != c.slot()));
        }
        let local = scene.local(view);
        let channels = pending
            .into_iter()
            .map(|target| {
                let from = match (target, local) {
                    (_, None) | (Property::Spin { .. }, _) => Start::Fixed,
                    (Property::Center(_) | Property::CenterX(_), Some(l)) => Start::Point(l.center),
                    (Property::Transform(_), Some(l)) => Start::Affine(l.transform),
                    (Property::Opacity(_), Some(l)) => Start::Scalar(l.opacity),
                };
                Channel { target, from }
            })
            .collect();
        let track = &mut self.tracks[i];
        track.channels = channels;
        track.started = true;
    }
}

// Exact at both ends, so finished animations land on their targets.
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    if t >= 1.0 { b } else { a + (b - a) * t }
}

fn lerp_affine(a: Affine, b: Affine, t: f64) -> Affine {
    let (ca, cb) = (a.as_coeffs(), b.as_coeffs());
    let mut out = [0.0; 6];
    for (o, (x, y)) in out.iter_mut().zip(ca.iter().zip(cb.iter())) {
        *o = lerp(*x, *y, t);
    }
    Affine::new(out)
}

fn apply(scene: &mut Scene, view: ViewId, ch: &Channel, t: f64) {
    match (ch.target, ch.from) {
        (Property::Center(to), Start::Point(from)) => {
            scene.set_center(view, Point::new(lerp(from.x, to.x, t), lerp(from.y, to.y, t)));
        }
        (Property::CenterX(to), Start::Point(from)) => {
            let y = scene.local(view).map(|l| l.center.y).unwrap_or(from.y);
            scene.set_center(view, Point::new(lerp(from.x, to, t), y));
        }
        (Property::Transform(to), Start::Affine(from)) => {
            scene.set_transform(view, lerp_affine(from, to, t));
        }
        (Property::Opacity(to), Start::Scalar(from)) => {
            scene.set_opacity(view, lerp(from, to, t));
        }
        (Property::Spin { from, to }, _) => {
            scene.set_transform(view, Affine::rotate(lerp(from, to, t)));
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Size;
    use swipedeck_scene::LocalView;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn scene_with_view() -> (Scene, ViewId) {
        let mut scene = Scene::new();
        let v = scene.insert(
            None,
            LocalView {
                size: Size::new(10.0, 10.0),
                center: Point::new(100.0, 50.0),
                ..Default::default()
            },
        );
        (scene, v)
    }

    #[test]
    fn linear_fade_interpolates_and_completes() {
        let (mut scene, v) = scene_with_view();
        let mut anim = Animator::new();
        let id = anim.schedule(
            ms(0),
            Animation::new(v, ms(100))
                .easing(Easing::Linear)
                .to(Property::Opacity(0.0)),
        );
        assert!(anim.advance(&mut scene, ms(50)).is_empty());
        assert!((scene.local(v).unwrap().opacity - 0.5).abs() < 1e-9);
        assert_eq!(anim.advance(&mut scene, ms(100)), vec![id]);
        assert_eq!(scene.local(v).unwrap().opacity, 0.0);
        assert!(!anim.is_active(id));
        assert!(anim.is_idle());
    }

    #[test]
    fn delay_postpones_start_value_capture() {
        let (mut scene, v) = scene_with_view();
        let mut anim = Animator::new();
        let id = anim.schedule(
            ms(0),
            Animation::new(v, ms(100))
                .delay(ms(200))
                .easing(Easing::Linear)
                .to(Property::Opacity(1.0)),
        );
        scene.set_opacity(v, 0.0);
        assert!(anim.advance(&mut scene, ms(150)).is_empty());
        assert_eq!(scene.local(v).unwrap().opacity, 0.0, "not started yet");
        let _ = anim.advance(&mut scene, ms(250));
        assert!((scene.local(v).unwrap().opacity - 0.5).abs() < 1e-9);
        assert_eq!(anim.advance(&mut scene, ms(400)), vec![id]);
        assert_eq!(scene.local(v).unwrap().opacity, 1.0);
    }

    #[test]
    fn completions_follow_scheduling_order() {
        let (mut scene, v) = scene_with_view();
        let w = scene.insert(None, LocalView::default());
        let mut anim = Animator::new();
        let a = anim.schedule(ms(0), Animation::new(v, ms(300)).to(Property::Opacity(0.0)));
        let b = anim.schedule(ms(0), Animation::new(w, ms(100)).to(Property::Opacity(0.0)));
        let c = anim.schedule(ms(0), Animation::new(w, ms(0)).to(Property::CenterX(5.0)));
        assert_eq!(anim.advance(&mut scene, ms(500)), vec![a, b, c]);
    }

    #[test]
    fn zero_duration_applies_final_value_on_next_advance() {
        let (mut scene, v) = scene_with_view();
        let mut anim = Animator::new();
        let id = anim.schedule(ms(10), Animation::new(v, Duration::ZERO).to(Property::CenterX(0.0)));
        assert!(anim.advance(&mut scene, ms(5)).is_empty());
        assert_eq!(anim.advance(&mut scene, ms(10)), vec![id]);
        assert_eq!(scene.local(v).unwrap().center, Point::new(0.0, 50.0));
    }

    #[test]
    fn newer_animation_takes_over_shared_properties() {
        let (mut scene, v) = scene_with_view();
        let mut anim = Animator::new();
        let old = anim.schedule(
            ms(0),
            Animation::new(v, ms(100))
                .easing(Easing::Linear)
                .to(Property::CenterX(0.0))
                .to(Property::Opacity(0.0)),
        );
        let _ = anim.advance(&mut scene, ms(50));
        let new = anim.schedule(
            ms(50),
            Animation::new(v, ms(100))
                .easing(Easing::Linear)
                .to(Property::Center(Point::new(200.0, 50.0))),
        );
        let _ = anim.advance(&mut scene, ms(100));
        // Old animation finished its fade but no longer drives the center.
        assert_eq!(scene.local(v).unwrap().opacity, 0.0);
        assert_eq!(scene.local(v).unwrap().center, Point::new(125.0, 50.0));
        assert!(!anim.is_active(old));
        assert_eq!(anim.animations_of(v).collect::<Vec<_>>(), vec![new]);
        let _ = anim.advance(&mut scene, ms(150));
        assert_eq!(scene.local(v).unwrap().center, Point::new(200.0, 50.0));
    }

    #[test]
    fn transform_interpolates_coefficients() {
        let (mut scene, v) = scene_with_view();
        let mut anim = Animator::new();
        let _ = anim.schedule(
            ms(0),
            Animation::new(v, ms(100))
                .easing(Easing::Linear)
                .to(Property::Transform(Affine::scale(0.8))),
        );
        let _ = anim.advance(&mut scene, ms(50));
        let c = scene.local(v).unwrap().transform.as_coeffs();
        assert!((c[0] - 0.9).abs() < 1e-9 && (c[3] - 0.9).abs() < 1e-9);
    }

    #[test]
    fn spin_sweeps_full_turn() {
        let (mut scene, v) = scene_with_view();
        let mut anim = Animator::new();
        let _ = anim.schedule(
            ms(0),
            Animation::new(v, ms(100))
                .easing(Easing::Linear)
                .to(Property::Spin {
                    from: 0.0,
                    to: core::f64::consts::TAU,
                }),
        );
        let _ = anim.advance(&mut scene, ms(50));
        let c = scene.local(v).unwrap().transform.as_coeffs();
        assert!((c[0] + 1.0).abs() < 1e-9, "half a turn points backwards");
        let _ = anim.advance(&mut scene, ms(100));
        let c = scene.local(v).unwrap().transform.as_coeffs();
        assert!((c[0] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn fast_forward_jumps_to_final_values() {
        let (mut scene, v) = scene_with_view();
        let mut anim = Animator::new();
        let slide = anim.schedule(ms(0), Animation::new(v, ms(300)).to(Property::CenterX(0.0)));
        let fade = anim.schedule(
            ms(0),
            Animation::new(v, ms(100))
                .delay(ms(500))
                .to(Property::Opacity(0.2)),
        );
        let _ = anim.advance(&mut scene, ms(10));
        anim.fast_forward(&mut scene, v);
        assert_eq!(scene.local(v).unwrap().center, Point::new(0.0, 50.0));
        assert!((scene.local(v).unwrap().opacity - 0.2).abs() < 1e-9);
        assert_eq!(anim.advance(&mut scene, ms(20)), vec![slide, fade]);
    }

    #[test]
    fn earlier_time_does_not_underflow() {
        let (mut scene, v) = scene_with_view();
        let mut anim = Animator::new();
        let id = anim.schedule(
            ms(100),
            Animation::new(v, ms(100))
                .easing(Easing::Linear)
                .to(Property::Opacity(0.0)),
        );
        let _ = anim.advance(&mut scene, ms(150));
        assert!(anim.advance(&mut scene, ms(20)).is_empty());
        assert!(anim.is_active(id));
        assert_eq!(anim.advance(&mut scene, ms(200)), vec![id]);
        assert_eq!(scene.local(v).unwrap().opacity, 0.0);
    }

    #[test]
    fn removed_view_completes_without_writing() {
        let (mut scene, v) = scene_with_view();
        let mut anim = Animator::new();
        let id = anim.schedule(ms(0), Animation::new(v, ms(100)).to(Property::Opacity(0.0)));
        scene.remove(v);
        assert_eq!(anim.advance(&mut scene, ms(10)), vec![id]);
    }
}
