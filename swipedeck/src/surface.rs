// Copyright 2025 the Swipedeck Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The view tree and animation clock the cards draw into.

use core::time::Duration;

use swipedeck_motion::{Animation, AnimationId, Animator};
use swipedeck_scene::{Damage, Scene, ViewId};

/// A scene, the animator driving it, and the current frame time.
///
/// Everything that mutates views goes through here, so animations are always scheduled
/// relative to the frame the mutation happens in.
#[derive(Debug, Default)]
pub struct Surface {
    scene: Scene,
    animator: Animator,
    now: Duration,
}

impl Surface {
    /// An empty surface at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// The view tree.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The view tree, mutably.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// The animator.
    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    /// Time of the latest frame.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule `animation` relative to the current frame.
    pub fn animate(&mut self, animation: Animation) -> AnimationId {
        self.animator.schedule(self.now, animation)
    }

    /// Jump every running animation of `view` to its end state.
    pub fn fast_forward(&mut self, view: ViewId) {
        self.animator.fast_forward(&mut self.scene, view);
    }

    /// Move the clock to `now` and return the animations that finished, in order.
    ///
    /// Time never runs backwards; an earlier `now` is treated as the current time.
    pub fn advance(&mut self, now: Duration) -> Vec<AnimationId> {
        self.now = self.now.max(now);
        self.animator.advance(&mut self.scene, self.now)
    }

    /// Commit pending view changes and return what needs repainting.
    pub fn commit(&mut self) -> Damage {
        self.scene.commit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swipedeck_motion::Property;
    use swipedeck_scene::LocalView;

    #[test]
    fn animations_are_scheduled_at_the_current_frame() {
        let mut surface = Surface::new();
        let v = surface.scene_mut().insert(None, LocalView::default());
        let _ = surface.advance(Duration::from_millis(1000));
        let id = surface.animate(
            Animation::new(v, Duration::from_millis(100)).to(Property::Opacity(0.0)),
        );
        assert!(surface.advance(Duration::from_millis(1050)).is_empty());
        assert_eq!(surface.advance(Duration::from_millis(1100)), vec![id]);
    }

    #[test]
    fn clock_does_not_run_backwards() {
        let mut surface = Surface::new();
        let _ = surface.advance(Duration::from_millis(500));
        let _ = surface.advance(Duration::from_millis(100));
        assert_eq!(surface.now(), Duration::from_millis(500));
    }
}
