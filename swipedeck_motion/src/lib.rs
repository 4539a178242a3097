// Copyright 2025 the Swipedeck Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Swipedeck Motion: time-driven tweens over a [`swipedeck_scene::Scene`].
//!
//! Animations are values: an [`Animation`] names a view, the [`Property`] targets it should
//! reach, a duration, a delay and an [`Easing`]. The [`Animator`] owns scheduled
//! animations and is advanced by the host's frame clock. There are no completion closures.
//! Instead, [`Animator::advance`] returns the [`AnimationId`]s that finished, in the order
//! they were scheduled, and the caller runs whatever continuation it associated with each
//! id. This keeps all state mutation on the caller's side and strictly ordered.
//!
//! ```
//! use core::time::Duration;
//! use kurbo::{Point, Size};
//! use swipedeck_motion::{Animation, Animator, Easing, Property};
//! use swipedeck_scene::{LocalView, Scene};
//!
//! let mut scene = Scene::new();
//! let card = scene.insert(None, LocalView { size: Size::new(10.0, 10.0), ..Default::default() });
//!
//! let mut animator = Animator::new();
//! let fling = animator.schedule(
//!     Duration::ZERO,
//!     Animation::new(card, Duration::from_millis(300))
//!         .easing(Easing::Linear)
//!         .to(Property::CenterX(500.0))
//!         .to(Property::Opacity(0.0)),
//! );
//!
//! assert!(animator.advance(&mut scene, Duration::from_millis(150)).is_empty());
//! assert_eq!(scene.local(card).unwrap().center, Point::new(250.0, 0.0));
//! assert_eq!(animator.advance(&mut scene, Duration::from_millis(300)), vec![fling]);
//! ```

mod animation;
mod animator;
mod easing;

pub use animation::{Animation, AnimationId, Property};
pub use animator::Animator;
pub use easing::Easing;
