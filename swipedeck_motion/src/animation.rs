// Copyright 2025 the Swipedeck Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animation descriptions.

use core::time::Duration;

use kurbo::{Affine, Point};
use swipedeck_scene::ViewId;

use crate::easing::Easing;

/// Identifier of a scheduled animation.
///
/// Identifiers increase monotonically, so comparing two ids compares scheduling order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnimationId(pub(crate) u64);

/// A view property and the value it should reach.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Property {
    /// Move the center.
    Center(Point),
    /// Move the center horizontally; the vertical coordinate is left alone.
    CenterX(f64),
    /// Interpolate the transform coefficient-wise.
    Transform(Affine),
    /// Fade.
    Opacity(f64),
    /// Replace the transform with a rotation swept from `from` to `to` radians.
    ///
    /// Unlike [`Property::Transform`] this can sweep through a full turn.
    Spin {
        /// Starting angle.
        from: f64,
        /// Final angle.
        to: f64,
    },
}

/// Properties that write the same view state supersede each other.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Slot {
    Center,
    Transform,
    Opacity,
}

impl Property {
    pub(crate) fn slot(&self) -> Slot {
        match self {
            Self::Center(_) | Self::CenterX(_) => Slot::Center,
            Self::Transform(_) | Self::Spin { .. } => Slot::Transform,
            Self::Opacity(_) => Slot::Opacity,
        }
    }
}

/// An animation of one view's properties.
///
/// ```
/// use core::time::Duration;
/// use kurbo::Affine;
/// use swipedeck_motion::{Animation, Easing, Property};
/// # use swipedeck_scene::{LocalView, Scene};
/// # let mut scene = Scene::new();
/// # let view = scene.insert(None, LocalView::default());
///
/// let shrink = Animation::new(view, Duration::from_millis(250))
///     .easing(Easing::EaseInOut)
///     .to(Property::Opacity(0.0))
///     .to(Property::Transform(Affine::scale(0.8)));
/// assert_eq!(shrink.properties().len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Animation {
    pub(crate) view: ViewId,
    pub(crate) properties: Vec<Property>,
    pub(crate) duration: Duration,
    pub(crate) delay: Duration,
    pub(crate) easing: Easing,
}

impl Animation {
    /// Start describing an animation of `view` lasting `duration`.
    pub fn new(view: ViewId, duration: Duration) -> Self {
        Self {
            view,
            properties: Vec::new(),
            duration,
            delay: Duration::ZERO,
            easing: Easing::default(),
        }
    }

    /// Wait `delay` after scheduling before starting.
    #[must_use]
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Use `easing` for all properties.
    #[must_use]
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Add a property target.
    #[must_use]
    pub fn to(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    /// The animated view.
    pub fn view(&self) -> ViewId {
        self.view
    }

    /// Property targets in insertion order.
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Time from start to finish.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Time from scheduling to start.
    pub fn start_delay(&self) -> Duration {
        self.delay
    }
}
