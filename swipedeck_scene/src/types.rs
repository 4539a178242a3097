// Copyright 2025 the Swipedeck Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Handles, flags, and per-view local data.

use bitflags::bitflags;
use kurbo::{Affine, Point, Rect, Size};

/// Identifier for a view in the scene (generational).
///
/// A `ViewId` stays valid until the view is removed. Slots are reused, but a reused slot
/// gets a new generation, so stale identifiers never alias a newer view.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ViewId(pub(crate) u32, pub(crate) u32);

impl ViewId {
    pub(crate) fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) fn idx(self) -> usize {
        self.0 as usize
    }

    /// Returns true if `self` was allocated after `other`.
    #[inline]
    pub(crate) fn is_newer_than(self, other: Self) -> bool {
        (self.1 > other.1) || (self.1 == other.1 && self.0 > other.0)
    }
}

bitflags! {
    /// View flags controlling visibility and picking.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ViewFlags: u8 {
        /// View is visible (participates in painting and hit testing).
        const VISIBLE  = 0b0000_0001;
        /// View accepts pointer input.
        const PICKABLE = 0b0000_0010;
    }
}

impl Default for ViewFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::PICKABLE
    }
}

/// Local state for a view.
///
/// A view occupies a rectangle of `size` centered on `center` in its parent's
/// coordinate space. `transform` is applied about the center, so scaling or
/// rotating a view never moves its center.
#[derive(Clone, Debug, PartialEq)]
pub struct LocalView {
    /// Untransformed size.
    pub size: Size,
    /// Center in parent space.
    pub center: Point,
    /// Transform applied about the center.
    pub transform: Affine,
    /// Opacity in `0.0..=1.0`, multiplied down the tree.
    pub opacity: f64,
    /// Order among siblings. Higher is painted on top.
    pub z_index: i32,
    /// Visibility and picking flags.
    pub flags: ViewFlags,
}

impl Default for LocalView {
    fn default() -> Self {
        Self {
            size: Size::ZERO,
            center: Point::ORIGIN,
            transform: Affine::IDENTITY,
            opacity: 1.0,
            z_index: 0,
            flags: ViewFlags::default(),
        }
    }
}

impl LocalView {
    /// Build a view from a frame expressed in a parent of size `parent`,
    /// with the frame origin at the parent's top-left corner.
    pub fn from_frame(frame: Rect, parent: Size) -> Self {
        let c = frame.center();
        Self {
            size: frame.size(),
            center: Point::new(c.x - parent.width / 2.0, c.y - parent.height / 2.0),
            ..Default::default()
        }
    }

    /// Transform from this view's local space (origin at its center) to parent space.
    pub fn to_parent(&self) -> Affine {
        Affine::translate(self.center.to_vec2()) * self.transform
    }

    /// Untransformed bounds in local space.
    pub fn local_bounds(&self) -> Rect {
        Rect::from_center_size(Point::ORIGIN, self.size)
    }
}

/// Filters applied during hit testing.
#[derive(Clone, Copy, Debug, Default)]
pub struct QueryFilter {
    /// If true, only consider views that are effectively visible.
    pub visible_only: bool,
    /// If true, only consider views marked [`ViewFlags::PICKABLE`].
    pub pickable_only: bool,
}

/// Results of a hit test.
#[derive(Clone, Debug)]
pub struct Hit {
    /// The matched view.
    pub view: ViewId,
    /// Path from root to view (inclusive).
    pub path: Vec<ViewId>,
    /// The query point in the matched view's local space.
    pub local_point: Point,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_conversion_centers_in_parent() {
        let parent = Size::new(100.0, 200.0);
        let v = LocalView::from_frame(Rect::new(0.0, 0.0, 100.0, 140.0), parent);
        assert_eq!(v.size, Size::new(100.0, 140.0));
        assert_eq!(v.center, Point::new(0.0, -30.0));
    }

    #[test]
    fn transform_is_about_center() {
        let v = LocalView {
            size: Size::new(10.0, 10.0),
            center: Point::new(50.0, 50.0),
            transform: Affine::scale(2.0),
            ..Default::default()
        };
        assert_eq!(v.to_parent() * Point::ORIGIN, Point::new(50.0, 50.0));
        assert_eq!(v.to_parent() * Point::new(5.0, 0.0), Point::new(60.0, 50.0));
    }

    #[test]
    fn newer_than_semantics() {
        let old = ViewId::new(10, 1);
        let newer_same_slot = ViewId::new(10, 2);
        let same_gen_higher_slot = ViewId::new(11, 2);
        let same_gen_lower_slot = ViewId::new(9, 2);

        assert!(newer_same_slot.is_newer_than(old));
        assert!(same_gen_higher_slot.is_newer_than(newer_same_slot));
        assert!(!same_gen_lower_slot.is_newer_than(newer_same_slot));
    }
}
