// Copyright 2025 the Swipedeck Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Swipedeck Scene: a Kurbo-native retained view tree.
//!
//! This is the view hierarchy the swipe deck manipulates. A host toolkit paints it;
//! the deck only mutates it.
//!
//! - Represents a hierarchy of views, each a rectangle of some size centered on a point in its
//!   parent's space, with a transform applied about that center, an opacity, a z-index and flags.
//! - Provides point hit testing that honors z-order, visibility, picking flags and opacity.
//! - Supports batched updates with a [`Scene::commit`] step that yields coarse damage regions.
//!
//! ## Not a layout engine
//!
//! The scene stores geometry; it does not compute it.
//! Upstream code decides where views go and writes centers, sizes and transforms.
//!
//! ## API overview
//!
//! - [`Scene`]: container managing views and their stacking.
//! - [`LocalView`]: per-view local state (size, center, transform, opacity, z, flags).
//! - [`ViewFlags`]: visibility and picking controls.
//! - [`ViewId`]: generational handle of a view.
//! - [`QueryFilter`]: restricts hit results (visible/pickable).
//!
//! ### Minimal usage
//!
//! ```
//! use swipedeck_scene::{LocalView, QueryFilter, Scene};
//! use kurbo::{Affine, Point, Size};
//!
//! let mut scene = Scene::new();
//! let card = scene.insert(
//!     None,
//!     LocalView { size: Size::new(100.0, 160.0), center: Point::new(200.0, 200.0), ..Default::default() },
//! );
//!
//! // Shrink about the center; the center does not move.
//! scene.set_transform(card, Affine::scale(0.5));
//! let damage = scene.commit();
//! assert!(damage.union_rect().is_some());
//!
//! let filter = QueryFilter { visible_only: true, pickable_only: true };
//! assert_eq!(scene.hit_test_point(Point::new(200.0, 200.0), filter).unwrap().view, card);
//! assert!(scene.hit_test_point(Point::new(200.0, 270.0), filter).is_none());
//! ```

mod damage;
mod scene;
mod types;
mod util;

pub use damage::Damage;
pub use scene::{HIT_OPACITY_THRESHOLD, Scene};
pub use types::{Hit, LocalView, QueryFilter, ViewFlags, ViewId};
