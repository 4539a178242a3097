// Copyright 2025 the Swipedeck Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Small geometry helpers shared by the scene.

use kurbo::{Affine, Point, Rect};

/// Axis-aligned bounding box of `rect` after applying `tf`.
///
/// Conservative under rotation and shear: the four corners are transformed and
/// their extents taken.
pub(crate) fn transform_rect_bbox(tf: Affine, rect: Rect) -> Rect {
    let corners = [
        tf * Point::new(rect.x0, rect.y0),
        tf * Point::new(rect.x1, rect.y0),
        tf * Point::new(rect.x0, rect.y1),
        tf * Point::new(rect.x1, rect.y1),
    ];
    let mut out = Rect::from_points(corners[0], corners[0]);
    for c in &corners[1..] {
        out = out.union_pt(*c);
    }
    out
}

/// Returns true if `tf` can be inverted without producing non-finite values.
pub(crate) fn is_invertible(tf: Affine) -> bool {
    let det = tf.determinant();
    det.is_finite() && det.abs() > f64::EPSILON
}
