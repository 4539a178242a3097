// Copyright 2025 the Swipedeck Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core scene implementation: structure, updates, queries.

use kurbo::{Affine, Point, Rect, Size};

use crate::damage::Damage;
use crate::types::{Hit, LocalView, QueryFilter, ViewFlags, ViewId};
use crate::util::{is_invertible, transform_rect_bbox};

/// Views below this effective opacity do not receive pointer input.
pub const HIT_OPACITY_THRESHOLD: f64 = 0.01;

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

/// Top-level retained view tree.
pub struct Scene {
    nodes: Vec<Option<Node>>, // slots
    generations: Vec<u32>,    // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    epoch: u64,
    // World bounds of removed views that were painted in the last commit.
    removed: Vec<Rect>,
}

impl core::fmt::Debug for Scene {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("Scene")
            .field("views_total", &total)
            .field("views_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("epoch", &self.epoch)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Painted {
    bounds: Rect,
    opacity: f64,
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<ViewId>,
    children: Vec<ViewId>,
    local: LocalView,
    // What the last commit saw; `None` until the first commit.
    painted: Option<Painted>,
    dirty: bool,
}

impl Node {
    fn new(generation: u32, local: LocalView) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            local,
            painted: None,
            dirty: true,
        }
    }
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            epoch: 0,
            removed: Vec::new(),
        }
    }

    /// Number of live views.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    /// Returns true if the scene holds no views.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of commits performed so far.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Insert a new view as the last child of `parent` (or as a root if `None`).
    ///
    /// The new view is placed on top of its siblings.
    pub fn insert(&mut self, parent: Option<ViewId>, local: LocalView) -> ViewId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, local));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ViewId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, local)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ViewId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = ViewId::new(idx, generation);
        if let Some(p) = parent
            && self.is_alive(p)
        {
            self.link_parent(id, p);
        }
        id
    }

    /// Remove a view (and its subtree) from the scene.
    ///
    /// Stale identifiers are ignored.
    pub fn remove(&mut self, id: ViewId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        let children = self.node(id).children.clone();
        for child in children {
            self.remove(child);
        }
        if let Some(p) = self.node(id).painted {
            self.removed.push(p.bounds);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Returns true if `id` refers to a live view.
    pub fn is_alive(&self, id: ViewId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .map(|n| n.generation == id.1)
            .unwrap_or(false)
    }

    /// Local state of a live view.
    pub fn local(&self, id: ViewId) -> Option<&LocalView> {
        self.node_opt(id).map(|n| &n.local)
    }

    /// Parent of a live view.
    pub fn parent(&self, id: ViewId) -> Option<ViewId> {
        self.node_opt(id).and_then(|n| n.parent)
    }

    /// Children of a live view in insertion order.
    pub fn children(&self, id: ViewId) -> &[ViewId] {
        self.node_opt(id).map(|n| &n.children[..]).unwrap_or(&[])
    }

    /// Update size.
    pub fn set_size(&mut self, id: ViewId, size: Size) {
        self.mutate(id, |l| l.size = size);
    }

    /// Update center.
    pub fn set_center(&mut self, id: ViewId, center: Point) {
        self.mutate(id, |l| l.center = center);
    }

    /// Update the transform applied about the center.
    pub fn set_transform(&mut self, id: ViewId, tf: Affine) {
        self.mutate(id, |l| l.transform = tf);
    }

    /// Update opacity. Values are clamped to `0.0..=1.0`.
    pub fn set_opacity(&mut self, id: ViewId, opacity: f64) {
        self.mutate(id, |l| l.opacity = opacity.clamp(0.0, 1.0));
    }

    /// Update z index.
    pub fn set_z_index(&mut self, id: ViewId, z: i32) {
        self.mutate(id, |l| l.z_index = z);
    }

    /// Update view flags.
    pub fn set_flags(&mut self, id: ViewId, flags: ViewFlags) {
        self.mutate(id, |l| l.flags = flags);
    }

    /// Place a view above all of its siblings.
    pub fn bring_to_front(&mut self, id: ViewId) {
        if let Some(top) = self.sibling_z(id).max() {
            let z = self.local(id).map(|l| l.z_index).unwrap_or(0);
            if z <= top {
                self.set_z_index(id, top.saturating_add(1));
            }
        }
    }

    /// Place a view below all of its siblings.
    pub fn send_to_back(&mut self, id: ViewId) {
        if let Some(bottom) = self.sibling_z(id).min() {
            let z = self.local(id).map(|l| l.z_index).unwrap_or(0);
            if z >= bottom {
                self.set_z_index(id, bottom.saturating_sub(1));
            }
        }
    }

    /// Transform from a view's local space to world space, computed from current local state.
    pub fn world_transform(&self, id: ViewId) -> Option<Affine> {
        let mut tf = self.local(id)?.to_parent();
        let mut cur = self.parent(id);
        while let Some(p) = cur {
            let n = self.node(p);
            tf = n.local.to_parent() * tf;
            cur = n.parent;
        }
        Some(tf)
    }

    /// World-space AABB of a view, computed from current local state.
    pub fn world_bounds(&self, id: ViewId) -> Option<Rect> {
        let tf = self.world_transform(id)?;
        Some(transform_rect_bbox(tf, self.node(id).local.local_bounds()))
    }

    /// Product of opacities from the root down to `id`.
    pub fn effective_opacity(&self, id: ViewId) -> Option<f64> {
        let mut o = self.local(id)?.opacity;
        let mut cur = self.parent(id);
        while let Some(p) = cur {
            let n = self.node(p);
            o *= n.local.opacity;
            cur = n.parent;
        }
        Some(o)
    }

    /// Returns true if the view and all of its ancestors are flagged visible.
    pub fn is_effectively_visible(&self, id: ViewId) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        let mut cur = Some(id);
        while let Some(v) = cur {
            let n = self.node(v);
            if !n.local.flags.contains(ViewFlags::VISIBLE) {
                return false;
            }
            cur = n.parent;
        }
        true
    }

    /// All live views in painting order, back to front.
    ///
    /// Siblings are ordered by z-index; equal z-indices paint the newer view on top.
    pub fn paint_order(&self) -> Vec<ViewId> {
        let mut out = Vec::new();
        let mut roots = self.roots();
        self.sort_siblings(&mut roots);
        for r in roots {
            self.collect_paint_order(r, &mut out);
        }
        out
    }

    /// Hit test a world-space point. Returns the topmost matching view.
    pub fn hit_test_point(&self, pt: Point, filter: QueryFilter) -> Option<Hit> {
        for id in self.paint_order().into_iter().rev() {
            let node = self.node(id);
            if filter.pickable_only && !node.local.flags.contains(ViewFlags::PICKABLE) {
                continue;
            }
            if filter.visible_only
                && (!self.is_effectively_visible(id)
                    || self.effective_opacity(id).unwrap_or(0.0) < HIT_OPACITY_THRESHOLD)
            {
                continue;
            }
            let Some(tf) = self.world_transform(id) else {
                continue;
            };
            if !is_invertible(tf) {
                continue;
            }
            let local_point = tf.inverse() * pt;
            if node.local.local_bounds().contains(local_point) {
                return Some(Hit {
                    view: id,
                    path: self.path_to_root(id),
                    local_point,
                });
            }
        }
        None
    }

    /// Run the batched update and return coarse damage.
    ///
    /// Damage covers views that were removed, views whose painted bounds or
    /// opacity changed, and views that were touched since the last commit.
    pub fn commit(&mut self) -> Damage {
        let mut damage = Damage::default();
        for r in self.removed.drain(..) {
            damage.push(r);
        }
        let ids: Vec<ViewId> = self.live_ids().collect();
        for id in ids {
            let now = Painted {
                bounds: self.world_bounds(id).unwrap_or(Rect::ZERO),
                opacity: self.effective_opacity(id).unwrap_or(0.0),
            };
            let node = self.node_mut(id);
            let before = node.painted.replace(now);
            let dirty = core::mem::take(&mut node.dirty);
            match before {
                None => damage.push(now.bounds),
                Some(old) if old != now => {
                    damage.push(old.bounds);
                    if old.bounds != now.bounds {
                        damage.push(now.bounds);
                    }
                }
                Some(_) if dirty => damage.push(now.bounds),
                Some(_) => {}
            }
        }
        self.epoch += 1;
        damage
    }

    // --- internals ---

    fn node(&self, id: ViewId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling ViewId")
    }

    fn node_mut(&mut self, id: ViewId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling ViewId")
    }

    fn node_opt(&self, id: ViewId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn node_opt_mut(&mut self, id: ViewId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn mutate(&mut self, id: ViewId, f: impl FnOnce(&mut LocalView)) {
        let Some(n) = self.node_opt_mut(id) else {
            return;
        };
        f(&mut n.local);
        n.dirty = true;
        // Children inherit the parent's transform and opacity.
        let children = n.children.clone();
        for c in children {
            self.mark_subtree_dirty(c);
        }
    }

    fn mark_subtree_dirty(&mut self, id: ViewId) {
        let children = {
            let n = self.node_mut(id);
            n.dirty = true;
            n.children.clone()
        };
        for c in children {
            self.mark_subtree_dirty(c);
        }
    }

    fn live_ids(&self) -> impl Iterator<Item = ViewId> + '_ {
        self.nodes.iter().enumerate().filter_map(|(i, n)| {
            n.as_ref().map(|n| {
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "ViewId uses 32-bit indices by design."
                )]
                ViewId::new(i as u32, n.generation)
            })
        })
    }

    fn roots(&self) -> Vec<ViewId> {
        self.live_ids()
            .filter(|id| self.node(*id).parent.is_none())
            .collect()
    }

    fn sibling_z(&self, id: ViewId) -> impl Iterator<Item = i32> + '_ {
        let siblings = match self.node_opt(id) {
            Some(n) => match n.parent {
                Some(p) => self.node(p).children.clone(),
                None => self.roots(),
            },
            None => Vec::new(),
        };
        siblings
            .into_iter()
            .filter(move |s| *s != id)
            .map(move |s| self.node(s).local.z_index)
    }

    fn sort_siblings(&self, ids: &mut [ViewId]) {
        ids.sort_by(|a, b| {
            let za = self.node(*a).local.z_index;
            let zb = self.node(*b).local.z_index;
            za.cmp(&zb).then_with(|| {
                if a.is_newer_than(*b) {
                    core::cmp::Ordering::Greater
                } else if b.is_newer_than(*a) {
                    core::cmp::Ordering::Less
                } else {
                    core::cmp::Ordering::Equal
                }
            })
        });
    }

    fn collect_paint_order(&self, id: ViewId, out: &mut Vec<ViewId>) {
        out.push(id);
        let mut children = self.node(id).children.clone();
        self.sort_siblings(&mut children);
        for c in children {
            self.collect_paint_order(c, out);
        }
    }

    fn link_parent(&mut self, id: ViewId, parent: ViewId) {
        self.node_mut(parent).children.push(id);
        self.node_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: ViewId, parent: ViewId) {
        self.node_mut(parent).children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }

    fn path_to_root(&self, mut id: ViewId) -> Vec<ViewId> {
        let mut out = Vec::new();
        loop {
            out.push(id);
            match self.node(id).parent {
                Some(p) => id = p,
                None => break,
            }
        }
        out.reverse();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Vec2;

    fn pick() -> QueryFilter {
        QueryFilter {
            visible_only: true,
            pickable_only: true,
        }
    }

    fn boxed(center: Point, size: f64) -> LocalView {
        LocalView {
            size: Size::new(size, size),
            center,
            ..Default::default()
        }
    }

    #[test]
    fn insert_and_hit_test() {
        let mut scene = Scene::new();
        let root = scene.insert(
            None,
            LocalView {
                flags: ViewFlags::VISIBLE,
                ..boxed(Point::new(100.0, 100.0), 200.0)
            },
        );
        let _a = scene.insert(Some(root), boxed(Point::new(-65.0, -65.0), 50.0));
        let b = scene.insert(
            Some(root),
            LocalView {
                z_index: 10,
                ..boxed(Point::new(-20.0, -20.0), 80.0)
            },
        );
        let hit = scene.hit_test_point(Point::new(50.0, 50.0), pick()).unwrap();
        assert_eq!(hit.view, b, "topmost by z should win");
        assert_eq!(hit.path.first().copied(), Some(root));
        assert_eq!(hit.path.last().copied(), Some(b));
    }

    #[test]
    fn equal_z_prefers_newer() {
        let mut scene = Scene::new();
        let a = scene.insert(None, boxed(Point::new(10.0, 10.0), 20.0));
        let b = scene.insert(None, boxed(Point::new(10.0, 10.0), 20.0));
        assert_eq!(scene.paint_order(), vec![a, b]);
        let hit = scene.hit_test_point(Point::new(10.0, 10.0), pick()).unwrap();
        assert_eq!(hit.view, b);
    }

    #[test]
    fn send_to_back_and_bring_to_front() {
        let mut scene = Scene::new();
        let a = scene.insert(None, boxed(Point::new(10.0, 10.0), 20.0));
        let b = scene.insert(None, boxed(Point::new(10.0, 10.0), 20.0));
        let c = scene.insert(None, boxed(Point::new(10.0, 10.0), 20.0));
        scene.send_to_back(c);
        assert_eq!(scene.paint_order(), vec![c, a, b]);
        scene.bring_to_front(a);
        assert_eq!(scene.paint_order(), vec![c, b, a]);
        // Already frontmost: no change.
        let z = scene.local(a).unwrap().z_index;
        scene.bring_to_front(a);
        assert_eq!(scene.local(a).unwrap().z_index, z);
    }

    #[test]
    fn children_paint_with_their_parent() {
        let mut scene = Scene::new();
        let back = scene.insert(None, boxed(Point::new(50.0, 50.0), 100.0));
        let front = scene.insert(None, boxed(Point::new(50.0, 50.0), 100.0));
        let badge = scene.insert(
            Some(back),
            LocalView {
                z_index: 100,
                ..boxed(Point::ORIGIN, 10.0)
            },
        );
        let order = scene.paint_order();
        let pos = |id| order.iter().position(|v| *v == id).unwrap();
        assert!(pos(badge) < pos(front), "child of a back view stays behind");
    }

    #[test]
    fn filters_skip_hidden_and_unpickable() {
        let mut scene = Scene::new();
        let under = scene.insert(None, boxed(Point::new(10.0, 10.0), 20.0));
        let over = scene.insert(None, boxed(Point::new(10.0, 10.0), 20.0));
        scene.set_flags(over, ViewFlags::VISIBLE);
        let hit = scene.hit_test_point(Point::new(10.0, 10.0), pick()).unwrap();
        assert_eq!(hit.view, under);

        scene.set_flags(over, ViewFlags::default());
        scene.set_opacity(over, 0.0);
        let hit = scene.hit_test_point(Point::new(10.0, 10.0), pick()).unwrap();
        assert_eq!(hit.view, under, "transparent views are not hit");

        scene.set_opacity(under, 0.0);
        assert!(scene.hit_test_point(Point::new(10.0, 10.0), pick()).is_none());
    }

    #[test]
    fn hit_test_respects_rotation() {
        let mut scene = Scene::new();
        let v = scene.insert(
            None,
            LocalView {
                size: Size::new(100.0, 10.0),
                center: Point::new(100.0, 100.0),
                transform: Affine::rotate(core::f64::consts::FRAC_PI_2),
                ..Default::default()
            },
        );
        // After a quarter turn the long axis is vertical.
        assert!(scene.hit_test_point(Point::new(100.0, 140.0), pick()).is_some());
        assert!(scene.hit_test_point(Point::new(140.0, 100.0), pick()).is_none());
        let hit = scene.hit_test_point(Point::new(100.0, 100.0), pick()).unwrap();
        assert_eq!(hit.view, v);
    }

    #[test]
    fn world_transform_composes_parents() {
        let mut scene = Scene::new();
        let root = scene.insert(
            None,
            LocalView {
                transform: Affine::scale(0.5),
                ..boxed(Point::new(100.0, 100.0), 200.0)
            },
        );
        let child = scene.insert(Some(root), boxed(Point::new(40.0, 0.0), 10.0));
        let tf = scene.world_transform(child).unwrap();
        assert_eq!(tf * Point::ORIGIN, Point::new(120.0, 100.0));
        scene.set_opacity(root, 0.5);
        scene.set_opacity(child, 0.5);
        assert_eq!(scene.effective_opacity(child), Some(0.25));
    }

    #[test]
    fn move_and_remove_produce_damage() {
        let mut scene = Scene::new();
        let n = scene.insert(None, boxed(Point::new(5.0, 5.0), 10.0));
        let first = scene.commit();
        assert_eq!(first.union_rect(), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
        assert!(scene.commit().is_empty(), "no changes, no damage");

        scene.set_transform(n, Affine::translate(Vec2::new(50.0, 0.0)));
        let moved = scene.commit();
        assert_eq!(moved.union_rect(), Some(Rect::new(0.0, 0.0, 60.0, 10.0)));

        scene.remove(n);
        let removed = scene.commit();
        assert_eq!(removed.union_rect(), Some(Rect::new(50.0, 0.0, 60.0, 10.0)));
        assert_eq!(scene.epoch(), 4);
    }

    #[test]
    fn liveness_insert_remove_reuse() {
        let mut scene = Scene::new();
        let root = scene.insert(None, boxed(Point::ORIGIN, 1.0));
        let a = scene.insert(Some(root), boxed(Point::ORIGIN, 1.0));
        let a_child = scene.insert(Some(a), boxed(Point::ORIGIN, 1.0));

        scene.remove(a);
        assert!(!scene.is_alive(a));
        assert!(!scene.is_alive(a_child), "subtree goes with its root");
        assert!(scene.children(root).is_empty());

        let b = scene.insert(Some(root), boxed(Point::ORIGIN, 1.0));
        assert!(scene.is_alive(b));
        assert!(!scene.is_alive(a));
        if a.0 == b.0 {
            assert!(b.1 > a.1, "generation must increase on reuse");
        }
        // Stale ids are ignored by setters.
        scene.set_opacity(a, 0.0);
        assert_eq!(scene.local(b).unwrap().opacity, 1.0);
    }
}
