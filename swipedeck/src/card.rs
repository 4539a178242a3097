// Copyright 2025 the Swipedeck Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A single swipeable card.
//!
//! A card owns its views and its drag state. It knows nothing about the stack it sits in:
//! the only thing it reports upward is a [`CardEvent`], returned from
//! [`Card::finish_animation`] when one of its own animations completes.

use core::f64::consts::FRAC_PI_2;

use kurbo::{Affine, Point, Rect, Size, Vec2};
use swipedeck_motion::{Animation, AnimationId, Easing, Property};
use swipedeck_scene::{LocalView, Scene, ViewFlags, ViewId};
use tracing::{debug, trace};

use crate::config::{SwipeConfig, TransitionConfig};
use crate::content::{CardContent, CardFrames};
use crate::gesture::{SwipeDecision, decide, drag_rotation};
use crate::image::{ImageStore, resolve};
use crate::record::EventRecord;
use crate::surface::Surface;

/// Overlay opacity on a freshly built card, before any display mode is applied.
const OVERLAY_INITIAL: f64 = 0.3;
/// Overlay opacity on a card behind the front.
const OVERLAY_DIMMED: f64 = 0.7;

/// Identifier of a card, unique for the lifetime of a controller.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CardId(pub(crate) u64);

/// Notifications a card sends to whoever owns it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CardEvent {
    /// The fling finished; the card is off screen and wants to be removed.
    Dismissed(CardId),
    /// The snap-back finished; the card is back where the drag began.
    Settled(CardId),
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum Motion {
    Idle,
    Dragging { initial_center: Point },
    Settling { animation: AnimationId },
    Flinging { animation: AnimationId },
    Dismissed,
}

#[derive(Copy, Clone, Debug)]
struct CardViews {
    root: ViewId,
    affordance: ViewId,
    affordance_icon: ViewId,
    overlay: ViewId,
}

/// A card bound to one record.
#[derive(Debug)]
pub struct Card {
    id: CardId,
    views: CardViews,
    record_index: Option<usize>,
    content: CardContent,
    interactive: bool,
    overlaid: bool,
    motion: Motion,
}

fn part(scene: &mut Scene, parent: ViewId, frame: Rect, parent_size: Size) -> ViewId {
    scene.insert(
        Some(parent),
        LocalView {
            flags: ViewFlags::VISIBLE,
            ..LocalView::from_frame(frame, parent_size)
        },
    )
}

impl Card {
    /// Build the views of an unconfigured, non-interactive card of `size` centered on `center`.
    pub(crate) fn new(surface: &mut Surface, id: CardId, size: Size, center: Point) -> Self {
        let frames = CardFrames::for_size(size);
        let scene = surface.scene_mut();
        let root = scene.insert(
            None,
            LocalView {
                size,
                center,
                flags: ViewFlags::VISIBLE,
                ..Default::default()
            },
        );
        for frame in [
            frames.image,
            frames.info,
            frames.title,
            frames.details,
            frames.location,
            frames.starts_in,
            frames.badge,
        ] {
            part(scene, root, frame, size);
        }
        let affordance = part(scene, root, frames.affordance, size);
        let affordance_icon = part(
            scene,
            affordance,
            frames.affordance_icon,
            frames.affordance.size(),
        );
        let overlay = part(scene, root, frames.overlay, size);
        scene.set_opacity(overlay, OVERLAY_INITIAL);
        Self {
            id,
            views: CardViews {
                root,
                affordance,
                affordance_icon,
                overlay,
            },
            record_index: None,
            content: CardContent::default(),
            interactive: false,
            overlaid: false,
            motion: Motion::Idle,
        }
    }

    /// Identifier.
    pub fn id(&self) -> CardId {
        self.id
    }

    /// Root view; every other part of the card is a descendant.
    pub fn view(&self) -> ViewId {
        self.views.root
    }

    /// The round affordance button.
    pub fn affordance_view(&self) -> ViewId {
        self.views.affordance
    }

    /// The chevron inside the affordance button.
    pub fn affordance_icon_view(&self) -> ViewId {
        self.views.affordance_icon
    }

    /// The dimming overlay.
    pub fn overlay_view(&self) -> ViewId {
        self.views.overlay
    }

    /// Deck index of the bound record, once configured.
    pub fn record_index(&self) -> Option<usize> {
        self.record_index
    }

    /// What the card displays.
    pub fn content(&self) -> &CardContent {
        &self.content
    }

    /// Returns true if the card accepts drags.
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Returns true if the card is dimmed.
    pub fn is_overlaid(&self) -> bool {
        self.overlaid
    }

    /// Returns true while a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        matches!(self.motion, Motion::Dragging { .. })
    }

    /// Returns true if the card is neither dragged nor running its own settle or fling.
    pub fn is_settled(&self) -> bool {
        self.motion == Motion::Idle
    }

    /// Bind `record` (at deck index `index`) to the card.
    ///
    /// Calling this again with the same record leaves the card unchanged.
    pub fn configure(&mut self, index: usize, record: &EventRecord, images: &dyn ImageStore) {
        self.content = CardContent::from_record(record, resolve(images, &record.image));
        self.record_index = Some(index);
    }

    /// Enable or disable drag handling.
    pub fn set_interactive(&mut self, surface: &mut Surface, interactive: bool) {
        self.interactive = interactive;
        let flags = if interactive {
            ViewFlags::VISIBLE | ViewFlags::PICKABLE
        } else {
            ViewFlags::VISIBLE
        };
        surface.scene_mut().set_flags(self.views.root, flags);
    }

    /// Dim the card and hide its affordance.
    pub fn apply_overlay(&mut self, surface: &mut Surface) {
        self.overlaid = true;
        let scene = surface.scene_mut();
        scene.set_opacity(self.views.overlay, OVERLAY_DIMMED);
        scene.set_opacity(self.views.affordance, 0.0);
    }

    /// Remove the dimming.
    ///
    /// The affordance is revealed only when `animated`; a card that starts out at the
    /// front shows no affordance until it is promoted again.
    pub fn remove_overlay(&mut self, surface: &mut Surface, animated: bool) {
        self.overlaid = false;
        let scene = surface.scene_mut();
        scene.set_opacity(self.views.overlay, 0.0);
        scene.set_opacity(self.views.affordance, if animated { 1.0 } else { 0.0 });
    }

    /// Spin the affordance chevron one full turn in four linear quarter turns.
    pub fn spin_affordance(&mut self, surface: &mut Surface, config: &TransitionConfig) {
        let quarter = config.affordance_spin_duration / 4;
        for k in 0..4_u32 {
            let from = f64::from(k) * FRAC_PI_2;
            let _ = surface.animate(
                Animation::new(self.views.affordance_icon, quarter)
                    .delay(config.affordance_spin_delay + quarter * k)
                    .easing(Easing::Linear)
                    .to(Property::Spin {
                        from,
                        to: from + FRAC_PI_2,
                    }),
            );
        }
    }

    /// Start a drag. Returns false if the card is not accepting drags.
    ///
    /// Any running layout animation is jumped to its end so the drag starts from the
    /// card's resting place.
    pub fn on_drag_began(&mut self, surface: &mut Surface) -> bool {
        if !self.interactive || self.motion != Motion::Idle {
            debug!(card = ?self.id, "ignoring drag on a card that is not ready");
            return false;
        }
        surface.fast_forward(self.views.root);
        let scene = surface.scene_mut();
        let Some(initial_center) = scene.local(self.views.root).map(|l| l.center) else {
            return false;
        };
        scene.bring_to_front(self.views.root);
        self.motion = Motion::Dragging { initial_center };
        trace!(card = ?self.id, ?initial_center, "drag began");
        true
    }

    /// Follow the pointer horizontally, tilting with the travel.
    pub fn on_drag_changed(
        &mut self,
        surface: &mut Surface,
        config: &SwipeConfig,
        translation: Vec2,
        _velocity: Vec2,
    ) {
        let Motion::Dragging { initial_center } = self.motion else {
            return;
        };
        let scene = surface.scene_mut();
        scene.set_center(
            self.views.root,
            Point::new(initial_center.x + translation.x, initial_center.y),
        );
        scene.set_transform(
            self.views.root,
            Affine::rotate(drag_rotation(config, translation.x)),
        );
        trace!(card = ?self.id, dx = translation.x, "drag changed");
    }

    /// Release the card: fling it away or snap it back.
    ///
    /// The card stops accepting drags before either animation starts. Returns `None` if no
    /// drag was in progress.
    pub fn on_drag_ended(
        &mut self,
        surface: &mut Surface,
        config: &SwipeConfig,
        translation: Vec2,
        velocity: Vec2,
    ) -> Option<SwipeDecision> {
        let Motion::Dragging { initial_center } = self.motion else {
            return None;
        };
        self.set_interactive(surface, false);
        let decision = decide(config, translation, velocity);
        debug!(card = ?self.id, ?decision, dx = translation.x, vx = velocity.x, "drag ended");
        match decision {
            SwipeDecision::Dismiss(direction) => {
                let x = surface
                    .scene()
                    .local(self.views.root)
                    .map(|l| l.center.x)
                    .unwrap_or(initial_center.x);
                let animation = surface.animate(
                    Animation::new(self.views.root, config.settle_duration)
                        .to(Property::CenterX(x + direction.sign() * config.fling_distance))
                        .to(Property::Opacity(0.0)),
                );
                self.motion = Motion::Flinging { animation };
            }
            SwipeDecision::SnapBack => self.snap_back(surface, config, initial_center),
        }
        Some(decision)
    }

    /// Abort the drag and snap back.
    pub fn on_drag_cancelled(&mut self, surface: &mut Surface, config: &SwipeConfig) {
        let Motion::Dragging { initial_center } = self.motion else {
            return;
        };
        self.set_interactive(surface, false);
        debug!(card = ?self.id, "drag cancelled");
        self.snap_back(surface, config, initial_center);
    }

    /// Report the completion of `animation`, if it is this card's fling or snap-back.
    pub fn finish_animation(&mut self, animation: AnimationId) -> Option<CardEvent> {
        match self.motion {
            Motion::Flinging { animation: a } if a == animation => {
                self.motion = Motion::Dismissed;
                Some(CardEvent::Dismissed(self.id))
            }
            Motion::Settling { animation: a } if a == animation => {
                self.motion = Motion::Idle;
                Some(CardEvent::Settled(self.id))
            }
            _ => None,
        }
    }

    fn snap_back(&mut self, surface: &mut Surface, config: &SwipeConfig, initial_center: Point) {
        let animation = surface.animate(
            Animation::new(self.views.root, config.settle_duration)
                .to(Property::Center(initial_center))
                .to(Property::Transform(Affine::IDENTITY)),
        );
        self.motion = Motion::Settling { animation };
    }
}
