// Copyright 2025 the Swipedeck Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The stack controller: a bounded window of cards over a cyclic deck.
//!
//! The controller owns the window and the deck cursor. Cards never see either; they report
//! back through [`CardEvent`]s, which the controller collects from the animations that
//! finish on each [`StackController::advance`].
//!
//! ## Frame loop
//!
//! Hosts feed input through [`StackController::drag`] (or the pointer methods) and call
//! [`StackController::advance`] once per frame. `advance` runs every continuation that became
//! due, one at a time and in scheduling order, then commits the scene and returns the damage
//! to repaint.

use core::time::Duration;

use kurbo::{Affine, Point};
use swipedeck_motion::{Animation, AnimationId, Property};
use swipedeck_scene::{Damage, QueryFilter, Scene, ViewId};
use tracing::{debug, info, trace};

use crate::card::{Card, CardEvent, CardId};
use crate::config::{ConfigError, DeckConfig};
use crate::deck::Deck;
use crate::gesture::{DragPhase, DragTracker, DragUpdate};
use crate::image::{ImageCatalog, ImageStore};
use crate::record::EventRecord;
use crate::surface::Surface;

/// Scale of the card at window position `index` (front is 0).
pub fn slot_scale(config: &DeckConfig, index: usize) -> f64 {
    1.0 - index as f64 * config.scale_step
}

/// Where a card at one window position rests.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SlotGeometry {
    /// Uniform scale.
    pub scale: f64,
    /// Vertical offset of the slot from the front slot.
    pub offset_y: f64,
    /// Center of the card.
    pub center: Point,
    /// Transform applied about the center.
    pub transform: Affine,
}

/// Resting geometry of the card at window position `index`.
///
/// This depends on nothing but the configuration and the index.
///
/// ```
/// use kurbo::Point;
/// use swipedeck::{DeckConfig, controller::slot_geometry};
///
/// let cfg = DeckConfig::default();
/// assert_eq!(slot_geometry(&cfg, 0).center, Point::new(195.0, 365.0));
/// assert_eq!(slot_geometry(&cfg, 1).center, Point::new(195.0, 420.0));
/// ```
pub fn slot_geometry(config: &DeckConfig, index: usize) -> SlotGeometry {
    let scale = slot_scale(config, index);
    let offset_y = index as f64 * config.slot_spacing;
    SlotGeometry {
        scale,
        offset_y,
        center: Point::new(
            config.center_x(),
            config.base_y + offset_y + config.card_height / 2.0,
        ),
        transform: Affine::scale(scale),
    }
}

/// Resting geometry of every position of a window holding `len` cards, front first.
pub fn layout(config: &DeckConfig, len: usize) -> Vec<SlotGeometry> {
    (0..len).map(|i| slot_geometry(config, i)).collect()
}

/// Where a refilled card appears before moving into its slot, given the number of cards
/// already in the window.
pub fn entry_center(config: &DeckConfig, existing: usize) -> Point {
    Point::new(
        config.center_x(),
        config.base_y + existing as f64 * config.entry_spacing + config.card_height / 2.0,
    )
}

#[derive(Clone, Debug)]
struct Capture {
    card: CardId,
    tracker: DragTracker,
}

/// A dismissed card's root view, shrinking before it is removed.
#[derive(Copy, Clone, Debug)]
struct Retiring {
    animation: AnimationId,
    view: ViewId,
}

/// Maintains the visible window of cards over a [`Deck`].
///
/// Invariants, whenever no continuation is running:
///
/// - The window holds `min(capacity, deck.len())` cards.
/// - Only the front card can be interactive, and it is unless a drag just ended on it.
/// - Every card behind the front is overlaid.
#[derive(Debug)]
pub struct StackController<S = ImageCatalog> {
    config: DeckConfig,
    deck: Deck,
    window: Vec<Card>,
    retiring: Vec<Retiring>,
    surface: Surface,
    images: S,
    next_card: u64,
    capture: Option<Capture>,
}

impl<S: ImageStore> StackController<S> {
    /// Build a controller showing the first cards of `records`.
    ///
    /// The front card is interactive and shows no overlay; the others are overlaid. Cards are
    /// placed in their slots without animation.
    pub fn new(records: Vec<EventRecord>, config: DeckConfig, images: S) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut this = Self {
            deck: Deck::new(records, 0),
            config,
            window: Vec::new(),
            retiring: Vec::new(),
            surface: Surface::new(),
            images,
            next_card: 0,
            capture: None,
        };
        let count = this.config.capacity.min(this.deck.len());
        for slot in 0..count {
            let Some(index) = this.deck.draw() else {
                break;
            };
            let mut card = this.spawn(index, slot_geometry(&this.config, slot).center);
            if slot == 0 {
                card.set_interactive(&mut this.surface, true);
                card.remove_overlay(&mut this.surface, false);
            } else {
                card.apply_overlay(&mut this.surface);
            }
            this.surface.scene_mut().send_to_back(card.view());
            this.window.push(card);
        }
        this.layout_window(false);
        info!(
            records = this.deck.len(),
            window = this.window.len(),
            "card stack ready"
        );
        Ok(this)
    }

    /// The configuration.
    pub fn config(&self) -> &DeckConfig {
        &self.config
    }

    /// The deck and its cursor.
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// The image store cards are configured from.
    pub fn images(&self) -> &S {
        &self.images
    }

    /// Visible cards, front first.
    pub fn window(&self) -> &[Card] {
        &self.window
    }

    /// The front card.
    pub fn front(&self) -> Option<&Card> {
        self.window.first()
    }

    /// Deck indices of the visible cards, front first.
    pub fn window_record_indices(&self) -> Vec<usize> {
        self.window.iter().filter_map(Card::record_index).collect()
    }

    /// Number of cards currently accepting drags.
    pub fn interactive_count(&self) -> usize {
        self.window.iter().filter(|c| c.is_interactive()).count()
    }

    /// The scene, animator and clock.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// The view tree the host paints.
    pub fn scene(&self) -> &Scene {
        self.surface.scene()
    }

    /// Time of the latest frame.
    pub fn now(&self) -> Duration {
        self.surface.now()
    }

    /// Returns true if nothing is animating and no pointer is captured.
    pub fn is_idle(&self) -> bool {
        self.surface.animator().is_idle() && self.capture.is_none()
    }

    /// Advance the clock to `now`, run due continuations and commit the scene.
    pub fn advance(&mut self, now: Duration) -> Damage {
        for id in self.surface.advance(now) {
            if let Some(pos) = self.retiring.iter().position(|r| r.animation == id) {
                let retired = self.retiring.swap_remove(pos);
                self.surface.scene_mut().remove(retired.view);
                trace!(view = ?retired.view, "retired card removed");
                continue;
            }
            let event = self.window.iter_mut().find_map(|c| c.finish_animation(id));
            match event {
                Some(CardEvent::Dismissed(card)) => self.on_card_dismissed(card),
                Some(CardEvent::Settled(card)) => self.on_card_settled(card),
                None => {}
            }
        }
        self.surface.commit()
    }

    /// Replace a dismissed card: retire it, promote the next one and refill the back.
    ///
    /// Only dismissing the front card promotes a new front; removing a card from further
    /// back leaves the front card as it is. A card that is not in the window is ignored.
    pub fn on_card_dismissed(&mut self, id: CardId) {
        let Some(pos) = self.window.iter().position(|c| c.id() == id) else {
            debug!(card = ?id, "ignoring dismissal of a card outside the window");
            return;
        };
        let card = self.window.remove(pos);
        if self.capture.as_ref().is_some_and(|c| c.card == id) {
            self.capture = None;
        }
        self.retire(&card);
        debug!(card = ?id, record = ?card.record_index(), "card dismissed");

        if pos == 0 {
            self.promote_front();
        }

        if self.window.len() < self.config.capacity {
            if let Some(index) = self.deck.draw() {
                let center = entry_center(&self.config, self.window.len());
                let mut card = self.spawn(index, center);
                let transitions = &self.config.transitions;
                let view = card.view();
                self.surface.scene_mut().set_opacity(view, 0.0);
                card.apply_overlay(&mut self.surface);
                self.surface.scene_mut().send_to_back(view);
                let _ = self.surface.animate(
                    Animation::new(view, transitions.refill_fade_duration)
                        .delay(transitions.refill_fade_delay)
                        .to(Property::Opacity(1.0)),
                );
                debug!(card = ?card.id(), record = index, slot = self.window.len(), "card refilled");
                self.window.push(card);
                if self.window.len() == 1 {
                    self.promote_front();
                }
            }
        }

        self.layout_window(true);
    }

    /// Feed one drag report to the front card. Returns true if the card handled it.
    pub fn drag(&mut self, update: DragUpdate) -> bool {
        let Some(front) = self.window.first_mut() else {
            debug!(phase = ?update.phase, "ignoring drag on an empty window");
            return false;
        };
        let swipe = &self.config.swipe;
        match update.phase {
            DragPhase::Began => front.on_drag_began(&mut self.surface),
            DragPhase::Changed => {
                if !front.is_dragging() {
                    return false;
                }
                front.on_drag_changed(&mut self.surface, swipe, update.translation, update.velocity);
                true
            }
            DragPhase::Ended => front
                .on_drag_ended(&mut self.surface, swipe, update.translation, update.velocity)
                .is_some(),
            DragPhase::Cancelled => {
                if !front.is_dragging() {
                    return false;
                }
                front.on_drag_cancelled(&mut self.surface, swipe);
                true
            }
        }
    }

    /// Press at `pos`. Starts a drag and captures the pointer if the press lands on the
    /// interactive card.
    pub fn pointer_down(&mut self, pos: Point, at: Duration) -> bool {
        if self.capture.is_some() {
            debug!("ignoring press while the pointer is captured");
            return false;
        }
        let filter = QueryFilter {
            visible_only: true,
            pickable_only: true,
        };
        let Some(hit) = self.surface.scene().hit_test_point(pos, filter) else {
            return false;
        };
        let Some(card) = self.window.iter().find(|c| hit.path.contains(&c.view())) else {
            return false;
        };
        let card = card.id();
        let tracker = DragTracker::begin(pos, at);
        if !self.drag(tracker.began()) {
            return false;
        }
        trace!(?card, ?pos, "pointer captured");
        self.capture = Some(Capture { card, tracker });
        true
    }

    /// Move the captured pointer.
    pub fn pointer_move(&mut self, pos: Point, at: Duration) -> bool {
        let Some(update) = self.captured_update(|t| t.update(pos, at)) else {
            return false;
        };
        self.drag(update)
    }

    /// Release the captured pointer at `pos`.
    pub fn pointer_up(&mut self, pos: Point, at: Duration) -> bool {
        let Some(update) = self.captured_update(|t| t.finish(pos, at)) else {
            return false;
        };
        self.capture = None;
        self.drag(update)
    }

    /// Abort the captured pointer's drag.
    pub fn pointer_cancel(&mut self) -> bool {
        let Some(update) = self.captured_update(|t| t.cancel()) else {
            return false;
        };
        self.capture = None;
        self.drag(update)
    }

    fn captured_update(
        &mut self,
        f: impl FnOnce(&mut DragTracker) -> DragUpdate,
    ) -> Option<DragUpdate> {
        let front = self.window.first().map(Card::id);
        let Some(capture) = self.capture.as_mut() else {
            debug!("ignoring pointer event without a capture");
            return None;
        };
        if front != Some(capture.card) {
            debug!(card = ?capture.card, "dropping capture of a card that left the front");
            self.capture = None;
            return None;
        }
        Some(f(&mut capture.tracker))
    }

    fn spawn(&mut self, index: usize, center: Point) -> Card {
        let id = CardId(self.next_card);
        self.next_card += 1;
        let mut card = Card::new(&mut self.surface, id, self.config.card_size(), center);
        if let Some(record) = self.deck.get(index) {
            card.configure(index, record, &self.images);
        }
        card
    }

    fn promote_front(&mut self) {
        let Some(front) = self.window.first_mut() else {
            return;
        };
        front.set_interactive(&mut self.surface, true);
        front.remove_overlay(&mut self.surface, true);
        front.spin_affordance(&mut self.surface, &self.config.transitions);
        debug!(card = ?front.id(), record = ?front.record_index(), "card promoted");
    }

    fn on_card_settled(&mut self, id: CardId) {
        match self.window.first_mut() {
            Some(front) if front.id() == id => front.set_interactive(&mut self.surface, true),
            _ => debug!(card = ?id, "settled card is no longer at the front"),
        }
    }

    fn retire(&mut self, card: &Card) {
        let transitions = &self.config.transitions;
        let view = card.view();
        let animation = self.surface.animate(
            Animation::new(view, transitions.retire_duration)
                .to(Property::Transform(Affine::scale(transitions.retire_scale)))
                .to(Property::Opacity(0.0)),
        );
        self.retiring.push(Retiring { animation, view });
    }

    fn layout_window(&mut self, animated: bool) {
        let duration = self.config.transitions.layout_duration;
        for (card, slot) in self.window.iter().zip(layout(&self.config, self.window.len())) {
            let view = card.view();
            if animated {
                let _ = self.surface.animate(
                    Animation::new(view, duration)
                        .to(Property::Center(slot.center))
                        .to(Property::Transform(slot.transform)),
                );
            } else {
                let scene = self.surface.scene_mut();
                scene.set_center(view, slot.center);
                scene.set_transform(view, slot.transform);
            }
        }
    }
}
