// Copyright 2025 the Swipedeck Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Swipedeck: a headless swipe-to-dismiss card stack.
//!
//! A [`StackController`] shows a bounded window of cards drawn from a [`Deck`] of
//! [`EventRecord`]s. The front card follows horizontal drags; releasing it far or fast enough
//! flings it away, otherwise it snaps back. Every dismissal promotes the next card, refills
//! the back of the window from the deck (wrapping around at the end), and animates the
//! window into its fanned layout.
//!
//! Nothing here paints. The controller mutates a [`swipedeck_scene::Scene`] that a host
//! renders, and is driven by input reports and a frame clock.
//!
//! ## Modules
//!
//! - [`config`]: geometry, thresholds and timings, with validation.
//! - [`record`] and [`fixtures`]: the data shown on cards.
//! - [`deck`]: the cyclic record cursor.
//! - [`image`]: image lookup with a placeholder fallback.
//! - [`content`]: styled card text and the frames of a card's parts.
//! - [`gesture`]: drag reports, the dismiss rule, and pointer tracking.
//! - [`surface`]: the scene plus the animation clock.
//! - [`card`] and [`controller`]: the card and the stack.
//!
//! ## Example
//!
//! ```
//! use core::time::Duration;
//! use kurbo::Vec2;
//! use swipedeck::gesture::{DragPhase, DragUpdate};
//! use swipedeck::image::NoImages;
//! use swipedeck::{DeckConfig, StackController, fixtures::sample_events};
//!
//! let mut stack = StackController::new(sample_events(), DeckConfig::default(), NoImages).unwrap();
//! assert_eq!(stack.window_record_indices(), [0, 1, 2]);
//!
//! // A quick flick to the left.
//! stack.drag(DragUpdate::new(DragPhase::Began, Vec2::ZERO, Vec2::ZERO));
//! stack.drag(DragUpdate::new(DragPhase::Ended, Vec2::new(-20.0, 0.0), Vec2::new(-900.0, 0.0)));
//!
//! // Let the fling and the follow-up transitions run.
//! let mut now = Duration::ZERO;
//! while !stack.is_idle() {
//!     now += Duration::from_millis(16);
//!     let _damage = stack.advance(now);
//! }
//! assert_eq!(stack.window_record_indices(), [1, 2, 3]);
//! ```
//!
//! ## Features
//!
//! - `serde`: `Serialize`/`Deserialize` for [`EventRecord`] and the configuration types.

pub mod card;
pub mod config;
pub mod content;
pub mod controller;
pub mod deck;
pub mod fixtures;
pub mod gesture;
pub mod image;
pub mod record;
pub mod surface;

pub use card::{Card, CardEvent, CardId};
pub use config::{ConfigError, DeckConfig, SwipeConfig, TransitionConfig};
pub use controller::StackController;
pub use deck::Deck;
pub use record::EventRecord;
