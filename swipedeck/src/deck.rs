// Copyright 2025 the Swipedeck Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The inexhaustible source of cards.

use crate::record::EventRecord;

/// A fixed list of records and a cursor that cycles through them.
///
/// The cursor only moves forward; the record it designates is `cursor % len`, so the deck
/// never runs out as long as it is non-empty.
///
/// ```
/// use swipedeck::{Deck, fixtures::sample_events};
///
/// let mut deck = Deck::new(sample_events(), 3);
/// assert_eq!(deck.next_index(), 3);
/// let drawn: Vec<_> = (0..4).filter_map(|_| deck.draw()).collect();
/// assert_eq!(drawn, [3, 4, 0, 1]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deck {
    records: Vec<EventRecord>,
    next_index: usize,
}

impl Deck {
    /// Create a deck whose first `min(initial, len)` records are already on screen.
    pub fn new(records: Vec<EventRecord>, initial: usize) -> Self {
        let next_index = initial.min(records.len());
        Self {
            records,
            next_index,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the deck has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record at `index`.
    pub fn get(&self, index: usize) -> Option<&EventRecord> {
        self.records.get(index)
    }

    /// All records, in order.
    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    /// The cursor; the next draw returns `next_index % len`.
    pub fn next_index(&self) -> usize {
        self.next_index
    }

    /// Take the record index under the cursor and advance the cursor.
    ///
    /// Returns `None` only for an empty deck.
    pub fn draw(&mut self) -> Option<usize> {
        if self.records.is_empty() {
            return None;
        }
        let index = self.next_index % self.records.len();
        self.next_index += 1;
        Some(index)
    }
}
