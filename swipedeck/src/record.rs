// Copyright 2025 the Swipedeck Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The data shown on a card.

/// One event, as shown on a card.
///
/// Records are plain values: the deck owns them for its whole lifetime and cards only
/// read them when configured.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventRecord {
    /// Headline.
    pub title: String,
    /// Human-readable place.
    pub location: String,
    /// Display price, including currency.
    pub price: String,
    /// Display time range, for example `18:00-20:00`.
    pub time_range: String,
    /// Expected number of guests.
    pub guests: u32,
    /// Hours until the event starts.
    pub starts_in_hours: u32,
    /// Logical name of the cover image, resolved through an
    /// [`ImageStore`](crate::image::ImageStore).
    pub image: String,
}
