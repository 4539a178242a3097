// Copyright 2025 the Swipedeck Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! What a card displays and where each part sits.
//!
//! [`CardContent`] is the styled text and image derived from an [`EventRecord`];
//! [`CardFrames`] is the fixed frame layout of a card's parts. Neither draws anything.

use kurbo::{Rect, Size};

use crate::image::Image;
use crate::record::EventRecord;

/// Text colors used on cards.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Tint {
    /// Labels.
    White,
    /// Values.
    Yellow,
}

/// Inline icons.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// Price marker.
    Dollar,
    /// Time marker.
    Clock,
    /// Guest count marker.
    People,
    /// Verified badge marker.
    Seal,
}

/// One styled piece of a line.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Run {
    /// Colored text.
    Text {
        /// The text.
        text: String,
        /// Its color.
        tint: Tint,
    },
    /// An inline icon.
    Icon(Symbol),
}

/// A line of styled runs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct StyledLine {
    runs: Vec<Run>,
}

impl StyledLine {
    fn text(mut self, text: impl Into<String>, tint: Tint) -> Self {
        self.runs.push(Run::Text {
            text: text.into(),
            tint,
        });
        self
    }

    fn icon(mut self, symbol: Symbol) -> Self {
        self.runs.push(Run::Icon(symbol));
        self
    }

    /// The runs, in reading order.
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// The text of the line with icons left out.
    pub fn plain_text(&self) -> String {
        self.runs
            .iter()
            .filter_map(|r| match r {
                Run::Text { text, .. } => Some(text.as_str()),
                Run::Icon(_) => None,
            })
            .collect()
    }
}

/// Everything a card shows for one record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CardContent {
    /// Cover image, or the placeholder.
    pub image: Image,
    /// Headline.
    pub title: String,
    /// Price, time range and guest count.
    pub details: StyledLine,
    /// Location label and value.
    pub location: StyledLine,
    /// Countdown label and value.
    pub starts_in: StyledLine,
    /// Verified badge.
    pub badge: StyledLine,
}

impl CardContent {
    /// Derive the displayed content for `record` with an already resolved `image`.
    pub fn from_record(record: &EventRecord, image: Image) -> Self {
        let details = StyledLine::default()
            .icon(Symbol::Dollar)
            .text(format!(" {} \u{2022} ", record.price), Tint::Yellow)
            .icon(Symbol::Clock)
            .text(format!(" {} \u{2022} ", record.time_range), Tint::Yellow)
            .icon(Symbol::People)
            .text(format!(" {} guests", record.guests), Tint::Yellow);
        let location = StyledLine::default()
            .text("Location: ", Tint::White)
            .text(record.location.clone(), Tint::Yellow);
        let starts_in = StyledLine::default()
            .text("Starts in: ", Tint::White)
            .icon(Symbol::Clock)
            .text(format!(" {}hrs", record.starts_in_hours), Tint::Yellow);
        let badge = StyledLine::default()
            .icon(Symbol::Seal)
            .text("Verified", Tint::White);
        Self {
            image,
            title: record.title.clone(),
            details,
            location,
            starts_in,
            badge,
        }
    }
}

/// Frames of a card's parts, in card coordinates (origin at the top-left corner).
#[derive(Clone, Debug, PartialEq)]
pub struct CardFrames {
    /// Cover image across the top.
    pub image: Rect,
    /// Dark panel under the image.
    pub info: Rect,
    /// Title row.
    pub title: Rect,
    /// Details row.
    pub details: Rect,
    /// Location row.
    pub location: Rect,
    /// Countdown row.
    pub starts_in: Rect,
    /// Verified badge.
    pub badge: Rect,
    /// Round affordance button in the bottom-right corner.
    pub affordance: Rect,
    /// Chevron icon, in affordance coordinates.
    pub affordance_icon: Rect,
    /// Dimming overlay over the whole card.
    pub overlay: Rect,
}

const PADDING: f64 = 12.0;
const ROW_GAP: f64 = 4.0;
const IMAGE_FRACTION: f64 = 0.7;
const AFFORDANCE: f64 = 40.0;

impl CardFrames {
    /// Lay out the parts of a card of `size`.
    ///
    /// Text rows are positioned absolutely in card coordinates, although they sit inside
    /// the info panel visually.
    pub fn for_size(size: Size) -> Self {
        let (w, h) = (size.width, size.height);
        let info_y = h * IMAGE_FRACTION;
        let row = |y: f64, height: f64| Rect::new(PADDING, y, w - PADDING, y + height);
        let title = row(info_y + PADDING, 22.0);
        let details = row(title.y1 + ROW_GAP, 20.0);
        let location = row(details.y1 + ROW_GAP, 20.0);
        let starts_in = row(location.y1 + ROW_GAP, 20.0);
        Self {
            image: Rect::new(0.0, 0.0, w, info_y),
            info: Rect::new(0.0, info_y, w, h),
            title,
            details,
            location,
            starts_in,
            badge: Rect::new(w - 100.0, 25.0, w - 20.0, 49.0),
            affordance: Rect::new(
                w - AFFORDANCE - 20.0,
                h - AFFORDANCE - 20.0,
                w - 20.0,
                h - 20.0,
            ),
            affordance_icon: Rect::new(10.0, 10.0, 30.0, 30.0),
            overlay: Rect::new(0.0, 0.0, w, h),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::sample_events;

    #[test]
    fn content_lines_match_record() {
        let record = &sample_events()[0];
        let content = CardContent::from_record(record, Image::placeholder());
        assert_eq!(content.title, "Yoga Workshop");
        assert_eq!(
            content.details.plain_text(),
            " $100.0 \u{2022}  23:59-0:0 \u{2022}  24 guests"
        );
        assert_eq!(
            content.location.plain_text(),
            "Location: Garden town Lahore, PK"
        );
        assert_eq!(content.starts_in.plain_text(), "Starts in:  7hrs");
        assert_eq!(content.badge.plain_text(), "Verified");
        assert!(content.image.is_placeholder());
    }

    #[test]
    fn labels_are_white_and_values_yellow() {
        let content = CardContent::from_record(&sample_events()[1], Image::placeholder());
        assert_eq!(
            content.location.runs(),
            &[
                Run::Text {
                    text: "Location: ".into(),
                    tint: Tint::White
                },
                Run::Text {
                    text: "Gulshan, Dhaka, BD".into(),
                    tint: Tint::Yellow
                },
            ]
        );
        let icons: Vec<_> = content
            .details
            .runs()
            .iter()
            .filter_map(|r| match r {
                Run::Icon(s) => Some(*s),
                Run::Text { .. } => None,
            })
            .collect();
        assert_eq!(icons, [Symbol::Dollar, Symbol::Clock, Symbol::People]);
    }

    #[test]
    fn frames_for_default_card() {
        let f = CardFrames::for_size(Size::new(320.0, 530.0));
        assert_eq!(f.image, Rect::new(0.0, 0.0, 320.0, 371.0));
        assert_eq!(f.info, Rect::new(0.0, 371.0, 320.0, 530.0));
        assert_eq!(f.title, Rect::new(12.0, 383.0, 308.0, 405.0));
        assert_eq!(f.starts_in, Rect::new(12.0, 457.0, 308.0, 477.0));
        assert_eq!(f.badge, Rect::new(220.0, 25.0, 300.0, 49.0));
        assert_eq!(f.affordance, Rect::new(260.0, 470.0, 300.0, 510.0));
    }
}
