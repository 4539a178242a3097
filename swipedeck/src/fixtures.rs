// Copyright 2025 the Swipedeck Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Built-in sample events.

use crate::record::EventRecord;

fn event(
    image: &str,
    title: &str,
    location: &str,
    price: &str,
    time_range: &str,
    guests: u32,
    starts_in_hours: u32,
) -> EventRecord {
    EventRecord {
        title: title.into(),
        location: location.into(),
        price: price.into(),
        time_range: time_range.into(),
        guests,
        starts_in_hours,
        image: image.into(),
    }
}

/// The five sample events, with cover images named `event1` through `event5`.
pub fn sample_events() -> Vec<EventRecord> {
    vec![
        event(
            "event1",
            "Yoga Workshop",
            "Garden town Lahore, PK",
            "$100.0",
            "23:59-0:0",
            24,
            7,
        ),
        event(
            "event2",
            "Meditation Session",
            "Gulshan, Dhaka, BD",
            "$80.0",
            "18:00-20:00",
            15,
            5,
        ),
        event(
            "event3",
            "Dance Workshop",
            "Delhi, Delhi, IN",
            "$120.0",
            "14:00-16:00",
            30,
            19,
        ),
        event(
            "event4",
            "Art Exhibition",
            "Askari, Islamabad, PK",
            "$50.0",
            "10:00-18:00",
            100,
            3,
        ),
        event(
            "event5",
            "Music Concert",
            "Chennai, Tamil Nadu, IN",
            "$150.0",
            "20:00-23:00",
            200,
            6,
        ),
    ]
}
