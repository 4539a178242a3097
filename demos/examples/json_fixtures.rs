// Copyright 2025 the Swipedeck Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Records and configuration as data.
//!
//! Load a deck and a partial configuration from JSON, then flick through the deck twice
//! with direct drag reports.
//!
//! Run:
//! - `cargo run -p swipedeck_demos --example json_fixtures`

use core::time::Duration;

use kurbo::Vec2;
use swipedeck::gesture::{DragPhase, DragUpdate};
use swipedeck::image::NoImages;
use swipedeck::{DeckConfig, EventRecord, StackController};
use tracing_subscriber::EnvFilter;

const RECORDS: &str = r#"[
  { "title": "Chess Night", "location": "Old Town, Riga, LV", "price": "$5.0",
    "time_range": "19:00-22:00", "guests": 16, "starts_in_hours": 2, "image": "chess" },
  { "title": "Pottery Class", "location": "Kreuzberg, Berlin, DE", "price": "$45.0",
    "time_range": "10:00-12:30", "guests": 8, "starts_in_hours": 20, "image": "pottery" }
]"#;

// Unlisted fields keep their defaults.
const CONFIG: &str = r#"{ "capacity": 2, "slot_spacing": 40.0, "swipe": { "distance_threshold": 80.0 } }"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .init();

    let records: Vec<EventRecord> = serde_json::from_str(RECORDS)?;
    let config: DeckConfig = serde_json::from_str(CONFIG)?;
    println!("config: {}", serde_json::to_string_pretty(&config)?);

    let mut stack = StackController::new(records, config, NoImages)?;
    let mut now = Duration::ZERO;
    for _ in 0..4 {
        stack.drag(DragUpdate::new(DragPhase::Began, Vec2::ZERO, Vec2::ZERO));
        stack.drag(DragUpdate::new(DragPhase::Changed, Vec2::new(90.0, 0.0), Vec2::ZERO));
        stack.drag(DragUpdate::new(DragPhase::Ended, Vec2::new(90.0, 0.0), Vec2::ZERO));
        while !stack.is_idle() {
            now += Duration::from_millis(16);
            let _ = stack.advance(now);
        }
        let titles: Vec<_> = stack.window().iter().map(|c| c.content().title.as_str()).collect();
        println!("window: {titles:?}");
    }
    Ok(())
}
