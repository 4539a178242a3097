// Copyright 2025 the Swipedeck Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted swipe session.
//!
//! Drive the stack with pointer input on a 60 Hz clock: one slow drag that snaps back,
//! then a few flings, printing the window and damage as it goes.
//!
//! Run:
//! - `RUST_LOG=swipedeck=debug cargo run -p swipedeck_demos --example swipe_session`

use core::time::Duration;

use kurbo::Point;
use swipedeck::image::{Image, ImageCatalog};
use swipedeck::{DeckConfig, StackController, fixtures::sample_events};
use tracing_subscriber::EnvFilter;

const FRAME: Duration = Duration::from_micros(16_667);

fn run_until_idle(stack: &mut StackController, now: &mut Duration) {
    let mut frames = 0;
    while !stack.is_idle() {
        *now += FRAME;
        let damage = stack.advance(*now);
        frames += 1;
        if let Some(area) = damage.union_rect() {
            tracing::trace!(?area, "repaint");
        }
    }
    println!("  settled after {frames} frames: window {:?}", stack.window_record_indices());
}

/// Press on the front card, drag by `dx` over `steps` frames, then release.
fn swipe(stack: &mut StackController, now: &mut Duration, dx: f64, steps: u32) {
    let start = Point::new(stack.config().center_x(), 365.0);
    if !stack.pointer_down(start, *now) {
        println!("  press missed the front card");
        return;
    }
    for i in 1..=steps {
        *now += FRAME;
        let _ = stack.advance(*now);
        let x = start.x + dx * f64::from(i) / f64::from(steps);
        stack.pointer_move(Point::new(x, start.y), *now);
    }
    stack.pointer_up(Point::new(start.x + dx, start.y), *now);
    run_until_idle(stack, now);
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let mut images = ImageCatalog::new();
    for (i, name) in ["event1", "event2", "event4"].into_iter().enumerate() {
        images.insert(Image::new(name, 640 + 10 * i as u32, 480));
    }
    let mut stack = match StackController::new(sample_events(), DeckConfig::default(), images) {
        Ok(stack) => stack,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            return;
        }
    };
    let mut now = Duration::ZERO;
    let _ = stack.advance(now);
    println!("initial window {:?}", stack.window_record_indices());

    println!("slow drag of 60 points:");
    swipe(&mut stack, &mut now, 60.0, 30);
    assert_eq!(stack.window_record_indices(), [0, 1, 2], "short drags snap back");

    for (n, dx) in [180.0, -220.0, 140.0, -160.0].into_iter().enumerate() {
        println!("swipe {} by {dx} points:", n + 1);
        swipe(&mut stack, &mut now, dx, 12);
        if let Some(front) = stack.front() {
            let content = front.content();
            println!(
                "  front: {} | {} | image {}",
                content.title,
                content.details.plain_text(),
                if content.image.is_placeholder() { "(placeholder)" } else { content.image.name() },
            );
        }
    }
    assert_eq!(stack.window_record_indices(), [4, 0, 1]);
}
