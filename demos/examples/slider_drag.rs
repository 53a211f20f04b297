// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag a stepped slider and print the lifecycle events.
//!
//! This example feeds a scripted press/move/release sequence into a slider,
//! including a press that misses the thumb and a termination request that is
//! refused mid-drag.
//!
//! Run:
//! - `RUST_LOG=understory_slider=debug cargo run -p understory_slider_demos --example slider_drag`

use tracing_subscriber::EnvFilter;
use understory_slider::{Range, Region, SlideHandler, Slider, SliderConfig};

#[derive(Default)]
struct Printer;

impl SlideHandler for Printer {
    fn sliding_start(&mut self, value: f64) {
        println!("  start     {value:>6.1}");
    }

    fn value_change(&mut self, value: f64) {
        println!("  change    {value:>6.1}");
    }

    fn sliding_complete(&mut self, value: f64) {
        println!("  complete  {value:>6.1}");
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let range = Range::new(0.0, 100.0, 10.0).unwrap_or_default();
    let mut slider = Slider::with_handler(SliderConfig::default().with_range(range), Printer);

    // Nothing is hit-testable before layout.
    println!("press before layout granted: {}", slider.on_gesture_start(20.0, 20.0));

    slider.measure(Region::Container, 300.0, 40.0);
    slider.measure(Region::Track, 300.0, 4.0);
    slider.measure(Region::Thumb, 20.0, 20.0);

    let layout = slider.layout();
    println!(
        "visible={} thumb={:?} touch={:?} overflow={:?}",
        layout.visible, layout.thumb_rect, layout.touch_rect, layout.touch_overflow
    );

    println!("press far from thumb granted: {}", slider.on_gesture_start(250.0, 20.0));

    let center = slider.touch_geometry().rect.center();
    println!("press on thumb granted: {}", slider.on_gesture_start(center.x, center.y));
    for dx in [30.0, 75.0, 133.0] {
        slider.on_gesture_move(dx);
    }
    println!("termination allowed: {}", slider.on_termination_request());
    slider.on_gesture_end(133.0);

    let layout = slider.layout();
    println!(
        "value={} thumb_offset={} filled={}",
        layout.value, layout.thumb_offset, layout.minimum_track_length
    );
}
