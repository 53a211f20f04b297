// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animate controlled value changes with spring and timing curves.
//!
//! Each frame prints the value and thumb offset, as a renderer would consume them.
//! A second `set_value` lands mid-flight to show superseding.
//!
//! Run:
//! - `cargo run -p understory_slider_demos --example slider_animated`

use core::time::Duration;

use tracing_subscriber::EnvFilter;
use understory_slider::{AnimationConfig, Easing, Region, Slider, SliderConfig};

const FRAME: Duration = Duration::from_millis(16);

fn run(name: &str, animation: AnimationConfig) {
    let config = SliderConfig::default()
        .with_animate_transitions(true)
        .with_animation(animation);
    let mut slider = Slider::new(config);
    slider.measure(Region::Container, 220.0, 30.0);
    slider.measure(Region::Track, 220.0, 4.0);
    slider.measure(Region::Thumb, 20.0, 20.0);

    let id = slider.add_listener(|v| tracing::trace!(value = v, "listener"));

    println!("{name}:");
    slider.set_value(1.0);
    let mut now = Duration::ZERO;
    let mut frame = 0_u32;
    while slider.tick(now) {
        if frame == 6 {
            slider.set_value(0.25);
        }
        let offset = slider.thumb_offset();
        let bar = (offset / 10.0).round() as usize;
        println!(
            "  {:>4}ms {:>6.3} |{:>width$}",
            now.as_millis(),
            slider.current_value(),
            "o",
            width = bar + 1
        );
        now += FRAME;
        frame += 1;
    }
    println!("  settled at {} after {frame} frames", slider.current_value());
    slider.remove_listener(id);
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    run("timing (default)", AnimationConfig::timing());
    run(
        "timing (linear, 300ms, 50ms delay)",
        AnimationConfig::timing()
            .with_easing(Easing::Linear)
            .with_duration(Duration::from_millis(300))
            .with_delay(Duration::from_millis(50)),
    );
    run("spring (default)", AnimationConfig::spring());
    run(
        "spring (bouncy)",
        AnimationConfig::spring().with_friction(3.0).with_tension(60.0),
    );
}
