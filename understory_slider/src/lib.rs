// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_slider --heading-base-level=0

//! Understory Slider: a toolkit-agnostic engine for a draggable range slider.
//!
//! Understory Slider owns the behavior of a horizontal slider and leaves drawing to the host.
//!
//! - Maps between values in a numeric range and thumb offsets along a track, with optional stepping and right-to-left mirroring.
//! - Arbitrates pointer gestures: only presses on an enlarged touch rect around the thumb start a drag, and an active drag is never ceded.
//! - Reports drag lifecycle events to a [`SlideHandler`] and value changes to listeners.
//! - Animates externally controlled value changes with a spring or timing curve.
//!
//! ## Not a renderer
//!
//! This crate does not paint, lay out, or receive platform input.
//! The host measures the container, track, and thumb and feeds the sizes in via
//! [`Slider::measure`], forwards pointer events to the gesture handlers, and positions
//! its visuals from [`Slider::layout`].
//! Until every region has a positive measurement the slider reports itself as not
//! [visible](slider::SliderLayout::visible) and rejects presses.
//!
//! ## API overview
//!
//! - [`Slider`]: the engine facade; owns configuration, geometry, the live value, and the gesture state.
//! - [`SliderConfig`]: range, controlled value, touch target, animation, and flags.
//! - [`Range`]: minimum, maximum, and step. See [`Range::new`] for the validated constructor.
//! - [`ValueMapper`](mapper::ValueMapper): pure value ↔ offset conversions.
//! - [`TouchTargetGeometry`](touch::TouchTargetGeometry): hit-test rect and view overflow.
//! - [`ValueHolder`](value::ValueHolder): the live value, animated writes, and listeners.
//! - [`Animator`](animation::Animator): pluggable animation capability, with a [`BuiltinAnimator`](animation::BuiltinAnimator).
//!
//! Key operations:
//! - [`Slider::on_gesture_start`] → grant or reject a press.
//! - [`Slider::on_gesture_move`] / [`Slider::on_gesture_end`] / [`Slider::on_gesture_terminate`].
//! - [`Slider::set_value`] → controlled update, animated when configured.
//! - [`Slider::tick`] → advance animations once per frame.
//!
//! ## Coordinates
//!
//! Offsets are measured from the leading edge of the container. The thumb's travel
//! is `container.width - thumb.width`. Press coordinates are relative to the
//! hit-testable view, which extends past the container by the touch overflow; see
//! [`touch`] for the exact frame.
//!
//! ## Minimal usage
//!
//! ```
//! use understory_slider::{Range, Region, Slider, SliderConfig};
//!
//! let config = SliderConfig::default()
//!     .with_range(Range::new(0.0, 100.0, 10.0).unwrap());
//! let mut slider = Slider::new(config);
//!
//! slider.measure(Region::Container, 300.0, 40.0);
//! slider.measure(Region::Track, 300.0, 4.0);
//! slider.measure(Region::Thumb, 20.0, 20.0);
//!
//! // Grab the thumb and drag it 133px along the 280px track.
//! assert!(slider.on_gesture_start(20.0, 20.0));
//! slider.on_gesture_move(133.0);
//! slider.on_gesture_end(133.0);
//!
//! // 47.5 rounds to the nearest step.
//! assert_eq!(slider.current_value(), 50.0);
//! assert_eq!(slider.layout().thumb_offset, 140.0);
//! ```
//!
//! ### Animated controlled updates
//!
//! ```
//! use core::time::Duration;
//! use understory_slider::{AnimationConfig, Slider, SliderConfig};
//!
//! let config = SliderConfig::default()
//!     .with_animate_transitions(true)
//!     .with_animation(AnimationConfig::spring().with_tension(120.0));
//! let mut slider = Slider::new(config);
//!
//! slider.set_value(1.0);
//! let mut now = Duration::ZERO;
//! while slider.tick(now) {
//!     now += Duration::from_millis(16);
//! }
//! assert_eq!(slider.current_value(), 1.0);
//! ```
//!
//! See `demos/examples/slider_drag.rs` for a runnable walkthrough with logging.

pub mod animation;
pub mod config;
pub mod geometry;
pub mod mapper;
pub mod slider;
pub mod touch;
pub mod types;
pub mod value;

pub use animation::{AnimationConfig, AnimationKind, Easing};
pub use config::{ConfigError, SliderConfig};
pub use slider::{DragSession, Slider, SliderLayout};
pub use types::{EventLog, NoHandler, Range, RangeError, Region, SlideEvent, SlideHandler};
