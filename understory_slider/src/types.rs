// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types: the value range, measured regions, and the lifecycle handler.
//!
//! ## Overview
//!
//! These types are shared by the [geometry store](crate::geometry), the
//! [value mapper](crate::mapper), and the [slider engine](crate::slider).

use thiserror::Error;

/// Errors reported when constructing a [`Range`] strictly.
#[derive(Copy, Clone, Debug, Error, PartialEq)]
pub enum RangeError {
    /// One of the bounds or the step is NaN or infinite.
    #[error("range bounds and step must be finite")]
    NonFinite,
    /// `maximum - minimum` overflows to infinity.
    #[error("span from {minimum} to {maximum} is not representable")]
    SpanOverflow {
        /// Requested lower bound.
        minimum: f64,
        /// Requested upper bound.
        maximum: f64,
    },
    /// `minimum` is greater than `maximum`.
    #[error("minimum {minimum} is greater than maximum {maximum}")]
    Inverted {
        /// Requested lower bound.
        minimum: f64,
        /// Requested upper bound.
        maximum: f64,
    },
    /// The step is negative.
    #[error("step {0} is negative")]
    NegativeStep(f64),
    /// The step is larger than `maximum - minimum`.
    #[error("step {step} exceeds the range span {span}")]
    StepExceedsSpan {
        /// Requested step.
        step: f64,
        /// `maximum - minimum`.
        span: f64,
    },
}

/// A closed numeric range with an optional quantization step.
///
/// A `step` of `0` means the value is continuous. When nonzero, selectable
/// values are `minimum + k * step` for integer `k`.
///
/// Use [`Range::new`] to validate caller input and [`Range::normalized`] when
/// a stuck-but-working slider is preferable to an error.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    /// Lower bound (inclusive).
    pub minimum: f64,
    /// Upper bound (inclusive).
    pub maximum: f64,
    /// Quantization step; `0` disables quantization.
    pub step: f64,
}

impl Default for Range {
    fn default() -> Self {
        Self {
            minimum: 0.0,
            maximum: 1.0,
            step: 0.0,
        }
    }
}

impl Range {
    /// Create a validated range.
    ///
    /// ```
    /// use understory_slider::types::{Range, RangeError};
    ///
    /// assert!(Range::new(0.0, 100.0, 10.0).is_ok());
    /// assert!(matches!(Range::new(5.0, 1.0, 0.0), Err(RangeError::Inverted { .. })));
    /// ```
    pub fn new(minimum: f64, maximum: f64, step: f64) -> Result<Self, RangeError> {
        if !(minimum.is_finite() && maximum.is_finite() && step.is_finite()) {
            return Err(RangeError::NonFinite);
        }
        if minimum > maximum {
            return Err(RangeError::Inverted { minimum, maximum });
        }
        if step < 0.0 {
            return Err(RangeError::NegativeStep(step));
        }
        let span = maximum - minimum;
        if !span.is_finite() {
            return Err(RangeError::SpanOverflow { minimum, maximum });
        }
        if step > span {
            return Err(RangeError::StepExceedsSpan { step, span });
        }
        Ok(Self {
            minimum,
            maximum,
            step,
        })
    }

    /// Create a range, repairing contract violations instead of failing.
    ///
    /// - A non-finite `minimum` becomes `0`; a non-finite `maximum` becomes `minimum`.
    /// - `maximum < minimum`, or a span that overflows, collapses to a
    ///   zero-length range pinned at `minimum`.
    /// - A negative, non-finite, or oversized step becomes `0`.
    pub fn normalized(minimum: f64, maximum: f64, step: f64) -> Self {
        let minimum = if minimum.is_finite() { minimum } else { 0.0 };
        let maximum = if maximum.is_finite()
            && maximum >= minimum
            && (maximum - minimum).is_finite()
        {
            maximum
        } else {
            minimum
        };
        let span = maximum - minimum;
        let step = if step.is_finite() && step > 0.0 && step <= span {
            step
        } else {
            0.0
        };
        Self {
            minimum,
            maximum,
            step,
        }
    }

    /// Return a repaired copy of this range (see [`Range::normalized`]).
    pub fn normalize(self) -> Self {
        Self::normalized(self.minimum, self.maximum, self.step)
    }

    /// `maximum - minimum`.
    pub fn span(&self) -> f64 {
        self.maximum - self.minimum
    }

    /// Whether the range has no extent, pinning every value at `minimum`.
    pub fn is_degenerate(&self) -> bool {
        self.maximum <= self.minimum
    }

    /// Whether values are quantized to a step lattice.
    pub fn is_stepped(&self) -> bool {
        self.step > 0.0
    }
}

/// One of the three regions measured by the host layout system.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Region {
    /// The outer box the slider is laid out in.
    Container,
    /// The visual bar the thumb moves along.
    Track,
    /// The draggable handle.
    Thumb,
}

impl Region {
    /// All regions, in measurement-independent order.
    pub const ALL: [Self; 3] = [Self::Container, Self::Track, Self::Thumb];

    /// The readiness flag corresponding to this region.
    pub const fn flag(self) -> MeasuredRegions {
        match self {
            Self::Container => MeasuredRegions::CONTAINER,
            Self::Track => MeasuredRegions::TRACK,
            Self::Thumb => MeasuredRegions::THUMB,
        }
    }
}

bitflags::bitflags! {
    /// Regions that have received at least one valid measurement.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct MeasuredRegions: u8 {
        /// The container has been measured.
        const CONTAINER = 0b0000_0001;
        /// The track has been measured.
        const TRACK     = 0b0000_0010;
        /// The thumb has been measured.
        const THUMB     = 0b0000_0100;
    }
}

/// Receives slider lifecycle events.
///
/// Every method defaults to a no-op so implementations only override what
/// they care about. [`NoHandler`] ignores everything.
pub trait SlideHandler {
    /// A drag was granted; `value` is the value at grant time.
    fn sliding_start(&mut self, value: f64) {
        let _ = value;
    }

    /// The value changed during a drag.
    fn value_change(&mut self, value: f64) {
        let _ = value;
    }

    /// A drag ended (released or terminated) at `value`.
    fn sliding_complete(&mut self, value: f64) {
        let _ = value;
    }
}

/// A handler that ignores every event.
///
/// Used by [`Slider::new`](crate::slider::Slider::new).
#[derive(Copy, Clone, Debug, Default)]
pub struct NoHandler;

impl SlideHandler for NoHandler {}

/// A lifecycle event, as recorded by [`EventLog`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SlideEvent {
    /// See [`SlideHandler::sliding_start`].
    SlidingStart(f64),
    /// See [`SlideHandler::value_change`].
    ValueChange(f64),
    /// See [`SlideHandler::sliding_complete`].
    SlidingComplete(f64),
}

/// A handler that records every event in order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventLog {
    /// Events received so far, oldest first.
    pub events: Vec<SlideEvent>,
}

impl EventLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return all recorded events.
    pub fn drain(&mut self) -> Vec<SlideEvent> {
        core::mem::take(&mut self.events)
    }
}

impl SlideHandler for EventLog {
    fn sliding_start(&mut self, value: f64) {
        self.events.push(SlideEvent::SlidingStart(value));
    }

    fn value_change(&mut self, value: f64) {
        self.events.push(SlideEvent::ValueChange(value));
    }

    fn sliding_complete(&mut self, value: f64) {
        self.events.push(SlideEvent::SlidingComplete(value));
    }
}

impl<H: SlideHandler + ?Sized> SlideHandler for &mut H {
    fn sliding_start(&mut self, value: f64) {
        (**self).sliding_start(value);
    }

    fn value_change(&mut self, value: f64) {
        (**self).value_change(value);
    }

    fn sliding_complete(&mut self, value: f64) {
        (**self).sliding_complete(value);
    }
}
