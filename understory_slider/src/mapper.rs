// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Value mapper: conversions between logical values and thumb offsets.
//!
//! ## Overview
//!
//! A [`ValueMapper`] is a small `Copy` view over a [`Range`], the measured
//! [`GeometrySnapshot`], and the layout direction. It owns the ratio math:
//!
//! - [`ValueMapper::offset`] projects a value onto the track (used for rendering).
//! - [`ValueMapper::value_from_offset`] maps a thumb offset back to a clamped,
//!   optionally quantized value (used while dragging).
//!
//! Right-to-left layouts mirror the ratio: `r` becomes `1 - r` in both directions.
//!
//! ## Degenerate inputs
//!
//! A zero-length range, an unmeasured geometry, or a thumb at least as wide as
//! its container all short-circuit to ratio `0` instead of dividing by zero.
//!
//! ```
//! use kurbo::Size;
//! use understory_slider::geometry::GeometrySnapshot;
//! use understory_slider::mapper::ValueMapper;
//! use understory_slider::types::Range;
//!
//! let geometry = GeometrySnapshot::measured(
//!     Size::new(300.0, 40.0),
//!     Size::new(300.0, 4.0),
//!     Size::new(20.0, 20.0),
//! );
//! let range = Range::new(0.0, 100.0, 10.0).unwrap();
//! let mapper = ValueMapper::new(range, geometry, false);
//!
//! assert_eq!(mapper.track_length(), 280.0);
//! assert_eq!(mapper.offset(50.0), 140.0);
//! // 133 / 280 = 0.475 → 47.5 → rounds to the 50 step.
//! assert_eq!(mapper.value_from_offset(133.0), 50.0);
//! ```

use crate::geometry::GeometrySnapshot;
use crate::types::Range;

/// Pure value ↔ offset conversions for one geometry and range.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ValueMapper {
    range: Range,
    track_length: f64,
    thumb_width: f64,
    rtl: bool,
}

impl ValueMapper {
    /// Create a mapper. `rtl` mirrors the axis for right-to-left layouts.
    pub fn new(range: Range, geometry: GeometrySnapshot, rtl: bool) -> Self {
        Self {
            range,
            track_length: geometry.track_length(),
            thumb_width: geometry.thumb.width,
            rtl,
        }
    }

    /// The range this mapper quantizes and clamps to.
    pub fn range(&self) -> Range {
        self.range
    }

    /// Whether the axis is mirrored.
    pub fn is_rtl(&self) -> bool {
        self.rtl
    }

    /// Distance the thumb travels between `minimum` and `maximum`.
    pub fn track_length(&self) -> f64 {
        self.track_length
    }

    /// Whether the track is long enough to map offsets at all.
    pub fn has_track(&self) -> bool {
        self.track_length > 0.0
    }

    /// Normalized position of `value` along the logical range.
    ///
    /// Not clamped: values outside the range produce ratios outside `[0, 1]`.
    /// Returns `0` for a degenerate range.
    pub fn ratio(&self, value: f64) -> f64 {
        if self.range.is_degenerate() {
            return 0.0;
        }
        let ratio = (value - self.range.minimum) / self.range.span();
        if ratio.is_nan() { 0.0 } else { ratio }
    }

    /// Thumb offset from the start of the container for `value`.
    pub fn offset(&self, value: f64) -> f64 {
        if !self.has_track() {
            return 0.0;
        }
        self.mirror(self.ratio(value)) * self.track_length
    }

    /// Length of the filled part of the track, up to the thumb centre.
    pub fn minimum_track_length(&self, value: f64) -> f64 {
        self.offset(value) + self.thumb_width / 2.0
    }

    /// Value for a thumb at `offset`, clamped and quantized to the range.
    ///
    /// With a step, the step count is rounded half away from zero before
    /// clamping, so a rounded value past a bound is pulled back in.
    pub fn value_from_offset(&self, offset: f64) -> f64 {
        let ratio = if self.has_track() && !offset.is_nan() {
            self.mirror(offset / self.track_length)
        } else {
            0.0
        };
        self.value_from_ratio(ratio)
    }

    /// Value at normalized position `ratio`, clamped and quantized.
    pub fn value_from_ratio(&self, ratio: f64) -> f64 {
        let Range { minimum, step, .. } = self.range;
        if self.range.is_degenerate() || ratio.is_nan() {
            return minimum;
        }
        let span = self.range.span();
        let value = if step > 0.0 {
            minimum + (ratio * span / step).round() * step
        } else {
            ratio * span + minimum
        };
        // `0 * inf` on a span that overflowed.
        self.clamp(value)
    }

    /// Clamp an externally supplied value into the range. NaN maps to `minimum`.
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            self.range.minimum
        } else {
            value.clamp(self.range.minimum, self.range.maximum)
        }
    }

    fn mirror(&self, ratio: f64) -> f64 {
        if self.rtl { 1.0 - ratio } else { ratio }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Size;

    fn geometry(container: f64, thumb: f64) -> GeometrySnapshot {
        GeometrySnapshot::measured(
            Size::new(container, 40.0),
            Size::new(container, 4.0),
            Size::new(thumb, 20.0),
        )
    }

    fn unit() -> Range {
        Range::default()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn offsets_at_bounds() {
        let m = ValueMapper::new(unit(), geometry(300.0, 20.0), false);
        assert_eq!(m.offset(0.0), 0.0);
        assert_eq!(m.offset(1.0), 280.0);

        let m = ValueMapper::new(unit(), geometry(300.0, 20.0), true);
        assert_eq!(m.offset(0.0), 280.0);
        assert_eq!(m.offset(1.0), 0.0);
    }

    #[test]
    fn continuous_drag_to_midpoint() {
        let m = ValueMapper::new(unit(), geometry(300.0, 20.0), false);
        assert!(close(m.value_from_offset(140.0), 0.5));
    }

    #[test]
    fn stepped_rounds_to_nearest_step() {
        let range = Range::new(0.0, 100.0, 10.0).unwrap();
        let m = ValueMapper::new(range, geometry(300.0, 20.0), false);
        assert_eq!(m.value_from_offset(133.0), 50.0);
        assert_eq!(m.value_from_offset(125.0), 40.0);
        assert_eq!(m.value_from_offset(0.0), 0.0);
        assert_eq!(m.value_from_offset(280.0), 100.0);
    }

    #[test]
    fn step_rounding_is_half_away_from_zero() {
        // ratio 0.25 over [0, 4] with step 2 → 0.5 steps → rounds up to 1 step.
        let range = Range::new(0.0, 4.0, 2.0).unwrap();
        let m = ValueMapper::new(range, geometry(120.0, 20.0), false);
        assert_eq!(m.value_from_offset(25.0), 2.0);
        // Negative offsets round away from zero, then clamp back to minimum.
        assert_eq!(m.value_from_offset(-25.0), 0.0);
    }

    #[test]
    fn rounded_value_past_bound_is_clamped() {
        // Span 10 with step 4: lattice 0, 4, 8, 12; 12 is pulled back to 10.
        let range = Range::new(0.0, 10.0, 4.0).unwrap();
        let m = ValueMapper::new(range, geometry(120.0, 20.0), false);
        assert_eq!(m.value_from_offset(100.0), 10.0);
        assert_eq!(m.value_from_offset(95.0), 8.0);
    }

    #[test]
    fn rtl_mirrors_drag() {
        let m = ValueMapper::new(unit(), geometry(300.0, 20.0), true);
        // Raw ratio 0.3 → effective 0.7.
        assert!(close(m.value_from_offset(0.3 * 280.0), 0.7));
    }

    #[test]
    fn clamps_far_outside_track() {
        let range = Range::new(-5.0, 5.0, 0.0).unwrap();
        let m = ValueMapper::new(range, geometry(300.0, 20.0), false);
        assert_eq!(m.value_from_offset(1e12), 5.0);
        assert_eq!(m.value_from_offset(-1e12), -5.0);
        assert_eq!(m.value_from_offset(f64::INFINITY), 5.0);
        assert_eq!(m.value_from_offset(f64::NEG_INFINITY), -5.0);
        assert_eq!(m.value_from_offset(f64::NAN), -5.0);
    }

    #[test]
    fn degenerate_range_pins_minimum() {
        let range = Range::normalized(3.0, 3.0, 0.0);
        let m = ValueMapper::new(range, geometry(300.0, 20.0), false);
        assert_eq!(m.ratio(3.0), 0.0);
        assert_eq!(m.offset(3.0), 0.0);
        assert_eq!(m.value_from_offset(200.0), 3.0);
    }

    #[test]
    fn invalid_track_is_ratio_zero() {
        let m = ValueMapper::new(unit(), GeometrySnapshot::default(), false);
        assert!(!m.has_track());
        assert_eq!(m.offset(0.7), 0.0);
        assert_eq!(m.value_from_offset(50.0), 0.0);

        // Thumb wider than its container.
        let m = ValueMapper::new(unit(), geometry(10.0, 20.0), true);
        assert_eq!(m.track_length(), -10.0);
        assert_eq!(m.offset(1.0), 0.0);
        assert_eq!(m.value_from_offset(5.0), 0.0);
    }

    #[test]
    fn minimum_track_reaches_thumb_centre() {
        let m = ValueMapper::new(unit(), geometry(300.0, 20.0), false);
        assert_eq!(m.minimum_track_length(0.0), 10.0);
        assert_eq!(m.minimum_track_length(1.0), 290.0);
    }

    #[test]
    fn clamp_external_values() {
        let range = Range::new(0.0, 10.0, 0.0).unwrap();
        let m = ValueMapper::new(range, geometry(300.0, 20.0), false);
        assert_eq!(m.clamp(12.0), 10.0);
        assert_eq!(m.clamp(-1.0), 0.0);
        assert_eq!(m.clamp(f64::NAN), 0.0);
        assert_eq!(m.clamp(4.5), 4.5);
    }

    #[test]
    fn unrepresentable_span_never_yields_nan() {
        // Built directly, bypassing validation.
        let range = Range {
            minimum: -f64::MAX,
            maximum: f64::MAX,
            step: 0.0,
        };
        let m = ValueMapper::new(range, geometry(300.0, 20.0), false);
        for offset in [0.0, 140.0, 280.0, f64::INFINITY] {
            assert!(!m.value_from_offset(offset).is_nan(), "offset {offset}");
        }
        assert_eq!(m.value_from_ratio(0.0), -f64::MAX);
    }
}
