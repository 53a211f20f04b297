// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch-target geometry: an enlarged, invisible hit region around the thumb.
//!
//! Small thumbs are hard to grab. The slider extends its hit-testable view
//! beyond the container by the *overflow* (how much the configured touch target
//! exceeds the thumb horizontally and the container vertically) and centres a
//! touch-target-sized rect over the thumb inside that extended view.
//!
//! Coordinates of [`TouchTargetGeometry::rect`] are relative to the extended
//! view, whose origin sits `overflow / 2` above and to the left of the container.

use kurbo::{Insets, Point, Rect, Size};

use crate::geometry::{GeometrySnapshot, contains_point_inclusive};

/// Hit-test geometry for one thumb position.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TouchTargetGeometry {
    /// How far the touch target exceeds the thumb (width) and container (height).
    pub overflow: Size,
    /// The hit-testable rect, centred over the thumb.
    pub rect: Rect,
}

impl TouchTargetGeometry {
    /// Compute the touch geometry for a thumb at `thumb_offset`.
    ///
    /// The overflow is zero until every region has been measured.
    pub fn compute(geometry: &GeometrySnapshot, touch_target: Size, thumb_offset: f64) -> Self {
        let overflow = touch_overflow(geometry, touch_target);
        let origin = Point::new(
            overflow.width / 2.0 + thumb_offset + (geometry.thumb.width - touch_target.width) / 2.0,
            overflow.height / 2.0 + (geometry.container.height - touch_target.height) / 2.0,
        );
        Self {
            overflow,
            rect: Rect::from_origin_size(origin, touch_target),
        }
    }

    /// Whether `pt` (in extended-view coordinates) lands on the thumb's touch rect.
    pub fn hit_test(&self, pt: Point) -> bool {
        contains_point_inclusive(self.rect, pt)
    }

    /// How far the extended view reaches past the container on each side.
    pub fn overflow_insets(&self) -> Insets {
        Insets::uniform_xy(self.overflow.width / 2.0, self.overflow.height / 2.0)
    }
}

/// Amount by which `touch_target` exceeds the thumb width and container height.
pub fn touch_overflow(geometry: &GeometrySnapshot, touch_target: Size) -> Size {
    if !geometry.all_measured {
        return Size::ZERO;
    }
    Size::new(
        (touch_target.width - geometry.thumb.width).max(0.0),
        (touch_target.height - geometry.container.height).max(0.0),
    )
}
