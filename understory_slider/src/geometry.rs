// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry store: the three measured regions and their readiness.
//!
//! ## Overview
//!
//! The host layout system reports sizes asynchronously and in any order.
//! [`GeometryStore::measure`] records them, ignoring redundant reports, and
//! derives [`GeometrySnapshot::all_measured`] once every region has a valid size.
//!
//! ```
//! use understory_slider::geometry::GeometryStore;
//! use understory_slider::types::Region;
//!
//! let mut store = GeometryStore::new();
//! assert!(store.measure(Region::Container, 300.0, 40.0));
//! assert!(store.measure(Region::Track, 300.0, 4.0));
//! assert!(!store.snapshot().all_measured);
//! assert!(store.measure(Region::Thumb, 20.0, 20.0));
//! assert!(store.snapshot().all_measured);
//!
//! // Same size again: nothing to do.
//! assert!(!store.measure(Region::Thumb, 20.0, 20.0));
//! ```

use kurbo::{Point, Rect, Size};

use crate::types::{MeasuredRegions, Region};

/// Whether `rect` contains `pt`, inclusive on all four edges.
///
/// Unlike [`Rect::contains`], points on the right and bottom edges count as inside.
pub fn contains_point_inclusive(rect: Rect, pt: Point) -> bool {
    let rect = rect.abs();
    pt.x >= rect.x0 && pt.y >= rect.y0 && pt.x <= rect.x1 && pt.y <= rect.y1
}

/// A copy of the measured geometry at one point in time.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct GeometrySnapshot {
    /// Size of the outer container.
    pub container: Size,
    /// Size of the track.
    pub track: Size,
    /// Size of the thumb.
    pub thumb: Size,
    /// True once all three regions have been measured at least once.
    pub all_measured: bool,
}

impl GeometrySnapshot {
    /// Build a fully measured snapshot from known sizes.
    pub fn measured(container: Size, track: Size, thumb: Size) -> Self {
        Self {
            container,
            track,
            thumb,
            all_measured: true,
        }
    }

    /// Horizontal distance the thumb can travel: `container.width - thumb.width`.
    ///
    /// May be zero or negative for unmeasured or degenerate layouts.
    pub fn track_length(&self) -> f64 {
        self.container.width - self.thumb.width
    }

    /// Size of the given region.
    pub fn size(&self, region: Region) -> Size {
        match region {
            Region::Container => self.container,
            Region::Track => self.track,
            Region::Thumb => self.thumb,
        }
    }
}

/// Holds the most recent measurement of each [`Region`].
#[derive(Clone, Debug, Default)]
pub struct GeometryStore {
    container: Size,
    track: Size,
    thumb: Size,
    measured: MeasuredRegions,
    all_measured: bool,
    revision: u64,
}

impl GeometryStore {
    /// Create a store with every region unmeasured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a measurement for `region`.
    ///
    /// Returns `true` if the stored geometry changed. Reporting the same size
    /// twice, or a non-finite size, is a no-op.
    ///
    /// A region only counts towards [`GeometrySnapshot::all_measured`] once it
    /// has been reported with a strictly positive width and height. Readiness,
    /// once reached, is kept even if a later report shrinks a region to zero.
    pub fn measure(&mut self, region: Region, width: f64, height: f64) -> bool {
        if !(width.is_finite() && height.is_finite()) {
            tracing::trace!(?region, width, height, "ignoring non-finite measurement");
            return false;
        }
        let size = Size::new(width, height);
        let slot = match region {
            Region::Container => &mut self.container,
            Region::Track => &mut self.track,
            Region::Thumb => &mut self.thumb,
        };
        if *slot == size {
            return false;
        }
        *slot = size;
        if is_valid(size) {
            self.measured |= region.flag();
        }
        self.revision += 1;

        if !self.all_measured && self.measured.is_all() {
            self.all_measured = true;
            tracing::debug!(
                container = ?self.container,
                track = ?self.track,
                thumb = ?self.thumb,
                "slider geometry ready"
            );
        } else {
            tracing::trace!(?region, width, height, "slider region measured");
        }
        true
    }

    /// Regions that have received a valid measurement.
    pub fn measured(&self) -> MeasuredRegions {
        self.measured
    }

    /// Whether every region has been measured.
    pub fn is_ready(&self) -> bool {
        self.all_measured
    }

    /// Number of measurements that changed the stored geometry.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The current geometry.
    pub fn snapshot(&self) -> GeometrySnapshot {
        GeometrySnapshot {
            container: self.container,
            track: self.track,
            thumb: self.thumb,
            all_measured: self.all_measured,
        }
    }
}

fn is_valid(size: Size) -> bool {
    size.width > 0.0 && size.height > 0.0
}
