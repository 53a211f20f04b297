// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slider engine: gesture arbitration, value updates, and the render snapshot.
//!
//! ## Gesture lifecycle
//!
//! The host pointer dispatcher drives a two-state machine, `Idle → Dragging → Idle`:
//!
//! 1) [`Slider::on_gesture_start`] hit-tests the press against the thumb's
//!    [touch rect](crate::touch). On success the gesture is granted: the thumb
//!    offset is anchored and [`SlideHandler::sliding_start`] fires.
//! 2) [`Slider::on_gesture_move`] receives the cumulative displacement since
//!    the grant, writes the new value immediately, and fires
//!    [`SlideHandler::value_change`].
//! 3) [`Slider::on_gesture_end`] (or [`Slider::on_gesture_terminate`]) writes
//!    the final value, fires [`SlideHandler::sliding_complete`], and returns to idle.
//!
//! Moves never claim a gesture ([`Slider::on_move_should_set`]) and an active
//! drag is never ceded to a competing responder ([`Slider::on_termination_request`]).
//!
//! While [disabled](crate::config::SliderConfig::disabled), grants still
//! anchor the drag but moves and releases change nothing and fire nothing.
//!
//! ## Example
//!
//! ```
//! use understory_slider::config::SliderConfig;
//! use understory_slider::slider::Slider;
//! use understory_slider::types::{EventLog, Region, SlideEvent};
//!
//! let mut slider = Slider::with_handler(SliderConfig::default(), EventLog::new());
//! slider.measure(Region::Container, 300.0, 40.0);
//! slider.measure(Region::Track, 300.0, 4.0);
//! slider.measure(Region::Thumb, 20.0, 20.0);
//!
//! // Press on the thumb (at the start of the track), then drag halfway.
//! assert!(slider.on_gesture_start(20.0, 20.0));
//! slider.on_gesture_move(70.0);
//! slider.on_gesture_end(140.0);
//!
//! assert_eq!(slider.current_value(), 0.5);
//! assert_eq!(slider.thumb_offset(), 140.0);
//! assert_eq!(
//!     slider.handler_mut().drain(),
//!     vec![
//!         SlideEvent::SlidingStart(0.0),
//!         SlideEvent::ValueChange(0.25),
//!         SlideEvent::SlidingComplete(0.5),
//!     ]
//! );
//! ```

use core::time::Duration;

use kurbo::{Point, Rect, Size};

use crate::animation::Animator;
use crate::config::SliderConfig;
use crate::geometry::{GeometrySnapshot, GeometryStore};
use crate::mapper::ValueMapper;
use crate::touch::TouchTargetGeometry;
use crate::types::{NoHandler, Region, SlideHandler};
use crate::value::{ListenerId, ValueHolder};

/// Per-gesture state, created on grant and discarded on release.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DragSession {
    /// Thumb offset at grant time; drags are relative to it.
    pub previous_thumb_offset: f64,
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum GestureState {
    Idle,
    Dragging(DragSession),
}

/// Everything the rendering layer needs for one frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SliderLayout {
    /// Whether all regions are measured. Value-dependent parts should stay
    /// hidden until this is true.
    pub visible: bool,
    /// Current value.
    pub value: f64,
    /// Thumb offset from the container's leading edge.
    pub thumb_offset: f64,
    /// Thumb rect in container coordinates, vertically centred.
    pub thumb_rect: Rect,
    /// Length of the filled track, up to the thumb centre.
    pub minimum_track_length: f64,
    /// Hit-test rect in extended-view coordinates (see [`crate::touch`]).
    pub touch_rect: Rect,
    /// Extension of the hit-testable view beyond the container.
    pub touch_overflow: Size,
    /// The touch rect, when a debug overlay was requested.
    pub debug_touch_rect: Option<Rect>,
}

/// An interactive range slider.
///
/// `H` receives lifecycle events; see [`SlideHandler`].
pub struct Slider<H: SlideHandler = NoHandler> {
    config: SliderConfig,
    geometry: GeometryStore,
    holder: ValueHolder,
    handler: H,
    gesture: GestureState,
    // Last controlled value seen, before clamping.
    controlled: f64,
}

impl<H: SlideHandler + core::fmt::Debug> core::fmt::Debug for Slider<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Slider")
            .field("config", &self.config)
            .field("geometry", &self.geometry)
            .field("holder", &self.holder)
            .field("handler", &self.handler)
            .field("gesture", &self.gesture)
            .finish_non_exhaustive()
    }
}

impl Slider<NoHandler> {
    /// Create a slider that reports no lifecycle events.
    pub fn new(config: SliderConfig) -> Self {
        Self::with_handler(config, NoHandler)
    }
}

impl<H: SlideHandler> Slider<H> {
    /// Create a slider reporting lifecycle events to `handler`.
    pub fn with_handler(config: SliderConfig, handler: H) -> Self {
        let normalized = normalize_config(config);
        Self::from_parts(config, normalized, handler, ValueHolder::new(normalized.value))
    }

    /// Create a slider with a custom animation capability.
    pub fn with_animator(config: SliderConfig, handler: H, animator: Box<dyn Animator>) -> Self {
        let normalized = normalize_config(config);
        let holder = ValueHolder::with_animator(normalized.value, animator);
        Self::from_parts(config, normalized, handler, holder)
    }

    fn from_parts(raw: SliderConfig, config: SliderConfig, handler: H, holder: ValueHolder) -> Self {
        Self {
            config,
            geometry: GeometryStore::new(),
            holder,
            handler,
            gesture: GestureState::Idle,
            controlled: raw.value,
        }
    }

    /// The active (normalized) configuration.
    pub fn config(&self) -> &SliderConfig {
        &self.config
    }

    /// Replace the configuration.
    ///
    /// A changed controlled value is applied as by [`set_value`](Self::set_value).
    /// A changed range re-clamps the current value.
    pub fn set_config(&mut self, config: SliderConfig) {
        let value = config.value;
        self.config = normalize_config(config);
        let clamped = self.mapper().clamp(self.holder.value());
        if clamped != self.holder.value() && !self.holder.is_animating() {
            self.holder.set_immediate(clamped);
        }
        self.set_value(value);
    }

    /// Apply an externally controlled value.
    ///
    /// Ignored when equal to the previous controlled value. Otherwise the value
    /// is clamped into the range and animated if
    /// [`animate_transitions`](SliderConfig::animate_transitions) is set, or
    /// written immediately.
    pub fn set_value(&mut self, value: f64) {
        if value == self.controlled {
            return;
        }
        self.controlled = value;
        let target = self.mapper().clamp(value);
        self.config.value = target;
        if self.config.animate_transitions {
            self.holder.set_animated(target, &self.config.animation);
        } else {
            self.holder.set_immediate(target);
        }
    }

    /// Enable or disable dragging. Takes effect for the next move or release.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.config.disabled = disabled;
    }

    /// Whether dragging is disabled.
    pub fn is_disabled(&self) -> bool {
        self.config.disabled
    }

    /// The lifecycle handler.
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Mutable access to the lifecycle handler.
    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// Consume the slider and return its handler.
    pub fn into_handler(self) -> H {
        self.handler
    }

    /// Record a layout measurement. Returns `true` if the geometry changed.
    pub fn measure(&mut self, region: Region, width: f64, height: f64) -> bool {
        self.geometry.measure(region, width, height)
    }

    /// The current geometry.
    pub fn geometry(&self) -> GeometrySnapshot {
        self.geometry.snapshot()
    }

    /// A value mapper for the current geometry and configuration.
    pub fn mapper(&self) -> ValueMapper {
        ValueMapper::new(self.config.range, self.geometry.snapshot(), self.config.rtl)
    }

    /// The live value, including animation progress.
    pub fn current_value(&self) -> f64 {
        self.holder.value()
    }

    /// Thumb offset for the live value.
    pub fn thumb_offset(&self) -> f64 {
        self.mapper().offset(self.current_value())
    }

    /// Hit-test geometry for the thumb at its live position.
    pub fn touch_geometry(&self) -> TouchTargetGeometry {
        TouchTargetGeometry::compute(
            &self.geometry.snapshot(),
            self.config.touch_target,
            self.thumb_offset(),
        )
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture, GestureState::Dragging(_))
    }

    /// The active drag, if any.
    pub fn drag_session(&self) -> Option<DragSession> {
        match self.gesture {
            GestureState::Dragging(session) => Some(session),
            GestureState::Idle => None,
        }
    }

    /// Decide whether a press at `(x, y)` starts a drag, and grant it if so.
    ///
    /// `(x, y)` is in the extended-view coordinates of [`crate::touch`].
    /// Presses are rejected before the geometry is ready, outside the touch
    /// rect, or while another drag is active.
    pub fn on_gesture_start(&mut self, x: f64, y: f64) -> bool {
        if self.is_dragging() {
            tracing::debug!(x, y, "press ignored: drag already active");
            return false;
        }
        if !self.geometry.is_ready() {
            tracing::debug!(x, y, "press ignored: geometry not measured");
            return false;
        }
        if !self.touch_geometry().hit_test(Point::new(x, y)) {
            tracing::trace!(x, y, "press missed the thumb");
            return false;
        }
        self.grant();
        true
    }

    fn grant(&mut self) {
        let value = self.current_value();
        let session = DragSession {
            previous_thumb_offset: self.thumb_offset(),
        };
        tracing::debug!(
            value,
            offset = session.previous_thumb_offset,
            disabled = self.config.disabled,
            "slider drag granted"
        );
        self.gesture = GestureState::Dragging(session);
        self.handler.sliding_start(value);
    }

    /// Whether a move should claim the gesture. Always `false`: only presses
    /// on the thumb start a drag.
    pub fn on_move_should_set(&self) -> bool {
        false
    }

    /// Handle a drag move with cumulative displacement `dx` since the grant.
    pub fn on_gesture_move(&mut self, dx: f64) {
        let GestureState::Dragging(session) = self.gesture else {
            return;
        };
        if self.config.disabled {
            return;
        }
        let value = self.value_for_drag(&session, dx);
        self.holder.set_immediate(value);
        self.handler.value_change(value);
    }

    /// Handle the release of a drag with cumulative displacement `dx`.
    pub fn on_gesture_end(&mut self, dx: f64) {
        let GestureState::Dragging(session) = self.gesture else {
            return;
        };
        self.gesture = GestureState::Idle;
        if self.config.disabled {
            tracing::debug!("slider drag released while disabled");
            return;
        }
        let value = self.value_for_drag(&session, dx);
        tracing::debug!(value, "slider drag complete");
        self.holder.set_immediate(value);
        self.handler.sliding_complete(value);
    }

    /// Whether a competing responder may take over. Refused while dragging.
    pub fn on_termination_request(&self) -> bool {
        !self.is_dragging()
    }

    /// Handle a forced termination; behaves exactly like a release.
    pub fn on_gesture_terminate(&mut self, dx: f64) {
        if self.is_dragging() {
            tracing::debug!("slider drag terminated by host");
        }
        self.on_gesture_end(dx);
    }

    fn value_for_drag(&self, session: &DragSession, dx: f64) -> f64 {
        let dx = if dx.is_nan() { 0.0 } else { dx };
        self.mapper()
            .value_from_offset(session.previous_thumb_offset + dx)
    }

    /// Advance any value animation to host time `now`. Returns `true` while animating.
    pub fn tick(&mut self, now: Duration) -> bool {
        self.holder.tick(now)
    }

    /// Whether a value animation is in flight.
    pub fn is_animating(&self) -> bool {
        self.holder.is_animating()
    }

    /// Register a listener for every value change, including animation frames.
    pub fn add_listener(&mut self, listener: impl FnMut(f64) + 'static) -> ListenerId {
        self.holder.add_listener(listener)
    }

    /// Remove a listener.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.holder.remove_listener(id)
    }

    /// Snapshot of everything needed to position the slider's visuals.
    pub fn layout(&self) -> SliderLayout {
        let geometry = self.geometry.snapshot();
        let mapper = self.mapper();
        let value = self.current_value();
        let thumb_offset = mapper.offset(value);
        let touch =
            TouchTargetGeometry::compute(&geometry, self.config.touch_target, thumb_offset);
        let thumb_origin = Point::new(
            thumb_offset,
            (geometry.container.height - geometry.thumb.height) / 2.0,
        );
        SliderLayout {
            visible: geometry.all_measured,
            value,
            thumb_offset,
            thumb_rect: Rect::from_origin_size(thumb_origin, geometry.thumb),
            minimum_track_length: mapper.minimum_track_length(value),
            touch_rect: touch.rect,
            touch_overflow: touch.overflow,
            debug_touch_rect: self.config.debug_touch_area.then_some(touch.rect),
        }
    }
}

fn normalize_config(config: SliderConfig) -> SliderConfig {
    if let Err(err) = config.validate() {
        tracing::warn!(%err, "repairing slider configuration");
    }
    config.normalized()
}
