// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Value holder: the live slider value, immediate and animated writes, and listeners.
//!
//! ## Overview
//!
//! [`ValueHolder`] is the single source of truth for the value the slider
//! currently shows. Writes are either immediate ([`ValueHolder::set_immediate`])
//! or animated ([`ValueHolder::set_animated`]). Animated writes advance when
//! the host calls [`ValueHolder::tick`] once per frame.
//!
//! Listeners registered with [`ValueHolder::add_listener`] run synchronously
//! whenever the value changes, including on every intermediate animation frame.
//! They receive only the new value, so they cannot write back into the holder
//! while it is notifying.
//!
//! ## Superseding
//!
//! Only one animation is in flight. Starting another animation, or writing
//! immediately, replaces it; the replacement starts from the latest reading.
//!
//! ```
//! use core::time::Duration;
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use understory_slider::animation::AnimationConfig;
//! use understory_slider::value::ValueHolder;
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let mut holder = ValueHolder::new(0.0);
//! let sink = Rc::clone(&seen);
//! holder.add_listener(move |v| sink.borrow_mut().push(v));
//!
//! holder.set_animated(1.0, &AnimationConfig::timing());
//! let mut now = Duration::ZERO;
//! while holder.tick(now) {
//!     now += Duration::from_millis(16);
//! }
//! assert_eq!(holder.value(), 1.0);
//! assert!(seen.borrow().len() > 2);
//! ```

use core::fmt;
use core::time::Duration;

use crate::animation::{Animation, AnimationConfig, Animator, BuiltinAnimator};

/// Handle returned by [`ValueHolder::add_listener`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(f64)>;

#[derive(Debug)]
struct Active {
    animation: Box<dyn Animation>,
    // Anchored on the first tick after the animation starts.
    started_at: Option<Duration>,
}

/// Holds the current value and drives transitions towards a target.
pub struct ValueHolder {
    value: f64,
    target: f64,
    animator: Box<dyn Animator>,
    active: Option<Active>,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl fmt::Debug for ValueHolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueHolder")
            .field("value", &self.value)
            .field("target", &self.target)
            .field("animator", &self.animator)
            .field("animating", &self.active.is_some())
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl Default for ValueHolder {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl ValueHolder {
    /// Create a holder at `initial` using the [`BuiltinAnimator`].
    pub fn new(initial: f64) -> Self {
        Self::with_animator(initial, Box::new(BuiltinAnimator))
    }

    /// Create a holder at `initial` with a custom animation capability.
    pub fn with_animator(initial: f64, animator: Box<dyn Animator>) -> Self {
        Self {
            value: initial,
            target: initial,
            animator,
            active: None,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// The last value delivered to listeners.
    ///
    /// During an animation this lags the settled target; it never waits for a
    /// pending frame.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// The value the holder is heading to (equal to [`value`](Self::value) when idle).
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Whether an animation is in flight.
    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    /// Write `value` now, cancelling any animation, and notify listeners if it changed.
    pub fn set_immediate(&mut self, value: f64) {
        if self.active.take().is_some() {
            tracing::trace!(value, "immediate write cancels animation");
        }
        self.target = value;
        self.store(value);
    }

    /// Animate from the current reading to `value`.
    ///
    /// Replaces any animation in flight. Nothing moves until the next [`tick`](Self::tick).
    pub fn set_animated(&mut self, value: f64, config: &AnimationConfig) {
        let spec = config.resolve();
        if let Some(prev) = self.active.take() {
            tracing::debug!(
                from = self.value,
                old_target = self.target,
                new_target = value,
                anchored = prev.started_at.is_some(),
                "superseding slider animation"
            );
        }
        self.target = value;
        if self.value == value {
            return;
        }
        tracing::debug!(from = self.value, to = value, ?spec, "starting slider animation");
        self.active = Some(Active {
            animation: self.animator.start(self.value, value, &spec),
            started_at: None,
        });
    }

    /// Advance the running animation to host time `now`.
    ///
    /// Returns `true` while an animation is still running. The first tick after
    /// [`set_animated`](Self::set_animated) anchors the animation clock.
    pub fn tick(&mut self, now: Duration) -> bool {
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        let start = *active.started_at.get_or_insert(now);
        let sample = active.animation.sample(now.saturating_sub(start));
        if sample.finished {
            self.active = None;
            let target = self.target;
            self.store(target);
            tracing::trace!(value = target, "slider animation settled");
            false
        } else {
            self.store(sample.value);
            true
        }
    }

    /// Register a listener called with every new value.
    pub fn add_listener(&mut self, listener: impl FnMut(f64) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(l, _)| *l != id);
        self.listeners.len() != before
    }

    fn store(&mut self, value: f64) {
        if self.value == value {
            return;
        }
        self.value = value;
        for (_, listener) in &mut self.listeners {
            listener(value);
        }
    }
}
