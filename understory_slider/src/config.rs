// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slider configuration, owned by the caller and read by the engine.
//!
//! [`SliderConfig::validate`] reports contract violations as a
//! [`ConfigError`]. The engine itself never rejects a configuration; it
//! applies [`SliderConfig::normalized`] so that a misconfigured slider renders
//! stuck rather than failing.
//!
//! ```
//! use kurbo::Size;
//! use understory_slider::config::SliderConfig;
//! use understory_slider::types::Range;
//!
//! let config = SliderConfig::default()
//!     .with_range(Range::new(0.0, 100.0, 5.0).unwrap())
//!     .with_value(25.0)
//!     .with_touch_target(Size::new(48.0, 48.0));
//! assert!(config.validate().is_ok());
//! ```

use kurbo::Size;
use thiserror::Error;

use crate::animation::AnimationConfig;
use crate::types::{Range, RangeError};

/// Default size of the invisible hit region around the thumb.
pub const DEFAULT_TOUCH_TARGET: Size = Size::new(40.0, 40.0);

/// Errors reported by [`SliderConfig::validate`].
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    /// The range is malformed.
    #[error("invalid range: {0}")]
    Range(#[from] RangeError),
    /// The initial value is NaN or infinite.
    #[error("value {0} is not finite")]
    NonFiniteValue(f64),
    /// The touch target has a negative or non-finite dimension.
    #[error("touch target {0:?} must be finite and non-negative")]
    InvalidTouchTarget(Size),
    /// A spring override would not converge.
    #[error("invalid animation parameter {name} = {value}")]
    InvalidAnimation {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },
}

/// Everything the caller controls about a slider.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SliderConfig {
    /// Selectable range and step.
    pub range: Range,
    /// Controlled value. Changes are applied with or without animation
    /// depending on [`animate_transitions`](Self::animate_transitions).
    pub value: f64,
    /// Whether drags are ignored.
    pub disabled: bool,
    /// Minimum size of the hit region around the thumb.
    pub touch_target: Size,
    /// Animation used for controlled value changes.
    pub animation: AnimationConfig,
    /// Animate controlled value changes instead of jumping.
    pub animate_transitions: bool,
    /// Mirror the axis for right-to-left layouts.
    pub rtl: bool,
    /// Expose the touch rect for a debug overlay.
    pub debug_touch_area: bool,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            range: Range::default(),
            value: 0.0,
            disabled: false,
            touch_target: DEFAULT_TOUCH_TARGET,
            animation: AnimationConfig::default(),
            animate_transitions: false,
            rtl: false,
            debug_touch_area: false,
        }
    }
}

impl SliderConfig {
    /// Set the range.
    pub fn with_range(mut self, range: Range) -> Self {
        self.range = range;
        self
    }

    /// Set the controlled value.
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    /// Enable or disable dragging.
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set the touch target size.
    pub fn with_touch_target(mut self, size: Size) -> Self {
        self.touch_target = size;
        self
    }

    /// Set the animation used for controlled value changes.
    pub fn with_animation(mut self, animation: AnimationConfig) -> Self {
        self.animation = animation;
        self
    }

    /// Animate controlled value changes.
    pub fn with_animate_transitions(mut self, animate: bool) -> Self {
        self.animate_transitions = animate;
        self
    }

    /// Use a right-to-left axis.
    pub fn with_rtl(mut self, rtl: bool) -> Self {
        self.rtl = rtl;
        self
    }

    /// Expose the touch rect for debugging.
    pub fn with_debug_touch_area(mut self, debug: bool) -> Self {
        self.debug_touch_area = debug;
        self
    }

    /// Check the configuration against the slider's contract.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let r = self.range;
        Range::new(r.minimum, r.maximum, r.step)?;
        if !self.value.is_finite() {
            return Err(ConfigError::NonFiniteValue(self.value));
        }
        if !valid_touch_target(self.touch_target) {
            return Err(ConfigError::InvalidTouchTarget(self.touch_target));
        }
        if let Some(friction) = self.animation.friction
            && !(friction.is_finite() && friction >= 0.0)
        {
            return Err(ConfigError::InvalidAnimation {
                name: "friction",
                value: friction,
            });
        }
        if let Some(tension) = self.animation.tension
            && !(tension.is_finite() && tension > 0.0)
        {
            return Err(ConfigError::InvalidAnimation {
                name: "tension",
                value: tension,
            });
        }
        Ok(())
    }

    /// Repair contract violations.
    ///
    /// - The range is normalized (see [`Range::normalized`]).
    /// - The value is clamped into the range; NaN becomes `minimum`.
    /// - An invalid touch target falls back to [`DEFAULT_TOUCH_TARGET`].
    /// - Invalid spring overrides are dropped in favour of the defaults.
    pub fn normalized(self) -> Self {
        let range = self.range.normalize();
        let value = if self.value.is_nan() {
            range.minimum
        } else {
            self.value.clamp(range.minimum, range.maximum)
        };
        let touch_target = if valid_touch_target(self.touch_target) {
            self.touch_target
        } else {
            DEFAULT_TOUCH_TARGET
        };
        let mut animation = self.animation;
        animation.friction = animation
            .friction
            .filter(|f| f.is_finite() && *f >= 0.0);
        animation.tension = animation.tension.filter(|t| t.is_finite() && *t > 0.0);
        Self {
            range,
            value,
            touch_target,
            animation,
            ..self
        }
    }
}

fn valid_touch_target(size: Size) -> bool {
    size.width.is_finite() && size.height.is_finite() && size.width >= 0.0 && size.height >= 0.0
}
