// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animation capability: spring and timing transitions for the slider value.
//!
//! ## Overview
//!
//! The [value holder](crate::value::ValueHolder) does not own a tweening
//! engine. It asks an injected [`Animator`] for an [`Animation`] and samples
//! it once per host frame. [`BuiltinAnimator`] provides the two kinds a slider
//! needs:
//!
//! - **Timing**: eased interpolation over a fixed duration, after an optional delay.
//! - **Spring**: a damped harmonic oscillator parameterized by friction and tension.
//!
//! ## Configuration
//!
//! [`AnimationConfig`] selects the kind and carries per-field overrides.
//! [`AnimationConfig::resolve`] merges the overrides over the kind's defaults
//! field by field, so overriding only `tension` keeps the default `friction`.
//!
//! ```
//! use core::time::Duration;
//! use understory_slider::animation::{AnimationConfig, AnimationSpec, Easing};
//!
//! let spec = AnimationConfig::spring().with_tension(40.0).resolve();
//! let AnimationSpec::Spring(spring) = spec else { unreachable!() };
//! assert_eq!(spring.friction, 7.0);
//! assert_eq!(spring.tension, 40.0);
//!
//! let spec = AnimationConfig::timing().with_delay(Duration::from_millis(20)).resolve();
//! let AnimationSpec::Timing(timing) = spec else { unreachable!() };
//! assert_eq!(timing.duration, Duration::from_millis(150));
//! assert_eq!(timing.easing, Easing::EaseInOut);
//! ```

use core::fmt::Debug;
use core::time::Duration;

/// Easing curves for timing animations.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    /// No easing.
    Linear,
    /// CSS `ease`.
    Ease,
    /// Cubic ease in.
    EaseIn,
    /// Cubic ease out.
    EaseOut,
    /// Cubic ease in and out.
    EaseInOut,
    /// Arbitrary cubic bezier with control points `(x1, y1)` and `(x2, y2)`.
    CubicBezier(f64, f64, f64, f64),
}

impl Easing {
    /// Map a linear progress fraction in `[0, 1]` to an eased fraction.
    pub fn transform(&self, fraction: f64) -> f64 {
        match *self {
            Self::Linear => fraction.clamp(0.0, 1.0),
            Self::Ease => cubic_bezier(0.25, 0.1, 0.25, 1.0, fraction),
            Self::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, fraction),
            Self::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, fraction),
            Self::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, fraction),
            Self::CubicBezier(x1, y1, x2, y2) => cubic_bezier(x1, y1, x2, y2, fraction),
        }
    }
}

fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, fraction: f64) -> f64 {
    if fraction.is_nan() || fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;

    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    let sample = |a: f64, b: f64, c: f64, t: f64| ((a * t + b) * t + c) * t;
    let slope = |a: f64, b: f64, c: f64, t: f64| (3.0 * a * t + 2.0 * b) * t + c;

    // Solve x(t) = fraction with Newton-Raphson, then bisect if it stalls.
    let mut t = fraction;
    let mut solved = false;
    for _ in 0..8 {
        let x = sample(ax, bx, cx, t) - fraction;
        if x.abs() < 1e-7 {
            solved = true;
            break;
        }
        let d = slope(ax, bx, cx, t);
        if d.abs() < 1e-7 {
            break;
        }
        t = (t - x / d).clamp(0.0, 1.0);
    }
    if !solved {
        let (mut lo, mut hi) = (0.0, 1.0);
        t = fraction;
        for _ in 0..32 {
            let x = sample(ax, bx, cx, t);
            if (x - fraction).abs() < 1e-7 {
                break;
            }
            if x > fraction {
                hi = t;
            } else {
                lo = t;
            }
            t = 0.5 * (lo + hi);
        }
    }
    sample(ay, by, cy, t)
}

/// Resolved spring parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpringParams {
    /// Damping; higher settles faster with less bounce.
    pub friction: f64,
    /// Stiffness; higher moves faster.
    pub tension: f64,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            friction: 7.0,
            tension: 100.0,
        }
    }
}

/// Resolved timing parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimingParams {
    /// Length of the transition, excluding `delay`.
    pub duration: Duration,
    /// Easing curve applied to linear progress.
    pub easing: Easing,
    /// Time to hold the start value before moving.
    pub delay: Duration,
}

impl Default for TimingParams {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(150),
            easing: Easing::EaseInOut,
            delay: Duration::ZERO,
        }
    }
}

/// A fully resolved animation, ready to hand to an [`Animator`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum AnimationSpec {
    /// Physics-based spring.
    Spring(SpringParams),
    /// Time-based eased transition.
    Timing(TimingParams),
}

/// Which kind of animation to run.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnimationKind {
    /// See [`SpringParams`].
    Spring,
    /// See [`TimingParams`].
    #[default]
    Timing,
}

/// Animation kind plus caller overrides.
///
/// Unset fields fall back to the kind's defaults when [resolved](Self::resolve).
/// Overrides for both kinds are kept, so switching [`kind`](Self::kind) does
/// not discard them.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnimationConfig {
    /// Animation kind.
    pub kind: AnimationKind,
    /// Spring friction override.
    pub friction: Option<f64>,
    /// Spring tension override.
    pub tension: Option<f64>,
    /// Timing duration override.
    pub duration: Option<Duration>,
    /// Timing easing override.
    pub easing: Option<Easing>,
    /// Timing delay override.
    pub delay: Option<Duration>,
}

impl AnimationConfig {
    /// A spring with default parameters.
    pub fn spring() -> Self {
        Self {
            kind: AnimationKind::Spring,
            ..Self::default()
        }
    }

    /// A timing animation with default parameters.
    pub fn timing() -> Self {
        Self {
            kind: AnimationKind::Timing,
            ..Self::default()
        }
    }

    /// Override the spring friction.
    pub fn with_friction(mut self, friction: f64) -> Self {
        self.friction = Some(friction);
        self
    }

    /// Override the spring tension.
    pub fn with_tension(mut self, tension: f64) -> Self {
        self.tension = Some(tension);
        self
    }

    /// Override the timing duration.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Override the timing easing.
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = Some(easing);
        self
    }

    /// Override the timing delay.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Merge the overrides over the defaults of the selected kind.
    pub fn resolve(&self) -> AnimationSpec {
        match self.kind {
            AnimationKind::Spring => AnimationSpec::Spring(self.spring_params()),
            AnimationKind::Timing => AnimationSpec::Timing(self.timing_params()),
        }
    }

    /// Spring parameters after merging overrides.
    pub fn spring_params(&self) -> SpringParams {
        let d = SpringParams::default();
        SpringParams {
            friction: self.friction.unwrap_or(d.friction),
            tension: self.tension.unwrap_or(d.tension),
        }
    }

    /// Timing parameters after merging overrides.
    pub fn timing_params(&self) -> TimingParams {
        let d = TimingParams::default();
        TimingParams {
            duration: self.duration.unwrap_or(d.duration),
            easing: self.easing.unwrap_or(d.easing),
            delay: self.delay.unwrap_or(d.delay),
        }
    }
}

/// One sampled frame of an animation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sample {
    /// Value at the sampled time.
    pub value: f64,
    /// Whether the animation has settled at its target.
    pub finished: bool,
}

/// An in-flight transition between two values.
pub trait Animation: Debug {
    /// Sample the animation `elapsed` after its first frame.
    ///
    /// Called with non-decreasing `elapsed`. Once `finished` is reported the
    /// caller stops sampling.
    fn sample(&mut self, elapsed: Duration) -> Sample;
}

/// Creates animations. Inject a custom implementation to drive the slider
/// from another tweening engine.
pub trait Animator: Debug {
    /// Start an animation from `from` to `to`.
    fn start(&self, from: f64, to: f64, spec: &AnimationSpec) -> Box<dyn Animation>;
}

/// The built-in spring and timing implementations.
#[derive(Copy, Clone, Debug, Default)]
pub struct BuiltinAnimator;

impl Animator for BuiltinAnimator {
    fn start(&self, from: f64, to: f64, spec: &AnimationSpec) -> Box<dyn Animation> {
        match *spec {
            AnimationSpec::Spring(params) => Box::new(SpringAnimation::new(from, to, params)),
            AnimationSpec::Timing(params) => Box::new(TimingAnimation::new(from, to, params)),
        }
    }
}

/// Eased interpolation over a fixed duration.
#[derive(Clone, Debug)]
pub struct TimingAnimation {
    from: f64,
    to: f64,
    params: TimingParams,
}

impl TimingAnimation {
    /// Create a timing animation.
    pub fn new(from: f64, to: f64, params: TimingParams) -> Self {
        Self { from, to, params }
    }
}

impl Animation for TimingAnimation {
    fn sample(&mut self, elapsed: Duration) -> Sample {
        let Some(running) = elapsed.checked_sub(self.params.delay) else {
            return Sample {
                value: self.from,
                finished: false,
            };
        };
        let duration = self.params.duration.as_secs_f64();
        let progress = if duration > 0.0 {
            running.as_secs_f64() / duration
        } else {
            1.0
        };
        if progress >= 1.0 {
            return Sample {
                value: self.to,
                finished: true,
            };
        }
        let eased = self.params.easing.transform(progress);
        Sample {
            value: self.from + (self.to - self.from) * eased,
            finished: false,
        }
    }
}

/// Displacement and speed under which a spring counts as settled.
const REST_THRESHOLD: f64 = 0.001;

/// Damping ratios this close to `1` use the critically damped solution.
const CRITICAL_TOLERANCE: f64 = 1e-9;

/// A damped harmonic oscillator with unit mass.
///
/// Friction and tension use the Origami scale and are converted to damping
/// and stiffness on construction.
#[derive(Clone, Debug)]
pub struct SpringAnimation {
    from: f64,
    to: f64,
    stiffness: f64,
    damping: f64,
}

impl SpringAnimation {
    /// Create a spring animation starting at rest.
    pub fn new(from: f64, to: f64, params: SpringParams) -> Self {
        Self {
            from,
            to,
            stiffness: stiffness_from_tension(params.tension).max(f64::EPSILON),
            damping: damping_from_friction(params.friction).max(0.0),
        }
    }

    /// Stiffness after conversion from tension.
    pub fn stiffness(&self) -> f64 {
        self.stiffness
    }

    /// Damping after conversion from friction.
    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// Position and velocity at time `t` seconds.
    ///
    /// `d(t) = to - position` solves `d'' + damping * d' + stiffness * d = 0`
    /// with `d(0) = to - from` and `d'(0) = 0`.
    fn state_at(&self, t: f64) -> (f64, f64) {
        let x0 = self.to - self.from;
        let omega0 = self.stiffness.sqrt();
        let zeta = self.damping / (2.0 * omega0);

        if (zeta - 1.0).abs() <= CRITICAL_TOLERANCE {
            let envelope = (-omega0 * t).exp();
            let position = self.to - envelope * (x0 + omega0 * x0 * t);
            let velocity = envelope * (t * x0 * omega0 * omega0);
            (position, velocity)
        } else if zeta < 1.0 {
            let omega1 = omega0 * (1.0 - zeta * zeta).sqrt();
            let envelope = (-zeta * omega0 * t).exp();
            let a = zeta * omega0 * x0 / omega1;
            let (sin, cos) = (omega1 * t).sin_cos();
            let position = self.to - envelope * (a * sin + x0 * cos);
            let velocity = zeta * omega0 * envelope * (a * sin + x0 * cos)
                - envelope * (a * omega1 * cos - x0 * omega1 * sin);
            (position, velocity)
        } else {
            let root = (zeta * zeta - 1.0).sqrt();
            // r_slow * r_fast = omega0^2.
            let r_fast = -omega0 * (zeta + root);
            let r_slow = -omega0 / (zeta + root);
            let c_slow = x0 * r_fast / (r_fast - r_slow);
            let c_fast = x0 - c_slow;
            let (e_slow, e_fast) = ((r_slow * t).exp(), (r_fast * t).exp());
            let position = self.to - (c_slow * e_slow + c_fast * e_fast);
            let velocity = -(c_slow * r_slow * e_slow + c_fast * r_fast * e_fast);
            (position, velocity)
        }
    }
}

impl Animation for SpringAnimation {
    fn sample(&mut self, elapsed: Duration) -> Sample {
        if self.from == self.to {
            return Sample {
                value: self.to,
                finished: true,
            };
        }
        let (position, velocity) = self.state_at(elapsed.as_secs_f64());
        let at_rest = velocity.abs() <= REST_THRESHOLD
            && (self.to - position).abs() <= REST_THRESHOLD
            && elapsed > Duration::ZERO;
        if at_rest || !position.is_finite() {
            Sample {
                value: self.to,
                finished: true,
            }
        } else {
            Sample {
                value: position,
                finished: false,
            }
        }
    }
}

fn stiffness_from_tension(tension: f64) -> f64 {
    (tension - 30.0) * 3.62 + 194.0
}

fn damping_from_friction(friction: f64) -> f64 {
    (friction - 8.0) * 3.0 + 25.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn easing_endpoints() {
        for e in [
            Easing::Linear,
            Easing::Ease,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
            Easing::CubicBezier(0.4, 0.0, 0.2, 1.0),
        ] {
            assert_eq!(e.transform(0.0), 0.0, "{e:?}");
            assert_eq!(e.transform(1.0), 1.0, "{e:?}");
            assert_eq!(e.transform(-3.0), 0.0, "{e:?}");
            assert_eq!(e.transform(7.0), 1.0, "{e:?}");
        }
    }

    #[test]
    fn ease_in_out_is_symmetric_and_monotonic() {
        let mid = Easing::EaseInOut.transform(0.5);
        assert!((mid - 0.5).abs() < 1e-4, "{mid}");
        let mut prev = 0.0;
        for i in 1..=20 {
            let y = Easing::EaseInOut.transform(f64::from(i) / 20.0);
            assert!(y >= prev - 1e-9, "not monotonic at {i}");
            prev = y;
        }
        assert!(Easing::EaseIn.transform(0.25) < 0.25);
        assert!(Easing::EaseOut.transform(0.25) > 0.25);
    }

    #[test]
    fn overrides_merge_field_by_field() {
        let cfg = AnimationConfig::spring().with_friction(12.0);
        assert_eq!(
            cfg.resolve(),
            AnimationSpec::Spring(SpringParams {
                friction: 12.0,
                tension: 100.0
            })
        );

        let cfg = AnimationConfig::timing()
            .with_duration(ms(300))
            .with_friction(3.0);
        assert_eq!(
            cfg.resolve(),
            AnimationSpec::Timing(TimingParams {
                duration: ms(300),
                easing: Easing::EaseInOut,
                delay: Duration::ZERO,
            })
        );

        // Switching kind keeps the other kind's overrides.
        let cfg = AnimationConfig {
            kind: AnimationKind::Spring,
            ..cfg
        };
        assert_eq!(cfg.spring_params().friction, 3.0);
    }

    #[test]
    fn defaults() {
        assert_eq!(AnimationConfig::default().kind, AnimationKind::Timing);
        assert_eq!(
            AnimationConfig::spring().resolve(),
            AnimationSpec::Spring(SpringParams::default())
        );
        let t = TimingParams::default();
        assert_eq!(t.duration, ms(150));
        assert_eq!(t.delay, Duration::ZERO);
        assert_eq!(t.easing, Easing::EaseInOut);
    }

    #[test]
    fn timing_progresses_and_finishes() {
        let mut a = TimingAnimation::new(0.0, 10.0, TimingParams::default());
        assert_eq!(
            a.sample(Duration::ZERO),
            Sample {
                value: 0.0,
                finished: false
            }
        );
        let mid = a.sample(ms(75));
        assert!(!mid.finished);
        assert!((mid.value - 5.0).abs() < 1e-3, "{mid:?}");
        assert_eq!(
            a.sample(ms(150)),
            Sample {
                value: 10.0,
                finished: true
            }
        );
    }

    #[test]
    fn timing_honors_delay() {
        let params = TimingParams {
            delay: ms(100),
            easing: Easing::Linear,
            ..TimingParams::default()
        };
        let mut a = TimingAnimation::new(1.0, 2.0, params);
        assert_eq!(a.sample(ms(50)).value, 1.0);
        assert_eq!(a.sample(ms(100)).value, 1.0);
        let s = a.sample(ms(175));
        assert!((s.value - 1.5).abs() < 1e-9, "{s:?}");
        assert!(a.sample(ms(250)).finished);
    }

    #[test]
    fn zero_duration_jumps() {
        let params = TimingParams {
            duration: Duration::ZERO,
            ..TimingParams::default()
        };
        let mut a = TimingAnimation::new(0.0, 3.0, params);
        assert_eq!(
            a.sample(Duration::ZERO),
            Sample {
                value: 3.0,
                finished: true
            }
        );
    }

    #[test]
    fn origami_conversion() {
        let s = SpringAnimation::new(0.0, 1.0, SpringParams::default());
        assert!((s.stiffness() - 447.4).abs() < 1e-9);
        assert!((s.damping() - 22.0).abs() < 1e-9);
    }

    #[test]
    fn spring_settles_at_target() {
        let mut a = BuiltinAnimator.start(0.0, 1.0, &AnimationConfig::spring().resolve());
        let first = a.sample(Duration::ZERO);
        assert_eq!(first.value, 0.0);
        assert!(!first.finished);

        let mut finished = None;
        for frame in 1..=600_u32 {
            let s = a.sample(Duration::from_secs_f64(f64::from(frame) / 60.0));
            if s.finished {
                finished = Some((frame, s.value));
                break;
            }
        }
        let (frame, value) = finished.expect("spring should settle within ten seconds");
        assert_eq!(value, 1.0);
        assert!(frame > 5, "settled implausibly fast at frame {frame}");
    }

    #[test]
    fn underdamped_spring_overshoots() {
        let mut a = SpringAnimation::new(0.0, 1.0, SpringParams::default());
        let peak = (1..120_u32)
            .map(|f| a.sample(Duration::from_secs_f64(f64::from(f) / 60.0)).value)
            .fold(f64::MIN, f64::max);
        assert!(peak > 1.0, "peak {peak}");
    }

    #[test]
    fn overdamped_spring_creeps_without_overshoot() {
        let params = SpringParams {
            friction: 60.0,
            tension: 100.0,
        };
        let mut a = SpringAnimation::new(0.0, 1.0, params);
        let mut last = 0.0;
        for f in 1..600_u32 {
            let s = a.sample(Duration::from_secs_f64(f64::from(f) / 60.0));
            assert!(s.value <= 1.0 + 1e-12, "overshoot {s:?}");
            assert!(s.value >= last, "moved backwards at frame {f}: {s:?}");
            if s.finished {
                return;
            }
            last = s.value;
        }
        panic!("overdamped spring never settled");
    }

    #[test]
    fn friction_shapes_overdamped_springs() {
        let at_100ms = |friction| {
            let params = SpringParams {
                friction,
                tension: 100.0,
            };
            SpringAnimation::new(0.0, 1.0, params).sample(ms(100)).value
        };
        let (light, heavy) = (at_100ms(20.0), at_100ms(200.0));
        assert!(heavy < light, "friction 20: {light}, friction 200: {heavy}");
        assert!(heavy > 0.0 && light < 1.0);
    }

    #[test]
    fn damping_regimes_meet_at_critical() {
        let stiffness = stiffness_from_tension(100.0);
        let critical = (2.0 * stiffness.sqrt() - 25.0) / 3.0 + 8.0;
        let at_100ms = |friction| {
            let params = SpringParams {
                friction,
                tension: 100.0,
            };
            SpringAnimation::new(0.0, 1.0, params).state_at(0.1).0
        };
        let exact = at_100ms(critical);
        for friction in [critical - 1e-6, critical + 1e-6] {
            let near = at_100ms(friction);
            assert!((near - exact).abs() < 1e-4, "{near} vs {exact}");
        }
    }

    #[test]
    fn spring_without_distance_finishes_immediately() {
        let mut a = SpringAnimation::new(0.4, 0.4, SpringParams::default());
        assert!(a.sample(Duration::ZERO).finished);
    }
}
