//! Exact time for frame scheduling.
//!
//! Professional frame rates such as 30000/1001 have no exact binary
//! floating-point form, so every duration and timestamp here is a
//! rational. Floats only appear in explicit `*_f64` conversions.

use num_rational::Rational64;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

/// A point in stream time, in seconds, as an exact rational.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RationalTime {
    value: Rational64,
}

impl RationalTime {
    /// `numerator / denominator` seconds. Panics if `denominator` is zero.
    #[inline]
    pub fn new(numerator: i64, denominator: i64) -> Self {
        Self {
            value: Rational64::new(numerator, denominator),
        }
    }

    /// Start time of frame `frames` at the given rate.
    #[inline]
    pub fn from_frames(frames: i64, rate: FrameRate) -> Self {
        if rate.numerator == 0 {
            return Self::ZERO;
        }
        Self {
            value: Rational64::new(frames * rate.denominator as i64, rate.numerator as i64),
        }
    }

    /// Convert to seconds as f64.
    #[inline]
    pub fn to_seconds_f64(self) -> f64 {
        *self.value.numer() as f64 / *self.value.denom() as f64
    }

    /// Frame number containing this time at the given rate (floored).
    #[inline]
    pub fn to_frames(self, rate: FrameRate) -> i64 {
        let frames_rational =
            self.value * Rational64::new(rate.numerator as i64, rate.denominator as i64);
        frames_rational.floor().to_integer()
    }

    /// Express this time in ticks of a `time_scale` Hz clock, if exact.
    pub fn to_ticks(self, time_scale: i64) -> Option<i64> {
        let ticks = self.value * time_scale;
        ticks.is_integer().then(|| ticks.to_integer())
    }

    /// Reduced numerator.
    #[inline]
    pub fn numer(self) -> i64 {
        *self.value.numer()
    }

    /// Reduced denominator.
    #[inline]
    pub fn denom(self) -> i64 {
        *self.value.denom()
    }

    #[inline]
    pub fn as_rational(self) -> Rational64 {
        self.value
    }

    pub const ZERO: Self = Self {
        value: Rational64::new_raw(0, 1),
    };

    #[inline]
    pub fn is_zero(self) -> bool {
        *self.value.numer() == 0
    }
}

impl Default for RationalTime {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Add for RationalTime {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            value: self.value + rhs.value,
        }
    }
}

impl Sub for RationalTime {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self {
            value: self.value - rhs.value,
        }
    }
}

impl Mul<i64> for RationalTime {
    type Output = Self;
    fn mul(self, rhs: i64) -> Self {
        Self {
            value: self.value * rhs,
        }
    }
}

impl Div<i64> for RationalTime {
    type Output = Self;
    fn div(self, rhs: i64) -> Self {
        Self {
            value: self.value / rhs,
        }
    }
}

impl fmt::Display for RationalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}s", self.numer(), self.denom())
    }
}

/// Frame rate as a rational number (e.g. 30000/1001 for 29.97 fps).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameRate {
    pub numerator: u32,
    pub denominator: u32,
}

impl FrameRate {
    #[inline]
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Frames per second as f64 (display only).
    #[inline]
    pub fn to_fps_f64(self) -> f64 {
        if self.denominator == 0 {
            return 0.0;
        }
        self.numerator as f64 / self.denominator as f64
    }

    /// Duration of a single frame; zero for a zero rate.
    #[inline]
    pub fn frame_duration(self) -> RationalTime {
        if self.numerator == 0 {
            return RationalTime::ZERO;
        }
        RationalTime::new(self.denominator as i64, self.numerator as i64)
    }

    /// Rate reported for unknown modes.
    pub const ZERO: Self = Self::new(0, 1);

    pub const FPS_23_976: Self = Self::new(24000, 1001);
    pub const FPS_24: Self = Self::new(24, 1);
    pub const FPS_25: Self = Self::new(25, 1);
    pub const FPS_29_97: Self = Self::new(30000, 1001);
    pub const FPS_30: Self = Self::new(30, 1);
    pub const FPS_50: Self = Self::new(50, 1);
    pub const FPS_59_94: Self = Self::new(60000, 1001);
    pub const FPS_60: Self = Self::new(60, 1);
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fps = self.to_fps_f64();
        if (fps - fps.round()).abs() < 0.001 {
            write!(f, "{} fps", fps.round() as u32)
        } else {
            write!(f, "{:.2} fps", fps)
        }
    }
}

/// Duration of one frame ("grain") exactly as the card's timing tables
/// state it: `numerator / denominator` seconds.
///
/// The pair is kept unreduced so that 1080p25 reads `{1000, 25000}`, the
/// same time base the hardware schedules in. Use [`GrainDuration::as_time`]
/// for arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GrainDuration {
    pub numerator: u32,
    pub denominator: u32,
}

impl GrainDuration {
    #[inline]
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Sentinel for unknown modes.
    pub const ZERO: Self = Self::new(0, 1);

    #[inline]
    pub fn is_zero(self) -> bool {
        self.numerator == 0
    }

    #[inline]
    pub fn as_pair(self) -> (u32, u32) {
        (self.numerator, self.denominator)
    }

    /// The duration as an exact (reduced) time.
    #[inline]
    pub fn as_time(self) -> RationalTime {
        RationalTime::new(self.numerator as i64, self.denominator as i64)
    }

    /// The matching frame rate, `denominator / numerator`, unreduced.
    #[inline]
    pub fn frame_rate(self) -> FrameRate {
        if self.is_zero() {
            return FrameRate::ZERO;
        }
        FrameRate::new(self.denominator, self.numerator)
    }

    /// Stream time at which frame `frames` starts.
    #[inline]
    pub fn frames_to_time(self, frames: i64) -> RationalTime {
        self.as_time() * frames
    }

    /// Wall-clock duration of one grain, truncated to the nanosecond.
    /// `None` for zero.
    pub fn to_std_duration(self) -> Option<std::time::Duration> {
        if self.is_zero() {
            return None;
        }
        Some(self.std_offset(1))
    }

    /// Wall-clock offset of frame `frames` from the start of a stream.
    ///
    /// Computed from the exact product, so truncation to the nanosecond
    /// never accumulates over a long run.
    pub fn std_offset(self, frames: u64) -> std::time::Duration {
        if self.denominator == 0 {
            return std::time::Duration::ZERO;
        }
        let nanos = u128::from(frames) * u128::from(self.numerator) * 1_000_000_000
            / u128::from(self.denominator);
        std::time::Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
    }
}

impl fmt::Display for GrainDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}
