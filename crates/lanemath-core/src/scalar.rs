//! Scalar kernel shared by every backend.
//!
//! These functions serve as:
//! - The portable fallback behind `backend::portable`
//! - The non-vectorized building block inside SIMD storage (lane extraction,
//!   horizontal results, trigonometry)
//! - Reference implementations for testing SIMD correctness
//!
//! All functions are pure. Domain violations (`sqrt` of a negative, division
//! by zero) are not intercepted and propagate as IEEE-754 NaN/Inf.

use core::fmt::{Debug, Display};
use core::ops::{Add, Div, Mul, Neg, Sub};

mod sealed {
    pub trait Sealed {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// Floating-point precision usable as a lane type (`f32` or `f64`).
///
/// Sealed: the backends only provide storage for these two widths.
pub trait Real:
    sealed::Sealed
    + Copy
    + Debug
    + Display
    + Default
    + PartialEq
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + Send
    + Sync
    + 'static
{
    /// `0.0`
    const ZERO: Self;
    /// `1.0`
    const ONE: Self;
    /// `0.5`
    const HALF: Self;
    /// `2.0`
    const TWO: Self;

    /// Converts a constant authored in double precision.
    fn from_f64(value: f64) -> Self;

    /// Widens to double precision.
    fn to_f64(self) -> f64;

    /// Square root. NaN for negative input.
    fn sqrt(self) -> Self;

    /// `1 / sqrt(x)`. Infinite for zero, NaN for negative input.
    #[inline]
    fn sqrt_reciprocal(self) -> Self {
        Self::ONE / self.sqrt()
    }

    /// `1 / x`.
    #[inline]
    fn reciprocal(self) -> Self {
        Self::ONE / self
    }

    /// Absolute value.
    fn abs(self) -> Self;

    /// Smaller of the two inputs.
    #[inline]
    fn min(self, other: Self) -> Self {
        if self < other {
            self
        } else {
            other
        }
    }

    /// Larger of the two inputs.
    #[inline]
    fn max(self, other: Self) -> Self {
        if self > other {
            self
        } else {
            other
        }
    }

    /// Clamps to `[min, max]`.
    #[inline]
    fn clamp(self, min: Self, max: Self) -> Self {
        self.max(min).min(max)
    }

    /// Sine.
    fn sin(self) -> Self;

    /// Cosine.
    fn cos(self) -> Self;

    /// Sine and cosine of the same angle.
    fn sin_cos(self) -> (Self, Self);

    /// Arc cosine with the input clamped to `[-1, 1]`.
    ///
    /// Values such as `1.0000001` produced by rounding map to the domain edge
    /// instead of NaN. NaN input still yields NaN.
    fn acos(self) -> Self;

    /// True unless NaN or infinite.
    fn is_finite(self) -> bool;

    /// `|self - other| < threshold`.
    #[inline]
    fn near_equal(self, other: Self, threshold: Self) -> bool {
        (self - other).abs() < threshold
    }
}

macro_rules! impl_real {
    ($t:ty) => {
        impl Real for $t {
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;
            const HALF: Self = 0.5;
            const TWO: Self = 2.0;

            #[inline(always)]
            #[allow(clippy::cast_possible_truncation)] // Narrowing constants is the point.
            fn from_f64(value: f64) -> Self {
                value as $t
            }

            #[inline(always)]
            fn to_f64(self) -> f64 {
                f64::from(self)
            }

            #[inline(always)]
            fn sqrt(self) -> Self {
                <$t>::sqrt(self)
            }

            #[inline(always)]
            fn abs(self) -> Self {
                <$t>::abs(self)
            }

            #[inline(always)]
            fn sin(self) -> Self {
                <$t>::sin(self)
            }

            #[inline(always)]
            fn cos(self) -> Self {
                <$t>::cos(self)
            }

            #[inline(always)]
            fn sin_cos(self) -> (Self, Self) {
                <$t>::sin_cos(self)
            }

            #[inline]
            fn acos(self) -> Self {
                // NaN fails both comparisons and reaches acos untouched.
                let clamped = if self > 1.0 {
                    1.0
                } else if self < -1.0 {
                    -1.0
                } else {
                    self
                };
                <$t>::acos(clamped)
            }

            #[inline(always)]
            fn is_finite(self) -> bool {
                <$t>::is_finite(self)
            }
        }
    };
}

impl_real!(f32);
impl_real!(f64);

// =============================================================================
// Free-function forms
// =============================================================================

/// Square root. See [`Real::sqrt`].
#[inline]
#[must_use]
pub fn sqrt<T: Real>(x: T) -> T {
    x.sqrt()
}

/// Reciprocal square root. See [`Real::sqrt_reciprocal`].
#[inline]
#[must_use]
pub fn sqrt_reciprocal<T: Real>(x: T) -> T {
    x.sqrt_reciprocal()
}

/// Absolute value.
#[inline]
#[must_use]
pub fn abs<T: Real>(x: T) -> T {
    Real::abs(x)
}

/// Smaller of two scalars.
#[inline]
#[must_use]
pub fn min<T: Real>(a: T, b: T) -> T {
    Real::min(a, b)
}

/// Larger of two scalars.
#[inline]
#[must_use]
pub fn max<T: Real>(a: T, b: T) -> T {
    Real::max(a, b)
}

/// Clamps `x` to `[lo, hi]`.
#[inline]
#[must_use]
pub fn clamp<T: Real>(x: T, lo: T, hi: T) -> T {
    Real::clamp(x, lo, hi)
}

/// Sine and cosine in one call.
#[inline]
#[must_use]
pub fn sin_cos<T: Real>(angle: T) -> (T, T) {
    angle.sin_cos()
}

/// Clamped arc cosine. See [`Real::acos`].
#[inline]
#[must_use]
pub fn acos<T: Real>(x: T) -> T {
    Real::acos(x)
}

/// True unless NaN or infinite.
#[inline]
#[must_use]
pub fn is_finite<T: Real>(x: T) -> bool {
    Real::is_finite(x)
}

/// `|a - b| < threshold`.
#[inline]
#[must_use]
pub fn near_equal<T: Real>(a: T, b: T, threshold: T) -> bool {
    a.near_equal(b, threshold)
}
