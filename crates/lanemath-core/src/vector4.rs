//! Four-lane vector value type.
//!
//! `Vector4<L>` is generic over its storage; [`Vector4f`] and [`Vector4d`]
//! bind it to the storage selected for each precision. Every operation
//! returns a new value and never allocates.
//!
//! `dot` is the four-lane dot product; [`Vector4::dot3`] covers `x`, `y`, `z`.

use core::fmt;
use core::ops::{Add, Div, Mul, Neg, Sub};

use crate::backend::{self, F32Lanes, F64Lanes, Lanes};
use crate::error::{Error, Result};
use crate::scalar::Real;

/// Four lanes `(x, y, z, w)` of one precision.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct Vector4<L: Lanes> {
    lanes: L,
}

/// Single-precision vector on the storage selected for `f32`.
pub type Vector4f = Vector4<F32Lanes>;

/// Double-precision vector on the storage selected for `f64`.
pub type Vector4d = Vector4<F64Lanes>;

impl<L: Lanes> Vector4<L> {
    #[inline(always)]
    pub(crate) const fn from_lanes(lanes: L) -> Self {
        Self { lanes }
    }

    #[inline(always)]
    pub(crate) const fn lanes(self) -> L {
        self.lanes
    }

    // -------------------------------------------------------------------------
    // Construction and memory
    // -------------------------------------------------------------------------

    /// Builds a vector from four lanes.
    #[inline]
    #[must_use]
    pub fn set(x: L::Scalar, y: L::Scalar, z: L::Scalar, w: L::Scalar) -> Self {
        Self::from_lanes(L::set(x, y, z, w))
    }

    /// Builds a vector from three lanes with `w = 0`.
    #[inline]
    #[must_use]
    pub fn set3(x: L::Scalar, y: L::Scalar, z: L::Scalar) -> Self {
        Self::set(x, y, z, <L::Scalar as Real>::ZERO)
    }

    /// Broadcasts one value to every lane.
    #[inline]
    #[must_use]
    pub fn splat(value: L::Scalar) -> Self {
        Self::from_lanes(L::splat(value))
    }

    /// All lanes zero.
    #[inline]
    #[must_use]
    pub fn zero() -> Self {
        Self::splat(<L::Scalar as Real>::ZERO)
    }

    /// Reads `(x, y, z, w)` from four contiguous values.
    #[inline]
    #[must_use]
    pub fn load_unaligned(input: &[L::Scalar; 4]) -> Self {
        Self::from_lanes(L::load(input))
    }

    /// Reads the first four values of a slice.
    pub fn try_from_slice(input: &[L::Scalar]) -> Result<Self> {
        let lanes: &[L::Scalar; 4] = input
            .get(..4)
            .and_then(|head| head.try_into().ok())
            .ok_or(Error::SliceLength {
                expected: 4,
                actual: input.len(),
            })?;
        Ok(Self::load_unaligned(lanes))
    }

    /// Writes `(x, y, z, w)` to four contiguous values.
    #[inline]
    pub fn write_unaligned(self, output: &mut [L::Scalar; 4]) {
        self.lanes.store(output);
    }

    /// Writes `(x, y, z, w)` to the first four values of a slice.
    pub fn try_write_to_slice(self, output: &mut [L::Scalar]) -> Result<()> {
        let actual = output.len();
        let lanes: &mut [L::Scalar; 4] = output
            .get_mut(..4)
            .and_then(|head| head.try_into().ok())
            .ok_or(Error::SliceLength {
                expected: 4,
                actual,
            })?;
        self.write_unaligned(lanes);
        Ok(())
    }

    /// Lanes as an array in `(x, y, z, w)` order.
    #[inline]
    #[must_use]
    pub fn to_array(self) -> [L::Scalar; 4] {
        self.lanes.to_array()
    }

    /// Converts to another storage, lane by lane.
    ///
    /// Works across precisions and backends. For the selected storage prefer
    /// `cast`, which uses the backend's native conversion.
    #[inline]
    #[must_use]
    pub fn convert<D: Lanes>(self) -> Vector4<D> {
        Vector4::from_lanes(backend::convert(self.lanes))
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Lane `x`.
    #[inline]
    #[must_use]
    pub fn x(self) -> L::Scalar {
        self.lanes.x()
    }

    /// Lane `y`.
    #[inline]
    #[must_use]
    pub fn y(self) -> L::Scalar {
        self.lanes.y()
    }

    /// Lane `z`.
    #[inline]
    #[must_use]
    pub fn z(self) -> L::Scalar {
        self.lanes.z()
    }

    /// Lane `w`.
    #[inline]
    #[must_use]
    pub fn w(self) -> L::Scalar {
        self.lanes.w()
    }

    // -------------------------------------------------------------------------
    // Arithmetic
    // -------------------------------------------------------------------------

    /// Every lane multiplied by `factor`.
    #[inline]
    #[must_use]
    pub fn mul_scalar(self, factor: L::Scalar) -> Self {
        Self::from_lanes(self.lanes.scale(factor))
    }

    /// Lanewise absolute value.
    #[inline]
    #[must_use]
    pub fn abs(self) -> Self {
        Self::from_lanes(self.lanes.abs())
    }

    /// Lanewise minimum.
    #[inline]
    #[must_use]
    pub fn min(self, rhs: Self) -> Self {
        Self::from_lanes(self.lanes.min(rhs.lanes))
    }

    /// Lanewise maximum.
    #[inline]
    #[must_use]
    pub fn max(self, rhs: Self) -> Self {
        Self::from_lanes(self.lanes.max(rhs.lanes))
    }

    /// Four-lane dot product.
    #[inline]
    #[must_use]
    pub fn dot(self, rhs: Self) -> L::Scalar {
        self.lanes.dot4(rhs.lanes)
    }

    /// Three-lane dot product, `w` ignored.
    #[inline]
    #[must_use]
    pub fn dot3(self, rhs: Self) -> L::Scalar {
        self.lanes.dot3(rhs.lanes)
    }

    /// Cross product of the `xyz` parts; `w` of the result is zero.
    #[inline]
    #[must_use]
    pub fn cross3(self, rhs: Self) -> Self {
        let (lx, ly, lz) = (self.x(), self.y(), self.z());
        let (rx, ry, rz) = (rhs.x(), rhs.y(), rhs.z());
        Self::set3((ly * rz) - (lz * ry), (lz * rx) - (lx * rz), (lx * ry) - (ly * rx))
    }

    /// Four-lane squared length.
    #[inline]
    #[must_use]
    pub fn length_squared(self) -> L::Scalar {
        self.dot(self)
    }

    /// Four-lane length.
    #[inline]
    #[must_use]
    pub fn length(self) -> L::Scalar {
        self.length_squared().sqrt()
    }

    /// Length of the `xyz` part.
    #[inline]
    #[must_use]
    pub fn length3(self) -> L::Scalar {
        self.dot3(self).sqrt()
    }

    /// `start + (end - start) * alpha`. `alpha` is not clamped.
    #[inline]
    #[must_use]
    pub fn lerp(start: Self, end: Self, alpha: L::Scalar) -> Self {
        start + (end - start).mul_scalar(alpha)
    }

    // -------------------------------------------------------------------------
    // Comparisons
    // -------------------------------------------------------------------------

    /// True when every lane pair differs by at most `threshold`.
    #[inline]
    #[must_use]
    pub fn all_near_equal(self, rhs: Self, threshold: L::Scalar) -> bool {
        self.lanes.all_near_equal(rhs.lanes, threshold)
    }

    /// True when no lane is NaN or infinite.
    #[inline]
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.lanes.all_finite()
    }
}

// =============================================================================
// Operators
// =============================================================================

impl<L: Lanes> Add for Vector4<L> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::from_lanes(self.lanes.add(rhs.lanes))
    }
}

impl<L: Lanes> Sub for Vector4<L> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::from_lanes(self.lanes.sub(rhs.lanes))
    }
}

impl<L: Lanes> Mul for Vector4<L> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::from_lanes(self.lanes.mul(rhs.lanes))
    }
}

impl<L: Lanes<Scalar = f32>> Mul<f32> for Vector4<L> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f32) -> Self {
        self.mul_scalar(rhs)
    }
}

impl<L: Lanes<Scalar = f64>> Mul<f64> for Vector4<L> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self {
        self.mul_scalar(rhs)
    }
}

impl<L: Lanes> Div for Vector4<L> {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self {
        Self::from_lanes(self.lanes.div(rhs.lanes))
    }
}

impl<L: Lanes> Neg for Vector4<L> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::from_lanes(self.lanes.neg())
    }
}

// =============================================================================
// Std traits
// =============================================================================

impl<L: Lanes> Default for Vector4<L> {
    fn default() -> Self {
        Self::zero()
    }
}

/// Exact lane equality; use [`Vector4::all_near_equal`] for tolerances.
impl<L: Lanes> PartialEq for Vector4<L> {
    fn eq(&self, other: &Self) -> bool {
        self.to_array() == other.to_array()
    }
}

impl<L: Lanes> fmt::Debug for Vector4<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vector4")
            .field("x", &self.x())
            .field("y", &self.y())
            .field("z", &self.z())
            .field("w", &self.w())
            .finish()
    }
}

impl<L: Lanes> From<[L::Scalar; 4]> for Vector4<L> {
    #[inline]
    fn from(lanes: [L::Scalar; 4]) -> Self {
        Self::load_unaligned(&lanes)
    }
}

impl From<Vector4f> for [f32; 4] {
    #[inline]
    fn from(vector: Vector4f) -> Self {
        vector.to_array()
    }
}

impl From<Vector4d> for [f64; 4] {
    #[inline]
    fn from(vector: Vector4d) -> Self {
        vector.to_array()
    }
}
