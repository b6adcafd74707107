//! Rotation quaternion.
//!
//! `Quat<L>` shares its storage strategy with [`Vector4`]: `(x, y, z)` is the
//! rotation axis scaled by `sin(θ/2)` and `w` is `cos(θ/2)`.
//!
//! # Conventions
//!
//! - Composition: `local_to_world = local_to_object * object_to_world`; the
//!   left operand is applied first.
//! - Quaternion dot products, lengths and `lerp` use all four lanes.
//! - `rotate`, `axis` and `to_axis_angle` return vectors with `w = 0`.
//! - Operations that assume a unit quaternion (`rotate`, `lerp`, axis-angle
//!   extraction) do not check it; call [`Quat::normalize`] first when needed.
//!
//! Domain violations are never intercepted: normalizing a zero quaternion
//! yields NaN lanes. [`Quat::try_normalize`] is the guarded variant.

use core::fmt;
use core::ops::{Mul, Neg};

use crate::backend::{self, F32Lanes, F64Lanes, Lanes};
use crate::config::ToleranceConfig;
use crate::error::Result;
use crate::scalar::Real;
use crate::vector4::Vector4;

/// Default per-lane threshold for [`Quat::near_equal`].
pub const DEFAULT_NEAR_EQUAL_THRESHOLD: f64 = 0.00001;

/// Default threshold on `|length_squared - 1|` for [`Quat::is_normalized`].
pub const DEFAULT_NORMALIZED_THRESHOLD: f64 = 0.00001;

/// Default rotation angle (radians) under which [`Quat::near_identity`] holds.
pub const DEFAULT_NEAR_IDENTITY_ANGLE: f64 = 0.002_847_144_61;

/// Below `AXIS_EPSILON²` for `1 - w²` the rotation axis is undefined and
/// axis extraction falls back to `(1, 0, 0)`.
pub const AXIS_EPSILON: f64 = 1.0e-8;

/// Tolerance on the axis length checked by `from_axis_angle` in debug builds.
const UNIT_AXIS_TOLERANCE: f64 = 1.0e-3;

/// Quaternion `(x, y, z, w)` of one precision.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct Quat<L: Lanes> {
    lanes: L,
}

/// Single-precision quaternion on the storage selected for `f32`.
pub type Quatf = Quat<F32Lanes>;

/// Double-precision quaternion on the storage selected for `f64`.
pub type Quatd = Quat<F64Lanes>;

impl<L: Lanes> Quat<L> {
    #[inline(always)]
    pub(crate) const fn from_lanes(lanes: L) -> Self {
        Self { lanes }
    }

    #[inline(always)]
    pub(crate) const fn lanes(self) -> L {
        self.lanes
    }

    #[inline(always)]
    fn scalar(value: f64) -> L::Scalar {
        <L::Scalar as Real>::from_f64(value)
    }

    // =========================================================================
    // Construction and memory
    // =========================================================================

    /// Builds a quaternion from four lanes.
    #[inline]
    #[must_use]
    pub fn set(x: L::Scalar, y: L::Scalar, z: L::Scalar, w: L::Scalar) -> Self {
        Self::from_lanes(L::set(x, y, z, w))
    }

    /// The identity rotation `(0, 0, 0, 1)`.
    #[inline]
    #[must_use]
    pub fn identity() -> Self {
        let zero = <L::Scalar as Real>::ZERO;
        Self::set(zero, zero, zero, <L::Scalar as Real>::ONE)
    }

    /// Reads `(x, y, z, w)` from four contiguous values.
    #[inline]
    #[must_use]
    pub fn load_unaligned(input: &[L::Scalar; 4]) -> Self {
        Self::from_lanes(L::load(input))
    }

    /// Reads the first four values of a slice.
    pub fn try_from_slice(input: &[L::Scalar]) -> Result<Self> {
        Vector4::try_from_slice(input).map(Self::from_vector)
    }

    /// Writes `(x, y, z, w)` to four contiguous values.
    #[inline]
    pub fn write_unaligned(self, output: &mut [L::Scalar; 4]) {
        self.lanes.store(output);
    }

    /// Writes `(x, y, z, w)` to the first four values of a slice.
    pub fn try_write_to_slice(self, output: &mut [L::Scalar]) -> Result<()> {
        self.to_vector().try_write_to_slice(output)
    }

    /// Reinterprets a vector's lanes as a quaternion. Lossless.
    #[inline]
    #[must_use]
    pub fn from_vector(vector: Vector4<L>) -> Self {
        Self::from_lanes(vector.lanes())
    }

    /// Reinterprets the quaternion's lanes as a vector. Lossless.
    #[inline]
    #[must_use]
    pub fn to_vector(self) -> Vector4<L> {
        Vector4::from_lanes(self.lanes)
    }

    /// Lanes as an array in `(x, y, z, w)` order.
    #[inline]
    #[must_use]
    pub fn to_array(self) -> [L::Scalar; 4] {
        self.lanes.to_array()
    }

    /// Converts to another storage, lane by lane. No renormalization.
    #[inline]
    #[must_use]
    pub fn convert<D: Lanes>(self) -> Quat<D> {
        Quat::from_lanes(backend::convert(self.lanes))
    }

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

    // =========================================================================
    // Algebra
    // =========================================================================

    /// Negates the imaginary part. The inverse of a unit quaternion.
    #[inline]
    #[must_use]
    pub fn conjugate(self) -> Self {
        Self::from_lanes(self.lanes.quat_conjugate())
    }

    /// Composes two rotations; `self` is applied first, then `rhs`.
    ///
    /// ```
    /// use lanemath_core::{Quatd, Vector4d};
    ///
    /// let about_z = Quatd::from_axis_angle(Vector4d::set3(0.0, 0.0, 1.0), 0.5);
    /// let twice = about_z.mul(about_z);
    /// let expected = Quatd::from_axis_angle(Vector4d::set3(0.0, 0.0, 1.0), 1.0);
    /// assert!(twice.near_equal_within(expected, 1e-12));
    /// ```
    #[inline]
    #[must_use]
    #[allow(clippy::should_implement_trait)] // Inherent form of Mul.
    pub fn mul(self, rhs: Self) -> Self {
        Self::from_lanes(L::quat_mul(self.lanes, rhs.lanes))
    }

    /// Rotates the `xyz` part of `vector`; the result has `w = 0`.
    #[inline]
    #[must_use]
    pub fn rotate(self, vector: Vector4<L>) -> Vector4<L> {
        let pure = Self::set(vector.x(), vector.y(), vector.z(), <L::Scalar as Real>::ZERO);
        let rotated = self.conjugate().mul(pure).mul(self);
        Vector4::set3(rotated.x(), rotated.y(), rotated.z())
    }

    /// Four-lane squared length.
    #[inline]
    #[must_use]
    pub fn length_squared(self) -> L::Scalar {
        self.lanes.dot4(self.lanes)
    }

    /// Four-lane length.
    #[inline]
    #[must_use]
    pub fn length(self) -> L::Scalar {
        self.length_squared().sqrt()
    }

    /// `1 / length`.
    #[inline]
    #[must_use]
    pub fn length_reciprocal(self) -> L::Scalar {
        self.length_squared().sqrt_reciprocal()
    }

    /// Divides every lane by the length. A zero quaternion yields NaN lanes.
    #[inline]
    #[must_use]
    pub fn normalize(self) -> Self {
        Self::from_lanes(self.lanes.div(L::splat(self.length())))
    }

    /// [`Quat::normalize`], or `None` when the length is zero or not finite.
    #[must_use]
    pub fn try_normalize(self) -> Option<Self> {
        let length = self.length();
        if length.is_finite() && length > <L::Scalar as Real>::ZERO {
            Some(Self::from_lanes(self.lanes.div(L::splat(length))))
        } else {
            None
        }
    }

    /// Shortest-path linear interpolation, renormalized.
    ///
    /// When `dot(start, end)` is negative, `end` is negated first so the blend
    /// follows the shorter arc. `alpha` is not clamped; values outside
    /// `[0, 1]` extrapolate.
    #[must_use]
    pub fn lerp(start: Self, end: Self, alpha: L::Scalar) -> Self {
        let dot = start.lanes.dot4(end.lanes);
        let bias = if dot >= <L::Scalar as Real>::ZERO {
            <L::Scalar as Real>::ONE
        } else {
            -<L::Scalar as Real>::ONE
        };

        let biased_end = end.lanes.scale(bias);
        let blended = biased_end.sub(start.lanes).scale(alpha).add(start.lanes);
        Self::from_lanes(blended).normalize()
    }

    /// Negates all four lanes. Same rotation, opposite sign.
    #[inline]
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn neg(self) -> Self {
        Self::from_lanes(self.lanes.neg())
    }

    /// Returns `self` when `w >= 0`, otherwise `-self`.
    #[inline]
    #[must_use]
    pub fn ensure_positive_w(self) -> Self {
        if self.w() >= <L::Scalar as Real>::ZERO {
            self
        } else {
            self.neg()
        }
    }

    /// Rebuilds a unit quaternion with non-negative `w` from its imaginary part.
    ///
    /// `w² = ((1 - x²) - y²) - z²`; a slightly negative `w²` from rounding or
    /// quantization is folded back with `abs` so `w` stays defined.
    #[must_use]
    pub fn from_positive_w(xyz: Vector4<L>) -> Self {
        let (x, y, z) = (xyz.x(), xyz.y(), xyz.z());
        let w_squared = ((<L::Scalar as Real>::ONE - (x * x)) - (y * y)) - (z * z);
        Self::set(x, y, z, w_squared.abs().sqrt())
    }

    // =========================================================================
    // Axis-angle and Euler
    // =========================================================================

    /// Rotation angle in radians, `2 * acos(w)`.
    #[inline]
    #[must_use]
    pub fn angle(self) -> L::Scalar {
        self.w().acos() * <L::Scalar as Real>::TWO
    }

    /// Unit rotation axis with `w = 0`.
    ///
    /// Near the identity the axis is numerically undefined and `(1, 0, 0)` is
    /// returned instead.
    #[must_use]
    pub fn axis(self) -> Vector4<L> {
        let zero = <L::Scalar as Real>::ZERO;
        let w = self.w();
        let scale_squared = (<L::Scalar as Real>::ONE - (w * w)).max(zero);

        let epsilon = Self::scalar(AXIS_EPSILON);
        if scale_squared >= epsilon * epsilon {
            let scale = scale_squared.sqrt();
            Vector4::set3(self.x() / scale, self.y() / scale, self.z() / scale)
        } else {
            Vector4::set3(<L::Scalar as Real>::ONE, zero, zero)
        }
    }

    /// `(axis, angle)`; see [`Quat::axis`] and [`Quat::angle`].
    #[inline]
    #[must_use]
    pub fn to_axis_angle(self) -> (Vector4<L>, L::Scalar) {
        (self.axis(), self.angle())
    }

    /// Rotation of `angle` radians about a unit `axis` (`w` of `axis` ignored).
    ///
    /// The axis is not normalized. Debug builds assert it has unit length.
    #[must_use]
    pub fn from_axis_angle(axis: Vector4<L>, angle: L::Scalar) -> Self {
        debug_assert!(
            (axis.length3() - <L::Scalar as Real>::ONE).abs() < Self::scalar(UNIT_AXIS_TOLERANCE),
            "from_axis_angle requires a unit axis, got {axis:?}"
        );

        let (sin, cos) = (angle * <L::Scalar as Real>::HALF).sin_cos();
        Self::set(sin * axis.x(), sin * axis.y(), sin * axis.z(), cos)
    }

    /// Rotation from Euler angles in radians.
    ///
    /// Pitch rotates about Y, yaw about Z and roll about X.
    #[must_use]
    pub fn from_euler(pitch: L::Scalar, yaw: L::Scalar, roll: L::Scalar) -> Self {
        let half = <L::Scalar as Real>::HALF;
        let (sp, cp) = (pitch * half).sin_cos();
        let (sy, cy) = (yaw * half).sin_cos();
        let (sr, cr) = (roll * half).sin_cos();

        Self::set(
            (cr * sp * sy) - (sr * cp * cy),
            (-cr * sp * cy) - (sr * cp * sy),
            (cr * cp * sy) - (sr * sp * cy),
            (cr * cp * cy) + (sr * sp * sy),
        )
    }

    // =========================================================================
    // Predicates
    // =========================================================================

    /// True when no lane is NaN or infinite.
    #[inline]
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.lanes.all_finite()
    }

    /// `|length_squared - 1| < 1e-5`.
    #[inline]
    #[must_use]
    pub fn is_normalized(self) -> bool {
        self.is_normalized_within(Self::scalar(DEFAULT_NORMALIZED_THRESHOLD))
    }

    /// `|length_squared - 1| < threshold`.
    #[inline]
    #[must_use]
    pub fn is_normalized_within(self, threshold: L::Scalar) -> bool {
        (self.length_squared() - <L::Scalar as Real>::ONE).abs() < threshold
    }

    /// [`Quat::is_normalized_within`] using the configured threshold.
    #[inline]
    #[must_use]
    pub fn is_normalized_with(self, tolerances: &ToleranceConfig) -> bool {
        self.is_normalized_within(tolerances.normalized_threshold())
    }

    /// Every lane within `1e-5` of `rhs`. Sign-sensitive: `q` and `-q` differ.
    #[inline]
    #[must_use]
    pub fn near_equal(self, rhs: Self) -> bool {
        self.near_equal_within(rhs, Self::scalar(DEFAULT_NEAR_EQUAL_THRESHOLD))
    }

    /// Every lane within `threshold` of `rhs`.
    #[inline]
    #[must_use]
    pub fn near_equal_within(self, rhs: Self, threshold: L::Scalar) -> bool {
        self.lanes.all_near_equal(rhs.lanes, threshold)
    }

    /// [`Quat::near_equal_within`] using the configured threshold.
    #[inline]
    #[must_use]
    pub fn near_equal_with(self, rhs: Self, tolerances: &ToleranceConfig) -> bool {
        self.near_equal_within(rhs, tolerances.near_equal_threshold())
    }

    /// Rotation angle below `0.00284714461` radians.
    #[inline]
    #[must_use]
    pub fn near_identity(self) -> bool {
        self.near_identity_within(Self::scalar(DEFAULT_NEAR_IDENTITY_ANGLE))
    }

    /// Rotation angle below `threshold_angle` radians.
    ///
    /// The angle is taken from `|w|`, so `q` and `-q` agree.
    #[inline]
    #[must_use]
    pub fn near_identity_within(self, threshold_angle: L::Scalar) -> bool {
        let positive_w_angle = self.w().abs().acos() * <L::Scalar as Real>::TWO;
        positive_w_angle < threshold_angle
    }

    /// [`Quat::near_identity_within`] using the configured angle.
    #[inline]
    #[must_use]
    pub fn near_identity_with(self, tolerances: &ToleranceConfig) -> bool {
        self.near_identity_within(tolerances.near_identity_threshold())
    }
}

// =============================================================================
// Std traits
// =============================================================================

impl<L: Lanes> Mul for Quat<L> {
    type Output = Self;

    /// See [`Quat::mul`]: `a * b` applies `a` first.
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Quat::mul(self, rhs)
    }
}

impl<L: Lanes> Neg for Quat<L> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Quat::neg(self)
    }
}

impl<L: Lanes> Default for Quat<L> {
    fn default() -> Self {
        Self::identity()
    }
}

/// Exact lane equality; use [`Quat::near_equal`] for tolerances.
impl<L: Lanes> PartialEq for Quat<L> {
    fn eq(&self, other: &Self) -> bool {
        self.to_array() == other.to_array()
    }
}

impl<L: Lanes> fmt::Debug for Quat<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Quat")
            .field("x", &self.x())
            .field("y", &self.y())
            .field("z", &self.z())
            .field("w", &self.w())
            .finish()
    }
}

impl<L: Lanes> From<[L::Scalar; 4]> for Quat<L> {
    #[inline]
    fn from(lanes: [L::Scalar; 4]) -> Self {
        Self::load_unaligned(&lanes)
    }
}

impl From<Quatf> for [f32; 4] {
    #[inline]
    fn from(quat: Quatf) -> Self {
        quat.to_array()
    }
}

impl From<Quatd> for [f64; 4] {
    #[inline]
    fn from(quat: Quatd) -> Self {
        quat.to_array()
    }
}

impl<L: Lanes> From<Vector4<L>> for Quat<L> {
    #[inline]
    fn from(vector: Vector4<L>) -> Self {
        Self::from_vector(vector)
    }
}
