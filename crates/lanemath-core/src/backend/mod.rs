//! Storage backends for four-lane values.
//!
//! Every precision is bound at build time to exactly one storage type:
//!
//! - `portable`: four scalar fields, always compiled
//! - `sse2`: one `__m128` for `f32`, two `__m128d` for `f64` (x86/x86_64)
//! - `neon`: one `float32x4_t` for `f32`, two `float64x2_t` for `f64` (aarch64)
//!
//! `build.rs` resolves the selection into `cfg(lanemath_f32 = "...")` and
//! `cfg(lanemath_f64 = "...")`; [`F32Lanes`] and [`F64Lanes`] alias the
//! chosen types. There is no runtime dispatch.
//!
//! The algorithmic layers (`vector4`, `quat`) are written once against the
//! [`Lanes`] accessor contract. SIMD storage may override the provided
//! methods with register-level fast paths; the provided (accessor-based)
//! bodies stay the reference those overrides are tested against.

use core::fmt;

use crate::scalar::Real;

pub mod portable;

#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "sse2"))]
pub mod sse2;

#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
pub mod neon;


// =============================================================================
// Unsafe Invariants Reference
// =============================================================================
// SAFETY: Shared invariants for intrinsic unsafe blocks in this module tree.
// - Condition 1: `sse2` and `neon` are only compiled when the target enables
//   the instruction set, so every intrinsic call is supported by the CPU.
// - Condition 2: Loads and stores go through `&[T; 4]` / `&mut [T; 4]`, which
//   guarantees four readable/writable lanes; only unaligned-safe load/store
//   intrinsics are used.
// Reason: Intrinsics are required for the register-level fast paths.

// =============================================================================
// Backend identification
// =============================================================================

/// Storage strategy bound to a precision at build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Four independent scalar fields.
    Scalar,
    /// SSE2 registers (x86/x86_64).
    Sse2,
    /// NEON registers (aarch64).
    Neon,
}

impl Backend {
    /// Short lowercase name, matching the `lanemath_f32`/`lanemath_f64` cfg values.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Sse2 => "sse2",
            Self::Neon => "neon",
        }
    }

    /// True for the SIMD register backends.
    #[must_use]
    pub const fn is_simd(self) -> bool {
        !matches!(self, Self::Scalar)
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Lane contract
// =============================================================================

mod sealed {
    pub trait Sealed {}
}

/// Four lanes `(x, y, z, w)` of one precision in a backend-specific layout.
///
/// Accessors always return the logical lane regardless of physical layout.
/// Sealed: implemented only by the storage types of this module.
#[allow(clippy::should_implement_trait)] // Lane primitives, not operator overloads.
pub trait Lanes: sealed::Sealed + Copy + fmt::Debug + Send + Sync + 'static {
    /// Lane precision.
    type Scalar: Real;

    /// Backend providing this storage.
    const BACKEND: Backend;

    /// Builds from four lanes.
    fn set(x: Self::Scalar, y: Self::Scalar, z: Self::Scalar, w: Self::Scalar) -> Self;

    /// Broadcasts one value to every lane.
    fn splat(value: Self::Scalar) -> Self;

    /// Reads `(x, y, z, w)` from memory. No alignment requirement beyond the scalar's.
    fn load(input: &[Self::Scalar; 4]) -> Self;

    /// Writes `(x, y, z, w)` to memory.
    fn store(self, output: &mut [Self::Scalar; 4]);

    /// Lane 0.
    fn x(self) -> Self::Scalar;
    /// Lane 1.
    fn y(self) -> Self::Scalar;
    /// Lane 2.
    fn z(self) -> Self::Scalar;
    /// Lane 3.
    fn w(self) -> Self::Scalar;

    /// Lanewise `self + rhs`.
    fn add(self, rhs: Self) -> Self;
    /// Lanewise `self - rhs`.
    fn sub(self, rhs: Self) -> Self;
    /// Lanewise `self * rhs`.
    fn mul(self, rhs: Self) -> Self;
    /// Lanewise `self / rhs`.
    fn div(self, rhs: Self) -> Self;
    /// Every lane multiplied by `factor`.
    fn scale(self, factor: Self::Scalar) -> Self;
    /// Every lane negated.
    fn neg(self) -> Self;

    // -------------------------------------------------------------------------
    // Provided: accessor formulation (reference for SIMD overrides)
    // -------------------------------------------------------------------------

    /// Lanes as an array in `(x, y, z, w)` order.
    #[inline]
    fn to_array(self) -> [Self::Scalar; 4] {
        [self.x(), self.y(), self.z(), self.w()]
    }

    /// Lanewise absolute value.
    #[inline]
    fn abs(self) -> Self {
        Self::set(self.x().abs(), self.y().abs(), self.z().abs(), self.w().abs())
    }

    /// Lanewise minimum.
    #[inline]
    fn min(self, rhs: Self) -> Self {
        Self::set(
            self.x().min(rhs.x()),
            self.y().min(rhs.y()),
            self.z().min(rhs.z()),
            self.w().min(rhs.w()),
        )
    }

    /// Lanewise maximum.
    #[inline]
    fn max(self, rhs: Self) -> Self {
        Self::set(
            self.x().max(rhs.x()),
            self.y().max(rhs.y()),
            self.z().max(rhs.z()),
            self.w().max(rhs.w()),
        )
    }

    /// Dot product over `x`, `y`, `z`.
    #[inline]
    fn dot3(self, rhs: Self) -> Self::Scalar {
        (self.x() * rhs.x()) + (self.y() * rhs.y()) + (self.z() * rhs.z())
    }

    /// Dot product over all four lanes.
    #[inline]
    fn dot4(self, rhs: Self) -> Self::Scalar {
        (self.x() * rhs.x()) + (self.y() * rhs.y()) + (self.z() * rhs.z()) + (self.w() * rhs.w())
    }

    /// True when `|self - rhs| <= threshold` for every lane.
    #[inline]
    fn all_near_equal(self, rhs: Self, threshold: Self::Scalar) -> bool {
        (self.x() - rhs.x()).abs() <= threshold
            && (self.y() - rhs.y()).abs() <= threshold
            && (self.z() - rhs.z()).abs() <= threshold
            && (self.w() - rhs.w()).abs() <= threshold
    }

    /// True when no lane is NaN or infinite.
    #[inline]
    fn all_finite(self) -> bool {
        self.x().is_finite() && self.y().is_finite() && self.z().is_finite() && self.w().is_finite()
    }

    /// Negates `x`, `y`, `z` and keeps `w`.
    #[inline]
    fn quat_conjugate(self) -> Self {
        Self::set(-self.x(), -self.y(), -self.z(), self.w())
    }

    /// Quaternion product with `lhs` applied first:
    /// `local_to_world = quat_mul(local_to_object, object_to_world)`.
    #[inline]
    fn quat_mul(lhs: Self, rhs: Self) -> Self {
        let (lhs_x, lhs_y, lhs_z, lhs_w) = (lhs.x(), lhs.y(), lhs.z(), lhs.w());
        let (rhs_x, rhs_y, rhs_z, rhs_w) = (rhs.x(), rhs.y(), rhs.z(), rhs.w());

        let x = (rhs_w * lhs_x) + (rhs_x * lhs_w) + (rhs_y * lhs_z) - (rhs_z * lhs_y);
        let y = (rhs_w * lhs_y) - (rhs_x * lhs_z) + (rhs_y * lhs_w) + (rhs_z * lhs_x);
        let z = (rhs_w * lhs_z) + (rhs_x * lhs_y) - (rhs_y * lhs_x) + (rhs_z * lhs_w);
        let w = (rhs_w * lhs_w) - (rhs_x * lhs_x) - (rhs_y * lhs_y) - (rhs_z * lhs_z);

        Self::set(x, y, z, w)
    }
}

// =============================================================================
// Build-time selection
// =============================================================================

/// Storage used for single precision in this build.
#[cfg(lanemath_f32 = "sse2")]
pub type F32Lanes = sse2::F32x4;
/// Storage used for single precision in this build.
#[cfg(lanemath_f32 = "neon")]
pub type F32Lanes = neon::F32x4;
/// Storage used for single precision in this build.
#[cfg(not(any(lanemath_f32 = "sse2", lanemath_f32 = "neon")))]
pub type F32Lanes = portable::F32x4;

/// Storage used for double precision in this build.
#[cfg(lanemath_f64 = "sse2")]
pub type F64Lanes = sse2::F64x4;
/// Storage used for double precision in this build.
#[cfg(lanemath_f64 = "neon")]
pub type F64Lanes = neon::F64x4;
/// Storage used for double precision in this build.
#[cfg(not(any(lanemath_f64 = "sse2", lanemath_f64 = "neon")))]
pub type F64Lanes = portable::F64x4;

/// Backend selected for `f32` values.
pub const F32_BACKEND: Backend = <F32Lanes as Lanes>::BACKEND;

/// Backend selected for `f64` values.
pub const F64_BACKEND: Backend = <F64Lanes as Lanes>::BACKEND;

/// Per-precision backend selection of this build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendSelection {
    /// Backend behind `Vector4f` / `Quatf`.
    pub f32: Backend,
    /// Backend behind `Vector4d` / `Quatd`.
    pub f64: Backend,
}

/// Returns the backend bound to each precision.
#[inline]
#[must_use]
pub const fn selection() -> BackendSelection {
    BackendSelection {
        f32: F32_BACKEND,
        f64: F64_BACKEND,
    }
}

/// Emits one `info` event describing the build's backend selection.
///
/// Call this at application startup; the numeric hot path never logs.
pub fn log_selection() {
    let selected = selection();
    tracing::info!(
        f32_backend = %selected.f32,
        f64_backend = %selected.f64,
        "lanemath storage backends"
    );
    if !selected.f32.is_simd() || !selected.f64.is_simd() {
        tracing::debug!("portable scalar storage in use for at least one precision");
    }
}

// =============================================================================
// Lane conversion
// =============================================================================

/// Converts lanes between any two storage types through the accessors.
///
/// Each lane is converted independently with the platform's float-to-float
/// conversion; no renormalization or rounding-mode guarantee beyond it.
#[inline]
#[must_use]
pub fn convert<S: Lanes, D: Lanes>(source: S) -> D {
    D::set(
        D::Scalar::from_f64(source.x().to_f64()),
        D::Scalar::from_f64(source.y().to_f64()),
        D::Scalar::from_f64(source.z().to_f64()),
        D::Scalar::from_f64(source.w().to_f64()),
    )
}

#[cfg(all(lanemath_f32 = "sse2", lanemath_f64 = "sse2"))]
pub(crate) use sse2::{narrow, widen};

#[cfg(all(lanemath_f32 = "neon", lanemath_f64 = "neon"))]
pub(crate) use neon::{narrow, widen};

/// Widens the selected `f32` storage to the selected `f64` storage.
#[cfg(not(any(
    all(lanemath_f32 = "sse2", lanemath_f64 = "sse2"),
    all(lanemath_f32 = "neon", lanemath_f64 = "neon")
)))]
#[inline]
pub(crate) fn widen(lanes: F32Lanes) -> F64Lanes {
    convert(lanes)
}

/// Narrows the selected `f64` storage to the selected `f32` storage.
#[cfg(not(any(
    all(lanemath_f32 = "sse2", lanemath_f64 = "sse2"),
    all(lanemath_f32 = "neon", lanemath_f64 = "neon")
)))]
#[inline]
pub(crate) fn narrow(lanes: F64Lanes) -> F32Lanes {
    convert(lanes)
}
