//! ARM NEON storage for aarch64.
//!
//! - `f32`: one `float32x4_t` holding `(x, y, z, w)` in lanes 0..3
//! - `f64`: two `float64x2_t`, `xy` and `zw`
//!
//! NEON is always available on aarch64, so no runtime detection is needed.
//! `min`/`max` keep the provided accessor bodies: `fmin`/`fmax` propagate NaN
//! differently from the scalar kernel.

// Intrinsics are safe to call from NEON-enabled code on newer toolchains.
#![allow(unused_unsafe)]

use core::arch::aarch64::*;
use core::fmt;

use super::{sealed::Sealed, Backend, Lanes};

// =============================================================================
// Single precision
// =============================================================================

/// Four `f32` lanes in one NEON register.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct F32x4(float32x4_t);

impl Sealed for F32x4 {}

impl fmt::Debug for F32x4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("F32x4")
            .field("x", &self.x())
            .field("y", &self.y())
            .field("z", &self.z())
            .field("w", &self.w())
            .finish()
    }
}

impl Lanes for F32x4 {
    type Scalar = f32;

    const BACKEND: Backend = Backend::Neon;

    #[inline(always)]
    fn set(x: f32, y: f32, z: f32, w: f32) -> Self {
        let lanes = [x, y, z, w];
        // SAFETY: `lanes` is four readable f32; vld1q_f32 handles unaligned loads.
        Self(unsafe { vld1q_f32(lanes.as_ptr()) })
    }

    #[inline(always)]
    fn splat(value: f32) -> Self {
        // SAFETY: NEON enabled for this target (module cfg).
        Self(unsafe { vdupq_n_f32(value) })
    }

    #[inline(always)]
    fn load(input: &[f32; 4]) -> Self {
        // SAFETY: `input` holds four readable f32; vld1q_f32 handles unaligned loads.
        Self(unsafe { vld1q_f32(input.as_ptr()) })
    }

    #[inline(always)]
    fn store(self, output: &mut [f32; 4]) {
        // SAFETY: `output` holds four writable f32; vst1q_f32 handles unaligned stores.
        unsafe { vst1q_f32(output.as_mut_ptr(), self.0) }
    }

    #[inline(always)]
    fn x(self) -> f32 {
        // SAFETY: NEON enabled for this target (module cfg).
        unsafe { vgetq_lane_f32::<0>(self.0) }
    }

    #[inline(always)]
    fn y(self) -> f32 {
        // SAFETY: NEON enabled for this target (module cfg).
        unsafe { vgetq_lane_f32::<1>(self.0) }
    }

    #[inline(always)]
    fn z(self) -> f32 {
        // SAFETY: NEON enabled for this target (module cfg).
        unsafe { vgetq_lane_f32::<2>(self.0) }
    }

    #[inline(always)]
    fn w(self) -> f32 {
        // SAFETY: NEON enabled for this target (module cfg).
        unsafe { vgetq_lane_f32::<3>(self.0) }
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        // SAFETY: NEON enabled for this target (module cfg).
        Self(unsafe { vaddq_f32(self.0, rhs.0) })
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        // SAFETY: NEON enabled for this target (module cfg).
        Self(unsafe { vsubq_f32(self.0, rhs.0) })
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        // SAFETY: NEON enabled for this target (module cfg).
        Self(unsafe { vmulq_f32(self.0, rhs.0) })
    }

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        // SAFETY: NEON enabled for this target (module cfg).
        Self(unsafe { vdivq_f32(self.0, rhs.0) })
    }

    #[inline(always)]
    fn scale(self, factor: f32) -> Self {
        // SAFETY: NEON enabled for this target (module cfg).
        Self(unsafe { vmulq_n_f32(self.0, factor) })
    }

    #[inline(always)]
    fn neg(self) -> Self {
        // SAFETY: NEON enabled for this target (module cfg).
        Self(unsafe { vnegq_f32(self.0) })
    }

    #[inline(always)]
    fn abs(self) -> Self {
        // SAFETY: NEON enabled for this target (module cfg).
        Self(unsafe { vabsq_f32(self.0) })
    }

    #[inline]
    fn dot4(self, rhs: Self) -> f32 {
        // SAFETY: NEON enabled for this target (module cfg).
        unsafe { vaddvq_f32(vmulq_f32(self.0, rhs.0)) }
    }

    #[inline]
    fn all_near_equal(self, rhs: Self, threshold: f32) -> bool {
        // SAFETY: NEON enabled for this target (module cfg).
        unsafe {
            let within = vcleq_f32(vabdq_f32(self.0, rhs.0), vdupq_n_f32(threshold));
            vminvq_u32(within) == u32::MAX
        }
    }

    #[inline]
    fn quat_mul(lhs: Self, rhs: Self) -> Self {
        const CONTROL_WZYX: [f32; 4] = [1.0, -1.0, 1.0, -1.0];
        const CONTROL_ZWXY: [f32; 4] = [1.0, 1.0, -1.0, -1.0];
        const CONTROL_YXWZ: [f32; 4] = [-1.0, 1.0, 1.0, -1.0];

        // SAFETY: NEON enabled for this target (module cfg); the control
        // arrays are four readable f32.
        unsafe {
            let l = lhs.0;
            let r = rhs.0;

            let l_yxwz = vrev64q_f32(l);
            let l_wzyx = vextq_f32::<2>(l_yxwz, l_yxwz);
            let l_zwxy = vextq_f32::<2>(l, l);

            let term_w = vmulq_f32(vdupq_laneq_f32::<3>(r), l);
            let term_x = vmulq_f32(
                vmulq_f32(vdupq_laneq_f32::<0>(r), l_wzyx),
                vld1q_f32(CONTROL_WZYX.as_ptr()),
            );
            let term_y = vmulq_f32(
                vmulq_f32(vdupq_laneq_f32::<1>(r), l_zwxy),
                vld1q_f32(CONTROL_ZWXY.as_ptr()),
            );
            let term_z = vmulq_f32(
                vmulq_f32(vdupq_laneq_f32::<2>(r), l_yxwz),
                vld1q_f32(CONTROL_YXWZ.as_ptr()),
            );

            Self(vaddq_f32(vaddq_f32(term_w, term_x), vaddq_f32(term_y, term_z)))
        }
    }
}

// =============================================================================
// Double precision
// =============================================================================

/// Four `f64` lanes in two NEON registers.
#[derive(Clone, Copy)]
#[repr(C)]
pub struct F64x4 {
    xy: float64x2_t,
    zw: float64x2_t,
}

impl Sealed for F64x4 {}

impl fmt::Debug for F64x4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("F64x4")
            .field("x", &self.x())
            .field("y", &self.y())
            .field("z", &self.z())
            .field("w", &self.w())
            .finish()
    }
}

impl F64x4 {
    #[inline(always)]
    fn from_halves(xy: float64x2_t, zw: float64x2_t) -> Self {
        Self { xy, zw }
    }
}

impl Lanes for F64x4 {
    type Scalar = f64;

    const BACKEND: Backend = Backend::Neon;

    #[inline(always)]
    fn set(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self::load(&[x, y, z, w])
    }

    #[inline(always)]
    fn splat(value: f64) -> Self {
        // SAFETY: NEON enabled for this target (module cfg).
        let half = unsafe { vdupq_n_f64(value) };
        Self::from_halves(half, half)
    }

    #[inline(always)]
    fn load(input: &[f64; 4]) -> Self {
        // SAFETY: `input` holds four readable f64, so both two-lane reads are in bounds.
        unsafe {
            let ptr = input.as_ptr();
            Self::from_halves(vld1q_f64(ptr), vld1q_f64(ptr.add(2)))
        }
    }

    #[inline(always)]
    fn store(self, output: &mut [f64; 4]) {
        // SAFETY: `output` holds four writable f64.
        unsafe {
            let ptr = output.as_mut_ptr();
            vst1q_f64(ptr, self.xy);
            vst1q_f64(ptr.add(2), self.zw);
        }
    }

    #[inline(always)]
    fn x(self) -> f64 {
        // SAFETY: NEON enabled for this target (module cfg).
        unsafe { vgetq_lane_f64::<0>(self.xy) }
    }

    #[inline(always)]
    fn y(self) -> f64 {
        // SAFETY: NEON enabled for this target (module cfg).
        unsafe { vgetq_lane_f64::<1>(self.xy) }
    }

    #[inline(always)]
    fn z(self) -> f64 {
        // SAFETY: NEON enabled for this target (module cfg).
        unsafe { vgetq_lane_f64::<0>(self.zw) }
    }

    #[inline(always)]
    fn w(self) -> f64 {
        // SAFETY: NEON enabled for this target (module cfg).
        unsafe { vgetq_lane_f64::<1>(self.zw) }
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        // SAFETY: NEON enabled for this target (module cfg).
        unsafe { Self::from_halves(vaddq_f64(self.xy, rhs.xy), vaddq_f64(self.zw, rhs.zw)) }
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        // SAFETY: NEON enabled for this target (module cfg).
        unsafe { Self::from_halves(vsubq_f64(self.xy, rhs.xy), vsubq_f64(self.zw, rhs.zw)) }
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        // SAFETY: NEON enabled for this target (module cfg).
        unsafe { Self::from_halves(vmulq_f64(self.xy, rhs.xy), vmulq_f64(self.zw, rhs.zw)) }
    }

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        // SAFETY: NEON enabled for this target (module cfg).
        unsafe { Self::from_halves(vdivq_f64(self.xy, rhs.xy), vdivq_f64(self.zw, rhs.zw)) }
    }

    #[inline(always)]
    fn scale(self, factor: f64) -> Self {
        // SAFETY: NEON enabled for this target (module cfg).
        unsafe { Self::from_halves(vmulq_n_f64(self.xy, factor), vmulq_n_f64(self.zw, factor)) }
    }

    #[inline(always)]
    fn neg(self) -> Self {
        // SAFETY: NEON enabled for this target (module cfg).
        unsafe { Self::from_halves(vnegq_f64(self.xy), vnegq_f64(self.zw)) }
    }

    #[inline(always)]
    fn abs(self) -> Self {
        // SAFETY: NEON enabled for this target (module cfg).
        unsafe { Self::from_halves(vabsq_f64(self.xy), vabsq_f64(self.zw)) }
    }

    #[inline]
    fn dot4(self, rhs: Self) -> f64 {
        // SAFETY: NEON enabled for this target (module cfg).
        unsafe {
            let sums = vaddq_f64(vmulq_f64(self.xy, rhs.xy), vmulq_f64(self.zw, rhs.zw));
            vaddvq_f64(sums)
        }
    }

    #[inline]
    fn all_near_equal(self, rhs: Self, threshold: f64) -> bool {
        // SAFETY: NEON enabled for this target (module cfg).
        unsafe {
            let limit = vdupq_n_f64(threshold);
            let within_xy = vcleq_f64(vabdq_f64(self.xy, rhs.xy), limit);
            let within_zw = vcleq_f64(vabdq_f64(self.zw, rhs.zw), limit);
            let within = vandq_u64(within_xy, within_zw);
            (vgetq_lane_u64::<0>(within) & vgetq_lane_u64::<1>(within)) == u64::MAX
        }
    }
}

// =============================================================================
// Precision conversion
// =============================================================================

/// Widens four `f32` lanes to four `f64` lanes (`fcvtl`/`fcvtl2`).
#[inline]
#[must_use]
pub fn widen(lanes: F32x4) -> F64x4 {
    // SAFETY: NEON enabled for this target (module cfg).
    unsafe {
        F64x4::from_halves(
            vcvt_f64_f32(vget_low_f32(lanes.0)),
            vcvt_high_f64_f32(lanes.0),
        )
    }
}

/// Narrows four `f64` lanes to four `f32` lanes (`fcvtn`/`fcvtn2`).
#[inline]
#[must_use]
pub fn narrow(lanes: F64x4) -> F32x4 {
    // SAFETY: NEON enabled for this target (module cfg).
    unsafe { F32x4(vcvt_high_f32_f64(vcvt_f32_f64(lanes.xy), lanes.zw)) }
}
