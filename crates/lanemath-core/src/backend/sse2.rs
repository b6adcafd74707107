//! SSE2 storage for x86/x86_64.
//!
//! - `f32`: one `__m128` holding `(x, y, z, w)` in lanes 0..3
//! - `f64`: two `__m128d`, `xy` and `zw`
//!
//! SSE2 is part of the x86_64 baseline; this module is only compiled when the
//! target enables it, so no runtime detection is needed.

// Intrinsics are safe to call from SSE2-enabled code on newer toolchains.
#![allow(unused_unsafe)]

use core::fmt;

#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

use super::{sealed::Sealed, Backend, Lanes};

// =============================================================================
// Single precision
// =============================================================================

/// Four `f32` lanes in one SSE register.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct F32x4(__m128);

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

    const BACKEND: Backend = Backend::Sse2;

    #[inline(always)]
    fn set(x: f32, y: f32, z: f32, w: f32) -> Self {
        // SAFETY: SSE2 enabled for this target (module cfg).
        Self(unsafe { _mm_set_ps(w, z, y, x) })
    }

    #[inline(always)]
    fn splat(value: f32) -> Self {
        // SAFETY: SSE2 enabled for this target (module cfg).
        Self(unsafe { _mm_set1_ps(value) })
    }

    #[inline(always)]
    fn load(input: &[f32; 4]) -> Self {
        // SAFETY: `input` holds four readable f32; `_mm_loadu_ps` has no alignment requirement.
        Self(unsafe { _mm_loadu_ps(input.as_ptr()) })
    }

    #[inline(always)]
    fn store(self, output: &mut [f32; 4]) {
        // SAFETY: `output` holds four writable f32; `_mm_storeu_ps` has no alignment requirement.
        unsafe { _mm_storeu_ps(output.as_mut_ptr(), self.0) }
    }

    #[inline(always)]
    fn x(self) -> f32 {
        // SAFETY: SSE2 enabled for this target (module cfg).
        unsafe { _mm_cvtss_f32(self.0) }
    }

    #[inline(always)]
    fn y(self) -> f32 {
        // SAFETY: SSE2 enabled for this target (module cfg).
        unsafe { _mm_cvtss_f32(_mm_shuffle_ps::<0b01_01_01_01>(self.0, self.0)) }
    }

    #[inline(always)]
    fn z(self) -> f32 {
        // SAFETY: SSE2 enabled for this target (module cfg).
        unsafe { _mm_cvtss_f32(_mm_shuffle_ps::<0b10_10_10_10>(self.0, self.0)) }
    }

    #[inline(always)]
    fn w(self) -> f32 {
        // SAFETY: SSE2 enabled for this target (module cfg).
        unsafe { _mm_cvtss_f32(_mm_shuffle_ps::<0b11_11_11_11>(self.0, self.0)) }
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        // SAFETY: SSE2 enabled for this target (module cfg).
        Self(unsafe { _mm_add_ps(self.0, rhs.0) })
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        // SAFETY: SSE2 enabled for this target (module cfg).
        Self(unsafe { _mm_sub_ps(self.0, rhs.0) })
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        // SAFETY: SSE2 enabled for this target (module cfg).
        Self(unsafe { _mm_mul_ps(self.0, rhs.0) })
    }

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        // SAFETY: SSE2 enabled for this target (module cfg).
        Self(unsafe { _mm_div_ps(self.0, rhs.0) })
    }

    #[inline(always)]
    fn scale(self, factor: f32) -> Self {
        // SAFETY: SSE2 enabled for this target (module cfg).
        Self(unsafe { _mm_mul_ps(self.0, _mm_set1_ps(factor)) })
    }

    #[inline(always)]
    fn neg(self) -> Self {
        // Flip the sign bit of every lane.
        // SAFETY: SSE2 enabled for this target (module cfg).
        Self(unsafe { _mm_xor_ps(self.0, _mm_set1_ps(-0.0)) })
    }

    #[inline(always)]
    fn abs(self) -> Self {
        // SAFETY: SSE2 enabled for this target (module cfg).
        Self(unsafe { _mm_andnot_ps(_mm_set1_ps(-0.0), self.0) })
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        // `minps` returns the second operand unless `self < rhs`, same as the scalar kernel.
        // SAFETY: SSE2 enabled for this target (module cfg).
        Self(unsafe { _mm_min_ps(self.0, rhs.0) })
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        // SAFETY: SSE2 enabled for this target (module cfg).
        Self(unsafe { _mm_max_ps(self.0, rhs.0) })
    }

    #[inline]
    fn dot4(self, rhs: Self) -> f32 {
        // SAFETY: SSE2 enabled for this target (module cfg).
        unsafe {
            let products = _mm_mul_ps(self.0, rhs.0); // x y z w
            let swapped = _mm_shuffle_ps::<0b10_11_00_01>(products, products); // y x w z
            let pair_sums = _mm_add_ps(products, swapped); // x+y x+y z+w z+w
            let high = _mm_movehl_ps(swapped, pair_sums); // z+w ...
            _mm_cvtss_f32(_mm_add_ss(pair_sums, high))
        }
    }

    #[inline]
    fn all_near_equal(self, rhs: Self, threshold: f32) -> bool {
        // SAFETY: SSE2 enabled for this target (module cfg).
        unsafe {
            let delta = _mm_andnot_ps(_mm_set1_ps(-0.0), _mm_sub_ps(self.0, rhs.0));
            let within = _mm_cmple_ps(delta, _mm_set1_ps(threshold));
            _mm_movemask_ps(within) == 0b1111
        }
    }

    #[inline(always)]
    fn quat_conjugate(self) -> Self {
        // SAFETY: SSE2 enabled for this target (module cfg).
        Self(unsafe { _mm_xor_ps(self.0, _mm_set_ps(0.0, -0.0, -0.0, -0.0)) })
    }

    #[inline]
    fn quat_mul(lhs: Self, rhs: Self) -> Self {
        // Four broadcast-multiply terms; each lhs permutation is paired with
        // the sign pattern of the component expansion.
        // SAFETY: SSE2 enabled for this target (module cfg).
        unsafe {
            let l = lhs.0;
            let r = rhs.0;

            let control_wzyx = _mm_set_ps(-1.0, 1.0, -1.0, 1.0);
            let control_zwxy = _mm_set_ps(-1.0, -1.0, 1.0, 1.0);
            let control_yxwz = _mm_set_ps(-1.0, 1.0, 1.0, -1.0);

            let r_xxxx = _mm_shuffle_ps::<0b00_00_00_00>(r, r);
            let r_yyyy = _mm_shuffle_ps::<0b01_01_01_01>(r, r);
            let r_zzzz = _mm_shuffle_ps::<0b10_10_10_10>(r, r);
            let r_wwww = _mm_shuffle_ps::<0b11_11_11_11>(r, r);

            let l_wzyx = _mm_shuffle_ps::<0b00_01_10_11>(l, l);
            let l_zwxy = _mm_shuffle_ps::<0b01_00_11_10>(l, l);
            let l_yxwz = _mm_shuffle_ps::<0b10_11_00_01>(l, l);

            let term_w = _mm_mul_ps(r_wwww, l);
            let term_x = _mm_mul_ps(_mm_mul_ps(r_xxxx, l_wzyx), control_wzyx);
            let term_y = _mm_mul_ps(_mm_mul_ps(r_yyyy, l_zwxy), control_zwxy);
            let term_z = _mm_mul_ps(_mm_mul_ps(r_zzzz, l_yxwz), control_yxwz);

            Self(_mm_add_ps(
                _mm_add_ps(term_w, term_x),
                _mm_add_ps(term_y, term_z),
            ))
        }
    }
}

// =============================================================================
// Double precision
// =============================================================================

/// Four `f64` lanes in two SSE2 registers.
#[derive(Clone, Copy)]
#[repr(C)]
pub struct F64x4 {
    xy: __m128d,
    zw: __m128d,
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
    fn from_halves(xy: __m128d, zw: __m128d) -> Self {
        Self { xy, zw }
    }
}

impl Lanes for F64x4 {
    type Scalar = f64;

    const BACKEND: Backend = Backend::Sse2;

    #[inline(always)]
    fn set(x: f64, y: f64, z: f64, w: f64) -> Self {
        // SAFETY: SSE2 enabled for this target (module cfg).
        unsafe { Self::from_halves(_mm_set_pd(y, x), _mm_set_pd(w, z)) }
    }

    #[inline(always)]
    fn splat(value: f64) -> Self {
        // SAFETY: SSE2 enabled for this target (module cfg).
        let half = unsafe { _mm_set1_pd(value) };
        Self::from_halves(half, half)
    }

    #[inline(always)]
    fn load(input: &[f64; 4]) -> Self {
        // SAFETY: `input` holds four readable f64, so both two-lane reads are in bounds;
        // `_mm_loadu_pd` has no alignment requirement.
        unsafe {
            let ptr = input.as_ptr();
            Self::from_halves(_mm_loadu_pd(ptr), _mm_loadu_pd(ptr.add(2)))
        }
    }

    #[inline(always)]
    fn store(self, output: &mut [f64; 4]) {
        // SAFETY: `output` holds four writable f64; `_mm_storeu_pd` has no alignment requirement.
        unsafe {
            let ptr = output.as_mut_ptr();
            _mm_storeu_pd(ptr, self.xy);
            _mm_storeu_pd(ptr.add(2), self.zw);
        }
    }

    #[inline(always)]
    fn x(self) -> f64 {
        // SAFETY: SSE2 enabled for this target (module cfg).
        unsafe { _mm_cvtsd_f64(self.xy) }
    }

    #[inline(always)]
    fn y(self) -> f64 {
        // SAFETY: SSE2 enabled for this target (module cfg).
        unsafe { _mm_cvtsd_f64(_mm_unpackhi_pd(self.xy, self.xy)) }
    }

    #[inline(always)]
    fn z(self) -> f64 {
        // SAFETY: SSE2 enabled for this target (module cfg).
        unsafe { _mm_cvtsd_f64(self.zw) }
    }

    #[inline(always)]
    fn w(self) -> f64 {
        // SAFETY: SSE2 enabled for this target (module cfg).
        unsafe { _mm_cvtsd_f64(_mm_unpackhi_pd(self.zw, self.zw)) }
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        // SAFETY: SSE2 enabled for this target (module cfg).
        unsafe { Self::from_halves(_mm_add_pd(self.xy, rhs.xy), _mm_add_pd(self.zw, rhs.zw)) }
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        // SAFETY: SSE2 enabled for this target (module cfg).
        unsafe { Self::from_halves(_mm_sub_pd(self.xy, rhs.xy), _mm_sub_pd(self.zw, rhs.zw)) }
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        // SAFETY: SSE2 enabled for this target (module cfg).
        unsafe { Self::from_halves(_mm_mul_pd(self.xy, rhs.xy), _mm_mul_pd(self.zw, rhs.zw)) }
    }

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        // SAFETY: SSE2 enabled for this target (module cfg).
        unsafe { Self::from_halves(_mm_div_pd(self.xy, rhs.xy), _mm_div_pd(self.zw, rhs.zw)) }
    }

    #[inline(always)]
    fn scale(self, factor: f64) -> Self {
        // SAFETY: SSE2 enabled for this target (module cfg).
        unsafe {
            let factor = _mm_set1_pd(factor);
            Self::from_halves(_mm_mul_pd(self.xy, factor), _mm_mul_pd(self.zw, factor))
        }
    }

    #[inline(always)]
    fn neg(self) -> Self {
        // SAFETY: SSE2 enabled for this target (module cfg).
        unsafe {
            let sign = _mm_set1_pd(-0.0);
            Self::from_halves(_mm_xor_pd(self.xy, sign), _mm_xor_pd(self.zw, sign))
        }
    }

    #[inline(always)]
    fn abs(self) -> Self {
        // SAFETY: SSE2 enabled for this target (module cfg).
        unsafe {
            let sign = _mm_set1_pd(-0.0);
            Self::from_halves(_mm_andnot_pd(sign, self.xy), _mm_andnot_pd(sign, self.zw))
        }
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        // SAFETY: SSE2 enabled for this target (module cfg).
        unsafe { Self::from_halves(_mm_min_pd(self.xy, rhs.xy), _mm_min_pd(self.zw, rhs.zw)) }
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        // SAFETY: SSE2 enabled for this target (module cfg).
        unsafe { Self::from_halves(_mm_max_pd(self.xy, rhs.xy), _mm_max_pd(self.zw, rhs.zw)) }
    }

    #[inline]
    fn dot4(self, rhs: Self) -> f64 {
        // SAFETY: SSE2 enabled for this target (module cfg).
        unsafe {
            let xy = _mm_mul_pd(self.xy, rhs.xy);
            let zw = _mm_mul_pd(self.zw, rhs.zw);
            let sums = _mm_add_pd(xy, zw); // x+z y+w
            let high = _mm_unpackhi_pd(sums, sums);
            _mm_cvtsd_f64(_mm_add_sd(sums, high))
        }
    }

    #[inline]
    fn all_near_equal(self, rhs: Self, threshold: f64) -> bool {
        // SAFETY: SSE2 enabled for this target (module cfg).
        unsafe {
            let sign = _mm_set1_pd(-0.0);
            let limit = _mm_set1_pd(threshold);
            let delta_xy = _mm_andnot_pd(sign, _mm_sub_pd(self.xy, rhs.xy));
            let delta_zw = _mm_andnot_pd(sign, _mm_sub_pd(self.zw, rhs.zw));
            let within_xy = _mm_movemask_pd(_mm_cmple_pd(delta_xy, limit));
            let within_zw = _mm_movemask_pd(_mm_cmple_pd(delta_zw, limit));
            (within_xy & within_zw) == 0b11
        }
    }

    #[inline(always)]
    fn quat_conjugate(self) -> Self {
        // SAFETY: SSE2 enabled for this target (module cfg).
        unsafe {
            Self::from_halves(
                _mm_xor_pd(self.xy, _mm_set1_pd(-0.0)),
                _mm_xor_pd(self.zw, _mm_set_pd(0.0, -0.0)),
            )
        }
    }
}

// =============================================================================
// Precision conversion
// =============================================================================

/// Widens four `f32` lanes to four `f64` lanes (`cvtps2pd` on each half).
#[inline]
#[must_use]
pub fn widen(lanes: F32x4) -> F64x4 {
    // SAFETY: SSE2 enabled for this target (module cfg).
    unsafe {
        F64x4::from_halves(
            _mm_cvtps_pd(lanes.0),
            _mm_cvtps_pd(_mm_movehl_ps(lanes.0, lanes.0)),
        )
    }
}

/// Narrows four `f64` lanes to four `f32` lanes (`cvtpd2ps` on each half).
#[inline]
#[must_use]
pub fn narrow(lanes: F64x4) -> F32x4 {
    // SAFETY: SSE2 enabled for this target (module cfg).
    unsafe { F32x4(_mm_movelh_ps(_mm_cvtpd_ps(lanes.xy), _mm_cvtpd_ps(lanes.zw))) }
}
