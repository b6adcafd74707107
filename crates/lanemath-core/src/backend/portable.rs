//! Portable scalar storage.
//!
//! Four plain fields per value. Used when no SIMD instruction set is
//! selected for a precision, and always compiled so the accessor
//! formulation can serve as a reference next to the SIMD storage.

use super::{sealed::Sealed, Backend, Lanes};

macro_rules! portable_lanes {
    ($name:ident, $scalar:ty, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Default)]
        #[repr(C)]
        pub struct $name {
            x: $scalar,
            y: $scalar,
            z: $scalar,
            w: $scalar,
        }

        impl Sealed for $name {}

        impl Lanes for $name {
            type Scalar = $scalar;

            const BACKEND: Backend = Backend::Scalar;

            #[inline(always)]
            fn set(x: $scalar, y: $scalar, z: $scalar, w: $scalar) -> Self {
                Self { x, y, z, w }
            }

            #[inline(always)]
            fn splat(value: $scalar) -> Self {
                Self::set(value, value, value, value)
            }

            #[inline(always)]
            fn load(input: &[$scalar; 4]) -> Self {
                Self::set(input[0], input[1], input[2], input[3])
            }

            #[inline(always)]
            fn store(self, output: &mut [$scalar; 4]) {
                *output = [self.x, self.y, self.z, self.w];
            }

            #[inline(always)]
            fn x(self) -> $scalar {
                self.x
            }

            #[inline(always)]
            fn y(self) -> $scalar {
                self.y
            }

            #[inline(always)]
            fn z(self) -> $scalar {
                self.z
            }

            #[inline(always)]
            fn w(self) -> $scalar {
                self.w
            }

            #[inline(always)]
            fn add(self, rhs: Self) -> Self {
                Self::set(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z, self.w + rhs.w)
            }

            #[inline(always)]
            fn sub(self, rhs: Self) -> Self {
                Self::set(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z, self.w - rhs.w)
            }

            #[inline(always)]
            fn mul(self, rhs: Self) -> Self {
                Self::set(self.x * rhs.x, self.y * rhs.y, self.z * rhs.z, self.w * rhs.w)
            }

            #[inline(always)]
            fn div(self, rhs: Self) -> Self {
                Self::set(self.x / rhs.x, self.y / rhs.y, self.z / rhs.z, self.w / rhs.w)
            }

            #[inline(always)]
            fn scale(self, factor: $scalar) -> Self {
                Self::set(self.x * factor, self.y * factor, self.z * factor, self.w * factor)
            }

            #[inline(always)]
            fn neg(self) -> Self {
                Self::set(-self.x, -self.y, -self.z, -self.w)
            }
        }
    };
}

portable_lanes!(F32x4, f32, "Four `f32` lanes stored as plain fields.");
portable_lanes!(F64x4, f64, "Four `f64` lanes stored as plain fields.");
