//! Cross-precision casts.
//!
//! Each lane is converted independently with the platform's float-to-float
//! conversion. Narrowing rounds to the nearest `f32`; widening is exact.
//! Quaternions are not renormalized after a cast.
//!
//! When both precisions sit on the same SIMD backend the conversion stays in
//! registers; otherwise it goes through the lane accessors.

use crate::backend::{self, F32Lanes, F64Lanes};
use crate::quat::Quat;
use crate::vector4::Vector4;

impl Vector4<F64Lanes> {
    /// Narrows every lane to single precision.
    #[inline]
    #[must_use]
    pub fn cast(self) -> Vector4<F32Lanes> {
        Vector4::from_lanes(backend::narrow(self.lanes()))
    }
}

impl Vector4<F32Lanes> {
    /// Widens every lane to double precision.
    #[inline]
    #[must_use]
    pub fn cast(self) -> Vector4<F64Lanes> {
        Vector4::from_lanes(backend::widen(self.lanes()))
    }
}

impl Quat<F64Lanes> {
    /// Narrows every lane to single precision.
    #[inline]
    #[must_use]
    pub fn cast(self) -> Quat<F32Lanes> {
        Quat::from_lanes(backend::narrow(self.lanes()))
    }
}

impl Quat<F32Lanes> {
    /// Widens every lane to double precision.
    #[inline]
    #[must_use]
    pub fn cast(self) -> Quat<F64Lanes> {
        Quat::from_lanes(backend::widen(self.lanes()))
    }
}

impl From<Vector4<F32Lanes>> for Vector4<F64Lanes> {
    #[inline]
    fn from(vector: Vector4<F32Lanes>) -> Self {
        vector.cast()
    }
}

impl From<Quat<F32Lanes>> for Quat<F64Lanes> {
    #[inline]
    fn from(quat: Quat<F32Lanes>) -> Self {
        quat.cast()
    }
}
