//! Fuzz target for quaternion operations.
//!
//! Feeds arbitrary lanes (NaN, Inf, denormals, huge magnitudes) through every
//! quaternion operation in both precisions. Nothing may panic, and a few
//! structural invariants must hold whenever the inputs are finite.
//!
//! # Running
//!
//! ```bash
//! cd fuzz
//! cargo +nightly fuzz run fuzz_quat_ops
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use lanemath_core::{Quatd, Quatf, Vector4d};

#[derive(Arbitrary, Debug)]
struct QuatInput {
    a: [f64; 4],
    b: [f64; 4],
    point: [f64; 3],
    alpha: f64,
    euler: [f64; 3],
    threshold: f64,
}

fuzz_target!(|input: QuatInput| {
    let a = Quatd::from(input.a);
    let b = Quatd::from(input.b);
    let point = Vector4d::set3(input.point[0], input.point[1], input.point[2]);

    let _ = a.conjugate();
    let _ = a.mul(b);
    let _ = a * b;
    let _ = -a;
    let _ = a.length();
    let _ = a.length_reciprocal();
    let _ = a.normalize();
    let _ = a.try_normalize();
    let _ = Quatd::lerp(a, b, input.alpha);
    let _ = a.angle();
    let _ = a.axis();
    let _ = a.to_axis_angle();
    let _ = a.near_equal(b);
    let _ = a.near_equal_within(b, input.threshold);
    let _ = a.near_identity();
    let _ = a.near_identity_within(input.threshold);
    let _ = a.is_normalized_within(input.threshold);
    let _ = Quatd::from_euler(input.euler[0], input.euler[1], input.euler[2]);
    let _ = Quatd::from_positive_w(point);

    let rotated = a.rotate(point);
    assert_eq!(rotated.w(), 0.0, "rotate must clear the w lane");

    let positive = a.ensure_positive_w();
    if a.is_finite() {
        assert!(positive.w() >= 0.0);
        assert_eq!(positive.ensure_positive_w(), positive);
    }

    // from_axis_angle expects a unit axis.
    let axis = point;
    let length = axis.length3();
    if length.is_finite() && length > 1.0e-3 && length < 1.0e150 {
        let unit = axis.mul_scalar(1.0 / length);
        let _ = Quatd::from_axis_angle(unit, input.alpha);
    }

    // Subnormal squared lengths lose too many bits to normalize accurately.
    if let Some(unit) = a.try_normalize() {
        if unit.is_finite() && a.length_squared() >= f64::MIN_POSITIVE {
            assert!(unit.is_normalized_within(1.0e-6));
        }
    }

    let single: Quatf = a.cast();
    let _ = single.mul(b.cast());
    let _ = single.rotate(point.cast());
    let _ = single.to_axis_angle();
    let _ = Quatd::from(single);
});
