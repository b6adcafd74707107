//! Tests for cross-precision casts.

use crate::quat::{Quatd, Quatf};
use crate::vector4::{Vector4d, Vector4f};

#[test]
fn test_vector_narrowing_matches_literal() {
    let double = Vector4d::set(-2.65, 2.996113, 0.68123521, -5.9182);
    let single: Vector4f = double.cast();
    let expected = Vector4f::set(-2.65, 2.996113, 0.68123521, -5.9182);
    assert!(single.all_near_equal(expected, 1.0e-6));
    // Narrowing rounds to nearest, so it matches the f32 literal exactly.
    assert_eq!(single, expected);
}

#[test]
fn test_vector_widening_is_exact() {
    let single = Vector4f::set(0.1, -0.2, 1.0e-20, 3.0e38);
    let double: Vector4d = single.cast();
    assert_eq!(double.x(), f64::from(0.1_f32));
    assert_eq!(double.y(), f64::from(-0.2_f32));
    assert_eq!(double.z(), f64::from(1.0e-20_f32));
    assert_eq!(double.w(), f64::from(3.0e38_f32));
    assert_eq!(Vector4d::from(single), double);
}

#[test]
fn test_widen_then_narrow_round_trips() {
    let single = Vector4f::set(1.5, -0.333_333_34, 7.0e-5, 123_456.79);
    assert_eq!(single.cast().cast(), single);
}

#[test]
fn test_narrowing_overflow_and_nan() {
    let double = Vector4d::set(1.0e300, -1.0e300, f64::NAN, 0.0);
    let single = double.cast();
    assert_eq!(single.x(), f32::INFINITY);
    assert_eq!(single.y(), f32::NEG_INFINITY);
    assert!(single.z().is_nan());
    assert_eq!(single.w(), 0.0);
}

#[test]
fn test_quat_cast_does_not_renormalize() {
    let scaled = Quatd::set(0.0, 0.0, 0.0, 2.0);
    let single: Quatf = scaled.cast();
    assert_eq!(single.to_array(), [0.0, 0.0, 0.0, 2.0]);
    assert!(!single.is_normalized());
}

#[test]
fn test_quat_round_trip_through_single() {
    let rotation = Quatd::from_euler(0.1, 0.2, 0.3);
    let single = rotation.cast();
    assert!(single.is_normalized());
    assert!(single.cast().near_equal_within(rotation, 1.0e-6));
    assert_eq!(Quatd::from(single), single.cast());
}

#[test]
fn test_cast_matches_lanewise_convert() {
    let double = Vector4d::set(-2.65, 2.996113, 0.68123521, -5.9182);
    let narrowed: Vector4f = double.cast();
    let converted: Vector4f = double.convert();
    assert_eq!(narrowed, converted);

    let quat = Quatf::set(0.5, -0.5, 0.5, -0.5);
    let widened: Quatd = quat.cast();
    let converted: Quatd = quat.convert();
    assert_eq!(widened, converted);
}
