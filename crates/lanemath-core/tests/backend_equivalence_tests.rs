//! Property-based equivalence tests: selected storage vs portable storage.
//!
//! Every public vector and quaternion operation is evaluated on the storage
//! this build selected (SSE2, NEON or portable) and on the always-compiled
//! portable storage, then compared lane by lane. On a scalar build both sides
//! are the same type and the properties hold trivially.

use lanemath_core::backend::{portable, F32Lanes, F64Lanes};
use lanemath_core::{Lanes, Quat, Quatd, Quatf, Real, Vector4, Vector4d, Vector4f};
use proptest::{
    array::uniform4,
    prelude::{prop_assert, prop_assert_eq, Strategy},
    proptest,
    test_runner::{Config as ProptestConfig, FileFailurePersistence},
};

const EQUIV_PROP_CASES: u32 = 512;
const EQUIV_PROP_MAX_SHRINK_ITERS: u32 = 2048;

type RefVector4f = Vector4<portable::F32x4>;
type RefVector4d = Vector4<portable::F64x4>;
type RefQuatf = Quat<portable::F32x4>;
type RefQuatd = Quat<portable::F64x4>;

fn equivalence_proptest_config() -> ProptestConfig {
    ProptestConfig {
        cases: EQUIV_PROP_CASES,
        max_shrink_iters: EQUIV_PROP_MAX_SHRINK_ITERS,
        // Integration tests do not have a nearby lib.rs/main.rs, so set an
        // explicit persistence root for reproducible counterexamples.
        failure_persistence: Some(Box::new(FileFailurePersistence::WithSource(
            "backend-equivalence-regressions",
        ))),
        ..ProptestConfig::default()
    }
}

fn lanes_f32() -> impl Strategy<Value = [f32; 4]> {
    uniform4(-100.0_f32..100.0_f32)
}

fn lanes_f64() -> impl Strategy<Value = [f64; 4]> {
    uniform4(-100.0_f64..100.0_f64)
}

/// Unit quaternion lanes; rejects near-zero draws before normalizing.
fn unit_lanes_f64() -> impl Strategy<Value = [f64; 4]> {
    uniform4(-1.0_f64..1.0_f64)
        .prop_filter("non-degenerate", |l| l.iter().map(|v| v * v).sum::<f64>() > 1.0e-3)
        .prop_map(|l| {
            let length = l.iter().map(|v| v * v).sum::<f64>().sqrt();
            [l[0] / length, l[1] / length, l[2] / length, l[3] / length]
        })
}

#[allow(clippy::cast_possible_truncation)]
fn unit_lanes_f32() -> impl Strategy<Value = [f32; 4]> {
    unit_lanes_f64().prop_map(|l| [l[0] as f32, l[1] as f32, l[2] as f32, l[3] as f32])
}

fn close<T: Real>(actual: T, expected: T, tolerance: f64) -> bool {
    let (actual, expected) = (actual.to_f64(), expected.to_f64());
    (actual - expected).abs() <= tolerance * expected.abs().max(1.0)
}

fn lanes_close<T: Real>(actual: [T; 4], expected: [T; 4], tolerance: f64) -> bool {
    actual
        .iter()
        .zip(expected.iter())
        .all(|(a, e)| close(*a, *e, tolerance))
}

macro_rules! equivalence_properties {
    (
        $name:ident,
        vec: $vec:ty,
        ref_vec: $ref_vec:ty,
        quat: $quat:ty,
        ref_quat: $ref_quat:ty,
        lanes: $lanes:expr,
        unit: $unit:expr,
        tolerance: $tol:expr
    ) => {
        mod $name {
            use super::*;

            const TOL: f64 = $tol;

            proptest! {
                #![proptest_config(equivalence_proptest_config())]

                #[test]
                fn test_elementwise_ops_are_identical(a in $lanes, b in $lanes) {
                    let (va, vb) = (<$vec>::from(a), <$vec>::from(b));
                    let (ra, rb) = (<$ref_vec>::from(a), <$ref_vec>::from(b));

                    prop_assert_eq!(va.to_array(), ra.to_array());
                    prop_assert_eq!((va + vb).to_array(), (ra + rb).to_array());
                    prop_assert_eq!((va - vb).to_array(), (ra - rb).to_array());
                    prop_assert_eq!((va * vb).to_array(), (ra * rb).to_array());
                    prop_assert_eq!((-va).to_array(), (-ra).to_array());
                    prop_assert_eq!(va.abs().to_array(), ra.abs().to_array());
                    prop_assert_eq!(va.min(vb).to_array(), ra.min(rb).to_array());
                    prop_assert_eq!(va.max(vb).to_array(), ra.max(rb).to_array());
                    prop_assert_eq!(va.mul_scalar(a[1]).to_array(), ra.mul_scalar(a[1]).to_array());
                    prop_assert_eq!(va.cross3(vb).to_array(), ra.cross3(rb).to_array());
                    prop_assert_eq!(va.dot3(vb), ra.dot3(rb));
                }

                #[test]
                fn test_reductions_match(a in $lanes, b in $lanes) {
                    let (va, vb) = (<$vec>::from(a), <$vec>::from(b));
                    let (ra, rb) = (<$ref_vec>::from(a), <$ref_vec>::from(b));
                    // Four products of magnitude <= 1e4 each.
                    let scale = 4.0e4;

                    let (dot, dot_ref) = (va.dot(vb).to_f64(), ra.dot(rb).to_f64());
                    prop_assert!((dot - dot_ref).abs() <= TOL * scale, "dot {} vs {}", dot, dot_ref);
                    prop_assert!(close(va.length(), ra.length(), TOL * 100.0));
                }

                #[test]
                fn test_all_near_equal_agrees(a in $lanes, b in $lanes, threshold in 0.0_f64..50.0) {
                    let threshold = Real::from_f64(threshold);
                    let (va, vb) = (<$vec>::from(a), <$vec>::from(b));
                    let (ra, rb) = (<$ref_vec>::from(a), <$ref_vec>::from(b));
                    prop_assert_eq!(
                        va.all_near_equal(vb, threshold),
                        ra.all_near_equal(rb, threshold)
                    );
                    prop_assert!(va.all_near_equal(va, threshold));
                }

                #[test]
                fn test_quat_mul_matches(a in $unit, b in $unit) {
                    let (qa, qb) = (<$quat>::from(a), <$quat>::from(b));
                    let (ra, rb) = (<$ref_quat>::from(a), <$ref_quat>::from(b));
                    prop_assert!(lanes_close(qa.mul(qb).to_array(), ra.mul(rb).to_array(), TOL));
                    prop_assert_eq!(qa.conjugate().to_array(), ra.conjugate().to_array());
                }

                #[test]
                fn test_quat_algorithms_match(a in $unit, b in $unit, alpha in 0.0_f64..1.0) {
                    let alpha = Real::from_f64(alpha);
                    let (qa, qb) = (<$quat>::from(a), <$quat>::from(b));
                    let (ra, rb) = (<$ref_quat>::from(a), <$ref_quat>::from(b));
                    let point = <$vec>::set3(a[0], b[1], a[2]);
                    let ref_point = <$ref_vec>::set3(a[0], b[1], a[2]);

                    prop_assert!(lanes_close(
                        qa.rotate(point).to_array(),
                        ra.rotate(ref_point).to_array(),
                        TOL * 10.0
                    ));
                    prop_assert!(lanes_close(qa.normalize().to_array(), ra.normalize().to_array(), TOL));
                    // Near-orthogonal endpoints may pick different shortest-path
                    // signs once the dot product rounds differently.
                    if qa.to_vector().dot(qb.to_vector()).to_f64().abs() > 1.0e-3 {
                        prop_assert!(lanes_close(
                            <$quat>::lerp(qa, qb, alpha).to_array(),
                            <$ref_quat>::lerp(ra, rb, alpha).to_array(),
                            TOL * 10.0
                        ));
                    }
                    prop_assert_eq!(qa.ensure_positive_w().to_array(), ra.ensure_positive_w().to_array());
                    prop_assert!(close(qa.length(), ra.length(), TOL));
                    prop_assert_eq!(qa.is_finite(), ra.is_finite());
                }

                #[test]
                fn test_quat_conversions_match(a in $unit) {
                    let (qa, ra) = (<$quat>::from(a), <$ref_quat>::from(a));
                    let (axis, angle) = qa.to_axis_angle();
                    let (ref_axis, ref_angle) = ra.to_axis_angle();
                    prop_assert!(lanes_close(axis.to_array(), ref_axis.to_array(), TOL * 10.0));
                    prop_assert!(close(angle, ref_angle, TOL * 10.0));

                    let rebuilt = <$quat>::from_positive_w(qa.ensure_positive_w().to_vector());
                    let ref_rebuilt = <$ref_quat>::from_positive_w(ra.ensure_positive_w().to_vector());
                    prop_assert!(lanes_close(rebuilt.to_array(), ref_rebuilt.to_array(), TOL));

                    let euler = <$quat>::from_euler(a[0], a[1], a[2]);
                    let ref_euler = <$ref_quat>::from_euler(a[0], a[1], a[2]);
                    prop_assert_eq!(euler.to_array(), ref_euler.to_array());
                }
            }
        }
    };
}

equivalence_properties!(
    single,
    vec: Vector4f,
    ref_vec: RefVector4f,
    quat: Quatf,
    ref_quat: RefQuatf,
    lanes: lanes_f32(),
    unit: unit_lanes_f32(),
    tolerance: 1.0e-5
);

equivalence_properties!(
    double,
    vec: Vector4d,
    ref_vec: RefVector4d,
    quat: Quatd,
    ref_quat: RefQuatd,
    lanes: lanes_f64(),
    unit: unit_lanes_f64(),
    tolerance: 1.0e-12
);

proptest! {
    #![proptest_config(equivalence_proptest_config())]

    #[test]
    fn test_casts_match_lanewise_conversion(a in lanes_f64()) {
        let double = Vector4d::from(a);
        let narrowed: Vector4f = double.cast();
        let converted: Vector4f = double.convert();
        prop_assert_eq!(narrowed.to_array(), converted.to_array());

        let widened: Vector4d = narrowed.cast();
        let reference: RefVector4d = narrowed.convert();
        prop_assert_eq!(widened.to_array(), reference.to_array());
    }
}

#[test]
fn test_selection_names_lane_types() {
    let selected = lanemath_core::selection();
    assert_eq!(selected.f32, <F32Lanes as Lanes>::BACKEND);
    assert_eq!(selected.f64, <F64Lanes as Lanes>::BACKEND);
    assert_eq!(<portable::F32x4 as Lanes>::BACKEND, lanemath_core::Backend::Scalar);
}
