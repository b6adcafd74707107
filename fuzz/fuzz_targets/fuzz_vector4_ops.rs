//! Fuzz target for 4-lane vector operations and slice I/O.
//!
//! # Running
//!
//! ```bash
//! cd fuzz
//! cargo +nightly fuzz run fuzz_vector4_ops
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use lanemath_core::{Error, Vector4d, Vector4f};

#[derive(Arbitrary, Debug)]
struct VectorInput {
    /// Arbitrary-length buffer; short buffers must be rejected, not read past.
    buffer: Vec<f32>,
    b: [f64; 4],
    alpha: f64,
    threshold: f64,
}

fuzz_target!(|input: VectorInput| {
    let a = match Vector4f::try_from_slice(&input.buffer) {
        Ok(vector) => vector,
        Err(Error::SliceLength { expected, actual }) => {
            assert_eq!(expected, 4);
            assert_eq!(actual, input.buffer.len());
            return;
        }
        Err(other) => panic!("unexpected error: {other}"),
    };

    let mut out = vec![0.0_f32; input.buffer.len()];
    a.try_write_to_slice(&mut out).expect("buffer holds four lanes");
    for (written, original) in out.iter().zip(&input.buffer).take(4) {
        assert_eq!(written.to_bits(), original.to_bits());
    }

    let a: Vector4d = a.cast();
    let b = Vector4d::from(input.b);

    let _ = a + b;
    let _ = a - b;
    let _ = a * b;
    let _ = a / b;
    let _ = -a;
    let _ = a.abs();
    let _ = a.min(b);
    let _ = a.max(b);
    let _ = a.dot(b);
    let _ = a.dot3(b);
    let _ = a.cross3(b);
    let _ = a.length();
    let _ = Vector4d::lerp(a, b, input.alpha);
    let _ = a.all_near_equal(b, input.threshold);

    if a.is_finite() {
        assert!(a.all_near_equal(a, 0.0));
    }

    let narrowed: Vector4f = b.cast();
    let _ = narrowed.length3();
});
