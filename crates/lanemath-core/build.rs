//! Resolves the storage backend for each precision at build time.
//!
//! Emits `cfg(lanemath_f32 = "...")` and `cfg(lanemath_f64 = "...")` with one
//! of `scalar`, `sse2` or `neon`. The target description comes from the
//! `CARGO_CFG_*` variables so cross-compilation picks the target's ISA, not
//! the host's.

use std::env;

const BACKENDS: &str = r#"values("scalar", "sse2", "neon")"#;

fn simd_backend(arch: &str, features: &[&str]) -> &'static str {
    match arch {
        "x86" | "x86_64" if features.contains(&"sse2") => "sse2",
        "aarch64" if features.contains(&"neon") => "neon",
        _ => "scalar",
    }
}

fn main() {
    println!("cargo:rustc-check-cfg=cfg(lanemath_f32, {BACKENDS})");
    println!("cargo:rustc-check-cfg=cfg(lanemath_f64, {BACKENDS})");

    let arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();
    let target_features = env::var("CARGO_CFG_TARGET_FEATURE").unwrap_or_default();
    let features: Vec<&str> = target_features.split(',').collect();

    let simd = simd_backend(&arch, &features);

    let f32_backend = if env::var_os("CARGO_FEATURE_SCALAR_F32").is_some() {
        "scalar"
    } else {
        simd
    };
    let f64_backend = if env::var_os("CARGO_FEATURE_SCALAR_F64").is_some() {
        "scalar"
    } else {
        simd
    };

    println!("cargo:rustc-cfg=lanemath_f32=\"{f32_backend}\"");
    println!("cargo:rustc-cfg=lanemath_f64=\"{f64_backend}\"");

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=CARGO_FEATURE_SCALAR_F32");
    println!("cargo:rerun-if-env-changed=CARGO_FEATURE_SCALAR_F64");
}
