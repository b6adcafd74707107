//! # lanemath core
//!
//! Four-lane vector and quaternion math for real-time graphics and animation.
//!
//! Each precision (`f32`, `f64`) is bound at build time to one storage
//! backend: portable scalar fields, SSE2 registers or NEON registers. Call
//! sites never change; [`Vector4f`], [`Vector4d`], [`Quatf`] and [`Quatd`]
//! always name the selected storage.
//!
//! ## Features
//!
//! - **Dual path**: every operation has an accessor-based reference form and
//!   register-level fast paths checked against it
//! - **Static selection**: `build.rs` picks the backend per precision; no
//!   runtime dispatch
//! - **Value types**: `Copy`, fixed size, no allocation
//!
//! ## Quick Start
//!
//! ```rust
//! use lanemath_core::{Quatd, Vector4d};
//!
//! let up = Vector4d::set3(0.0, 0.0, 1.0);
//! let quarter_turn = Quatd::from_axis_angle(up, core::f64::consts::FRAC_PI_2);
//!
//! let rotated = quarter_turn.rotate(Vector4d::set3(1.0, 0.0, 0.0));
//! assert!(rotated.all_near_equal(Vector4d::set3(0.0, 1.0, 0.0), 1e-12));
//!
//! // Narrow to single precision for upload.
//! let single = quarter_turn.cast();
//! assert!(single.is_normalized());
//! ```
//!
//! ## Backend selection
//!
//! | Target              | `f32`  | `f64`  |
//! |---------------------|--------|--------|
//! | x86 / x86_64 + SSE2 | sse2   | sse2   |
//! | aarch64 + NEON      | neon   | neon   |
//! | anything else       | scalar | scalar |
//!
//! Features `scalar-f32`, `scalar-f64` and `scalar` force the portable
//! storage. [`backend::log_selection`] reports the result through `tracing`.

#![warn(missing_docs)]
// Clippy lints configured in workspace Cargo.toml [workspace.lints.clippy]
#![cfg_attr(
    test,
    allow(
        clippy::doc_markdown,
        clippy::uninlined_format_args,
        clippy::cast_lossless,
        clippy::cast_possible_truncation,
        clippy::manual_assert
    )
)]

pub mod backend;
#[cfg(test)]
mod cast_tests;
pub mod cast;
pub mod config;
#[cfg(test)]
mod config_tests;
pub mod error;
pub mod quat;
pub mod scalar;
pub mod vector4;

pub use backend::{log_selection, selection, Backend, BackendSelection, Lanes};
pub use config::{ConfigError, MathConfig, ToleranceConfig};
pub use error::{Error, Result};
pub use quat::{Quat, Quatd, Quatf};
pub use scalar::Real;
pub use vector4::{Vector4, Vector4d, Vector4f};
