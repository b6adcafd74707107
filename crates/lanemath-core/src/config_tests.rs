//! Tests for tolerance configuration.
//!
//! Anything touching the filesystem or environment runs inside
//! `figment::Jail`, which isolates the working directory and env vars.

use figment::Jail;

use crate::config::{ConfigError, MathConfig, ToleranceConfig, CONFIG_FILE_NAME};
use crate::error::Error;
use crate::quat::{
    DEFAULT_NEAR_EQUAL_THRESHOLD, DEFAULT_NEAR_IDENTITY_ANGLE, DEFAULT_NORMALIZED_THRESHOLD,
};

fn load_in_jail() -> figment::error::Result<MathConfig> {
    MathConfig::load().map_err(|e| e.to_string().into())
}

// ============================================================================
// Defaults
// ============================================================================

#[test]
fn test_defaults_match_library_thresholds() {
    let config = MathConfig::default();
    assert_eq!(config.tolerances.near_equal, DEFAULT_NEAR_EQUAL_THRESHOLD);
    assert_eq!(config.tolerances.normalized, DEFAULT_NORMALIZED_THRESHOLD);
    assert_eq!(
        config.tolerances.near_identity_angle,
        DEFAULT_NEAR_IDENTITY_ANGLE
    );
    assert!(config.validate().is_ok());
}

#[test]
fn test_typed_thresholds() {
    let tolerances = ToleranceConfig::default();
    assert_eq!(tolerances.near_equal_threshold::<f64>(), 0.00001);
    assert!((tolerances.near_equal_threshold::<f32>() - 0.00001).abs() < f32::EPSILON);
    assert!((tolerances.near_identity_threshold::<f32>() - 0.002_847_144_6).abs() < 1.0e-9);
    assert_eq!(tolerances.normalized_threshold::<f64>(), 0.00001);
}

#[test]
fn test_load_without_file_uses_defaults() {
    Jail::expect_with(|_jail| {
        let config = load_in_jail()?;
        assert_eq!(config, MathConfig::default());
        Ok(())
    });
}

// ============================================================================
// Layering
// ============================================================================

#[test]
fn test_load_reads_config_file() {
    Jail::expect_with(|jail| {
        jail.create_file(
            CONFIG_FILE_NAME,
            r"
                [tolerances]
                near_equal = 0.001
            ",
        )?;

        let config = load_in_jail()?;
        assert_eq!(config.tolerances.near_equal, 0.001);
        // Keys absent from the file keep their defaults.
        assert_eq!(config.tolerances.normalized, DEFAULT_NORMALIZED_THRESHOLD);
        Ok(())
    });
}

#[test]
fn test_env_overrides_file() {
    Jail::expect_with(|jail| {
        jail.create_file(
            CONFIG_FILE_NAME,
            r"
                [tolerances]
                near_equal = 0.001
                near_identity_angle = 0.01
            ",
        )?;
        jail.set_env("LANEMATH_TOLERANCES__NEAR_EQUAL", "0.0002");

        let config = load_in_jail()?;
        assert_eq!(config.tolerances.near_equal, 0.0002);
        assert_eq!(config.tolerances.near_identity_angle, 0.01);
        Ok(())
    });
}

#[test]
fn test_load_from_explicit_path() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "animation.toml",
            r"
                [tolerances]
                normalized = 0.0001
            ",
        )?;

        let config = MathConfig::load_from_path("animation.toml").map_err(|e| e.to_string())?;
        assert_eq!(config.tolerances.normalized, 0.0001);
        Ok(())
    });
}

// ============================================================================
// Validation and errors
// ============================================================================

#[test]
fn test_load_rejects_non_positive_threshold() {
    Jail::expect_with(|jail| {
        jail.set_env("LANEMATH_TOLERANCES__NORMALIZED", "-0.5");

        let err = MathConfig::load().unwrap_err();
        match err {
            ConfigError::Invalid { key, reason } => {
                assert_eq!(key, "tolerances.normalized");
                assert!(reason.contains("-0.5"), "reason: {reason}");
            }
            other => panic!("expected Invalid, got {other:?}"),
        }
        Ok(())
    });
}

#[test]
fn test_load_rejects_wrong_type() {
    Jail::expect_with(|jail| {
        jail.create_file(
            CONFIG_FILE_NAME,
            r#"
                [tolerances]
                near_equal = "tight"
            "#,
        )?;

        let err = MathConfig::load().unwrap_err();
        assert!(matches!(err, ConfigError::Figment(_)), "got {err:?}");
        Ok(())
    });
}

#[test]
fn test_validate_rejects_nan_and_zero() {
    let mut config = MathConfig::default();
    config.tolerances.near_identity_angle = f64::NAN;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::Invalid { ref key, .. }) if key == "tolerances.near_identity_angle"
    ));

    config.tolerances.near_identity_angle = DEFAULT_NEAR_IDENTITY_ANGLE;
    config.tolerances.near_equal = 0.0;
    assert!(config.validate().is_err());
}

#[test]
fn test_config_error_converts_into_crate_error() {
    let err: Error = MathConfig::from_toml_str("[tolerances]\nnear_equal = 0.0")
        .unwrap_err()
        .into();
    assert!(matches!(err, Error::Config(ConfigError::Invalid { .. })));
}

// ============================================================================
// TOML
// ============================================================================

#[test]
fn test_from_toml_str_layers_over_defaults() {
    let config = MathConfig::from_toml_str(
        r"
            [tolerances]
            near_identity_angle = 0.05
        ",
    )
    .expect("valid document");
    assert_eq!(config.tolerances.near_identity_angle, 0.05);
    assert_eq!(config.tolerances.near_equal, DEFAULT_NEAR_EQUAL_THRESHOLD);
}

#[test]
fn test_from_toml_str_rejects_malformed_document() {
    let err = MathConfig::from_toml_str("[tolerances\nnear_equal = ").unwrap_err();
    assert!(matches!(err, ConfigError::Figment(_)));
}

#[test]
fn test_to_toml_round_trip() {
    let config = MathConfig {
        tolerances: ToleranceConfig {
            near_equal: 0.5,
            normalized: 0.25,
            near_identity_angle: 0.125,
        },
    };
    let rendered = config.to_toml().expect("serializable");
    assert!(rendered.contains("[tolerances]"));
    assert!(rendered.contains("near_equal = 0.5"));
    assert_eq!(MathConfig::from_toml_str(&rendered).expect("parses"), config);
}
