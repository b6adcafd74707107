//! Tolerance configuration.
//!
//! The comparison helpers on `Quat` and `Vector4` take explicit thresholds;
//! [`MathConfig`] lets a pipeline pick those thresholds once, from layered
//! sources:
//!
//! 1. Built-in defaults (the library's default thresholds)
//! 2. `lanemath.toml` in the working directory, when present
//! 3. Environment variables prefixed with `LANEMATH_`, nested keys split by
//!    `__` (for example `LANEMATH_TOLERANCES__NEAR_EQUAL=1e-4`)

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::quat::{
    DEFAULT_NEAR_EQUAL_THRESHOLD, DEFAULT_NEAR_IDENTITY_ANGLE, DEFAULT_NORMALIZED_THRESHOLD,
};
use crate::scalar::Real;

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "lanemath.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "LANEMATH_";

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A provider failed or the merged document did not match the schema.
    #[error("Failed to load configuration: {0}")]
    Figment(#[from] Box<figment::Error>),

    /// A value was loaded but is not usable.
    #[error("Invalid value for '{key}': {reason}")]
    Invalid {
        /// Dotted key of the offending value.
        key: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// The configuration could not be rendered as TOML.
    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

/// Comparison thresholds, stored in double precision and narrowed on use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToleranceConfig {
    /// Per-lane threshold for `near_equal` comparisons.
    pub near_equal: f64,
    /// Threshold on `|length_squared - 1|` for `is_normalized`.
    pub normalized: f64,
    /// Rotation angle in radians under which a quaternion is near identity.
    pub near_identity_angle: f64,
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            near_equal: DEFAULT_NEAR_EQUAL_THRESHOLD,
            normalized: DEFAULT_NORMALIZED_THRESHOLD,
            near_identity_angle: DEFAULT_NEAR_IDENTITY_ANGLE,
        }
    }
}

impl ToleranceConfig {
    /// `near_equal` in the requested precision.
    #[inline]
    #[must_use]
    pub fn near_equal_threshold<T: Real>(&self) -> T {
        T::from_f64(self.near_equal)
    }

    /// `normalized` in the requested precision.
    #[inline]
    #[must_use]
    pub fn normalized_threshold<T: Real>(&self) -> T {
        T::from_f64(self.normalized)
    }

    /// `near_identity_angle` in the requested precision.
    #[inline]
    #[must_use]
    pub fn near_identity_threshold<T: Real>(&self) -> T {
        T::from_f64(self.near_identity_angle)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("tolerances.near_equal", self.near_equal),
            ("tolerances.normalized", self.normalized),
            ("tolerances.near_identity_angle", self.near_identity_angle),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid {
                    key: key.to_string(),
                    reason: format!("must be a finite positive number, got {value}"),
                });
            }
        }
        Ok(())
    }
}

/// Top-level lanemath configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MathConfig {
    /// Comparison thresholds.
    pub tolerances: ToleranceConfig,
}

impl MathConfig {
    /// Loads defaults, then `lanemath.toml`, then `LANEMATH_` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path(CONFIG_FILE_NAME)
    }

    /// Same as [`MathConfig::load`] with an explicit file path.
    ///
    /// A missing file is not an error; its layer is simply empty.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading lanemath configuration");

        let config: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;

        config.validate().inspect_err(|err| {
            tracing::warn!(error = %err, "rejected lanemath configuration");
        })?;
        Ok(config)
    }

    /// Parses a TOML document layered over the defaults.
    pub fn from_toml_str(document: &str) -> Result<Self, ConfigError> {
        let config: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::string(document))
            .extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Checks every threshold is finite and positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tolerances.validate()
    }
}
