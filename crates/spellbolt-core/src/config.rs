//! Tuning constants for spell projectile lifetime and presentation.
//!
//! The defaults reproduce the live game's behaviour. Tuning can be loaded from
//! JSON for test fixtures and server configuration:
//!
//! ```
//! use spellbolt_core::config::ProjectileTuning;
//!
//! let tuning = ProjectileTuning::from_json(r#"{ "max_lifetime": 12.0 }"#).unwrap();
//! assert_eq!(tuning.max_lifetime, 12.0);
//! assert_eq!(tuning.destroy_guard, 10.0);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating [`ProjectileTuning`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON document could not be parsed.
    #[error("invalid tuning document: {0}")]
    Parse(#[from] serde_json::Error),
    /// A value must be finite and non-negative.
    #[error("{field} must be finite and non-negative, got {value}")]
    NegativeOrNonFinite {
        /// Name of the offending field
        field: &'static str,
        /// The rejected value
        value: f64,
    },
    /// The power level span divides the effect modifier and must be positive.
    #[error("power_level_span must be positive, got {0}")]
    EmptyPowerSpan(f64),
}

/// Timing and presentation constants shared by all spell projectiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    /// Time after spawn at which a projectile explodes regardless of range.
    pub max_lifetime: f64,
    /// A projectile due for removal within this window is never re-exploded
    /// by the range/lifetime check.
    pub destroy_guard: f64,
    /// Delay between detonation and removal.
    pub explosion_grace: f64,
    /// Power level that maps to an effect modifier of zero.
    pub power_level_floor: f64,
    /// Power level range mapped onto the effect modifier's `[0, 1]`.
    pub power_level_span: f64,
    /// Friction coefficient handed to the physics layer.
    pub friction: f32,
    /// Elasticity handed to the physics layer.
    pub elasticity: f32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            max_lifetime: 29.0,
            destroy_guard: 10.0,
            explosion_grace: 1.0,
            power_level_floor: 1.0,
            power_level_span: 7.0,
            friction: 1.0,
            elasticity: 0.0,
        }
    }
}

impl ProjectileTuning {
    /// Parses and validates tuning from a JSON document.
    ///
    /// Missing fields take their default values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and the validation
    /// errors of [`ProjectileTuning::validate`] for out-of-range values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Returns a copy with a different maximum lifetime.
    #[must_use]
    pub fn with_max_lifetime(mut self, max_lifetime: f64) -> Self {
        self.max_lifetime = max_lifetime;
        self
    }

    /// Returns a copy with a different explosion grace period.
    #[must_use]
    pub fn with_explosion_grace(mut self, explosion_grace: f64) -> Self {
        self.explosion_grace = explosion_grace;
        self
    }

    /// Checks that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("max_lifetime", self.max_lifetime),
            ("destroy_guard", self.destroy_guard),
            ("explosion_grace", self.explosion_grace),
            ("power_level_floor", self.power_level_floor),
            ("friction", f64::from(self.friction)),
            ("elasticity", f64::from(self.elasticity)),
        ];
        for (field, value) in checks {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::NegativeOrNonFinite { field, value });
            }
        }
        if !self.power_level_span.is_finite() || self.power_level_span <= 0.0 {
            return Err(ConfigError::EmptyPowerSpan(self.power_level_span));
        }
        Ok(())
    }
}
