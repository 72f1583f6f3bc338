//! Cast data snapshot and spell metadata consumed by spell projectiles.
//!
//! The cast pipeline resolves a spell into a [`CastData`] once, when the
//! projectile is created. The projectile never re-reads the caster's state for
//! anything the snapshot covers, so a caster who levels up, moves or logs out
//! mid-flight does not change the outcome.

use std::sync::Arc;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{ConfigError, ProjectileTuning};
use crate::entity::{DamageType, EntityId, MagicSkill};

/// Errors raised when a projectile is built from invalid cast inputs.
#[derive(Debug, Error)]
pub enum CastError {
    /// Maximum range must be finite and non-negative.
    #[error("max range must be finite and non-negative, got {0}")]
    InvalidRange(f32),
    /// Cast origin must be a finite point.
    #[error("cast origin is not finite: {0}")]
    InvalidOrigin(Vec3),
    /// Spell intensity bounds are unusable.
    #[error("spell '{spell}' has invalid intensity: base {base}, variance {variance}")]
    InvalidIntensity {
        /// Spell display name
        spell: String,
        /// Minimum damage
        base: f64,
        /// Damage spread above the minimum
        variance: f64,
    },
    /// Life-drain ratio must be finite and non-negative.
    #[error("life-drain ratio must be finite and non-negative, got {0}")]
    InvalidDrainRatio(f64),
    /// The projectile was already converted to a life-drain projectile.
    #[error("projectile {0} is already a life-drain projectile")]
    AlreadyLifeDrain(EntityId),
    /// Tuning failed validation.
    #[error(transparent)]
    Tuning(#[from] ConfigError),
}

/// Projectile-specific spell metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileSpell {
    /// Damage type of the bolt.
    pub damage_type: DamageType,
    /// Minimum damage roll.
    pub base_intensity: f64,
    /// Spread of the damage roll above the minimum.
    pub variance: f64,
}

impl ProjectileSpell {
    /// Lowest possible damage roll.
    #[must_use]
    pub fn min_damage(&self) -> f64 {
        self.base_intensity
    }

    /// Highest possible damage roll.
    #[must_use]
    pub fn max_damage(&self) -> f64 {
        self.base_intensity + self.variance
    }
}

/// Spell metadata shared by every cast of the same spell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellInfo {
    /// Display name, used in combat text.
    pub name: String,
    /// Whether targets may roll magic resistance against this spell.
    pub resistible: bool,
    /// School the spell is cast with.
    pub skill: MagicSkill,
    /// Damage parameters of the projectile.
    pub projectile: ProjectileSpell,
}

impl SpellInfo {
    /// Checks the spell's damage parameters.
    ///
    /// # Errors
    ///
    /// Returns [`CastError::InvalidIntensity`] if the base intensity or the
    /// variance is negative or not finite, or if their sum overflows.
    pub fn validate(&self) -> Result<(), CastError> {
        let ProjectileSpell {
            base_intensity,
            variance,
            ..
        } = self.projectile;
        let usable = |v: f64| v.is_finite() && v >= 0.0;
        let bounded = self.projectile.max_damage().is_finite();
        if usable(base_intensity) && usable(variance) && bounded {
            Ok(())
        } else {
            Err(CastError::InvalidIntensity {
                spell: self.name.clone(),
                base: base_intensity,
                variance,
            })
        }
    }
}

/// Immutable snapshot of the cast that produced a projectile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastData {
    /// Caster. May have left the simulation by the time the bolt lands.
    pub source_id: Option<EntityId>,
    /// Where the projectile was launched from.
    pub initial_cast_position: Vec3,
    /// Distance from the origin at which the projectile detonates.
    pub max_range: f32,
    /// Caster's effective skill in the spell's school at cast time.
    pub current_skill: u32,
    /// Spell being cast.
    pub spell: Arc<SpellInfo>,
    /// Implement the caster was wielding, if any.
    pub wand_id: Option<EntityId>,
    /// Power level of the casting component; scales effect intensity.
    pub power_level: f64,
}

impl CastData {
    /// Checks the snapshot for values the projectile cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`CastError::InvalidRange`], [`CastError::InvalidOrigin`] or the
    /// spell's own validation error.
    pub fn validate(&self) -> Result<(), CastError> {
        if !self.max_range.is_finite() || self.max_range < 0.0 {
            return Err(CastError::InvalidRange(self.max_range));
        }
        if !self.initial_cast_position.is_finite() {
            return Err(CastError::InvalidOrigin(self.initial_cast_position));
        }
        self.spell.validate()
    }

    /// Effect intensity derived from the casting component's power level.
    ///
    /// Maps `power_level_floor ..= power_level_floor + power_level_span` onto
    /// `0.0 ..= 1.0`, clamping outside that range. A NaN power level yields
    /// zero.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn effect_modifier(&self, tuning: &ProjectileTuning) -> f32 {
        let scaled = (self.power_level - tuning.power_level_floor) / tuning.power_level_span;
        if scaled.is_nan() {
            tracing::warn!(power_level = self.power_level, "power level is NaN, muting effects");
            return 0.0;
        }
        scaled.clamp(0.0, 1.0) as f32
    }
}
