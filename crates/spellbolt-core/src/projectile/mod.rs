//! The spell projectile entity.
//!
//! A [`ProjectileEntity`] is created when a cast resolves and owns everything
//! the projectile needs until removal: the cast snapshot, timing, physics
//! flags and its [`DamageSource`]. It is mutated only through its lifecycle
//! ([`ProjectileEntity::tick`], [`ProjectileEntity::post_spawn`]) and collision
//! ([`ProjectileEntity::handle_collision`]) entry points.
//!
//! # Phases
//!
//! ```text
//! Flight ──(impact / range / lifetime)──> Exploded ──(destroy time)──> Removed
//!    └───────────────(left valid cell)──────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! # use std::sync::Arc;
//! # use glam::Vec3;
//! # use spellbolt_core::entity::{DamageType, EntityId, MagicSkill};
//! # use spellbolt_core::{CastData, ProjectileSpell, SpellInfo};
//! use spellbolt_core::{DamageSource, Phase, ProjectileEntity, ProjectileTuning};
//!
//! # let cast = CastData {
//! #     source_id: Some(EntityId::new(1)),
//! #     initial_cast_position: Vec3::ZERO,
//! #     max_range: 40.0,
//! #     current_skill: 150,
//! #     spell: Arc::new(SpellInfo {
//! #         name: "Drain Bolt".into(),
//! #         resistible: false,
//! #         skill: MagicSkill::WarMagic,
//! #         projectile: ProjectileSpell { damage_type: DamageType::Health, base_intensity: 0.0, variance: 0.0 },
//! #     }),
//! #     wand_id: None,
//! #     power_level: 4.0,
//! # };
//! let mut bolt = ProjectileEntity::new(
//!     EntityId::new(100),
//!     cast,
//!     None,
//!     0.0,
//!     &ProjectileTuning::default(),
//! )
//! .unwrap();
//!
//! bolt.make_life_projectile(30, 1.5).unwrap();
//! assert_eq!(bolt.damage_source(), &DamageSource::LifeDrain { drained: 30, ratio: 1.5 });
//! assert_eq!(bolt.phase(), Phase::Flight);
//! assert!(bolt.destroy_time().is_infinite());
//! ```

mod lifecycle;

pub use lifecycle::{ExpiryCause, TickInput, TickOutcome};

use crate::cast::{CastData, CastError};
use crate::config::ProjectileTuning;
use crate::entity::{DamageType, EntityId, PhysicsState, Qualities};

/// Where a projectile's damage comes from.
///
/// Chosen at creation and never switched back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageSource {
    /// Rolled from the spell's projectile metadata.
    Standard,
    /// Converted from resource drained from the caster.
    LifeDrain {
        /// Amount drained from the caster.
        drained: u32,
        /// Damage dealt per unit drained.
        ratio: f64,
    },
}

/// Lifecycle phase of a projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Flying and collidable.
    Flight,
    /// Detonated; waiting out the grace period as an effect placeholder.
    Exploded,
    /// Marked for removal by the surrounding simulation.
    Removed,
}

/// A magical projectile in flight.
#[derive(Debug, Clone)]
pub struct ProjectileEntity {
    id: EntityId,
    target_id: Option<EntityId>,
    cast: CastData,
    tuning: ProjectileTuning,
    spawn_time: f64,
    destroy_time: f64,
    effect_modifier: f32,
    damage_source: DamageSource,
    physics: PhysicsState,
    qualities: Qualities,
    phase: Phase,
}

impl ProjectileEntity {
    /// Creates a projectile from a resolved cast.
    ///
    /// # Arguments
    ///
    /// * `id` - The projectile's own entity id
    /// * `cast` - Snapshot of the cast that launched it
    /// * `target_id` - Bound target, or `None` to hit the first valid actor.
    ///   A raw id of zero is treated as `None`.
    /// * `now` - Current simulation time
    /// * `tuning` - Lifetime and presentation constants
    ///
    /// # Errors
    ///
    /// Returns a [`CastError`] if the cast snapshot or the tuning is invalid.
    pub fn new(
        id: EntityId,
        cast: CastData,
        target_id: Option<EntityId>,
        now: f64,
        tuning: &ProjectileTuning,
    ) -> Result<Self, CastError> {
        tuning.validate()?;
        cast.validate()?;
        let target_id = target_id.and_then(|id| EntityId::from_raw_target(id.as_u64()));

        let effect_modifier = cast.effect_modifier(tuning);
        tracing::debug!(
            projectile = %id,
            spell = %cast.spell.name,
            target = ?target_id,
            effect_modifier,
            "spell projectile created"
        );

        Ok(Self {
            id,
            target_id,
            cast,
            tuning: tuning.clone(),
            spawn_time: now,
            destroy_time: f64::INFINITY,
            effect_modifier,
            damage_source: DamageSource::Standard,
            physics: PhysicsState::projectile_in_flight(),
            qualities: Qualities::projectile(),
            phase: Phase::Flight,
        })
    }

    /// Converts the projectile into a life-drain projectile.
    ///
    /// Damage is then `drained * ratio` instead of a roll from spell metadata.
    ///
    /// # Errors
    ///
    /// Returns [`CastError::AlreadyLifeDrain`] if called twice and
    /// [`CastError::InvalidDrainRatio`] for a negative or non-finite ratio.
    pub fn make_life_projectile(&mut self, drained: u32, ratio: f64) -> Result<(), CastError> {
        if matches!(self.damage_source, DamageSource::LifeDrain { .. }) {
            return Err(CastError::AlreadyLifeDrain(self.id));
        }
        if !ratio.is_finite() || ratio < 0.0 {
            return Err(CastError::InvalidDrainRatio(ratio));
        }
        tracing::debug!(projectile = %self.id, drained, ratio, "converted to life-drain projectile");
        self.damage_source = DamageSource::LifeDrain { drained, ratio };
        Ok(())
    }

    /// The projectile's own entity id.
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// The caster's id, if the cast had one.
    #[must_use]
    pub const fn source_id(&self) -> Option<EntityId> {
        self.cast.source_id
    }

    /// The bound target, if any.
    #[must_use]
    pub const fn target_id(&self) -> Option<EntityId> {
        self.target_id
    }

    /// The cast snapshot.
    #[must_use]
    pub const fn cast(&self) -> &CastData {
        &self.cast
    }

    /// Damage type of the projectile itself.
    #[must_use]
    pub fn damage_type(&self) -> DamageType {
        self.cast.spell.projectile.damage_type
    }

    /// Time the projectile entered the simulation.
    #[must_use]
    pub const fn spawn_time(&self) -> f64 {
        self.spawn_time
    }

    /// Time at which the projectile is removed; infinite until it explodes.
    #[must_use]
    pub const fn destroy_time(&self) -> f64 {
        self.destroy_time
    }

    /// Effect intensity in `[0, 1]`.
    #[must_use]
    pub const fn effect_modifier(&self) -> f32 {
        self.effect_modifier
    }

    /// Friction handed to the physics layer.
    #[must_use]
    pub const fn friction(&self) -> f32 {
        self.tuning.friction
    }

    /// Elasticity handed to the physics layer.
    #[must_use]
    pub const fn elasticity(&self) -> f32 {
        self.tuning.elasticity
    }

    /// Where the damage comes from.
    #[must_use]
    pub const fn damage_source(&self) -> &DamageSource {
        &self.damage_source
    }

    /// Current physical/render flags.
    #[must_use]
    pub const fn physics_state(&self) -> PhysicsState {
        self.physics
    }

    /// Entity qualities.
    #[must_use]
    pub const fn qualities(&self) -> Qualities {
        self.qualities
    }

    /// Current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    pub(crate) const fn tuning(&self) -> &ProjectileTuning {
        &self.tuning
    }

    /// Returns `true` once the surrounding simulation should remove the entity.
    #[must_use]
    pub fn is_marked_for_removal(&self) -> bool {
        self.phase == Phase::Removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::helpers::{fire_bolt_cast, CASTER};

    fn bolt() -> ProjectileEntity {
        ProjectileEntity::new(
            EntityId::new(100),
            fire_bolt_cast(),
            None,
            5.0,
            &ProjectileTuning::default(),
        )
        .unwrap()
    }

    mod construction_tests {
        use super::*;

        #[test]
        fn starts_in_flight_with_no_destroy_time() {
            let b = bolt();
            assert_eq!(b.phase(), Phase::Flight);
            assert!(b.destroy_time().is_infinite());
            assert_eq!(b.spawn_time(), 5.0);
            assert!(!b.is_marked_for_removal());
        }

        #[test]
        fn carries_fixed_physics_tuning() {
            let b = bolt();
            assert_eq!(b.friction(), 1.0);
            assert_eq!(b.elasticity(), 0.0);
            assert_eq!(b.physics_state(), PhysicsState::projectile_in_flight());
            assert_eq!(b.qualities(), Qualities::projectile());
        }

        #[test]
        fn effect_modifier_comes_from_power_level() {
            // fire_bolt_cast uses power level 4.5
            assert!((bolt().effect_modifier() - 0.5).abs() < 1e-6);
        }

        #[test]
        fn identity_comes_from_cast() {
            let b = bolt();
            assert_eq!(b.id(), EntityId::new(100));
            assert_eq!(b.source_id(), Some(CASTER));
            assert_eq!(b.target_id(), None);
            assert_eq!(b.damage_type(), DamageType::Fire);
        }

        #[test]
        fn invalid_cast_is_rejected() {
            let mut cast = fire_bolt_cast();
            cast.max_range = f32::NAN;
            let err = ProjectileEntity::new(
                EntityId::new(1),
                cast,
                None,
                0.0,
                &ProjectileTuning::default(),
            )
            .unwrap_err();
            assert!(matches!(err, CastError::InvalidRange(_)));
        }

        #[test]
        fn zero_target_means_unbound() {
            let b = ProjectileEntity::new(
                EntityId::new(1),
                fire_bolt_cast(),
                Some(EntityId::new(0)),
                0.0,
                &ProjectileTuning::default(),
            )
            .unwrap();
            assert_eq!(b.target_id(), None);
        }

        #[test]
        fn overflowing_spell_damage_is_rejected() {
            let mut cast = fire_bolt_cast();
            let spell = std::sync::Arc::make_mut(&mut cast.spell);
            spell.projectile.base_intensity = 1e308;
            spell.projectile.variance = 1e308;
            let err = ProjectileEntity::new(
                EntityId::new(1),
                cast,
                None,
                0.0,
                &ProjectileTuning::default(),
            )
            .unwrap_err();
            assert!(matches!(err, CastError::InvalidIntensity { .. }));
        }

        #[test]
        fn invalid_tuning_is_rejected() {
            let tuning = ProjectileTuning::default().with_max_lifetime(-5.0);
            let err =
                ProjectileEntity::new(EntityId::new(1), fire_bolt_cast(), None, 0.0, &tuning)
                    .unwrap_err();
            assert!(matches!(err, CastError::Tuning(_)));
        }
    }

    mod life_drain_tests {
        use super::*;

        #[test]
        fn defaults_to_standard_damage() {
            assert_eq!(bolt().damage_source(), &DamageSource::Standard);
        }

        #[test]
        fn conversion_is_recorded() {
            let mut b = bolt();
            b.make_life_projectile(40, 0.75).unwrap();
            assert_eq!(
                b.damage_source(),
                &DamageSource::LifeDrain {
                    drained: 40,
                    ratio: 0.75
                }
            );
        }

        #[test]
        fn conversion_is_irrevocable() {
            let mut b = bolt();
            b.make_life_projectile(40, 0.75).unwrap();
            let err = b.make_life_projectile(10, 2.0).unwrap_err();
            assert!(matches!(err, CastError::AlreadyLifeDrain(_)));
            assert_eq!(
                b.damage_source(),
                &DamageSource::LifeDrain {
                    drained: 40,
                    ratio: 0.75
                }
            );
        }

        #[test]
        fn bad_ratio_is_rejected() {
            let mut b = bolt();
            assert!(matches!(
                b.make_life_projectile(10, f64::INFINITY),
                Err(CastError::InvalidDrainRatio(_))
            ));
            assert!(matches!(
                b.make_life_projectile(10, -0.5),
                Err(CastError::InvalidDrainRatio(_))
            ));
            assert_eq!(b.damage_source(), &DamageSource::Standard);
        }
    }
}
