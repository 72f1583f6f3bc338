//! Collision response for spell projectiles.
//!
//! The physics layer reports every collision as a [`CollisionEvent`] through
//! [`ProjectileEntity::handle_collision`]. Every kind detonates the projectile
//! and schedules its removal; only actor collisions can deal damage.
//!
//! # Actor Validation
//!
//! An actor collision deals damage only if all of these hold:
//! - the projectile is still in flight;
//! - the struck id resolves to a live entity visible to the projectile;
//! - the projectile has no bound target, or the struck entity is that target;
//! - the struck entity is not the caster;
//! - the struck entity is not immune to damage from the caster.
//!
//! A failed check skips damage only. The projectile still detonates.

use rand::Rng;
use std::fmt;

use crate::damage::{self, Impact, ImpactOutcome};
use crate::entity::EntityId;
use crate::projectile::{Phase, ProjectileEntity};
use crate::world::World;

/// A collision reported by the physics layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollisionEvent {
    /// Hit static world geometry.
    Environment,
    /// Hit a physical object that is not an attackable actor.
    Object {
        /// The object that was hit
        id: EntityId,
    },
    /// Hit an attackable actor.
    Actor {
        /// The actor that was hit
        id: EntityId,
    },
}

impl fmt::Display for CollisionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Environment => write!(f, "environment"),
            Self::Object { id } => write!(f, "object {id}"),
            Self::Actor { id } => write!(f, "actor {id}"),
        }
    }
}

/// Why an actor collision dealt no damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectReason {
    /// The projectile had already detonated or been marked for removal.
    Spent,
    /// The struck id is gone or not visible to the projectile.
    NotVisible,
    /// The projectile is bound to a different target.
    NotBoundTarget {
        /// The projectile's bound target
        bound: EntityId,
    },
    /// The struck entity is the caster.
    Caster,
    /// The struck entity is immune to the caster's damage.
    Immune,
}

/// Result of handling one collision.
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionReport {
    /// Outcome of the actor hit; `None` for environment and object collisions.
    pub impact: Option<ImpactOutcome>,
    /// `true` if this collision detonated the projectile.
    pub exploded: bool,
    /// Result of the generic collision handling, for the physics layer.
    pub base_result: bool,
}

impl ProjectileEntity {
    /// Responds to a collision reported by the physics layer.
    ///
    /// Actor hits are validated and resolved first. Then, for every kind, the
    /// position is finalized, the projectile detonates, removal is scheduled
    /// `explosion_grace` after `now`, and the generic collision handling runs.
    ///
    /// A projectile already marked for removal ignores the collision and
    /// touches neither the world nor its own state.
    pub fn handle_collision<W, R>(
        &mut self,
        world: &mut W,
        rng: &mut R,
        event: CollisionEvent,
        now: f64,
    ) -> CollisionReport
    where
        W: World + ?Sized,
        R: Rng,
    {
        tracing::debug!(projectile = %self.id(), %event, now, "spell projectile collision");

        if self.is_marked_for_removal() {
            let impact = match event {
                CollisionEvent::Environment | CollisionEvent::Object { .. } => None,
                CollisionEvent::Actor { .. } => {
                    Some(ImpactOutcome::Rejected(RejectReason::Spent))
                }
            };
            return CollisionReport {
                impact,
                exploded: false,
                base_result: false,
            };
        }

        let impact = match event {
            CollisionEvent::Environment | CollisionEvent::Object { .. } => None,
            CollisionEvent::Actor { id } => Some(self.strike_actor(world, rng, id)),
        };

        world.update_position(self.id());
        let exploded = self.explode(world);
        self.schedule_destroy(now + self.tuning().explosion_grace);
        let base_result = world.base_collision(self.id(), event);

        CollisionReport {
            impact,
            exploded,
            base_result,
        }
    }

    fn strike_actor<W, R>(&self, world: &mut W, rng: &mut R, struck: EntityId) -> ImpactOutcome
    where
        W: World + ?Sized,
        R: Rng,
    {
        let (target, caster) = match self.validate_strike(world, struck) {
            Ok(resolved) => resolved,
            Err(reason) => {
                tracing::debug!(projectile = %self.id(), %struck, ?reason, "actor hit rejected");
                return ImpactOutcome::Rejected(reason);
            }
        };

        let impact = Impact {
            cast: self.cast(),
            source: self.damage_source(),
            damage_type: self.damage_type(),
            caster,
            target,
        };
        damage::resolve_impact(world, rng, &impact)
    }

    /// Resolves the struck actor and the caster, or says why not to damage it.
    fn validate_strike<W: World + ?Sized>(
        &self,
        world: &W,
        struck: EntityId,
    ) -> Result<(EntityId, Option<EntityId>), RejectReason> {
        if self.phase() != Phase::Flight {
            return Err(RejectReason::Spent);
        }

        let target = world
            .find_within_visibility(self.id(), struck)
            .ok_or(RejectReason::NotVisible)?;

        if let Some(bound) = self.target_id() {
            if bound != target {
                return Err(RejectReason::NotBoundTarget { bound });
            }
        }

        if self.source_id() == Some(target) {
            return Err(RejectReason::Caster);
        }

        let caster = self.source_id().and_then(|id| world.find_object(id));
        if world.is_immune_to_damage(target, caster) {
            return Err(RejectReason::Immune);
        }

        Ok((target, caster))
    }
}
