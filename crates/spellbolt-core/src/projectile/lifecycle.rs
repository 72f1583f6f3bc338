//! Spawn, expiry and detonation of spell projectiles.
//!
//! The lifecycle controller runs once per simulation tick per live projectile,
//! after the physics layer has delivered that frame's collisions.
//!
//! # Tick Rules
//!
//! 1. A projectile already marked for removal is left alone.
//! 2. A projectile outside a valid cell, or whose destroy time has passed, is
//!    marked for removal without any explosion effects.
//! 3. Otherwise, unless removal is already due within `destroy_guard`, a
//!    projectile past its maximum range or lifetime explodes and is scheduled
//!    for removal `explosion_grace` later.

use glam::Vec3;

use crate::world::{PlayScript, World};

use super::{Phase, ProjectileEntity};

/// Per-tick inputs from the surrounding simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickInput {
    /// Current simulation time.
    pub now: f64,
    /// Current position of the projectile.
    pub position: Vec3,
    /// Whether the projectile is still inside a valid world cell.
    pub in_valid_cell: bool,
}

/// Why a projectile exploded on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpiryCause {
    /// Travelled further than the cast's maximum range.
    Range,
    /// Stayed alive longer than the maximum lifetime.
    Lifetime,
}

/// What a tick did to the projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickOutcome {
    /// Already marked for removal; nothing evaluated.
    AlreadyRemoved,
    /// Marked for removal this tick.
    MarkedForRemoval,
    /// Exploded this tick and scheduled for removal.
    Exploded(ExpiryCause),
    /// Still flying, or waiting out its grace period.
    Unchanged,
}

impl ProjectileEntity {
    /// Advances the projectile's lifecycle by one tick.
    pub fn tick<W: World + ?Sized>(&mut self, world: &mut W, input: TickInput) -> TickOutcome {
        if self.phase == Phase::Removed {
            return TickOutcome::AlreadyRemoved;
        }

        let now = input.now;
        if !input.in_valid_cell || self.destroy_time <= now {
            tracing::debug!(
                projectile = %self.id,
                in_valid_cell = input.in_valid_cell,
                destroy_time = self.destroy_time,
                now,
                "marking spell projectile for removal"
            );
            self.phase = Phase::Removed;
            return TickOutcome::MarkedForRemoval;
        }

        if self.destroy_time > now + self.tuning.destroy_guard {
            if let Some(cause) = self.expiry_cause(input.position, now) {
                tracing::debug!(projectile = %self.id, ?cause, now, "spell projectile expired");
                self.explode(world);
                self.schedule_destroy(now + self.tuning.explosion_grace);
                return TickOutcome::Exploded(cause);
            }
        }

        tracing::trace!(projectile = %self.id, now, "spell projectile in flight");
        TickOutcome::Unchanged
    }

    /// Called once the projectile has entered the simulation.
    ///
    /// Plays the launch effect and restarts the lifetime clock, so time spent
    /// between construction and spawn does not count against the lifetime.
    pub fn post_spawn<W: World + ?Sized>(&mut self, world: &mut W, now: f64) {
        world.emit_effect(self.id, PlayScript::Launch, self.effect_modifier);
        self.spawn_time = now;
    }

    /// Detonates the projectile.
    ///
    /// Plays the explosion effect and turns the projectile into an inert
    /// placeholder. Only the first call in flight has any effect; returns
    /// `true` if this call detonated it.
    pub(crate) fn explode<W: World + ?Sized>(&mut self, world: &mut W) -> bool {
        if self.phase != Phase::Flight {
            return false;
        }
        world.emit_effect(self.id, PlayScript::Explode, self.effect_modifier);
        self.physics = self.physics.exploded();
        self.phase = Phase::Exploded;
        tracing::debug!(projectile = %self.id, "spell projectile exploded");
        true
    }

    /// Moves the destroy time to `at` unless it is already earlier.
    pub(crate) fn schedule_destroy(&mut self, at: f64) {
        self.destroy_time = self.destroy_time.min(at);
    }

    fn expiry_cause(&self, position: Vec3, now: f64) -> Option<ExpiryCause> {
        let travelled = position.distance(self.cast.initial_cast_position);
        if travelled > self.cast.max_range {
            Some(ExpiryCause::Range)
        } else if self.spawn_time + self.tuning.max_lifetime <= now {
            Some(ExpiryCause::Lifetime)
        } else {
            None
        }
    }
}
