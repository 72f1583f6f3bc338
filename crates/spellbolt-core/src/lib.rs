//! # Spellbolt Core
//!
//! Lifecycle, collision response and damage resolution for spell projectiles.
//!
//! A spell projectile is created when a cast resolves, flies until it hits
//! something or runs out of range or time, detonates, and lingers briefly as an
//! effect placeholder before the surrounding simulation removes it.
//!
//! ## Architecture
//!
//! - **Lifecycle controller** ([`ProjectileEntity::tick`],
//!   [`ProjectileEntity::post_spawn`]): spawn/expiry timing and the
//!   flight → explosion → removal transitions.
//! - **Collision dispatcher** ([`ProjectileEntity::handle_collision`]): one
//!   entry point for every [`CollisionEvent`] kind.
//! - **Damage resolution** ([`damage`]): resist check, damage roll, modifier
//!   composition and [`DamageEvent`] assembly for actor impacts.
//!
//! Everything outside the projectile (entity lookup, visibility, effects, the
//! damage formula itself) is reached through the injected [`World`] trait.
//! Randomness comes from a caller-supplied [`rand::Rng`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use spellbolt_core::{CastData, CollisionEvent, ProjectileEntity, ProjectileTuning};
//!
//! let mut bolt = ProjectileEntity::new(id, cast, None, now, &ProjectileTuning::default())?;
//! bolt.post_spawn(&mut world, now);
//! bolt.handle_collision(&mut world, &mut rng, CollisionEvent::Actor { id: struck }, now);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cast;
pub mod collision;
pub mod config;
pub mod damage;
pub mod entity;
pub mod projectile;
pub mod world;

#[cfg(test)]
mod tests;

pub use cast::{CastData, CastError, ProjectileSpell, SpellInfo};
pub use collision::{CollisionEvent, CollisionReport, RejectReason};
pub use config::{ConfigError, ProjectileTuning};
pub use damage::{DamageEvent, ImpactOutcome};
pub use entity::EntityId;
pub use projectile::{DamageSource, Phase, ProjectileEntity, TickInput, TickOutcome};
pub use world::World;
