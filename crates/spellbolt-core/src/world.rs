//! The world a spell projectile lives in, as seen from the projectile.
//!
//! Everything the projectile needs from outside itself goes through the
//! [`World`] trait: entity lookup, visibility, capability queries on other
//! entities, effect and text delivery, and the damage pipeline. The trait is
//! injected into every entry point instead of being reached through a global,
//! so tests can drive the projectile against a scripted fake world.
//!
//! # Absence
//!
//! Lookups return `Option`. An entity that left the simulation between cast
//! and impact is simply `None`; callers skip whatever needed it.
//!
//! # Example
//!
//! A world implementation typically wraps the server's entity registry:
//!
//! ```rust,ignore
//! impl World for ServerWorld {
//!     fn find_object(&self, id: EntityId) -> Option<EntityId> {
//!         self.registry.contains(id).then_some(id)
//!     }
//!     // ...
//! }
//! ```

use crate::cast::CastData;
use crate::collision::CollisionEvent;
use crate::damage::DamageEvent;
use crate::entity::{DamageType, EntityId};

/// Visual/audio script played on an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayScript {
    /// Projectile leaves the caster.
    Launch,
    /// Projectile detonates.
    Explode,
}

/// One-shot sound played on an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sound {
    /// Target shrugged off a spell.
    ResistSpell,
}

/// Chat channel a text message is delivered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextChannel {
    /// Spellcasting messages.
    Magic,
}

/// Collaborators a spell projectile depends on.
///
/// Query methods take `&self`. Methods that deliver something to the world
/// take `&mut self`. Implementations must tolerate ids of entities that no
/// longer exist.
pub trait World {
    /// Resolves an id to a live entity anywhere in the world.
    fn find_object(&self, id: EntityId) -> Option<EntityId>;

    /// Resolves an id to a live entity visible from `viewer`.
    fn find_within_visibility(&self, viewer: EntityId, id: EntityId) -> Option<EntityId>;

    /// Returns `true` if the entity is player-controlled.
    fn is_player(&self, id: EntityId) -> bool;

    /// Display name of an entity.
    fn name(&self, id: EntityId) -> String;

    /// Returns `true` if `target` cannot be damaged by `attacker`.
    ///
    /// `attacker` is `None` when the caster has left the simulation.
    fn is_immune_to_damage(&self, target: EntityId, attacker: Option<EntityId>) -> bool;

    /// Rolls the target's magic resistance against a caster of the given skill.
    fn try_magic_resist(&mut self, target: EntityId, attacker_skill: u32) -> bool;

    /// Damage type of an entity (the element an implement is attuned to).
    fn damage_type(&self, id: EntityId) -> DamageType;

    /// Elemental damage multiplier granted by an implement, if it has one.
    fn elemental_damage_mod(&self, implement: EntityId) -> Option<f64>;

    /// Plays a script on an entity at the given intensity.
    fn emit_effect(&mut self, on: EntityId, effect: PlayScript, intensity: f32);

    /// Plays a sound on an entity.
    fn emit_sound(&mut self, on: EntityId, sound: Sound, volume: f32);

    /// Sends a text message to an entity.
    fn send_text(&mut self, recipient: EntityId, text: &str, channel: TextChannel);

    /// Notifies `target` that it resisted a spell from `caster`.
    fn on_resist_spell(&mut self, target: EntityId, caster: EntityId);

    /// Records PK activity for a player.
    fn update_pk_activity(&mut self, player: EntityId);

    /// Runs armor, resistance and final-number math on a damage event.
    fn calculate_damage(&mut self, event: &mut DamageEvent, cast: &CastData);

    /// Applies a calculated damage event to its target.
    fn deal_damage(&mut self, target: EntityId, event: &DamageEvent);

    /// Pushes `target`'s current health to `player` without waiting for a
    /// state sync.
    fn refresh_target_health(&mut self, player: EntityId, target: EntityId);

    /// Brings the projectile's position up to date before it detonates.
    fn update_position(&mut self, projectile: EntityId);

    /// Generic physical-entity collision handling for the projectile.
    ///
    /// Runs after the projectile's own response. Returns the base handler's
    /// result, which is passed back to the physics layer unchanged.
    fn base_collision(&mut self, projectile: EntityId, event: CollisionEvent) -> bool;
}
