//! Entity identifiers and the component types a spell projectile carries.
//!
//! - [`EntityId`]: Unique identifier for entities in the surrounding world
//! - [`components`]: Physics flags, qualities and damage classification
//!
//! # Example
//!
//! ```
//! use spellbolt_core::entity::EntityId;
//!
//! let caster = EntityId::new(42);
//! assert_eq!(caster.as_u64(), 42);
//!
//! // A raw target id of zero means "unconstrained".
//! assert_eq!(EntityId::from_raw_target(0), None);
//! assert_eq!(EntityId::from_raw_target(7), Some(EntityId::new(7)));
//! ```

pub mod components;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use components::{DamageForm, DamageType, HitQuadrant, MagicSkill, PhysicsState, Qualities};

/// Unique identifier for an entity.
///
/// `EntityId` is a newtype wrapper around `u64`. Ids are assigned by the
/// surrounding world and may refer to entities that have since left the
/// simulation; resolve them through [`World`](crate::world::World) before use.
///
/// # Ordering
///
/// Entity IDs are ordered by their numeric value.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(u64);

impl EntityId {
    /// Creates a new `EntityId` from a raw `u64` value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Converts a raw wire id into an optional id, treating zero as "none".
    ///
    /// Cast requests encode "no bound target" and "no implement" as zero.
    #[must_use]
    pub const fn from_raw_target(raw: u64) -> Option<Self> {
        if raw == 0 {
            None
        } else {
            Some(Self(raw))
        }
    }

    /// Returns the raw `u64` value of this identifier.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

impl From<EntityId> for u64 {
    fn from(id: EntityId) -> Self {
        id.0
    }
}
