//! Component types carried by spell projectiles and the damage they deal.
//!
//! - [`PhysicsState`]: Physical/render flag set, with the explosion transition
//! - [`Qualities`]: Boolean entity qualities fixed at construction
//! - [`DamageType`], [`DamageForm`], [`HitQuadrant`], [`MagicSkill`]: damage
//!   classification copied into every [`DamageEvent`](crate::damage::DamageEvent)

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

bitflags! {
    /// Physical and render state of a simulated object.
    ///
    /// Each flag is an independent capability. The bit values match the
    /// physics layer's wire layout so the set can be handed over unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use spellbolt_core::entity::PhysicsState;
    ///
    /// let flight = PhysicsState::projectile_in_flight();
    /// assert!(flight.is_solid());
    /// assert!(flight.reports_collisions());
    ///
    /// let exploded = flight.exploded();
    /// assert!(!exploded.is_solid());
    /// assert!(!exploded.draws());
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct PhysicsState: u32 {
        /// Passes through other objects instead of blocking them.
        const ETHEREAL = 0x0000_0004;
        /// Reports collisions to the scripting layer.
        const REPORT_COLLISIONS = 0x0000_0008;
        /// Collision detection is skipped entirely.
        const IGNORE_COLLISIONS = 0x0000_0010;
        /// Not drawn.
        const NODRAW = 0x0000_0020;
        /// Moves as a missile.
        const MISSILE = 0x0000_0040;
        /// Orientation follows the movement path.
        const ALIGNPATH = 0x0000_0100;
        /// Movement path is clipped against geometry.
        const PATHCLIPPED = 0x0000_0200;
        /// Emits light.
        const LIGHTING_ON = 0x0000_0800;
        /// Collisions are handled by script rather than the physics engine.
        const SCRIPTED_COLLISION = 0x0000_8000;
        /// Hidden from players.
        const CLOAKED = 0x0002_0000;
        /// Collisions never bounce.
        const INELASTIC = 0x0010_0000;
    }
}

impl PhysicsState {
    /// The state a spell projectile is launched with.
    #[must_use]
    pub const fn projectile_in_flight() -> Self {
        Self::INELASTIC
            .union(Self::SCRIPTED_COLLISION)
            .union(Self::REPORT_COLLISIONS)
            .union(Self::MISSILE)
            .union(Self::LIGHTING_ON)
            .union(Self::PATHCLIPPED)
            .union(Self::ALIGNPATH)
    }

    /// Returns the state after a detonation.
    ///
    /// The object becomes a non-solid, non-colliding, undrawn placeholder.
    /// Flags unrelated to collision or rendering are kept as they were.
    #[must_use]
    pub const fn exploded(self) -> Self {
        self.difference(Self::REPORT_COLLISIONS.union(Self::LIGHTING_ON))
            .union(Self::ETHEREAL)
            .union(Self::IGNORE_COLLISIONS)
            .union(Self::NODRAW)
            .union(Self::CLOAKED)
    }

    /// Returns `true` if the object blocks other objects.
    #[must_use]
    pub const fn is_solid(self) -> bool {
        !self.contains(Self::ETHEREAL)
    }

    /// Returns `true` if collision detection runs for this object.
    #[must_use]
    pub const fn is_collidable(self) -> bool {
        !self.contains(Self::IGNORE_COLLISIONS)
    }

    /// Returns `true` if collisions are reported back to the object.
    #[must_use]
    pub const fn reports_collisions(self) -> bool {
        self.contains(Self::REPORT_COLLISIONS)
    }

    /// Returns `true` if the object is drawn.
    #[must_use]
    pub const fn draws(self) -> bool {
        !self.contains(Self::NODRAW)
    }

    /// Returns `true` if the object emits light.
    #[must_use]
    pub const fn is_lit(self) -> bool {
        self.contains(Self::LIGHTING_ON)
    }

    /// Returns `true` if players can see the object.
    #[must_use]
    pub const fn is_visible(self) -> bool {
        !self.contains(Self::CLOAKED)
    }
}

/// Boolean qualities of a spell projectile.
///
/// These are set at construction and not touched by detonation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Qualities {
    /// Held in place by the physics layer between movement updates.
    pub stuck: bool,
    /// Can be targeted by attacks.
    pub attackable: bool,
    /// Hidden from the player's UI (selection, radar).
    pub ui_hidden: bool,
}

impl Qualities {
    /// Qualities of a freshly created spell projectile.
    #[must_use]
    pub const fn projectile() -> Self {
        Self {
            stuck: true,
            attackable: true,
            ui_hidden: true,
        }
    }
}

impl Default for Qualities {
    fn default() -> Self {
        Self::projectile()
    }
}

/// Elemental or physical damage type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DamageType {
    /// No damage type.
    #[default]
    Undefined,
    /// Slashing.
    Slash,
    /// Piercing.
    Pierce,
    /// Bludgeoning.
    Bludgeon,
    /// Frost.
    Cold,
    /// Flame.
    Fire,
    /// Acid.
    Acid,
    /// Lightning.
    Electric,
    /// Direct health damage (life-drain bolts).
    Health,
    /// Void magic.
    Nether,
}

impl fmt::Display for DamageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Undefined => "Undefined",
            Self::Slash => "Slash",
            Self::Pierce => "Pierce",
            Self::Bludgeon => "Bludgeon",
            Self::Cold => "Cold",
            Self::Fire => "Fire",
            Self::Acid => "Acid",
            Self::Electric => "Electric",
            Self::Health => "Health",
            Self::Nether => "Nether",
        };
        write!(f, "{name}")
    }
}

/// How damage is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageForm {
    /// Melee weapon.
    Melee,
    /// Missile weapon.
    Missile,
    /// Spell.
    Magic,
}

/// Body region a hit lands on.
///
/// Spells always use [`HitQuadrant::Undefined`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HitQuadrant {
    /// No directional hit location.
    #[default]
    Undefined,
    /// Upper body.
    High,
    /// Torso.
    Medium,
    /// Legs.
    Low,
}

/// Magic school a spell is cast with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MagicSkill {
    /// Offensive projectile spells.
    WarMagic,
    /// Healing and draining spells.
    LifeMagic,
    /// Damage-over-time and nether spells.
    VoidMagic,
    /// Buffs and debuffs on creatures.
    CreatureEnchantment,
    /// Buffs and debuffs on items.
    ItemEnchantment,
}
