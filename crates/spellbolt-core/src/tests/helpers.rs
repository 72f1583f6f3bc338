//! Test fixtures and a scripted [`World`].
//!
//! [`FakeWorld`] keeps a small entity table and records every delivery and a
//! few selected queries as [`WorldCall`]s, so tests can assert on both what
//! the projectile did and the order it did it in.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

use glam::Vec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::cast::{CastData, ProjectileSpell, SpellInfo};
use crate::collision::CollisionEvent;
use crate::damage::DamageEvent;
use crate::entity::{DamageType, EntityId, MagicSkill};
use crate::world::{PlayScript, Sound, TextChannel, World};

/// Caster used by the cast fixtures.
pub const CASTER: EntityId = EntityId::new(1);

/// Implement id for wand tests.
pub const WAND: EntityId = EntityId::new(50);

// =============================================================================
// Fixtures
// =============================================================================

/// A resistible fire bolt: 10-15 damage, 50 range, power level 4.5.
pub fn fire_bolt_cast() -> CastData {
    CastData {
        source_id: Some(CASTER),
        initial_cast_position: Vec3::ZERO,
        max_range: 50.0,
        current_skill: 200,
        spell: Arc::new(SpellInfo {
            name: "Flame Bolt I".to_string(),
            resistible: true,
            skill: MagicSkill::WarMagic,
            projectile: ProjectileSpell {
                damage_type: DamageType::Fire,
                base_intensity: 10.0,
                variance: 5.0,
            },
        }),
        wand_id: None,
        power_level: 4.5,
    }
}

/// An unresistible health bolt with no rolled damage of its own.
pub fn drain_bolt_cast() -> CastData {
    CastData {
        spell: Arc::new(SpellInfo {
            name: "Drain Bolt".to_string(),
            resistible: false,
            skill: MagicSkill::LifeMagic,
            projectile: ProjectileSpell {
                damage_type: DamageType::Health,
                base_intensity: 0.0,
                variance: 0.0,
            },
        }),
        ..fire_bolt_cast()
    }
}

/// Deterministic RNG for damage rolls.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Routes `tracing` output to the test harness. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

// =============================================================================
// Scripted World
// =============================================================================

/// One recorded interaction with [`FakeWorld`].
#[derive(Debug, Clone, PartialEq)]
pub enum WorldCall {
    Effect {
        on: EntityId,
        effect: PlayScript,
        intensity: f32,
    },
    Sound(EntityId, Sound),
    Text(EntityId, String),
    ResistNotified {
        target: EntityId,
        caster: EntityId,
    },
    PkActivity(EntityId),
    ResistRoll(EntityId, u32),
    ImmunityCheck(EntityId, Option<EntityId>),
    CalculateDamage(EntityId),
    DealDamage(EntityId),
    RefreshHealth {
        player: EntityId,
        target: EntityId,
    },
    UpdatePosition(EntityId),
    BaseCollision(EntityId, CollisionEvent),
}

#[derive(Debug, Clone)]
struct FakeEntity {
    name: String,
    player: bool,
    visible: bool,
    immune: bool,
    damage_type: DamageType,
    elemental_mod: Option<f64>,
}

impl FakeEntity {
    fn actor(name: &str, player: bool) -> Self {
        Self {
            name: name.to_string(),
            player,
            visible: true,
            immune: false,
            damage_type: DamageType::Undefined,
            elemental_mod: None,
        }
    }
}

/// An in-memory [`World`] with scripted answers.
#[derive(Debug)]
pub struct FakeWorld {
    entities: HashMap<EntityId, FakeEntity>,
    resist: bool,
    base_result: bool,
    armor_reduction: f64,
    calls: RefCell<Vec<WorldCall>>,
    damage_dealt: Vec<DamageEvent>,
}

impl Default for FakeWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeWorld {
    /// An empty world where nothing resists and base collisions return `true`.
    pub fn new() -> Self {
        Self {
            entities: HashMap::new(),
            resist: false,
            base_result: true,
            armor_reduction: 1.0,
            calls: RefCell::new(Vec::new()),
            damage_dealt: Vec::new(),
        }
    }

    pub fn add_monster(&mut self, id: EntityId, name: &str) {
        self.entities.insert(id, FakeEntity::actor(name, false));
    }

    pub fn add_player(&mut self, id: EntityId, name: &str) {
        self.entities.insert(id, FakeEntity::actor(name, true));
    }

    /// Adds an implement attuned to `element` with the given multiplier.
    pub fn add_wand(&mut self, id: EntityId, element: DamageType, modifier: f64) {
        self.add_plain_wand(id, element);
        if let Some(wand) = self.entities.get_mut(&id) {
            wand.elemental_mod = Some(modifier);
        }
    }

    /// Adds an implement attuned to `element` that grants no multiplier.
    pub fn add_plain_wand(&mut self, id: EntityId, element: DamageType) {
        let mut wand = FakeEntity::actor("Wand", false);
        wand.damage_type = element;
        self.entities.insert(id, wand);
    }

    pub fn hide(&mut self, id: EntityId) {
        if let Some(entity) = self.entities.get_mut(&id) {
            entity.visible = false;
        }
    }

    pub fn make_immune(&mut self, id: EntityId) {
        if let Some(entity) = self.entities.get_mut(&id) {
            entity.immune = true;
        }
    }

    pub fn remove(&mut self, id: EntityId) {
        self.entities.remove(&id);
    }

    /// Makes every resist roll succeed (or fail).
    pub fn force_resist(&mut self, resist: bool) {
        self.resist = resist;
    }

    pub fn set_base_result(&mut self, result: bool) {
        self.base_result = result;
    }

    /// Multiplier the damage calculation applies to base damage.
    pub fn set_armor_reduction(&mut self, factor: f64) {
        self.armor_reduction = factor;
    }

    /// Snapshot of recorded calls, oldest first.
    pub fn calls(&self) -> Vec<WorldCall> {
        self.calls.borrow().clone()
    }

    /// Number of explosion effects played on `id`.
    pub fn explosions(&self, id: EntityId) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| {
                matches!(call, WorldCall::Effect { on, effect: PlayScript::Explode, .. } if *on == id)
            })
            .count()
    }

    /// Damage events delivered so far.
    pub fn damage_dealt(&self) -> &[DamageEvent] {
        &self.damage_dealt
    }

    fn record(&self, call: WorldCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl World for FakeWorld {
    fn find_object(&self, id: EntityId) -> Option<EntityId> {
        self.entities.contains_key(&id).then_some(id)
    }

    fn find_within_visibility(&self, _viewer: EntityId, id: EntityId) -> Option<EntityId> {
        self.entities
            .get(&id)
            .filter(|entity| entity.visible)
            .map(|_| id)
    }

    fn is_player(&self, id: EntityId) -> bool {
        self.entities.get(&id).is_some_and(|entity| entity.player)
    }

    fn name(&self, id: EntityId) -> String {
        self.entities
            .get(&id)
            .map_or_else(|| id.to_string(), |entity| entity.name.clone())
    }

    fn is_immune_to_damage(&self, target: EntityId, attacker: Option<EntityId>) -> bool {
        self.record(WorldCall::ImmunityCheck(target, attacker));
        self.entities.get(&target).is_some_and(|entity| entity.immune)
    }

    fn try_magic_resist(&mut self, target: EntityId, attacker_skill: u32) -> bool {
        self.record(WorldCall::ResistRoll(target, attacker_skill));
        self.resist
    }

    fn damage_type(&self, id: EntityId) -> DamageType {
        self.entities
            .get(&id)
            .map_or(DamageType::Undefined, |entity| entity.damage_type)
    }

    fn elemental_damage_mod(&self, implement: EntityId) -> Option<f64> {
        self.entities.get(&implement).and_then(|entity| entity.elemental_mod)
    }

    fn emit_effect(&mut self, on: EntityId, effect: PlayScript, intensity: f32) {
        self.record(WorldCall::Effect {
            on,
            effect,
            intensity,
        });
    }

    fn emit_sound(&mut self, on: EntityId, sound: Sound, _volume: f32) {
        self.record(WorldCall::Sound(on, sound));
    }

    fn send_text(&mut self, recipient: EntityId, text: &str, _channel: TextChannel) {
        self.record(WorldCall::Text(recipient, text.to_string()));
    }

    fn on_resist_spell(&mut self, target: EntityId, caster: EntityId) {
        self.record(WorldCall::ResistNotified { target, caster });
    }

    fn update_pk_activity(&mut self, player: EntityId) {
        self.record(WorldCall::PkActivity(player));
    }

    fn calculate_damage(&mut self, event: &mut DamageEvent, _cast: &CastData) {
        self.record(WorldCall::CalculateDamage(event.target));
        event.final_damage = Some(event.base_damage * self.armor_reduction);
    }

    fn deal_damage(&mut self, target: EntityId, event: &DamageEvent) {
        self.record(WorldCall::DealDamage(target));
        self.damage_dealt.push(event.clone());
    }

    fn refresh_target_health(&mut self, player: EntityId, target: EntityId) {
        self.record(WorldCall::RefreshHealth { player, target });
    }

    fn update_position(&mut self, projectile: EntityId) {
        self.record(WorldCall::UpdatePosition(projectile));
    }

    fn base_collision(&mut self, projectile: EntityId, event: CollisionEvent) -> bool {
        self.record(WorldCall::BaseCollision(projectile, event));
        self.base_result
    }
}
