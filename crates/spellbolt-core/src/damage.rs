//! Damage resolution for spell projectiles striking an actor.
//!
//! Runs only after a collision has been validated. The steps, in order:
//!
//! 1. PK bookkeeping when caster and target are both players.
//! 2. Resist check, for resistible spells not cast on oneself. A resisted
//!    spell stops here and builds no damage event.
//! 3. Damage roll: `drained * ratio` for life-drain bolts, otherwise a uniform
//!    roll in `[min, min + variance]` scaled by the implement's elemental
//!    modifier when its element matches the bolt.
//! 4. Assembly of the [`DamageEvent`], external damage calculation and
//!    delivery to the target.
//! 5. Immediate health refresh for a player caster.
//!
//! # PVP Dampening
//!
//! Between two players the elemental modifier keeps only half its deviation
//! from 1.0: a modifier of 1.4 becomes 1.2, and 0.8 becomes 0.9.

use rand::Rng;

use crate::cast::CastData;
use crate::collision::RejectReason;
use crate::entity::{DamageForm, DamageType, EntityId, HitQuadrant, MagicSkill};
use crate::projectile::DamageSource;
use crate::world::{Sound, TextChannel, World};

/// A damage request assembled by a projectile hit.
///
/// Fields up to `spell_name` are filled in by the projectile. The external
/// damage calculation fills in `final_damage`.
#[derive(Debug, Clone, PartialEq)]
pub struct DamageEvent {
    /// Caster, if still in the simulation.
    pub source: Option<EntityId>,
    /// Entity being damaged.
    pub target: EntityId,
    /// Implement the caster was wielding, if still in the simulation.
    pub weapon: Option<EntityId>,
    /// Always [`DamageForm::Magic`] for spell projectiles.
    pub damage_form: DamageForm,
    /// Damage type of the projectile.
    pub damage_type: DamageType,
    /// Always [`HitQuadrant::Undefined`] for spells.
    pub hit_quadrant: HitQuadrant,
    /// School the spell was cast with.
    pub attack_skill: MagicSkill,
    /// Caster's skill in that school at cast time.
    pub attack_skill_level: u32,
    /// Maximum possible roll, or the drained amount for life-drain bolts.
    pub pre_variance_damage: f64,
    /// Rolled damage before armor and resistances.
    pub base_damage: f64,
    /// Marks damage from a spell projectile.
    pub is_projectile_spell: bool,
    /// Display name of the spell.
    pub spell_name: String,
    /// Damage after the external calculation, if it has run.
    pub final_damage: Option<f64>,
}

/// What happened when a projectile struck an actor.
#[derive(Debug, Clone, PartialEq)]
pub enum ImpactOutcome {
    /// The hit failed validation; no damage was attempted.
    Rejected(RejectReason),
    /// The target resisted the spell.
    Resisted,
    /// Damage was calculated and delivered.
    Damaged(DamageEvent),
}

/// A validated actor hit, ready for resolution.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Impact<'a> {
    pub cast: &'a CastData,
    pub source: &'a DamageSource,
    pub damage_type: DamageType,
    /// Live caster, if any.
    pub caster: Option<EntityId>,
    pub target: EntityId,
}

/// Damage values produced by the roll.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DamageRoll {
    pre_variance: f64,
    base: f64,
}

/// Compresses an elemental modifier toward 1.0 for player-vs-player hits.
///
/// # Example
///
/// ```
/// use spellbolt_core::damage::pvp_dampen;
///
/// assert_eq!(pvp_dampen(1.4), 1.2);
/// assert_eq!(pvp_dampen(1.0), 1.0);
/// ```
#[must_use]
pub fn pvp_dampen(modifier: f64) -> f64 {
    (modifier - 1.0) / 2.0 + 1.0
}

/// Resolves a validated hit into a resist or a delivered damage event.
pub(crate) fn resolve_impact<W, R>(
    world: &mut W,
    rng: &mut R,
    impact: &Impact<'_>,
) -> ImpactOutcome
where
    W: World + ?Sized,
    R: Rng,
{
    let target = impact.target;
    let pvp =
        impact.caster.is_some_and(|caster| world.is_player(caster)) && world.is_player(target);

    if pvp {
        if let Some(caster) = impact.caster {
            world.update_pk_activity(caster);
        }
        world.update_pk_activity(target);
    }

    if try_resist(world, impact) {
        return ImpactOutcome::Resisted;
    }

    let wand = impact.cast.wand_id.and_then(|id| world.find_object(id));
    let roll = roll_damage(world, rng, impact, wand, pvp);
    let spell = &impact.cast.spell;

    let mut event = DamageEvent {
        source: impact.caster,
        target,
        weapon: wand,
        damage_form: DamageForm::Magic,
        damage_type: impact.damage_type,
        hit_quadrant: HitQuadrant::Undefined,
        attack_skill: spell.skill,
        attack_skill_level: impact.cast.current_skill,
        pre_variance_damage: roll.pre_variance,
        base_damage: roll.base,
        is_projectile_spell: true,
        spell_name: spell.name.clone(),
        final_damage: None,
    };

    world.calculate_damage(&mut event, impact.cast);
    world.deal_damage(target, &event);
    tracing::debug!(
        %target,
        caster = ?impact.caster,
        base_damage = event.base_damage,
        final_damage = ?event.final_damage,
        "spell projectile damage delivered"
    );

    if let Some(caster) = impact.caster.filter(|&caster| world.is_player(caster)) {
        world.refresh_target_health(caster, target);
    }

    ImpactOutcome::Damaged(event)
}

/// Rolls the target's resistance. Returns `true` if the spell was resisted.
fn try_resist<W: World + ?Sized>(world: &mut W, impact: &Impact<'_>) -> bool {
    let target = impact.target;
    if !impact.cast.spell.resistible || impact.caster == Some(target) {
        return false;
    }
    if !world.try_magic_resist(target, impact.cast.current_skill) {
        return false;
    }

    world.emit_sound(target, Sound::ResistSpell, 1.0);
    if let Some(caster) = impact.caster {
        let caster_name = world.name(caster);
        let target_name = world.name(target);
        world.send_text(
            target,
            &format!("You resist the spell cast by {caster_name}"),
            TextChannel::Magic,
        );
        world.send_text(
            caster,
            &format!("{target_name} resists your spell"),
            TextChannel::Magic,
        );
        world.on_resist_spell(target, caster);
    }
    tracing::debug!(%target, caster = ?impact.caster, "spell resisted");
    true
}

fn roll_damage<W, R>(
    world: &W,
    rng: &mut R,
    impact: &Impact<'_>,
    wand: Option<EntityId>,
    pvp: bool,
) -> DamageRoll
where
    W: World + ?Sized,
    R: Rng,
{
    match *impact.source {
        DamageSource::LifeDrain { drained, ratio } => {
            let drained = f64::from(drained);
            DamageRoll {
                pre_variance: drained,
                base: drained * ratio,
            }
        }
        DamageSource::Standard => {
            let meta = &impact.cast.spell.projectile;
            let max = meta.max_damage();
            let mut base = rng.gen_range(meta.min_damage()..=max);
            if let Some(wand) = wand {
                base *= elemental_modifier(world, wand, impact.damage_type, pvp);
            }
            DamageRoll {
                pre_variance: max,
                base,
            }
        }
    }
}

/// Elemental multiplier an implement applies to a bolt of `damage_type`.
fn elemental_modifier<W: World + ?Sized>(
    world: &W,
    wand: EntityId,
    damage_type: DamageType,
    pvp: bool,
) -> f64 {
    let modifier = if world.damage_type(wand) == damage_type {
        world.elemental_damage_mod(wand).unwrap_or(1.0)
    } else {
        1.0
    };
    if pvp {
        pvp_dampen(modifier)
    } else {
        modifier
    }
}
