//! Crate-level tests for spell projectiles.
//!
//! - `determinism.rs`: same seed and inputs give identical outcomes
//! - `integration.rs`: full flights from spawn to removal
//! - `properties.rs`: proptest invariants over timing and damage
//! - `helpers.rs`: scripted world, cast fixtures and seeded RNG

pub(crate) mod helpers;
