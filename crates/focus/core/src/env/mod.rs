//! Traits describing the world the engine casts against.
//!
//! The [`CastEnv`] aggregate bundles the oracles so the engine can reach
//! everything it needs without hard coupling to concrete implementations.
//! Oracles are read-only; the engine never mutates the world directly.

mod world;

pub use world::{EntityId, Pose, Target, Tick, UnlockOracle, WorldOracle};

use crate::math::Trajectory;

/// Aggregates the read-only oracles required during a cast.
#[derive(Clone, Copy)]
pub struct CastEnv<'a> {
    world: Option<&'a dyn WorldOracle>,
    unlocks: Option<&'a dyn UnlockOracle>,
}

impl<'a> CastEnv<'a> {
    pub fn new(world: &'a dyn WorldOracle) -> Self {
        Self { world: Some(world), unlocks: None }
    }

    /// Env with no oracles at all; casts against it reject at start.
    pub fn empty() -> Self {
        Self { world: None, unlocks: None }
    }

    pub fn with_unlocks(mut self, unlocks: &'a dyn UnlockOracle) -> Self {
        self.unlocks = Some(unlocks);
        self
    }

    pub fn world(&self) -> Option<&'a dyn WorldOracle> {
        self.world
    }

    /// Pose lookup tolerating both a missing world and a missing actor.
    pub fn pose_of(&self, actor: EntityId) -> Option<Pose> {
        self.world.and_then(|w| w.pose_of(actor))
    }

    /// Hit-test against the world; an absent world resolves nothing.
    pub fn resolve(&self, trajectory: &Trajectory) -> Vec<Target> {
        self.world.map(|w| w.resolve(trajectory)).unwrap_or_default()
    }

    pub fn contains_actor(&self, actor: EntityId) -> bool {
        self.world.is_some_and(|w| w.contains_actor(actor))
    }

    /// Unlock check; with no progression provider everything is available.
    pub fn is_unlocked(&self, requirement: &str) -> bool {
        self.unlocks.is_none_or(|u| u.is_unlocked(requirement))
    }
}
