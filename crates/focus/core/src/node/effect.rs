//! Effect nodes: the terminal application of a chain.

use std::fmt;
use std::sync::Arc;

use crate::env::{CastEnv, EntityId, Target};
use crate::math::Trajectory;
use crate::setting::Settings;

/// Everything an effect behavior may consult while applying.
///
/// `caster` is already filtered against the world: a caster that left the
/// world between cast start and application shows up as `None`, and
/// caster-dependent effects are expected to skip quietly.
pub struct EffectContext<'a> {
    pub env: CastEnv<'a>,
    pub caster: Option<EntityId>,
    /// Accumulated power multiplier of the chain up to this node.
    pub power: f32,
    /// Disambiguates among simultaneous applications of one cast.
    pub index: usize,
}

/// Concrete terminal behavior of an effect node.
pub trait EffectBehavior: fmt::Debug + Send + Sync {
    /// Applies the effect to one target. Returns whether the application
    /// took hold (advisory; the engine records the invocation either way).
    fn apply(
        &self,
        target: &Target,
        trajectory: Option<&Trajectory>,
        settings: &Settings,
        ctx: &EffectContext<'_>,
    ) -> bool;

    /// Advisory damage number for UI tooltips.
    fn damage_for_display(&self, _power: f32) -> f32 {
        0.0
    }

    /// Fires once when a cast containing this effect starts.
    fn on_cast(&self, _caster: EntityId) {}
}

/// A node that consumes a target and applies a world-visible result.
#[derive(Clone, Debug)]
pub struct Effect {
    behavior: Arc<dyn EffectBehavior>,
}

impl Effect {
    pub(crate) fn new(behavior: Arc<dyn EffectBehavior>) -> Self {
        Self { behavior }
    }

    pub fn apply(
        &self,
        target: &Target,
        trajectory: Option<&Trajectory>,
        settings: &Settings,
        ctx: &EffectContext<'_>,
    ) -> bool {
        self.behavior.apply(target, trajectory, settings, ctx)
    }

    pub fn damage_for_display(&self, power: f32) -> f32 {
        self.behavior.damage_for_display(power)
    }

    pub fn on_cast(&self, caster: EntityId) {
        self.behavior.on_cast(caster);
    }
}
