//! Built-in terminal effects.
//!
//! What an effect physically does to the world belongs to the world
//! collaborator; these behaviors cover the contract surface (power scaling,
//! display numbers, caster dependence) that the engine exercises.

use std::sync::Arc;

use focus_core::{
    Color, Domain, EffectBehavior, EffectContext, Node, NodeSetting, Settings, Target, Trajectory,
};

use crate::registry::NodeRegistry;

pub const SPARK: &str = "effect.spark";
pub const MEND: &str = "effect.mend";

/// Direct elemental jolt at the target point.
#[derive(Debug)]
struct Spark;

impl EffectBehavior for Spark {
    fn apply(
        &self,
        _target: &Target,
        _trajectory: Option<&Trajectory>,
        _settings: &Settings,
        _ctx: &EffectContext<'_>,
    ) -> bool {
        true
    }

    fn damage_for_display(&self, power: f32) -> f32 {
        4.0 * power
    }
}

/// Restores the caster's vitality. Caster-dependent: if the caster left
/// the world before application, nothing happens.
#[derive(Debug)]
struct Mend;

impl EffectBehavior for Mend {
    fn apply(
        &self,
        _target: &Target,
        _trajectory: Option<&Trajectory>,
        _settings: &Settings,
        ctx: &EffectContext<'_>,
    ) -> bool {
        ctx.caster.is_some()
    }
}

pub(crate) fn register_all(registry: &mut NodeRegistry) {
    registry.register(
        SPARK,
        || {
            Node::effect(SPARK, Arc::new(Spark))
                .with_domain(Domain::Fire)
                .with_setting("potency", NodeSetting::choice(
                    vec![2, 4, 8],
                    vec!["dim".into(), "bright".into(), "searing".into()],
                    1,
                ))
        },
        // Explicit override: spark renders hotter than the fire default.
        Some(Color::rgb(0xff, 0x9a, 0x2e)),
    );
    registry.register(
        MEND,
        || {
            Node::effect(MEND, Arc::new(Mend))
                .with_domain(Domain::Life)
                .with_unlock("rite.renewal")
        },
        None,
    );
}
