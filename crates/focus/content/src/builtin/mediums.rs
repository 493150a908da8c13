//! Built-in delivery mediums.

use std::sync::Arc;

use focus_core::{
    CastEnv, Domain, Hit, MediumBehavior, MediumFlow, Node, NodeSetting, Settings, Trajectory,
};

use crate::registry::NodeRegistry;

pub const TOUCH: &str = "medium.touch";
pub const BEAM: &str = "medium.beam";
pub const BOLT: &str = "medium.bolt";

/// Short-reach contact: the nearest resolution within arm's length.
#[derive(Debug)]
struct Touch;

impl MediumBehavior for Touch {
    fn resolve(&self, trajectory: &Trajectory, settings: &Settings, env: &CastEnv<'_>)
    -> MediumFlow {
        let reach = settings.value_or("reach", 3) as f32;
        let hits = env
            .resolve(trajectory)
            .into_iter()
            .filter(|t| (t.point - trajectory.origin).length() <= reach)
            .take(1)
            .map(|t| Hit::target(t, Some(*trajectory)))
            .collect();
        MediumFlow::Resolved { hits }
    }
}

/// Instant ray: every resolution along the trajectory.
#[derive(Debug)]
struct Beam;

impl MediumBehavior for Beam {
    fn resolve(&self, trajectory: &Trajectory, _: &Settings, env: &CastEnv<'_>) -> MediumFlow {
        let hits = env
            .resolve(trajectory)
            .into_iter()
            .map(|t| Hit::target(t, Some(*trajectory)))
            .collect();
        MediumFlow::Resolved { hits }
    }
}

/// Projectile: hands the rest of the chain to a carrier in flight.
///
/// Spawning the carrier entity is the world collaborator's job; this
/// behavior only signals the suspension.
#[derive(Debug)]
struct Bolt;

impl MediumBehavior for Bolt {
    fn has_intermediary(&self) -> bool {
        true
    }

    fn resolve(&self, _: &Trajectory, _: &Settings, _: &CastEnv<'_>) -> MediumFlow {
        MediumFlow::Deferred
    }
}

pub(crate) fn register_all(registry: &mut NodeRegistry) {
    registry.register(
        TOUCH,
        || {
            Node::root_medium(TOUCH, Arc::new(Touch))
                .with_domain(Domain::Arcane)
                .with_setting("reach", NodeSetting::range(2, 6, 3))
        },
        None,
    );
    registry.register(
        BEAM,
        || Node::root_medium(BEAM, Arc::new(Beam)).with_domain(Domain::Light),
        None,
    );
    registry.register(
        BOLT,
        || Node::root_medium(BOLT, Arc::new(Bolt)).with_domain(Domain::Storm),
        None,
    );
}
