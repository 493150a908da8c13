//! The node hierarchy: one instruction in a spell chain.
//!
//! The four node kinds are a closed tagged enum ([`NodeBody`]) so the
//! execution engine matches exhaustively. Concrete behaviors (what a
//! specific medium
//! or effect physically does) stay behind object-safe traits held in `Arc`,
//! which keeps nodes cheaply cloneable for branch fan-out.

mod effect;
mod medium;
mod modifier;
mod split;

pub use effect::{Effect, EffectBehavior, EffectContext};
pub use medium::{Medium, MediumBehavior, MediumFlow};
pub use modifier::{Modifier, ModifierBehavior};
pub use split::{DEFAULT_SPLIT_ANGLE_DEGREES, SPLIT_COUNT_SETTING, Split};

use std::sync::Arc;

use crate::contract::{ElementKind, NodeDescriptor, NodeKey, SupplySet};
use crate::domain::Domain;
use crate::env::Target;
use crate::math::Trajectory;
use crate::setting::{NodeSetting, Settings};

/// Complexity contribution of a node that does not declare its own.
pub const DEFAULT_NODE_COMPLEXITY: u32 = 5;

/// One unit of flow between adjacent nodes.
///
/// A medium fills in the target (and usually the trajectory it resolved
/// along); a split fills in a fanned trajectory. Consumers ignore the half
/// they have no contract for, which is what makes contract mismatches
/// inert rather than fatal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub target: Option<Target>,
    pub trajectory: Option<Trajectory>,
}

impl Hit {
    pub fn target(target: Target, trajectory: Option<Trajectory>) -> Self {
        Self { target: Some(target), trajectory }
    }

    pub fn trajectory(trajectory: Trajectory) -> Self {
        Self { target: None, trajectory: Some(trajectory) }
    }
}

/// Closed set of node kinds the engine dispatches over.
#[derive(Clone, Debug)]
pub enum NodeBody {
    Medium(Medium),
    Effect(Effect),
    Modifier(Modifier),
    Split(Split),
}

/// One instruction in a spell chain.
#[derive(Clone, Debug)]
pub struct Node {
    descriptor: NodeDescriptor,
    complexity: u32,
    domain: Option<Domain>,
    settings: Settings,
    body: NodeBody,
}

impl Node {
    fn new(key: impl Into<NodeKey>, kind: ElementKind, body: NodeBody) -> Self {
        Self {
            descriptor: NodeDescriptor::new(key.into(), kind),
            complexity: DEFAULT_NODE_COMPLEXITY,
            domain: None,
            settings: Settings::new(),
            body,
        }
    }

    /// A medium that needs an upstream trajectory.
    pub fn medium(key: impl Into<NodeKey>, behavior: Arc<dyn MediumBehavior>) -> Self {
        Self::new(key, ElementKind::Medium, NodeBody::Medium(Medium::new(false, behavior)))
    }

    /// A medium that synthesizes its own trajectory from the caster's aim
    /// and may therefore lead a chain.
    pub fn root_medium(key: impl Into<NodeKey>, behavior: Arc<dyn MediumBehavior>) -> Self {
        Self::new(key, ElementKind::Medium, NodeBody::Medium(Medium::new(true, behavior)))
    }

    /// A terminal effect.
    pub fn effect(key: impl Into<NodeKey>, behavior: Arc<dyn EffectBehavior>) -> Self {
        Self::new(key, ElementKind::Effect, NodeBody::Effect(Effect::new(behavior)))
    }

    /// A pass-through modifier. No domain by default.
    pub fn modifier(key: impl Into<NodeKey>, behavior: Arc<dyn ModifierBehavior>) -> Self {
        Self::new(key, ElementKind::Modifier, NodeBody::Modifier(Modifier::new(behavior)))
    }

    /// A splitting modifier forking into `fallback_count` branches unless
    /// its `count` setting says otherwise. Domain defaults to entropy.
    pub fn split(key: impl Into<NodeKey>, fallback_count: u32) -> Self {
        Self::new(key, ElementKind::Modifier, NodeBody::Split(Split::new(fallback_count)))
            .with_domain(Domain::Entropy)
    }

    /// Split with a non-default fan angle.
    pub fn split_with_angle(
        key: impl Into<NodeKey>,
        fallback_count: u32,
        angle_degrees: f32,
    ) -> Self {
        Self::new(
            key,
            ElementKind::Modifier,
            NodeBody::Split(Split::new(fallback_count).with_angle(angle_degrees)),
        )
        .with_domain(Domain::Entropy)
    }

    pub fn with_domain(mut self, domain: Domain) -> Self {
        self.domain = Some(domain);
        self
    }

    pub fn with_complexity(mut self, complexity: u32) -> Self {
        self.complexity = complexity;
        self
    }

    pub fn with_setting(mut self, name: impl Into<String>, setting: NodeSetting) -> Self {
        self.settings.insert(name, setting);
        self
    }

    pub fn with_unlock(mut self, requirement: impl Into<String>) -> Self {
        self.descriptor.unlock_requirement = Some(requirement.into());
        self
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn descriptor(&self) -> &NodeDescriptor {
        &self.descriptor
    }

    pub fn key(&self) -> &NodeKey {
        &self.descriptor.key
    }

    pub fn kind(&self) -> ElementKind {
        self.descriptor.kind
    }

    pub fn unlock_requirement(&self) -> Option<&str> {
        self.descriptor.unlock_requirement.as_deref()
    }

    /// Contribution to total chain cost.
    pub fn complexity(&self) -> u32 {
        self.complexity
    }

    pub fn domain(&self) -> Option<Domain> {
        self.domain
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn body(&self) -> &NodeBody {
        &self.body
    }

    // ------------------------------------------------------------------
    // Contract tables
    // ------------------------------------------------------------------

    /// What this node must receive from its upstream neighbor.
    pub fn requires(&self) -> SupplySet {
        match &self.body {
            NodeBody::Medium(m) if m.is_root() => SupplySet::empty(),
            NodeBody::Medium(_) => SupplySet::TRAJECTORY,
            NodeBody::Effect(_) => SupplySet::TARGET,
            NodeBody::Modifier(_) | NodeBody::Split(_) => SupplySet::empty(),
        }
    }

    /// What this node hands to its downstream neighbor.
    pub fn provides(&self) -> SupplySet {
        match &self.body {
            NodeBody::Medium(m) if m.is_root() => SupplySet::TARGET | SupplySet::TRAJECTORY,
            NodeBody::Medium(_) => SupplySet::TARGET,
            NodeBody::Split(_) => SupplySet::TRAJECTORY,
            NodeBody::Effect(_) | NodeBody::Modifier(_) => SupplySet::empty(),
        }
    }

    /// Whether this node may lead a chain.
    pub fn is_root_capable(&self) -> bool {
        matches!(&self.body, NodeBody::Medium(m) if m.is_root())
    }

    /// Whether this node is transparent to the data flow (plain modifier).
    pub fn is_transparent(&self) -> bool {
        matches!(&self.body, NodeBody::Modifier(_))
    }

    /// Projectile-style medium whose target resolves on a later tick.
    pub fn has_intermediary(&self) -> bool {
        matches!(&self.body, NodeBody::Medium(m) if m.has_intermediary())
    }

    /// Advisory UI damage number; zero for anything but effects.
    pub fn damage_for_display(&self, power: f32) -> f32 {
        match &self.body {
            NodeBody::Effect(e) => e.damage_for_display(power),
            _ => 0.0,
        }
    }
}
