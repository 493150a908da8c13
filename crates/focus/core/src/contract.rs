//! Data-flow contracts between spell nodes.
//!
//! Every node declares what it must receive from its upstream neighbor and
//! what it hands downstream. The engine never hard-fails on a mismatch;
//! contracts exist so authoring tools can warn and so the engine knows how
//! to route flow between node kinds.

use std::fmt;

use bitflags::bitflags;

/// One unit of data passed from a producing node to a consuming node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SupplyKind {
    /// A resolved point of application.
    Target,
    /// An origin plus direction, not yet resolved against the world.
    Trajectory,
}

bitflags! {
    /// Set of [`SupplyKind`]s, used for the per-node contract tables.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct SupplySet: u8 {
        const TARGET = 1 << 0;
        const TRAJECTORY = 1 << 1;
    }
}

impl SupplySet {
    pub fn contains_kind(self, kind: SupplyKind) -> bool {
        self.contains(SupplySet::from(kind))
    }
}

impl From<SupplyKind> for SupplySet {
    fn from(kind: SupplyKind) -> Self {
        match kind {
            SupplyKind::Target => SupplySet::TARGET,
            SupplyKind::Trajectory => SupplySet::TRAJECTORY,
        }
    }
}

/// Role a node plays in a chain; drives validation and execution dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ElementKind {
    Effect,
    Medium,
    Modifier,
    Package,
}

/// Globally unique, stable identifier for a node kind (e.g. `"medium.touch"`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NodeKey(String);

impl NodeKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeKey {
    fn from(key: &str) -> Self {
        Self(key.to_owned())
    }
}

impl From<String> for NodeKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Capability descriptor every node exposes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeDescriptor {
    /// Stable registry key.
    pub key: NodeKey,
    /// Gates availability; opaque to this core, answered by the unlock
    /// provider.
    pub unlock_requirement: Option<String>,
    /// Role the node plays.
    pub kind: ElementKind,
}

impl NodeDescriptor {
    pub fn new(key: impl Into<NodeKey>, kind: ElementKind) -> Self {
        Self { key: key.into(), unlock_requirement: None, kind }
    }
}
