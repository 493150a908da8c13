//! An ordered chain of nodes plus cast-time context.
//!
//! A package owns its nodes by value; a node's parent is simply the
//! previous position in the chain, so there are no back-references to keep
//! alive. Authoring populates a template node-by-node; at cast time the
//! engine takes a structural copy with a fresh id so concurrent casts never
//! share a cursor and templates are never mutated.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::fmt;

use crate::env::EntityId;
use crate::node::Node;

/// Correlates a cast with its suspended continuations. Unique per cast,
/// allocated monotonically by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CastId(pub u64);

impl CastId {
    /// Templates carry this until the engine copies them for a cast.
    pub const UNASSIGNED: Self = Self(0);
}

impl fmt::Display for CastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cast:{}", self.0)
    }
}

/// Errors from structural chain edits.
///
/// Execution never produces these; a malformed chain degrades to "nothing
/// happened" at cast time. They exist for the authoring surface only.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ChainError {
    /// Insertion position past the end of the chain.
    #[error("insert index {index} out of bounds (chain length {len})")]
    IndexOutOfBounds {
        /// Requested position.
        index: usize,
        /// Current chain length.
        len: usize,
    },
}

/// One authored spell configuration plus its cast-time context.
#[derive(Clone, Debug)]
pub struct Package {
    nodes: Vec<Node>,
    cursor: usize,
    power_multiplier: f32,
    id: CastId,
    caster: Option<EntityId>,
    cached_complexity: Cell<Option<u32>>,
}

impl Default for Package {
    fn default() -> Self {
        Self::new()
    }
}

impl Package {
    /// Empty chain, as the authoring UI starts from.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            cursor: 0,
            power_multiplier: 1.0,
            id: CastId::UNASSIGNED,
            caster: None,
            cached_complexity: Cell::new(None),
        }
    }

    pub fn from_nodes(nodes: Vec<Node>) -> Self {
        let mut package = Self::new();
        package.nodes = nodes;
        package
    }

    // ------------------------------------------------------------------
    // Structural edits (authoring surface)
    // ------------------------------------------------------------------

    /// Appends a node to the chain.
    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
        self.cached_complexity.set(None);
    }

    /// Inserts a node at `index`, shifting the suffix right.
    pub fn insert(&mut self, index: usize, node: Node) -> Result<(), ChainError> {
        if index > self.nodes.len() {
            return Err(ChainError::IndexOutOfBounds { index, len: self.nodes.len() });
        }
        self.nodes.insert(index, node);
        self.cached_complexity.set(None);
        Ok(())
    }

    /// Removes and returns the node at `index`, if present.
    pub fn remove(&mut self, index: usize) -> Option<Node> {
        if index >= self.nodes.len() {
            return None;
        }
        self.cached_complexity.set(None);
        Some(self.nodes.remove(index))
    }

    // ------------------------------------------------------------------
    // Chain access
    // ------------------------------------------------------------------

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    pub fn node_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.nodes.get_mut(index)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// The authoring-time predecessor of the node at `index`.
    pub fn parent_of(&self, index: usize) -> Option<&Node> {
        index.checked_sub(1).and_then(|i| self.nodes.get(i))
    }

    /// True if any node in the chain has this registry key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.nodes.iter().any(|n| n.key().as_str() == key)
    }

    // ------------------------------------------------------------------
    // Cast-time context
    // ------------------------------------------------------------------

    pub fn id(&self) -> CastId {
        self.id
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Node the cursor points at; `None` once the chain is consumed.
    pub fn current(&self) -> Option<&Node> {
        self.nodes.get(self.cursor)
    }

    pub(crate) fn advance(&mut self) {
        self.cursor += 1;
    }

    pub fn power_multiplier(&self) -> f32 {
        self.power_multiplier
    }

    pub(crate) fn power_multiplier_mut(&mut self) -> &mut f32 {
        &mut self.power_multiplier
    }

    /// Stores the caster by identity; resolution against the world stays
    /// lazy, so a removed actor reads back as "no caster".
    pub fn set_caster(&mut self, caster: EntityId) {
        self.caster = Some(caster);
    }

    pub fn caster(&self) -> Option<EntityId> {
        self.caster
    }

    /// Total chain cost: `max(1, sum of node complexity)`, memoized until
    /// the next structural edit.
    pub fn complexity(&self) -> u32 {
        if let Some(cached) = self.cached_complexity.get() {
            return cached;
        }
        let total = self.nodes.iter().map(Node::complexity).sum::<u32>().max(1);
        self.cached_complexity.set(Some(total));
        total
    }

    /// Structural copy taken at cast time: fresh id, cursor rewound,
    /// template left untouched.
    pub fn runtime_copy(&self, id: CastId) -> Self {
        let mut copy = self.clone();
        copy.id = id;
        copy.cursor = 0;
        copy
    }

    /// The rest of the spell after the cursor: nodes `[cursor+1..]` in a
    /// new package carrying this one's id, power multiplier, and caster.
    /// `None` if nothing remains.
    pub fn remaining_from_current(&self) -> Option<Package> {
        let suffix = self.nodes.get(self.cursor + 1..)?;
        if suffix.is_empty() {
            return None;
        }
        Some(Self {
            nodes: suffix.to_vec(),
            cursor: 0,
            power_multiplier: self.power_multiplier,
            id: self.id,
            caster: self.caster,
            cached_complexity: Cell::new(None),
        })
    }

    /// Advisory contract check for authoring tools: every node's
    /// requirements must be met by the nearest non-transparent node before
    /// it, and the chain must lead with a root-capable medium.
    ///
    /// The engine never calls this; a failing chain simply casts inertly.
    pub fn contracts_satisfied(&self) -> bool {
        let Some(first) = self.nodes.first() else {
            return false;
        };
        if !first.is_root_capable() {
            return false;
        }
        let mut provider = first.provides();
        for node in &self.nodes[1..] {
            if !provider.contains(node.requires()) {
                return false;
            }
            if !node.is_transparent() {
                provider = node.provides();
            }
        }
        true
    }

    /// Flattens to the boundary format (registry keys plus display-value
    /// settings). Rebuild lives with the registry, which is the only party
    /// that can turn keys back into nodes.
    pub fn to_spec(&self) -> PackageSpec {
        PackageSpec {
            nodes: self
                .nodes
                .iter()
                .map(|node| NodeSpec {
                    key: node.key().as_str().to_owned(),
                    settings: node
                        .settings()
                        .iter()
                        .map(|(name, setting)| (name.to_owned(), setting.display_value()))
                        .collect(),
                })
                .collect(),
        }
    }
}

/// Boundary serialization format: one `(key, settings)` tuple per node,
/// in chain order. Settings hold display values.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PackageSpec {
    pub nodes: Vec<NodeSpec>,
}

/// One serialized chain slot.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeSpec {
    pub key: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub settings: BTreeMap<String, i32>,
}
