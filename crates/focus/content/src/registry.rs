//! The node registry: string keys to node factories.
//!
//! Registration is expected once at startup; afterwards the registry is
//! read-mostly and shared by reference with the engine and authoring
//! collaborators. Lookups never panic: an unknown key produces `None`, and
//! rebuilding a serialized chain drops unknown slots silently.

use std::collections::HashMap;

use focus_core::{Color, Node, Package, PackageSpec, UnlockOracle};

use crate::colors::Palette;

type NodeFactory = Box<dyn Fn() -> Node + Send + Sync>;

struct RegistryEntry {
    factory: NodeFactory,
    color: Option<Color>,
}

/// Maps registry keys to factories producing fresh node instances.
pub struct NodeRegistry {
    entries: HashMap<String, RegistryEntry>,
    palette: Palette,
}

impl NodeRegistry {
    /// Empty registry over a color palette.
    pub fn new(palette: Palette) -> Self {
        Self { entries: HashMap::new(), palette }
    }

    /// Registry pre-populated with the built-in catalog.
    pub fn with_builtins() -> anyhow::Result<Self> {
        let mut registry = Self::new(Palette::embedded()?);
        crate::builtin::register_all(&mut registry);
        Ok(registry)
    }

    /// Stores a factory under `key`, with an optional explicit color
    /// override. Re-registering a key replaces the previous entry
    /// silently.
    pub fn register<F>(&mut self, key: impl Into<String>, factory: F, color: Option<Color>)
    where
        F: Fn() -> Node + Send + Sync + 'static,
    {
        self.entries
            .insert(key.into(), RegistryEntry { factory: Box::new(factory), color });
    }

    /// Instantiates a fresh node, or `None` for an unknown key.
    pub fn create(&self, key: &str) -> Option<Node> {
        self.entries.get(key).map(|entry| (entry.factory)())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Display color for a node kind: explicit override, else the domain's
    /// palette default, else neutral.
    pub fn resolve_color(&self, key: &str) -> Color {
        if let Some(color) = self.entries.get(key).and_then(|e| e.color) {
            return color;
        }
        self.create(key)
            .and_then(|node| node.domain())
            .map(|domain| self.palette.color_of(domain))
            .unwrap_or(Color::NEUTRAL)
    }

    /// Whether the chain contains a node with this key (UI gating helper).
    pub fn contains_element(&self, package: &Package, key: &str) -> bool {
        package.contains_key(key)
    }

    /// Whether the node kind is available to a player, per the unlock
    /// provider. Unknown keys are unavailable; ungated nodes always are.
    pub fn is_available(&self, key: &str, unlocks: &dyn UnlockOracle) -> bool {
        match self.create(key) {
            Some(node) => node
                .unlock_requirement()
                .is_none_or(|req| unlocks.is_unlocked(req)),
            None => false,
        }
    }

    /// Rebuilds a package from the boundary format.
    ///
    /// Unknown node keys are dropped silently; so are setting names the
    /// node does not carry and setting values outside a setting's domain.
    /// The failure surface is a shorter (possibly empty) chain, never an
    /// error.
    pub fn rebuild(&self, spec: &PackageSpec) -> Package {
        let mut package = Package::new();
        for slot in &spec.nodes {
            let Some(mut node) = self.create(&slot.key) else {
                continue;
            };
            for (name, value) in &slot.settings {
                if let Some(setting) = node.settings_mut().get_mut(name) {
                    setting.set_display_value(*value);
                }
            }
            package.push(node);
        }
        package
    }
}
