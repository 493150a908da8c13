//! Built-in modifiers.

use std::sync::Arc;

use focus_core::{ModifierBehavior, Node, NodeSetting, SPLIT_COUNT_SETTING, Settings};

use crate::registry::NodeRegistry;

pub const AMPLIFY: &str = "mod.amplify";
pub const FORK: &str = "mod.fork";

/// Scales the chain's power multiplier by `1 + boost%`.
#[derive(Debug)]
struct Amplify;

impl ModifierBehavior for Amplify {
    fn execute(&self, settings: &Settings, power: &mut f32) -> bool {
        let boost = settings.value_or("boost", 50);
        *power *= 1.0 + boost as f32 / 100.0;
        true
    }
}

pub(crate) fn register_all(registry: &mut NodeRegistry) {
    registry.register(
        AMPLIFY,
        || {
            Node::modifier(AMPLIFY, Arc::new(Amplify))
                .with_setting("boost", NodeSetting::range(10, 100, 50))
                .with_complexity(8)
        },
        None,
    );
    registry.register(
        FORK,
        || {
            Node::split(FORK, 2)
                .with_setting(SPLIT_COUNT_SETTING, NodeSetting::range(2, 6, 3))
        },
        None,
    );
}
