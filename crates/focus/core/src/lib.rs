//! Focus composition and execution: the typed spell-chain interpreter.
//!
//! `focus-core` defines the node model (mediums, modifiers, effects and
//! their data-flow contracts), the package a player authors from them, and
//! the engine that executes a package against a world. All cast execution
//! flows through [`engine::CastEngine`]; supporting crates (the registry,
//! the runtime suspension ledger) depend on the types re-exported here.
pub mod contract;
pub mod domain;
pub mod engine;
pub mod env;
pub mod math;
pub mod node;
pub mod package;
pub mod setting;

pub use contract::{ElementKind, NodeDescriptor, NodeKey, SupplyKind, SupplySet};
pub use domain::{Color, Domain};
pub use engine::{CastEngine, CastOutcome, CastRejection, EffectApplication, SuspendedCast};
pub use env::{CastEnv, EntityId, Pose, Target, Tick, UnlockOracle, WorldOracle};
pub use math::{Trajectory, Vec3};
pub use node::{
    DEFAULT_NODE_COMPLEXITY, DEFAULT_SPLIT_ANGLE_DEGREES, Effect, EffectBehavior, EffectContext,
    Hit, Medium, MediumBehavior, MediumFlow, Modifier, ModifierBehavior, Node, NodeBody,
    SPLIT_COUNT_SETTING, Split,
};
pub use package::{CastId, ChainError, NodeSpec, Package, PackageSpec};
pub use setting::{NodeSetting, SettingKind, Settings};
