//! The built-in node catalog.
//!
//! A small but complete set of mediums, effects, and modifiers so a game
//! can cast something out of the box. Game-specific catalogs register
//! alongside (or over) these through [`NodeRegistry::register`].

mod effects;
mod mediums;
mod modifiers;

pub use effects::{MEND, SPARK};
pub use mediums::{BEAM, BOLT, TOUCH};
pub use modifiers::{AMPLIFY, FORK};

use crate::registry::NodeRegistry;

/// Registers every built-in node kind.
pub fn register_all(registry: &mut NodeRegistry) {
    mediums::register_all(registry);
    effects::register_all(registry);
    modifiers::register_all(registry);
}
