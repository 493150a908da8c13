//! Modifier nodes: pass-through chain adjustments.

use std::fmt;
use std::sync::Arc;

use crate::setting::Settings;

/// Concrete behavior of a plain modifier.
///
/// Modifiers are transparent to the data flow: they may scale the chain's
/// power multiplier or perform side effects, but never reshape the
/// targets/trajectories moving past them.
pub trait ModifierBehavior: fmt::Debug + Send + Sync {
    /// Runs the modifier. Returning `false` halts the chain here.
    fn execute(&self, settings: &Settings, power: &mut f32) -> bool;
}

/// A pass-through node that alters power/behavior without changing the
/// flow shape.
#[derive(Clone, Debug)]
pub struct Modifier {
    behavior: Arc<dyn ModifierBehavior>,
}

impl Modifier {
    pub(crate) fn new(behavior: Arc<dyn ModifierBehavior>) -> Self {
        Self { behavior }
    }

    pub fn execute(&self, settings: &Settings, power: &mut f32) -> bool {
        self.behavior.execute(settings, power)
    }
}
