//! Medium nodes: the delivery mechanism of a chain.

use std::fmt;
use std::sync::Arc;

use crate::env::CastEnv;
use crate::math::Trajectory;
use crate::node::Hit;
use crate::setting::Settings;

/// What a medium produced for the rest of the chain.
#[derive(Debug)]
pub enum MediumFlow {
    /// Targets resolved synchronously this tick; downstream runs now.
    Resolved { hits: Vec<Hit> },
    /// The medium has an intermediary (projectile in flight): the engine
    /// parks the remaining chain until an external event resumes it.
    Deferred,
    /// The medium declined to proceed; this branch ends quietly.
    Halted,
}

impl MediumFlow {
    /// Convenience for single-hit resolutions.
    pub fn hit(hit: Hit) -> Self {
        Self::Resolved { hits: vec![hit] }
    }

    /// Resolution that found nothing; downstream sees an empty flow.
    pub fn nothing() -> Self {
        Self::Resolved { hits: Vec::new() }
    }
}

/// Concrete delivery behavior of a medium node.
///
/// Implementations resolve a trajectory against the world oracle (or defer
/// to a carrier) and stay oblivious to the rest of the chain.
pub trait MediumBehavior: fmt::Debug + Send + Sync {
    /// True for projectile-style mediums whose target is not resolved
    /// synchronously. Advisory; the authoritative signal is returning
    /// [`MediumFlow::Deferred`] from [`resolve`](Self::resolve).
    fn has_intermediary(&self) -> bool {
        false
    }

    /// Turns the incoming trajectory into flow for the next node.
    fn resolve(&self, trajectory: &Trajectory, settings: &Settings, env: &CastEnv<'_>)
    -> MediumFlow;
}

/// A node that turns a trajectory into one or more targets.
#[derive(Clone, Debug)]
pub struct Medium {
    root: bool,
    behavior: Arc<dyn MediumBehavior>,
}

impl Medium {
    pub(crate) fn new(root: bool, behavior: Arc<dyn MediumBehavior>) -> Self {
        Self { root, behavior }
    }

    /// Whether this medium can lead a chain (needs no upstream trajectory).
    pub fn is_root(&self) -> bool {
        self.root
    }

    pub fn has_intermediary(&self) -> bool {
        self.behavior.has_intermediary()
    }

    pub fn resolve(
        &self,
        trajectory: &Trajectory,
        settings: &Settings,
        env: &CastEnv<'_>,
    ) -> MediumFlow {
        self.behavior.resolve(trajectory, settings, env)
    }
}
