//! Complete outcome of driving a cast.

use crate::contract::NodeKey;
use crate::env::{EntityId, Target};
use crate::math::Trajectory;
use crate::package::Package;

/// Why a cast did not start.
///
/// These are values, not raised errors: a bad cast must degrade to
/// "nothing happened" rather than destabilize the host tick, so the engine
/// reports the reason inside the outcome and recovers locally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CastRejection {
    /// The chain had no nodes; a no-op cast.
    #[error("cast chain is empty")]
    EmptyChain,

    /// The chain does not lead with a medium.
    #[error("first node is not a medium")]
    MalformedLead,

    /// The caster could not be resolved against the world at cast start.
    #[error("caster {caster} not resolvable in world")]
    CasterUnresolved {
        /// The identity that failed to resolve.
        caster: EntityId,
    },
}

/// Audit record of one terminal effect application.
#[derive(Clone, Debug)]
pub struct EffectApplication {
    /// Registry key of the effect node that fired.
    pub key: NodeKey,
    /// Where it landed.
    pub target: Target,
    /// The trajectory it arrived along, when the medium had one.
    pub trajectory: Option<Trajectory>,
    /// Accumulated power multiplier at the moment of application.
    pub power: f32,
    /// Per-cast application index, disambiguating simultaneous targets.
    pub index: usize,
}

/// A continuation parked by a medium with an intermediary.
///
/// The package holds the rest of the spell (same cast id, accumulated
/// power); whatever carrier triggers resumption stores this value and
/// hands it back through the engine's `resume` entry point. Discarding it
/// silently abandons the cast, which is the expected fate of a despawned
/// carrier.
#[derive(Clone, Debug)]
pub struct SuspendedCast {
    /// The remaining chain to run on resumption.
    pub package: Package,
    /// The trajectory the carrier departed along.
    pub origin: Trajectory,
}

/// Everything one engine entry produced: zero or more effect applications,
/// zero or more parked continuations, and the rejection reason if the cast
/// never started.
#[derive(Debug, Default)]
pub struct CastOutcome {
    /// Present when the cast did not start; the chain was never walked.
    pub rejection: Option<CastRejection>,
    /// Terminal applications, in the order branches happened to complete.
    pub applications: Vec<EffectApplication>,
    /// Continuations awaiting an external resumption event.
    pub suspended: Vec<SuspendedCast>,
}

impl CastOutcome {
    pub(crate) fn rejected(rejection: CastRejection) -> Self {
        Self { rejection: Some(rejection), ..Self::default() }
    }

    /// Whether the cast started (it may still have applied nothing).
    pub fn started(&self) -> bool {
        self.rejection.is_none()
    }
}
