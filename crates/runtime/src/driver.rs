//! Orchestrates the engine, the suspension ledger, and the host clock.

use focus_core::{
    CastEngine, CastEnv, CastId, CastRejection, EffectApplication, EntityId, Hit, Package, Tick,
};

use crate::suspension::SuspensionLedger;

/// What one driver entry produced, with suspensions already parked.
#[derive(Debug, Default)]
pub struct DriveReport {
    /// Why the cast never started, if it did not.
    pub rejection: Option<CastRejection>,
    /// Terminal effect applications.
    pub applications: Vec<EffectApplication>,
    /// Cast ids now waiting in the ledger for carrier resolution.
    pub suspended: Vec<CastId>,
}

impl DriveReport {
    pub fn started(&self) -> bool {
        self.rejection.is_none()
    }
}

/// Drives casts for a host game loop.
///
/// Single-threaded and cooperative: each call runs synchronously within
/// the tick that triggers it, and the only thing carried across ticks is
/// the suspension ledger.
#[derive(Debug, Default)]
pub struct CastDriver {
    engine: CastEngine,
    ledger: SuspensionLedger,
    clock: Tick,
}

impl CastDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clock(&self) -> Tick {
        self.clock
    }

    /// Advances the host clock; purely bookkeeping for staleness sweeps.
    pub fn advance_clock(&mut self, ticks: u64) {
        self.clock = self.clock + ticks;
    }

    /// Number of casts currently awaiting carrier resolution.
    pub fn pending(&self) -> usize {
        self.ledger.len()
    }

    /// Cost surface for the external resource economy: the chain's
    /// complexity scaled by its authored power multiplier. Whether the
    /// caster can pay is the economy's decision, made before `begin`.
    pub fn cast_cost(&self, template: &Package) -> u32 {
        (template.complexity() as f32 * template.power_multiplier()).ceil() as u32
    }

    /// Begins a cast from a living actor's aim and parks any suspensions.
    pub fn begin(
        &mut self,
        env: &CastEnv<'_>,
        caster: EntityId,
        template: &Package,
    ) -> DriveReport {
        let outcome = self.engine.begin_cast(env, caster, template);
        if let Some(rejection) = outcome.rejection {
            tracing::debug!(%caster, %rejection, "cast did not start");
        } else {
            tracing::debug!(
                %caster,
                applications = outcome.applications.len(),
                suspended = outcome.suspended.len(),
                "cast ran"
            );
        }
        self.absorb(outcome)
    }

    /// Resolves a carrier: claims the parked continuation for `id` and
    /// re-enters propagation with whatever the carrier resolved.
    ///
    /// `None` means no continuation was waiting (despawned carrier, stale
    /// id, double delivery) — the cast was silently abandoned.
    pub fn deliver(
        &mut self,
        env: &CastEnv<'_>,
        id: CastId,
        flow: Vec<Hit>,
    ) -> Option<DriveReport> {
        let parked = self.ledger.claim(id)?;
        tracing::debug!(%id, hits = flow.len(), "resuming suspended cast");
        let outcome = self.engine.resume(env, parked.cast.package, flow);
        Some(self.absorb(outcome))
    }

    /// Drops the continuation for a carrier that despawned unresolved.
    pub fn abandon(&mut self, id: CastId) {
        self.ledger.discard(id);
    }

    /// Discards continuations older than `ttl` ticks.
    pub fn sweep(&mut self, ttl: u64) -> usize {
        self.ledger.sweep(self.clock, ttl)
    }

    fn absorb(&mut self, outcome: focus_core::CastOutcome) -> DriveReport {
        let mut report = DriveReport {
            rejection: outcome.rejection,
            applications: outcome.applications,
            suspended: Vec::with_capacity(outcome.suspended.len()),
        };
        for suspended in outcome.suspended {
            report.suspended.push(suspended.package.id());
            self.ledger.park(suspended, self.clock);
        }
        report
    }
}
