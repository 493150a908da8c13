//! Ledger of in-flight continuations.
//!
//! When a medium defers (projectile in flight), the engine hands back a
//! [`SuspendedCast`]; the driver parks it here keyed by cast id until the
//! carrier's resolution event claims it. A carrier that despawns simply
//! discards its entry: an abandoned cast is silence, not an error.

use std::collections::HashMap;

use focus_core::{CastId, SuspendedCast, Tick};

/// One parked continuation plus bookkeeping.
#[derive(Clone, Debug)]
pub struct ParkedCast {
    pub cast: SuspendedCast,
    /// Tick the continuation was parked at, for staleness sweeps.
    pub since: Tick,
}

/// Keyed store of suspended casts awaiting resumption.
#[derive(Debug, Default)]
pub struct SuspensionLedger {
    entries: HashMap<CastId, ParkedCast>,
}

impl SuspensionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parks a continuation. A second suspension under the same cast id
    /// replaces the first; with one carrier per cast this does not happen.
    pub fn park(&mut self, cast: SuspendedCast, now: Tick) {
        let id = cast.package.id();
        tracing::debug!(%id, %now, remaining = cast.package.len(), "parking suspended cast");
        self.entries.insert(id, ParkedCast { cast, since: now });
    }

    /// Claims the continuation for a resolving carrier. `None` means the
    /// cast was never parked or has already been claimed or discarded.
    pub fn claim(&mut self, id: CastId) -> Option<ParkedCast> {
        let parked = self.entries.remove(&id);
        if parked.is_none() {
            tracing::debug!(%id, "no suspended cast to claim");
        }
        parked
    }

    /// Drops a continuation without running it (carrier despawned).
    pub fn discard(&mut self, id: CastId) {
        if self.entries.remove(&id).is_some() {
            tracing::debug!(%id, "discarded suspended cast");
        }
    }

    /// Discards every continuation parked more than `ttl` ticks ago and
    /// returns how many were dropped.
    pub fn sweep(&mut self, now: Tick, ttl: u64) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, parked| parked.since + ttl > now);
        let dropped = before - self.entries.len();
        if dropped > 0 {
            tracing::debug!(%now, dropped, "swept stale suspended casts");
        }
        dropped
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: CastId) -> bool {
        self.entries.contains_key(&id)
    }
}
