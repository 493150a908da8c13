//! Host-loop runtime for the focus engine.
//!
//! `focus-runtime` carries the pieces that outlive a single engine entry:
//! the ledger of suspended continuations and the [`CastDriver`] that wires
//! engine, ledger, and the host clock together. There is no scheduler of
//! its own — the host game loop calls in, synchronously, every tick it has
//! something to cast or resolve.
pub mod driver;
pub mod suspension;

pub use driver::{CastDriver, DriveReport};
pub use suspension::{ParkedCast, SuspensionLedger};
