//! World-facing types and the oracle traits the engine consumes.

use std::fmt;

use crate::math::{Trajectory, Vec3};

/// Unique identifier for any actor tracked by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Discrete time unit of the host game loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Self = Self(0);
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A living actor's aim: eye position plus look direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub eye: Vec3,
    pub look: Vec3,
}

impl Pose {
    pub fn new(eye: Vec3, look: Vec3) -> Self {
        Self { eye, look: look.normalized() }
    }

    /// The trajectory a cast led by this actor starts from.
    pub fn aim(&self) -> Trajectory {
        Trajectory::new(self.eye, self.look)
    }
}

/// A resolved point of application for an effect.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Target {
    /// Where the effect lands.
    pub point: Vec3,
    /// The actor hit, if the resolution hit one rather than terrain.
    pub entity: Option<EntityId>,
}

impl Target {
    pub fn point(point: Vec3) -> Self {
        Self { point, entity: None }
    }

    pub fn entity(point: Vec3, entity: EntityId) -> Self {
        Self { point, entity: Some(entity) }
    }
}

/// Read-only view of the world the engine executes against.
///
/// Raycasting/physics live behind this trait; the engine treats
/// [`resolve`](WorldOracle::resolve) as opaque. Actor lookups may fail
/// (actor removed, out of range) and callers must treat that as "no
/// actor", never as an error.
pub trait WorldOracle {
    /// Eye position and look direction of a living actor.
    fn pose_of(&self, actor: EntityId) -> Option<Pose>;

    /// Resolves a trajectory into concrete targets (hit-test).
    fn resolve(&self, trajectory: &Trajectory) -> Vec<Target>;

    /// Whether the actor is still present in the world.
    fn contains_actor(&self, actor: EntityId) -> bool {
        self.pose_of(actor).is_some()
    }
}

/// Answers unlock-gate checks. The requirement string is opaque to this
/// core; the progression provider interprets it.
pub trait UnlockOracle {
    fn is_unlocked(&self, requirement: &str) -> bool;
}
