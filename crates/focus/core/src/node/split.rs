//! Splitting modifiers: forking a chain into independent branches.

use crate::setting::Settings;

/// Default fan angle between adjacent branches, in degrees.
pub const DEFAULT_SPLIT_ANGLE_DEGREES: f32 = 15.0;

/// Name of the setting that overrides the branch count.
pub const SPLIT_COUNT_SETTING: &str = "count";

/// A modifier specialization that forks execution into N branches, each
/// re-entering propagation with its own fanned trajectory.
///
/// Splits are target-transparent like every modifier: each branch inherits
/// the incoming target alongside its fanned trajectory, so an effect placed
/// directly after a fork fires once per branch.
#[derive(Clone, Copy, Debug)]
pub struct Split {
    fallback_count: u32,
    angle_degrees: f32,
}

impl Split {
    pub(crate) fn new(fallback_count: u32) -> Self {
        Self {
            fallback_count: fallback_count.max(1),
            angle_degrees: DEFAULT_SPLIT_ANGLE_DEGREES,
        }
    }

    pub(crate) fn with_angle(mut self, angle_degrees: f32) -> Self {
        self.angle_degrees = angle_degrees;
        self
    }

    /// Number of branches, honoring the node's `count` setting.
    pub fn split_count(&self, settings: &Settings) -> u32 {
        settings
            .value_or(SPLIT_COUNT_SETTING, self.fallback_count as i32)
            .max(1) as u32
    }

    /// Fan angle between adjacent branches.
    pub fn split_angle_degrees(&self) -> f32 {
        self.angle_degrees
    }
}
