//! Vector math for trajectories.
//!
//! Only the operations the execution engine actually needs live here. World
//! geometry (raycasts, hit-tests) belongs to the world oracle, not this
//! crate.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Three-component float vector.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };
    pub const UP: Self = Self { x: 0.0, y: 1.0, z: 0.0 };
    pub const RIGHT: Self = Self { x: 1.0, y: 0.0, z: 0.0 };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, rhs: Self) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    pub fn cross(self, rhs: Self) -> Self {
        Self {
            x: self.y * rhs.z - self.z * rhs.y,
            y: self.z * rhs.x - self.x * rhs.z,
            z: self.x * rhs.y - self.y * rhs.x,
        }
    }

    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Returns a unit-length copy, or `ZERO` for degenerate input.
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len <= f32::EPSILON { Self::ZERO } else { self * (1.0 / len) }
    }

    /// Rotates this vector about `axis` (assumed unit length) by `degrees`,
    /// using the Rodrigues rotation formula.
    pub fn rotated_about(self, axis: Self, degrees: f32) -> Self {
        let theta = degrees.to_radians();
        let (sin, cos) = theta.sin_cos();
        self * cos + axis.cross(self) * sin + axis * (axis.dot(self) * (1.0 - cos))
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;
    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}

/// An origin plus a unit direction. Pure value type; resolution against
/// world geometry is the world oracle's job.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trajectory {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Trajectory {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction: direction.normalized() }
    }

    /// `origin + direction * distance`.
    pub fn point_at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }

    /// Rotates the direction about `axis` by `degrees`, keeping the origin.
    pub fn rotated_about(&self, axis: Vec3, degrees: f32) -> Self {
        Self {
            origin: self.origin,
            direction: self.direction.rotated_about(axis, degrees).normalized(),
        }
    }

    /// Picks an axis perpendicular to the direction, used to fan splits.
    ///
    /// World-up unless the direction is near-vertical, in which case the
    /// world x-axis keeps the cross product well-conditioned.
    fn fan_axis(&self) -> Vec3 {
        let reference = if self.direction.cross(Vec3::UP).length() <= 1e-3 {
            Vec3::RIGHT
        } else {
            Vec3::UP
        };
        self.direction.cross(reference).normalized()
    }

    /// Produces `count` trajectories fanned about this one.
    ///
    /// Index 0 keeps the original direction; subsequent entries alternate
    /// to either side at growing multiples of `angle_degrees`.
    pub fn fan(&self, count: u32, angle_degrees: f32) -> Vec<Trajectory> {
        let axis = self.fan_axis();
        (0..count)
            .map(|i| {
                let step = i.div_ceil(2) as f32;
                let sign = if i % 2 == 1 { 1.0 } else { -1.0 };
                if i == 0 {
                    *self
                } else {
                    self.rotated_about(axis, sign * step * angle_degrees)
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn point_at_walks_along_direction() {
        let traj = Trajectory::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.0, 0.0, 2.0));
        let p = traj.point_at(5.0);
        assert!(approx(p.x, 1.0) && approx(p.y, 2.0) && approx(p.z, 8.0));
    }

    #[test]
    fn rotation_preserves_length() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        let rotated = v.rotated_about(Vec3::UP, 37.0);
        assert!(approx(v.length(), rotated.length()));
    }

    #[test]
    fn fan_first_entry_is_original() {
        let traj = Trajectory::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0));
        let fanned = traj.fan(3, 15.0);
        assert_eq!(fanned.len(), 3);
        assert_eq!(fanned[0], traj);
    }

    #[test]
    fn fan_spreads_to_both_sides() {
        let traj = Trajectory::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0));
        let fanned = traj.fan(3, 15.0);
        // Both off-axis entries stay unit length and diverge from the
        // original direction by the same angle, opposite sides.
        let d1 = fanned[1].direction;
        let d2 = fanned[2].direction;
        assert!(approx(d1.length(), 1.0));
        assert!(approx(d2.length(), 1.0));
        assert!(approx(d1.dot(traj.direction), 15f32.to_radians().cos()));
        assert!(approx(d2.dot(traj.direction), 15f32.to_radians().cos()));
        assert!(!approx(d1.x, d2.x) || !approx(d1.y, d2.y));
    }

    #[test]
    fn fan_handles_vertical_direction() {
        let traj = Trajectory::new(Vec3::ZERO, Vec3::UP);
        let fanned = traj.fan(2, 15.0);
        assert_eq!(fanned.len(), 2);
        assert!(approx(fanned[1].direction.length(), 1.0));
    }
}
