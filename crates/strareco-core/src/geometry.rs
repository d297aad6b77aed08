//! Minimal 3-vector helpers for derived candidate quantities.
//!
//! Candidates store their decay vertex and momentum; the quantities that
//! depend on the primary vertex (pointing angle) are computed on demand
//! against the vertex of the collision the candidate belongs to.

use std::ops::Sub;

/// A position or momentum in the detector frame (cm or GeV/c).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    /// x component.
    pub x: f32,
    /// y component.
    pub y: f32,
    /// z component.
    pub z: f32,
}

impl Vec3 {
    /// Construct from components.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Transverse magnitude, `hypot(x, y)`.
    ///
    /// The transverse momentum of a momentum vector and the transverse
    /// radius of a vertex position.
    pub fn transverse(self) -> f64 {
        f64::from(self.x).hypot(f64::from(self.y))
    }

    /// Euclidean norm.
    pub fn norm(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Scalar product, evaluated in `f64`.
    pub fn dot(self, other: Vec3) -> f64 {
        f64::from(self.x) * f64::from(other.x)
            + f64::from(self.y) * f64::from(other.y)
            + f64::from(self.z) * f64::from(other.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

/// Cosine of the pointing angle of a decay.
///
/// The angle between `momentum` and the flight line from
/// `primary_vertex` to `decay_vertex`. A zero-length flight line or
/// momentum has no defined direction and yields 0.
pub fn cos_pointing_angle(decay_vertex: Vec3, momentum: Vec3, primary_vertex: Vec3) -> f64 {
    let flight = decay_vertex - primary_vertex;
    let denom = flight.norm() * momentum.norm();
    if denom <= 0.0 {
        return 0.0;
    }
    (flight.dot(momentum) / denom).clamp(-1.0, 1.0)
}

/// The pointing angle itself, in radians.
///
/// `acos` of [`cos_pointing_angle`]; the cosine is clamped to `[-1, 1]`
/// first so rounding can never produce NaN.
pub fn pointing_angle(decay_vertex: Vec3, momentum: Vec3, primary_vertex: Vec3) -> f64 {
    cos_pointing_angle(decay_vertex, momentum, primary_vertex).acos()
}
