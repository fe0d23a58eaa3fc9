//! Mathematical types shared across the client core.
//!
//! These are the canonical representations used in the wire protocol, so the
//! serialized field names (`x`, `y`, `z`) are part of the contract.

use serde::{Deserialize, Serialize};

/// 3D Vector - position, velocity, direction
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
}

impl Vec3 {
    /// Creates a new Vec3
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Linear interpolation towards `other` by `t` (0.0 = self, 1.0 = other).
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }

    /// Rounds every component to `decimals` decimal places.
    ///
    /// Used to decide whether a movement update carries new information.
    #[must_use]
    pub fn rounded(self, decimals: u32) -> Self {
        let scale = 10f32.powi(decimals as i32);
        Self::new(
            (self.x * scale).round() / scale,
            (self.y * scale).round() / scale,
            (self.z * scale).round() / scale,
        )
    }
}

impl std::ops::Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl std::ops::AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl std::ops::Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl std::ops::Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

/// Euler rotation of a first-person view.
///
/// `x` is pitch, `y` is yaw, `z` is roll, composed in Y-X-Z order.
/// Serialized as `{x, y, z}` on the wire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Euler {
    /// Pitch (radians, rotation about X)
    pub x: f32,
    /// Yaw (radians, rotation about Y)
    pub y: f32,
    /// Roll (radians, rotation about Z)
    pub z: f32,
}

impl Euler {
    /// Creates a new rotation
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// No rotation: looking down -Z.
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0);

    /// Local +X axis in world space.
    #[must_use]
    pub fn right(self) -> Vec3 {
        let (sp, cp) = self.x.sin_cos();
        let (sy, cy) = self.y.sin_cos();
        let (sr, cr) = self.z.sin_cos();
        Vec3::new(
            cr * cy + sr * sp * sy,
            sr * cp,
            -cr * sy + sr * sp * cy,
        )
    }

    /// Local +Z axis in world space (the view looks the opposite way).
    #[must_use]
    pub fn back(self) -> Vec3 {
        let (sp, cp) = self.x.sin_cos();
        let (sy, cy) = self.y.sin_cos();
        Vec3::new(cp * sy, -sp, cp * cy)
    }

    /// Viewing direction (local -Z).
    #[must_use]
    pub fn forward(self) -> Vec3 {
        -self.back()
    }

    /// Rounds every component to `decimals` decimal places.
    #[must_use]
    pub fn rounded(self, decimals: u32) -> Self {
        let v = Vec3::new(self.x, self.y, self.z).rounded(decimals);
        Self::new(v.x, v.y, v.z)
    }
}

/// Axis-Aligned Bounding Box for collision and trigger tests.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner of the box.
    pub min: Vec3,
    /// Maximum corner of the box.
    pub max: Vec3,
}

impl Aabb {
    /// Creates a new AABB.
    #[must_use]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Creates an AABB centered at `center` with the given edge lengths.
    #[must_use]
    pub fn from_center(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Creates a cube centered at `center`.
    #[must_use]
    pub fn cube(center: Vec3, edge: f32) -> Self {
        Self::from_center(center, Vec3::new(edge, edge, edge))
    }

    /// Checks if a point lies inside or on the boundary.
    #[must_use]
    pub fn contains_point(&self, p: Vec3) -> bool {
        p.x >= self.min.x && p.x <= self.max.x &&
        p.y >= self.min.y && p.y <= self.max.y &&
        p.z >= self.min.z && p.z <= self.max.z
    }

    /// Checks if the vertical segment from `top` down to `top.y - length`
    /// passes through this box.
    #[must_use]
    pub fn hit_by_downward_ray(&self, top: Vec3, length: f32) -> bool {
        let bottom = top.y - length;
        top.x >= self.min.x && top.x <= self.max.x &&
        top.z >= self.min.z && top.z <= self.max.z &&
        bottom <= self.max.y && top.y >= self.min.y
    }
}
