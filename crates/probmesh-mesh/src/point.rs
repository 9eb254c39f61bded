//! The [`Point3`] vertex type.

use std::ops::{Add, Div, Sub};

/// A point in 3D world space. `y` is height.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point3 {
    /// Horizontal axis.
    pub x: f32,
    /// Height.
    pub y: f32,
    /// Horizontal axis.
    pub z: f32,
}

impl Point3 {
    /// Construct a point.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Projection onto the X-Z (ground) plane.
    pub fn xz(self) -> (f32, f32) {
        (self.x, self.z)
    }
}

impl From<[f32; 3]> for Point3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self { x, y, z }
    }
}

impl Add for Point3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Div<f32> for Point3 {
    type Output = Self;

    fn div(self, rhs: f32) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}
