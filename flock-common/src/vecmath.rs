use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, Mul, Sub};

/// A 2D vector used for boid positions and velocities.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }

    pub fn length_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    /// Magnitude of the vector.
    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: Vec2) -> f32 {
        (*self - other).length()
    }

    /// Direction of the vector in radians, `atan2(y, x)`.
    /// A zero vector with +0.0 components yields 0.0; a -0.0 x component yields π.
    pub fn heading(&self) -> f32 {
        self.y.atan2(self.x)
    }

    /// Truncates both components toward zero, the way trail points are stored.
    pub fn truncate_to_i32(&self) -> (i32, i32) {
        (self.x as i32, self.y as i32)
    }
}

impl Add for Vec2 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self { x: self.x + other.x, y: self.y + other.y }
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self { x: self.x - other.x, y: self.y - other.y }
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        Self { x: self.x * scalar, y: self.y * scalar }
    }
}

impl Div<f32> for Vec2 {
    type Output = Self;
    // No zero check: callers divide by a neighbor count or a speed already known to be positive.
    fn div(self, scalar: f32) -> Self {
        Self { x: self.x / scalar, y: self.y / scalar }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_and_distance() {
        let v = Vec2::new(3.0, 4.0);
        assert_eq!(v.length(), 5.0);
        assert_eq!(Vec2::new(1.0, 1.0).distance(Vec2::new(4.0, 5.0)), 5.0);
        assert_eq!(Vec2::ZERO.distance(Vec2::ZERO), 0.0);
    }

    #[test]
    fn operators() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(3.0, 4.0);
        assert_eq!(a + b, Vec2::new(4.0, 6.0));
        assert_eq!(b - a, Vec2::new(2.0, 2.0));
        assert_eq!(a * 2.0, Vec2::new(2.0, 4.0));
        assert_eq!(b / 2.0, Vec2::new(1.5, 2.0));

        let mut c = a;
        c += b;
        assert_eq!(c, Vec2::new(4.0, 6.0));
    }

    #[test]
    fn heading_follows_atan2() {
        assert_eq!(Vec2::new(1.0, 0.0).heading(), 0.0);
        assert!((Vec2::new(0.0, 1.0).heading() - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert!((Vec2::new(-1.0, 0.0).heading() - std::f32::consts::PI).abs() < 1e-6);
    }

    #[test]
    fn heading_of_zero_vector_depends_on_sign_of_zero() {
        assert_eq!(Vec2::ZERO.heading(), 0.0);
        assert_eq!(Vec2::new(-0.0, 0.0).heading(), std::f32::consts::PI);
    }

    #[test]
    fn truncation_rounds_toward_zero() {
        assert_eq!(Vec2::new(10.9, -3.7).truncate_to_i32(), (10, -3));
    }
}
