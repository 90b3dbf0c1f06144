//! Half-space plane with signed-distance and projection operations.

use glam::Vec3;

/// An oriented plane dividing space into two half-spaces.
///
/// Points with negative signed distance lie behind the plane and are the ones
/// a cutting pass flattens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Unit outward normal.
    pub normal: Vec3,
    /// Plane constant; `distance(p) = normal.dot(p) + d`.
    pub d: f32,
}

impl Plane {
    /// Builds a plane from a (not necessarily unit) normal and a point on it.
    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Self {
        let normal = normal.normalize_or_zero();
        Self {
            normal,
            d: -normal.dot(point),
        }
    }

    /// Signed distance of a point; negative means behind.
    pub fn distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.d
    }

    /// Orthogonal projection of a point onto the plane.
    pub fn project(&self, point: Vec3) -> Vec3 {
        point - self.normal * self.distance(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_distance() {
        let plane = Plane::from_point_normal(Vec3::ZERO, Vec3::Y);
        assert!((plane.distance(Vec3::new(0.0, 2.0, 0.0)) - 2.0).abs() < 1e-6);
        assert!((plane.distance(Vec3::new(3.0, -1.0, 5.0)) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_distance_ignores_normal_length() {
        let plane = Plane::from_point_normal(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 10.0, 0.0));
        assert!((plane.distance(Vec3::new(0.0, 3.0, 0.0)) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_projection_lands_on_plane() {
        let plane = Plane::from_point_normal(Vec3::new(1.0, 1.0, 1.0), Vec3::new(1.0, 1.0, 0.0));
        let projected = plane.project(Vec3::new(-4.0, 2.5, 9.0));
        assert!(plane.distance(projected).abs() < 1e-5);
    }
}
