//! Static collision planes.

use glam::DVec3;

use crate::error::PhysicsError;

/// Tolerance on the distance between the unit offset direction and the normal.
pub const CONTACT_TOLERANCE: f64 = 0.01;

/// Result of testing a point against a plane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlaneTest {
    /// The point is on or behind the plane.
    pub violated: bool,
    /// Orthogonal projection of the point onto the plane.
    pub projected: DVec3,
}

/// An infinite plane through `point` facing `normal`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Plane {
    point: DVec3,
    normal: DVec3,
}

impl Plane {
    /// Create a plane. The normal is normalized; a zero or non-finite normal
    /// is rejected.
    pub fn new(point: DVec3, normal: DVec3) -> Result<Self, PhysicsError> {
        if !point.is_finite() {
            return Err(PhysicsError::InvalidPlane);
        }
        let normal = normal.try_normalize().ok_or(PhysicsError::InvalidPlane)?;
        Ok(Plane { point, normal })
    }

    /// The plane `y = 0` facing up.
    pub fn ground() -> Self {
        Plane { point: DVec3::ZERO, normal: DVec3::Y }
    }

    pub fn point(&self) -> DVec3 {
        self.point
    }

    pub fn normal(&self) -> DVec3 {
        self.normal
    }

    /// Distance along the normal; negative behind the plane.
    pub fn signed_distance(&self, point: DVec3) -> f64 {
        (point - self.point).dot(self.normal)
    }

    pub fn project(&self, point: DVec3) -> DVec3 {
        point - self.normal * self.signed_distance(point)
    }

    /// Check whether `point` lies cleanly in front of the plane.
    ///
    /// A point exactly on the plane counts as a violation so callers clamp it.
    pub fn test_below(&self, point: DVec3) -> PlaneTest {
        let projected = self.project(point);
        let violated = match (point - projected).try_normalize() {
            Some(direction) => (direction - self.normal).length() > CONTACT_TOLERANCE,
            None => true,
        };
        PlaneTest { violated, projected }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn zero_normal_is_rejected() {
        assert_eq!(Plane::new(DVec3::ZERO, DVec3::ZERO).unwrap_err(), PhysicsError::InvalidPlane);
    }

    #[test]
    fn normal_is_normalized() {
        let plane = Plane::new(DVec3::ZERO, DVec3::new(0.0, 4.0, 0.0)).unwrap();
        assert_eq!(plane.normal(), DVec3::Y);
    }

    #[test]
    fn point_above_is_clear() {
        let test = Plane::ground().test_below(DVec3::new(3.0, 2.0, -1.0));
        assert!(!test.violated);
        assert_eq!(test.projected, DVec3::new(3.0, 0.0, -1.0));
    }

    #[test]
    fn point_below_is_violated() {
        let test = Plane::ground().test_below(DVec3::new(3.0, -0.001, -1.0));
        assert!(test.violated);
        assert_abs_diff_eq!(test.projected.y, 0.0);
    }

    #[test]
    fn point_on_plane_is_violated() {
        let test = Plane::ground().test_below(DVec3::new(5.0, 0.0, 5.0));
        assert!(test.violated);
        assert_eq!(test.projected, DVec3::new(5.0, 0.0, 5.0));
    }

    #[test]
    fn tilted_plane_projection() {
        let plane = Plane::new(DVec3::new(0.0, 1.0, 0.0), DVec3::new(1.0, 1.0, 0.0)).unwrap();
        let p = DVec3::new(2.0, 2.0, 0.0);
        let projected = plane.project(p);
        assert_abs_diff_eq!(plane.signed_distance(projected), 0.0, epsilon = 1e-12);
        assert!(!plane.test_below(p).violated);
        assert!(plane.test_below(DVec3::new(-1.0, -1.0, 0.0)).violated);
    }
}
