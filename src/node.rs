//! Point masses integrated once per incoming force.

use core::fmt;

use glam::DVec3;

use crate::error::PhysicsError;
use crate::spring::{AngleSpring, LinearSpring};

/// Velocity-proportional drag subtracted from every incoming force.
pub const DAMPING: f64 = 0.08;

/// Radius of the sphere renderers and collision queries attach to a node.
pub const BOUNDING_RADIUS: f64 = 30.0;

/// Index of a node inside its mesh.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Sphere of fixed radius centred on a node, computed on demand.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoundingSphere {
    pub center: DVec3,
    pub radius: f64,
}

impl BoundingSphere {
    pub fn contains(&self, point: DVec3) -> bool {
        self.center.distance_squared(point) <= self.radius * self.radius
    }
}

/// A point mass owning its outgoing springs.
#[derive(Clone, Debug)]
pub struct SpringNode {
    pub position: DVec3,
    pub velocity: DVec3,
    mass: f64,
    pub(crate) linear_springs: Vec<LinearSpring>,
    pub(crate) angle_springs: Vec<AngleSpring>,
}

impl SpringNode {
    /// Create a resting node. Mass must be positive and finite.
    pub fn new(position: DVec3, mass: f64) -> Result<Self, PhysicsError> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(PhysicsError::InvalidMass);
        }
        Ok(SpringNode {
            position,
            velocity: DVec3::ZERO,
            mass,
            linear_springs: Vec::new(),
            angle_springs: Vec::new(),
        })
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Integrate a single force contribution over `dt`.
    ///
    /// Drag is taken from the velocity as it stands at the time of the call,
    /// so several contributions within one tick are order dependent.
    pub fn receive_influence(&mut self, force: DVec3, dt: f64, override_damping: bool) {
        let c = if override_damping { 0.0 } else { DAMPING };
        let effective = force - self.velocity * c;
        let acceleration = effective / self.mass;

        let position_delta = self.velocity * dt + acceleration * (0.5 * dt * dt);
        let velocity_delta = acceleration * dt;

        self.position += position_delta;
        self.velocity += velocity_delta;
    }

    pub fn linear_springs(&self) -> &[LinearSpring] {
        &self.linear_springs
    }

    pub fn angle_springs(&self) -> &[AngleSpring] {
        &self.angle_springs
    }

    pub fn bounding_sphere(&self) -> BoundingSphere {
        BoundingSphere { center: self.position, radius: BOUNDING_RADIUS }
    }

    /// Snap onto a collision surface and stop.
    pub(crate) fn clamp_to(&mut self, position: DVec3) {
        self.position = position;
        self.velocity = DVec3::ZERO;
    }
}
