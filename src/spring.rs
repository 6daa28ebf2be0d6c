//! Directed springs that push forces into their target nodes.
//!
//! Every spring is one-way: it reads positions from the arena and feeds the
//! resulting force to its target node(s) through
//! [`SpringNode::receive_influence`]. A physical edge between two nodes is
//! modelled as two records, one stored on each endpoint.

use glam::DVec3;

use crate::error::Degeneracy;
use crate::node::{NodeId, SpringNode};

/// A force source that applies itself to nodes of a mesh.
pub trait SpringForce {
    /// Evaluate the spring against current positions and integrate the
    /// result into its target node(s).
    ///
    /// On degenerate geometry no node is touched and the degeneracy is
    /// returned to the caller.
    ///
    /// # Panics
    ///
    /// Panics if `nodes` does not contain every node id the spring refers to.
    fn calc_force(&self, nodes: &mut [SpringNode], dt: f64) -> Result<(), Degeneracy>;
}

/// Hookean link from `node1` to `node2`; only `node2` is moved.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LinearSpring {
    pub node1: NodeId,
    pub node2: NodeId,
    pub rest_length: f64,
    pub stiffness: f64,
}

impl LinearSpring {
    pub fn new(node1: NodeId, node2: NodeId, rest_length: f64, stiffness: f64) -> Self {
        LinearSpring { node1, node2, rest_length, stiffness }
    }

    /// Force this spring applies to `node2` for the current positions.
    ///
    /// # Panics
    ///
    /// Panics if `node1` or `node2` is out of bounds for `nodes`.
    pub fn force(&self, nodes: &[SpringNode]) -> Result<DVec3, Degeneracy> {
        let delta = nodes[self.node2.0].position - nodes[self.node1.0].position;
        let direction = delta.try_normalize().ok_or(Degeneracy::CoincidentNodes {
            node1: self.node1,
            node2: self.node2,
        })?;
        let length_error = self.rest_length - delta.length();
        Ok(direction * (length_error * self.stiffness))
    }
}

impl SpringForce for LinearSpring {
    fn calc_force(&self, nodes: &mut [SpringNode], dt: f64) -> Result<(), Degeneracy> {
        let force = self.force(nodes)?;
        nodes[self.node2.0].receive_influence(force, dt, false);
        Ok(())
    }
}

/// Angular constraint between the arms `center -> node1` and `center -> node2`.
///
/// The centre node is never moved.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AngleSpring {
    pub center: NodeId,
    pub node1: NodeId,
    pub node2: NodeId,
    /// Radians.
    pub rest_angle: f64,
    pub stiffness: f64,
}

impl AngleSpring {
    pub fn new(center: NodeId, node1: NodeId, node2: NodeId, rest_angle: f64, stiffness: f64) -> Self {
        AngleSpring { center, node1, node2, rest_angle, stiffness }
    }

    fn degenerate(&self) -> Degeneracy {
        Degeneracy::CollinearAngle { center: self.center, node1: self.node1, node2: self.node2 }
    }

    /// Current angle between the two arms, in radians.
    ///
    /// # Panics
    ///
    /// Panics if any of the three node ids is out of bounds for `nodes`.
    pub fn current_angle(&self, nodes: &[SpringNode]) -> Result<f64, Degeneracy> {
        let (v1, v2) = self.arms(nodes)?;
        Ok(v1.dot(v2).clamp(-1.0, 1.0).acos())
    }

    fn arms(&self, nodes: &[SpringNode]) -> Result<(DVec3, DVec3), Degeneracy> {
        let center = nodes[self.center.0].position;
        let v1 = (nodes[self.node1.0].position - center).try_normalize();
        let v2 = (nodes[self.node2.0].position - center).try_normalize();
        v1.zip(v2).ok_or_else(|| self.degenerate())
    }

    /// Forces applied to `node1` and `node2` for the current positions.
    ///
    /// # Panics
    ///
    /// Panics if any of the three node ids is out of bounds for `nodes`.
    pub fn forces(&self, nodes: &[SpringNode]) -> Result<(DVec3, DVec3), Degeneracy> {
        let (v1, v2) = self.arms(nodes)?;

        // Rotation axis of the arm plane, then a basis aligned with the
        // chord between the arm tips.
        let plane_normal = v1.cross(v2).try_normalize().ok_or_else(|| self.degenerate())?;
        let chord = (v2 - v1).try_normalize().ok_or_else(|| self.degenerate())?;
        let c = chord.cross(plane_normal).try_normalize().ok_or_else(|| self.degenerate())?;
        let correction_axis = c.cross(chord).try_normalize().ok_or_else(|| self.degenerate())?;

        let move1 = correction_axis.cross(-v1).try_normalize().ok_or_else(|| self.degenerate())?;
        let move2 = correction_axis.cross(v2).try_normalize().ok_or_else(|| self.degenerate())?;

        let angle = v1.dot(v2).clamp(-1.0, 1.0).acos();
        if angle > self.rest_angle {
            let magnitude = (angle - self.rest_angle) * self.stiffness;
            Ok((-move1 * magnitude, -move2 * magnitude))
        } else {
            let magnitude = (self.rest_angle - angle) * self.stiffness;
            Ok((move1 * magnitude, move2 * magnitude))
        }
    }
}

impl SpringForce for AngleSpring {
    fn calc_force(&self, nodes: &mut [SpringNode], dt: f64) -> Result<(), Degeneracy> {
        let (force1, force2) = self.forces(nodes)?;
        nodes[self.node1.0].receive_influence(force1, dt, false);
        nodes[self.node2.0].receive_influence(force2, dt, false);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use core::f64::consts::FRAC_PI_2;

    fn nodes_at(positions: &[DVec3]) -> Vec<SpringNode> {
        positions.iter().map(|&p| SpringNode::new(p, 1.0).unwrap()).collect()
    }

    #[test]
    fn linear_force_points_along_spring() {
        let nodes = nodes_at(&[DVec3::ZERO, DVec3::new(0.0, 0.0, 3.0)]);
        let spring = LinearSpring::new(NodeId(0), NodeId(1), 5.0, 2.0);
        let force = spring.force(&nodes).unwrap();
        // Compressed by 2, pushed outward along +z.
        assert_abs_diff_eq!(force.z, 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(force.x, 0.0);
    }

    #[test]
    fn linear_calc_force_only_moves_node2() {
        let mut nodes = nodes_at(&[DVec3::ZERO, DVec3::new(10.0, 0.0, 0.0)]);
        let spring = LinearSpring::new(NodeId(0), NodeId(1), 5.0, 1.0);
        spring.calc_force(&mut nodes, 0.1).unwrap();
        assert_eq!(nodes[0].position, DVec3::ZERO);
        assert_eq!(nodes[0].velocity, DVec3::ZERO);
        assert!(nodes[1].velocity.x < 0.0);
    }

    #[test]
    fn coincident_nodes_are_degenerate() {
        let mut nodes = nodes_at(&[DVec3::ONE, DVec3::ONE]);
        let spring = LinearSpring::new(NodeId(0), NodeId(1), 1.0, 1.0);
        let err = spring.calc_force(&mut nodes, 0.1).unwrap_err();
        assert_eq!(err, Degeneracy::CoincidentNodes { node1: NodeId(0), node2: NodeId(1) });
        assert_eq!(nodes[1].position, DVec3::ONE);
    }

    #[test]
    fn open_angle_is_pulled_closed() {
        // 120 degrees between arms in the xy plane, resting at 90.
        let angle = 2.0 * core::f64::consts::FRAC_PI_3;
        let nodes = nodes_at(&[
            DVec3::ZERO,
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(angle.cos(), angle.sin(), 0.0),
        ]);
        let spring = AngleSpring::new(NodeId(0), NodeId(1), NodeId(2), FRAC_PI_2, 1.0);
        let (f1, f2) = spring.forces(&nodes).unwrap();

        // Each tip is pushed toward the other tip.
        let chord = nodes[2].position - nodes[1].position;
        assert!(f1.dot(chord) > 0.0);
        assert!(f2.dot(-chord) > 0.0);
        assert_abs_diff_eq!(f1.length(), angle - FRAC_PI_2, epsilon = 1e-9);
        assert_abs_diff_eq!(f1.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn closed_angle_is_pushed_open() {
        let angle = core::f64::consts::FRAC_PI_4;
        let nodes = nodes_at(&[
            DVec3::ZERO,
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(angle.cos(), angle.sin(), 0.0),
        ]);
        let spring = AngleSpring::new(NodeId(0), NodeId(1), NodeId(2), FRAC_PI_2, 5.0);
        let (f1, f2) = spring.forces(&nodes).unwrap();

        let chord = nodes[2].position - nodes[1].position;
        assert!(f1.dot(chord) < 0.0);
        assert!(f2.dot(chord) > 0.0);
    }

    #[test]
    fn collinear_arms_are_degenerate() {
        let mut nodes = nodes_at(&[
            DVec3::ZERO,
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(-2.0, 0.0, 0.0),
        ]);
        let spring = AngleSpring::new(NodeId(0), NodeId(1), NodeId(2), FRAC_PI_2, 5.0);
        assert!(spring.calc_force(&mut nodes, 0.1).is_err());
        assert!(nodes.iter().all(|n| n.velocity == DVec3::ZERO));
    }

    #[test]
    #[should_panic]
    fn spring_outside_node_slice_panics() {
        let mut nodes = nodes_at(&[DVec3::ZERO]);
        let spring = LinearSpring::new(NodeId(0), NodeId(3), 1.0, 1.0);
        let _ = spring.calc_force(&mut nodes, 0.1);
    }
}
