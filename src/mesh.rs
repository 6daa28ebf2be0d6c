//! Spring meshes: an arena of nodes, their sparse grid index and the
//! per-tick sweep.

use glam::DVec3;

use crate::error::{Degeneracy, PhysicsError};
use crate::grid::{SparseGrid, ASCENDING, SWEEP_SCHEDULE};
use crate::node::{BoundingSphere, NodeId, SpringNode};
use crate::observer::StepObserver;
use crate::plane::Plane;
use crate::spring::{AngleSpring, LinearSpring, SpringForce};

/// A body made of spring-connected nodes addressed by `(i, j, k)`.
#[derive(Clone, Debug, Default)]
pub struct SpringMesh {
    nodes: Vec<SpringNode>,
    grid: SparseGrid,
}

impl SpringMesh {
    pub fn new() -> Self {
        SpringMesh { nodes: Vec::new(), grid: SparseGrid::new() }
    }

    /// Register `node` at grid index `(i, j, k)`.
    pub fn add_node(&mut self, i: usize, j: usize, k: usize, node: SpringNode) -> Result<NodeId, PhysicsError> {
        let id = NodeId(self.nodes.len());
        self.grid.insert(i, j, k, id)?;
        self.nodes.push(node);
        Ok(id)
    }

    fn check(&self, id: NodeId) -> Result<(), PhysicsError> {
        if id.0 < self.nodes.len() {
            Ok(())
        } else {
            Err(PhysicsError::NodeOutOfBounds { index: id.0, count: self.nodes.len() })
        }
    }

    /// Add a one-way spring stored on `node1` that moves `node2`.
    pub fn add_linear_spring(
        &mut self,
        node1: NodeId,
        node2: NodeId,
        rest_length: f64,
        stiffness: f64,
    ) -> Result<(), PhysicsError> {
        self.check(node1)?;
        self.check(node2)?;
        self.nodes[node1.0]
            .linear_springs
            .push(LinearSpring::new(node1, node2, rest_length, stiffness));
        Ok(())
    }

    /// Add an angle spring stored on `center`.
    pub fn add_angle_spring(
        &mut self,
        center: NodeId,
        node1: NodeId,
        node2: NodeId,
        rest_angle: f64,
        stiffness: f64,
    ) -> Result<(), PhysicsError> {
        self.check(center)?;
        self.check(node1)?;
        self.check(node2)?;
        self.nodes[center.0]
            .angle_springs
            .push(AngleSpring::new(center, node1, node2, rest_angle, stiffness));
        Ok(())
    }

    pub fn node_id(&self, i: usize, j: usize, k: usize) -> Option<NodeId> {
        self.grid.get(i, j, k)
    }

    pub fn node(&self, i: usize, j: usize, k: usize) -> Option<&SpringNode> {
        self.node_id(i, j, k).map(|id| &self.nodes[id.0])
    }

    pub fn node_by_id(&self, id: NodeId) -> Option<&SpringNode> {
        self.nodes.get(id.0)
    }

    pub fn node_by_id_mut(&mut self, id: NodeId) -> Option<&mut SpringNode> {
        self.nodes.get_mut(id.0)
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> &[SpringNode] {
        &self.nodes
    }

    /// Node ids in ascending `(i, j, k)` order.
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.grid.ids(ASCENDING)
    }

    /// Positions in ascending `(i, j, k)` order.
    pub fn positions(&self) -> Vec<DVec3> {
        let mut positions = Vec::with_capacity(self.nodes.len());
        self.grid.for_each(ASCENDING, |id| positions.push(self.nodes[id.0].position));
        positions
    }

    pub fn bounding_spheres(&self) -> impl Iterator<Item = BoundingSphere> + '_ {
        self.nodes.iter().map(SpringNode::bounding_sphere)
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }

    pub fn linear_spring_count(&self) -> usize {
        self.nodes.iter().map(|n| n.linear_springs.len()).sum()
    }

    pub fn angle_spring_count(&self) -> usize {
        self.nodes.iter().map(|n| n.angle_springs.len()).sum()
    }

    /// Apply `gravity * mass` to every node, ascending.
    pub fn calc_gravity(&mut self, gravity: DVec3, dt: f64) {
        let nodes = &mut self.nodes;
        self.grid.for_each(ASCENDING, |id| {
            let node = &mut nodes[id.0];
            let weight = gravity * node.mass();
            node.receive_influence(weight, dt, false);
        });
    }

    /// Fire every spring owned by node `id`: linear springs first, then angle
    /// springs, each in insertion order.
    pub fn send_influence<O: StepObserver>(&mut self, id: NodeId, dt: f64, observer: &mut O) {
        propagate(&mut self.nodes, id, dt, observer);
    }

    /// Run the eight sweep passes, then resolve plane contacts.
    pub fn calc_influence<O: StepObserver>(&mut self, planes: &[Plane], dt: f64, observer: &mut O) {
        for (pass, &direction) in SWEEP_SCHEDULE.iter().enumerate() {
            let nodes = &mut self.nodes;
            self.grid.for_each(direction, |id| propagate(nodes, id, dt, observer));
            observer.on_sweep_pass(pass, direction);
        }
        self.resolve_collisions(planes, observer);
    }

    /// Clamp every node lying on or behind a plane onto it and stop it.
    ///
    /// Planes are tested in order against the node's current position, so
    /// the last violated plane decides where the node ends up.
    pub fn resolve_collisions<O: StepObserver>(&mut self, planes: &[Plane], observer: &mut O) {
        let nodes = &mut self.nodes;
        self.grid.for_each(ASCENDING, |id| {
            let node = &mut nodes[id.0];
            for (index, plane) in planes.iter().enumerate() {
                let test = plane.test_below(node.position);
                if test.violated {
                    node.clamp_to(test.projected);
                    observer.on_collision(id, index);
                }
            }
        });
    }
}

fn propagate<O: StepObserver>(nodes: &mut [SpringNode], id: NodeId, dt: f64, observer: &mut O) {
    for s in 0..nodes[id.0].linear_springs.len() {
        let spring = nodes[id.0].linear_springs[s];
        if let Err(degeneracy) = spring.calc_force(nodes, dt) {
            report(observer, degeneracy);
        }
    }
    for s in 0..nodes[id.0].angle_springs.len() {
        let spring = nodes[id.0].angle_springs[s];
        if let Err(degeneracy) = spring.calc_force(nodes, dt) {
            report(observer, degeneracy);
        }
    }
}

fn report<O: StepObserver>(observer: &mut O, degeneracy: Degeneracy) {
    log::warn!("skipped spring contribution: {}", degeneracy);
    observer.on_degeneracy(degeneracy);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::{DegeneracyLog, NoOpStepObserver};
    use approx::assert_abs_diff_eq;

    fn pair(distance: f64) -> (SpringMesh, NodeId, NodeId) {
        let mut mesh = SpringMesh::new();
        let a = mesh.add_node(0, 0, 0, SpringNode::new(DVec3::ZERO, 1.0).unwrap()).unwrap();
        let b = mesh
            .add_node(1, 0, 0, SpringNode::new(DVec3::new(distance, 0.0, 0.0), 1.0).unwrap())
            .unwrap();
        (mesh, a, b)
    }

    #[test]
    fn springs_need_known_nodes() {
        let (mut mesh, a, _) = pair(1.0);
        assert_eq!(
            mesh.add_linear_spring(a, NodeId(7), 1.0, 1.0).unwrap_err(),
            PhysicsError::NodeOutOfBounds { index: 7, count: 2 },
        );
        assert_eq!(mesh.linear_spring_count(), 0);
    }

    #[test]
    fn one_way_spring_moves_target_only() {
        let (mut mesh, a, b) = pair(2.0);
        mesh.add_linear_spring(a, b, 1.0, 1.0).unwrap();
        mesh.send_influence(a, 0.1, &mut NoOpStepObserver);
        assert_eq!(mesh.node_by_id(a).unwrap().position, DVec3::ZERO);
        assert!(mesh.node_by_id(b).unwrap().position.x < 2.0);

        // The target owns nothing, so firing it does nothing.
        let before = mesh.node_by_id(a).unwrap().position;
        mesh.send_influence(b, 0.1, &mut NoOpStepObserver);
        assert_eq!(mesh.node_by_id(a).unwrap().position, before);
    }

    #[test]
    fn gravity_scales_with_mass() {
        let mut mesh = SpringMesh::new();
        let light = mesh.add_node(0, 0, 0, SpringNode::new(DVec3::ZERO, 1.0).unwrap()).unwrap();
        let heavy = mesh.add_node(0, 0, 1, SpringNode::new(DVec3::ZERO, 4.0).unwrap()).unwrap();
        mesh.calc_gravity(DVec3::new(0.0, -10.0, 0.0), 0.1);
        let vl = mesh.node_by_id(light).unwrap().velocity.y;
        let vh = mesh.node_by_id(heavy).unwrap().velocity.y;
        assert_abs_diff_eq!(vl, -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(vh, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn degenerate_spring_is_skipped_and_reported() {
        let (mut mesh, a, b) = pair(0.0);
        mesh.add_linear_spring(a, b, 1.0, 1.0).unwrap();
        let mut log = DegeneracyLog::default();
        mesh.calc_influence(&[], 0.1, &mut log);
        assert_eq!(log.entries.len(), SWEEP_SCHEDULE.len());
        assert!(mesh.nodes().iter().all(|n| n.position.is_finite() && n.velocity == DVec3::ZERO));
    }

    #[test]
    fn last_violated_plane_wins() {
        let mut mesh = SpringMesh::new();
        let id = mesh
            .add_node(0, 0, 0, SpringNode::new(DVec3::new(-1.0, -1.0, 0.0), 1.0).unwrap())
            .unwrap();
        mesh.node_by_id_mut(id).unwrap().velocity = DVec3::new(3.0, -3.0, 0.0);
        let floor = Plane::ground();
        let wall = Plane::new(DVec3::ZERO, DVec3::X).unwrap();
        mesh.resolve_collisions(&[floor, wall], &mut NoOpStepObserver);

        let node = mesh.node_by_id(id).unwrap();
        assert_eq!(node.velocity, DVec3::ZERO);
        assert_abs_diff_eq!(node.position.x, 0.0);
        assert_abs_diff_eq!(node.position.y, 0.0);
    }
}
