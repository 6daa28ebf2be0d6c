//! Error types for mesh construction and simulation.

use core::fmt;

use crate::node::NodeId;

/// Errors that can occur while building or stepping a simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// Mass must be positive and finite.
    InvalidMass,
    /// A grid needs at least two nodes along every axis.
    InvalidResolution { axis: usize, nodes: usize },
    /// Grid extent must be positive and finite.
    InvalidSize { axis: usize },
    /// Plane point must be finite and its normal finite and non-zero.
    InvalidPlane,
    /// Time step must be positive and finite.
    InvalidTimeStep,
    /// Every gravity component must be finite.
    InvalidGravity,
    /// Node id does not belong to the mesh.
    NodeOutOfBounds { index: usize, count: usize },
    /// A node is already registered at this grid index.
    OccupiedSlot { i: usize, j: usize, k: usize },
    /// Mesh handle does not belong to the simulator.
    MeshOutOfBounds { index: usize, count: usize },
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicsError::InvalidMass => write!(f, "mass must be positive and finite"),
            PhysicsError::InvalidResolution { axis, nodes } => {
                write!(f, "axis {} has {} nodes, at least 2 are required", axis, nodes)
            }
            PhysicsError::InvalidSize { axis } => {
                write!(f, "extent along axis {} must be positive and finite", axis)
            }
            PhysicsError::InvalidPlane => write!(f, "plane needs a finite point and a non-zero normal"),
            PhysicsError::InvalidTimeStep => write!(f, "time step must be positive and finite"),
            PhysicsError::InvalidGravity => write!(f, "gravity must be finite"),
            PhysicsError::NodeOutOfBounds { index, count } => {
                write!(f, "node index {} out of bounds (count: {})", index, count)
            }
            PhysicsError::OccupiedSlot { i, j, k } => {
                write!(f, "grid slot ({}, {}, {}) already holds a node", i, j, k)
            }
            PhysicsError::MeshOutOfBounds { index, count } => {
                write!(f, "mesh index {} out of bounds (count: {})", index, count)
            }
        }
    }
}

impl std::error::Error for PhysicsError {}

/// Geometry for which a spring force is undefined.
///
/// Raised during a tick. The offending contribution is skipped and the
/// degeneracy is handed to the step observer; node state is left untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Degeneracy {
    /// Both ends of a linear spring share a position.
    CoincidentNodes { node1: NodeId, node2: NodeId },
    /// The arms of an angle spring are collinear or zero-length.
    CollinearAngle { center: NodeId, node1: NodeId, node2: NodeId },
}

impl fmt::Display for Degeneracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Degeneracy::CoincidentNodes { node1, node2 } => {
                write!(f, "linear spring {} -> {} has coincident ends", node1, node2)
            }
            Degeneracy::CollinearAngle { center, node1, node2 } => write!(
                f,
                "angle spring at {} between {} and {} has collinear arms",
                center, node1, node2
            ),
        }
    }
}
