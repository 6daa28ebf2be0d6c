//! Box-shaped spring meshes with axial, cross-bracing and angle springs.

use core::f64::consts::FRAC_PI_2;

use glam::DVec3;

use crate::error::PhysicsError;
use crate::mesh::SpringMesh;
use crate::node::{NodeId, SpringNode};

/// Axial neighbour directions, in the order their springs are created.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    NegX = 0,
    PosX = 1,
    NegY = 2,
    PosY = 3,
    NegZ = 4,
    PosZ = 5,
}

impl Direction {
    pub const AXIAL: [Direction; 6] = [
        Direction::NegX,
        Direction::PosX,
        Direction::NegY,
        Direction::PosY,
        Direction::NegZ,
        Direction::PosZ,
    ];

    pub fn offset(self) -> [isize; 3] {
        match self {
            Direction::NegX => [-1, 0, 0],
            Direction::PosX => [1, 0, 0],
            Direction::NegY => [0, -1, 0],
            Direction::PosY => [0, 1, 0],
            Direction::NegZ => [0, 0, -1],
            Direction::PosZ => [0, 0, 1],
        }
    }

    fn axis(self) -> usize {
        self as usize / 2
    }
}

/// Space-diagonal neighbours that receive a cross-bracing spring, in order.
pub const CROSS_BRACES: [[isize; 3]; 5] = [
    [-1, -1, -1],
    [1, 1, 1],
    [-1, 1, 1],
    [-1, -1, 1],
    [1, -1, 1],
];

/// Direction cycles walked to place right-angle springs. Each consecutive
/// pair in a cycle yields one angle spring; cycles do not wrap around.
pub const ANGLE_CYCLES: [[Direction; 4]; 3] = [
    [Direction::NegX, Direction::PosY, Direction::PosX, Direction::NegY],
    [Direction::NegX, Direction::PosZ, Direction::PosX, Direction::NegZ],
    [Direction::NegZ, Direction::PosY, Direction::PosZ, Direction::NegY],
];

/// Configuration for a cube mesh.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CubeConfig {
    /// Edge lengths along x, y and z.
    pub size: DVec3,
    /// Node count along x, y and z. At least 2 per axis.
    pub resolution: [usize; 3],
    pub center: DVec3,
    pub node_mass: f64,
    pub linear_stiffness: f64,
    pub angle_stiffness: f64,
    /// Displacement applied to node `(0, 0, 0)` once the springs are wired,
    /// so the body starts out of equilibrium.
    pub corner_offset: DVec3,
}

impl Default for CubeConfig {
    fn default() -> Self {
        CubeConfig {
            size: DVec3::splat(60.0),
            resolution: [2, 2, 2],
            center: DVec3::ZERO,
            node_mass: 1.0,
            linear_stiffness: 1.0,
            angle_stiffness: 5.0,
            corner_offset: DVec3::ZERO,
        }
    }
}

impl CubeConfig {
    pub fn new(size: DVec3, resolution: [usize; 3]) -> Self {
        CubeConfig { size, resolution, ..Self::default() }
    }

    pub fn with_center(mut self, center: DVec3) -> Self {
        self.center = center;
        self
    }

    pub fn with_node_mass(mut self, mass: f64) -> Self {
        self.node_mass = mass;
        self
    }

    pub fn with_stiffness(mut self, linear: f64, angle: f64) -> Self {
        self.linear_stiffness = linear;
        self.angle_stiffness = angle;
        self
    }

    pub fn with_corner_offset(mut self, offset: DVec3) -> Self {
        self.corner_offset = offset;
        self
    }

    pub fn validate(&self) -> Result<(), PhysicsError> {
        for (axis, &nodes) in self.resolution.iter().enumerate() {
            if nodes < 2 {
                return Err(PhysicsError::InvalidResolution { axis, nodes });
            }
        }
        for axis in 0..3 {
            let extent = self.size[axis];
            if !(extent.is_finite() && extent > 0.0) {
                return Err(PhysicsError::InvalidSize { axis });
            }
        }
        if !(self.node_mass.is_finite() && self.node_mass > 0.0) {
            return Err(PhysicsError::InvalidMass);
        }
        Ok(())
    }

    /// Distance between neighbouring nodes along each axis.
    pub fn spacing(&self) -> Result<DVec3, PhysicsError> {
        self.validate()?;
        let [nx, ny, nz] = self.resolution;
        Ok(self.size / DVec3::new((nx - 1) as f64, (ny - 1) as f64, (nz - 1) as f64))
    }
}

fn neighbour(mesh: &SpringMesh, at: [usize; 3], offset: [isize; 3]) -> Option<NodeId> {
    let i = at[0].checked_add_signed(offset[0])?;
    let j = at[1].checked_add_signed(offset[1])?;
    let k = at[2].checked_add_signed(offset[2])?;
    mesh.node_id(i, j, k)
}

impl SpringMesh {
    /// Build a cube of `nx * ny * nz` evenly spaced nodes.
    ///
    /// Every node owns:
    /// - one linear spring per existing axial neighbour (rest = axis spacing),
    /// - a cross-bracing spring per existing neighbour in [`CROSS_BRACES`]
    ///   (rest = cell diagonal),
    /// - a right-angle spring for each consecutive pair in [`ANGLE_CYCLES`]
    ///   whose two axial springs both exist.
    ///
    /// Boundary nodes simply lack the springs toward missing neighbours.
    pub fn cube(config: &CubeConfig) -> Result<Self, PhysicsError> {
        let spacing = config.spacing()?;
        let [nx, ny, nz] = config.resolution;
        let start = config.center - config.size * 0.5;

        let mut mesh = SpringMesh::new();
        for i in 0..nx {
            for j in 0..ny {
                for k in 0..nz {
                    let position = start + DVec3::new(i as f64, j as f64, k as f64) * spacing;
                    mesh.add_node(i, j, k, SpringNode::new(position, config.node_mass)?)?;
                }
            }
        }

        let diagonal = spacing.length();
        for i in 0..nx {
            for j in 0..ny {
                for k in 0..nz {
                    let at = [i, j, k];
                    let Some(center) = mesh.node_id(i, j, k) else { continue };

                    let mut axial = [None; 6];
                    for direction in Direction::AXIAL {
                        if let Some(other) = neighbour(&mesh, at, direction.offset()) {
                            let rest = spacing[direction.axis()];
                            mesh.add_linear_spring(center, other, rest, config.linear_stiffness)?;
                            axial[direction as usize] = Some(other);
                        }
                    }

                    for offset in CROSS_BRACES {
                        if let Some(other) = neighbour(&mesh, at, offset) {
                            mesh.add_linear_spring(center, other, diagonal, config.linear_stiffness)?;
                        }
                    }

                    for cycle in &ANGLE_CYCLES {
                        for pair in cycle.windows(2) {
                            if let (Some(a), Some(b)) = (axial[pair[0] as usize], axial[pair[1] as usize]) {
                                mesh.add_angle_spring(center, a, b, FRAC_PI_2, config.angle_stiffness)?;
                            }
                        }
                    }
                }
            }
        }

        if config.corner_offset != DVec3::ZERO {
            if let Some(corner) = mesh.node_id(0, 0, 0).and_then(|id| mesh.node_by_id_mut(id)) {
                corner.position += config.corner_offset;
            }
        }

        log::debug!(
            "built {}x{}x{} cube: {} nodes, {} linear springs, {} angle springs",
            nx,
            ny,
            nz,
            mesh.node_count(),
            mesh.linear_spring_count(),
            mesh.angle_spring_count(),
        );
        Ok(mesh)
    }
}
