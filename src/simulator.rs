//! Fixed-step driver for a scene of spring meshes and collision planes.

use glam::DVec3;

use crate::config::SimulatorConfig;
use crate::error::PhysicsError;
use crate::mesh::SpringMesh;
use crate::observer::StepObserver;
use crate::plane::Plane;

/// Handle to a mesh registered with a [`Simulator`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MeshId(pub usize);

/// Owns the meshes and planes of one scene and advances them together.
#[derive(Clone, Debug, Default)]
pub struct Simulator {
    config: SimulatorConfig,
    meshes: Vec<SpringMesh>,
    planes: Vec<Plane>,
    tick: u64,
}

impl Simulator {
    pub fn new(config: SimulatorConfig) -> Self {
        Simulator { config, meshes: Vec::new(), planes: Vec::new(), tick: 0 }
    }

    pub fn add_spring_mesh(&mut self, mesh: SpringMesh) -> MeshId {
        self.meshes.push(mesh);
        MeshId(self.meshes.len() - 1)
    }

    pub fn add_plane(&mut self, plane: Plane) {
        self.planes.push(plane);
    }

    /// Advance every mesh by `dt`.
    ///
    /// Gravity is applied to all meshes before any of them propagates spring
    /// forces; each mesh then runs its sweep and collides with every plane.
    /// An invalid `dt` or non-finite gravity is rejected before any node is
    /// touched.
    pub fn update<O: StepObserver>(&mut self, dt: f64, observer: &mut O) -> Result<(), PhysicsError> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(PhysicsError::InvalidTimeStep);
        }
        if !self.config.gravity.is_finite() {
            return Err(PhysicsError::InvalidGravity);
        }

        for mesh in self.meshes.iter_mut() {
            mesh.calc_gravity(self.config.gravity, dt);
        }
        observer.on_gravity();

        for (index, mesh) in self.meshes.iter_mut().enumerate() {
            observer.on_mesh_begin(index);
            mesh.calc_influence(&self.planes, dt, observer);
        }

        self.tick += 1;
        log::trace!("tick {} complete ({} meshes, {} planes)", self.tick, self.meshes.len(), self.planes.len());
        observer.on_step_complete();
        Ok(())
    }

    pub fn mesh(&self, id: MeshId) -> Result<&SpringMesh, PhysicsError> {
        let count = self.meshes.len();
        self.meshes.get(id.0).ok_or(PhysicsError::MeshOutOfBounds { index: id.0, count })
    }

    pub fn mesh_mut(&mut self, id: MeshId) -> Result<&mut SpringMesh, PhysicsError> {
        let count = self.meshes.len();
        self.meshes.get_mut(id.0).ok_or(PhysicsError::MeshOutOfBounds { index: id.0, count })
    }

    pub fn meshes(&self) -> &[SpringMesh] { &self.meshes }
    pub fn planes(&self) -> &[Plane] { &self.planes }
    pub fn gravity(&self) -> DVec3 { self.config.gravity }

    pub fn set_gravity(&mut self, gravity: DVec3) {
        self.config.gravity = gravity;
    }

    /// Number of completed ticks.
    pub fn tick(&self) -> u64 { self.tick }
}
