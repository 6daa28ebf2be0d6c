//! Step observer trait for monitoring simulation ticks.

use crate::error::Degeneracy;
use crate::grid::SweepDirection;
use crate::node::NodeId;

/// Trait for observing simulation ticks.
///
/// Implement this trait to monitor progress (debugging, visualization,
/// profiling) or to collect degeneracy diagnostics. All methods have default
/// no-op implementations.
pub trait StepObserver {
    /// Called after gravity has been applied to every mesh.
    fn on_gravity(&mut self) {}

    /// Called before the sweep and collision passes of each mesh.
    fn on_mesh_begin(&mut self, _mesh: usize) {}

    /// Called after each of the eight sweep passes of a mesh.
    fn on_sweep_pass(&mut self, _pass: usize, _direction: SweepDirection) {}

    /// Called when a node is clamped onto a plane.
    fn on_collision(&mut self, _node: NodeId, _plane: usize) {}

    /// Called when a spring contribution was skipped.
    fn on_degeneracy(&mut self, _degeneracy: Degeneracy) {}

    /// Called when a tick is fully complete.
    fn on_step_complete(&mut self) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}

/// Observer that records every skipped contribution with its mesh.
#[derive(Debug, Default)]
pub struct DegeneracyLog {
    current_mesh: usize,
    pub entries: Vec<(usize, Degeneracy)>,
}

impl StepObserver for DegeneracyLog {
    fn on_mesh_begin(&mut self, mesh: usize) {
        self.current_mesh = mesh;
    }

    fn on_degeneracy(&mut self, degeneracy: Degeneracy) {
        self.entries.push((self.current_mesh, degeneracy));
    }
}
