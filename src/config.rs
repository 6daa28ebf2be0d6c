//! Configuration types for the simulator.

use glam::DVec3;

/// Gravity used when none is configured.
pub const DEFAULT_GRAVITY: DVec3 = DVec3::new(0.0, -9.8, 0.0);

/// Configuration for a [`Simulator`](crate::simulator::Simulator).
///
/// # Builder Pattern
/// ```
/// use glam::DVec3;
/// use jelly::config::SimulatorConfig;
///
/// let config = SimulatorConfig::new()
///     .with_gravity(DVec3::new(0.0, -1.62, 0.0));
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SimulatorConfig {
    /// Gravity acceleration vector. Default: `(0, -9.8, 0)`.
    pub gravity: DVec3,
}

impl SimulatorConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        SimulatorConfig { gravity: DEFAULT_GRAVITY }
    }

    /// Set the gravity vector.
    pub fn with_gravity(mut self, gravity: DVec3) -> Self {
        self.gravity = gravity;
        self
    }

    /// Disable gravity.
    pub fn weightless(self) -> Self {
        self.with_gravity(DVec3::ZERO)
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self::new()
    }
}
