//! Mass-spring soft bodies driven by an order-dependent relaxation sweep.
//!
//! `jelly` simulates semi-rigid 3D volumes built from point masses and
//! one-way springs, colliding with static planes. It is a stylized scheme,
//! not a conservative integrator: every force contribution is integrated the
//! moment it arrives, so the order in which springs fire matters. Each tick
//! therefore sweeps the node grid in all eight axis-direction combinations to
//! keep the material from stiffening along one traversal direction.
//!
//! # Features
//!
//! - **Per-contribution integration**: damped semi-implicit Euler step per force
//! - **Directed springs**: linear springs move one endpoint, angle springs the two arms
//! - **Explicit sweep schedule**: the eight traversal orders are a public constant
//! - **Cube builder**: axial, cross-bracing and right-angle springs on a grid
//! - **Plane collisions**: clamp and stop nodes on or behind static planes
//! - **Observable**: monitor ticks and degenerate geometry via `StepObserver`
//!
//! ```
//! use glam::DVec3;
//! use jelly::{CubeConfig, NoOpStepObserver, Plane, Simulator, SimulatorConfig, SpringMesh};
//!
//! let cube = SpringMesh::cube(
//!     &CubeConfig::new(DVec3::splat(60.0), [3, 3, 3]).with_center(DVec3::new(0.0, 100.0, 0.0)),
//! )?;
//! let mut sim = Simulator::new(SimulatorConfig::new());
//! let id = sim.add_spring_mesh(cube);
//! sim.add_plane(Plane::ground());
//! for _ in 0..60 {
//!     sim.update(0.016, &mut NoOpStepObserver)?;
//! }
//! assert!(sim.mesh(id)?.positions().iter().all(|p| p.y >= 0.0));
//! # Ok::<(), jelly::PhysicsError>(())
//! ```

pub mod node;
pub mod spring;
pub mod plane;
pub mod grid;
pub mod mesh;
pub mod cube;
pub mod simulator;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use node::{SpringNode, NodeId, BoundingSphere, DAMPING, BOUNDING_RADIUS};
pub use spring::{SpringForce, LinearSpring, AngleSpring};
pub use plane::{Plane, PlaneTest};
pub use grid::{Order, SweepDirection, SparseGrid, SWEEP_SCHEDULE};
pub use mesh::SpringMesh;
pub use cube::{CubeConfig, Direction, CROSS_BRACES, ANGLE_CYCLES};
pub use simulator::{Simulator, MeshId};
pub use config::SimulatorConfig;
pub use observer::{StepObserver, NoOpStepObserver, DegeneracyLog};
pub use error::{PhysicsError, Degeneracy};
