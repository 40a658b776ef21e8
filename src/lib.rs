//! Brute-force simulation of the gravitational N-body problem in the plane.
//!
//! Every step sums the pairwise forces between all bodies
//! ([`DirectSummation`]) and then advances each body with an explicit Euler
//! step ([`integrator::euler_step`]). A [`Simulation`] owns the bodies and
//! yields a [`Snapshot`] after each step.
//!
//! ```
//! use nalgebra::Vector2;
//! use nbody::{Body, Simulation};
//!
//! let bodies = vec![
//!     Body::new(1., Vector2::new(-10., 0.), Vector2::zeros()),
//!     Body::new(1., Vector2::new(10., 0.), Vector2::zeros()),
//! ];
//! let mut sim = Simulation::new(bodies, 1., 10);
//! let snapshots = sim.simulate();
//! assert_eq!(snapshots.len(), 10);
//! ```

pub mod body;
pub mod config;
#[cfg(feature = "randomization")]
pub mod creator;
pub mod gravity;
pub mod integrator;
pub mod report;
pub mod simulation;
pub mod snapshot;

pub use body::Body;
pub use config::{Config, ConfigError};
pub use gravity::{DirectSummation, Execution, G};
pub use simulation::{Phase, Simulation};
pub use snapshot::{BodyState, Snapshot, SnapshotSink};
