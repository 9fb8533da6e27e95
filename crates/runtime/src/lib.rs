//! Async shell around the deterministic cube simulation.
//!
//! This crate wires the pure `cube-core` engine into a tokio runtime: one
//! simulation worker owns the cube state and the rotation queue, a cloneable
//! [`CubeHandle`] drives it from any task, and a broadcast channel fans out
//! [`CubeEvent`]s to observers. The solver boundary is the [`SolverGateway`]
//! trait; the engine never knows how the answer is computed.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the builder, config, and worker lifecycle
//! - [`handle`] exposes the client facade
//! - [`events`] defines what observers can subscribe to
//! - [`gateway`] is the seam to the external solving service
//! - [`net_file`] reads and writes the JSON net exchange format
//! - [`worker`] keeps the simulation task internal to the crate
pub mod error;
pub mod events;
pub mod gateway;
pub mod handle;
pub mod net_file;
pub mod runtime;

mod worker;

pub use error::{Result, RuntimeError};
pub use events::CubeEvent;
pub use gateway::{GatewayError, SolverGateway};
pub use handle::CubeHandle;
pub use net_file::{NetFileError, load_net_file, save_net_file};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
