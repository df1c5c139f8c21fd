pub mod config;
pub mod sim_params;
pub mod snapshot;
pub mod vecmath;

// Re-export key types for easier use by dependent crates
pub use config::{FlockConfig, OutputConfig, OutputFormat, RunConfig, SimulationConfig, WorldConfig};
pub use sim_params::{Bounds, SimParams};
pub use snapshot::{BoidSample, Snapshot};
pub use vecmath::Vec2;
