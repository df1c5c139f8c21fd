pub mod boid;
pub mod output;
pub mod rules;
pub mod simulation;

pub use boid::{distance, Boid};
pub use simulation::{FlockSimulation, SnapshotDetail};
