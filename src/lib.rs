//! The Descent simulation: the engine crates wired to a demonstration
//! self-replicator, plus configuration loading for the binaries.

pub mod model;

pub use model::config::load_config;
pub use model::replicator::{Genome, ReplicatorHardware};
pub use model::simulation::Simulation;
