pub mod config;
pub mod replicator;
pub mod simulation;
