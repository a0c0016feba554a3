//! Core data structures for the Descent simulation.

pub mod lineage;
pub mod report;
