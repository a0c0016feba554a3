//! Plain data shared by the engine and the persistence layer.

pub mod data;

pub use data::lineage::{LineageHeader, OrganismSnapshot};
pub use data::report::TickReport;

/// Generation assigned to a founding ancestor (an organism with no parents).
pub const ANCESTOR_GENERATION: f64 = -1.0;
