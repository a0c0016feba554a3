use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// First record of a persisted lineage.
///
/// The size comes before any element so a reader can rebuild the sequence
/// without look-ahead.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LineageHeader {
    pub lineage_size: usize,
    /// Tick at which the lineage was captured.
    pub tick: u64,
    /// Fingerprint of the configuration that produced the run.
    #[serde(default)]
    pub config_fingerprint: Option<String>,
}

/// A detached copy of one organism on a line of descent.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OrganismSnapshot<R> {
    /// Unique organism identifier.
    pub id: Uuid,
    /// Parent identifier (`None` for a founding ancestor).
    pub parent_id: Option<Uuid>,
    /// Generation; negative for a founding ancestor.
    pub generation: f64,
    /// Tick at which this organism became common to every surviving lineage.
    pub fixation_time: Option<u64>,
    /// Genome.
    pub representation: R,
}

impl<R> OrganismSnapshot<R> {
    pub fn is_ancestor(&self) -> bool {
        self.generation < 0.0
    }
}
