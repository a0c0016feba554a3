use serde::{Deserialize, Serialize};

/// Summary of one scheduler tick.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub tick: u64,
    /// Population size when the tick started.
    pub population_start: usize,
    /// Total cycles available this tick.
    pub budget: u64,
    /// Cycles per resource-update period.
    pub period_length: u64,
    /// Cycles actually granted.
    pub consumed: u64,
    /// Number of `advance` calls made on the resource pool.
    pub resource_updates: u64,
    /// Organism visits, dead or alive.
    pub visits: u64,
    /// Visits that found a dead organism.
    pub dead_visits: u64,
    /// Offspring appended during the tick.
    pub births: usize,
    /// Population size after the rebuild.
    pub survivors: usize,
}

impl TickReport {
    /// True when the tick stopped because every visit found a dead organism.
    pub fn ended_by_extinction(&self) -> bool {
        self.population_start > 0 && self.dead_visits as usize >= self.population_start
    }
}
