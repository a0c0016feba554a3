//! Configuration management for simulation parameters.
//!
//! This module provides strongly-typed configuration structures that map to
//! the `descent.toml` file. All simulation parameters can be customized through
//! this configuration system.
//!
//! ## Configuration Hierarchy
//!
//! 1. Default values (hardcoded in `Default` impl)
//! 2. `descent.toml` file (overrides defaults)
//! 3. Command-line flags (seed, archive directory)
//!
//! ## Example `descent.toml`
//!
//! ```toml
//! log_interval = 100
//!
//! [scheduler]
//! time_slice = 10
//! resource_slice = 5
//! max_population_size = 1024
//! kind = "Weighted"
//!
//! [world]
//! seed = 42
//! initial_population = 16
//!
//! [[resources]]
//! name = "glucose"
//! initial = 100.0
//! inflow = 10.0
//! outflow = 0.1
//! ```

use serde::{Deserialize, Serialize};

/// Which priority accessor the scheduler uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SchedulerKind {
    /// Cycles proportional to each organism's stored priority.
    #[default]
    Weighted,
    /// One cycle per visit.
    RoundRobin,
}

/// Scheduler budget parameters.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Cycles per organism per tick.
    pub time_slice: u64,
    /// Resource-update periods per tick.
    pub resource_slice: u64,
    /// Caps how far the per-tick budget scales with population size.
    pub max_population_size: usize,
    pub kind: SchedulerKind,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            time_slice: 30,
            resource_slice: 30,
            max_population_size: 1024,
            kind: SchedulerKind::Weighted,
        }
    }
}

/// Initial population parameters.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    pub seed: Option<u64>,
    pub initial_population: usize,
    pub founder_priority: f64,
    /// Length of a founder genome.
    pub genome_length: usize,
    /// Per-site probability of a point mutation at birth.
    pub mutation_rate: f64,
    /// Cycles an organism may run before it dies of old age.
    pub lifespan: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: None,
            initial_population: 16,
            founder_priority: 1.0,
            genome_length: 32,
            mutation_rate: 0.0075,
            lifespan: 2000,
        }
    }
}

/// Line-of-descent tracking and archiving.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LineageConfig {
    pub track_fixation: bool,
    /// Ticks between MRCA lineage archives; 0 disables archiving.
    pub archive_interval: u64,
    pub archive_dir: String,
    pub compress: bool,
    /// Ticks between releases of extinct ancestry; 0 disables release.
    pub prune_interval: u64,
}

impl Default for LineageConfig {
    fn default() -> Self {
        Self {
            track_fixation: true,
            archive_interval: 0,
            archive_dir: "lod".to_string(),
            compress: true,
            prune_interval: 100,
        }
    }
}

/// One chemostat resource.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ResourceConfig {
    pub name: String,
    pub initial: f64,
    pub inflow: f64,
    pub outflow: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Ticks between metrics log lines.
    pub log_interval: u64,
    pub scheduler: SchedulerConfig,
    pub world: WorldConfig,
    pub lineage: LineageConfig,
    pub resources: Vec<ResourceConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_interval: 100,
            scheduler: SchedulerConfig::default(),
            world: WorldConfig::default(),
            lineage: LineageConfig::default(),
            resources: vec![ResourceConfig {
                name: "glucose".to_string(),
                initial: 100.0,
                inflow: 10.0,
                outflow: 0.1,
            }],
        }
    }
}

impl SchedulerConfig {
    /// Validates the scheduler parameters.
    ///
    /// A single organism must yield a resource period of at least one cycle,
    /// so the population can shrink to one without the tick failing.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.time_slice > 0, "Time slice must be positive");
        anyhow::ensure!(self.resource_slice > 0, "Resource slice must be positive");
        anyhow::ensure!(
            self.max_population_size > 0,
            "Max population size must be positive"
        );
        anyhow::ensure!(
            self.time_slice >= self.resource_slice,
            "Resource slice {} exceeds the single-organism budget {}",
            self.resource_slice,
            self.time_slice
        );
        Ok(())
    }
}

impl AppConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` with a description
    /// of the first validation failure.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.scheduler.validate()?;

        anyhow::ensure!(
            self.world.founder_priority.is_finite() && self.world.founder_priority >= 0.0,
            "Founder priority must be finite and non-negative"
        );
        anyhow::ensure!(self.world.genome_length > 0, "Genome length must be positive");
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.world.mutation_rate),
            "Mutation rate must be in [0.0, 1.0]"
        );
        anyhow::ensure!(self.world.lifespan > 0, "Lifespan must be positive");

        for (i, r) in self.resources.iter().enumerate() {
            anyhow::ensure!(!r.name.is_empty(), "Resource name must not be empty");
            anyhow::ensure!(
                r.initial.is_finite() && r.initial >= 0.0,
                "Resource {} initial level must be finite and non-negative",
                r.name
            );
            anyhow::ensure!(
                r.inflow.is_finite() && r.inflow >= 0.0,
                "Resource {} inflow must be finite and non-negative",
                r.name
            );
            anyhow::ensure!(
                r.outflow.is_finite() && r.outflow >= 0.0,
                "Resource {} outflow must be finite and non-negative",
                r.name
            );
            anyhow::ensure!(
                !self.resources[..i].iter().any(|o| o.name == r.name),
                "Duplicate resource name {}",
                r.name
            );
        }

        anyhow::ensure!(self.log_interval > 0, "Log interval must be positive");
        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Digest of the parameters that affect simulation outcomes.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.scheduler).as_bytes());
        hasher.update(format!("{:?}", self.world).as_bytes());
        hasher.update(format!("{:?}", self.resources).as_bytes());
        hex::encode(hasher.finalize())
    }
}
