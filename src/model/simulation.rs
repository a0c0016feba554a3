use crate::model::replicator::{Genome, ReplicatorHardware};
use anyhow::{Context, Result};
use descent_core::config::AppConfig;
use descent_core::fixation::FixationTracker;
use descent_core::resources::ResourceBank;
use descent_core::scheduler::Scheduler;
use descent_core::{Metrics, World};
use descent_data::TickReport;
use descent_io::LineageArchiver;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// One simulation instance: the world and everything that drives it.
pub struct Simulation {
    config: AppConfig,
    seed: u64,
    world: World<Genome>,
    hardware: ReplicatorHardware,
    resources: ResourceBank,
    scheduler: Scheduler,
    fixation: FixationTracker,
    archiver: LineageArchiver,
    metrics: Metrics,
    rng: ChaCha8Rng,
}

impl Simulation {
    /// Validates `config` and seeds the initial population.
    ///
    /// Without a configured seed one is drawn from the OS and logged.
    pub fn new(config: AppConfig) -> Result<Self> {
        config.validate().context("invalid configuration")?;

        let seed = config.world.seed.unwrap_or_else(|| rand::thread_rng().gen());
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let world = World::with_seed(rng.gen());
        let hardware = ReplicatorHardware::new(
            rng.gen(),
            config.world.mutation_rate,
            config.world.lifespan,
            config.scheduler.max_population_size,
        );

        let mut sim = Self {
            seed,
            world,
            hardware,
            resources: ResourceBank::from_config(&config.resources),
            scheduler: Scheduler::from_config(config.scheduler.clone()),
            fixation: FixationTracker::new(),
            archiver: LineageArchiver::from_config(&config.lineage).with_fingerprint(config.fingerprint()),
            metrics: Metrics::new(config.log_interval),
            rng,
            config,
        };
        sim.seed_population();

        tracing::info!(
            seed,
            population = sim.world.population().len(),
            fingerprint = %sim.config.fingerprint(),
            "Simulation initialized"
        );
        Ok(sim)
    }

    fn seed_population(&mut self) {
        for _ in 0..self.config.world.initial_population {
            let genome = self.hardware.random_genome(self.config.world.genome_length);
            self.world.found(genome, self.config.world.founder_priority);
        }
    }

    /// Runs one tick: schedule, stamp fixations, archive and release
    /// extinct ancestry as configured.
    pub fn tick(&mut self) -> Result<TickReport> {
        let start = Instant::now();
        let report = self.scheduler.step(
            &mut self.world,
            &mut self.hardware,
            &mut self.resources,
            &mut self.rng,
        )?;
        self.hardware.forget_dead(&self.world);

        if self.config.lineage.track_fixation {
            let stamped = self.fixation.record(&mut self.world)?;
            self.metrics.record_fixations(stamped);
        }

        self.archiver.maybe_archive(&self.world)?;

        let prune = self.config.lineage.prune_interval;
        if prune > 0 && report.tick % prune == 0 {
            let released = self.world.release_extinct();
            self.metrics.record_release(released);
            tracing::debug!(tick = report.tick, released, remaining = self.world.ancestry().len(), "Released extinct ancestry");
        }

        self.metrics.record_tick(&report, start.elapsed());
        Ok(report)
    }

    /// Runs up to `ticks` ticks, stopping early if the population dies out.
    ///
    /// Returns the number of ticks run.
    pub fn run(&mut self, ticks: u64) -> Result<u64> {
        for done in 0..ticks {
            let report = self.tick()?;
            if report.survivors == 0 {
                tracing::warn!(tick = report.tick, "Population extinct");
                return Ok(done + 1);
            }
        }
        Ok(ticks)
    }

    /// Archives the current MRCA lineage regardless of the archive interval.
    pub fn archive_now(&mut self) -> Result<Option<PathBuf>> {
        Ok(self.archiver.archive(&self.world)?)
    }

    /// Writes the ancestry graph in Graphviz DOT format.
    pub fn write_dot(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.world.ancestry().to_dot())
            .with_context(|| format!("writing {}", path.display()))
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn world(&self) -> &World<Genome> {
        &self.world
    }

    pub fn resources(&self) -> &ResourceBank {
        &self.resources
    }

    pub fn hardware(&self) -> &ReplicatorHardware {
        &self.hardware
    }

    pub fn fixation(&self) -> &FixationTracker {
        &self.fixation
    }

    pub fn archiver(&self) -> &LineageArchiver {
        &self.archiver
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}
