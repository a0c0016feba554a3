//! Weighted round-robin scheduling with resource budgeting.
//!
//! One call to [`WeightedRoundRobin::step`] is one simulation tick: the
//! population is shuffled, a cycle budget is derived from its size, organisms
//! are visited in round-robin order and granted cycles, the resource pool is
//! advanced once per period of the budget, and the population is rebuilt from
//! its survivors.

use crate::config::{SchedulerConfig, SchedulerKind};
use crate::error::{DescentError, Result};
use crate::priority::{quantum, FixedPriority, OrganismPriority, PriorityAccessor};
use crate::resources::ResourcePool;
use crate::world::{Hardware, World};
use descent_data::TickReport;
use rand::Rng;
use tracing::{debug, warn};

/// Executes every organism in round-robin order, granting each a number of
/// cycles equal to its priority on each visit.
#[derive(Debug, Clone)]
pub struct WeightedRoundRobin<A = OrganismPriority> {
    config: SchedulerConfig,
    accessor: A,
}

/// Round robin granting a single cycle per visit.
pub type RoundRobin = WeightedRoundRobin<FixedPriority>;

impl<A: PriorityAccessor + Default> WeightedRoundRobin<A> {
    pub fn new(config: SchedulerConfig) -> Self {
        Self::with_accessor(config, A::default())
    }
}

impl<A: PriorityAccessor> WeightedRoundRobin<A> {
    pub fn with_accessor(config: SchedulerConfig, accessor: A) -> Self {
        Self { config, accessor }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Runs one tick and returns what happened.
    ///
    /// Only organisms present when the tick starts are visited; offspring
    /// appended during the tick wait for the next one. The loop ends when the
    /// budget is spent or when as many dead visits as starting members have
    /// accumulated.
    pub fn step<R, H, P, G>(
        &mut self,
        world: &mut World<R>,
        hardware: &mut H,
        resources: &mut P,
        rng: &mut G,
    ) -> Result<TickReport>
    where
        H: Hardware<R>,
        P: ResourcePool + ?Sized,
        G: Rng + ?Sized,
    {
        let n = world.population().len();
        let eff_size = n.min(self.config.max_population_size) as u64;
        let budget = self.config.time_slice.saturating_mul(eff_size);
        let resource_slice = self.config.resource_slice;
        if resource_slice == 0 {
            return Err(DescentError::configuration("resource slice must be positive"));
        }
        let period_length = budget / resource_slice;
        if n > 0 && period_length == 0 {
            return Err(DescentError::configuration(format!(
                "budget {} split into {} resource periods leaves empty periods",
                budget, resource_slice
            )));
        }
        let delta_t = 1.0 / resource_slice as f64;

        let tick = world.begin_tick();
        let mut report = TickReport {
            tick,
            population_start: n,
            budget,
            period_length,
            ..Default::default()
        };
        if n == 0 {
            debug!(tick, "Empty population, nothing to schedule");
            return Ok(report);
        }

        // Offspring are appended while this loop runs, so the population
        // is addressed by position and wrapped at the starting size.
        world.population_mut().shuffle(rng);

        let mut consumed: u64 = 0;
        let mut last_period: Option<u64> = None;
        let mut index = 0usize;
        let mut dead_visits = 0usize;

        while consumed < budget && dead_visits < n {
            report.resource_updates +=
                advance_through(resources, &mut last_period, consumed / period_length, delta_t);

            let org = world.population()[index];
            report.visits += 1;
            let organism = world.organism(org)?;
            if organism.alive() {
                let cycles = quantum(self.accessor.priority(organism), budget - consumed);
                hardware.execute(org, cycles, world);
                consumed += cycles;
            } else {
                dead_visits += 1;
            }

            index = (index + 1) % n;
        }

        // A large final quantum may span periods the loop never started in.
        if consumed >= budget {
            report.resource_updates +=
                advance_through(resources, &mut last_period, (budget - 1) / period_length, delta_t);
        }

        report.consumed = consumed;
        report.dead_visits = dead_visits as u64;
        report.births = world.population().len() - n;
        report.survivors = world.retain_alive();

        debug!(
            tick,
            population = n,
            budget,
            period_length,
            consumed,
            resource_updates = report.resource_updates,
            dead_visits,
            births = report.births,
            survivors = report.survivors,
            "Tick scheduled"
        );
        if report.ended_by_extinction() && consumed < budget {
            warn!(tick, consumed, budget, "Tick ended early, every visit found a dead organism");
        }

        Ok(report)
    }
}

/// Advances the pool once for every period after `last_period` up to and
/// including `period`.
fn advance_through<P>(
    resources: &mut P,
    last_period: &mut Option<u64>,
    period: u64,
    delta_t: f64,
) -> u64
where
    P: ResourcePool + ?Sized,
{
    let mut applied = 0;
    let mut next = last_period.map_or(0, |p| p + 1);
    while next <= period {
        resources.advance(delta_t);
        applied += 1;
        next += 1;
    }
    if applied > 0 {
        *last_period = Some(period);
    }
    applied
}

/// A scheduler whose accessor is chosen from configuration.
#[derive(Debug, Clone)]
pub enum Scheduler {
    Weighted(WeightedRoundRobin<OrganismPriority>),
    RoundRobin(RoundRobin),
}

impl Scheduler {
    pub fn from_config(config: SchedulerConfig) -> Self {
        match config.kind {
            SchedulerKind::Weighted => Self::Weighted(WeightedRoundRobin::new(config)),
            SchedulerKind::RoundRobin => Self::RoundRobin(RoundRobin::new(config)),
        }
    }

    pub fn step<R, H, P, G>(
        &mut self,
        world: &mut World<R>,
        hardware: &mut H,
        resources: &mut P,
        rng: &mut G,
    ) -> Result<TickReport>
    where
        H: Hardware<R>,
        P: ResourcePool + ?Sized,
        G: Rng + ?Sized,
    {
        match self {
            Self::Weighted(s) => s.step(world, hardware, resources, rng),
            Self::RoundRobin(s) => s.step(world, hardware, resources, rng),
        }
    }
}
