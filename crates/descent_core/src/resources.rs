//! Environmental resource pools.
//!
//! A pool is advanced only by the scheduler, once per resource period.

use crate::config::ResourceConfig;

/// Environmental state advanced in fractional time steps.
pub trait ResourcePool {
    fn advance(&mut self, delta_t: f64);
}

impl<F> ResourcePool for F
where
    F: FnMut(f64),
{
    fn advance(&mut self, delta_t: f64) {
        self(delta_t)
    }
}

/// A pool with no state.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullResources;

impl ResourcePool for NullResources {
    fn advance(&mut self, _delta_t: f64) {}
}

/// A single chemostat-style resource.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub name: String,
    pub level: f64,
    pub inflow: f64,
    pub outflow: f64,
}

impl Resource {
    fn update(&mut self, delta_t: f64) {
        let rate = self.inflow - self.outflow * self.level;
        self.level = (self.level + rate * delta_t).max(0.0);
    }
}

/// A set of named resources updated together.
#[derive(Debug, Clone, Default)]
pub struct ResourceBank {
    resources: Vec<Resource>,
    elapsed: f64,
}

impl ResourceBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(configs: &[ResourceConfig]) -> Self {
        Self {
            resources: configs
                .iter()
                .map(|c| Resource {
                    name: c.name.clone(),
                    level: c.initial,
                    inflow: c.inflow,
                    outflow: c.outflow,
                })
                .collect(),
            elapsed: 0.0,
        }
    }

    pub fn add(&mut self, resource: Resource) {
        self.resources.push(resource);
    }

    pub fn level(&self, name: &str) -> Option<f64> {
        self.resources
            .iter()
            .find(|r| r.name == name)
            .map(|r| r.level)
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Total simulated time applied so far.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}

impl ResourcePool for ResourceBank {
    fn advance(&mut self, delta_t: f64) {
        self.elapsed += delta_t;
        for resource in &mut self.resources {
            resource.update(delta_t);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank() -> ResourceBank {
        ResourceBank::from_config(&[ResourceConfig {
            name: "glucose".to_string(),
            initial: 0.0,
            inflow: 10.0,
            outflow: 0.1,
        }])
    }

    #[test]
    fn test_chemostat_step() {
        let mut bank = bank();
        bank.advance(0.5);
        assert_eq!(bank.level("glucose"), Some(5.0));
        assert_eq!(bank.elapsed(), 0.5);
    }

    #[test]
    fn test_chemostat_approaches_equilibrium() {
        let mut bank = bank();
        for _ in 0..2000 {
            bank.advance(0.2);
        }
        let level = bank.level("glucose").unwrap();
        assert!((level - 100.0).abs() < 1e-6, "level = {}", level);
    }

    #[test]
    fn test_level_never_negative() {
        let mut bank = ResourceBank::new();
        bank.add(Resource {
            name: "o2".to_string(),
            level: 1.0,
            inflow: 0.0,
            outflow: 50.0,
        });
        bank.advance(1.0);
        assert_eq!(bank.level("o2"), Some(0.0));
    }

    #[test]
    fn test_closure_pool() {
        let mut calls = 0;
        {
            let mut pool = |_dt: f64| calls += 1;
            pool.advance(0.25);
            pool.advance(0.25);
        }
        assert_eq!(calls, 2);
    }
}
