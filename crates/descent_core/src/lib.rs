//! # Descent Core
//!
//! The deterministic engine behind the Descent artificial-life simulation.
//!
//! This crate contains:
//! - The ancestry arena (organisms, parent links, share-counts)
//! - The population and the inheritance hook fired on every birth
//! - Priority accessors and the weighted round-robin scheduler
//! - Resource pools advanced in lockstep with the scheduler
//! - Line-of-descent extraction, MRCA resolution and fixation tracking
//! - Configuration, error types, metrics and structured logging
//!
//! ## Example
//!
//! ```
//! use descent_core::config::SchedulerConfig;
//! use descent_core::resources::NullResources;
//! use descent_core::scheduler::RoundRobin;
//! use descent_core::world::{Hardware, World};
//! use descent_core::OrganismRef;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! struct Idle;
//! impl Hardware<u8> for Idle {
//!     fn execute(&mut self, _org: OrganismRef, _cycles: u64, _world: &mut World<u8>) {}
//! }
//!
//! let mut world = World::with_seed(7);
//! for g in 0..4u8 {
//!     world.found(g, 1.0);
//! }
//! let config = SchedulerConfig { time_slice: 10, resource_slice: 5, max_population_size: 4, ..Default::default() };
//! let mut scheduler = RoundRobin::new(config);
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let report = scheduler.step(&mut world, &mut Idle, &mut NullResources, &mut rng).unwrap();
//! assert_eq!(report.consumed, 40);
//! assert_eq!(report.resource_updates, 5);
//! ```

/// Ancestry arena: organisms and their parent links
pub mod ancestry;
/// Configuration management for simulation parameters
pub mod config;
/// Engine error type
pub mod error;
/// Fixation-time stamping along the MRCA lineage
pub mod fixation;
/// Line-of-descent extraction and deduplication
pub mod lineage;
/// Performance metrics collection and logging
pub mod metrics;
/// Most-recent-common-ancestor resolution
pub mod mrca;
/// A single organism in the ancestry arena
pub mod organism;
/// The live population
pub mod population;
/// Per-organism cycle quanta
pub mod priority;
/// Environmental resource pools
pub mod resources;
/// Weighted round-robin scheduling
pub mod scheduler;
/// Population plus ancestry, and the hardware seam
pub mod world;

pub use ancestry::AncestryGraph;
pub use error::{DescentError, Result};
pub use lineage::Lineage;
pub use metrics::{init_logging, Metrics};
pub use organism::{Organism, OrganismRef};
pub use population::Population;
pub use world::{Hardware, World};
