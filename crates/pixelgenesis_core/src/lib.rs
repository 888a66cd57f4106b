//! # Pixelgenesis Core
//!
//! The deterministic engine behind pixelgenesis, an artificial-life
//! simulation where organisms are 8-connected clusters of pixels on a
//! bounded 2D grid.
//!
//! This crate contains:
//! - The flat spatial index and procedural terrain
//! - Genome logic, perception and lifecycle rules
//! - Per-tick systems (movement, growth, combat, feeding, metabolism,
//!   reproduction, food spawn and decay)
//! - The [`World`] orchestrator, snapshots and metrics
//!
//! ## Example
//!
//! ```
//! use pixelgenesis_core::{AppConfig, World};
//!
//! let mut config = AppConfig::default();
//! config.world.width = 48;
//! config.world.height = 32;
//! config.world.seed = Some(42);
//!
//! let mut world = World::new(config).unwrap();
//! world.step();
//! assert_eq!(world.tick(), 1);
//! ```

/// Configuration sections loaded from TOML
pub mod config;
/// Config loading errors
pub mod error;
/// Genome generation, mutation and species masks
pub mod genome;
/// Flat grid arrays with boundary-aware addressing
pub mod grid;
/// Grid plus registries shared by every system
pub mod habitat;
/// Organism construction and offspring rules
pub mod lifecycle;
/// Performance metrics collection and logging
pub mod metrics;
/// Ray casting and heading choice
pub mod perception;
/// Serializable world snapshots
pub mod snapshot;
/// Per-tick simulation systems
pub mod systems;
/// Cellular-automaton wall generation
pub mod terrain;
/// The simulation context and tick loop
pub mod world;

pub use config::AppConfig;
pub use error::ConfigError;
pub use genome::GenomeLogic;
pub use grid::Grid;
pub use habitat::Habitat;
pub use metrics::{init_logging, Metrics};
pub use snapshot::WorldSnapshot;
pub use world::{Reconciliation, World};
