//! The simulation context: one [`World`] owns the grid, the registries, the
//! environment pool and the seeded RNG, and advances them one tick per
//! [`World::step`].

use crate::config::AppConfig;
use crate::grid::Grid;
use crate::habitat::Habitat;
use pixelgenesis_data::{CellCode, Coord, Food, Organism, OrganismId, TickCounters};
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;

pub mod finalize;
pub mod init;
pub mod state;
pub mod update;

pub use finalize::Reconciliation;

pub struct World {
    width: u16,
    height: u16,
    config: AppConfig,
    tick: u64,
    habitat: Habitat,
    counters: TickCounters,
    rng: ChaCha8Rng,
}

impl World {
    #[inline]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// The validated configuration the world was built with. Fixed for the
    /// lifetime of the world.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Row-major ownership codes.
    pub fn cells(&self) -> &[CellCode] {
        self.habitat.grid.cells()
    }

    /// Row-major hit-points, parallel to [`cells`](World::cells).
    pub fn hit_points(&self) -> &[u32] {
        self.habitat.grid.hit_point_cells()
    }

    pub fn grid(&self) -> &Grid {
        &self.habitat.grid
    }

    pub fn organisms(&self) -> &BTreeMap<OrganismId, Organism> {
        &self.habitat.organisms
    }

    pub fn organism(&self, id: OrganismId) -> Option<&Organism> {
        self.habitat.organisms.get(&id)
    }

    /// Mutable access for steering and trait edits. Pixel and eye changes
    /// made here are only repaired by the next reconciliation.
    pub fn organism_mut(&mut self, id: OrganismId) -> Option<&mut Organism> {
        self.habitat.organisms.get_mut(&id)
    }

    pub fn food(&self) -> &BTreeMap<Coord, Food> {
        &self.habitat.food
    }

    pub fn environment_energy(&self) -> f64 {
        self.habitat.environment_energy
    }

    /// Debug counters of the last completed tick.
    pub fn counters(&self) -> TickCounters {
        self.counters
    }

    pub fn habitat(&self) -> &Habitat {
        &self.habitat
    }

    /// Raw state access for tools and tests that drive systems directly.
    pub fn habitat_mut(&mut self) -> &mut Habitat {
        &mut self.habitat
    }
}
