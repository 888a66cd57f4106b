use serde::{Deserialize, Serialize};

/// Bookkeeping for a food pixel; its location is the key it is stored under.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    /// Ticks remaining before the pixel decays back to empty ground.
    pub ttl: u32,
    /// Tick on which the pixel appeared. Decay skips that tick.
    pub born_tick: u64,
}

impl Food {
    pub fn new(ttl: u32, born_tick: u64) -> Self {
        Self { ttl, born_tick }
    }
}

/// Per-tick debug counters, reset at the start of every tick.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickCounters {
    /// Organisms that committed at least one move.
    pub moved: usize,
    /// Organisms that placed a new cell.
    pub grew: usize,
    /// Organisms that paid for an attack.
    pub attacked: usize,
    /// Organisms that wanted to move but could not.
    pub starving: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
/// Aggregated population statistics for the whole grid.
pub struct PopulationStats {
    /// Tick the statistics were taken on.
    pub tick: u64,
    /// Number of living organisms.
    pub population: usize,
    /// Number of food pixels on the grid.
    pub food_count: usize,
    /// Number of obstacle cells.
    pub obstacle_count: usize,
    /// Energy held by all organisms together.
    pub organism_energy: f64,
    /// Energy held by the environment pool.
    pub environment_energy: f64,
    /// Mean pixel count per organism.
    pub mean_size: f64,
    /// Number of distinct species masks alive.
    pub species_count: usize,
    /// Highest generation number among living organisms.
    pub max_generation: u32,
    /// Debug counters of the tick that produced these statistics.
    pub counters: TickCounters,
}
