//! Per-tick systems. Each one mutates a [`Habitat`](crate::habitat::Habitat)
//! through a [`SystemContext`].

pub mod biological;
pub mod connectivity;
pub mod ecological;
pub mod growth;
pub mod interaction;
pub mod movement;
pub mod stats;

use crate::config::AppConfig;
use pixelgenesis_data::TickCounters;
use rand::Rng;

/// Read-only parameters plus the tick's shared RNG and counters.
pub struct SystemContext<'a, R: Rng> {
    pub config: &'a AppConfig,
    pub tick: u64,
    pub rng: &'a mut R,
    pub counters: &'a mut TickCounters,
}

impl<'a, R: Rng> SystemContext<'a, R> {
    pub fn new(
        config: &'a AppConfig,
        tick: u64,
        rng: &'a mut R,
        counters: &'a mut TickCounters,
    ) -> Self {
        Self {
            config,
            tick,
            rng,
            counters,
        }
    }

    /// TTL given to every new food pixel.
    #[inline]
    pub fn food_ttl(&self) -> u32 {
        self.config.ecosystem.food_decay_ticks
    }
}
