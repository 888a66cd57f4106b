use crate::config::AppConfig;
use crate::habitat::Habitat;
use crate::systems::ecological;
use crate::terrain;
use crate::world::World;
use pixelgenesis_data::TickCounters;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Random placements tried per requested organism before giving up.
const PLACEMENT_ATTEMPTS: usize = 50;

impl World {
    /// Builds a world from `config`, seeding the RNG from `world.seed` or
    /// from entropy when no seed is set.
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let rng = if let Some(seed) = config.world.seed {
            ChaCha8Rng::seed_from_u64(seed)
        } else {
            ChaCha8Rng::from_entropy()
        };
        Self::with_rng(config, rng)
    }

    /// Builds a world driven by an explicit RNG.
    ///
    /// Terrain is carved first, then the initial population and food are
    /// scattered over whatever is left open.
    pub fn with_rng(config: AppConfig, mut rng: ChaCha8Rng) -> anyhow::Result<Self> {
        config.validate()?;
        let width = config.world.width;
        let height = config.world.height;

        let mut habitat = Habitat::new(
            width,
            height,
            config.world.boundary,
            config.ecosystem.initial_environment_energy,
        );

        if config.terrain.enabled {
            let mask = terrain::generate_walls(
                width,
                height,
                &config.terrain,
                config.world.boundary,
                &mut rng,
            );
            let walls = terrain::apply_walls(&mut habitat.grid, &mask);
            tracing::info!(walls, "Terrain generated");
        }

        let mut world = Self {
            width,
            height,
            config,
            tick: 0,
            habitat,
            counters: TickCounters::default(),
            rng,
        };
        let placed = world.populate(world.config.world.initial_population);
        let food = world.config.world.initial_food;
        let ttl = world.config.ecosystem.food_decay_ticks;
        let food_placed =
            ecological::scatter_food(&mut world.habitat, food, 0.0, ttl, 0, &mut world.rng);

        tracing::info!(
            width,
            height,
            boundary = ?world.config.world.boundary,
            organisms = placed,
            food = food_placed,
            environment_energy = world.habitat.environment_energy,
            "World created"
        );
        Ok(world)
    }

    /// Drops up to `count` random organisms on clear sites.
    pub fn populate(&mut self, count: usize) -> usize {
        let mut placed = 0;
        for _ in 0..count {
            for _ in 0..PLACEMENT_ATTEMPTS {
                let x = self.rng.gen_range(0..self.width as i32);
                let y = self.rng.gen_range(0..self.height as i32);
                if self.create_organism(x, y, None, None).is_some() {
                    placed += 1;
                    break;
                }
            }
        }
        if placed < count {
            tracing::warn!(requested = count, placed, "Not enough room for population");
        }
        placed
    }
}
