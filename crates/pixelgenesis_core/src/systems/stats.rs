use crate::habitat::Habitat;
use pixelgenesis_data::{PopulationStats, TickCounters};
use std::collections::BTreeSet;

pub struct StatsContext<'a> {
    pub habitat: &'a Habitat,
    pub tick: u64,
    pub counters: TickCounters,
}

pub fn population_stats(ctx: StatsContext) -> PopulationStats {
    let organisms = &ctx.habitat.organisms;
    let mut stats = PopulationStats {
        tick: ctx.tick,
        population: organisms.len(),
        food_count: ctx.habitat.food.len(),
        obstacle_count: ctx.habitat.obstacle_count(),
        environment_energy: ctx.habitat.environment_energy,
        counters: ctx.counters,
        ..PopulationStats::default()
    };
    if organisms.is_empty() {
        return stats;
    }

    let mut species = BTreeSet::new();
    let mut cells = 0usize;
    for org in organisms.values() {
        stats.organism_energy += org.energy;
        stats.max_generation = stats.max_generation.max(org.generation);
        species.insert(org.species_mask);
        cells += org.size();
    }
    stats.species_count = species.len();
    stats.mean_size = cells as f64 / organisms.len() as f64;
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixelgenesis_data::{BoundaryMode, Coord, Genome, Organism};

    #[test]
    fn test_empty_world_stats() {
        let habitat = Habitat::new(4, 4, BoundaryMode::Wrap, 12.0);
        let stats = population_stats(StatsContext {
            habitat: &habitat,
            tick: 9,
            counters: TickCounters::default(),
        });
        assert_eq!(stats.tick, 9);
        assert_eq!(stats.population, 0);
        assert_eq!(stats.mean_size, 0.0);
        assert_eq!(stats.environment_energy, 12.0);
    }

    #[test]
    fn test_population_aggregates() {
        let mut habitat = Habitat::new(10, 10, BoundaryMode::Wrap, 0.0);
        let mut a = Organism::new(Coord::new(1, 1), Genome::single_cell(7), 10.0);
        a.pixels.insert(Coord::new(2, 1));
        a.pixels.insert(Coord::new(3, 1));
        a.species_mask = 3;
        let mut b = Organism::new(Coord::new(6, 6), Genome::single_cell(7), 5.0);
        b.generation = 4;
        b.species_mask = 3;
        habitat.spawn(a, 1);
        habitat.spawn(b, 1);
        habitat.make_food(Coord::new(8, 8), 5, 0);

        let stats = population_stats(StatsContext {
            habitat: &habitat,
            tick: 1,
            counters: TickCounters {
                moved: 1,
                ..TickCounters::default()
            },
        });
        assert_eq!(stats.population, 2);
        assert_eq!(stats.food_count, 1);
        assert_eq!(stats.organism_energy, 15.0);
        assert_eq!(stats.mean_size, 2.0);
        assert_eq!(stats.species_count, 1);
        assert_eq!(stats.max_generation, 4);
        assert_eq!(stats.counters.moved, 1);
    }
}
