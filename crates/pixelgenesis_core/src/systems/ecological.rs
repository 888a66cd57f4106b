use super::SystemContext;
use crate::habitat::Habitat;
use pixelgenesis_data::{Coord, FOOD};
use rand::Rng;

/// Converts up to `count` random empty cells into food. Each pixel costs the
/// pool `cost`; spawning stops once the pool cannot pay. Returns the number
/// placed.
pub fn scatter_food<R: Rng>(
    habitat: &mut Habitat,
    count: usize,
    cost: f64,
    ttl: u32,
    tick: u64,
    rng: &mut R,
) -> usize {
    if count == 0 {
        return 0;
    }
    let mut empties = habitat.grid.empty_cells();
    let mut placed = 0;
    while placed < count && !empties.is_empty() {
        if cost > 0.0 && habitat.environment_energy < cost {
            break;
        }
        let c = empties.swap_remove(rng.gen_range(0..empties.len()));
        habitat.make_food(c, ttl, tick);
        habitat.environment_energy -= cost;
        placed += 1;
    }
    placed
}

/// Periodic food spawn funded by the environment pool.
pub fn food_spawn_system<R: Rng>(habitat: &mut Habitat, ctx: &mut SystemContext<R>) -> usize {
    let eco = &ctx.config.ecosystem;
    if eco.food_spawn_interval == 0 || ctx.tick % eco.food_spawn_interval != 0 {
        return 0;
    }
    let count = (habitat.environment_energy * eco.food_spawn_rate / eco.energy_constant)
        .floor()
        .max(0.0) as usize;
    let placed = scatter_food(
        habitat,
        count,
        eco.energy_constant,
        eco.food_decay_ticks,
        ctx.tick,
        ctx.rng,
    );
    if placed > 0 {
        tracing::trace!(tick = ctx.tick, placed, "Food spawned");
    }
    placed
}

/// Counts every food pixel down; expired ones revert to empty ground and
/// refund part of their energy. Food created this tick is left alone.
pub fn food_decay_system<R: Rng>(habitat: &mut Habitat, ctx: &mut SystemContext<R>) -> usize {
    let tick = ctx.tick;
    let mut expired: Vec<Coord> = Vec::new();
    for (&c, food) in habitat.food.iter_mut() {
        if food.born_tick == tick {
            continue;
        }
        food.ttl = food.ttl.saturating_sub(1);
        if food.ttl == 0 {
            expired.push(c);
        }
    }

    let eco = &ctx.config.ecosystem;
    let refund = eco.energy_constant * eco.food_decay_return_ratio;
    for c in &expired {
        habitat.food.remove(c);
        if habitat.grid.code(*c) == FOOD {
            habitat.grid.clear(*c);
        }
        habitat.environment_energy += refund;
    }
    expired.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use pixelgenesis_data::{BoundaryMode, TickCounters, OBSTACLE};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_spawn_only_on_interval_and_debits_pool() {
        let mut config = AppConfig::default();
        config.ecosystem.energy_constant = 10.0;
        config.ecosystem.food_spawn_rate = 0.1;
        config.ecosystem.food_spawn_interval = 5;
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut habitat = Habitat::new(10, 10, BoundaryMode::Wrap, 1000.0);

        let mut counters = TickCounters::default();
        let mut ctx = SystemContext::new(&config, 4, &mut rng, &mut counters);
        assert_eq!(food_spawn_system(&mut habitat, &mut ctx), 0);

        ctx.tick = 5;
        assert_eq!(food_spawn_system(&mut habitat, &mut ctx), 10);
        assert_eq!(habitat.environment_energy, 900.0);
        assert_eq!(habitat.food.len(), 10);
        assert!(habitat.food.values().all(|f| f.born_tick == 5));
    }

    #[test]
    fn test_spawn_stops_when_pool_runs_dry() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut habitat = Habitat::new(10, 10, BoundaryMode::Wrap, 25.0);
        assert_eq!(scatter_food(&mut habitat, 5, 10.0, 9, 0, &mut rng), 2);
        assert_eq!(habitat.environment_energy, 5.0);
    }

    #[test]
    fn test_spawn_only_on_empty_cells() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut habitat = Habitat::new(3, 3, BoundaryMode::Wrap, 1000.0);
        for x in 0..3 {
            habitat.grid.set(Coord::new(x, 0), OBSTACLE);
        }
        assert_eq!(scatter_food(&mut habitat, 20, 1.0, 9, 0, &mut rng), 6);
        assert_eq!(habitat.grid.count(OBSTACLE), 3);
        assert!(habitat.grid.empty_cells().is_empty());
    }

    #[test]
    fn test_decay_skips_birth_tick_and_refunds() {
        let mut config = AppConfig::default();
        config.ecosystem.energy_constant = 40.0;
        config.ecosystem.food_decay_return_ratio = 0.5;
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut counters = TickCounters::default();
        let mut habitat = Habitat::new(5, 5, BoundaryMode::Wrap, 0.0);
        let c = Coord::new(2, 2);
        habitat.make_food(c, 2, 1);

        let mut ctx = SystemContext::new(&config, 1, &mut rng, &mut counters);
        assert_eq!(food_decay_system(&mut habitat, &mut ctx), 0);
        assert_eq!(habitat.food[&c].ttl, 2);
        ctx.tick = 2;
        assert_eq!(food_decay_system(&mut habitat, &mut ctx), 0);
        assert_eq!(habitat.food[&c].ttl, 1);
        ctx.tick = 3;
        assert_eq!(food_decay_system(&mut habitat, &mut ctx), 1);
        assert!(habitat.grid.is_empty(c));
        assert!(habitat.food.is_empty());
        assert_eq!(habitat.environment_energy, 20.0);
    }
}
