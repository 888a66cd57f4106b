//! Contact combat and food absorption.

use super::connectivity::enforce_connectivity;
use super::SystemContext;
use crate::habitat::Habitat;
use pixelgenesis_data::{Cell, Coord, OrganismId};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeSet;

/// What a single hit or bite achieved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strike {
    /// The fee could not be paid; nothing happened.
    Skipped,
    /// Hit-points dropped but the cell survives.
    Wounded,
    /// The cell was taken; energy was transferred.
    Consumed,
    /// The victim's eye was taken and the victim destroyed.
    Killed,
}

/// Pays `fee` from `id` if its energy stays positive afterwards.
fn pay_fee(habitat: &mut Habitat, id: OrganismId, fee: f64) -> bool {
    match habitat.organisms.get_mut(&id) {
        Some(org) if org.energy - fee > 0.0 => {
            org.energy -= fee;
            true
        }
        _ => false,
    }
}

/// Foreign cells in contact with `id` that it may attack this tick.
///
/// Strictly smaller enemies are always attackable; equal-sized ones pass a
/// roll of `hunger * equal_size_attack_factor`, made once per cell.
pub fn attack_candidates<R: Rng>(
    habitat: &Habitat,
    id: OrganismId,
    ctx: &mut SystemContext<R>,
) -> Vec<Coord> {
    let Some(org) = habitat.organisms.get(&id) else {
        return Vec::new();
    };
    let grid = &habitat.grid;
    let own_size = org.size();
    let factor = ctx.config.evolution.equal_size_attack_factor;
    let equal_chance = (org.hunger * factor).clamp(0.0, 1.0);

    let contacts: BTreeSet<Coord> = org
        .pixels
        .iter()
        .flat_map(|&p| grid.neighbors(p))
        .filter(|&n| matches!(grid.cell(n), Cell::Organism(other) if other != id))
        .collect();

    let mut out = Vec::new();
    for c in contacts {
        let Cell::Organism(other) = grid.cell(c) else {
            continue;
        };
        let Some(enemy) = habitat.organisms.get(&other) else {
            continue;
        };
        if enemy.species_mask == org.species_mask {
            continue;
        }
        let enemy_size = enemy.size();
        if own_size > enemy_size || (own_size == enemy_size && ctx.rng.gen_bool(equal_chance)) {
            out.push(c);
        }
    }
    out
}

/// `attacker` hits the organism cell at `target` once.
pub fn strike<R: Rng>(
    habitat: &mut Habitat,
    attacker: OrganismId,
    target: Coord,
    ctx: &mut SystemContext<R>,
) -> Strike {
    let Cell::Organism(victim) = habitat.grid.cell(target) else {
        return Strike::Skipped;
    };
    if !pay_fee(habitat, attacker, ctx.config.metabolism.attack_cost) {
        return Strike::Skipped;
    }
    ctx.counters.attacked += 1;

    let hp = habitat.grid.hit_points(target).saturating_sub(1);
    habitat.grid.set_hit_points(target, hp);
    if hp > 0 {
        return Strike::Wounded;
    }

    let eco = &ctx.config.ecosystem;
    habitat.transfer_energy(attacker, eco.energy_constant, eco.transfer_ratio);
    let ttl = ctx.food_ttl();

    let is_eye = habitat
        .organisms
        .get(&victim)
        .is_some_and(|v| v.eye == target);
    if is_eye {
        habitat.destroy_organism(victim, ttl, ctx.tick);
        tracing::debug!(attacker, victim, "Organism killed");
        return Strike::Killed;
    }

    habitat.grid.clear(target);
    if let Some(v) = habitat.organisms.get_mut(&victim) {
        v.pixels.remove(&target);
    }
    enforce_connectivity(habitat, victim, ttl, ctx.tick);
    Strike::Consumed
}

/// One random attack per organism, in id order.
pub fn combat_system<R: Rng>(habitat: &mut Habitat, ctx: &mut SystemContext<R>) {
    let ids: Vec<OrganismId> = habitat.organisms.keys().copied().collect();
    for id in ids {
        if !habitat.organisms.contains_key(&id) {
            continue;
        }
        let candidates = attack_candidates(habitat, id, ctx);
        let Some(&target) = candidates.choose(ctx.rng) else {
            continue;
        };
        strike(habitat, id, target, ctx);
    }
}

/// First food cell touching `id`, scanning its pixels in order and each
/// pixel's neighbours clockwise from north.
pub fn adjacent_food(habitat: &Habitat, id: OrganismId) -> Option<Coord> {
    let org = habitat.organisms.get(&id)?;
    let grid = &habitat.grid;
    org.pixels
        .iter()
        .flat_map(|&p| grid.neighbors(p))
        .find(|&n| grid.cell(n) == Cell::Food)
}

/// `id` bites the food cell at `target` once.
pub fn absorb<R: Rng>(
    habitat: &mut Habitat,
    id: OrganismId,
    target: Coord,
    ctx: &mut SystemContext<R>,
) -> Strike {
    if habitat.grid.cell(target) != Cell::Food {
        return Strike::Skipped;
    }
    if !pay_fee(habitat, id, ctx.config.metabolism.absorb_cost) {
        return Strike::Skipped;
    }
    let hp = habitat.grid.hit_points(target).saturating_sub(1);
    habitat.grid.set_hit_points(target, hp);
    if hp > 0 {
        return Strike::Wounded;
    }
    habitat.grid.clear(target);
    habitat.food.remove(&target);
    let eco = &ctx.config.ecosystem;
    habitat.transfer_energy(id, eco.energy_constant, eco.transfer_ratio);
    Strike::Consumed
}

/// At most one absorption per organism, in id order.
pub fn feeding_system<R: Rng>(habitat: &mut Habitat, ctx: &mut SystemContext<R>) {
    let ids: Vec<OrganismId> = habitat.organisms.keys().copied().collect();
    for id in ids {
        if let Some(target) = adjacent_food(habitat, id) {
            absorb(habitat, id, target, ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use pixelgenesis_data::{BoundaryMode, Genome, Organism, TickCounters, FOOD};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn add(habitat: &mut Habitat, cells: &[(i32, i32)], mask: u8, hp: u32) -> OrganismId {
        let mut org = Organism::new(Coord::from(cells[0]), Genome::single_cell(7), 100.0);
        for &c in cells {
            org.pixels.insert(Coord::from(c));
        }
        org.species_mask = mask;
        habitat.spawn(org, hp)
    }

    #[test]
    fn test_larger_enemy_wounds_then_kills() {
        let config = AppConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut counters = TickCounters::default();
        let mut ctx = SystemContext::new(&config, 3, &mut rng, &mut counters);
        let mut habitat = Habitat::new(10, 10, BoundaryMode::Wrap, 0.0);
        let big = add(&mut habitat, &[(3, 5), (4, 5), (2, 5)], 1, 3);
        let small = add(&mut habitat, &[(5, 5)], 2, 2);

        assert_eq!(
            attack_candidates(&habitat, big, &mut ctx),
            vec![Coord::new(5, 5)]
        );
        assert!(attack_candidates(&habitat, small, &mut ctx).is_empty());

        let target = Coord::new(5, 5);
        assert_eq!(strike(&mut habitat, big, target, &mut ctx), Strike::Wounded);
        assert_eq!(habitat.grid.hit_points(target), 1);
        assert_eq!(strike(&mut habitat, big, target, &mut ctx), Strike::Killed);
        assert!(!habitat.organisms.contains_key(&small));
        assert_eq!(habitat.grid.code(target), FOOD);
        assert_eq!(habitat.food[&target].ttl, config.ecosystem.food_decay_ticks);

        let eco = &config.ecosystem;
        let fees = 2.0 * config.metabolism.attack_cost;
        let gain = eco.energy_constant * eco.transfer_ratio;
        assert!((habitat.organisms[&big].energy - (100.0 - fees + gain)).abs() < 1e-9);
        assert!(
            (habitat.environment_energy - eco.energy_constant * (1.0 - eco.transfer_ratio)).abs()
                < 1e-9
        );
        assert_eq!(counters.attacked, 2);
    }

    #[test]
    fn test_losing_non_eye_cell_severs_fragment() {
        let config = AppConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut counters = TickCounters::default();
        let mut ctx = SystemContext::new(&config, 1, &mut rng, &mut counters);
        let mut habitat = Habitat::new(12, 12, BoundaryMode::Closed, 0.0);
        let attacker = add(&mut habitat, &[(1, 1)], 1, 5);
        let victim = add(&mut habitat, &[(4, 2), (3, 2), (2, 2)], 2, 1);

        assert_eq!(
            strike(&mut habitat, attacker, Coord::new(3, 2), &mut ctx),
            Strike::Consumed
        );
        let v = &habitat.organisms[&victim];
        assert_eq!(v.pixels, BTreeSet::from([Coord::new(4, 2)]));
        assert!(habitat.grid.is_empty(Coord::new(3, 2)));
        assert_eq!(habitat.grid.code(Coord::new(2, 2)), FOOD);
    }

    #[test]
    fn test_same_species_and_unaffordable_attacks_are_skipped() {
        let config = AppConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut counters = TickCounters::default();
        let mut ctx = SystemContext::new(&config, 1, &mut rng, &mut counters);
        let mut habitat = Habitat::new(10, 10, BoundaryMode::Wrap, 0.0);
        let a = add(&mut habitat, &[(3, 3), (2, 3)], 4, 1);
        add(&mut habitat, &[(4, 3)], 4, 1);
        assert!(attack_candidates(&habitat, a, &mut ctx).is_empty());

        let b = add(&mut habitat, &[(7, 7), (6, 7)], 1, 1);
        let c = add(&mut habitat, &[(8, 7)], 2, 1);
        habitat.organisms.get_mut(&b).unwrap().energy = config.metabolism.attack_cost;
        assert_eq!(
            strike(&mut habitat, b, Coord::new(8, 7), &mut ctx),
            Strike::Skipped
        );
        assert!(habitat.organisms.contains_key(&c));
        assert_eq!(counters.attacked, 0);
    }

    #[test]
    fn test_equal_size_roll_uses_hunger() {
        let config = AppConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut counters = TickCounters::default();
        let mut ctx = SystemContext::new(&config, 1, &mut rng, &mut counters);
        let mut habitat = Habitat::new(10, 10, BoundaryMode::Wrap, 0.0);
        let a = add(&mut habitat, &[(3, 3)], 1, 1);
        add(&mut habitat, &[(4, 3)], 2, 1);

        habitat.organisms.get_mut(&a).unwrap().hunger = 0.0;
        assert!(attack_candidates(&habitat, a, &mut ctx).is_empty());
    }

    #[test]
    fn test_feeding_consumes_adjacent_food() {
        let config = AppConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut counters = TickCounters::default();
        let mut ctx = SystemContext::new(&config, 1, &mut rng, &mut counters);
        let mut habitat = Habitat::new(10, 10, BoundaryMode::Wrap, 0.0);
        let id = add(&mut habitat, &[(5, 5)], 1, 1);
        habitat.make_food(Coord::new(5, 4), 50, 0);
        habitat.make_food(Coord::new(6, 5), 50, 0);

        assert_eq!(adjacent_food(&habitat, id), Some(Coord::new(5, 4)));
        feeding_system(&mut habitat, &mut ctx);
        assert!(habitat.grid.is_empty(Coord::new(5, 4)));
        assert!(!habitat.food.contains_key(&Coord::new(5, 4)));
        assert!(habitat.food.contains_key(&Coord::new(6, 5)));

        let eco = &config.ecosystem;
        let expected =
            100.0 - config.metabolism.absorb_cost + eco.energy_constant * eco.transfer_ratio;
        assert!((habitat.organisms[&id].energy - expected).abs() < 1e-9);
    }
}
