use super::SystemContext;
use crate::genome::ring_offsets;
use crate::habitat::Habitat;
use pixelgenesis_data::{Coord, OrganismId};
use rand::Rng;

/// First unrealised genome cell, scanning rings outwards and clockwise,
/// whose world cell is empty and touches the organism.
pub fn next_growth_site(habitat: &Habitat, id: OrganismId) -> Option<Coord> {
    let org = habitat.organisms.get(&id)?;
    let grid = &habitat.grid;
    let code = id as i32;
    for d in 1..=org.genome.radius() {
        for (dx, dy) in ring_offsets(d) {
            if !org.genome.at(dx, dy) {
                continue;
            }
            let Some(c) = grid.offset(org.eye, dx, dy) else {
                continue;
            };
            if grid.code(c) == code || !grid.is_empty(c) {
                continue;
            }
            if grid.neighbors(c).any(|n| grid.code(n) == code) {
                return Some(c);
            }
        }
    }
    None
}

/// Places at most one new cell for `id`. Returns whether it grew.
pub fn grow<R: Rng>(habitat: &mut Habitat, id: OrganismId, ctx: &mut SystemContext<R>) -> bool {
    let cost = ctx.config.metabolism.growth_cost;
    let Some(org) = habitat.organisms.get(&id) else {
        return false;
    };
    if org.is_fully_grown() || org.energy < cost {
        return false;
    }
    let Some(site) = next_growth_site(habitat, id) else {
        return false;
    };
    let Some(org) = habitat.organisms.get_mut(&id) else {
        return false;
    };
    habitat
        .grid
        .put(site, id as i32, org.total_cells() as u32);
    org.pixels.insert(site);
    org.growth_stage += 1;
    org.energy -= cost;
    ctx.counters.grew += 1;
    true
}

/// Growth pass over every organism that stood still this tick, in id order.
pub fn growth_system<R: Rng>(habitat: &mut Habitat, ctx: &mut SystemContext<R>) {
    let still: Vec<OrganismId> = habitat
        .organisms
        .iter()
        .filter(|(_, o)| !o.moved)
        .map(|(&id, _)| id)
        .collect();
    for id in still {
        grow(habitat, id, ctx);
    }
}
