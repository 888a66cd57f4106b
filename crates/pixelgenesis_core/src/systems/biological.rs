use super::SystemContext;
use crate::habitat::Habitat;
use crate::lifecycle::{self, PARENT_COST_SHARE};
use pixelgenesis_data::{Coord, OrganismId};
use rand::seq::SliceRandom;
use rand::Rng;

/// Radii searched for an offspring site.
pub const SPAWN_RADII: std::ops::RangeInclusive<i32> = 3..=6;

/// Charges upkeep for every organism and destroys those left without energy.
pub fn metabolism_system<R: Rng>(habitat: &mut Habitat, ctx: &mut SystemContext<R>) {
    let rate = ctx.config.metabolism.metabolism_cost;
    let mut starved = Vec::new();
    for (&id, org) in habitat.organisms.iter_mut() {
        org.energy -= org.size() as f64 * rate;
        org.age += 1;
        if org.energy <= 0.0 {
            starved.push(id);
        }
    }
    let ttl = ctx.food_ttl();
    for id in starved {
        habitat.destroy_organism(id, ttl, ctx.tick);
    }
}

/// Offsets at radii 3..=6 in 45 degree steps, rounded to the grid.
pub fn spawn_offsets() -> Vec<(i32, i32)> {
    let mut out = Vec::with_capacity(32);
    for r in SPAWN_RADII {
        for k in 0..8 {
            let angle = (k as f64) * std::f64::consts::FRAC_PI_4;
            let dx = (r as f64 * angle.cos()).round() as i32;
            let dy = (r as f64 * angle.sin()).round() as i32;
            out.push((dx, dy));
        }
    }
    out
}

/// Tries to place one child of `parent`. Returns the child's id.
pub fn reproduce<R: Rng>(
    habitat: &mut Habitat,
    parent: OrganismId,
    ctx: &mut SystemContext<R>,
) -> Option<OrganismId> {
    let org = habitat.organisms.get(&parent)?;
    let eye = org.eye;

    let mut offsets = spawn_offsets();
    offsets.shuffle(ctx.rng);
    let site: Coord = offsets.into_iter().find_map(|(dx, dy)| {
        habitat
            .grid
            .offset(eye, dx, dy)
            .filter(|&c| habitat.grid.site_is_clear(c))
    })?;

    let child = lifecycle::create_offspring_with_rng(org, site, ctx.config, ctx.rng);
    let hp = child.total_cells() as u32;
    let generation = child.generation;
    if let Some(p) = habitat.organisms.get_mut(&parent) {
        p.energy -= ctx.config.metabolism.reproduction_threshold * PARENT_COST_SHARE;
    }
    let id = habitat.spawn(child, hp);
    tracing::debug!(parent, child = id, generation, "Organism born");
    Some(id)
}

/// Gives each mature organism alive at the start of the pass one chance to
/// reproduce.
pub fn reproduction_system<R: Rng>(habitat: &mut Habitat, ctx: &mut SystemContext<R>) {
    let chance = ctx.config.evolution.reproduction_chance.clamp(0.0, 1.0);
    let parents: Vec<OrganismId> = habitat
        .organisms
        .iter()
        .filter(|(_, o)| lifecycle::is_mature(o, ctx.config))
        .map(|(&id, _)| id)
        .collect();
    for id in parents {
        if ctx.rng.gen_bool(chance) {
            reproduce(habitat, id, ctx);
        }
    }
}
