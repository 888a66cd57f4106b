use crate::habitat::Habitat;
use crate::systems::connectivity::{enforce_connectivity, Connectivity};
use crate::world::World;
use pixelgenesis_data::{Coord, Food, OrganismId, FOOD};
use std::collections::{BTreeMap, BTreeSet};

/// What the end-of-tick pass had to repair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Cells owned by unknown organism ids, now food.
    pub orphans: usize,
    /// Food registry entries whose cell no longer holds food.
    pub stale_food: usize,
    /// Food cells that were missing from the registry.
    pub unregistered_food: usize,
    /// Organisms destroyed while restoring connectivity.
    pub destroyed: usize,
}

impl World {
    /// Re-derives organism pixels and the food registry from the grid and
    /// restores connectivity. Runs at the end of every step; call it
    /// directly after editing raw state through
    /// [`habitat_mut`](World::habitat_mut).
    pub fn reconcile(&mut self) -> Reconciliation {
        let ttl = self.config.ecosystem.food_decay_ticks;
        reconcile_habitat(&mut self.habitat, ttl, self.tick)
    }
}

pub(crate) fn reconcile_habitat(habitat: &mut Habitat, ttl: u32, tick: u64) -> Reconciliation {
    let mut report = Reconciliation::default();

    let mut rebuilt: BTreeMap<OrganismId, BTreeSet<Coord>> = habitat
        .organisms
        .keys()
        .map(|&id| (id, BTreeSet::new()))
        .collect();
    let mut orphans = Vec::new();
    let mut food_cells = Vec::new();
    for (idx, &code) in habitat.grid.cells().iter().enumerate() {
        let c = habitat.grid.coord_of(idx);
        if code == FOOD {
            food_cells.push(c);
        } else if code > 0 {
            match rebuilt.get_mut(&(code as OrganismId)) {
                Some(pixels) => {
                    pixels.insert(c);
                }
                None => orphans.push(c),
            }
        }
    }

    for (id, pixels) in rebuilt {
        if let Some(org) = habitat.organisms.get_mut(&id) {
            org.pixels = pixels;
        }
    }

    let grid = &habitat.grid;
    let before = habitat.food.len();
    habitat.food.retain(|c, _| grid.code(*c) == FOOD);
    report.stale_food = before - habitat.food.len();
    for c in food_cells {
        if !habitat.food.contains_key(&c) {
            habitat.food.insert(c, Food::new(ttl, tick));
            report.unregistered_food += 1;
        }
    }

    report.orphans = orphans.len();
    for c in orphans {
        habitat.make_food(c, ttl, tick);
    }

    let ids: Vec<OrganismId> = habitat.organisms.keys().copied().collect();
    for id in ids {
        if enforce_connectivity(habitat, id, ttl, tick) == Connectivity::Destroyed {
            report.destroyed += 1;
        }
    }
    for org in habitat.organisms.values_mut() {
        let cap = org.size().min(org.total_cells()).saturating_sub(1) as u32;
        org.growth_stage = org.growth_stage.min(cap);
    }

    if report != Reconciliation::default() {
        tracing::trace!(?report, tick, "Reconciled grid and registries");
    }
    report
}
