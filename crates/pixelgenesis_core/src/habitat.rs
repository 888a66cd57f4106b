//! Mutable simulation state shared by every system within a tick.

use crate::grid::Grid;
use pixelgenesis_data::{BoundaryMode, Coord, Food, Organism, OrganismId, FOOD, OBSTACLE};
use std::collections::BTreeMap;

/// The grid, the registries keyed off it and the environment energy pool.
///
/// The grid is canonical. Systems keep `Organism::pixels` and the food
/// registry in step with it as they go; reconciliation repairs any drift at
/// the end of the tick.
#[derive(Clone, Debug)]
pub struct Habitat {
    pub grid: Grid,
    pub organisms: BTreeMap<OrganismId, Organism>,
    pub food: BTreeMap<Coord, Food>,
    pub environment_energy: f64,
    next_id: OrganismId,
}

impl Habitat {
    pub fn new(width: u16, height: u16, boundary: BoundaryMode, environment_energy: f64) -> Self {
        Self {
            grid: Grid::new(width, height, boundary),
            organisms: BTreeMap::new(),
            food: BTreeMap::new(),
            environment_energy,
            next_id: 1,
        }
    }

    /// Registers `organism` under a fresh id and writes its pixels into the
    /// grid with `hit_points` each. Callers check that the cells are free.
    pub fn spawn(&mut self, mut organism: Organism, hit_points: u32) -> OrganismId {
        let id = self.next_id;
        self.next_id += 1;
        organism.id = id;
        for &p in &organism.pixels {
            self.grid.put(p, id as i32, hit_points);
        }
        self.organisms.insert(id, organism);
        id
    }

    /// Turns `c` into a food pixel with one hit-point.
    pub fn make_food(&mut self, c: Coord, ttl: u32, tick: u64) {
        self.grid.put(c, FOOD, 1);
        self.food.insert(c, Food::new(ttl, tick));
    }

    /// Removes `id` from the registry; every cell it still holds becomes food.
    pub fn destroy_organism(&mut self, id: OrganismId, ttl: u32, tick: u64) {
        let Some(organism) = self.organisms.remove(&id) else {
            return;
        };
        let mut dropped = 0;
        for &p in &organism.pixels {
            if self.grid.code(p) == id as i32 {
                self.make_food(p, ttl, tick);
                dropped += 1;
            }
        }
        tracing::debug!(
            id,
            age = organism.age,
            energy = organism.energy,
            food = dropped,
            "Organism destroyed"
        );
    }

    /// Credits `actor` with its share of a completed kill or absorption and
    /// returns the rest to the pool.
    pub fn transfer_energy(&mut self, actor: OrganismId, constant: f64, ratio: f64) {
        if let Some(org) = self.organisms.get_mut(&actor) {
            org.energy += constant * ratio;
        }
        self.environment_energy += constant * (1.0 - ratio);
    }

    pub fn obstacle_count(&self) -> usize {
        self.grid.count(OBSTACLE)
    }
}
