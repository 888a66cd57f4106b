use crate::genome::GenomeLogic;
use crate::lifecycle;
use crate::snapshot::{FoodSnapshot, WorldSnapshot};
use crate::systems::connectivity::enforce_connectivity;
use crate::systems::stats::{population_stats, StatsContext};
use crate::world::World;
use pixelgenesis_data::{
    Cell, Coord, Genome, Organism, OrganismId, PopulationStats, OBSTACLE,
};

impl World {
    /// Places a one-cell organism with its eye at `(x, y)`.
    ///
    /// Rejected unless the cell and its eight neighbours are on the grid and
    /// empty. Missing genome and energy fall back to a random genome and
    /// `organism.default_energy`.
    pub fn create_organism(
        &mut self,
        x: i32,
        y: i32,
        genome: Option<Genome>,
        energy: Option<f64>,
    ) -> Option<&Organism> {
        let eye = Coord::new(x, y);
        if !self.habitat.grid.site_is_clear(eye) {
            return None;
        }
        let organism =
            lifecycle::create_organism_with_rng(eye, genome, energy, &self.config, &mut self.rng);
        let hp = organism.total_cells() as u32;
        let id = self.habitat.spawn(organism, hp);
        tracing::debug!(id, x, y, "Organism created");
        self.habitat.organisms.get(&id)
    }

    /// Registers a pre-built organism as is, pixels included.
    ///
    /// Every pixel must be on the grid and empty and the eye must be one of
    /// them. Hit-points are seeded to the genome's cell count and the
    /// species mask is recomputed. Pixels not connected to the eye are
    /// dropped as food straight away.
    pub fn adopt_organism(&mut self, mut organism: Organism) -> Option<OrganismId> {
        let grid = &self.habitat.grid;
        if organism.pixels.is_empty() || !organism.pixels.contains(&organism.eye) {
            return None;
        }
        let fits = organism
            .pixels
            .iter()
            .all(|p| grid.in_bounds(p.x, p.y) && grid.is_empty(*p));
        if !fits {
            return None;
        }

        organism.species_mask = organism.genome.species_mask();
        let total = organism.total_cells();
        organism.growth_stage =
            (organism.size().saturating_sub(1)).min(total.saturating_sub(1)) as u32;
        organism.moved = false;
        let id = self.habitat.spawn(organism, total as u32);
        enforce_connectivity(
            &mut self.habitat,
            id,
            self.config.ecosystem.food_decay_ticks,
            self.tick,
        );
        self.habitat.organisms.contains_key(&id).then_some(id)
    }

    /// Adds or removes a wall at `(x, y)`.
    ///
    /// Placing evicts whatever is there: food is dropped, an organism loses
    /// the cell and has its connectivity re-checked. Removing only clears a
    /// cell that actually holds an obstacle.
    pub fn set_obstacle(&mut self, x: i32, y: i32, blocked: bool) -> bool {
        let grid = &self.habitat.grid;
        if !grid.in_bounds(x, y) {
            return false;
        }
        let c = Coord::new(x, y);
        let cell = grid.cell(c);

        if !blocked {
            if cell != Cell::Obstacle {
                return false;
            }
            self.habitat.grid.clear(c);
            return true;
        }

        match cell {
            Cell::Obstacle => return true,
            Cell::Food => {
                self.habitat.food.remove(&c);
            }
            Cell::Organism(id) => {
                if let Some(org) = self.habitat.organisms.get_mut(&id) {
                    org.pixels.remove(&c);
                }
            }
            Cell::Empty => {}
        }
        self.habitat.grid.put(c, OBSTACLE, 0);

        if let Cell::Organism(id) = cell {
            let ttl = self.config.ecosystem.food_decay_ticks;
            enforce_connectivity(&mut self.habitat, id, ttl, self.tick);
        }
        true
    }

    /// Drops a single food pixel on an empty cell.
    pub fn place_food(&mut self, x: i32, y: i32) -> bool {
        let c = Coord::new(x, y);
        if !self.habitat.grid.in_bounds(x, y) || !self.habitat.grid.is_empty(c) {
            return false;
        }
        let ttl = self.config.ecosystem.food_decay_ticks;
        self.habitat.make_food(c, ttl, self.tick);
        true
    }

    pub fn stats(&self) -> PopulationStats {
        population_stats(StatsContext {
            habitat: &self.habitat,
            tick: self.tick,
            counters: self.counters,
        })
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            tick: self.tick,
            width: self.width,
            height: self.height,
            boundary: self.habitat.grid.boundary,
            cells: self.habitat.grid.cells().to_vec(),
            hit_points: self.habitat.grid.hit_point_cells().to_vec(),
            organisms: self.habitat.organisms.values().cloned().collect(),
            food: self
                .habitat
                .food
                .iter()
                .map(|(&at, f)| FoodSnapshot::new(at, f))
                .collect(),
            environment_energy: self.habitat.environment_energy,
            counters: self.counters,
        }
    }
}
