pub mod macros;

use pixelgenesis_lib::model::systems::connectivity::reachable_from;
use pixelgenesis_lib::model::{
    AppConfig, BoundaryMode, Coord, Genome, Organism, OrganismId, World, FOOD, OBSTACLE,
};

type WorldMod = Box<dyn FnOnce(&mut World)>;

/// Fluent construction of small, quiet test worlds: no terrain, no random
/// population, no initial food and an empty environment pool unless asked.
#[allow(dead_code)]
pub struct WorldBuilder {
    config: AppConfig,
    organisms: Vec<Organism>,
    mods: Vec<WorldMod>,
}

#[allow(dead_code)]
impl WorldBuilder {
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.world.width = 10;
        config.world.height = 10;
        config.world.seed = Some(7);
        config.world.initial_population = 0;
        config.world.initial_food = 0;
        config.terrain.enabled = false;
        config.ecosystem.initial_environment_energy = 0.0;
        Self {
            config,
            organisms: Vec::new(),
            mods: Vec::new(),
        }
    }

    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.config.world.width = width;
        self.config.world.height = height;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.world.seed = Some(seed);
        self
    }

    pub fn with_boundary(mut self, boundary: BoundaryMode) -> Self {
        self.config.world.boundary = boundary;
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        modifier(&mut self.config);
        self
    }

    /// Adopted in insertion order, so the first organism gets id 1.
    pub fn with_organism(mut self, organism: Organism) -> Self {
        self.organisms.push(organism);
        self
    }

    pub fn with_obstacle(mut self, x: i32, y: i32) -> Self {
        self.mods.push(Box::new(move |world| {
            world.set_obstacle(x, y, true);
        }));
        self
    }

    pub fn with_food(mut self, x: i32, y: i32) -> Self {
        self.mods.push(Box::new(move |world| {
            world.place_food(x, y);
        }));
        self
    }

    pub fn build(self) -> (World, Vec<OrganismId>) {
        let mut world = World::new(self.config).expect("test config must be valid");
        let ids = self
            .organisms
            .into_iter()
            .map(|org| {
                world
                    .adopt_organism(org)
                    .expect("test organism must fit on the grid")
            })
            .collect();
        for m in self.mods {
            m(&mut world);
        }
        (world, ids)
    }
}

/// An organism owning `cells`, the first of which is its eye. It never
/// moves unless the test raises `move_speed`.
#[allow(dead_code)]
pub fn still_organism(genome: Genome, cells: &[(i32, i32)], energy: f64) -> Organism {
    let mut org = Organism::new(Coord::from(cells[0]), genome, energy);
    for &c in cells {
        org.pixels.insert(Coord::from(c));
    }
    org.move_speed = 0;
    org
}

/// Checks every structural invariant of the world. Returns the first
/// violation found.
#[allow(dead_code)]
pub fn check_invariants(world: &World) -> Result<(), String> {
    let grid = world.grid();
    for (idx, &code) in world.cells().iter().enumerate() {
        let at = grid.coord_of(idx);
        if code > 0 {
            let owner = world
                .organism(code as OrganismId)
                .ok_or_else(|| format!("orphan code {code} at {at}"))?;
            if !owner.pixels.contains(&at) {
                return Err(format!("organism {code} does not list {at}"));
            }
        } else if code == FOOD && !world.food().contains_key(&at) {
            return Err(format!("unregistered food at {at}"));
        } else if code != FOOD && code != OBSTACLE && code != 0 {
            return Err(format!("unknown code {code} at {at}"));
        }
    }
    for at in world.food().keys() {
        if grid.code(*at) != FOOD {
            return Err(format!("stale food entry at {at}"));
        }
    }
    for (&id, org) in world.organisms() {
        if !org.pixels.contains(&org.eye) {
            return Err(format!("organism {id} lost its eye"));
        }
        for p in &org.pixels {
            if grid.code(*p) != id as i32 {
                return Err(format!("organism {id} lists {p} owned by {}", grid.code(*p)));
            }
        }
        let reached = reachable_from(world.habitat(), org.eye, &org.pixels);
        if reached.len() != org.pixels.len() {
            return Err(format!("organism {id} is not connected"));
        }
        let total = org.genome.total_cells();
        if org.pixels.len() > total || org.growth_stage as usize > total - 1 {
            return Err(format!("organism {id} exceeds its genome"));
        }
    }
    Ok(())
}
