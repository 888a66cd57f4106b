//! Directional raycasts from the eye and the heading heuristic built on them.

use crate::config::AppConfig;
use crate::grid::Grid;
use pixelgenesis_data::{Cell, Heading, Organism, OrganismId};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;

/// Below this share of the reproduction threshold, visible food wins.
pub const LOW_ENERGY_FRACTION: f64 = 0.3;
/// Hunger above which an organism without targets keeps wandering.
pub const WANDER_HUNGER: f64 = 0.2;
pub const TURN_CHANCE: f64 = 0.1;
/// Consecutive stuck ticks that force a new random heading.
pub const STUCK_LIMIT: u32 = 5;
pub const HOLD_CHANCE: f64 = 0.3;

/// First occupant met along one ray.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sighting {
    pub heading: Heading,
    pub distance: u32,
    /// Organism seen, or `None` for food.
    pub organism: Option<OrganismId>,
    /// Pixel count of the organism seen.
    pub size: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Perception {
    pub organism: Option<Sighting>,
    pub food: Option<Sighting>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Target {
    Organism,
    Food,
}

fn cast(
    grid: &Grid,
    organisms: &BTreeMap<OrganismId, Organism>,
    caster: &Organism,
    heading: Heading,
    target: Target,
) -> Option<Sighting> {
    let mut cur = caster.eye;
    for distance in 1..=caster.view_radius {
        cur = grid.step(cur, heading)?;
        match grid.cell(cur) {
            Cell::Obstacle => return None,
            Cell::Organism(id) if id == caster.id => {}
            Cell::Organism(id) => {
                return (target == Target::Organism).then(|| Sighting {
                    heading,
                    distance,
                    organism: Some(id),
                    size: organisms.get(&id).map_or(0, Organism::size),
                });
            }
            Cell::Food if target == Target::Food => {
                return Some(Sighting {
                    heading,
                    distance,
                    organism: None,
                    size: 0,
                });
            }
            Cell::Food | Cell::Empty => {}
        }
    }
    None
}

fn nearest(
    grid: &Grid,
    organisms: &BTreeMap<OrganismId, Organism>,
    caster: &Organism,
    target: Target,
) -> Option<Sighting> {
    let mut best: Option<Sighting> = None;
    for heading in Heading::ALL {
        if let Some(hit) = cast(grid, organisms, caster, heading, target) {
            if best.map_or(true, |b| hit.distance < b.distance) {
                best = Some(hit);
            }
        }
    }
    best
}

/// Runs both 8-direction casts for `caster`.
///
/// Rays stop at obstacles, off-grid cells and the first foreign organism
/// cell. The caster's own cells are transparent, and food never blocks the
/// organism cast. Ties go to the earlier direction in [`Heading::ALL`].
pub fn perceive(
    grid: &Grid,
    organisms: &BTreeMap<OrganismId, Organism>,
    caster: &Organism,
) -> Perception {
    Perception {
        organism: nearest(grid, organisms, caster, Target::Organism),
        food: nearest(grid, organisms, caster, Target::Food),
    }
}

/// Picks the heading for this tick from what the organism sees.
pub fn choose_heading<R: Rng>(
    organism: &Organism,
    perception: &Perception,
    config: &AppConfig,
    rng: &mut R,
) -> Heading {
    let hunger = organism.hunger.clamp(0.0, 1.0);
    let low_energy =
        organism.energy < LOW_ENERGY_FRACTION * config.metabolism.reproduction_threshold;

    if let (true, Some(food)) = (low_energy, perception.food) {
        return food.heading;
    }

    if let Some(other) = perception.organism {
        let own = organism.size();
        return if other.size < own {
            other.heading
        } else if other.size > own {
            other.heading.reversed()
        } else if rng.gen_bool(hunger) {
            other.heading
        } else {
            other.heading.reversed()
        };
    }

    if let Some(food) = perception.food {
        if rng.gen_bool(hunger) {
            return food.heading;
        }
    }

    if hunger > WANDER_HUNGER {
        if organism.stuck_ticks >= STUCK_LIMIT || rng.gen_bool(TURN_CHANCE) {
            return Heading::ALL
                .choose(rng)
                .copied()
                .unwrap_or(organism.heading);
        }
        return organism.heading;
    }

    if rng.gen_bool(HOLD_CHANCE) {
        organism.heading
    } else {
        Heading::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixelgenesis_data::{BoundaryMode, Coord, Genome, FOOD, OBSTACLE};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    struct Scene {
        grid: Grid,
        organisms: BTreeMap<OrganismId, Organism>,
    }

    impl Scene {
        fn new(boundary: BoundaryMode) -> Self {
            Self {
                grid: Grid::new(20, 20, boundary),
                organisms: BTreeMap::new(),
            }
        }

        fn add(&mut self, id: OrganismId, cells: &[(i32, i32)]) -> Organism {
            let eye = Coord::from(cells[0]);
            let mut org = Organism::new(eye, Genome::single_cell(7), 100.0);
            org.id = id;
            org.view_radius = 6;
            for &c in cells {
                org.pixels.insert(Coord::from(c));
                self.grid.put(Coord::from(c), id as i32, 1);
            }
            self.organisms.insert(id, org.clone());
            org
        }
    }

    #[test]
    fn test_nearest_organism_and_food() {
        let mut scene = Scene::new(BoundaryMode::Closed);
        let me = scene.add(1, &[(10, 10)]);
        scene.add(2, &[(10, 6), (11, 6)]);
        scene.grid.put(Coord::new(13, 10), FOOD, 1);
        let seen = perceive(&scene.grid, &scene.organisms, &me);
        let other = seen.organism.unwrap();
        assert_eq!(other.heading, Heading::N);
        assert_eq!(other.distance, 4);
        assert_eq!(other.size, 2);
        let food = seen.food.unwrap();
        assert_eq!(food.heading, Heading::E);
        assert_eq!(food.distance, 3);
    }

    #[test]
    fn test_obstacles_and_strangers_block_rays() {
        let mut scene = Scene::new(BoundaryMode::Closed);
        let me = scene.add(1, &[(10, 10)]);
        scene.grid.set(Coord::new(12, 10), OBSTACLE);
        scene.grid.put(Coord::new(14, 10), FOOD, 1);
        scene.add(2, &[(10, 12)]);
        scene.grid.put(Coord::new(10, 14), FOOD, 1);
        let seen = perceive(&scene.grid, &scene.organisms, &me);
        assert!(seen.food.is_none());
        assert_eq!(seen.organism.unwrap().heading, Heading::S);
    }

    #[test]
    fn test_own_cells_are_transparent_and_food_does_not_hide_organisms() {
        let mut scene = Scene::new(BoundaryMode::Closed);
        let me = scene.add(1, &[(10, 10), (11, 10), (12, 10)]);
        scene.grid.put(Coord::new(13, 10), FOOD, 1);
        scene.add(2, &[(15, 10)]);
        let seen = perceive(&scene.grid, &scene.organisms, &me);
        assert_eq!(seen.food.unwrap().distance, 3);
        assert_eq!(seen.organism.unwrap().distance, 5);
    }

    #[test]
    fn test_ties_prefer_earlier_direction() {
        let mut scene = Scene::new(BoundaryMode::Closed);
        let me = scene.add(1, &[(10, 10)]);
        scene.grid.put(Coord::new(8, 10), FOOD, 1);
        scene.grid.put(Coord::new(10, 12), FOOD, 1);
        let seen = perceive(&scene.grid, &scene.organisms, &me);
        assert_eq!(seen.food.unwrap().heading, Heading::S);
    }

    #[test]
    fn test_closed_edge_ends_ray_and_wrap_continues() {
        let mut closed = Scene::new(BoundaryMode::Closed);
        let me = closed.add(1, &[(0, 5)]);
        closed.grid.put(Coord::new(17, 5), FOOD, 1);
        assert!(perceive(&closed.grid, &closed.organisms, &me).food.is_none());

        let mut wrap = Scene::new(BoundaryMode::Wrap);
        let me = wrap.add(1, &[(0, 5)]);
        wrap.grid.put(Coord::new(17, 5), FOOD, 1);
        let food = perceive(&wrap.grid, &wrap.organisms, &me).food.unwrap();
        assert_eq!(food.heading, Heading::W);
        assert_eq!(food.distance, 3);
    }

    fn sighting(heading: Heading, size: usize) -> Sighting {
        Sighting {
            heading,
            distance: 2,
            organism: Some(9),
            size,
        }
    }

    #[test]
    fn test_low_energy_goes_for_food_first() {
        let config = AppConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut org = Organism::new(Coord::new(0, 0), Genome::single_cell(7), 10.0);
        org.hunger = 0.0;
        let perception = Perception {
            organism: Some(sighting(Heading::N, 1)),
            food: Some(Sighting {
                heading: Heading::SE,
                distance: 4,
                organism: None,
                size: 0,
            }),
        };
        assert_eq!(
            choose_heading(&org, &perception, &config, &mut rng),
            Heading::SE
        );
    }

    #[test]
    fn test_size_decides_chase_or_flee() {
        let config = AppConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut org = Organism::new(Coord::new(0, 0), Genome::single_cell(7), 1000.0);
        org.pixels.insert(Coord::new(1, 0));
        let smaller = Perception {
            organism: Some(sighting(Heading::E, 1)),
            food: None,
        };
        let larger = Perception {
            organism: Some(sighting(Heading::E, 3)),
            food: None,
        };
        assert_eq!(choose_heading(&org, &smaller, &config, &mut rng), Heading::E);
        assert_eq!(choose_heading(&org, &larger, &config, &mut rng), Heading::W);

        let equal = Perception {
            organism: Some(sighting(Heading::E, 2)),
            food: None,
        };
        org.hunger = 1.0;
        assert_eq!(choose_heading(&org, &equal, &config, &mut rng), Heading::E);
        org.hunger = 0.0;
        assert_eq!(choose_heading(&org, &equal, &config, &mut rng), Heading::W);
    }

    #[test]
    fn test_idle_rules() {
        let config = AppConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let nothing = Perception::default();
        let mut org = Organism::new(Coord::new(0, 0), Genome::single_cell(7), 1000.0);

        org.hunger = 0.9;
        org.stuck_ticks = STUCK_LIMIT;
        for _ in 0..20 {
            assert!(!choose_heading(&org, &nothing, &config, &mut rng).is_none());
        }

        org.hunger = 0.1;
        org.heading = Heading::NONE;
        for _ in 0..20 {
            assert!(choose_heading(&org, &nothing, &config, &mut rng).is_none());
        }
    }

    #[test]
    fn test_failed_food_roll_falls_through() {
        let config = AppConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut org = Organism::new(Coord::new(0, 0), Genome::single_cell(7), 1000.0);
        org.hunger = 0.0;
        org.heading = Heading::NONE;
        let perception = Perception {
            organism: None,
            food: Some(Sighting {
                heading: Heading::N,
                distance: 1,
                organism: None,
                size: 0,
            }),
        };
        assert!(choose_heading(&org, &perception, &config, &mut rng).is_none());
    }
}
