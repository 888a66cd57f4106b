use crate::config::AppConfig;
use crate::genome::GenomeLogic;
use pixelgenesis_data::{Coord, Genome, Heading, Organism};
use rand::Rng;

/// Share of the genome that must be realised before reproducing.
pub const MATURITY_FRACTION: f64 = 0.8;
/// Child energy as a share of the reproduction threshold.
pub const CHILD_ENERGY_SHARE: f64 = 0.4;
/// Parent cost as a share of the reproduction threshold.
pub const PARENT_COST_SHARE: f64 = 0.6;

/// A fresh one-cell organism with traits taken from `config`.
///
/// Without a genome a random connected one is drawn; without an energy
/// amount `organism.default_energy` is used. Hunger is uniform in `[0, 1)`.
pub fn create_organism_with_rng<R: Rng>(
    eye: Coord,
    genome: Option<Genome>,
    energy: Option<f64>,
    config: &AppConfig,
    rng: &mut R,
) -> Organism {
    let genome =
        genome.unwrap_or_else(|| Genome::random_with_rng(config.organism.genome_size, rng));
    let energy = energy.unwrap_or(config.organism.default_energy);
    let mut organism = Organism::new(eye, genome, energy);
    organism.move_speed = config.organism.move_speed.max(1);
    organism.view_radius = config.organism.view_radius;
    organism.hunger = rng.gen::<f64>();
    organism.stamina = config.organism.max_stamina;
    organism.species_mask = organism.genome.species_mask();
    organism
}

/// Child of `parent` placed at `eye`: mutated genome, jittered hunger and a
/// move speed nudged by one with probability `mutation_rate`.
pub fn create_offspring_with_rng<R: Rng>(
    parent: &Organism,
    eye: Coord,
    config: &AppConfig,
    rng: &mut R,
) -> Organism {
    let evo = &config.evolution;
    let genome = parent.genome.mutate_with_rng(evo.mutation_rate, rng);
    let energy = config.metabolism.reproduction_threshold * CHILD_ENERGY_SHARE;

    let mut child = Organism::new(eye, genome, energy);
    child.move_speed = parent.move_speed;
    if rng.gen_bool(evo.mutation_rate.clamp(0.0, 1.0)) {
        child.move_speed = if rng.gen_bool(0.5) {
            parent.move_speed + 1
        } else {
            parent.move_speed.saturating_sub(1)
        }
        .max(1);
    }
    let jitter = if evo.hunger_jitter > 0.0 {
        rng.gen_range(-evo.hunger_jitter..=evo.hunger_jitter)
    } else {
        0.0
    };
    child.hunger = (parent.hunger + jitter).clamp(0.0, 1.0);
    child.view_radius = parent.view_radius;
    child.heading = Heading::NONE;
    child.stamina = config.organism.max_stamina;
    child.species_mask = child.genome.species_mask();
    child.generation = parent.generation + 1;
    child.parent = Some(parent.id);
    child
}

/// Whether the organism has enough energy and body to attempt offspring.
pub fn is_mature(organism: &Organism, config: &AppConfig) -> bool {
    organism.energy >= config.metabolism.reproduction_threshold
        && organism.size() as f64 >= MATURITY_FRACTION * organism.total_cells() as f64
}
