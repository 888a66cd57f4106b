use super::genome::Genome;
use super::grid::{Coord, Heading};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Registry key of an organism. Always positive; doubles as its grid code.
pub type OrganismId = u32;

/// A connected cluster of owned grid cells anchored at its eye.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Organism {
    pub id: OrganismId,
    /// Anchor cell and sensory origin. Always a member of `pixels`.
    pub eye: Coord,
    /// Owned cells. Hit-points for each live in the grid.
    pub pixels: BTreeSet<Coord>,
    pub energy: f64,
    /// Cap on cells moved per tick.
    pub move_speed: u32,
    pub view_radius: u32,
    /// Propensity to chase food and risk fights, in `[0, 1]`.
    pub hunger: f64,
    pub heading: Heading,
    pub genome: Genome,
    /// Cells placed beyond the initial eye cell.
    pub growth_stage: u32,
    /// Derived from the genome; equal masks are the same species.
    pub species_mask: u8,
    pub age: u64,
    /// Consecutive ticks spent with a heading but without moving.
    pub stuck_ticks: u32,
    pub stamina: f64,
    /// Set when the organism committed at least one move this tick.
    pub moved: bool,
    pub generation: u32,
    pub parent: Option<OrganismId>,
}

impl Organism {
    /// A one-cell organism at `eye`. Traits default to neutral values and
    /// are expected to be filled in by the engine before placement.
    pub fn new(eye: Coord, genome: Genome, energy: f64) -> Self {
        let mut pixels = BTreeSet::new();
        pixels.insert(eye);
        Self {
            id: 0,
            eye,
            pixels,
            energy,
            move_speed: 1,
            view_radius: 1,
            hunger: 0.5,
            heading: Heading::NONE,
            genome,
            growth_stage: 0,
            species_mask: 0,
            age: 0,
            stuck_ticks: 0,
            stamina: 0.0,
            moved: false,
            generation: 0,
            parent: None,
        }
    }

    /// Current number of owned cells.
    #[inline]
    pub fn size(&self) -> usize {
        self.pixels.len()
    }

    /// Set cells in the genome; the size the organism grows towards.
    #[inline]
    pub fn total_cells(&self) -> usize {
        self.genome.total_cells()
    }

    #[inline]
    pub fn is_fully_grown(&self) -> bool {
        self.growth_stage as usize + 1 >= self.total_cells()
    }
}
