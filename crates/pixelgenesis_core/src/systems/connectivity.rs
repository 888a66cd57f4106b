use crate::habitat::Habitat;
use pixelgenesis_data::{Coord, OrganismId};
use std::collections::{BTreeSet, VecDeque};

/// Outcome of a connectivity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    /// Every pixel was reachable from the eye.
    Intact,
    /// This many unreachable pixels were dropped as food.
    Severed(usize),
    /// The eye was gone or nothing was left; the organism was destroyed.
    Destroyed,
    /// No such organism.
    Missing,
}

/// Pixels of `pixels` reachable from `eye` through 8-adjacency under the
/// grid's boundary mode.
pub fn reachable_from(habitat: &Habitat, eye: Coord, pixels: &BTreeSet<Coord>) -> BTreeSet<Coord> {
    let mut seen = BTreeSet::new();
    if !pixels.contains(&eye) {
        return seen;
    }
    let mut queue = VecDeque::from([eye]);
    seen.insert(eye);
    while let Some(c) = queue.pop_front() {
        for n in habitat.grid.neighbors(c) {
            if pixels.contains(&n) && seen.insert(n) {
                queue.push_back(n);
            }
        }
    }
    seen
}

/// Restores the single-blob invariant for `id`.
///
/// Pixels cut off from the eye become food with `ttl`. A missing eye or an
/// empty pixel set destroys the organism.
pub fn enforce_connectivity(
    habitat: &mut Habitat,
    id: OrganismId,
    ttl: u32,
    tick: u64,
) -> Connectivity {
    let Some(organism) = habitat.organisms.get(&id) else {
        return Connectivity::Missing;
    };
    if organism.pixels.is_empty() || !organism.pixels.contains(&organism.eye) {
        habitat.destroy_organism(id, ttl, tick);
        return Connectivity::Destroyed;
    }

    let reached = reachable_from(habitat, organism.eye, &organism.pixels);
    if reached.len() == organism.pixels.len() {
        return Connectivity::Intact;
    }

    let detached: Vec<Coord> = organism.pixels.difference(&reached).copied().collect();
    for &c in &detached {
        if habitat.grid.code(c) == id as i32 {
            habitat.make_food(c, ttl, tick);
        }
    }
    if let Some(organism) = habitat.organisms.get_mut(&id) {
        organism.pixels = reached;
    }
    tracing::trace!(id, detached = detached.len(), "Severed fragments");
    Connectivity::Severed(detached.len())
}
