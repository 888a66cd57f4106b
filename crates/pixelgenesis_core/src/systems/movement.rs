//! Microstepped, all-or-nothing movement.
//!
//! Every microstep each mover proposes shifting all of its cells one step
//! along its heading. Proposals compete per destination cell on a priority
//! key; an organism moves only if it wins every destination it asked for.
//! All decisions of a microstep are taken before any cell is written.
//!
//! A destination must be empty or already owned by the mover. That rule
//! also covers food, obstacles and the cells of stationary organisms, which
//! no proposal can ever win.

use super::SystemContext;
use crate::config::AppConfig;
use crate::habitat::Habitat;
use pixelgenesis_data::{Coord, Organism, OrganismId, EMPTY};
use rand::Rng;
use std::collections::{BTreeMap, BTreeSet};

/// Floor on the energy cost of a single step.
pub const MIN_STEP_COST: f64 = 0.001;

/// Fixed 32-bit mix of `(tick, x, y, id)` that breaks priority ties between
/// equally fast, equally large movers.
///
/// Each input is spread by its own odd multiplier, the products are xored,
/// and the result is finalised with two xorshift-multiply rounds.
pub fn movement_hash(tick: u64, x: i32, y: i32, id: OrganismId) -> u32 {
    let mut h = (tick as u32).wrapping_mul(0x9E37_79B1)
        ^ (x as u32).wrapping_mul(0x85EB_CA77)
        ^ (y as u32).wrapping_mul(0xC2B2_AE3D)
        ^ id.wrapping_mul(0x27D4_EB2F);
    h ^= h >> 15;
    h = h.wrapping_mul(0x2C1B_3C6D);
    h ^= h >> 12;
    h = h.wrapping_mul(0x297A_2D39);
    h ^= h >> 15;
    h
}

/// `(speed << 20) | (pixels << 10) | (hash & 0x3FF)`.
#[inline]
pub fn priority_key(move_speed: u32, pixels: usize, hash: u32) -> u64 {
    ((move_speed as u64) << 20) | ((pixels as u64) << 10) | (hash & 0x3FF) as u64
}

/// Energy charged per cell moved for an organism of `size` cells.
pub fn step_cost(size: usize, config: &AppConfig) -> f64 {
    let m = &config.metabolism;
    ((size as f64).powf(m.move_cost_exponent) * m.move_cost_multiplier).max(MIN_STEP_COST)
}

/// Per-tick step budget and whether energy or stamina is what capped it.
pub fn step_budget(organism: &Organism, config: &AppConfig) -> (u32, bool) {
    let cost = step_cost(organism.size(), config);
    let by_energy = if organism.energy > 0.0 {
        (organism.energy / cost).floor()
    } else {
        0.0
    };
    let by_stamina = if organism.stamina > 0.0 {
        (organism.stamina / config.organism.stamina_move_drain).floor()
    } else {
        0.0
    };
    let resources = by_energy.min(by_stamina).min(u32::MAX as f64) as u32;
    let budget = organism.move_speed.min(resources);
    (budget, resources < organism.move_speed)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Claim {
    key: u64,
    id: OrganismId,
}

/// Result of one microstep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Microstep {
    /// Organisms that had budget and a heading going in.
    pub movers: usize,
    /// Organisms whose whole body advanced one cell, in id order.
    pub committed: Vec<OrganismId>,
}

/// Tracks remaining step budgets across the microsteps of one tick.
#[derive(Debug, Clone, Default)]
pub struct MovementResolver {
    budgets: BTreeMap<OrganismId, u32>,
    /// Organisms that wanted to move but had no budget from the start.
    exhausted: BTreeSet<OrganismId>,
}

impl MovementResolver {
    /// Computes every organism's budget for this tick.
    pub fn new(habitat: &Habitat, config: &AppConfig) -> Self {
        let mut resolver = Self::default();
        for (&id, org) in &habitat.organisms {
            if org.heading.is_none() {
                continue;
            }
            let (budget, limited) = step_budget(org, config);
            if budget > 0 {
                resolver.budgets.insert(id, budget);
            } else if limited {
                resolver.exhausted.insert(id);
            }
        }
        resolver
    }

    /// A resolver with explicit budgets; organisms not listed stay put.
    pub fn with_budgets(budgets: BTreeMap<OrganismId, u32>) -> Self {
        Self {
            budgets,
            exhausted: BTreeSet::new(),
        }
    }

    pub fn remaining(&self, id: OrganismId) -> u32 {
        self.budgets.get(&id).copied().unwrap_or(0)
    }

    fn movers(&self, habitat: &Habitat) -> Vec<OrganismId> {
        self.budgets
            .iter()
            .filter(|&(id, &left)| {
                left > 0
                    && habitat
                        .organisms
                        .get(id)
                        .is_some_and(|o| !o.heading.is_none())
            })
            .map(|(&id, _)| id)
            .collect()
    }

    /// One cell-destination per owned pixel, or `None` if any destination
    /// is off-grid or held by something other than empty ground or the
    /// mover itself.
    fn propose(habitat: &Habitat, org: &Organism, tick: u64) -> Option<Vec<(Coord, Claim)>> {
        let id = org.id;
        let size = org.size();
        let mut out = Vec::with_capacity(size);
        for &p in &org.pixels {
            let dest = habitat.grid.step(p, org.heading)?;
            let code = habitat.grid.code(dest);
            if code != EMPTY && code != id as i32 {
                return None;
            }
            let key = priority_key(
                org.move_speed,
                size,
                movement_hash(tick, dest.x, dest.y, id),
            );
            out.push((dest, Claim { key, id }));
        }
        Some(out)
    }

    /// Runs one propose/contest/commit round.
    pub fn microstep(
        &mut self,
        habitat: &mut Habitat,
        config: &AppConfig,
        tick: u64,
    ) -> Microstep {
        let movers = self.movers(habitat);

        let mut proposals: BTreeMap<OrganismId, Vec<(Coord, Claim)>> = BTreeMap::new();
        let mut best: BTreeMap<Coord, Claim> = BTreeMap::new();
        for &id in &movers {
            let Some(org) = habitat.organisms.get(&id) else {
                continue;
            };
            let Some(cells) = Self::propose(habitat, org, tick) else {
                continue;
            };
            for &(dest, claim) in &cells {
                let slot = best.entry(dest).or_insert(claim);
                if claim > *slot {
                    *slot = claim;
                }
            }
            proposals.insert(id, cells);
        }

        let winners: Vec<OrganismId> = proposals
            .iter()
            .filter(|(&id, cells)| {
                cells
                    .iter()
                    .all(|(dest, _)| best.get(dest).is_some_and(|c| c.id == id))
            })
            .map(|(&id, _)| id)
            .collect();

        for &id in &winners {
            self.commit(habitat, config, id);
        }

        tracing::trace!(
            tick,
            movers = movers.len(),
            committed = winners.len(),
            "Movement microstep"
        );
        Microstep {
            movers: movers.len(),
            committed: winners,
        }
    }

    fn commit(&mut self, habitat: &mut Habitat, config: &AppConfig, id: OrganismId) {
        let Some(org) = habitat.organisms.get_mut(&id) else {
            return;
        };
        let grid = &mut habitat.grid;
        let heading = org.heading;

        let mut moved: Vec<(Coord, u32)> = Vec::with_capacity(org.pixels.len());
        for &p in &org.pixels {
            if let Some(dest) = grid.step(p, heading) {
                moved.push((dest, grid.hit_points(p)));
            }
        }
        let new_pixels: BTreeSet<Coord> = moved.iter().map(|&(c, _)| c).collect();
        for &p in &org.pixels {
            if !new_pixels.contains(&p) {
                grid.clear(p);
            }
        }
        for &(dest, hp) in &moved {
            grid.put(dest, id as i32, hp);
        }

        if let Some(eye) = grid.step(org.eye, heading) {
            org.eye = eye;
        }
        org.energy -= step_cost(org.pixels.len(), config);
        org.stamina -= config.organism.stamina_move_drain;
        org.pixels = new_pixels;
        org.moved = true;

        if let Some(left) = self.budgets.get_mut(&id) {
            *left = left.saturating_sub(1);
        }
    }

    /// Microsteps until nobody can advance, then settles the per-tick
    /// bookkeeping: counters, stuck ticks and stamina recovery.
    pub fn run<R: Rng>(mut self, habitat: &mut Habitat, ctx: &mut SystemContext<R>) {
        for org in habitat.organisms.values_mut() {
            org.moved = false;
        }
        ctx.counters.starving += self.exhausted.len();

        for _ in 0..ctx.config.movement.max_microsteps {
            let step = self.microstep(habitat, ctx.config, ctx.tick);
            if step.movers == 0 {
                break;
            }
            if step.committed.is_empty() {
                let stalled = self
                    .movers(habitat)
                    .into_iter()
                    .filter(|id| habitat.organisms.get(id).is_some_and(|o| !o.moved))
                    .count();
                ctx.counters.starving += stalled;
                break;
            }
        }

        let org_cfg = &ctx.config.organism;
        for org in habitat.organisms.values_mut() {
            if org.moved {
                ctx.counters.moved += 1;
                org.stuck_ticks = 0;
            } else {
                if !org.heading.is_none() {
                    org.stuck_ticks += 1;
                }
                org.stamina = (org.stamina + org_cfg.stamina_recovery).min(org_cfg.max_stamina);
            }
        }
    }
}
