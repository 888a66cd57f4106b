//! Genome construction, mutation and geometry.

use pixelgenesis_data::Genome;
use rand::seq::SliceRandom;
use rand::Rng;

pub trait GenomeLogic {
    /// A connected random body plan grown by accretion from the centre.
    fn random_with_rng<R: Rng>(side: usize, rng: &mut R) -> Self;
    /// Copy with every non-centre cell flipped with probability `rate`.
    fn mutate_with_rng<R: Rng>(&self, rate: f64, rng: &mut R) -> Self;
    /// Bitmask of the ring-1 cells, in [`ring_offsets`] order.
    fn species_mask(&self) -> u8;
}

/// Clockwise ring of Chebyshev radius `d` starting at `(-d, -d)`.
pub fn ring_offsets(d: i32) -> Vec<(i32, i32)> {
    if d <= 0 {
        return vec![(0, 0)];
    }
    let mut out = Vec::with_capacity((8 * d) as usize);
    for x in -d..d {
        out.push((x, -d));
    }
    for y in -d..d {
        out.push((d, y));
    }
    for x in (-d + 1..=d).rev() {
        out.push((x, d));
    }
    for y in (-d + 1..=d).rev() {
        out.push((-d, y));
    }
    out
}

impl GenomeLogic for Genome {
    fn random_with_rng<R: Rng>(side: usize, rng: &mut R) -> Self {
        let mut genome = Genome::single_cell(side);
        let area = genome.side * genome.side;
        if area == 1 {
            return genome;
        }
        let target = rng.gen_range(3.min(area)..=(area / 2).max(3).min(area));

        let mut placed = 1;
        while placed < target {
            let frontier: Vec<usize> = (0..area)
                .filter(|&idx| !genome.cells[idx])
                .filter(|&idx| {
                    let (dx, dy) = genome.offset_of(idx);
                    ring_offsets(1)
                        .into_iter()
                        .any(|(ox, oy)| genome.at(dx + ox, dy + oy))
                })
                .collect();
            let Some(&pick) = frontier.choose(rng) else {
                break;
            };
            genome.cells[pick] = true;
            placed += 1;
        }
        genome
    }

    fn mutate_with_rng<R: Rng>(&self, rate: f64, rng: &mut R) -> Self {
        let mut child = self.clone();
        let center = child.center_index();
        let rate = rate.clamp(0.0, 1.0);
        for (idx, cell) in child.cells.iter_mut().enumerate() {
            if idx != center && rng.gen_bool(rate) {
                *cell = !*cell;
            }
        }
        child
    }

    fn species_mask(&self) -> u8 {
        ring_offsets(1)
            .into_iter()
            .enumerate()
            .fold(0u8, |mask, (bit, (dx, dy))| {
                if self.at(dx, dy) {
                    mask | (1 << bit)
                } else {
                    mask
                }
            })
    }
}
