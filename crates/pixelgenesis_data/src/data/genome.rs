use serde::{Deserialize, Serialize};

/// Target body plan of an organism.
///
/// A square, odd-sided boolean pattern in a local frame centred on the eye.
/// Cells are stored row-major; `(dx, dy) = (0, 0)` is the centre and is
/// always set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genome {
    /// Side length of the pattern (odd).
    pub side: usize,
    /// Row-major pattern cells.
    pub cells: Vec<bool>,
}

impl Genome {
    /// A genome whose only set cell is the centre.
    pub fn single_cell(side: usize) -> Self {
        let side = Self::normalize_side(side);
        let mut cells = vec![false; side * side];
        cells[(side * side) / 2] = true;
        Self { side, cells }
    }

    /// A genome with the centre plus every listed offset that fits.
    pub fn from_offsets(side: usize, offsets: &[(i32, i32)]) -> Self {
        let mut genome = Self::single_cell(side);
        for &(dx, dy) in offsets {
            if let Some(idx) = genome.index_of(dx, dy) {
                genome.cells[idx] = true;
            }
        }
        genome
    }

    fn normalize_side(side: usize) -> usize {
        let side = side.max(1);
        if side % 2 == 0 {
            side + 1
        } else {
            side
        }
    }

    /// Half the side length: the largest ring offset.
    #[inline]
    pub fn radius(&self) -> i32 {
        (self.side / 2) as i32
    }

    /// Index of the pattern cell at `(dx, dy)` relative to the centre.
    #[inline]
    pub fn index_of(&self, dx: i32, dy: i32) -> Option<usize> {
        let r = self.radius();
        if dx < -r || dx > r || dy < -r || dy > r {
            return None;
        }
        Some(((dy + r) as usize * self.side) + (dx + r) as usize)
    }

    /// Offset from the centre of the pattern cell at `idx`.
    #[inline]
    pub fn offset_of(&self, idx: usize) -> (i32, i32) {
        let r = self.radius();
        ((idx % self.side) as i32 - r, (idx / self.side) as i32 - r)
    }

    #[inline]
    pub fn center_index(&self) -> usize {
        (self.side * self.side) / 2
    }

    /// Whether the pattern contains `(dx, dy)`; off-pattern offsets are unset.
    #[inline]
    pub fn at(&self, dx: i32, dy: i32) -> bool {
        self.index_of(dx, dy).is_some_and(|idx| self.cells[idx])
    }

    /// Number of set cells, centre included.
    pub fn total_cells(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}
