//! Spatial index: who occupies which cell.
//!
//! A flat row-major array of [`CellCode`]s plus a parallel hit-point array,
//! both indexed by `y * width + x`. The grid is the canonical ownership map;
//! organism pixel sets are a cached view reconciled against it every tick.

use pixelgenesis_data::{BoundaryMode, Cell, CellCode, Coord, Heading, EMPTY};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Grid {
    pub width: u16,
    pub height: u16,
    pub boundary: BoundaryMode,
    cells: Vec<CellCode>,
    hit_points: Vec<u32>,
}

impl Grid {
    pub fn new(width: u16, height: u16, boundary: BoundaryMode) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            boundary,
            cells: vec![EMPTY; len],
            hit_points: vec![0; len],
        }
    }

    /// Flat index of an in-bounds coordinate.
    #[inline(always)]
    pub fn index(&self, c: Coord) -> usize {
        (c.y as usize * self.width as usize) + c.x as usize
    }

    #[inline]
    pub fn coord_of(&self, idx: usize) -> Coord {
        let w = self.width as usize;
        Coord::new((idx % w) as i32, (idx / w) as i32)
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width as i32 && y < self.height as i32
    }

    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Maps raw coordinates onto the grid under the active boundary mode.
    ///
    /// Wrap folds them onto the torus; closed rejects anything off-grid.
    #[inline]
    pub fn resolve(&self, x: i32, y: i32) -> Option<Coord> {
        match self.boundary {
            BoundaryMode::Wrap => Some(Coord::new(
                x.rem_euclid(self.width as i32),
                y.rem_euclid(self.height as i32),
            )),
            BoundaryMode::Closed => self.in_bounds(x, y).then_some(Coord::new(x, y)),
        }
    }

    #[inline]
    pub fn offset(&self, c: Coord, dx: i32, dy: i32) -> Option<Coord> {
        self.resolve(c.x + dx, c.y + dy)
    }

    #[inline]
    pub fn step(&self, c: Coord, heading: Heading) -> Option<Coord> {
        self.offset(c, heading.dx as i32, heading.dy as i32)
    }

    #[inline]
    pub fn code(&self, c: Coord) -> CellCode {
        self.cells[self.index(c)]
    }

    #[inline]
    pub fn cell(&self, c: Coord) -> Cell {
        Cell::from_code(self.code(c))
    }

    #[inline]
    pub fn is_empty(&self, c: Coord) -> bool {
        self.code(c) == EMPTY
    }

    #[inline]
    pub fn set(&mut self, c: Coord, code: CellCode) {
        let idx = self.index(c);
        self.cells[idx] = code;
    }

    #[inline]
    pub fn hit_points(&self, c: Coord) -> u32 {
        self.hit_points[self.index(c)]
    }

    #[inline]
    pub fn set_hit_points(&mut self, c: Coord, hp: u32) {
        let idx = self.index(c);
        self.hit_points[idx] = hp;
    }

    /// Writes ownership and hit-points together.
    #[inline]
    pub fn put(&mut self, c: Coord, code: CellCode, hp: u32) {
        let idx = self.index(c);
        self.cells[idx] = code;
        self.hit_points[idx] = hp;
    }

    #[inline]
    pub fn clear(&mut self, c: Coord) {
        self.put(c, EMPTY, 0);
    }

    /// The 8-neighbourhood of `c`, clockwise from north, under the boundary
    /// mode. Off-grid neighbours are skipped in closed mode.
    pub fn neighbors(&self, c: Coord) -> impl Iterator<Item = Coord> + '_ {
        Heading::ALL
            .into_iter()
            .filter_map(move |h| self.step(c, h))
            .filter(move |&n| n != c)
    }

    /// Whether `c` and its full 8-neighbourhood exist and are empty.
    pub fn site_is_clear(&self, c: Coord) -> bool {
        if !self.in_bounds(c.x, c.y) || !self.is_empty(c) {
            return false;
        }
        Heading::ALL
            .into_iter()
            .all(|h| self.step(c, h).is_some_and(|n| self.is_empty(n)))
    }

    pub fn cells(&self) -> &[CellCode] {
        &self.cells
    }

    pub fn hit_point_cells(&self) -> &[u32] {
        &self.hit_points
    }

    pub fn count(&self, code: CellCode) -> usize {
        self.cells.iter().filter(|&&c| c == code).count()
    }

    pub fn empty_cells(&self) -> Vec<Coord> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &code)| code == EMPTY)
            .map(|(idx, _)| self.coord_of(idx))
            .collect()
    }
}
