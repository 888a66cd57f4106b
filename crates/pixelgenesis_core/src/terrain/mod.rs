//! One-shot cave terrain.
//!
//! The generator produces a [`WallMask`]; [`apply_walls`] stamps it into the
//! grid as obstacle cells before the first tick.

pub mod generation;

pub use generation::{generate_walls, WallMask};

use crate::grid::Grid;
use pixelgenesis_data::{Coord, OBSTACLE};

/// Writes every wall of `mask` into `grid` as an obstacle with zero
/// hit-points. Returns the number of obstacles written.
pub fn apply_walls(grid: &mut Grid, mask: &WallMask) -> usize {
    let mut written = 0;
    for y in 0..mask.height as i32 {
        for x in 0..mask.width as i32 {
            if mask.is_wall(x, y) && grid.in_bounds(x, y) {
                grid.put(Coord::new(x, y), OBSTACLE, 0);
                written += 1;
            }
        }
    }
    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixelgenesis_data::BoundaryMode;

    #[test]
    fn test_apply_walls_marks_obstacles() {
        let mut mask = WallMask::open(4, 3);
        mask.set_wall(1, 1, true);
        mask.set_wall(3, 2, true);
        let mut grid = Grid::new(4, 3, BoundaryMode::Closed);
        assert_eq!(apply_walls(&mut grid, &mask), 2);
        assert_eq!(grid.code(Coord::new(1, 1)), OBSTACLE);
        assert_eq!(grid.hit_points(Coord::new(3, 2)), 0);
        assert_eq!(grid.count(OBSTACLE), 2);
    }
}
