use serde::{Deserialize, Serialize};
use std::fmt;

/// Ownership code stored in every grid cell.
///
/// Positive values are organism ids; the non-positive values are the
/// constants below.
pub type CellCode = i32;

/// Nothing occupies the cell.
pub const EMPTY: CellCode = 0;
/// The cell holds a food pixel.
pub const FOOD: CellCode = -1;
/// The cell is an immovable wall.
pub const OBSTACLE: CellCode = -2;

/// Decoded view of a [`CellCode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Food,
    Obstacle,
    Organism(u32),
}

impl Cell {
    #[inline]
    pub fn from_code(code: CellCode) -> Self {
        match code {
            EMPTY => Cell::Empty,
            FOOD => Cell::Food,
            c if c > 0 => Cell::Organism(c as u32),
            // Any other negative code is treated as solid.
            _ => Cell::Obstacle,
        }
    }

    #[inline]
    pub fn code(self) -> CellCode {
        match self {
            Cell::Empty => EMPTY,
            Cell::Food => FOOD,
            Cell::Obstacle => OBSTACLE,
            Cell::Organism(id) => id as CellCode,
        }
    }
}

/// Integer grid coordinate.
///
/// Ordered by `x`, then `y`, so it can key `BTreeMap`/`BTreeSet` with a
/// deterministic iteration order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Facing of an organism: one of the eight unit vectors or the null vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Heading {
    pub dx: i8,
    pub dy: i8,
}

impl Heading {
    pub const NONE: Heading = Heading { dx: 0, dy: 0 };
    pub const N: Heading = Heading { dx: 0, dy: -1 };
    pub const NE: Heading = Heading { dx: 1, dy: -1 };
    pub const E: Heading = Heading { dx: 1, dy: 0 };
    pub const SE: Heading = Heading { dx: 1, dy: 1 };
    pub const S: Heading = Heading { dx: 0, dy: 1 };
    pub const SW: Heading = Heading { dx: -1, dy: 1 };
    pub const W: Heading = Heading { dx: -1, dy: 0 };
    pub const NW: Heading = Heading { dx: -1, dy: -1 };

    /// The eight unit headings, clockwise from north.
    pub const ALL: [Heading; 8] = [
        Heading::N,
        Heading::NE,
        Heading::E,
        Heading::SE,
        Heading::S,
        Heading::SW,
        Heading::W,
        Heading::NW,
    ];

    #[inline]
    pub fn is_none(self) -> bool {
        self.dx == 0 && self.dy == 0
    }

    #[inline]
    pub fn reversed(self) -> Heading {
        Heading {
            dx: -self.dx,
            dy: -self.dy,
        }
    }
}

/// How coordinates past the grid edge are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryMode {
    /// Opposite edges are joined (torus).
    #[default]
    Wrap,
    /// Off-grid cells do not exist; they behave as walls.
    Closed,
}
