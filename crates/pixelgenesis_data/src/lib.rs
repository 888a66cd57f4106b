//! Plain data types shared by the pixelgenesis engine and its consumers.
//!
//! Everything here is inert state: the rules that mutate it live in
//! `pixelgenesis_core`.

pub mod data;

pub use data::environment::{Food, PopulationStats, TickCounters};
pub use data::genome::Genome;
pub use data::grid::{BoundaryMode, Cell, CellCode, Coord, Heading, EMPTY, FOOD, OBSTACLE};
pub use data::organism::{Organism, OrganismId};
