pub use pixelgenesis_core::{
    init_logging, AppConfig, ConfigError, GenomeLogic, Grid, Habitat, Metrics, Reconciliation,
    World, WorldSnapshot,
};
pub use pixelgenesis_data::{
    BoundaryMode, Cell, CellCode, Coord, Food, Genome, Heading, Organism, OrganismId,
    PopulationStats, TickCounters, EMPTY, FOOD, OBSTACLE,
};

pub mod config {
    pub use pixelgenesis_core::config::*;
}
pub mod lifecycle {
    pub use pixelgenesis_core::lifecycle::*;
}
pub mod perception {
    pub use pixelgenesis_core::perception::*;
}
pub mod snapshot {
    pub use pixelgenesis_core::snapshot::*;
}
pub mod systems {
    pub use pixelgenesis_core::systems::*;
}
pub mod terrain {
    pub use pixelgenesis_core::terrain::*;
}
