use pixelgenesis_data::{BoundaryMode, CellCode, Coord, Food, Organism, TickCounters};
use serde::{Deserialize, Serialize};

/// Read-only copy of everything a renderer or analysis tool may consume.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub width: u16,
    pub height: u16,
    pub boundary: BoundaryMode,
    /// Row-major ownership codes.
    pub cells: Vec<CellCode>,
    /// Row-major hit-points, parallel to `cells`.
    pub hit_points: Vec<u32>,
    pub organisms: Vec<Organism>,
    pub food: Vec<FoodSnapshot>,
    pub environment_energy: f64,
    pub counters: TickCounters,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct FoodSnapshot {
    pub at: Coord,
    pub ttl: u32,
}

impl FoodSnapshot {
    pub fn new(at: Coord, food: &Food) -> Self {
        Self { at, ttl: food.ttl }
    }
}

impl WorldSnapshot {
    #[inline]
    pub fn code_at(&self, x: i32, y: i32) -> Option<CellCode> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        self.cells
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}
