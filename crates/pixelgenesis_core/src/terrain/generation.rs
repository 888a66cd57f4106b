use crate::config::TerrainConfig;
use pixelgenesis_data::BoundaryMode;
use rand::Rng;

/// Binary wall layout produced by the cave generator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WallMask {
    pub width: u16,
    pub height: u16,
    walls: Vec<bool>,
}

impl WallMask {
    pub fn open(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            walls: vec![false; width as usize * height as usize],
        }
    }

    /// Independent fill: each cell walled with probability `density`.
    pub fn random_fill<R: Rng>(width: u16, height: u16, density: f64, rng: &mut R) -> Self {
        let mut mask = Self::open(width, height);
        let density = density.clamp(0.0, 1.0);
        for wall in &mut mask.walls {
            *wall = rng.gen_bool(density);
        }
        mask
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> usize {
        (y as usize * self.width as usize) + x as usize
    }

    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width as i32 && y < self.height as i32
    }

    pub fn is_wall(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y) && self.walls[self.index(x, y)]
    }

    pub fn set_wall(&mut self, x: i32, y: i32, wall: bool) {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            self.walls[idx] = wall;
        }
    }

    pub fn wall_count(&self) -> usize {
        self.walls.iter().filter(|&&w| w).count()
    }

    /// Walled cells among the 8 neighbours of `(x, y)`. Off-grid neighbours
    /// count as walls when closed and wrap around otherwise.
    fn walled_neighbors(&self, x: i32, y: i32, boundary: BoundaryMode) -> u8 {
        let w = self.width as i32;
        let h = self.height as i32;
        let mut count = 0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let nx = x + dx;
                let ny = y + dy;
                let walled = if self.in_bounds(nx, ny) {
                    self.walls[self.index(nx, ny)]
                } else {
                    match boundary {
                        BoundaryMode::Closed => true,
                        BoundaryMode::Wrap => {
                            self.walls[self.index(nx.rem_euclid(w), ny.rem_euclid(h))]
                        }
                    }
                };
                if walled {
                    count += 1;
                }
            }
        }
        count
    }

    /// One round of the cave rule: a wall survives with at least 4 walled
    /// neighbours; any other cell becomes a wall with at least 5.
    pub fn smoothed(&self, boundary: BoundaryMode) -> Self {
        let mut next = Self::open(self.width, self.height);
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let n = self.walled_neighbors(x, y, boundary);
                let idx = self.index(x, y);
                next.walls[idx] = if self.walls[idx] { n >= 4 } else { n >= 5 };
            }
        }
        next
    }

    /// Scatters single walls with no walled neighbour over roughly `ratio`
    /// of the cells.
    pub fn sprinkle<R: Rng>(&mut self, ratio: f64, boundary: BoundaryMode, rng: &mut R) -> usize {
        let total = self.walls.len();
        if total == 0 {
            return 0;
        }
        let target = ((total as f64 * ratio).round() as usize).max(1);
        let mut placed = 0;
        let mut attempts = 0;
        while placed < target && attempts < target * 20 {
            attempts += 1;
            let x = rng.gen_range(0..self.width as i32);
            let y = rng.gen_range(0..self.height as i32);
            let idx = self.index(x, y);
            if self.walls[idx] {
                continue;
            }
            // Closed edges count as walls, so only interior cells qualify there.
            let isolated = match boundary {
                BoundaryMode::Wrap => self.walled_neighbors(x, y, boundary) == 0,
                BoundaryMode::Closed => {
                    x > 0
                        && y > 0
                        && x < self.width as i32 - 1
                        && y < self.height as i32 - 1
                        && self.walled_neighbors(x, y, boundary) == 0
                }
            };
            if isolated {
                self.walls[idx] = true;
                placed += 1;
            }
        }
        placed
    }
}

/// Runs the full cave pipeline: random fill, `smoothing_steps` rounds of the
/// cave rule, then the sparse fallback if nothing survived.
pub fn generate_walls<R: Rng>(
    width: u16,
    height: u16,
    config: &TerrainConfig,
    boundary: BoundaryMode,
    rng: &mut R,
) -> WallMask {
    let mut mask = WallMask::random_fill(width, height, config.obstacle_density, rng);
    for _ in 0..config.smoothing_steps {
        mask = mask.smoothed(boundary);
    }

    if mask.wall_count() == 0 {
        let placed = mask.sprinkle(config.fallback_ratio, boundary, rng);
        tracing::debug!(placed, "Smoothing removed every wall, sprinkled fallback obstacles");
    }
    mask
}
