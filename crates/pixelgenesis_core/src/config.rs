//! Configuration management for simulation parameters.
//!
//! This module provides strongly-typed configuration structures that map to
//! the `config.toml` file. Every numeric or behavioural knob of the engine
//! lives here.
//!
//! ## Configuration Hierarchy
//!
//! 1. Default values (hardcoded in `Default` impl)
//! 2. `config.toml` file (overrides defaults, section by section)
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [world]
//! width = 120
//! height = 80
//! seed = 42
//! boundary = "closed"
//!
//! [terrain]
//! obstacle_density = 0.4
//! smoothing_steps = 4
//!
//! [metabolism]
//! reproduction_threshold = 600.0
//! ```

use crate::error::ConfigError;
use pixelgenesis_data::BoundaryMode;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// World-level simulation configuration.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WorldConfig {
    pub width: u16,
    pub height: u16,
    /// RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
    pub boundary: BoundaryMode,
    /// Random organisms placed by `World::new`.
    pub initial_population: usize,
    /// Random food pixels placed by `World::new`.
    pub initial_food: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 120,
            height: 80,
            seed: None,
            boundary: BoundaryMode::Wrap,
            initial_population: 30,
            initial_food: 150,
        }
    }
}

/// Cave terrain generation.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct TerrainConfig {
    pub enabled: bool,
    /// Probability that a cell starts walled before smoothing.
    pub obstacle_density: f64,
    pub smoothing_steps: u32,
    /// Share of cells sprinkled with obstacles when smoothing leaves none.
    pub fallback_ratio: f64,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            obstacle_density: 0.38,
            smoothing_steps: 4,
            fallback_ratio: 0.02,
        }
    }
}

/// Traits given to newly created organisms.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct OrganismConfig {
    /// Side of the genome pattern; must be odd.
    pub genome_size: usize,
    pub move_speed: u32,
    pub view_radius: u32,
    /// Energy of organisms created without an explicit amount.
    pub default_energy: f64,
    pub max_stamina: f64,
    /// Stamina spent per cell moved.
    pub stamina_move_drain: f64,
    /// Stamina regained on a tick without movement.
    pub stamina_recovery: f64,
}

impl Default for OrganismConfig {
    fn default() -> Self {
        Self {
            genome_size: 7,
            move_speed: 2,
            view_radius: 10,
            default_energy: 300.0,
            max_stamina: 10.0,
            stamina_move_drain: 1.0,
            stamina_recovery: 2.0,
        }
    }
}

/// Energy costs and thresholds.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct MetabolismConfig {
    pub move_cost_multiplier: f64,
    pub move_cost_exponent: f64,
    /// Energy burnt per owned cell per tick.
    pub metabolism_cost: f64,
    pub growth_cost: f64,
    pub attack_cost: f64,
    pub absorb_cost: f64,
    pub reproduction_threshold: f64,
}

impl Default for MetabolismConfig {
    fn default() -> Self {
        Self {
            move_cost_multiplier: 0.05,
            move_cost_exponent: 1.2,
            metabolism_cost: 0.1,
            growth_cost: 4.0,
            attack_cost: 1.0,
            absorb_cost: 0.5,
            reproduction_threshold: 600.0,
        }
    }
}

/// Food and environment pool.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct EcosystemConfig {
    /// Energy embodied in one food pixel or one organism cell.
    pub energy_constant: f64,
    /// Share of a kill or absorption that reaches the actor.
    pub transfer_ratio: f64,
    pub food_decay_ticks: u32,
    /// Share of `energy_constant` returned to the pool by decayed food.
    pub food_decay_return_ratio: f64,
    pub food_spawn_rate: f64,
    pub food_spawn_interval: u64,
    pub initial_environment_energy: f64,
}

impl Default for EcosystemConfig {
    fn default() -> Self {
        Self {
            energy_constant: 40.0,
            transfer_ratio: 0.8,
            food_decay_ticks: 300,
            food_decay_return_ratio: 0.5,
            food_spawn_rate: 0.01,
            food_spawn_interval: 5,
            initial_environment_energy: 20000.0,
        }
    }
}

/// Reproduction and mutation.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct EvolutionConfig {
    pub mutation_rate: f64,
    /// Per-tick chance that an eligible organism tries to reproduce.
    pub reproduction_chance: f64,
    /// Multiplied by hunger to give the chance of attacking an equal.
    pub equal_size_attack_factor: f64,
    pub hunger_jitter: f64,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            mutation_rate: 0.05,
            reproduction_chance: 0.03,
            equal_size_attack_factor: 0.6,
            hunger_jitter: 0.1,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct MovementConfig {
    /// Hard cap on microsteps per tick.
    pub max_microsteps: u32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self { max_microsteps: 64 }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub world: WorldConfig,
    pub terrain: TerrainConfig,
    pub organism: OrganismConfig,
    pub metabolism: MetabolismConfig,
    pub ecosystem: EcosystemConfig,
    pub evolution: EvolutionConfig,
    pub movement: MovementConfig,
}

impl AppConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` with a description
    /// of the first validation failure.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.world.width > 0, "World width must be positive");
        anyhow::ensure!(self.world.height > 0, "World height must be positive");
        anyhow::ensure!(
            (self.world.width as usize) * (self.world.height as usize) <= 4_000_000,
            "World too large (max 4M cells)"
        );

        anyhow::ensure!(
            (0.0..=1.0).contains(&self.terrain.obstacle_density),
            "Obstacle density must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.terrain.fallback_ratio),
            "Fallback ratio must be in [0.0, 1.0]"
        );

        anyhow::ensure!(
            self.organism.genome_size % 2 == 1,
            "Genome size must be odd"
        );
        anyhow::ensure!(
            self.organism.genome_size <= 31,
            "Genome size too large (max 31)"
        );
        anyhow::ensure!(
            self.organism.default_energy > 0.0,
            "Default energy must be positive"
        );
        anyhow::ensure!(
            self.organism.max_stamina >= 0.0,
            "Max stamina must be non-negative"
        );
        anyhow::ensure!(
            self.organism.stamina_move_drain > 0.0,
            "Stamina move drain must be positive"
        );
        anyhow::ensure!(
            self.organism.stamina_recovery >= 0.0,
            "Stamina recovery must be non-negative"
        );

        anyhow::ensure!(
            self.metabolism.move_cost_multiplier >= 0.0,
            "Move cost multiplier must be non-negative"
        );
        anyhow::ensure!(
            self.metabolism.metabolism_cost >= 0.0,
            "Metabolism cost must be non-negative"
        );
        anyhow::ensure!(
            self.metabolism.growth_cost >= 0.0,
            "Growth cost must be non-negative"
        );
        anyhow::ensure!(
            self.metabolism.attack_cost >= 0.0 && self.metabolism.absorb_cost >= 0.0,
            "Action fees must be non-negative"
        );
        anyhow::ensure!(
            self.metabolism.reproduction_threshold > 0.0,
            "Reproduction threshold must be positive"
        );

        anyhow::ensure!(
            self.ecosystem.energy_constant > 0.0,
            "Energy constant must be positive"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.ecosystem.transfer_ratio),
            "Transfer ratio must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.ecosystem.food_decay_return_ratio),
            "Food decay return ratio must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            self.ecosystem.food_decay_ticks > 0,
            "Food decay ticks must be positive"
        );
        anyhow::ensure!(
            self.ecosystem.food_spawn_rate >= 0.0,
            "Food spawn rate must be non-negative"
        );
        anyhow::ensure!(
            self.ecosystem.food_spawn_interval > 0,
            "Food spawn interval must be positive"
        );
        anyhow::ensure!(
            self.ecosystem.initial_environment_energy >= 0.0,
            "Initial environment energy must be non-negative"
        );

        anyhow::ensure!(
            (0.0..=1.0).contains(&self.evolution.mutation_rate),
            "Mutation rate must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.evolution.reproduction_chance),
            "Reproduction chance must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            self.evolution.equal_size_attack_factor >= 0.0,
            "Equal size attack factor must be non-negative"
        );
        anyhow::ensure!(
            self.evolution.hunger_jitter >= 0.0,
            "Hunger jitter must be non-negative"
        );

        anyhow::ensure!(
            self.movement.max_microsteps > 0,
            "Max microsteps must be positive"
        );

        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config = toml::from_str::<Self>(content)?;
        config
            .validate()
            .map_err(|e| ConfigError::invalid(e.to_string()))?;
        Ok(config)
    }

    /// Loads configuration from `path`, falling back to defaults when the
    /// file does not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::warn!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// SHA-256 over the behavioural sections, hex encoded.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.terrain).as_bytes());
        hasher.update(format!("{:?}", self.organism).as_bytes());
        hasher.update(format!("{:?}", self.metabolism).as_bytes());
        hasher.update(format!("{:?}", self.ecosystem).as_bytes());
        hasher.update(format!("{:?}", self.evolution).as_bytes());
        hasher.update(format!("{:?}", self.movement).as_bytes());
        hex::encode(hasher.finalize())
    }
}
