//! Headless runner: drives a [`World`] for a fixed number of ticks, feeds
//! [`Metrics`] and optionally appends one JSON line of population statistics
//! per reporting interval.

use crate::model::{AppConfig, Metrics, PopulationStats, World};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("failed to open stats file {path}: {source}")]
    StatsOpen {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write stats line: {0}")]
    StatsWrite(#[from] std::io::Error),
    #[error("failed to encode stats line: {0}")]
    StatsEncode(#[from] serde_json::Error),
}

/// How a run ended.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub ticks_run: u64,
    pub extinct: bool,
    pub final_stats: PopulationStats,
}

pub struct App {
    pub world: World,
    pub metrics: Metrics,
    log_interval: u64,
    stats_out: Option<BufWriter<File>>,
}

impl App {
    /// Builds the world and opens the stats sink. `log_interval` drives both
    /// the metrics summary and the stats lines; zero keeps only the final
    /// line.
    pub fn new(
        config: AppConfig,
        log_interval: u64,
        stats_path: Option<&Path>,
    ) -> anyhow::Result<Self> {
        tracing::info!(fingerprint = %config.fingerprint(), "Config loaded");
        let world = World::new(config)?;
        let stats_out = match stats_path {
            Some(path) => {
                let file = File::create(path).map_err(|source| RunnerError::StatsOpen {
                    path: path.to_path_buf(),
                    source,
                })?;
                Some(BufWriter::new(file))
            }
            None => None,
        };
        Ok(Self {
            world,
            metrics: Metrics::new(log_interval),
            log_interval,
            stats_out,
        })
    }

    /// Steps the world up to `ticks` times, stopping at extinction.
    pub fn run(&mut self, ticks: u64) -> Result<RunSummary, RunnerError> {
        let mut ticks_run = 0;
        while ticks_run < ticks && !self.world.organisms().is_empty() {
            let started = Instant::now();
            self.world.step();
            ticks_run += 1;

            let counters = self.world.counters();
            self.metrics.add_to_counter("moved", counters.moved as u64);
            self.metrics.add_to_counter("grew", counters.grew as u64);
            self.metrics.add_to_counter("attacked", counters.attacked as u64);
            self.metrics.add_to_counter("starving", counters.starving as u64);
            if self.metrics.record_tick(
                started.elapsed(),
                self.world.organisms().len(),
                self.world.food().len(),
            ) {
                let stats = self.world.stats();
                self.write_stats(&stats)?;
            }
        }

        let final_stats = self.world.stats();
        let extinct = final_stats.population == 0;
        if extinct {
            self.metrics
                .log_event("extinction", &format!("tick {}", self.world.tick()));
        }
        let logged_last = ticks_run > 0
            && self.log_interval > 0
            && self.metrics.tick_count() % self.log_interval == 0;
        if !logged_last {
            self.write_stats(&final_stats)?;
        }
        if let Some(out) = self.stats_out.as_mut() {
            out.flush()?;
        }

        tracing::info!(
            ticks_run,
            tick = self.world.tick(),
            population = final_stats.population,
            food = final_stats.food_count,
            elapsed_ms = self.metrics.elapsed().as_millis() as u64,
            "Run finished"
        );
        Ok(RunSummary {
            ticks_run,
            extinct,
            final_stats,
        })
    }

    fn write_stats(&mut self, stats: &PopulationStats) -> Result<(), RunnerError> {
        if let Some(out) = self.stats_out.as_mut() {
            serde_json::to_writer(&mut *out, stats)?;
            out.write_all(b"\n")?;
        }
        Ok(())
    }
}
