//! Run-time metrics and logging setup.
//!
//! [`Metrics`] tracks wall-clock cost per tick alongside population and food
//! counts and emits a summary line every `log_interval` ticks.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

/// Collector shared by the runner for the lifetime of a simulation.
pub struct Metrics {
    tick_count: AtomicU64,
    population: AtomicU64,
    food_count: AtomicU64,
    busy_nanos: AtomicU64,
    log_interval: u64,
    counters: Mutex<HashMap<String, u64>>,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl Metrics {
    /// A collector that logs every `log_interval` ticks. Zero disables the
    /// periodic line.
    #[must_use]
    pub fn new(log_interval: u64) -> Self {
        Self {
            tick_count: AtomicU64::new(0),
            population: AtomicU64::new(0),
            food_count: AtomicU64::new(0),
            busy_nanos: AtomicU64::new(0),
            log_interval,
            counters: Mutex::new(HashMap::new()),
            start_time: Instant::now(),
        }
    }

    /// Records a completed tick. Returns `true` when a summary was logged.
    pub fn record_tick(&self, duration: Duration, population: usize, food: usize) -> bool {
        let tick = self.tick_count.fetch_add(1, Ordering::Relaxed) + 1;
        self.population.store(population as u64, Ordering::Relaxed);
        self.food_count.store(food as u64, Ordering::Relaxed);
        self.busy_nanos
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);

        if self.log_interval == 0 || tick % self.log_interval != 0 {
            return false;
        }
        tracing::info!(
            tick,
            population,
            food,
            duration_us = duration.as_micros() as u64,
            mean_tick_us = self.mean_tick_duration().as_micros() as u64,
            "Simulation tick"
        );
        true
    }

    /// Adds `by` to the named counter.
    pub fn add_to_counter(&self, name: &str, by: u64) {
        let mut counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        *counters.entry(name.to_string()).or_insert(0) += by;
    }

    pub fn increment_counter(&self, name: &str) {
        self.add_to_counter(name, 1);
    }

    /// Current value of a named counter; zero if never touched.
    #[must_use]
    pub fn counter(&self, name: &str) -> u64 {
        let counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        counters.get(name).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn population(&self) -> u64 {
        self.population.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn food_count(&self) -> u64 {
        self.food_count.load(Ordering::Relaxed)
    }

    /// Average time spent inside recorded ticks.
    #[must_use]
    pub fn mean_tick_duration(&self) -> Duration {
        let ticks = self.tick_count();
        if ticks == 0 {
            return Duration::ZERO;
        }
        Duration::from_nanos(self.busy_nanos.load(Ordering::Relaxed) / ticks)
    }

    /// Gets elapsed time since metrics creation.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Logs a simulation event.
    pub fn log_event(&self, event_type: &str, details: &str) {
        tracing::info!(event_type, details, "Simulation event");
    }
}

/// Installs the global fmt subscriber. `RUST_LOG` overrides the default
/// `info` filter. Calling it twice is harmless.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = Metrics::new(10);
        assert_eq!(metrics.tick_count(), 0);
        assert_eq!(metrics.mean_tick_duration(), Duration::ZERO);
    }

    #[test]
    fn test_record_tick_logs_on_interval() {
        let metrics = Metrics::new(3);
        let logged: Vec<bool> = (0..6)
            .map(|_| metrics.record_tick(Duration::from_millis(2), 12, 40))
            .collect();
        assert_eq!(logged, vec![false, false, true, false, false, true]);
        assert_eq!(metrics.tick_count(), 6);
        assert_eq!(metrics.population(), 12);
        assert_eq!(metrics.food_count(), 40);
        assert_eq!(metrics.mean_tick_duration(), Duration::from_millis(2));
    }

    #[test]
    fn test_zero_interval_never_logs() {
        let metrics = Metrics::new(0);
        assert!(!metrics.record_tick(Duration::from_millis(1), 1, 1));
    }

    #[test]
    fn test_counters() {
        let metrics = Metrics::default();
        metrics.increment_counter("births");
        metrics.increment_counter("births");
        metrics.add_to_counter("attacks", 5);
        assert_eq!(metrics.counter("births"), 2);
        assert_eq!(metrics.counter("attacks"), 5);
        assert_eq!(metrics.counter("unknown"), 0);
    }

    #[test]
    fn test_init_logging_twice() {
        init_logging();
        init_logging();
    }
}
