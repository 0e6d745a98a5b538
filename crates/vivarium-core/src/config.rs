//! Configuration loading and typed config structures for the Vivarium
//! simulation.
//!
//! The canonical configuration lives in `vivarium-config.yaml` at the
//! project root. This module defines strongly-typed structs that mirror the
//! YAML structure and a loader that reads the file. Every field has a
//! default, so a partial file (or none) still yields a runnable world.
//!
//! Decision oracle connection settings (URL, keys, model) are deliberately
//! absent: they come from the environment, see `vivarium-oracle`.

use std::path::Path;

use serde::Deserialize;
use vivarium_agents::{BehaviorConfig, InteractionConfig, VitalsConfig};

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `vivarium-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// World geometry, timing and seed.
    #[serde(default)]
    pub world: WorldConfig,

    /// Metabolism, aging and growth.
    #[serde(default)]
    pub vitals: VitalsConfig,

    /// Local policy thresholds and feeding geometry.
    #[serde(default)]
    pub behavior: BehaviorConfig,

    /// Combat and breeding.
    #[serde(default)]
    pub interaction: InteractionConfig,

    /// Decision oracle cadence.
    #[serde(default)]
    pub oracle: OracleConfig,

    /// Initial population and resources.
    #[serde(default)]
    pub population: PopulationConfig,

    /// Run bounds.
    #[serde(default)]
    pub simulation: SimulationBounds,

    /// Logging.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }
}

/// World-level configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WorldConfig {
    /// Human-readable simulation name.
    #[serde(default = "default_world_name")]
    pub name: String,

    /// Playfield width.
    #[serde(default = "default_width")]
    pub width: f64,

    /// Playfield height.
    #[serde(default = "default_height")]
    pub height: f64,

    /// Inset keeping wander targets away from the edges.
    #[serde(default = "default_margin")]
    pub margin: f64,

    /// Wall-clock milliseconds between ticks (default: 16, about 60 per second).
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Tick-delta scalar applied to every per-tick rate (default: 1.0).
    #[serde(default = "default_tick_delta")]
    pub tick_delta: f64,

    /// Random seed. Runs are reproducible only when set.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: default_world_name(),
            width: default_width(),
            height: default_height(),
            margin: default_margin(),
            tick_interval_ms: default_tick_interval_ms(),
            tick_delta: default_tick_delta(),
            seed: None,
        }
    }
}

fn default_world_name() -> String {
    String::from("Vivarium")
}

const fn default_width() -> f64 {
    800.0
}

const fn default_height() -> f64 {
    600.0
}

const fn default_margin() -> f64 {
    50.0
}

const fn default_tick_interval_ms() -> u64 {
    16
}

const fn default_tick_delta() -> f64 {
    1.0
}

/// Decision oracle cadence.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OracleConfig {
    /// Whether minions consult the oracle at all (default: true).
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Lower bound of the randomized cooldown between requests, in ticks
    /// (default: 120).
    #[serde(default = "default_cooldown_min")]
    pub cooldown_min: f64,

    /// Exclusive upper bound of the cooldown (default: 180).
    #[serde(default = "default_cooldown_max")]
    pub cooldown_max: f64,

    /// Skip a new request while the minion still has one outstanding
    /// (default: false, meaning several may be in flight and the last
    /// reply wins).
    #[serde(default)]
    pub skip_when_pending: bool,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cooldown_min: default_cooldown_min(),
            cooldown_max: default_cooldown_max(),
            skip_when_pending: false,
        }
    }
}

const fn default_true() -> bool {
    true
}

const fn default_cooldown_min() -> f64 {
    120.0
}

const fn default_cooldown_max() -> f64 {
    180.0
}

/// Initial world contents, used by the engine to seed a run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PopulationConfig {
    /// Founders spawned at start (default: 6).
    #[serde(default = "default_seed_minions")]
    pub seed_minions: u32,

    /// Number of founding families; founders are dealt round-robin
    /// (default: 2).
    #[serde(default = "default_families")]
    pub families: u32,

    /// Food sources placed at start (default: 4).
    #[serde(default = "default_food_sources")]
    pub food_sources: u32,

    /// Water sources placed at start (default: 2).
    #[serde(default = "default_water_sources")]
    pub water_sources: u32,

    /// Obstacles placed at start (default: 3).
    #[serde(default = "default_obstacles")]
    pub obstacles: u32,

    /// Founder attack (default: 10).
    #[serde(default = "default_atk")]
    pub atk: f64,

    /// Founder defense (default: 5).
    #[serde(default = "default_def")]
    pub def: f64,

    /// Founder speed (default: 1.5).
    #[serde(default = "default_speed")]
    pub speed: f64,

    /// Founder hit points (default: 100).
    #[serde(default = "default_max_hp")]
    pub max_hp: f64,

    /// Relative random spread applied to founder stats (default: 0.2).
    #[serde(default = "default_stat_jitter")]
    pub stat_jitter: f64,

    /// Trait tags founders draw from.
    #[serde(default = "default_trait_pool")]
    pub trait_pool: Vec<String>,

    /// Traits drawn per founder (default: 1).
    #[serde(default = "default_traits_per_minion")]
    pub traits_per_minion: usize,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            seed_minions: default_seed_minions(),
            families: default_families(),
            food_sources: default_food_sources(),
            water_sources: default_water_sources(),
            obstacles: default_obstacles(),
            atk: default_atk(),
            def: default_def(),
            speed: default_speed(),
            max_hp: default_max_hp(),
            stat_jitter: default_stat_jitter(),
            trait_pool: default_trait_pool(),
            traits_per_minion: default_traits_per_minion(),
        }
    }
}

const fn default_seed_minions() -> u32 {
    6
}

const fn default_families() -> u32 {
    2
}

const fn default_food_sources() -> u32 {
    4
}

const fn default_water_sources() -> u32 {
    2
}

const fn default_obstacles() -> u32 {
    3
}

const fn default_atk() -> f64 {
    10.0
}

const fn default_def() -> f64 {
    5.0
}

const fn default_speed() -> f64 {
    1.5
}

const fn default_max_hp() -> f64 {
    100.0
}

const fn default_stat_jitter() -> f64 {
    0.2
}

fn default_trait_pool() -> Vec<String> {
    ["aggressive", "timid", "swift", "hardy", "curious"]
        .into_iter()
        .map(String::from)
        .collect()
}

const fn default_traits_per_minion() -> usize {
    1
}

/// Run bounds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SimulationBounds {
    /// Stop after this many ticks. `0` runs until stopped (default: 0).
    #[serde(default)]
    pub max_ticks: u64,

    /// Stop once every minion is dead (default: false).
    #[serde(default)]
    pub stop_on_extinction: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset (default: `info`).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: `pretty` or `json` (default: `pretty`).
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    String::from("info")
}

fn default_log_format() -> String {
    String::from("pretty")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_is_the_default_world() {
        let config = SimulationConfig::parse("{}").unwrap();
        assert_eq!(config, SimulationConfig::default());
        assert_eq!(config.world.tick_interval_ms, 16);
        assert!(config.oracle.enabled);
        assert!(!config.oracle.skip_when_pending);
        assert_eq!(config.simulation.max_ticks, 0);
    }

    #[test]
    fn nested_sections_override_selectively() {
        let yaml = r"
world:
  width: 1024
  seed: 7
vitals:
  hunger_rate: 0.1
behavior:
  drink_radius: 30
oracle:
  skip_when_pending: true
simulation:
  max_ticks: 500
  stop_on_extinction: true
logging:
  format: json
";
        let config = SimulationConfig::parse(yaml).unwrap();
        assert!((config.world.width - 1024.0).abs() < f64::EPSILON);
        assert!((config.world.height - 600.0).abs() < f64::EPSILON);
        assert_eq!(config.world.seed, Some(7));
        assert!((config.vitals.hunger_rate - 0.1).abs() < f64::EPSILON);
        assert!((config.vitals.thirst_rate - 0.06).abs() < f64::EPSILON);
        assert!((config.behavior.drink_radius - 30.0).abs() < f64::EPSILON);
        assert!(config.oracle.skip_when_pending);
        assert_eq!(config.simulation.max_ticks, 500);
        assert!(config.simulation.stop_on_extinction);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        let result = SimulationConfig::parse("world: [unclosed");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = SimulationConfig::from_file(Path::new("/nonexistent/vivarium.yaml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn repository_config_file_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../vivarium-config.yaml");
        let config = SimulationConfig::from_file(&path).unwrap();
        assert!(config.population.seed_minions > 0);
    }
}
