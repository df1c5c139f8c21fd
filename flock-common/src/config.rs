use crate::sim_params::{Bounds, SimParams};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

// Size of the simulation area, loaded from config.toml
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct WorldConfig {
    pub width: f32,
    pub height: f32,
}

// Flocking rule tunables. Every key is optional; missing keys take the SimParams defaults.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct FlockConfig {
    pub population_size: usize,
    pub visual_range: f32,
    pub min_distance: f32,
    pub centering_factor: f32,
    pub avoid_factor: f32,
    pub matching_factor: f32,
    pub speed_limit: f32,
    pub margin: f32,
    pub turn_factor: f32,
    pub history_length: usize,
}

impl Default for FlockConfig {
    fn default() -> Self {
        let defaults = SimParams::default();
        FlockConfig {
            population_size: defaults.population_size,
            visual_range: defaults.visual_range,
            min_distance: defaults.min_distance,
            centering_factor: defaults.centering_factor,
            avoid_factor: defaults.avoid_factor,
            matching_factor: defaults.matching_factor,
            speed_limit: defaults.speed_limit,
            margin: defaults.margin,
            turn_factor: defaults.turn_factor,
            history_length: defaults.history_length,
        }
    }
}

// How long to run and how often to record
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct RunConfig {
    pub total_ticks: u32,
    #[serde(default = "default_record_interval_ticks")]
    pub record_interval_ticks: u32,
    /// Seed for initial placement. A fresh OS seed is used when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_record_interval_ticks() -> u32 {
    60 // One snapshot per second of a 60 fps presentation loop
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Bincode,
    MessagePack,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Bincode => "bin",
            OutputFormat::MessagePack => "msgpack",
        }
    }
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Json
}

// Configuration for output settings, loaded from config.toml
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct OutputConfig {
    pub base_filename: String,
    #[serde(default = "default_output_format")]
    pub format: OutputFormat,
    pub save_stats: bool,
    pub save_positions: bool,
    /// Include per-boid position and heading in every snapshot.
    #[serde(default)]
    pub save_boids_in_snapshot: bool,
    /// Also copy each boid's trail into the snapshot. Only used with `save_boids_in_snapshot`.
    #[serde(default)]
    pub save_trails: bool,
}

// Main simulation configuration structure, loaded from config.toml.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SimulationConfig {
    pub world: WorldConfig,
    #[serde(default)]
    pub flock: FlockConfig,
    pub run: RunConfig,
    pub output: OutputConfig,
}

impl SimulationConfig {
    /// Loads the simulation configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();

        let config_str = std::fs::read_to_string(path_ref)
            .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path_ref.display(), e))?;
        Self::from_toml_str(&config_str)
            .map_err(|e| anyhow::anyhow!("Invalid config '{}': {}", path_ref.display(), e))
    }

    /// Parses and validates a configuration from TOML text.
    pub fn from_toml_str(config_str: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(config_str)
            .map_err(|e| anyhow::anyhow!("Failed to parse TOML: {}", e))?;

        config.get_sim_params().validate()?;
        if config.output.base_filename.trim().is_empty() {
            anyhow::bail!("base_filename must not be empty.");
        }

        Ok(config)
    }

    /// Converts the configuration into the parameters read by every step.
    pub fn get_sim_params(&self) -> SimParams {
        let flock = &self.flock;
        SimParams {
            population_size: flock.population_size,
            visual_range: flock.visual_range,
            min_distance: flock.min_distance,
            centering_factor: flock.centering_factor,
            avoid_factor: flock.avoid_factor,
            matching_factor: flock.matching_factor,
            speed_limit: flock.speed_limit,
            margin: flock.margin,
            turn_factor: flock.turn_factor,
            history_length: flock.history_length,
            bounds: Bounds::new(self.world.width, self.world.height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        [world]
        width = 1000.0
        height = 800.0

        [run]
        total_ticks = 100

        [output]
        base_filename = "flock_test"
        save_stats = true
        save_positions = false
    "#;

    #[test]
    fn minimal_config_takes_defaults() {
        let config = SimulationConfig::from_toml_str(MINIMAL).unwrap();
        let params = config.get_sim_params();

        assert_eq!(params.bounds, Bounds::new(1000.0, 800.0));
        assert_eq!(params.population_size, 12);
        assert_eq!(params.visual_range, 75.0);
        assert_eq!(params.margin, 200.0);
        assert_eq!(config.run.record_interval_ticks, 60);
        assert_eq!(config.run.seed, None);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(!config.output.save_boids_in_snapshot);
    }

    #[test]
    fn flock_section_overrides_defaults() {
        let text = format!(
            "{}\n[flock]\npopulation_size = 30\nspeed_limit = 8.5\n",
            MINIMAL.replace("[output]", "[output]\nformat = \"messagepack\"")
        );
        let config = SimulationConfig::from_toml_str(&text).unwrap();
        let params = config.get_sim_params();

        assert_eq!(params.population_size, 30);
        assert_eq!(params.speed_limit, 8.5);
        assert_eq!(params.min_distance, 20.0);
        assert_eq!(config.output.format, OutputFormat::MessagePack);
        assert_eq!(config.output.format.extension(), "msgpack");
    }

    #[test]
    fn invalid_world_is_rejected() {
        let text = MINIMAL.replace("width = 1000.0", "width = 0.0");
        let err = SimulationConfig::from_toml_str(&text).unwrap_err();
        assert!(err.to_string().contains("width"));
    }

    #[test]
    fn unknown_format_is_rejected() {
        let text = MINIMAL.replace("[output]", "[output]\nformat = \"yaml\"");
        assert!(SimulationConfig::from_toml_str(&text).is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = SimulationConfig::load("does/not/exist.toml").unwrap_err();
        assert!(err.to_string().contains("does/not/exist.toml"));
    }
}
