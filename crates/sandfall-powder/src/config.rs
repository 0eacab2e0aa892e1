//! Runner configuration with layered loading
//!
//! Configuration is loaded from multiple sources (lowest to highest priority):
//! 1. Compiled defaults
//! 2. `powder.ron` in the working directory, or the file given on the
//!    command line
//! 3. Environment variables prefixed with `SANDFALL_`
//!
//! Example environment variable: `SANDFALL_WORLD__SEED=7`

use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use sandfall_core::world::GridDims;
use serde::{Deserialize, Serialize};

/// Main runner configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PowderConfig {
    #[serde(default)]
    pub world: WorldConfig,

    #[serde(default)]
    pub run: RunConfig,

    #[serde(default)]
    pub scenario: ScenarioConfig,
}

/// World size and seed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    pub chunks_x: usize,
    pub chunks_y: usize,
    pub chunk_width: usize,
    pub chunk_height: usize,
    /// Seed of the world's random source
    pub seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            chunks_x: 4,
            chunks_y: 3,
            chunk_width: 24,
            chunk_height: 16,
            seed: 0,
        }
    }
}

impl WorldConfig {
    pub fn dims(&self) -> GridDims {
        GridDims::new(
            self.chunks_x,
            self.chunks_y,
            self.chunk_width,
            self.chunk_height,
        )
    }
}

/// How long to run and how often to report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub ticks: u64,
    /// Log tick statistics every N ticks (0 disables)
    pub report_every: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            ticks: 200,
            report_every: 50,
        }
    }
}

/// Scripted brush strokes standing in for user input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub strokes: Vec<StrokeConfig>,
}

/// One brush stroke. Applied at `start` and then every `every` ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeConfig {
    /// Element key, or "erase" for the background element
    pub element: String,
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub radius: u32,
    #[serde(default)]
    pub start: u64,
    /// 0 applies the stroke once
    #[serde(default)]
    pub every: u64,
}

impl StrokeConfig {
    pub fn new(element: &str, x: i32, y: i32, radius: u32) -> Self {
        Self {
            element: element.to_string(),
            x,
            y,
            radius,
            start: 0,
            every: 0,
        }
    }

    pub fn repeating(mut self, start: u64, every: u64) -> Self {
        self.start = start;
        self.every = every;
        self
    }
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        // Sand and water pouring onto a stone shelf, a burning log, and a
        // lava pool next to the water
        let mut strokes = Vec::new();
        for x in 10..40 {
            strokes.push(StrokeConfig::new("stone", x, 30, 0));
        }
        for x in 50..70 {
            strokes.push(StrokeConfig::new("wood", x, 38, 0));
        }
        strokes.extend([
            StrokeConfig::new("sand", 20, 4, 2).repeating(0, 10),
            StrokeConfig::new("water", 34, 4, 2).repeating(5, 10),
            StrokeConfig::new("fire", 60, 36, 1),
            StrokeConfig::new("lava", 84, 40, 3),
            StrokeConfig::new("dust", 70, 10, 2),
        ]);
        Self { strokes }
    }
}

impl PowderConfig {
    /// Load configuration with layered priority:
    /// 1. Compiled defaults (lowest priority)
    /// 2. `path` if given (must exist), otherwise `powder.ron` if it exists
    /// 3. Environment variables prefixed with `SANDFALL_` (highest priority)
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            // Layer 1: Compiled defaults
            .set_default("world.chunks_x", 4_i64)?
            .set_default("world.chunks_y", 3_i64)?
            .set_default("world.chunk_width", 24_i64)?
            .set_default("world.chunk_height", 16_i64)?
            .set_default("world.seed", 0_i64)?
            .set_default("run.ticks", 200_i64)?
            .set_default("run.report_every", 50_i64)?;

        // Layer 2: Config file
        builder = match path {
            Some(path) => builder.add_source(File::from(path).format(FileFormat::Ron)),
            None => builder.add_source(
                File::with_name("powder")
                    .format(FileFormat::Ron)
                    .required(false),
            ),
        };

        // Layer 3: Environment variables (SANDFALL_RUN__TICKS, etc.)
        builder = builder.add_source(Environment::with_prefix("SANDFALL").separator("__"));

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PowderConfig::default();
        assert_eq!(config.world.dims(), GridDims::new(4, 3, 24, 16));
        assert_eq!(config.run.ticks, 200);
        assert!(!config.scenario.strokes.is_empty());
        // Every default stroke lands inside the default world
        let dims = config.world.dims();
        for stroke in &config.scenario.strokes {
            assert!(stroke.x > 0 && (stroke.x as usize) < dims.total_width() - 1);
            assert!(stroke.y > 0 && (stroke.y as usize) < dims.total_height() - 1);
        }
    }

    #[test]
    fn test_load_config_from_file() {
        let path = std::env::temp_dir().join(format!("sandfall-powder-{}.ron", std::process::id()));
        std::fs::write(
            &path,
            r#"(
                world: (chunks_x: 2, chunks_y: 2, chunk_width: 8, chunk_height: 8, seed: 9),
                scenario: (strokes: [(element: "sand", x: 3, y: 3, radius: 1, every: 4)]),
            )"#,
        )
        .unwrap();

        let config = PowderConfig::load(Some(&path)).expect("Failed to load config");
        std::fs::remove_file(&path).ok();

        assert_eq!(config.world.dims(), GridDims::new(2, 2, 8, 8));
        assert_eq!(config.world.seed, 9);
        // Missing section falls back to compiled defaults
        assert_eq!(config.run.report_every, 50);
        assert_eq!(
            config.scenario.strokes,
            vec![StrokeConfig::new("sand", 3, 3, 1).repeating(0, 4)]
        );
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let path = Path::new("/nonexistent/sandfall/powder.ron");
        assert!(PowderConfig::load(Some(path)).is_err());
    }
}
