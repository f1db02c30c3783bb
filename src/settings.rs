use aisle_navigation::{FloorPlan, PlannerConfig};
use config::{Config, ConfigError, Environment, File, FileFormat, Source};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{error, info};

pub const DEFAULT_SETTINGS_PATH: &str = "config/default.toml";
const ENV_PREFIX: &str = "AISLE_GUIDE";

/// Everything the planner binary needs for one run.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// TOML file describing the floor.
    pub floor_plan: PathBuf,
    /// Rack names in visiting order.
    #[serde(default)]
    pub route: Vec<String>,
    #[serde(default)]
    pub planner: PlannerConfig,
}

/// Loads settings from `path`, then applies `AISLE_GUIDE__*` environment overrides.
pub fn load_settings(path: &str) -> Result<Settings, ConfigError> {
    info!("Attempting to load settings from {}", path);

    let settings = build_settings(
        File::new(path, FileFormat::Toml).required(true),
        env_overrides(),
    );

    match settings {
        Ok(settings) => {
            info!(floor_plan = %settings.floor_plan.display(), stops = settings.route.len(), "Settings loaded");
            Ok(settings)
        }
        Err(e) => {
            error!("Failed to load settings: {}", e);
            Err(e)
        }
    }
}

fn env_overrides() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}

/// Layers `overrides` on top of `file` and deserializes the result.
fn build_settings<S>(file: S, overrides: Environment) -> Result<Settings, ConfigError>
where
    S: Source + Send + Sync + 'static,
{
    Config::builder()
        .add_source(file)
        .add_source(overrides)
        .build()?
        .try_deserialize()
}

/// Loads a floor plan from a TOML file.
pub fn load_floor_plan(path: &Path) -> Result<FloorPlan, ConfigError> {
    Config::builder()
        .add_source(File::new(&path.to_string_lossy(), FileFormat::Toml).required(true))
        .build()?
        .try_deserialize()
}
