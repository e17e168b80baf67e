//! Host configuration: config file discovery, loading, and seed override.

use std::path::{Path, PathBuf};

use popshot_core::config::{ConfigError, GameConfig};
use popshot_core::constants::DEFAULT_SEED;
use popshot_sim::SimConfig;

/// Environment variable naming the config file when no CLI argument is given.
pub const CONFIG_ENV: &str = "POPSHOT_CONFIG";
/// Environment variable overriding the RNG seed.
pub const SEED_ENV: &str = "POPSHOT_SEED";

/// The first CLI argument wins over the environment.
pub fn config_path(mut args: impl Iterator<Item = String>, env_value: Option<String>) -> Option<PathBuf> {
    args.next()
        .or(env_value)
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from)
}

/// Load and validate the game config. No path means defaults.
pub fn load_game_config(path: Option<&Path>) -> Result<GameConfig, ConfigError> {
    match path {
        Some(path) => {
            log::info!("loading config from {}", path.display());
            let text = std::fs::read_to_string(path)?;
            GameConfig::from_json_str(&text)
        }
        None => {
            log::info!("no config file given, using defaults");
            Ok(GameConfig::default())
        }
    }
}

/// Parse the seed override, falling back to the default seed.
pub fn seed_from(value: Option<&str>) -> Result<u64, ConfigError> {
    match value.map(str::trim) {
        None | Some("") => Ok(DEFAULT_SEED),
        Some(raw) => raw
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("{SEED_ENV} must be an unsigned integer, got {raw:?}"))),
    }
}

/// Build the full simulation config from the process arguments and environment.
pub fn load_sim_config(
    args: impl Iterator<Item = String>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<SimConfig, ConfigError> {
    let path = config_path(args, env(CONFIG_ENV));
    let game = load_game_config(path.as_deref())?;
    let seed = seed_from(env(SEED_ENV).as_deref())?;
    Ok(SimConfig { seed, game })
}
