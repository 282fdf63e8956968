//! Layered loading of environment configurations
//!
//! Sources are merged in this order, later ones winning:
//! 1. The compiled-in declaration for the build profile
//! 2. A TOML or JSON file
//! 3. `COFFEESHOP_*` environment variables (`__` separates nested keys)

use crate::constants::{DEFAULT_CONFIG_FILE, ENV_PREFIX};
use crate::environment::{BuildProfile, EnvironmentConfig};
use crate::error::{ConfigurationError, Result};
use figment::{
    providers::{Env, Format, Json, Serialized, Toml},
    value::{Uncased, UncasedStr},
    Figment,
};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads a configuration from files and environment variables
pub trait ConfigLoader<T> {
    /// Load from `path`, or from the default file when present
    fn load(path: Option<PathBuf>) -> Result<T>;

    /// Load from a file that must exist
    fn load_from_file(path: &Path) -> Result<T>;

    /// Re-apply environment variables carrying `prefix` on top of `config`
    fn apply_env_overrides(config: &mut T, prefix: &str) -> Result<()>;
}

impl ConfigLoader<EnvironmentConfig> for EnvironmentConfig {
    fn load(path: Option<PathBuf>) -> Result<EnvironmentConfig> {
        let path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        let mut figment = base_figment(BuildProfile::current());

        if path.exists() {
            debug!("Loading environment from: {}", path.display());
            figment = merge_file(figment, &path);
        } else {
            debug!(
                "Environment file not found, using compiled-in values: {}",
                path.display()
            );
        }

        extract(figment.merge(env_provider(ENV_PREFIX)))
    }

    fn load_from_file(path: &Path) -> Result<EnvironmentConfig> {
        if !path.exists() {
            return Err(ConfigurationError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Environment file not found: {}", path.display()),
            )));
        }

        debug!("Loading environment from: {}", path.display());
        let figment = merge_file(base_figment(BuildProfile::current()), path);
        extract(figment.merge(env_provider(ENV_PREFIX)))
    }

    fn apply_env_overrides(config: &mut EnvironmentConfig, prefix: &str) -> Result<()> {
        let figment =
            Figment::from(Serialized::defaults(config.clone())).merge(env_provider(prefix));

        *config = extract(figment)?;
        Ok(())
    }
}

impl EnvironmentConfig {
    /// Load configuration from file and environment
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        match config_path {
            Some(path) => <Self as ConfigLoader<Self>>::load_from_file(path),
            None => <Self as ConfigLoader<Self>>::load(None),
        }
    }
}

fn base_figment(profile: BuildProfile) -> Figment {
    Figment::from(Serialized::defaults(EnvironmentConfig::for_profile(profile)))
}

fn merge_file(figment: Figment, path: &Path) -> Figment {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => figment.merge(Json::file(path)),
        _ => figment.merge(Toml::file(path)),
    }
}

// `split` and `map` reset the lowercase flag, so it has to be set last
fn env_provider(prefix: &str) -> Env {
    Env::prefixed(prefix)
        .split("__")
        .map(wire_key)
        .lowercase(false)
}

/// Map environment keys onto the camelCase field names, lowercasing the rest
fn wire_key(key: &UncasedStr) -> Uncased<'_> {
    let lowered = key.as_str().to_ascii_lowercase();
    match lowered.as_str() {
        "apiserverurl" => "apiServerUrl".into(),
        "auth0.clientid" => "auth0.clientId".into(),
        "auth0.callbackurl" => "auth0.callbackURL".into(),
        _ => lowered.into(),
    }
}

fn extract(figment: Figment) -> Result<EnvironmentConfig> {
    let config: EnvironmentConfig = figment.extract()?;
    config.validate()?;
    Ok(config)
}
