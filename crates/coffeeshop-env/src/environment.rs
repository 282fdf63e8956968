//! Environment configuration for the coffee shop client
//!
//! One [`EnvironmentConfig`] exists per build profile. The profile is chosen
//! at compile time through the `production` cargo feature and the matching
//! declaration is exposed process-wide by [`environment`].

use crate::constants;
use crate::error::{ConfigurationError, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Build profile selecting which environment declaration is compiled in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildProfile {
    Development,
    Production,
}

impl BuildProfile {
    /// Profile this crate was compiled for
    pub const fn current() -> Self {
        if cfg!(feature = "production") {
            Self::Production
        } else {
            Self::Development
        }
    }

    pub fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for BuildProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildProfile {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(ConfigurationError::invalid_value(
                "profile",
                format!("unknown build profile '{other}', expected 'development' or 'production'"),
            )),
        }
    }
}

/// Environment-specific settings read by the application at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentConfig {
    /// Deployment mode, `false` for development builds
    pub production: bool,

    /// Base URL of the backend API
    pub api_server_url: String,

    /// Identity provider settings
    pub auth0: Auth0Config,
}

/// Auth0 tenant and application settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Auth0Config {
    /// Tenant domain prefix, e.g. `dev-11opmcqr.eu`
    pub url: String,

    /// Identifier of the API the issued tokens target
    pub audience: String,

    /// Public client identifier issued by Auth0
    pub client_id: String,

    /// Where Auth0 redirects after a completed login
    #[serde(rename = "callbackURL")]
    pub callback_url: String,
}

static ENVIRONMENT: Lazy<EnvironmentConfig> =
    Lazy::new(|| EnvironmentConfig::for_profile(BuildProfile::current()));

/// The environment compiled into this build
pub fn environment() -> &'static EnvironmentConfig {
    &ENVIRONMENT
}

impl EnvironmentConfig {
    /// Development declaration
    pub fn development() -> Self {
        Self {
            production: false,
            api_server_url: constants::API_SERVER_URL.to_string(),
            auth0: Auth0Config {
                url: constants::AUTH0_URL.to_string(),
                audience: constants::AUTH0_AUDIENCE.to_string(),
                client_id: constants::AUTH0_CLIENT_ID.to_string(),
                callback_url: constants::AUTH0_CALLBACK_URL.to_string(),
            },
        }
    }

    /// Production declaration
    pub fn production() -> Self {
        Self {
            production: true,
            ..Self::development()
        }
    }

    pub fn for_profile(profile: BuildProfile) -> Self {
        match profile {
            BuildProfile::Development => Self::development(),
            BuildProfile::Production => Self::production(),
        }
    }

    /// Profile implied by the `production` flag
    pub fn profile(&self) -> BuildProfile {
        if self.production {
            BuildProfile::Production
        } else {
            BuildProfile::Development
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigurationError::ParseError {
            details: format!("Failed to serialize environment as JSON: {e}"),
        })
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| ConfigurationError::ParseError {
            details: format!("Failed to parse environment JSON: {e}"),
        })
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigurationError::ParseError {
            details: format!("Failed to serialize environment as TOML: {e}"),
        })
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ConfigurationError::ParseError {
            details: format!("Failed to parse environment TOML: {e}"),
        })
    }

    /// Generate an example configuration file for the current build profile
    pub fn generate_example() -> Result<String> {
        Self::for_profile(BuildProfile::current()).to_toml()
    }
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self::for_profile(BuildProfile::current())
    }
}
