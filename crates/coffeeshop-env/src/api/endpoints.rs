//! Resolution of backend routes against `apiServerUrl`

use crate::environment::EnvironmentConfig;
use crate::error::{ConfigurationError, Result};
use crate::validation::parse_http_url;
use std::fmt;
use url::Url;

/// Backend routes resolved against the API base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoints {
    base: Url,
}

impl ApiEndpoints {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base = parse_http_url("apiServerUrl", base_url)?;

        // Url::join replaces the last segment unless the path ends with '/'
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.set_query(None);
        base.set_fragment(None);

        Ok(Self { base })
    }

    pub fn from_environment(env: &EnvironmentConfig) -> Result<Self> {
        Self::new(&env.api_server_url)
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Resolve `path` below the base URL, keeping any base path prefix
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        let relative = path.trim_start_matches('/');
        self.base.join(relative).map_err(|e| {
            ConfigurationError::invalid_url("apiServerUrl", &format!("{}{relative}", self.base), e)
        })
    }

    /// `GET /drinks`, `POST /drinks`
    pub fn drinks(&self) -> Result<Url> {
        self.endpoint("drinks")
    }

    /// `GET /drinks-detail`
    pub fn drinks_detail(&self) -> Result<Url> {
        self.endpoint("drinks-detail")
    }

    /// `PATCH /drinks/{id}`, `DELETE /drinks/{id}`
    pub fn drink(&self, id: impl fmt::Display) -> Result<Url> {
        self.endpoint(&format!("drinks/{id}"))
    }
}

impl fmt::Display for ApiEndpoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base)
    }
}
