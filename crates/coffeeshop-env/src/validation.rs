//! Validation of environment configurations

use crate::environment::EnvironmentConfig;
use crate::error::{ConfigurationError, Result};
use tracing::{debug, warn};
use url::{Host, Url};

impl EnvironmentConfig {
    /// Check that every field is present and well formed.
    ///
    /// Conventions that do not prevent the application from running (an
    /// audience that differs from the API URL, plain HTTP in production) are
    /// logged as warnings instead of failing.
    pub fn validate(&self) -> Result<()> {
        require("apiServerUrl", &self.api_server_url)?;
        require("auth0.url", &self.auth0.url)?;
        require("auth0.audience", &self.auth0.audience)?;
        require("auth0.clientId", &self.auth0.client_id)?;
        require("auth0.callbackURL", &self.auth0.callback_url)?;

        let api_url = parse_http_url("apiServerUrl", &self.api_server_url)?;
        let callback_url = parse_http_url("auth0.callbackURL", &self.auth0.callback_url)?;
        validate_tenant("auth0.url", &self.auth0.url)?;

        if !self.audience_matches_api() {
            warn!(
                audience = %self.auth0.audience,
                api_server_url = %self.api_server_url,
                "Auth0 audience does not refer to the API server"
            );
        }

        if self.production {
            for (field, url) in [("apiServerUrl", &api_url), ("auth0.callbackURL", &callback_url)] {
                if url.scheme() == "http" && !is_loopback(url) {
                    warn!(field, url = %url, "Production environment uses plain HTTP");
                }
            }
        }

        debug!(profile = %self.profile(), "Environment configuration is valid");
        Ok(())
    }

    /// Whether `auth0.audience` and `apiServerUrl` name the same backend
    pub fn audience_matches_api(&self) -> bool {
        self.auth0.audience.trim().trim_end_matches('/')
            == self.api_server_url.trim().trim_end_matches('/')
    }
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ConfigurationError::missing(field));
    }
    Ok(())
}

pub(crate) fn parse_http_url(field: &str, value: &str) -> Result<Url> {
    let url = Url::parse(value.trim())
        .map_err(|e| ConfigurationError::invalid_url(field, value, e))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(ConfigurationError::invalid_url(
                field,
                value,
                format!("unsupported scheme '{scheme}', expected http or https"),
            ))
        }
    }

    if url.host().is_none() {
        return Err(ConfigurationError::invalid_url(field, value, "missing host"));
    }

    Ok(url)
}

fn validate_tenant(field: &str, value: &str) -> Result<()> {
    if value.contains("://") {
        return Err(ConfigurationError::invalid_value(
            field,
            "expected a tenant domain prefix without a scheme",
        ));
    }

    if value.contains('/') || value.chars().any(char::is_whitespace) {
        return Err(ConfigurationError::invalid_value(
            field,
            "tenant domain must not contain '/' or whitespace",
        ));
    }

    if value.starts_with('.') || value.ends_with('.') {
        return Err(ConfigurationError::invalid_value(
            field,
            "tenant domain must not start or end with '.'",
        ));
    }

    Ok(())
}

fn is_loopback(url: &Url) -> bool {
    match url.host() {
        Some(Host::Domain(domain)) => domain == "localhost",
        Some(Host::Ipv4(addr)) => addr.is_loopback(),
        Some(Host::Ipv6(addr)) => addr.is_loopback(),
        None => false,
    }
}
