//! Auth0 endpoints and login redirects derived from the environment
//!
//! The client uses the implicit flow: the browser is sent to the tenant's
//! `/authorize` endpoint and comes back to `callbackURL` with the access
//! token in the URL fragment.

use crate::constants::AUTH0_DOMAIN_SUFFIX;
use crate::environment::Auth0Config;
use crate::error::{ConfigurationError, Result};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Errors raised while reading the redirect Auth0 sends back
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthCallbackError {
    #[error("Authorization denied: {error}: {description}")]
    Denied { error: String, description: String },

    #[error("Callback does not contain an access token")]
    MissingToken,

    #[error("Invalid expires_in value: {0}")]
    InvalidExpiry(String),
}

impl Auth0Config {
    /// Fully qualified tenant domain, e.g. `dev-11opmcqr.eu.auth0.com`
    pub fn domain(&self) -> String {
        let url = self.url.trim().trim_end_matches('/');
        if url.ends_with(AUTH0_DOMAIN_SUFFIX) {
            url.to_string()
        } else {
            format!("{url}{AUTH0_DOMAIN_SUFFIX}")
        }
    }

    /// Expected `iss` claim of tokens issued by the tenant
    pub fn issuer(&self) -> String {
        format!("https://{}/", self.domain())
    }

    pub fn jwks_url(&self) -> String {
        format!("https://{}/.well-known/jwks.json", self.domain())
    }

    pub fn authorize_endpoint(&self) -> String {
        format!("https://{}/authorize", self.domain())
    }

    pub fn logout_endpoint(&self) -> String {
        format!("https://{}/v2/logout", self.domain())
    }

    /// Start building a login redirect for this application
    pub fn login_link(&self) -> LoginLink<'_> {
        LoginLink::new(self)
    }

    /// Login redirect returning to `callbackURL` followed by `callback_path`
    pub fn build_login_link(&self, callback_path: &str) -> Result<Url> {
        self.login_link().callback_path(callback_path).build()
    }

    /// Logout redirect returning to `return_to`, or to `callbackURL` when absent
    pub fn logout_link(&self, return_to: Option<&str>) -> Result<Url> {
        let mut url = parse_endpoint(&self.logout_endpoint())?;
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("returnTo", return_to.unwrap_or(self.callback_url.as_str()));
        Ok(url)
    }
}

/// Builder for the `/authorize` redirect
#[derive(Debug, Clone)]
pub struct LoginLink<'a> {
    config: &'a Auth0Config,
    callback_path: String,
    scope: Option<String>,
    state: Option<String>,
}

impl<'a> LoginLink<'a> {
    pub fn new(config: &'a Auth0Config) -> Self {
        Self {
            config,
            callback_path: String::new(),
            scope: None,
            state: None,
        }
    }

    /// Path appended to `callbackURL` for the redirect target
    pub fn callback_path(mut self, path: impl Into<String>) -> Self {
        self.callback_path = path.into();
        self
    }

    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Opaque value Auth0 echoes back in the callback
    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Redirect target Auth0 sends the browser to after login
    pub fn redirect_uri(&self) -> String {
        format!("{}{}", self.config.callback_url, self.callback_path)
    }

    pub fn build(&self) -> Result<Url> {
        let mut url = parse_endpoint(&self.config.authorize_endpoint())?;
        let redirect_uri = self.redirect_uri();

        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("audience", &self.config.audience)
                .append_pair("response_type", "token")
                .append_pair("client_id", &self.config.client_id)
                .append_pair("redirect_uri", &redirect_uri);

            if let Some(scope) = &self.scope {
                query.append_pair("scope", scope);
            }
            if let Some(state) = &self.state {
                query.append_pair("state", state);
            }
        }

        debug!("Built Auth0 login link for redirect: {}", redirect_uri);
        Ok(url)
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url> {
    Url::parse(endpoint).map_err(|e| ConfigurationError::invalid_url("auth0.url", endpoint, e))
}

/// Token carried in the fragment of the Auth0 callback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackToken {
    pub access_token: String,
    pub token_type: Option<String>,
    pub expires_in: Option<Duration>,
    pub state: Option<String>,
}

/// Parse the fragment of an implicit-flow callback.
///
/// Accepts the raw fragment with or without the leading `#`, or a full
/// callback URL.
pub fn parse_callback_fragment(
    fragment: &str,
) -> std::result::Result<CallbackToken, AuthCallbackError> {
    let fragment = match fragment.split_once('#') {
        Some((_, rest)) => rest,
        None => fragment,
    };

    let mut access_token = None;
    let mut token_type = None;
    let mut expires_in = None;
    let mut state = None;
    let mut error = None;
    let mut error_description = None;

    for (key, value) in url::form_urlencoded::parse(fragment.as_bytes()) {
        match &*key {
            "access_token" if !value.is_empty() => access_token = Some(value.into_owned()),
            "token_type" => token_type = Some(value.into_owned()),
            "expires_in" => {
                let secs: u64 = value
                    .parse()
                    .map_err(|_| AuthCallbackError::InvalidExpiry(value.to_string()))?;
                expires_in = Some(Duration::from_secs(secs));
            }
            "state" => state = Some(value.into_owned()),
            "error" => error = Some(value.into_owned()),
            "error_description" => error_description = Some(value.into_owned()),
            _ => {}
        }
    }

    if let Some(error) = error {
        return Err(AuthCallbackError::Denied {
            error,
            description: error_description.unwrap_or_default(),
        });
    }

    let access_token = access_token.ok_or(AuthCallbackError::MissingToken)?;

    Ok(CallbackToken {
        access_token,
        token_type,
        expires_in,
        state,
    })
}
