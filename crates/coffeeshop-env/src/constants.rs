//! Environment constants compiled into the binary
//!
//! The development and production declarations share one Auth0 tenant and
//! one backend; only the deployment flag differs between them.

/// Base URL of the running Flask API server
pub const API_SERVER_URL: &str = "http://127.0.0.1:5000";

/// Auth0 tenant domain prefix (`{prefix}.auth0.com`)
pub const AUTH0_URL: &str = "dev-11opmcqr.eu";

/// Audience configured for the Auth0 API, identical to the API server URL
pub const AUTH0_AUDIENCE: &str = "http://127.0.0.1:5000";

/// Client ID generated for the Auth0 application
pub const AUTH0_CLIENT_ID: &str = "XtU77boYwDn9lrAoIWohcRAogFuGGMgl";

/// Base URL of the running Ionic application
pub const AUTH0_CALLBACK_URL: &str = "http://localhost:8100";

/// Suffix Auth0 appends to tenant prefixes
pub const AUTH0_DOMAIN_SUFFIX: &str = ".auth0.com";

/// Default configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "coffeeshop-env.toml";

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "COFFEESHOP_";
