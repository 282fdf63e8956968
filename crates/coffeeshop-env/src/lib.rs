//! # coffeeshop-env
//!
//! Environment configuration for the coffee shop client: the backend API
//! base URL and the Auth0 tenant settings, compiled in per build profile.
//!
//! ```
//! use coffeeshop_env::environment;
//!
//! let env = environment();
//! assert!(!env.api_server_url.is_empty());
//! println!("logging in via {}", env.auth0.authorize_endpoint());
//! ```
//!
//! Build with `--features production` to compile in the production
//! declaration. [`ConfigLoader`] layers a TOML/JSON file and `COFFEESHOP_*`
//! environment variables over the compiled-in values.

pub mod api;
pub mod auth0;
pub mod constants;
pub mod environment;
pub mod error;
pub mod loader;
pub mod logging;
mod validation;

pub use crate::auth0::{parse_callback_fragment, AuthCallbackError, CallbackToken, LoginLink};
pub use crate::environment::{environment, Auth0Config, BuildProfile, EnvironmentConfig};
pub use crate::error::{ConfigurationError, Result};
pub use crate::loader::ConfigLoader;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
