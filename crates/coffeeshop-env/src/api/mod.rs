//! Backend API access rooted at the environment's `apiServerUrl`

mod client;
mod endpoints;
mod error;
mod types;

pub use client::{ApiClient, ClientBuilder, DEFAULT_TIMEOUT_SECS};
pub use endpoints::ApiEndpoints;
pub use error::{ApiError, Result};
pub use types::{Drink, DrinkPatch, NewDrink, RecipePart};
