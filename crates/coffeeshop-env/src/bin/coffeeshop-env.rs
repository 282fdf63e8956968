//! Command-line inspection of the coffee shop environment

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{OffLevel, Verbosity};
use coffeeshop_env::api::ApiEndpoints;
use coffeeshop_env::{logging, EnvironmentConfig};
use color_eyre::eyre::{eyre, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Inspect and validate the coffee shop environment configuration
#[derive(Parser, Debug)]
#[command(name = "coffeeshop-env", version, about)]
struct Args {
    /// Configuration file (TOML or JSON); defaults to ./coffeeshop-env.toml when present
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    verbosity: Verbosity<OffLevel>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the resolved configuration
    Show {
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Load and validate the configuration
    Validate,

    /// Print the Auth0 login link
    LoginLink {
        /// Path appended to the callback URL
        #[arg(long, default_value = "")]
        callback_path: String,
    },

    /// Print the API and Auth0 endpoints derived from the configuration
    Endpoints,

    /// Print an example configuration file for this build profile
    GenerateExample,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Json,
    Toml,
}

fn main() -> Result<()> {
    let args = Args::parse();
    color_eyre::install()?;

    logging::init_cli_logging(&args.verbosity, "coffeeshop_env=warn")
        .map_err(|e| eyre!("Failed to initialize logging: {}", e))?;

    let config = args.config.as_deref();
    match args.command {
        Command::Show { format } => {
            let env = load_environment(config)?;
            match format {
                OutputFormat::Json => println!("{}", env.to_json()?),
                OutputFormat::Toml => print!("{}", env.to_toml()?),
            }
        }
        Command::Validate => {
            let env = load_environment(config)?;
            if !env.audience_matches_api() {
                eprintln!(
                    "warning: auth0.audience ({}) differs from apiServerUrl ({})",
                    env.auth0.audience, env.api_server_url
                );
            }
            println!("configuration is valid ({} profile)", env.profile());
        }
        Command::LoginLink { callback_path } => {
            let env = load_environment(config)?;
            println!("{}", env.auth0.build_login_link(&callback_path)?);
        }
        Command::Endpoints => {
            let env = load_environment(config)?;
            let api = ApiEndpoints::from_environment(&env)?;
            println!("api:           {}", api.base());
            println!("drinks:        {}", api.drinks()?);
            println!("drinks-detail: {}", api.drinks_detail()?);
            println!("auth0 domain:  {}", env.auth0.domain());
            println!("issuer:        {}", env.auth0.issuer());
            println!("jwks:          {}", env.auth0.jwks_url());
            println!("authorize:     {}", env.auth0.authorize_endpoint());
            println!("logout:        {}", env.auth0.logout_link(None)?);
        }
        Command::GenerateExample => print!("{}", EnvironmentConfig::generate_example()?),
    }

    Ok(())
}

fn load_environment(config: Option<&Path>) -> Result<EnvironmentConfig> {
    let env = EnvironmentConfig::load(config)?;
    info!(profile = %env.profile(), "Loaded environment");
    Ok(env)
}
