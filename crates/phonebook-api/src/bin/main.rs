//! Phonebook server entry point
//!
//! # Usage
//!
//! ```bash
//! # Start the GraphQL server with the sample contacts on port 4000
//! phonebook serve
//!
//! # Start from a seed file with JSON logs
//! phonebook serve --seed-file contacts.json --log-format json
//!
//! # Print the GraphQL schema
//! phonebook schema
//! ```

use clap::{Parser, Subcommand};
use phonebook_api::{init_tracing, serve, LogFormat, ServerConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "phonebook")]
#[command(about = "GraphQL API over an in-memory phonebook")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the GraphQL server
    Serve(ServeArgs),

    /// Print the GraphQL schema definition
    Schema,
}

#[derive(clap::Args, Debug)]
struct ServeArgs {
    /// Config file (.toml, .yaml or .json)
    #[arg(short, long, env = "PHONEBOOK_CONFIG")]
    config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long, env = "HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// JSON file with the initial contacts
    #[arg(long, env = "PHONEBOOK_SEED_FILE")]
    seed_file: Option<PathBuf>,

    /// Start with no contacts instead of the sample data
    #[arg(long)]
    empty: bool,

    /// Disable the GraphiQL landing page
    #[arg(long)]
    no_graphiql: bool,

    /// Disable CSRF prevention
    #[arg(long)]
    no_csrf_prevention: bool,

    /// Log output format
    #[arg(long, value_enum)]
    log_format: Option<LogFormat>,
}

impl ServeArgs {
    fn into_config(self) -> anyhow::Result<ServerConfig> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::from_file(path)?,
            None => ServerConfig::default(),
        };

        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(seed_file) = self.seed_file {
            config.seed_file = Some(seed_file);
        }
        if self.empty {
            config.sample_data = false;
        }
        if self.no_graphiql {
            config.graphiql = false;
        }
        if self.no_csrf_prevention {
            config.csrf_prevention = false;
        }
        if let Some(format) = self.log_format {
            config.log_format = format;
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => {
            let config = args.into_config()?;
            init_tracing(config.log_format);
            tracing::debug!(?config, "resolved configuration");
            serve(config).await?;
        }
        Commands::Schema => {
            print!("{}", phonebook_api::sdl());
        }
    }

    Ok(())
}
