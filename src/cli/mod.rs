//! CLI module for Dust Users
//!
//! - `serve`: run the HTTP API
//! - `migrate`: apply the PostgreSQL schema

pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Dust Users - user accounts holding a virtual dust balance
#[derive(Parser)]
#[command(name = "dust-users")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Apply database migrations
    Migrate,
}

/// Load `.env`, configuration and the tracing subscriber
pub(crate) fn bootstrap() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_subcommands() {
        let cli = Cli::try_parse_from(["dust-users", "serve"]).unwrap();
        assert!(matches!(cli.command, Command::Serve));

        let cli = Cli::try_parse_from(["dust-users", "migrate"]).unwrap();
        assert!(matches!(cli.command, Command::Migrate));

        assert!(Cli::try_parse_from(["dust-users"]).is_err());
    }
}
