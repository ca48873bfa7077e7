use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode};
use weather_core::{
    Config, SearchOrchestrator, WeatherResolver, provider_from_config, search::find_candidates,
};

use crate::{picker, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather CLI")]
pub struct Cli {
    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key in the config file.
    Configure,

    /// List cities matching a (partial) name.
    Search {
        /// At least two characters, e.g. "Lond".
        query: String,
    },

    /// Show current weather for a location.
    Show {
        /// City name, optionally disambiguated: "Portland, Oregon, US".
        /// Prompts interactively when omitted.
        location: Option<String>,

        /// Type the city in a prompt with live suggestions.
        #[arg(long)]
        pick: bool,
    },

    /// Serve the /search and /weather HTTP endpoints.
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Search { query } => search(&query).await,
            Command::Show { location, pick } => show(location, pick).await,
            Command::Serve { host, port } => {
                let mut config = Config::load_with_env()?;
                if let Some(host) = host {
                    config.server.host = host;
                }
                if let Some(port) = port {
                    config.server.port = port;
                }
                weather_server::run(&config).await
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let api_key = api_key.trim();
    if api_key.is_empty() {
        bail!("API key must not be empty");
    }

    config.set_api_key(api_key.to_string());
    config.save()?;

    println!(
        "Saved OpenWeather API key to {}",
        Config::config_file_path()?.display()
    );
    Ok(())
}

async fn search(query: &str) -> anyhow::Result<()> {
    let config = Config::load_with_env()?;
    let provider = provider_from_config(&config);

    let candidates = find_candidates(provider.as_ref(), query).await?;

    if candidates.is_empty() {
        println!("No cities found for \"{query}\"");
        return Ok(());
    }

    for candidate in &candidates {
        println!(
            "{}  ({:.4}, {:.4})",
            candidate.label(),
            candidate.latitude,
            candidate.longitude
        );
    }
    Ok(())
}

async fn show(location: Option<String>, pick: bool) -> anyhow::Result<()> {
    let config = Config::load_with_env()?;
    let provider = provider_from_config(&config);

    let location = match location {
        Some(location) if !pick => location,
        initial => {
            let orchestrator = SearchOrchestrator::new(Arc::clone(&provider));
            picker::prompt_location(orchestrator, initial).await?
        }
    };

    tracing::debug!(%location, "Resolving weather");
    let record = WeatherResolver::new(provider).resolve(&location).await?;
    println!("{}", render::weather_card(&record));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_location_is_optional() {
        let cli = Cli::try_parse_from(["weather", "show"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Show {
                location: None,
                pick: false
            }
        ));

        let cli = Cli::try_parse_from(["weather", "show", "Lond", "--pick"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Show { location: Some(ref l), pick: true } if l == "Lond"
        ));
    }
}
