use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{CustomType, Text};
use tracing::debug;
use weather_core::{Config, WeatherService, WeatherTool};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather for any city")]
pub struct Cli {
    /// Print debug logs to stderr (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure provider endpoints and the request timeout.
    Configure,

    /// Show current weather for a city.
    Show {
        /// City or place name.
        location: String,

        /// Print the tool output JSON instead of a summary.
        #[arg(long)]
        json: bool,
    },

    /// The `get-weather` tool contract, for agent frameworks.
    Tool {
        #[command(subcommand)]
        action: ToolCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum ToolCommand {
    /// Print the tool definition with input and output schemas.
    Schema,

    /// Run the tool on a JSON input, e.g. '{"location":"Berlin"}'.
    Call {
        /// JSON object with a `location` key.
        input: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { location, json } => show(&location, json).await,
            Command::Tool { action: ToolCommand::Schema } => {
                println!("{}", serde_json::to_string_pretty(&WeatherTool::definition())?);
                Ok(())
            }
            Command::Tool { action: ToolCommand::Call { input } } => call_tool(&input).await,
        }
    }
}

async fn show(location: &str, json: bool) -> anyhow::Result<()> {
    if location.trim().is_empty() {
        bail!("City is required");
    }

    let config = Config::load()?;
    let service = WeatherService::from_config(&config)?;

    match service.lookup_weather(location).await {
        Ok(result) if json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
        Ok(result) => {
            println!("{}", render::summary(&result));
            Ok(())
        }
        Err(err) => {
            debug!(error = ?err, "lookup failed");
            bail!(render::failure_message(&err))
        }
    }
}

async fn call_tool(input: &str) -> anyhow::Result<()> {
    let input: serde_json::Value =
        serde_json::from_str(input).context("Tool input is not valid JSON")?;

    let config = Config::load()?;
    let tool = WeatherTool::new(WeatherService::from_config(&config)?);

    let output = tool.call(input).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let geocoding_url = Text::new("Geocoding API base URL:")
        .with_default(&config.geocoding_url)
        .prompt()
        .context("Failed to read geocoding URL")?;

    let forecast_url = Text::new("Forecast API base URL:")
        .with_default(&config.forecast_url)
        .prompt()
        .context("Failed to read forecast URL")?;

    let timeout_secs = CustomType::<u64>::new("Request timeout (seconds):")
        .with_default(config.timeout_secs)
        .with_error_message("Please enter a whole number of seconds")
        .prompt()
        .context("Failed to read timeout")?;

    config.geocoding_url = geocoding_url;
    config.forecast_url = forecast_url;
    config.timeout_secs = timeout_secs;

    config.check()?;
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}
