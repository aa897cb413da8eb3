use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use inquire::{Confirm, CustomType, Text};
use mars_core::{Config, Pipeline};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "mars", version, about = "Local weather for wherever your IP says you are")]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub show: ShowArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve location and show the current forecast (default).
    Show(ShowArgs),

    /// Interactively edit the configuration file.
    Configure,

    /// Print the path of the configuration file.
    ConfigPath,
}

#[derive(Debug, Clone, Default, Args)]
pub struct ShowArgs {
    /// Print the snapshot as JSON instead of text.
    #[arg(long)]
    pub json: bool,

    /// Skip the multi-day forecast.
    #[arg(long)]
    pub no_daily: bool,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Command::Show(args)) => show(args).await,
            None => show(self.show).await,
            Some(Command::Configure) => configure(),
            Some(Command::ConfigPath) => {
                println!("{}", Config::config_file_path()?.display());
                Ok(())
            }
        }
    }
}

async fn show(args: ShowArgs) -> anyhow::Result<()> {
    let mut config = Config::load()?;
    if args.no_daily {
        config.include_daily = false;
    }
    tracing::debug!(?config, "loaded configuration");

    let pipeline = Pipeline::from_config(&config).context("Failed to build HTTP client")?;

    if !args.json {
        eprintln!("Loading weather...");
    }

    match pipeline.run().await {
        Ok(snapshot) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                print!("{}", render::render_text(&snapshot));
            }
            Ok(())
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    config.include_daily = Confirm::new("Include the multi-day forecast?")
        .with_default(config.include_daily)
        .prompt()?;

    let timezone = Text::new("Timezone (IANA name, \"auto\", or empty for API default):")
        .with_initial_value(config.timezone.as_deref().unwrap_or(""))
        .prompt()?;
    config.timezone = Some(timezone.trim().to_string()).filter(|tz| !tz.is_empty());

    let timeout = CustomType::<u64>::new("HTTP timeout in seconds (0 for client default):")
        .with_default(config.timeout_secs.unwrap_or(0))
        .prompt()?;
    config.timeout_secs = (timeout > 0).then_some(timeout);

    config.save()?;
    println!("Saved {}", Config::config_file_path()?.display());
    Ok(())
}
