//! Wander Wise - AI trip planner
//!
//! CLI entry point for the interactive session and one-shot commands.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result};
use tracing::info;

use wanderwise::cli::{Cli, Command, OutputFormat, PlanArgs, get_log_path};
use wanderwise::config::Config;
use wanderwise::domain::{StoryTheme, TripDetails};
use wanderwise::export::{self, TripExport};
use wanderwise::gateway::TripGateway;
use wanderwise::prompts::ReferenceGuide;
use wanderwise::repl::{self, render};

fn setup_logging(verbose: bool) -> Result<()> {
    let log_path = get_log_path();
    let log_dir = log_path.parent().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Write to log file, not stdout/stderr
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let log_file = fs::File::create(&log_path).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!(
        "Wander Wise loaded config: provider={}, model={}",
        config.llm.provider, config.llm.model
    );

    match cli.command {
        None | Some(Command::Session) => repl::run_interactive(&config).await,
        Some(Command::Plan(args)) => cmd_plan(&config, args).await,
        Some(Command::Story { poi, theme }) => cmd_story(&config, &poi, theme).await,
        Some(Command::Storybook {
            itinerary,
            interests,
            output,
            format,
        }) => cmd_storybook(&config, itinerary, interests, output, format).await,
        Some(Command::Guide) => cmd_guide(&config),
    }
}

fn gateway(config: &Config) -> Result<TripGateway> {
    config.validate()?;
    TripGateway::from_config(config)
}

/// Generate an itinerary
async fn cmd_plan(config: &Config, args: PlanArgs) -> Result<()> {
    let details = args.trip_details().map_err(|e| eyre::eyre!(e))?;
    let gateway = gateway(config)?;

    eprintln!("{}", "Crafting your personalized itinerary...".dimmed());
    let itinerary = gateway.generate_itinerary(&details).await?;

    let export = TripExport {
        trip_details: Some(details),
        itinerary,
        storybook: None,
    };

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&export)?),
        OutputFormat::Text => println!("{}", render::itinerary(&export.itinerary)),
    }

    if let Some(path) = args.output {
        let path = export::save(&export, Some(&path))?;
        eprintln!("Saved to {}", path.display());
    }
    Ok(())
}

/// Narrate a landmark story
async fn cmd_story(config: &Config, poi: &str, theme: StoryTheme) -> Result<()> {
    let gateway = gateway(config)?;
    let story = gateway.generate_story(poi, theme).await?;
    println!("{}", story);
    Ok(())
}

/// Retell a saved itinerary as a storybook
async fn cmd_storybook(
    config: &Config,
    itinerary_path: PathBuf,
    interests: String,
    output: Option<PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    let mut export = export::load_itinerary(&itinerary_path)?;
    let details = match (&export.trip_details, interests.is_empty()) {
        (Some(saved), true) => saved.clone(),
        (Some(saved), false) => TripDetails {
            interests,
            ..saved.clone()
        },
        (None, _) => TripDetails::new("", "", interests),
    };
    let gateway = gateway(config)?;

    eprintln!("{}", "Writing your storybook...".dimmed());
    let book = gateway.generate_storybook(&export.itinerary, &details).await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&book)?),
        OutputFormat::Text => println!("{}", render::storybook(&book)),
    }

    if let Some(path) = output {
        export.trip_details = Some(details);
        export.storybook = Some(book);
        let path = export::save(&export, Some(&path))?;
        eprintln!("Saved to {}", path.display());
    }
    Ok(())
}

/// Print the reference travel guide
fn cmd_guide(config: &Config) -> Result<()> {
    let guide = ReferenceGuide::load(config.reference.expanded_path().as_deref())?;
    println!("{} (v{})", guide.title.bright_cyan().bold(), guide.version);
    println!();
    println!("{}", guide.render());
    Ok(())
}
