//! CLI command definitions and subcommands

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::{Preferences, StoryTheme, TripDetails};

/// Wander Wise - AI trip planner
#[derive(Parser)]
#[command(
    name = "ww",
    about = "Plan trips, hear landmark stories and turn itineraries into storybooks",
    version,
    after_help = "Logs are written to: ~/.local/share/wanderwise/logs/wanderwise.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Subcommand to execute (defaults to `session`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Interactive planning session
    Session,

    /// Generate an itinerary in one shot
    Plan(PlanArgs),

    /// Narrate a story about a landmark
    Story {
        /// Landmark name, e.g. "Gateway of India"
        #[arg(value_name = "POI")]
        poi: String,

        /// Historical, Local Folklore or Mythological
        #[arg(short, long, default_value = "Historical")]
        theme: StoryTheme,
    },

    /// Turn a saved itinerary into a storybook
    Storybook {
        /// Itinerary JSON file (as written by `plan --output` or `/save`)
        #[arg(short, long)]
        itinerary: PathBuf,

        /// Interests used to personalize the narrative
        #[arg(long, default_value = "")]
        interests: String,

        /// Write the result to a file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the reference travel guide fed to the planner
    Guide,
}

/// Trip request, given directly or as questionnaire answers
#[derive(Args, Debug, Clone, Default)]
pub struct PlanArgs {
    /// Destination, used verbatim
    #[arg(long, conflicts_with = "state")]
    pub destination: Option<String>,

    /// Duration, used verbatim (e.g. "5 days")
    #[arg(long, requires = "destination")]
    pub duration: Option<String>,

    /// Interests, used verbatim
    #[arg(long, requires = "destination")]
    pub interests: Option<String>,

    /// Questionnaire: state to visit
    #[arg(long)]
    pub state: Option<String>,

    /// Questionnaire: preferred kind of place
    #[arg(long, requires = "state")]
    pub interest: Option<String>,

    /// Questionnaire: preferred cuisine
    #[arg(long, requires = "state")]
    pub cuisine: Option<String>,

    /// Questionnaire: ideal vibe
    #[arg(long, requires = "state")]
    pub vibe: Option<String>,

    /// Questionnaire: number of days
    #[arg(long, requires = "state", value_parser = clap::value_parser!(u8).range(1..=10))]
    pub days: Option<u8>,

    /// Write the result to a file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

impl PlanArgs {
    /// Build the trip request from whichever form was given
    pub fn trip_details(&self) -> Result<TripDetails, String> {
        if let Some(destination) = &self.destination {
            return Ok(TripDetails::new(
                destination.clone(),
                self.duration.clone().unwrap_or_else(|| "7 days".to_string()),
                self.interests.clone().unwrap_or_default(),
            ));
        }

        let Some(state) = &self.state else {
            return Err("Provide --destination or the questionnaire answers starting with --state".to_string());
        };

        let mut prefs = Preferences::default();
        prefs.set("state", state.clone());
        prefs.set("interest", self.interest.clone().unwrap_or_default());
        prefs.set("cuisine", self.cuisine.clone().unwrap_or_default());
        prefs.set("vibe", self.vibe.clone().unwrap_or_default());
        if let Some(days) = self.days {
            prefs.set("duration", days.to_string());
        }
        Ok(prefs.to_trip_details())
    }
}

/// Output format for plan/storybook commands
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use: text or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Get the log file path
pub fn get_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wanderwise")
        .join("logs")
        .join("wanderwise.log")
}
