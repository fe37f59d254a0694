//! Clap argument types and config overrides.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use userfetch::config::Config;
use userfetch::models::User;

/// Fetch and display random user profiles.
#[derive(Parser, Debug)]
#[command(
    name = "userfetch",
    version = userfetch::constants::VERSION,
    about = "Fetch and display random user profiles, throttled and cached.",
)]
pub struct Cli {
    /// Config file to use instead of ./.userfetch.toml.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Base endpoint; a record is read from <BASE_URL>/<id>.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Trigger throttle window in milliseconds.
    #[arg(long, global = true)]
    pub throttle_ms: Option<u64>,

    /// Log level or filter directive (e.g. "debug", "userfetch=trace").
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format for the display surface.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Apply CLI flags on top of the loaded config (highest priority layer).
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(ref url) = self.base_url {
            config.source.base_url = url.clone();
        }
        if let Some(ms) = self.throttle_ms {
            config.throttle.delay_ms = ms;
        }
        if let Some(ref level) = self.log_level {
            config.logging.level = level.clone();
        }
    }
}

/// Available commands.
#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Click the throttled "get random user" trigger and show the result.
    Fetch(FetchArgs),

    /// Resolve a specific user id and show it.
    Show(ShowArgs),

    /// Interactive session: each line on stdin is a click, `q` quits.
    Interactive,

    /// Print version and build information.
    Version,
}

/// Arguments for the `fetch` subcommand.
#[derive(Parser, Debug)]
pub struct FetchArgs {
    /// Number of clicks on the trigger.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub count: u32,

    /// Pause between clicks, in milliseconds.
    #[arg(long, default_value_t = 0)]
    pub interval_ms: u64,
}

/// Arguments for the `show` subcommand.
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// User id to resolve.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub id: u32,
}

/// Output format options.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    /// Render the published record using the renderer for this format.
    pub fn render(&self, user: Option<&User>) -> String {
        use userfetch::output::UserRenderer;
        match self {
            OutputFormat::Table => userfetch::output::TableRenderer.render(user),
            OutputFormat::Json => userfetch::output::JsonRenderer.render(user),
        }
    }
}
