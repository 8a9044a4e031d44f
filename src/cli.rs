// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Selector, retention policy, config, and output flags.

use clap::Parser;
use nexus_retention::error::Result;
use nexus_retention::output::OutputMode;
use nexus_retention::types::Selector;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nexus-retention")]
#[command(about = "Delete stale Docker images from a Nexus registry by retention policy")]
#[command(version)]
pub struct Cli {
    /// Repository to clean
    #[arg(short, long, required_unless_present = "all_repositories")]
    pub repository: Option<String>,

    /// Clean every repository instead of one
    #[arg(long, conflicts_with = "repository")]
    pub all_repositories: bool,

    /// Image name to clean
    #[arg(short, long, required_unless_present = "all_images")]
    pub image: Option<String>,

    /// Clean every image instead of one
    #[arg(long, conflicts_with = "image")]
    pub all_images: bool,

    /// Only consider this tag
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Number of most recent images to keep
    #[arg(short, long, conflicts_with = "days", allow_negative_numbers = true)]
    pub keep: Option<i64>,

    /// Delete images created more than this many days ago
    #[arg(short, long, allow_negative_numbers = true)]
    pub days: Option<i64>,

    /// Config file (default: nexus-retention.yml, then NEXUS_* environment)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Show what would be deleted without deleting
    #[arg(long)]
    pub dry_run: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Print only result lines
    #[arg(short, long, conflicts_with = "json")]
    pub quiet: bool,

    /// Print JSON lines
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub fn selector(&self) -> Result<Selector> {
        let mut selector = Selector::all();
        if let Some(ref repository) = self.repository {
            selector = selector.repository(repository)?;
        }
        if let Some(ref image) = self.image {
            selector = selector.name(image)?;
        }
        if let Some(ref tag) = self.tag {
            selector = selector.version(tag)?;
        }
        Ok(selector)
    }

    pub fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else if self.quiet {
            OutputMode::Quiet
        } else {
            OutputMode::Normal
        }
    }
}
