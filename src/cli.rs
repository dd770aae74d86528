use clap::Parser;
use std::path::PathBuf;

use dependency_overrider::adapters::outbound::dotnet::DEFAULT_PROGRAM;

/// Force known-problematic transitive package versions to become direct dependencies
#[derive(Parser, Debug)]
#[command(name = "dependency-overrider")]
#[command(version)]
#[command(
    about = "Promote known-problematic transitive NuGet package versions to direct dependencies",
    long_about = None
)]
pub struct Args {
    /// Skip `dotnet restore` before listing packages
    #[arg(long = "no-restore")]
    pub no_restore: bool,

    /// Path to the config file (defaults to config.json next to the executable)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Only log the direct dependencies that would be added
    #[arg(long)]
    pub dry_run: bool,

    /// Timeout for each dotnet invocation, in seconds
    #[arg(long, value_name = "SECONDS", default_value_t = 300, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: u64,

    /// dotnet executable to run
    #[arg(long, value_name = "PATH", default_value = DEFAULT_PROGRAM)]
    pub dotnet: PathBuf,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
