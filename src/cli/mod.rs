use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "harvester")]
#[command(about = "Harvest GitHub repository metadata into the tools database", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one harvest pass over the source records
    Run,

    /// Run database migrations
    Migrate,

    /// List the GitHub repository URLs referenced by the source records
    List,

    /// Show the current GitHub API rate limit status
    RateLimit,
}
