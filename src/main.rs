use chrono::DateTime;
use clap::Parser;
use harvester::{
    cli::{Cli, Commands},
    config::Settings,
    db,
    github::MetadataClient,
    harvest::Harvester,
    Result,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    // Silently ignore if file doesn't exist
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,harvester=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let settings = Settings::from_env()?;
    settings.validate()?;

    // Handle commands
    match cli.command {
        Commands::Run => {
            run(settings).await?;
        }
        Commands::Migrate => {
            migrate(settings).await?;
        }
        Commands::List => {
            list(settings).await?;
        }
        Commands::RateLimit => {
            rate_limit(settings).await?;
        }
    }

    Ok(())
}

async fn run(settings: Settings) -> Result<()> {
    info!("Starting harvest");
    info!("Database: {}", settings.database.url);
    info!("Metadata API: {}", settings.github.metadata_api_url);

    let pool = db::init_pool_with_config(&settings.database).await?;
    db::run_migrations(&pool).await?;
    info!("Database migrations completed");

    let harvester = Harvester::new(&settings, pool)?;
    let report = harvester.run().await?;

    info!(
        "Harvest complete: {} repositories, {} fetched, {} upserted, {} failed",
        report.repositories, report.fetched, report.upserted, report.failed
    );

    Ok(())
}

async fn migrate(settings: Settings) -> Result<()> {
    info!("Running database migrations");

    let pool = db::init_pool(&settings.database.url).await?;
    db::run_migrations(&pool).await?;

    println!("Database migrations completed successfully");
    Ok(())
}

async fn list(settings: Settings) -> Result<()> {
    let pool = db::init_pool(&settings.database.url).await?;
    db::run_migrations(&pool).await?;

    let repositories = db::pretools::list_github_repositories(&pool).await?;
    for url in &repositories {
        println!("{url}");
    }
    println!("{} unique GitHub repositories", repositories.len());

    Ok(())
}

async fn rate_limit(settings: Settings) -> Result<()> {
    let client = MetadataClient::new(settings.github)?;
    let limit = client.rate_limit().await?;

    let reset = DateTime::from_timestamp(limit.reset, 0)
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| limit.reset.to_string());
    println!("Remaining requests: {}", limit.remaining);
    println!("Resets at: {reset}");

    Ok(())
}
