use std::path::PathBuf;

use clap::{Parser, Subcommand};
use seeder::{
    Dataset, SeedKind, SeedLoader, SeedSource, SeederError,
    sources::{BundledSource, FileSource, RemoteSource},
    validator::SeedValidator,
};
use sqlx::postgres::PgPoolOptions;

#[derive(Parser)]
#[command(name = "seed")]
#[command(about = "Funding Journey reference data seeder", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Load funding opportunities from a JSON file, or the bundled data
    Opportunities {
        #[command(flatten)]
        input: FileInput,
    },
    /// Load investors from a JSON file, or the bundled data
    Investors {
        #[command(flatten)]
        input: FileInput,
    },
    /// Load records served as a JSON array by a remote endpoint
    Remote {
        #[arg(long)]
        url: String,

        #[arg(long, value_enum)]
        kind: SeedKind,

        #[arg(long)]
        validate_only: bool,
    },
}

#[derive(clap::Args)]
struct FileInput {
    #[arg(long)]
    file: Option<PathBuf>,

    #[arg(long)]
    validate_only: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("seed={},seeder={}", log_level, log_level).into()),
        )
        .with_target(true)
        .init();

    let (kind, source, validate_only): (SeedKind, Box<dyn SeedSource>, bool) = match cli.command {
        Commands::Opportunities { input } => (
            SeedKind::Opportunities,
            file_or_bundled(input.file),
            input.validate_only,
        ),
        Commands::Investors { input } => (
            SeedKind::Investors,
            file_or_bundled(input.file),
            input.validate_only,
        ),
        Commands::Remote {
            url,
            kind,
            validate_only,
        } => (kind, Box::new(RemoteSource::new(url)?), validate_only),
    };

    seed(kind, source.as_ref(), validate_only, cli.database_url.as_deref()).await?;

    Ok(())
}

fn file_or_bundled(file: Option<PathBuf>) -> Box<dyn SeedSource> {
    match file {
        Some(path) => Box::new(FileSource::new(path)),
        None => Box::new(BundledSource),
    }
}

async fn seed(
    kind: SeedKind,
    source: &dyn SeedSource,
    validate_only: bool,
    database_url: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Loading {} from: {}", kind, source.describe());
    let records = source.fetch(kind).await?;
    tracing::info!("Fetched {} record(s)", records.len());

    tracing::info!("Validating records...");
    let report = SeedValidator::validate(kind, &records)?;
    report.log_warnings();
    tracing::info!(
        "Validation successful ({} warning(s))",
        report.warnings.len()
    );

    let dataset = Dataset::from_records(kind, records)?;
    if validate_only {
        return Ok(());
    }

    let database_url = database_url.ok_or_else(|| {
        SeederError::ValidationError("DATABASE_URL is required unless --validate-only".to_string())
    })?;

    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    let written = SeedLoader::new(&pool).load(&dataset).await?;
    tracing::info!("Seeded {} {}", written, kind);

    Ok(())
}
