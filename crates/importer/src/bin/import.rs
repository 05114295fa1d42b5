use std::path::PathBuf;

use clap::Parser;
use importer::{ImportCounts, ImporterError, load_event_folder, read_event_folder};
use storage::Database;

#[derive(Parser)]
#[command(name = "event-import")]
#[command(about = "Load per-event CSV folders into the events database", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory of per-event folders, each holding an event CSV plus
    /// optional participants.csv and results.csv
    #[arg(default_value = "./events")]
    events_dir: PathBuf,

    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), ImporterError> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();

    let db = Database::new(&cli.database_url).await?;
    db.run_migrations().await?;

    let mut totals = ImportCounts::default();
    for entry in std::fs::read_dir(&cli.events_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let path = entry.path();

        match read_event_folder(&path)? {
            Some(folder) => {
                let counts = load_event_folder(db.pool(), &folder).await?;
                tracing::info!(
                    folder = %folder.folder,
                    events = counts.events,
                    participants = counts.participants,
                    results = counts.results,
                    skipped = counts.skipped,
                    "Imported event folder"
                );
                totals.events += counts.events;
                totals.participants += counts.participants;
                totals.results += counts.results;
                totals.skipped += counts.skipped;
            }
            None => {
                tracing::warn!(path = %path.display(), "No event CSV found, skipping folder");
            }
        }
    }

    tracing::info!(
        events = totals.events,
        participants = totals.participants,
        results = totals.results,
        skipped = totals.skipped,
        "Import finished"
    );

    Ok(())
}
