//! Artwork field backfill.
//!
//! Scans the `artworks` collection and fills in `price` and
//! `availability_status` where they are missing. Running it twice changes
//! nothing the second time.

use clap::Parser;
use gallery_content::backfill::{BackfillOptions, MAX_BATCH_SIZE, backfill_artworks};
use gallery_persistence::backends::sqlite::SqliteStore;
use gallery_rest::init_logging;
use tracing::info;

/// Backfills missing artwork fields.
#[derive(Debug, Parser)]
#[command(name = "gallery-backfill")]
#[command(about = "Backfill missing price and availability fields on artworks")]
struct BackfillArgs {
    /// SQLite database path.
    #[arg(long, env = "GALLERY_DATABASE_URL")]
    database_url: String,

    /// Report what would change without writing.
    #[arg(long)]
    dry_run: bool,

    /// Documents per merge batch (1 to 500).
    #[arg(long, default_value_t = MAX_BATCH_SIZE)]
    batch_size: usize,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "GALLERY_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = BackfillArgs::parse();
    init_logging(&args.log_level);

    if args.database_url == ":memory:" || args.database_url == "memory" {
        anyhow::bail!("Backfill needs a persistent database, got '{}'", args.database_url);
    }

    info!(database = %args.database_url, dry_run = args.dry_run, "Starting artwork backfill");

    let store = SqliteStore::open(&args.database_url)?;
    store.init_schema()?;

    let report = backfill_artworks(
        &store,
        BackfillOptions {
            dry_run: args.dry_run,
            batch_size: args.batch_size,
        },
    )
    .await?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
