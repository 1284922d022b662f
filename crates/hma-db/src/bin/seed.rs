//! # Seed Data Loader
//!
//! Writes the seed dataset (25 client files, 52 notarization records) into
//! the state slot.
//!
//! ## Usage
//! ```bash
//! # Seed ./hma_dev.db if its slot is empty
//! cargo run -p hma-db --bin hma-seed
//!
//! # Specify database path, overwrite existing data
//! cargo run -p hma-db --bin hma-seed -- --db ./data/hma.db --force
//! ```

use std::path::PathBuf;

use clap::Parser;
use hma_db::{migrations, Database, DbConfig};

#[derive(Debug, Parser)]
#[command(name = "hma-seed", about = "Load the HMA seed dataset into a database")]
struct Args {
    /// Database file path
    #[arg(short, long, default_value = "./hma_dev.db")]
    db: PathBuf,

    /// Overwrite existing data
    #[arg(short, long)]
    force: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    println!("🌱 HMA Seed Data Loader");
    println!("=======================");
    println!("Database: {}", args.db.display());
    println!();

    let db = Database::new(DbConfig::new(&args.db)).await?;

    let (total, applied) = migrations::migration_status(db.pool()).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied ({}/{})", applied, total);

    let store = db.state_store();
    if store.exists().await? && !args.force {
        println!("⚠ Database already holds office data");
        println!("  Skipping seed to avoid losing it.");
        println!("  Re-run with --force to overwrite.");
        return Ok(());
    }

    let state = store.reset().await?;

    println!();
    println!("✓ Wrote {} clients", state.clients().len());
    println!("✓ Wrote {} notarization records", state.pjs_records().len());
    println!();
    println!("✓ Seed complete!");

    db.close().await;
    Ok(())
}
