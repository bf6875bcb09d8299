//! Print the tables, columns, row counts and sample rows of the ledger
//! database without modifying it.
//!
//! `check-db --json` prints the same summaries as a JSON array.

use anyhow::Context;
use food_hub::db::inspect;
use food_hub::{DbService, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = setup_environment()?;
    let as_json = std::env::args().skip(1).any(|arg| arg == "--json");

    let db = DbService::open_read_only(&config.database_path)
        .await
        .with_context(|| format!("opening {}", config.database_path.display()))?;

    let summaries = inspect::inspect(&db.pool).await?;
    if as_json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else {
        let names: Vec<&str> = summaries.iter().map(|s| s.name.as_str()).collect();
        println!("Tables in the database: {names:?}");
        for summary in &summaries {
            println!();
            print!("{summary}");
        }
    }

    db.close().await;
    Ok(())
}
