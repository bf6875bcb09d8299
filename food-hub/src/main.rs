use food_hub::db::report::{expiry, kpi_snapshot};
use food_hub::utils::time::today;
use food_hub::{DbService, seed, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (.env, configuration, logger)
    let config = setup_environment()?;

    tracing::info!("Food Hub starting...");
    tracing::info!(
        environment = %config.environment,
        database = %config.database_path.display(),
        timezone = %config.timezone,
        "Configuration loaded"
    );

    // 2. Storage + migrations
    let db = DbService::new(&config.database_path, config.max_connections).await?;

    // 3. Initial data
    let seeded = seed::seed_database(&db.pool, &config).await?;
    if seeded.total() > 0 {
        tracing::info!(?seeded, "Database seeded");
    }

    // 4. Snapshot for the configured business day
    let today = today(config.timezone);
    let kpis = kpi_snapshot(&db.pool, today).await?;
    tracing::info!(
        %today,
        total_food = kpis.total_food,
        total_providers = kpis.total_providers,
        total_receivers = kpis.total_receivers,
        total_claims = kpis.total_claims,
        claim_rate = %format!("{:.1}%", kpis.claim_rate()),
        expired_food = kpis.expired_food,
        "Ledger snapshot"
    );

    for bucket in expiry::expiry_distribution(&db.pool, today).await? {
        tracing::info!(status = %bucket.status, count = bucket.count, "Expiry bucket");
    }

    db.close().await;
    Ok(())
}
