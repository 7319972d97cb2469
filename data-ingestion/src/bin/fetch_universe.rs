use data_ingestion::connectors::universe::IndexUniverseConnector;
use common::UniverseSource;
use tracing::info;
use tracing_subscriber::fmt;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt().with_max_level(tracing::Level::INFO).init();

    // Hits the real constituents endpoint; a quick manual check that the
    // universe connector still matches the published CSV layout.
    // Run with: cargo run -p data-ingestion --bin fetch_universe
    let connector = IndexUniverseConnector::default();

    info!("Fetching universe from {}", connector.url());
    let symbols = connector.fetch_universe().await?;

    info!("Fetched {} symbols", symbols.len());
    for symbol in symbols.iter().take(10) {
        info!("  {}", symbol);
    }

    Ok(())
}
