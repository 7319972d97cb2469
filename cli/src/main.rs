use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};

use data_ingestion::{ChartHistoryConnector, IndexUniverseConnector, QuoteSummaryConnector};
use screening::{load_config, write_default_config, ScreenerConfig, ScreeningPipeline};

mod report;

/// Fundamental + momentum stock screener over the NSE universe.
#[derive(Debug, Parser)]
#[command(name = "screener")]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "screener.toml")]
    config: String,

    /// Write the default configuration to the --config path and exit
    /// (reset to defaults).
    #[arg(long)]
    write_default_config: bool,

    /// Screen only the first N universe symbols (overrides the config).
    #[arg(long)]
    limit: Option<usize>,

    /// Log at debug level.
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).init();

    if args.write_default_config {
        write_default_config(&args.config)?;
        info!("Wrote default configuration to {}", args.config);
        return Ok(());
    }

    let mut config = if std::path::Path::new(&args.config).exists() {
        load_config(&args.config)?
    } else {
        info!("No configuration at {}; using defaults", args.config);
        ScreenerConfig::default()
    };
    if let Some(limit) = args.limit {
        config.data.universe_limit = Some(limit);
    }

    let pipeline = ScreeningPipeline::new(
        Box::new(IndexUniverseConnector::default()),
        Box::new(QuoteSummaryConnector::default()),
        Box::new(ChartHistoryConnector::default()),
        config,
    );

    let result = pipeline.run().await?;

    println!();
    println!(
        "Fundamental filter passed: {} of {} stocks",
        result.fundamentals.len(),
        result.universe_size
    );
    print!("{}", report::fundamental_table(&result.fundamentals));

    match result.regime {
        Some(reading) => {
            println!();
            println!(
                "Market regime: {} (index ADX = {:.2})",
                reading.regime, reading.adx
            );
            println!("Momentum filter passed: {} stocks", result.momentum.len());
            print!("{}", report::momentum_table(&result.momentum));
        }
        None if !result.fundamentals.is_empty() => {
            println!();
            println!("Momentum stage skipped: market regime unavailable");
        }
        None => {}
    }

    Ok(())
}
