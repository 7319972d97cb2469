// Screening pipeline
// Drives one run: universe -> fundamentals -> fundamental filter ->
// regime classification -> momentum filter. Data flows strictly forward;
// nothing is kept between runs.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use futures_util::{stream, StreamExt};
use tracing::{debug, info, warn};
use uuid::Uuid;

use common::{Candle, FundamentalSnapshot, FundamentalsSource, PriceHistorySource, UniverseSource};

use crate::config::ScreenerConfig;
use crate::fundamentals::passes_fundamentals;
use crate::momentum::{self, MomentumRow};
use crate::regime::{self, RegimeReading};

/// Output of one screening run.
#[derive(Debug, Clone)]
pub struct ScreeningReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    /// Universe size after the optional limit was applied.
    pub universe_size: usize,
    /// Fundamental-filter survivors, in universe order.
    pub fundamentals: Vec<FundamentalSnapshot>,
    /// `None` when the momentum stage was skipped for the run.
    pub regime: Option<RegimeReading>,
    /// Momentum-filter survivors, in universe order.
    pub momentum: Vec<MomentumRow>,
}

/// One-shot screening pipeline over the three data sources.
pub struct ScreeningPipeline {
    universe: Box<dyn UniverseSource>,
    fundamentals: Box<dyn FundamentalsSource>,
    history: Box<dyn PriceHistorySource>,
    config: ScreenerConfig,
}

impl ScreeningPipeline {
    pub fn new(
        universe: Box<dyn UniverseSource>,
        fundamentals: Box<dyn FundamentalsSource>,
        history: Box<dyn PriceHistorySource>,
        config: ScreenerConfig,
    ) -> Self {
        Self {
            universe,
            fundamentals,
            history,
            config,
        }
    }

    /// Run the full screen once.
    ///
    /// Only a universe fetch failure aborts; every per-security problem
    /// skips that security, and an unusable index series skips the whole
    /// momentum stage.
    pub async fn run(&self) -> Result<ScreeningReport> {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        info!(%run_id, "starting screening run");

        let mut symbols = self
            .universe
            .fetch_universe()
            .await
            .context("universe fetch failed")?;
        if let Some(limit) = self.config.data.universe_limit {
            symbols.truncate(limit);
        }
        info!(universe = symbols.len(), "screening universe loaded");

        let survivors = self.fundamental_stage(&symbols).await;
        info!(
            passed = survivors.len(),
            universe = symbols.len(),
            "fundamental filter complete"
        );

        let mut report = ScreeningReport {
            run_id,
            started_at,
            universe_size: symbols.len(),
            fundamentals: survivors,
            regime: None,
            momentum: Vec::new(),
        };

        if report.fundamentals.is_empty() {
            info!("no fundamental survivors; momentum stage not run");
            return Ok(report);
        }

        let reading = match self.classify_market().await {
            Ok(reading) => reading,
            Err(e) => {
                warn!(error = %e, "cannot classify market regime; skipping momentum stage");
                return Ok(report);
            }
        };
        info!(regime = %reading.regime, adx = reading.adx, "market regime classified");
        report.regime = Some(reading);

        let rows = self.momentum_stage(&report.fundamentals, reading).await;
        report.momentum = rows;
        info!(picked = report.momentum.len(), "momentum filter complete");

        Ok(report)
    }

    /// Fetch fundamentals with bounded concurrency and apply the filter.
    /// `buffered` keeps results in universe order, so the outcome is
    /// independent of fetch completion order.
    async fn fundamental_stage(&self, symbols: &[String]) -> Vec<FundamentalSnapshot> {
        let snapshots: Vec<Option<FundamentalSnapshot>> = stream::iter(symbols)
            .map(|symbol| async move {
                match self.fundamentals.fetch_fundamentals(symbol).await {
                    Ok(Some(snapshot)) => Some(snapshot),
                    Ok(None) => {
                        debug!(%symbol, "no fundamentals data; skipping");
                        None
                    }
                    Err(e) => {
                        warn!(%symbol, error = %e, "fundamentals fetch failed; skipping");
                        None
                    }
                }
            })
            .buffered(self.fetch_concurrency())
            .collect()
            .await;

        snapshots
            .into_iter()
            .flatten()
            .filter(|s| passes_fundamentals(s, &self.config.fundamental))
            .collect()
    }

    /// Classify the market from the index's trailing series.
    async fn classify_market(&self) -> Result<RegimeReading> {
        let index = self
            .history
            .fetch_daily_history(&self.config.data.index_symbol, self.config.data.history_days)
            .await
            .context("index history fetch failed")?;
        Ok(regime::classify(&index)?)
    }

    /// Fetch survivors' histories (bounded, ordered) and apply the
    /// regime's momentum thresholds.
    async fn momentum_stage(
        &self,
        survivors: &[FundamentalSnapshot],
        reading: RegimeReading,
    ) -> Vec<MomentumRow> {
        let thresholds = momentum::thresholds_for(reading.regime);

        let histories: Vec<Option<Vec<Candle>>> = stream::iter(survivors)
            .map(|snapshot| async move {
                match self
                    .history
                    .fetch_daily_history(&snapshot.symbol, self.config.data.history_days)
                    .await
                {
                    Ok(candles) => Some(candles),
                    Err(e) => {
                        warn!(symbol = %snapshot.symbol, error = %e, "history fetch failed; skipping");
                        None
                    }
                }
            })
            .buffered(self.fetch_concurrency())
            .collect()
            .await;

        let mut rows = Vec::new();
        for (snapshot, candles) in survivors.iter().zip(histories) {
            let candles = match candles {
                Some(c) => c,
                None => continue,
            };
            let eval = match momentum::evaluate(&snapshot.symbol, &candles) {
                Some(eval) => eval,
                None => {
                    debug!(
                        symbol = %snapshot.symbol,
                        sessions = candles.len(),
                        "history too short for momentum evaluation; skipping"
                    );
                    continue;
                }
            };
            if eval.passes(&thresholds) {
                rows.push(MomentumRow::from(eval));
            }
        }
        rows
    }

    fn fetch_concurrency(&self) -> usize {
        self.config.data.fetch_concurrency.max(1)
    }
}
