//! Screening core: the fundamental threshold filter, market regime
//! classification and the regime-adaptive momentum filter, tied together
//! by a one-shot pipeline over the external data sources.

pub mod config;
pub mod fundamentals;
pub mod indicators;
pub mod momentum;
pub mod pipeline;
pub mod regime;

pub use config::{load_config, write_default_config, DataConfig, ScreenerConfig};
pub use fundamentals::{passes_fundamentals, FundamentalThresholds};
pub use momentum::{evaluate, thresholds_for, MomentumEvaluation, MomentumRow, MomentumThresholds};
pub use pipeline::{ScreeningPipeline, ScreeningReport};
pub use regime::{classify, MarketRegime, RegimeError, RegimeReading};
