pub mod monitoring;
pub mod pair;

pub use monitoring::MonitoringConfig;
pub use pair::{BaseToken, PairLiquidity, PairVolume, SearchResponse, TradingPair};
