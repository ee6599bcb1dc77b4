//! Safety heuristic for freshly listed pairs.
//!
//! A pair qualifies when it has at least the minimum USD liquidity, non-zero
//! 24h volume, a liquidity/volume ratio no higher than the maximum, and is no
//! older than the maximum age. Boundaries are inclusive on the accepting side.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::TradingPair;

/// Age assigned to pairs with no creation timestamp; always too old.
pub const MISSING_AGE_MINUTES: f64 = 999.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SafetyThresholds {
    pub min_liquidity_usd: f64,
    pub max_liquidity_volume_ratio: f64,
    pub max_age_minutes: f64,
}

impl Default for SafetyThresholds {
    fn default() -> Self {
        Self {
            min_liquidity_usd: 25_000.0,
            max_liquidity_volume_ratio: 8.0,
            max_age_minutes: 30.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Rejection {
    #[error("liquidity ${liquidity:.0} below minimum")]
    LowLiquidity { liquidity: f64 },

    #[error("no 24h volume")]
    NoVolume,

    #[error("liquidity/volume ratio {ratio:.2} too high")]
    HighLiquidityVolumeRatio { ratio: f64 },

    #[error("pair is {age_minutes:.1} minutes old")]
    TooOld { age_minutes: f64 },
}

/// Runs the heuristic, returning the first failed condition.
pub fn evaluate(
    pair: &TradingPair,
    now_ms: i64,
    thresholds: &SafetyThresholds,
) -> Result<(), Rejection> {
    let liquidity = pair.liquidity_usd();
    let volume = pair.volume_h24();
    let age_minutes = pair.age_minutes(now_ms).unwrap_or(MISSING_AGE_MINUTES);

    if liquidity < thresholds.min_liquidity_usd {
        return Err(Rejection::LowLiquidity { liquidity });
    }
    if volume == 0.0 {
        return Err(Rejection::NoVolume);
    }
    let ratio = liquidity / volume;
    if ratio > thresholds.max_liquidity_volume_ratio {
        return Err(Rejection::HighLiquidityVolumeRatio { ratio });
    }
    if age_minutes > thresholds.max_age_minutes {
        return Err(Rejection::TooOld { age_minutes });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BaseToken, PairLiquidity, PairVolume};

    const NOW: i64 = 1_700_000_000_000;

    fn pair(liquidity: f64, volume: f64, age_minutes: i64) -> TradingPair {
        TradingPair {
            chain_id: "solana".to_string(),
            base_token: BaseToken {
                address: "Mint111".to_string(),
                symbol: "TEST".to_string(),
                name: "Test".to_string(),
            },
            price_usd: Some("0.001".to_string()),
            liquidity: Some(PairLiquidity { usd: Some(liquidity) }),
            volume: Some(PairVolume { h24: Some(volume) }),
            pair_created_at: Some(NOW - age_minutes * 60_000),
            url: None,
        }
    }

    fn check(liquidity: f64, volume: f64, age_minutes: i64) -> Result<(), Rejection> {
        evaluate(&pair(liquidity, volume, age_minutes), NOW, &SafetyThresholds::default())
    }

    #[test]
    fn test_liquidity_boundary() {
        assert_eq!(
            check(24_999.0, 1_000.0, 5),
            Err(Rejection::LowLiquidity { liquidity: 24_999.0 })
        );
        // 25k liquidity clears the floor but 25k / 1k trips the ratio check
        assert!(matches!(
            check(25_000.0, 1_000.0, 5),
            Err(Rejection::HighLiquidityVolumeRatio { .. })
        ));
        assert_eq!(check(25_000.0, 3_125.0, 5), Ok(()));
    }

    #[test]
    fn test_zero_volume_rejected() {
        assert_eq!(check(30_000.0, 0.0, 5), Err(Rejection::NoVolume));
    }

    #[test]
    fn test_ratio_rejected() {
        assert!(matches!(
            check(80_000.0, 1_000.0, 5),
            Err(Rejection::HighLiquidityVolumeRatio { .. })
        ));
        // exactly 8 is allowed
        assert_eq!(check(80_000.0, 10_000.0, 5), Ok(()));
    }

    #[test]
    fn test_age_boundary() {
        assert!(check(30_000.0, 1_000.0, 31).is_err());
        assert!(matches!(
            check(30_000.0, 5_000.0, 31),
            Err(Rejection::TooOld { .. })
        ));
        assert_eq!(check(30_000.0, 5_000.0, 30), Ok(()));
        assert_eq!(check(30_000.0, 5_000.0, 29), Ok(()));
    }

    #[test]
    fn test_missing_fields() {
        let mut p = pair(30_000.0, 5_000.0, 5);
        p.pair_created_at = None;
        assert_eq!(
            evaluate(&p, NOW, &SafetyThresholds::default()),
            Err(Rejection::TooOld { age_minutes: MISSING_AGE_MINUTES })
        );

        let mut p = pair(30_000.0, 5_000.0, 5);
        p.liquidity = None;
        assert!(matches!(
            evaluate(&p, NOW, &SafetyThresholds::default()),
            Err(Rejection::LowLiquidity { .. })
        ));

        let mut p = pair(30_000.0, 5_000.0, 5);
        p.volume = Some(PairVolume { h24: None });
        assert_eq!(
            evaluate(&p, NOW, &SafetyThresholds::default()),
            Err(Rejection::NoVolume)
        );
    }

    #[test]
    fn test_custom_thresholds() {
        let relaxed = SafetyThresholds {
            min_liquidity_usd: 10_000.0,
            max_liquidity_volume_ratio: 20.0,
            max_age_minutes: 60.0,
        };
        assert!(evaluate(&pair(15_000.0, 1_000.0, 45), NOW, &relaxed).is_ok());
        assert!(evaluate(&pair(15_000.0, 1_000.0, 45), NOW, &SafetyThresholds::default()).is_err());
    }
}
