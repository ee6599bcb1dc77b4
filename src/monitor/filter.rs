use std::cmp::Reverse;

use crate::models::TradingPair;

/// Keeps pairs on `target_chain`, newest first, at most `limit` of them.
/// Pairs without a creation timestamp sort as if created at the epoch.
pub fn select_candidates(
    pairs: Vec<TradingPair>,
    target_chain: &str,
    limit: usize,
) -> Vec<TradingPair> {
    let mut candidates: Vec<TradingPair> = pairs
        .into_iter()
        .filter(|p| p.chain_id == target_chain)
        .collect();

    candidates.sort_by_key(|p| Reverse(p.created_at_or_epoch()));
    candidates.truncate(limit);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BaseToken;

    fn pair(chain: &str, address: &str, created: Option<i64>) -> TradingPair {
        TradingPair {
            chain_id: chain.to_string(),
            base_token: BaseToken {
                address: address.to_string(),
                symbol: address.to_uppercase(),
                name: address.to_string(),
            },
            price_usd: None,
            liquidity: None,
            volume: None,
            pair_created_at: created,
            url: None,
        }
    }

    #[test]
    fn test_excludes_other_chains() {
        let pairs = vec![
            pair("solana", "a", Some(1)),
            pair("ethereum", "b", Some(5)),
            pair("bsc", "c", Some(3)),
            pair("solana", "d", Some(2)),
        ];

        let selected = select_candidates(pairs, "solana", 20);
        assert_eq!(selected.len(), 2);
        assert!(selected.iter().all(|p| p.chain_id == "solana"));
    }

    #[test]
    fn test_sorted_newest_first_with_missing_as_epoch() {
        let pairs = vec![
            pair("solana", "old", Some(100)),
            pair("solana", "none", None),
            pair("solana", "new", Some(300)),
            pair("solana", "mid", Some(200)),
        ];

        let selected = select_candidates(pairs, "solana", 20);
        let order: Vec<&str> = selected.iter().map(|p| p.token_address()).collect();
        assert_eq!(order, vec!["new", "mid", "old", "none"]);
    }

    #[test]
    fn test_truncates_to_limit() {
        let pairs: Vec<TradingPair> = (0..50)
            .map(|i| pair("solana", &format!("t{}", i), Some(i * 1_000)))
            .collect();

        let selected = select_candidates(pairs, "solana", 20);
        assert_eq!(selected.len(), 20);
        assert_eq!(selected[0].token_address(), "t49");
        assert!(selected
            .windows(2)
            .all(|w| w[0].created_at_or_epoch() >= w[1].created_at_or_epoch()));
    }

    #[test]
    fn test_empty_input() {
        assert!(select_candidates(Vec::new(), "solana", 20).is_empty());
    }
}
