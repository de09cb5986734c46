use alloy::primitives::U256;

use super::test_utils::*;
use crate::address::sort_tokens;
use crate::error::QuoteError;
use crate::math::get_amount_out;
use crate::quote::{Quote, Route};

fn u(v: u128) -> U256 {
    U256::from(v)
}

// All quoting tests run against the in-memory reader
#[cfg(test)]
mod engine_quotes {
    use super::*;

    #[tokio::test]
    async fn direct_pair_pinned_value() {
        let engine = engine(MockReader::new().with_pair(GAD, USDT, 1_000_000, 2_000_000));
        let quote = engine.quote_exact_input(GAD, USDT, u(1_000)).await.unwrap();
        assert_eq!(quote.amount_out, u(1992));
        assert_eq!(quote.path, vec![GAD, USDT]);
        assert_eq!(quote.route, Route::Direct);
    }

    #[tokio::test]
    async fn reserves_are_oriented_by_pair_tokens() {
        // USDT sorts before GAD, so the pair stores USDT as token0
        let engine = engine(MockReader::new().with_pair(GAD, USDT, 1_000_000, 2_000_000));
        let quote = engine.quote_exact_input(USDT, GAD, u(1_000)).await.unwrap();
        assert_eq!(quote.amount_out, get_amount_out(u(1_000), u(2_000_000), u(1_000_000), 25));
        assert_eq!(quote.path, vec![USDT, GAD]);
    }

    #[tokio::test]
    async fn native_sentinel_routes_through_wrapped() {
        let engine = engine(MockReader::new().with_pair(WBNB, GAD, 500_000, 9_000_000));
        let quote = engine.quote_exact_input(BNB, GAD, u(10_000)).await.unwrap();
        assert_eq!(quote.amount_out, get_amount_out(u(10_000), u(500_000), u(9_000_000), 25));
        // caller-facing path keeps the sentinel
        assert_eq!(quote.path, vec![BNB, GAD]);
        assert!(!engine.reader().queried_tokens().contains(&BNB));
    }

    #[tokio::test]
    async fn two_hop_composes() {
        let reader = MockReader::new()
            .with_pair(GAD, WBNB, 4_000_000, 1_000_000)
            .with_pair(WBNB, CAKE, 3_000_000, 7_000_000);
        let engine = engine(reader);
        let amount_in = u(25_000);

        let quote = engine.quote_exact_input(GAD, CAKE, amount_in).await.unwrap();
        assert_eq!(quote.route, Route::ViaWrappedNative);
        assert_eq!(quote.path, vec![GAD, WBNB, CAKE]);

        let first = engine.quote_exact_input(GAD, WBNB, amount_in).await.unwrap();
        let second = engine.quote_exact_input(WBNB, CAKE, first.amount_out).await.unwrap();
        assert_eq!(quote.amount_out, second.amount_out);

        let expected = get_amount_out(
            get_amount_out(amount_in, u(4_000_000), u(1_000_000), 25),
            u(3_000_000),
            u(7_000_000),
            25,
        );
        assert_eq!(quote.amount_out, expected);
    }

    #[tokio::test]
    async fn empty_direct_pair_falls_back_to_two_hop() {
        let reader = MockReader::new()
            .with_pair(GAD, CAKE, 0, 1_000_000)
            .with_pair(GAD, WBNB, 4_000_000, 1_000_000)
            .with_pair(WBNB, CAKE, 3_000_000, 7_000_000);
        let quote = engine(reader).quote_exact_input(GAD, CAKE, u(5_000)).await.unwrap();
        assert_eq!(quote.route, Route::ViaWrappedNative);
        assert!(quote.amount_out > U256::ZERO);
    }

    #[tokio::test]
    async fn no_route_is_a_zero_quote() {
        let reader = MockReader::new().with_pair(GAD, WBNB, 4_000_000, 1_000_000);
        let quote = engine(reader).quote_exact_input(GAD, CAKE, u(5_000)).await.unwrap();
        assert_eq!(quote.amount_out, U256::ZERO);
        assert!(quote.path.is_empty());
        assert_eq!(quote.route, Route::NoLiquidity);
        assert!(!quote.has_route());
    }

    #[tokio::test]
    async fn no_pairs_at_all() {
        let quote = engine(MockReader::new())
            .quote_exact_input(GAD, USDT, u(1))
            .await
            .unwrap();
        assert_eq!(quote.amount_out, U256::ZERO);
        assert!(quote.path.is_empty());
    }

    #[tokio::test]
    async fn zero_amount_makes_no_calls() {
        let engine = engine(MockReader::new().with_pair(GAD, USDT, 1_000_000, 2_000_000));
        let quote = engine.quote_exact_input(GAD, USDT, U256::ZERO).await.unwrap();
        assert_eq!(quote.amount_out, U256::ZERO);
        assert!(quote.path.is_empty());
        assert_eq!(engine.reader().call_count(), 0);
    }

    #[tokio::test]
    async fn zero_amount_on_liquid_pair_is_not_no_liquidity() {
        let engine = engine(MockReader::new().with_pair(GAD, USDT, 1_000_000, 2_000_000));
        let quote = engine.quote_exact_input(GAD, USDT, U256::ZERO).await.unwrap();
        assert_eq!(quote.route, Route::ZeroInput);
        assert_ne!(quote.route, Route::NoLiquidity);
        assert!(!quote.has_route());
    }

    #[tokio::test]
    async fn zero_amount_wins_over_identical_tokens() {
        let engine = engine(MockReader::new());
        let quote = engine.quote_exact_input(GAD, GAD, U256::ZERO).await.unwrap();
        assert_eq!(quote, Quote::zero_input());
        assert_eq!(engine.reader().call_count(), 0);
    }

    #[tokio::test]
    async fn no_two_hop_when_output_is_wrapped_native() {
        // GAD -> BNB routes as GAD -> WBNB, a hop through WBNB would be the same pair again
        let engine = engine(MockReader::new());
        let quote = engine.quote_exact_input(GAD, BNB, u(1_000)).await.unwrap();
        assert_eq!(quote.route, Route::NoLiquidity);
        assert_eq!(engine.reader().call_count(), 1);
        assert_eq!(*engine.reader().pair_queries.lock().unwrap(), vec![sort_tokens(GAD, WBNB)]);
    }

    #[tokio::test]
    async fn pair_without_input_token_is_a_network_error() {
        let reader = MockReader::new().with_mismatched_pair(GAD, CAKE, USDT, WBNB);
        let err = engine(reader).quote_exact_input(GAD, CAKE, u(1_000)).await.unwrap_err();
        assert!(matches!(err, QuoteError::Network(_)));
    }

    #[tokio::test]
    async fn identical_tokens_are_rejected() {
        let engine = engine(MockReader::new());
        let err = engine.quote_exact_input(BNB, WBNB, u(1_000)).await.unwrap_err();
        assert!(matches!(err, QuoteError::InvalidInput(_)));
        assert_eq!(engine.reader().call_count(), 0);
    }

    #[tokio::test]
    async fn reserve_failure_is_a_network_error() {
        let reader = MockReader::new()
            .with_pair(GAD, USDT, 1_000_000, 2_000_000)
            .failing_reserves(GAD, USDT);
        let err = engine(reader).quote_exact_input(GAD, USDT, u(1_000)).await.unwrap_err();
        assert!(matches!(err, QuoteError::Network(_)));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn second_hop_failure_is_a_network_error() {
        let reader = MockReader::new()
            .with_pair(GAD, WBNB, 4_000_000, 1_000_000)
            .with_pair(WBNB, CAKE, 3_000_000, 7_000_000)
            .failing_reserves(WBNB, CAKE);
        let err = engine(reader).quote_exact_input(GAD, CAKE, u(1_000)).await.unwrap_err();
        assert!(matches!(err, QuoteError::Network(_)));
    }

    #[tokio::test]
    async fn factory_failure_is_not_no_liquidity() {
        let reader = MockReader::new().failing_factory();
        let err = engine(reader).quote_exact_input(GAD, USDT, u(1_000)).await.unwrap_err();
        assert_eq!(err.user_message(), "Network error, try again");
    }

    #[tokio::test]
    async fn larger_input_never_quotes_less() {
        let engine = engine(MockReader::new().with_pair(GAD, USDT, 1_000_000, 2_000_000));
        let mut previous = U256::ZERO;
        for amount in [1_000u128, 2_000, 10_000, 50_000, 400_000] {
            let quote = engine.quote_exact_input(GAD, USDT, u(amount)).await.unwrap();
            assert!(quote.amount_out > previous);
            previous = quote.amount_out;
        }
    }
}

#[cfg(test)]
mod pair_resolution {
    use super::*;

    #[tokio::test]
    async fn resolution_is_order_independent() {
        let engine = engine(MockReader::new().with_pair(GAD, USDT, 1, 1));
        let ab = engine.resolve_pair_address(GAD, USDT).await.unwrap();
        let ba = engine.resolve_pair_address(USDT, GAD).await.unwrap();
        assert!(ab.is_some());
        assert_eq!(ab, ba);
        // the factory always sees the canonical order
        for (a, b) in engine.reader().pair_queries.lock().unwrap().iter() {
            assert!(a < b);
        }
    }

    #[tokio::test]
    async fn missing_pair_is_none() {
        let engine = engine(MockReader::new());
        assert_eq!(engine.resolve_pair_address(GAD, CAKE).await.unwrap(), None);
    }

    #[tokio::test]
    async fn factory_failure_propagates() {
        let engine = engine(MockReader::new().failing_factory());
        assert!(matches!(
            engine.resolve_pair_address(GAD, CAKE).await,
            Err(QuoteError::Network(_))
        ));
    }

    #[tokio::test]
    async fn reserves_carry_pair_tokens() {
        let reader = MockReader::new().with_pair(GAD, USDT, 1_000_000, 2_000_000);
        let pair = reader.pair_of(GAD, USDT);
        let state = engine(reader).get_reserves(pair).await.unwrap();
        assert_eq!((state.token0, state.token1), (USDT, GAD));
        assert_eq!((state.reserve0, state.reserve1), (u(2_000_000), u(1_000_000)));
        assert_eq!(state.reserves_for(GAD), Some((u(1_000_000), u(2_000_000))));
        assert_eq!(state.block_timestamp_last, 1_700_000_000);
    }
}
