use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::Address;
use alloy::providers::ProviderBuilder;
use tokio::time::Instant;

use crate::config::Config;
use crate::repository::AlloyContractCaller;
use crate::repository::abi::ContractFunction;
use crate::repository::test_support::{MockCaller, MockReply};
use crate::service::estimator::SwapEstimator;
use crate::service::types::EstimateRequest;
use crate::service::ServiceError;

// Uniswap V2 USDC/WETH pair (Ethereum Mainnet); token0 = USDC, token1 = WETH
const PAIR: &str = "0xb4e16d0168e52d35cacd2c6185b44281ec28c9dc";
const USDC: &str = "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48";
const WETH: &str = "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2";
const DAI: &str = "0x6b175474e89094c44da98b954eedeac495271d0f";
const USDT: &str = "0xdac17f958d2ee523a2206206994597c13d831ec7";

fn addr(s: &str) -> Address {
    Address::from_str(s).unwrap()
}

fn deadline() -> Instant {
    Instant::now() + Duration::from_secs(5)
}

fn request(src: &str, dst: &str, amount: &str) -> EstimateRequest {
    EstimateRequest {
        pool: PAIR.to_string(),
        src: src.to_string(),
        dst: dst.to_string(),
        src_amount: amount.to_string(),
    }
}

/// 100k USDC / 50 WETH
fn usdc_weth_pool() -> MockCaller {
    MockCaller::new()
        .with_pool(
            addr(PAIR),
            addr(USDC),
            addr(WETH),
            100_000_000_000,
            50_000_000_000_000_000_000,
        )
        .with_token(addr(USDC), 6, "USDC")
        .with_token(addr(WETH), 18, "WETH")
}

fn estimator(caller: MockCaller) -> (SwapEstimator, Arc<MockCaller>) {
    let caller = Arc::new(caller);
    (SwapEstimator::new(caller.clone()), caller)
}

#[tokio::test]
async fn test_estimate_token0_to_token1_should_work() {
    let (estimator, caller) = estimator(usdc_weth_pool());

    let response = estimator
        .estimate(&request(USDC, WETH, "1000000000"), deadline())
        .await
        .unwrap();

    assert_eq!(response.dst_amount, "493579017198530649");
    // getReserves, token0, token1 + decimals/symbol for both tokens
    assert_eq!(caller.call_count(), 7);
}

#[tokio::test]
async fn test_estimate_token1_to_token0_uses_swapped_reserves() {
    let (estimator, _) = estimator(usdc_weth_pool());

    let response = estimator
        .estimate(&request(WETH, USDC, "1000000000000000000"), deadline())
        .await
        .unwrap();

    // 1 WETH in: 997e18 * 1e11 / (5e19 * 1000 + 997e18)
    assert_eq!(response.dst_amount, "1955016961");
}

#[tokio::test]
async fn test_estimate_accepts_mixed_case_addresses() {
    let (estimator, _) = estimator(usdc_weth_pool());
    let req = EstimateRequest {
        pool: "0xB4e16d0168e52d35CaCD2c6185b44281Ec28C9Dc".to_string(),
        src: "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48".to_string(),
        dst: "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2".to_string(),
        src_amount: "1000000000".to_string(),
    };

    let response = estimator.estimate(&req, deadline()).await.unwrap();

    assert_eq!(response.dst_amount, "493579017198530649");
}

#[tokio::test]
async fn test_estimate_minimal_trade_returns_zero() {
    let caller = MockCaller::new()
        .with_pool(addr(PAIR), addr(USDC), addr(WETH), 1, 1)
        .with_token(addr(USDC), 6, "USDC")
        .with_token(addr(WETH), 18, "WETH");
    let (estimator, _) = estimator(caller);

    let response = estimator
        .estimate(&request(USDC, WETH, "1"), deadline())
        .await
        .unwrap();

    assert_eq!(response.dst_amount, "0");
}

#[tokio::test]
async fn test_estimate_foreign_tokens_should_return_token_mismatch() {
    let caller = usdc_weth_pool()
        .with_token(addr(DAI), 18, "DAI")
        .with_token(addr(USDT), 6, "USDT");
    let (estimator, _) = estimator(caller);

    let err = estimator
        .estimate(&request(DAI, USDT, "1000"), deadline())
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::TokenMismatch { .. }));
}

#[tokio::test]
async fn test_estimate_invalid_amount_fails_before_any_call() {
    for amount in ["0", "-1", "", "1.5", "abc"] {
        let (estimator, caller) = estimator(usdc_weth_pool());

        let err = estimator
            .estimate(&request(USDC, WETH, amount), deadline())
            .await
            .unwrap_err();

        assert!(
            matches!(err, ServiceError::InvalidAmount(_)),
            "{amount:?} gave {err:?}"
        );
        assert_eq!(caller.call_count(), 0);
    }
}

#[tokio::test]
async fn test_estimate_invalid_address_fails_before_any_call() {
    let (estimator, caller) = estimator(usdc_weth_pool());

    let err = estimator
        .estimate(&request("invalid_address", WETH, "1000"), deadline())
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::InvalidAddress(_)));
    assert_eq!(caller.call_count(), 0);
}

#[tokio::test]
async fn test_estimate_non_pair_contract_should_return_pool_not_found() {
    let caller = MockCaller::new()
        .with_token(addr(USDC), 6, "USDC")
        .with_token(addr(WETH), 18, "WETH");
    let (estimator, _) = estimator(caller);

    let err = estimator
        .estimate(&request(USDC, WETH, "1000"), deadline())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ServiceError::PoolNotFound {
            pool: PAIR.to_string()
        }
    );
}

#[tokio::test]
async fn test_estimate_reverting_token1_should_return_pool_not_found() {
    let caller = usdc_weth_pool().reply(
        addr(PAIR),
        ContractFunction::Token1,
        MockReply::Fail("execution reverted".to_string()),
    );
    let (estimator, caller) = estimator(caller);

    let err = estimator
        .estimate(&request(USDC, WETH, "1000"), deadline())
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::PoolNotFound { .. }));
    // Token metadata is never requested once the pool fetch fails
    assert_eq!(caller.call_count(), 3);
}

#[tokio::test]
async fn test_estimate_token_failure_should_return_blockchain_connection_error() {
    let caller = usdc_weth_pool().reply(
        addr(WETH),
        ContractFunction::Decimals,
        MockReply::Fail("connection refused".to_string()),
    );
    let (estimator, _) = estimator(caller);

    let err = estimator
        .estimate(&request(USDC, WETH, "1000"), deadline())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ServiceError::BlockchainConnection {
            token: WETH.to_string()
        }
    );
}

#[tokio::test]
async fn test_estimate_empty_reserve_should_return_insufficient_liquidity() {
    let caller = MockCaller::new()
        .with_pool(addr(PAIR), addr(USDC), addr(WETH), 0, 1_000)
        .with_token(addr(USDC), 6, "USDC")
        .with_token(addr(WETH), 18, "WETH");
    let (estimator, _) = estimator(caller);

    let err = estimator
        .estimate(&request(USDC, WETH, "1000"), deadline())
        .await
        .unwrap_err();

    assert_eq!(err, ServiceError::InsufficientLiquidity);
}

#[tokio::test]
async fn test_estimate_stalled_call_should_time_out() {
    let caller = usdc_weth_pool().reply(addr(USDC), ContractFunction::Symbol, MockReply::Stall);
    let (estimator, _) = estimator(caller);
    let deadline = Instant::now() + Duration::from_millis(50);

    let started = Instant::now();
    let err = estimator
        .estimate(&request(USDC, WETH, "1000"), deadline)
        .await
        .unwrap_err();

    assert_eq!(err, ServiceError::Timeout);
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
#[serial_test::serial]
#[ignore]
async fn test_estimate_against_live_rpc_should_work() {
    let config = Config::from_yaml("config/test.yaml").await.unwrap();
    let provider = ProviderBuilder::new().connect_http(config.rpc.url.parse().unwrap());
    let estimator = SwapEstimator::new(Arc::new(AlloyContractCaller::new(provider)));

    let response = estimator
        .estimate(
            &request(USDC, WETH, "1000000000"),
            Instant::now() + config.request_timeout(),
        )
        .await
        .unwrap();

    println!("✅ 1000 USDC -> {} wei WETH", response.dst_amount);
    assert_ne!(response.dst_amount, "0");
}

#[tokio::test]
async fn test_estimate_oversized_reserve_word_should_return_pool_not_found() {
    let mut reserves = vec![0xffu8; 32];
    reserves.extend([0u8; 31].into_iter().chain([2]));
    reserves.extend([0u8; 31].into_iter().chain([3]));
    let caller = usdc_weth_pool().reply(
        addr(PAIR),
        ContractFunction::GetReserves,
        MockReply::Data(reserves),
    );
    let (estimator, _) = estimator(caller);

    let err = estimator
        .estimate(&request(USDC, WETH, "1000"), deadline())
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::PoolNotFound { .. }));
}

#[tokio::test]
async fn test_estimate_out_of_range_decimals_should_return_blockchain_connection_error() {
    let mut decimals = vec![0u8; 30];
    decimals.extend([0x01, 0x00]);
    let caller = usdc_weth_pool().reply(
        addr(USDC),
        ContractFunction::Decimals,
        MockReply::Data(decimals),
    );
    let (estimator, _) = estimator(caller);

    let err = estimator
        .estimate(&request(USDC, WETH, "1000"), deadline())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ServiceError::BlockchainConnection {
            token: USDC.to_string()
        }
    );
}
