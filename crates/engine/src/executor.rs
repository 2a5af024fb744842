//! Swap submission and confirmation.

use dex_chain::provider::WalletProvider;
use dex_chain::registry::ChainRegistry;
use dex_chain::router::{ExactInputSingle, RouterClient};
use dex_domain::{Amount, FeeTier, Quote, SwapError, SwapRequest};
use primitive_types::{H256, U256};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// How long the simulated swap takes on chains without a DEX.
const DEMO_CONFIRMATION_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapOutcome {
    pub tx_hash: H256,
}

/// Builds, submits and confirms exact-input swaps. On chains without a
/// DEX deployment the whole flow is simulated: a delay, a synthetic hash,
/// and not a single contract call.
pub struct SwapExecutor {
    registry: Arc<ChainRegistry>,
}

impl SwapExecutor {
    pub fn new(registry: Arc<ChainRegistry>) -> Self {
        Self { registry }
    }

    pub async fn execute(
        &self,
        wallet: &dyn WalletProvider,
        chain_id: u64,
        request: &SwapRequest,
        quote: &Quote,
    ) -> Result<SwapOutcome, SwapError> {
        let (amount_in, slippage) = request.validate()?;
        let chain = self.registry.chain(chain_id)?;

        if !chain.has_dex_support() {
            info!(chain_id, "No DEX on chain, simulating swap");
            return Ok(demo_swap().await);
        }

        let wrapped = chain.wrapped_native()?;
        let native_input = request.token_in.is_native();

        // Slippage bound comes from the quoted output, re-parsed into base
        // units so the floor is computed in integers.
        let expected_out = Amount::parse(quote.amount_out(), request.token_out.decimals)?;
        let minimum_out = slippage.minimum_out(expected_out);

        let deadline = (chrono::Utc::now().timestamp() as u64)
            .saturating_add(request.deadline_minutes.saturating_mul(60));

        let params = ExactInputSingle {
            token_in: request.token_in.address.resolve(wrapped),
            token_out: request.token_out.address.resolve(wrapped),
            fee: FeeTier::default(),
            recipient: wallet.address(),
            deadline,
            amount_in: amount_in.raw,
            amount_out_minimum: minimum_out.raw,
        };
        // Native input rides along as msg.value; the router wraps it.
        let value = if native_input { amount_in.raw } else { U256::zero() };

        let router = RouterClient::new(chain.router()?);
        let tx = router.exact_input_single(&params, value);

        info!(
            token_in = %request.token_in.symbol,
            token_out = %request.token_out.symbol,
            amount_in = %amount_in.format_display(),
            minimum_out = %minimum_out.format_display(),
            deadline,
            "Submitting swap"
        );

        let tx_hash = wallet.send_transaction(tx).await.map_err(|e| match e {
            e @ SwapError::SubmitFailed(_) => e,
            other => SwapError::SubmitFailed(other.to_string()),
        })?;
        debug!(tx_hash = %format_args!("{tx_hash:#x}"), "Swap broadcast");

        // Past this point the transaction exists on chain; a lost
        // confirmation is a timeout carrying the hash, never a retryable
        // submission error.
        let receipt = match wallet.wait_for_receipt(tx_hash).await {
            Ok(receipt) => receipt,
            Err(_) => return Err(SwapError::SwapTimedOut { tx_hash }),
        };

        if !receipt.success {
            return Err(SwapError::SwapReverted { tx_hash });
        }

        info!(tx_hash = %format_args!("{tx_hash:#x}"), "Swap confirmed");
        Ok(SwapOutcome { tx_hash })
    }
}

async fn demo_swap() -> SwapOutcome {
    tokio::time::sleep(DEMO_CONFIRMATION_DELAY).await;
    let bytes: [u8; 32] = rand::random();
    SwapOutcome {
        tx_hash: H256::from(bytes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockWallet, request_between, usdc, zg};
    use dex_chain::abi;
    use dex_chain::registry::{ChainRegistry, ZG_MAINNET, ZG_TESTNET};
    use primitive_types::H160;

    fn executor() -> SwapExecutor {
        SwapExecutor::new(Arc::new(ChainRegistry::bundled()))
    }

    fn live_quote(amount_out: &str) -> Quote {
        Quote::Live {
            amount_out: amount_out.into(),
            rate: 0.0,
            price_impact_pct: 0.0,
        }
    }

    #[tokio::test]
    async fn test_calldata_carries_slippage_floor_and_value() {
        let wallet = MockWallet::new(H160::repeat_byte(0x01));
        let request = request_between(zg(), usdc(), "100", 0.5);

        let outcome = executor()
            .execute(&wallet, ZG_MAINNET, &request, &live_quote("100"))
            .await
            .unwrap();

        let sent = wallet.sent();
        assert_eq!(sent.len(), 1);
        let tx = &sent[0];
        // Native input: msg.value equals the input amount.
        assert_eq!(tx.value, U256::from(10u64).pow(U256::from(20u64)));

        let body = &tx.data[4..];
        // 100 USDCe quoted at 0.5% tolerance floors at 99.5.
        assert_eq!(
            abi::decode_u256(body, 6).unwrap(),
            U256::from(99_500_000u64)
        );
        assert_eq!(outcome.tx_hash, wallet.last_tx_hash().unwrap());
    }

    #[tokio::test]
    async fn test_ten_native_at_rate_one_and_a_half() {
        // 10 units in at rate 1.5 quotes 15 out; 0.5% tolerance floors the
        // bound at 14.925 in 6-decimal base units.
        let wallet = MockWallet::new(H160::repeat_byte(0x01));
        let request = request_between(zg(), usdc(), "10", 0.5);

        executor()
            .execute(&wallet, ZG_MAINNET, &request, &live_quote("15"))
            .await
            .unwrap();

        let body = &wallet.sent()[0].data[4..];
        assert_eq!(
            abi::decode_u256(body, 6).unwrap(),
            U256::from(14_925_000u64)
        );
    }

    #[tokio::test]
    async fn test_erc20_input_sends_zero_value() {
        let wallet = MockWallet::new(H160::repeat_byte(0x01));
        let request = request_between(usdc(), zg(), "50", 0.5);

        executor()
            .execute(&wallet, ZG_MAINNET, &request, &live_quote("50"))
            .await
            .unwrap();

        assert!(wallet.sent()[0].value.is_zero());
    }

    #[tokio::test]
    async fn test_send_failure_is_retry_safe() {
        let wallet = MockWallet::new(H160::repeat_byte(0x01)).fail_sends("nonce too low");
        let request = request_between(zg(), usdc(), "1", 0.5);

        let err = executor()
            .execute(&wallet, ZG_MAINNET, &request, &live_quote("1"))
            .await
            .unwrap_err();
        assert!(matches!(&err, SwapError::SubmitFailed(_)));
        assert!(err.retry_safe());
    }

    #[tokio::test]
    async fn test_lost_confirmation_reports_timeout_with_hash() {
        let wallet = MockWallet::new(H160::repeat_byte(0x01)).drop_receipts();
        let request = request_between(zg(), usdc(), "1", 0.5);

        let err = executor()
            .execute(&wallet, ZG_MAINNET, &request, &live_quote("1"))
            .await
            .unwrap_err();
        match &err {
            SwapError::SwapTimedOut { tx_hash } => {
                assert_eq!(*tx_hash, wallet.last_tx_hash().unwrap());
            }
            other => panic!("expected timeout, got {other}"),
        }
        assert!(!err.retry_safe());
    }

    #[tokio::test]
    async fn test_revert_reports_hash() {
        let wallet = MockWallet::new(H160::repeat_byte(0x01)).revert_receipts();
        let request = request_between(zg(), usdc(), "1", 0.5);

        let err = executor()
            .execute(&wallet, ZG_MAINNET, &request, &live_quote("1"))
            .await
            .unwrap_err();
        assert!(matches!(&err, SwapError::SwapReverted { .. }));
        assert_eq!(err.tx_hash(), wallet.last_tx_hash());
    }

    #[tokio::test]
    async fn test_extreme_deadline_saturates() {
        let wallet = MockWallet::new(H160::repeat_byte(0x01));
        let mut request = request_between(zg(), usdc(), "1", 0.5);
        request.deadline_minutes = u64::MAX;

        executor()
            .execute(&wallet, ZG_MAINNET, &request, &live_quote("1"))
            .await
            .unwrap();

        let body = &wallet.sent()[0].data[4..];
        assert_eq!(abi::decode_u256(body, 4).unwrap(), U256::from(u64::MAX));
    }

    #[tokio::test(start_paused = true)]
    async fn test_demo_chain_simulates_without_contract_calls() {
        let wallet = MockWallet::new(H160::repeat_byte(0x01));
        let request = request_between(zg(), usdc(), "10", 0.5);

        let outcome = executor()
            .execute(&wallet, ZG_TESTNET, &request, &live_quote("10"))
            .await
            .unwrap();

        assert_ne!(outcome.tx_hash, H256::zero());
        assert!(wallet.sent().is_empty());
        assert_eq!(wallet.address(), H160::repeat_byte(0x01));
    }
}
