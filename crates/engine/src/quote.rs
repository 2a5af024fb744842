//! Quote computation: live pool pricing with reference-rate fallbacks.

use dex_chain::factory::FactoryClient;
use dex_chain::pool::PoolClient;
use dex_chain::provider::ChainReader;
use dex_chain::registry::{ChainConfig, ChainRegistry};
use dex_domain::math::sqrt_price::rate_from_sqrt_price;
use dex_domain::{Amount, FeeTier, PoolReference, Quote, SwapError, Token, TokenAddress};
use primitive_types::H160;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

/// Price impact shown for reference-rate quotes on chains without a DEX.
const DEMO_IMPACT_PCT: f64 = 0.15;
/// Price impact shown when no pool exists for the pair.
const NO_POOL_IMPACT_PCT: f64 = 0.5;
/// Price impact shown when pool reads fail and the quote is degraded.
const DEGRADED_IMPACT_PCT: f64 = 1.0;

/// Inputs for a quote. Unlike a `SwapRequest` this is deliberately loose:
/// a blank or unparseable amount is "nothing to quote", not an error.
#[derive(Debug, Clone)]
pub struct QuoteRequest {
    pub token_in: Token,
    pub token_out: Token,
    /// Human decimal string as typed, possibly empty.
    pub amount_in: String,
}

impl From<&dex_domain::SwapRequest> for QuoteRequest {
    fn from(req: &dex_domain::SwapRequest) -> Self {
        Self {
            token_in: req.token_in.clone(),
            token_out: req.token_out.clone(),
            amount_in: req.amount_in.clone(),
        }
    }
}

/// Computes quotes. Stateless apart from its handles; every call re-reads
/// pool state, so a returned `Quote::Live` is a point-in-time snapshot.
pub struct QuoteEngine {
    registry: Arc<ChainRegistry>,
    reader: Arc<dyn ChainReader>,
}

impl QuoteEngine {
    pub fn new(registry: Arc<ChainRegistry>, reader: Arc<dyn ChainReader>) -> Self {
        Self { registry, reader }
    }

    /// Returns `Ok(None)` when there is nothing to quote (empty or
    /// non-positive amount). Same-token pairs are a hard error. Chain-read
    /// failures never propagate: they degrade into `Quote::Estimated`.
    pub async fn quote(
        &self,
        chain_id: u64,
        request: &QuoteRequest,
    ) -> Result<Option<Quote>, SwapError> {
        let text = request.amount_in.trim();
        if text.is_empty() {
            return Ok(None);
        }
        let Ok(amount_in) = text.parse::<f64>() else {
            return Ok(None);
        };
        if !amount_in.is_finite() || amount_in <= 0.0 {
            return Ok(None);
        }

        if request.token_in.same_asset(&request.token_out)
            || request.token_in.symbol == request.token_out.symbol
        {
            return Err(SwapError::Validation(
                "cannot quote a token against itself".into(),
            ));
        }

        let chain = self.registry.chain(chain_id)?;

        if !chain.has_dex_support() {
            debug!(chain_id, "Chain has no DEX, serving reference-rate quote");
            return Ok(Some(estimated_quote(
                chain,
                request,
                amount_in,
                DEMO_IMPACT_PCT,
                false,
            )));
        }

        match self.live_quote(chain, request, amount_in).await {
            Ok(Some(quote)) => Ok(Some(quote)),
            Ok(None) => {
                warn!(
                    token_in = %request.token_in.symbol,
                    token_out = %request.token_out.symbol,
                    "No usable pool for pair, serving estimate"
                );
                Ok(Some(estimated_quote(
                    chain,
                    request,
                    amount_in,
                    NO_POOL_IMPACT_PCT,
                    false,
                )))
            }
            Err(e) => {
                warn!(error = %e, "Pool read failed, serving degraded estimate");
                Ok(Some(estimated_quote(
                    chain,
                    request,
                    amount_in,
                    DEGRADED_IMPACT_PCT,
                    true,
                )))
            }
        }
    }

    /// Resolves the pool for a pair at the default fee tier, with its
    /// tokens in canonical order. Tokens come back in resolved (wrapped)
    /// form so side detection works for native inputs too. Never cached;
    /// a later quote after a chain switch must re-resolve.
    async fn locate_pool(
        &self,
        chain: &ChainConfig,
        token_in: &Token,
        token_out: &Token,
    ) -> Result<Option<PoolReference>, SwapError> {
        let wrapped = chain.wrapped_native()?;
        let addr_in = token_in.address.resolve(wrapped);
        let addr_out = token_out.address.resolve(wrapped);

        let factory = FactoryClient::new(self.reader.clone(), chain.factory()?);
        let fee = FeeTier::default();
        let Some(address) = factory.get_pool(addr_in, addr_out, fee).await? else {
            return Ok(None);
        };

        let token0 = PoolClient::new(self.reader.clone(), address).token0().await?;
        let (first, second) = if token0 == addr_in {
            (token_in, token_out)
        } else {
            (token_out, token_in)
        };

        Ok(Some(PoolReference {
            address,
            token0: resolved(first, wrapped),
            token1: resolved(second, wrapped),
            fee,
        }))
    }

    /// `Ok(None)` means the pair has no pool (or an empty one) at the
    /// default fee tier; `Err` means a chain read failed.
    async fn live_quote(
        &self,
        chain: &ChainConfig,
        request: &QuoteRequest,
        amount_in: f64,
    ) -> Result<Option<Quote>, SwapError> {
        let Some(pool_ref) = self
            .locate_pool(chain, &request.token_in, &request.token_out)
            .await?
        else {
            return Ok(None);
        };

        let pool = PoolClient::new(self.reader.clone(), pool_ref.address);
        let state = pool.state().await?;

        if !state.has_liquidity() {
            warn!(pool = %pool_ref.address, "Pool exists but holds no liquidity");
            return Ok(None);
        }

        let addr_in = request.token_in.address.resolve(chain.wrapped_native()?);
        let input_is_token0 = pool_ref.input_is_token0(addr_in);

        let rate = rate_from_sqrt_price(
            state.sqrt_price_x96,
            pool_ref.token0.decimals,
            pool_ref.token1.decimals,
            input_is_token0,
        );
        let amount_out = amount_in * rate;

        debug!(
            pool = %pool_ref.address,
            tick = state.tick,
            rate,
            "Live quote from pool state"
        );

        Ok(Some(Quote::Live {
            amount_out: format_token_amount(amount_out, &request.token_out),
            rate,
            price_impact_pct: price_impact_estimate(amount_in),
        }))
    }
}

/// Heuristic impact for live quotes: a small floor plus a term linear in
/// trade size, capped at 5%. Not derived from pool depth.
pub(crate) fn price_impact_estimate(amount_in: f64) -> f64 {
    (0.01 + amount_in * 0.001).min(5.0)
}

fn resolved(token: &Token, wrapped: H160) -> Token {
    Token {
        address: TokenAddress::Contract(token.address.resolve(wrapped)),
        ..token.clone()
    }
}

fn estimated_quote(
    chain: &ChainConfig,
    request: &QuoteRequest,
    amount_in: f64,
    price_impact_pct: f64,
    degraded: bool,
) -> Quote {
    let rate = chain.reference_rate(&request.token_in.symbol, &request.token_out.symbol);
    Quote::Estimated {
        amount_out: format_token_amount(amount_in * rate, &request.token_out),
        rate,
        price_impact_pct,
        degraded,
    }
}

/// Truncates (never rounds) to the token's display precision and trims
/// trailing zeros.
fn format_token_amount(value: f64, token: &Token) -> String {
    match Amount::from_f64(value, token.decimals) {
        Ok(amount) => amount.format_display(),
        // Out of fixed-point range; the float rendering is the best left.
        Err(_) => format!("{value}"),
    }
}

/// Monotonic quote sequencing. Each quote takes a ticket on entry; by the
/// time it resolves, a newer ticket may exist, and the stale result must
/// be dropped rather than shown.
#[derive(Debug, Default)]
pub struct QuoteSequencer {
    latest: AtomicU64,
}

impl QuoteSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket
    }
}
