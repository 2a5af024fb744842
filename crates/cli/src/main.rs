//! Command line interface for the swap engine.
use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use dex_chain::erc20::Erc20Client;
use dex_chain::provider::{ChainReader, TransactionReceipt, TransactionRequest, WalletProvider};
use dex_chain::registry::{ChainConfig, ChainRegistry, ZG_MAINNET};
use dex_chain::rpc::RpcClient;
use dex_domain::entities::token::parse_address;
use dex_domain::{Amount, Quote, SwapError, SwapRequest, Token};
use dex_engine::{QuoteRequest, SwapService};
use dotenv::dotenv;
use primitive_types::{H160, H256};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "dex-cli")]
#[command(about = "Swap quoting and execution for V3-style DEXes", long_about = None)]
struct Cli {
    /// Chain id to operate on
    #[arg(short, long, default_value_t = ZG_MAINNET)]
    chain_id: u64,

    /// Path to a TOML chain registry (defaults to the bundled networks)
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Override the chain's RPC endpoint
    #[arg(long)]
    rpc_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List configured chains and their DEX availability
    Chains,
    /// List the token registry of the selected chain
    Tokens,
    /// List the statically known, verified pools of the selected chain
    Pools,
    /// Quote a swap without executing anything
    Quote {
        /// Input token symbol (e.g., 0G)
        #[arg(short, long)]
        from: String,

        /// Output token symbol (e.g., USDCe)
        #[arg(short, long)]
        to: String,

        /// Human amount to swap, e.g. "1.5"
        #[arg(short, long)]
        amount: String,
    },
    /// Show an account's native or token balance
    Balance {
        /// Account address (0x...)
        #[arg(short, long)]
        owner: String,

        /// Token symbol; omitted means the native balance
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Execute a swap. Only chains without a DEX (demo mode) can complete
    /// this; live chains need a connected wallet, which the CLI does not
    /// bundle.
    Swap {
        /// Input token symbol
        #[arg(short, long)]
        from: String,

        /// Output token symbol
        #[arg(short, long)]
        to: String,

        /// Human amount to swap
        #[arg(short, long)]
        amount: String,

        /// Slippage tolerance percent
        #[arg(long, default_value_t = 0.5)]
        slippage: f64,

        /// Deadline in minutes
        #[arg(long, default_value_t = 20)]
        deadline: u64,

        /// Recipient account (0x...)
        #[arg(long, default_value = "0x0000000000000000000000000000000000000001")]
        recipient: String,
    },
}

/// Signerless wallet stand-in. Demo-mode swaps never reach it; anything
/// that actually needs a signature fails with a clear message.
struct UnconnectedWallet {
    address: H160,
}

#[async_trait]
impl WalletProvider for UnconnectedWallet {
    fn address(&self) -> H160 {
        self.address
    }

    async fn send_transaction(&self, _request: TransactionRequest) -> Result<H256, SwapError> {
        Err(SwapError::SubmitFailed(
            "no signer configured; only demo chains can execute swaps from the CLI".into(),
        ))
    }

    async fn wait_for_receipt(&self, _tx_hash: H256) -> Result<TransactionReceipt, SwapError> {
        Err(SwapError::Network("no signer configured".into()))
    }
}

fn load_registry(cli: &Cli) -> Result<ChainRegistry> {
    match &cli.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading registry {}", path.display()))?;
            Ok(ChainRegistry::from_toml_str(&raw)?)
        }
        None => Ok(ChainRegistry::bundled()),
    }
}

fn reader_for(cli: &Cli, chain: &ChainConfig) -> Result<Arc<RpcClient>> {
    let url = cli
        .rpc_url
        .clone()
        .or_else(|| chain.rpc_url.clone())
        .with_context(|| format!("no RPC endpoint configured for chain {}", chain.chain_id))?;
    Ok(Arc::new(RpcClient::new(url)))
}

fn resolve_token(chain: &ChainConfig, symbol: &str) -> Result<Token> {
    chain
        .token_by_symbol(symbol)
        .cloned()
        .with_context(|| format!("token {symbol} not in the registry of {}", chain.name))
}

fn print_quote(quote: &Quote) {
    println!("💱 Rate:         {:.6}", quote.rate());
    println!("📉 Price impact: {:.2}%", quote.price_impact_pct());
    match quote {
        Quote::Live { amount_out, .. } => {
            println!("✅ Expected out: {amount_out} (live pool price)");
        }
        Quote::Estimated {
            amount_out,
            degraded,
            ..
        } => {
            println!("🔮 Expected out: {amount_out} (estimated, no pool backing)");
            if *degraded {
                println!("⚠️  Chain reads failed; this estimate is degraded.");
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let registry = Arc::new(load_registry(&cli)?);

    match &cli.command {
        Commands::Chains => {
            println!("{:<10} | {:<22} | {:<8}", "Chain id", "Name", "DEX");
            println!("{}", "-".repeat(46));
            let mut ids: Vec<u64> = registry.chain_ids().collect();
            ids.sort_unstable();
            for id in ids {
                let chain = registry.chain(id)?;
                let dex = if chain.has_dex_support() { "yes" } else { "demo" };
                println!("{:<10} | {:<22} | {:<8}", id, chain.name, dex);
            }
        }
        Commands::Tokens => {
            let chain = registry.chain(cli.chain_id)?;
            println!("🪙 Tokens on {}:", chain.name);
            println!(
                "{:<8} | {:<20} | {:<9} | {:<44}",
                "Symbol", "Name", "Decimals", "Address"
            );
            println!("{}", "-".repeat(90));
            for token in &chain.tokens {
                let address = match token.address.contract() {
                    Some(a) => format!("{a:#x}"),
                    None => "native".to_string(),
                };
                println!(
                    "{:<8} | {:<20} | {:<9} | {:<44}",
                    token.symbol, token.name, token.decimals, address
                );
            }
        }
        Commands::Pools => {
            let chain = registry.chain(cli.chain_id)?;
            if chain.known_pools.is_empty() {
                println!("❌ No verified pools recorded for {}.", chain.name);
                return Ok(());
            }
            println!("🏊 Verified pools on {}:", chain.name);
            println!(
                "{:<14} | {:<8} | {:<44}",
                "Pair", "Fee bps", "Address"
            );
            println!("{}", "-".repeat(72));
            for pool in &chain.known_pools {
                let pair = pool.name.clone().unwrap_or_else(|| pool.id.clone());
                println!(
                    "{:<14} | {:<8} | {:<44}",
                    pair,
                    pool.fee.bps(),
                    format!("{:#x}", pool.address)
                );
            }
        }
        Commands::Quote { from, to, amount } => {
            let chain = registry.chain(cli.chain_id)?;
            let token_in = resolve_token(chain, from)?;
            let token_out = resolve_token(chain, to)?;
            let reader = reader_for(&cli, chain)?;
            let service = SwapService::new(registry.clone(), reader);

            println!(
                "🔍 Quoting {amount} {} -> {} on {}...",
                token_in.symbol, token_out.symbol, chain.name
            );
            let request = QuoteRequest {
                token_in,
                token_out,
                amount_in: amount.clone(),
            };
            match service.quote(cli.chain_id, &request).await? {
                Some(quote) => print_quote(&quote),
                None => println!("❌ Nothing to quote for amount {amount:?}."),
            }
        }
        Commands::Balance { owner, token } => {
            let chain = registry.chain(cli.chain_id)?;
            let reader = reader_for(&cli, chain)?;
            let owner = parse_address(owner)?;

            let (symbol, amount) = match token.as_deref() {
                None => {
                    let raw = reader.native_balance(owner).await?;
                    (
                        chain.native.symbol.clone(),
                        Amount::new(raw, chain.native.decimals),
                    )
                }
                Some(symbol) => {
                    let token = resolve_token(chain, symbol)?;
                    match token.address.contract() {
                        Some(contract) => {
                            let erc20 = Erc20Client::new(reader.clone());
                            let raw = erc20.balance_of(contract, owner).await?;
                            (token.symbol.clone(), Amount::new(raw, token.decimals))
                        }
                        None => {
                            let raw = reader.native_balance(owner).await?;
                            (token.symbol.clone(), Amount::new(raw, token.decimals))
                        }
                    }
                }
            };
            println!("💰 {owner:#x}: {} {symbol}", amount.format_display());
        }
        Commands::Swap {
            from,
            to,
            amount,
            slippage,
            deadline,
            recipient,
        } => {
            let chain = registry.chain(cli.chain_id)?;
            let token_in = resolve_token(chain, from)?;
            let token_out = resolve_token(chain, to)?;
            let reader = reader_for(&cli, chain)?;
            let service = SwapService::new(registry.clone(), reader);

            if chain.has_dex_support() {
                bail!(
                    "chain {} has a live DEX; the CLI carries no signer, so swaps \
                     can only run on demo chains",
                    chain.name
                );
            }

            let wallet = UnconnectedWallet {
                address: parse_address(recipient)?,
            };
            let request = SwapRequest {
                token_in,
                token_out,
                amount_in: amount.clone(),
                slippage_percent: *slippage,
                deadline_minutes: *deadline,
            };

            println!(
                "🚀 Swapping {amount} {} -> {} on {} (demo)...",
                request.token_in.symbol, request.token_out.symbol, chain.name
            );
            let outcome = service.execute_swap(&wallet, cli.chain_id, &request).await?;
            println!("✅ Swap complete: {:#x}", outcome.tx_hash);
            if let Some(explorer) = &chain.explorer_url {
                println!("🔗 {explorer}/tx/{:#x}", outcome.tx_hash);
            }
        }
    }

    Ok(())
}
