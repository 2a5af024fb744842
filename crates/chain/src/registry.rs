//! Chain and token registry.
//!
//! One [`ChainConfig`] record per network: contract addresses, native
//! currency, token list, known pools and the demo reference-rate table.
//! A chain without a router is "DEX unavailable" and forces fallback-only
//! behavior everywhere. Registries are read-only for the life of the
//! process and can be loaded from TOML so rates and addresses are
//! deployment data, not code.

use dex_domain::entities::token::parse_address;
use dex_domain::{FeeTier, SwapError, Token, TokenAddress};
use primitive_types::H160;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 0G mainnet chain id. Janie DEX contracts are deployed here.
pub const ZG_MAINNET: u64 = 16661;
/// 0G Galileo testnet chain id. No DEX deployment; demo mode only.
pub const ZG_TESTNET: u64 = 16602;

/// A statically known, verified pool. Informational only: the locator
/// always re-queries the factory instead of trusting this table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnownPool {
    pub id: String,
    pub address: H160,
    pub token0: H160,
    pub token1: H160,
    pub fee: FeeTier,
    #[serde(default)]
    pub name: Option<String>,
}

/// Per-network configuration consumed by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
    pub chain_id: u64,
    pub name: String,
    #[serde(default)]
    pub rpc_url: Option<String>,
    #[serde(default)]
    pub explorer_url: Option<String>,
    pub native: Token,
    /// Exact-input swap router. `None` means no DEX on this chain.
    #[serde(default)]
    pub router: Option<H160>,
    #[serde(default)]
    pub factory: Option<H160>,
    #[serde(default)]
    pub wrapped_native: Option<H160>,
    #[serde(default = "default_fee_tiers")]
    pub fee_tiers: Vec<FeeTier>,
    #[serde(default)]
    pub tokens: Vec<Token>,
    #[serde(default)]
    pub known_pools: Vec<KnownPool>,
    /// Reference rates keyed by symbol pair, used for estimated quotes.
    #[serde(default)]
    pub reference_rates: HashMap<String, HashMap<String, f64>>,
}

fn default_fee_tiers() -> Vec<FeeTier> {
    vec![FeeTier::Lowest, FeeTier::Low, FeeTier::Medium, FeeTier::High]
}

impl ChainConfig {
    /// The chain-availability gate: a chain with no router cannot execute
    /// real swaps. Checked fresh on every call; never cache across a
    /// network switch.
    pub fn has_dex_support(&self) -> bool {
        self.router.is_some()
    }

    pub fn router(&self) -> Result<H160, SwapError> {
        self.router.ok_or(SwapError::DexUnavailable(self.chain_id))
    }

    pub fn factory(&self) -> Result<H160, SwapError> {
        self.factory.ok_or(SwapError::DexUnavailable(self.chain_id))
    }

    pub fn wrapped_native(&self) -> Result<H160, SwapError> {
        self.wrapped_native
            .ok_or(SwapError::DexUnavailable(self.chain_id))
    }

    pub fn token_by_symbol(&self, symbol: &str) -> Option<&Token> {
        self.tokens
            .iter()
            .find(|t| t.symbol.eq_ignore_ascii_case(symbol))
    }

    pub fn token_by_address(&self, address: &TokenAddress) -> Option<&Token> {
        self.tokens.iter().find(|t| t.address == *address)
    }

    /// Reference rate for an estimated quote. Falls back to the stable-coin
    /// heuristic the product shipped with when the pair is not tabulated:
    /// roughly half a unit into USD-stables, one-to-one otherwise.
    pub fn reference_rate(&self, from_symbol: &str, to_symbol: &str) -> f64 {
        if let Some(rate) = self
            .reference_rates
            .get(from_symbol)
            .and_then(|row| row.get(to_symbol))
        {
            return *rate;
        }
        if to_symbol.contains("USDC") { 0.5 } else { 1.0 }
    }
}

/// Registry of all configured chains, keyed by chain id.
#[derive(Debug, Clone, Default)]
pub struct ChainRegistry {
    chains: HashMap<u64, ChainConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RegistryFile {
    chains: Vec<ChainConfig>,
}

impl ChainRegistry {
    pub fn new(chains: Vec<ChainConfig>) -> Self {
        Self {
            chains: chains.into_iter().map(|c| (c.chain_id, c)).collect(),
        }
    }

    /// Parses a registry from a TOML document with a `[[chains]]` array.
    pub fn from_toml_str(input: &str) -> Result<Self, SwapError> {
        let file: RegistryFile = toml::from_str(input)
            .map_err(|e| SwapError::Validation(format!("invalid registry config: {e}")))?;
        Ok(Self::new(file.chains))
    }

    pub fn chain(&self, chain_id: u64) -> Result<&ChainConfig, SwapError> {
        self.chains
            .get(&chain_id)
            .ok_or_else(|| SwapError::Validation(format!("unknown chain id {chain_id}")))
    }

    /// Gate check for a chain id; unknown chains have no DEX support.
    pub fn has_dex_support(&self, chain_id: u64) -> bool {
        self.chains
            .get(&chain_id)
            .is_some_and(ChainConfig::has_dex_support)
    }

    pub fn chain_ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.chains.keys().copied()
    }

    /// The registry shipped with the product: 0G mainnet with the verified
    /// Janie DEX deployment, and the Galileo testnet in demo mode.
    pub fn bundled() -> Self {
        Self::new(vec![zg_mainnet_config(), zg_testnet_config()])
    }
}

fn addr(s: &str) -> H160 {
    parse_address(s).expect("valid address literal")
}

/// Demo reference rates by symbol pair, shared by both bundled networks.
fn bundled_reference_rates() -> HashMap<String, HashMap<String, f64>> {
    let table: &[(&str, &[(&str, f64)])] = &[
        ("0G", &[("USDCe", 1.5), ("wETH", 0.0005), ("st0G", 1.05), ("PAI", 2.0)]),
        ("USDCe", &[("0G", 0.667), ("wETH", 0.00033), ("st0G", 0.7), ("PAI", 1.33)]),
        ("wETH", &[("0G", 2000.0), ("USDCe", 3000.0), ("st0G", 2100.0), ("PAI", 4000.0)]),
        ("st0G", &[("0G", 0.95), ("USDCe", 1.43), ("wETH", 0.00048), ("PAI", 1.9)]),
        ("PAI", &[("0G", 0.5), ("USDCe", 0.75), ("wETH", 0.00025), ("st0G", 0.53)]),
    ];
    table
        .iter()
        .map(|(from, rates)| {
            (
                (*from).to_string(),
                rates.iter().map(|(to, r)| ((*to).to_string(), *r)).collect(),
            )
        })
        .collect()
}

fn zg_mainnet_config() -> ChainConfig {
    let wrapped = addr("0x1cd0690ff9a693f5ef2dd976660a8dafc81a109c");
    let usdce = addr("0x1f3aa82227281ca364bfb3d253b0f1af1da6473e");
    ChainConfig {
        chain_id: ZG_MAINNET,
        name: "0G-Mainnet".into(),
        rpc_url: Some("https://evmrpc.0g.ai".into()),
        explorer_url: Some("https://chainscan.0g.ai".into()),
        native: Token::native("0G", "0G Token", 18),
        router: Some(addr("0x8b598a7c136215a95ba0282b4d832b9f9801f2e2")),
        factory: Some(addr("0x9bdca5798e52e592a08e3b34d3f18eef76af7ef4")),
        wrapped_native: Some(wrapped),
        fee_tiers: default_fee_tiers(),
        tokens: vec![
            Token::native("0G", "0G Token", 18),
            Token::new(TokenAddress::Contract(wrapped), "W0G", "Wrapped 0G", 18),
            Token::new(TokenAddress::Contract(usdce), "USDCe", "Bridged USDC", 6),
        ],
        known_pools: vec![KnownPool {
            id: "w0g-usdc-3000".into(),
            // The upstream config also carries a one-character variant of
            // this address; the router path reads this one. See DESIGN.md.
            address: addr("0xa9e824eddb9677fb2189ab9c439238a83695c091"),
            token0: wrapped,
            token1: usdce,
            fee: FeeTier::Medium,
            name: Some("W0G/USDC.e".into()),
        }],
        reference_rates: bundled_reference_rates(),
    }
}

fn zg_testnet_config() -> ChainConfig {
    ChainConfig {
        chain_id: ZG_TESTNET,
        name: "0G-Galileo-Testnet".into(),
        rpc_url: Some("https://evmrpc-testnet.0g.ai".into()),
        explorer_url: Some("https://chainscan-galileo.0g.ai".into()),
        native: Token::native("0G", "0G Token", 18),
        router: None,
        factory: None,
        wrapped_native: None,
        fee_tiers: default_fee_tiers(),
        tokens: vec![
            Token::native("0G", "0G Token", 18),
            Token::new(
                TokenAddress::Contract(addr("0x0000000000000000000000000000000000000001")),
                "st0G",
                "Staked 0G",
                18,
            ),
            Token::new(
                TokenAddress::Contract(addr("0x0000000000000000000000000000000000000002")),
                "USDCe",
                "Bridged USDC",
                6,
            ),
            Token::new(
                TokenAddress::Contract(addr("0x0000000000000000000000000000000000000003")),
                "wETH",
                "Wrapped ETH",
                18,
            ),
            Token::new(
                TokenAddress::Contract(addr("0x0000000000000000000000000000000000000004")),
                "PAI",
                "PAI Token",
                18,
            ),
        ],
        known_pools: vec![],
        reference_rates: bundled_reference_rates(),
    }
}
