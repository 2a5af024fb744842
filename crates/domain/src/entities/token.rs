use crate::error::SwapError;
use primitive_types::H160;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// On-chain identity of a token: either the chain's native currency or an
/// ERC-20 contract address. Address comparison is byte-wise, so hex casing
/// never matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TokenAddress {
    /// The chain's native currency. Has no contract address.
    Native,
    /// An ERC-20 contract.
    Contract(H160),
}

impl TokenAddress {
    /// Returns the contract address, or `None` for the native currency.
    pub fn contract(&self) -> Option<H160> {
        match self {
            TokenAddress::Native => None,
            TokenAddress::Contract(addr) => Some(*addr),
        }
    }

    /// Resolves to the on-chain address used in pool and router calls,
    /// substituting the wrapped-native contract for the native currency.
    pub fn resolve(&self, wrapped_native: H160) -> H160 {
        match self {
            TokenAddress::Native => wrapped_native,
            TokenAddress::Contract(addr) => *addr,
        }
    }
}

impl FromStr for TokenAddress {
    type Err = SwapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("native") {
            return Ok(TokenAddress::Native);
        }
        Ok(TokenAddress::Contract(parse_address(s)?))
    }
}

impl TryFrom<String> for TokenAddress {
    type Error = SwapError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TokenAddress> for String {
    fn from(addr: TokenAddress) -> Self {
        addr.to_string()
    }
}

impl fmt::Display for TokenAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenAddress::Native => write!(f, "native"),
            TokenAddress::Contract(addr) => write!(f, "{addr:#x}"),
        }
    }
}

/// Parses a 20-byte hex address, with or without the `0x` prefix.
pub fn parse_address(s: &str) -> Result<H160, SwapError> {
    let hex_part = s.strip_prefix("0x").unwrap_or(s);
    let bytes = hex::decode(hex_part)
        .map_err(|_| SwapError::Validation(format!("invalid address: {s}")))?;
    if bytes.len() != 20 {
        return Err(SwapError::Validation(format!("invalid address length: {s}")));
    }
    Ok(H160::from_slice(&bytes))
}

/// A token as known to the chain registry. Immutable; identity is the
/// address (or the native marker).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub address: TokenAddress,
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
}

impl Token {
    pub fn new(
        address: TokenAddress,
        symbol: impl Into<String>,
        name: impl Into<String>,
        decimals: u8,
    ) -> Self {
        Self {
            address,
            symbol: symbol.into(),
            name: name.into(),
            decimals,
        }
    }

    /// Creates the native-currency token for a chain.
    pub fn native(symbol: impl Into<String>, name: impl Into<String>, decimals: u8) -> Self {
        Self::new(TokenAddress::Native, symbol, name, decimals)
    }

    /// The single source of truth for native-currency branching. Approval
    /// is skipped and the transaction `value` field is used exactly when
    /// this returns true.
    pub fn is_native(&self) -> bool {
        matches!(self.address, TokenAddress::Native)
    }

    /// Display precision: the token's own decimals capped at six.
    pub fn display_decimals(&self) -> u8 {
        self.decimals.min(6)
    }

    /// Whether this token occupies the same on-chain slot as another.
    pub fn same_asset(&self, other: &Token) -> bool {
        self.address == other.address
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_address_case_insensitive() {
        let lower = parse_address("0x1cd0690ff9a693f5ef2dd976660a8dafc81a109c").unwrap();
        let upper = parse_address("0x1CD0690FF9A693F5EF2DD976660A8DAFC81A109C").unwrap();
        assert_eq!(lower, upper);
    }

    #[test]
    fn test_parse_address_rejects_garbage() {
        assert!(parse_address("0x1234").is_err());
        assert!(parse_address("not-an-address").is_err());
    }

    #[test]
    fn test_native_marker() {
        let native: TokenAddress = "native".parse().unwrap();
        assert_eq!(native, TokenAddress::Native);
        assert!(native.contract().is_none());

        let wrapped = parse_address("0x1cd0690ff9a693f5ef2dd976660a8dafc81a109c").unwrap();
        assert_eq!(native.resolve(wrapped), wrapped);
    }

    #[test]
    fn test_display_decimals_capped() {
        let t = Token::native("0G", "0G Token", 18);
        assert_eq!(t.display_decimals(), 6);

        let usdc = Token::new(
            "0x1f3aa82227281ca364bfb3d253b0f1af1da6473e".parse().unwrap(),
            "USDCe",
            "Bridged USDC",
            6,
        );
        assert_eq!(usdc.display_decimals(), 6);
    }
}
