//! Minimal ABI encoding for the contract calls this engine consumes.
//!
//! Only static types appear in these signatures, so encoding is a 4-byte
//! selector followed by left-padded 32-byte words. Selectors are the
//! keccak-256 prefixes of the canonical signatures, pinned here as
//! constants and locked by tests.

use dex_domain::SwapError;
use primitive_types::{H160, U256};

/// `getPool(address,address,uint24)`
pub const SEL_GET_POOL: [u8; 4] = [0x16, 0x98, 0xee, 0x82];
/// `slot0()`
pub const SEL_SLOT0: [u8; 4] = [0x38, 0x50, 0xc7, 0xbd];
/// `token0()`
pub const SEL_TOKEN0: [u8; 4] = [0x0d, 0xfe, 0x16, 0x81];
/// `liquidity()`
pub const SEL_LIQUIDITY: [u8; 4] = [0x1a, 0x68, 0x65, 0x02];
/// `allowance(address,address)`
pub const SEL_ALLOWANCE: [u8; 4] = [0xdd, 0x62, 0xed, 0x3e];
/// `balanceOf(address)`
pub const SEL_BALANCE_OF: [u8; 4] = [0x70, 0xa0, 0x82, 0x31];
/// `approve(address,uint256)`
pub const SEL_APPROVE: [u8; 4] = [0x09, 0x5e, 0xa7, 0xb3];
/// `exactInputSingle((address,address,uint24,address,uint256,uint256,uint256,uint160))`
pub const SEL_EXACT_INPUT_SINGLE: [u8; 4] = [0x41, 0x4b, 0xf3, 0x89];

/// Builder for a static-argument contract call.
#[derive(Debug, Clone)]
pub struct CallData {
    data: Vec<u8>,
}

impl CallData {
    pub fn new(selector: [u8; 4]) -> Self {
        Self {
            data: selector.to_vec(),
        }
    }

    pub fn address(mut self, value: H160) -> Self {
        let mut word = [0u8; 32];
        word[12..].copy_from_slice(value.as_bytes());
        self.data.extend_from_slice(&word);
        self
    }

    pub fn uint(mut self, value: U256) -> Self {
        self.data.extend_from_slice(&u256_word(value));
        self
    }

    pub fn uint32(self, value: u32) -> Self {
        self.uint(U256::from(value))
    }

    pub fn build(self) -> Vec<u8> {
        self.data
    }
}

fn u256_word(value: U256) -> [u8; 32] {
    let mut word = [0u8; 32];
    for (i, limb) in value.0.iter().enumerate() {
        let end = 32 - 8 * i;
        word[end - 8..end].copy_from_slice(&limb.to_be_bytes());
    }
    word
}

/// Returns the `index`-th 32-byte return word.
pub fn word(data: &[u8], index: usize) -> Result<&[u8], SwapError> {
    let start = index * 32;
    data.get(start..start + 32).ok_or_else(|| {
        SwapError::Network(format!(
            "short return data: {} bytes, wanted word {index}",
            data.len()
        ))
    })
}

pub fn decode_u256(data: &[u8], index: usize) -> Result<U256, SwapError> {
    Ok(U256::from_big_endian(word(data, index)?))
}

pub fn decode_address(data: &[u8], index: usize) -> Result<H160, SwapError> {
    Ok(H160::from_slice(&word(data, index)?[12..]))
}

/// Decodes an `int24` return word. Solidity sign-extends to the full word,
/// so the low 32 bits already carry the two's-complement `i32` value.
pub fn decode_tick(data: &[u8], index: usize) -> Result<i32, SwapError> {
    Ok(decode_u256(data, index)?.low_u32() as i32)
}
