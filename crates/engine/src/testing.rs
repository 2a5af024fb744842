//! Call-recording doubles for the chain seams, shared across the engine's
//! test modules.

use async_trait::async_trait;
use dex_chain::provider::{
    CallRequest, ChainReader, TransactionReceipt, TransactionRequest, WalletProvider,
};
use dex_domain::entities::token::TokenAddress;
use dex_domain::{SwapError, SwapRequest, Token};
use primitive_types::{H160, H256, U256};
use std::collections::HashMap;
use std::sync::Mutex;

/// Encodes a single uint return word.
pub fn uint_word(value: U256) -> Vec<u8> {
    let mut out = [0u8; 32];
    for (i, limb) in value.0.iter().enumerate() {
        out[32 - 8 * (i + 1)..32 - 8 * i].copy_from_slice(&limb.to_be_bytes());
    }
    out.to_vec()
}

/// Encodes a single address return word.
pub fn address_word(value: H160) -> Vec<u8> {
    let mut out = vec![0u8; 32];
    out[12..].copy_from_slice(value.as_bytes());
    out
}

/// A canned `slot0()` response: price word, tick word, and zero padding
/// for the fields the oracle ignores.
pub fn slot0_words(sqrt_price_x96: U256, tick: i32) -> Vec<u8> {
    let mut out = uint_word(sqrt_price_x96);
    out.extend(uint_word(U256::from(tick as u32)));
    out.extend(vec![0u8; 32 * 5]);
    out
}

/// `ChainReader` that answers from a (contract, selector) response table
/// and records every call it sees.
#[derive(Default)]
pub struct MockReader {
    responses: Mutex<HashMap<(H160, [u8; 4]), Vec<u8>>>,
    failures: Mutex<HashMap<(H160, [u8; 4]), String>>,
    calls: Mutex<Vec<CallRequest>>,
}

impl MockReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&self, to: H160, selector: [u8; 4], response: Vec<u8>) {
        self.responses
            .lock()
            .unwrap()
            .insert((to, selector), response);
    }

    pub fn fail(&self, to: H160, selector: [u8; 4], message: &str) {
        self.failures
            .lock()
            .unwrap()
            .insert((to, selector), message.to_string());
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ChainReader for MockReader {
    async fn call(&self, request: CallRequest) -> Result<Vec<u8>, SwapError> {
        let selector: [u8; 4] = request.data[..4].try_into().unwrap();
        let key = (request.to, selector);
        self.calls.lock().unwrap().push(request);

        if let Some(message) = self.failures.lock().unwrap().get(&key) {
            return Err(SwapError::Network(message.clone()));
        }
        self.responses
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .ok_or_else(|| SwapError::Network(format!("unexpected call {key:?}")))
    }

    async fn native_balance(&self, _owner: H160) -> Result<U256, SwapError> {
        Ok(U256::zero())
    }
}

enum SendBehavior {
    Accept,
    Fail(String),
    Reject(String),
}

enum ReceiptBehavior {
    Success,
    Revert,
    Drop,
}

/// `WalletProvider` that records submitted transactions and hands out
/// deterministic hashes.
pub struct MockWallet {
    address: H160,
    sent: Mutex<Vec<TransactionRequest>>,
    send_behavior: SendBehavior,
    receipt_behavior: ReceiptBehavior,
}

impl MockWallet {
    pub fn new(address: H160) -> Self {
        Self {
            address,
            sent: Mutex::new(Vec::new()),
            send_behavior: SendBehavior::Accept,
            receipt_behavior: ReceiptBehavior::Success,
        }
    }

    /// Fail broadcasts with a network-ish error (nothing reaches the
    /// mempool).
    pub fn fail_sends(mut self, message: &str) -> Self {
        self.send_behavior = SendBehavior::Fail(message.to_string());
        self
    }

    /// Refuse to sign, the way a user declining in their wallet would.
    pub fn reject_sends(mut self, message: &str) -> Self {
        self.send_behavior = SendBehavior::Reject(message.to_string());
        self
    }

    /// Broadcast succeeds but confirmation never arrives.
    pub fn drop_receipts(mut self) -> Self {
        self.receipt_behavior = ReceiptBehavior::Drop;
        self
    }

    /// Every transaction mines but reverts.
    pub fn revert_receipts(mut self) -> Self {
        self.receipt_behavior = ReceiptBehavior::Revert;
        self
    }

    pub fn sent(&self) -> Vec<TransactionRequest> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last_tx_hash(&self) -> Option<H256> {
        let count = self.sent.lock().unwrap().len();
        (count > 0).then(|| H256::repeat_byte(count as u8))
    }
}

#[async_trait]
impl WalletProvider for MockWallet {
    fn address(&self) -> H160 {
        self.address
    }

    async fn send_transaction(&self, request: TransactionRequest) -> Result<H256, SwapError> {
        match &self.send_behavior {
            SendBehavior::Fail(message) => Err(SwapError::Network(message.clone())),
            SendBehavior::Reject(message) => Err(SwapError::ApprovalRejected(message.clone())),
            SendBehavior::Accept => {
                let mut sent = self.sent.lock().unwrap();
                sent.push(request);
                Ok(H256::repeat_byte(sent.len() as u8))
            }
        }
    }

    async fn wait_for_receipt(&self, tx_hash: H256) -> Result<TransactionReceipt, SwapError> {
        match self.receipt_behavior {
            ReceiptBehavior::Success => Ok(TransactionReceipt {
                tx_hash,
                success: true,
            }),
            ReceiptBehavior::Revert => Ok(TransactionReceipt {
                tx_hash,
                success: false,
            }),
            ReceiptBehavior::Drop => Err(SwapError::Network("confirmation timeout".into())),
        }
    }
}

/// The bundled mainnet native token.
pub fn zg() -> Token {
    Token::native("0G", "0G Token", 18)
}

/// The bundled mainnet bridged-USDC token.
pub fn usdc() -> Token {
    Token::new(
        TokenAddress::Contract(
            "0x1f3aa82227281ca364bfb3d253b0f1af1da6473e"
                .parse()
                .unwrap(),
        ),
        "USDCe",
        "Bridged USDC",
        6,
    )
}

pub fn request_between(
    token_in: Token,
    token_out: Token,
    amount: &str,
    slippage_percent: f64,
) -> SwapRequest {
    SwapRequest {
        token_in,
        token_out,
        amount_in: amount.to_string(),
        slippage_percent,
        deadline_minutes: 20,
    }
}
