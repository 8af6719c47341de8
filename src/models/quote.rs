use ethers::types::{Address, U256};
use serde::{Deserialize, Serialize};

/// The form inputs a quote answers. Two quotes are interchangeable only
/// when their inputs are equal.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuoteInput {
    pub chain_id: u64,
    pub token_out: Address,
    pub amount_in: U256,
    pub fee: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuoteParams {
    pub token_in: Address,
    pub token_out: Address,
    pub amount_in: U256,
    pub fee: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuoteAmounts {
    pub amount_out: U256,
    pub sqrt_price_x96_after: U256,
    pub initialized_ticks_crossed: u32,
    pub gas_estimate: U256,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuoteResult {
    pub input: QuoteInput,
    pub amount_out: U256,
    pub decimals: u8,
    pub symbol: String,
    /// `amount_out` rendered with the output token's decimals.
    pub estimate: String,
    pub sqrt_price_x96_after: U256,
    pub initialized_ticks_crossed: u32,
    pub gas_estimate: U256,
}

#[derive(Debug, Default, Serialize)]
pub struct QuoteView {
    pub pending: bool,
    pub estimate: Option<QuoteResult>,
    pub error: Option<String>,
}
