use ethers::types::{Address, U256};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenBalance {
    pub token_address: Option<String>, // None for native token
    pub symbol: String,
    pub balance: U256,
    pub decimals: u8,
    pub formatted_balance: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenMetadata {
    pub address: Address,
    pub symbol: String,
    pub decimals: u8,
}
