use ethers::types::{Address, H256};
use serde::{Deserialize, Serialize};

/// Fixed-address exchange contracts deployed on a network.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SwapContracts {
    pub quoter: Address,
    pub router: Address,
    pub wrapped_native: Address,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub chain_id: u64,
    pub name: String,
    pub rpc_url: String,
    pub symbol: String,
    pub block_explorer: String,
    pub swap: Option<SwapContracts>,
}

impl NetworkConfig {
    pub fn explorer_tx_url(&self, hash: H256) -> String {
        format!("{}/tx/{:#x}", self.block_explorer.trim_end_matches('/'), hash)
    }
}
