use std::str::FromStr;

use ethers::types::Address;

use crate::{
    errors::CustomError,
    models::network_config::{NetworkConfig, SwapContracts},
};

pub const MAINNET_CHAIN_ID: u64 = 1;
pub const SEPOLIA_CHAIN_ID: u64 = 11155111;

const SUPPORTED_CHAINS: [u64; 2] = [MAINNET_CHAIN_ID, SEPOLIA_CHAIN_ID];

fn contract(address: &str) -> Result<Address, CustomError> {
    Address::from_str(address)
        .map_err(|_| CustomError::ConfigError(format!("Invalid contract address: {address}")))
}

/// Get network configuration based on chain ID
pub fn get_network_config(chain_id: u64) -> Result<NetworkConfig, CustomError> {
    match chain_id {
        MAINNET_CHAIN_ID => Ok(NetworkConfig {
            chain_id,
            name: "Ethereum".to_string(),
            rpc_url: "https://eth.merkle.io".to_string(),
            symbol: "ETH".to_string(),
            block_explorer: "https://etherscan.io".to_string(),
            swap: Some(SwapContracts {
                quoter: contract("0x61fFE014bA17989E743c5F6cB21bF9697530B21e")?,
                router: contract("0x68b3465833fb72A70ecDF485E0e4C7bD8665Fc45")?,
                wrapped_native: contract("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2")?,
            }),
        }),
        SEPOLIA_CHAIN_ID => Ok(NetworkConfig {
            chain_id,
            name: "Sepolia".to_string(),
            rpc_url: "https://sepolia.drpc.org".to_string(),
            symbol: "ETH".to_string(),
            block_explorer: "https://sepolia.etherscan.io".to_string(),
            swap: Some(SwapContracts {
                quoter: contract("0xEd1f6473345F45b75F8179591dd5bA1888cf2FB3")?,
                router: contract("0x3bFA4769FB09eefC5a80d6E87c3B9C650f7Ae48E")?,
                wrapped_native: contract("0xfFf9976782d46CC05630D1f6eBAb18b2324d6B14")?,
            }),
        }),
        _ => Err(CustomError::UnsupportedChainError(chain_id)),
    }
}

/// Supported networks with the process-wide RPC override applied.
#[derive(Clone, Debug)]
pub struct NetworkRegistry {
    rpc_override: Option<String>,
    default_chain_id: u64,
}

impl NetworkRegistry {
    pub fn new(rpc_override: Option<String>, default_chain_id: u64) -> Result<Self, CustomError> {
        get_network_config(default_chain_id)?;
        Ok(Self {
            rpc_override,
            default_chain_id,
        })
    }

    pub fn get(&self, chain_id: u64) -> Result<NetworkConfig, CustomError> {
        let mut config = get_network_config(chain_id)?;
        if let Some(url) = &self.rpc_override {
            config.rpc_url = url.clone();
        }
        Ok(config)
    }

    pub fn default_chain_id(&self) -> u64 {
        self.default_chain_id
    }

    /// Chain an operation targets: the requested one, else the default.
    pub fn resolve(&self, requested: Option<u64>) -> Result<NetworkConfig, CustomError> {
        self.get(requested.unwrap_or(self.default_chain_id))
    }

    pub fn supported(&self) -> Vec<NetworkConfig> {
        SUPPORTED_CHAINS
            .iter()
            .filter_map(|id| self.get(*id).ok())
            .collect()
    }
}
