use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use ethers::{
    core::types::{Address, U256},
    providers::{Http, Middleware, Provider},
};
use tokio::sync::Mutex;

use crate::{
    errors::CustomError,
    models::{
        network_config::NetworkConfig,
        quote::{QuoteAmounts, QuoteParams},
        token::{TokenBalance, TokenMetadata},
    },
};

use super::{
    contracts::{IQuoterV2, QuoteExactInputSingleParams, IERC20},
    network_config::NetworkRegistry,
    units::{format_units, NATIVE_DECIMALS},
};

/// Read-only access to chain state. Every call names the network it reads.
#[async_trait]
pub trait ChainReader: Send + Sync {
    async fn quote_exact_input_single(
        &self,
        chain_id: u64,
        params: QuoteParams,
    ) -> Result<QuoteAmounts, CustomError>;

    async fn token_metadata(&self, chain_id: u64, token: Address) -> Result<TokenMetadata, CustomError>;

    async fn native_balance(&self, chain_id: u64, owner: Address) -> Result<TokenBalance, CustomError>;

    async fn token_balance(
        &self,
        chain_id: u64,
        token: Address,
        owner: Address,
    ) -> Result<TokenBalance, CustomError>;
}

/// Open an HTTP provider and check it serves the configured chain.
pub async fn connect_provider(config: &NetworkConfig) -> Result<Provider<Http>, CustomError> {
    let provider = Provider::<Http>::try_from(config.rpc_url.as_str())
        .map_err(|e| CustomError::NetworkError(e.to_string()))?;

    let connected_chain_id = provider
        .get_chainid()
        .await
        .map_err(|e| CustomError::StringifiedProviderError(e.to_string()))?;

    if connected_chain_id != U256::from(config.chain_id) {
        return Err(CustomError::NetworkError(format!(
            "RPC at {} serves chain {connected_chain_id}, expected {}",
            config.rpc_url, config.chain_id
        )));
    }

    Ok(provider)
}

#[derive(Clone, Debug)]
pub struct BlockchainClient {
    provider: Arc<Provider<Http>>,
    config: NetworkConfig,
}

impl BlockchainClient {
    /// Create a client for a network, verifying the endpoint serves that chain.
    pub async fn new(config: NetworkConfig) -> Result<Self, CustomError> {
        let provider = connect_provider(&config).await?;
        Ok(Self {
            provider: Arc::new(provider),
            config,
        })
    }

    pub async fn quote_exact_input_single(&self, params: QuoteParams) -> Result<QuoteAmounts, CustomError> {
        let swap = self.config.swap.ok_or_else(|| {
            CustomError::ContractError(format!("No quoter deployed on {}", self.config.name))
        })?;
        let quoter = IQuoterV2::new(swap.quoter, self.provider.clone());

        let (amount_out, sqrt_price_x96_after, initialized_ticks_crossed, gas_estimate) = quoter
            .quote_exact_input_single(QuoteExactInputSingleParams {
                token_in: params.token_in,
                token_out: params.token_out,
                amount_in: params.amount_in,
                fee: params.fee,
                sqrt_price_limit_x96: U256::zero(),
            })
            .call()
            .await
            .map_err(|e| CustomError::ContractError(e.to_string()))?;

        Ok(QuoteAmounts {
            amount_out,
            sqrt_price_x96_after,
            initialized_ticks_crossed,
            gas_estimate,
        })
    }

    pub async fn token_metadata(&self, token: Address) -> Result<TokenMetadata, CustomError> {
        let contract = IERC20::new(token, self.provider.clone());

        let decimals = contract
            .decimals()
            .call()
            .await
            .map_err(|e| CustomError::ContractError(e.to_string()))?;

        let symbol = contract
            .symbol()
            .call()
            .await
            .map_err(|e| CustomError::ContractError(e.to_string()))?;

        Ok(TokenMetadata {
            address: token,
            symbol,
            decimals,
        })
    }

    /// Get native token balance for an address
    pub async fn get_native_balance(&self, owner: Address) -> Result<TokenBalance, CustomError> {
        let balance = self
            .provider
            .get_balance(owner, None)
            .await
            .map_err(|e| CustomError::StringifiedProviderError(e.to_string()))?;

        Ok(TokenBalance {
            token_address: None,
            symbol: self.config.symbol.clone(),
            balance,
            decimals: NATIVE_DECIMALS,
            formatted_balance: format_units(balance, NATIVE_DECIMALS),
        })
    }

    /// Get ERC20 token balance
    pub async fn get_token_balance(&self, token: Address, owner: Address) -> Result<TokenBalance, CustomError> {
        let metadata = self.token_metadata(token).await?;
        let balance = IERC20::new(token, self.provider.clone())
            .balance_of(owner)
            .call()
            .await
            .map_err(|e| CustomError::ContractError(e.to_string()))?;

        Ok(TokenBalance {
            token_address: Some(format!("{token:#x}")),
            symbol: metadata.symbol,
            balance,
            decimals: metadata.decimals,
            formatted_balance: format_units(balance, metadata.decimals),
        })
    }
}

/// `ChainReader` over HTTP JSON-RPC, one cached client per chain.
pub struct RpcChainReader {
    networks: NetworkRegistry,
    clients: Mutex<HashMap<u64, Arc<BlockchainClient>>>,
}

impl RpcChainReader {
    pub fn new(networks: NetworkRegistry) -> Self {
        Self {
            networks,
            clients: Mutex::new(HashMap::new()),
        }
    }

    async fn client(&self, chain_id: u64) -> Result<Arc<BlockchainClient>, CustomError> {
        if let Some(client) = self.clients.lock().await.get(&chain_id) {
            return Ok(client.clone());
        }
        // The cache lock is not held while connecting. Racing first uses of a
        // chain may both connect; the first insert wins.
        let client = Arc::new(BlockchainClient::new(self.networks.get(chain_id)?).await?);
        Ok(self.clients.lock().await.entry(chain_id).or_insert(client).clone())
    }
}

#[async_trait]
impl ChainReader for RpcChainReader {
    async fn quote_exact_input_single(
        &self,
        chain_id: u64,
        params: QuoteParams,
    ) -> Result<QuoteAmounts, CustomError> {
        self.client(chain_id).await?.quote_exact_input_single(params).await
    }

    async fn token_metadata(&self, chain_id: u64, token: Address) -> Result<TokenMetadata, CustomError> {
        self.client(chain_id).await?.token_metadata(token).await
    }

    async fn native_balance(&self, chain_id: u64, owner: Address) -> Result<TokenBalance, CustomError> {
        self.client(chain_id).await?.get_native_balance(owner).await
    }

    async fn token_balance(
        &self,
        chain_id: u64,
        token: Address,
        owner: Address,
    ) -> Result<TokenBalance, CustomError> {
        self.client(chain_id).await?.get_token_balance(token, owner).await
    }
}

#[cfg(test)]
mod tests {
    use std::{net::TcpListener, time::Duration};

    use super::*;
    use crate::services::network_config::{MAINNET_CHAIN_ID, SEPOLIA_CHAIN_ID};

    #[actix_web::test]
    async fn unknown_chain_fails_before_connecting() {
        let reader = RpcChainReader::new(NetworkRegistry::new(None, SEPOLIA_CHAIN_ID).unwrap());
        let err = reader.native_balance(137, Address::zero()).await.unwrap_err();
        assert!(matches!(err, CustomError::UnsupportedChainError(137)));
        assert!(reader.clients.lock().await.is_empty());
    }

    #[actix_web::test]
    async fn slow_rpc_does_not_hold_the_client_cache() {
        // Accepts connections into the backlog but never answers.
        let silent = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", silent.local_addr().unwrap());
        let reader = Arc::new(RpcChainReader::new(
            NetworkRegistry::new(Some(url), SEPOLIA_CHAIN_ID).unwrap(),
        ));

        let pending = {
            let reader = reader.clone();
            actix_web::rt::spawn(async move { reader.native_balance(MAINNET_CHAIN_ID, Address::zero()).await })
        };
        actix_web::rt::time::sleep(Duration::from_millis(50)).await;

        assert!(!pending.is_finished());
        assert!(reader.clients.try_lock().is_ok());
        pending.abort();
    }
}
