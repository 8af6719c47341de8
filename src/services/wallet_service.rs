use std::{str::FromStr, sync::Arc};

use async_trait::async_trait;
use ethers::{
    middleware::SignerMiddleware,
    providers::{Http, Middleware, Provider},
    signers::{LocalWallet, Signer},
    types::{Address, Bytes, TransactionRequest, H256, U256},
};
use log::info;
use tokio::sync::RwLock;

use crate::{errors::CustomError, models::wallet::ConnectorInfo};

use super::{blockchain_service::connect_provider, network_config::NetworkRegistry};

/// Holds keys and signs/broadcasts on the user's behalf. Callers never see
/// key material, only the resulting account and transaction hashes.
#[async_trait]
pub trait WalletConnector: Send + Sync {
    fn id(&self) -> &str;

    fn name(&self) -> &str;

    async fn connect(&self, chain_id: u64) -> Result<Address, CustomError>;

    async fn disconnect(&self) -> Result<(), CustomError>;

    async fn switch_chain(&self, chain_id: u64) -> Result<(), CustomError>;

    async fn send_native(&self, chain_id: u64, to: Address, value: U256) -> Result<H256, CustomError>;

    async fn send_contract_call(
        &self,
        chain_id: u64,
        to: Address,
        data: Bytes,
        value: U256,
    ) -> Result<H256, CustomError>;

    fn info(&self) -> ConnectorInfo {
        ConnectorInfo {
            id: self.id().to_string(),
            name: self.name().to_string(),
        }
    }
}

/// Map a signer/broadcast failure to its user-facing error.
pub fn submission_error(message: String) -> CustomError {
    let lowered = message.to_ascii_lowercase();
    if lowered.contains("user rejected") || lowered.contains("user denied") {
        CustomError::UserRejected
    } else {
        CustomError::TransactionFailedError(message)
    }
}

type SignerClient = SignerMiddleware<Provider<Http>, LocalWallet>;

/// Connector signing with a private key held by this process.
pub struct LocalKeyConnector {
    project_id: String,
    wallet: LocalWallet,
    networks: NetworkRegistry,
    active: RwLock<Option<(u64, Arc<SignerClient>)>>,
}

impl LocalKeyConnector {
    pub fn from_private_key(
        private_key: &str,
        project_id: &str,
        networks: NetworkRegistry,
    ) -> Result<Self, CustomError> {
        let wallet = LocalWallet::from_str(private_key.trim_start_matches("0x"))
            .map_err(|e| CustomError::ConfigError(format!("Failed to create wallet: {e}")))?;

        Ok(Self {
            project_id: project_id.to_string(),
            wallet,
            networks,
            active: RwLock::new(None),
        })
    }

    async fn build_client(&self, chain_id: u64) -> Result<Arc<SignerClient>, CustomError> {
        let provider = connect_provider(&self.networks.get(chain_id)?).await?;
        Ok(Arc::new(SignerMiddleware::new(
            provider,
            self.wallet.clone().with_chain_id(chain_id),
        )))
    }

    async fn client_for(&self, chain_id: u64) -> Result<Arc<SignerClient>, CustomError> {
        match &*self.active.read().await {
            Some((active, client)) if *active == chain_id => Ok(client.clone()),
            Some((active, _)) => Err(CustomError::ConnectorError(format!(
                "wallet is on chain {active}, requested chain {chain_id}"
            ))),
            None => Err(CustomError::WalletNotConnected),
        }
    }

    async fn send(&self, chain_id: u64, tx: TransactionRequest) -> Result<H256, CustomError> {
        let client = self.client_for(chain_id).await?;
        let pending = client
            .send_transaction(tx.chain_id(chain_id), None)
            .await
            .map_err(|e| submission_error(e.to_string()))?;
        Ok(pending.tx_hash())
    }
}

#[async_trait]
impl WalletConnector for LocalKeyConnector {
    fn id(&self) -> &str {
        "local"
    }

    fn name(&self) -> &str {
        "Local Key"
    }

    async fn connect(&self, chain_id: u64) -> Result<Address, CustomError> {
        let client = self.build_client(chain_id).await?;
        *self.active.write().await = Some((chain_id, client));
        info!(
            "local connector ({}) unlocked {:#x} on chain {chain_id}",
            self.project_id,
            self.wallet.address()
        );
        Ok(self.wallet.address())
    }

    async fn disconnect(&self) -> Result<(), CustomError> {
        self.active.write().await.take();
        Ok(())
    }

    async fn switch_chain(&self, chain_id: u64) -> Result<(), CustomError> {
        if self.active.read().await.is_none() {
            return Err(CustomError::WalletNotConnected);
        }
        let client = self.build_client(chain_id).await?;
        *self.active.write().await = Some((chain_id, client));
        Ok(())
    }

    async fn send_native(&self, chain_id: u64, to: Address, value: U256) -> Result<H256, CustomError> {
        self.send(chain_id, TransactionRequest::new().to(to).value(value)).await
    }

    async fn send_contract_call(
        &self,
        chain_id: u64,
        to: Address,
        data: Bytes,
        value: U256,
    ) -> Result<H256, CustomError> {
        self.send(chain_id, TransactionRequest::new().to(to).data(data).value(value))
            .await
    }
}
