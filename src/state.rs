use std::{sync::Arc, time::Duration};

use log::warn;

use crate::{
    config::Config,
    errors::CustomError,
    services::{
        blockchain_service::{ChainReader, RpcChainReader},
        network_config::NetworkRegistry,
        page_service::PageRegistry,
        quote_service::QuoteService,
        session::WalletContext,
        submission_service::SubmissionService,
        wallet_service::{LocalKeyConnector, WalletConnector},
    },
};

/// Everything the handlers share. Built once in `main`.
pub struct AppState {
    pub networks: NetworkRegistry,
    pub wallet: WalletContext,
    pub reader: Arc<dyn ChainReader>,
    pub quotes: QuoteService,
    pub pages: PageRegistry,
    pub quote_debounce: Duration,
}

impl AppState {
    pub fn new(
        networks: NetworkRegistry,
        wallet: WalletContext,
        reader: Arc<dyn ChainReader>,
        quote_debounce: Duration,
    ) -> Self {
        Self {
            quotes: QuoteService::new(reader.clone(), networks.clone()),
            networks,
            wallet,
            reader,
            pages: PageRegistry::new(),
            quote_debounce,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, CustomError> {
        let networks = NetworkRegistry::new(config.rpc_url.clone(), config.default_chain_id)?;

        let mut connectors: Vec<Arc<dyn WalletConnector>> = Vec::new();
        match &config.private_key {
            Some(key) => connectors.push(Arc::new(LocalKeyConnector::from_private_key(
                key,
                &config.project_id,
                networks.clone(),
            )?)),
            None => warn!("PRIVATE_KEY is not set, no wallet connectors are available"),
        }

        let reader: Arc<dyn ChainReader> = Arc::new(RpcChainReader::new(networks.clone()));
        let wallet = WalletContext::new(config.project_id.clone(), connectors);

        Ok(Self::new(networks, wallet, reader, config.quote_debounce))
    }

    pub fn submissions(&self) -> SubmissionService<'_> {
        SubmissionService::new(&self.wallet, &self.quotes, &self.networks)
    }
}
