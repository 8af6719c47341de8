use chrono::{DateTime, Utc};
use ethers::types::H256;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{network_config::NetworkConfig, page::PageKind};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: Uuid,
    pub hash: H256,
    pub chain_id: u64,
    pub network: String,
    pub explorer_url: String,
    pub page: PageKind,
    pub submitted_at: DateTime<Utc>,
}

impl TransactionRecord {
    pub fn new(hash: H256, network: &NetworkConfig, page: PageKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            hash,
            chain_id: network.chain_id,
            network: network.name.clone(),
            explorer_url: network.explorer_tx_url(hash),
            page,
            submitted_at: Utc::now(),
        }
    }
}
