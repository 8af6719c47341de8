use ethers::types::Address;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConnectorInfo {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct ConnectorList {
    pub project_id: String,
    pub connectors: Vec<ConnectorInfo>,
}

/// Connection identity shared by every page.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    Disconnected,
    Connected {
        connector_id: String,
        account: Address,
        chain_id: u64,
    },
}

impl SessionState {
    pub fn account(&self) -> Option<Address> {
        match self {
            SessionState::Connected { account, .. } => Some(*account),
            SessionState::Disconnected => None,
        }
    }

    pub fn chain_id(&self) -> Option<u64> {
        match self {
            SessionState::Connected { chain_id, .. } => Some(*chain_id),
            SessionState::Disconnected => None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ConnectRequest {
    pub connector_id: String,
    pub chain_id: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct SwitchChainRequest {
    pub chain_id: u64,
}

#[derive(Debug, Deserialize)]
pub struct BalanceQuery {
    pub chain_id: Option<u64>,
    pub token: Option<String>,
}
