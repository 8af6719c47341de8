use std::sync::Arc;

use ethers::types::Address;
use log::{info, warn};
use tokio::sync::{watch, Mutex};

use crate::{
    errors::CustomError,
    models::wallet::{ConnectorInfo, ConnectorList, SessionState},
};

use super::wallet_service::WalletConnector;

/// Process-wide connection identity. Created once at startup and observed
/// by every page through `subscribe`.
pub struct WalletContext {
    project_id: String,
    connectors: Vec<Arc<dyn WalletConnector>>,
    session: watch::Sender<SessionState>,
    // Serializes connect/disconnect/switch.
    ops: Mutex<()>,
}

impl WalletContext {
    pub fn new(project_id: impl Into<String>, connectors: Vec<Arc<dyn WalletConnector>>) -> Self {
        let (session, _) = watch::channel(SessionState::Disconnected);
        Self {
            project_id: project_id.into(),
            connectors,
            session,
            ops: Mutex::new(()),
        }
    }

    pub fn connectors(&self) -> ConnectorList {
        ConnectorList {
            project_id: self.project_id.clone(),
            connectors: self.connectors.iter().map(|c| c.info()).collect::<Vec<ConnectorInfo>>(),
        }
    }

    pub fn current(&self) -> SessionState {
        self.session.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.session.subscribe()
    }

    fn find(&self, connector_id: &str) -> Result<Arc<dyn WalletConnector>, CustomError> {
        self.connectors
            .iter()
            .find(|c| c.id() == connector_id)
            .cloned()
            .ok_or_else(|| CustomError::ConnectorNotFound(connector_id.to_string()))
    }

    /// The connector behind the current session, with its account and chain.
    pub fn active_connector(&self) -> Result<(Arc<dyn WalletConnector>, Address, u64), CustomError> {
        match self.current() {
            SessionState::Connected {
                connector_id,
                account,
                chain_id,
            } => Ok((self.find(&connector_id)?, account, chain_id)),
            SessionState::Disconnected => Err(CustomError::WalletNotConnected),
        }
    }

    pub async fn connect(&self, connector_id: &str, chain_id: u64) -> Result<SessionState, CustomError> {
        let _guard = self.ops.lock().await;
        if self.current() != SessionState::Disconnected {
            return Err(CustomError::AlreadyConnected);
        }

        let connector = self.find(connector_id)?;
        let account = connector.connect(chain_id).await?;
        let state = SessionState::Connected {
            connector_id: connector_id.to_string(),
            account,
            chain_id,
        };
        self.session.send_replace(state.clone());
        info!("connected {account:#x} via {connector_id} on chain {chain_id}");
        Ok(state)
    }

    pub async fn disconnect(&self) -> Result<(), CustomError> {
        let _guard = self.ops.lock().await;
        if let Ok((connector, account, _)) = self.active_connector() {
            if let Err(e) = connector.disconnect().await {
                warn!("connector {} failed to disconnect cleanly: {e}", connector.id());
            }
            info!("disconnected {account:#x}");
        }
        self.session.send_replace(SessionState::Disconnected);
        Ok(())
    }

    /// Ask the wallet to move to `chain_id`. A failed switch leaves the
    /// session on its previous network.
    pub async fn switch_chain(&self, chain_id: u64) -> Result<SessionState, CustomError> {
        let _guard = self.ops.lock().await;
        let (connector, account, current) = self.active_connector()?;
        if current == chain_id {
            return Ok(self.current());
        }

        connector.switch_chain(chain_id).await.map_err(|e| match e {
            CustomError::UserRejected => CustomError::UserRejected,
            other => CustomError::NetworkSwitchError(other.short_message()),
        })?;

        let state = SessionState::Connected {
            connector_id: connector.id().to_string(),
            account,
            chain_id,
        };
        self.session.send_replace(state.clone());
        info!("switched {account:#x} from chain {current} to {chain_id}");
        Ok(state)
    }

    /// Reconcile the active network with the one an operation requires.
    /// Returns whether a switch was needed.
    pub async fn ensure_chain(&self, required: u64) -> Result<bool, CustomError> {
        match self.current().chain_id() {
            Some(active) if active == required => Ok(false),
            Some(_) => self.switch_chain(required).await.map(|_| true),
            None => Err(CustomError::WalletNotConnected),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::MockConnector;

    fn context(connector: Arc<MockConnector>) -> WalletContext {
        WalletContext::new("test-project", vec![connector as Arc<dyn WalletConnector>])
    }

    #[actix_web::test]
    async fn connect_notifies_subscribers() {
        let connector = Arc::new(MockConnector::new());
        let wallet = context(connector.clone());
        let mut updates = wallet.subscribe();

        wallet.connect("mock", 11155111).await.unwrap();
        assert!(updates.has_changed().unwrap());
        assert_eq!(updates.borrow_and_update().chain_id(), Some(11155111));
        assert_eq!(wallet.current().account(), Some(connector.account));

        wallet.disconnect().await.unwrap();
        assert!(updates.has_changed().unwrap());
        assert_eq!(*updates.borrow_and_update(), SessionState::Disconnected);
        assert_eq!(connector.calls(), vec!["connect:11155111", "disconnect"]);
    }

    #[actix_web::test]
    async fn rejects_unknown_or_duplicate_connections() {
        let wallet = context(Arc::new(MockConnector::new()));
        assert!(matches!(
            wallet.connect("nope", 1).await,
            Err(CustomError::ConnectorNotFound(_))
        ));
        wallet.connect("mock", 1).await.unwrap();
        assert!(matches!(
            wallet.connect("mock", 1).await,
            Err(CustomError::AlreadyConnected)
        ));
    }

    #[actix_web::test]
    async fn ensure_chain_switches_only_on_mismatch() {
        let connector = Arc::new(MockConnector::new());
        let wallet = context(connector.clone());
        wallet.connect("mock", 1).await.unwrap();

        assert!(!wallet.ensure_chain(1).await.unwrap());
        assert!(wallet.ensure_chain(11155111).await.unwrap());
        assert_eq!(wallet.current().chain_id(), Some(11155111));
        assert_eq!(connector.calls(), vec!["connect:1", "switch:11155111"]);
    }

    #[actix_web::test]
    async fn rejected_switch_keeps_previous_network() {
        let connector = Arc::new(MockConnector::new().rejecting_switch());
        let wallet = context(connector);
        wallet.connect("mock", 1).await.unwrap();

        let err = wallet.ensure_chain(11155111).await.unwrap_err();
        assert!(matches!(err, CustomError::NetworkSwitchError(_)));
        assert_eq!(wallet.current().chain_id(), Some(1));
    }

    #[actix_web::test]
    async fn ensure_chain_requires_connection() {
        let wallet = context(Arc::new(MockConnector::new()));
        assert!(matches!(
            wallet.ensure_chain(1).await,
            Err(CustomError::WalletNotConnected)
        ));
    }
}
