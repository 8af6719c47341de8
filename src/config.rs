use std::time::Duration;

use crate::{errors::CustomError, services::network_config::SEPOLIA_CHAIN_ID};

pub const LOCAL_RPC_URL: &str = "http://127.0.0.1:8545";

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    /// Identifier the wallet connectors are initialized with.
    pub project_id: String,
    pub app_env: String,
    /// Overrides every network's RPC endpoint when set.
    pub rpc_url: Option<String>,
    pub default_chain_id: u64,
    pub private_key: Option<String>,
    pub allowed_origins: Vec<String>,
    pub quote_debounce: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, CustomError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, CustomError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match var("PORT") {
            Some(port) => port
                .parse()
                .map_err(|_| CustomError::ConfigError(format!("Failed to parse PORT: {port}")))?,
            None => 8080,
        };

        let project_id = var("PROJECT_ID")
            .ok_or_else(|| CustomError::ConfigError("Project ID is not defined".to_string()))?;

        let app_env = var("APP_ENV").unwrap_or_else(|| "development".to_string());

        let rpc_url = match var("RPC_URL") {
            Some(url) => Some(url),
            None if app_env != "production" => Some(LOCAL_RPC_URL.to_string()),
            None => None,
        };

        let default_chain_id = match var("DEFAULT_CHAIN_ID") {
            Some(id) => id.parse().map_err(|_| {
                CustomError::ConfigError(format!("Failed to parse DEFAULT_CHAIN_ID: {id}"))
            })?,
            None => SEPOLIA_CHAIN_ID,
        };

        let allowed_origins = var("ALLOWED_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_else(|| {
                vec![
                    "http://localhost:8080".to_string(),
                    "http://localhost:5173".to_string(),
                ]
            });

        let quote_debounce = match var("QUOTE_DEBOUNCE_MS") {
            Some(ms) => Duration::from_millis(ms.parse().map_err(|_| {
                CustomError::ConfigError(format!("Failed to parse QUOTE_DEBOUNCE_MS: {ms}"))
            })?),
            None => Duration::from_millis(300),
        };

        Ok(Self {
            port,
            project_id,
            app_env,
            rpc_url,
            default_chain_id,
            private_key: var("PRIVATE_KEY"),
            allowed_origins,
            quote_debounce,
        })
    }

    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn project_id_is_required() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err.to_string(), "Project ID is not defined");
    }

    #[test]
    fn defaults_target_local_node_outside_production() {
        let config = Config::from_lookup(lookup(&[("PROJECT_ID", "abc")])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.default_chain_id, SEPOLIA_CHAIN_ID);
        assert_eq!(config.rpc_url.as_deref(), Some(LOCAL_RPC_URL));
        assert_eq!(config.quote_debounce, Duration::from_millis(300));
        assert_eq!(config.allowed_origins.len(), 2);
        assert!(config.private_key.is_none());
    }

    #[test]
    fn production_uses_network_defaults() {
        let config = Config::from_lookup(lookup(&[
            ("PROJECT_ID", "abc"),
            ("APP_ENV", "production"),
            ("ALLOWED_ORIGINS", "https://pay.example.org, "),
        ]))
        .unwrap();
        assert!(config.is_production());
        assert!(config.rpc_url.is_none());
        assert_eq!(config.allowed_origins, vec!["https://pay.example.org".to_string()]);
    }

    #[test]
    fn malformed_numbers_are_config_errors() {
        let err = Config::from_lookup(lookup(&[("PROJECT_ID", "abc"), ("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, CustomError::ConfigError(_)));
    }
}
