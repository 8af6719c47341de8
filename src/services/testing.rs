//! Recording doubles for the wallet and chain-read seams.

use std::sync::Mutex;

use async_trait::async_trait;
use ethers::types::{Address, Bytes, H256, U256};

use crate::{
    errors::CustomError,
    models::{
        quote::{QuoteAmounts, QuoteParams},
        token::{TokenBalance, TokenMetadata},
    },
};

use super::{blockchain_service::ChainReader, units::format_units, wallet_service::WalletConnector};

pub struct MockConnector {
    pub account: Address,
    pub hash: H256,
    reject_switch: bool,
    reject_send: bool,
    hang_send: bool,
    calls: Mutex<Vec<String>>,
    last_data: Mutex<Option<Bytes>>,
}

impl MockConnector {
    pub fn new() -> Self {
        Self {
            account: Address::repeat_byte(0x11),
            hash: H256::repeat_byte(0xab),
            reject_switch: false,
            reject_send: false,
            hang_send: false,
            calls: Mutex::new(Vec::new()),
            last_data: Mutex::new(None),
        }
    }

    pub fn rejecting_switch(mut self) -> Self {
        self.reject_switch = true;
        self
    }

    pub fn rejecting_send(mut self) -> Self {
        self.reject_send = true;
        self
    }

    /// Sends never resolve, like a wallet prompt the user never answers.
    pub fn hanging_send(mut self) -> Self {
        self.hang_send = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_data(&self) -> Option<Bytes> {
        self.last_data.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl WalletConnector for MockConnector {
    fn id(&self) -> &str {
        "mock"
    }

    fn name(&self) -> &str {
        "Mock Wallet"
    }

    async fn connect(&self, chain_id: u64) -> Result<Address, CustomError> {
        self.record(format!("connect:{chain_id}"));
        Ok(self.account)
    }

    async fn disconnect(&self) -> Result<(), CustomError> {
        self.record("disconnect".to_string());
        Ok(())
    }

    async fn switch_chain(&self, chain_id: u64) -> Result<(), CustomError> {
        self.record(format!("switch:{chain_id}"));
        if self.reject_switch {
            return Err(CustomError::ConnectorError(format!("chain {chain_id} rejected")));
        }
        Ok(())
    }

    async fn send_native(&self, chain_id: u64, to: Address, value: U256) -> Result<H256, CustomError> {
        self.record(format!("native:{chain_id}:{to:#x}:{value}"));
        if self.hang_send {
            std::future::pending::<()>().await;
        }
        if self.reject_send {
            return Err(CustomError::UserRejected);
        }
        Ok(self.hash)
    }

    async fn send_contract_call(
        &self,
        chain_id: u64,
        to: Address,
        data: Bytes,
        value: U256,
    ) -> Result<H256, CustomError> {
        self.record(format!("contract:{chain_id}:{to:#x}:{value}"));
        *self.last_data.lock().unwrap() = Some(data);
        if self.reject_send {
            return Err(CustomError::UserRejected);
        }
        Ok(self.hash)
    }
}

pub struct MockReader {
    quote: Mutex<Result<QuoteAmounts, String>>,
    pub metadata: TokenMetadata,
    calls: Mutex<Vec<String>>,
}

impl MockReader {
    pub fn quoting(amount_out: U256) -> Self {
        Self {
            quote: Mutex::new(Ok(QuoteAmounts {
                amount_out,
                sqrt_price_x96_after: U256::from(1u64) << 96,
                initialized_ticks_crossed: 1,
                gas_estimate: U256::from(90_000u64),
            })),
            metadata: TokenMetadata {
                address: Address::zero(),
                symbol: "USDC".to_string(),
                decimals: 6,
            },
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        let reader = Self::quoting(U256::zero());
        *reader.quote.lock().unwrap() = Err(message.to_string());
        reader
    }

    pub fn set_amount_out(&self, amount_out: U256) {
        if let Ok(quote) = self.quote.lock().unwrap().as_mut() {
            quote.amount_out = amount_out;
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ChainReader for MockReader {
    async fn quote_exact_input_single(
        &self,
        chain_id: u64,
        params: QuoteParams,
    ) -> Result<QuoteAmounts, CustomError> {
        self.record(format!("quote:{chain_id}:{}:{}", params.amount_in, params.fee));
        self.quote
            .lock()
            .unwrap()
            .clone()
            .map_err(CustomError::ContractError)
    }

    async fn token_metadata(&self, chain_id: u64, token: Address) -> Result<TokenMetadata, CustomError> {
        self.record(format!("metadata:{chain_id}:{token:#x}"));
        Ok(TokenMetadata {
            address: token,
            ..self.metadata.clone()
        })
    }

    async fn native_balance(&self, chain_id: u64, _owner: Address) -> Result<TokenBalance, CustomError> {
        self.record(format!("native_balance:{chain_id}"));
        let balance = U256::exp10(18);
        Ok(TokenBalance {
            token_address: None,
            symbol: "ETH".to_string(),
            balance,
            decimals: 18,
            formatted_balance: format_units(balance, 18),
        })
    }

    async fn token_balance(
        &self,
        chain_id: u64,
        token: Address,
        _owner: Address,
    ) -> Result<TokenBalance, CustomError> {
        self.record(format!("token_balance:{chain_id}:{token:#x}"));
        let balance = U256::from(2_500_000u64);
        Ok(TokenBalance {
            token_address: Some(format!("{token:#x}")),
            symbol: self.metadata.symbol.clone(),
            balance,
            decimals: self.metadata.decimals,
            formatted_balance: format_units(balance, self.metadata.decimals),
        })
    }
}
