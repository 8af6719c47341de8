use ethers::types::U256;
use log::{info, warn};

use crate::{
    errors::CustomError,
    models::{
        page::{PageKind, SubmissionState},
        quote::QuoteInput,
        transaction::TransactionRecord,
        transfer::TransferForm,
    },
};

use super::{
    contracts::exact_input_single_calldata,
    network_config::NetworkRegistry,
    quote_service::QuoteService,
    session::WalletContext,
    validation::{validate_submission, SubmissionAction},
};

const BPS_DENOMINATOR: u64 = 10_000;

/// Lowest acceptable output after allowing `slippage_bps` of price movement.
pub fn minimum_output(amount_out: U256, slippage_bps: u16) -> U256 {
    let bps = u64::from(slippage_bps).min(BPS_DENOMINATOR);
    amount_out * U256::from(BPS_DENOMINATOR - bps) / U256::from(BPS_DENOMINATOR)
}

/// Drives one submission: validate, reconcile the network, optionally
/// re-quote, then send exactly one transaction.
pub struct SubmissionService<'a> {
    wallet: &'a WalletContext,
    quotes: &'a QuoteService,
    networks: &'a NetworkRegistry,
}

impl<'a> SubmissionService<'a> {
    pub fn new(wallet: &'a WalletContext, quotes: &'a QuoteService, networks: &'a NetworkRegistry) -> Self {
        Self {
            wallet,
            quotes,
            networks,
        }
    }

    /// Quote failures never gate a submission, except when the form opts into
    /// a slippage floor: then a failed re-quote aborts before anything is sent.
    pub async fn submit<F>(
        &self,
        page: PageKind,
        form: &TransferForm,
        on_transition: F,
    ) -> Result<TransactionRecord, CustomError>
    where
        F: Fn(SubmissionState),
    {
        on_transition(SubmissionState::Validating);
        let session = self.wallet.current();
        let validated = validate_submission(page, form, &session, self.networks)?;
        let chain_id = validated.network.chain_id;

        if session.chain_id() != Some(chain_id) {
            on_transition(SubmissionState::SwitchingNetwork);
            self.wallet.ensure_chain(chain_id).await?;
        }

        let (connector, account, _) = self.wallet.active_connector()?;

        let hash = match validated.action {
            SubmissionAction::NativeTransfer => {
                on_transition(SubmissionState::Submitting);
                info!(
                    "{page}: sending {} wei from {account:#x} to {:#x} on chain {chain_id}",
                    validated.value, validated.recipient
                );
                connector
                    .send_native(chain_id, validated.recipient, validated.value)
                    .await?
            }
            SubmissionAction::Swap {
                contracts,
                token_out,
                fee,
            } => {
                let amount_out_minimum = match validated.slippage_bps {
                    Some(bps) => {
                        on_transition(SubmissionState::Quoting);
                        let quote = self
                            .quotes
                            .fetch(&QuoteInput {
                                chain_id,
                                token_out,
                                amount_in: validated.value,
                                fee,
                            })
                            .await?;
                        minimum_output(quote.amount_out, bps)
                    }
                    None => {
                        warn!("{page}: swap sent without a minimum-output floor, slippage is unbounded");
                        U256::zero()
                    }
                };

                on_transition(SubmissionState::Submitting);
                info!(
                    "{page}: swapping {} wei for {token_out:#x} (fee {fee}, min out {amount_out_minimum}) on chain {chain_id}",
                    validated.value
                );
                let data = exact_input_single_calldata(
                    contracts.wrapped_native,
                    token_out,
                    fee,
                    validated.recipient,
                    validated.value,
                    amount_out_minimum,
                );
                connector
                    .send_contract_call(chain_id, contracts.router, data, validated.value)
                    .await?
            }
        };

        Ok(TransactionRecord::new(hash, &validated.network, page))
    }
}
