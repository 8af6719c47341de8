use std::{sync::Arc, time::Duration};

use actix_web::rt::time::sleep;
use log::{debug, warn};

use crate::{
    errors::CustomError,
    models::{
        quote::{QuoteInput, QuoteParams, QuoteResult, QuoteView},
        transfer::{TokenSelection, TransferForm},
    },
};

use super::{
    blockchain_service::ChainReader,
    network_config::NetworkRegistry,
    page_service::PageHandle,
    units::{format_units, NATIVE_DECIMALS},
    validation::{parse_positive_amount, parse_token_address, validate_fee_tier},
};

/// Quote inputs for a form, or `None` when the form does not warrant a quote:
/// native selection, malformed token, non-positive amount, bad fee tier or a
/// network without an exchange.
pub fn quote_input(form: &TransferForm, networks: &NetworkRegistry) -> Option<QuoteInput> {
    let TokenSelection::Erc20(token) = &form.token else {
        return None;
    };
    let token_out = parse_token_address(token).ok()?;
    let amount_in = parse_positive_amount(&form.amount, NATIVE_DECIMALS).ok()?;
    let fee = validate_fee_tier(form.fee_tier).ok()?;
    let network = networks.resolve(form.chain_id).ok()?;
    network.swap?;

    Some(QuoteInput {
        chain_id: network.chain_id,
        token_out,
        amount_in,
        fee,
    })
}

/// Sequence-numbered holder of the displayed estimate. Only the outcome of
/// the most recently issued request is ever shown.
#[derive(Debug, Default)]
pub struct QuoteTracker {
    latest: u64,
    pending: bool,
    estimate: Option<QuoteResult>,
    error: Option<String>,
}

impl QuoteTracker {
    pub fn begin(&mut self) -> u64 {
        self.latest += 1;
        self.pending = true;
        self.estimate = None;
        self.error = None;
        self.latest
    }

    pub fn is_latest(&self, seq: u64) -> bool {
        seq == self.latest
    }

    pub fn complete(&mut self, seq: u64, outcome: Result<QuoteResult, String>) -> bool {
        if !self.is_latest(seq) {
            return false;
        }
        self.pending = false;
        match outcome {
            Ok(quote) => {
                self.estimate = Some(quote);
                self.error = None;
            }
            Err(message) => {
                self.estimate = None;
                self.error = Some(message);
            }
        }
        true
    }

    /// Invalidate anything in flight and clear the display.
    pub fn reset(&mut self) {
        self.latest += 1;
        self.pending = false;
        self.estimate = None;
        self.error = None;
    }

    pub fn estimate(&self) -> Option<&QuoteResult> {
        self.estimate.as_ref()
    }

    pub fn view(&self) -> QuoteView {
        QuoteView {
            pending: self.pending,
            estimate: self.estimate().cloned(),
            error: self.error.clone(),
        }
    }
}

#[derive(Clone)]
pub struct QuoteService {
    reader: Arc<dyn ChainReader>,
    networks: NetworkRegistry,
}

impl QuoteService {
    pub fn new(reader: Arc<dyn ChainReader>, networks: NetworkRegistry) -> Self {
        Self { reader, networks }
    }

    pub async fn fetch(&self, input: &QuoteInput) -> Result<QuoteResult, CustomError> {
        let network = self.networks.get(input.chain_id)?;
        let swap = network.swap.ok_or_else(|| {
            CustomError::ValidationError(format!("Swaps are not available on {}", network.name))
        })?;

        let amounts = self
            .reader
            .quote_exact_input_single(
                input.chain_id,
                QuoteParams {
                    token_in: swap.wrapped_native,
                    token_out: input.token_out,
                    amount_in: input.amount_in,
                    fee: input.fee,
                },
            )
            .await?;
        let token = self.reader.token_metadata(input.chain_id, input.token_out).await?;

        Ok(QuoteResult {
            input: input.clone(),
            amount_out: amounts.amount_out,
            decimals: token.decimals,
            symbol: token.symbol,
            estimate: format_units(amounts.amount_out, token.decimals),
            sqrt_price_x96_after: amounts.sqrt_price_x96_after,
            initialized_ticks_crossed: amounts.initialized_ticks_crossed,
            gas_estimate: amounts.gas_estimate,
        })
    }

    /// Recompute the page's estimate from its current form. Returns whether
    /// the outcome was applied; superseded requests are dropped.
    pub async fn refresh(&self, page: &PageHandle, debounce: Duration) -> bool {
        let (seq, input) = {
            let mut state = page.state.lock().await;
            match quote_input(&state.form, &self.networks) {
                Some(input) => (state.quote.begin(), input),
                None => {
                    state.quote.reset();
                    return false;
                }
            }
        };

        if !debounce.is_zero() {
            sleep(debounce).await;
            if !page.state.lock().await.quote.is_latest(seq) {
                debug!("{} quote #{seq} superseded before it was sent", page.kind);
                return false;
            }
        }

        let outcome = self.fetch(&input).await.map_err(|e| {
            warn!("{} quote #{seq} failed: {e}", page.kind);
            e.short_message()
        });

        let applied = page.state.lock().await.quote.complete(seq, outcome);
        if !applied {
            debug!("{} quote #{seq} superseded, discarding response", page.kind);
        }
        applied
    }
}
