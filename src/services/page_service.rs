use std::{collections::VecDeque, sync::Arc};

use log::{info, warn};
use tokio::sync::{watch, Mutex};

use crate::{
    errors::CustomError,
    models::{
        page::{PageKind, PageView, SubmissionState, DEFAULT_DONATION_AMOUNT, DONATION_RECIPIENT},
        transaction::TransactionRecord,
        transfer::{TokenSelection, TransferForm},
    },
};

use super::quote_service::QuoteTracker;

const CANCELLED_MESSAGE: &str = "Submission cancelled";

/// Form state owned by a single page. Nothing here outlives the process.
#[derive(Debug, Default)]
pub struct PageState {
    pub form: TransferForm,
    pub quote: QuoteTracker,
    pub error: Option<String>,
    /// Newest first.
    pub transactions: VecDeque<TransactionRecord>,
}

pub struct PageHandle {
    pub kind: PageKind,
    pub state: Mutex<PageState>,
    status: watch::Sender<SubmissionState>,
}

impl PageHandle {
    pub fn new(kind: PageKind) -> Self {
        let (status, _) = watch::channel(SubmissionState::Idle);
        Self {
            kind,
            state: Mutex::new(PageState {
                form: Self::normalize(kind, TransferForm::default()),
                ..Default::default()
            }),
            status,
        }
    }

    /// Apply the page's fixed fields on top of user input.
    fn normalize(kind: PageKind, mut form: TransferForm) -> TransferForm {
        if kind == PageKind::Donate {
            form.recipient = DONATION_RECIPIENT.to_string();
            form.token = TokenSelection::Native;
            if form.amount.trim().is_empty() {
                form.amount = DEFAULT_DONATION_AMOUNT.to_string();
            }
        }
        form
    }

    pub fn status(&self) -> SubmissionState {
        self.status.borrow().clone()
    }

    pub fn set_status(&self, status: SubmissionState) {
        self.status.send_replace(status);
    }

    /// Replace the form. Any edit returns the page to `Idle`.
    pub async fn update_form(&self, form: TransferForm) -> Result<(), CustomError> {
        let mut state = self.state.lock().await;
        if self.status().is_in_flight() {
            return Err(CustomError::SubmissionInProgress);
        }
        state.form = Self::normalize(self.kind, form);
        state.error = None;
        self.set_status(SubmissionState::Idle);
        Ok(())
    }

    /// Claim the page for a submission and snapshot its form.
    pub async fn begin_submission(&self) -> Result<TransferForm, CustomError> {
        let mut state = self.state.lock().await;
        if self.status().is_in_flight() {
            return Err(CustomError::SubmissionInProgress);
        }
        state.error = None;
        self.set_status(SubmissionState::Validating);
        Ok(state.form.clone())
    }

    /// Guard that fails the page's submission if it is dropped while the
    /// submission is still in flight, e.g. when the request is cancelled.
    pub fn cancel_on_drop(&self) -> SubmissionGuard<'_> {
        SubmissionGuard { page: self }
    }

    /// Record the terminal state of a submission. The form is kept either way.
    pub async fn finish_submission(
        &self,
        outcome: Result<TransactionRecord, CustomError>,
    ) -> Result<TransactionRecord, CustomError> {
        let mut state = self.state.lock().await;
        match outcome {
            Ok(record) => {
                info!("{} settled: {}", self.kind, record.explorer_url);
                state.transactions.push_front(record.clone());
                self.set_status(SubmissionState::Settled {
                    hash: record.hash,
                    explorer_url: record.explorer_url.clone(),
                });
                Ok(record)
            }
            Err(e) => {
                let message = e.short_message();
                if e.is_validation() {
                    info!("{} submission blocked: {message}", self.kind);
                } else {
                    warn!("{} submission failed: {message}", self.kind);
                }
                state.error = Some(message.clone());
                self.set_status(SubmissionState::Failed { message });
                Err(e)
            }
        }
    }

    pub async fn view(&self) -> PageView {
        let state = self.state.lock().await;
        PageView {
            page: self.kind,
            form: state.form.clone(),
            quote: state.quote.view(),
            status: self.status(),
            error: state.error.clone(),
            transactions: state.transactions.iter().cloned().collect(),
        }
    }
}

pub struct SubmissionGuard<'a> {
    page: &'a PageHandle,
}

impl Drop for SubmissionGuard<'_> {
    fn drop(&mut self) {
        if !self.page.status().is_in_flight() {
            return;
        }
        let message = CANCELLED_MESSAGE.to_string();
        warn!("{} submission abandoned while {:?}", self.page.kind, self.page.status());
        if let Ok(mut state) = self.page.state.try_lock() {
            state.error = Some(message.clone());
        }
        self.page.set_status(SubmissionState::Failed { message });
    }
}

pub struct PageRegistry {
    donate: Arc<PageHandle>,
    transfer: Arc<PageHandle>,
    swap: Arc<PageHandle>,
}

impl PageRegistry {
    pub fn new() -> Self {
        Self {
            donate: Arc::new(PageHandle::new(PageKind::Donate)),
            transfer: Arc::new(PageHandle::new(PageKind::Transfer)),
            swap: Arc::new(PageHandle::new(PageKind::Swap)),
        }
    }

    pub fn get(&self, kind: PageKind) -> Arc<PageHandle> {
        match kind {
            PageKind::Donate => self.donate.clone(),
            PageKind::Transfer => self.transfer.clone(),
            PageKind::Swap => self.swap.clone(),
        }
    }
}

impl Default for PageRegistry {
    fn default() -> Self {
        Self::new()
    }
}
