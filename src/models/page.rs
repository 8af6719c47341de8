use std::fmt;

use ethers::types::H256;
use serde::{Deserialize, Serialize};

use super::{quote::QuoteView, transaction::TransactionRecord, transfer::TransferForm};

pub const DONATION_RECIPIENT: &str = "0xbb61FFEF3c1855D40c5868669ac0ECeB47E4eF56";
pub const DEFAULT_DONATION_AMOUNT: &str = "0.01";

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    Donate,
    Transfer,
    Swap,
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageKind::Donate => f.write_str("donate"),
            PageKind::Transfer => f.write_str("transfer"),
            PageKind::Swap => f.write_str("swap"),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    SwitchingNetwork,
    Quoting,
    Submitting,
    Settled {
        hash: H256,
        explorer_url: String,
    },
    Failed {
        message: String,
    },
}

impl SubmissionState {
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            SubmissionState::Validating
                | SubmissionState::SwitchingNetwork
                | SubmissionState::Quoting
                | SubmissionState::Submitting
        )
    }
}

#[derive(Debug, Serialize)]
pub struct PageView {
    pub page: PageKind,
    pub form: TransferForm,
    pub quote: QuoteView,
    pub status: SubmissionState,
    pub error: Option<String>,
    pub transactions: Vec<TransactionRecord>,
}
