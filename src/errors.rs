use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use ethers::providers::ProviderError;
use serde::Serialize;
use thiserror::Error;

use crate::models::api_response::ApiResponse;

#[derive(Error, Debug)]
pub enum CustomError {
    #[error("{0}")]
    InvalidAddressError(String),

    #[error("{0}")]
    InvalidAmountError(String),

    #[error("Confirm the transaction details before sending")]
    ConfirmationRequired,

    #[error("{0}")]
    ValidationError(String),

    #[error("Connect wallet")]
    WalletNotConnected,

    #[error("Wallet already connected")]
    AlreadyConnected,

    #[error("Connector not found: {0}")]
    ConnectorNotFound(String),

    #[error("User rejected the request")]
    UserRejected,

    #[error("Connector error: {0}")]
    ConnectorError(String),

    #[error("Unsupported chain: {0}")]
    UnsupportedChainError(u64),

    #[error("Network switch failed: {0}")]
    NetworkSwitchError(String),

    #[error("Provider error: {0}")]
    ProviderError(#[from] ProviderError),

    #[error("Provider error: {0}")]
    StringifiedProviderError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Contract error: {0}")]
    ContractError(String),

    #[error("Transaction failed: {0}")]
    TransactionFailedError(String),

    #[error("A submission is already in progress")]
    SubmissionInProgress,

    #[error("{0}")]
    ConfigError(String),
}

impl CustomError {
    /// Short, user-facing form of the error, suitable for an inline panel.
    pub fn short_message(&self) -> String {
        self.to_string()
    }

    /// Input errors are raised before any network call is made.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CustomError::InvalidAddressError(_)
                | CustomError::InvalidAmountError(_)
                | CustomError::ConfirmationRequired
                | CustomError::ValidationError(_)
                | CustomError::UnsupportedChainError(_)
        )
    }
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: u16,
    pub message: String,
}

impl ResponseError for CustomError {
    fn status_code(&self) -> StatusCode {
        match self {
            CustomError::InvalidAddressError(_)
            | CustomError::InvalidAmountError(_)
            | CustomError::ConfirmationRequired
            | CustomError::ValidationError(_)
            | CustomError::UnsupportedChainError(_) => StatusCode::BAD_REQUEST,
            CustomError::WalletNotConnected | CustomError::UserRejected => StatusCode::UNAUTHORIZED,
            CustomError::AlreadyConnected | CustomError::SubmissionInProgress => StatusCode::CONFLICT,
            CustomError::ConnectorNotFound(_) => StatusCode::NOT_FOUND,
            CustomError::NetworkSwitchError(_)
            | CustomError::ProviderError(_)
            | CustomError::StringifiedProviderError(_)
            | CustomError::NetworkError(_)
            | CustomError::ContractError(_)
            | CustomError::ConnectorError(_)
            | CustomError::TransactionFailedError(_) => StatusCode::BAD_GATEWAY,
            CustomError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let api_error = ApiError {
            code: status.as_u16(),
            message: self.short_message(),
        };

        HttpResponse::build(status).json(ApiResponse {
            status: "FAILURE".to_string(),
            code: api_error.code,
            result: None::<()>,
            error: Some(api_error),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_map_to_bad_request() {
        assert_eq!(
            CustomError::InvalidAmountError("Enter a valid amount".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(CustomError::ConfirmationRequired.status_code(), StatusCode::BAD_REQUEST);
        assert!(CustomError::UnsupportedChainError(5).is_validation());
        assert!(!CustomError::UserRejected.is_validation());
    }

    #[test]
    fn short_message_is_the_bare_reason() {
        let err = CustomError::InvalidAddressError("Enter valid recipient address".into());
        assert_eq!(err.short_message(), "Enter valid recipient address");
        assert_eq!(CustomError::WalletNotConnected.short_message(), "Connect wallet");
    }

    #[test]
    fn switch_failures_are_upstream_errors() {
        let err = CustomError::NetworkSwitchError("chain 5 is not supported".into());
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.error_response().status(), StatusCode::BAD_GATEWAY);
    }
}
