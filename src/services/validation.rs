use std::str::FromStr;

use ethers::{types::Address, types::U256, utils::to_checksum};

use crate::{
    errors::CustomError,
    models::{
        network_config::{NetworkConfig, SwapContracts},
        page::PageKind,
        transfer::{TokenSelection, TransferForm, FEE_TIERS},
        wallet::SessionState,
    },
};

use super::{
    network_config::NetworkRegistry,
    units::{parse_units, NATIVE_DECIMALS},
};

const MAX_SLIPPAGE_BPS: u16 = 10_000;

/// `0x` followed by 40 hex digits. Mixed-case input must carry a valid
/// EIP-55 checksum.
pub fn is_address(input: &str) -> bool {
    let Some(hex) = input.strip_prefix("0x") else {
        return false;
    };
    if hex.len() != 40 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return false;
    }
    if hex == hex.to_ascii_lowercase() {
        return true;
    }
    match Address::from_str(input) {
        Ok(address) => to_checksum(&address, None) == input,
        Err(_) => false,
    }
}

fn parse_address(input: &str, message: &str) -> Result<Address, CustomError> {
    let input = input.trim();
    if !is_address(input) {
        return Err(CustomError::InvalidAddressError(message.to_string()));
    }
    Address::from_str(input).map_err(|_| CustomError::InvalidAddressError(message.to_string()))
}

pub fn parse_recipient(input: &str) -> Result<Address, CustomError> {
    parse_address(input, "Enter valid recipient address")
}

pub fn parse_token_address(input: &str) -> Result<Address, CustomError> {
    parse_address(input, "Enter valid token address")
}

/// Amount in base units. Zero is rejected along with anything unparseable.
pub fn parse_positive_amount(input: &str, decimals: u8) -> Result<U256, CustomError> {
    let value = parse_units(input, decimals)?;
    if value.is_zero() {
        return Err(CustomError::InvalidAmountError(
            "Enter an amount greater than zero".to_string(),
        ));
    }
    Ok(value)
}

pub fn validate_fee_tier(fee: u32) -> Result<u32, CustomError> {
    if FEE_TIERS.contains(&fee) {
        Ok(fee)
    } else {
        Err(CustomError::ValidationError(format!(
            "Unsupported fee tier {fee}, expected one of {FEE_TIERS:?}"
        )))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmissionAction {
    NativeTransfer,
    Swap {
        contracts: SwapContracts,
        token_out: Address,
        fee: u32,
    },
}

#[derive(Clone, Debug)]
pub struct ValidatedSubmission {
    pub network: NetworkConfig,
    pub recipient: Address,
    /// Native value attached to the transaction, in wei.
    pub value: U256,
    pub action: SubmissionAction,
    pub slippage_bps: Option<u16>,
}

/// Check every form rule without touching the network.
pub fn validate_submission(
    page: PageKind,
    form: &TransferForm,
    session: &SessionState,
    networks: &NetworkRegistry,
) -> Result<ValidatedSubmission, CustomError> {
    let account = session.account().ok_or(CustomError::WalletNotConnected)?;
    let network = networks.resolve(form.chain_id)?;

    let recipient = if page == PageKind::Swap && form.recipient.trim().is_empty() {
        account
    } else {
        parse_recipient(&form.recipient)?
    };

    let value = parse_positive_amount(&form.amount, NATIVE_DECIMALS)?;

    let action = match (&form.token, page) {
        (TokenSelection::Native, PageKind::Swap) => {
            return Err(CustomError::ValidationError(
                "Select a token to receive".to_string(),
            ))
        }
        (TokenSelection::Native, _) => SubmissionAction::NativeTransfer,
        (TokenSelection::Erc20(_), PageKind::Donate) => {
            return Err(CustomError::ValidationError(
                "Donations are sent in the native asset".to_string(),
            ))
        }
        (TokenSelection::Erc20(token), _) => {
            let token_out = parse_token_address(token)?;
            let contracts = network.swap.ok_or_else(|| {
                CustomError::ValidationError(format!("Swaps are not available on {}", network.name))
            })?;
            SubmissionAction::Swap {
                contracts,
                token_out,
                fee: validate_fee_tier(form.fee_tier)?,
            }
        }
    };

    if let Some(bps) = form.slippage_bps {
        if bps > MAX_SLIPPAGE_BPS {
            return Err(CustomError::ValidationError(format!(
                "Slippage tolerance must be at most {MAX_SLIPPAGE_BPS} basis points"
            )));
        }
    }

    if !form.confirmed {
        return Err(CustomError::ConfirmationRequired);
    }

    Ok(ValidatedSubmission {
        network,
        recipient,
        value,
        action,
        slippage_bps: form.slippage_bps,
    })
}
