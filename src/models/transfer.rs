use serde::{Deserialize, Serialize};

/// Pool fee tiers in hundredths of a basis point.
pub const FEE_TIERS: [u32; 4] = [100, 500, 3000, 10000];
pub const DEFAULT_FEE_TIER: u32 = 3000;

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "address", rename_all = "lowercase")]
pub enum TokenSelection {
    #[default]
    Native,
    Erc20(String),
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TransferForm {
    pub recipient: String,
    pub amount: String,
    pub token: TokenSelection,
    pub fee_tier: u32,
    pub confirmed: bool,
    /// Network the operation targets. `None` means the configured default.
    pub chain_id: Option<u64>,
    /// Opt-in slippage tolerance for swaps. Without it the floor is zero.
    pub slippage_bps: Option<u16>,
}

impl Default for TransferForm {
    fn default() -> Self {
        Self {
            recipient: String::new(),
            amount: String::new(),
            token: TokenSelection::Native,
            fee_tier: DEFAULT_FEE_TIER,
            confirmed: false,
            chain_id: None,
            slippage_bps: None,
        }
    }
}
