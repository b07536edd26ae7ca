use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::CheckError;

/// Decimal places between microunits and display units (1 STX = 10^6 µSTX)
pub const DISPLAY_SCALE: u32 = 6;

/// Addresses must be strictly longer than this to be checked
pub const MIN_ADDRESS_LEN: usize = 10;

/// Name reported when a balance is resolved without a wallet label
pub const UNKNOWN_WALLET_NAME: &str = "Unknown";

// Input models
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletRef {
    pub name: String,
    pub address: String,
}

impl WalletRef {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }

    /// Cheap sanity filter shared by every address source.
    ///
    /// Rejects empty cells, the `nan` placeholder spreadsheets produce for
    /// blank cells, and anything too short to be an account principal. This
    /// is not a checksum validation.
    pub fn is_plausible_address(address: &str) -> bool {
        let address = address.trim();
        !address.is_empty()
            && !address.eq_ignore_ascii_case("nan")
            && address.len() > MIN_ADDRESS_LEN
    }
}

/// Convert an integer amount of microunits to display units
pub fn micro_to_display(micro: u64) -> Decimal {
    Decimal::from_i128_with_scale(micro as i128, DISPLAY_SCALE)
}

// Balance models
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Balance {
    #[serde(rename = "balance_ustx")]
    pub balance: u64,
    #[serde(rename = "locked_ustx")]
    pub locked: u64,
    #[serde(rename = "total_ustx")]
    pub total: u64,
    #[serde(rename = "balance_stx")]
    pub balance_display: Decimal,
    #[serde(rename = "locked_stx")]
    pub locked_display: Decimal,
    #[serde(rename = "total_stx")]
    pub total_display: Decimal,
    pub nonce: u64,
}

impl Balance {
    /// Build a balance from microunit amounts, deriving totals and display values
    pub fn from_micro(balance: u64, locked: u64, nonce: u64) -> Result<Self, CheckError> {
        let total = balance.checked_add(locked).ok_or_else(|| {
            CheckError::Parsing(format!(
                "total of balance {} and locked {} overflows",
                balance, locked
            ))
        })?;

        Ok(Self {
            balance,
            locked,
            total,
            balance_display: micro_to_display(balance),
            locked_display: micro_to_display(locked),
            total_display: micro_to_display(total),
            nonce,
        })
    }
}

/// Outcome of checking one wallet. Exactly one is produced per `WalletRef`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceResult {
    pub name: String,
    pub address: String,
    pub outcome: Result<Balance, CheckError>,
}

impl BalanceResult {
    pub fn success(name: impl Into<String>, address: impl Into<String>, balance: Balance) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            outcome: Ok(balance),
        }
    }

    pub fn failure(name: impl Into<String>, address: impl Into<String>, error: CheckError) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            outcome: Err(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn balance(&self) -> Option<&Balance> {
        self.outcome.as_ref().ok()
    }

    pub fn error(&self) -> Option<&CheckError> {
        self.outcome.as_ref().err()
    }

    /// Total in display units; failures contribute zero
    pub fn total_display(&self) -> Decimal {
        self.balance()
            .map(|b| b.total_display)
            .unwrap_or(Decimal::ZERO)
    }
}

/// Flat wire shape: balance fields on success, `error` on failure, and a
/// `success` flag either way.
#[derive(Serialize)]
struct BalanceRecord<'a> {
    name: &'a str,
    address: &'a str,
    #[serde(flatten)]
    balance: Option<&'a Balance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_kind: Option<&'static str>,
    success: bool,
}

impl Serialize for BalanceResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        BalanceRecord {
            name: &self.name,
            address: &self.address,
            balance: self.balance(),
            error: self.error().map(|e| e.to_string()),
            error_kind: self.error().map(CheckError::kind),
            success: self.is_success(),
        }
        .serialize(serializer)
    }
}
