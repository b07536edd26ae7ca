//! Normalization of account-info responses.
//!
//! Depending on node version and configuration the `balance` field of an
//! account response comes back in one of three shapes:
//!
//! * a `0x`-prefixed hex string holding the available balance in µSTX
//! * any other string, which is an error message from the node
//! * an object with a nested `stx` entry carrying `balance` and `locked`
//!
//! Shape detection is done up front by [`classify_balance`]; each shape is
//! then converted on its own path into a [`Balance`] or a [`CheckError`].

use serde_json::{Map, Value};
use shared::{Balance, CheckError};

/// Recognized layouts of the `balance` field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BalanceShape<'a> {
    /// Hex digits with the `0x` prefix stripped
    Hex(&'a str),
    ErrorString(&'a str),
    /// The value found under `balance.stx`
    Structured(&'a Value),
    Unrecognized,
}

/// Classify a `balance` value. Predicates are tried in order: hex-prefixed
/// string, any other string, object holding `stx`.
pub fn classify_balance(balance: &Value) -> BalanceShape<'_> {
    match balance {
        Value::String(s) if s.starts_with("0x") => BalanceShape::Hex(&s[2..]),
        Value::String(s) => BalanceShape::ErrorString(s),
        Value::Object(fields) => match fields.get("stx") {
            Some(stx) => BalanceShape::Structured(stx),
            None => BalanceShape::Unrecognized,
        },
        _ => BalanceShape::Unrecognized,
    }
}

/// Normalize a decoded account response into a [`Balance`]
pub fn normalize_account(data: &Value) -> Result<Balance, CheckError> {
    let account = data.as_object().ok_or_else(|| {
        CheckError::MalformedResponse(format!(
            "Invalid API response format: expected object, got {}",
            json_type_name(data)
        ))
    })?;

    let balance = account.get("balance").ok_or_else(|| {
        CheckError::MalformedResponse("No balance information found in API response".to_string())
    })?;

    let nonce = account.get("nonce").and_then(Value::as_u64).unwrap_or(0);

    match classify_balance(balance) {
        BalanceShape::Hex(digits) => {
            let available = parse_hex_micro(digits).ok_or_else(|| {
                CheckError::Parsing(format!("Invalid hex balance format: 0x{}", digits))
            })?;
            // the hex form carries no locked amount
            Balance::from_micro(available, 0, nonce)
        }
        BalanceShape::ErrorString(message) => Err(CheckError::UpstreamError(format!(
            "API returned error: {}",
            message
        ))),
        BalanceShape::Structured(stx) => normalize_stx(stx, nonce),
        BalanceShape::Unrecognized => Err(CheckError::MalformedResponse(
            "No STX balance information found".to_string(),
        )),
    }
}

fn normalize_stx(stx: &Value, nonce: u64) -> Result<Balance, CheckError> {
    match stx {
        Value::Object(fields) => {
            let available = micro_field(fields, "balance")?;
            let locked = micro_field(fields, "locked")?;
            Balance::from_micro(available, locked, nonce)
        }
        Value::String(message) => Err(CheckError::UpstreamError(format!(
            "STX info error: {}",
            message
        ))),
        other => Err(CheckError::Parsing(format!(
            "expected `stx` to be an object, got {}",
            json_type_name(other)
        ))),
    }
}

/// Read a microunit amount that may be a decimal string or a JSON integer.
/// An absent key counts as zero.
fn micro_field(fields: &Map<String, Value>, key: &str) -> Result<u64, CheckError> {
    match fields.get(key) {
        None => Ok(0),
        Some(Value::Number(n)) => n.as_u64().ok_or_else(|| {
            CheckError::Parsing(format!("`{}` is not a non-negative integer: {}", key, n))
        }),
        Some(Value::String(s)) => s.trim().parse::<u64>().map_err(|e| {
            CheckError::Parsing(format!("invalid `{}` value {:?}: {}", key, s, e))
        }),
        Some(other) => Err(CheckError::Parsing(format!(
            "`{}` has unexpected type {}",
            key,
            json_type_name(other)
        ))),
    }
}

fn parse_hex_micro(digits: &str) -> Option<u64> {
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u64::from_str_radix(digits, 16).ok()
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
