use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(String),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("No address column found. Expected columns: 'Address', 'Wallet_Address', 'address', etc.")]
    MissingAddressColumn,

    #[error("Invalid sheet URL: {0}")]
    InvalidSheetUrl(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Why a single balance check failed.
///
/// These never escape the batch driver; each one is folded into the
/// `BalanceResult` of the wallet that produced it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckError {
    /// Connection refused, DNS failure, timeout
    #[error("Network Error: {0}")]
    Network(String),

    #[error("{message}")]
    Http { status: u16, message: String },

    /// Top-level value is not an object or lacks the balance field
    #[error("{0}")]
    MalformedResponse(String),

    /// The upstream API put an error message where the balance should be
    #[error("{0}")]
    UpstreamError(String),

    #[error("Data parsing error: {0}")]
    Parsing(String),
}

impl CheckError {
    /// Stable machine-readable category, used in exports and log fields
    pub fn kind(&self) -> &'static str {
        match self {
            CheckError::Network(_) => "network",
            CheckError::Http { .. } => "http",
            CheckError::MalformedResponse(_) => "malformed_response",
            CheckError::UpstreamError(_) => "upstream_error",
            CheckError::Parsing(_) => "parsing",
        }
    }
}
