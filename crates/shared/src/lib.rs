pub mod models;
pub mod error;
pub mod config;

pub use error::{CheckError, Error, Result};
pub use models::{Balance, BalanceResult, WalletRef};
