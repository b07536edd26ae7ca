pub mod client;
pub mod resolver;
pub mod response;
pub mod types;

pub use client::StacksClient;
pub use resolver::BalanceResolver;
pub use response::{classify_balance, normalize_account, BalanceShape};
pub use types::*;
