pub mod app;
pub mod args;
pub mod inspect;
pub mod logging;
pub mod menu;
pub mod progress;

pub use app::{run, Action, WalletSource};
pub use args::{Cli, Command};
