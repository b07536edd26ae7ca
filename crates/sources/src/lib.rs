//! Address sources: turn spreadsheets, CSV files and public Google Sheets
//! into an ordered list of `WalletRef`s.

pub mod columns;
pub mod csv_file;
pub mod excel;
pub mod sample;
pub mod sheets;

pub use columns::{ColumnMap, WalletCollector, ADDRESS_COLUMNS, NAME_COLUMNS};
pub use csv_file::{load_csv_file, read_csv};
pub use excel::load_excel;
pub use sample::sample_wallets;
pub use sheets::{csv_export_url, load_google_sheet};
