use shared::{Error, Result, WalletRef};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::columns::{ColumnMap, WalletCollector};

/// Load wallets from a CSV file with a header row
pub fn load_csv_file(path: impl AsRef<Path>) -> Result<Vec<WalletRef>> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| Error::Io(format!("Failed to open {}: {}", path.display(), e)))?;

    let wallets = read_csv(file)?;
    info!("Loaded {} wallet addresses from CSV file {}", wallets.len(), path.display());
    Ok(wallets)
}

/// Parse CSV data with a header row into wallets
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<WalletRef>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| Error::Csv(format!("Failed to read CSV header: {}", e)))?
        .iter()
        .map(str::to_string)
        .collect();

    let columns = ColumnMap::discover(&headers)?;
    debug!("CSV columns: {:?}", columns);

    let mut collector = WalletCollector::new(columns);
    for record in rdr.records() {
        let record = record.map_err(|e| Error::Csv(format!("Failed to read CSV row: {}", e)))?;
        let row: Vec<&str> = record.iter().collect();
        collector.push_row(&row);
    }

    if collector.skipped() > 0 {
        debug!("Skipped {} rows without a usable address", collector.skipped());
    }

    Ok(collector.finish())
}
