use calamine::{open_workbook_auto, Data, Reader};
use shared::{Error, Result, WalletRef};
use std::path::Path;
use tracing::{debug, info};

use crate::columns::{ColumnMap, WalletCollector};

/// Load wallets from an Excel or OpenDocument workbook.
///
/// Reads `sheet_name` when given, otherwise the first sheet. The first row of
/// the sheet is treated as the header row.
pub fn load_excel(path: impl AsRef<Path>, sheet_name: Option<&str>) -> Result<Vec<WalletRef>> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path).map_err(|e| {
        Error::Spreadsheet(format!("Failed to open {}: {}", path.display(), e))
    })?;

    let sheet = match sheet_name {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| Error::Spreadsheet(format!("{} has no sheets", path.display())))?,
    };
    debug!("Reading sheet '{}' from {}", sheet, path.display());

    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| Error::Spreadsheet(format!("Failed to read sheet '{}': {}", sheet, e)))?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .map(|row| row.iter().map(cell_text).collect())
        .unwrap_or_default();

    let mut collector = WalletCollector::new(ColumnMap::discover(&headers)?);
    for row in rows {
        let cells: Vec<String> = row.iter().map(cell_text).collect();
        collector.push_row(&cells);
    }

    let wallets = collector.finish();
    info!("Loaded {} wallet addresses from Excel file {}", wallets.len(), path.display());
    Ok(wallets)
}

/// Render a cell as text. Whole floats drop the fractional part so numeric
/// labels read `7`, not `7.0`.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&Data::Empty), "");
        assert_eq!(cell_text(&Data::Float(7.0)), "7");
        assert_eq!(cell_text(&Data::Float(7.5)), "7.5");
        assert_eq!(cell_text(&Data::Int(42)), "42");
        assert_eq!(
            cell_text(&Data::String("SP1J8ff7N441J2p29F12C0ZA4GDE85X4QY8DRS1X6".to_string())),
            "SP1J8ff7N441J2p29F12C0ZA4GDE85X4QY8DRS1X6"
        );
    }

    #[test]
    fn test_missing_workbook() {
        let err = load_excel("/definitely/not/here.xlsx", None).unwrap_err();
        assert!(matches!(err, Error::Spreadsheet(_)));
    }
}
