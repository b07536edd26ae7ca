use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};
use shared::{BalanceResult, Error, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{error, info};

const EXPORT_HEADER: [&str; 7] = [
    "Name",
    "Address",
    "Available_STX",
    "Locked_STX",
    "Total_STX",
    "Nonce",
    "Status",
];

/// Files written by [`export_results`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    pub json: PathBuf,
    pub csv: PathBuf,
    pub xlsx: PathBuf,
}

/// Write `<basename>.json`, `<basename>.csv` and `<basename>.xlsx`
pub fn export_results(results: &[BalanceResult], basename: &str) -> Result<ExportPaths> {
    let paths = ExportPaths {
        json: PathBuf::from(format!("{}.json", basename)),
        csv: PathBuf::from(format!("{}.csv", basename)),
        xlsx: PathBuf::from(format!("{}.xlsx", basename)),
    };

    info!(
        "Exporting {} results to {}, {} and {}",
        results.len(),
        paths.json.display(),
        paths.csv.display(),
        paths.xlsx.display()
    );

    write_json(results, create_file(&paths.json)?)?;
    write_csv(results, create_file(&paths.csv)?)?;
    write_xlsx(results, &paths.xlsx)?;

    Ok(paths)
}

fn create_file(path: &Path) -> Result<BufWriter<File>> {
    File::create(path).map(BufWriter::new).map_err(|e| {
        error!("Failed to create {}: {}", path.display(), e);
        Error::Io(format!("Failed to create {}: {}", path.display(), e))
    })
}

/// Serialize the results as one pretty-printed JSON array
pub fn write_json<W: Write>(results: &[BalanceResult], mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, results)
        .map_err(|e| Error::Serialization(format!("Failed to write JSON export: {}", e)))?;
    writer
        .flush()
        .map_err(|e| Error::Io(format!("Failed to flush JSON export: {}", e)))
}

/// One row per wallet. Failed checks get zero amounts and the error as status.
pub fn write_csv<W: Write>(results: &[BalanceResult], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record(EXPORT_HEADER).map_err(|e| {
        error!("Failed to write CSV header: {}", e);
        Error::Csv(format!("Failed to write CSV header: {}", e))
    })?;

    for result in results {
        let row = match &result.outcome {
            Ok(balance) => [
                result.name.clone(),
                result.address.clone(),
                balance.balance_display.to_string(),
                balance.locked_display.to_string(),
                balance.total_display.to_string(),
                balance.nonce.to_string(),
                "Success".to_string(),
            ],
            Err(err) => [
                result.name.clone(),
                result.address.clone(),
                "0".to_string(),
                "0".to_string(),
                "0".to_string(),
                "0".to_string(),
                format!("Error: {}", err),
            ],
        };

        wtr.write_record(&row)
            .map_err(|e| Error::Csv(format!("Failed to write CSV row: {}", e)))?;
    }

    wtr.flush()
        .map_err(|e| Error::Io(format!("Failed to flush CSV export: {}", e)))
}

/// Same rows as [`write_csv`] in a single-sheet workbook, with amounts and
/// nonce as numeric cells
pub fn write_xlsx(results: &[BalanceResult], path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    fill_worksheet(workbook.add_worksheet(), results).map_err(|e| {
        error!("Failed to build xlsx export: {}", e);
        Error::Spreadsheet(format!("Failed to build xlsx export: {}", e))
    })?;

    workbook.save(path).map_err(|e| {
        error!("Failed to save {}: {}", path.display(), e);
        Error::Spreadsheet(format!("Failed to save {}: {}", path.display(), e))
    })
}

fn fill_worksheet(
    sheet: &mut Worksheet,
    results: &[BalanceResult],
) -> std::result::Result<(), XlsxError> {
    for (col, title) in EXPORT_HEADER.iter().enumerate() {
        sheet.write_string(0, col as u16, *title)?;
    }

    for (index, result) in results.iter().enumerate() {
        let row = index as u32 + 1;
        sheet.write_string(row, 0, result.name.as_str())?;
        sheet.write_string(row, 1, result.address.as_str())?;

        match &result.outcome {
            Ok(balance) => {
                sheet.write_number(row, 2, cell_amount(balance.balance_display))?;
                sheet.write_number(row, 3, cell_amount(balance.locked_display))?;
                sheet.write_number(row, 4, cell_amount(balance.total_display))?;
                sheet.write_number(row, 5, balance.nonce as f64)?;
                sheet.write_string(row, 6, "Success")?;
            }
            Err(err) => {
                for col in 2..=5 {
                    sheet.write_number(row, col, 0.0)?;
                }
                sheet.write_string(row, 6, &format!("Error: {}", err))?;
            }
        }
    }

    Ok(())
}

fn cell_amount(amount: Decimal) -> f64 {
    amount.to_f64().unwrap_or_default()
}
