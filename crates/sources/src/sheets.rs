use reqwest::Client;
use shared::config::ApiConfig;
use shared::{Error, Result, WalletRef};
use tracing::{info, warn};

use crate::csv_file::read_csv;

const SHEETS_URL_MARKER: &str = "docs.google.com/spreadsheets";

/// Rewrite a Google Sheets link into its CSV export URL.
///
/// Links that already point at an export (or are not Sheets links at all) are
/// returned unchanged. A `gid` in the link selects that sheet; without one the
/// export covers the first sheet, and a requested `sheet_name` cannot be
/// honored.
pub fn csv_export_url(url: &str, sheet_name: Option<&str>) -> Result<String> {
    let url = url.trim();
    if !url.contains(SHEETS_URL_MARKER) || url.contains("export") {
        return Ok(url.to_string());
    }

    let sheet_id = url
        .split("/d/")
        .nth(1)
        .and_then(|rest| rest.split(['/', '?', '#']).next())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| Error::InvalidSheetUrl(url.to_string()))?;

    let mut export_url = format!(
        "https://docs.google.com/spreadsheets/d/{}/export?format=csv",
        sheet_id
    );

    match find_gid(url) {
        Some(gid) => {
            export_url.push_str("&gid=");
            export_url.push_str(gid);
        }
        None => {
            if let Some(name) = sheet_name {
                warn!(
                    "Sheet '{}' requested but the link has no gid; using the first sheet. \
                     Copy the link while that sheet is open to select it.",
                    name
                );
            }
        }
    }

    Ok(export_url)
}

fn find_gid(url: &str) -> Option<&str> {
    let start = url.find("gid=")? + "gid=".len();
    let rest = &url[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    (end > 0).then(|| &rest[..end])
}

/// Load wallets from a publicly shared Google Sheet (or any CSV URL)
pub async fn load_google_sheet(
    config: &ApiConfig,
    url: &str,
    sheet_name: Option<&str>,
) -> Result<Vec<WalletRef>> {
    let csv_url = csv_export_url(url, sheet_name)?;
    info!("Fetching sheet CSV from {}", csv_url);

    let client = Client::builder()
        .timeout(config.timeout())
        .user_agent(config.user_agent.as_str())
        .build()
        .map_err(|e| Error::Http(format!("Failed to create HTTP client: {}", e)))?;

    let response = client
        .get(&csv_url)
        .send()
        .await
        .map_err(|e| Error::Http(format!("Failed to fetch sheet: {}", e)))?;

    if !response.status().is_success() {
        return Err(Error::Http(format!(
            "Sheet export returned status {}. Make sure the sheet is shared with 'Anyone with the link'",
            response.status()
        )));
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| Error::Http(format!("Failed to read sheet body: {}", e)))?;

    let wallets = read_csv(body.as_ref())?;
    info!("Loaded {} wallet addresses from Google Sheets", wallets.len());
    Ok(wallets)
}
