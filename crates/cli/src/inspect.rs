use anyhow::Result;
use blockchain::BalanceResolver;
use serde_json::Value;
use std::io::Write;
use tracing::warn;

const DEBUG_WALLET_NAME: &str = "Debug Test";

/// Print the raw API exchange for one address followed by the parsed result.
/// The raw request runs with the full request timeout.
///
/// Transport failures are reported on `out` rather than returned; only write
/// errors on `out` itself fail.
pub async fn inspect_address<R, O>(resolver: &R, address: &str, out: &mut O) -> Result<()>
where
    R: BalanceResolver,
    O: Write,
{
    writeln!(out, "\n🔍 Debug mode: Testing address {}", address)?;

    let raw = match resolver.fetch_raw(address).await {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Debug request for {} failed: {}", address, e);
            writeln!(out, "❌ Debug error: {}", e)?;
            return Ok(());
        }
    };

    writeln!(out, "📡 API URL: {}", raw.url)?;
    writeln!(out, "📊 Response Status: {}", raw.status)?;

    if raw.status != 200 {
        writeln!(out, "❌ Error: {} - {}", raw.status, raw.body)?;
        return Ok(());
    }

    writeln!(out, "📋 Full API Response:")?;
    match serde_json::from_str::<Value>(&raw.body) {
        Ok(json) => writeln!(out, "{}", serde_json::to_string_pretty(&json)?)?,
        Err(_) => writeln!(out, "{}", raw.body)?,
    }

    let result = resolver.resolve(address, Some(DEBUG_WALLET_NAME)).await;
    writeln!(out, "\n✅ Parsed Result:")?;
    writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?;

    Ok(())
}
