use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://api.hiro.so/v2/accounts/";
pub const DEFAULT_USER_AGENT: &str = "STX-Balance-Checker/1.0";
pub const DEFAULT_REPORT_BASENAME: &str = "stx_balance_report";

#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub batch: BatchConfig,
    pub export: ExportConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Account-info endpoint; the address is appended verbatim
    pub base_url: String,
    pub timeout_secs: u64,
    /// Shorter timeout for raw debug probes
    pub probe_timeout_secs: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Pause between consecutive requests (default: 100ms)
    pub delay_ms: u64,
}

#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// File name without extension for the JSON and CSV exports
    pub basename: String,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(anyhow::anyhow!("Unsupported log format: {}", other)),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: 10,
            probe_timeout_secs: 5,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl BatchConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { delay_ms: 100 }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            basename: DEFAULT_REPORT_BASENAME.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            batch: BatchConfig::default(),
            export: ExportConfig::default(),
            logging: LoggingConfig {
                format: LogFormat::Pretty,
            },
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            api: ApiConfig {
                base_url: var("STX_API_BASE_URL", DEFAULT_API_BASE_URL),
                timeout_secs: var("STX_REQUEST_TIMEOUT_SECS", "10").parse()?,
                probe_timeout_secs: var("STX_PROBE_TIMEOUT_SECS", "5").parse()?,
                user_agent: var("STX_USER_AGENT", DEFAULT_USER_AGENT),
            },
            batch: BatchConfig {
                delay_ms: var("STX_REQUEST_DELAY_MS", "100").parse()?,
            },
            export: ExportConfig {
                basename: var("STX_REPORT_BASENAME", DEFAULT_REPORT_BASENAME),
            },
            logging: LoggingConfig {
                format: var("STX_LOG_FORMAT", "pretty").parse()?,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(|_| None).unwrap();

        assert_eq!(config.api.base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.api.timeout(), Duration::from_secs(10));
        assert_eq!(config.api.probe_timeout(), Duration::from_secs(5));
        assert_eq!(config.api.user_agent, "STX-Balance-Checker/1.0");
        assert_eq!(config.batch.delay(), Duration::from_millis(100));
        assert_eq!(config.export.basename, "stx_balance_report");
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("STX_API_BASE_URL", "http://localhost:3999/v2/accounts/"),
            ("STX_REQUEST_DELAY_MS", "0"),
            ("STX_LOG_FORMAT", "JSON"),
        ]
        .into_iter()
        .collect();

        let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap();

        assert_eq!(config.api.base_url, "http://localhost:3999/v2/accounts/");
        assert_eq!(config.batch.delay(), Duration::ZERO);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_number_is_rejected() {
        let result = Config::from_lookup(|key| {
            (key == "STX_REQUEST_TIMEOUT_SECS").then(|| "ten".to_string())
        });
        assert!(result.is_err());
    }
}
