use std::env;
use std::path::PathBuf;

use log::{debug, info};
use url::Url;

use crate::error::{BotError, Result};
use crate::rates::DEFAULT_RATES_API_URL;

pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_token: String,
    pub telegram_api_url: Url,
    pub rates_api_key: String,
    pub rates_api_url: String,
    /// Append logs here instead of stderr.
    pub log_file: Option<PathBuf>,
}

fn required(name: &str, value: Option<String>) -> Result<String> {
    let Some(value) = value else {
        return Err(BotError::Config(format!("{name} is not set")));
    };
    if value.trim().is_empty() {
        return Err(BotError::Config(format!("{name} is empty")));
    }
    Ok(value)
}

fn url_or_default(name: &str, value: Option<String>, default: &str) -> Result<Url> {
    let value = value.unwrap_or_else(|| default.to_string());
    Url::parse(&value).map_err(|e| BotError::Config(format!("{name} is not a valid URL: {e}")))
}

fn log_file(value: Option<String>) -> Option<PathBuf> {
    value.filter(|v| !v.trim().is_empty()).map(PathBuf::from)
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the config from any variable source.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let telegram_token = required("TELEGRAM_BOT_TOKEN", var("TELEGRAM_BOT_TOKEN"))?;
        let rates_api_key = required("RATES_API_KEY", var("RATES_API_KEY"))?;
        let telegram_api_url = url_or_default(
            "TELEGRAM_API_URL",
            var("TELEGRAM_API_URL"),
            DEFAULT_TELEGRAM_API_URL,
        )?;
        let rates_api_url =
            url_or_default("RATES_API_URL", var("RATES_API_URL"), DEFAULT_RATES_API_URL)?
                .to_string();
        let log_file = log_file(var("LOG_FILE"));

        Ok(Self {
            telegram_token,
            telegram_api_url,
            rates_api_key,
            rates_api_url,
            log_file,
        })
    }

    /// Log what was loaded without revealing secrets.
    pub fn log_summary(&self) {
        info!("Configuration loaded successfully");
        debug!("Telegram token length: {} characters", self.telegram_token.len());
        debug!("Rates API key length: {} characters", self.rates_api_key.len());
        debug!("Telegram API URL: {}", self.telegram_api_url);
        debug!("Rates API URL: {}", self.rates_api_url);
        if let Some(path) = &self.log_file {
            debug!("Log file: {}", path.display());
        }
    }
}
