//! Dashboard configuration.
//!
//! Read from a JSON file at startup and written back by the Settings page.
//! Every field is optional in the file; missing ones take their defaults.

use std::path::{Path, PathBuf};

use anyhow::Context;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::data::store::DEFAULT_FEE_RATE;
use crate::error::{Error, Result};

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "sapre.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Seed of the simulated dataset.
    pub seed: u64,
    /// Number of precatórios generated.
    pub record_count: usize,
    /// Fraction of the amount paid as fee (0.05 = 5 %).
    pub fee_rate: Decimal,
    /// Where "Exportar Excel" writes.
    pub export_path: PathBuf,
    /// Documents percentage under which a record is flagged on the dashboard.
    pub docs_alert_threshold: u8,
    pub email_alerts: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: 42,
            record_count: 50,
            fee_rate: DEFAULT_FEE_RATE,
            export_path: PathBuf::from("relatorio_precatorios.xlsx"),
            docs_alert_threshold: 90,
            email_alerts: false,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        read_json(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            reason: format!("{e:#}"),
        })
    }

    /// Load `path` if given, else [`DEFAULT_CONFIG_FILE`] when it exists,
    /// else the defaults. A broken file is logged and replaced by defaults.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let path = match path {
            Some(p) => p,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Path::new(DEFAULT_CONFIG_FILE),
            None => return Self::default(),
        };
        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded configuration from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("{e}; using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        std::fs::write(path, text).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        log::info!("Saved configuration to {}", path.display());
        Ok(())
    }

    /// Fee rate as a whole percentage, for the Settings slider.
    pub fn fee_rate_pct(&self) -> u32 {
        (self.fee_rate * Decimal::ONE_HUNDRED)
            .round()
            .to_u32()
            .unwrap_or(0)
    }

    pub fn set_fee_rate_pct(&mut self, pct: u32) {
        self.fee_rate = Decimal::new(i64::from(pct), 2);
    }
}

fn read_json(path: &Path) -> anyhow::Result<Config> {
    let text = std::fs::read_to_string(path).context("reading config file")?;
    serde_json::from_str(&text).context("parsing config JSON")
}
