// src/config.rs

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};
use url::Url;

use crate::{fields::DEFAULT_MAX_PAIRS, links::ParseMode};

/// Env var naming an optional YAML config file.
pub const CONFIG_ENV: &str = "COMPANY_FIELDS_CONFIG";

const BASE_URL_ENV: &str = "COMPANY_FIELDS_BASE_URL";
const CSV_PATH_ENV: &str = "COMPANY_FIELDS_CSV_PATH";
const CSV_FILE_ENV: &str = "COMPANY_FIELDS_CSV_FILE";
const CSV_MODE_ENV: &str = "COMPANY_FIELDS_CSV_MODE";
const TIMEOUT_ENV: &str = "COMPANY_FIELDS_TIMEOUT_SECS";
const MAX_PAIRS_ENV: &str = "COMPANY_FIELDS_MAX_PAIRS";
const PORT_ENV: &str = "PORT";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// URL of the page hosting the form; `csv_path` is resolved against it.
    pub base_url: String,
    pub csv_path: String,
    /// Read the CSV from this local file instead of over HTTP.
    pub csv_file: Option<PathBuf>,
    pub parse_mode: ParseMode,
    /// Request timeout. `None` waits indefinitely.
    pub timeout_secs: Option<u64>,
    /// Largest count that renders; larger counts render nothing.
    pub max_pairs: usize,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/svn".to_string(),
            csv_path: "../static/js/filtered_links.csv".to_string(),
            csv_file: None,
            parse_mode: ParseMode::Naive,
            timeout_secs: None,
            max_pairs: DEFAULT_MAX_PAIRS,
            port: 8080,
        }
    }
}

impl Config {
    /// Defaults, then the YAML file named by `COMPANY_FIELDS_CONFIG` (if set),
    /// then individual env overrides.
    pub fn load() -> Result<Self> {
        let mut cfg = match env::var(CONFIG_ENV) {
            Ok(path) => Self::from_yaml_file(&path)?,
            Err(_) => Self::default(),
        };
        cfg.apply_overrides(|key| env::var(key).ok())?;
        Ok(cfg)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        serde_yaml::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))
    }

    /// Apply overrides from `lookup` (normally the process environment).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(BASE_URL_ENV) {
            self.base_url = v;
        }
        if let Some(v) = lookup(CSV_PATH_ENV) {
            self.csv_path = v;
        }
        if let Some(v) = lookup(CSV_FILE_ENV) {
            self.csv_file = Some(PathBuf::from(v));
        }
        if let Some(v) = lookup(CSV_MODE_ENV) {
            self.parse_mode = v
                .parse()
                .with_context(|| format!("invalid {}", CSV_MODE_ENV))?;
        }
        if let Some(v) = lookup(TIMEOUT_ENV) {
            let secs: u64 = v
                .trim()
                .parse()
                .with_context(|| format!("invalid {} `{}`", TIMEOUT_ENV, v))?;
            self.timeout_secs = Some(secs);
        }
        if let Some(v) = lookup(MAX_PAIRS_ENV) {
            self.max_pairs = v
                .trim()
                .parse()
                .with_context(|| format!("invalid {} `{}`", MAX_PAIRS_ENV, v))?;
        }
        if let Some(v) = lookup(PORT_ENV) {
            self.port = v
                .trim()
                .parse()
                .with_context(|| format!("invalid {} `{}`", PORT_ENV, v))?;
        }
        Ok(())
    }

    /// `csv_path` resolved against `base_url`, the way a browser resolves a
    /// relative fetch from the page.
    pub fn csv_url(&self) -> Result<Url> {
        let base = Url::parse(&self.base_url)
            .with_context(|| format!("parsing base URL {}", self.base_url))?;
        base.join(&self.csv_path)
            .with_context(|| format!("resolving {} against {}", self.csv_path, base))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
