// src/fetch/mod.rs

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::config::Config;

pub mod file;
pub mod http;

pub use file::FileCsvSource;
pub use http::HttpCsvSource;

/// Where the links CSV comes from.
#[async_trait]
pub trait CsvSource: Send + Sync {
    /// Fetch the whole CSV body.
    async fn fetch_csv(&self) -> Result<String>;

    /// Human-readable location, for logs.
    fn describe(&self) -> String;
}

#[async_trait]
impl<T: CsvSource + ?Sized> CsvSource for Arc<T> {
    async fn fetch_csv(&self) -> Result<String> {
        (**self).fetch_csv().await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Pick the source named by `config`: a local file when `csv_file` is set,
/// otherwise HTTP against `csv_url()`.
pub fn source_from_config(config: &Config) -> Result<Arc<dyn CsvSource>> {
    let source: Arc<dyn CsvSource> = match &config.csv_file {
        Some(path) => Arc::new(FileCsvSource::new(path)),
        None => Arc::new(HttpCsvSource::from_config(config)?),
    };
    info!(source = %source.describe(), "using links CSV source");
    Ok(source)
}
