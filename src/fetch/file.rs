use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::CsvSource;

/// Reads the links CSV from a local file.
#[derive(Clone, Debug)]
pub struct FileCsvSource {
    path: PathBuf,
}

impl FileCsvSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl CsvSource for FileCsvSource {
    async fn fetch_csv(&self) -> Result<String> {
        fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("reading links CSV {}", self.path.display()))
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}
