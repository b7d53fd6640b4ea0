use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;
use url::Url;

use super::CsvSource;
use crate::config::Config;

/// Fetches the links CSV with a GET. Anything but `200 OK` is a failure.
#[derive(Clone, Debug)]
pub struct HttpCsvSource {
    client: Client,
    url: Url,
}

impl HttpCsvSource {
    pub fn new(client: Client, url: Url) -> Self {
        Self { client, url }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("building HTTP client")?;
        Ok(Self::new(client, config.csv_url()?))
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl CsvSource for HttpCsvSource {
    #[tracing::instrument(level = "debug", skip(self), fields(url = %self.url))]
    async fn fetch_csv(&self) -> Result<String> {
        let resp = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .with_context(|| format!("GET {} failed", self.url))?;

        let status = resp.status();
        if status != StatusCode::OK {
            bail!("GET {} returned {}", self.url, status);
        }

        let body = resp
            .text()
            .await
            .with_context(|| format!("reading body from {}", self.url))?;
        debug!(bytes = body.len(), "fetched links CSV");
        Ok(body)
    }

    fn describe(&self) -> String {
        self.url.to_string()
    }
}
