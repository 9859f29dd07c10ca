// Copyright 2025 the chartpipe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Data sources for the raw JSON resources.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderValue};
use serde_json::Value;
use tracing::info;

use crate::error::FetchError;

/// Something that can produce the JSON document behind a URL.
#[async_trait]
pub(crate) trait DataSource: Send + Sync {
    async fn fetch_json(&self, url: &str) -> Result<Value, FetchError>;
}

/// Fetches over HTTP with a single GET and no retries.
#[derive(Debug, Clone)]
pub(crate) struct HttpSource {
    client: reqwest::Client,
}

impl HttpSource {
    pub(crate) fn new() -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("chartpipe/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FetchError::Http)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl DataSource for HttpSource {
    async fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await
            .map_err(FetchError::Http)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                url: url.to_owned(),
            });
        }
        response.json().await.map_err(FetchError::Decode)
    }
}

/// Serves a fixed document (or a fixed failing status) regardless of URL.
#[cfg(test)]
#[derive(Debug, Clone)]
pub(crate) enum StaticSource {
    Document(Value),
    Status(reqwest::StatusCode),
}

#[cfg(test)]
#[async_trait]
impl DataSource for StaticSource {
    async fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
        match self {
            Self::Document(value) => Ok(value.clone()),
            Self::Status(status) => Err(FetchError::Status {
                status: *status,
                url: url.to_owned(),
            }),
        }
    }
}

/// First pipeline stage: one fetch of `url`.
pub(crate) async fn load_data(source: &dyn DataSource, url: &str) -> Result<Value, FetchError> {
    info!(%url, "fetching dataset");
    let value = source.fetch_json(url).await?;
    info!(%url, "dataset fetched");
    Ok(value)
}
