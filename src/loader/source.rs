//! Play sources
//!
//! [`PlaySource`] is the seam between the loader and the network.
//! [`HttpPlaySource`] performs a single unauthenticated `GET` against the
//! configured playbook endpoint.

use async_trait::async_trait;

use crate::config::PlaygroundConfig;
use crate::core::play::PlayList;

/// Something that can produce the current play list.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait PlaySource {
    /// Where the plays come from, for diagnostics.
    fn describe(&self) -> String;

    async fn fetch_plays(&self) -> Result<PlayList, SourceError>;
}

/// Fetches the play list over HTTP.
#[derive(Debug, Clone)]
pub struct HttpPlaySource {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpPlaySource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn from_config(config: &PlaygroundConfig) -> Result<Self, SourceError> {
        let builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = match config.request_timeout_secs {
            Some(secs) => builder.timeout(std::time::Duration::from_secs(secs)),
            None => builder,
        };

        Ok(Self {
            client: builder.build()?,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl PlaySource for HttpPlaySource {
    fn describe(&self) -> String {
        self.endpoint.clone()
    }

    async fn fetch_plays(&self) -> Result<PlayList, SourceError> {
        let response = self.client.get(&self.endpoint).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        Ok(PlayList::from_json_slice(&body)?)
    }
}

/// Errors raised while retrieving plays
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Endpoint returned HTTP {0}")]
    Status(u16),

    #[error("Response is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
