//! Blocking JSON transport shared by the hosted providers.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::{BairroError, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// One chat-completion endpoint with its fixed headers.
pub(crate) struct ChatEndpoint {
    client: Client,
    vendor: &'static str,
    url: &'static str,
    headers: HeaderMap,
}

impl ChatEndpoint {
    pub(crate) fn new(vendor: &'static str, url: &'static str, headers: HeaderMap) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| BairroError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            vendor,
            url,
            headers,
        })
    }

    #[cfg(test)]
    pub(crate) fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// POST a JSON body and decode the JSON reply.
    ///
    /// Transport failures, non-2xx statuses and undecodable replies all map
    /// to [`BairroError::Llm`] naming the vendor.
    pub(crate) fn post<T: DeserializeOwned>(&self, body: &Value) -> Result<T> {
        debug!(vendor = self.vendor, url = self.url, "sending chat request");
        let response = self
            .client
            .post(self.url)
            .headers(self.headers.clone())
            .json(body)
            .send()
            .map_err(|e| BairroError::Llm(format!("{} request failed: {}", self.vendor, e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().unwrap_or_default();
            return Err(BairroError::Llm(format!(
                "{} returned {}: {}",
                self.vendor,
                status,
                detail.trim()
            )));
        }

        response.json().map_err(|e| {
            BairroError::Llm(format!("Unreadable {} response: {}", self.vendor, e))
        })
    }
}

/// JSON content type plus one secret-bearing header.
pub(crate) fn json_headers(key_header: HeaderName, key_value: &str) -> Result<HeaderMap> {
    let mut secret = HeaderValue::from_str(key_value)
        .map_err(|e| BairroError::Config(format!("Invalid API key: {}", e)))?;
    secret.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(key_header, secret);
    Ok(headers)
}
