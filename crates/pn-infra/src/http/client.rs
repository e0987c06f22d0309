use std::time::Duration;

use anyhow::Context;
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use pn_core::config::AppConfig;
use pn_core::ports::ServiceError;

/// Thin wrapper around [`reqwest::Client`] bound to the backend base URL.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// `timeout` of zero disables the per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("invalid API base URL: {base_url}"))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("API base URL cannot carry a path: {base_url}");
        }

        let mut builder = reqwest::Client::builder();
        if !timeout.is_zero() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("failed to build HTTP client")?;

        Ok(Self { http, base_url })
    }

    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        Self::new(
            &config.api_base_url,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Append percent-encoded path segments to the base URL.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub(crate) async fn post<B, T>(&self, url: Url, body: Option<&B>) -> Result<T, ServiceError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = self.http.request(Method::POST, url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }
        self.send(request, &url).await
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, ServiceError> {
        let request = self.http.request(Method::GET, url.clone());
        self.send(request, &url).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        url: &Url,
    ) -> Result<T, ServiceError> {
        debug!(path = %url.path(), "sending backend request");
        let response = request
            .send()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = error_message(status, &text);
            warn!(path = %url.path(), status = status.as_u16(), %message, "backend rejected request");
            return Err(ServiceError::rejected(status.as_u16(), message));
        }

        decode_payload(&text)
    }
}

/// Decode a success body, unwrapping the `{ message, data }` envelope when present.
pub(crate) fn decode_payload<T: DeserializeOwned>(text: &str) -> Result<T, ServiceError> {
    let value = decode_value(text)?;
    serde_json::from_value(value)
        .map_err(|e| ServiceError::InvalidResponse(format!("unexpected response shape: {e}")))
}

pub(crate) fn decode_value(text: &str) -> Result<Value, ServiceError> {
    if text.trim().is_empty() {
        return Err(ServiceError::InvalidResponse("empty response body".to_string()));
    }
    let value: Value = serde_json::from_str(text)
        .map_err(|e| ServiceError::InvalidResponse(format!("response is not JSON: {e}")))?;
    Ok(unwrap_envelope(value))
}

fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut map) => match map.remove("data") {
            Some(data) if !data.is_null() => data,
            Some(_) | None => Value::Object(map),
        },
        other => other,
    }
}

/// Backend `message` field, else the raw body, else the status code.
pub(crate) fn error_message(status: StatusCode, text: &str) -> String {
    let text = text.trim();
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(text) {
        if let Some(message) = map.get("message").and_then(Value::as_str) {
            if !message.is_empty() {
                return message.to_string();
            }
        }
    }
    if !text.is_empty() {
        return text.to_string();
    }
    format!("request failed with status {}", status.as_u16())
}
