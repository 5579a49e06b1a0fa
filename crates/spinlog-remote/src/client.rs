//! Thin JSON client shared by every HTTP adapter.

use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use spinlog_core::ports::{CatalogError, StoreError};
use thiserror::Error;
use tracing::debug;

use crate::config::RemoteConfig;

#[derive(Debug, Error)]
pub enum RemoteError {
  #[error("transport: {0}")]
  Transport(#[from] reqwest::Error),

  /// Non-2xx answer; `message` comes from the body's `error`/`detail` field when present.
  #[error("status {status}: {message}")]
  Status { status: u16, message: String },

  #[error("decode: {0}")]
  Decode(String),
}

impl From<RemoteError> for StoreError {
  fn from(e: RemoteError) -> Self {
    match e {
      RemoteError::Transport(e) => StoreError::Transport(e.to_string()),
      RemoteError::Status { status: 404, .. } => StoreError::NotFound,
      RemoteError::Status { status, message } => StoreError::Rejected { status, message },
      RemoteError::Decode(msg) => StoreError::Decode(msg),
    }
  }
}

impl From<RemoteError> for CatalogError {
  fn from(e: RemoteError) -> Self {
    match e {
      RemoteError::Transport(e) => CatalogError::Transport(e.to_string()),
      RemoteError::Status { status, message } => CatalogError::Rejected { status, message },
      RemoteError::Decode(msg) => CatalogError::InvalidResponse(msg),
    }
  }
}

#[derive(Clone)]
pub struct ApiClient {
  http: reqwest::Client,
  config: RemoteConfig,
}

impl ApiClient {
  pub fn new(config: RemoteConfig) -> Result<Self, RemoteError> {
    let mut builder = reqwest::Client::builder();
    if let Some(secs) = config.timeout_secs {
      builder = builder.timeout(Duration::from_secs(secs));
    }
    let http = builder.build()?;
    Ok(Self { http, config })
  }

  pub fn config(&self) -> &RemoteConfig {
    &self.config
  }

  pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, RemoteError> {
    let bytes = self.get_bytes(path, &[]).await?;
    decode(&bytes)
  }

  /// Raw body of a GET, for callers that decode it themselves.
  pub async fn get_bytes(&self, path: &str, query: &[(&str, String)]) -> Result<Vec<u8>, RemoteError> {
    let response = self.send(self.request(Method::GET, path).query(query)).await?;
    Ok(response.bytes().await?.to_vec())
  }

  pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, RemoteError>
  where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
  {
    let response = self.send(self.request(Method::POST, path).json(body)).await?;
    decode(&response.bytes().await?)
  }

  /// Sends `body` and ignores whatever the server answers on success.
  pub async fn send_json<B: Serialize + ?Sized>(
    &self,
    method: Method,
    path: &str,
    body: &B,
  ) -> Result<(), RemoteError> {
    self.send(self.request(method, path).json(body)).await?;
    Ok(())
  }

  pub async fn delete(&self, path: &str) -> Result<(), RemoteError> {
    self.send(self.request(Method::DELETE, path)).await?;
    Ok(())
  }

  fn request(&self, method: Method, path: &str) -> RequestBuilder {
    let builder = self.http.request(method, self.config.endpoint(path));
    match &self.config.access_token {
      Some(token) => builder.bearer_auth(token),
      None => builder,
    }
  }

  async fn send(&self, builder: RequestBuilder) -> Result<Response, RemoteError> {
    let response = builder.send().await?;
    let status = response.status();
    if status.is_success() {
      return Ok(response);
    }

    let url = response.url().clone();
    let body = response.text().await.unwrap_or_default();
    let message = rejection_message(&body)
      .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());

    debug!(%url, status = status.as_u16(), %message, "remote rejected request");
    Err(RemoteError::Status { status: status.as_u16(), message })
  }
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, RemoteError> {
  serde_json::from_slice(bytes).map_err(|e| RemoteError::Decode(e.to_string()))
}

/// `error` or `detail` from a JSON error body.
fn rejection_message(body: &str) -> Option<String> {
  let value: serde_json::Value = serde_json::from_str(body).ok()?;
  ["error", "detail"].iter().find_map(|key| match value.get(key)? {
    serde_json::Value::String(s) => Some(s.clone()),
    serde_json::Value::Null => None,
    other => Some(other.to_string()),
  })
}
