use async_trait::async_trait;
use spinlog_core::catalog::{RawSearchResponse, decode_search_response};
use spinlog_core::CoreError;
use spinlog_core::ports::{CatalogError, CatalogSearch};
use tracing::debug;

use crate::client::ApiClient;

/// Catalog search over `GET {base_url}{search_path}?q=&limit=`.
#[derive(Clone)]
pub struct HttpCatalogSearch {
  client: ApiClient,
}

impl HttpCatalogSearch {
  pub fn new(client: ApiClient) -> Self {
    Self { client }
  }
}

#[async_trait]
impl CatalogSearch for HttpCatalogSearch {
  async fn search(&self, query: &str) -> Result<RawSearchResponse, CatalogError> {
    let config = self.client.config();
    let params = [("q", query.to_string()), ("limit", config.search_limit.to_string())];

    let body = self.client.get_bytes(&config.search_path, &params).await?;
    debug!(query, bytes = body.len(), "catalog answered");

    decode_search_response(&body).map_err(|e| match e {
      CoreError::InvalidCatalogResponse(msg) => CatalogError::InvalidResponse(msg),
      other => CatalogError::InvalidResponse(other.to_string()),
    })
  }
}
