use async_trait::async_trait;
use spinlog_core::domain::{ListenLog, LogId, NewListenLog};
use spinlog_core::ports::{ListenLogStore, StoreError};
use tracing::warn;

use crate::client::ApiClient;
use crate::dto::{WireListenLog, decode_listen_log};

#[derive(Clone)]
pub struct HttpListenLogStore {
  client: ApiClient,
}

impl HttpListenLogStore {
  pub fn new(client: ApiClient) -> Self {
    Self { client }
  }
}

#[async_trait]
impl ListenLogStore for HttpListenLogStore {
  /// Undecodable records are skipped with a warning instead of failing the whole listing.
  async fn list(&self) -> Result<Vec<ListenLog>, StoreError> {
    let records: Vec<serde_json::Value> = self.client.get_json("/logs").await?;

    let logs = records
      .into_iter()
      .filter_map(|record| match decode_listen_log(record) {
        Ok(log) => Some(log),
        Err(e) => {
          warn!(error = %e, "skipping listen log");
          None
        }
      })
      .collect();

    Ok(logs)
  }

  async fn create(&self, log: &NewListenLog) -> Result<ListenLog, StoreError> {
    let wire: WireListenLog = self.client.post_json("/logs", log).await?;
    ListenLog::try_from(wire).map_err(StoreError::from)
  }

  async fn delete(&self, id: &LogId) -> Result<(), StoreError> {
    self.client.delete(&format!("/logs/{id}")).await?;
    Ok(())
  }
}
