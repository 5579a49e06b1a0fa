use async_trait::async_trait;
use reqwest::Method;
use spinlog_core::domain::{AlbumSummary, Collection, CollectionId, EntryId, RankUpdate};
use spinlog_core::ports::{CollectionStore, StoreError};

use crate::client::ApiClient;
use crate::dto::{CreateCollectionBody, WireCollection};

#[derive(Clone)]
pub struct HttpCollectionStore {
  client: ApiClient,
}

impl HttpCollectionStore {
  pub fn new(client: ApiClient) -> Self {
    Self { client }
  }
}

#[async_trait]
impl CollectionStore for HttpCollectionStore {
  async fn fetch(&self, id: &CollectionId) -> Result<Collection, StoreError> {
    let wire: WireCollection = self.client.get_json(&format!("/collections/{id}")).await?;
    Ok(wire.into())
  }

  async fn create(&self, title: &str, description: &str) -> Result<Collection, StoreError> {
    let body = CreateCollectionBody { title, description };
    let wire: WireCollection = self.client.post_json("/collections", &body).await?;
    Ok(wire.into())
  }

  async fn attach_album(&self, id: &CollectionId, album: &AlbumSummary) -> Result<(), StoreError> {
    self.client.send_json(Method::POST, &format!("/collections/{id}/entries"), album).await?;
    Ok(())
  }

  async fn update_ranks(&self, id: &CollectionId, ranks: &[RankUpdate]) -> Result<(), StoreError> {
    self.client.send_json(Method::PUT, &format!("/collections/{id}/ranks"), ranks).await?;
    Ok(())
  }

  async fn delete_entry(&self, id: &CollectionId, entry_id: &EntryId) -> Result<(), StoreError> {
    self.client.delete(&format!("/collections/{id}/entries/{entry_id}")).await?;
    Ok(())
  }
}
