use async_trait::async_trait;
use reqwest::Method;
use spinlog_core::domain::{AlbumSummary, CatalogAlbumId};
use spinlog_core::ports::{FavoritesStore, StoreError};

use crate::client::ApiClient;
use crate::dto::WireAlbum;

#[derive(Clone)]
pub struct HttpFavoritesStore {
  client: ApiClient,
}

impl HttpFavoritesStore {
  pub fn new(client: ApiClient) -> Self {
    Self { client }
  }
}

#[async_trait]
impl FavoritesStore for HttpFavoritesStore {
  async fn list(&self) -> Result<Vec<AlbumSummary>, StoreError> {
    let wire: Vec<WireAlbum> = self.client.get_json("/favorites").await?;
    Ok(wire.into_iter().map(AlbumSummary::from).collect())
  }

  async fn add(&self, album: &AlbumSummary) -> Result<(), StoreError> {
    self.client.send_json(Method::POST, "/favorites", album).await?;
    Ok(())
  }

  async fn remove(&self, id: &CatalogAlbumId) -> Result<(), StoreError> {
    self.client.delete(&format!("/favorites/{id}")).await?;
    Ok(())
  }
}
